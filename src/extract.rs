//! Best-effort page content extraction — reader service with direct-fetch
//! fallback.
//!
//! Extraction never fails visibly: every error path degrades to an empty
//! string, which the filter stage recovers from via the candidate's
//! snippet. Two named stages per URL:
//!
//! 1. **Reader stage** — a remote readability rendering of the page.
//!    Accepted only when the response succeeds and carries more than
//!    `min_extract_chars` characters; short or garbled output counts as
//!    failure, not success.
//! 2. **Direct stage** — fetch the raw page, strip script/style/noscript,
//!    and select the largest of several heuristic main-content regions,
//!    falling back to the whole page's visible text.

use std::sync::OnceLock;

use futures::StreamExt;
use regex::Regex;
use scraper::{Html, Selector};

use crate::config::ScoutConfig;
use crate::http;
use crate::types::CandidateDoc;

/// Heuristic main-content containers tried during the direct stage.
const REGION_SELECTORS: &[&str] = &[
    "article",
    "main",
    "div#content",
    "div.post",
    "div.content",
    "section",
];

/// Extract readable text for one URL. Returns an empty string on any
/// failure (network error, timeout, unusable content) — never errors.
pub async fn extract_text(url: &str, config: &ScoutConfig) -> String {
    if let Some(text) = reader_stage(url, config).await {
        return text;
    }
    direct_stage(url, config).await.unwrap_or_default()
}

/// Extract content for a batch of candidates with bounded concurrency.
///
/// Output order matches input order; a failed extraction yields an empty
/// string at its position. Concurrency is capped by
/// `config.extract_concurrency` so one request cannot open an unbounded
/// number of simultaneous fetches.
pub async fn extract_batch(candidates: &[CandidateDoc], config: &ScoutConfig) -> Vec<String> {
    let concurrency = config.extract_concurrency.max(1);
    futures::stream::iter(candidates.iter().map(|c| extract_text(&c.url, config)))
        .buffered(concurrency)
        .collect()
        .await
}

/// Reader stage: remote readability rendering.
async fn reader_stage(url: &str, config: &ScoutConfig) -> Option<String> {
    let client = http::build_client(config, config.fetch_timeout_seconds).ok()?;
    let reader_url = format!("{}/{}", config.reader_endpoint.trim_end_matches('/'), url);

    let response = client.get(&reader_url).send().await.ok()?;
    if !response.status().is_success() {
        tracing::debug!(url, status = %response.status(), "reader stage rejected");
        return None;
    }

    let body = response.text().await.ok()?;
    if body.chars().count() <= config.min_extract_chars {
        tracing::debug!(url, chars = body.chars().count(), "reader output too short");
        return None;
    }

    Some(clean_text(&body))
}

/// Direct stage: raw fetch plus heuristic main-content selection.
async fn direct_stage(url: &str, config: &ScoutConfig) -> Option<String> {
    let client = http::build_client(config, config.fetch_timeout_seconds).ok()?;

    let response = client.get(url).send().await.ok()?;
    if !response.status().is_success() {
        tracing::debug!(url, status = %response.status(), "direct fetch rejected");
        return None;
    }

    let html = response.text().await.ok()?;
    let text = extract_from_html(&html, config.min_extract_chars);
    let cleaned = clean_text(&text);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Pull readable text out of raw HTML.
///
/// Strips script/style/noscript, then returns the largest main-content
/// region exceeding `min_region_chars`, or the whole page's visible text
/// when no region qualifies. Extracted as a separate function for
/// testability without a server.
pub(crate) fn extract_from_html(html: &str, min_region_chars: usize) -> String {
    let stripped = strip_boilerplate_tags(html);
    let document = Html::parse_document(&stripped);

    let mut best = String::new();
    for selector_str in REGION_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            let text = joined_text(element.text());
            if text.chars().count() > min_region_chars
                && text.chars().count() > best.chars().count()
            {
                best = text;
            }
        }
    }
    if !best.is_empty() {
        return best;
    }

    joined_text(document.root_element().text())
}

/// Join text nodes with newlines, trimming each and dropping blanks.
fn joined_text<'a>(fragments: impl Iterator<Item = &'a str>) -> String {
    fragments
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remove boilerplate HTML tags and their content before parsing.
fn strip_boilerplate_tags(html: &str) -> String {
    let tags = ["script", "style", "noscript"];

    let mut result = html.to_owned();
    for tag in &tags {
        result = strip_tag(&result, tag);
    }
    result
}

/// Remove all instances of a specific HTML tag and its content.
fn strip_tag(html: &str, tag: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let lower = html.to_lowercase();
    let open_tag = format!("<{tag}");
    let close_tag = format!("</{tag}>");

    let mut pos = 0;
    loop {
        // Find the next opening tag (case-insensitive).
        let start = match lower[pos..].find(&open_tag) {
            Some(offset) => pos + offset,
            None => {
                result.push_str(&html[pos..]);
                break;
            }
        };

        // Verify this is actually the target tag (not e.g. <scripted>).
        let after_tag = start + open_tag.len();
        if after_tag < lower.len() {
            let next_byte = lower.as_bytes()[after_tag];
            if next_byte != b' '
                && next_byte != b'>'
                && next_byte != b'/'
                && next_byte != b'\n'
                && next_byte != b'\r'
                && next_byte != b'\t'
            {
                result.push_str(&html[pos..after_tag]);
                pos = after_tag;
                continue;
            }
        }

        // Add everything before this tag.
        result.push_str(&html[pos..start]);

        // Find the matching closing tag.
        let end = match lower[start..].find(&close_tag) {
            Some(offset) => start + offset + close_tag.len(),
            None => {
                // No closing tag — skip to end of the opening tag.
                match lower[start..].find('>') {
                    Some(offset) => start + offset + 1,
                    None => html.len(),
                }
            }
        };

        pos = end;
    }

    result
}

static MD_IMAGE_RE: OnceLock<Regex> = OnceLock::new();
static MD_LINK_RE: OnceLock<Regex> = OnceLock::new();
static BARE_URL_RE: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();

/// Shared text cleaner for both extraction stages.
///
/// Strips markdown image/link remnants (the reader service emits
/// markdown), bare URLs, and collapses all whitespace runs to single
/// spaces.
pub(crate) fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let images = MD_IMAGE_RE
        .get_or_init(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").expect("invalid image regex"));
    let links =
        MD_LINK_RE.get_or_init(|| Regex::new(r"\[[^\]]*\]\([^)]*\)").expect("invalid link regex"));
    let urls =
        BARE_URL_RE.get_or_init(|| Regex::new(r"https?://\S+").expect("invalid URL regex"));
    let whitespace =
        WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

    let cleaned = images.replace_all(text, "");
    let cleaned = links.replace_all(&cleaned, "");
    let cleaned = urls.replace_all(&cleaned, "");
    whitespace.replace_all(&cleaned, " ").trim().to_string()
}
