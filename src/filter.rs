//! Quality filtering and scoring of extracted documents.
//!
//! Applies, per candidate: snippet fallback for empty extractions,
//! snippet top-up for short content, a Chinese-character-ratio gate that
//! only rejects very short content, and an ad/spam gate. Survivors are
//! scored by content length (plus a whitelist bonus), sorted and capped.
//!
//! The soft thresholds are deliberate: "too short" alone never rejects,
//! and a failed ratio check is forgiven when the content is long enough
//! to compensate.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::ScoutConfig;
use crate::types::{CandidateDoc, Document, FilterStats};

/// Fraction of characters in the CJK Unified Ideographs range.
///
/// Returns 0.0 for empty input.
pub fn chinese_ratio(text: &str) -> f64 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let chinese = text
        .chars()
        .filter(|c| ('\u{4e00}'..='\u{9fff}').contains(c))
        .count();
    chinese as f64 / total as f64
}

/// Whether `text` meets the minimum Chinese-character ratio.
pub fn is_chinese_ratio_ok(text: &str, min_ratio: f64) -> bool {
    !text.is_empty() && chinese_ratio(text) >= min_ratio
}

/// Number of advertising keyword phrases present in `text`.
pub fn ad_keyword_score(text: &str, keywords: &[String]) -> usize {
    if text.is_empty() {
        return 0;
    }
    keywords.iter().filter(|kw| text.contains(kw.as_str())).count()
}

static BAR_RUN_RE: OnceLock<Regex> = OnceLock::new();
static STAR_RUN_RE: OnceLock<Regex> = OnceLock::new();
static PRICE_RE: OnceLock<Regex> = OnceLock::new();

/// Maximum price-like patterns tolerated before content reads as a listing.
const MAX_PRICE_PATTERNS: usize = 10;

/// Structural spam heuristic: template/marketing noise markers.
///
/// Triggers on runs of 10+ `|` or `*` characters, JS pseudo-links, or
/// more than [`MAX_PRICE_PATTERNS`] price-like number patterns.
pub fn is_spammy(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    let bars = BAR_RUN_RE.get_or_init(|| Regex::new(r"\|{10,}").expect("invalid bar-run regex"));
    let stars =
        STAR_RUN_RE.get_or_init(|| Regex::new(r"\*{10,}").expect("invalid star-run regex"));
    if bars.is_match(text) || stars.is_match(text) {
        return true;
    }

    if text.to_lowercase().contains("javascript:void") {
        return true;
    }

    let prices =
        PRICE_RE.get_or_init(|| Regex::new(r"\d{2,}\.?\d*万|￥\d+").expect("invalid price regex"));
    prices.find_iter(text).count() > MAX_PRICE_PATTERNS
}

/// Filter extracted contents and rank the survivors.
///
/// `contents[i]` is the extracted text for `candidates[i]` (empty on
/// extraction failure). Per candidate, in order:
///
/// 1. Empty content falls back to the snippet; still empty rejects as
///    `empty`.
/// 2. Content below `min_len` with a snippet available gets the snippet
///    appended (recovery, not rejection).
/// 3. Content still below `min_len` increments `too_short` only.
/// 4. A failed Chinese-ratio check (threshold relaxed for whitelist
///    domains) rejects only when the content is also shorter than the
///    configured cutoff; longer content is kept.
/// 5. Any ad keyword or the structural spam heuristic rejects as
///    `ad_keywords`.
///
/// Survivors score `content chars + whitelist bonus`; the output is
/// sorted by score descending (stable — equal scores keep candidate
/// order) and truncated to `max_docs`.
pub fn filter_and_rank(
    candidates: &[CandidateDoc],
    contents: Vec<String>,
    config: &ScoutConfig,
    min_len: usize,
    max_docs: usize,
) -> (Vec<Document>, FilterStats) {
    let mut stats = FilterStats {
        attempted: contents.len(),
        min_len,
        min_ratio_whitelist: config.min_ratio_whitelist,
        min_ratio_default: config.min_ratio_default,
        ..Default::default()
    };

    let mut documents: Vec<Document> = Vec::new();

    for (candidate, extracted) in candidates.iter().zip(contents) {
        let mut content = extracted.trim().to_string();
        if content.is_empty() {
            content = candidate.snippet.trim().to_string();
            if content.is_empty() {
                stats.empty += 1;
                continue;
            }
        }

        let snippet = candidate.snippet.trim();
        if content.chars().count() < min_len && !snippet.is_empty() {
            content = format!("{content}\n{snippet}");
        }

        // Soft signal only — short content is counted, never rejected here.
        if content.chars().count() < min_len {
            stats.too_short += 1;
        }

        let whitelisted = config.is_whitelisted(&candidate.domain);
        let min_ratio = if whitelisted {
            config.min_ratio_whitelist
        } else {
            config.min_ratio_default
        };
        if !is_chinese_ratio_ok(&content, min_ratio) {
            stats.low_chinese_ratio += 1;
            if content.chars().count() < config.ratio_reject_below_chars {
                continue;
            }
        }

        if ad_keyword_score(&content, &config.ad_keywords) >= 1 || is_spammy(&content) {
            stats.ad_keywords += 1;
            continue;
        }

        let mut score = content.chars().count() as u64;
        if whitelisted {
            score += config.whitelist_bonus;
        }
        documents.push(Document {
            title: candidate.title.clone(),
            url: candidate.url.clone(),
            domain: candidate.domain.clone(),
            content,
            score,
        });
    }

    documents.sort_by(|a, b| b.score.cmp(&a.score));
    documents.truncate(max_docs);
    stats.kept = documents.len();

    tracing::debug!(
        attempted = stats.attempted,
        kept = stats.kept,
        empty = stats.empty,
        too_short = stats.too_short,
        low_ratio = stats.low_chinese_ratio,
        ad = stats.ad_keywords,
        "filter stage finished"
    );

    (documents, stats)
}
