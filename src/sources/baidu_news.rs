//! Baidu news vertical — primary news source.
//!
//! Scrapes `news.baidu.com/ns`, which still serves server-rendered HTML.
//! The result markup drifts between `div.result` cards and plain anchor
//! lists, so a bare-anchor sweep backs up the card selector.

use crate::config::ScoutConfig;
use crate::error::ScoutError;
use crate::http;
use crate::source::{Source, SourceAdapter};
use crate::types::SearchHit;
use scraper::{Html, Selector};

/// Baidu news HTML scraper.
pub struct BaiduNewsSource;

impl SourceAdapter for BaiduNewsSource {
    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        config: &ScoutConfig,
    ) -> Result<Vec<SearchHit>, ScoutError> {
        tracing::trace!(query, "Baidu news search");

        let client = http::build_client(config, config.search_timeout_seconds)?;
        let rn = limit.to_string();

        let response = client
            .get("https://news.baidu.com/ns")
            .query(&[
                ("word", query),
                ("tn", "news"),
                ("from", "news"),
                ("cl", "2"),
                ("rn", rn.as_str()),
                ("ct", "1"),
            ])
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", http::ACCEPT_LANGUAGE)
            .send()
            .await
            .map_err(|e| ScoutError::Http(format!("Baidu news request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ScoutError::Http(format!("Baidu news HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| ScoutError::Http(format!("Baidu news response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "Baidu news response received");

        parse_baidu_news_html(&html, limit)
    }

    fn source(&self) -> Source {
        Source::BaiduNews
    }
}

/// Parse Baidu news HTML into search hits.
///
/// Primary strategy: `div.result > h3 > a` cards with a summary block.
/// Fallback for markup drift: sweep every anchor whose text looks like a
/// headline (6+ chars) and whose href points at a news page.
pub(crate) fn parse_baidu_news_html(
    html: &str,
    limit: usize,
) -> Result<Vec<SearchHit>, ScoutError> {
    let document = Html::parse_document(html);

    let result_sel = Selector::parse("div.result")
        .map_err(|e| ScoutError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse("h3 a")
        .map_err(|e| ScoutError::Parse(format!("invalid title selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".c-summary, .c-abstract, p")
        .map_err(|e| ScoutError::Parse(format!("invalid snippet selector: {e:?}")))?;

    let mut hits = Vec::new();

    for element in document.select(&result_sel) {
        let title_el = match element.select(&title_sel).next() {
            Some(el) => el,
            None => continue,
        };

        let title = title_el.text().collect::<String>().trim().to_string();
        let url = title_el
            .value()
            .attr("href")
            .map(str::to_string)
            .unwrap_or_default();
        if title.is_empty() || url.is_empty() {
            continue;
        }

        let snippet = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        hits.push(SearchHit { title, url, snippet });
        if hits.len() >= limit {
            break;
        }
    }

    // Markup-drift fallback: headline-looking anchors anywhere on the page.
    if hits.is_empty() {
        let anchor_sel = Selector::parse("a")
            .map_err(|e| ScoutError::Parse(format!("invalid anchor selector: {e:?}")))?;
        for anchor in document.select(&anchor_sel) {
            let title = anchor.text().collect::<String>().trim().to_string();
            let url = anchor
                .value()
                .attr("href")
                .map(str::to_string)
                .unwrap_or_default();
            if url.is_empty() || title.chars().count() < 6 {
                continue;
            }
            if !url.contains("news") && !url.starts_with("http") {
                continue;
            }
            hits.push(SearchHit {
                title,
                url,
                snippet: String::new(),
            });
            if hits.len() >= limit {
                break;
            }
        }
    }

    tracing::debug!(count = hits.len(), "Baidu news hits parsed");
    Ok(hits)
}
