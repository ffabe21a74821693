//! Baidu general web search.
//!
//! Scrapes `www.baidu.com/s`. Organic results appear as `div.result` or
//! `div.c-container` cards; operator cards under `#content_left` are a
//! further variant, so all three container shapes are accepted.

use crate::config::ScoutConfig;
use crate::error::ScoutError;
use crate::http;
use crate::source::{Source, SourceAdapter};
use crate::types::SearchHit;
use scraper::{Html, Selector};

/// Baidu web HTML scraper.
pub struct BaiduWebSource;

impl SourceAdapter for BaiduWebSource {
    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        config: &ScoutConfig,
    ) -> Result<Vec<SearchHit>, ScoutError> {
        tracing::trace!(query, "Baidu web search");

        let client = http::build_client(config, config.search_timeout_seconds)?;

        let response = client
            .get("https://www.baidu.com/s")
            .query(&[("wd", query)])
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", http::ACCEPT_LANGUAGE)
            .send()
            .await
            .map_err(|e| ScoutError::Http(format!("Baidu request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ScoutError::Http(format!("Baidu HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| ScoutError::Http(format!("Baidu response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "Baidu response received");

        parse_baidu_web_html(&html, limit)
    }

    fn source(&self) -> Source {
        Source::BaiduWeb
    }
}

/// Parse Baidu web-search HTML into search hits.
pub(crate) fn parse_baidu_web_html(
    html: &str,
    limit: usize,
) -> Result<Vec<SearchHit>, ScoutError> {
    let document = Html::parse_document(html);

    let result_sel = Selector::parse("div.result, div.c-container, div#content_left .result-op")
        .map_err(|e| ScoutError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse("h3.t a, h3 > a")
        .map_err(|e| ScoutError::Parse(format!("invalid title selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".c-abstract")
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

        if hits.iter().any(|h: &SearchHit| h.url == url) {
            continue;
        }
        hits.push(SearchHit { title, url, snippet });
        if hits.len() >= limit {
            break;
        }
    }

    tracing::debug!(count = hits.len(), "Baidu web hits parsed");
    Ok(hits)
}
