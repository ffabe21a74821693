//! Bing web search, plain or restricted to one site.
//!
//! One scraper serves both the general `bing_html` source and the
//! site-restricted social-platform sources (`site:weibo.com`,
//! `site:mp.weixin.qq.com`) — the only difference is a `site:` operator
//! prepended to the query.

use crate::config::ScoutConfig;
use crate::error::ScoutError;
use crate::http;
use crate::source::{Source, SourceAdapter};
use crate::types::SearchHit;
use scraper::{Html, Selector};

/// Bing HTML search scraper, optionally restricted to a single site.
pub struct BingSource {
    site: Option<String>,
    label: String,
}

impl BingSource {
    /// General web search.
    pub fn web() -> Self {
        Self {
            site: None,
            label: String::new(),
        }
    }

    /// Search restricted to `site` via Bing's `site:` operator.
    pub fn site(site: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            site: Some(site.into()),
            label: label.into(),
        }
    }
}

impl SourceAdapter for BingSource {
    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        config: &ScoutConfig,
    ) -> Result<Vec<SearchHit>, ScoutError> {
        let q = match self.site {
            Some(ref site) => format!("site:{site} {query}"),
            None => query.to_string(),
        };
        tracing::trace!(query = %q, "Bing search");

        let client = http::build_client(config, config.search_timeout_seconds)?;

        let response = client
            .get("https://www.bing.com/search")
            .query(&[("q", q.as_str()), ("ensearch", "1"), ("setlang", "zh-cn")])
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", http::ACCEPT_LANGUAGE)
            .send()
            .await
            .map_err(|e| ScoutError::Http(format!("Bing request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ScoutError::Http(format!("Bing HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| ScoutError::Http(format!("Bing response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "Bing response received");

        parse_bing_html(&html, limit)
    }

    fn source(&self) -> Source {
        match self.site {
            Some(ref site) => Source::BingSite {
                site: site.clone(),
                label: self.label.clone(),
            },
            None => Source::BingWeb,
        }
    }
}

/// Parse Bing HTML into search hits.
///
/// Primary strategy: `li.b_algo` organic result containers. Fallback for
/// markup drift: any `.b_algo` container regardless of element type.
pub(crate) fn parse_bing_html(html: &str, limit: usize) -> Result<Vec<SearchHit>, ScoutError> {
    let document = Html::parse_document(html);

    let primary_sel = Selector::parse("li.b_algo")
        .map_err(|e| ScoutError::Parse(format!("invalid result selector: {e:?}")))?;
    let fallback_sel = Selector::parse(".b_algo")
        .map_err(|e| ScoutError::Parse(format!("invalid fallback selector: {e:?}")))?;
    let title_sel = Selector::parse("h2 a")
        .map_err(|e| ScoutError::Parse(format!("invalid title selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".b_caption p, .b_lineclamp2")
        .map_err(|e| ScoutError::Parse(format!("invalid snippet selector: {e:?}")))?;

    let mut hits = collect_bing_hits(&document, &primary_sel, &title_sel, &snippet_sel, limit);
    if hits.is_empty() {
        hits = collect_bing_hits(&document, &fallback_sel, &title_sel, &snippet_sel, limit);
    }

    tracing::debug!(count = hits.len(), "Bing hits parsed");
    Ok(hits)
}

fn collect_bing_hits(
    document: &Html,
    result_sel: &Selector,
    title_sel: &Selector,
    snippet_sel: &Selector,
    limit: usize,
) -> Vec<SearchHit> {
    let mut hits = Vec::new();

    for element in document.select(result_sel) {
        let title_el = match element.select(title_sel).next() {
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
            .select(snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        hits.push(SearchHit { title, url, snippet });
        if hits.len() >= limit {
            break;
        }
    }

    hits
}
