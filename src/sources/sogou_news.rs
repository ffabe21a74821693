//! Sogou news vertical — second news source.
//!
//! Scrapes `news.sogou.com/news`. Result titles live on `a.news_tit`
//! anchors; when Sogou reshuffles the markup they fall back to plain
//! `h3 > a` headings, so that selector tops the list up.

use crate::config::ScoutConfig;
use crate::error::ScoutError;
use crate::http;
use crate::source::{Source, SourceAdapter};
use crate::types::SearchHit;
use scraper::{Html, Selector};

/// Sogou news HTML scraper.
pub struct SogouNewsSource;

impl SourceAdapter for SogouNewsSource {
    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        config: &ScoutConfig,
    ) -> Result<Vec<SearchHit>, ScoutError> {
        tracing::trace!(query, "Sogou news search");

        let client = http::build_client(config, config.search_timeout_seconds)?;
        let num = limit.to_string();

        let response = client
            .get("https://news.sogou.com/news")
            .query(&[
                ("query", query),
                ("type", "2"),
                ("page", "1"),
                ("num", num.as_str()),
            ])
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", http::ACCEPT_LANGUAGE)
            .send()
            .await
            .map_err(|e| ScoutError::Http(format!("Sogou news request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ScoutError::Http(format!("Sogou news HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| ScoutError::Http(format!("Sogou news response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "Sogou news response received");

        parse_sogou_news_html(&html, limit)
    }

    fn source(&self) -> Source {
        Source::SogouNews
    }
}

/// Parse Sogou news HTML into search hits.
///
/// Primary strategy: `a.news_tit` anchors. Fallback: `h3 > a` headings,
/// appended until the limit is reached (not only when the primary finds
/// nothing — partial pages are common).
pub(crate) fn parse_sogou_news_html(
    html: &str,
    limit: usize,
) -> Result<Vec<SearchHit>, ScoutError> {
    let document = Html::parse_document(html);

    let primary_sel = Selector::parse("a.news_tit")
        .map_err(|e| ScoutError::Parse(format!("invalid title selector: {e:?}")))?;
    let fallback_sel = Selector::parse("h3 a")
        .map_err(|e| ScoutError::Parse(format!("invalid fallback selector: {e:?}")))?;

    let mut hits: Vec<SearchHit> = Vec::new();

    for anchor in document.select(&primary_sel) {
        let title = anchor.text().collect::<String>().trim().to_string();
        let url = anchor
            .value()
            .attr("href")
            .map(str::to_string)
            .unwrap_or_default();
        if title.is_empty() || url.is_empty() {
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

    if hits.len() < limit {
        for anchor in document.select(&fallback_sel) {
            let title = anchor.text().collect::<String>().trim().to_string();
            let url = anchor
                .value()
                .attr("href")
                .map(str::to_string)
                .unwrap_or_default();
            if title.is_empty() || url.is_empty() {
                continue;
            }
            if hits.iter().any(|h| h.url == url) {
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

    tracing::debug!(count = hits.len(), "Sogou news hits parsed");
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_SOGOU_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="news-list">
  <div class="vrwrap">
    <h3 class="vr-title"><a class="news_tit" href="https://news.example.cn/s/1">充电桩建设提速，县域市场成新增长点</a></h3>
  </div>
  <div class="vrwrap">
    <h3 class="vr-title"><a class="news_tit" href="https://news.example.cn/s/2">智能驾驶立法进入征求意见阶段</a></h3>
  </div>
</div>
</body>
</html>"#;

    const MOCK_SOGOU_MIXED_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<h3><a class="news_tit" href="https://news.example.cn/s/1">充电桩建设提速</a></h3>
<h3><a href="https://news.example.cn/s/2">智能驾驶立法征求意见</a></h3>
<h3><a href="https://news.example.cn/s/3">车路协同试点扩容</a></h3>
</body>
</html>"#;

    #[test]
    fn parse_mock_html_returns_hits() {
        let hits = parse_sogou_news_html(MOCK_SOGOU_HTML, 10).expect("should parse");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "充电桩建设提速，县域市场成新增长点");
        assert_eq!(hits[0].url, "https://news.example.cn/s/1");
        assert!(hits[0].snippet.is_empty());
    }

    #[test]
    fn fallback_tops_up_from_plain_headings() {
        let hits = parse_sogou_news_html(MOCK_SOGOU_MIXED_HTML, 10).expect("should parse");
        // 1 primary hit + 2 fallback headings; the primary URL is not
        // re-added by the fallback pass.
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].url, "https://news.example.cn/s/1");
        assert_eq!(hits[1].url, "https://news.example.cn/s/2");
        assert_eq!(hits[2].url, "https://news.example.cn/s/3");
    }

    #[test]
    fn parse_respects_limit() {
        let hits = parse_sogou_news_html(MOCK_SOGOU_MIXED_HTML, 2).expect("should parse");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn parse_empty_html_returns_empty() {
        let hits = parse_sogou_news_html("<html><body></body></html>", 10).expect("should parse");
        assert!(hits.is_empty());
    }

    #[test]
    fn source_identity() {
        assert_eq!(SogouNewsSource.source(), Source::SogouNews);
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SogouNewsSource>();
    }

    #[tokio::test]
    #[ignore] // Live test — run with `cargo test -- --ignored`
    async fn live_sogou_news_search() {
        let config = ScoutConfig::default();
        let hits = SogouNewsSource.fetch("新能源汽车", 10, &config).await;
        if let Ok(hits) = hits {
            for h in &hits {
                assert!(!h.title.is_empty());
                assert!(!h.url.is_empty());
            }
        }
    }
}
