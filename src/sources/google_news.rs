//! Google News RSS feed — zh-CN locale.
//!
//! Queries `news.google.com/rss/search` and parses the feed with
//! `feed-rs`. Not part of the default registry; register
//! [`crate::source::Source::GoogleNews`] explicitly to enable it.

use crate::config::ScoutConfig;
use crate::error::ScoutError;
use crate::http;
use crate::source::{Source, SourceAdapter};
use crate::types::SearchHit;

/// Google News RSS client.
pub struct GoogleNewsSource;

impl SourceAdapter for GoogleNewsSource {
    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        config: &ScoutConfig,
    ) -> Result<Vec<SearchHit>, ScoutError> {
        tracing::trace!(query, "Google News RSS search");

        let client = http::build_client(config, config.search_timeout_seconds)?;

        let response = client
            .get("https://news.google.com/rss/search")
            .query(&[
                ("q", query),
                ("hl", "zh-CN"),
                ("gl", "CN"),
                ("ceid", "CN:zh-Hans"),
            ])
            .header("Accept-Language", http::ACCEPT_LANGUAGE)
            .send()
            .await
            .map_err(|e| ScoutError::Http(format!("Google News request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ScoutError::Http(format!("Google News HTTP error: {e}")))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ScoutError::Http(format!("Google News response read failed: {e}")))?;

        tracing::trace!(bytes = bytes.len(), "Google News response received");

        parse_google_news_feed(&bytes, limit)
    }

    fn source(&self) -> Source {
        Source::GoogleNews
    }
}

/// Parse an RSS/Atom payload into search hits.
///
/// Entries without a usable link are dropped; an entry id that is itself
/// a URL backs up a missing link element.
pub(crate) fn parse_google_news_feed(bytes: &[u8], limit: usize) -> Result<Vec<SearchHit>, ScoutError> {
    let feed = feed_rs::parser::parse(bytes)
        .map_err(|e| ScoutError::Parse(format!("Google News feed parse failed: {e}")))?;

    let hits: Vec<SearchHit> = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let url = entry
                .links
                .first()
                .map(|l| l.href.clone())
                .or_else(|| entry.id.starts_with("http").then(|| entry.id.clone()))?;
            Some(SearchHit {
                title: entry.title.map(|t| t.content).unwrap_or_default(),
                url,
                snippet: entry.summary.map(|t| t.content).unwrap_or_default(),
            })
        })
        .take(limit)
        .collect();

    tracing::debug!(count = hits.len(), "Google News hits parsed");
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
<channel>
  <title>"新能源汽车" - Google 新闻</title>
  <item>
    <title>新能源汽车购置税减免政策延续</title>
    <link>https://news.example.cn/g/1</link>
    <guid>g-1</guid>
    <description>财政部明确购置税减免延续至……</description>
  </item>
  <item>
    <title>海外建厂潮下的供应链重构</title>
    <link>https://news.example.cn/g/2</link>
    <guid>g-2</guid>
  </item>
  <item>
    <title>没有链接的条目</title>
    <guid>not-a-url</guid>
  </item>
</channel>
</rss>"#;

    #[test]
    fn parse_mock_feed_returns_hits() {
        let hits = parse_google_news_feed(MOCK_RSS.as_bytes(), 10).expect("should parse");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "新能源汽车购置税减免政策延续");
        assert_eq!(hits[0].url, "https://news.example.cn/g/1");
        assert!(hits[0].snippet.contains("购置税减免"));
        assert!(hits[1].snippet.is_empty());
    }

    #[test]
    fn parse_respects_limit() {
        let hits = parse_google_news_feed(MOCK_RSS.as_bytes(), 1).expect("should parse");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn garbage_payload_is_a_parse_error() {
        let result = parse_google_news_feed(b"not xml at all", 10);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("parse"));
    }

    #[test]
    fn source_identity() {
        assert_eq!(GoogleNewsSource.source(), Source::GoogleNews);
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GoogleNewsSource>();
    }

    #[tokio::test]
    #[ignore] // Live test — run with `cargo test -- --ignored`
    async fn live_google_news_search() {
        let config = ScoutConfig::default();
        let hits = GoogleNewsSource.fetch("新能源汽车", 10, &config).await;
        if let Ok(hits) = hits {
            for h in &hits {
                assert!(!h.url.is_empty());
            }
        }
    }
}
