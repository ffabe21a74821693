//! SearxNG federated-search instances — JSON API.
//!
//! One adapter serves any number of registered instances; each instance
//! is its own named source so a dead instance shows up individually in
//! the aggregation diagnostics.

use crate::config::ScoutConfig;
use crate::error::ScoutError;
use crate::http;
use crate::source::{Source, SourceAdapter};
use crate::types::SearchHit;
use serde::Deserialize;

/// SearxNG JSON API client for a single instance.
pub struct SearxSource {
    /// Instance base URL, e.g. `https://searx.be`.
    pub instance: String,
}

/// Top-level SearxNG `/search?format=json` response.
#[derive(Debug, Deserialize)]
pub(crate) struct SearxResponse {
    #[serde(default)]
    pub(crate) results: Vec<SearxItem>,
}

/// One result entry; instances omit fields freely, so everything defaults.
#[derive(Debug, Deserialize)]
pub(crate) struct SearxItem {
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) url: String,
    /// SearxNG calls the snippet `content`.
    #[serde(default)]
    pub(crate) content: String,
}

impl SourceAdapter for SearxSource {
    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        config: &ScoutConfig,
    ) -> Result<Vec<SearchHit>, ScoutError> {
        tracing::trace!(query, instance = %self.instance, "SearxNG search");

        let client = http::build_client(config, config.search_timeout_seconds)?;
        let endpoint = format!("{}/search", self.instance.trim_end_matches('/'));

        let response = client
            .get(&endpoint)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("language", "zh-CN"),
                ("safesearch", "1"),
                ("categories", "general"),
            ])
            .header("Accept-Language", http::ACCEPT_LANGUAGE)
            .send()
            .await
            .map_err(|e| ScoutError::Http(format!("SearxNG request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ScoutError::Http(format!("SearxNG HTTP error: {e}")))?;

        let parsed: SearxResponse = response
            .json()
            .await
            .map_err(|e| ScoutError::Parse(format!("SearxNG JSON decode failed: {e}")))?;

        let hits = hits_from_response(parsed, limit);
        tracing::debug!(count = hits.len(), instance = %self.instance, "SearxNG hits parsed");
        Ok(hits)
    }

    fn source(&self) -> Source {
        Source::Searx {
            instance: self.instance.clone(),
        }
    }
}

/// Map a decoded SearxNG response to search hits, dropping URL-less entries.
pub(crate) fn hits_from_response(response: SearxResponse, limit: usize) -> Vec<SearchHit> {
    response
        .results
        .into_iter()
        .filter(|item| !item.url.is_empty())
        .take(limit)
        .map(|item| SearchHit {
            title: item.title,
            url: item.url,
            snippet: item.content,
        })
        .collect()
}
