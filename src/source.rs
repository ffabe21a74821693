//! Tagged search-source variants and the uniform adapter trait.
//!
//! Each backend (Baidu News, Sogou News, SearxNG instances, Baidu web,
//! Bing web, site-restricted Bing, Google News RSS) is a [`Source`]
//! variant dispatched to a concrete [`SourceAdapter`] implementation, so
//! backends can be added or removed without touching the aggregator's
//! merge logic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ScoutConfig;
use crate::error::ScoutError;
use crate::types::SearchHit;

/// Public SearxNG instances tried (in order) when no override is configured.
pub const SEARX_FALLBACK_INSTANCES: &[&str] = &[
    "https://searx.tiekoetter.com",
    "https://search.bus-hit.me",
    "https://searx.be",
];

/// A registered search backend.
///
/// Variants carry their per-backend parameters (SearxNG instance URL,
/// Bing `site:` restriction) so that one adapter implementation can
/// serve several registered sources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// Baidu news vertical (`news.baidu.com`).
    BaiduNews,
    /// Sogou news vertical (`news.sogou.com`).
    SogouNews,
    /// One SearxNG federated-search instance.
    Searx { instance: String },
    /// Baidu general web search (`www.baidu.com/s`).
    BaiduWeb,
    /// Bing general web search.
    BingWeb,
    /// Bing restricted to one site via a `site:` operator. `label` is the
    /// short name used in the source identity (`bing_site_<label>`).
    BingSite { site: String, label: String },
    /// Google News RSS feed (zh-CN locale). Not part of the default
    /// registry; registrable via [`ScoutConfig`].
    GoogleNews,
}

impl Source {
    /// Stable identity string used in `AggregationMeta` diagnostics.
    pub fn id(&self) -> String {
        match self {
            Self::BaiduNews => "baidu_news".into(),
            Self::SogouNews => "sogou_news".into(),
            Self::Searx { instance } => format!("searxng:{instance}"),
            Self::BaiduWeb => "baidu_html".into(),
            Self::BingWeb => "bing_html".into(),
            Self::BingSite { label, .. } => format!("bing_site_{label}"),
            Self::GoogleNews => "google_news_rss".into(),
        }
    }

    /// Construct a site-restricted Bing source.
    pub fn bing_site(site: impl Into<String>, label: impl Into<String>) -> Self {
        Self::BingSite {
            site: site.into(),
            label: label.into(),
        }
    }

    /// The default registry, in priority order: two news verticals, the
    /// SearxNG instances (an override, when given, is tried first), two
    /// general web searches, and two site-restricted social searches.
    pub fn default_registry(searx_override: Option<&str>) -> Vec<Source> {
        let mut sources = vec![Self::BaiduNews, Self::SogouNews];
        if let Some(instance) = searx_override {
            sources.push(Self::Searx {
                instance: instance.trim_end_matches('/').to_string(),
            });
        }
        sources.extend(SEARX_FALLBACK_INSTANCES.iter().map(|instance| Self::Searx {
            instance: (*instance).to_string(),
        }));
        sources.push(Self::BaiduWeb);
        sources.push(Self::BingWeb);
        sources.push(Self::bing_site("weibo.com", "weibo"));
        sources.push(Self::bing_site("mp.weixin.qq.com", "weixin"));
        sources
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// A pluggable search backend adapter.
///
/// Implementors fetch one backend's response for a query and parse it
/// into uniform [`SearchHit`] values. Each adapter handles its own:
///
/// - request construction with query encoding
/// - HTTP request with browser-like headers and a per-call timeout
/// - response parsing (CSS selectors, JSON or RSS) with at least one
///   fallback strategy for markup drift
///
/// Zero hits after all strategies is an empty list, not an error; the
/// aggregator records errors and empty results in its diagnostics and
/// never lets one adapter's failure abort the others.
///
/// All implementations must be `Send + Sync` for concurrent fan-out.
pub trait SourceAdapter: Send + Sync {
    /// Fetch up to `limit` hits for `query` from this backend.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError`] if the HTTP request fails or the response
    /// cannot be parsed. The aggregator isolates these per source.
    fn fetch(
        &self,
        query: &str,
        limit: usize,
        config: &ScoutConfig,
    ) -> impl std::future::Future<Output = Result<Vec<SearchHit>, ScoutError>> + Send;

    /// Returns which [`Source`] this adapter serves.
    fn source(&self) -> Source;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identities_match_the_original_naming() {
        assert_eq!(Source::BaiduNews.id(), "baidu_news");
        assert_eq!(Source::SogouNews.id(), "sogou_news");
        assert_eq!(Source::BaiduWeb.id(), "baidu_html");
        assert_eq!(Source::BingWeb.id(), "bing_html");
        assert_eq!(
            Source::Searx {
                instance: "https://searx.be".into()
            }
            .id(),
            "searxng:https://searx.be"
        );
        assert_eq!(Source::bing_site("weibo.com", "weibo").id(), "bing_site_weibo");
        assert_eq!(
            Source::bing_site("mp.weixin.qq.com", "weixin").id(),
            "bing_site_weixin"
        );
        assert_eq!(Source::GoogleNews.id(), "google_news_rss");
    }

    #[test]
    fn display_uses_identity() {
        assert_eq!(Source::BaiduNews.to_string(), "baidu_news");
        assert_eq!(
            Source::bing_site("weibo.com", "weibo").to_string(),
            "bing_site_weibo"
        );
    }

    #[test]
    fn default_registry_has_nine_sources() {
        let sources = Source::default_registry(None);
        assert_eq!(sources.len(), 9);
        assert_eq!(sources[0], Source::BaiduNews);
        assert_eq!(sources[1], Source::SogouNews);
        assert!(matches!(sources[2], Source::Searx { .. }));
        assert_eq!(sources[8], Source::bing_site("mp.weixin.qq.com", "weixin"));
    }

    #[test]
    fn searx_override_is_tried_first_among_instances() {
        let sources = Source::default_registry(Some("https://searx.internal/"));
        assert_eq!(sources.len(), 10);
        assert_eq!(
            sources[2],
            Source::Searx {
                instance: "https://searx.internal".into()
            }
        );
        // The fixed fallback instances still follow.
        assert_eq!(
            sources[3],
            Source::Searx {
                instance: SEARX_FALLBACK_INSTANCES[0].into()
            }
        );
    }

    #[test]
    fn registry_order_is_stable() {
        let a = Source::default_registry(None);
        let b = Source::default_registry(None);
        assert_eq!(a, b);
    }

    #[test]
    fn source_serde_round_trip() {
        let source = Source::bing_site("weibo.com", "weibo");
        let json = serde_json::to_string(&source).expect("serialize");
        let decoded: Source = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, source);
    }
}
