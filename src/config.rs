//! Pipeline configuration with sensible defaults.
//!
//! [`ScoutConfig`] controls which sources are queried, timeouts, the
//! reader-service endpoint, and the domain/keyword lists driving the
//! filter stage. The lists ship as built-in constants and become plain
//! immutable data on the config — nothing here is process-global.

use crate::error::ScoutError;
use crate::source::Source;

/// Advertising/marketing keyword phrases; one match rejects a document.
pub const AD_KEYWORDS: &[&str] = &[
    "推广",
    "广告",
    "下载APP",
    "扫码加群",
    "优惠券",
    "秒杀",
    "团购",
    "返利",
    "导购",
    "赞助",
    "商务合作",
    "加微信",
    "扫码",
    "点击购买",
    "独家优惠",
    "开屏广告",
    "投放",
    "拉新",
    "促销",
    "降价",
    "试驾",
    "下订",
    "到店",
    "预约",
    "报价",
    "一口价",
    "优惠",
    "活动",
    "立减",
    "javascript:void",
    "立即购买",
    "点击领取",
    "福利",
    "红包",
];

/// Mainstream news domains ranked ahead of other sources and granted a
/// scoring bonus plus a relaxed Chinese-ratio threshold.
pub const WHITELIST_DOMAINS: &[&str] = &[
    // 新闻与深度媒体
    "thepaper.cn",
    "jiemian.com",
    "yicai.com",
    "21jingji.com",
    "nbd.com.cn",
    "sina.com.cn",
    "news.sina.com.cn",
    "163.com",
    "news.163.com",
    "sohu.com",
    "news.sohu.com",
    // 央媒与权威
    "people.com.cn",
    "xinhuanet.com",
    "cctv.com",
    "cnr.cn",
    "chinanews.com.cn",
    "china.com.cn",
    // 地方主流
    "ifeng.com",
    "news.ifeng.com",
];

/// Encyclopedia/asset domains excluded from the candidate pool outright.
pub const BLACKLIST_DOMAINS: &[&str] = &[
    "wikipedia.org",
    "upload.wikimedia.org",
    "commons.wikimedia.org",
    "baike.baidu.com",
];

/// Terms appended (negated) to every query to bias backends away from
/// commercial noise.
pub const QUERY_EXCLUSIONS: &[&str] = &[
    "推广", "广告", "下载", "APP", "优惠券", "试驾", "促销", "降价",
];

const DEFAULT_READER_ENDPOINT: &str = "https://r.jina.ai";

/// Environment variable naming an additional SearxNG instance to try first.
pub const SEARX_URL_ENV: &str = "SEARXNG_URL";

/// Configuration for one pipeline invocation.
///
/// Use [`Default::default()`] for the fixed nine-source registry, or
/// [`ScoutConfig::from_env`] to additionally honour `SEARXNG_URL`.
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    /// Registered search sources, queried concurrently. Registration
    /// order decides `chosen_source` and merge order.
    pub sources: Vec<Source>,
    /// Per-source search request timeout in seconds.
    pub search_timeout_seconds: u64,
    /// Per-URL content fetch timeout in seconds (reader and direct stages).
    pub fetch_timeout_seconds: u64,
    /// Custom User-Agent. If `None`, rotates through a built-in list of
    /// realistic browser User-Agents.
    pub user_agent: Option<String>,
    /// Reader-service base URL; the target URL is appended to the path.
    pub reader_endpoint: String,
    /// Minimum chars for a reader response or a main-content region to
    /// count as a successful extraction.
    pub min_extract_chars: usize,
    /// Maximum simultaneous content fetches per batch.
    pub extract_concurrency: usize,
    /// Negated terms appended to every query.
    pub query_exclusions: Vec<String>,
    /// Domain suffixes ordered first and granted the scoring bonus.
    pub whitelist: Vec<String>,
    /// Domain suffixes dropped from the candidate pool.
    pub blacklist: Vec<String>,
    /// Phrases whose presence rejects a document.
    pub ad_keywords: Vec<String>,
    /// Minimum Chinese-character ratio for whitelist domains.
    pub min_ratio_whitelist: f64,
    /// Minimum Chinese-character ratio for all other domains.
    pub min_ratio_default: f64,
    /// A failed ratio check only rejects content shorter than this.
    pub ratio_reject_below_chars: usize,
    /// Score bonus for whitelist domains.
    pub whitelist_bonus: u64,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            sources: Source::default_registry(None),
            search_timeout_seconds: 12,
            fetch_timeout_seconds: 8,
            user_agent: None,
            reader_endpoint: DEFAULT_READER_ENDPOINT.to_string(),
            min_extract_chars: 300,
            extract_concurrency: 20,
            query_exclusions: QUERY_EXCLUSIONS.iter().map(|s| (*s).to_string()).collect(),
            whitelist: WHITELIST_DOMAINS.iter().map(|s| (*s).to_string()).collect(),
            blacklist: BLACKLIST_DOMAINS.iter().map(|s| (*s).to_string()).collect(),
            ad_keywords: AD_KEYWORDS.iter().map(|s| (*s).to_string()).collect(),
            min_ratio_whitelist: 0.1,
            min_ratio_default: 0.15,
            ratio_reject_below_chars: 120,
            whitelist_bonus: 100,
        }
    }
}

impl ScoutConfig {
    /// Default configuration, with the `SEARXNG_URL` environment variable
    /// (when set and non-empty) prepending one SearxNG instance to the
    /// fixed fallback list.
    pub fn from_env() -> Self {
        let searx_override = std::env::var(SEARX_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty());
        Self {
            sources: Source::default_registry(searx_override.as_deref()),
            ..Default::default()
        }
    }

    /// Validates this configuration, returning an error if any field is
    /// invalid.
    ///
    /// Checks:
    /// - `sources` must not be empty
    /// - both timeouts must be greater than 0
    /// - `extract_concurrency` must be greater than 0
    /// - both ratio thresholds must lie in `0.0..=1.0`
    pub fn validate(&self) -> Result<(), ScoutError> {
        if self.sources.is_empty() {
            return Err(ScoutError::Config(
                "at least one source must be registered".into(),
            ));
        }
        if self.search_timeout_seconds == 0 || self.fetch_timeout_seconds == 0 {
            return Err(ScoutError::Config(
                "timeouts must be greater than 0".into(),
            ));
        }
        if self.extract_concurrency == 0 {
            return Err(ScoutError::Config(
                "extract_concurrency must be greater than 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_ratio_whitelist)
            || !(0.0..=1.0).contains(&self.min_ratio_default)
        {
            return Err(ScoutError::Config(
                "ratio thresholds must be within 0.0..=1.0".into(),
            ));
        }
        Ok(())
    }

    /// Whitelist membership: plain domain-suffix match.
    pub fn is_whitelisted(&self, domain: &str) -> bool {
        !domain.is_empty() && self.whitelist.iter().any(|listed| domain.ends_with(listed))
    }

    /// Blacklist membership: plain domain-suffix match.
    pub fn is_blacklisted(&self, domain: &str) -> bool {
        !domain.is_empty() && self.blacklist.iter().any(|listed| domain.ends_with(listed))
    }
}
