//! # topic-scout
//!
//! Zero-configuration acquisition pipeline: a free-text topic in, a small
//! corpus of cleaned, de-duplicated, domain-scored Chinese documents out.
//!
//! ## Design
//!
//! - Queries nine unreliable public search backends concurrently (news
//!   verticals, SearxNG instances, general web search, site-restricted
//!   social search) and merges their hits with per-source failure isolation
//! - Deduplicates by normalised URL, drops blacklisted domains, orders
//!   whitelisted news domains first
//! - Extracts page text through a remote readability service with a
//!   direct-fetch fallback, at bounded concurrency
//! - Filters on snippet-recoverable emptiness, length, Chinese-character
//!   ratio and ad/spam markers, then scores and ranks the survivors
//!
//! The pipeline is a pure, stateless, per-request transformation: no
//! cache, no persistence, no shared mutable state across requests. Total
//! backend failure degrades to an empty result with diagnostics — the
//! only error callers ever see is invalid configuration.
//!
//! ## Security
//!
//! - No API keys or secrets to leak
//! - No network listeners — this is a library, not a server
//! - Queries are logged only at trace level

pub mod aggregator;
pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod http;
pub mod source;
pub mod sources;
pub mod types;

pub use config::ScoutConfig;
pub use error::{Result, ScoutError};
pub use source::{Source, SourceAdapter};
pub use types::{AggregationMeta, CandidateDoc, Document, FilterStats, SearchHit};

/// Default minimum content length for [`extract_and_filter`].
pub const DEFAULT_MIN_LEN: usize = 150;

/// Default maximum number of documents for [`extract_and_filter`].
pub const DEFAULT_MAX_DOCS: usize = 20;

/// Aggregate search candidates for a topic across all registered sources.
///
/// Queries every source in `config.sources` concurrently, merges the hits
/// in registration order, deduplicates by normalised URL, drops
/// blacklisted domains, orders whitelisted domains first, and returns up
/// to `max_results` candidates plus per-source diagnostics.
///
/// # Errors
///
/// Returns [`ScoutError::Config`] if `config` is invalid. Backend
/// failures never propagate: when every source fails, the candidate list
/// is empty and `meta.errors` carries one entry per source.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> topic_scout::Result<()> {
/// let config = topic_scout::ScoutConfig::default();
/// let (candidates, meta) = topic_scout::aggregate("新能源汽车", 12, &config).await?;
/// println!("{} candidates via {:?}", candidates.len(), meta.chosen_source);
/// # Ok(())
/// # }
/// ```
pub async fn aggregate(
    query: &str,
    max_results: usize,
    config: &ScoutConfig,
) -> Result<(Vec<CandidateDoc>, AggregationMeta)> {
    config.validate()?;
    Ok(aggregator::search::aggregate(query, max_results, config).await)
}

/// Extract, filter and rank documents for previously aggregated candidates.
///
/// Fetches content for every candidate at bounded concurrency (reader
/// service first, direct fetch as fallback), substitutes snippets for
/// failed extractions, applies the quality gates and returns the scored
/// survivors (at most `max_docs`) together with filter statistics.
///
/// Infallible by design: extraction failures degrade to snippet
/// fallbacks, and rejected candidates surface only in the returned
/// [`FilterStats`]. Every returned document has non-empty content.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> topic_scout::Result<()> {
/// let config = topic_scout::ScoutConfig::default();
/// let (candidates, _meta) = topic_scout::aggregate("新能源汽车", 12, &config).await?;
/// let (documents, stats) = topic_scout::extract_and_filter(
///     &candidates,
///     topic_scout::DEFAULT_MIN_LEN,
///     topic_scout::DEFAULT_MAX_DOCS,
///     &config,
/// )
/// .await;
/// println!("kept {} of {}", stats.kept, stats.attempted);
/// # Ok(())
/// # }
/// ```
pub async fn extract_and_filter(
    candidates: &[CandidateDoc],
    min_len: usize,
    max_docs: usize,
    config: &ScoutConfig,
) -> (Vec<Document>, FilterStats) {
    let contents = extract::extract_batch(candidates, config).await;
    filter::filter_and_rank(candidates, contents, config, min_len, max_docs)
}
