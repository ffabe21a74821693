//! Core aggregation: concurrent multi-source fan-out with failure isolation.
//!
//! Queries every registered source concurrently, records per-source
//! outcomes in [`AggregationMeta`], merges the hits in registration
//! order and hands them to [`merge::merge_candidates`]. One source's
//! failure never aborts another, and total failure of every source is a
//! valid (empty) result, not an error.

use crate::config::ScoutConfig;
use crate::error::ScoutError;
use crate::source::{Source, SourceAdapter};
use crate::sources::{
    BaiduNewsSource, BaiduWebSource, BingSource, GoogleNewsSource, SearxSource, SogouNewsSource,
};
use crate::types::{AggregationMeta, CandidateDoc, SearchHit};

use super::merge;

/// Aggregate search hits for `query` across all registered sources.
///
/// # Pipeline
///
/// 1. Rewrite the query with the configured exclusion terms
/// 2. Fan out to all sources concurrently with [`futures::future::join_all`];
///    registration order is preserved by the join, never completion order
/// 3. Record per-source outcomes: contributing sources in
///    `attempted_sources` (the first sets `chosen_source`), failures and
///    empty results in `errors`
/// 4. Merge hits in registration order: dedup by normalised URL,
///    blacklist drop, whitelist-first stable ordering, cap at `max_results`
///
/// Never returns an error: callers must treat zero candidates with a
/// populated `errors` list as a valid, reportable outcome.
pub async fn aggregate(
    query: &str,
    max_results: usize,
    config: &ScoutConfig,
) -> (Vec<CandidateDoc>, AggregationMeta) {
    let rewritten = rewrite_query(query, &config.query_exclusions);
    tracing::trace!(query = %rewritten, sources = config.sources.len(), "aggregation started");

    let futures: Vec<_> = config
        .sources
        .iter()
        .map(|source| {
            let q = rewritten.clone();
            let cfg = config.clone();
            let src = source.clone();
            async move {
                let limit = fetch_limit(&src, max_results);
                let outcome = query_source(&src, &q, limit, &cfg).await;
                (src, outcome)
            }
        })
        .collect();

    let outcomes = futures::future::join_all(futures).await;

    let mut meta = AggregationMeta::default();
    let mut pool: Vec<SearchHit> = Vec::new();

    for (source, outcome) in outcomes {
        let id = source.id();
        match outcome {
            Ok(hits) if !hits.is_empty() => {
                tracing::debug!(source = %id, count = hits.len(), "source contributed hits");
                meta.attempted_sources.push(id.clone());
                if meta.chosen_source.is_none() {
                    meta.chosen_source = Some(id);
                }
                pool.extend(hits);
            }
            Ok(_) => {
                tracing::debug!(source = %id, "source returned no hits");
                meta.errors.push(format!("{id}: no results"));
            }
            Err(err) => {
                tracing::warn!(source = %id, error = %err, "source query failed");
                meta.errors.push(format!("{id}: {err}"));
            }
        }
    }

    let candidates = merge::merge_candidates(pool, config, max_results);
    meta.items_count = candidates.len();
    tracing::debug!(
        candidates = meta.items_count,
        errors = meta.errors.len(),
        chosen = meta.chosen_source.as_deref().unwrap_or("-"),
        "aggregation finished"
    );

    (candidates, meta)
}

/// Append the configured exclusion terms (negated) to the query.
pub(crate) fn rewrite_query(query: &str, exclusions: &[String]) -> String {
    let mut rewritten = query.to_string();
    for term in exclusions {
        rewritten.push_str(" -");
        rewritten.push_str(term);
    }
    rewritten
}

/// News verticals are over-fetched to compensate for downstream dedup.
fn fetch_limit(source: &Source, max_results: usize) -> usize {
    match source {
        Source::BaiduNews | Source::SogouNews => max_results * 2,
        _ => max_results,
    }
}

/// Query a single source, dispatching to the concrete adapter.
async fn query_source(
    source: &Source,
    query: &str,
    limit: usize,
    config: &ScoutConfig,
) -> Result<Vec<SearchHit>, ScoutError> {
    match source {
        Source::BaiduNews => BaiduNewsSource.fetch(query, limit, config).await,
        Source::SogouNews => SogouNewsSource.fetch(query, limit, config).await,
        Source::Searx { instance } => {
            SearxSource {
                instance: instance.clone(),
            }
            .fetch(query, limit, config)
            .await
        }
        Source::BaiduWeb => BaiduWebSource.fetch(query, limit, config).await,
        Source::BingWeb => BingSource::web().fetch(query, limit, config).await,
        Source::BingSite { site, label } => {
            BingSource::site(site.clone(), label.clone())
                .fetch(query, limit, config)
                .await
        }
        Source::GoogleNews => GoogleNewsSource.fetch(query, limit, config).await,
    }
}
