//! Core types flowing through the acquisition pipeline.
//!
//! A query fans out to search sources producing [`SearchHit`]s, which the
//! aggregator merges into deduplicated [`CandidateDoc`]s. Extraction and
//! filtering turn candidates into scored [`Document`]s. [`AggregationMeta`]
//! and [`FilterStats`] carry per-request diagnostics alongside the results.
//!
//! All of these are request-scoped value objects; nothing here outlives a
//! single pipeline invocation.

use serde::{Deserialize, Serialize};

/// A single raw hit returned by one search source, before deduplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Result title as presented by the backend. May be empty.
    pub title: String,
    /// Result URL as presented by the backend (not yet normalised).
    pub url: String,
    /// Short text snippet, empty when the backend provides none.
    pub snippet: String,
}

/// A deduplicated search hit awaiting content extraction.
///
/// Unique by `url` (normalised) within one aggregation run; insertion
/// order is first-seen order across sources in registration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateDoc {
    /// Title carried over from the winning hit; `(无标题)` when empty.
    pub title: String,
    /// Normalised URL (scheme + host + path, no query or fragment).
    pub url: String,
    /// Host with a leading `www.` stripped; empty for unparseable URLs.
    pub domain: String,
    /// Snippet carried over from the winning hit, used as extraction fallback.
    pub snippet: String,
}

/// A fully extracted, filtered and scored unit of pipeline output.
///
/// `content` is non-empty UTF-8 text that passed every enabled filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub url: String,
    pub domain: String,
    /// Cleaned extracted text (or snippet fallback). Never empty.
    pub content: String,
    /// Ranking key: content char count, plus a fixed bonus for
    /// whitelist domains.
    pub score: u64,
}

/// Diagnostic record of one aggregation run.
///
/// Created fresh per request, returned alongside the candidates, never
/// persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregationMeta {
    /// Sources that contributed at least one hit, in registration order.
    pub attempted_sources: Vec<String>,
    /// First source (in registration order) to yield any hit. Diagnostic
    /// only — set even if all of that source's hits are later deduplicated
    /// or blacklisted.
    pub chosen_source: Option<String>,
    /// One entry per source that failed or returned nothing, tagged with
    /// the source identity.
    pub errors: Vec<String>,
    /// Number of candidates actually returned after merge and capping.
    pub items_count: usize,
}

/// Per-request counters from the filter & score stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterStats {
    /// Number of candidates that entered the filter stage.
    pub attempted: usize,
    /// Number of documents that survived every filter (== output length).
    pub kept: usize,
    /// Rejected: no extracted content and no snippet to fall back on.
    pub empty: usize,
    /// Soft signal: content below the minimum length (not a rejection).
    pub too_short: usize,
    /// Chinese-character ratio below threshold (rejects only short content).
    pub low_chinese_ratio: usize,
    /// Rejected: advertising keywords or structural spam markers.
    pub ad_keywords: usize,
    /// Active minimum-length threshold.
    pub min_len: usize,
    /// Active ratio threshold for whitelist domains.
    pub min_ratio_whitelist: f64,
    /// Active ratio threshold for all other domains.
    pub min_ratio_default: f64,
}
