//! Hit merging: dedup by normalised URL, blacklist drop, whitelist ordering.

use std::collections::HashSet;

use crate::config::ScoutConfig;
use crate::types::{CandidateDoc, SearchHit};

use super::url_normalize::{domain_of, normalize_url};

/// Placeholder title for hits whose backend supplied none.
const UNTITLED: &str = "(无标题)";

/// Merge raw hits (already concatenated in source-registration order)
/// into a deduplicated, ordered, capped candidate list.
///
/// Steps, in order:
/// 1. Skip hits with empty URLs; normalise the rest.
/// 2. Deduplicate by normalised URL — first occurrence wins, so earlier
///    sources take precedence.
/// 3. Drop candidates whose domain suffix-matches the blacklist.
/// 4. Stable-sort whitelist-domain candidates ahead of the rest,
///    tie-breaking by domain name ascending. Whitelist membership never
///    removes a candidate, only reorders.
/// 5. Truncate to `max_results`.
pub fn merge_candidates(
    hits: Vec<SearchHit>,
    config: &ScoutConfig,
    max_results: usize,
) -> Vec<CandidateDoc> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut candidates: Vec<CandidateDoc> = Vec::new();

    for hit in hits {
        if hit.url.is_empty() {
            continue;
        }
        let url = normalize_url(&hit.url);
        if !seen.insert(url.clone()) {
            continue;
        }
        let domain = domain_of(&url);
        if config.is_blacklisted(&domain) {
            continue;
        }
        let title = if hit.title.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            hit.title
        };
        candidates.push(CandidateDoc {
            title,
            url,
            domain,
            snippet: hit.snippet,
        });
    }

    candidates.sort_by(|a, b| {
        let a_rank = !config.is_whitelisted(&a.domain);
        let b_rank = !config.is_whitelisted(&b.domain);
        a_rank.cmp(&b_rank).then_with(|| a.domain.cmp(&b.domain))
    });
    candidates.truncate(max_results);
    candidates
}
