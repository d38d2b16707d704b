//! Candidate selection.
//!
//! Two selection paths exist, chosen by query shape:
//!
//! - **Fast path**: short queries (at most two words, each longer than two
//!   characters) that appear verbatim in some cluster's normalized keyword
//!   set select candidates by direct cluster membership, with no fuzzy
//!   scoring at all.
//! - **Full path**: everything else runs cluster scoring and keyword
//!   weighting first, then selects candidates by location or by membership
//!   in the top-scored cluster set.
//!
//! Location filtering, when present, is a substring containment test on
//! normalized state/city fields and applies on both paths.

use std::collections::HashSet;

use crate::cluster::ClusterScore;
use crate::index::ClusterIndex;
use crate::normalize::NormalizedQuery;
use crate::score::IndexedRecord;

/// Maximum word count for fast-path eligibility.
const FAST_PATH_MAX_WORDS: usize = 2;
/// Every fast-path word must be longer than this.
const FAST_PATH_MIN_WORD_LEN: usize = 2;

/// Returns true if the query shape qualifies for the fast path.
pub fn fast_path_eligible(query: &NormalizedQuery) -> bool {
    !query.words.is_empty()
        && query.words.len() <= FAST_PATH_MAX_WORDS
        && query.words.iter().all(|w| w.len() > FAST_PATH_MIN_WORD_LEN)
}

/// Clusters whose normalized keyword set contains the whole query exactly.
///
/// An empty result means the fast path yields no candidates and the full
/// path must run instead.
pub fn fast_path_clusters(query: &NormalizedQuery, index: &ClusterIndex) -> HashSet<i32> {
    index
        .iter()
        .filter(|entry| entry.keyword_set.contains(&query.text))
        .map(|entry| entry.id)
        .collect()
}

/// Selects fast-path candidates: records belonging to a qualifying cluster,
/// optionally narrowed by location.
pub fn select_fast(
    records: &[IndexedRecord],
    clusters: &HashSet<i32>,
    location: Option<&str>,
) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| clusters.contains(&r.record.topic_cluster))
        .filter(|(_, r)| location.is_none_or(|term| matches_location(r, term)))
        .map(|(idx, _)| idx)
        .collect()
}

/// Selects full-path candidates.
///
/// With a location term, candidates are records matching the location; the
/// cluster ranking then only influences scoring. Without one, candidates are
/// records belonging to any of the top-scored clusters.
pub fn select_full(
    records: &[IndexedRecord],
    top_clusters: &[ClusterScore],
    location: Option<&str>,
) -> Vec<usize> {
    match location {
        Some(term) => records
            .iter()
            .enumerate()
            .filter(|(_, r)| matches_location(r, term))
            .map(|(idx, _)| idx)
            .collect(),
        None => {
            let cluster_set: HashSet<i32> =
                top_clusters.iter().map(|c| c.cluster_id).collect();
            records
                .iter()
                .enumerate()
                .filter(|(_, r)| cluster_set.contains(&r.record.topic_cluster))
                .map(|(idx, _)| idx)
                .collect()
        }
    }
}

/// Substring containment test on normalized state and city.
pub fn matches_location(record: &IndexedRecord, normalized_term: &str) -> bool {
    if normalized_term.is_empty() {
        return false;
    }
    record.state_norm.contains(normalized_term) || record.city_norm.contains(normalized_term)
}
