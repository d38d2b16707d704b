//! Decay-weighted keyword expansion.
//!
//! The top-ranked clusters are expanded into a weighted keyword map used by
//! full-path record scoring. Three factors multiply into each weight:
//!
//! - **Cluster rank decay**: the rank-r cluster contributes `1 - r * 0.1`.
//! - **Similarity to the query**: exact > substring > token overlap.
//! - **Position in the cluster's list**: earlier keywords are more central.
//!
//! When the same keyword is reachable through multiple clusters, the map
//! keeps the maximum weight, never a sum.

use std::collections::{HashMap, HashSet};

use crate::cluster::ClusterScore;
use crate::config::EngineConfig;
use crate::index::ClusterIndex;
use crate::normalize::NormalizedQuery;

/// Cluster weight lost per rank step.
const RANK_DECAY: f32 = 0.1;
/// Similarity for an exact normalized match.
const SIMILARITY_EXACT: f32 = 1.0;
/// Similarity for an either-direction substring match.
const SIMILARITY_SUBSTRING: f32 = 0.8;
/// Similarity floor when the word sets do not intersect at all.
const SIMILARITY_FLOOR: f32 = 0.1;
/// Maximum position-weight penalty across a cluster's list.
const POSITION_PENALTY: f32 = 0.3;

/// Expands the top-ranked clusters into a normalized-keyword -> weight map.
///
/// `top_clusters` is a prefix of the [`score_clusters`](crate::score_clusters)
/// output; callers pass at most `config.max_keyword_clusters` entries. Only
/// the top `keyword_keep_fraction` of each cluster's list (by similarity,
/// minimum `keyword_keep_min`) survives into the map.
pub fn weighted_keywords(
    top_clusters: &[ClusterScore],
    index: &ClusterIndex,
    query: &NormalizedQuery,
    config: &EngineConfig,
) -> HashMap<String, f32> {
    let mut weights: HashMap<String, f32> = HashMap::new();

    for (rank, cluster) in top_clusters.iter().enumerate() {
        let Some(entry) = index.get(cluster.cluster_id) else {
            continue;
        };
        let cluster_weight = (1.0 - rank as f32 * RANK_DECAY).max(0.0);
        let list_len = entry.normalized_keywords.len();
        if list_len == 0 {
            continue;
        }

        // Rank this cluster's keywords by similarity, keeping original
        // positions for the position weight.
        let mut ranked: Vec<(usize, f32)> = entry
            .normalized_keywords
            .iter()
            .enumerate()
            .filter(|(_, nk)| !nk.is_empty())
            .map(|(position, nk)| (position, keyword_similarity(query, nk)))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        let keep = keep_count(list_len, config);
        for &(position, similarity) in ranked.iter().take(keep) {
            let position_weight = 1.0 - (position as f32 / list_len as f32) * POSITION_PENALTY;
            let final_weight = cluster_weight * similarity * position_weight;

            let keyword = &entry.normalized_keywords[position];
            weights
                .entry(keyword.clone())
                .and_modify(|w| *w = w.max(final_weight))
                .or_insert(final_weight);
        }
    }

    weights
}

/// Similarity of one keyword to the query, in [0, 1].
pub(crate) fn keyword_similarity(query: &NormalizedQuery, keyword: &str) -> f32 {
    if query.text == keyword {
        return SIMILARITY_EXACT;
    }
    if keyword.contains(&query.text) || query.text.contains(keyword) {
        return SIMILARITY_SUBSTRING;
    }

    let keyword_words: HashSet<&str> = keyword.split_whitespace().collect();
    let intersection = keyword_words
        .iter()
        .filter(|w| query.word_set.contains(**w))
        .count();
    if intersection == 0 {
        return SIMILARITY_FLOOR;
    }
    intersection as f32 / query.word_set.len().max(keyword_words.len()) as f32
}

/// How many keywords to keep from a cluster list of `len` entries.
fn keep_count(len: usize, config: &EngineConfig) -> usize {
    let by_fraction = (len as f32 * config.keyword_keep_fraction).ceil() as usize;
    by_fraction.max(config.keyword_keep_min).min(len)
}
