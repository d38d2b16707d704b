//! Tiered cluster scoring.
//!
//! Each cluster is scored as the sum of per-keyword contributions. A keyword
//! contributes through exactly one tier, tried in fixed priority order:
//! exact match, query-contained-in-keyword, keyword-contained-in-query,
//! fractional token overlap, and finally pairwise long-word containment.
//! Modeling the tiers as named strategies keeps each independently testable.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::index::{ClusterEntry, ClusterIndex};
use crate::normalize::NormalizedQuery;

/// Score for an exact normalized-phrase match.
const SCORE_EXACT: f32 = 10.0;
/// Score when the query is a substring of the keyword.
const SCORE_QUERY_IN_KEYWORD: f32 = 7.0;
/// Score when the keyword is a substring of the query.
const SCORE_KEYWORD_IN_QUERY: f32 = 5.0;
/// Multiplier for the fractional token-overlap tier.
const SCORE_OVERLAP_FACTOR: f32 = 2.0;
/// Increment per containing long-word pair in the lowest tier.
const SCORE_PARTIAL_WORD: f32 = 1.0;
/// Words at or below this length are ignored by the partial-word tier.
const PARTIAL_WORD_MIN_LEN: usize = 3;

/// A cluster's cumulative similarity to the query.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterScore {
    /// The scored cluster.
    pub cluster_id: i32,
    /// Cumulative score across all keywords; always positive.
    pub score: f32,
    /// Raw keywords that contributed a nonzero score, in catalogue order.
    pub matched_keywords: Vec<String>,
}

/// Scores all clusters against the query.
///
/// The result is sorted by score descending with ties broken by cluster id
/// ascending, so ranking is deterministic. Clusters scoring zero are dropped.
///
/// Two optimizations from [`EngineConfig`] apply:
/// - `cheap_cluster_rejection` skips full scoring for clusters that share no
///   words and no substring with the query (those score zero anyway).
/// - `early_termination_score` stops the scan once a cluster scores above the
///   threshold. This trades exact full ranking for speed; disable it when
///   callers need exact top-K.
pub fn score_clusters(
    query: &NormalizedQuery,
    index: &ClusterIndex,
    config: &EngineConfig,
) -> Vec<ClusterScore> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut scores: Vec<ClusterScore> = Vec::new();

    for entry in index.iter() {
        if config.cheap_cluster_rejection && !might_match(query, entry) {
            continue;
        }

        let mut total = 0.0;
        let mut matched_keywords = Vec::new();
        for (idx, keyword) in entry.normalized_keywords.iter().enumerate() {
            let contribution = keyword_score(query, keyword);
            if contribution > 0.0 {
                total += contribution;
                matched_keywords.push(entry.raw_keywords[idx].clone());
            }
        }

        if total > 0.0 {
            scores.push(ClusterScore {
                cluster_id: entry.id,
                score: total,
                matched_keywords,
            });
            if let Some(threshold) = config.early_termination_score
                && total > threshold
            {
                break;
            }
        }
    }

    scores.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.cluster_id.cmp(&b.cluster_id))
    });
    scores
}

/// Cheap rejection test: can this cluster possibly score above zero?
///
/// True when the query shares at least one word with the cluster's aggregate
/// word set, or a substring relation holds against any keyword.
fn might_match(query: &NormalizedQuery, entry: &ClusterEntry) -> bool {
    if query.word_set.iter().any(|w| entry.word_set.contains(w)) {
        return true;
    }
    entry
        .normalized_keywords
        .iter()
        .any(|k| !k.is_empty() && (k.contains(&query.text) || query.text.contains(k.as_str())))
}

/// Scores one keyword against the query through the tier cascade.
pub(crate) fn keyword_score(query: &NormalizedQuery, keyword: &str) -> f32 {
    if keyword.is_empty() {
        return 0.0;
    }
    if let Some(score) = tier_exact(query, keyword) {
        return score;
    }
    if let Some(score) = tier_query_in_keyword(query, keyword) {
        return score;
    }
    if let Some(score) = tier_keyword_in_query(query, keyword) {
        return score;
    }

    let keyword_words: HashSet<&str> = keyword.split_whitespace().collect();
    if let Some(score) = tier_token_overlap(query, &keyword_words) {
        return score;
    }
    tier_partial_words(query, &keyword_words)
}

/// Tier 1: the normalized query equals the normalized keyword.
fn tier_exact(query: &NormalizedQuery, keyword: &str) -> Option<f32> {
    (query.text == keyword).then_some(SCORE_EXACT)
}

/// Tier 2: the query is a substring of the keyword.
fn tier_query_in_keyword(query: &NormalizedQuery, keyword: &str) -> Option<f32> {
    keyword.contains(&query.text).then_some(SCORE_QUERY_IN_KEYWORD)
}

/// Tier 3: the keyword is a substring of the query.
fn tier_keyword_in_query(query: &NormalizedQuery, keyword: &str) -> Option<f32> {
    query.text.contains(keyword).then_some(SCORE_KEYWORD_IN_QUERY)
}

/// Tier 4: fractional word-set overlap, `|intersection| * 2 / max(|Q|, |K|)`.
fn tier_token_overlap(query: &NormalizedQuery, keyword_words: &HashSet<&str>) -> Option<f32> {
    let intersection = keyword_words
        .iter()
        .filter(|w| query.word_set.contains(**w))
        .count();
    if intersection == 0 {
        return None;
    }
    let denominator = query.word_set.len().max(keyword_words.len()) as f32;
    Some(intersection as f32 * SCORE_OVERLAP_FACTOR / denominator)
}

/// Tier 5: one point per pair of long words where one contains the other.
///
/// Evaluated pairwise over all combinations with no early exit.
fn tier_partial_words(query: &NormalizedQuery, keyword_words: &HashSet<&str>) -> f32 {
    let mut score = 0.0;
    for query_word in &query.words {
        if query_word.len() <= PARTIAL_WORD_MIN_LEN {
            continue;
        }
        for keyword_word in keyword_words {
            if keyword_word.len() > PARTIAL_WORD_MIN_LEN
                && (query_word.contains(keyword_word) || keyword_word.contains(query_word.as_str()))
            {
                score += SCORE_PARTIAL_WORD;
            }
        }
    }
    score
}

#[cfg(test)]
mod test {
    use medref_catalog::ClusterKeywords;

    use super::*;
    use crate::normalize::Normalizer;

    fn query(text: &str) -> NormalizedQuery {
        Normalizer::new(true, 100).query(text)
    }

    fn build_index(entries: &[(i32, &[&str])]) -> ClusterIndex {
        let normalizer = Normalizer::new(true, 100);
        let mut catalogue = ClusterKeywords::new();
        for (id, keywords) in entries {
            catalogue.insert(*id, keywords.iter().map(|s| s.to_string()).collect());
        }
        ClusterIndex::build(&catalogue, &normalizer)
    }

    #[test]
    fn tier_exact_match() {
        assert_eq!(keyword_score(&query("parkinson"), "parkinson"), 10.0);
    }

    #[test]
    fn tier_query_inside_keyword() {
        assert_eq!(keyword_score(&query("tremor"), "essential tremor clinic"), 7.0);
    }

    #[test]
    fn tier_keyword_inside_query() {
        assert_eq!(keyword_score(&query("chronic migraine care"), "migraine"), 5.0);
    }

    #[test]
    fn tier_overlap_fraction() {
        // Query {movement, therapy}, keyword {movement, disorders}:
        // intersection 1, max set size 2 -> 1 * 2 / 2 = 1.0.
        let q = query("movement therapy");
        let score = keyword_score(&q, "movement disorder");
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn tier_partial_long_words() {
        // "parkinsonism" contains "parkinson": one containing pair.
        let q = query("parkinsonism tremors");
        let words: HashSet<&str> = ["parkinson", "gait"].into_iter().collect();
        assert_eq!(tier_partial_words(&q, &words), 1.0);
    }

    #[test]
    fn partial_tier_ignores_short_words() {
        let q = query("arm leg");
        let words: HashSet<&str> = ["arms", "legs"].into_iter().collect();
        assert_eq!(tier_partial_words(&q, &words), 0.0);
    }

    #[test]
    fn scores_sorted_descending_with_id_ties() {
        let index = build_index(&[
            (4, &["diabetes"]),
            (2, &["diabetes"]),
            (1, &["diabetes mellitus", "diabetes"]),
        ]);
        let config = EngineConfig {
            early_termination_score: None,
            ..EngineConfig::default()
        };
        let scores = score_clusters(&query("diabetes"), &index, &config);

        // Cluster 1 scores exact (10) + query-in-keyword (7); clusters 2 and 4
        // score 10 each and tie, broken by ascending id.
        assert_eq!(scores.len(), 3);
        assert_eq!(scores[0].cluster_id, 1);
        assert_eq!(scores[1].cluster_id, 2);
        assert_eq!(scores[2].cluster_id, 4);
        assert!(scores[0].score > scores[1].score);
        assert_eq!(scores[1].score, scores[2].score);
    }

    #[test]
    fn zero_scoring_clusters_dropped() {
        let index = build_index(&[(0, &["cardiology"]), (1, &["diabetes"])]);
        let scores = score_clusters(&query("diabetes"), &index, &EngineConfig::default());

        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].cluster_id, 1);
    }

    #[test]
    fn no_negative_scores_and_no_sentinel() {
        let index = build_index(&[(0, &["Parkinson disease", "tremor"]), (7, &["diabetes"])]);
        let scores = score_clusters(&query("parkinson tremor"), &index, &EngineConfig::default());

        for s in &scores {
            assert!(s.score > 0.0);
            assert_ne!(s.cluster_id, -1);
        }
    }

    #[test]
    fn matched_keywords_are_raw_forms() {
        let index = build_index(&[(0, &["Parkinson disease", "cardiology"])]);
        let scores = score_clusters(&query("parkinson"), &index, &EngineConfig::default());

        assert_eq!(scores[0].matched_keywords, vec!["Parkinson disease".to_string()]);
    }

    #[test]
    fn empty_query_scores_nothing() {
        let index = build_index(&[(0, &["diabetes"])]);
        assert!(score_clusters(&query(""), &index, &EngineConfig::default()).is_empty());
    }

    #[test]
    fn cheap_rejection_preserves_results() {
        let index = build_index(&[
            (0, &["Parkinson disease", "movement disorders"]),
            (1, &["diabetes mellitus"]),
            (2, &["cardiology", "heart failure"]),
        ]);
        let with = EngineConfig {
            cheap_cluster_rejection: true,
            early_termination_score: None,
            ..EngineConfig::default()
        };
        let without = EngineConfig {
            cheap_cluster_rejection: false,
            early_termination_score: None,
            ..EngineConfig::default()
        };

        let q = query("movement disorders");
        let a = score_clusters(&q, &index, &with);
        let b = score_clusters(&q, &index, &without);

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.cluster_id, y.cluster_id);
            assert!((x.score - y.score).abs() < 1e-6);
        }
    }

    #[test]
    fn early_termination_stops_scan() {
        // Cluster 0 scores well above the threshold, so cluster 9 is never
        // scanned even though it would match.
        let index = build_index(&[
            (0, &["diabetes", "diabetes mellitus", "diabetes type 2", "diabetes care", "diabetes management", "diabetes clinic", "diabetes treatment", "diabetes research"]),
            (9, &["diabetes"]),
        ]);
        let config = EngineConfig {
            early_termination_score: Some(20.0),
            ..EngineConfig::default()
        };
        let scores = score_clusters(&query("diabetes"), &index, &config);

        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].cluster_id, 0);
    }
}
