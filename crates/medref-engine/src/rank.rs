//! Final ordering and truncation.
//!
//! Scored candidates are sorted by score descending; ties keep the stable
//! original catalogue order. The returned list is truncated to the requested
//! limit, itself clamped to the hard cap. Display rounding happens after
//! sorting so the sort key keeps full precision.

use std::cmp::Ordering;

/// A candidate record index with its final score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedCandidate {
    /// Index into the engine's record list.
    pub index: usize,
    /// Full-precision final score.
    pub score: f32,
}

/// Sorts, filters, and truncates scored candidates.
///
/// Candidates with a non-positive score are excluded. The sort is stable, so
/// equal scores preserve the order in which candidates were supplied (the
/// original catalogue order).
pub fn rank_results(
    mut candidates: Vec<RankedCandidate>,
    limit: usize,
    hard_cap: usize,
) -> Vec<RankedCandidate> {
    candidates.retain(|c| c.score > 0.0);
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    candidates.truncate(limit.min(hard_cap));
    candidates
}

/// Rounds a score to two decimals for display.
///
/// Used only when formatting output; never applied to sort keys.
pub fn display_score(score: f32) -> f32 {
    (score * 100.0).round() / 100.0
}

#[cfg(test)]
mod test {
    use super::*;

    fn candidate(index: usize, score: f32) -> RankedCandidate {
        RankedCandidate { index, score }
    }

    #[test]
    fn sorts_descending() {
        let ranked = rank_results(
            vec![candidate(0, 1.0), candidate(1, 5.0), candidate(2, 3.0)],
            10,
            50,
        );
        let order: Vec<usize> = ranked.iter().map(|c| c.index).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn ties_keep_original_order() {
        let ranked = rank_results(
            vec![candidate(3, 2.0), candidate(1, 2.0), candidate(2, 2.0)],
            10,
            50,
        );
        let order: Vec<usize> = ranked.iter().map(|c| c.index).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn non_positive_scores_excluded() {
        let ranked = rank_results(
            vec![candidate(0, 0.0), candidate(1, -1.0), candidate(2, 0.5)],
            10,
            50,
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].index, 2);
    }

    #[test]
    fn limit_clamped_to_hard_cap() {
        let candidates: Vec<RankedCandidate> =
            (0..100).map(|i| candidate(i, 100.0 - i as f32)).collect();

        assert_eq!(rank_results(candidates.clone(), 5, 50).len(), 5);
        assert_eq!(rank_results(candidates, 1000, 50).len(), 50);
    }

    #[test]
    fn display_rounding_two_decimals() {
        assert_eq!(display_score(1.2345), 1.23);
        assert_eq!(display_score(1.235), 1.24);
        assert_eq!(display_score(10.0), 10.0);
    }
}
