//! Engine facade and boundary types.
//!
//! [`SearchEngine`] owns everything a request needs: the normalizer (with its
//! bounded cache), the pre-built [`ClusterIndex`], the indexed record list,
//! and the configuration. A request is evaluated synchronously with no
//! suspension points, so any number of requests may run concurrently against
//! one engine. [`EngineSlot`] provides the atomic install/swap point for
//! callers that build the engine after startup or reload it wholesale.

use std::sync::Arc;

use medref_catalog::Catalog;
use parking_lot::RwLock;
use serde::Serialize;

use crate::cluster::{ClusterScore, score_clusters};
use crate::config::{EngineConfig, FieldWeights, ValidationMode};
use crate::error::EngineError;
use crate::filter;
use crate::index::ClusterIndex;
use crate::keyword::weighted_keywords;
use crate::normalize::Normalizer;
use crate::rank::{RankedCandidate, display_score, rank_results};
use crate::score::{IndexedRecord, score_record_fast, score_record_full};
use crate::validate;

/// Which selection path served a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPath {
    /// Direct cluster containment, no fuzzy scoring.
    Fast,
    /// Cluster scoring plus weighted-keyword record scoring.
    Full,
}

/// Pipeline statistics for one request, for diagnostics and `--explain`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SearchStats {
    /// Path that produced the results, if evaluation got that far.
    pub path: Option<SearchPath>,
    /// Clusters that scored above zero (full path only).
    pub clusters_scored: usize,
    /// Candidate records considered before ranking.
    pub candidates_considered: usize,
    /// Results returned after ranking and truncation.
    pub result_count: usize,
}

/// Score breakdown carried on each result.
#[derive(Debug, Clone, Serialize)]
pub struct RecordScores {
    /// The engine's final score, rounded to two decimals for display.
    pub search_score: f32,
    /// Upstream relevancy score, echoed when present.
    pub relevancy_score: Option<f32>,
    /// Upstream topic confidence, echoed when present.
    pub topic_confidence: Option<f32>,
}

/// One ranked search result.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredRecord {
    /// Record identity.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Primary specialty.
    pub specialty: String,
    /// Subspecialty, if any.
    pub subspecialty: String,
    /// Primary condition list.
    pub conditions: Vec<String>,
    /// City of practice.
    pub city: String,
    /// State of practice.
    pub state: String,
    /// Country of practice.
    pub country: String,
    /// Resolved topic cluster.
    pub topic_cluster: i32,
    /// Score breakdown.
    pub scores: RecordScores,
    /// Verified specialty, echoed when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_specialty: Option<String>,
    /// Verified condition list, echoed when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_conditions: Option<Vec<String>>,
}

/// The outcome of one search request.
///
/// "No matches" and "query looked non-medical" are both normal outcomes:
/// the former returns an empty list with `invalid_query == false`, the
/// latter an empty list with `invalid_query == true`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// True when the active validation gate rejected the query.
    pub invalid_query: bool,
    /// Ranked results, best first.
    pub results: Vec<ScoredRecord>,
    /// Pipeline statistics for this request.
    pub stats: SearchStats,
}

impl SearchResponse {
    /// Response for a rejected query.
    fn invalid() -> Self {
        Self {
            invalid_query: true,
            results: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    /// Response for a valid query with no matches.
    fn empty(stats: SearchStats) -> Self {
        Self {
            invalid_query: false,
            results: Vec::new(),
            stats,
        }
    }
}

/// The matching engine: immutable after construction, shareable across
/// threads behind an `Arc`.
#[derive(Debug)]
pub struct SearchEngine {
    /// Tunable pipeline parameters.
    config: EngineConfig,
    /// Profile field weight table.
    field_weights: FieldWeights,
    /// Shared normalizer with bounded memo cache.
    normalizer: Normalizer,
    /// Pre-built cluster keyword index.
    index: ClusterIndex,
    /// Records with precomputed normalized fields, in catalogue order.
    records: Vec<IndexedRecord>,
}

impl SearchEngine {
    /// Builds an engine from a loaded catalogue.
    ///
    /// Fails if any record references a cluster id absent from the cluster
    /// catalogue (the unassigned sentinel is always allowed). This is a
    /// construction-time precondition check: a running engine can then treat
    /// every cluster reference as resolvable.
    pub fn new(catalog: Catalog, config: EngineConfig) -> Result<Self, EngineError> {
        for record in &catalog.records {
            if record.is_clustered() && !catalog.clusters.contains_key(&record.topic_cluster) {
                return Err(EngineError::UnknownCluster {
                    record_id: record.id,
                    cluster_id: record.topic_cluster,
                });
            }
        }

        let normalizer = Normalizer::new(config.strip_generic_suffixes, config.cache_capacity);
        let index = ClusterIndex::build(&catalog.clusters, &normalizer);
        let records = catalog
            .records
            .into_iter()
            .map(|r| IndexedRecord::build(r, &normalizer))
            .collect();

        Ok(Self {
            config,
            field_weights: FieldWeights::default(),
            normalizer,
            index,
            records,
        })
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The pre-built cluster index.
    pub fn cluster_index(&self) -> &ClusterIndex {
        &self.index
    }

    /// Number of records in the catalogue.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Scores clusters for a query with early termination disabled, for
    /// diagnostic callers that need the exact full ranking.
    pub fn rank_clusters(&self, query: &str) -> Vec<ClusterScore> {
        let normalized = self.normalizer.query(query);
        let exact = self.config.clone().with_exact_ranking();
        score_clusters(&normalized, &self.index, &exact)
    }

    /// Evaluates one search request.
    ///
    /// `limit` is expected to be pre-clamped by the caller; the engine
    /// additionally clamps to its hard result cap and never returns more.
    /// Zero matches is an empty response, never an error.
    pub fn search(&self, query: &str, location: Option<&str>, limit: usize) -> SearchResponse {
        if !self.passes_gate(query) {
            return SearchResponse::invalid();
        }

        let normalized = self.normalizer.query(query);
        if normalized.is_empty() {
            return SearchResponse::invalid();
        }

        let location_norm = location
            .map(|term| self.normalizer.normalize(term))
            .filter(|term| !term.is_empty());

        let mut stats = SearchStats::default();

        // Fast path: the whole query is a known cluster keyword.
        if filter::fast_path_eligible(&normalized) {
            let clusters = filter::fast_path_clusters(&normalized, &self.index);
            if !clusters.is_empty() {
                let candidates =
                    filter::select_fast(&self.records, &clusters, location_norm.as_deref());
                stats.path = Some(SearchPath::Fast);
                stats.candidates_considered = candidates.len();

                let scored = candidates
                    .into_iter()
                    .map(|index| RankedCandidate {
                        index,
                        score: score_record_fast(&self.records[index], &self.config),
                    })
                    .collect();
                return self.finish(scored, limit, stats);
            }
        }

        // Full path: tiered cluster scoring plus weighted keywords.
        let cluster_scores = score_clusters(&normalized, &self.index, &self.config);
        stats.path = Some(SearchPath::Full);
        stats.clusters_scored = cluster_scores.len();

        let top_clusters: Vec<ClusterScore> = cluster_scores
            .into_iter()
            .take(self.config.max_keyword_clusters)
            .collect();
        if top_clusters.is_empty() && location_norm.is_none() {
            return SearchResponse::empty(stats);
        }

        let keywords = weighted_keywords(&top_clusters, &self.index, &normalized, &self.config);
        let candidates =
            filter::select_full(&self.records, &top_clusters, location_norm.as_deref());
        stats.candidates_considered = candidates.len();

        let scored = candidates
            .into_iter()
            .map(|index| RankedCandidate {
                index,
                score: score_record_full(
                    &self.records[index],
                    &top_clusters,
                    &keywords,
                    &self.field_weights,
                    &self.config,
                ),
            })
            .collect();
        self.finish(scored, limit, stats)
    }

    /// Applies the active validation gate.
    fn passes_gate(&self, query: &str) -> bool {
        match self.config.validation_mode {
            ValidationMode::Heuristic => validate::is_valid_medical_query(query),
            ValidationMode::KeywordOverlap => {
                validate::is_medical_query(&self.normalizer.query(query), &self.index)
            }
        }
    }

    /// Ranks scored candidates and materializes the response.
    fn finish(
        &self,
        scored: Vec<RankedCandidate>,
        limit: usize,
        mut stats: SearchStats,
    ) -> SearchResponse {
        let ranked = rank_results(scored, limit, self.config.hard_result_cap);
        stats.result_count = ranked.len();

        let results = ranked
            .into_iter()
            .map(|c| self.scored_record(c.index, c.score))
            .collect();
        SearchResponse {
            invalid_query: false,
            results,
            stats,
        }
    }

    /// Builds the outward result for one ranked record.
    fn scored_record(&self, index: usize, score: f32) -> ScoredRecord {
        let record = &self.records[index].record;
        ScoredRecord {
            id: record.id,
            name: record.name.clone(),
            specialty: record.specialty.clone(),
            subspecialty: record.subspecialty.clone(),
            conditions: record.conditions.clone(),
            city: record.city.clone(),
            state: record.state.clone(),
            country: record.country.clone(),
            topic_cluster: record.topic_cluster,
            scores: RecordScores {
                search_score: display_score(score),
                relevancy_score: record.relevancy_score,
                topic_confidence: record.topic_confidence,
            },
            verified_specialty: record.verified_specialty.clone(),
            verified_conditions: record.verified_conditions.clone(),
        }
    }
}

/// Atomically swappable engine holder.
///
/// Callers that serve requests keep one `EngineSlot` and [`install`] a fresh
/// engine at startup or on reload. In-flight requests hold an `Arc` snapshot,
/// so they observe either the old or the new engine, never a partial one.
/// [`get`] before the first install is the [`EngineError::NotReady`] case.
///
/// [`install`]: Self::install
/// [`get`]: Self::get
#[derive(Default)]
pub struct EngineSlot {
    /// The current engine, absent until first install.
    current: RwLock<Option<Arc<SearchEngine>>>,
}

impl EngineSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a new engine, replacing any previous one atomically.
    pub fn install(&self, engine: SearchEngine) {
        *self.current.write() = Some(Arc::new(engine));
    }

    /// Returns a snapshot of the current engine.
    pub fn get(&self) -> Result<Arc<SearchEngine>, EngineError> {
        self.current.read().clone().ok_or(EngineError::NotReady)
    }
}

#[cfg(test)]
mod test {
    use medref_catalog::ClusterKeywords;

    use super::*;

    /// One-record, one-cluster catalogue for facade-level tests.
    fn small_catalog() -> Catalog {
        let mut clusters = ClusterKeywords::new();
        clusters.insert(
            0,
            vec!["Parkinson disease".to_string(), "movement disorders".to_string()],
        );
        Catalog {
            records: vec![
                serde_json::from_str(
                    r#"{"id": 1, "name": "Dr. Ben Carter", "specialty": "Neurology",
                        "topic_cluster": 0, "relevancy_score": 0.8}"#,
                )
                .unwrap(),
            ],
            clusters,
        }
    }

    #[test]
    fn rejects_catalogue_with_dangling_cluster() {
        let mut catalog = small_catalog();
        catalog.records[0].topic_cluster = 42;

        let err = SearchEngine::new(catalog, EngineConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::UnknownCluster {
                record_id: 1,
                cluster_id: 42
            }
        ));
    }

    #[test]
    fn unassigned_records_are_allowed() {
        let mut catalog = small_catalog();
        catalog.records[0].topic_cluster = -1;
        assert!(SearchEngine::new(catalog, EngineConfig::default()).is_ok());
    }

    #[test]
    fn fast_path_serves_exact_keyword_queries() {
        let engine = SearchEngine::new(small_catalog(), EngineConfig::default()).unwrap();
        let response = engine.search("parkinson", None, 20);

        assert!(!response.invalid_query);
        assert_eq!(response.stats.path, Some(SearchPath::Fast));
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].id, 1);
    }

    #[test]
    fn invalid_query_is_flagged_not_thrown() {
        let engine = SearchEngine::new(small_catalog(), EngineConfig::default()).unwrap();
        let response = engine.search("xyzzyqqq", None, 20);

        assert!(response.invalid_query);
        assert!(response.results.is_empty());
    }

    #[test]
    fn no_match_is_empty_with_valid_flag() {
        let engine = SearchEngine::new(small_catalog(), EngineConfig::default()).unwrap();
        let response = engine.search("dermatology rash", None, 20);

        assert!(!response.invalid_query);
        assert!(response.results.is_empty());
        assert_eq!(response.stats.path, Some(SearchPath::Full));
    }

    #[test]
    fn slot_not_ready_before_install() {
        let slot = EngineSlot::new();
        assert!(matches!(slot.get(), Err(EngineError::NotReady)));

        slot.install(SearchEngine::new(small_catalog(), EngineConfig::default()).unwrap());
        let engine = slot.get().unwrap();
        assert_eq!(engine.record_count(), 1);
    }

    #[test]
    fn slot_swap_replaces_whole_engine() {
        let slot = EngineSlot::new();
        slot.install(SearchEngine::new(small_catalog(), EngineConfig::default()).unwrap());
        let before = slot.get().unwrap();

        let mut bigger = small_catalog();
        bigger.records.push(
            serde_json::from_str(r#"{"id": 2, "name": "Dr. Chen Li", "topic_cluster": 0}"#)
                .unwrap(),
        );
        slot.install(SearchEngine::new(bigger, EngineConfig::default()).unwrap());

        // The old snapshot stays valid; the new one sees the new catalogue.
        assert_eq!(before.record_count(), 1);
        assert_eq!(slot.get().unwrap().record_count(), 2);
    }

    #[test]
    fn rank_clusters_is_exact() {
        let engine = SearchEngine::new(small_catalog(), EngineConfig::default()).unwrap();
        let scores = engine.rank_clusters("parkinson");
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].cluster_id, 0);
        assert!(scores[0].score > 0.0);
    }
}
