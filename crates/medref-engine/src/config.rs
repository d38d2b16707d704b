//! Engine configuration.
//!
//! Every heuristic threshold in the pipeline is a named field here rather
//! than an inline constant, so exactness-vs-speed tradeoffs can be tuned and
//! tested independently. The defaults are the production values; a tuning
//! file can override any subset (every field has a serde default).

use serde::Deserialize;

/// Which query gate is active for a deployment profile.
///
/// Exactly one gate runs per engine. Both signal rejection the same way
/// (`invalid_query: true` plus an empty result list), but they accept
/// different inputs: the heuristic gate rejects obviously non-medical or
/// gibberish text, while the keyword-overlap gate accepts only queries that
/// share vocabulary with the cluster catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Heuristic gibberish detection on the raw query text.
    #[default]
    Heuristic,
    /// Accept only queries overlapping the global cluster keyword set.
    KeywordOverlap,
}

/// Tunable parameters for the matching pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Active query validation gate.
    pub validation_mode: ValidationMode,
    /// Whether normalization strips bare generic suffix words such as
    /// "disease" or "syndrome". Applied consistently across the whole
    /// pipeline: queries, keywords, and record fields.
    pub strip_generic_suffixes: bool,
    /// Maximum entries in the normalization memo cache. The cache is purely
    /// a performance optimization and never changes normalized output.
    pub cache_capacity: usize,
    /// Skip full scoring for clusters with no word overlap and no substring
    /// match against any keyword. Documented fast check; a skipped cluster
    /// scores 0 either way.
    pub cheap_cluster_rejection: bool,
    /// Stop scanning further clusters once one scores above this value.
    /// This is a documented approximation of the full ranking; set to `None`
    /// when the caller needs exact top-K.
    pub early_termination_score: Option<f32>,
    /// How many top-ranked clusters feed keyword weighting and the
    /// full-path candidate pool.
    pub max_keyword_clusters: usize,
    /// Fraction of each cluster's keyword list kept during weighting,
    /// selected by similarity to the query.
    pub keyword_keep_fraction: f32,
    /// Minimum keywords kept per cluster regardless of the fraction.
    pub keyword_keep_min: usize,
    /// Bonus per cluster-rank step for records in a top-scored cluster:
    /// a record in the rank-r cluster gets `(N - r) * cluster_rank_bonus`.
    pub cluster_rank_bonus: f32,
    /// Weight applied to the upstream relevancy score.
    pub relevancy_weight: f32,
    /// Weight applied to the upstream topic confidence.
    pub confidence_weight: f32,
    /// Optional cap on the keyword contribution of a single profile field.
    /// Off by default; enabling it with aggressive values is a documented
    /// approximation of the exact ordering.
    pub field_score_cap: Option<f32>,
    /// Base score for fast-path candidates (cluster-tier bonus).
    pub fast_base_bonus: f32,
    /// Multiplier for the upstream relevancy score on the fast path.
    pub fast_relevancy_scale: f32,
    /// Hard cap on returned results; requested limits above it are clamped.
    pub hard_result_cap: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            validation_mode: ValidationMode::Heuristic,
            strip_generic_suffixes: true,
            cache_capacity: 10_000,
            cheap_cluster_rejection: true,
            early_termination_score: Some(50.0),
            max_keyword_clusters: 5,
            keyword_keep_fraction: 1.0 / 3.0,
            keyword_keep_min: 4,
            cluster_rank_bonus: 5.0,
            relevancy_weight: 0.3,
            confidence_weight: 0.2,
            field_score_cap: None,
            fast_base_bonus: 10.0,
            fast_relevancy_scale: 2.0,
            hard_result_cap: 50,
        }
    }
}

impl EngineConfig {
    /// Returns a copy with cluster-scan early termination disabled, for
    /// callers that need the exact full ranking.
    pub fn with_exact_ranking(mut self) -> Self {
        self.early_termination_score = None;
        self
    }
}

/// Relative weights for the profile fields consulted during record scoring.
///
/// Condition lists carry the strongest signal; subspecialty the weakest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldWeights {
    /// Weight for the primary condition list.
    pub conditions: f32,
    /// Weight for research interests.
    pub research_interests: f32,
    /// Weight for clinical focus.
    pub clinical_focus: f32,
    /// Weight for the primary specialty.
    pub specialty: f32,
    /// Weight for the subspecialty.
    pub subspecialty: f32,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            conditions: 1.5,
            research_interests: 1.2,
            clinical_focus: 1.0,
            specialty: 0.8,
            subspecialty: 0.6,
        }
    }
}
