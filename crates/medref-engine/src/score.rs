//! Per-record scoring.
//!
//! Records are scored against the weighted keyword map produced by the
//! full path, or given a coarse score on the fast path. Normalized copies of
//! every scorable field are precomputed once at engine build into
//! [`IndexedRecord`], so per-query work is pure string containment.

use std::collections::HashMap;

use medref_catalog::SpecialistRecord;

use crate::cluster::ClusterScore;
use crate::config::{EngineConfig, FieldWeights};
use crate::normalize::Normalizer;

/// Match quality when a field exactly equals the keyword.
const QUALITY_EXACT: f32 = 1.0;
/// Match quality for a substring match inside the field.
const QUALITY_SUBSTRING: f32 = 0.8;

/// A specialist record with precomputed normalized field copies.
#[derive(Debug, Clone)]
pub struct IndexedRecord {
    /// The underlying catalogue record.
    pub record: SpecialistRecord,
    /// Normalized primary condition list, joined into one text.
    pub conditions_norm: String,
    /// Normalized research interests.
    pub research_norm: String,
    /// Normalized clinical focus.
    pub clinical_norm: String,
    /// Normalized specialty.
    pub specialty_norm: String,
    /// Normalized subspecialty.
    pub subspecialty_norm: String,
    /// Normalized city.
    pub city_norm: String,
    /// Normalized state.
    pub state_norm: String,
}

impl IndexedRecord {
    /// Precomputes normalized field copies for a record.
    pub fn build(record: SpecialistRecord, normalizer: &Normalizer) -> Self {
        let conditions_norm = normalizer.normalize(&record.conditions.join(" ; "));
        let research_norm = normalizer.normalize(&record.research_interests);
        let clinical_norm = normalizer.normalize(&record.clinical_focus);
        let specialty_norm = normalizer.normalize(&record.specialty);
        let subspecialty_norm = normalizer.normalize(&record.subspecialty);
        let city_norm = normalizer.normalize(&record.city);
        let state_norm = normalizer.normalize(&record.state);
        Self {
            record,
            conditions_norm,
            research_norm,
            clinical_norm,
            specialty_norm,
            subspecialty_norm,
            city_norm,
            state_norm,
        }
    }

    /// Scorable profile fields paired with their weights, strongest first.
    fn weighted_fields<'a>(&'a self, weights: &FieldWeights) -> [(&'a str, f32); 5] {
        [
            (self.conditions_norm.as_str(), weights.conditions),
            (self.research_norm.as_str(), weights.research_interests),
            (self.clinical_norm.as_str(), weights.clinical_focus),
            (self.specialty_norm.as_str(), weights.specialty),
            (self.subspecialty_norm.as_str(), weights.subspecialty),
        ]
    }
}

/// Full-path record score.
///
/// Base score: a cluster-rank bonus of `(N - rank) * cluster_rank_bonus` for
/// records whose cluster sits at rank `r` of the `N` top-scored clusters,
/// plus the upstream relevancy and confidence inputs scaled by their weights.
/// On top of that, every weighted keyword found as a substring of a profile
/// field adds `keyword_weight * field_weight * quality`.
pub fn score_record_full(
    record: &IndexedRecord,
    top_clusters: &[ClusterScore],
    keywords: &HashMap<String, f32>,
    field_weights: &FieldWeights,
    config: &EngineConfig,
) -> f32 {
    let mut score = base_score(record, top_clusters, config);

    for (field_text, field_weight) in record.weighted_fields(field_weights) {
        if field_text.is_empty() {
            continue;
        }
        let mut field_score = 0.0;
        for (keyword, keyword_weight) in keywords {
            if field_text.contains(keyword.as_str()) {
                let quality = if field_text == keyword.as_str() {
                    QUALITY_EXACT
                } else {
                    QUALITY_SUBSTRING
                };
                field_score += keyword_weight * field_weight * quality;
            }
        }
        if let Some(cap) = config.field_score_cap {
            field_score = field_score.min(cap);
        }
        score += field_score;
    }

    score
}

/// Fast-path record score: cluster-tier bonus plus scaled relevancy.
///
/// Field-level keyword scoring is deliberately omitted; fast-path candidates
/// were already selected by exact cluster containment.
pub fn score_record_fast(record: &IndexedRecord, config: &EngineConfig) -> f32 {
    let relevancy = record.record.relevancy_score.unwrap_or(0.0);
    config.fast_base_bonus + relevancy * config.fast_relevancy_scale
}

/// Cluster-rank bonus plus upstream relevancy and confidence contributions.
fn base_score(record: &IndexedRecord, top_clusters: &[ClusterScore], config: &EngineConfig) -> f32 {
    let mut score = 0.0;

    let cluster_count = top_clusters.len();
    if let Some(rank) = top_clusters
        .iter()
        .position(|c| c.cluster_id == record.record.topic_cluster)
    {
        score += (cluster_count - rank) as f32 * config.cluster_rank_bonus;
    }

    if let Some(relevancy) = record.record.relevancy_score {
        score += relevancy * config.relevancy_weight;
    }
    if let Some(confidence) = record.record.topic_confidence {
        score += confidence * config.confidence_weight;
    }

    score
}
