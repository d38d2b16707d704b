//! Specialist record and cluster catalogue types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sentinel cluster id for records the upstream clustering left unassigned.
///
/// Unassigned records are never matched by cluster membership.
pub const UNASSIGNED_CLUSTER: i32 = -1;

/// Ordered keyword lists per cluster id.
///
/// A `BTreeMap` keeps cluster iteration deterministic (ascending id), which
/// downstream scoring relies on for stable tie-breaking.
pub type ClusterKeywords = BTreeMap<i32, Vec<String>>;

/// A single specialist in the catalogue.
///
/// Records are produced by an upstream clustering pipeline and loaded here
/// verbatim. `relevancy_score` and `topic_confidence` are upstream outputs
/// used only as tie-break/bonus inputs during scoring; they are never
/// recomputed by this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialistRecord {
    /// Unique record identity.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Primary conditions treated, free text.
    #[serde(default)]
    pub conditions: Vec<String>,
    /// Research interests, free text.
    #[serde(default)]
    pub research_interests: String,
    /// Clinical focus description, free text.
    #[serde(default)]
    pub clinical_focus: String,
    /// Primary specialty.
    #[serde(default)]
    pub specialty: String,
    /// Subspecialty, if any.
    #[serde(default)]
    pub subspecialty: String,
    /// City of practice.
    #[serde(default)]
    pub city: String,
    /// State or province of practice.
    #[serde(default)]
    pub state: String,
    /// Country of practice.
    #[serde(default)]
    pub country: String,
    /// Assigned topic cluster, or [`UNASSIGNED_CLUSTER`] when the upstream
    /// clustering marked this record as an outlier.
    #[serde(default = "default_cluster")]
    pub topic_cluster: i32,
    /// Upstream relevancy score, non-negative when present.
    #[serde(default)]
    pub relevancy_score: Option<f32>,
    /// Upstream confidence in the cluster assignment, non-negative when present.
    #[serde(default)]
    pub topic_confidence: Option<f32>,
    /// Manually verified specialty, echoed into results when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_specialty: Option<String>,
    /// Manually verified condition list, echoed into results when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_conditions: Option<Vec<String>>,
}

/// Serde default for `topic_cluster`.
fn default_cluster() -> i32 {
    UNASSIGNED_CLUSTER
}

impl SpecialistRecord {
    /// Returns true if this record has a cluster assignment.
    pub fn is_clustered(&self) -> bool {
        self.topic_cluster != UNASSIGNED_CLUSTER
    }
}
