//! Pre-built cluster keyword index.
//!
//! Built once from the raw cluster catalogue at engine construction and
//! read-only thereafter. Each cluster keeps its keywords in catalogue order
//! (order encodes importance), an index-aligned normalized list, and sets for
//! O(1) containment tests.

use std::collections::{BTreeMap, HashSet};

use medref_catalog::ClusterKeywords;

use crate::normalize::Normalizer;

/// Index data for a single topic cluster.
#[derive(Debug, Clone)]
pub struct ClusterEntry {
    /// Cluster id (never the unassigned sentinel).
    pub id: i32,
    /// Raw keywords in catalogue order.
    pub raw_keywords: Vec<String>,
    /// Normalized keywords, index-aligned with `raw_keywords`.
    pub normalized_keywords: Vec<String>,
    /// Set of normalized keyword phrases for exact containment tests.
    pub keyword_set: HashSet<String>,
    /// Aggregate set of all words across this cluster's keywords, used by
    /// the cheap rejection test during scoring.
    pub word_set: HashSet<String>,
}

/// Immutable mapping from cluster id to its keyword index data.
#[derive(Debug, Clone, Default)]
pub struct ClusterIndex {
    /// Entries keyed by cluster id; `BTreeMap` gives ascending-id iteration.
    clusters: BTreeMap<i32, ClusterEntry>,
    /// Every normalized keyword phrase plus each of its words longer than 2
    /// characters, across all clusters. Backs the keyword-overlap gate.
    global_keywords: HashSet<String>,
}

impl ClusterIndex {
    /// Builds the index from the raw catalogue.
    ///
    /// Cost is O(total keywords). Keyword order within each cluster is
    /// preserved exactly as supplied.
    pub fn build(catalogue: &ClusterKeywords, normalizer: &Normalizer) -> Self {
        let mut clusters = BTreeMap::new();
        let mut global_keywords = HashSet::new();

        for (&id, raw_keywords) in catalogue {
            let normalized_keywords: Vec<String> = raw_keywords
                .iter()
                .map(|k| normalizer.normalize(k))
                .collect();

            let mut keyword_set = HashSet::new();
            let mut word_set = HashSet::new();
            for nk in &normalized_keywords {
                if nk.is_empty() {
                    continue;
                }
                keyword_set.insert(nk.clone());
                global_keywords.insert(nk.clone());
                for word in nk.split_whitespace() {
                    word_set.insert(word.to_string());
                    if word.len() > 2 {
                        global_keywords.insert(word.to_string());
                    }
                }
            }

            clusters.insert(
                id,
                ClusterEntry {
                    id,
                    raw_keywords: raw_keywords.clone(),
                    normalized_keywords,
                    keyword_set,
                    word_set,
                },
            );
        }

        Self {
            clusters,
            global_keywords,
        }
    }

    /// Looks up a cluster entry by id.
    pub fn get(&self, id: i32) -> Option<&ClusterEntry> {
        self.clusters.get(&id)
    }

    /// Returns true if the cluster id exists in the index.
    pub fn contains(&self, id: i32) -> bool {
        self.clusters.contains_key(&id)
    }

    /// Iterates entries in ascending cluster-id order.
    pub fn iter(&self) -> impl Iterator<Item = &ClusterEntry> {
        self.clusters.values()
    }

    /// Number of indexed clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Returns true if no clusters are indexed.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// The global normalized-keyword set across all clusters.
    pub fn global_keywords(&self) -> &HashSet<String> {
        &self.global_keywords
    }
}
