//! Relevance-ranking engine for specialist search.
//!
//! The engine matches a free-text medical query against a catalogue of
//! specialists grouped into topic clusters and returns a ranked subset.
//! Evaluation flows strictly downward through a fixed pipeline:
//!
//! 1. **Normalization** ([`Normalizer`]): canonicalize the query text.
//! 2. **Validation** ([`validate`]): cheap gate rejecting gibberish.
//! 3. **Cluster scoring** ([`score_clusters`]): tiered similarity against the
//!    pre-built [`ClusterIndex`].
//! 4. **Keyword weighting** ([`weighted_keywords`]): expand top clusters into
//!    a decay-weighted keyword map.
//! 5. **Candidate filtering** ([`filter`]): fast path for simple queries,
//!    full weighted-keyword path otherwise.
//! 6. **Record scoring and ranking** ([`score`], [`rank`]): per-record
//!    score, stable sort, truncation.
//!
//! A single request is synchronous and side-effect-free; any number of
//! requests may run concurrently against a shared [`SearchEngine`]. The only
//! shared mutable state is the bounded normalization cache, which is safe for
//! concurrent use and never changes results.

#![warn(missing_docs)]

pub mod cluster;
pub mod config;
mod engine;
mod error;
pub mod filter;
mod index;
pub mod keyword;
mod normalize;
pub mod rank;
pub mod score;
pub mod validate;

pub use cluster::{ClusterScore, score_clusters};
pub use config::{EngineConfig, ValidationMode};
pub use engine::{
    EngineSlot, RecordScores, ScoredRecord, SearchEngine, SearchPath, SearchResponse, SearchStats,
};
pub use error::EngineError;
pub use index::{ClusterEntry, ClusterIndex};
pub use keyword::weighted_keywords;
pub use normalize::{NormalizedQuery, Normalizer};
