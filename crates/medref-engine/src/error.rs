//! Error types for the engine.

use thiserror::Error;

/// Errors surfaced by the engine boundary.
///
/// "No matches" and "invalid query" are normal outcomes carried on the
/// response, never errors. The engine fails only on precondition violations:
/// being invoked before an engine is installed, or being built from a
/// catalogue that breaks the cluster-reference invariant.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine was invoked before the index and catalogue were built.
    ///
    /// This is a caller programming error, not a retryable condition.
    #[error("search engine not ready: no catalogue installed")]
    NotReady,

    /// A record references a cluster id missing from the cluster catalogue.
    #[error("record {record_id} references unknown cluster {cluster_id}")]
    UnknownCluster {
        /// The offending record.
        record_id: u64,
        /// The cluster id that is not in the catalogue.
        cluster_id: i32,
    },
}
