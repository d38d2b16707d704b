//! Error types for catalogue loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or parsing a catalogue.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to read a catalogue file.
    #[error("failed to read catalogue file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse JSON catalogue content.
    #[error("failed to parse catalogue file {path}: {source}")]
    ParseJson {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying JSON parse error.
        source: serde_json::Error,
    },

    /// A cluster map key is not a valid integer cluster id.
    #[error("invalid cluster id key: {key:?}")]
    InvalidClusterId {
        /// The offending map key.
        key: String,
    },
}
