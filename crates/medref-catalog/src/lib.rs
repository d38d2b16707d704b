//! Catalogue data model for medref.
//!
//! A catalogue consists of two inputs, both loaded once at startup and treated
//! as immutable afterwards:
//!
//! 1. **Specialist records**: a JSON array of [`SpecialistRecord`] values.
//! 2. **Cluster keywords**: a JSON object mapping cluster-id strings to
//!    ordered keyword lists. Keyword order encodes importance (earlier means
//!    more central to the cluster) and is used for position weighting during
//!    scoring.
//!
//! This crate is deliberately agnostic to matching semantics: normalization
//! and scoring live in `medref-engine`. A reload replaces the whole catalogue
//! with a freshly loaded value; nothing here is mutated in place.

#![warn(missing_docs)]

mod error;
mod load;
mod record;

pub use error::CatalogError;
pub use load::{Catalog, load_catalog, parse_clusters_str, parse_records_str};
pub use record::{ClusterKeywords, SpecialistRecord, UNASSIGNED_CLUSTER};
