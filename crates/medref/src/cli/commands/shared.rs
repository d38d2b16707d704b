//! Shared helpers for catalogue loading and engine construction.

use std::fs;
use std::process::ExitCode;

use medref_catalog::{Catalog, load_catalog};
use medref_engine::{EngineConfig, SearchEngine};

use crate::cli::args::CatalogArgs;

/// Loads the catalogue files, printing an error on failure.
pub(crate) fn load_catalog_or_failure(args: &CatalogArgs) -> Result<Catalog, ExitCode> {
    load_catalog(&args.records, &args.clusters).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::FAILURE
    })
}

/// Resolves the engine configuration, applying the tuning file if given.
pub(crate) fn load_config_or_failure(args: &CatalogArgs) -> Result<EngineConfig, ExitCode> {
    let Some(path) = &args.tuning else {
        return Ok(EngineConfig::default());
    };

    let content = fs::read_to_string(path).map_err(|e| {
        eprintln!("error: failed to read tuning file {}: {e}", path.display());
        ExitCode::FAILURE
    })?;
    toml::from_str(&content).map_err(|e| {
        eprintln!("error: failed to parse tuning file {}: {e}", path.display());
        ExitCode::FAILURE
    })
}

/// Loads catalogue and configuration and builds the engine.
pub(crate) fn build_engine(args: &CatalogArgs) -> Result<SearchEngine, ExitCode> {
    let catalog = load_catalog_or_failure(args)?;
    let config = load_config_or_failure(args)?;
    SearchEngine::new(catalog, config).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::FAILURE
    })
}
