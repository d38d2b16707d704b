//! Implementation of `medref check`.

use std::process::ExitCode;

use crate::cli::args::CheckCommand;

use super::shared;

/// Validates the catalogue files and reports statistics.
pub fn run(cmd: &CheckCommand) -> ExitCode {
    let catalog = match shared::load_catalog_or_failure(&cmd.catalog) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let clustered = catalog.records.iter().filter(|r| r.is_clustered()).count();
    println!("Records:    {}", catalog.records.len());
    println!("Clustered:  {clustered}");
    println!("Unassigned: {}", catalog.records.len() - clustered);
    println!("Clusters:   {}", catalog.clusters.len());

    let dangling = catalog.dangling_cluster_ids();
    if dangling.is_empty() {
        println!("All cluster references resolve.");
        ExitCode::SUCCESS
    } else {
        for cluster_id in &dangling {
            eprintln!("error: records reference unknown cluster {cluster_id}");
        }
        ExitCode::FAILURE
    }
}
