//! Implementation of `medref clusters`.

use std::process::ExitCode;

use crate::cli::args::ClustersCommand;
use crate::cli::output::{JsonClustersOutput, print_clusters_table};

use super::shared;

/// Shows the exact cluster ranking for a query.
pub fn run(cmd: &ClustersCommand) -> ExitCode {
    let engine = match shared::build_engine(&cmd.catalog) {
        Ok(e) => e,
        Err(code) => return code,
    };

    let scores = engine.rank_clusters(&cmd.query);

    if cmd.output.json {
        let output = JsonClustersOutput {
            query: &cmd.query,
            clusters: &scores,
        };
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize JSON: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    if scores.is_empty() {
        println!("No clusters matched.");
    } else {
        print_clusters_table(&scores);
    }
    ExitCode::SUCCESS
}
