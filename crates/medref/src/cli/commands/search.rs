//! Implementation of `medref search`.

use std::process::ExitCode;

use crate::cli::args::{SearchCommand, clamp_limit};
use crate::cli::output::{JsonSearchOutput, print_results_table, print_stats};

use super::shared;

/// Searches the catalogue and prints ranked specialists.
pub fn run(cmd: &SearchCommand) -> ExitCode {
    let engine = match shared::build_engine(&cmd.catalog) {
        Ok(e) => e,
        Err(code) => return code,
    };

    let limit = clamp_limit(cmd.limit);
    let response = engine.search(&cmd.query, cmd.location.as_deref(), limit);

    if cmd.output.json {
        let output = JsonSearchOutput {
            query: &cmd.query,
            location: cmd.location.as_deref(),
            response: &response,
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

    if response.invalid_query {
        println!("Query does not look like a medical search term: {}", cmd.query);
        return ExitCode::SUCCESS;
    }

    if response.results.is_empty() {
        println!("No matching specialists found.");
    } else {
        print_results_table(&response.results);
    }

    if cmd.explain {
        println!();
        print_stats(&response.stats);
    }

    ExitCode::SUCCESS
}
