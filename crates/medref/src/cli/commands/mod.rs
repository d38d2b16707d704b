//! Command implementations and dispatch.

pub mod check;
pub mod clusters;
pub mod search;
mod shared;

use std::process::ExitCode;

use super::args::Commands;

/// Dispatches to the selected subcommand.
pub fn run(command: Commands) -> ExitCode {
    match command {
        Commands::Search(cmd) => search::run(&cmd),
        Commands::Clusters(cmd) => clusters::run(&cmd),
        Commands::Check(cmd) => check::run(&cmd),
    }
}
