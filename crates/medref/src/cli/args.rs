//! Clap argument definitions for the `medref` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Hard cap on returned results; requested limits are clamped to [1, cap]
/// before the engine is invoked.
pub const LIMIT_CAP: usize = 50;

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "medref")]
#[command(about = "Specialist referral search over clustered catalogues")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Supported `medref` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search the catalogue and print ranked specialists
    Search(SearchCommand),

    /// Show the exact cluster ranking for a query
    Clusters(ClustersCommand),

    /// Validate catalogue files and report statistics
    Check(CheckCommand),
}

/// Shared flags locating the catalogue inputs.
#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Path to the specialist records JSON file
    #[arg(long)]
    pub records: PathBuf,

    /// Path to the cluster keywords JSON file
    #[arg(long)]
    pub clusters: PathBuf,

    /// TOML file overriding engine tuning constants
    #[arg(long)]
    pub tuning: Option<PathBuf>,
}

/// Shared output mode flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `medref search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Free-text medical query
    pub query: String,

    /// Restrict results to a city or state (substring match)
    #[arg(short = 'l', long)]
    pub location: Option<String>,

    /// Maximum results to return [clamped to 1-50]
    #[arg(short = 'n', long, default_value = "10")]
    pub limit: usize,

    #[command(flatten)]
    /// Catalogue input files.
    pub catalog: CatalogArgs,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,

    /// Show pipeline statistics alongside the results
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for `medref clusters`.
#[derive(Args, Debug, Clone)]
pub struct ClustersCommand {
    /// Free-text medical query
    pub query: String,

    #[command(flatten)]
    /// Catalogue input files.
    pub catalog: CatalogArgs,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `medref check`.
#[derive(Args, Debug, Clone)]
pub struct CheckCommand {
    #[command(flatten)]
    /// Catalogue input files.
    pub catalog: CatalogArgs,
}

/// Clamps a requested limit into the [1, cap] contract the engine expects.
pub fn clamp_limit(requested: usize) -> usize {
    requested.clamp(1, LIMIT_CAP)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clamp_limit_bounds() {
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(10), 10);
        assert_eq!(clamp_limit(50), 50);
        assert_eq!(clamp_limit(1000), 50);
    }
}
