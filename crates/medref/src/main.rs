//! medref: specialist referral search.
//!
//! Thin boundary layer around `medref-engine`: parses arguments, loads the
//! catalogue files, clamps the requested limit, and renders whatever ranked
//! list the engine returns. All matching semantics live in the engine.

use std::process::ExitCode;

use clap::Parser;

mod cli;

fn main() -> ExitCode {
    let args = cli::args::Cli::parse();
    cli::commands::run(args.command)
}
