//! CLI support for the `medref` binary.

pub mod args;
pub mod commands;
pub mod output;
