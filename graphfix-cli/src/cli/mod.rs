//! Command-line interface for the fixture generators.
//!
//! Each subcommand runs one generator, writes its output files into the
//! output directory and reports node and edge counts.

mod commands;

pub use commands::{
    Cli, CliError, ClusteredArgs, Command, ExecutionSummary, ImageArgs, InteractionsArgs,
    UniformArgs, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
