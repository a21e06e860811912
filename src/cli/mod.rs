//! Command-line interface for study-helper.
//!
//! Provides the `summarize`, `quiz`, `homework` and `extract` commands.

mod commands;

pub use commands::{extract_report, parse_cli, run_with_cli, Cli, Commands, ExtractReport};
