//! CLI layer for threadsplit.
//!
//! Provides the command-line interface using clap, with commands for
//! splitting text, inspecting quote spans and publishing threads.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands, SplitArgs};
