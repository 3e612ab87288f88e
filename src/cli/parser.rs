//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::boundary::DEFAULT_DETECTOR;
use crate::config::{DEFAULT_MAX_LENGTH, OversizePolicy, SplitConfig};
use crate::publish::DEFAULT_ID_PREFIX;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// threadsplit: split long prose into a thread of short messages.
///
/// Quoted speech is kept together where possible; sentences, clauses and
/// finally word runs are split only when a message would exceed the length
/// budget.
#[derive(Parser, Debug)]
#[command(name = "threadsplit")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (debug logging on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json, ndjson).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by commands that split text.
#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    /// Maximum segment length in characters.
    #[arg(short = 'm', long, env = "THREADSPLIT_MAX_LENGTH", default_value_t = DEFAULT_MAX_LENGTH)]
    pub max_length: usize,

    /// Boundary detector (rules, unicode).
    #[arg(short, long, env = "THREADSPLIT_DETECTOR", default_value = DEFAULT_DETECTOR)]
    pub detector: String,

    /// Fail on a single word longer than the maximum length instead of
    /// emitting it oversized.
    #[arg(long)]
    pub strict: bool,
}

impl SplitArgs {
    /// Builds the splitter configuration from the arguments.
    #[must_use]
    pub const fn config(&self) -> SplitConfig {
        let policy = if self.strict {
            OversizePolicy::Reject
        } else {
            OversizePolicy::Emit
        };
        SplitConfig::with_max_length(self.max_length).oversize_policy(policy)
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split text into thread segments.
    ///
    /// Each file is one paragraph; standard input is read when no file is
    /// given or for a file named `-`.
    Split {
        /// Input files.
        files: Vec<PathBuf>,

        /// Write the formatted segments to this file instead of standard
        /// output.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Splitting options.
        #[command(flatten)]
        split: SplitArgs,
    },

    /// Show the quoted and unquoted spans of a paragraph.
    Spans {
        /// Input file (standard input when omitted).
        file: Option<PathBuf>,
    },

    /// Split text and publish it as a reply chain to an NDJSON outbox.
    ///
    /// Without `--outbox` the published records themselves are written to
    /// standard output as NDJSON, whatever `--format` says. With an outbox,
    /// `--format` selects how the publish summary is printed.
    Publish {
        /// Input files (`-` for standard input).
        files: Vec<PathBuf>,

        /// Outbox file (records are written to standard output as NDJSON
        /// when omitted).
        #[arg(short, long)]
        outbox: Option<PathBuf>,

        /// Prefix for generated message identifiers.
        #[arg(long, default_value = DEFAULT_ID_PREFIX)]
        id_prefix: String,

        /// Splitting options.
        #[command(flatten)]
        split: SplitArgs,
    },

    /// List available boundary detectors.
    Detectors,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_split_defaults() {
        let cli = Cli::try_parse_from(["threadsplit", "split", "a.txt"]).unwrap();
        assert_eq!(cli.format, "text");
        let Commands::Split {
            files,
            output,
            split,
        } = cli.command
        else {
            unreachable!("expected split command");
        };
        assert_eq!(files, vec![PathBuf::from("a.txt")]);
        assert!(output.is_none());
        assert_eq!(split.detector, DEFAULT_DETECTOR);
        assert_eq!(split.config().oversize_policy, OversizePolicy::Emit);
    }

    #[test]
    fn test_split_options() {
        let cli = Cli::try_parse_from([
            "threadsplit",
            "--format",
            "json",
            "split",
            "--max-length",
            "250",
            "--detector",
            "unicode",
            "--strict",
        ])
        .unwrap();
        let Commands::Split { files, split, .. } = cli.command else {
            unreachable!("expected split command");
        };
        assert!(files.is_empty());
        let config = split.config();
        assert_eq!(config.max_length, 250);
        assert_eq!(config.oversize_policy, OversizePolicy::Reject);
        assert_eq!(split.detector, "unicode");
    }

    #[test]
    fn test_publish_options() {
        let cli = Cli::try_parse_from([
            "threadsplit",
            "publish",
            "reading.txt",
            "--outbox",
            "out/thread.ndjson",
            "--id-prefix",
            "day1",
        ])
        .unwrap();
        let Commands::Publish {
            outbox, id_prefix, ..
        } = cli.command
        else {
            unreachable!("expected publish command");
        };
        assert_eq!(outbox, Some(PathBuf::from("out/thread.ndjson")));
        assert_eq!(id_prefix, "day1");
    }
}
