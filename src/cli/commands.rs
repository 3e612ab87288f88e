//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use crate::boundary::{DEFAULT_DETECTOR, available_detectors, create_detector};
use crate::chunking::ThreadSplitter;
use crate::chunking::quote::chunk;
use crate::cli::output::{
    OutputFormat, format_detectors, format_published, format_segments, format_spans,
};
use crate::cli::parser::{Cli, Commands, SplitArgs};
use crate::core::Segment;
use crate::error::{CommandError, Result};
use crate::io::{InputSource, create_output, write_file};
use crate::publish::{NdjsonPublisher, publish_thread};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Split {
            files,
            output,
            split,
        } => cmd_split(files, output.as_deref(), split, format),
        Commands::Spans { file } => cmd_spans(file.as_deref(), format),
        Commands::Publish {
            files,
            outbox,
            id_prefix,
            split,
        } => cmd_publish(files, outbox.as_deref(), id_prefix, split, format),
        Commands::Detectors => cmd_detectors(format),
    }
}

/// Resolves the input arguments; no argument means standard input.
fn input_sources(files: &[PathBuf]) -> Vec<InputSource> {
    if files.is_empty() {
        return vec![InputSource::Stdin];
    }
    files.iter().map(|f| InputSource::from_path(f)).collect()
}

/// Reads each input as one paragraph.
fn read_paragraphs(files: &[PathBuf]) -> Result<Vec<String>> {
    input_sources(files)
        .iter()
        .map(|source| {
            debug!(source = %source, "reading paragraph");
            source.read()
        })
        .collect()
}

/// Splits the input files with the requested detector and configuration.
fn split_input(files: &[PathBuf], args: &SplitArgs) -> Result<Vec<Segment>> {
    let splitter = ThreadSplitter::from_detector_name(&args.detector, args.config())?;
    let paragraphs = read_paragraphs(files)?;
    if paragraphs.iter().all(|p| p.trim().is_empty()) {
        return Err(CommandError::EmptyInput.into());
    }

    debug!(
        paragraphs = paragraphs.len(),
        detector = splitter.detector().name(),
        "splitting input"
    );
    splitter.split_paragraphs(&paragraphs)
}

fn cmd_split(
    files: &[PathBuf],
    output: Option<&Path>,
    args: &SplitArgs,
    format: OutputFormat,
) -> Result<String> {
    let segments = split_input(files, args)?;
    let rendered = format_segments(&segments, args.max_length, format);

    match output {
        Some(path) => {
            write_file(path, &rendered)?;
            Ok(format!(
                "Wrote {} segments to {}\n",
                segments.len(),
                path.display()
            ))
        }
        None => Ok(rendered),
    }
}

fn cmd_spans(file: Option<&Path>, format: OutputFormat) -> Result<String> {
    let source = file.map_or(InputSource::Stdin, InputSource::from_path);
    let text = source.read()?;
    Ok(format_spans(&chunk(&text), format))
}

/// Publishes the split input through an NDJSON publisher.
///
/// With an outbox the records go to the file and a summary in `format` is
/// returned. Without one the records are the output, so they are returned
/// as NDJSON regardless of `format`.
fn cmd_publish(
    files: &[PathBuf],
    outbox: Option<&Path>,
    id_prefix: &str,
    args: &SplitArgs,
    format: OutputFormat,
) -> Result<String> {
    if id_prefix.trim().is_empty() {
        return Err(CommandError::InvalidArgument("--id-prefix must not be empty".to_string()).into());
    }
    let segments = split_input(files, args)?;

    if let Some(path) = outbox {
        let file = create_output(path)?;
        let mut publisher = NdjsonPublisher::with_prefix(BufWriter::new(file), id_prefix);
        let thread = publish_thread(&mut publisher, &segments)?;
        let outbox_name = path.display().to_string();
        return Ok(format_published(&thread, Some(&outbox_name), format));
    }

    let mut publisher = NdjsonPublisher::with_prefix(Vec::new(), id_prefix);
    publish_thread(&mut publisher, &segments)?;
    String::from_utf8(publisher.into_inner())
        .map_err(|e| CommandError::OutputFormat(e.to_string()).into())
}

fn cmd_detectors(format: OutputFormat) -> Result<String> {
    let detectors = available_detectors()
        .iter()
        .map(|&name| create_detector(name).map(|d| (name, d.description())))
        .collect::<Result<Vec<_>>>()?;
    Ok(format_detectors(&detectors, DEFAULT_DETECTOR, format))
}
