//! Output formatting for CLI commands.
//!
//! Supports text, JSON and NDJSON output formats.

use crate::core::{Segment, Span};
use crate::error::Error;
use crate::publish::PublishedMessage;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Pretty-printed JSON document.
    Json,
    /// One compact JSON object per line.
    Ndjson,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "ndjson" | "jsonl" => Self::Ndjson,
            _ => Self::Text,
        }
    }
}

/// A segment with its position and length, as rendered by `split`.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentRecord<'a> {
    /// One-based position in the thread.
    pub index: usize,
    /// Length in characters.
    pub length: usize,
    /// Segment text.
    pub text: &'a str,
}

fn segment_records(segments: &[Segment]) -> Vec<SegmentRecord<'_>> {
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| SegmentRecord {
            index: i + 1,
            length: segment.len(),
            text: &segment.text,
        })
        .collect()
}

/// Formats the segments of a split.
#[must_use]
pub fn format_segments(segments: &[Segment], max_length: usize, format: OutputFormat) -> String {
    let records = segment_records(segments);
    match format {
        OutputFormat::Text => format_segments_text(&records, max_length),
        OutputFormat::Json => format_json(&records),
        OutputFormat::Ndjson => format_ndjson(&records),
    }
}

fn format_segments_text(records: &[SegmentRecord<'_>], max_length: usize) -> String {
    if records.is_empty() {
        return "No segments.\n".to_string();
    }

    let total = records.len();
    let mut output = String::new();
    for record in records {
        let marker = if record.length > max_length {
            " OVERSIZED"
        } else {
            ""
        };
        let _ = writeln!(
            output,
            "--- {}/{total} ({}/{max_length}){marker} ---",
            record.index, record.length
        );
        output.push_str(record.text);
        output.push_str("\n\n");
    }
    output
}

/// Formats quote chunker spans.
#[must_use]
pub fn format_spans(spans: &[Span], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "{} spans:", spans.len());
            for (i, span) in spans.iter().enumerate() {
                let _ = writeln!(
                    output,
                    "  [{i}] {:<6} {:>5}  {}",
                    span.kind.as_str(),
                    span.len(),
                    truncate(&span.text.replace('\n', "\\n"), 60)
                );
            }
            output
        }
        OutputFormat::Json => format_json(&spans),
        OutputFormat::Ndjson => format_ndjson(spans),
    }
}

/// Formats the result of a publish run.
///
/// `outbox` is where the records went; `None` means the records themselves
/// are the output and no summary is printed.
#[must_use]
pub fn format_published(
    thread: &[PublishedMessage],
    outbox: Option<&str>,
    format: OutputFormat,
) -> String {
    #[derive(Serialize)]
    struct PublishSummary<'a> {
        published: usize,
        outbox: Option<&'a str>,
        root: Option<&'a str>,
        last: Option<&'a str>,
    }

    let summary = PublishSummary {
        published: thread.len(),
        outbox,
        root: thread.first().map(|m| m.id.as_str()),
        last: thread.last().map(|m| m.id.as_str()),
    };

    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(
                output,
                "Published {} segments to {}",
                summary.published,
                outbox.unwrap_or("stdout")
            );
            for message in thread {
                let _ = writeln!(
                    output,
                    "  {} <- {}",
                    message.id,
                    message.in_reply_to.as_deref().unwrap_or("(root)")
                );
            }
            output
        }
        OutputFormat::Json => format_json(&summary),
        OutputFormat::Ndjson => format_ndjson(std::slice::from_ref(&summary)),
    }
}

/// Formats the list of boundary detectors.
#[must_use]
pub fn format_detectors(detectors: &[(&str, &str)], default: &str, format: OutputFormat) -> String {
    #[derive(Serialize)]
    struct DetectorInfo<'a> {
        name: &'a str,
        description: &'a str,
        default: bool,
    }

    let infos: Vec<DetectorInfo<'_>> = detectors
        .iter()
        .map(|&(name, description)| DetectorInfo {
            name,
            description,
            default: name == default,
        })
        .collect();

    match format {
        OutputFormat::Text => {
            let mut output = String::from("Boundary detectors:\n");
            for info in &infos {
                let marker = if info.default { " (default)" } else { "" };
                let _ = writeln!(output, "  {:<8} {}{marker}", info.name, info.description);
            }
            output
        }
        OutputFormat::Json => format_json(&infos),
        OutputFormat::Ndjson => format_ndjson(&infos),
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json | OutputFormat::Ndjson => {
            #[derive(Serialize)]
            struct ErrorOutput<'a> {
                error: &'a str,
                message: String,
            }
            let kind = match error {
                Error::Split(_) => "split_error",
                Error::Publish(_) => "publish_error",
                Error::Io(_) => "io_error",
                Error::Command(_) => "command_error",
            };
            let output = ErrorOutput {
                error: kind,
                message: error.to_string(),
            };
            serde_json::to_string(&output).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize>(value: &T) -> String {
    let mut json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    json.push('\n');
    json
}

/// Formats items as newline-delimited JSON.
fn format_ndjson<T: Serialize>(items: &[T]) -> String {
    let mut output = String::new();
    for item in items {
        output.push_str(&serde_json::to_string(item).unwrap_or_else(|_| "{}".to_string()));
        output.push('\n');
    }
    output
}

/// Truncates a string to max characters with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}
