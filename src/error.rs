//! Error types for threadsplit operations.
//!
//! This module provides the error hierarchy using `thiserror` for the
//! splitting pipeline, publishing, file I/O and CLI commands.

use thiserror::Error;

/// Result type alias for threadsplit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Splitting-related errors (chunking, packing, fallback tiers).
    #[error("split error: {0}")]
    Split(#[from] SplitError),

    /// Thread publishing errors.
    #[error("publish error: {0}")]
    Publish(#[from] PublishError),

    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),
}

/// Errors raised while turning a paragraph into segments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    /// A single token is longer than the maximum segment length and the
    /// configured policy rejects oversized fragments.
    #[error("token of length {length} exceeds maximum segment length {max}: {preview}")]
    SegmentTooLong {
        /// Length of the offending fragment in graphemes.
        length: usize,
        /// Configured maximum length.
        max: usize,
        /// Leading part of the fragment, for diagnostics.
        preview: String,
    },

    /// Invalid splitter configuration.
    #[error("invalid split configuration: {reason}")]
    InvalidConfig {
        /// Reason the configuration is invalid.
        reason: String,
    },

    /// Unknown boundary detector name.
    #[error("unknown boundary detector: {name}")]
    UnknownDetector {
        /// Name that was not recognised.
        name: String,
    },
}

/// Errors raised by a thread publisher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    /// The message could not be delivered.
    #[error("transport failure on segment {index}: {reason}")]
    Transport {
        /// Zero-based index of the segment being submitted.
        index: usize,
        /// Underlying failure.
        reason: String,
    },

    /// The remote side refused the message.
    #[error("segment {index} rejected: {reason}")]
    Rejected {
        /// Zero-based index of the segment being submitted.
        index: usize,
        /// Rejection reason.
        reason: String,
    },

    /// A record could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to write file.
    #[error("failed to write file: {path}: {reason}")]
    WriteFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Memory mapping error.
    #[error("memory mapping failed: {path}: {reason}")]
    MmapFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Directory creation error.
    #[error("failed to create directory: {path}: {reason}")]
    DirectoryFailed {
        /// Path to the directory.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Input contained nothing to split.
    #[error("no input text provided")]
    EmptyInput,

    /// Output format error.
    #[error("output format error: {0}")]
    OutputFormat(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Generic(err.to_string()))
    }
}

impl From<serde_json::Error> for PublishError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        Self::OutputFormat(err.to_string())
    }
}
