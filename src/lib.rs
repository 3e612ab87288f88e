//! # threadsplit
//!
//! Quote-aware splitting of long prose into a thread of short messages.
//!
//! A paragraph is partitioned into quoted and unquoted spans, packed
//! greedily into segments under a length budget and cleaned up so each
//! segment can be posted as a reply to the one before it. Spans too long
//! for one message are cut at sentence boundaries first, then at clause
//! punctuation, and only as a last resort between words.
//!
//! ## Features
//!
//! - **Quote Aware**: quoted speech stays in one message whenever it fits
//! - **Pluggable Boundaries**: rule-based or Unicode sentence detection
//! - **Unicode Aware**: lengths are measured in grapheme clusters
//! - **Publishing**: reply-chained output through a [`publish::Publisher`]
//!
//! ## Example
//!
//! ```
//! use threadsplit::{SplitConfig, ThreadSplitter};
//!
//! let splitter = ThreadSplitter::new(SplitConfig::with_max_length(40)).unwrap();
//! let segments = splitter
//!     .split_paragraph("He cried out, \"Lord, save me!\" And at once he was caught.")
//!     .unwrap();
//! assert!(segments.iter().all(|s| s.len() <= 40));
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
// Note: unsafe is needed for memory-mapped I/O (memmap2)
#![warn(unsafe_code)]

pub mod boundary;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod publish;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use core::{Segment, Span, SpanKind};

// Re-export configuration
pub use config::{DEFAULT_MAX_LENGTH, LEGACY_MAX_LENGTH, OversizePolicy, SplitConfig};

// Re-export boundary detection types
pub use boundary::{
    BoundaryDetector, RuleBasedDetector, UnicodeDetector, available_detectors, create_detector,
};

// Re-export chunking types
pub use chunking::{ThreadSplitter, split_text};

// Re-export publishing types
pub use publish::{MemoryPublisher, NdjsonPublisher, PublishedMessage, Publisher, publish_thread};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
