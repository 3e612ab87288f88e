//! Quote-aware splitting of prose into thread segments.
//!
//! The pipeline runs in four stages:
//!
//! - **Quote**: partition a paragraph into quoted and unquoted spans
//! - **Pack**: greedily fill length-bounded segments with spans
//! - **Fallback**: degrade spans too long to fit through sentence, phrase
//!   and scrap tiers
//! - **Normalize**: trim segments and repair stranded closing quotes
//!
//! [`ThreadSplitter`] wires the stages together.

pub mod fallback;
pub mod normalize;
pub mod pack;
pub mod quote;
pub mod splitter;

pub use splitter::ThreadSplitter;

use crate::config::SplitConfig;
use crate::core::Segment;
use crate::error::Result;

/// Splits one paragraph with the default detector.
///
/// # Errors
///
/// Returns an error for an invalid configuration, or for an oversized
/// token under the reject policy.
///
/// # Examples
///
/// ```
/// use threadsplit::chunking::split_text;
/// use threadsplit::config::SplitConfig;
///
/// let segments = split_text("Rise, let us be going.", &SplitConfig::new()).unwrap();
/// assert_eq!(segments[0].text, "Rise, let us be going.");
/// ```
pub fn split_text(paragraph: &str, config: &SplitConfig) -> Result<Vec<Segment>> {
    ThreadSplitter::new(*config)?.split_paragraph(paragraph)
}
