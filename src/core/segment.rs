//! Final length-bounded output units.

use serde::{Deserialize, Serialize};

/// One message of the output thread.
///
/// Segments are emitted in source order, which is load-bearing: each one is
/// published as a reply to the segment before it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Message text.
    pub text: String,
}

impl Segment {
    /// Creates a segment.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Length of the text in graphemes.
    #[must_use]
    pub fn len(&self) -> usize {
        crate::io::grapheme_count(&self.text)
    }

    /// Checks if the segment has no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Checks whether the segment respects `max_length`.
    #[must_use]
    pub fn fits(&self, max_length: usize) -> bool {
        self.len() <= max_length
    }
}

impl From<&str> for Segment {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Segment {
    fn from(text: String) -> Self {
        Self { text }
    }
}
