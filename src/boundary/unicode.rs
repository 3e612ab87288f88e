//! UAX #29 sentence detection.

use crate::boundary::traits::{BoundaryDetector, is_closing_marks};
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// Detector using Unicode Standard Annex #29 sentence boundaries.
///
/// UAX #29 treats a line break as a paragraph separator, so every line of
/// verse becomes its own sentence. A sentence made only of closing marks is
/// folded into the one before it. Tokens are whitespace-delimited.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeDetector;

impl UnicodeDetector {
    /// Creates a new Unicode sentence detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BoundaryDetector for UnicodeDetector {
    fn sentence_ranges(&self, text: &str) -> Vec<Range<usize>> {
        let mut ranges: Vec<Range<usize>> = Vec::new();

        for (offset, sentence) in text.split_sentence_bound_indices() {
            let trimmed = sentence.trim();
            if trimmed.is_empty() {
                continue;
            }
            let lead = sentence.len() - sentence.trim_start().len();
            let start = offset + lead;
            let end = start + trimmed.len();

            match ranges.last_mut() {
                Some(last) if is_closing_marks(trimmed) => last.end = end,
                _ => ranges.push(start..end),
            }
        }

        ranges
    }

    fn name(&self) -> &'static str {
        "unicode"
    }

    fn description(&self) -> &'static str {
        "Unicode (UAX #29) sentence boundaries with whitespace tokens"
    }
}
