//! Paragraph-to-thread pipeline.

use crate::boundary::{BoundaryDetector, RuleBasedDetector, create_detector};
use crate::chunking::{normalize::normalize, pack::pack, quote::chunk};
use crate::config::SplitConfig;
use crate::core::{Segment, Span};
use crate::error::Result;
use rayon::prelude::*;
use std::fmt;
use tracing::debug;

/// Runs the full splitting pipeline with one detector and configuration.
///
/// A paragraph is chunked into quote and normal spans, packed into
/// length-bounded segments and normalized. Several paragraphs are processed
/// independently and their segments concatenated in input order.
///
/// # Examples
///
/// ```
/// use threadsplit::chunking::ThreadSplitter;
/// use threadsplit::config::SplitConfig;
///
/// let splitter = ThreadSplitter::new(SplitConfig::new()).unwrap();
/// let segments = splitter
///     .split_paragraph("  Jonathan spoke well of David to his father Saul.  ")
///     .unwrap();
/// assert_eq!(segments.len(), 1);
/// assert_eq!(segments[0].text, "Jonathan spoke well of David to his father Saul.");
/// ```
pub struct ThreadSplitter {
    detector: Box<dyn BoundaryDetector>,
    config: SplitConfig,
}

impl fmt::Debug for ThreadSplitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadSplitter")
            .field("detector", &self.detector.name())
            .field("config", &self.config)
            .finish()
    }
}

impl ThreadSplitter {
    /// Creates a splitter using the rule-based detector.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SplitError::InvalidConfig`] if the
    /// configuration is invalid.
    pub fn new(config: SplitConfig) -> Result<Self> {
        Self::with_detector(Box::new(RuleBasedDetector::new()), config)
    }

    /// Creates a splitter with an explicit detector.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SplitError::InvalidConfig`] if the
    /// configuration is invalid.
    pub fn with_detector(detector: Box<dyn BoundaryDetector>, config: SplitConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { detector, config })
    }

    /// Creates a splitter, resolving the detector by name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SplitError::UnknownDetector`] for an unknown
    /// name, or [`crate::error::SplitError::InvalidConfig`] for an invalid
    /// configuration.
    pub fn from_detector_name(name: &str, config: SplitConfig) -> Result<Self> {
        Self::with_detector(create_detector(name)?, config)
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Returns the detector in use.
    #[must_use]
    pub fn detector(&self) -> &dyn BoundaryDetector {
        self.detector.as_ref()
    }

    /// Returns the quote chunker output for `paragraph`.
    #[must_use]
    pub fn spans(&self, paragraph: &str) -> Vec<Span> {
        chunk(paragraph)
    }

    /// Splits one paragraph into normalized segments.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SplitError::SegmentTooLong`] when an
    /// unsplittable token exceeds the budget under the reject policy.
    pub fn split_paragraph(&self, paragraph: &str) -> Result<Vec<Segment>> {
        let spans = chunk(paragraph);
        let packed = pack(&spans, self.detector.as_ref(), &self.config)?;
        let segments = normalize(packed, &self.config);
        debug!(
            detector = self.detector.name(),
            max_length = self.config.max_length,
            spans = spans.len(),
            segments = segments.len(),
            "split paragraph"
        );
        Ok(segments)
    }

    /// Splits independent paragraphs in parallel.
    ///
    /// The result is the concatenation of each paragraph's segments in input
    /// order.
    ///
    /// # Errors
    ///
    /// Returns the first error of any paragraph, in input order.
    pub fn split_paragraphs<S>(&self, paragraphs: &[S]) -> Result<Vec<Segment>>
    where
        S: AsRef<str> + Sync,
    {
        let per_paragraph: Vec<Result<Vec<Segment>>> = paragraphs
            .par_iter()
            .map(|p| self.split_paragraph(p.as_ref()))
            .collect();

        let mut segments = Vec::new();
        for result in per_paragraph {
            segments.extend(result?);
        }
        Ok(segments)
    }
}
