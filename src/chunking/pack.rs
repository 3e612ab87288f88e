//! Segment packer.
//!
//! Greedily packs typed spans into segments that respect the maximum
//! length. A span too long to stand alone is expanded in place through the
//! fallback splitter; the expansion is driven by an explicit worklist, so
//! nesting depth never grows with the input.

use crate::boundary::BoundaryDetector;
use crate::chunking::fallback;
use crate::config::SplitConfig;
use crate::core::{Segment, Span};
use crate::error::Result;
use crate::io::grapheme_count;
use std::collections::VecDeque;
use tracing::debug;

/// Abbreviation marker that must stay on the same line as what follows.
pub const ABBREVIATION_MARKER: &str = "R.";

/// Returns the separator used to append more text after `open`.
///
/// Text ending in the `R.` response marker continues on the same line;
/// everything else is joined with a line break.
#[must_use]
pub fn separator_after(open: &str) -> &'static str {
    if open.ends_with(ABBREVIATION_MARKER) {
        " "
    } else {
        "\n"
    }
}

/// A span waiting to be packed.
#[derive(Debug)]
struct Pending {
    span: Span,
    /// Produced by the fallback splitter; never split again.
    expanded: bool,
}

/// Packing state: closed segments plus the segment still accepting text.
#[derive(Debug, Default)]
struct Packing {
    closed: Vec<Segment>,
    open: String,
}

impl Packing {
    /// Returns the open text with `piece` appended.
    fn joined(&self, piece: &str) -> String {
        if self.open.is_empty() {
            piece.to_string()
        } else {
            format!("{}{}{piece}", self.open, separator_after(&self.open))
        }
    }

    fn with_open(self, open: String) -> Self {
        Self { open, ..self }
    }

    /// Closes the open segment; an empty one is discarded.
    fn close(self) -> Self {
        let Self { mut closed, open } = self;
        if !open.is_empty() {
            closed.push(Segment::new(open));
        }
        Self {
            closed,
            open: String::new(),
        }
    }

    /// Returns all segments; at least one, possibly empty.
    fn finish(self) -> Vec<Segment> {
        let Self { mut closed, open } = self;
        if !open.is_empty() || closed.is_empty() {
            closed.push(Segment::new(open));
        }
        closed
    }
}

/// Packs `spans` into segments of at most `config.max_length` graphemes.
///
/// For each span, in order:
///
/// 1. append its trimmed text to the open segment if the result still fits;
/// 2. otherwise start a new segment with it if it fits on its own;
/// 3. otherwise close the open segment and pack the fallback splitter's
///    pieces in its place. The last of those segments stays open for the
///    spans that follow.
///
/// Blank spans are skipped. The result always holds at least one segment,
/// which is empty when nothing was packed.
///
/// # Errors
///
/// Propagates [`crate::error::SplitError::SegmentTooLong`] from the
/// fallback splitter.
///
/// # Examples
///
/// ```
/// use threadsplit::boundary::RuleBasedDetector;
/// use threadsplit::chunking::{pack::pack, quote::chunk};
/// use threadsplit::config::SplitConfig;
///
/// let spans = chunk("Saul swore,\n\"As the LORD lives, he shall not be killed.\"");
/// let segments = pack(&spans, &RuleBasedDetector::new(), &SplitConfig::new()).unwrap();
/// assert_eq!(segments.len(), 1);
/// assert_eq!(
///     segments[0].text,
///     "Saul swore,\n\"As the LORD lives, he shall not be killed.\""
/// );
/// ```
pub fn pack(
    spans: &[Span],
    detector: &dyn BoundaryDetector,
    config: &SplitConfig,
) -> Result<Vec<Segment>> {
    let mut pending: VecDeque<Pending> = spans
        .iter()
        .map(|span| Pending {
            span: span.clone(),
            expanded: false,
        })
        .collect();
    let mut state = Packing::default();

    while let Some(Pending { span, expanded }) = pending.pop_front() {
        let piece = span.trimmed();
        if piece.is_empty() {
            continue;
        }

        let joined = state.joined(piece);
        if config.fits(grapheme_count(&joined)) {
            state = state.with_open(joined);
            continue;
        }

        let length = grapheme_count(piece);
        if config.fits(length) || expanded {
            state = state.close().with_open(piece.to_string());
            continue;
        }

        let pieces = fallback::split(&span, detector, config)?;
        debug!(
            kind = %span.kind,
            length,
            pieces = pieces.len(),
            "expanding oversized span"
        );
        state = state.close();
        for span in pieces.into_iter().rev() {
            pending.push_front(Pending {
                span,
                expanded: true,
            });
        }
    }

    Ok(state.finish())
}
