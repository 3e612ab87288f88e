//! Typed spans produced by the quote chunker.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a span sits inside quoted speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    /// Narration outside any quotation.
    #[default]
    Normal,
    /// Quoted speech, including its quotation marks.
    Quote,
}

impl SpanKind {
    /// Returns the lowercase name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Quote => "quote",
        }
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous run of source text tagged as quoted or normal.
///
/// Concatenating the text of every span returned by
/// [`chunk`](crate::chunking::quote::chunk) reproduces the paragraph
/// exactly. A span is never edited in place; the fallback splitter replaces
/// it with smaller spans of the same kind.
///
/// # Examples
///
/// ```
/// use threadsplit::core::{Span, SpanKind};
///
/// let span = Span::quote("\"Fear not.\"");
/// assert_eq!(span.kind, SpanKind::Quote);
/// assert_eq!(span.len(), 11);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Original text of the span.
    pub text: String,
    /// Quote or normal.
    pub kind: SpanKind,
}

impl Span {
    /// Creates a span of the given kind.
    #[must_use]
    pub fn new(text: impl Into<String>, kind: SpanKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// Creates a normal span.
    #[must_use]
    pub fn normal(text: impl Into<String>) -> Self {
        Self::new(text, SpanKind::Normal)
    }

    /// Creates a quote span.
    #[must_use]
    pub fn quote(text: impl Into<String>) -> Self {
        Self::new(text, SpanKind::Quote)
    }

    /// Creates a span of the same kind carrying different text.
    #[must_use]
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self::new(text, self.kind)
    }

    /// Length of the span text in graphemes.
    #[must_use]
    pub fn len(&self) -> usize {
        crate::io::grapheme_count(&self.text)
    }

    /// Checks if the span has no text at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Checks if the span holds only whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Returns the text without surrounding whitespace.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}
