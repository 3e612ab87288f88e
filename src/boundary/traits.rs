//! Boundary detector trait definition.

use std::ops::Range;

/// Finds sentence and word boundaries in text.
///
/// Detectors are pure: they keep no state between calls and return byte
/// ranges into the text they were given, in order and non-overlapping.
/// Ranges never include surrounding whitespace, so the gaps between them
/// are exactly the whitespace of the source.
///
/// # Examples
///
/// ```
/// use threadsplit::boundary::{BoundaryDetector, RuleBasedDetector};
///
/// let detector = RuleBasedDetector::new();
/// let sentences = detector.sentences("Fear not. I am with you.");
/// assert_eq!(sentences, vec!["Fear not.", "I am with you."]);
/// ```
pub trait BoundaryDetector: Send + Sync {
    /// Returns the byte ranges of each sentence in `text`.
    fn sentence_ranges(&self, text: &str) -> Vec<Range<usize>>;

    /// Returns the byte ranges of each word-level token in `text`.
    ///
    /// The default splits on whitespace, keeping punctuation attached to
    /// the word it follows.
    fn token_ranges(&self, text: &str) -> Vec<Range<usize>> {
        whitespace_tokens(text)
    }

    /// Returns the name of the detector.
    fn name(&self) -> &'static str;

    /// Returns a description of the detector.
    fn description(&self) -> &'static str {
        "No description available"
    }

    /// Returns the sentences of `text` as slices.
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.sentence_ranges(text)
            .into_iter()
            .map(|range| &text[range])
            .collect()
    }

    /// Returns the tokens of `text` as slices.
    fn tokens<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.token_ranges(text)
            .into_iter()
            .map(|range| &text[range])
            .collect()
    }
}

/// Characters that may close a quotation, aside or emphasis after the word
/// they follow.
pub const CLOSING_MARKS: &[char] = &['"', '\'', '\u{201D}', '\u{2019}', ')', ']', '\u{BB}', '*', '_'];

/// Checks whether `token` consists only of closing marks.
///
/// Such a token belongs to the word before it even when whitespace or a
/// line break separates them.
///
/// # Examples
///
/// ```
/// use threadsplit::boundary::is_closing_marks;
///
/// assert!(is_closing_marks("\"'"));
/// assert!(!is_closing_marks("God.\""));
/// assert!(!is_closing_marks(""));
/// ```
#[must_use]
pub fn is_closing_marks(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| CLOSING_MARKS.contains(&c))
}

/// Splits text into maximal runs of non-whitespace characters.
#[must_use]
pub fn whitespace_tokens(text: &str) -> Vec<Range<usize>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(s..i);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }

    if let Some(s) = start {
        tokens.push(s..text.len());
    }

    tokens
}
