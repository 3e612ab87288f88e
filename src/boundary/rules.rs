//! Punctuation-driven sentence detection.
//!
//! A sentence ends at a token whose last significant character is `.`, `!`
//! or `?`, where closing quotes, brackets and emphasis markers after the
//! punctuation are ignored. Line breaks alone never end a sentence, which
//! keeps verse lines of one sentence together. A token made only of
//! closing marks belongs to the sentence before it.

use crate::boundary::traits::{
    BoundaryDetector, CLOSING_MARKS, is_closing_marks, whitespace_tokens,
};
use std::ops::Range;

/// Characters that may open a token before the word itself.
const OPENERS: &[char] = &['"', '\'', '\u{201C}', '\u{2018}', '(', '[', '\u{AB}', '*', '_'];

/// Abbreviations that end with a period but do not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "st", "sr", "jr", "vs", "etc", "cf", "ch", "vv", "no", "e.g", "i.e",
];

/// Rule-based detector built on whitespace tokens.
///
/// # Examples
///
/// ```
/// use threadsplit::boundary::{BoundaryDetector, RuleBasedDetector};
///
/// let detector = RuleBasedDetector::new();
/// let text = "R. How lovely is your dwelling place!\nMy soul yearns.";
/// assert_eq!(
///     detector.sentences(text),
///     vec!["R. How lovely is your dwelling place!", "My soul yearns."]
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedDetector;

impl RuleBasedDetector {
    /// Creates a new rule-based detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Checks whether `token` closes a sentence.
    fn ends_sentence(token: &str) -> bool {
        let core = token.trim_end_matches(CLOSING_MARKS);
        let Some(last) = core.chars().last() else {
            return false;
        };

        match last {
            '!' | '?' => true,
            '.' => !Self::is_abbreviation(core),
            _ => false,
        }
    }

    /// Checks whether a period-terminated token is an initial or a known
    /// abbreviation rather than the end of a sentence.
    fn is_abbreviation(core: &str) -> bool {
        // Ellipses always end the sentence they trail.
        if core.ends_with("..") || core.ends_with('\u{2026}') {
            return false;
        }

        let word = core
            .trim_start_matches(OPENERS)
            .trim_end_matches('.');

        let mut chars = word.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && c.is_alphabetic()
        {
            return true;
        }

        let lowered = word.to_lowercase();
        ABBREVIATIONS.contains(&lowered.as_str())
    }
}

impl BoundaryDetector for RuleBasedDetector {
    fn sentence_ranges(&self, text: &str) -> Vec<Range<usize>> {
        let mut sentences: Vec<Range<usize>> = Vec::new();
        let mut start: Option<usize> = None;
        let mut end = 0;

        for token in whitespace_tokens(text) {
            if start.is_none()
                && is_closing_marks(&text[token.clone()])
                && let Some(last) = sentences.last_mut()
            {
                last.end = token.end;
                continue;
            }

            let sentence_start = *start.get_or_insert(token.start);
            end = token.end;

            if Self::ends_sentence(&text[token]) {
                sentences.push(sentence_start..end);
                start = None;
            }
        }

        if let Some(sentence_start) = start {
            sentences.push(sentence_start..end);
        }

        sentences
    }

    fn name(&self) -> &'static str {
        "rules"
    }

    fn description(&self) -> &'static str {
        "Punctuation-driven sentences that ignore bare line breaks and abbreviations"
    }
}
