//! Segment normalizer.
//!
//! Final cleanup of packed segments: surrounding whitespace is trimmed, a
//! closing quotation mark stranded on its own line is pulled back onto the
//! line it closes, and segments left empty are dropped.
//!
//! A segment that opens with a line of closing marks gives those marks to
//! the segment before it, as long as that segment stays within budget.

use crate::config::SplitConfig;
use crate::core::Segment;
use crate::io::grapheme_count;
use regex::Regex;
use std::sync::OnceLock;

/// A line holding only closing marks, with any blank lines before it.
fn stranded_closer() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?m)[ \t]*\n[ \t\n]*(['"\u{2019}\u{201D}]+)[ \t]*$"#).expect("valid regex")
    })
}

/// A first line holding only closing marks.
fn leading_closer() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    PATTERN.get_or_init(|| {
        Regex::new(r#"\A(['"\u{2019}\u{201D}]+)[ \t]*(?:\n|\z)"#).expect("valid regex")
    })
}

/// Normalizes the text of a single segment.
///
/// # Examples
///
/// ```
/// use threadsplit::chunking::normalize::normalize_text;
///
/// assert_eq!(
///     normalize_text("  Saul has slain his thousands,\nDavid his ten thousands.\n\"\n"),
///     "Saul has slain his thousands,\nDavid his ten thousands.\""
/// );
/// ```
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let collapsed = stranded_closer().replace_all(text.trim(), "$1");
    collapsed.trim().to_string()
}

/// Normalizes every segment and drops the ones left empty.
///
/// Closing marks that open a segment are moved to the end of the previous
/// segment when the result still fits `config.max_length`; otherwise they
/// stay where they are. Order is preserved and the operation is
/// idempotent.
///
/// # Examples
///
/// ```
/// use threadsplit::chunking::normalize::normalize;
/// use threadsplit::config::SplitConfig;
/// use threadsplit::core::Segment;
///
/// let segments = vec![
///     Segment::new("\"Any support you might have had from me is *qorban*\""),
///     Segment::new("'\n(meaning, dedicated to God),"),
/// ];
/// let texts: Vec<String> = normalize(segments, &SplitConfig::new())
///     .into_iter()
///     .map(|s| s.text)
///     .collect();
/// assert_eq!(
///     texts,
///     vec![
///         "\"Any support you might have had from me is *qorban*\"'",
///         "(meaning, dedicated to God),"
///     ]
/// );
/// ```
#[must_use]
pub fn normalize(segments: Vec<Segment>, config: &SplitConfig) -> Vec<Segment> {
    let mut normalized: Vec<Segment> = Vec::with_capacity(segments.len());

    for segment in segments {
        let mut text = normalize_text(&segment.text);
        if let Some(marks) = leading_closer().captures(&text).map(|c| c[1].to_string())
            && let Some(previous) = normalized.last_mut()
            && config.fits(grapheme_count(&previous.text) + grapheme_count(&marks))
        {
            previous.text.push_str(&marks);
            text = text[marks.len()..].trim().to_string();
        }

        if !text.is_empty() {
            normalized.push(Segment::new(text));
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn texts(segments: Vec<Segment>) -> Vec<String> {
        segments.into_iter().map(|s| s.text).collect()
    }

    #[test_case("  Blessed be the LORD.  ", "Blessed be the LORD." ; "trims")]
    #[test_case("his ten thousands.\n\"", "his ten thousands.\"" ; "straight double quote")]
    #[test_case("the word of the Lord.\n'", "the word of the Lord.'" ; "apostrophe")]
    #[test_case("the word of the Lord.\n\u{201D}", "the word of the Lord.\u{201D}" ; "curly double quote")]
    #[test_case("the word of the Lord.\n\u{2019}", "the word of the Lord.\u{2019}" ; "curly single quote")]
    #[test_case("first line.\n\n  \n\"", "first line.\"" ; "blank lines before mark")]
    #[test_case("first line.\n\"  \nsecond line.", "first line.\"\nsecond line." ; "mark mid segment")]
    #[test_case("always. \n\"", "always.\"" ; "space before line break")]
    #[test_case("He said,\n\"Go.\"", "He said,\n\"Go.\"" ; "opening quote untouched")]
    #[test_case("\"", "\"" ; "lone mark kept")]
    fn test_normalize_text(input: &str, expected: &str) {
        assert_eq!(normalize_text(input), expected);
    }

    #[test]
    fn test_normalize_drops_empty() {
        let segments = vec![
            Segment::new(""),
            Segment::new("  \n "),
            Segment::new("Amen."),
        ];
        assert_eq!(
            normalize(segments, &SplitConfig::new()),
            vec![Segment::new("Amen.")]
        );
    }

    #[test]
    fn test_normalize_preserves_order() {
        let segments = vec![Segment::new(" one "), Segment::new("two\n'"), Segment::new("three")];
        let texts = texts(normalize(segments, &SplitConfig::new()));
        assert_eq!(texts, vec!["one", "two'", "three"]);
    }

    #[test]
    fn test_lone_mark_segment_joins_previous() {
        let segments = vec![
            Segment::new("Take courage and be a man of God always."),
            Segment::new("\n\""),
        ];
        let texts = texts(normalize(segments, &SplitConfig::with_max_length(41)));
        assert_eq!(texts, vec!["Take courage and be a man of God always.\""]);
    }

    #[test]
    fn test_leading_mark_line_joins_previous() {
        let segments = vec![
            Segment::new("Yet you say,\n\"Any support is *qorban*\""),
            Segment::new("'\n(meaning, dedicated to God),\nyou allow him nothing more."),
        ];
        let texts = texts(normalize(segments, &SplitConfig::new()));
        assert_eq!(
            texts,
            vec![
                "Yet you say,\n\"Any support is *qorban*\"'",
                "(meaning, dedicated to God),\nyou allow him nothing more."
            ]
        );
    }

    #[test]
    fn test_leading_mark_kept_when_previous_full() {
        let segments = vec![Segment::new("Watch and pray."), Segment::new("\"\nAmen.")];
        let texts = texts(normalize(segments, &SplitConfig::with_max_length(15)));
        assert_eq!(texts, vec!["Watch and pray.", "\"\nAmen."]);
    }

    #[test]
    fn test_leading_opening_quote_untouched() {
        let segments = vec![Segment::new("He responded,"), Segment::new("\"Well did Isaiah prophesy.\"")];
        let texts = texts(normalize(segments, &SplitConfig::new()));
        assert_eq!(texts, vec!["He responded,", "\"Well did Isaiah prophesy.\""]);
    }

    #[test]
    fn test_normalize_idempotent() {
        let segments = vec![
            Segment::new("a\n\"\n\"\n"),
            Segment::new("x\n \n'\ny\n\u{201D}"),
            Segment::new("  plain  "),
        ];
        let config = SplitConfig::with_max_length(12);
        let once = normalize(segments, &config);
        let twice = normalize(once.clone(), &config);
        assert_eq!(once, twice);
    }
}
