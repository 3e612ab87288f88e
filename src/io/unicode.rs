//! Unicode helpers.
//!
//! Segment budgets are counted in extended grapheme clusters so that an
//! accented letter or an emoji with modifiers costs one unit, the way a
//! reader perceives it.

use unicode_segmentation::UnicodeSegmentation;

/// Counts the number of grapheme clusters in a string.
///
/// # Examples
///
/// ```
/// use threadsplit::io::grapheme_count;
///
/// assert_eq!(grapheme_count("Hello"), 5);
/// assert_eq!(grapheme_count("世界"), 2);
/// ```
#[must_use]
pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Truncates a string at a grapheme cluster boundary.
///
/// Returns a slice holding at most `max_graphemes` grapheme clusters.
#[must_use]
pub fn truncate_graphemes(s: &str, max_graphemes: usize) -> &str {
    let mut end_byte = 0;

    for (count, grapheme) in s.graphemes(true).enumerate() {
        if count >= max_graphemes {
            break;
        }
        end_byte += grapheme.len();
    }

    &s[..end_byte]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grapheme_count() {
        assert_eq!(grapheme_count("Hello"), 5);
        assert_eq!(grapheme_count("世界"), 2);
        assert_eq!(grapheme_count(""), 0);
        assert_eq!(grapheme_count("\u{201C}Hi\u{201D}"), 4);
    }

    #[test]
    fn test_grapheme_count_combining_marks() {
        assert_eq!(grapheme_count("e\u{301}"), 1);
        assert_eq!(grapheme_count("\r\n"), 1);
    }

    #[test]
    fn test_truncate_graphemes() {
        assert_eq!(truncate_graphemes("Hello", 3), "Hel");
        assert_eq!(truncate_graphemes("世界!", 2), "世界");
        assert_eq!(truncate_graphemes("Hello", 10), "Hello");
    }
}
