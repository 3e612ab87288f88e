//! Quote chunker.
//!
//! Partitions a paragraph into alternating quoted and unquoted spans in a
//! single left-to-right scan. No character is dropped or reordered.

use crate::core::{Span, SpanKind};
use std::mem;

/// The quotation mark that opens and closes quoted speech.
pub const QUOTE_MARK: char = '"';

/// Splits `paragraph` into typed spans.
///
/// A quotation mark inside a quote closes it unless the next character is a
/// letter, in which case the mark is kept as an embedded mark and the quote
/// continues. Zero-length spans are never returned.
///
/// # Examples
///
/// ```
/// use threadsplit::chunking::quote::chunk;
/// use threadsplit::core::SpanKind;
///
/// let spans = chunk("He swore, \"As the LORD lives.\" Then he left.");
/// let kinds: Vec<SpanKind> = spans.iter().map(|s| s.kind).collect();
/// assert_eq!(kinds, vec![SpanKind::Normal, SpanKind::Quote, SpanKind::Normal]);
/// assert_eq!(spans[1].text, "\"As the LORD lives.\"");
/// ```
#[must_use]
pub fn chunk(paragraph: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut kind = SpanKind::Normal;
    let mut text = String::new();
    let mut chars = paragraph.chars().peekable();

    while let Some(c) = chars.next() {
        if c != QUOTE_MARK {
            text.push(c);
            continue;
        }

        match kind {
            SpanKind::Quote => {
                text.push(c);
                let embedded = chars.peek().is_some_and(|next| next.is_alphabetic());
                if !embedded {
                    spans.push(Span::new(mem::take(&mut text), SpanKind::Quote));
                    kind = SpanKind::Normal;
                }
            }
            SpanKind::Normal => {
                if !text.is_empty() {
                    spans.push(Span::new(mem::take(&mut text), SpanKind::Normal));
                }
                kind = SpanKind::Quote;
                text.push(c);
            }
        }
    }

    if !text.is_empty() {
        spans.push(Span::new(text, kind));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(spans: &[Span]) -> Vec<SpanKind> {
        spans.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_no_quotes() {
        let spans = chunk("And from that day on, Saul was jealous of David.\n");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, SpanKind::Normal);
    }

    #[test]
    fn test_empty_paragraph() {
        assert!(chunk("").is_empty());
    }

    #[test]
    fn test_quote_at_start() {
        let spans = chunk("\"Fear not.\" said the angel.");
        assert_eq!(kinds(&spans), vec![SpanKind::Quote, SpanKind::Normal]);
        assert_eq!(spans[0].text, "\"Fear not.\"");
        assert_eq!(spans[1].text, " said the angel.");
    }

    #[test]
    fn test_multiline_quote_preserved() {
        let text = "The women sang:\n\n\"Saul has slain his thousands,\nand David his ten thousands.\n\"\nSaul was angry.";
        let spans = chunk(text);
        assert_eq!(
            kinds(&spans),
            vec![SpanKind::Normal, SpanKind::Quote, SpanKind::Normal]
        );
        assert_eq!(
            spans[1].text,
            "\"Saul has slain his thousands,\nand David his ten thousands.\n\""
        );
    }

    #[test]
    fn test_embedded_mark_followed_by_letter() {
        let spans = chunk("\"It is written\"thus and so.\" Then silence.");
        assert_eq!(kinds(&spans), vec![SpanKind::Quote, SpanKind::Normal]);
        assert_eq!(spans[0].text, "\"It is written\"thus and so.\"");
    }

    #[test]
    fn test_adjacent_quotes_without_gap() {
        let spans = chunk("\"Who are you?\"\"I am a voice.\"");
        assert_eq!(kinds(&spans), vec![SpanKind::Quote, SpanKind::Quote]);
        assert_eq!(spans[0].text, "\"Who are you?\"");
        assert_eq!(spans[1].text, "\"I am a voice.\"");
    }

    #[test]
    fn test_adjacent_quotes_with_whitespace_between() {
        let spans = chunk("\"Who are you?\"\n\"I am a voice.\"");
        assert_eq!(
            kinds(&spans),
            vec![SpanKind::Quote, SpanKind::Normal, SpanKind::Quote]
        );
        assert!(spans[1].is_blank());
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        let spans = chunk("He cried, \"Hosanna in the highest");
        assert_eq!(kinds(&spans), vec![SpanKind::Normal, SpanKind::Quote]);
        assert_eq!(spans[1].text, "\"Hosanna in the highest");
    }

    #[test]
    fn test_concatenation_reproduces_input() {
        let text = "Jonathan said:\n\"Let not the king sin.\"\nSaul swore, \"He shall not die.\"";
        let joined: String = chunk(text).into_iter().map(|s| s.text).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_lone_quote_mark() {
        let spans = chunk("\"");
        assert_eq!(spans, vec![Span::quote("\"")]);
    }
}
