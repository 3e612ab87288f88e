//! Fallback splitter for spans longer than the segment budget.
//!
//! An oversized span is degraded through three tiers, each attempted only
//! when the previous tier still leaves a piece that does not fit:
//!
//! 1. **Sentence**: one piece per sentence reported by the detector.
//! 2. **Phrase**: oversized sentences are cut after clause punctuation and
//!    the resulting atomic phrases regrouped greedily.
//! 3. **Scrap**: oversized phrases are bisected by token count until every
//!    half fits.
//!
//! Pieces keep the kind of the span they came from. Tokens are re-joined
//! with a single space, or with a newline where the source gap held a line
//! break. A token made only of closing marks never leaves the word before
//! it, so no tier can strand a closing quote.

use crate::boundary::{BoundaryDetector, is_closing_marks};
use crate::config::{OversizePolicy, SplitConfig};
use crate::core::Span;
use crate::error::{Result, SplitError};
use crate::io::{grapheme_count, truncate_graphemes};
use regex::Regex;
use std::borrow::Cow;
use std::ops::Range;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Punctuation that closes an atomic phrase in tier 2.
const CLAUSE_PUNCTUATION: &[char] = &[',', ';', ':', '.', '!', '?'];

/// Graphemes of an oversized token quoted in errors and warnings.
const PREVIEW_LENGTH: usize = 40;

/// Sentence punctuation directly followed by a line break.
fn punctuation_before_newline() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    PATTERN.get_or_init(|| Regex::new(r"([.!?])\n").expect("valid regex"))
}

/// Splits an oversized span into smaller spans of the same kind.
///
/// Every returned span fits `config.max_length` except a single token that
/// is longer than the budget on its own, which is emitted or rejected
/// according to [`SplitConfig::oversize_policy`].
///
/// # Errors
///
/// Returns [`SplitError::SegmentTooLong`] when an unsplittable token exceeds
/// the budget and the policy is [`OversizePolicy::Reject`].
///
/// # Examples
///
/// ```
/// use threadsplit::boundary::RuleBasedDetector;
/// use threadsplit::chunking::fallback::split;
/// use threadsplit::config::SplitConfig;
/// use threadsplit::core::Span;
///
/// let span = Span::normal("Watch and pray. The spirit is willing.");
/// let config = SplitConfig::with_max_length(25);
/// let pieces = split(&span, &RuleBasedDetector::new(), &config).unwrap();
/// assert_eq!(pieces[0].text, "Watch and pray.");
/// assert_eq!(pieces[1].text, "The spirit is willing.");
/// ```
pub fn split(
    span: &Span,
    detector: &dyn BoundaryDetector,
    config: &SplitConfig,
) -> Result<Vec<Span>> {
    let text = separate_line_broken_sentences(&span.text);

    // Tier 1
    let sentences = detector.sentences(&text);
    if sentences.iter().all(|s| fits(s, config)) {
        debug!(tier = "sentence", pieces = sentences.len(), "split oversized span");
        return Ok(sentences.into_iter().map(|s| span.with_text(s)).collect());
    }

    // Tier 2
    let mut phrases: Vec<String> = Vec::with_capacity(sentences.len());
    for sentence in sentences {
        if fits(sentence, config) {
            phrases.push(sentence.to_string());
        } else {
            phrases.extend(split_into_phrases(sentence, detector, config));
        }
    }
    if phrases.iter().all(|p| fits(p, config)) {
        debug!(tier = "phrase", pieces = phrases.len(), "split oversized span");
        return Ok(phrases.into_iter().map(|p| span.with_text(p)).collect());
    }

    // Tier 3
    let mut scraps: Vec<String> = Vec::with_capacity(phrases.len() * 2);
    for phrase in phrases {
        if fits(&phrase, config) {
            scraps.push(phrase);
        } else {
            scraps.extend(split_into_scraps(&phrase, detector, config)?);
        }
    }
    debug!(tier = "scrap", pieces = scraps.len(), "split oversized span");
    Ok(scraps.into_iter().map(|s| span.with_text(s)).collect())
}

/// Inserts a space between sentence punctuation and a following line break
/// so a detector cannot fuse two sentences separated only by the break.
fn separate_line_broken_sentences(text: &str) -> Cow<'_, str> {
    punctuation_before_newline().replace_all(text, "$1 \n")
}

/// Groups token indices into words, folding each token made only of
/// closing marks into the word before it.
fn word_units(text: &str, tokens: &[Range<usize>]) -> Vec<Range<usize>> {
    let mut units: Vec<Range<usize>> = Vec::with_capacity(tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        match units.last_mut() {
            Some(unit) if is_closing_marks(&text[token.clone()]) => unit.end = i + 1,
            _ => units.push(i..i + 1),
        }
    }
    units
}

/// Splits a sentence into the largest groups of atomic phrases that fit.
///
/// An atomic phrase ends at the earliest word carrying clause
/// punctuation. Groups that are still too long are left for tier 3.
pub fn split_into_phrases(
    sentence: &str,
    detector: &dyn BoundaryDetector,
    config: &SplitConfig,
) -> Vec<String> {
    let tokens = detector.token_ranges(sentence);

    let mut atoms: Vec<Range<usize>> = Vec::new();
    let mut start = 0;
    for unit in word_units(sentence, &tokens) {
        if sentence[tokens[unit.start].clone()].ends_with(CLAUSE_PUNCTUATION) {
            atoms.push(start..unit.end);
            start = unit.end;
        }
    }
    if start < tokens.len() {
        atoms.push(start..tokens.len());
    }

    let mut groups: Vec<String> = Vec::new();
    let mut current: Option<Range<usize>> = None;
    for atom in atoms {
        current = Some(match current {
            None => atom,
            Some(open) => {
                let merged = open.start..atom.end;
                if fits(&join_tokens(sentence, &tokens[merged.clone()]), config) {
                    merged
                } else {
                    groups.push(join_tokens(sentence, &tokens[open]));
                    atom
                }
            }
        });
    }
    if let Some(open) = current {
        groups.push(join_tokens(sentence, &tokens[open]));
    }

    groups.retain(|g| !g.is_empty());
    groups
}

/// Bisects a phrase by word count until every fragment fits.
///
/// The left half receives `ceil(n / 2)` words. A single word that only
/// overflows with its closing marks is bisected by token instead. Token
/// counts strictly decrease, so the loop ends; a lone token that is still
/// too long is handled by the oversize policy.
///
/// # Errors
///
/// Returns [`SplitError::SegmentTooLong`] for an oversized single token
/// under [`OversizePolicy::Reject`].
pub fn split_into_scraps(
    phrase: &str,
    detector: &dyn BoundaryDetector,
    config: &SplitConfig,
) -> Result<Vec<String>> {
    let tokens = detector.token_ranges(phrase);
    let word_starts: Vec<usize> = word_units(phrase, &tokens)
        .into_iter()
        .map(|unit| unit.start)
        .collect();
    let mut scraps = Vec::new();
    let mut pending: Vec<Range<usize>> = vec![0..tokens.len()];

    while let Some(range) = pending.pop() {
        let text = join_tokens(phrase, &tokens[range.clone()]);
        let fitting = fits(&text, config);
        if fitting || range.len() <= 1 {
            if !fitting {
                oversized_token(&text, config)?;
            }
            if !text.is_empty() {
                scraps.push(text);
            }
            continue;
        }

        let mid = bisection_point(&word_starts, &range);
        pending.push(mid..range.end);
        pending.push(range.start..mid);
    }

    Ok(scraps)
}

/// Returns the token index that splits `range` after `ceil(n / 2)` of its
/// `n` words, or after `ceil(n / 2)` of its tokens when it holds one word.
fn bisection_point(word_starts: &[usize], range: &Range<usize>) -> usize {
    let inner: Vec<usize> = word_starts
        .iter()
        .copied()
        .filter(|&start| start > range.start && start < range.end)
        .collect();

    if inner.is_empty() {
        range.start + range.len().div_ceil(2)
    } else {
        inner[(inner.len() + 1).div_ceil(2) - 1]
    }
}

/// Applies the oversize policy to a token that cannot be split further.
fn oversized_token(text: &str, config: &SplitConfig) -> Result<()> {
    let length = grapheme_count(text);
    let preview = truncate_graphemes(text, PREVIEW_LENGTH);

    match config.oversize_policy {
        OversizePolicy::Emit => {
            warn!(
                length,
                max = config.max_length,
                token = preview,
                "emitting token longer than maximum segment length"
            );
            Ok(())
        }
        OversizePolicy::Reject => Err(SplitError::SegmentTooLong {
            length,
            max: config.max_length,
            preview: preview.to_string(),
        }
        .into()),
    }
}

/// Joins token ranges of `text` with a single separator per gap.
///
/// The separator is a newline when the source gap contains one, otherwise
/// a space.
pub(crate) fn join_tokens(text: &str, tokens: &[Range<usize>]) -> String {
    let mut joined = String::new();
    let mut previous_end: Option<usize> = None;

    for token in tokens {
        if let Some(end) = previous_end {
            let gap = &text[end..token.start];
            joined.push(if gap.contains('\n') { '\n' } else { ' ' });
        }
        joined.push_str(&text[token.clone()]);
        previous_end = Some(token.end);
    }

    joined
}

fn fits(text: &str, config: &SplitConfig) -> bool {
    config.fits(grapheme_count(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::{RuleBasedDetector, whitespace_tokens};
    use crate::core::SpanKind;

    fn config(max: usize) -> SplitConfig {
        SplitConfig::with_max_length(max)
    }

    fn texts(spans: &[Span]) -> Vec<&str> {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_tier_one_sentences() {
        let span = Span::quote("\"I am going the way of all flesh.\nTake courage and be a man.");
        let pieces = split(&span, &RuleBasedDetector::new(), &config(40)).unwrap();
        assert_eq!(
            texts(&pieces),
            vec!["\"I am going the way of all flesh.", "Take courage and be a man."]
        );
        assert!(pieces.iter().all(|p| p.kind == SpanKind::Quote));
    }

    #[test]
    fn test_tier_two_phrases() {
        let sentence = "Keep the mandate of the Lord, your God, following his ways\n\
                        and observing his statutes, commands, ordinances, and decrees.";
        let pieces = split(&Span::normal(sentence), &RuleBasedDetector::new(), &config(60)).unwrap();
        assert_eq!(
            texts(&pieces),
            vec![
                "Keep the mandate of the Lord, your God,",
                "following his ways\nand observing his statutes, commands,",
                "ordinances, and decrees.",
            ]
        );
    }

    #[test]
    fn test_tier_two_keeps_fitting_sentences() {
        let text = "Short one. This second sentence, which rambles, is far too long to fit.";
        let pieces = split(&Span::normal(text), &RuleBasedDetector::new(), &config(40)).unwrap();
        assert_eq!(pieces[0].text, "Short one.");
        assert!(pieces.iter().all(|p| p.len() <= 40));
    }

    #[test]
    fn test_tier_three_bisection() {
        let phrase = vec!["abcd"; 113].join(" ");
        assert_eq!(grapheme_count(&phrase), 564);

        let pieces = split(&Span::normal(&phrase), &RuleBasedDetector::new(), &config(280)).unwrap();
        let lengths: Vec<usize> = pieces.iter().map(Span::len).collect();
        assert_eq!(lengths, vec![144, 139, 279]);
        assert_eq!(texts(&pieces).join(" "), phrase);
    }

    #[test]
    fn test_scraps_left_half_gets_ceiling() {
        let scraps = split_into_scraps("a b c", &RuleBasedDetector::new(), &config(3)).unwrap();
        assert_eq!(scraps, vec!["a b", "c"]);
    }

    #[test]
    fn test_oversized_token_emitted() {
        let url = format!("https://example.com/{}", "x".repeat(60));
        let phrase = format!("see {url} now");
        let scraps = split_into_scraps(&phrase, &RuleBasedDetector::new(), &config(20)).unwrap();
        assert_eq!(scraps, vec!["see".to_string(), url, "now".to_string()]);
    }

    #[test]
    fn test_oversized_token_rejected() {
        let phrase = format!("see {}", "x".repeat(60));
        let strict = config(20).oversize_policy(OversizePolicy::Reject);
        let result = split_into_scraps(&phrase, &RuleBasedDetector::new(), &strict);
        assert!(matches!(
            result,
            Err(crate::Error::Split(SplitError::SegmentTooLong {
                length: 60,
                max: 20,
                ..
            }))
        ));
    }

    #[test]
    fn test_phrases_break_at_earliest_punctuation() {
        let phrases =
            split_into_phrases("one, two, three, four", &RuleBasedDetector::new(), &config(9));
        assert_eq!(phrases, vec!["one, two,", "three,", "four"]);
    }

    #[test]
    fn test_word_units_fold_closing_marks() {
        let text = "\" always.\n\" and '";
        let tokens = whitespace_tokens(text);
        assert_eq!(word_units(text, &tokens), vec![0..1, 1..3, 3..5]);
    }

    #[test]
    fn test_closing_mark_never_stranded() {
        let span = Span::quote(
            "\"I am going the way of all flesh.\nTake courage and be a man of God always.\n\"",
        );
        let pieces = split(&span, &RuleBasedDetector::new(), &config(40)).unwrap();
        assert_eq!(
            texts(&pieces),
            vec![
                "\"I am going the way of all flesh.",
                "Take courage and be a",
                "man of God always.\n\"",
            ]
        );
    }

    #[test]
    fn test_scraps_split_word_from_marks_when_needed() {
        let word = "x".repeat(30);
        let phrase = format!("{word} \"");
        let scraps = split_into_scraps(&phrase, &RuleBasedDetector::new(), &config(31)).unwrap();
        assert_eq!(scraps, vec![word, "\"".to_string()]);
    }

    #[test]
    fn test_bisection_point_prefers_word_boundaries() {
        let starts = [0, 1, 3, 4];
        assert_eq!(bisection_point(&starts, &(0..5)), 3);
        assert_eq!(bisection_point(&starts, &(1..3)), 2);
        assert_eq!(bisection_point(&starts, &(0..2)), 1);
    }

    #[test]
    fn test_phrases_keep_closing_mark() {
        let phrases = split_into_phrases(
            "he said, never again.\n\" Then",
            &RuleBasedDetector::new(),
            &config(25),
        );
        assert_eq!(phrases, vec!["he said, never again.\n\"", "Then"]);
    }

    #[test]
    fn test_separate_line_broken_sentences() {
        assert_eq!(
            separate_line_broken_sentences("Amen.\nAlleluia!\nPraise"),
            "Amen. \nAlleluia! \nPraise"
        );
        assert!(matches!(
            separate_line_broken_sentences("no change here"),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_join_tokens_keeps_line_breaks() {
        let text = "for he has committed\n  no offense   against you";
        let joined = join_tokens(text, &whitespace_tokens(text));
        assert_eq!(joined, "for he has committed\nno offense against you");
    }
}
