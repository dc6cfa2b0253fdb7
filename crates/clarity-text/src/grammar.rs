//! Heuristic grammar highlighting.
//!
//! Three detectors run over each eligible text node: an immediately
//! repeated word, a lowercase standalone "i", and runs of two or more
//! spaces. Word characters are ASCII letters, digits and `_`.

use std::ops::Range;

use tracing::{debug, instrument};

use crate::html::{rewrite_html, MarkKind, Piece};
use crate::scanner::{segment, Scanner, Segment};

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Whitespace as ECMAScript `\s` defines it (differs from
/// `char::is_whitespace` on U+0085 and U+FEFF).
fn is_gap_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Whether a word starts at byte `pos` (word byte, not preceded by one).
fn is_word_start(bytes: &[u8], pos: usize) -> bool {
    is_word_byte(bytes[pos]) && (pos == 0 || !is_word_byte(bytes[pos - 1]))
}

/// Whether byte `pos` is the end of a word (no word byte at `pos`).
fn is_word_end(bytes: &[u8], pos: usize) -> bool {
    pos >= bytes.len() || !is_word_byte(bytes[pos])
}

/// The same word twice in a row, separated by whitespace, ignoring ASCII case.
#[derive(Debug, Default, Clone, Copy)]
pub struct RepeatedWord;

impl Scanner for RepeatedWord {
    fn find_at(&self, text: &str, start: usize) -> Option<Range<usize>> {
        let bytes = text.as_bytes();
        let mut pos = start;
        while pos < bytes.len() {
            if !is_word_start(bytes, pos) {
                pos += 1;
                continue;
            }
            let word_end = (pos..bytes.len())
                .find(|&i| !is_word_byte(bytes[i]))
                .unwrap_or(bytes.len());

            let gap = text[word_end..]
                .char_indices()
                .find(|&(_, c)| !is_gap_char(c))
                .map_or(bytes.len() - word_end, |(i, _)| i);

            if gap > 0 {
                let second = word_end + gap;
                let len = word_end - pos;
                let candidate = second + len;
                if candidate <= bytes.len()
                    && bytes[pos..word_end].eq_ignore_ascii_case(&bytes[second..candidate])
                    && is_word_end(bytes, candidate)
                {
                    return Some(pos..candidate);
                }
            }
            pos = word_end;
        }
        None
    }
}

/// A standalone lowercase "i" used as a pronoun.
#[derive(Debug, Default, Clone, Copy)]
pub struct LowercaseI;

impl Scanner for LowercaseI {
    fn find_at(&self, text: &str, start: usize) -> Option<Range<usize>> {
        let bytes = text.as_bytes();
        (start..bytes.len())
            .find(|&pos| bytes[pos] == b'i' && is_word_start(bytes, pos) && is_word_end(bytes, pos + 1))
            .map(|pos| pos..pos + 1)
    }
}

/// Two or more consecutive ASCII spaces.
#[derive(Debug, Default, Clone, Copy)]
pub struct MultipleSpaces;

impl Scanner for MultipleSpaces {
    fn find_at(&self, text: &str, start: usize) -> Option<Range<usize>> {
        let bytes = text.as_bytes();
        let first = (start..bytes.len().saturating_sub(1))
            .find(|&pos| bytes[pos] == b' ' && bytes[pos + 1] == b' ')?;
        let end = (first..bytes.len())
            .find(|&i| bytes[i] != b' ')
            .unwrap_or(bytes.len());
        Some(first..end)
    }
}

/// The grammar detectors in tie-break order.
pub fn grammar_scanners() -> Vec<Box<dyn Scanner>> {
    vec![
        Box::new(RepeatedWord),
        Box::new(LowercaseI),
        Box::new(MultipleSpaces),
    ]
}

/// Underline likely grammar issues in `html` with `grammar-underline` spans.
///
/// At each position the detector whose match starts first wins and scanning
/// resumes right after it. Text nodes without any issue are left as they
/// are, as is text inside annotation spans, `code` and `pre`.
///
/// # Examples
///
/// ```
/// use clarity_text::apply_grammar;
///
/// let out = apply_grammar("<p>the the cat</p>");
/// assert_eq!(
///     out,
///     r#"<p><span class="grammar-underline" data-ai-mark="grammar">the the</span> cat</p>"#
/// );
/// ```
#[instrument(skip(html), fields(subsystem = "text", component = "grammar", op = "apply_grammar", input_len = html.len()))]
pub fn apply_grammar(html: &str) -> String {
    let scanners = grammar_scanners();

    let (out, marks) = rewrite_html(html, "grammar", |text| {
        let segments = segment(text, &scanners)?;
        Some(
            segments
                .into_iter()
                .map(|s| match s {
                    Segment::Plain(t) => Piece::Text(t.to_string()),
                    Segment::Matched { text, .. } => Piece::Mark {
                        kind: MarkKind::Grammar,
                        text: text.to_string(),
                        title: None,
                    },
                })
                .collect(),
        )
    });

    debug!(mark_count = marks, "Applied grammar highlighting");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(text: &str) -> Vec<&str> {
        let scanners = grammar_scanners();
        segment(text, &scanners)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|s| match s {
                Segment::Matched { text, .. } => Some(text),
                Segment::Plain(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_repeated_word_detected() {
        assert_eq!(matched("the the cat"), vec!["the the"]);
    }

    #[test]
    fn test_repeated_word_gap_characters() {
        assert_eq!(matched("a\u{feff}a"), vec!["a\u{feff}a"]);
        assert_eq!(matched("so\u{a0}so"), vec!["so\u{a0}so"]);
        assert_eq!(matched("i\u{85}i"), vec!["i", "i"]);
    }

    #[test]
    fn test_repeated_word_case_insensitive() {
        assert_eq!(matched("The the cat"), vec!["The the"]);
    }

    #[test]
    fn test_repeated_word_needs_whole_second_word() {
        assert!(RepeatedWord.find_at("the theory", 0).is_none());
        assert!(RepeatedWord.find_at("cat scat", 0).is_none());
    }

    #[test]
    fn test_repeated_word_needs_whitespace() {
        assert!(RepeatedWord.find_at("go-go", 0).is_none());
        assert_eq!(RepeatedWord.find_at("go\n\tgo!", 0), Some(0..6));
    }

    #[test]
    fn test_repeated_word_resumes_after_pair() {
        // The third "the" has nothing left to pair with.
        assert_eq!(matched("the the the cat"), vec!["the the"]);
        assert_eq!(matched("a a a a"), vec!["a a", "a a"]);
    }

    #[test]
    fn test_repeated_word_respects_start_inside_word() {
        // Starting mid-word cannot begin a match there.
        assert_eq!(RepeatedWord.find_at("xab ab", 1), None);
    }

    #[test]
    fn test_lowercase_i_only() {
        assert_eq!(matched("I am i here"), vec!["i"]);
    }

    #[test]
    fn test_lowercase_i_not_inside_words() {
        assert!(LowercaseI.find_at("it is big", 0).is_none());
        assert_eq!(LowercaseI.find_at("so i'm", 0), Some(3..4));
    }

    #[test]
    fn test_multiple_spaces() {
        assert_eq!(MultipleSpaces.find_at("a  b", 0), Some(1..3));
        assert_eq!(MultipleSpaces.find_at("a    b", 0), Some(1..5));
        assert!(MultipleSpaces.find_at("a b c", 0).is_none());
        assert!(MultipleSpaces.find_at("a\t\tb", 0).is_none());
    }

    #[test]
    fn test_earliest_start_wins() {
        assert_eq!(matched("well  i i know"), vec!["  ", "i i"]);
    }

    #[test]
    fn test_no_issues_is_none() {
        let scanners = grammar_scanners();
        assert!(segment("All good here.", &scanners).is_none());
    }

    #[test]
    fn test_apply_grammar_wraps_matches() {
        let out = apply_grammar("<p>so  i said</p>");
        assert_eq!(
            out,
            concat!(
                "<p>so",
                r#"<span class="grammar-underline" data-ai-mark="grammar">  </span>"#,
                r#"<span class="grammar-underline" data-ai-mark="grammar">i</span>"#,
                " said</p>"
            )
        );
    }

    #[test]
    fn test_apply_grammar_clean_html_unchanged() {
        let html = "<p>Nothing to see.</p><ul><li>Fine</li></ul>";
        assert_eq!(apply_grammar(html), html);
    }

    #[test]
    fn test_apply_grammar_skips_code_and_marks() {
        let html = concat!(
            "<pre>i  i</pre>",
            r#"<span class="glossary-term" data-ai-mark="glossary" title="x">the the</span>"#,
        );
        assert_eq!(apply_grammar(html), html);
    }

    #[test]
    fn test_apply_grammar_idempotent() {
        let once = apply_grammar("<p>i think think so</p>");
        assert_eq!(apply_grammar(&once), once);
    }
}
