//! Extractive summarization.

use tracing::{debug, instrument};

use crate::scoring::{frequency_map, score_sentence, split_sentences};
use crate::tokenizer::{is_stopword, tokenize};

/// Pick the `max_sentences` most informative sentences of `text`.
///
/// When the text already has no more than `max_sentences` sentences they are
/// returned as-is, joined by single spaces. Otherwise every sentence is
/// scored against the word frequencies of the whole text and the best ones
/// are joined in score order. Equal scores keep document order.
///
/// # Examples
///
/// ```
/// use clarity_text::summarize;
///
/// let text = "A cat sat. A cat sat on the mat. Cats are great pets and cats love naps.";
/// assert_eq!(summarize(text, 1), "A cat sat.");
/// ```
#[instrument(skip(text), fields(subsystem = "text", component = "summarizer", op = "summarize", input_len = text.len()))]
pub fn summarize(text: &str, max_sentences: usize) -> String {
    let sentences = split_sentences(text);
    if sentences.len() <= max_sentences {
        debug!(sentence_count = sentences.len(), "Short text, skipping scoring");
        return sentences.join(" ").trim().to_string();
    }

    let content: Vec<String> = tokenize(text)
        .into_iter()
        .filter(|t| !is_stopword(t))
        .collect();
    let global = frequency_map(&content);

    let mut scored: Vec<(f64, &str)> = sentences
        .iter()
        .map(|s| (score_sentence(s, &global), s.as_str()))
        .collect();
    // sort_by is stable: equal scores keep document order
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    debug!(
        sentence_count = sentences.len(),
        result_count = max_sentences,
        "Scored sentences"
    );

    scored
        .iter()
        .take(max_sentences)
        .map(|(_, s)| *s)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Split a summary into short key points.
///
/// Pieces are separated by runs of bullets, newlines, periods or hyphens;
/// they are trimmed, empty ones dropped, and at most `limit` are kept.
pub fn key_points(summary: &str, limit: usize) -> Vec<String> {
    summary
        .split(['•', '\n', '.', '-'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .take(limit)
        .map(str::to_string)
        .collect()
}
