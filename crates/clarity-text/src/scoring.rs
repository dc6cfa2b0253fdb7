//! Word frequency maps, sentence splitting and sentence scoring.

use std::collections::HashMap;

use crate::tokenizer::{is_stopword, tokenize};

/// Token occurrence counts that remember first-occurrence order.
///
/// Ranking ties are broken by that order, so iteration must be stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMap {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl FrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `token`.
    pub fn add(&mut self, token: &str) {
        match self.counts.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.order.push(token.to_string());
                self.counts.insert(token.to_string(), 1);
            }
        }
    }

    /// Occurrences of `token`; 0 when it was never seen.
    pub fn get(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.order
            .iter()
            .map(move |t| (t.as_str(), self.counts.get(t).copied().unwrap_or(0)))
    }
}

impl<S: AsRef<str>> FromIterator<S> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut map = FrequencyMap::new();
        for token in iter {
            map.add(token.as_ref());
        }
        map
    }
}

/// Count occurrences of each token.
pub fn frequency_map<S: AsRef<str>>(tokens: &[S]) -> FrequencyMap {
    tokens.iter().collect()
}

/// Entries sorted by count descending; equal counts keep first-occurrence order.
pub fn rank_by_frequency(map: &FrequencyMap) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = map.iter().map(|(t, c)| (t.to_string(), c)).collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Split text into sentences.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace. Results are
/// trimmed and empty pieces dropped; text without terminal punctuation is a
/// single sentence.
///
/// # Examples
///
/// ```
/// use clarity_text::split_sentences;
///
/// assert_eq!(split_sentences("One. Two!  Three"), vec!["One.", "Two!", "Three"]);
/// ```
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if c.is_whitespace() && matches!(prev, Some('.' | '!' | '?')) {
            push_trimmed(&mut sentences, &text[start..idx]);
            // Consume the rest of the whitespace run.
            let mut end = idx + c.len_utf8();
            while let Some(&(next_idx, next)) = chars.peek() {
                if !next.is_whitespace() {
                    break;
                }
                end = next_idx + next.len_utf8();
                chars.next();
            }
            start = end;
            prev = None;
            continue;
        }
        prev = Some(c);
    }
    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

/// Mean global frequency of the sentence's non-stopword tokens.
///
/// A sentence without content words scores 0.
pub fn score_sentence(sentence: &str, global: &FrequencyMap) -> f64 {
    let content: Vec<String> = tokenize(sentence)
        .into_iter()
        .filter(|t| !is_stopword(t))
        .collect();
    let total: usize = content.iter().map(|t| global.get(t)).sum();
    total as f64 / content.len().max(1) as f64
}
