//! Tag suggestion from word frequency.

use clarity_core::defaults::TAG_MIN_LEN;
use tracing::{debug, instrument};

use crate::scoring::{frequency_map, rank_by_frequency};
use crate::tokenizer::content_tokens;

/// Suggest up to `count` tags for `text`.
///
/// Candidates are non-stopword tokens longer than three characters, ranked
/// by frequency; equal counts keep first-occurrence order.
///
/// # Examples
///
/// ```
/// use clarity_text::suggest_tags;
///
/// let tags = suggest_tags("Rust makes systems programming fun. Rust is fast.", 2);
/// assert_eq!(tags, vec!["rust", "makes"]);
/// ```
#[instrument(skip(text), fields(subsystem = "text", component = "tagger", op = "suggest_tags", input_len = text.len()))]
pub fn suggest_tags(text: &str, count: usize) -> Vec<String> {
    let tokens = content_tokens(text, TAG_MIN_LEN);
    let tags: Vec<String> = rank_by_frequency(&frequency_map(&tokens))
        .into_iter()
        .take(count)
        .map(|(term, _)| term)
        .collect();

    debug!(result_count = tags.len(), "Suggested tags");
    tags
}
