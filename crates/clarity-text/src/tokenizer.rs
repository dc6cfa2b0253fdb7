//! Word tokenization and stopword filtering.
//!
//! Tokens are lowercase runs of ASCII letters, digits and apostrophes. Every
//! other character, including non-ASCII letters, acts as a separator.

/// Common English function words excluded from frequency scoring.
pub const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "if", "then", "else", "when", "at", "by", "for", "with",
    "about", "against", "between", "into", "through", "during", "before", "after", "above",
    "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under", "again",
    "further", "once", "here", "there", "why", "how", "all", "any", "both", "each", "few",
    "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so",
    "than", "too", "very", "can", "will", "just", "don", "should", "now", "is", "am", "are",
    "was", "were", "be", "been", "being", "i", "you", "he", "she", "it", "we", "they",
];

/// Split text into lowercase word tokens.
///
/// Never fails; empty or punctuation-only input yields an empty vector.
///
/// # Examples
///
/// ```
/// use clarity_text::tokenize;
///
/// assert_eq!(tokenize("Don't PANIC, it's fine!"), vec!["don't", "panic", "it's", "fine"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() || c == '\'' {
                c
            } else {
                ' '
            }
        })
        .collect();

    normalized.split_whitespace().map(str::to_string).collect()
}

/// Whether `token` is in the fixed stopword set.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Tokens that are not stopwords and are longer than `min_len` characters.
pub fn content_tokens(text: &str, min_len: usize) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| !is_stopword(t) && t.chars().count() > min_len)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        assert_eq!(
            tokenize("The Quick  brown\tFOX"),
            vec!["the", "quick", "brown", "fox"]
        );
    }

    #[test]
    fn test_tokenize_punctuation_is_separator() {
        assert_eq!(tokenize("a,b.c;d-e"), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_tokenize_keeps_apostrophes() {
        assert_eq!(tokenize("isn't 'quoted'"), vec!["isn't", "'quoted'"]);
    }

    #[test]
    fn test_tokenize_non_ascii_letters_are_separators() {
        assert_eq!(tokenize("café naïve"), vec!["caf", "na", "ve"]);
    }

    #[test]
    fn test_tokenize_empty_and_symbols() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  !!! ??? ").is_empty());
    }

    #[test]
    fn test_tokenize_idempotent_on_joined_tokens() {
        let inputs = [
            "Hello, World! It's 2024.",
            "<p>markup</p> & entities; O'Brien",
            "   spaced    out   ",
            "",
        ];
        for input in inputs {
            let first = tokenize(input);
            let second = tokenize(&first.join(" "));
            assert_eq!(first, second, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_is_stopword() {
        assert!(is_stopword("the"));
        assert!(is_stopword("they"));
        assert!(is_stopword("i"));
        assert!(!is_stopword("algorithm"));
        // The set is lowercase only.
        assert!(!is_stopword("The"));
    }

    #[test]
    fn test_stopwords_unique_and_lowercase() {
        let unique: std::collections::HashSet<_> = STOPWORDS.iter().collect();
        assert_eq!(unique.len(), STOPWORDS.len());
        assert_eq!(STOPWORDS.len(), 82);
        assert!(STOPWORDS.iter().all(|w| w.chars().all(|c| c.is_ascii_lowercase())));
    }

    #[test]
    fn test_content_tokens_filters_stopwords_and_length() {
        let tokens = content_tokens("The cats and the dogs ran to a big field", 3);
        assert_eq!(tokens, vec!["cats", "dogs", "field"]);
    }
}
