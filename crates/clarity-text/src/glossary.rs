//! Glossary term extraction and annotation.

use clarity_core::defaults::GLOSSARY_MIN_LEN;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::html::{rewrite_html, MarkKind, Piece};
use crate::scanner::{segment, RegexScanner, Segment};
use crate::scoring::{frequency_map, rank_by_frequency};
use crate::tokenizer::content_tokens;

/// Definitions for a handful of common technical terms.
pub const BUILTIN_DEFINITIONS: &[(&str, &str)] = &[
    (
        "javascript",
        "A high-level, interpreted programming language for the web.",
    ),
    ("react", "A JavaScript library for building user interfaces."),
    (
        "typescript",
        "A superset of JavaScript that adds static types.",
    ),
    ("algorithm", "A step-by-step procedure to solve a problem."),
    (
        "database",
        "An organized collection of structured information or data.",
    ),
    (
        "api",
        "A set of definitions and protocols for building and integrating software.",
    ),
    (
        "component",
        "A reusable piece of UI that encapsulates structure and behavior.",
    ),
    (
        "asynchronous",
        "Operations that occur independently of the main program flow.",
    ),
    (
        "promise",
        "An object representing the eventual completion or failure of an async operation.",
    ),
];

/// Builtin definition of `term`, if any.
pub fn builtin_definition(term: &str) -> Option<&'static str> {
    BUILTIN_DEFINITIONS
        .iter()
        .find(|(t, _)| *t == term)
        .map(|(_, d)| *d)
}

/// Placeholder used when a term has no builtin definition.
pub fn missing_definition(term: &str) -> String {
    format!("No definition available for “{term}” yet.")
}

/// A glossary term and its definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlossaryEntry {
    pub term: String,
    pub definition: String,
}

/// Ordered term → definition mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Glossary {
    entries: Vec<GlossaryEntry>,
}

impl Glossary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the definition of `term`, keeping its position.
    pub fn insert(&mut self, term: impl Into<String>, definition: impl Into<String>) {
        let term = term.into();
        let definition = definition.into();
        match self.entries.iter_mut().find(|e| e.term == term) {
            Some(entry) => entry.definition = definition,
            None => self.entries.push(GlossaryEntry { term, definition }),
        }
    }

    pub fn get(&self, term: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.term == term)
            .map(|e| e.definition.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GlossaryEntry> {
        self.entries.iter()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.term.as_str())
    }
}

impl<T: Into<String>, D: Into<String>> FromIterator<(T, D)> for Glossary {
    fn from_iter<I: IntoIterator<Item = (T, D)>>(iter: I) -> Self {
        let mut glossary = Glossary::new();
        for (term, definition) in iter {
            glossary.insert(term, definition);
        }
        glossary
    }
}

/// Pick the `limit` most frequent long words of `text` as glossary terms.
///
/// Candidates are non-stopword tokens longer than four characters. Each term
/// gets its builtin definition or a "no definition" placeholder.
#[instrument(skip(text), fields(subsystem = "text", component = "glossary", op = "build_glossary", input_len = text.len()))]
pub fn build_glossary(text: &str, limit: usize) -> Glossary {
    let tokens = content_tokens(text, GLOSSARY_MIN_LEN);
    let glossary: Glossary = rank_by_frequency(&frequency_map(&tokens))
        .into_iter()
        .take(limit)
        .map(|(term, _)| {
            let definition = builtin_definition(&term)
                .map(str::to_string)
                .unwrap_or_else(|| missing_definition(&term));
            (term, definition)
        })
        .collect();

    debug!(result_count = glossary.len(), "Built glossary");
    glossary
}

/// Whole-word, ASCII case-insensitive matcher for one term.
fn term_scanner(term: &str) -> Result<RegexScanner, regex::Error> {
    let pattern = format!(r"(?i-u:\b{}\b)", regex::escape(term));
    Regex::new(&pattern).map(RegexScanner::new)
}

/// Wrap glossary terms found in `html` in `glossary-term` spans.
///
/// Terms are matched as whole words, ignoring ASCII case, longest term first
/// so a shorter term never shadows a longer one starting at the same place.
/// Text inside existing annotation spans, `code` and `pre` is left alone, so
/// running this twice adds nothing the second time. An empty glossary
/// returns `html` unchanged.
///
/// # Examples
///
/// ```
/// use clarity_text::{apply_glossary, Glossary};
///
/// let glossary: Glossary = [("api", "An interface.")].into_iter().collect();
/// let out = apply_glossary("<p>The API works</p>", &glossary);
/// assert_eq!(
///     out,
///     r#"<p>The <span class="glossary-term" data-ai-mark="glossary" title="An interface.">API</span> works</p>"#
/// );
/// ```
#[instrument(skip(html, glossary), fields(subsystem = "text", component = "glossary", op = "apply_glossary", input_len = html.len(), terms = glossary.len()))]
pub fn apply_glossary(html: &str, glossary: &Glossary) -> String {
    if glossary.is_empty() {
        return html.to_string();
    }

    let mut entries: Vec<&GlossaryEntry> = glossary.iter().filter(|e| !e.term.is_empty()).collect();
    // sort_by is stable: equal lengths keep glossary order
    entries.sort_by(|a, b| b.term.len().cmp(&a.term.len()));

    let mut scanners: Vec<Box<RegexScanner>> = Vec::with_capacity(entries.len());
    let mut definitions: Vec<&str> = Vec::with_capacity(entries.len());
    for entry in entries {
        match term_scanner(&entry.term) {
            Ok(scanner) => {
                scanners.push(Box::new(scanner));
                definitions.push(&entry.definition);
            }
            Err(e) => warn!(term = %entry.term, error = %e, "Skipping unmatchable glossary term"),
        }
    }
    if scanners.is_empty() {
        return html.to_string();
    }

    let (out, marks) = rewrite_html(html, "glossary", |text| {
        let segments = segment(text, &scanners)?;
        Some(
            segments
                .into_iter()
                .map(|s| match s {
                    Segment::Plain(t) => Piece::Text(t.to_string()),
                    Segment::Matched { scanner, text } => Piece::Mark {
                        kind: MarkKind::Glossary,
                        text: text.to_string(),
                        title: Some(definitions[scanner].to_string()),
                    },
                })
                .collect(),
        )
    });

    debug!(mark_count = marks, "Applied glossary");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glossary(pairs: &[(&str, &str)]) -> Glossary {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_builtin_definitions() {
        assert_eq!(BUILTIN_DEFINITIONS.len(), 9);
        assert_eq!(
            builtin_definition("algorithm"),
            Some("A step-by-step procedure to solve a problem.")
        );
        assert!(builtin_definition("banana").is_none());
    }

    #[test]
    fn test_missing_definition_text() {
        assert_eq!(
            missing_definition("widget"),
            "No definition available for “widget” yet."
        );
    }

    #[test]
    fn test_glossary_insert_replaces_in_place() {
        let mut g = Glossary::new();
        g.insert("alpha", "1");
        g.insert("beta", "2");
        g.insert("alpha", "3");
        assert_eq!(g.len(), 2);
        assert_eq!(g.get("alpha"), Some("3"));
        assert_eq!(g.terms().collect::<Vec<_>>(), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_build_glossary_ranks_long_words() {
        let text = "The database stores data. A database index makes database queries fast. \
                    Every query plan uses an index.";
        let g = build_glossary(text, 3);
        assert_eq!(
            g.terms().collect::<Vec<_>>(),
            vec!["database", "index", "stores"]
        );
        assert_eq!(
            g.get("database"),
            Some("An organized collection of structured information or data.")
        );
        assert_eq!(g.get("stores"), Some("No definition available for “stores” yet."));
    }

    #[test]
    fn test_build_glossary_empty_text() {
        assert!(build_glossary("", 8).is_empty());
        assert!(build_glossary("tiny bits only here", 8).is_empty());
    }

    #[test]
    fn test_apply_glossary_empty_is_noop() {
        let html = "<p>Anything <b>at   all</b><br/></p>";
        assert_eq!(apply_glossary(html, &Glossary::new()), html);
    }

    #[test]
    fn test_apply_glossary_wraps_every_occurrence() {
        let g = glossary(&[("algorithm", "A procedure.")]);
        let out = apply_glossary("<p>An algorithm algorithm.</p>", &g);
        let span = r#"<span class="glossary-term" data-ai-mark="glossary" title="A procedure.">algorithm</span>"#;
        assert_eq!(out, format!("<p>An {span} {span}.</p>"));
    }

    #[test]
    fn test_apply_glossary_idempotent() {
        let g = glossary(&[("algorithm", "A procedure.")]);
        let once = apply_glossary("<p>An algorithm algorithm.</p>", &g);
        let twice = apply_glossary(&once, &g);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply_glossary_whole_words_only() {
        let g = glossary(&[("react", "A library.")]);
        let out = apply_glossary("<p>reactive react reactor</p>", &g);
        assert_eq!(out.matches("data-ai-mark").count(), 1);
        assert!(out.starts_with("<p>reactive <span"));
    }

    #[test]
    fn test_apply_glossary_case_insensitive_keeps_original_case() {
        let g = glossary(&[("react", "A library.")]);
        let out = apply_glossary("<p>React</p>", &g);
        assert!(out.contains(">React</span>"));
    }

    #[test]
    fn test_apply_glossary_longest_term_first() {
        let g = glossary(&[("type", "short"), ("type system", "long")]);
        let out = apply_glossary("<p>a type system</p>", &g);
        assert!(out.contains(r#"title="long">type system</span>"#));
        assert!(!out.contains(r#"title="short""#));
    }

    #[test]
    fn test_apply_glossary_skips_code_and_pre() {
        let g = glossary(&[("promise", "A value later.")]);
        let html = "<p>promise</p><pre>promise</pre><p><code>promise</code></p>";
        let out = apply_glossary(html, &g);
        assert_eq!(out.matches("data-ai-mark").count(), 1);
        assert!(out.contains("<pre>promise</pre>"));
        assert!(out.contains("<code>promise</code>"));
    }

    #[test]
    fn test_apply_glossary_escapes_metacharacters() {
        let g = glossary(&[("c++", "A language."), ("a.b", "Dotted.")]);
        let out = apply_glossary("<p>axb and a.b</p>", &g);
        // "." is literal, so "axb" is not a match.
        assert_eq!(out.matches("data-ai-mark").count(), 1);
        assert!(out.contains(">a.b</span>"));
    }

    #[test]
    fn test_apply_glossary_preserves_structure() {
        let g = glossary(&[("database", "Data.")]);
        let html = r#"<ul><li class="item">first database</li><li>second</li></ul>"#;
        let out = apply_glossary(html, &g);
        assert!(out.starts_with(r#"<ul><li class="item">first <span"#));
        assert!(out.ends_with("</span></li><li>second</li></ul>"));
    }
}
