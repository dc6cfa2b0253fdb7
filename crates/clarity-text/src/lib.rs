//! # clarity-text
//!
//! Heuristic text analysis and HTML annotation for Clarity Notes.
//!
//! This crate provides:
//! - Tokenization with a fixed English stopword list
//! - Frequency-based extractive summarization and tag suggestion
//! - Glossary extraction with builtin definitions
//! - Glossary and grammar annotation of HTML fragments
//! - Plain-text extraction from HTML
//!
//! Everything here is pure and synchronous; functions return values rather
//! than errors.
//!
//! ## Example
//!
//! ```
//! use clarity_text::{apply_glossary, build_glossary, plain_text, summarize};
//!
//! let html = "<p>An algorithm is a plan. Every algorithm has steps.</p>";
//! let text = plain_text(html);
//! let summary = summarize(&text, 1);
//! let glossary = build_glossary(&text, 8);
//! let annotated = apply_glossary(html, &glossary);
//!
//! assert_eq!(summary, "An algorithm is a plan.");
//! assert!(annotated.contains(r#"data-ai-mark="glossary""#));
//! ```

pub mod glossary;
pub mod grammar;
pub mod html;
pub mod insights;
pub mod scanner;
pub mod scoring;
pub mod summarize;
pub mod tags;
pub mod tokenizer;

pub use glossary::{
    apply_glossary, build_glossary, builtin_definition, Glossary, GlossaryEntry,
    BUILTIN_DEFINITIONS,
};
pub use grammar::{apply_grammar, grammar_scanners, LowercaseI, MultipleSpaces, RepeatedWord};
pub use html::{plain_text, Fragment, MarkKind, Piece, MARK_ATTR};
pub use insights::{annotate, NoteInsights};
pub use scanner::{earliest_match, segment, RegexScanner, Scanner, Segment};
pub use scoring::{frequency_map, rank_by_frequency, score_sentence, split_sentences, FrequencyMap};
pub use summarize::{key_points, summarize};
pub use tags::suggest_tags;
pub use tokenizer::{content_tokens, is_stopword, tokenize, STOPWORDS};
