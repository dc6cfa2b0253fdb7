//! One-call analysis of a note's HTML content.

use std::time::Instant;

use clarity_core::defaults::KEY_POINTS_LIMIT;
use clarity_core::AnalysisConfig;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::glossary::{apply_glossary, build_glossary, Glossary};
use crate::grammar::apply_grammar;
use crate::html::plain_text;
use crate::summarize::{key_points, summarize};
use crate::tags::suggest_tags;

/// Everything the insights panel shows for a note.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteInsights {
    pub plain_text: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub glossary: Glossary,
    pub key_points: Vec<String>,
}

impl NoteInsights {
    /// Analyze `html` with the limits from `config`.
    #[instrument(skip(html, config), fields(subsystem = "text", component = "insights", op = "from_html", input_len = html.len()))]
    pub fn from_html(html: &str, config: &AnalysisConfig) -> Self {
        let start = Instant::now();

        let plain_text = plain_text(html);
        let summary = summarize(&plain_text, config.summary_sentences);
        let tags = suggest_tags(&plain_text, config.tag_count);
        let glossary = build_glossary(&plain_text, config.glossary_limit);
        let key_points = key_points(&summary, KEY_POINTS_LIMIT);

        debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            result_count = tags.len(),
            "Computed note insights"
        );

        Self {
            plain_text,
            summary,
            tags,
            glossary,
            key_points,
        }
    }
}

/// Run the glossary pass and, if `grammar` is set, the grammar pass.
pub fn annotate(html: &str, glossary: &Glossary, grammar: bool) -> String {
    let marked = apply_glossary(html, glossary);
    if grammar {
        apply_grammar(&marked)
    } else {
        marked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTE: &str = concat!(
        "<h1>Database notes</h1>",
        "<p>A database stores records. The database index speeds lookups. ",
        "Lookups without an index scan every record.</p>",
    );

    #[test]
    fn test_insights_from_html() {
        let insights = NoteInsights::from_html(NOTE, &AnalysisConfig::default());
        assert!(insights.plain_text.starts_with("Database notesA database"));
        assert!(!insights.summary.is_empty());
        assert_eq!(insights.tags.first().map(String::as_str), Some("database"));
        assert!(insights.tags.len() <= 5);
        assert!(insights.glossary.len() <= 8);
        assert_eq!(
            insights.glossary.get("database"),
            Some("An organized collection of structured information or data.")
        );
        assert!(!insights.key_points.is_empty());
    }

    #[test]
    fn test_insights_respect_config() {
        let config = AnalysisConfig {
            summary_sentences: 1,
            tag_count: 1,
            glossary_limit: 2,
        };
        let insights = NoteInsights::from_html(NOTE, &config);
        assert_eq!(insights.tags.len(), 1);
        assert_eq!(insights.glossary.len(), 2);
    }

    #[test]
    fn test_insights_empty_note() {
        let insights = NoteInsights::from_html("", &AnalysisConfig::default());
        assert_eq!(insights.plain_text, "");
        assert_eq!(insights.summary, "");
        assert!(insights.tags.is_empty());
        assert!(insights.glossary.is_empty());
        assert!(insights.key_points.is_empty());
    }

    #[test]
    fn test_insights_serialize_camel_case() {
        let insights = NoteInsights::from_html("<p>Short note.</p>", &AnalysisConfig::default());
        let json = serde_json::to_value(&insights).unwrap();
        assert_eq!(json["plainText"], "Short note.");
        assert_eq!(json["keyPoints"][0], "Short note");
        assert!(json["glossary"].is_array());
    }

    #[test]
    fn test_annotate_chains_passes() {
        let glossary: Glossary = [("algorithm", "A procedure.")].into_iter().collect();
        let out = annotate("<p>the the algorithm</p>", &glossary, true);
        assert_eq!(out.matches(r#"data-ai-mark="glossary""#).count(), 1);
        assert_eq!(out.matches(r#"data-ai-mark="grammar""#).count(), 1);

        let without = annotate("<p>the the algorithm</p>", &glossary, false);
        assert!(!without.contains("grammar"));
    }
}
