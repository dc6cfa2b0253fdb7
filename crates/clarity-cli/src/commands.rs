//! Subcommand implementations.
//!
//! Each command takes its already-read input and returns the JSON document
//! printed on stdout, so the commands can be tested without a process.

use anyhow::{bail, Context};
use clarity_core::{AnalysisConfig, EncryptedBlob, Note};
use clarity_crypto::{
    decrypt_string_async, encrypt_string_async, lock_note_async, unlock_note_async,
};
use clarity_text::{
    annotate, build_glossary, plain_text, suggest_tags, summarize, Glossary, NoteInsights,
};
use serde_json::{json, Value};
use tracing::debug;

pub fn cmd_plain(html: &str) -> Value {
    json!({ "text": plain_text(html) })
}

pub fn cmd_summarize(html: &str, sentences: usize) -> anyhow::Result<Value> {
    if sentences == 0 {
        bail!("--sentences must be at least 1");
    }
    let text = plain_text(html);
    Ok(json!({ "summary": summarize(&text, sentences) }))
}

pub fn cmd_tags(html: &str, count: usize) -> Value {
    let text = plain_text(html);
    json!({ "tags": suggest_tags(&text, count) })
}

pub fn cmd_glossary(html: &str, limit: usize) -> Value {
    let text = plain_text(html);
    json!({ "glossary": build_glossary(&text, limit) })
}

/// Annotate `html`, extracting the glossary from its own text unless one is
/// supplied as a JSON array of `{term, definition}` objects.
pub fn cmd_annotate(
    html: &str,
    limit: usize,
    glossary_json: Option<&str>,
    grammar: bool,
) -> anyhow::Result<Value> {
    let glossary = match glossary_json {
        Some(raw) => parse_glossary(raw)?,
        None => build_glossary(&plain_text(html), limit),
    };
    debug!(terms = glossary.len(), grammar, "Annotating input");
    Ok(json!({
        "html": annotate(html, &glossary, grammar),
        "glossary": glossary,
    }))
}

pub fn cmd_insights(html: &str, config: &AnalysisConfig) -> anyhow::Result<Value> {
    Ok(serde_json::to_value(NoteInsights::from_html(html, config))?)
}

pub async fn cmd_encrypt(plaintext: String, password: String) -> anyhow::Result<Value> {
    let blob = encrypt_string_async(plaintext, password).await?;
    Ok(serde_json::to_value(blob)?)
}

pub async fn cmd_decrypt(blob_json: &str, password: String) -> anyhow::Result<Value> {
    let blob = EncryptedBlob::from_json(blob_json).context("Input is not an encrypted blob")?;
    let plaintext = decrypt_string_async(blob, password).await?;
    Ok(json!({ "plaintext": plaintext }))
}

pub async fn cmd_lock(note_json: &str, password: String) -> anyhow::Result<Value> {
    let note = parse_note(note_json)?;
    let note = lock_note_async(note, password).await?;
    Ok(serde_json::to_value(note)?)
}

pub async fn cmd_unlock(note_json: &str, password: String) -> anyhow::Result<Value> {
    let note = parse_note(note_json)?;
    let note = unlock_note_async(note, password).await?;
    Ok(serde_json::to_value(note)?)
}

fn parse_note(raw: &str) -> anyhow::Result<Note> {
    serde_json::from_str(raw).context("Input is not a note JSON document")
}

fn parse_glossary(raw: &str) -> anyhow::Result<Glossary> {
    #[derive(serde::Deserialize)]
    struct Entry {
        term: String,
        definition: String,
    }

    let entries: Vec<Entry> =
        serde_json::from_str(raw).context("Glossary must be a JSON array of {term, definition}")?;
    Ok(entries
        .into_iter()
        .map(|e| (e.term.to_lowercase(), e.definition))
        .collect())
}
