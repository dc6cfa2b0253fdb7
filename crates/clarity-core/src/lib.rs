//! # clarity-core
//!
//! Core types and configuration for Clarity Notes.
//!
//! This crate provides the note data model, the encrypted blob stored on a
//! locked note, shared defaults, and the analysis configuration that the
//! text and crypto crates depend on.
//!
//! ## Logging fields
//!
//! Every crate logs through `tracing` with the same structured fields:
//! `subsystem` ("core", "text", "crypto"), `component`, `op`, and where they
//! apply `note_id`, `version_id`, `input_len`, `result_count`, `mark_count`
//! and `duration_ms`.
//!
//! | Level | Usage |
//! |-------|-------|
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Note lock state changes, config file loaded |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration (text nodes) |
//!
//! Passwords, keys and decrypted content are never logged.

pub mod config;
pub mod defaults;
pub mod error;
pub mod models;

// Re-export commonly used types at crate root
pub use config::{AnalysisConfig, ConfigError, ConfigResult};
pub use error::{Error, Result};
pub use models::{EncryptedBlob, Note, NoteUpdate, NoteVersion};
