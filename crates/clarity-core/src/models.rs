//! Note data model.
//!
//! Field names serialize in camelCase (`contentHtml`, `encData`). Ids are
//! UUIDv7; notes persisted with other id schemes have to be migrated first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Password-encrypted note content at rest.
///
/// Each field is standard base64: `salt` is 16 bytes, `iv` is 12 bytes and
/// `data` is the AES-256-GCM ciphertext with its 16-byte tag appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedBlob {
    pub iv: String,
    pub salt: String,
    pub data: String,
}

impl EncryptedBlob {
    /// Serialize to the persisted JSON object.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse the persisted JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Point-in-time copy of a note's title and content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteVersion {
    pub id: Uuid,
    pub title: String,
    pub content_html: String,
    pub timestamp: DateTime<Utc>,
}

/// A note as held by the note-management layer.
///
/// A locked note has `encrypted == true`, its content in `enc_data`, its
/// history (if any) in `enc_versions`, an empty `content_html` and no
/// plaintext `versions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content_html: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pinned: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub versions: Vec<NoteVersion>,
    #[serde(default)]
    pub encrypted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enc_data: Option<EncryptedBlob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enc_versions: Option<EncryptedBlob>,
}

/// Partial update applied through [`Note::apply_update`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content_html: Option<String>,
    pub tags: Option<Vec<String>>,
    pub summary: Option<String>,
}

impl NoteUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn content(content_html: impl Into<String>) -> Self {
        Self {
            content_html: Some(content_html.into()),
            ..Default::default()
        }
    }
}

impl Note {
    /// Create an unpinned, unlocked note with a fresh UUIDv7 id.
    pub fn new(title: impl Into<String>, content_html: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: title.into(),
            content_html: content_html.into(),
            created_at: now,
            updated_at: now,
            pinned: false,
            tags: Vec::new(),
            summary: None,
            versions: Vec::new(),
            encrypted: false,
            enc_data: None,
            enc_versions: None,
        }
    }

    /// Whether the note content is currently encrypted.
    pub fn is_locked(&self) -> bool {
        self.encrypted
    }

    /// Copy the current title and content into a new version entry.
    pub fn snapshot(&self) -> NoteVersion {
        NoteVersion {
            id: Uuid::now_v7(),
            title: self.title.clone(),
            content_html: self.content_html.clone(),
            timestamp: Utc::now(),
        }
    }

    /// Apply a partial update and bump `updated_at`.
    ///
    /// With `snapshot` set, the pre-update state is pushed onto `versions`
    /// first, unless the note is locked. Content cannot be written while the
    /// note is locked.
    pub fn apply_update(&mut self, update: NoteUpdate, snapshot: bool) -> Result<()> {
        if self.encrypted && update.content_html.is_some() {
            return Err(Error::InvalidInput(
                "cannot update the content of a locked note".into(),
            ));
        }
        if snapshot && !self.encrypted {
            let version = self.snapshot();
            self.versions.push(version);
        }
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(content_html) = update.content_html {
            self.content_html = content_html;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(summary) = update.summary {
            self.summary = Some(summary);
        }
        self.touch();
        Ok(())
    }

    /// Restore title and content from a stored version without snapshotting.
    pub fn restore_version(&mut self, version_id: Uuid) -> Result<()> {
        if self.encrypted {
            return Err(Error::InvalidInput(
                "cannot restore a version of a locked note".into(),
            ));
        }
        let version = self
            .versions
            .iter()
            .find(|v| v.id == version_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("version {version_id}")))?;

        tracing::debug!(
            subsystem = "core",
            component = "note",
            op = "restore_version",
            note_id = %self.id,
            version_id = %version_id,
            "Restoring note version"
        );

        self.apply_update(
            NoteUpdate {
                title: Some(version.title),
                content_html: Some(version.content_html),
                ..Default::default()
            },
            false,
        )
    }

    pub fn toggle_pin(&mut self) {
        self.pinned = !self.pinned;
        self.touch();
    }

    /// Versions ordered newest first.
    pub fn versions_newest_first(&self) -> Vec<&NoteVersion> {
        let mut versions: Vec<&NoteVersion> = self.versions.iter().collect();
        versions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        versions
    }

    /// Bump `updated_at` to now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
