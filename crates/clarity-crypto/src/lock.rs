//! Locking and unlocking note content with a password.

use clarity_core::{Note, NoteVersion};
use tracing::{info, instrument, warn};

use crate::blob::{decrypt_string, encrypt_string};
use crate::error::{CryptoError, CryptoResult};

/// Encrypt the note's content in place.
///
/// On success `content_html` is emptied, the blob is stored in `enc_data`
/// and `encrypted` is set. Existing versions are encrypted as one JSON list
/// into `enc_versions` under the same password; no version is recorded for
/// the locked state.
#[instrument(skip_all, fields(subsystem = "crypto", component = "lock", op = "lock_note", note_id = %note.id))]
pub fn lock_note(note: &mut Note, password: &str) -> CryptoResult<()> {
    if password.is_empty() {
        return Err(CryptoError::InvalidInput("password must not be empty".into()));
    }
    if note.is_locked() {
        return Err(CryptoError::InvalidInput("note is already locked".into()));
    }

    let blob = encrypt_string(&note.content_html, password)?;
    let history = if note.versions.is_empty() {
        None
    } else {
        Some(encrypt_string(&serde_json::to_string(&note.versions)?, password)?)
    };

    note.enc_data = Some(blob);
    note.enc_versions = history;
    note.encrypted = true;
    note.content_html.clear();
    let versions = std::mem::take(&mut note.versions).len();
    note.touch();

    info!(versions, "Note locked");
    Ok(())
}

/// Decrypt a locked note's content in place.
///
/// A wrong password leaves the note exactly as it was.
#[instrument(skip_all, fields(subsystem = "crypto", component = "lock", op = "unlock_note", note_id = %note.id))]
pub fn unlock_note(note: &mut Note, password: &str) -> CryptoResult<()> {
    let Some(blob) = note.enc_data.as_ref().filter(|_| note.encrypted) else {
        return Err(CryptoError::InvalidInput("note is not locked".into()));
    };

    let content = decrypt_string(blob, password).inspect_err(|_| {
        warn!("Note unlock rejected");
    })?;
    let versions = match &note.enc_versions {
        Some(history) => {
            let json = decrypt_string(history, password).inspect_err(|_| {
                warn!("Note history unlock rejected");
            })?;
            serde_json::from_str::<Vec<NoteVersion>>(&json)?
        }
        None => Vec::new(),
    };

    note.content_html = content;
    note.versions = versions;
    note.enc_data = None;
    note.enc_versions = None;
    note.encrypted = false;
    note.touch();

    info!(versions = note.versions.len(), "Note unlocked");
    Ok(())
}

/// [`lock_note`] on the blocking pool, returning the updated note.
pub async fn lock_note_async(mut note: Note, password: String) -> CryptoResult<Note> {
    tokio::task::spawn_blocking(move || lock_note(&mut note, &password).map(|()| note))
        .await
        .map_err(|e| CryptoError::Encryption(format!("Lock task failed: {}", e)))?
}

/// [`unlock_note`] on the blocking pool, returning the updated note.
pub async fn unlock_note_async(mut note: Note, password: String) -> CryptoResult<Note> {
    tokio::task::spawn_blocking(move || unlock_note(&mut note, &password).map(|()| note))
        .await
        .map_err(|_| CryptoError::Authentication)?
}
