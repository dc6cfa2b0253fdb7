//! # clarity-crypto
//!
//! Password-based encryption of note content for Clarity Notes.
//!
//! ## Cryptographic Primitives
//!
//! - **Key derivation**: PBKDF2-HMAC-SHA256, 100 000 iterations, 256-bit key
//! - **Symmetric cipher**: AES-256-GCM (AEAD), 12-byte IV, 16-byte tag
//! - **Random generation**: OS-seeded thread-local CSPRNG
//!
//! ## Blob Format
//!
//! ```text
//! {
//!   "iv":   base64(12 random bytes),
//!   "salt": base64(16 random bytes),
//!   "data": base64(ciphertext || tag)
//! }
//! ```
//!
//! ## Examples
//!
//! ### Encrypt and Decrypt a String
//!
//! ```rust
//! use clarity_crypto::{decrypt_string, encrypt_string};
//!
//! let blob = encrypt_string("<p>Private</p>", "hunter2").unwrap();
//! assert_eq!(decrypt_string(&blob, "hunter2").unwrap(), "<p>Private</p>");
//! assert!(decrypt_string(&blob, "wrong").is_err());
//! ```
//!
//! ### Lock a Note
//!
//! ```rust
//! use clarity_core::Note;
//! use clarity_crypto::{lock_note, unlock_note};
//!
//! let mut note = Note::new("Diary", "<p>Dear diary</p>");
//! lock_note(&mut note, "hunter2").unwrap();
//! assert!(note.content_html.is_empty());
//!
//! unlock_note(&mut note, "hunter2").unwrap();
//! assert_eq!(note.content_html, "<p>Dear diary</p>");
//! ```

pub mod blob;
pub mod cipher;
pub mod error;
pub mod format;
pub mod kdf;
pub mod lock;

// Re-export commonly used types
pub use blob::{decrypt_string, decrypt_string_async, encrypt_string, encrypt_string_async};
pub use clarity_core::EncryptedBlob;
pub use error::{CryptoError, CryptoResult, AUTHENTICATION_MESSAGE};
pub use format::{base64_decode, base64_encode};
pub use kdf::{derive_key, DerivedKey};
pub use lock::{lock_note, lock_note_async, unlock_note, unlock_note_async};
