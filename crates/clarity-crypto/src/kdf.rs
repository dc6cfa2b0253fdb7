//! Key derivation using PBKDF2-HMAC-SHA256.

use clarity_core::defaults::{KEY_LEN, PBKDF2_ITERATIONS};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key wrapper with automatic zeroization on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Create a new derived key from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { key: bytes }
    }

    /// Get the key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive a 256-bit AES key from a password.
///
/// PBKDF2-HMAC-SHA256 with a fixed iteration count; the same password and
/// salt always give the same key. Any password and salt length is accepted,
/// including empty ones. Blobs written by this crate always use a 16-byte
/// salt.
pub fn derive_key(password: &str, salt: &[u8]) -> DerivedKey {
    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    DerivedKey { key }
}
