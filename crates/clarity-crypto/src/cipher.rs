//! AES-256-GCM sealing of note payloads under a derived key.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use clarity_core::defaults::{IV_LEN, SALT_LEN};
use rand::RngCore;

use crate::error::{CryptoError, CryptoResult};
use crate::kdf::DerivedKey;

/// Length of the GCM authentication tag appended to every ciphertext.
pub const TAG_LEN: usize = 16;

/// Fresh random salt and IV for one blob.
pub fn fresh_salt_and_iv() -> ([u8; SALT_LEN], [u8; IV_LEN]) {
    let mut rng = rand::thread_rng();
    let mut salt = [0u8; SALT_LEN];
    let mut iv = [0u8; IV_LEN];
    rng.fill_bytes(&mut salt);
    rng.fill_bytes(&mut iv);
    (salt, iv)
}

fn cipher_for(key: &DerivedKey) -> Aes256Gcm {
    Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()))
}

/// Encrypt `plaintext`, returning `ciphertext || tag`.
pub fn seal(key: &DerivedKey, iv: &[u8; IV_LEN], plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    cipher_for(key)
        .encrypt(Nonce::from_slice(iv), plaintext)
        .map_err(|_| CryptoError::Encryption("AES-GCM encryption failed".into()))
}

/// Verify and decrypt `ciphertext || tag`.
///
/// A wrong key, a wrong IV, a modified byte or a payload shorter than the tag
/// all give [`CryptoError::Authentication`].
pub fn open(key: &DerivedKey, iv: &[u8; IV_LEN], sealed: &[u8]) -> CryptoResult<Vec<u8>> {
    if sealed.len() < TAG_LEN {
        return Err(CryptoError::Authentication);
    }
    cipher_for(key)
        .decrypt(Nonce::from_slice(iv), sealed)
        .map_err(|_| CryptoError::Authentication)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clarity_core::defaults::KEY_LEN;

    fn key(byte: u8) -> DerivedKey {
        DerivedKey::from_bytes([byte; KEY_LEN])
    }

    #[test]
    fn test_fresh_salt_and_iv_differ_per_call() {
        let (salt1, iv1) = fresh_salt_and_iv();
        let (salt2, iv2) = fresh_salt_and_iv();
        assert_ne!(salt1, salt2);
        assert_ne!(iv1, iv2);
    }

    #[test]
    fn test_sealed_note_opens_with_same_key() {
        let iv = [7u8; IV_LEN];
        let sealed = seal(&key(42), &iv, b"<p>Meeting notes</p>").unwrap();
        assert_eq!(sealed.len(), b"<p>Meeting notes</p>".len() + TAG_LEN);
        assert_eq!(open(&key(42), &iv, &sealed).unwrap(), b"<p>Meeting notes</p>");
    }

    #[test]
    fn test_open_rejects_other_key() {
        let iv = [7u8; IV_LEN];
        let sealed = seal(&key(42), &iv, b"Secret").unwrap();
        assert!(matches!(
            open(&key(43), &iv, &sealed),
            Err(CryptoError::Authentication)
        ));
    }

    #[test]
    fn test_empty_note_is_tag_only() {
        let iv = [7u8; IV_LEN];
        let sealed = seal(&key(1), &iv, b"").unwrap();
        assert_eq!(sealed.len(), TAG_LEN);
        assert!(open(&key(1), &iv, &sealed).unwrap().is_empty());
    }

    #[test]
    fn test_open_rejects_short_payload() {
        assert!(matches!(
            open(&key(1), &[7u8; IV_LEN], &[0u8; TAG_LEN - 1]),
            Err(CryptoError::Authentication)
        ));
    }
}
