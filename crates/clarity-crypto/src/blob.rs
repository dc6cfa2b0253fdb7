//! Password-based string encryption into an [`EncryptedBlob`].
//!
//! ## Blob format
//!
//! ```text
//! { "iv": b64(12 bytes), "salt": b64(16 bytes), "data": b64(ciphertext || tag) }
//! ```
//!
//! A fresh salt and IV are drawn for every call, so encrypting the same
//! plaintext twice gives different blobs.

use std::time::Instant;

use clarity_core::defaults::IV_LEN;
use clarity_core::EncryptedBlob;
use tracing::{debug, instrument};

use crate::cipher::{fresh_salt_and_iv, open, seal};
use crate::error::{CryptoError, CryptoResult};
use crate::format::{base64_decode, base64_encode};
use crate::kdf::derive_key;

/// Encrypt `plaintext` under `password`.
#[instrument(skip_all, fields(subsystem = "crypto", component = "blob", op = "encrypt_string", input_len = plaintext.len()))]
pub fn encrypt_string(plaintext: &str, password: &str) -> CryptoResult<EncryptedBlob> {
    let start = Instant::now();
    let (salt, iv) = fresh_salt_and_iv();
    let key = derive_key(password, &salt);

    let ciphertext = seal(&key, &iv, plaintext.as_bytes())?;

    debug!(
        duration_ms = start.elapsed().as_millis() as u64,
        "Encrypted string"
    );
    Ok(EncryptedBlob {
        iv: base64_encode(&iv),
        salt: base64_encode(&salt),
        data: base64_encode(&ciphertext),
    })
}

/// Decrypt a blob produced by [`encrypt_string`].
///
/// Every failure, whether a wrong password, a tampered or truncated blob,
/// bad base64, a wrong IV length or a non-UTF-8 plaintext, is reported as
/// [`CryptoError::Authentication`].
#[instrument(skip_all, fields(subsystem = "crypto", component = "blob", op = "decrypt_string"))]
pub fn decrypt_string(blob: &EncryptedBlob, password: &str) -> CryptoResult<String> {
    let start = Instant::now();
    let result = try_decrypt(blob, password);
    match &result {
        Ok(_) => debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            "Decrypted string"
        ),
        Err(e) => debug!(error = %e, "Decryption rejected"),
    }
    result.map_err(|_| CryptoError::Authentication)
}

fn try_decrypt(blob: &EncryptedBlob, password: &str) -> CryptoResult<String> {
    let salt = base64_decode(&blob.salt)?;
    let iv = base64_decode(&blob.iv)?;
    let data = base64_decode(&blob.data)?;

    let iv: [u8; IV_LEN] = iv.as_slice().try_into().map_err(|_| {
        CryptoError::InvalidFormat(format!("IV must be {} bytes, got {}", IV_LEN, iv.len()))
    })?;

    let key = derive_key(password, &salt);
    let plaintext = open(&key, &iv, &data)?;

    String::from_utf8(plaintext)
        .map_err(|e| CryptoError::InvalidFormat(format!("Plaintext is not UTF-8: {}", e.utf8_error())))
}

/// [`encrypt_string`] on the blocking pool.
pub async fn encrypt_string_async(plaintext: String, password: String) -> CryptoResult<EncryptedBlob> {
    tokio::task::spawn_blocking(move || encrypt_string(&plaintext, &password))
        .await
        .map_err(|e| CryptoError::Encryption(format!("Encryption task failed: {}", e)))?
}

/// [`decrypt_string`] on the blocking pool.
pub async fn decrypt_string_async(blob: EncryptedBlob, password: String) -> CryptoResult<String> {
    tokio::task::spawn_blocking(move || decrypt_string(&blob, &password))
        .await
        .map_err(|_| CryptoError::Authentication)?
}
