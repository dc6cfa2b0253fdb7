//! Error types for cryptographic operations.

use thiserror::Error;

/// Message shown for every failed decryption.
pub const AUTHENTICATION_MESSAGE: &str = "Incorrect password or corrupted data";

/// Cryptographic operation errors.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Encryption failed.
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// Decryption failed: wrong password, tampered or malformed blob.
    ///
    /// Carries no detail; the underlying cause is only logged at debug level.
    #[error("Incorrect password or corrupted data")]
    Authentication,

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid format.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for cryptographic operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_display() {
        let err = CryptoError::Authentication;
        assert_eq!(err.to_string(), AUTHENTICATION_MESSAGE);
    }

    #[test]
    fn test_invalid_input_display() {
        let err = CryptoError::InvalidInput("password must not be empty".into());
        assert!(err.to_string().contains("password must not be empty"));
    }

    #[test]
    fn test_json_error_from() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let crypto_err: CryptoError = json_err.into();
        assert!(matches!(crypto_err, CryptoError::Json(_)));
    }
}
