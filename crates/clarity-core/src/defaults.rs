//! Centralized default constants for Clarity Notes.
//!
//! All crates and the CLI reference these constants instead of defining
//! their own magic numbers. Organized by domain area.

// =============================================================================
// TEXT ANALYSIS
// =============================================================================

/// Number of sentences kept by the extractive summarizer.
pub const SUMMARY_SENTENCES: usize = 2;

/// Number of tags suggested for a note.
pub const TAG_COUNT: usize = 5;

/// Tokens must be longer than this many characters to become tags.
pub const TAG_MIN_LEN: usize = 3;

/// Number of glossary terms extracted from a note.
pub const GLOSSARY_LIMIT: usize = 8;

/// Tokens must be longer than this many characters to become glossary terms.
pub const GLOSSARY_MIN_LEN: usize = 4;

/// Maximum key points split out of a summary.
pub const KEY_POINTS_LIMIT: usize = 5;

// =============================================================================
// ENCRYPTION
// =============================================================================

/// PBKDF2-HMAC-SHA256 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Salt length in bytes, fresh per encryption.
pub const SALT_LEN: usize = 16;

/// AES-GCM nonce (IV) length in bytes, fresh per encryption.
pub const IV_LEN: usize = 12;

/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Directory name under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "clarity-notes";

/// Config file name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glossary_terms_stricter_than_tags() {
        assert!(GLOSSARY_MIN_LEN > TAG_MIN_LEN);
    }

    #[test]
    fn test_crypto_sizes() {
        assert_eq!(SALT_LEN, 16);
        assert_eq!(IV_LEN, 12);
        assert_eq!(KEY_LEN * 8, 256);
    }
}
