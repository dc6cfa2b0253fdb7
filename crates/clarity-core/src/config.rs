//! Text analysis configuration.
//!
//! Configuration can be loaded from:
//! - a TOML file (default: ~/.config/clarity-notes/config.toml, `[analysis]` table)
//! - environment variables (CLARITY_* prefixed)
//!
//! # Example
//!
//! ```rust,no_run
//! use clarity_core::config::AnalysisConfig;
//!
//! // Load from default path or fall back to env vars
//! let config = AnalysisConfig::load().expect("Failed to load config");
//!
//! // Or explicitly from a file
//! let config = AnalysisConfig::from_file(std::path::Path::new("config.toml")).expect("Failed to load");
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::defaults;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for summarization, tagging and glossary extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Sentences kept by the extractive summarizer.
    pub summary_sentences: usize,
    /// Tags suggested per note.
    pub tag_count: usize,
    /// Glossary terms extracted per note.
    pub glossary_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            summary_sentences: defaults::SUMMARY_SENTENCES,
            tag_count: defaults::TAG_COUNT,
            glossary_limit: defaults::GLOSSARY_LIMIT,
        }
    }
}

impl AnalysisConfig {
    /// Get the default config file path.
    ///
    /// Returns: ~/.config/clarity-notes/config.toml
    pub fn default_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        path.push(defaults::CONFIG_DIR_NAME);
        path.push(defaults::CONFIG_FILE_NAME);
        path
    }

    /// Load configuration from the default path, falling back to environment variables.
    pub fn load() -> ConfigResult<Self> {
        let path = Self::default_config_path();

        if path.exists() {
            info!("Loading analysis config from: {}", path.display());
            Self::from_file(&path)
        } else {
            debug!(
                "Config file not found at {}, using environment variables",
                path.display()
            );
            let config = Self::from_env();
            config.validate()?;
            Ok(config)
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// Missing keys, or a missing `[analysis]` table, keep their defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        #[derive(Deserialize)]
        struct TomlRoot {
            #[serde(default)]
            analysis: AnalysisConfig,
        }

        let root: TomlRoot = toml::from_str(content)?;
        root.analysis.validate()?;
        Ok(root.analysis)
    }

    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable variables keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            summary_sentences: env_usize("CLARITY_SUMMARY_SENTENCES")
                .unwrap_or(defaults.summary_sentences),
            tag_count: env_usize("CLARITY_TAG_COUNT").unwrap_or(defaults.tag_count),
            glossary_limit: env_usize("CLARITY_GLOSSARY_LIMIT")
                .unwrap_or(defaults.glossary_limit),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.summary_sentences == 0 {
            return Err(ConfigError::Validation(
                "summary_sentences must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_usize(name: &str) -> Option<usize> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
