//! YAML configuration for catalog search.
//!
//! One file carries the language tables overrides and the matching settings.
//! Every section is optional; omitted values fall back to the Spanish
//! defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "hardware-store"
//!
//! lexicon:
//!   extra_stopwords: ["unidad", "und"]
//!   variant_limits:
//!     max_word_len: 24
//!     max_variants_per_word: 256
//!
//! matcher:
//!   combinator: all
//!   max_results: 50
//!   explain: false
//!   weights:
//!     name: 20
//!     featured: 5
//! ```

use std::fs;
use std::path::Path;

use canonical::{Lexicon, Substitution, VariantLimits};
use matcher::MatchConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Configuration format version
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub lexicon: LexiconYamlConfig,

    #[serde(default)]
    pub matcher: MatchConfig,
}

impl SearchConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: SearchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.lexicon.build()?;
        self.matcher
            .validate()
            .map_err(|e| ConfigLoadError::Validation(e.to_string()))?;
        Ok(())
    }

    /// Runtime lexicon with this file's overrides applied.
    pub fn build_lexicon(&self) -> Result<Lexicon, ConfigLoadError> {
        self.lexicon.build()
    }

    pub fn match_config(&self) -> MatchConfig {
        self.matcher.clone()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            lexicon: LexiconYamlConfig::default(),
            matcher: MatchConfig::default(),
        }
    }
}

/// Overrides on top of the built-in Spanish lexicon.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LexiconYamlConfig {
    /// Added to the built-in stopword list.
    #[serde(default)]
    pub extra_stopwords: Vec<String>,

    #[serde(default)]
    pub variant_limits: VariantLimits,

    /// Replaces the built-in substitution table when set.
    #[serde(default)]
    pub substitutions: Option<Vec<Substitution>>,
}

impl LexiconYamlConfig {
    fn build(&self) -> Result<Lexicon, ConfigLoadError> {
        let invalid = |e: canonical::CanonicalError| ConfigLoadError::Validation(e.to_string());

        let mut lexicon = Lexicon::spanish()
            .with_extra_stopwords(&self.extra_stopwords)
            .with_limits(self.variant_limits)
            .map_err(invalid)?;
        if let Some(substitutions) = &self.substitutions {
            lexicon = lexicon
                .with_substitutions(substitutions.clone())
                .map_err(invalid)?;
        }
        Ok(lexicon)
    }
}
