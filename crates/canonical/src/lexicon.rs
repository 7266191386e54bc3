//! Language tables for the Spanish search pipeline.
//!
//! A [`Lexicon`] bundles everything the normalizer, the reducer and the
//! variant expander look up: the stopword set, the singularization
//! exceptions, the spelling substitution table and the expansion caps.
//!
//! The lexicon is built once at startup and never mutated afterwards. Share
//! it behind an `Arc` between indexing and query code so both sides see the
//! same tables.
//!
//! # Examples
//!
//! ```rust
//! use canonical::Lexicon;
//!
//! let lexicon = Lexicon::spanish();
//! assert!(lexicon.is_stopword("de"));
//! assert!(lexicon.is_stopword("despues"));
//! assert_eq!(lexicon.singular_exception("los"), Some("el"));
//! ```
//!
//! Extra stopwords are folded the same way as indexed text:
//!
//! ```rust
//! use canonical::Lexicon;
//!
//! let lexicon = Lexicon::spanish().with_extra_stopwords(["Unidad", "Pulgadas"]);
//! assert!(lexicon.is_stopword("unidad"));
//! assert!(lexicon.is_stopword("pulgadas"));
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;
use crate::normalize::fold;
use crate::stopwords::{SPANISH_SINGULAR_EXCEPTIONS, SPANISH_STOPWORDS};

/// One row of the spelling substitution table.
///
/// Every occurrence of `key` in a word may be rewritten to any of
/// `alternatives`. The alternatives always include the key itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Substitution {
    pub key: String,
    pub alternatives: Vec<String>,
}

impl Substitution {
    pub fn new(key: &str, alternatives: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            alternatives: alternatives.iter().map(|alt| alt.to_string()).collect(),
        }
    }
}

/// Caps on spelling-variant expansion.
///
/// A word with many substitutable letters grows its variant set
/// multiplicatively, so both the input word length and the per-word output
/// are bounded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariantLimits {
    /// Words longer than this (in chars) are kept as-is, without variants.
    #[serde(default = "VariantLimits::default_max_word_len")]
    pub max_word_len: usize,
    /// A single word never yields more than this many variants.
    #[serde(default = "VariantLimits::default_max_variants_per_word")]
    pub max_variants_per_word: usize,
}

impl VariantLimits {
    pub(crate) fn default_max_word_len() -> usize {
        24
    }

    pub(crate) fn default_max_variants_per_word() -> usize {
        256
    }

    fn validate(&self) -> Result<(), CanonicalError> {
        if self.max_word_len == 0 {
            return Err(CanonicalError::InvalidLexicon(
                "max_word_len must be >= 1".into(),
            ));
        }
        if self.max_variants_per_word == 0 {
            return Err(CanonicalError::InvalidLexicon(
                "max_variants_per_word must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for VariantLimits {
    fn default() -> Self {
        Self {
            max_word_len: Self::default_max_word_len(),
            max_variants_per_word: Self::default_max_variants_per_word(),
        }
    }
}

/// The spelling confusions common in Spanish: b/v, c/s/z/x, ll/y, g/j, q/k.
///
/// Order matters: the expander walks the table top to bottom.
pub fn spanish_substitutions() -> Vec<Substitution> {
    vec![
        Substitution::new("b", &["b", "v"]),
        Substitution::new("v", &["v", "b"]),
        Substitution::new("c", &["c", "s", "z", "x"]),
        Substitution::new("s", &["s", "c", "z"]),
        Substitution::new("z", &["z", "c", "s"]),
        Substitution::new("x", &["x", "c", "s"]),
        Substitution::new("ll", &["ll", "y"]),
        Substitution::new("y", &["y", "ll"]),
        Substitution::new("g", &["g", "j"]),
        Substitution::new("j", &["j", "g"]),
        Substitution::new("q", &["q", "k"]),
        Substitution::new("k", &["k", "c", "q"]),
    ]
}

/// Immutable language tables shared by indexing and querying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    stopwords: HashSet<String>,
    singular_exceptions: HashMap<String, String>,
    substitutions: Vec<Substitution>,
    limits: VariantLimits,
}

impl Lexicon {
    /// The built-in Spanish tables with default expansion caps.
    pub fn spanish() -> Self {
        Self {
            stopwords: fold_words(SPANISH_STOPWORDS.iter().copied()),
            singular_exceptions: SPANISH_SINGULAR_EXCEPTIONS
                .iter()
                .map(|(plural, singular)| (plural.to_string(), singular.to_string()))
                .collect(),
            substitutions: spanish_substitutions(),
            limits: VariantLimits::default(),
        }
    }

    /// Build a lexicon from explicit tables.
    ///
    /// Stopwords are folded (accents stripped, lower-cased) before they are
    /// stored. The substitution table is validated: keys must be non-empty
    /// lower-case ASCII and every row must list its own key among the
    /// alternatives.
    pub fn new<'a>(
        stopwords: impl IntoIterator<Item = &'a str>,
        singular_exceptions: impl IntoIterator<Item = (&'a str, &'a str)>,
        substitutions: Vec<Substitution>,
        limits: VariantLimits,
    ) -> Result<Self, CanonicalError> {
        validate_substitutions(&substitutions)?;
        limits.validate()?;
        Ok(Self {
            stopwords: fold_words(stopwords),
            singular_exceptions: singular_exceptions
                .into_iter()
                .map(|(plural, singular)| (plural.to_lowercase(), singular.to_string()))
                .collect(),
            substitutions,
            limits,
        })
    }

    /// Add stopwords on top of the current set.
    pub fn with_extra_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let folded = fold(word.as_ref());
            let folded = folded.trim();
            if !folded.is_empty() {
                self.stopwords.insert(folded.to_string());
            }
        }
        self
    }

    /// Replace the spelling substitution table.
    pub fn with_substitutions(
        mut self,
        substitutions: Vec<Substitution>,
    ) -> Result<Self, CanonicalError> {
        validate_substitutions(&substitutions)?;
        self.substitutions = substitutions;
        Ok(self)
    }

    /// Replace the expansion caps.
    pub fn with_limits(mut self, limits: VariantLimits) -> Result<Self, CanonicalError> {
        limits.validate()?;
        self.limits = limits;
        Ok(self)
    }

    /// Whether a normalized token is a stopword.
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// The irregular singular of `word`, if the exception table lists one.
    pub fn singular_exception(&self, word: &str) -> Option<&str> {
        self.singular_exceptions
            .get(word.to_lowercase().as_str())
            .map(String::as_str)
    }

    pub fn substitutions(&self) -> &[Substitution] {
        &self.substitutions
    }

    pub fn limits(&self) -> VariantLimits {
        self.limits
    }

    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::spanish()
    }
}

fn fold_words<'a>(words: impl IntoIterator<Item = &'a str>) -> HashSet<String> {
    words
        .into_iter()
        .map(|word| fold(word).trim().to_string())
        .filter(|word| !word.is_empty())
        .collect()
}

fn validate_substitutions(substitutions: &[Substitution]) -> Result<(), CanonicalError> {
    for row in substitutions {
        if row.key.is_empty() {
            return Err(CanonicalError::InvalidLexicon(
                "substitution key must not be empty".into(),
            ));
        }
        if !row.key.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(CanonicalError::InvalidLexicon(format!(
                "substitution key {:?} must be lower-case ASCII letters",
                row.key
            )));
        }
        if row.alternatives.iter().any(String::is_empty) {
            return Err(CanonicalError::InvalidLexicon(format!(
                "substitution {:?} has an empty alternative",
                row.key
            )));
        }
        if !row.alternatives.contains(&row.key) {
            return Err(CanonicalError::InvalidLexicon(format!(
                "substitution {:?} must list itself among its alternatives",
                row.key
            )));
        }
    }
    Ok(())
}
