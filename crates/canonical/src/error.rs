use thiserror::Error;

/// Errors that can occur while building the language tables.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid lexicon: {0}")]
    InvalidLexicon(String),
}
