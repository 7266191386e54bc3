use std::collections::BTreeSet;

use index::{CatalogEntry, IndexError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token sets derived from a raw query, shaped like the indexed fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedQuery {
    /// Normalized, stopword-free tokens; compared against `searchKeywords`.
    pub keywords: BTreeSet<String>,
    /// Stems of `keywords`; compared against `stemmedKeywords`.
    pub stemmed: BTreeSet<String>,
    /// Folded tokens with stopwords kept; compared against `exactSearchTerms`.
    pub exact_terms: BTreeSet<String>,
}

impl ProcessedQuery {
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.stemmed.is_empty() && self.exact_terms.is_empty()
    }
}

/// How the raw-substring, exact-term and keyword groups combine in the match
/// predicate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GroupCombinator {
    /// An entry qualifies through any one fully satisfied group.
    Any,
    /// Every non-empty group must be satisfied.
    #[default]
    All,
}

/// Additive weights of the relevance signals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreWeights {
    #[serde(default = "ScoreWeights::default_name")]
    pub name: u32,
    #[serde(default = "ScoreWeights::default_code")]
    pub code: u32,
    #[serde(default = "ScoreWeights::default_brand")]
    pub brand: u32,
    #[serde(default = "ScoreWeights::default_exact")]
    pub exact: u32,
    #[serde(default = "ScoreWeights::default_keyword")]
    pub keyword: u32,
    #[serde(default = "ScoreWeights::default_stem")]
    pub stem: u32,
    #[serde(default = "ScoreWeights::default_description")]
    pub description: u32,
    #[serde(default = "ScoreWeights::default_featured")]
    pub featured: u32,
}

impl ScoreWeights {
    pub(crate) fn default_name() -> u32 {
        20
    }
    pub(crate) fn default_code() -> u32 {
        18
    }
    pub(crate) fn default_brand() -> u32 {
        15
    }
    pub(crate) fn default_exact() -> u32 {
        12
    }
    pub(crate) fn default_keyword() -> u32 {
        8
    }
    pub(crate) fn default_stem() -> u32 {
        5
    }
    pub(crate) fn default_description() -> u32 {
        2
    }
    pub(crate) fn default_featured() -> u32 {
        5
    }

    /// Weight attached to a signal.
    pub fn weight_of(&self, signal: Signal) -> u32 {
        match signal {
            Signal::NameSubstring => self.name,
            Signal::CodeSubstring => self.code,
            Signal::BrandSubstring => self.brand,
            Signal::ExactTerm => self.exact,
            Signal::Keyword => self.keyword,
            Signal::Stem => self.stem,
            Signal::DescriptionSubstring => self.description,
            Signal::Featured => self.featured,
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            code: Self::default_code(),
            brand: Self::default_brand(),
            exact: Self::default_exact(),
            keyword: Self::default_keyword(),
            stem: Self::default_stem(),
            description: Self::default_description(),
            featured: Self::default_featured(),
        }
    }
}

/// A relevance signal that can fire for an entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    NameSubstring,
    CodeSubstring,
    BrandSubstring,
    ExactTerm,
    Keyword,
    Stem,
    DescriptionSubstring,
    Featured,
}

/// The catalog query operation being served.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SearchSurface {
    /// Free-text name search. The query is singularized before processing.
    ByName,
    /// Generic filter search with an optional text query.
    Filter,
    /// Filter search restricted to entries with stock on hand.
    AvailableStock,
}

impl SearchSurface {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchSurface::ByName => "by_name",
            SearchSurface::Filter => "filter",
            SearchSurface::AvailableStock => "available_stock",
        }
    }

    /// Whether the raw query is singularized before token processing.
    pub fn singularizes_query(&self) -> bool {
        matches!(self, SearchSurface::ByName)
    }
}

/// Engine-wide matching and ranking settings.
///
/// Cheap to clone and serde-friendly so it can be embedded in the root
/// configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchConfig {
    /// Configuration schema version for this match config.
    #[serde(default = "MatchConfig::default_version")]
    pub version: String,
    #[serde(default)]
    pub combinator: GroupCombinator,
    #[serde(default)]
    pub weights: ScoreWeights,
    /// Truncate results after ordering. `None` returns every match.
    #[serde(default)]
    pub max_results: Option<usize>,
    /// Populate the fired signals of every ranked entry.
    #[serde(default)]
    pub explain: bool,
}

impl MatchConfig {
    pub(crate) fn default_version() -> String {
        "v1".to_string()
    }

    pub fn with_combinator(mut self, combinator: GroupCombinator) -> Self {
        self.combinator = combinator;
        self
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_max_results(mut self, max_results: Option<usize>) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_explain(mut self, explain: bool) -> Self {
        self.explain = explain;
        self
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.version.trim().is_empty() {
            return Err(MatchError::InvalidConfig(
                "config.version must not be empty".into(),
            ));
        }
        if self.max_results == Some(0) {
            return Err(MatchError::InvalidConfig(
                "max_results must be greater than zero when set".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
            combinator: GroupCombinator::default(),
            weights: ScoreWeights::default(),
            max_results: None,
            explain: false,
        }
    }
}

/// Storage-side filters applied before text matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Case-insensitive substring of `code`.
    #[serde(default)]
    pub code: Option<String>,
    /// Brand substring; folded like a token before matching.
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
    /// Entry must carry at least one of these categories.
    #[serde(default)]
    pub categories: Vec<String>,
}

/// A single catalog search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub surface: SearchSurface,
    /// Free-text query; blank means "no text constraint".
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub filters: SearchFilters,
}

impl CatalogQuery {
    pub fn by_name(text: impl Into<String>) -> Self {
        Self {
            surface: SearchSurface::ByName,
            text: text.into(),
            filters: SearchFilters::default(),
        }
    }

    pub fn filter(text: impl Into<String>) -> Self {
        Self {
            surface: SearchSurface::Filter,
            text: text.into(),
            filters: SearchFilters::default(),
        }
    }

    pub fn available_stock(text: impl Into<String>) -> Self {
        Self {
            surface: SearchSurface::AvailableStock,
            text: text.into(),
            filters: SearchFilters::default(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.filters.code = Some(code.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.filters.brand = Some(brand.into());
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.filters.featured = Some(featured);
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.categories = categories.into_iter().map(Into::into).collect();
        self
    }
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub entry: CatalogEntry,
    pub score: u32,
    /// Signals that contributed to `score`; empty unless `explain` is set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signals: Vec<Signal>,
}

/// Errors produced by the matching layer.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Invalid configuration.
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    /// Store read failed.
    #[error("index error: {0}")]
    Index(#[from] IndexError),
}
