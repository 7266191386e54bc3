//! # Catalog Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` sits on top of the normalization layer (`canonical`) and the
//! catalog index (`index`). It turns free-text queries into the same token
//! shapes the index stores, builds a match predicate and an additive score
//! for them, and ranks catalog entries deterministically.
//!
//! ## Core Types
//!
//! - [`QueryProcessor`]: raw text → [`ProcessedQuery`] (`keywords`, `stemmed`,
//!   `exact_terms`). Singularization is applied only for
//!   [`SearchSurface::ByName`].
//! - [`build_match_and_score`]: [`ProcessedQuery`] + raw text →
//!   [`MatchAndScore`], a [`Predicate`] tree and a [`ScoreExpression`].
//! - [`LiteralPattern`]: every user-supplied value enters an expression
//!   escaped; metacharacters never reach a pattern engine unquoted.
//! - [`SearchEngine`]: scans a [`index::CatalogStore`], applies storage
//!   filters, predicate and score, and orders by score, name and id.
//! - [`MatchConfig`]: group combinator (every group must hold unless set to
//!   [`GroupCombinator::Any`]), [`ScoreWeights`], `max_results`, `explain`.
//!
//! ## Example Usage
//!
//! ```
//! use index::{Catalog, EntryDraft};
//! use matcher::{CatalogQuery, MatchConfig, SearchEngine};
//!
//! let catalog = Catalog::in_memory();
//! catalog
//!     .create(EntryDraft::new("p-1", "TOR-100", "Tornillo drywall").with_featured(true))
//!     .unwrap();
//!
//! let engine = SearchEngine::for_catalog(&catalog, MatchConfig::default()).unwrap();
//! let hits = engine.search(&CatalogQuery::by_name("tornillos")).unwrap();
//! assert_eq!(hits[0].entry.id, "p-1");
//! ```

mod engine;
mod metrics;
mod pattern;
mod predicate;
mod query;
mod scoring;
mod types;

pub use engine::{rank, SearchEngine};
pub use metrics::{set_search_metrics, SearchMetrics};
pub use pattern::LiteralPattern;
pub use predicate::{Predicate, SetField, TextField};
pub use query::{PreparedQuery, QueryProcessor};
pub use scoring::{
    build_match_and_score, build_prepared, MatchAndScore, ScoreExpression, ScoreRule,
};
pub use types::{
    CatalogQuery, GroupCombinator, MatchConfig, MatchError, ProcessedQuery, RankedEntry,
    ScoreWeights, SearchFilters, SearchSurface, Signal,
};
