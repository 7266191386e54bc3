//! Workspace umbrella crate for catalog lexical search.
//!
//! This crate wires the normalization layer, the catalog index and the
//! matcher behind one facade, [`CatalogSearch`], configured from a single
//! [`SearchConfig`]. The three operations the surrounding application calls
//! directly are:
//!
//! - [`CatalogSearch::build_index_fields`]: derived keyword sets for a write
//! - [`CatalogSearch::process_query`]: query token sets
//! - [`CatalogSearch::build_match_and_score`]: predicate and score trees
//!
//! Entry writes and searches are also available on the facade for callers
//! that let it own the store.

pub mod config;

pub use canonical::{
    expand, fold, normalize, normalize_token, singularize, tokenize, CanonicalError, Lexicon,
    SnowballStemmer, Stem, Substitution, VariantLimits,
};
pub use config::{ConfigLoadError, LexiconYamlConfig, SearchConfig};
pub use index::{
    BuiltIndexFields, Catalog, CatalogEntry, CatalogStore, ChangedFields, EntryDraft, EntryEdit,
    InMemoryStore, IndexError, IndexFields, Indexer, WriteKind,
};
pub use matcher::{
    set_search_metrics, CatalogQuery, GroupCombinator, LiteralPattern, MatchAndScore, MatchConfig,
    MatchError, Predicate, ProcessedQuery, QueryProcessor, RankedEntry, ScoreExpression,
    ScoreWeights, SearchEngine, SearchFilters, SearchMetrics, SearchSurface, Signal,
};

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

/// Errors surfaced by the facade.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigLoadError),
    #[error("lexicon error: {0}")]
    Canonical(#[from] CanonicalError),
    #[error("index error: {0}")]
    Index(#[from] IndexError),
    #[error("match error: {0}")]
    Match(#[from] MatchError),
}

/// Catalog, indexer and search engine sharing one lexicon and stemmer.
#[derive(Debug, Clone)]
pub struct CatalogSearch {
    catalog: Catalog,
    engine: SearchEngine,
}

impl CatalogSearch {
    /// Facade over an in-memory store.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        Self::with_store(Arc::new(InMemoryStore::new()), config)
    }

    pub fn with_store(
        store: Arc<dyn CatalogStore>,
        config: &SearchConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        let lexicon = Arc::new(config.build_lexicon()?);
        let stemmer: Arc<dyn Stem> = Arc::new(SnowballStemmer::spanish());

        let catalog = Catalog::new(store, Indexer::new(Arc::clone(&lexicon), stemmer));
        let engine = SearchEngine::for_catalog(&catalog, config.match_config())?;
        info!(
            config_name = config.name.as_deref().unwrap_or("default"),
            stopwords = lexicon.stopword_count(),
            substitutions = lexicon.substitutions().len(),
            "catalog_search_ready"
        );
        Ok(Self { catalog, engine })
    }

    /// Default configuration, in-memory store.
    pub fn in_memory() -> Result<Self, SearchError> {
        Self::new(&SearchConfig::default())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Derived keyword sets for a write, or `None` if the write leaves the
    /// indexed fields alone.
    pub fn build_index_fields(
        &self,
        name: &str,
        description: &str,
        brand: &str,
        user_keywords: &[String],
        kind: WriteKind,
    ) -> Option<BuiltIndexFields> {
        self.catalog
            .indexer()
            .build(name, description, brand, user_keywords, kind)
    }

    pub fn process_query(&self, raw: &str) -> ProcessedQuery {
        self.engine.processor().process(raw)
    }

    pub fn build_match_and_score(&self, processed: &ProcessedQuery, raw: &str) -> MatchAndScore {
        matcher::build_match_and_score(processed, raw, self.engine.config())
    }

    pub fn create(&self, draft: EntryDraft) -> Result<CatalogEntry, SearchError> {
        Ok(self.catalog.create(draft)?)
    }

    pub fn update(&self, id: &str, edit: &EntryEdit) -> Result<CatalogEntry, SearchError> {
        Ok(self.catalog.update(id, edit)?)
    }

    pub fn delete(&self, id: &str) -> Result<CatalogEntry, SearchError> {
        Ok(self.catalog.delete(id)?)
    }

    pub fn search(&self, query: &CatalogQuery) -> Result<Vec<RankedEntry>, SearchError> {
        Ok(self.engine.search(query)?)
    }
}
