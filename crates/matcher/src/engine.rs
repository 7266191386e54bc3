use std::sync::Arc;
use std::time::Instant;

use canonical::normalize_token;
use index::{Catalog, CatalogEntry, CatalogStore};
use tracing::{debug, info, warn, Level};

use crate::metrics::metrics_recorder;
use crate::pattern::LiteralPattern;
use crate::predicate::{Predicate, TextField};
use crate::query::QueryProcessor;
use crate::scoring::{build_prepared, MatchAndScore};
use crate::types::{CatalogQuery, MatchConfig, MatchError, RankedEntry, SearchSurface};


/// Runs catalog queries against a store.
///
/// The store is scanned once per search; every entry that passes the storage
/// filters and the match predicate is scored, then results are ordered by
/// score, name and id.
#[derive(Clone)]
pub struct SearchEngine {
    store: Arc<dyn CatalogStore>,
    processor: QueryProcessor,
    config: MatchConfig,
}

impl SearchEngine {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        processor: QueryProcessor,
        config: MatchConfig,
    ) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self {
            store,
            processor,
            config,
        })
    }

    /// Share the catalog's store, lexicon and stemmer so queries are
    /// tokenized the same way entries were indexed.
    pub fn for_catalog(catalog: &Catalog, config: MatchConfig) -> Result<Self, MatchError> {
        let indexer = catalog.indexer();
        let processor =
            QueryProcessor::new(Arc::clone(indexer.lexicon()), Arc::clone(indexer.stemmer()));
        Self::new(Arc::clone(catalog.store()), processor, config)
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn processor(&self) -> &QueryProcessor {
        &self.processor
    }

    pub fn search(&self, query: &CatalogQuery) -> Result<Vec<RankedEntry>, MatchError> {
        let start = Instant::now();
        let span = tracing::span!(
            Level::INFO,
            "matcher.search",
            surface = query.surface.as_str()
        );
        let _guard = span.enter();

        match self.search_inner(query) {
            Ok(hits) => {
                let latency = start.elapsed();
                info!(
                    hits = hits.len(),
                    top_score = hits.first().map(|h| h.score).unwrap_or(0),
                    elapsed_micros = latency.as_micros(),
                    "search_success"
                );
                if let Some(recorder) = metrics_recorder() {
                    recorder.record_search(query.surface, latency, hits.len());
                }
                Ok(hits)
            }
            Err(err) => {
                warn!(error = %err, elapsed_micros = start.elapsed().as_micros(), "search_failure");
                Err(err)
            }
        }
    }

    fn search_inner(&self, query: &CatalogQuery) -> Result<Vec<RankedEntry>, MatchError> {
        let prepared = self.processor.prepare(query.surface, &query.text);
        debug!(
            keywords = prepared.processed.keywords.len(),
            exact_terms = prepared.processed.exact_terms.len(),
            "query_processed"
        );
        let built = build_prepared(&prepared, &self.config);
        let filter = self.filter_predicate(query);
        let mut hits = self.collect(&filter, &built)?;
        rank(&mut hits);
        if let Some(limit) = self.config.max_results {
            hits.truncate(limit);
        }
        Ok(hits)
    }

    /// Storage-side constraints: visibility, surface restrictions and the
    /// optional filters of the request.
    fn filter_predicate(&self, query: &CatalogQuery) -> Predicate {
        let mut parts = vec![Predicate::Searchable];

        if let Some(code) = query.filters.code.as_deref().map(str::trim) {
            if !code.is_empty() {
                parts.push(Predicate::Contains {
                    field: TextField::Code,
                    pattern: LiteralPattern::new(code),
                });
            }
        }
        if let Some(brand) = query.filters.brand.as_deref() {
            let brand = normalize_token(brand);
            if !brand.is_empty() {
                parts.push(Predicate::Contains {
                    field: TextField::Brand,
                    pattern: LiteralPattern::new(&brand),
                });
            }
        }
        if let Some(featured) = query.filters.featured {
            parts.push(Predicate::FeaturedIs(featured));
        }
        if !query.filters.categories.is_empty() {
            parts.push(Predicate::InCategories(query.filters.categories.clone()));
        }
        if query.surface == SearchSurface::AvailableStock {
            parts.push(Predicate::StockAvailable);
        }
        Predicate::all(parts)
    }

    fn collect(
        &self,
        filter: &Predicate,
        built: &MatchAndScore,
    ) -> Result<Vec<RankedEntry>, MatchError> {
        let explain = self.config.explain;
        let mut hits = Vec::new();
        self.store.scan(&mut |entry: &CatalogEntry| {
            if filter.evaluate(entry) && built.predicate.evaluate(entry) {
                let (score, signals) = built.score.evaluate(entry);
                hits.push(RankedEntry {
                    entry: entry.clone(),
                    score,
                    signals: if explain { signals } else { Vec::new() },
                });
            }
            Ok(())
        })?;
        Ok(hits)
    }
}

/// Score descending, then `name` by byte order, then `id`.
pub fn rank(hits: &mut [RankedEntry]) {
    hits.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.entry.name.as_bytes().cmp(b.entry.name.as_bytes()))
            .then_with(|| a.entry.id.cmp(&b.entry.id))
    });
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("processor", &self.processor)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
