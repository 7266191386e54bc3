use std::fmt;
use std::sync::Arc;

use canonical::{normalize_token, singularize, tokenize, Lexicon, SnowballStemmer, Stem};

use crate::types::{ProcessedQuery, SearchSurface};

/// A query ready for predicate and score construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedQuery {
    /// Trimmed raw text used for substring signals.
    pub raw: String,
    /// Singular form of `raw` on surfaces that singularize, when it differs.
    pub singular: Option<String>,
    pub processed: ProcessedQuery,
}

impl PreparedQuery {
    /// Forms accepted by raw substring matching: `raw`, then `singular`.
    pub fn raw_forms(&self) -> Vec<&str> {
        std::iter::once(self.raw.as_str())
            .chain(self.singular.as_deref())
            .collect()
    }
}

/// Turns raw query text into the same token shapes the index stores.
#[derive(Clone)]
pub struct QueryProcessor {
    lexicon: Arc<Lexicon>,
    stemmer: Arc<dyn Stem>,
}

impl QueryProcessor {
    pub fn new(lexicon: Arc<Lexicon>, stemmer: Arc<dyn Stem>) -> Self {
        Self { lexicon, stemmer }
    }

    pub fn spanish() -> Self {
        Self::new(
            Arc::new(Lexicon::spanish()),
            Arc::new(SnowballStemmer::spanish()),
        )
    }

    pub fn lexicon(&self) -> &Arc<Lexicon> {
        &self.lexicon
    }

    /// Keywords and stems come from each raw whitespace token folded on its
    /// own with stopwords dropped; exact terms are the folded tokens of the
    /// whole query with stopwords kept.
    pub fn process(&self, raw: &str) -> ProcessedQuery {
        let exact_terms = tokenize(raw).into_iter().collect();

        let mut processed = ProcessedQuery {
            exact_terms,
            ..Default::default()
        };
        for token in raw.split_whitespace() {
            let normalized = normalize_token(token);
            if normalized.is_empty() || self.lexicon.is_stopword(&normalized) {
                continue;
            }
            processed.stemmed.insert(self.stemmer.stem(&normalized));
            processed.keywords.insert(normalized);
        }
        processed
    }

    /// Process `raw` the way `surface` expects.
    ///
    /// Name search singularizes the whole query before token processing and
    /// keeps both the original and the singular form for substring matching.
    pub fn prepare(&self, surface: SearchSurface, raw: &str) -> PreparedQuery {
        let raw = raw.trim();
        if !surface.singularizes_query() {
            return PreparedQuery {
                raw: raw.to_string(),
                singular: None,
                processed: self.process(raw),
            };
        }

        let singular = singularize(raw, &self.lexicon);
        PreparedQuery {
            raw: raw.to_string(),
            processed: self.process(&singular),
            singular: (singular != raw).then_some(singular),
        }
    }
}

impl Default for QueryProcessor {
    fn default() -> Self {
        Self::spanish()
    }
}

impl fmt::Debug for QueryProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryProcessor")
            .field("stopwords", &self.lexicon.stopword_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_terms_keep_stopwords_keywords_drop_them() {
        let processor = QueryProcessor::spanish();
        let processed = processor.process("Tubo de PVC");
        assert_eq!(processed.exact_terms, set(&["tubo", "de", "pvc"]));
        assert_eq!(processed.keywords, set(&["tubo", "pvc"]));
        assert_eq!(processed.stemmed.len(), 2);
    }

    #[test]
    fn tokens_are_folded_and_deduplicated() {
        let processor = QueryProcessor::spanish();
        let processed = processor.process("Cerámica CERAMICA cerámica!");
        assert_eq!(processed.keywords, set(&["ceramica"]));
        assert_eq!(processed.exact_terms, set(&["ceramica"]));
    }

    #[test]
    fn empty_and_stopword_queries_produce_no_keywords() {
        let processor = QueryProcessor::spanish();
        assert!(processor.process("").is_empty());
        assert!(processor.process("   ").is_empty());

        let stopwords = processor.process("de la");
        assert!(stopwords.keywords.is_empty());
        assert!(stopwords.stemmed.is_empty());
        assert_eq!(stopwords.exact_terms, set(&["de", "la"]));
    }

    #[test]
    fn name_surface_singularizes_but_keeps_raw() {
        let processor = QueryProcessor::spanish();
        let prepared = processor.prepare(SearchSurface::ByName, "  Tornillos ");
        assert_eq!(prepared.raw, "Tornillos");
        assert_eq!(prepared.singular.as_deref(), Some("Tornillo"));
        assert_eq!(prepared.raw_forms(), vec!["Tornillos", "Tornillo"]);
        assert_eq!(prepared.processed.keywords, set(&["tornillo"]));

        let filter = processor.prepare(SearchSurface::Filter, "Tornillos");
        assert_eq!(filter.singular, None);
        assert_eq!(filter.raw_forms(), vec!["Tornillos"]);
        assert_eq!(filter.processed.keywords, set(&["tornillos"]));
    }

    #[test]
    fn singular_query_has_no_second_form() {
        let processor = QueryProcessor::spanish();
        let prepared = processor.prepare(SearchSurface::ByName, "tornillo");
        assert_eq!(prepared.singular, None);
        assert_eq!(prepared.raw_forms(), vec!["tornillo"]);
    }

    #[test]
    fn singular_and_plural_share_stems() {
        let processor = QueryProcessor::spanish();
        let plural = processor.process("tornillos");
        let singular = processor.process("tornillo");
        assert_eq!(plural.stemmed, singular.stemmed);
    }
}
