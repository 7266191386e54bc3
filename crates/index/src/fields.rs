//! Derived keyword fields and the pipeline that computes them.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use canonical::{expand, normalize, normalize_token, Lexicon, SnowballStemmer, Stem};
use serde::{Deserialize, Serialize};

use crate::changes::WriteKind;

/// The four entry fields the pipeline reads, borrowed.
#[derive(Debug, Clone, Copy)]
pub struct SourceFields<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub brand: &'a str,
    pub user_keywords: &'a [String],
}

impl SourceFields<'_> {
    /// `name description brand keyword keyword ...`, in that order.
    pub fn combined_text(&self) -> String {
        let mut text = String::with_capacity(
            self.name.len()
                + self.description.len()
                + self.brand.len()
                + self.user_keywords.iter().map(|k| k.len() + 1).sum::<usize>()
                + 3,
        );
        text.push_str(self.name);
        text.push(' ');
        text.push_str(self.description);
        text.push(' ');
        text.push_str(self.brand);
        text.push(' ');
        text.push_str(&self.user_keywords.join(" "));
        text
    }
}

/// The derived keyword sets stored with every entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexFields {
    pub search_keywords: BTreeSet<String>,
    pub stemmed_keywords: BTreeSet<String>,
    pub exact_search_terms: BTreeSet<String>,
}

/// Output of a reindexing write: the derived sets plus the user keyword list
/// to persist (which gains the name variants on create).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltIndexFields {
    #[serde(flatten)]
    pub fields: IndexFields,
    pub expanded_user_keywords: Vec<String>,
}

/// Computes derived keyword fields from source fields.
///
/// Cheap to clone; the lexicon and stemmer are shared.
#[derive(Clone)]
pub struct Indexer {
    lexicon: Arc<Lexicon>,
    stemmer: Arc<dyn Stem>,
}

impl Indexer {
    pub fn new(lexicon: Arc<Lexicon>, stemmer: Arc<dyn Stem>) -> Self {
        Self { lexicon, stemmer }
    }

    /// Built-in Spanish lexicon with the Snowball stemmer.
    pub fn spanish() -> Self {
        Self::new(
            Arc::new(Lexicon::spanish()),
            Arc::new(SnowballStemmer::spanish()),
        )
    }

    pub fn lexicon(&self) -> &Arc<Lexicon> {
        &self.lexicon
    }

    pub fn stemmer(&self) -> &Arc<dyn Stem> {
        &self.stemmer
    }

    /// Derive the three keyword sets. Pure: same source, same output.
    pub fn index(&self, source: &SourceFields<'_>) -> IndexFields {
        let combined = source.combined_text();

        let mut search_keywords = BTreeSet::new();
        let mut stemmed_keywords = BTreeSet::new();
        for raw in combined.split_whitespace() {
            let token = normalize_token(raw);
            if token.is_empty() || self.lexicon.is_stopword(&token) {
                continue;
            }
            stemmed_keywords.insert(self.stemmer.stem(&token));
            search_keywords.insert(token);
        }

        let exact_search_terms = normalize(&combined, &self.lexicon).into_iter().collect();

        IndexFields {
            search_keywords,
            stemmed_keywords,
            exact_search_terms,
        }
    }

    /// User keywords as they should be persisted for this write.
    ///
    /// On create, blank keywords are dropped, the rest trimmed, and the
    /// spelling variants of `name` appended (skipping ones already listed).
    /// Updates keep the caller's list as-is.
    pub fn prepare_user_keywords(
        &self,
        name: &str,
        user_keywords: &[String],
        kind: WriteKind,
    ) -> Vec<String> {
        if !kind.expands_variants() {
            return user_keywords.to_vec();
        }

        let mut keywords: Vec<String> = user_keywords
            .iter()
            .map(|keyword| keyword.trim())
            .filter(|keyword| !keyword.is_empty())
            .map(str::to_string)
            .collect();
        let mut seen: BTreeSet<String> = keywords.iter().cloned().collect();
        for variant in expand(name, &self.lexicon) {
            if seen.insert(variant.clone()) {
                keywords.push(variant);
            }
        }
        keywords
    }

    /// Run the indexing trigger for one write.
    ///
    /// Returns `None` when the write does not touch any indexed field, in
    /// which case the persisted derived sets must be left alone.
    pub fn build(
        &self,
        name: &str,
        description: &str,
        brand: &str,
        user_keywords: &[String],
        kind: WriteKind,
    ) -> Option<BuiltIndexFields> {
        if !kind.needs_reindex() {
            return None;
        }

        let expanded_user_keywords = self.prepare_user_keywords(name, user_keywords, kind);
        let fields = self.index(&SourceFields {
            name,
            description,
            brand,
            user_keywords: &expanded_user_keywords,
        });

        Some(BuiltIndexFields {
            fields,
            expanded_user_keywords,
        })
    }
}

impl Default for Indexer {
    fn default() -> Self {
        Self::spanish()
    }
}

impl fmt::Debug for Indexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Indexer")
            .field("stopwords", &self.lexicon.stopword_count())
            .field("substitutions", &self.lexicon.substitutions().len())
            .finish_non_exhaustive()
    }
}
