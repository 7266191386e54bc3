use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::fields::{IndexFields, SourceFields};

const fn default_active() -> bool {
    true
}

/// A catalog entry as persisted by the store.
///
/// The three derived keyword sets are owned by the indexing pipeline: they
/// are a pure function of `name`, `description`, `brand` and `user_keywords`
/// at the time of the last qualifying write. Everything else is owned by the
/// surrounding application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    /// Free-form keywords supplied by users, plus name variants added at creation.
    #[serde(default)]
    pub user_keywords: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub deleted: bool,
    /// Aggregate on-hand quantity across locations.
    #[serde(default)]
    pub available_stock: i64,
    #[serde(default)]
    pub search_keywords: BTreeSet<String>,
    #[serde(default)]
    pub stemmed_keywords: BTreeSet<String>,
    #[serde(default)]
    pub exact_search_terms: BTreeSet<String>,
}

impl CatalogEntry {
    /// Borrow the four fields the indexing pipeline reads.
    pub fn source_fields(&self) -> SourceFields<'_> {
        SourceFields {
            name: &self.name,
            description: &self.description,
            brand: &self.brand,
            user_keywords: &self.user_keywords,
        }
    }

    /// Snapshot of the derived keyword sets.
    pub fn index_fields(&self) -> IndexFields {
        IndexFields {
            search_keywords: self.search_keywords.clone(),
            stemmed_keywords: self.stemmed_keywords.clone(),
            exact_search_terms: self.exact_search_terms.clone(),
        }
    }

    /// Overwrite the derived keyword sets.
    pub fn apply_index_fields(&mut self, fields: IndexFields) {
        self.search_keywords = fields.search_keywords;
        self.stemmed_keywords = fields.stemmed_keywords;
        self.exact_search_terms = fields.exact_search_terms;
    }

    /// Whether the entry is visible to catalog searches.
    pub fn is_searchable(&self) -> bool {
        self.active && !self.deleted
    }
}

/// Input for creating a catalog entry.
///
/// Derived keyword sets are never supplied by callers; they are computed on
/// create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    #[serde(default)]
    pub user_keywords: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub available_stock: i64,
}

impl EntryDraft {
    pub fn new(id: impl Into<String>, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            description: String::new(),
            brand: String::new(),
            categories: BTreeSet::new(),
            user_keywords: Vec::new(),
            featured: false,
            active: true,
            available_stock: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_user_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_available_stock(mut self, stock: i64) -> Self {
        self.available_stock = stock;
        self
    }

    /// Materialize the draft with empty derived sets.
    pub(crate) fn into_entry(self) -> CatalogEntry {
        CatalogEntry {
            id: self.id,
            code: self.code,
            name: self.name,
            description: self.description,
            brand: self.brand,
            categories: self.categories,
            user_keywords: self.user_keywords,
            featured: self.featured,
            active: self.active,
            deleted: false,
            available_stock: self.available_stock,
            search_keywords: BTreeSet::new(),
            stemmed_keywords: BTreeSet::new(),
            exact_search_terms: BTreeSet::new(),
        }
    }
}

/// A partial update. `None` leaves the persisted value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryEdit {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub categories: Option<BTreeSet<String>>,
    #[serde(default)]
    pub user_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub available_stock: Option<i64>,
}

impl EntryEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn user_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }

    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn available_stock(mut self, stock: i64) -> Self {
        self.available_stock = Some(stock);
        self
    }

    /// The entry as it would look after this edit. Derived sets are copied
    /// unchanged; the caller decides whether to recompute them.
    pub fn apply_to(&self, current: &CatalogEntry) -> CatalogEntry {
        let mut next = current.clone();
        if let Some(code) = &self.code {
            next.code = code.clone();
        }
        if let Some(name) = &self.name {
            next.name = name.clone();
        }
        if let Some(description) = &self.description {
            next.description = description.clone();
        }
        if let Some(brand) = &self.brand {
            next.brand = brand.clone();
        }
        if let Some(categories) = &self.categories {
            next.categories = categories.clone();
        }
        if let Some(keywords) = &self.user_keywords {
            next.user_keywords = keywords.clone();
        }
        if let Some(featured) = self.featured {
            next.featured = featured;
        }
        if let Some(active) = self.active {
            next.active = active;
        }
        if let Some(stock) = self.available_stock {
            next.available_stock = stock;
        }
        next
    }
}
