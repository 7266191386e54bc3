use std::collections::BTreeSet;

use index::CatalogEntry;

use crate::pattern::LiteralPattern;

/// String fields a predicate can test by substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Name,
    Code,
    Brand,
    Description,
}

impl TextField {
    pub fn read<'a>(&self, entry: &'a CatalogEntry) -> &'a str {
        match self {
            TextField::Name => &entry.name,
            TextField::Code => &entry.code,
            TextField::Brand => &entry.brand,
            TextField::Description => &entry.description,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TextField::Name => "name",
            TextField::Code => "code",
            TextField::Brand => "brand",
            TextField::Description => "description",
        }
    }
}

/// Derived keyword sets a predicate can test by element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetField {
    SearchKeywords,
    StemmedKeywords,
    ExactSearchTerms,
}

impl SetField {
    pub fn read<'a>(&self, entry: &'a CatalogEntry) -> &'a BTreeSet<String> {
        match self {
            SetField::SearchKeywords => &entry.search_keywords,
            SetField::StemmedKeywords => &entry.stemmed_keywords,
            SetField::ExactSearchTerms => &entry.exact_search_terms,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SetField::SearchKeywords => "searchKeywords",
            SetField::StemmedKeywords => "stemmedKeywords",
            SetField::ExactSearchTerms => "exactSearchTerms",
        }
    }
}

/// A boolean filter over catalog entries.
///
/// The tree mirrors what a document store offers: substring tests on string
/// fields, element tests on set fields, equality and AND/OR. A store that
/// speaks a query language can translate it; the in-memory engine evaluates
/// it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Matches everything.
    True,
    /// `field` contains the literal, ignoring case.
    Contains {
        field: TextField,
        pattern: LiteralPattern,
    },
    /// Some member of `field` contains the literal, ignoring case.
    AnyElementContains {
        field: SetField,
        pattern: LiteralPattern,
    },
    /// `field` shares at least one exact member with `values`.
    Intersects {
        field: SetField,
        values: BTreeSet<String>,
    },
    /// Active and not soft-deleted.
    Searchable,
    FeaturedIs(bool),
    /// Entry carries at least one of the categories.
    InCategories(Vec<String>),
    /// `availableStock > 0`.
    StockAvailable,
    /// All children hold. Empty is true.
    And(Vec<Predicate>),
    /// Some child holds. Empty is false.
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Conjunction that collapses trivial shapes: no parts is `True`, one
    /// part is itself, and `True` parts are dropped.
    pub fn all(parts: Vec<Predicate>) -> Predicate {
        let mut parts: Vec<Predicate> = parts
            .into_iter()
            .filter(|p| !matches!(p, Predicate::True))
            .collect();
        match parts.len() {
            0 => Predicate::True,
            1 => parts.remove(0),
            _ => Predicate::And(parts),
        }
    }

    /// Disjunction; one part is returned as is.
    pub fn any(mut parts: Vec<Predicate>) -> Predicate {
        if parts.len() == 1 {
            parts.remove(0)
        } else {
            Predicate::Or(parts)
        }
    }

    pub fn evaluate(&self, entry: &CatalogEntry) -> bool {
        match self {
            Predicate::True => true,
            Predicate::Contains { field, pattern } => pattern.is_match(field.read(entry)),
            Predicate::AnyElementContains { field, pattern } => {
                pattern.matches_any(field.read(entry))
            }
            Predicate::Intersects { field, values } => {
                let members = field.read(entry);
                values.iter().any(|v| members.contains(v))
            }
            Predicate::Searchable => entry.is_searchable(),
            Predicate::FeaturedIs(featured) => entry.featured == *featured,
            Predicate::InCategories(categories) => {
                categories.iter().any(|c| entry.categories.contains(c))
            }
            Predicate::StockAvailable => entry.available_stock > 0,
            Predicate::And(parts) => parts.iter().all(|p| p.evaluate(entry)),
            Predicate::Or(parts) => parts.iter().any(|p| p.evaluate(entry)),
        }
    }

    /// Whether this predicate accepts every entry.
    pub fn is_trivial(&self) -> bool {
        match self {
            Predicate::True => true,
            Predicate::And(parts) => parts.iter().all(Predicate::is_trivial),
            _ => false,
        }
    }
}
