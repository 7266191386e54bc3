//! # Catalog Index
//!
//! This crate owns the catalog entry model and the indexing pipeline that
//! derives the keyword sets every search relies on.
//!
//! ## Core Features
//!
//! - **Derived keyword fields**: [`Indexer`] turns an entry's `name`,
//!   `description`, `brand` and `user_keywords` into three token sets:
//!   - `searchKeywords`: normalized, stopword-free tokens
//!   - `stemmedKeywords`: Snowball stems of those tokens
//!   - `exactSearchTerms`: normalized tokens of the whole combined text
//! - **Explicit change tracking**: [`ChangedFields`] diffs the persisted entry
//!   against the proposed one; a [`WriteKind`] decides whether indexing runs.
//! - **Spelling variants**: on create, the name is expanded into its common
//!   misspellings and the variants are appended to the user keywords.
//! - **Pluggable stores**: the [`CatalogStore`] trait abstracts persistence;
//!   [`InMemoryStore`] is a `RwLock<HashMap>` reference implementation.
//!
//! ## Example Usage
//!
//! ```
//! use index::{Catalog, EntryDraft, EntryEdit};
//!
//! let catalog = Catalog::in_memory();
//! let entry = catalog
//!     .create(EntryDraft::new("p-1", "PRD-001", "Varilla corrugada").with_brand("Acesco"))
//!     .unwrap();
//! assert!(entry.search_keywords.contains("varilla"));
//! assert!(entry.search_keywords.contains("barilla"));
//!
//! // Toggling `featured` does not touch the derived sets.
//! let updated = catalog.update("p-1", &EntryEdit::new().featured(true)).unwrap();
//! assert_eq!(updated.search_keywords, entry.search_keywords);
//! ```

mod backend;
mod catalog;
mod changes;
mod entry;
mod fields;

pub use backend::{CatalogStore, InMemoryStore};
pub use catalog::Catalog;
pub use changes::{ChangedFields, WriteKind};
pub use entry::{CatalogEntry, EntryDraft, EntryEdit};
pub use fields::{BuiltIndexFields, IndexFields, Indexer, SourceFields};

use thiserror::Error;

/// Errors raised by the store and the write service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Serialization encode error: {0}")]
    Encode(String),
    #[error("Serialization decode error: {0}")]
    Decode(String),
    #[error("Entry not found: {0}")]
    NotFound(String),
    #[error("Duplicate {field}: {value}")]
    Duplicate { field: String, value: String },
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),
}

impl IndexError {
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }

    pub fn duplicate(field: &str, value: &str) -> Self {
        Self::Duplicate {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn custom_store_can_be_injected() {
        let store: Arc<dyn CatalogStore> = Arc::new(InMemoryStore::new());
        let catalog = Catalog::new(Arc::clone(&store), Indexer::spanish());
        catalog
            .create(EntryDraft::new("p-1", "C1", "Cinta métrica"))
            .expect("create");

        let raw = store.get("p-1").expect("get").expect("stored");
        assert!(raw.search_keywords.contains("metrica"));
    }

    #[test]
    fn error_messages_are_readable() {
        assert_eq!(
            IndexError::duplicate("code", "C1").to_string(),
            "Duplicate code: C1"
        );
        assert_eq!(
            IndexError::NotFound("p-9".into()).to_string(),
            "Entry not found: p-9"
        );
    }

    #[test]
    fn concurrent_reads_share_the_store() {
        let catalog = Arc::new(Catalog::in_memory());
        for i in 0..8 {
            catalog
                .create(EntryDraft::new(format!("p-{i}"), format!("C{i}"), format!("Broca {i}")))
                .expect("create");
        }

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                std::thread::spawn(move || {
                    let mut count = 0;
                    catalog
                        .store()
                        .scan(&mut |_| {
                            count += 1;
                            Ok(())
                        })
                        .expect("scan");
                    count
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().expect("thread"), 8);
        }
    }
}
