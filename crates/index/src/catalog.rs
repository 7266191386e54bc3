use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn, Level};

use crate::backend::{CatalogStore, InMemoryStore};
use crate::changes::{ChangedFields, WriteKind};
use crate::entry::{CatalogEntry, EntryDraft, EntryEdit};
use crate::fields::Indexer;
use crate::IndexError;

/// Write service for catalog entries.
///
/// Every create and update goes through the indexing trigger: derived keyword
/// sets are computed on create and recomputed on an update only when one of
/// the indexed source fields changed.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn CatalogStore>,
    indexer: Indexer,
}

impl Catalog {
    pub fn new(store: Arc<dyn CatalogStore>, indexer: Indexer) -> Self {
        Self { store, indexer }
    }

    /// In-memory store, Spanish lexicon, Snowball stemmer.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()), Indexer::spanish())
    }

    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    pub fn indexer(&self) -> &Indexer {
        &self.indexer
    }

    /// Create an entry. Rejects blank id/code/name and duplicate id, code or name.
    ///
    /// Uniqueness is best-effort: the check scans the store before the write,
    /// so two concurrent creates with the same code or name can both succeed.
    pub fn create(&self, draft: EntryDraft) -> Result<CatalogEntry, IndexError> {
        let start = Instant::now();
        let span = tracing::span!(Level::INFO, "catalog.create", entry_id = %draft.id);
        let _guard = span.enter();

        match self.create_inner(draft) {
            Ok(entry) => {
                info!(
                    code = %entry.code,
                    keywords = entry.search_keywords.len(),
                    user_keywords = entry.user_keywords.len(),
                    elapsed_micros = start.elapsed().as_micros(),
                    "catalog_create_success"
                );
                Ok(entry)
            }
            Err(err) => {
                warn!(error = %err, elapsed_micros = start.elapsed().as_micros(), "catalog_create_failure");
                Err(err)
            }
        }
    }

    fn create_inner(&self, draft: EntryDraft) -> Result<CatalogEntry, IndexError> {
        for (field, value) in [("id", &draft.id), ("code", &draft.code), ("name", &draft.name)] {
            if value.trim().is_empty() {
                return Err(IndexError::InvalidEntry(format!("{field} must not be empty")));
            }
        }
        if self.store.get(&draft.id)?.is_some() {
            return Err(IndexError::duplicate("id", &draft.id));
        }
        self.ensure_unique(&draft.id, &draft.code, &draft.name)?;

        let mut entry = draft.into_entry();
        self.reindex(&mut entry, WriteKind::Create);
        self.store.put(&entry)?;
        Ok(entry)
    }

    /// Apply a partial edit. Derived sets are recomputed only if `name`,
    /// `description`, `brand` or `user_keywords` actually changed.
    pub fn update(&self, id: &str, edit: &EntryEdit) -> Result<CatalogEntry, IndexError> {
        let start = Instant::now();
        let span = tracing::span!(Level::INFO, "catalog.update", entry_id = %id);
        let _guard = span.enter();

        match self.update_inner(id, edit) {
            Ok((entry, changed)) => {
                info!(
                    reindexed = changed.any(),
                    name_changed = changed.name,
                    description_changed = changed.description,
                    brand_changed = changed.brand,
                    user_keywords_changed = changed.user_keywords,
                    elapsed_micros = start.elapsed().as_micros(),
                    "catalog_update_success"
                );
                Ok(entry)
            }
            Err(err) => {
                warn!(error = %err, elapsed_micros = start.elapsed().as_micros(), "catalog_update_failure");
                Err(err)
            }
        }
    }

    fn update_inner(
        &self,
        id: &str,
        edit: &EntryEdit,
    ) -> Result<(CatalogEntry, ChangedFields), IndexError> {
        let current = self
            .store
            .get(id)?
            .ok_or_else(|| IndexError::NotFound(id.to_string()))?;
        let mut proposed = edit.apply_to(&current);

        if proposed.code.trim().is_empty() || proposed.name.trim().is_empty() {
            return Err(IndexError::InvalidEntry(
                "code and name must not be empty".into(),
            ));
        }
        if proposed.code != current.code || proposed.name != current.name {
            self.ensure_unique(id, &proposed.code, &proposed.name)?;
        }

        let changed = ChangedFields::between(&current, &proposed);
        self.reindex(&mut proposed, WriteKind::Update(changed));
        self.store.put(&proposed)?;
        Ok((proposed, changed))
    }

    /// Soft delete: the entry stays in the store with `deleted = true` and
    /// its derived sets untouched.
    pub fn delete(&self, id: &str) -> Result<CatalogEntry, IndexError> {
        let span = tracing::span!(Level::INFO, "catalog.delete", entry_id = %id);
        let _guard = span.enter();

        let mut entry = self
            .store
            .get(id)?
            .ok_or_else(|| IndexError::NotFound(id.to_string()))?;
        if !entry.deleted {
            entry.deleted = true;
            self.store.put(&entry)?;
        }
        info!("catalog_delete_success");
        Ok(entry)
    }

    pub fn get(&self, id: &str) -> Result<Option<CatalogEntry>, IndexError> {
        self.store.get(id)
    }

    pub fn flush(&self) -> Result<(), IndexError> {
        self.store.flush()
    }

    fn reindex(&self, entry: &mut CatalogEntry, kind: WriteKind) {
        let built = self.indexer.build(
            &entry.name,
            &entry.description,
            &entry.brand,
            &entry.user_keywords,
            kind,
        );
        if let Some(built) = built {
            entry.user_keywords = built.expanded_user_keywords;
            entry.apply_index_fields(built.fields);
        }
    }

    /// No other entry may share `code` or `name`. Names compare case-insensitively.
    /// Not atomic with the following `put`.
    fn ensure_unique(&self, id: &str, code: &str, name: &str) -> Result<(), IndexError> {
        let name_key = name.trim().to_lowercase();
        let mut conflict = None;
        self.store.scan(&mut |other| {
            if other.id == id || conflict.is_some() {
                return Ok(());
            }
            if other.code == code {
                conflict = Some(IndexError::duplicate("code", code));
            } else if other.name.trim().to_lowercase() == name_key {
                conflict = Some(IndexError::duplicate("name", name));
            }
            Ok(())
        })?;
        match conflict {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("indexer", &self.indexer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(id: &str, code: &str, name: &str) -> EntryDraft {
        EntryDraft::new(id, code, name)
    }

    #[test]
    fn create_indexes_and_persists() {
        let catalog = Catalog::in_memory();
        let entry = catalog
            .create(
                draft("p-1", "C1", "ADHESIVO CEMENTOSO MAPEI KERABOND PLUS")
                    .with_brand("Mapei")
                    .with_description("Pegante para porcelanato"),
            )
            .expect("create");

        assert!(entry.search_keywords.contains("kerabond"));
        assert!(entry.exact_search_terms.contains("porcelanato"));
        assert!(!entry.stemmed_keywords.is_empty());
        assert_eq!(catalog.get("p-1").expect("get"), Some(entry));
    }

    #[test]
    fn create_rejects_blank_and_duplicate_fields() {
        let catalog = Catalog::in_memory();
        assert!(matches!(
            catalog.create(draft("p-1", " ", "Broca")),
            Err(IndexError::InvalidEntry(_))
        ));

        catalog.create(draft("p-1", "C1", "Broca")).expect("create");
        assert!(matches!(
            catalog.create(draft("p-1", "C9", "Otra")),
            Err(IndexError::Duplicate { field, .. }) if field == "id"
        ));
        assert!(matches!(
            catalog.create(draft("p-2", "C1", "Otra")),
            Err(IndexError::Duplicate { field, .. }) if field == "code"
        ));
        assert!(matches!(
            catalog.create(draft("p-2", "C2", "BROCA")),
            Err(IndexError::Duplicate { field, .. }) if field == "name"
        ));
    }

    #[test]
    fn featured_only_update_leaves_derived_fields() {
        let catalog = Catalog::in_memory();
        let created = catalog
            .create(draft("p-1", "C1", "Varilla corrugada"))
            .expect("create");
        let updated = catalog
            .update("p-1", &EntryEdit::new().featured(true))
            .expect("update");

        assert!(updated.featured);
        assert_eq!(updated.index_fields(), created.index_fields());
        assert_eq!(updated.user_keywords, created.user_keywords);
    }

    #[test]
    fn name_update_reindexes_without_new_variants() {
        let catalog = Catalog::in_memory();
        let created = catalog
            .create(draft("p-1", "C1", "Varilla"))
            .expect("create");
        let updated = catalog
            .update("p-1", &EntryEdit::new().name("Alambre"))
            .expect("update");

        assert!(updated.search_keywords.contains("alambre"));
        // Variants generated at creation are part of user keywords and persist.
        assert!(updated.search_keywords.contains("barilla"));
        assert_eq!(updated.user_keywords, created.user_keywords);
        assert!(!updated.user_keywords.iter().any(|k| k == "alanbre"));
    }

    #[test]
    fn update_missing_entry_is_not_found() {
        let catalog = Catalog::in_memory();
        assert!(matches!(
            catalog.update("nope", &EntryEdit::new().featured(true)),
            Err(IndexError::NotFound(_))
        ));
    }

    #[test]
    fn update_into_existing_code_is_rejected() {
        let catalog = Catalog::in_memory();
        catalog.create(draft("p-1", "C1", "Broca")).expect("create");
        catalog.create(draft("p-2", "C2", "Taladro")).expect("create");
        assert!(matches!(
            catalog.update("p-2", &EntryEdit::new().code("C1")),
            Err(IndexError::Duplicate { .. })
        ));
    }

    #[test]
    fn delete_is_soft() {
        let catalog = Catalog::in_memory();
        let created = catalog.create(draft("p-1", "C1", "Broca")).expect("create");
        let deleted = catalog.delete("p-1").expect("delete");

        assert!(deleted.deleted);
        assert_eq!(deleted.index_fields(), created.index_fields());
        let stored = catalog.get("p-1").expect("get").expect("still stored");
        assert!(stored.deleted);
        assert!(matches!(catalog.delete("nope"), Err(IndexError::NotFound(_))));
    }
}
