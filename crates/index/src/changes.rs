//! Explicit change tracking for the indexing trigger.
//!
//! Derived keyword sets are recomputed iff an entry is new or one of the four
//! indexed source fields changed. Instead of relying on a store's dirty flags
//! the write path diffs the persisted entry against the proposed one and
//! carries the result in a [`WriteKind`].

use serde::{Deserialize, Serialize};

use crate::entry::CatalogEntry;

/// One flag per field the indexing pipeline reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFields {
    pub name: bool,
    pub description: bool,
    pub brand: bool,
    pub user_keywords: bool,
}

impl ChangedFields {
    /// Diff the indexed source fields of two versions of an entry.
    pub fn between(previous: &CatalogEntry, proposed: &CatalogEntry) -> Self {
        Self {
            name: previous.name != proposed.name,
            description: previous.description != proposed.description,
            brand: previous.brand != proposed.brand,
            user_keywords: previous.user_keywords != proposed.user_keywords,
        }
    }

    pub fn all() -> Self {
        Self {
            name: true,
            description: true,
            brand: true,
            user_keywords: true,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn any(&self) -> bool {
        self.name || self.description || self.brand || self.user_keywords
    }
}

/// What kind of write is being indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteKind {
    Create,
    Update(ChangedFields),
}

impl WriteKind {
    /// Recompute derived sets on create, or on an update touching an indexed field.
    pub fn needs_reindex(&self) -> bool {
        match self {
            WriteKind::Create => true,
            WriteKind::Update(changed) => changed.any(),
        }
    }

    /// Name variants are generated once, at creation.
    pub fn expands_variants(&self) -> bool {
        matches!(self, WriteKind::Create)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WriteKind::Create => "create",
            WriteKind::Update(_) => "update",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{EntryDraft, EntryEdit};

    fn entry() -> CatalogEntry {
        EntryDraft::new("p-1", "C1", "Varilla corrugada")
            .with_description("acero")
            .with_brand("Acesco")
            .with_user_keywords(["hierro"])
            .into_entry()
    }

    #[test]
    fn untracked_fields_do_not_count_as_changes() {
        let before = entry();
        let after = EntryEdit::new()
            .featured(true)
            .available_stock(10)
            .categories(["construccion"])
            .code("C2")
            .apply_to(&before);
        let changed = ChangedFields::between(&before, &after);
        assert_eq!(changed, ChangedFields::none());
        assert!(!WriteKind::Update(changed).needs_reindex());
    }

    #[test]
    fn each_tracked_field_is_detected() {
        let before = entry();
        let cases = [
            (EntryEdit::new().name("Varilla lisa"), ChangedFields { name: true, ..Default::default() }),
            (EntryEdit::new().description("hierro"), ChangedFields { description: true, ..Default::default() }),
            (EntryEdit::new().brand("Gerdau"), ChangedFields { brand: true, ..Default::default() }),
            (EntryEdit::new().user_keywords(["acero"]), ChangedFields { user_keywords: true, ..Default::default() }),
        ];
        for (edit, expected) in cases {
            let changed = ChangedFields::between(&before, &edit.apply_to(&before));
            assert_eq!(changed, expected);
            assert!(WriteKind::Update(changed).needs_reindex());
        }
    }

    #[test]
    fn rewriting_the_same_value_is_not_a_change() {
        let before = entry();
        let after = EntryEdit::new().name("Varilla corrugada").apply_to(&before);
        assert!(!ChangedFields::between(&before, &after).any());
    }

    #[test]
    fn only_create_expands_variants() {
        assert!(WriteKind::Create.needs_reindex());
        assert!(WriteKind::Create.expands_variants());
        assert!(!WriteKind::Update(ChangedFields::all()).expands_variants());
    }
}
