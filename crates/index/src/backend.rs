use std::collections::HashMap;
use std::sync::RwLock;

use crate::entry::CatalogEntry;
use crate::IndexError;

/// Document store holding catalog entries keyed by id.
///
/// The search engine only needs full scans; a real document database would
/// evaluate the predicate and score expressions itself. Implementations must
/// make single-entry writes atomic.
pub trait CatalogStore: Send + Sync {
    /// Insert or replace an entry under its id.
    fn put(&self, entry: &CatalogEntry) -> Result<(), IndexError>;
    /// Retrieve an entry by id.
    fn get(&self, id: &str) -> Result<Option<CatalogEntry>, IndexError>;
    /// Hard-remove an entry. The catalog service itself only soft-deletes.
    fn delete(&self, id: &str) -> Result<(), IndexError>;
    /// Visit every stored entry, in no particular order.
    fn scan(
        &self,
        visitor: &mut dyn FnMut(&CatalogEntry) -> Result<(), IndexError>,
    ) -> Result<(), IndexError>;
    /// Flush any buffered writes.
    fn flush(&self) -> Result<(), IndexError> {
        Ok(())
    }
}

/// An in-memory store using a `RwLock` around a `HashMap`.
///
/// Entries are kept serialized as JSON, the same shape a document database
/// would persist, so a round trip through the store exercises the serde
/// field names.
pub struct InMemoryStore {
    records: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored entries, soft-deleted ones included.
    pub fn len(&self) -> Result<usize, IndexError> {
        Ok(self
            .records
            .read()
            .map_err(|_| IndexError::backend("poisoned lock"))?
            .len())
    }

    pub fn is_empty(&self) -> Result<bool, IndexError> {
        Ok(self.len()? == 0)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn encode(entry: &CatalogEntry) -> Result<Vec<u8>, IndexError> {
    serde_json::to_vec(entry).map_err(|e| IndexError::Encode(e.to_string()))
}

fn decode(data: &[u8]) -> Result<CatalogEntry, IndexError> {
    serde_json::from_slice(data).map_err(|e| IndexError::Decode(e.to_string()))
}

impl CatalogStore for InMemoryStore {
    fn put(&self, entry: &CatalogEntry) -> Result<(), IndexError> {
        let payload = encode(entry)?;
        self.records
            .write()
            .map_err(|_| IndexError::backend("poisoned lock"))?
            .insert(entry.id.clone(), payload);
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<CatalogEntry>, IndexError> {
        let guard = self
            .records
            .read()
            .map_err(|_| IndexError::backend("poisoned lock"))?;
        guard.get(id).map(|data| decode(data)).transpose()
    }

    fn delete(&self, id: &str) -> Result<(), IndexError> {
        self.records
            .write()
            .map_err(|_| IndexError::backend("poisoned lock"))?
            .remove(id);
        Ok(())
    }

    fn scan(
        &self,
        visitor: &mut dyn FnMut(&CatalogEntry) -> Result<(), IndexError>,
    ) -> Result<(), IndexError> {
        // The read lock is held for the whole scan; writers wait.
        let guard = self
            .records
            .read()
            .map_err(|_| IndexError::backend("poisoned lock"))?;
        for data in guard.values() {
            visitor(&decode(data)?)?;
        }
        Ok(())
    }
}
