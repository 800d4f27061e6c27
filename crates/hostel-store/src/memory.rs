use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::batch::{WriteBatch, WriteOp};
use crate::error::{StoreError, StoreResult};
use crate::traits::{CommitSummary, DocumentStore};
use crate::Document;

/// Collection name → (document id → body).
pub(crate) type Collections = BTreeMap<String, BTreeMap<String, Document>>;

/// Merge `fields` into an existing document.
pub(crate) fn apply_update(
    collections: &mut Collections,
    collection: &str,
    id: &str,
    fields: Document,
) -> StoreResult<()> {
    let doc = collections
        .get_mut(collection)
        .and_then(|docs| docs.get_mut(id))
        .ok_or_else(|| StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        })?;
    for (key, value) in fields {
        doc.insert(key, value);
    }
    Ok(())
}

/// Replace the body of an existing document.
pub(crate) fn apply_replace(
    collections: &mut Collections,
    collection: &str,
    id: &str,
    document: Document,
) -> StoreResult<()> {
    let slot = collections
        .get_mut(collection)
        .and_then(|docs| docs.get_mut(id))
        .ok_or_else(|| StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        })?;
    *slot = document;
    Ok(())
}

/// Apply a whole batch to a copy of `current`. The caller swaps the copy in
/// only if every op succeeded.
pub(crate) fn apply_batch(
    current: &Collections,
    batch: WriteBatch,
) -> StoreResult<(Collections, CommitSummary)> {
    let mut next = current.clone();
    let mut summary = CommitSummary::default();
    for op in batch.into_ops() {
        match op {
            WriteOp::Update { target, fields } => {
                apply_update(&mut next, &target.collection, &target.id, fields)?;
                summary.updated += 1;
            }
            WriteOp::Replace { target, document } => {
                apply_replace(&mut next, &target.collection, &target.id, document)?;
                summary.updated += 1;
            }
            WriteOp::Delete { target } => {
                if let Some(docs) = next.get_mut(&target.collection) {
                    docs.remove(&target.id);
                }
                summary.deleted += 1;
            }
        }
    }
    Ok((next, summary))
}

/// In-memory, `BTreeMap`-based document store.
///
/// Intended for tests and embedding. Documents are cloned on read and write;
/// ids iterate in sorted order.
pub struct InMemoryDocumentStore {
    collections: RwLock<Collections>,
}

impl InMemoryDocumentStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(Collections::new()),
        }
    }

    /// Insert or replace a document.
    pub fn insert(&self, collection: &str, id: &str, document: Document) {
        self.collections
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
    }

    /// Read a single document.
    pub fn get(&self, collection: &str, id: &str) -> Option<Document> {
        self.collections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned()
    }

    /// Number of documents in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    /// Returns `true` if no collection holds any document.
    pub fn is_empty(&self) -> bool {
        self.collections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .all(BTreeMap::is_empty)
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn load_all(&self, collection: &str) -> StoreResult<Vec<(String, Document)>> {
        let collections = self.collections.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, doc)| (id.clone(), doc.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn update_one(&self, collection: &str, id: &str, fields: Document) -> StoreResult<()> {
        let mut collections = self.collections.write().map_err(|_| StoreError::LockPoisoned)?;
        apply_update(&mut collections, collection, id, fields)
    }

    fn commit(&self, batch: WriteBatch) -> StoreResult<CommitSummary> {
        let mut collections = self.collections.write().map_err(|_| StoreError::LockPoisoned)?;
        let (next, summary) = apply_batch(&collections, batch)?;
        *collections = next;
        debug!(updated = summary.updated, deleted = summary.deleted, "batch committed");
        Ok(summary)
    }
}

impl std::fmt::Debug for InMemoryDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let collections = self.collections.read().unwrap_or_else(PoisonError::into_inner);
        let counts: BTreeMap<&str, usize> = collections
            .iter()
            .map(|(name, docs)| (name.as_str(), docs.len()))
            .collect();
        f.debug_struct("InMemoryDocumentStore")
            .field("collections", &counts)
            .finish()
    }
}
