use serde_json::Value;

use crate::batch::WriteBatch;
use crate::error::StoreResult;
use crate::Document;

/// Counts of what a committed batch changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CommitSummary {
    pub updated: usize,
    pub deleted: usize,
}

/// Transactional document store.
///
/// All implementations must satisfy these invariants:
/// - `load_all` and `query_by_field` return documents ordered by id, so
///   callers see a stable order for the same store contents.
/// - `commit` applies every queued op or none of them.
/// - Updates merge top-level fields and fail on a missing document.
/// - All backend errors are propagated, never silently ignored.
pub trait DocumentStore: Send + Sync {
    /// Every document in `collection` as `(id, body)` pairs.
    ///
    /// A collection that was never written is empty, not an error.
    fn load_all(&self, collection: &str) -> StoreResult<Vec<(String, Document)>>;

    /// Merge `fields` into one document, outside any batch.
    fn update_one(&self, collection: &str, id: &str, fields: Document) -> StoreResult<()>;

    /// Apply a batch atomically.
    fn commit(&self, batch: WriteBatch) -> StoreResult<CommitSummary>;

    /// Documents whose top-level `field` equals `value`.
    ///
    /// Default implementation filters `load_all()`. Backends with an index
    /// should override.
    fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<(String, Document)>> {
        Ok(self
            .load_all(collection)?
            .into_iter()
            .filter(|(_, doc)| doc.get(field) == Some(value))
            .collect())
    }

    /// Start an empty operation queue.
    fn batch(&self) -> WriteBatch {
        WriteBatch::new()
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn load_all(&self, collection: &str) -> StoreResult<Vec<(String, Document)>> {
        (**self).load_all(collection)
    }

    fn update_one(&self, collection: &str, id: &str, fields: Document) -> StoreResult<()> {
        (**self).update_one(collection, id, fields)
    }

    fn commit(&self, batch: WriteBatch) -> StoreResult<CommitSummary> {
        (**self).commit(batch)
    }

    fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<(String, Document)>> {
        (**self).query_by_field(collection, field, value)
    }
}
