use std::fmt;

use crate::Document;

/// Address of a single document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentRef {
    pub collection: String,
    pub id: String,
}

impl DocumentRef {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// One queued write.
#[derive(Clone, Debug, PartialEq)]
pub enum WriteOp {
    /// Merge `fields` into the existing document's top level.
    Update { target: DocumentRef, fields: Document },
    /// Replace the existing document's whole body.
    Replace { target: DocumentRef, document: Document },
    /// Remove the document.
    Delete { target: DocumentRef },
}

impl WriteOp {
    pub fn target(&self) -> &DocumentRef {
        match self {
            WriteOp::Update { target, .. }
            | WriteOp::Replace { target, .. }
            | WriteOp::Delete { target } => target,
        }
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, WriteOp::Delete { .. })
    }
}

/// An ordered queue of writes, applied all-or-nothing by
/// [`DocumentStore::commit`](crate::DocumentStore::commit).
///
/// The queue is write-only: nothing is visible in the store until commit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a top-level field merge into `target`.
    pub fn update(&mut self, target: DocumentRef, fields: Document) -> &mut Self {
        self.ops.push(WriteOp::Update { target, fields });
        self
    }

    /// Queue a full rewrite of `target`. Fields absent from `document` are
    /// dropped.
    pub fn set(&mut self, target: DocumentRef, document: Document) -> &mut Self {
        self.ops.push(WriteOp::Replace { target, document });
        self
    }

    /// Queue removal of `target`.
    pub fn delete(&mut self, target: DocumentRef) -> &mut Self {
        self.ops.push(WriteOp::Delete { target });
        self
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn update_count(&self) -> usize {
        self.ops.iter().filter(|op| !op.is_delete()).count()
    }

    pub fn delete_count(&self) -> usize {
        self.ops.iter().filter(|op| op.is_delete()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_counts_ops_by_kind() {
        let mut batch = WriteBatch::new();
        assert!(batch.is_empty());

        batch
            .update(DocumentRef::new("hostels", "a"), Document::new())
            .set(DocumentRef::new("hostels", "b"), Document::new())
            .delete(DocumentRef::new("hostels", "c"));

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.update_count(), 2);
        assert_eq!(batch.delete_count(), 1);
        assert_eq!(batch.ops()[2].target().id, "c");
        assert!(matches!(batch.ops()[1], WriteOp::Replace { .. }));
    }

    #[test]
    fn document_ref_display() {
        assert_eq!(DocumentRef::new("roomAllocations", "x1").to_string(), "roomAllocations/x1");
    }
}
