//! Fixtures shared by the unit tests of this crate.

use std::collections::HashSet;

use hostel_store::{
    CommitSummary, Document, DocumentStore, InMemoryDocumentStore, StoreError, StoreResult,
    WriteBatch,
};
use hostel_types::{Floor, Hostel, Room, RoomAllocation};

/// A room with no id; [`hostel`] assigns `<hostel>-<number>`.
pub fn room(number: &str, capacity: u32, occupants: &[&str]) -> Room {
    Room::new("", number, capacity).with_occupants(occupants.iter().copied())
}

/// A single-floor hostel.
pub fn hostel(id: &str, name: &str, rooms: Vec<Room>) -> Hostel {
    let rooms = rooms
        .into_iter()
        .map(|mut r| {
            if r.id.is_empty() {
                r.id = format!("{id}-{}", r.number).into();
            }
            r
        })
        .collect();
    Hostel::new(id, name, vec![Floor::new(rooms)])
}

pub fn seed_hostel(store: &InMemoryDocumentStore, hostel: &Hostel) {
    store.insert("hostels", hostel.id().as_str(), hostel.to_document().unwrap());
}

pub fn seed_allocation(store: &InMemoryDocumentStore, allocation: &RoomAllocation) {
    store.insert(
        "roomAllocations",
        allocation.id().as_str(),
        allocation.to_document().unwrap(),
    );
}

pub fn stored_allocation(store: &InMemoryDocumentStore, id: &str) -> RoomAllocation {
    RoomAllocation::from_document(id, store.get("roomAllocations", id).unwrap()).unwrap()
}

/// In-memory store with injectable failures.
#[derive(Debug, Default)]
pub struct FlakyStore {
    pub inner: InMemoryDocumentStore,
    /// `update_one` fails for these document ids.
    pub failing_updates: HashSet<String>,
    /// `query_by_field` fails when matching this value.
    pub failing_query_value: Option<String>,
    pub fail_commit: bool,
}

impl FlakyStore {
    pub fn new(inner: InMemoryDocumentStore) -> Self {
        Self {
            inner,
            ..Default::default()
        }
    }
}

impl DocumentStore for FlakyStore {
    fn load_all(&self, collection: &str) -> StoreResult<Vec<(String, Document)>> {
        self.inner.load_all(collection)
    }

    fn update_one(&self, collection: &str, id: &str, fields: Document) -> StoreResult<()> {
        if self.failing_updates.contains(id) {
            return Err(StoreError::WriteRejected {
                collection: collection.to_string(),
                id: id.to_string(),
                reason: "injected failure".into(),
            });
        }
        self.inner.update_one(collection, id, fields)
    }

    fn commit(&self, batch: WriteBatch) -> StoreResult<CommitSummary> {
        if self.fail_commit {
            return Err(StoreError::WriteRejected {
                collection: "*".into(),
                id: "*".into(),
                reason: "injected commit failure".into(),
            });
        }
        self.inner.commit(batch)
    }

    fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &serde_json::Value,
    ) -> StoreResult<Vec<(String, Document)>> {
        if let Some(failing) = &self.failing_query_value {
            if value.as_str() == Some(failing.as_str()) {
                return Err(StoreError::WriteRejected {
                    collection: collection.to_string(),
                    id: failing.clone(),
                    reason: "injected query failure".into(),
                });
            }
        }
        self.inner.query_by_field(collection, field, value)
    }
}
