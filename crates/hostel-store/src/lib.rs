//! Document store adapter for hostel merging.
//!
//! The merge engine treats persistence as an abstract transactional document
//! store: named collections of JSON documents keyed by opaque string ids.
//!
//! # Operations
//!
//! - `load_all`: every document of a collection, ordered by id
//! - `query_by_field`: documents whose top-level field equals a value
//! - `commit`: apply a [`WriteBatch`] of updates and deletes atomically
//! - `update_one`: single-document field update, outside any batch
//!
//! # Backends
//!
//! All backends implement the [`DocumentStore`] trait:
//!
//! - [`InMemoryDocumentStore`]: `BTreeMap`-based store for tests and embedding
//! - [`JsonFileStore`]: single JSON file, rewritten atomically on every write
//!
//! # Design Rules
//!
//! 1. Updates merge top-level fields into an existing document; updating a
//!    missing document is an error.
//! 2. A batch commit is all-or-nothing.
//! 3. Deleting a missing document is a no-op.
//! 4. The store never interprets document contents.

pub mod batch;
pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use batch::{DocumentRef, WriteBatch, WriteOp};
pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::InMemoryDocumentStore;
pub use traits::{CommitSummary, DocumentStore};

/// A JSON document body.
pub type Document = serde_json::Map<String, serde_json::Value>;
