//! Foundation types for hostel merging.
//!
//! This crate provides the typed records that the merge engine operates on.
//! Every other hostel crate depends on `hostel-types`.
//!
//! # Key Types
//!
//! - [`Hostel`]: Top-level container, the unit of duplicate detection
//! - [`Floor`]: Ordered grouping of rooms within a hostel
//! - [`Room`]: Capacity-bounded holder of student occupants
//! - [`RoomAllocation`]: Denormalized pointer from a student to a hostel/room
//! - [`HostelId`], [`RoomId`], [`StudentId`], [`AllocationId`]: Opaque identifiers
//!
//! Records are decoded from and encoded to JSON documents
//! (`serde_json::Map<String, Value>`). Fields the engine does not model are
//! carried through untouched so a full rewrite never drops data.

pub mod allocation;
pub mod error;
pub mod hostel;
pub mod identity;

pub use allocation::RoomAllocation;
pub use error::TypeError;
pub use hostel::{Floor, Hostel, Room};
pub use identity::{AllocationId, HostelId, RoomId, StudentId};

/// A JSON document as stored in a collection.
pub type Document = serde_json::Map<String, serde_json::Value>;
