//! Merge engine for duplicate hostels.
//!
//! Hostels that share a name are grouped, the busiest member of each group
//! becomes its primary, and every other member is merged into it room by
//! room. The resulting writes are committed as one atomic batch. Room
//! allocations of deleted hostels are then redirected, and a final pass
//! reconciles every allocation against the occupant lists.
//!
//! [`MergeEngine`] drives a full run; the stages are public for callers that
//! need only part of it.

pub mod allocations;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod group;
pub mod grouping;
pub mod occupancy;
pub mod plan;
pub mod primary;
pub mod report;
pub mod room_merge;
pub mod validator;

#[cfg(test)]
mod testing;

pub use allocations::{redirect_allocations, AllocationUpdateReport, Redirect, SkippedAllocation};
pub use catalog::HostelCatalog;
pub use config::MergeConfig;
pub use engine::{MergeEngine, MergeOutcome};
pub use error::{MergeError, MergeResult};
pub use group::{merge_group, GroupMerge};
pub use grouping::{find_duplicate_groups, DuplicateGroup};
pub use occupancy::occupant_count;
pub use plan::{build_plan, MergePlan};
pub use primary::select_primary;
pub use report::{GroupSummary, HostelSummary, RunReport, ScanReport};
pub use room_merge::{
    classify, merge_rooms, ConflictKind, MergeClassification, RoomOutcome, RoomStatus,
    SecondaryMerge,
};
pub use validator::{
    check_allocation, validate_allocations, AllocationCheck, AllocationStatus, GroundTruth,
    Placement, ValidationReport,
};

// Re-export the data model and store so callers need only this crate.
pub use hostel_store::{DocumentStore, InMemoryDocumentStore, JsonFileStore};
pub use hostel_types::{Hostel, HostelId, Room, RoomAllocation, StudentId};
