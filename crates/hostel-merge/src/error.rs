use hostel_store::StoreError;
use hostel_types::{HostelId, TypeError};
use thiserror::Error;

/// Fatal errors of a merge run.
///
/// Per-room conflicts and per-record allocation problems are not errors;
/// they are recorded in the run report.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The primary selector was given no candidates.
    #[error("duplicate group '{name}' has no members")]
    EmptyGroup { name: String },

    /// A group references a hostel that is not loaded.
    #[error("hostel not loaded: {0}")]
    UnknownHostel(HostelId),

    /// A hostel cannot be merged into itself.
    #[error("hostel {0} cannot be merged into itself")]
    SelfMerge(HostelId),

    /// A hostel document could not be decoded or encoded.
    #[error("record error: {0}")]
    Record(#[from] TypeError),

    /// Loading from the store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The atomic batch commit failed; nothing was written.
    #[error("batch commit failed: {0}")]
    Commit(#[source] StoreError),
}

pub type MergeResult<T> = Result<T, MergeError>;
