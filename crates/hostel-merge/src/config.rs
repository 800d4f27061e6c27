use serde::{Deserialize, Serialize};

/// Configuration for a merge run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Collection holding hostel documents.
    pub hostels_collection: String,
    /// Collection holding room allocation documents.
    pub allocations_collection: String,
    /// Plan and report, but write nothing.
    pub dry_run: bool,
    /// Run the reconciliation validator after a committed merge.
    pub validate_after_merge: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            hostels_collection: "hostels".into(),
            allocations_collection: "roomAllocations".into(),
            dry_run: false,
            validate_after_merge: true,
        }
    }
}

impl MergeConfig {
    /// A configuration that never writes to the store.
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            ..Default::default()
        }
    }
}
