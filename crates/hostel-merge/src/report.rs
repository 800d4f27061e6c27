use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hostel_types::HostelId;
use serde::Serialize;
use uuid::Uuid;

use crate::allocations::AllocationUpdateReport;
use crate::group::GroupMerge;
use crate::grouping::DuplicateGroup;
use crate::validator::ValidationReport;

/// Summary of one processed duplicate group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    #[serde(flatten)]
    pub merge: GroupMerge,
    /// Members of the group queued for a full rewrite.
    pub queued_updates: usize,
    /// Members of the group queued for deletion.
    pub queued_deletes: usize,
}

impl GroupSummary {
    pub fn new(merge: GroupMerge) -> Self {
        let queued_deletes = merge.completely_merged.len();
        let queued_updates = merge.secondaries.len() + 1 - queued_deletes;
        Self {
            merge,
            queued_updates,
            queued_deletes,
        }
    }
}

/// Everything one merge run did, or would have done.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub dry_run: bool,
    /// The batch reached the store.
    pub committed: bool,
    pub hostels_loaded: usize,
    pub groups: Vec<GroupSummary>,
    pub successful_merges: usize,
    pub conflicts: usize,
    pub completely_merged: usize,
    pub partially_merged: usize,
    /// Secondary → primary, for every secondary of every group.
    pub merge_mapping: BTreeMap<HostelId, HostelId>,
    pub queued_updates: usize,
    pub queued_deletes: usize,
    pub allocations: AllocationUpdateReport,
    /// Present only when the validator ran.
    pub validation: Option<ValidationReport>,
}

impl RunReport {
    /// An empty report for a run starting now.
    pub fn start(dry_run: bool) -> Self {
        Self {
            run_id: Uuid::now_v7(),
            started_at: Utc::now(),
            dry_run,
            committed: false,
            hostels_loaded: 0,
            groups: Vec::new(),
            successful_merges: 0,
            conflicts: 0,
            completely_merged: 0,
            partially_merged: 0,
            merge_mapping: BTreeMap::new(),
            queued_updates: 0,
            queued_deletes: 0,
            allocations: AllocationUpdateReport::default(),
            validation: None,
        }
    }

    /// Fold one group's outcome into the run totals.
    pub fn record_group(&mut self, merge: GroupMerge) {
        self.successful_merges += merge.successful_merges;
        self.conflicts += merge.conflicts;
        self.completely_merged += merge.completely_merged.len();
        self.partially_merged += merge.partially_merged.len();
        for secondary in merge.secondary_ids() {
            self.merge_mapping
                .insert(secondary.clone(), merge.primary.clone());
        }
        self.groups.push(GroupSummary::new(merge));
    }

    pub fn is_noop(&self) -> bool {
        self.groups.is_empty()
    }
}

/// One hostel as listed by a scan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HostelSummary {
    pub id: HostelId,
    pub name: String,
    pub occupants: usize,
}

/// Read-only view of the store: every hostel and every duplicate group.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub hostels: Vec<HostelSummary>,
    pub groups: Vec<DuplicateGroup>,
}
