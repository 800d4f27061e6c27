use hostel_types::HostelId;
use serde::Serialize;
use tracing::info;

use crate::catalog::HostelCatalog;
use crate::error::{MergeError, MergeResult};
use crate::grouping::DuplicateGroup;
use crate::primary::select_primary;
use crate::room_merge::{merge_rooms, MergeClassification, SecondaryMerge};

/// Outcome of merging one duplicate group into its primary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupMerge {
    pub name: String,
    pub primary: HostelId,
    /// Students relocated into the primary across all secondaries.
    pub successful_merges: usize,
    /// Room conflicts across all secondaries.
    pub conflicts: usize,
    pub completely_merged: Vec<HostelId>,
    pub partially_merged: Vec<HostelId>,
    pub not_merged: Vec<HostelId>,
    /// Per-secondary detail, in group order.
    pub secondaries: Vec<SecondaryMerge>,
}

impl GroupMerge {
    /// Every secondary id of the group, in group order.
    pub fn secondary_ids(&self) -> impl Iterator<Item = &HostelId> {
        self.secondaries.iter().map(|s| &s.secondary)
    }
}

/// Select the group's primary and merge every other member into it, in the
/// group's id order. Conflicts are recorded, never retried.
pub fn merge_group(catalog: &mut HostelCatalog, group: &DuplicateGroup) -> MergeResult<GroupMerge> {
    let counts = group
        .ids
        .iter()
        .map(|id| {
            catalog
                .occupancy(id)
                .map(|count| (id, count))
                .ok_or_else(|| MergeError::UnknownHostel(id.clone()))
        })
        .collect::<MergeResult<Vec<_>>>()?;
    let primary = select_primary(&group.name, counts)?.clone();

    info!(group = %group.name, primary = %primary, members = group.len(), "merging duplicate group");

    let mut result = GroupMerge {
        name: group.name.clone(),
        primary: primary.clone(),
        successful_merges: 0,
        conflicts: 0,
        completely_merged: Vec::new(),
        partially_merged: Vec::new(),
        not_merged: Vec::new(),
        secondaries: Vec::new(),
    };

    for id in group.ids.iter().filter(|id| **id != primary) {
        let (target, source) = catalog.pair_mut(&primary, id)?;
        let merge = merge_rooms(target, source);

        result.successful_merges += merge.merged_occupants;
        result.conflicts += merge.conflicts;
        match merge.classification {
            MergeClassification::CompletelyMerged => result.completely_merged.push(id.clone()),
            MergeClassification::PartiallyMerged => result.partially_merged.push(id.clone()),
            MergeClassification::NotMerged => result.not_merged.push(id.clone()),
        }
        info!(
            secondary = %id,
            merged = merge.merged_occupants,
            conflicts = merge.conflicts,
            result = merge.classification.label(),
            "secondary processed"
        );
        result.secondaries.push(merge);
    }

    Ok(result)
}
