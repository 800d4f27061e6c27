//! Room-by-room merge of one secondary hostel into a primary.
//!
//! Every occupied room of the secondary is matched to the primary room with
//! the same number. The occupants move only if the combined count fits the
//! primary room's capacity; otherwise the room is recorded as a conflict and
//! both sides stay exactly as they were. Empty rooms are skipped silently.

use hostel_types::{Hostel, HostelId};
use serde::Serialize;
use tracing::{debug, warn};

use crate::occupancy::occupant_count;

/// Why a room could not be merged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ConflictKind {
    /// The primary has no room with this number.
    NoMatchingRoom,
    /// Moving the occupants would overfill the primary room.
    CapacityExceeded,
}

/// Result for one occupied secondary room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RoomStatus {
    Merged {
        /// Students newly added to the primary room.
        moved: usize,
        /// Students that were already in the primary room.
        already_present: usize,
        /// Primary room occupancy after the merge.
        target_occupants: usize,
        capacity: u32,
    },
    Conflict {
        kind: ConflictKind,
        /// Primary room occupancy, when a matching room exists.
        target_occupants: Option<usize>,
        capacity: Option<u32>,
    },
}

impl RoomStatus {
    pub fn is_conflict(&self) -> bool {
        matches!(self, RoomStatus::Conflict { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoomOutcome {
    pub room_number: String,
    /// Occupants of the secondary room before the merge.
    pub source_occupants: usize,
    pub status: RoomStatus,
}

/// How much of a secondary hostel ended up in the primary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MergeClassification {
    /// Nothing left behind and no conflicts; the hostel may be deleted.
    CompletelyMerged,
    /// Some occupants moved, some remain.
    PartiallyMerged,
    /// Nothing moved.
    NotMerged,
}

impl MergeClassification {
    pub fn label(&self) -> &'static str {
        match self {
            MergeClassification::CompletelyMerged => "COMPLETELY MERGED",
            MergeClassification::PartiallyMerged => "PARTIALLY MERGED",
            MergeClassification::NotMerged => "NOT MERGED",
        }
    }
}

/// Classify a secondary from its occupant counts before and after merging.
pub fn classify(initial: usize, remaining: usize, conflicts: usize) -> MergeClassification {
    if remaining == 0 && conflicts == 0 {
        MergeClassification::CompletelyMerged
    } else if remaining < initial {
        MergeClassification::PartiallyMerged
    } else {
        MergeClassification::NotMerged
    }
}

/// Outcome of merging one secondary hostel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SecondaryMerge {
    pub secondary: HostelId,
    pub initial_occupants: usize,
    pub remaining_occupants: usize,
    /// Secondary occupants relocated into the primary.
    pub merged_occupants: usize,
    pub conflicts: usize,
    /// One entry per occupied secondary room, in floor/room order.
    pub rooms: Vec<RoomOutcome>,
    pub classification: MergeClassification,
}

/// Merge the rooms of `secondary` into `primary`, mutating both in place.
pub fn merge_rooms(primary: &mut Hostel, secondary: &mut Hostel) -> SecondaryMerge {
    let initial_occupants = occupant_count(secondary);
    let mut merged_occupants = 0;
    let mut conflicts = 0;
    let mut rooms = Vec::new();

    for source in secondary.rooms_mut() {
        if source.is_empty() {
            continue;
        }
        let source_occupants = source.occupant_count();

        let status = match primary.room_by_number_mut(&source.number) {
            None => {
                conflicts += 1;
                warn!(room = %source.number, occupants = source_occupants, "no matching room in primary");
                RoomStatus::Conflict {
                    kind: ConflictKind::NoMatchingRoom,
                    target_occupants: None,
                    capacity: None,
                }
            }
            Some(target) => {
                let target_occupants = target.occupant_count();
                if target_occupants + source_occupants > target.capacity as usize {
                    conflicts += 1;
                    warn!(
                        room = %source.number,
                        source = source_occupants,
                        target = target_occupants,
                        capacity = target.capacity,
                        "merge would exceed room capacity"
                    );
                    RoomStatus::Conflict {
                        kind: ConflictKind::CapacityExceeded,
                        target_occupants: Some(target_occupants),
                        capacity: Some(target.capacity),
                    }
                } else {
                    let mut moved = 0;
                    let mut already_present = 0;
                    for student in source.take_occupants() {
                        if target.add_occupant(student) {
                            moved += 1;
                        } else {
                            already_present += 1;
                        }
                    }
                    merged_occupants += source_occupants;
                    debug!(room = %source.number, moved, already_present, "room merged");
                    RoomStatus::Merged {
                        moved,
                        already_present,
                        target_occupants: target.occupant_count(),
                        capacity: target.capacity,
                    }
                }
            }
        };

        rooms.push(RoomOutcome {
            room_number: source.number.clone(),
            source_occupants,
            status,
        });
    }

    let remaining_occupants = occupant_count(secondary);
    SecondaryMerge {
        secondary: secondary.id().clone(),
        initial_occupants,
        remaining_occupants,
        merged_occupants,
        conflicts,
        rooms,
        classification: classify(initial_occupants, remaining_occupants, conflicts),
    }
}
