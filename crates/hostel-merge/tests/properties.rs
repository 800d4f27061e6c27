//! Property tests for the room merge.
//!
//! 1. Capacity: a merge never pushes a primary room past its capacity.
//! 2. Conservation: no student is lost or duplicated across the pair.
//! 3. Idempotence: merging the same pair twice changes nothing the second time.
//! 4. Classification agrees with the occupant counts.

use std::collections::BTreeSet;

use hostel_merge::{merge_rooms, occupant_count, MergeClassification, RoomStatus};
use hostel_types::{Floor, Hostel, Room};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// (room number, capacity, occupants) for up to five rooms numbered 1..=6.
fn rooms_strategy() -> impl Strategy<Value = Vec<(u8, u32, usize)>> {
    prop::collection::vec((1u8..=6, 0u32..=6, 0usize..=6), 0..=5)
}

fn build(id: &str, rooms: &[(u8, u32, usize)]) -> Hostel {
    let rooms = rooms
        .iter()
        .enumerate()
        .map(|(slot, &(number, capacity, occupants))| {
            Room::new(format!("{id}-r{slot}"), number.to_string(), capacity).with_occupants(
                (0..occupants).map(|i| format!("{id}-{slot}-{i}")),
            )
        })
        .collect();
    Hostel::new(id, "Dup", vec![Floor::new(rooms)])
}

fn students(hostel: &Hostel) -> Vec<String> {
    hostel
        .rooms()
        .flat_map(|r| r.occupants().iter().map(|s| s.to_string()))
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Capacity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn merge_never_overfills(p in rooms_strategy(), s in rooms_strategy()) {
        let mut primary = build("p", &p);
        let mut secondary = build("s", &s);
        let before: Vec<usize> = primary.rooms().map(Room::occupant_count).collect();

        let result = merge_rooms(&mut primary, &mut secondary);

        for outcome in &result.rooms {
            if let RoomStatus::Merged { target_occupants, capacity, .. } = outcome.status {
                prop_assert!(target_occupants <= capacity as usize);
            }
        }
        for (room, was) in primary.rooms().zip(before) {
            prop_assert!(room.occupant_count() == was || room.occupant_count() <= room.capacity as usize);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Conservation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn merge_conserves_students(p in rooms_strategy(), s in rooms_strategy()) {
        let mut primary = build("p", &p);
        let mut secondary = build("s", &s);
        let mut before: Vec<String> = students(&primary);
        before.extend(students(&secondary));
        before.sort();

        merge_rooms(&mut primary, &mut secondary);

        let mut after: Vec<String> = students(&primary);
        after.extend(students(&secondary));
        after.sort();
        prop_assert_eq!(&before, &after);

        let unique: BTreeSet<&String> = after.iter().collect();
        prop_assert_eq!(unique.len(), after.len(), "a student is housed twice");
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn second_merge_is_a_noop(p in rooms_strategy(), s in rooms_strategy()) {
        let mut primary = build("p", &p);
        let mut secondary = build("s", &s);
        merge_rooms(&mut primary, &mut secondary);
        let primary_once = primary.clone();
        let secondary_once = secondary.clone();

        let again = merge_rooms(&mut primary, &mut secondary);

        prop_assert_eq!(primary, primary_once);
        prop_assert_eq!(secondary, secondary_once);
        prop_assert_eq!(again.merged_occupants, 0);
    }

    #[test]
    fn shared_student_is_never_duplicated(capacity in 1u32..=6) {
        let mut primary = Hostel::new(
            "p",
            "Dup",
            vec![Floor::new(vec![Room::new("p1", "1", capacity).with_occupants(["shared"])])],
        );
        let mut secondary = Hostel::new(
            "s",
            "Dup",
            vec![Floor::new(vec![Room::new("s1", "1", capacity).with_occupants(["shared"])])],
        );

        merge_rooms(&mut primary, &mut secondary);

        prop_assert_eq!(occupant_count(&primary), 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Classification
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn classification_matches_counts(p in rooms_strategy(), s in rooms_strategy()) {
        let mut primary = build("p", &p);
        let mut secondary = build("s", &s);

        let result = merge_rooms(&mut primary, &mut secondary);

        prop_assert_eq!(result.initial_occupants, result.remaining_occupants + result.merged_occupants);
        prop_assert_eq!(result.remaining_occupants, occupant_count(&secondary));
        prop_assert_eq!(
            result.conflicts,
            result.rooms.iter().filter(|r| r.status.is_conflict()).count()
        );
        let expected = if result.remaining_occupants == 0 && result.conflicts == 0 {
            MergeClassification::CompletelyMerged
        } else if result.remaining_occupants < result.initial_occupants {
            MergeClassification::PartiallyMerged
        } else {
            MergeClassification::NotMerged
        };
        prop_assert_eq!(result.classification, expected);
    }
}
