use hostel_types::{Hostel, Room};

/// Total number of students housed in `hostel`, across every floor and room.
///
/// Always recomputed from the rooms; never cached across a merge step.
pub fn occupant_count(hostel: &Hostel) -> usize {
    hostel.rooms().map(Room::occupant_count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostel_types::Floor;

    #[test]
    fn empty_hostel_has_no_occupants() {
        let hostel = Hostel::new("h", "Empty", vec![]);
        assert_eq!(occupant_count(&hostel), 0);
    }

    #[test]
    fn counts_across_floors_and_rooms() {
        let hostel = Hostel::new(
            "h",
            "Busy",
            vec![
                Floor::new(vec![
                    Room::new("r1", "101", 4).with_occupants(["a", "b"]),
                    Room::new("r2", "102", 4),
                ]),
                Floor::new(vec![Room::new("r3", "201", 2).with_occupants(["c"])]),
            ],
        );
        assert_eq!(occupant_count(&hostel), 3);
    }

    #[test]
    fn reflects_room_mutation() {
        let mut hostel = Hostel::new(
            "h",
            "Mut",
            vec![Floor::new(vec![Room::new("r1", "1", 3).with_occupants(["a"])])],
        );
        hostel.room_by_number_mut("1").unwrap().add_occupant("b".into());
        assert_eq!(occupant_count(&hostel), 2);
    }
}
