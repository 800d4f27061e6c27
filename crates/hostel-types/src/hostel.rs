//! Hostel, floor, and room records.
//!
//! A [`Hostel`] is a three-level hierarchy: hostel → floors → rooms. Rooms
//! hold the ground truth of which student lives where. The typed records keep
//! two invariants at construction time:
//!
//! - a room's occupant list never contains the same student twice;
//! - `isAvailable` is true when the room is empty or has a free bed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TypeError;
use crate::identity::{HostelId, RoomId, StudentId};
use crate::Document;

/// Fields that exist only in memory and are never written back.
pub const TRANSIENT_FIELDS: &[&str] = &["id", "occupant_count"];

/// Name given to hostels stored without one.
pub const UNNAMED: &str = "Unnamed";

fn unnamed() -> String {
    UNNAMED.to_string()
}

/// A hostel document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hostel {
    /// Document id. Not part of the stored body.
    #[serde(skip)]
    id: HostelId,
    /// Display name; the duplicate-detection key.
    #[serde(default = "unnamed")]
    pub name: String,
    #[serde(default)]
    pub floors: Vec<Floor>,
    /// Fields not modelled by the merge engine.
    #[serde(flatten)]
    pub extra: Document,
}

impl Hostel {
    /// Create a hostel from its parts, normalizing every room.
    pub fn new(id: impl Into<HostelId>, name: impl Into<String>, floors: Vec<Floor>) -> Self {
        let mut hostel = Self {
            id: id.into(),
            name: name.into(),
            floors,
            extra: Document::new(),
        };
        hostel.normalize();
        hostel
    }

    /// Decode a stored document.
    pub fn from_document(id: impl Into<HostelId>, document: Document) -> Result<Self, TypeError> {
        let id = id.into();
        let mut hostel: Hostel =
            serde_json::from_value(Value::Object(document)).map_err(|e| TypeError::Decode {
                kind: "hostel",
                id: id.to_string(),
                reason: e.to_string(),
            })?;
        hostel.id = id;
        hostel.normalize();
        Ok(hostel)
    }

    /// Encode the full document body, with transient fields stripped.
    pub fn to_document(&self) -> Result<Document, TypeError> {
        let value = serde_json::to_value(self).map_err(|e| TypeError::Encode {
            kind: "hostel",
            id: self.id.to_string(),
            reason: e.to_string(),
        })?;
        let Value::Object(mut document) = value else {
            return Err(TypeError::NotAnObject {
                id: self.id.to_string(),
            });
        };
        for field in TRANSIENT_FIELDS {
            document.remove(*field);
        }
        Ok(document)
    }

    pub fn id(&self) -> &HostelId {
        &self.id
    }

    /// All rooms, floor by floor, in stored order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.floors.iter().flat_map(|floor| floor.rooms.iter())
    }

    /// All rooms, mutably, floor by floor, in stored order.
    pub fn rooms_mut(&mut self) -> impl Iterator<Item = &mut Room> {
        self.floors.iter_mut().flat_map(|floor| floor.rooms.iter_mut())
    }

    /// First room carrying `number`, searching floors in order.
    pub fn room_by_number(&self, number: &str) -> Option<&Room> {
        self.rooms().find(|room| room.number == number)
    }

    /// Mutable variant of [`Hostel::room_by_number`].
    pub fn room_by_number_mut(&mut self, number: &str) -> Option<&mut Room> {
        self.rooms_mut().find(|room| room.number == number)
    }

    fn normalize(&mut self) {
        for room in self.rooms_mut() {
            room.normalize();
        }
    }
}

/// A floor: an ordered list of rooms.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(flatten)]
    pub extra: Document,
}

impl Floor {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self {
            rooms,
            extra: Document::new(),
        }
    }
}

/// A room with a fixed capacity and a set of occupants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(default, skip_serializing_if = "RoomId::is_empty")]
    pub id: RoomId,
    /// Room number; unique within a hostel, used to match rooms across
    /// duplicate hostels.
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    occupants: Vec<StudentId>,
    #[serde(default)]
    is_available: bool,
    #[serde(flatten)]
    pub extra: Document,
}

impl Room {
    /// Create an empty room.
    pub fn new(id: impl Into<RoomId>, number: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            number: number.into(),
            capacity,
            occupants: Vec::new(),
            is_available: true,
            extra: Document::new(),
        }
    }

    /// Builder: add occupants, dropping duplicates.
    pub fn with_occupants<I, S>(mut self, occupants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StudentId>,
    {
        for student in occupants {
            self.add_occupant(student.into());
        }
        self
    }

    pub fn occupants(&self) -> &[StudentId] {
        &self.occupants
    }

    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }

    pub fn contains(&self, student: &StudentId) -> bool {
        self.occupants.contains(student)
    }

    /// Add a student. Returns `false` (and changes nothing) if the student is
    /// already an occupant.
    ///
    /// Capacity is not checked here; admission is the caller's decision.
    pub fn add_occupant(&mut self, student: StudentId) -> bool {
        if self.contains(&student) {
            return false;
        }
        self.occupants.push(student);
        self.refresh_availability();
        true
    }

    /// Remove and return every occupant, leaving the room empty.
    pub fn take_occupants(&mut self) -> Vec<StudentId> {
        let taken = std::mem::take(&mut self.occupants);
        self.refresh_availability();
        taken
    }

    fn refresh_availability(&mut self) {
        self.is_available =
            self.occupants.is_empty() || self.occupants.len() < self.capacity as usize;
    }

    fn normalize(&mut self) {
        let mut seen = std::collections::HashSet::with_capacity(self.occupants.len());
        self.occupants.retain(|student| seen.insert(student.clone()));
        self.refresh_availability();
    }
}
