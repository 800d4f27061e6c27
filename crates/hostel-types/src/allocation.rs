//! Room allocation records.
//!
//! An allocation is a denormalized pointer from a student to the hostel and
//! room they are believed to occupy. It can drift from the occupant lists in
//! hostels, which are always the ground truth.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TypeError;
use crate::identity::{AllocationId, HostelId, RoomId, StudentId};
use crate::Document;

/// A room allocation document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAllocation {
    #[serde(skip)]
    id: AllocationId,
    #[serde(default, rename = "studentRegNumber")]
    pub student: StudentId,
    #[serde(default)]
    pub hostel_id: HostelId,
    #[serde(default)]
    pub room_id: RoomId,
    #[serde(flatten)]
    pub extra: Document,
}

impl RoomAllocation {
    /// Stored name of the hostel reference field.
    pub const HOSTEL_FIELD: &'static str = "hostelId";
    /// Stored name of the room reference field.
    pub const ROOM_FIELD: &'static str = "roomId";

    pub fn new(
        id: impl Into<AllocationId>,
        student: impl Into<StudentId>,
        hostel_id: impl Into<HostelId>,
        room_id: impl Into<RoomId>,
    ) -> Self {
        Self {
            id: id.into(),
            student: student.into(),
            hostel_id: hostel_id.into(),
            room_id: room_id.into(),
            extra: Document::new(),
        }
    }

    /// Decode a stored document.
    pub fn from_document(
        id: impl Into<AllocationId>,
        document: Document,
    ) -> Result<Self, TypeError> {
        let id = id.into();
        let mut allocation: RoomAllocation = serde_json::from_value(Value::Object(document))
            .map_err(|e| TypeError::Decode {
                kind: "allocation",
                id: id.to_string(),
                reason: e.to_string(),
            })?;
        allocation.id = id;
        Ok(allocation)
    }

    /// Encode the full document body.
    pub fn to_document(&self) -> Result<Document, TypeError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(document)) => Ok(document),
            Ok(_) => Err(TypeError::NotAnObject {
                id: self.id.to_string(),
            }),
            Err(e) => Err(TypeError::Encode {
                kind: "allocation",
                id: self.id.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn id(&self) -> &AllocationId {
        &self.id
    }

    /// Both the student and the room must be present for the record to be
    /// actionable.
    pub fn is_complete(&self) -> bool {
        !self.student.is_empty() && !self.room_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn decode_uses_store_field_names() {
        let doc = document(json!({
            "studentRegNumber": "REG001",
            "hostelId": "h1",
            "roomId": "r1",
            "paymentStatus": "Paid"
        }));
        let alloc = RoomAllocation::from_document("a1", doc).unwrap();
        assert_eq!(alloc.id().as_str(), "a1");
        assert_eq!(alloc.student.as_str(), "REG001");
        assert_eq!(alloc.hostel_id.as_str(), "h1");
        assert_eq!(alloc.room_id.as_str(), "r1");
        assert_eq!(alloc.extra["paymentStatus"], json!("Paid"));
        assert!(alloc.is_complete());
    }

    #[test]
    fn missing_fields_make_record_incomplete() {
        let alloc = RoomAllocation::from_document("a2", document(json!({"hostelId": "h1"}))).unwrap();
        assert!(alloc.student.is_empty());
        assert!(!alloc.is_complete());
    }

    #[test]
    fn wrong_field_type_is_a_decode_error() {
        let err = RoomAllocation::from_document("a3", document(json!({"hostelId": 7}))).unwrap_err();
        assert!(matches!(err, TypeError::Decode { kind: "allocation", .. }));
    }

    #[test]
    fn encode_round_trips_unknown_fields() {
        let mut alloc = RoomAllocation::new("a4", "REG9", "h2", "r9");
        alloc.extra.insert("semester".into(), json!("1"));
        let doc = alloc.to_document().unwrap();
        assert_eq!(doc["studentRegNumber"], json!("REG9"));
        assert_eq!(doc["hostelId"], json!("h2"));
        assert_eq!(doc["roomId"], json!("r9"));
        assert_eq!(doc["semester"], json!("1"));
    }
}
