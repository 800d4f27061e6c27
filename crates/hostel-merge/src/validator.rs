//! Reconcile room allocations against the occupant lists in hostels.
//!
//! The occupant lists are the ground truth. Every allocation is checked
//! against an index built from them:
//!
//! - allocation names a hostel that no longer exists, student found →
//!   rewrite hostel and room to where the student actually is;
//! - allocation names an existing hostel, but the student lives in another
//!   one → same rewrite;
//! - student not found anywhere → report only. Allocations are never
//!   deleted.
//!
//! Fixes are written one record at a time, immediately. An interrupted pass
//! leaves every record either untouched or fully fixed.

use std::collections::HashMap;

use hostel_store::{Document, DocumentStore};
use hostel_types::{HostelId, RoomAllocation, RoomId, StudentId};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::catalog::HostelCatalog;

/// Where a student actually lives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub hostel_id: HostelId,
    pub hostel_name: String,
    pub room_id: RoomId,
    pub room_number: String,
}

/// Student → placement index derived from every room of every hostel.
#[derive(Clone, Debug, Default)]
pub struct GroundTruth {
    placements: HashMap<StudentId, Placement>,
}

impl GroundTruth {
    /// Scan hostels, floors, and rooms in order. If a student appears in more
    /// than one room the last one scanned wins.
    pub fn build(catalog: &HostelCatalog) -> Self {
        let mut placements = HashMap::new();
        for hostel in catalog.iter() {
            for room in hostel.rooms() {
                for student in room.occupants() {
                    let placement = Placement {
                        hostel_id: hostel.id().clone(),
                        hostel_name: hostel.name.clone(),
                        room_id: room.id.clone(),
                        room_number: room.number.clone(),
                    };
                    if let Some(previous) = placements.insert(student.clone(), placement) {
                        warn!(
                            student = %student,
                            previous_hostel = %previous.hostel_id,
                            previous_room = %previous.room_number,
                            "student occupies more than one room"
                        );
                    }
                }
            }
        }
        debug!(students = placements.len(), "ground truth built");
        Self { placements }
    }

    pub fn locate(&self, student: &StudentId) -> Option<&Placement> {
        self.placements.get(student)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Classification of one allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AllocationStatus {
    ValidAllocation,
    InvalidAllocation,
    OrphanedAllocation,
}

/// Verdict on one allocation, with the placement to fix it to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocationCheck<'t> {
    /// Hostel exists and agrees with the ground truth, or the student is not
    /// housed anywhere.
    Valid,
    /// Hostel no longer exists; the student was found elsewhere.
    Relocated(&'t Placement),
    /// Hostel exists, but the student lives in a different one.
    Misplaced(&'t Placement),
    /// Hostel no longer exists and the student is not housed anywhere.
    Orphaned,
}

impl AllocationCheck<'_> {
    pub fn status(&self) -> AllocationStatus {
        match self {
            AllocationCheck::Valid => AllocationStatus::ValidAllocation,
            AllocationCheck::Relocated(_) | AllocationCheck::Misplaced(_) => {
                AllocationStatus::InvalidAllocation
            }
            AllocationCheck::Orphaned => AllocationStatus::OrphanedAllocation,
        }
    }
}

/// Check one allocation against the loaded hostels and the ground truth.
pub fn check_allocation<'t>(
    allocation: &RoomAllocation,
    catalog: &HostelCatalog,
    truth: &'t GroundTruth,
) -> AllocationCheck<'t> {
    let actual = truth.locate(&allocation.student);
    if catalog.contains(&allocation.hostel_id) {
        match actual {
            Some(placement) if placement.hostel_id != allocation.hostel_id => {
                AllocationCheck::Misplaced(placement)
            }
            _ => AllocationCheck::Valid,
        }
    } else {
        match actual {
            Some(placement) => AllocationCheck::Relocated(placement),
            None => AllocationCheck::Orphaned,
        }
    }
}

/// Totals and descriptions from one validation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub fixed: usize,
    pub orphaned: usize,
    pub errors: usize,
    pub issues: Vec<String>,
    pub fixes: Vec<String>,
}

impl ValidationReport {
    /// Every allocation agreed with the ground truth.
    pub fn is_clean(&self) -> bool {
        self.invalid == 0 && self.orphaned == 0 && self.errors == 0
    }
}

/// Check every allocation in `collection` and fix the invalid ones in place.
pub fn validate_allocations<S: DocumentStore + ?Sized>(
    store: &S,
    collection: &str,
    catalog: &HostelCatalog,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    let truth = GroundTruth::build(catalog);

    let documents = match store.load_all(collection) {
        Ok(documents) => documents,
        Err(e) => {
            warn!(error = %e, "cannot load allocations");
            report.errors += 1;
            report.issues.push(format!("Validation process error: {e}"));
            return report;
        }
    };
    report.total = documents.len();
    info!(allocations = report.total, students = truth.len(), "validating allocations");

    for (id, document) in documents {
        let allocation = match RoomAllocation::from_document(id.as_str(), document) {
            Ok(allocation) => allocation,
            Err(e) => {
                report.errors += 1;
                report.issues.push(format!("Error processing allocation {id}: {e}"));
                continue;
            }
        };

        let placement = match check_allocation(&allocation, catalog, &truth) {
            AllocationCheck::Valid => {
                report.valid += 1;
                continue;
            }
            AllocationCheck::Orphaned => {
                report.orphaned += 1;
                report.issues.push(format!(
                    "Student {} has allocation but not found in any room occupants (allocation kept)",
                    allocation.student
                ));
                continue;
            }
            AllocationCheck::Relocated(placement) => {
                report.issues.push(format!(
                    "Found correct hostel for {}: {} Room {}",
                    allocation.student, placement.hostel_name, placement.room_number
                ));
                placement
            }
            AllocationCheck::Misplaced(placement) => placement,
        };
        report.invalid += 1;

        match store.update_one(collection, &id, fix_fields(placement)) {
            Ok(()) => {
                report.fixed += 1;
                report.fixes.push(format!(
                    "Updated allocation for {}: {} → {} ({} Room {})",
                    allocation.student,
                    allocation.hostel_id.short_id(),
                    placement.hostel_id.short_id(),
                    placement.hostel_name,
                    placement.room_number
                ));
                debug!(allocation = %id, hostel = %placement.hostel_id, "allocation fixed");
            }
            Err(e) => {
                warn!(allocation = %id, error = %e, "allocation fix failed");
                report.errors += 1;
                report.issues.push(format!(
                    "Failed to fix allocation {id} for {}: {e}",
                    allocation.student
                ));
            }
        }
    }

    info!(
        valid = report.valid,
        invalid = report.invalid,
        fixed = report.fixed,
        orphaned = report.orphaned,
        errors = report.errors,
        "validation finished"
    );
    report
}

fn fix_fields(placement: &Placement) -> Document {
    let mut fields = Document::new();
    fields.insert(
        RoomAllocation::HOSTEL_FIELD.into(),
        Value::String(placement.hostel_id.to_string()),
    );
    fields.insert(
        RoomAllocation::ROOM_FIELD.into(),
        Value::String(placement.room_id.to_string()),
    );
    fields
}
