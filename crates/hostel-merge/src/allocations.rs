//! Redirect room allocations away from deleted hostels.
//!
//! After a committed merge, every allocation that still names a completely
//! merged hostel is pointed at that group's primary. Each record is written
//! on its own; a failure is counted and the pass moves on.

use hostel_store::{Document, DocumentStore};
use hostel_types::{AllocationId, HostelId, RoomAllocation};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

/// A deleted hostel and the primary that absorbed it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub from: HostelId,
    pub to: HostelId,
}

/// An allocation left alone because it lacks a student or a room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedAllocation {
    pub allocation: AllocationId,
    pub hostel: HostelId,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AllocationUpdateReport {
    /// Records rewritten to point at their primary.
    pub updated: usize,
    /// Incomplete records, reported and not fixed.
    pub skipped: Vec<SkippedAllocation>,
    /// Store or decode failures; each affected one record or one query.
    pub errors: usize,
    pub issues: Vec<String>,
}

/// Point every allocation of each `redirect.from` hostel at `redirect.to`.
pub fn redirect_allocations<S: DocumentStore + ?Sized>(
    store: &S,
    collection: &str,
    redirects: &[Redirect],
) -> AllocationUpdateReport {
    let mut report = AllocationUpdateReport::default();

    for redirect in redirects {
        let matches = match store.query_by_field(
            collection,
            RoomAllocation::HOSTEL_FIELD,
            &Value::String(redirect.from.to_string()),
        ) {
            Ok(matches) => matches,
            Err(e) => {
                warn!(hostel = %redirect.from, error = %e, "allocation query failed");
                report.errors += 1;
                report
                    .issues
                    .push(format!("Error processing hostel {}: {e}", redirect.from));
                continue;
            }
        };
        if matches.is_empty() {
            info!(hostel = %redirect.from, "no allocations reference merged hostel");
            continue;
        }

        for (id, document) in matches {
            let allocation = match RoomAllocation::from_document(id.as_str(), document) {
                Ok(allocation) => allocation,
                Err(e) => {
                    report.errors += 1;
                    report.issues.push(format!("Failed to read allocation {id}: {e}"));
                    continue;
                }
            };
            if !allocation.is_complete() {
                warn!(allocation = %id, "skipping invalid allocation");
                report.skipped.push(SkippedAllocation {
                    allocation: allocation.id().clone(),
                    hostel: redirect.from.clone(),
                });
                continue;
            }

            let mut fields = Document::new();
            fields.insert(
                RoomAllocation::HOSTEL_FIELD.into(),
                Value::String(redirect.to.to_string()),
            );
            match store.update_one(collection, &id, fields) {
                Ok(()) => report.updated += 1,
                Err(e) => {
                    warn!(allocation = %id, error = %e, "allocation update failed");
                    report.errors += 1;
                    report
                        .issues
                        .push(format!("Failed to update allocation {id}: {e}"));
                }
            }
        }
    }

    info!(
        updated = report.updated,
        skipped = report.skipped.len(),
        errors = report.errors,
        "allocation updates finished"
    );
    report
}
