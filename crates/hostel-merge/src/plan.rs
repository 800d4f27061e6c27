use std::collections::HashSet;

use hostel_store::{DocumentRef, WriteBatch};
use hostel_types::HostelId;
use tracing::debug;

use crate::catalog::HostelCatalog;
use crate::error::{MergeError, MergeResult};

/// The queued writes that realize a merge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergePlan {
    pub batch: WriteBatch,
    /// Hostels queued for a full rewrite, in catalog order.
    pub updated: Vec<HostelId>,
    /// Hostels queued for deletion, in merge order.
    pub deleted: Vec<HostelId>,
}

/// Queue one full-document rewrite for every hostel that survives and one
/// delete for every completely merged hostel.
///
/// The whole run shares this single batch, so the commit is atomic across
/// every group.
pub fn build_plan(
    catalog: &HostelCatalog,
    completely_merged: &[HostelId],
    collection: &str,
) -> MergeResult<MergePlan> {
    let doomed: HashSet<&HostelId> = completely_merged.iter().collect();
    let mut plan = MergePlan::default();

    for hostel in catalog.iter().filter(|h| !doomed.contains(h.id())) {
        let document = hostel.to_document()?;
        plan.batch
            .set(DocumentRef::new(collection, hostel.id().as_str()), document);
        plan.updated.push(hostel.id().clone());
    }

    for id in completely_merged {
        if !catalog.contains(id) {
            return Err(MergeError::UnknownHostel(id.clone()));
        }
        plan.batch.delete(DocumentRef::new(collection, id.as_str()));
        plan.deleted.push(id.clone());
    }

    debug!(
        updates = plan.updated.len(),
        deletes = plan.deleted.len(),
        "merge plan built"
    );
    Ok(plan)
}
