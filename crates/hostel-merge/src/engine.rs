//! End-to-end merge run over a document store.
//!
//! 1. load hostels and find duplicate groups;
//! 2. merge every group in memory and queue one batch of writes;
//! 3. commit the batch atomically;
//! 4. redirect allocations of deleted hostels to their primaries;
//! 5. reload hostels and reconcile every allocation against them.
//!
//! Steps 3 to 5 are skipped on a dry run. Allocation writes happen only
//! after the commit succeeds, so a failed commit changes nothing.

use hostel_store::DocumentStore;
use tracing::{info, warn};

use crate::allocations::{redirect_allocations, Redirect};
use crate::catalog::HostelCatalog;
use crate::config::MergeConfig;
use crate::error::{MergeError, MergeResult};
use crate::group::{merge_group, GroupMerge};
use crate::grouping::find_duplicate_groups;
use crate::occupancy::occupant_count;
use crate::plan::{build_plan, MergePlan};
use crate::report::{HostelSummary, RunReport, ScanReport};
use crate::validator::{validate_allocations, ValidationReport};

/// The in-memory result of planning, before anything is written.
#[derive(Clone, Debug)]
pub struct MergeOutcome {
    /// Hostels after every group was merged.
    pub catalog: HostelCatalog,
    pub groups: Vec<GroupMerge>,
    pub plan: MergePlan,
    /// One per completely merged hostel.
    pub redirects: Vec<Redirect>,
}

/// Drives merge runs against one store.
#[derive(Debug)]
pub struct MergeEngine<S> {
    store: S,
    config: MergeConfig,
}

impl<S: DocumentStore> MergeEngine<S> {
    pub fn new(store: S, config: MergeConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// List hostels and duplicate groups without changing anything.
    pub fn scan(&self) -> MergeResult<ScanReport> {
        let catalog = self.load_catalog()?;
        let hostels = catalog
            .iter()
            .map(|h| HostelSummary {
                id: h.id().clone(),
                name: h.name.clone(),
                occupants: occupant_count(h),
            })
            .collect();
        let groups = find_duplicate_groups(catalog.iter());
        Ok(ScanReport { hostels, groups })
    }

    /// Merge every duplicate group in memory and build the write batch.
    ///
    /// With no duplicate groups the plan is empty.
    pub fn plan(&self) -> MergeResult<MergeOutcome> {
        let mut catalog = self.load_catalog()?;
        let duplicates = find_duplicate_groups(catalog.iter());

        let mut groups = Vec::with_capacity(duplicates.len());
        for group in &duplicates {
            groups.push(merge_group(&mut catalog, group)?);
        }

        let mut redirects = Vec::new();
        let mut completely_merged = Vec::new();
        for group in &groups {
            for id in &group.completely_merged {
                redirects.push(Redirect {
                    from: id.clone(),
                    to: group.primary.clone(),
                });
                completely_merged.push(id.clone());
            }
        }

        let plan = if groups.is_empty() {
            MergePlan::default()
        } else {
            build_plan(&catalog, &completely_merged, &self.config.hostels_collection)?
        };

        Ok(MergeOutcome {
            catalog,
            groups,
            plan,
            redirects,
        })
    }

    /// Plan, commit, repair allocations, and validate.
    pub fn run(&self) -> MergeResult<RunReport> {
        let mut report = RunReport::start(self.config.dry_run);
        let MergeOutcome {
            catalog,
            groups,
            plan,
            redirects,
        } = self.plan()?;

        report.hostels_loaded = catalog.len();
        if catalog.is_empty() {
            info!("no hostels found");
            return Ok(report);
        }
        if groups.is_empty() {
            info!(hostels = catalog.len(), "no duplicate hostels to merge");
            return Ok(report);
        }

        report.queued_updates = plan.updated.len();
        report.queued_deletes = plan.deleted.len();
        for group in groups {
            report.record_group(group);
        }

        if self.config.dry_run {
            info!(
                updates = report.queued_updates,
                deletes = report.queued_deletes,
                "dry run, nothing written"
            );
            return Ok(report);
        }

        let summary = self.store.commit(plan.batch).map_err(MergeError::Commit)?;
        report.committed = true;
        info!(
            run = %report.run_id,
            updated = summary.updated,
            deleted = summary.deleted,
            "merge committed"
        );

        report.allocations =
            redirect_allocations(&self.store, &self.config.allocations_collection, &redirects);

        if self.config.validate_after_merge {
            report.validation = Some(self.validate_committed());
        }
        Ok(report)
    }

    /// Reconcile every allocation against the hostels currently stored.
    pub fn validate(&self) -> MergeResult<ValidationReport> {
        let catalog = self.load_catalog()?;
        Ok(validate_allocations(
            &self.store,
            &self.config.allocations_collection,
            &catalog,
        ))
    }

    // The merge is already committed; a reload failure is reported, not raised.
    fn validate_committed(&self) -> ValidationReport {
        match self.validate() {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "cannot reload hostels for validation");
                ValidationReport {
                    errors: 1,
                    issues: vec![format!("Validation process error: {e}")],
                    ..Default::default()
                }
            }
        }
    }

    fn load_catalog(&self) -> MergeResult<HostelCatalog> {
        HostelCatalog::load(&self.store, &self.config.hostels_collection)
    }
}
