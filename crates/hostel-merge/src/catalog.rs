//! The in-memory working set of hostels for one pass.
//!
//! Hostels are loaded once, kept in store order, and mutated only here
//! during planning. Nothing reaches the store until the plan is committed.

use std::collections::HashMap;

use hostel_store::DocumentStore;
use hostel_types::{Hostel, HostelId};
use tracing::debug;

use crate::error::{MergeError, MergeResult};
use crate::occupancy::occupant_count;

/// Loaded hostels, in store order, with lookup by id.
#[derive(Clone, Debug, Default)]
pub struct HostelCatalog {
    hostels: Vec<Hostel>,
    index: HashMap<HostelId, usize>,
}

impl HostelCatalog {
    /// Build a catalog from hostels in the given order. A repeated id
    /// replaces the earlier entry in place.
    pub fn new(hostels: impl IntoIterator<Item = Hostel>) -> Self {
        let mut catalog = Self::default();
        for hostel in hostels {
            match catalog.index.get(hostel.id()) {
                Some(&slot) => catalog.hostels[slot] = hostel,
                None => {
                    catalog.index.insert(hostel.id().clone(), catalog.hostels.len());
                    catalog.hostels.push(hostel);
                }
            }
        }
        catalog
    }

    /// Load and decode every hostel in `collection`.
    ///
    /// A document that cannot be decoded fails the load.
    pub fn load<S: DocumentStore + ?Sized>(store: &S, collection: &str) -> MergeResult<Self> {
        let hostels = store
            .load_all(collection)?
            .into_iter()
            .map(|(id, doc)| Hostel::from_document(id, doc))
            .collect::<Result<Vec<_>, _>>()?;
        let catalog = Self::new(hostels);
        debug!(collection, hostels = catalog.len(), "loaded hostels");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.hostels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hostels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hostel> {
        self.hostels.iter()
    }

    pub fn contains(&self, id: &HostelId) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &HostelId) -> Option<&Hostel> {
        self.index.get(id).map(|&slot| &self.hostels[slot])
    }

    /// Current occupant count of `id`, recomputed from its rooms.
    pub fn occupancy(&self, id: &HostelId) -> Option<usize> {
        self.get(id).map(occupant_count)
    }

    /// Borrow two distinct hostels mutably at once.
    pub fn pair_mut(
        &mut self,
        first: &HostelId,
        second: &HostelId,
    ) -> MergeResult<(&mut Hostel, &mut Hostel)> {
        let a = self.slot(first)?;
        let b = self.slot(second)?;
        if a == b {
            return Err(MergeError::SelfMerge(first.clone()));
        }
        if a < b {
            let (left, right) = self.hostels.split_at_mut(b);
            Ok((&mut left[a], &mut right[0]))
        } else {
            let (left, right) = self.hostels.split_at_mut(a);
            Ok((&mut right[0], &mut left[b]))
        }
    }

    fn slot(&self, id: &HostelId) -> MergeResult<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| MergeError::UnknownHostel(id.clone()))
    }
}
