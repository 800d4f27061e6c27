use std::collections::HashMap;

use hostel_types::{Hostel, HostelId};
use serde::Serialize;
use tracing::info;

/// Hostels sharing a name, in the order they were seen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub name: String,
    pub ids: Vec<HostelId>,
}

impl DuplicateGroup {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Partition hostels by name and keep only names shared by two or more.
///
/// Groups are ordered by the first appearance of their name, and ids within
/// a group keep input order, so the result is stable for a stable input.
pub fn find_duplicate_groups<'a, I>(hostels: I) -> Vec<DuplicateGroup>
where
    I: IntoIterator<Item = &'a Hostel>,
{
    let mut groups: Vec<DuplicateGroup> = Vec::new();
    let mut by_name: HashMap<&'a str, usize> = HashMap::new();

    for hostel in hostels {
        match by_name.get(hostel.name.as_str()) {
            Some(&slot) => groups[slot].ids.push(hostel.id().clone()),
            None => {
                by_name.insert(hostel.name.as_str(), groups.len());
                groups.push(DuplicateGroup {
                    name: hostel.name.clone(),
                    ids: vec![hostel.id().clone()],
                });
            }
        }
    }

    groups.retain(|group| group.len() > 1);
    info!(groups = groups.len(), "scanned for duplicate hostels");
    groups
}
