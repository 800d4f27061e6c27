use hostel_types::HostelId;
use tracing::debug;

use crate::error::{MergeError, MergeResult};

/// Pick the canonical hostel of a group.
///
/// The candidate with the strictly greatest occupant count wins. On a tie the
/// first candidate in iteration order is kept; a later equal count never
/// replaces it.
pub fn select_primary<'a, I>(group_name: &str, candidates: I) -> MergeResult<&'a HostelId>
where
    I: IntoIterator<Item = (&'a HostelId, usize)>,
{
    let mut best: Option<(&'a HostelId, usize)> = None;
    for (id, occupants) in candidates {
        match best {
            Some((_, max)) if occupants <= max => {}
            _ => best = Some((id, occupants)),
        }
    }

    let (primary, occupants) = best.ok_or_else(|| MergeError::EmptyGroup {
        name: group_name.to_string(),
    })?;
    debug!(group = group_name, primary = %primary, occupants, "primary selected");
    Ok(primary)
}
