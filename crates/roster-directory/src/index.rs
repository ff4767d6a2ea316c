//! Directory search: a pure filter over a caller-owned snapshot.

use roster_commons::Principal;

/// Filter a directory snapshot by a case-insensitive substring match
/// against name and email.
///
/// A principal without a name matches as if its name were empty. The empty
/// query returns the full snapshot unchanged in original order. Purely a
/// read-side view; never mutates.
pub fn filter(snapshot: &[Principal], query: &str) -> Vec<Principal> {
    if query.is_empty() {
        return snapshot.to_vec();
    }
    let needle = query.to_lowercase();
    snapshot
        .iter()
        .filter(|p| {
            p.name_or_empty().to_lowercase().contains(&needle)
                || p.email.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
