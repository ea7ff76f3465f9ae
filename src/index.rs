//! Service index maintenance
//!
//! A service index is a block of namespace import lines, one per
//! controller. New controllers get an import inserted at their alphabetical
//! position; existing lines are never rewritten.

use crate::merge::merge_ordered;
use crate::model::IndexEntry;

/// Merges imports for `controller_names` into an existing entry list.
///
/// Names already bound as an alias are skipped. Assuming the existing block
/// is alphabetical, each new import lands in sorted position; out-of-order
/// blocks degrade to appending at the end.
pub fn merge_controller_imports(entries: &[IndexEntry], controller_names: &[String]) -> Vec<IndexEntry> {
    let additions: Vec<IndexEntry> = controller_names
        .iter()
        .filter(|name| !entries.iter().any(|e| &e.alias == *name))
        .map(|name| IndexEntry::for_controller(name))
        .collect();

    merge_ordered(entries, &additions, |prev, current, candidate, _i| {
        candidate.alias < current.alias
            && prev.map_or(true, |p| p.alias <= candidate.alias)
    })
}

/// Renders an entry block back to source lines.
pub fn render_imports(entries: &[IndexEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.text);
        out.push('\n');
    }
    out
}
