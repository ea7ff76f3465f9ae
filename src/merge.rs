//! Ordered list merging
//!
//! Generic insertion of new items into an ordered list. The predicate owns
//! the ordering policy; the merger only guarantees that old items keep
//! their relative order and that every item lands exactly once.

/// Merges `new` into `old` under an insertion predicate.
///
/// The list is walked once. At each position every remaining new item is
/// offered to `should_insert_before(previous, current, candidate, index)`;
/// acceptance splices the candidate in before `current`, and the next
/// candidate is tested with the inserted item as `current`. Items never
/// accepted anywhere are appended at the end in their original order.
pub fn merge_ordered<T, F>(old: &[T], new: &[T], mut should_insert_before: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(Option<&T>, &T, &T, usize) -> bool,
{
    let mut merged: Vec<T> = old.to_vec();
    let mut pending: Vec<T> = new.to_vec();

    let mut i = 0;
    while i < merged.len() {
        if pending.is_empty() {
            break;
        }
        let mut j = 0;
        while j < pending.len() {
            let previous = if i == 0 { None } else { Some(&merged[i - 1]) };
            if should_insert_before(previous, &merged[i], &pending[j], i) {
                let item = pending.remove(j);
                merged.insert(i, item);
            } else {
                j += 1;
            }
        }
        i += 1;
    }

    merged.extend(pending);
    merged
}
