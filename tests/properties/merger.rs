//! Property tests for the ordered list merger.

use proptest::prelude::*;

use typesync::merge_ordered;

/// (origin tag, input position, value): keeps generated elements
/// distinguishable even when values collide.
type Tagged = (u8, usize, i32);

fn tagged(values: Vec<i32>, tag: u8) -> Vec<Tagged> {
    values
        .into_iter()
        .enumerate()
        .map(|(position, value)| (tag, position, value))
        .collect()
}

/// Deterministic pseudo-random predicate derived from a generated seed.
fn seeded_predicate(seed: u64) -> impl FnMut(Option<&Tagged>, &Tagged, &Tagged, usize) -> bool {
    move |_previous, current, candidate, index| {
        let mix = (candidate.2 as i64)
            .wrapping_mul(31)
            .wrapping_add((current.2 as i64).wrapping_mul(17))
            .wrapping_add(index as i64 * 7)
            .wrapping_add(seed as i64);
        mix.rem_euclid(3) == 0
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every element of both inputs lands in the output exactly once.
    #[test]
    fn property_merge_covers_both_inputs_exactly(
        old in proptest::collection::vec(-50i32..50, 0..12),
        new in proptest::collection::vec(-50i32..50, 0..12),
        seed in any::<u64>(),
    ) {
        let old = tagged(old, 0);
        let new = tagged(new, 1);
        let merged = merge_ordered(&old, &new, seeded_predicate(seed));

        prop_assert_eq!(merged.len(), old.len() + new.len());

        let mut got = merged;
        let mut want: Vec<Tagged> = old.iter().chain(new.iter()).cloned().collect();
        got.sort_unstable();
        want.sort_unstable();
        prop_assert_eq!(got, want);
    }

    /// PROPERTY: old elements keep their relative order under any predicate.
    #[test]
    fn property_old_relative_order_is_preserved(
        old in proptest::collection::vec(-50i32..50, 0..12),
        new in proptest::collection::vec(-50i32..50, 0..12),
        seed in any::<u64>(),
    ) {
        let old = tagged(old, 0);
        let new = tagged(new, 1);
        let merged = merge_ordered(&old, &new, seeded_predicate(seed));

        let positions: Vec<usize> = merged
            .iter()
            .filter(|item| item.0 == 0)
            .map(|item| item.1)
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        prop_assert_eq!(positions, sorted);
    }

    /// PROPERTY: a predicate that never accepts appends the new items at the
    /// end, in their input order.
    #[test]
    fn property_rejected_items_are_appended_in_input_order(
        old in proptest::collection::vec(-50i32..50, 0..12),
        new in proptest::collection::vec(-50i32..50, 0..12),
    ) {
        let old = tagged(old, 0);
        let new = tagged(new, 1);
        let merged = merge_ordered(&old, &new, |_, _, _, _| false);

        let expected: Vec<Tagged> = old.iter().chain(new.iter()).cloned().collect();
        prop_assert_eq!(merged, expected);
    }

    /// PROPERTY: merging is deterministic for a fixed predicate.
    #[test]
    fn property_merge_is_deterministic(
        old in proptest::collection::vec(-50i32..50, 0..12),
        new in proptest::collection::vec(-50i32..50, 0..12),
        seed in any::<u64>(),
    ) {
        let old = tagged(old, 0);
        let new = tagged(new, 1);
        let first = merge_ordered(&old, &new, seeded_predicate(seed));
        let second = merge_ordered(&old, &new, seeded_predicate(seed));
        prop_assert_eq!(first, second);
    }
}
