//! Property tests for the module rebuild.

use std::collections::HashSet;

use proptest::prelude::*;

use typesync::model::{Declaration, LiveSet, Module, TypeBody};
use typesync::rebuild::rebuild;

/// Mixed-case member names exercise the case-insensitive ordering.
fn member_name(index: usize) -> String {
    if index % 2 == 0 {
        format!("Member{index}")
    } else {
        format!("member{index}")
    }
}

fn module_from(indices: &[usize], body_marker: &str) -> Module {
    let mut module = Module::new("API", "");
    for index in indices {
        let body = TypeBody::opaque(format!("{{ {body_marker}{index}: string; }}"));
        module
            .push(Declaration::new(member_name(*index), body), "generated")
            .unwrap();
    }
    module
}

/// (old members, fresh members, live ⊆ fresh), all drawn from one universe
/// so the sets overlap freely.
fn rebuild_inputs() -> impl Strategy<Value = (Vec<usize>, Vec<usize>, Vec<usize>)> {
    (
        proptest::collection::hash_set(0usize..10, 0..8),
        proptest::collection::hash_set(0usize..10, 0..8),
        proptest::collection::vec(any::<bool>(), 10),
    )
        .prop_map(|(old, fresh, mask)| {
            let mut old: Vec<usize> = old.into_iter().collect();
            let mut fresh: Vec<usize> = fresh.into_iter().collect();
            old.sort_unstable();
            fresh.sort_unstable();
            let live: Vec<usize> = fresh.iter().copied().filter(|i| mask[*i]).collect();
            (old, fresh, live)
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the rebuilt name set is exactly (old − live) ∪ live.
    #[test]
    fn property_rebuild_name_set_law(
        (old, fresh, live) in rebuild_inputs()
    ) {
        let old_module = module_from(&old, "old");
        let fresh_module = module_from(&fresh, "fresh");
        let live_set: LiveSet = live.iter().map(|i| member_name(*i)).collect();

        let result = rebuild(&old_module, &live_set, &fresh_module).unwrap();

        let got: HashSet<String> = result.names().into_iter().collect();
        let want: HashSet<String> = old
            .iter()
            .filter(|i| !live.contains(i))
            .chain(live.iter())
            .map(|i| member_name(*i))
            .collect();
        prop_assert_eq!(got, want);
    }

    /// PROPERTY: live members carry fresh bodies, retained members carry
    /// their old bodies verbatim.
    #[test]
    fn property_bodies_come_from_the_right_side(
        (old, fresh, live) in rebuild_inputs()
    ) {
        let old_module = module_from(&old, "old");
        let fresh_module = module_from(&fresh, "fresh");
        let live_set: LiveSet = live.iter().map(|i| member_name(*i)).collect();

        let result = rebuild(&old_module, &live_set, &fresh_module).unwrap();

        for index in &live {
            let body = &result.get(&member_name(*index)).unwrap().body;
            prop_assert_eq!(&body.text, &format!("{{ fresh{index}: string; }}"));
        }
        for index in old.iter().filter(|i| !live.contains(i)) {
            let body = &result.get(&member_name(*index)).unwrap().body;
            prop_assert_eq!(&body.text, &format!("{{ old{index}: string; }}"));
        }
    }

    /// PROPERTY: the rebuilt module is sorted case-insensitively with a
    /// byte-order tiebreak, regardless of input order.
    #[test]
    fn property_rebuild_output_is_sorted(
        (old, fresh, live) in rebuild_inputs()
    ) {
        let old_module = module_from(&old, "old");
        let fresh_module = module_from(&fresh, "fresh");
        let live_set: LiveSet = live.iter().map(|i| member_name(*i)).collect();

        let result = rebuild(&old_module, &live_set, &fresh_module).unwrap();

        for pair in result.names().windows(2) {
            let a = pair[0].to_lowercase();
            let b = pair[1].to_lowercase();
            prop_assert!(
                a < b || (a == b && pair[0] < pair[1]),
                "{} sorted after {}",
                pair[0],
                pair[1]
            );
        }
    }

    /// PROPERTY: a live name the fresh module cannot resolve fails the
    /// whole rebuild with that name.
    #[test]
    fn property_unresolvable_live_name_fails(
        (old, fresh, live) in rebuild_inputs(),
        ghost in 10usize..15,
    ) {
        let old_module = module_from(&old, "old");
        let fresh_module = module_from(&fresh, "fresh");
        let live_set: LiveSet = live
            .iter()
            .copied()
            .chain(std::iter::once(ghost))
            .map(member_name)
            .collect();

        let err = rebuild(&old_module, &live_set, &fresh_module).unwrap_err();
        prop_assert_eq!(
            err.to_string(),
            format!("missing declaration: {}", member_name(ghost))
        );
    }

    /// PROPERTY: rebuilding is deterministic.
    #[test]
    fn property_rebuild_is_deterministic(
        (old, fresh, live) in rebuild_inputs()
    ) {
        let old_module = module_from(&old, "old");
        let fresh_module = module_from(&fresh, "fresh");
        let live_set: LiveSet = live.iter().map(|i| member_name(*i)).collect();

        let first = rebuild(&old_module, &live_set, &fresh_module).unwrap();
        let second = rebuild(&old_module, &live_set, &fresh_module).unwrap();
        prop_assert_eq!(first, second);
    }
}
