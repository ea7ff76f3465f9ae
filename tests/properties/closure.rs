//! Property tests for closure collection over generated reference graphs.

use std::collections::HashSet;

use proptest::prelude::*;

use typesync::closure::SyncSession;
use typesync::model::{
    Declaration, Module, ServiceFunction, ServiceSource, TypeBody, TypeExpr,
};

fn type_name(index: usize) -> String {
    format!("Type{index}")
}

/// A fresh module whose declaration bodies reference each other per the
/// adjacency list, self-loops and cycles included.
fn graph_module(adjacency: &[Vec<usize>]) -> Module {
    let mut module = Module::new("API", "");
    for (index, deps) in adjacency.iter().enumerate() {
        let body = TypeBody {
            text: "{ generated: true; }".to_string(),
            property_types: deps
                .iter()
                .map(|dep| TypeExpr::Named(type_name(*dep)))
                .collect(),
        };
        module
            .push(Declaration::new(type_name(index), body), "generated")
            .unwrap();
    }
    module
}

fn source_for(origin: &str, seeds: &[usize]) -> ServiceSource {
    ServiceSource {
        origin: origin.to_string(),
        functions: seeds
            .iter()
            .map(|seed| ServiceFunction {
                name: format!("use{seed}"),
                param_types: vec![TypeExpr::Qualified {
                    qualifier: "API".to_string(),
                    name: type_name(*seed),
                }],
                return_call_type: None,
            })
            .collect(),
    }
}

/// Names reachable from the seeds by walking the adjacency list.
fn reachable(adjacency: &[Vec<usize>], seeds: &[usize]) -> HashSet<String> {
    let mut seen: HashSet<usize> = HashSet::new();
    let mut stack: Vec<usize> = seeds.to_vec();
    while let Some(index) = stack.pop() {
        if seen.insert(index) {
            stack.extend(adjacency[index].iter().copied());
        }
    }
    seen.into_iter().map(type_name).collect()
}

fn graph_strategy() -> impl Strategy<Value = (Vec<Vec<usize>>, Vec<usize>)> {
    (2usize..10).prop_flat_map(|count| {
        (
            proptest::collection::vec(proptest::collection::vec(0..count, 0..4), count),
            proptest::collection::vec(0..count, 1..4),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: collection terminates on arbitrary graphs, cycles included,
    /// and yields the same order every time.
    #[test]
    fn property_collect_terminates_and_is_deterministic(
        (adjacency, seeds) in graph_strategy()
    ) {
        let fresh = graph_module(&adjacency);
        let source = source_for("s.ts", &seeds);

        let mut first = SyncSession::new(&fresh);
        first.collect(&source);
        let mut second = SyncSession::new(&fresh);
        second.collect(&source);

        prop_assert_eq!(first.live().names(), second.live().names());
    }

    /// PROPERTY: the live set contains every seed and is closed under body
    /// references of resolvable members.
    #[test]
    fn property_live_set_is_dependency_closed(
        (adjacency, seeds) in graph_strategy()
    ) {
        let fresh = graph_module(&adjacency);
        let mut session = SyncSession::new(&fresh);
        session.collect(&source_for("s.ts", &seeds));

        for seed in &seeds {
            prop_assert!(session.live().contains(&type_name(*seed)));
        }
        for name in session.live().iter() {
            if let Some(decl) = fresh.get(name) {
                for ty in &decl.body.property_types {
                    if let TypeExpr::Named(dep) = ty {
                        prop_assert!(
                            session.live().contains(dep),
                            "{name} is live but its reference {dep} is not"
                        );
                    }
                }
            }
        }
    }

    /// PROPERTY: the live set is exactly the reachable set; nothing
    /// unreachable from a seed ever becomes live.
    #[test]
    fn property_live_set_equals_reachable_set(
        (adjacency, seeds) in graph_strategy()
    ) {
        let fresh = graph_module(&adjacency);
        let mut session = SyncSession::new(&fresh);
        session.collect(&source_for("s.ts", &seeds));

        let live: HashSet<String> =
            session.live().iter().map(str::to_string).collect();
        prop_assert_eq!(live, reachable(&adjacency, &seeds));
    }

    /// PROPERTY: feeding sources one at a time accumulates the same set as
    /// feeding one combined source.
    #[test]
    fn property_sources_accumulate_the_union(
        (adjacency, first_seeds) in graph_strategy(),
        second_picks in proptest::collection::vec(any::<proptest::sample::Index>(), 1..4),
    ) {
        let count = adjacency.len();
        let second_seeds: Vec<usize> =
            second_picks.iter().map(|pick| pick.index(count)).collect();
        let fresh = graph_module(&adjacency);

        let mut split = SyncSession::new(&fresh);
        split.collect(&source_for("a.ts", &first_seeds));
        split.collect(&source_for("b.ts", &second_seeds));

        let combined: Vec<usize> = first_seeds
            .iter()
            .chain(second_seeds.iter())
            .copied()
            .collect();
        let mut joined = SyncSession::new(&fresh);
        joined.collect(&source_for("ab.ts", &combined));

        let split_set: HashSet<&str> = split.live().iter().collect();
        let joined_set: HashSet<&str> = joined.live().iter().collect();
        prop_assert_eq!(split_set, joined_set);
    }
}
