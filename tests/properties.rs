use commutators::*;
use proptest::prelude::*;

fn partition<K: Clone + Ord + std::hash::Hash + std::fmt::Debug>(
    forest: &DisjointForest<K>,
) -> Vec<Vec<K>> {
    let mut groups: Vec<Vec<K>> = forest
        .components()
        .into_iter()
        .map(|group| {
            let mut group: Vec<K> = group.into_iter().cloned().collect();
            group.sort();
            group
        })
        .collect();
    groups.sort();
    groups
}

fn forest_from(edges: &[(u8, u8)]) -> DisjointForest<u8> {
    let mut forest = DisjointForest::new();
    for &(a, b) in edges {
        forest.union(a, b);
    }
    forest
}

fn edges() -> impl Strategy<Value = Vec<(u8, u8)>> {
    proptest::collection::vec((0u8..24, 0u8..24), 0..40)
}

fn dictionary() -> impl Strategy<Value = Vec<Word>> {
    proptest::collection::vec("[abcd]{1,5}", 1..40)
        .prop_map(|list| list.iter().map(|w| Word::new(w).unwrap()).collect())
}

proptest! {
    #[test]
    fn representative_is_idempotent(edges in edges()) {
        let mut forest = forest_from(&edges);
        let keys: Vec<u8> = forest.keys().copied().collect();
        for k in keys {
            let rep = *forest.representative(&k).unwrap();
            prop_assert_eq!(*forest.representative(&rep).unwrap(), rep);
        }
    }

    #[test]
    fn relatedness_is_an_equivalence(edges in edges()) {
        let forest = forest_from(&edges);
        let keys: Vec<u8> = forest.keys().copied().collect();
        for &a in &keys {
            prop_assert!(forest.are_related(&a, &a).unwrap());
            for &b in &keys {
                let ab = forest.are_related(&a, &b).unwrap();
                prop_assert_eq!(ab, forest.are_related(&b, &a).unwrap());
                if !ab {
                    continue;
                }
                for &c in &keys {
                    if forest.are_related(&b, &c).unwrap() {
                        prop_assert!(forest.are_related(&a, &c).unwrap());
                    }
                }
            }
        }
    }

    #[test]
    fn union_all_joins_everything(keys in proptest::collection::vec(0u8..50, 1..20)) {
        let mut forest = DisjointForest::new();
        forest.union_all(keys.iter().copied()).unwrap();
        prop_assert_eq!(forest.component_count(), 1);
    }

    #[test]
    fn quotient_ignores_visit_order(
        (edges, shuffled) in edges().prop_flat_map(|e| (Just(e.clone()), Just(e).prop_shuffle())),
        modulus in 1u8..8,
    ) {
        let collapse = |k: &u8| k % modulus;
        let forward = forest_from(&edges).map_keys(collapse);
        let reversed: Vec<(u8, u8)> = edges.iter().rev().map(|&(a, b)| (b, a)).collect();
        let backward = forest_from(&reversed).map_keys(collapse);
        let mixed = forest_from(&shuffled).map_keys(collapse);
        prop_assert_eq!(partition(&forward), partition(&backward));
        prop_assert_eq!(partition(&forward), partition(&mixed));
    }

    #[test]
    fn merge_depends_only_on_partition(
        base in edges(),
        (other, shuffled) in edges().prop_flat_map(|e| (Just(e.clone()), Just(e).prop_shuffle())),
    ) {
        let mut left = forest_from(&base);
        let mut right = left.clone();
        left.merge_from(&forest_from(&other));
        right.merge_from(&forest_from(&shuffled));
        prop_assert_eq!(partition(&left), partition(&right));
    }

    #[test]
    fn registry_only_grows_and_run_terminates(words in dictionary()) {
        let mut driver = FixedPointDriver::new(words).unwrap();
        let mut rounds = 0;
        loop {
            let before = driver.registry().clone();
            let summary = driver.step().unwrap();
            prop_assert!(driver.registry().covers(&before));
            prop_assert!(driver.registry().len() <= PAIR_COUNT);
            rounds += 1;
            if summary.is_fixed_point() {
                break;
            }
            // Four letters give at most six pairs, and each class can lose at most four letters.
            prop_assert!(rounds < 64, "no fixed point after {} rounds", rounds);
        }
        prop_assert_eq!(driver.phase(), Phase::Converged);
        for (counts, forest) in driver.classes() {
            prop_assert!(forest.len() > 1);
            prop_assert_eq!(reduce_vector(counts, driver.registry()), *counts);
        }
    }

    #[test]
    fn runs_are_reproducible(words in dictionary()) {
        let first = FixedPointDriver::new(words.clone()).unwrap().run().unwrap();
        let second = FixedPointDriver::new(words).unwrap().run().unwrap();
        prop_assert_eq!(&first.registry, &second.registry);
        prop_assert_eq!(first.classes.len(), second.classes.len());
        for ((a_counts, a), (b_counts, b)) in first.classes.iter().zip(second.classes.iter()) {
            prop_assert_eq!(a_counts, b_counts);
            prop_assert_eq!(partition(a), partition(b));
        }
    }
}
