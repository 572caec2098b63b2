//! Property tests: variation operators and the engine never break the
//! permutation invariant.

use proptest::prelude::*;
use u_tsp_ga::ga::operators::{ordered_crossover_at, reverse_segment_at};
use u_tsp_ga::ga::{is_permutation, DistanceMatrix, GaConfig, GaRunner};

/// A permutation of `0..n` for some `n` in `2..40`.
fn permutation() -> impl Strategy<Value = Vec<usize>> {
    (2usize..40).prop_flat_map(|n| Just((0..n).collect::<Vec<_>>()).prop_shuffle())
}

/// Two permutations of the same length plus two distinct cut indices.
fn parents_and_cuts() -> impl Strategy<Value = (Vec<usize>, Vec<usize>, usize, usize)> {
    (2usize..40).prop_flat_map(|n| {
        let base: Vec<usize> = (0..n).collect();
        (
            Just(base.clone()).prop_shuffle(),
            Just(base).prop_shuffle(),
            0..n,
            0..n,
        )
            .prop_filter("cuts must differ", |(_, _, a, b)| a != b)
    })
}

proptest! {
    #[test]
    fn crossover_children_are_permutations((p1, p2, a, b) in parents_and_cuts()) {
        let n = p1.len();
        let (c1, c2) = ordered_crossover_at(&p1, &p2, a, b);
        prop_assert!(is_permutation(&c1, n), "child 1 invalid: {:?}", c1);
        prop_assert!(is_permutation(&c2, n), "child 2 invalid: {:?}", c2);
    }

    #[test]
    fn crossover_keeps_prefix_and_suffix((p1, p2, a, b) in parents_and_cuts()) {
        let (lo, hi) = (a.min(b), a.max(b));
        let (c1, c2) = ordered_crossover_at(&p1, &p2, a, b);
        prop_assert_eq!(&c1[..lo], &p1[..lo]);
        prop_assert_eq!(&c1[hi..], &p1[hi..]);
        prop_assert_eq!(&c2[..lo], &p2[..lo]);
        prop_assert_eq!(&c2[hi..], &p2[hi..]);
    }

    #[test]
    fn reversal_is_permutation_and_self_inverse(
        perm in permutation(),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let n = perm.len();
        let (a, b) = (a.index(n), b.index(n));
        let mut once = perm.clone();
        reverse_segment_at(&mut once, a, b);
        prop_assert!(is_permutation(&once, n));

        let mut twice = once.clone();
        reverse_segment_at(&mut twice, a, b);
        prop_assert_eq!(twice, perm);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn engine_returns_only_permutations(
        points in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 2..15),
        seed in any::<u64>(),
        cx in 0.0f64..=1.0,
        mt in 0.0f64..=1.0,
    ) {
        let n = points.len();
        let matrix = DistanceMatrix::from_points(&points).unwrap();
        let config = GaConfig::for_nodes(n)
            .with_population_size(16)
            .with_max_generations(15)
            .with_crossover_rate(cx)
            .with_mutation_rate(mt)
            .with_keep_history(true)
            .with_seed(seed);
        let result = GaRunner::run(&matrix, &config).unwrap();

        prop_assert!(result.population.iter().all(|t| t.is_permutation_of(n)));
        prop_assert!(is_permutation(result.best_tour().unwrap(), n));
        for snapshot in result.history.as_ref().unwrap() {
            prop_assert!(snapshot.iter().all(|t| t.is_permutation_of(n)));
        }

        let best_so_far = result.log.best_so_far();
        for pair in best_so_far.windows(2) {
            prop_assert!(pair[1] <= pair[0]);
        }
    }
}
