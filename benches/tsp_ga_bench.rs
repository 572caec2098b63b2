//! Criterion benchmarks for the TSP genetic algorithm.
//!
//! Uses random planar instances to measure evaluation, operator and
//! full-run cost independent of any data source.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_tsp_ga::ga::operators::{ordered_crossover, reverse_segment};
use u_tsp_ga::ga::{evaluate_tour, DistanceMatrix, GaConfig, GaRunner, Tour};
use u_tsp_ga::random::create_rng;

fn random_instance(n: usize, seed: u64) -> DistanceMatrix {
    let mut rng = create_rng(seed);
    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)))
        .collect();
    DistanceMatrix::from_points(&points).expect("finite coordinates")
}

// ===========================================================================
// Fitness evaluation
// ===========================================================================

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_tour");
    for n in [20, 100, 500] {
        let matrix = random_instance(n, 1);
        let tour = Tour::random(n, &mut create_rng(2));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| evaluate_tour(black_box(&matrix), black_box(tour.nodes())))
        });
    }
    group.finish();
}

// ===========================================================================
// Variation operators
// ===========================================================================

fn bench_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("operators");
    let n = 200;
    let mut rng = create_rng(3);
    let a = Tour::random(n, &mut rng);
    let b = Tour::random(n, &mut rng);

    group.bench_function("ordered_crossover_200", |bench| {
        bench.iter(|| {
            let (mut x, mut y) = (a.clone(), b.clone());
            ordered_crossover(&mut x, &mut y, &mut rng);
            black_box((x, y))
        })
    });

    group.bench_function("reverse_segment_200", |bench| {
        bench.iter(|| {
            let mut x = a.clone();
            reverse_segment(&mut x, &mut rng);
            black_box(x)
        })
    });
    group.finish();
}

// ===========================================================================
// Full runs
// ===========================================================================

fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_run");
    group.sample_size(10);
    for n in [20, 50] {
        let matrix = random_instance(n, 4);
        for parallel in [false, true] {
            let config = GaConfig::for_nodes(n)
                .with_population_size(100)
                .with_max_generations(50)
                .with_parallel(parallel)
                .with_seed(42);
            let id = BenchmarkId::new(if parallel { "parallel" } else { "sequential" }, n);
            group.bench_with_input(id, &config, |b, config| {
                b.iter(|| GaRunner::run(black_box(&matrix), config))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_operators, bench_run);
criterion_main!(benches);
