//! Scoring benchmarks using Criterion.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lost_and_found_rs::{Accounting, BipartiteGraph, CatalogObject, MatchReport, MatchSet, Scorer};

/// Create a match set where every third true object is lost and every
/// fourth true object is blended with its neighbour's prediction.
fn create_test_match_set(n: usize) -> MatchSet {
    let true_ids: Vec<i64> = (0..n as i64).collect();
    let pred_ids: Vec<i64> = (0..(n + n / 5) as i64).map(|j| 10_000 + j).collect();

    let mut matches: Vec<Vec<i64>> = Vec::with_capacity(n);
    let mut weights: Vec<Vec<f64>> = Vec::with_capacity(n);
    for i in 0..n {
        let mut row = Vec::new();
        if i % 3 != 0 {
            row.push(pred_ids[i]);
        }
        if i % 4 == 0 && i + 1 < n {
            row.push(pred_ids[i + 1]);
        }
        weights.push(row.iter().map(|&p| 1.0 / (1.0 + (p % 7) as f64)).collect());
        matches.push(row);
    }

    MatchSet::new(matches, true_ids, pred_ids, Some(weights)).expect("valid match set")
}

fn benchmark_build_match_set_1000(c: &mut Criterion) {
    c.bench_function("build_match_set_1000", |b| {
        b.iter(|| create_test_match_set(black_box(1000)));
    });
}

fn benchmark_accounting_1000(c: &mut Criterion) {
    let set = create_test_match_set(1000);

    c.bench_function("accounting_1000", |b| {
        b.iter(|| {
            black_box(set.lost());
            black_box(set.found());
            black_box(set.match_counts());
        })
    });
}

fn benchmark_report_1000(c: &mut Criterion) {
    let set = create_test_match_set(1000);

    c.bench_function("report_1000", |b| {
        b.iter(|| MatchReport::from_accounting(black_box(&set)))
    });
}

fn benchmark_best_matches_1000(c: &mut Criterion) {
    let set = create_test_match_set(1000);

    c.bench_function("best_matches_1000", |b| {
        b.iter(|| Scorer::new(black_box(&set)).best_matches())
    });
}

fn benchmark_graph_accounting_1000(c: &mut Criterion) {
    let set = create_test_match_set(1000);
    let graph = BipartiteGraph::from_match_set(&set, |group, id| {
        CatalogObject::new(id, group, id as f64 * 1e-4, 0.0)
    })
    .expect("valid graph");

    c.bench_function("graph_accounting_1000", |b| {
        b.iter(|| {
            black_box(graph.lost());
            black_box(graph.found());
            black_box(graph.k_l_degree_query(0, 2));
        })
    });
}

criterion_group!(
    benches,
    benchmark_build_match_set_1000,
    benchmark_accounting_1000,
    benchmark_report_1000,
    benchmark_best_matches_1000,
    benchmark_graph_accounting_1000,
);
criterion_main!(benches);
