//! Benchmarks for the decomposition engine.
//!
//! Measures:
//! - Path graphs at width 1 (deep recursion, parent pairing)
//! - Cycle graphs at width 2 (child-as-root splitting)
//! - Worker-count scaling on a fixed input
//!
//! Inputs are deterministic so runs are comparable.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hypersplit::prelude::*;

/// A path of `n` vertices as binary edges.
fn path(n: u32) -> Hypergraph {
    let edges = (1..n)
        .map(|i| Edge::new(i, [Vertex::new(i), Vertex::new(i + 1)]))
        .collect();
    Hypergraph::new(Edges::new(edges))
}

/// A cycle of `n` vertices as binary edges.
fn cycle(n: u32) -> Hypergraph {
    let mut edges: Vec<Edge> = (1..n)
        .map(|i| Edge::new(i, [Vertex::new(i), Vertex::new(i + 1)]))
        .collect();
    edges.push(Edge::new(n, [Vertex::new(n), Vertex::new(1)]));
    Hypergraph::new(Edges::new(edges))
}

fn bench_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_width1");
    for n in [8u32, 16, 24] {
        let graph = path(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, graph| {
            b.iter(|| {
                let mut engine = LogDepthDecomp::new(1).with_graph(graph.clone());
                let decomp = engine.find_decomp().unwrap();
                black_box(decomp).expect("paths have width 1")
            });
        });
    }
    group.finish();
}

fn bench_cycles(c: &mut Criterion) {
    let mut group = c.benchmark_group("cycle_width2");
    for n in [8u32, 16] {
        let graph = cycle(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, graph| {
            b.iter(|| {
                let mut engine = LogDepthDecomp::new(2).with_graph(graph.clone());
                let decomp = engine.find_decomp().unwrap();
                black_box(decomp).expect("cycles have width 2")
            });
        });
    }
    group.finish();
}

fn bench_worker_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("workers");
    let graph = path(16);
    for workers in [1usize, 2, 4] {
        group.bench_with_input(
            BenchmarkId::from_parameter(workers),
            &workers,
            |b, &workers| {
                b.iter(|| {
                    let mut engine = LogDepthDecomp::new(1)
                        .with_graph(graph.clone())
                        .with_workers(workers);
                    let decomp = engine.find_decomp().unwrap();
                    black_box(decomp).expect("paths have width 1")
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_paths, bench_cycles, bench_worker_scaling);
criterion_main!(benches);
