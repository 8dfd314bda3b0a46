use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use digraph::Graph;

/// A chain of `size` three-vertex cycles, each linked to the next.
fn make_cycle_chain(size: usize) -> Graph<usize> {
    Graph::from_edges((0..size).flat_map(|i| {
        let base = i * 3;
        [
            (base, base + 1),
            (base + 1, base + 2),
            (base + 2, base),
            (base + 2, base + 3),
        ]
    }))
}

fn bench_sccs(c: &mut Criterion) {
    let mut g = c.benchmark_group("strongly connected components");

    for size in [0, 100, 10_000] {
        g.bench_with_input(BenchmarkId::new("cycle_chain", size), &size, |b, size| {
            let graph = make_cycle_chain(*size);
            b.iter(|| black_box(graph.sccs()))
        });
    }
}

fn bench_linearize(c: &mut Criterion) {
    let mut g = c.benchmark_group("linearize");

    for size in [0, 100, 10_000] {
        g.bench_with_input(BenchmarkId::new("cycle_chain", size), &size, |b, size| {
            let graph = make_cycle_chain(*size);
            b.iter(|| black_box(graph.linearize().count()))
        });
    }
}

fn bench_shortest_path(c: &mut Criterion) {
    let mut g = c.benchmark_group("shortest path");

    for size in [10, 100, 1_000] {
        g.bench_with_input(BenchmarkId::new("cycle_chain", size), &size, |b, size| {
            let graph = make_cycle_chain(*size);
            let target = size * 3;
            b.iter(|| black_box(graph.shortest_path_by_hops(&0, &target)))
        });
    }
}

criterion_group!(benches, bench_sccs, bench_linearize, bench_shortest_path);
criterion_main!(benches);
