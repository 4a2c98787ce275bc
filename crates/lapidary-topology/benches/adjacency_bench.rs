//! Benchmarks for facet-ring adjacency.
//!
//! Neighbor lookups run once per pointer transition, so absolute numbers
//! barely matter; the bench exists to catch accidental regressions from
//! O(1) (a table or a search would show up immediately).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lapidary_topology::{count_active_neighbors, FacetRing};

fn bench_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbors");

    for &n in &[3usize, 6, 12, 64] {
        let ring = FacetRing::new(n).unwrap();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &ring, |b, ring| {
            b.iter(|| {
                for i in ring.facets() {
                    black_box(ring.neighbors(black_box(i)));
                }
            })
        });
    }
    group.finish();
}

fn bench_retention_count(c: &mut Criterion) {
    let ring = FacetRing::hexagonal();
    let active = [true, false, true, true, false, false];

    c.bench_function("count_active_neighbors", |b| {
        b.iter(|| {
            for i in ring.facets() {
                black_box(count_active_neighbors(ring, black_box(i), |j| active[j]));
            }
        })
    });
}

criterion_group!(benches, bench_neighbors, bench_retention_count);
criterion_main!(benches);
