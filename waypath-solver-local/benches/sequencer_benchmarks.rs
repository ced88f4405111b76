//! Criterion benchmarks for the local-search sequencer.
//!
//! Measures sequencing time across problem sizes (25, 50, 100 waypoints) for
//! open and round trips.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package waypath-solver-local
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use waypath_core::Sequencer;
use waypath_solver_local::LocalSearchSequencer;


use bench_support::{BENCHMARK_SEED, generate_clustered_points, generate_distance_matrix};

/// Problem sizes to benchmark.
const PROBLEM_SIZES: &[usize] = &[25, 50, 100];

fn bench_sequence_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence_time");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));

    let sequencer = LocalSearchSequencer::new();
    for &size in PROBLEM_SIZES {
        let points = generate_clustered_points(size, BENCHMARK_SEED);
        let matrix = generate_distance_matrix(&points);

        #[expect(
            clippy::as_conversions,
            reason = "Safe conversion for small problem sizes"
        )]
        let throughput_size = size as u64;
        group.throughput(Throughput::Elements(throughput_size));
        for round_trip in [false, true] {
            let label = if round_trip { "round_trip" } else { "open" };
            group.bench_with_input(BenchmarkId::new(label, size), &matrix, |b, matrix| {
                b.iter(|| {
                    #[expect(
                        clippy::let_underscore_must_use,
                        reason = "Benchmarking sequencing performance, result is intentionally discarded"
                    )]
                    let _ = sequencer.sequence(matrix, round_trip);
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_sequence_times);
criterion_main!(benches);
