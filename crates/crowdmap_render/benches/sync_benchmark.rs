//! # Sync Tick Benchmark
//!
//! A full reconciliation pass (advance, view, restyle every marker)
//! against the in-memory surface.
//!
//! Run with: `cargo bench --package crowdmap_render`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use crowdmap_core::{EngineFacade, GeoPoint, PeopleEngine};
use crowdmap_render::{RecordingSurface, StyleSet, SyncLoop};

fn populated_loop(count: usize) -> SyncLoop<PeopleEngine, RecordingSurface> {
    let mut engine = PeopleEngine::default();
    engine.set_user_location(GeoPoint::new(51.505, -0.09).expect("finite"));
    for i in 0..count {
        #[allow(clippy::cast_precision_loss)]
        let offset = i as f64 * 1.0e-5;
        engine.add_other_person(GeoPoint::new(51.5 + offset, -0.1 + offset).expect("finite"));
    }

    let mut sync = SyncLoop::new(Some(engine), RecordingSurface::new(), StyleSet::default());
    // Warm up: create every marker before measuring.
    sync.tick();
    sync
}

/// Benchmark: steady-state ticks with a fully grown pool.
fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync_tick");

    for count in [10, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut sync = populated_loop(count);
            b.iter(|| black_box(sync.tick()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
