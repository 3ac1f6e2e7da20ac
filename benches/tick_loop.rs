//! Benchmarks for the per-tick update loop.
//!
//! A full tick over the default cast (8000 body particles plus sparkles,
//! lanterns and emblems) has to fit well inside a 60 Hz frame alongside
//! rendering. Run with: `cargo bench`

use choreo::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const DT: f32 = 1.0 / 60.0;

fn full_engine() -> Engine {
    Choreography::new().with_seed(42).build().unwrap()
}

fn bench_tick_by_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_by_state");
    let items: Vec<AttachmentItem> =
        (0..3).map(|i| AttachmentItem::new(i, format!("memory-{i}.png"))).collect();

    for (name, state) in [
        ("closed", GestureState::Closed),
        ("open", GestureState::Open),
        ("pinch", GestureState::Pinch),
    ] {
        group.bench_function(name, |b| {
            let mut engine = full_engine();
            let mut frame = 0u32;
            b.iter(|| {
                frame += 1;
                let tick = Tick::new(frame as f32 * DT, DT);
                black_box(engine.tick(state, &items, tick).unwrap().crest.position)
            })
        });
    }

    group.finish();
}

fn bench_tick_by_population(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_by_population");

    for count in [1000u32, 4000, 8000, 16000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut engine = Choreography::new()
                .with_seed(7)
                .with_body_count(count)
                .build()
                .unwrap();
            let mut frame = 0u32;
            b.iter(|| {
                frame += 1;
                let tick = Tick::new(frame as f32 * DT, DT);
                black_box(engine.tick(GestureState::Closed, &[], tick).unwrap().crest.position)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tick_by_state, bench_tick_by_population);
criterion_main!(benches);
