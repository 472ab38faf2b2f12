//! Per-frame cost of the simulation step and frame flattening.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pixelfield::prelude::*;

fn bench_step(c: &mut Criterion) {
    let viewport = Vec2::new(1280.0, 720.0);

    let mut pointer = PointerState::new();
    pointer.moved(Vec2::new(640.0, 360.0));

    let mut flat = Effect::new(Silhouette::coin_2d(), EffectConfig::coin_2d(), viewport, 42);
    c.bench_function("step_flat", |b| {
        b.iter(|| flat.step(black_box(&pointer)));
    });

    let mut depth = Effect::new(Silhouette::coin_3d(), EffectConfig::coin_3d(), viewport, 42);
    c.bench_function("step_depth_sorted", |b| {
        b.iter(|| depth.step(black_box(&pointer)));
    });

    c.bench_function("frame_instances", |b| {
        b.iter(|| black_box(depth.instances()));
    });
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
