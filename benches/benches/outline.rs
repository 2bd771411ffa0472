// Copyright 2025 the Neumorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use neumorph_shape::{CornerFamily, ShapeAppearanceModel, compute_outline, host_outline};

fn bench_outline(c: &mut Criterion) {
    let mut group = c.benchmark_group("neumorph_shape");

    let bounds = Rect::new(0.0, 0.0, 240.0, 64.0);
    let rounded = ShapeAppearanceModel::builder()
        .set_all_corners(CornerFamily::Rounded, 16.0)
        .set_bottom_left_corner_size(0.0)
        .build();
    let oval = ShapeAppearanceModel::builder()
        .set_corner_family(CornerFamily::Oval)
        .build();

    group.bench_function("compute_outline(rounded)", |b| {
        b.iter(|| compute_outline(black_box(bounds), black_box(&rounded), black_box(6.0)));
    });
    group.bench_function("compute_outline(oval)", |b| {
        b.iter(|| compute_outline(black_box(bounds), black_box(&oval), black_box(6.0)));
    });
    group.bench_function("host_outline(rounded)", |b| {
        b.iter(|| host_outline(black_box(bounds), black_box(&rounded)));
    });

    group.finish();
}

criterion_group!(benches, bench_outline);
criterion_main!(benches);
