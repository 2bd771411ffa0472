// Copyright 2025 the Neumorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use neumorph::{Argb, ColorStateList, RenderServices, ShapeDrawable, ShapeType};
use neumorph_imaging::Rasterizer;
use neumorph_imaging_ref::RefBackend;
use neumorph_imaging_vello_cpu::{VelloCpuBlur, VelloCpuRasterizer};

fn drawable(shape_type: ShapeType, elevation: f64) -> ShapeDrawable {
    let services = RenderServices::new(Rc::new(VelloCpuRasterizer), Rc::new(VelloCpuBlur));
    let mut d = ShapeDrawable::new(services);
    d.set_fill_color(Some(ColorStateList::single(Argb(0xFFEC_F0F3))));
    d.set_shape_type(shape_type);
    d.set_shadow_elevation(elevation);
    d.set_bounds(Rect::new(0.0, 0.0, 160.0, 48.0));
    d
}

fn bench_drawable(c: &mut Criterion) {
    let mut group = c.benchmark_group("neumorph");
    group.sample_size(30);

    for &(shape_type, elevation) in &[
        (ShapeType::Flat, 4.0),
        (ShapeType::Flat, 12.0),
        (ShapeType::Pressed, 4.0),
        (ShapeType::Basin, 4.0),
    ] {
        // Dirty draw: outline plus shadow masks rendered and blurred.
        group.bench_function(format!("regenerate({shape_type:?},e={elevation})"), |b| {
            b.iter_batched(
                || (drawable(shape_type, elevation), RefBackend::default()),
                |(mut d, mut canvas)| {
                    d.draw(&mut canvas);
                    black_box(d.regeneration_count());
                },
                BatchSize::SmallInput,
            );
        });
    }

    // Clean draw: only recorded ops, cached bitmaps are reused.
    group.bench_function("clean_draw(Basin)", |b| {
        let mut d = drawable(ShapeType::Basin, 6.0);
        d.draw(&mut RefBackend::default());
        b.iter_batched(
            RefBackend::default,
            |mut canvas| {
                d.draw(&mut canvas);
                black_box(canvas.ops().len());
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("rasterize(Flat,e=6)", |b| {
        let mut d = drawable(ShapeType::Flat, 6.0);
        d.set_bounds(Rect::new(12.0, 12.0, 172.0, 60.0));
        d.draw(&mut RefBackend::default());
        b.iter(|| VelloCpuRasterizer.rasterize(184, 72, &mut |canvas| d.draw(canvas)));
    });

    group.finish();
}

criterion_group!(benches, bench_drawable);
criterion_main!(benches);
