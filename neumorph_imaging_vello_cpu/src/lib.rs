// Copyright 2025 the Neumorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vello CPU–backed implementations of the Neumorph host services.
//!
//! - [`VelloCpuImagingBackend`] implements [`ImagingBackend`] on top of the
//!   sparse-strips [`vello_cpu::RenderContext`].
//! - [`VelloCpuRasterizer`] implements [`Rasterizer`] by rendering into a
//!   fresh context and reading the pixels back.
//! - [`VelloCpuBlur`] implements [`BlurProvider`] with a Gaussian blur filter
//!   layer.
//!
//! Together they let a drawable render to real pixels without a windowing
//! toolkit, which is what the integration tests and headless hosts use.

#![deny(unsafe_code)]
#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Affine, BezPath, Rect, Shape};
use neumorph_imaging::{
    Bitmap, BlurProvider, Brush, CLIP_TOLERANCE, ClipOp, DrawOp, FillRule, ImagingBackend,
    LayerOp, Rasterizer, StateOp, is_noop_blur_radius,
};
use peniko::ImageSampler;
use vello_common::filter_effects::{EdgeMode, Filter, FilterPrimitive};
use vello_cpu::{Image as CpuImage, ImageSource, Pixmap, RenderContext};

/// Scale from a blur radius to a Gaussian standard deviation.
///
/// This is the conventional mapping used by raster blur implementations:
/// `sigma = 0.57735 * radius + 0.5`.
pub const BLUR_SIGMA_SCALE: f32 = 0.577_35;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum StackEntry {
    Noop,
    Pushed,
}

fn with_temp_fill_rule<C>(
    ctx: &mut C,
    saved: FillRule,
    desired: FillRule,
    mut set_rule: impl FnMut(&mut C, FillRule),
    f: impl FnOnce(&mut C),
) {
    if desired != saved {
        set_rule(ctx, desired);
    }
    f(ctx);
    if desired != saved {
        set_rule(ctx, saved);
    }
}

/// CPU-backed canvas using `vello_cpu`.
pub struct VelloCpuImagingBackend<'ctx> {
    /// Underlying Vello CPU render context to draw into.
    pub ctx: &'ctx mut RenderContext,
    stack: Vec<StackEntry>,
    current_fill_rule: FillRule,
}

impl fmt::Debug for VelloCpuImagingBackend<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VelloCpuImagingBackend { .. }")
    }
}

impl<'ctx> VelloCpuImagingBackend<'ctx> {
    /// Create a new backend that renders into the given CPU render context.
    pub fn new(ctx: &'ctx mut RenderContext) -> Self {
        Self {
            ctx,
            stack: Vec::new(),
            current_fill_rule: FillRule::NonZero,
        }
    }

    /// Pop every layer that is still open.
    ///
    /// Call this before flushing when the drawing code may have left layers
    /// unbalanced.
    pub fn pop_all_layers(&mut self) {
        while let Some(entry) = self.stack.pop() {
            if entry == StackEntry::Pushed {
                self.ctx.pop_layer();
            }
        }
    }

    /// The render target in the current user space.
    fn viewport(&self) -> Rect {
        let target = Rect::new(
            0.0,
            0.0,
            f64::from(self.ctx.width()),
            f64::from(self.ctx.height()),
        );
        let xf = *self.ctx.transform();
        xf.inverse().transform_rect_bbox(target).inflate(1.0, 1.0)
    }

    fn clip_path(&self, clip: &ClipOp) -> (BezPath, FillRule) {
        match clip {
            ClipOp::Inside { shape, fill_rule } => (shape.to_path(CLIP_TOLERANCE), *fill_rule),
            ClipOp::Outside { shape } => {
                let mut path = self.viewport().to_path(CLIP_TOLERANCE);
                path.extend(shape.to_path(CLIP_TOLERANCE));
                (path, FillRule::EvenOdd)
            }
        }
    }

    fn apply_brush(&mut self, brush: Brush) {
        match brush {
            Brush::Solid(color) => self.ctx.set_paint(color),
            Brush::Gradient(gradient) => self.ctx.set_paint(gradient),
            Brush::Image(image_brush) => {
                let source = ImageSource::from_peniko_image_data(&image_brush.image);
                self.ctx.set_paint(CpuImage {
                    image: source,
                    sampler: image_brush.sampler,
                });
            }
        }
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, dst: Rect) {
        if bitmap.is_empty() || dst.width() <= 0.0 || dst.height() <= 0.0 {
            return;
        }
        let src = bitmap.rect();
        let local = Affine::translate((dst.x0, dst.y0))
            * Affine::scale_non_uniform(dst.width() / src.width(), dst.height() / src.height());

        let source = ImageSource::from_peniko_image_data(&bitmap.to_image_data());
        let image_paint = CpuImage {
            image: source,
            sampler: ImageSampler::default(),
        };

        let saved_transform = *self.ctx.transform();
        let saved_paint = self.ctx.paint().clone();

        self.ctx.set_paint(image_paint);
        self.ctx.set_transform(saved_transform * local);
        self.ctx.fill_rect(&src);

        self.ctx.set_transform(saved_transform);
        self.ctx.set_paint(saved_paint);
    }
}

impl ImagingBackend for VelloCpuImagingBackend<'_> {
    fn state(&mut self, op: StateOp) {
        match op {
            StateOp::PushLayer(LayerOp { clip }) => match clip {
                Some(clip) => {
                    let (path, desired) = self.clip_path(&clip);
                    let saved = self.current_fill_rule;
                    with_temp_fill_rule(
                        self.ctx,
                        saved,
                        desired,
                        |ctx, rule| ctx.set_fill_rule(rule),
                        |ctx| ctx.push_layer(Some(&path), None, None, None, None),
                    );
                    self.stack.push(StackEntry::Pushed);
                }
                None => self.stack.push(StackEntry::Noop),
            },
            StateOp::PopLayer => match self.stack.pop() {
                Some(StackEntry::Noop) => {}
                Some(StackEntry::Pushed) => self.ctx.pop_layer(),
                None => panic!("PopLayer with empty stack"),
            },
            StateOp::SetBrush(brush) => self.apply_brush(brush),
            StateOp::SetStroke(style) => self.ctx.set_stroke(style),
            StateOp::SetFillRule(rule) => {
                self.current_fill_rule = rule;
                self.ctx.set_fill_rule(rule);
            }
        }
    }

    fn draw(&mut self, op: DrawOp) {
        match op {
            DrawOp::FillPath(path) => self.ctx.fill_path(&path),
            DrawOp::StrokePath(path) => self.ctx.stroke_path(&path),
            DrawOp::DrawBitmap { bitmap, dst } => self.draw_bitmap(&bitmap, dst),
        }
    }
}

fn target_size(width: u32, height: u32) -> Option<(u16, u16)> {
    Some((u16::try_from(width).ok()?, u16::try_from(height).ok()?))
}

fn pixmap_to_bitmap(pixmap: Pixmap, width: u16, height: u16) -> Bitmap {
    let unpremul = pixmap.take_unpremultiplied();
    let mut bytes = Vec::with_capacity(unpremul.len() * 4);
    for p in unpremul {
        bytes.extend_from_slice(&[p.r, p.g, p.b, p.a]);
    }
    Bitmap::from_rgba8(u32::from(width), u32::from(height), bytes)
        .unwrap_or_else(|_| Bitmap::empty())
}

/// [`Rasterizer`] that renders with `vello_cpu`.
///
/// Targets larger than `u16::MAX` pixels in either dimension cannot be
/// represented by `vello_cpu` and produce an empty bitmap.
#[derive(Copy, Clone, Debug, Default)]
pub struct VelloCpuRasterizer;

impl Rasterizer for VelloCpuRasterizer {
    fn rasterize(
        &self,
        width: u32,
        height: u32,
        paint: &mut dyn FnMut(&mut dyn ImagingBackend),
    ) -> Bitmap {
        if width == 0 || height == 0 {
            return Bitmap::empty();
        }
        let Some((w, h)) = target_size(width, height) else {
            return Bitmap::empty();
        };

        let mut ctx = RenderContext::new(w, h);
        {
            let mut backend = VelloCpuImagingBackend::new(&mut ctx);
            paint(&mut backend);
            backend.pop_all_layers();
        }
        ctx.flush();
        let mut pixmap = Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        pixmap_to_bitmap(pixmap, w, h)
    }
}

/// Gaussian [`BlurProvider`] backed by a `vello_cpu` filter layer.
///
/// The output has the size of the input; content blurred past the edges is
/// lost, so callers pad their bitmaps by the blur radius.
#[derive(Copy, Clone, Debug, Default)]
pub struct VelloCpuBlur;

impl VelloCpuBlur {
    /// Standard deviation used for a given blur radius.
    pub fn sigma_for_radius(radius: f32) -> f32 {
        radius * BLUR_SIGMA_SCALE + 0.5
    }
}

impl BlurProvider for VelloCpuBlur {
    fn blur(&self, bitmap: &Bitmap, radius: f32) -> Bitmap {
        if is_noop_blur_radius(radius) || bitmap.is_empty() {
            return bitmap.clone();
        }
        let Some((w, h)) = target_size(bitmap.width(), bitmap.height()) else {
            return bitmap.clone();
        };

        let filter = Filter::from_primitive(FilterPrimitive::GaussianBlur {
            std_deviation: Self::sigma_for_radius(radius),
            edge_mode: EdgeMode::None,
        });

        let mut ctx = RenderContext::new(w, h);
        ctx.push_layer(None, None, None, None, Some(filter));
        let source = ImageSource::from_peniko_image_data(&bitmap.to_image_data());
        ctx.set_paint(CpuImage {
            image: source,
            sampler: ImageSampler::default(),
        });
        ctx.fill_rect(&bitmap.rect());
        ctx.pop_layer();
        ctx.flush();

        let mut pixmap = Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        pixmap_to_bitmap(pixmap, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use neumorph_imaging::{ClipShape, Color, ImagingBackendExt};

    fn solid(c: &mut dyn ImagingBackend, color: Color, rect: Rect) {
        c.state(StateOp::SetBrush(Brush::Solid(color)));
        c.draw(DrawOp::FillPath(rect.to_path(CLIP_TOLERANCE)));
    }

    #[test]
    fn rasterizes_solid_fill() {
        let bmp = VelloCpuRasterizer.rasterize(16, 16, &mut |c| {
            solid(c, Color::from_rgba8(255, 0, 0, 255), Rect::new(0.0, 0.0, 16.0, 16.0));
        });
        assert_eq!((bmp.width(), bmp.height()), (16, 16));
        assert_eq!(bmp.pixel(8, 8), Some([255, 0, 0, 255]));
    }

    #[test]
    fn empty_request_skips_rendering() {
        let mut painted = false;
        let bmp = VelloCpuRasterizer.rasterize(0, 4, &mut |_| painted = true);
        assert!(bmp.is_empty());
        assert!(!painted);
    }

    #[test]
    fn clip_out_keeps_exterior_only() {
        let bmp = VelloCpuRasterizer.rasterize(16, 16, &mut |c| {
            c.with_clip_out(ClipShape::Rect(Rect::new(4.0, 4.0, 12.0, 12.0)), |c| {
                solid(c, Color::WHITE, Rect::new(0.0, 0.0, 16.0, 16.0));
            });
        });
        assert_eq!(bmp.pixel(8, 8).map(|p| p[3]), Some(0));
        assert_eq!(bmp.pixel(1, 1).map(|p| p[3]), Some(255));
    }

    #[test]
    fn clip_inside_keeps_interior_only() {
        let bmp = VelloCpuRasterizer.rasterize(16, 16, &mut |c| {
            c.with_clip(ClipShape::Rect(Rect::new(4.0, 4.0, 12.0, 12.0)), |c| {
                solid(c, Color::WHITE, Rect::new(0.0, 0.0, 16.0, 16.0));
            });
        });
        assert_eq!(bmp.pixel(8, 8).map(|p| p[3]), Some(255));
        assert_eq!(bmp.pixel(1, 1).map(|p| p[3]), Some(0));
    }

    #[test]
    fn unbalanced_layers_are_closed() {
        let bmp = VelloCpuRasterizer.rasterize(8, 8, &mut |c| {
            c.clip_to_shape(
                ClipShape::Rect(Rect::new(0.0, 0.0, 4.0, 8.0)),
                FillRule::NonZero,
            );
            solid(c, Color::WHITE, Rect::new(0.0, 0.0, 8.0, 8.0));
        });
        assert_eq!(bmp.pixel(2, 4).map(|p| p[3]), Some(255));
        assert_eq!(bmp.pixel(6, 4).map(|p| p[3]), Some(0));
    }

    #[test]
    fn draw_bitmap_scales_into_destination() {
        let pixels = vec![0, 0, 255, 255];
        let blue = Bitmap::from_rgba8(1, 1, pixels).unwrap();
        let bmp = VelloCpuRasterizer.rasterize(8, 8, &mut |c| {
            c.draw(DrawOp::DrawBitmap {
                bitmap: blue.clone(),
                dst: Rect::new(0.0, 0.0, 4.0, 8.0),
            });
        });
        assert_eq!(bmp.pixel(1, 4), Some([0, 0, 255, 255]));
        assert_eq!(bmp.pixel(6, 4).map(|p| p[3]), Some(0));
    }

    #[test]
    fn zero_radius_blur_is_identity() {
        let bmp = Bitmap::transparent(4, 4);
        assert!(VelloCpuBlur.blur(&bmp, 0.0).ptr_eq(&bmp));
        assert!(VelloCpuBlur.blur(&bmp, -2.0).ptr_eq(&bmp));
    }

    #[test]
    fn blur_spreads_coverage() {
        let block = VelloCpuRasterizer.rasterize(32, 32, &mut |c| {
            solid(c, Color::BLACK, Rect::new(12.0, 12.0, 20.0, 20.0));
        });
        assert_eq!(block.pixel(9, 16).map(|p| p[3]), Some(0));

        let blurred = VelloCpuBlur.blur(&block, 6.0);
        assert_eq!((blurred.width(), blurred.height()), (32, 32));
        assert!(blurred.pixel(9, 16).map(|p| p[3]).unwrap_or(0) > 0);
        assert!(blurred.pixel(16, 16).map(|p| p[3]).unwrap_or(0) < 255);
    }
}
