// Copyright 2025 the Neumorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Neumorph Imaging: the canvas IR that shape drawables paint into.
//!
//! This crate defines a small imaging intermediate representation plus the
//! host services a soft-UI drawable needs from its toolkit. It sits between
//! the drawables in `neumorph` and concrete renderers.
//!
//! # Core concepts
//!
//! - **Canvas operations**: [`StateOp`] (mutate state: layers, brush,
//!   stroke, fill rule) and [`DrawOp`] (produce pixels: fill, stroke,
//!   bitmap), combined into [`ImagingOp`] for logging and replay.
//! - **Canvas**: [`ImagingBackend`] accepts those ops. [`ImagingBackendExt`]
//!   adds scoped helpers such as [`ImagingBackendExt::with_clip_out`], which
//!   is how outward shadows stay behind a shape.
//! - **Bitmaps**: [`Bitmap`] is a cheap-to-clone, straight-alpha RGBA8 pixel
//!   buffer used for cached shadows and image content.
//! - **Services**: [`Rasterizer`] runs canvas ops into an offscreen
//!   [`Bitmap`], and [`BlurProvider`] blurs a bitmap by a radius. Both are
//!   black boxes from the drawable's point of view.
//!
//! Unlike a retained renderer, paths and bitmaps are carried inline in the
//! ops. Drawables rebuild their geometry rarely (only when dirty), so the
//! per-frame cost is a handful of clones.
//!
//! # Example
//!
//! ```ignore
//! # use neumorph_imaging::*;
//! # use kurbo::{Rect, Shape};
//! # struct MyCanvas;
//! # impl ImagingBackend for MyCanvas { /* ... */ }
//! let mut canvas = MyCanvas;
//! let outline = Rect::new(0.0, 0.0, 10.0, 10.0).to_path(0.1);
//!
//! canvas.state(StateOp::SetBrush(Brush::Solid(Color::WHITE)));
//! canvas.with_clip_out(ClipShape::Path(outline.clone()), |c| {
//!     c.draw(DrawOp::FillPath(outline));
//! });
//! ```

#![no_std]

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{BezPath, Rect, RoundedRect, Shape};
use peniko::{Blob, ImageAlphaType, ImageData, ImageFormat};

pub use peniko::{Brush, Color, Fill as FillRule};

/// Stroke style used by `StateOp::SetStroke`.
///
/// This is a re-export of [`kurbo::Stroke`], which captures width, joins,
/// caps, dashes, and related stroke parameters.
pub type StrokeStyle = kurbo::Stroke;

/// Flattening tolerance used when converting clip shapes into paths.
pub const CLIP_TOLERANCE: f64 = 0.1;

/// Error returned when a pixel buffer does not match its declared size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapSizeError {
    /// Declared width in pixels.
    pub width: u32,
    /// Declared height in pixels.
    pub height: u32,
    /// Length of the buffer that was supplied, in bytes.
    pub len: usize,
}

impl fmt::Display for BitmapSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pixel buffer of {} bytes does not hold a {}x{} RGBA8 bitmap",
            self.len, self.width, self.height
        )
    }
}

impl core::error::Error for BitmapSizeError {}

/// A straight-alpha RGBA8 bitmap.
///
/// Pixels are tightly packed and row-major. Cloning is cheap: the pixel data
/// is shared behind an [`Arc`], and [`Bitmap::ptr_eq`] tells whether two
/// bitmaps are the same allocation.
///
/// A zero-sized bitmap is valid and draws nothing.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels", &self.pixels.len())
            .finish()
    }
}

impl Bitmap {
    /// Create a bitmap from straight-alpha RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, BitmapSizeError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4));
        if expected != Some(pixels.len()) {
            return Err(BitmapSizeError {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    /// Create a fully transparent bitmap.
    pub fn transparent(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * 4;
        Self {
            width,
            height,
            pixels: vec![0_u8; len].into(),
        }
    }

    /// Create an empty (zero-sized) bitmap.
    pub fn empty() -> Self {
        Self::transparent(0, 0)
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `true` if the bitmap has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGBA8 pixel data.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The RGBA8 value at `(x, y)`, or `None` when out of range.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let p = self.pixels.get(idx..idx + 4)?;
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Returns `true` if both bitmaps share the same pixel allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }

    /// The bitmap's bounds at the origin, in pixels.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Convert into a peniko image for renderers that consume [`ImageData`].
    pub fn to_image_data(&self) -> ImageData {
        ImageData {
            data: Blob::from(self.pixels.to_vec()),
            format: ImageFormat::Rgba8,
            alpha_type: ImageAlphaType::Alpha,
            width: self.width,
            height: self.height,
        }
    }
}

/// Shape used to define a clip region.
#[derive(Clone, Debug, PartialEq)]
pub enum ClipShape {
    /// An axis-aligned rectangle in local coordinates.
    Rect(Rect),
    /// An axis-aligned rounded rectangle in local coordinates.
    RoundedRect(RoundedRect),
    /// An arbitrary closed path in local coordinates.
    Path(BezPath),
}

impl ClipShape {
    /// Convert the clip shape into a path, flattening curves with `tolerance`.
    pub fn to_path(&self, tolerance: f64) -> BezPath {
        match self {
            Self::Rect(rect) => rect.to_path(tolerance),
            Self::RoundedRect(rr) => rr.to_path(tolerance),
            Self::Path(path) => path.clone(),
        }
    }
}

/// A clipping operation attached to a pushed layer.
#[derive(Clone, Debug, PartialEq)]
pub enum ClipOp {
    /// Keep only what is drawn inside `shape`.
    Inside {
        /// Shape defining the visible region.
        shape: ClipShape,
        /// Fill rule used to decide what "inside" means for paths.
        fill_rule: FillRule,
    },
    /// Keep only what is drawn outside `shape`.
    ///
    /// Backends typically implement this by combining `shape` with a rect
    /// covering the whole target and clipping with [`FillRule::EvenOdd`].
    Outside {
        /// Shape whose interior is excluded.
        shape: ClipShape,
    },
}

/// Parameters for a pushed layer.
///
/// Layers are the scoping mechanism for clipping. They must be well-nested:
/// every [`StateOp::PushLayer`] is matched by a [`StateOp::PopLayer`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerOp {
    /// Optional clip applied to this layer's contents.
    pub clip: Option<ClipOp>,
}

impl LayerOp {
    /// A layer clipped by `clip`.
    #[inline]
    pub fn clipped(clip: ClipOp) -> Self {
        Self { clip: Some(clip) }
    }

    /// Returns true if this layer has no effect at all.
    ///
    /// Backends may use this to elide pushing/popping layers.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.clip.is_none()
    }
}

/// State operations that mutate the current canvas state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateOp {
    /// Push a new layer onto the layer stack.
    PushLayer(LayerOp),
    /// Pop the most recently pushed layer.
    PopLayer,
    /// Set the brush used by fills and strokes.
    SetBrush(Brush),
    /// Set the current stroke style.
    SetStroke(StrokeStyle),
    /// Set the fill rule used by [`DrawOp::FillPath`].
    ///
    /// The default fill rule is [`FillRule::NonZero`].
    SetFillRule(FillRule),
}

/// Draw operations that produce pixels given the current state.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill the path with the current brush and fill rule.
    FillPath(BezPath),
    /// Stroke the path with the current stroke and brush.
    StrokePath(BezPath),
    /// Draw a bitmap scaled into `dst` (local coordinates).
    ///
    /// Empty bitmaps and empty destinations draw nothing.
    DrawBitmap {
        /// Bitmap to draw.
        bitmap: Bitmap,
        /// Destination rectangle.
        dst: Rect,
    },
}

/// Unified canvas operation used by recordings and logs.
#[derive(Clone, Debug, PartialEq)]
pub enum ImagingOp {
    /// State-changing operation.
    State(StateOp),
    /// Drawing operation.
    Draw(DrawOp),
}

/// The canvas a drawable paints into.
pub trait ImagingBackend {
    /// Apply a state operation.
    fn state(&mut self, op: StateOp);

    /// Apply a draw operation.
    fn draw(&mut self, op: DrawOp);

    /// Push a new layer onto the layer stack.
    ///
    /// This is equivalent to `self.state(StateOp::PushLayer(op))`.
    #[inline]
    fn layer_push(&mut self, op: LayerOp) {
        self.state(StateOp::PushLayer(op));
    }

    /// Pop the most recently pushed layer.
    ///
    /// This is equivalent to `self.state(StateOp::PopLayer)`.
    #[inline]
    fn layer_pop(&mut self) {
        self.state(StateOp::PopLayer);
    }

    /// Push a layer that keeps only the interior of `shape`.
    ///
    /// The clip scope ends when you call [`ImagingBackend::layer_pop`].
    #[inline]
    fn clip_to_shape(&mut self, shape: ClipShape, fill_rule: FillRule) {
        self.layer_push(LayerOp::clipped(ClipOp::Inside { shape, fill_rule }));
    }

    /// Push a layer that keeps only the exterior of `shape`.
    ///
    /// The clip scope ends when you call [`ImagingBackend::layer_pop`].
    #[inline]
    fn clip_out_shape(&mut self, shape: ClipShape) {
        self.layer_push(LayerOp::clipped(ClipOp::Outside { shape }));
    }
}

/// Scoped helpers for [`ImagingBackend`] implementations and callers.
///
/// This is separate from [`ImagingBackend`] so that methods can accept closures and return values
/// without complicating trait object usage (`&mut dyn ImagingBackend`).
pub trait ImagingBackendExt: ImagingBackend {
    /// Run `f` inside a pushed layer, popping it afterwards.
    ///
    /// Note: if `f` panics, the layer will not be popped.
    #[inline]
    fn with_layer<R>(&mut self, op: LayerOp, f: impl FnOnce(&mut Self) -> R) -> R {
        self.layer_push(op);
        let out = f(self);
        self.layer_pop();
        out
    }

    /// Run `f` inside a layer clipped to the interior of `shape` (non-zero fill rule).
    ///
    /// Note: if `f` panics, the layer will not be popped.
    #[inline]
    fn with_clip<R>(&mut self, shape: ClipShape, f: impl FnOnce(&mut Self) -> R) -> R {
        self.with_layer(
            LayerOp::clipped(ClipOp::Inside {
                shape,
                fill_rule: FillRule::NonZero,
            }),
            f,
        )
    }

    /// Run `f` inside a layer clipped to the exterior of `shape`.
    ///
    /// Note: if `f` panics, the layer will not be popped.
    #[inline]
    fn with_clip_out<R>(&mut self, shape: ClipShape, f: impl FnOnce(&mut Self) -> R) -> R {
        self.with_layer(LayerOp::clipped(ClipOp::Outside { shape }), f)
    }
}

impl<B: ImagingBackend + ?Sized> ImagingBackendExt for B {}

/// Runs canvas operations into an offscreen [`Bitmap`].
///
/// This is the "draw into a bitmap" service of the host toolkit. It is used
/// to build shadow masks and to rasterize arbitrary drawables into image
/// content.
pub trait Rasterizer {
    /// Rasterize whatever `paint` draws into a `width` x `height` bitmap.
    ///
    /// When either dimension is zero, implementations return an empty
    /// bitmap without calling `paint`.
    fn rasterize(
        &self,
        width: u32,
        height: u32,
        paint: &mut dyn FnMut(&mut dyn ImagingBackend),
    ) -> Bitmap;
}

/// Blurs bitmaps.
///
/// Implementations must return the source unchanged for a radius that is
/// zero, negative, or NaN, and must not cache results: callers decide when a
/// blur is needed.
pub trait BlurProvider {
    /// Blur `bitmap` by `radius` pixels, returning a bitmap of the same size.
    fn blur(&self, bitmap: &Bitmap, radius: f32) -> Bitmap;
}

/// Returns `true` if `radius` asks for no blur at all.
#[inline]
pub fn is_noop_blur_radius(radius: f32) -> bool {
    radius.is_nan() || radius <= 0.0
}

/// A [`BlurProvider`] that never blurs.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoBlur;

impl BlurProvider for NoBlur {
    fn blur(&self, bitmap: &Bitmap, _radius: f32) -> Bitmap {
        bitmap.clone()
    }
}
