// Copyright 2025 the Neumorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shadow variants.
//!
//! Every variant renders a light and a dark copy of a mask, blurs them with
//! the state's [`BlurProvider`](neumorph_imaging::BlurProvider), caches the
//! pair, and composites it relative to the outline:
//!
//! - [`FlatShadow`]: the mask is the shape, drawn outside the outline.
//! - [`PressedShadow`]: the mask is a frame around the shape, drawn inside
//!   the outline.
//! - [`BasinShadow`]: both.
//!
//! The light copy is always offset toward the light source and the dark copy
//! away from it. Clipping decides which sides end up visible.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `ceil`
use kurbo::{Affine, BezPath, Rect, Shape, Size, Vec2};
use neumorph_imaging::{
    Bitmap, Brush, CLIP_TOLERANCE, ClipShape, DrawOp, FillRule, ImagingBackend, ImagingBackendExt,
    StateOp, is_noop_blur_radius,
};
use neumorph_shape::ShapeAppearanceModel;
use tracing::trace;

use crate::{Argb, ShapeDrawableState, ShapeType};

/// Inputs a cached bitmap pair was built from.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ShadowKey {
    rect: Rect,
    appearance: ShapeAppearanceModel,
    elevation: f64,
    light: Argb,
    dark: Argb,
    blur_radius: f32,
}

impl ShadowKey {
    fn new(state: &ShapeDrawableState, rect: Rect) -> Self {
        Self {
            rect,
            appearance: *state.appearance,
            elevation: state.shadow_elevation,
            light: state.shadow_color_light,
            dark: state.shadow_color_dark,
            blur_radius: state.blur_radius(),
        }
    }

    /// Returns `true` if `state` would build the same bitmaps for this rect.
    fn matches_state(&self, state: &ShapeDrawableState) -> bool {
        *self == Self::new(state, self.rect)
    }
}

#[derive(Clone, Debug)]
struct ShadowBitmaps {
    key: ShadowKey,
    kind: MaskKind,
    padding: f64,
    light: Bitmap,
    dark: Bitmap,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MaskKind {
    /// The shape itself.
    Shape,
    /// The padded rect with the shape cut out.
    Frame,
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "float to int casts saturate and shadow extents are small"
)]
fn pixel_extent(len: f64) -> u32 {
    len.ceil().max(0.0) as u32
}

/// Largest mask side rendered, in pixels.
const MAX_MASK_EXTENT: f64 = u16::MAX as f64;

fn render_mask(
    state: &ShapeDrawableState,
    kind: MaskKind,
    rect: Rect,
    outline: &BezPath,
    padding: f64,
    color: Argb,
) -> Bitmap {
    let (w, h) = (rect.width() + 2.0 * padding, rect.height() + 2.0 * padding);
    if !(w.is_finite() && h.is_finite() && w <= MAX_MASK_EXTENT && h <= MAX_MASK_EXTENT) {
        return Bitmap::empty();
    }
    let width = pixel_extent(w);
    let height = pixel_extent(h);
    let local = Affine::translate(Vec2::new(padding - rect.x0, padding - rect.y0)) * outline.clone();
    let (path, fill_rule) = match kind {
        MaskKind::Shape => (local, FillRule::NonZero),
        MaskKind::Frame => {
            let mut frame = Rect::new(0.0, 0.0, f64::from(width), f64::from(height))
                .to_path(CLIP_TOLERANCE);
            frame.extend(local);
            (frame, FillRule::EvenOdd)
        }
    };

    let mask = state
        .services
        .rasterizer
        .rasterize(width, height, &mut |canvas| {
            canvas.state(StateOp::SetFillRule(fill_rule));
            canvas.state(StateOp::SetBrush(Brush::Solid(color.into())));
            canvas.draw(DrawOp::FillPath(path.clone()));
        });

    let radius = state.blur_radius();
    if is_noop_blur_radius(radius) {
        mask
    } else {
        state.services.blur.blur(&mask, radius)
    }
}

/// Build and cache a light/dark pair unless the cache already matches.
fn refresh(
    cache: &mut Option<ShadowBitmaps>,
    kind: MaskKind,
    padding_factor: f64,
    state: &ShapeDrawableState,
    rect: Rect,
    outline: &BezPath,
) -> bool {
    let key = ShadowKey::new(state, rect);
    if cache.as_ref().is_some_and(|cached| cached.key == key) {
        trace!(?kind, "shadow bitmaps reused");
        return false;
    }
    let padding = (padding_factor * state.shadow_elevation.max(0.0)).ceil();
    let light = render_mask(state, kind, rect, outline, padding, key.light);
    let dark = render_mask(state, kind, rect, outline, padding, key.dark);
    trace!(
        ?kind,
        width = light.width(),
        height = light.height(),
        "shadow bitmaps regenerated"
    );
    *cache = Some(ShadowBitmaps {
        key,
        kind,
        padding,
        light,
        dark,
    });
    true
}

/// Draw the cached pair at its offsets, under whatever clip is active.
///
/// A frame never moves further than its padding, so its inner edge keeps
/// covering the outline.
fn draw_pair(
    canvas: &mut dyn ImagingBackend,
    bitmaps: &ShadowBitmaps,
    state: &ShapeDrawableState,
    rect: Rect,
) {
    let origin = rect.origin() - Vec2::new(bitmaps.padding, bitmaps.padding);
    let distance = match bitmaps.kind {
        MaskKind::Shape => state.shadow_offset(),
        MaskKind::Frame => state
            .shadow_offset()
            .clamp(-bitmaps.padding, bitmaps.padding),
    };
    let offset = state.light_source.direction() * distance;
    let size = Size::new(
        f64::from(bitmaps.light.width()),
        f64::from(bitmaps.light.height()),
    );
    canvas.draw(DrawOp::DrawBitmap {
        bitmap: bitmaps.light.clone(),
        dst: Rect::from_origin_size(origin + offset, size),
    });
    canvas.draw(DrawOp::DrawBitmap {
        bitmap: bitmaps.dark.clone(),
        dst: Rect::from_origin_size(origin - offset, size),
    });
}

/// Drop the cache if `state` no longer produces it.
fn rebind_cache(cache: &mut Option<ShadowBitmaps>, state: &ShapeDrawableState) -> bool {
    let stale = cache
        .as_ref()
        .is_some_and(|cached| !cached.key.matches_state(state));
    if stale {
        *cache = None;
    }
    stale
}

/// Outward shadow of a raised shape.
///
/// The mask is the shape padded by `ceil(elevation)`, blurred by the
/// elevation, and drawn outside the outline.
#[derive(Clone, Debug, Default)]
pub struct FlatShadow {
    cache: Option<ShadowBitmaps>,
}

impl FlatShadow {
    /// Create a variant with nothing cached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the cached bitmaps for `rect` and `outline` if any input
    /// changed. Returns `true` if they were rebuilt.
    pub fn update_shadow_bitmap(
        &mut self,
        state: &ShapeDrawableState,
        rect: Rect,
        outline: &BezPath,
    ) -> bool {
        refresh(&mut self.cache, MaskKind::Shape, 1.0, state, rect, outline)
    }

    /// Composite the cached bitmaps outside `outline`.
    pub fn draw(
        &self,
        canvas: &mut dyn ImagingBackend,
        outline: &BezPath,
        state: &ShapeDrawableState,
        rect: Rect,
    ) {
        let Some(bitmaps) = &self.cache else {
            return;
        };
        canvas.with_clip_out(ClipShape::Path(outline.clone()), |canvas| {
            draw_pair(canvas, bitmaps, state, rect);
        });
    }

    /// Bind to a new state. Returns `true` if the cache went stale.
    pub fn rebind(&mut self, state: &ShapeDrawableState) -> bool {
        rebind_cache(&mut self.cache, state)
    }

    /// Returns `true` if bitmaps are cached.
    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }
}

/// Inner shading of a sunken shape.
///
/// The mask is a frame padded by `ceil(2 * elevation)` around the shape,
/// blurred by the elevation, and drawn inside the outline.
#[derive(Clone, Debug, Default)]
pub struct PressedShadow {
    cache: Option<ShadowBitmaps>,
}

impl PressedShadow {
    /// Create a variant with nothing cached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the cached bitmaps for `rect` and `outline` if any input
    /// changed. Returns `true` if they were rebuilt.
    pub fn update_shadow_bitmap(
        &mut self,
        state: &ShapeDrawableState,
        rect: Rect,
        outline: &BezPath,
    ) -> bool {
        refresh(&mut self.cache, MaskKind::Frame, 2.0, state, rect, outline)
    }

    /// Composite the cached bitmaps inside `outline`.
    pub fn draw(
        &self,
        canvas: &mut dyn ImagingBackend,
        outline: &BezPath,
        state: &ShapeDrawableState,
        rect: Rect,
    ) {
        let Some(bitmaps) = &self.cache else {
            return;
        };
        canvas.with_clip(ClipShape::Path(outline.clone()), |canvas| {
            draw_pair(canvas, bitmaps, state, rect);
        });
    }

    /// Bind to a new state. Returns `true` if the cache went stale.
    pub fn rebind(&mut self, state: &ShapeDrawableState) -> bool {
        rebind_cache(&mut self.cache, state)
    }

    /// Returns `true` if bitmaps are cached.
    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }
}

/// Carved look: an outward [`FlatShadow`] plus inward [`PressedShadow`].
#[derive(Clone, Debug, Default)]
pub struct BasinShadow {
    flat: FlatShadow,
    pressed: PressedShadow,
}

impl BasinShadow {
    /// Create a variant with nothing cached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild both parts as needed. Returns `true` if either was rebuilt.
    pub fn update_shadow_bitmap(
        &mut self,
        state: &ShapeDrawableState,
        rect: Rect,
        outline: &BezPath,
    ) -> bool {
        let flat = self.flat.update_shadow_bitmap(state, rect, outline);
        let pressed = self.pressed.update_shadow_bitmap(state, rect, outline);
        flat || pressed
    }

    /// Composite the outer shadow, then the inner shading.
    pub fn draw(
        &self,
        canvas: &mut dyn ImagingBackend,
        outline: &BezPath,
        state: &ShapeDrawableState,
        rect: Rect,
    ) {
        self.flat.draw(canvas, outline, state, rect);
        self.pressed.draw(canvas, outline, state, rect);
    }

    /// Bind to a new state. Returns `true` if either cache went stale.
    pub fn rebind(&mut self, state: &ShapeDrawableState) -> bool {
        let flat = self.flat.rebind(state);
        let pressed = self.pressed.rebind(state);
        flat || pressed
    }

    /// Returns `true` if both parts have bitmaps cached.
    pub fn is_cached(&self) -> bool {
        self.flat.is_cached() && self.pressed.is_cached()
    }
}

/// The active shadow strategy of a drawable.
#[derive(Clone, Debug)]
pub enum ShadowVariant {
    /// See [`FlatShadow`].
    Flat(FlatShadow),
    /// See [`PressedShadow`].
    Pressed(PressedShadow),
    /// See [`BasinShadow`].
    Basin(BasinShadow),
}

impl ShadowVariant {
    /// An empty variant for `shape_type`.
    pub fn for_shape_type(shape_type: ShapeType) -> Self {
        match shape_type {
            ShapeType::Flat => Self::Flat(FlatShadow::new()),
            ShapeType::Pressed => Self::Pressed(PressedShadow::new()),
            ShapeType::Basin => Self::Basin(BasinShadow::new()),
        }
    }

    /// The shape type this variant renders.
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Self::Flat(_) => ShapeType::Flat,
            Self::Pressed(_) => ShapeType::Pressed,
            Self::Basin(_) => ShapeType::Basin,
        }
    }

    /// Rebuild cached bitmaps if any input changed. Returns `true` if
    /// anything was rebuilt.
    pub fn update_shadow_bitmap(
        &mut self,
        state: &ShapeDrawableState,
        rect: Rect,
        outline: &BezPath,
    ) -> bool {
        match self {
            Self::Flat(v) => v.update_shadow_bitmap(state, rect, outline),
            Self::Pressed(v) => v.update_shadow_bitmap(state, rect, outline),
            Self::Basin(v) => v.update_shadow_bitmap(state, rect, outline),
        }
    }

    /// Composite the cached bitmaps.
    pub fn draw(
        &self,
        canvas: &mut dyn ImagingBackend,
        outline: &BezPath,
        state: &ShapeDrawableState,
        rect: Rect,
    ) {
        match self {
            Self::Flat(v) => v.draw(canvas, outline, state, rect),
            Self::Pressed(v) => v.draw(canvas, outline, state, rect),
            Self::Basin(v) => v.draw(canvas, outline, state, rect),
        }
    }

    /// Bind to a new state, keeping cached bitmaps that still match.
    /// Returns `true` if anything cached went stale.
    pub fn rebind(&mut self, state: &ShapeDrawableState) -> bool {
        match self {
            Self::Flat(v) => v.rebind(state),
            Self::Pressed(v) => v.rebind(state),
            Self::Basin(v) => v.rebind(state),
        }
    }

    /// Returns `true` if the variant has everything it draws cached.
    pub fn is_cached(&self) -> bool {
        match self {
            Self::Flat(v) => v.is_cached(),
            Self::Pressed(v) => v.is_cached(),
            Self::Basin(v) => v.is_cached(),
        }
    }
}
