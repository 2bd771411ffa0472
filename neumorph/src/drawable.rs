// Copyright 2025 the Neumorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shape drawable.

use alloc::rc::Rc;
use core::fmt;

use kurbo::{BezPath, Rect, Stroke};
use neumorph_imaging::{
    Bitmap, Brush, ClipShape, DrawOp, FillRule, ImagingBackend, ImagingBackendExt, StateOp,
};
use neumorph_shape::{HostOutline, Insets, ShapeAppearanceModel, compute_outline, host_outline};
use tracing::debug;

use crate::{
    Argb, ColorStateList, InteractionState, InvalidationHook, LightSource, NeumorphError,
    PaintStyle, Paintable, RenderServices, ShadowVariant, ShapeDrawableState, ShapeType,
    modulate_color,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Geometry {
    Clean,
    Dirty,
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// A neumorphic shape: fill, dual shadow, stroke and optional image.
///
/// Configuration lives in a shared [`ShapeDrawableState`]; the outline and
/// shadow bitmaps are derived per drawable and rebuilt lazily by
/// [`draw`](Self::draw) after a geometry-affecting change. Paint-only changes
/// (alpha, fill, stroke, translation Z, light source) only ask for a repaint.
///
/// Every mutator is a no-op when the value does not change.
pub struct ShapeDrawable {
    state: Rc<ShapeDrawableState>,
    bounds: Rect,
    geometry: Geometry,
    outline: BezPath,
    shadow: ShadowVariant,
    interaction: InteractionState,
    fill: Option<Argb>,
    stroke: Option<Argb>,
    image: Option<Bitmap>,
    invalidation: Option<Rc<dyn InvalidationHook>>,
    regenerations: u64,
}

impl fmt::Debug for ShapeDrawable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeDrawable")
            .field("state", &self.state)
            .field("bounds", &self.bounds)
            .field("geometry", &self.geometry)
            .field("shadow", &self.shadow.shape_type())
            .field("interaction", &self.interaction)
            .field("regenerations", &self.regenerations)
            .finish_non_exhaustive()
    }
}

impl ShapeDrawable {
    /// A drawable with the default configuration.
    pub fn new(services: RenderServices) -> Self {
        Self::from_constant_state(Rc::new(ShapeDrawableState::new(services)))
    }

    /// A drawable sharing `state` with other drawables.
    ///
    /// The new drawable has empty bounds and builds its own outline and
    /// shadows on first draw.
    pub fn from_constant_state(state: Rc<ShapeDrawableState>) -> Self {
        let shadow = ShadowVariant::for_shape_type(state.shape_type);
        let mut drawable = Self {
            state,
            bounds: Rect::ZERO,
            geometry: Geometry::Dirty,
            outline: BezPath::new(),
            shadow,
            interaction: InteractionState::empty(),
            fill: None,
            stroke: None,
            image: None,
            invalidation: None,
            regenerations: 0,
        };
        drawable.resolve_colors();
        drawable
    }

    /// The configuration, for sharing with [`from_constant_state`](Self::from_constant_state).
    pub fn constant_state(&self) -> Rc<ShapeDrawableState> {
        Rc::clone(&self.state)
    }

    /// Detach from any drawable sharing the configuration.
    ///
    /// The appearance model and services stay shared; everything else is
    /// copied. Setters already copy a shared state before writing, so this
    /// only makes the separation explicit.
    pub fn mutate(&mut self) -> &mut Self {
        self.state = Rc::new(ShapeDrawableState::clone(&self.state));
        if self.shadow.rebind(&self.state) {
            self.geometry = Geometry::Dirty;
        }
        self
    }

    /// Install the hook used by [`invalidate_self`](Self::invalidate_self).
    pub fn set_invalidation_hook(&mut self, hook: Option<Rc<dyn InvalidationHook>>) {
        self.invalidation = hook;
    }

    /// Ask the host for a repaint.
    pub fn invalidate_self(&self) {
        if let Some(hook) = &self.invalidation {
            hook.invalidate();
        }
    }

    fn state_mut(&mut self) -> &mut ShapeDrawableState {
        Rc::make_mut(&mut self.state)
    }

    fn geometry_changed(&mut self) {
        self.geometry = Geometry::Dirty;
        self.invalidate_self();
    }

    /// Re-resolve fill and stroke for the current interaction state. Returns
    /// `true` if either resolved color changed.
    fn resolve_colors(&mut self) -> bool {
        let state = self.interaction;
        let fill = self
            .state
            .fill_color
            .as_ref()
            .map(|list| list.color_for_state(state));
        let stroke = self
            .state
            .stroke_color
            .as_ref()
            .map(|list| list.color_for_state(state));
        let changed = fill != self.fill || stroke != self.stroke;
        self.fill = fill;
        self.stroke = stroke;
        changed
    }

    /// Current bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Move or resize the drawable.
    pub fn set_bounds(&mut self, bounds: Rect) {
        if bounds == self.bounds {
            return;
        }
        self.bounds = bounds;
        self.geometry_changed();
    }

    /// The bounds shrunk by the insets.
    pub fn inset_rect(&self) -> Rect {
        self.state.insets.apply(self.bounds)
    }

    /// Corner appearance.
    pub fn shape_appearance_model(&self) -> &ShapeAppearanceModel {
        &self.state.appearance
    }

    /// Replace the corner appearance.
    pub fn set_shape_appearance_model(&mut self, model: ShapeAppearanceModel) {
        if *self.state.appearance == model {
            return;
        }
        self.state_mut().appearance = Rc::new(model);
        self.geometry_changed();
    }

    /// Insets between the bounds and the shape.
    pub fn insets(&self) -> Insets {
        self.state.insets
    }

    /// Set the insets.
    pub fn set_insets(&mut self, insets: Insets) {
        if self.state.insets == insets {
            return;
        }
        self.state_mut().insets = insets;
        self.geometry_changed();
    }

    /// Set the insets edge by edge.
    pub fn set_inset(&mut self, left: u32, top: u32, right: u32, bottom: u32) {
        self.set_insets(Insets::new(left, top, right, bottom));
    }

    /// Fill colors.
    pub fn fill_color(&self) -> Option<&ColorStateList> {
        self.state.fill_color.as_ref()
    }

    /// Set the fill colors. `None` disables the fill.
    pub fn set_fill_color(&mut self, color: Option<ColorStateList>) {
        if self.state.fill_color == color {
            return;
        }
        self.state_mut().fill_color = color;
        self.resolve_colors();
        self.invalidate_self();
    }

    /// Stroke colors.
    pub fn stroke_color(&self) -> Option<&ColorStateList> {
        self.state.stroke_color.as_ref()
    }

    /// Set the stroke colors. `None` disables the stroke.
    pub fn set_stroke_color(&mut self, color: Option<ColorStateList>) {
        if self.state.stroke_color == color {
            return;
        }
        self.state_mut().stroke_color = color;
        self.resolve_colors();
        self.invalidate_self();
    }

    /// Stroke width.
    pub fn stroke_width(&self) -> f64 {
        self.state.stroke_width
    }

    /// Set the stroke width. Negative or non-finite widths count as zero.
    pub fn set_stroke_width(&mut self, width: f64) {
        let width = non_negative(width);
        if self.state.stroke_width == width {
            return;
        }
        self.state_mut().stroke_width = width;
        self.invalidate_self();
    }

    /// Set stroke width and colors together.
    pub fn set_stroke(&mut self, width: f64, color: Option<ColorStateList>) {
        let width = non_negative(width);
        if self.state.stroke_width == width && self.state.stroke_color == color {
            return;
        }
        let state = self.state_mut();
        state.stroke_width = width;
        state.stroke_color = color;
        self.resolve_colors();
        self.invalidate_self();
    }

    /// Drawable alpha.
    pub fn alpha(&self) -> u8 {
        self.state.alpha
    }

    /// Set the alpha that fill and stroke are modulated by at draw time.
    pub fn set_alpha(&mut self, alpha: u8) {
        if self.state.alpha == alpha {
            return;
        }
        self.state_mut().alpha = alpha;
        self.invalidate_self();
    }

    /// Shape type.
    pub fn shape_type(&self) -> ShapeType {
        self.state.shape_type
    }

    /// Switch the shape type, replacing the shadow variant.
    pub fn set_shape_type(&mut self, shape_type: ShapeType) {
        if self.state.shape_type == shape_type {
            return;
        }
        debug!(from = ?self.state.shape_type, to = ?shape_type, "swapping shadow variant");
        self.state_mut().shape_type = shape_type;
        self.shadow = ShadowVariant::for_shape_type(shape_type);
        self.geometry_changed();
    }

    /// Switch the shape type from a raw attribute value.
    pub fn set_shape_type_raw(&mut self, raw: i32) -> Result<(), NeumorphError> {
        self.set_shape_type(ShapeType::try_from(raw)?);
        Ok(())
    }

    /// Shadow elevation.
    pub fn shadow_elevation(&self) -> f64 {
        self.state.shadow_elevation
    }

    /// Set the shadow elevation. Negative or non-finite values count as zero.
    pub fn set_shadow_elevation(&mut self, elevation: f64) {
        let elevation = non_negative(elevation);
        if self.state.shadow_elevation == elevation {
            return;
        }
        self.state_mut().shadow_elevation = elevation;
        self.geometry_changed();
    }

    /// Light shadow color.
    pub fn shadow_color_light(&self) -> Argb {
        self.state.shadow_color_light
    }

    /// Set the light shadow color.
    pub fn set_shadow_color_light(&mut self, color: Argb) {
        if self.state.shadow_color_light == color {
            return;
        }
        self.state_mut().shadow_color_light = color;
        self.geometry_changed();
    }

    /// Dark shadow color.
    pub fn shadow_color_dark(&self) -> Argb {
        self.state.shadow_color_dark
    }

    /// Set the dark shadow color.
    pub fn set_shadow_color_dark(&mut self, color: Argb) {
        if self.state.shadow_color_dark == color {
            return;
        }
        self.state_mut().shadow_color_dark = color;
        self.geometry_changed();
    }

    /// Extra shadow offset.
    pub fn translation_z(&self) -> f64 {
        self.state.translation_z
    }

    /// Set the extra shadow offset. Non-finite values count as zero.
    pub fn set_translation_z(&mut self, translation_z: f64) {
        let translation_z = if translation_z.is_finite() {
            translation_z
        } else {
            0.0
        };
        if self.state.translation_z == translation_z {
            return;
        }
        self.state_mut().translation_z = translation_z;
        self.invalidate_self();
    }

    /// Paint style.
    pub fn paint_style(&self) -> PaintStyle {
        self.state.paint_style
    }

    /// Set the paint style.
    pub fn set_paint_style(&mut self, style: PaintStyle) {
        if self.state.paint_style == style {
            return;
        }
        self.state_mut().paint_style = style;
        self.invalidate_self();
    }

    /// Light source.
    pub fn light_source(&self) -> LightSource {
        self.state.light_source
    }

    /// Move the light source.
    pub fn set_light_source(&mut self, light_source: LightSource) {
        if self.state.light_source == light_source {
            return;
        }
        self.state_mut().light_source = light_source;
        self.invalidate_self();
    }

    /// Whether shadows are generated and drawn.
    pub fn is_shadow_visible(&self) -> bool {
        self.state.shadow_visible
    }

    /// Show or hide the shadows.
    pub fn set_shadow_visible(&mut self, visible: bool) {
        if self.state.shadow_visible == visible {
            return;
        }
        self.state_mut().shadow_visible = visible;
        if visible {
            self.geometry_changed();
        } else {
            self.invalidate_self();
        }
    }

    /// Whether the drawable renders for a design tool.
    pub fn is_in_edit_mode(&self) -> bool {
        self.state.in_edit_mode
    }

    /// Enter or leave edit mode. Shadows are not blurred in edit mode.
    pub fn set_in_edit_mode(&mut self, in_edit_mode: bool) {
        if self.state.in_edit_mode == in_edit_mode {
            return;
        }
        self.state_mut().in_edit_mode = in_edit_mode;
        self.geometry_changed();
    }

    /// Image drawn on top of the shape.
    pub fn image_bitmap(&self) -> Option<&Bitmap> {
        self.image.as_ref()
    }

    /// Set the image drawn into the inset rect, clipped to the outline.
    pub fn set_image_bitmap(&mut self, image: Option<Bitmap>) {
        if self.image == image {
            return;
        }
        self.image = image;
        self.invalidate_self();
    }

    /// Rasterize `paintable` at `width` x `height` and use it as the image.
    ///
    /// The paintable's bounds are set to `(0, 0, width, height)` first. Does
    /// nothing when either dimension is zero.
    pub fn set_background_drawable(
        &mut self,
        paintable: &mut dyn Paintable,
        width: u32,
        height: u32,
    ) {
        if width == 0 || height == 0 {
            return;
        }
        paintable.set_bounds(Rect::new(0.0, 0.0, f64::from(width), f64::from(height)));
        let rasterizer = Rc::clone(&self.state.services.rasterizer);
        let bitmap = rasterizer.rasterize(width, height, &mut |canvas| paintable.draw(canvas));
        self.set_image_bitmap(Some(bitmap));
    }

    /// Current interaction state.
    pub fn interaction_state(&self) -> InteractionState {
        self.interaction
    }

    /// Returns `true` if fill or stroke colors depend on the interaction
    /// state.
    pub fn is_stateful(&self) -> bool {
        let stateful = |list: &Option<ColorStateList>| {
            list.as_ref().is_some_and(ColorStateList::is_stateful)
        };
        stateful(&self.state.fill_color) || stateful(&self.state.stroke_color)
    }

    /// Apply a new interaction state. Returns `true` if a resolved color
    /// changed.
    pub fn set_state(&mut self, state: InteractionState) -> bool {
        if self.interaction == state {
            return false;
        }
        self.on_state_change(state)
    }

    /// Re-resolve fill and stroke for `state`. Returns `true` and asks for a
    /// repaint only if a resolved color differs.
    pub fn on_state_change(&mut self, state: InteractionState) -> bool {
        self.interaction = state;
        let changed = self.resolve_colors();
        if changed {
            self.invalidate_self();
        }
        changed
    }

    /// Fill color for the current interaction state, before alpha
    /// modulation.
    pub fn resolved_fill_color(&self) -> Option<Argb> {
        self.fill
    }

    /// Stroke color for the current interaction state, before alpha
    /// modulation.
    pub fn resolved_stroke_color(&self) -> Option<Argb> {
        self.stroke
    }

    /// Host outline with the configured (un-inflated) radii, or `None` when
    /// the inset rect is empty.
    pub fn outline(&self) -> Option<HostOutline> {
        host_outline(self.inset_rect(), &self.state.appearance)
    }

    /// The paint outline built by the last rebuild.
    pub fn outline_path(&self) -> &BezPath {
        &self.outline
    }

    /// Returns `true` if the next draw rebuilds outline and shadows.
    pub fn is_geometry_dirty(&self) -> bool {
        self.geometry == Geometry::Dirty
    }

    /// Number of outline and shadow rebuilds so far.
    pub fn regeneration_count(&self) -> u64 {
        self.regenerations
    }

    fn rebuild(&mut self, state: &ShapeDrawableState, rect: Rect) {
        self.outline = compute_outline(rect, &state.appearance, state.shadow_elevation);
        let regenerated =
            state.shadow_visible && self.shadow.update_shadow_bitmap(state, rect, &self.outline);
        self.regenerations += 1;
        self.geometry = Geometry::Clean;
        debug!(
            ?rect,
            shape_type = ?state.shape_type,
            regenerated,
            "rebuilt outline"
        );
    }

    /// Paint fill, shadow, stroke and image, in that order.
    ///
    /// Rebuilds outline and shadows first if a geometry-affecting change
    /// happened since the last draw. Nothing is drawn when the inset rect is
    /// empty or not finite.
    pub fn draw(&mut self, canvas: &mut dyn ImagingBackend) {
        let rect = self.inset_rect();
        if !(rect.is_finite() && rect.width() > 0.0 && rect.height() > 0.0) {
            return;
        }
        let state = Rc::clone(&self.state);
        let fill = self
            .fill
            .filter(|_| state.paint_style.has_fill())
            .map(|color| modulate_color(color, state.alpha));
        let stroke = self
            .stroke
            .filter(|_| state.paint_style.has_stroke() && state.stroke_width > 0.0)
            .map(|color| modulate_color(color, state.alpha));

        if self.geometry == Geometry::Dirty {
            self.rebuild(&state, rect);
        }

        if let Some(fill) = fill {
            canvas.state(StateOp::SetFillRule(FillRule::NonZero));
            canvas.state(StateOp::SetBrush(Brush::Solid(fill.into())));
            canvas.draw(DrawOp::FillPath(self.outline.clone()));
        }
        if state.shadow_visible {
            self.shadow.draw(canvas, &self.outline, &state, rect);
        }
        if let Some(stroke) = stroke {
            canvas.state(StateOp::SetStroke(Stroke::new(state.stroke_width)));
            canvas.state(StateOp::SetBrush(Brush::Solid(stroke.into())));
            canvas.draw(DrawOp::StrokePath(self.outline.clone()));
        }
        if let Some(image) = &self.image {
            canvas.with_clip(ClipShape::Path(self.outline.clone()), |canvas| {
                canvas.draw(DrawOp::DrawBitmap {
                    bitmap: image.clone(),
                    dst: rect,
                });
            });
        }
    }
}

impl Paintable for ShapeDrawable {
    fn bounds(&self) -> Rect {
        Self::bounds(self)
    }

    fn set_bounds(&mut self, bounds: Rect) {
        Self::set_bounds(self, bounds);
    }

    fn draw(&mut self, canvas: &mut dyn ImagingBackend) {
        Self::draw(self, canvas);
    }

    fn outline(&self) -> Option<HostOutline> {
        Self::outline(self)
    }

    fn invalidate_self(&self) {
        Self::invalidate_self(self);
    }

    fn is_stateful(&self) -> bool {
        Self::is_stateful(self)
    }

    fn set_state(&mut self, state: InteractionState) -> bool {
        Self::set_state(self, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::cell::Cell;
    use kurbo::RoundedRectRadii;
    use neumorph_imaging::{ClipOp, ImagingOp, LayerOp};
    use neumorph_imaging_ref::{CountingBlur, RefBackend, RefRasterizer};
    use neumorph_shape::CornerFamily;

    const FILL: Argb = Argb(0xFFEC_F0F3);
    const STROKE: Argb = Argb(0xFF33_4455);

    struct Fixture {
        raster: Rc<RefRasterizer>,
        blur: Rc<CountingBlur>,
        drawable: ShapeDrawable,
    }

    fn fixture() -> Fixture {
        let raster = Rc::new(RefRasterizer::new());
        let blur = Rc::new(CountingBlur::new());
        let mut drawable = ShapeDrawable::new(RenderServices::new(raster.clone(), blur.clone()));
        drawable.set_bounds(Rect::new(0.0, 0.0, 100.0, 60.0));
        drawable.set_shape_appearance_model(
            ShapeAppearanceModel::builder()
                .set_all_corners(CornerFamily::Rounded, 12.0)
                .build(),
        );
        drawable.set_fill_color(Some(ColorStateList::single(FILL)));
        drawable.set_shadow_elevation(4.0);
        Fixture {
            raster,
            blur,
            drawable,
        }
    }

    fn record(drawable: &mut ShapeDrawable) -> RefBackend {
        let mut backend = RefBackend::default();
        drawable.draw(&mut backend);
        backend
    }

    #[derive(Debug, PartialEq)]
    enum Painted {
        Fill,
        ShadowOutside,
        ShadowInside,
        Stroke,
        Image,
    }

    fn painted(backend: &RefBackend, image: &Bitmap) -> Vec<Painted> {
        backend
            .draws()
            .map(|(op, state)| match op {
                DrawOp::FillPath(_) => Painted::Fill,
                DrawOp::StrokePath(_) => Painted::Stroke,
                DrawOp::DrawBitmap { bitmap, .. } if bitmap.ptr_eq(image) => Painted::Image,
                DrawOp::DrawBitmap { .. } => match &state.layer_top {
                    Some(LayerOp {
                        clip: Some(ClipOp::Outside { .. }),
                    }) => Painted::ShadowOutside,
                    _ => Painted::ShadowInside,
                },
            })
            .collect()
    }

    fn brush_alpha(backend: &RefBackend) -> Vec<u8> {
        backend
            .draws()
            .filter(|(op, _)| matches!(op, DrawOp::FillPath(_) | DrawOp::StrokePath(_)))
            .filter_map(|(_, state)| match &state.brush {
                Some(Brush::Solid(color)) => Some(color.to_rgba8().a),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn paint_order_is_fill_shadow_stroke_image() {
        let mut f = fixture();
        let image = Bitmap::transparent(4, 4);
        f.drawable.set_paint_style(PaintStyle::FillAndStroke);
        f.drawable.set_stroke(2.0, Some(ColorStateList::single(STROKE)));
        f.drawable.set_image_bitmap(Some(image.clone()));

        let backend = record(&mut f.drawable);
        assert_eq!(
            painted(&backend, &image),
            [
                Painted::Fill,
                Painted::ShadowOutside,
                Painted::ShadowOutside,
                Painted::Stroke,
                Painted::Image,
            ]
        );
        assert_eq!(backend.layer_stack_depth(), 0);
    }

    #[test]
    fn image_is_clipped_to_outline_and_fills_inset_rect() {
        let mut f = fixture();
        let image = Bitmap::transparent(2, 2);
        f.drawable.set_inset(5, 5, 5, 5);
        f.drawable.set_image_bitmap(Some(image.clone()));

        let backend = record(&mut f.drawable);
        let (op, state) = backend.draws().last().expect("image drawn");
        assert_eq!(
            op,
            &DrawOp::DrawBitmap {
                bitmap: image,
                dst: Rect::new(5.0, 5.0, 95.0, 55.0),
            }
        );
        assert!(matches!(
            &state.layer_top,
            Some(LayerOp {
                clip: Some(ClipOp::Inside {
                    shape: ClipShape::Path(path),
                    ..
                })
            }) if path == f.drawable.outline_path()
        ));
    }

    #[test]
    fn pressed_shades_inside_after_fill() {
        let mut f = fixture();
        f.drawable.set_shape_type(ShapeType::Pressed);
        let backend = record(&mut f.drawable);
        assert_eq!(
            painted(&backend, &Bitmap::empty()),
            [Painted::Fill, Painted::ShadowInside, Painted::ShadowInside]
        );
    }

    #[test]
    fn flat_to_pressed_regenerates_shadows() {
        let mut f = fixture();
        record(&mut f.drawable);
        let calls = f.raster.calls();
        let count = f.drawable.regeneration_count();

        f.drawable.set_shape_type(ShapeType::Pressed);
        assert!(f.drawable.is_geometry_dirty());
        record(&mut f.drawable);
        assert_eq!(f.drawable.regeneration_count(), count + 1);
        assert_eq!(f.raster.calls(), calls + 2);
    }

    #[test]
    fn raw_shape_type_is_validated() {
        let mut f = fixture();
        assert_eq!(
            f.drawable.set_shape_type_raw(5),
            Err(NeumorphError::InvalidShapeType(5))
        );
        assert_eq!(f.drawable.shape_type(), ShapeType::Flat);
        assert_eq!(f.drawable.set_shape_type_raw(2), Ok(()));
        assert_eq!(f.drawable.shape_type(), ShapeType::Basin);
    }

    #[test]
    fn alpha_modulates_copies_only() {
        let mut f = fixture();
        f.drawable.set_paint_style(PaintStyle::FillAndStroke);
        f.drawable
            .set_stroke(1.0, Some(ColorStateList::single(STROKE.with_alpha(200))));
        f.drawable.set_alpha(128);

        let backend = record(&mut f.drawable);
        assert_eq!(brush_alpha(&backend), [128, 100]);
        assert_eq!(f.drawable.resolved_fill_color(), Some(FILL));
        assert_eq!(f.drawable.fill_color(), Some(&ColorStateList::single(FILL)));
    }

    #[test]
    fn repeated_draws_are_identical() {
        let mut f = fixture();
        f.drawable.set_alpha(77);
        let first = record(&mut f.drawable);
        let second = record(&mut f.drawable);
        assert_eq!(first.ops(), second.ops());
        assert_eq!(f.drawable.alpha(), 77);
        assert_eq!(f.drawable.regeneration_count(), 1);
    }

    #[test]
    fn paint_only_changes_keep_geometry() {
        let mut f = fixture();
        record(&mut f.drawable);
        let calls = f.raster.calls();
        let blurs = f.blur.calls();

        f.drawable.set_translation_z(6.0);
        f.drawable.set_alpha(10);
        f.drawable.set_light_source(LightSource::RightBottom);
        f.drawable.set_paint_style(PaintStyle::FillAndStroke);
        f.drawable.set_fill_color(Some(ColorStateList::single(STROKE)));
        f.drawable.set_stroke_width(3.0);
        assert!(!f.drawable.is_geometry_dirty());
        record(&mut f.drawable);

        assert_eq!(f.drawable.regeneration_count(), 1);
        assert_eq!(f.raster.calls(), calls);
        assert_eq!(f.blur.calls(), blurs);
    }

    #[test]
    fn elevation_change_regenerates() {
        let mut f = fixture();
        record(&mut f.drawable);
        f.drawable.set_shadow_elevation(6.0);
        assert!(f.drawable.is_geometry_dirty());
        record(&mut f.drawable);
        assert_eq!(f.drawable.regeneration_count(), 2);
        assert_eq!(f.blur.last_radius(), Some(6.0));
    }

    #[test]
    fn geometry_mutators_mark_dirty() {
        fn check(f: &mut Fixture, change: &dyn Fn(&mut ShapeDrawable)) {
            record(&mut f.drawable);
            assert!(!f.drawable.is_geometry_dirty());
            change(&mut f.drawable);
            assert!(f.drawable.is_geometry_dirty());
        }

        let mut f = fixture();
        check(&mut f, &|d| d.set_bounds(Rect::new(0.0, 0.0, 80.0, 80.0)));
        check(&mut f, &|d| d.set_inset(1, 2, 3, 4));
        check(&mut f, &|d| {
            d.set_shape_appearance_model(ShapeAppearanceModel::default());
        });
        check(&mut f, &|d| d.set_shadow_color_light(Argb(0xFFEE_EEEE)));
        check(&mut f, &|d| d.set_shadow_color_dark(Argb(0xFF11_1111)));
        check(&mut f, &|d| d.set_in_edit_mode(true));
        check(&mut f, &|d| d.set_shape_type(ShapeType::Basin));
    }

    #[test]
    fn equal_values_do_not_invalidate() {
        let mut f = fixture();
        let hits = Rc::new(Cell::new(0_u32));
        let counter = hits.clone();
        f.drawable
            .set_invalidation_hook(Some(Rc::new(move || counter.set(counter.get() + 1))));

        f.drawable.set_shadow_elevation(4.0);
        f.drawable.set_fill_color(Some(ColorStateList::single(FILL)));
        f.drawable.set_alpha(255);
        f.drawable.set_bounds(Rect::new(0.0, 0.0, 100.0, 60.0));
        assert_eq!(hits.get(), 0);

        f.drawable.set_alpha(254);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn hidden_shadow_is_neither_built_nor_drawn() {
        let mut f = fixture();
        f.drawable.set_shadow_visible(false);
        let backend = record(&mut f.drawable);
        assert_eq!(f.raster.calls(), 0);
        assert_eq!(painted(&backend, &Bitmap::empty()), [Painted::Fill]);

        f.drawable.set_shadow_visible(true);
        assert!(f.drawable.is_geometry_dirty());
        record(&mut f.drawable);
        assert_eq!(f.raster.calls(), 2);
    }

    #[test]
    fn empty_inset_rect_draws_nothing() {
        let mut f = fixture();
        f.drawable.set_inset(60, 0, 60, 0);
        let backend = record(&mut f.drawable);
        assert!(backend.events().is_empty());
        assert_eq!(f.drawable.regeneration_count(), 0);
        assert_eq!(f.drawable.outline(), None);
    }

    #[test]
    fn non_finite_bounds_draw_nothing() {
        let mut f = fixture();
        f.drawable.set_bounds(Rect::new(0.0, 0.0, f64::INFINITY, 10.0));
        let backend = record(&mut f.drawable);
        assert!(backend.events().is_empty());
        assert_eq!(f.raster.calls(), 0);
        assert_eq!(f.drawable.regeneration_count(), 0);

        f.drawable.set_bounds(Rect::new(f64::NAN, 0.0, 40.0, 10.0));
        assert!(record(&mut f.drawable).events().is_empty());
        assert_eq!(f.raster.calls(), 0);
    }

    #[test]
    fn mutate_isolates_clone() {
        let f = fixture();
        let original = f.drawable;
        let mut copy = ShapeDrawable::from_constant_state(original.constant_state());
        copy.mutate();
        assert!(
            copy.constant_state()
                .shares_appearance_with(&original.constant_state())
        );

        copy.set_fill_color(Some(ColorStateList::single(STROKE)));
        assert_eq!(original.fill_color(), Some(&ColorStateList::single(FILL)));
        assert_eq!(copy.fill_color(), Some(&ColorStateList::single(STROKE)));
    }

    #[test]
    fn setters_never_write_into_shared_state() {
        let f = fixture();
        let original = f.drawable;
        let mut sibling = ShapeDrawable::from_constant_state(original.constant_state());
        sibling.set_shadow_elevation(9.0);
        sibling.set_insets(Insets::uniform(3));
        assert_eq!(original.shadow_elevation(), 4.0);
        assert_eq!(original.insets(), Insets::ZERO);
        assert!(!Rc::ptr_eq(&original.constant_state(), &sibling.constant_state()));
    }

    #[test]
    fn state_change_compares_resolved_colors() {
        let mut f = fixture();
        let pressed = Argb(0xFFD0_D0D0);
        f.drawable.set_fill_color(Some(
            ColorStateList::single(FILL).with_entry(
                InteractionState::PRESSED,
                InteractionState::empty(),
                pressed,
            ),
        ));
        assert!(f.drawable.is_stateful());

        assert!(f.drawable.set_state(InteractionState::PRESSED));
        assert_eq!(f.drawable.resolved_fill_color(), Some(pressed));
        // Different state, same resolved color.
        assert!(!f.drawable.set_state(InteractionState::PRESSED | InteractionState::FOCUSED));
        assert!(f.drawable.set_state(InteractionState::ENABLED));
        assert_eq!(f.drawable.resolved_fill_color(), Some(FILL));
    }

    #[test]
    fn single_colors_are_not_stateful() {
        let mut f = fixture();
        f.drawable
            .set_stroke(1.0, Some(ColorStateList::single(STROKE)));
        assert!(!f.drawable.is_stateful());
        assert!(!f.drawable.set_state(InteractionState::PRESSED));
    }

    #[test]
    fn host_outline_uses_configured_radii() {
        let f = fixture();
        let Some(HostOutline::RoundedRect(rr)) = f.drawable.outline() else {
            panic!("expected a rounded rect");
        };
        assert_eq!(rr.radii(), RoundedRectRadii::from_single_radius(12.0));
    }

    struct Swatch {
        bounds: Rect,
        draws: u32,
    }

    impl Paintable for Swatch {
        fn bounds(&self) -> Rect {
            self.bounds
        }

        fn set_bounds(&mut self, bounds: Rect) {
            self.bounds = bounds;
        }

        fn draw(&mut self, canvas: &mut dyn ImagingBackend) {
            self.draws += 1;
            canvas.draw(DrawOp::FillPath(kurbo::Shape::to_path(&self.bounds, 0.1)));
        }
    }

    #[test]
    fn background_drawable_is_rasterized_at_size() {
        let mut f = fixture();
        let mut swatch = Swatch {
            bounds: Rect::ZERO,
            draws: 0,
        };
        f.drawable.set_background_drawable(&mut swatch, 20, 10);

        assert_eq!(swatch.bounds, Rect::new(0.0, 0.0, 20.0, 10.0));
        assert_eq!(swatch.draws, 1);
        let image = f.drawable.image_bitmap().expect("image set");
        assert_eq!((image.width(), image.height()), (20, 10));
        let capture = f.raster.captures().pop().expect("rasterized");
        assert_eq!((capture.width, capture.height), (20, 10));
    }

    #[test]
    fn degenerate_background_drawable_is_ignored() {
        let mut f = fixture();
        let mut swatch = Swatch {
            bounds: Rect::ZERO,
            draws: 0,
        };
        f.drawable.set_background_drawable(&mut swatch, 0, 0);
        assert!(f.drawable.image_bitmap().is_none());

        let image = Bitmap::transparent(3, 3);
        f.drawable.set_image_bitmap(Some(image.clone()));
        f.drawable.set_background_drawable(&mut swatch, 0, 12);
        assert!(f.drawable.image_bitmap().is_some_and(|b| b.ptr_eq(&image)));
        assert_eq!(swatch.draws, 0);
        assert_eq!(f.raster.calls(), 0);
    }

    #[test]
    fn drawable_paints_through_trait_object() {
        let mut f = fixture();
        let paintable: &mut dyn Paintable = &mut f.drawable;
        let mut backend = RefBackend::default();
        paintable.draw(&mut backend);
        assert!(matches!(
            backend.ops().first(),
            Some(ImagingOp::State(StateOp::SetFillRule(FillRule::NonZero)))
        ));
    }
}
