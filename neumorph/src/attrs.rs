// Copyright 2025 the Neumorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Styled attributes.
//!
//! [`ShapeAttributes`] is the flat configuration a host resolves from its
//! styling system. With the `serde` feature it deserializes from any serde
//! format, with enum values in `snake_case` and colors as `0xAARRGGBB`
//! integers.

use alloc::rc::Rc;

use neumorph_shape::{CornerFamily, INSET_USE_GLOBAL, Insets, ShapeAppearanceModel};

use crate::{
    Argb, ColorStateList, DEFAULT_SHADOW_COLOR_DARK, DEFAULT_SHADOW_COLOR_LIGHT, LightSource,
    NeumorphError, PaintStyle, RenderServices, ShapeDrawable, ShapeDrawableState, ShapeType,
};

/// Look up a corner family by its raw attribute value.
pub fn corner_family_from_raw(raw: i32) -> Result<CornerFamily, NeumorphError> {
    CornerFamily::from_raw(raw).ok_or(NeumorphError::InvalidCornerFamily(raw))
}

/// Configuration for a [`ShapeDrawable`], as a host's styling system
/// provides it.
///
/// Missing fields take the values of [`ShapeAttributes::default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShapeAttributes {
    /// Corner family.
    pub corner_family: CornerFamily,
    /// Global corner radius.
    pub corner_radius: f64,
    /// Top-left radius override.
    pub corner_radius_top_left: Option<f64>,
    /// Top-right radius override.
    pub corner_radius_top_right: Option<f64>,
    /// Bottom-right radius override.
    pub corner_radius_bottom_right: Option<f64>,
    /// Bottom-left radius override.
    pub corner_radius_bottom_left: Option<f64>,
    /// Shape type.
    pub shape_type: ShapeType,
    /// Shadow elevation.
    pub shadow_elevation: f64,
    /// Light shadow color.
    pub shadow_color_light: Argb,
    /// Dark shadow color.
    pub shadow_color_dark: Argb,
    /// Fill colors.
    pub fill_color: Option<ColorStateList>,
    /// Stroke colors.
    pub stroke_color: Option<ColorStateList>,
    /// Stroke width.
    pub stroke_width: f64,
    /// Global inset in pixels.
    pub inset: i32,
    /// Left inset, or [`INSET_USE_GLOBAL`].
    pub inset_left: i32,
    /// Top inset, or [`INSET_USE_GLOBAL`].
    pub inset_top: i32,
    /// Right inset, or [`INSET_USE_GLOBAL`].
    pub inset_right: i32,
    /// Bottom inset, or [`INSET_USE_GLOBAL`].
    pub inset_bottom: i32,
    /// Drawable alpha.
    pub alpha: u8,
    /// Extra shadow offset.
    pub translation_z: f64,
    /// Paint style.
    pub paint_style: PaintStyle,
    /// Light source.
    pub light_source: LightSource,
    /// Disable shadows.
    pub no_shadow: bool,
    /// Render for a design tool (no blur).
    pub in_edit_mode: bool,
}

impl Default for ShapeAttributes {
    fn default() -> Self {
        Self {
            corner_family: CornerFamily::Rounded,
            corner_radius: 0.0,
            corner_radius_top_left: None,
            corner_radius_top_right: None,
            corner_radius_bottom_right: None,
            corner_radius_bottom_left: None,
            shape_type: ShapeType::Flat,
            shadow_elevation: 0.0,
            shadow_color_light: DEFAULT_SHADOW_COLOR_LIGHT,
            shadow_color_dark: DEFAULT_SHADOW_COLOR_DARK,
            fill_color: None,
            stroke_color: None,
            stroke_width: 0.0,
            inset: 0,
            inset_left: INSET_USE_GLOBAL,
            inset_top: INSET_USE_GLOBAL,
            inset_right: INSET_USE_GLOBAL,
            inset_bottom: INSET_USE_GLOBAL,
            alpha: u8::MAX,
            translation_z: 0.0,
            paint_style: PaintStyle::Fill,
            light_source: LightSource::LeftTop,
            no_shadow: false,
            in_edit_mode: false,
        }
    }
}

fn length(name: &'static str, value: f64) -> Result<f64, NeumorphError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(NeumorphError::InvalidLength { name, value })
    }
}

fn optional_length(name: &'static str, value: Option<f64>) -> Result<Option<f64>, NeumorphError> {
    value.map(|v| length(name, v)).transpose()
}

impl ShapeAttributes {
    /// Build the appearance model, rejecting negative or non-finite radii.
    pub fn appearance_model(&self) -> Result<ShapeAppearanceModel, NeumorphError> {
        let mut builder = ShapeAppearanceModel::builder()
            .set_corner_family(self.corner_family)
            .set_corner_radius(length("corner_radius", self.corner_radius)?);
        if let Some(r) = optional_length("corner_radius_top_left", self.corner_radius_top_left)? {
            builder = builder.set_top_left_corner_size(r);
        }
        if let Some(r) = optional_length("corner_radius_top_right", self.corner_radius_top_right)? {
            builder = builder.set_top_right_corner_size(r);
        }
        if let Some(r) =
            optional_length("corner_radius_bottom_right", self.corner_radius_bottom_right)?
        {
            builder = builder.set_bottom_right_corner_size(r);
        }
        if let Some(r) =
            optional_length("corner_radius_bottom_left", self.corner_radius_bottom_left)?
        {
            builder = builder.set_bottom_left_corner_size(r);
        }
        Ok(builder.build())
    }

    /// Resolve the inset attributes.
    pub fn insets(&self) -> Insets {
        Insets::resolve(
            self.inset,
            [
                self.inset_left,
                self.inset_top,
                self.inset_right,
                self.inset_bottom,
            ],
        )
    }

    /// Validate the attributes and build the shared drawable state.
    pub fn to_state(&self, services: RenderServices) -> Result<ShapeDrawableState, NeumorphError> {
        let mut state = ShapeDrawableState::new(services);
        state.appearance = Rc::new(self.appearance_model()?);
        state.insets = self.insets();
        state.fill_color = self.fill_color.clone();
        state.stroke_color = self.stroke_color.clone();
        state.stroke_width = length("stroke_width", self.stroke_width)?;
        state.alpha = self.alpha;
        state.shape_type = self.shape_type;
        state.shadow_elevation = length("shadow_elevation", self.shadow_elevation)?;
        state.shadow_color_light = self.shadow_color_light;
        state.shadow_color_dark = self.shadow_color_dark;
        state.translation_z = if self.translation_z.is_finite() {
            self.translation_z
        } else {
            return Err(NeumorphError::InvalidLength {
                name: "translation_z",
                value: self.translation_z,
            });
        };
        state.paint_style = self.paint_style;
        state.light_source = self.light_source;
        state.shadow_visible = !self.no_shadow;
        state.in_edit_mode = self.in_edit_mode;
        Ok(state)
    }
}

impl ShapeDrawable {
    /// Validate `attrs` and build a drawable from them.
    pub fn from_attributes(
        attrs: &ShapeAttributes,
        services: RenderServices,
    ) -> Result<Self, NeumorphError> {
        Ok(Self::from_constant_state(Rc::new(attrs.to_state(services)?)))
    }
}
