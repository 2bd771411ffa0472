// Copyright 2025 the Neumorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shareable drawable configuration.

use alloc::rc::Rc;
use core::fmt;

use kurbo::Vec2;
use neumorph_imaging::{BlurProvider, Rasterizer};
use neumorph_shape::{Insets, ShapeAppearanceModel};

use crate::{Argb, ColorStateList, NeumorphError, PaintStyle};

/// Default light shadow color.
pub const DEFAULT_SHADOW_COLOR_LIGHT: Argb = Argb(0xFFFF_FFFF);
/// Default dark shadow color.
pub const DEFAULT_SHADOW_COLOR_DARK: Argb = Argb(0xFFA3_B1C6);

/// How the shadows make the shape look.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShapeType {
    /// Raised: shadows fall outside the shape.
    #[default]
    Flat,
    /// Sunken: shadows are drawn inside the shape.
    Pressed,
    /// Carved: an outer shadow plus inner shading.
    Basin,
}

impl TryFrom<i32> for ShapeType {
    type Error = NeumorphError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::Flat),
            1 => Ok(Self::Pressed),
            2 => Ok(Self::Basin),
            _ => Err(NeumorphError::InvalidShapeType(raw)),
        }
    }
}

/// Where the light comes from.
///
/// The light shadow is offset toward the light source and the dark shadow
/// away from it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LightSource {
    /// Above left.
    #[default]
    LeftTop,
    /// Below left.
    LeftBottom,
    /// Above right.
    RightTop,
    /// Below right.
    RightBottom,
}

impl LightSource {
    /// Unit offset direction of the light shadow, in y-down coordinates.
    pub fn direction(self) -> Vec2 {
        match self {
            Self::LeftTop => Vec2::new(-1.0, -1.0),
            Self::LeftBottom => Vec2::new(-1.0, 1.0),
            Self::RightTop => Vec2::new(1.0, -1.0),
            Self::RightBottom => Vec2::new(1.0, 1.0),
        }
    }
}

impl TryFrom<i32> for LightSource {
    type Error = NeumorphError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::LeftTop),
            1 => Ok(Self::LeftBottom),
            2 => Ok(Self::RightTop),
            3 => Ok(Self::RightBottom),
            _ => Err(NeumorphError::InvalidLightSource(raw)),
        }
    }
}

/// Host services a drawable renders through.
///
/// Cloning shares the services.
#[derive(Clone)]
pub struct RenderServices {
    /// Offscreen rasterizer for shadow masks and background drawables.
    pub rasterizer: Rc<dyn Rasterizer>,
    /// Blur used for the shadow halo.
    pub blur: Rc<dyn BlurProvider>,
}

impl RenderServices {
    /// Bundle a rasterizer and a blur provider.
    pub fn new(rasterizer: Rc<dyn Rasterizer>, blur: Rc<dyn BlurProvider>) -> Self {
        Self { rasterizer, blur }
    }
}

impl fmt::Debug for RenderServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RenderServices { .. }")
    }
}

/// Configuration that drawables can share.
///
/// Drawables hold this behind an [`Rc`] and write through
/// [`Rc::make_mut`], so a drawable never changes a state another drawable
/// still uses. Cloning copies the values and shares the appearance model and
/// the services.
#[derive(Clone, Debug)]
pub struct ShapeDrawableState {
    pub(crate) appearance: Rc<ShapeAppearanceModel>,
    pub(crate) insets: Insets,
    pub(crate) fill_color: Option<ColorStateList>,
    pub(crate) stroke_color: Option<ColorStateList>,
    pub(crate) stroke_width: f64,
    pub(crate) alpha: u8,
    pub(crate) shape_type: ShapeType,
    pub(crate) shadow_elevation: f64,
    pub(crate) shadow_color_light: Argb,
    pub(crate) shadow_color_dark: Argb,
    pub(crate) translation_z: f64,
    pub(crate) paint_style: PaintStyle,
    pub(crate) light_source: LightSource,
    pub(crate) shadow_visible: bool,
    pub(crate) in_edit_mode: bool,
    pub(crate) services: RenderServices,
}

impl ShapeDrawableState {
    /// Default configuration rendering through `services`.
    pub fn new(services: RenderServices) -> Self {
        Self {
            appearance: Rc::new(ShapeAppearanceModel::default()),
            insets: Insets::ZERO,
            fill_color: None,
            stroke_color: None,
            stroke_width: 0.0,
            alpha: u8::MAX,
            shape_type: ShapeType::Flat,
            shadow_elevation: 0.0,
            shadow_color_light: DEFAULT_SHADOW_COLOR_LIGHT,
            shadow_color_dark: DEFAULT_SHADOW_COLOR_DARK,
            translation_z: 0.0,
            paint_style: PaintStyle::Fill,
            light_source: LightSource::LeftTop,
            shadow_visible: true,
            in_edit_mode: false,
            services,
        }
    }

    /// Corner appearance.
    pub fn appearance(&self) -> &ShapeAppearanceModel {
        &self.appearance
    }

    /// Returns `true` if both states share one appearance model allocation.
    pub fn shares_appearance_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.appearance, &other.appearance)
    }

    /// Insets between the bounds and the shape.
    pub fn insets(&self) -> Insets {
        self.insets
    }

    /// Fill colors.
    pub fn fill_color(&self) -> Option<&ColorStateList> {
        self.fill_color.as_ref()
    }

    /// Stroke colors.
    pub fn stroke_color(&self) -> Option<&ColorStateList> {
        self.stroke_color.as_ref()
    }

    /// Stroke width.
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Drawable alpha.
    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Shape type.
    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    /// Shadow elevation.
    pub fn shadow_elevation(&self) -> f64 {
        self.shadow_elevation
    }

    /// Light shadow color.
    pub fn shadow_color_light(&self) -> Argb {
        self.shadow_color_light
    }

    /// Dark shadow color.
    pub fn shadow_color_dark(&self) -> Argb {
        self.shadow_color_dark
    }

    /// Extra shadow offset on top of the elevation.
    pub fn translation_z(&self) -> f64 {
        self.translation_z
    }

    /// Paint style.
    pub fn paint_style(&self) -> PaintStyle {
        self.paint_style
    }

    /// Light source.
    pub fn light_source(&self) -> LightSource {
        self.light_source
    }

    /// Whether shadows are generated and drawn.
    pub fn shadow_visible(&self) -> bool {
        self.shadow_visible
    }

    /// Whether the drawable renders for a design tool (shadows are not
    /// blurred).
    pub fn in_edit_mode(&self) -> bool {
        self.in_edit_mode
    }

    /// Services the drawable renders through.
    pub fn services(&self) -> &RenderServices {
        &self.services
    }

    /// Blur radius for the shadow halo, zero in edit mode.
    pub(crate) fn blur_radius(&self) -> f32 {
        if self.in_edit_mode {
            0.0
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "blur radii are small pixel distances"
            )]
            let radius = self.shadow_elevation as f32;
            radius
        }
    }

    /// Distance the shadow copies are offset from the shape.
    pub(crate) fn shadow_offset(&self) -> f64 {
        self.shadow_elevation + self.translation_z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neumorph_imaging::NoBlur;
    use neumorph_imaging_ref::RefRasterizer;

    fn services() -> RenderServices {
        RenderServices::new(Rc::new(RefRasterizer::new()), Rc::new(NoBlur))
    }

    #[test]
    fn raw_shape_type() {
        assert_eq!(ShapeType::try_from(0), Ok(ShapeType::Flat));
        assert_eq!(ShapeType::try_from(1), Ok(ShapeType::Pressed));
        assert_eq!(ShapeType::try_from(2), Ok(ShapeType::Basin));
        assert_eq!(
            ShapeType::try_from(7),
            Err(NeumorphError::InvalidShapeType(7))
        );
        assert_eq!(
            ShapeType::try_from(-1),
            Err(NeumorphError::InvalidShapeType(-1))
        );
    }

    #[test]
    fn raw_light_source() {
        assert_eq!(LightSource::try_from(3), Ok(LightSource::RightBottom));
        assert_eq!(
            LightSource::try_from(4),
            Err(NeumorphError::InvalidLightSource(4))
        );
    }

    #[test]
    fn light_directions_are_opposite_corners() {
        assert_eq!(LightSource::LeftTop.direction(), -LightSource::RightBottom.direction());
        assert_eq!(LightSource::LeftBottom.direction(), -LightSource::RightTop.direction());
    }

    #[test]
    fn clone_shares_appearance_and_services() {
        let state = ShapeDrawableState::new(services());
        let copy = state.clone();
        assert!(state.shares_appearance_with(&copy));
        assert!(Rc::ptr_eq(&state.services.blur, &copy.services.blur));
    }

    #[test]
    fn edit_mode_disables_blur() {
        let mut state = ShapeDrawableState::new(services());
        state.shadow_elevation = 6.0;
        assert_eq!(state.blur_radius(), 6.0);
        state.in_edit_mode = true;
        assert_eq!(state.blur_radius(), 0.0);
    }

    #[test]
    fn dark_getter_returns_dark_color() {
        let state = ShapeDrawableState::new(services());
        assert_eq!(state.shadow_color_dark(), DEFAULT_SHADOW_COLOR_DARK);
        assert_ne!(state.shadow_color_dark(), state.shadow_color_light());
    }
}
