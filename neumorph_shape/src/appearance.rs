// Copyright 2025 the Neumorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corner appearance model.

use kurbo::RoundedRectRadii;

/// How the corners of a shape are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CornerFamily {
    /// A rounded rectangle with independent per-corner radii.
    #[default]
    Rounded,
    /// An ellipse inscribed in the bounds. Corner radii are ignored.
    Oval,
}

impl CornerFamily {
    /// Look up a family by its raw attribute value (`0` rounded, `1` oval).
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Rounded),
            1 => Some(Self::Oval),
            _ => None,
        }
    }
}

/// Clamp a radius to a finite, non-negative value.
fn sanitize(radius: f64) -> f64 {
    if radius.is_finite() && radius > 0.0 {
        radius
    } else {
        0.0
    }
}

/// Immutable description of a shape's corners.
///
/// All radii are finite and non-negative. The per-corner radii are kept even
/// for [`CornerFamily::Oval`] so that switching families back preserves
/// them, but the outline builder ignores them for ovals.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShapeAppearanceModel {
    corner_family: CornerFamily,
    corner_radius: f64,
    top_left: f64,
    top_right: f64,
    bottom_right: f64,
    bottom_left: f64,
}

impl ShapeAppearanceModel {
    /// Start building a model from the defaults (rounded, zero radius).
    pub fn builder() -> ShapeAppearanceModelBuilder {
        ShapeAppearanceModelBuilder::default()
    }

    /// A builder that reproduces this model, with every corner set
    /// explicitly.
    pub fn to_builder(&self) -> ShapeAppearanceModelBuilder {
        ShapeAppearanceModelBuilder {
            corner_family: self.corner_family,
            corner_radius: self.corner_radius,
            top_left: Some(self.top_left),
            top_right: Some(self.top_right),
            bottom_right: Some(self.bottom_right),
            bottom_left: Some(self.bottom_left),
        }
    }

    /// Corner family.
    pub fn corner_family(&self) -> CornerFamily {
        self.corner_family
    }

    /// The global radius corners inherit when not set individually.
    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    /// Top-left corner radius.
    pub fn top_left(&self) -> f64 {
        self.top_left
    }

    /// Top-right corner radius.
    pub fn top_right(&self) -> f64 {
        self.top_right
    }

    /// Bottom-right corner radius.
    pub fn bottom_right(&self) -> f64 {
        self.bottom_right
    }

    /// Bottom-left corner radius.
    pub fn bottom_left(&self) -> f64 {
        self.bottom_left
    }

    /// The four corner radii.
    pub fn corner_radii(&self) -> RoundedRectRadii {
        RoundedRectRadii::new(
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        )
    }
}

/// Builder for [`ShapeAppearanceModel`].
///
/// Corners that are never set individually inherit the global radius when
/// [`build`](Self::build) runs. A corner set explicitly keeps its value even
/// if the global radius changes afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShapeAppearanceModelBuilder {
    corner_family: CornerFamily,
    corner_radius: f64,
    top_left: Option<f64>,
    top_right: Option<f64>,
    bottom_right: Option<f64>,
    bottom_left: Option<f64>,
}

impl ShapeAppearanceModelBuilder {
    /// Set the family, the global radius and all four corners.
    pub fn set_all_corners(self, family: CornerFamily, size: f64) -> Self {
        self.set_corner_family(family).set_all_corner_sizes(size)
    }

    /// Set the global radius and all four corners.
    pub fn set_all_corner_sizes(mut self, size: f64) -> Self {
        let size = sanitize(size);
        self.corner_radius = size;
        self.top_left = Some(size);
        self.top_right = Some(size);
        self.bottom_right = Some(size);
        self.bottom_left = Some(size);
        self
    }

    /// Set the corner family.
    pub fn set_corner_family(mut self, family: CornerFamily) -> Self {
        self.corner_family = family;
        self
    }

    /// Set the global radius only.
    pub fn set_corner_radius(mut self, size: f64) -> Self {
        self.corner_radius = sanitize(size);
        self
    }

    /// Set the top-left radius.
    pub fn set_top_left_corner_size(mut self, size: f64) -> Self {
        self.top_left = Some(sanitize(size));
        self
    }

    /// Set the top-right radius.
    pub fn set_top_right_corner_size(mut self, size: f64) -> Self {
        self.top_right = Some(sanitize(size));
        self
    }

    /// Set the bottom-right radius.
    pub fn set_bottom_right_corner_size(mut self, size: f64) -> Self {
        self.bottom_right = Some(sanitize(size));
        self
    }

    /// Set the bottom-left radius.
    pub fn set_bottom_left_corner_size(mut self, size: f64) -> Self {
        self.bottom_left = Some(sanitize(size));
        self
    }

    /// Resolve inheritance and produce the model.
    pub fn build(self) -> ShapeAppearanceModel {
        let global = self.corner_radius;
        ShapeAppearanceModel {
            corner_family: self.corner_family,
            corner_radius: global,
            top_left: self.top_left.unwrap_or(global),
            top_right: self.top_right.unwrap_or(global),
            bottom_right: self.bottom_right.unwrap_or(global),
            bottom_left: self.bottom_left.unwrap_or(global),
        }
    }
}
