// Copyright 2025 the Neumorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outline builder.
//!
//! Outlines wind clockwise in y-down coordinates and are closed. Both
//! functions here are pure; callers cache the result and rebuild only when
//! an input changes.

use kurbo::{BezPath, Ellipse, Rect, RoundedRect, RoundedRectRadii, Shape};

use crate::{CornerFamily, ShapeAppearanceModel};

/// Flattening tolerance used when converting outlines to paths.
const OUTLINE_TOLERANCE: f64 = 0.1;

/// Structured outline geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutlineShape {
    /// Ellipse inscribed in the bounds.
    Oval(Ellipse),
    /// Rounded rectangle with per-corner radii.
    RoundedRect(RoundedRect),
}

impl OutlineShape {
    /// The outline as a closed path.
    pub fn to_path(&self) -> BezPath {
        match self {
            Self::Oval(ellipse) => ellipse.to_path(OUTLINE_TOLERANCE),
            Self::RoundedRect(rr) => rr.to_path(OUTLINE_TOLERANCE),
        }
    }

    /// Bounding box of the outline.
    pub fn bounding_box(&self) -> Rect {
        match self {
            Self::Oval(ellipse) => ellipse.bounding_box(),
            Self::RoundedRect(rr) => rr.rect(),
        }
    }
}

fn is_drawable(bounds: Rect) -> bool {
    bounds.is_finite() && bounds.width() > 0.0 && bounds.height() > 0.0
}

/// Grow a corner radius by the elevation, leaving hard corners hard.
fn inflate(radius: f64, elevation: f64) -> f64 {
    if radius == 0.0 {
        0.0
    } else {
        radius + elevation
    }
}

/// Build the paint outline for `bounds`.
///
/// `bounds` is the inset rect. For [`CornerFamily::Rounded`] every non-zero
/// radius grows by `elevation` so the shadow halo is not clipped by a tight
/// corner; zero radii stay hard corners. Negative or NaN elevation counts as
/// zero. Returns `None` for empty or non-finite bounds.
pub fn outline_shape(
    bounds: Rect,
    appearance: &ShapeAppearanceModel,
    elevation: f64,
) -> Option<OutlineShape> {
    if !is_drawable(bounds) {
        return None;
    }
    let elevation = if elevation.is_finite() && elevation > 0.0 {
        elevation
    } else {
        0.0
    };
    Some(match appearance.corner_family() {
        CornerFamily::Oval => OutlineShape::Oval(Ellipse::from_rect(bounds)),
        CornerFamily::Rounded => {
            let radii = RoundedRectRadii::new(
                inflate(appearance.top_left(), elevation),
                inflate(appearance.top_right(), elevation),
                inflate(appearance.bottom_right(), elevation),
                inflate(appearance.bottom_left(), elevation),
            );
            OutlineShape::RoundedRect(RoundedRect::from_rect(bounds, radii))
        }
    })
}

/// Build the paint outline for `bounds` as a path.
///
/// Empty or non-finite bounds produce an empty path. See [`outline_shape`].
pub fn compute_outline(bounds: Rect, appearance: &ShapeAppearanceModel, elevation: f64) -> BezPath {
    outline_shape(bounds, appearance, elevation)
        .map(|shape| shape.to_path())
        .unwrap_or_default()
}

/// Outline handed to the host for native shadow casting and ripple clipping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostOutline {
    /// Oval filling the rect.
    Oval(Rect),
    /// Rounded rectangle.
    RoundedRect(RoundedRect),
}

impl HostOutline {
    /// The rect the outline occupies.
    pub fn rect(&self) -> Rect {
        match self {
            Self::Oval(rect) => *rect,
            Self::RoundedRect(rr) => rr.rect(),
        }
    }

    /// The outline as a closed path.
    pub fn to_path(&self) -> BezPath {
        match self {
            Self::Oval(rect) => Ellipse::from_rect(*rect).to_path(OUTLINE_TOLERANCE),
            Self::RoundedRect(rr) => rr.to_path(OUTLINE_TOLERANCE),
        }
    }
}

/// Build the host outline for `bounds`.
///
/// Mirrors the family and radius choice of [`outline_shape`] but uses the
/// radii as configured, without elevation.
pub fn host_outline(bounds: Rect, appearance: &ShapeAppearanceModel) -> Option<HostOutline> {
    outline_shape(bounds, appearance, 0.0).map(|shape| match shape {
        OutlineShape::Oval(_) => HostOutline::Oval(bounds),
        OutlineShape::RoundedRect(rr) => HostOutline::RoundedRect(rr),
    })
}
