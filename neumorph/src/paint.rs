// Copyright 2025 the Neumorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint style and alpha modulation.

use crate::{Argb, NeumorphError};

/// Which parts of the shape are painted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PaintStyle {
    /// Fill only.
    #[default]
    Fill,
    /// Stroke only.
    Stroke,
    /// Fill, then stroke.
    FillAndStroke,
}

impl PaintStyle {
    /// Returns `true` if the style paints the interior.
    pub fn has_fill(self) -> bool {
        matches!(self, Self::Fill | Self::FillAndStroke)
    }

    /// Returns `true` if the style paints the outline.
    pub fn has_stroke(self) -> bool {
        matches!(self, Self::Stroke | Self::FillAndStroke)
    }
}

impl TryFrom<i32> for PaintStyle {
    type Error = NeumorphError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::Fill),
            1 => Ok(Self::Stroke),
            2 => Ok(Self::FillAndStroke),
            _ => Err(NeumorphError::InvalidPaintStyle(raw)),
        }
    }
}

/// Scale a paint alpha `paint` by a drawable alpha `alpha`.
///
/// Uses `alpha + (alpha >> 7)` to map `0..=255` onto `0..=256`, so
/// `modulate_alpha(p, 255) == p` and `modulate_alpha(p, 0) == 0`.
pub fn modulate_alpha(paint: u8, alpha: u8) -> u8 {
    let scale = u32::from(alpha) + (u32::from(alpha) >> 7);
    u8::try_from((u32::from(paint) * scale) >> 8).unwrap_or(u8::MAX)
}

/// A copy of `color` with its alpha modulated by `alpha`.
pub fn modulate_color(color: Argb, alpha: u8) -> Argb {
    color.with_alpha(modulate_alpha(color.alpha(), alpha))
}
