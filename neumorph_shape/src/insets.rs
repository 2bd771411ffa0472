// Copyright 2025 the Neumorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Insets between the drawable bounds and the shape.

use kurbo::Rect;

/// Raw per-edge inset value meaning "use the global inset".
pub const INSET_USE_GLOBAL: i32 = -1;

/// Insets in device pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Insets {
    /// Left inset.
    pub left: u32,
    /// Top inset.
    pub top: u32,
    /// Right inset.
    pub right: u32,
    /// Bottom inset.
    pub bottom: u32,
}

impl Insets {
    /// No insets.
    pub const ZERO: Self = Self::uniform(0);

    /// Insets from four edge values.
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same inset on every edge.
    pub const fn uniform(inset: u32) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    /// Resolve raw attribute values.
    ///
    /// `edges` is `[left, top, right, bottom]`. An edge equal to
    /// [`INSET_USE_GLOBAL`] takes `global`; other negative values clamp to 0.
    pub fn resolve(global: i32, edges: [i32; 4]) -> Self {
        let pick = |edge: i32| {
            let raw = if edge == INSET_USE_GLOBAL { global } else { edge };
            u32::try_from(raw).unwrap_or(0)
        };
        let [left, top, right, bottom] = edges;
        Self::new(pick(left), pick(top), pick(right), pick(bottom))
    }

    /// Returns `true` if every edge is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Shrink `bounds` by these insets.
    ///
    /// The result never has a negative size: insets larger than the bounds
    /// collapse it to an empty rect at the left/top inset position.
    pub fn apply(&self, bounds: Rect) -> Rect {
        let bounds = bounds.abs();
        let x0 = bounds.x0 + f64::from(self.left);
        let y0 = bounds.y0 + f64::from(self.top);
        let x1 = (bounds.x1 - f64::from(self.right)).max(x0);
        let y1 = (bounds.y1 - f64::from(self.bottom)).max(y0);
        Rect::new(x0, y0, x1, y1)
    }
}
