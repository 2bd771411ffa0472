// Copyright 2025 the Neumorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-facing capability traits.

use kurbo::Rect;
use neumorph_imaging::ImagingBackend;
use neumorph_shape::HostOutline;

use crate::InteractionState;

/// Asks the host to schedule a repaint.
pub trait InvalidationHook {
    /// Called whenever the drawable's appearance changed.
    fn invalidate(&self);
}

impl<F: Fn()> InvalidationHook for F {
    fn invalidate(&self) {
        self();
    }
}

/// Something a host can lay out and paint.
///
/// Hosts adapt this to their own drawable or widget abstraction instead of
/// subclassing.
pub trait Paintable {
    /// Current bounds.
    fn bounds(&self) -> Rect;

    /// Move or resize.
    fn set_bounds(&mut self, bounds: Rect);

    /// Paint into `canvas`.
    fn draw(&mut self, canvas: &mut dyn ImagingBackend);

    /// Outline for host shadow casting and ripple clipping.
    fn outline(&self) -> Option<HostOutline> {
        None
    }

    /// Ask the host for a repaint.
    fn invalidate_self(&self) {}

    /// Returns `true` if the appearance depends on [`InteractionState`].
    fn is_stateful(&self) -> bool {
        false
    }

    /// Apply a new interaction state. Returns `true` if the appearance
    /// changed.
    fn set_state(&mut self, state: InteractionState) -> bool {
        let _ = state;
        false
    }
}
