// Copyright 2025 the Neumorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Neumorph Shape: the geometry behind a soft-UI shape.
//!
//! This crate is pure geometry. It knows nothing about colors, shadows or
//! canvases, which lets the drawable crate rebuild outlines only when its
//! dirty tracking says so.
//!
//! - [`ShapeAppearanceModel`] describes the corner family and the four corner
//!   radii, built with [`ShapeAppearanceModelBuilder`].
//! - [`Insets`] shrink the drawable bounds to the rect the shape occupies.
//! - [`compute_outline`] and [`outline_shape`] build the paint outline, with
//!   every non-zero radius inflated by the shadow elevation.
//! - [`host_outline`] builds the un-inflated outline that hosts use for
//!   native shadow casting and touch-ripple clipping.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Rect;
//! use neumorph_shape::{CornerFamily, ShapeAppearanceModel, outline_shape, OutlineShape};
//!
//! let model = ShapeAppearanceModel::builder()
//!     .set_all_corners(CornerFamily::Rounded, 20.0)
//!     .set_bottom_left_corner_size(0.0)
//!     .build();
//!
//! let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
//! let Some(OutlineShape::RoundedRect(rr)) = outline_shape(bounds, &model, 4.0) else {
//!     unreachable!();
//! };
//! assert_eq!(rr.radii().top_left, 24.0);
//! assert_eq!(rr.radii().bottom_left, 0.0);
//! ```

#![no_std]

mod appearance;
mod insets;
mod outline;

pub use appearance::{CornerFamily, ShapeAppearanceModel, ShapeAppearanceModelBuilder};
pub use insets::{INSET_USE_GLOBAL, Insets};
pub use outline::{HostOutline, OutlineShape, compute_outline, host_outline, outline_shape};
