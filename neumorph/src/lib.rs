// Copyright 2025 the Neumorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Neumorph: soft-UI shape drawables with dual light/dark shadows.
//!
//! A [`ShapeDrawable`] paints a shape that looks extruded from (or carved
//! into) its background. It draws a filled outline, a light shadow offset
//! toward the [`LightSource`] and a dark shadow offset away from it, an
//! optional stroke, and an optional image clipped to the outline.
//!
//! - [`ShapeType::Flat`] casts both shadows outside the shape.
//! - [`ShapeType::Pressed`] draws them inside the shape, as if sunken.
//! - [`ShapeType::Basin`] combines both.
//!
//! Drawing goes through the [`ImagingBackend`](neumorph_imaging::ImagingBackend)
//! trait, so any backend can host a drawable. Shadow masks are rendered once
//! through the [`RenderServices`] rasterizer and blur, then cached until a
//! geometry-affecting property changes.
//!
//! Configuration lives in a [`ShapeDrawableState`] that drawables can share.
//! Setters copy a shared state before writing, so changing one drawable
//! never changes another.
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use kurbo::Rect;
//! use neumorph::{Argb, ColorStateList, RenderServices, ShapeDrawable, ShapeType};
//! use neumorph_imaging::NoBlur;
//! use neumorph_imaging_ref::{RefBackend, RefRasterizer};
//!
//! let services = RenderServices::new(Rc::new(RefRasterizer::new()), Rc::new(NoBlur));
//! let mut drawable = ShapeDrawable::new(services);
//! drawable.set_fill_color(Some(ColorStateList::single(Argb(0xFFEC_F0F3))));
//! drawable.set_shape_type(ShapeType::Pressed);
//! drawable.set_shadow_elevation(6.0);
//! drawable.set_bounds(Rect::new(0.0, 0.0, 120.0, 48.0));
//!
//! let mut canvas = RefBackend::default();
//! drawable.draw(&mut canvas);
//! assert!(canvas.draws().count() > 0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): use the standard library.
//! - `libm`: floating point support for `no_std` builds.
//! - `serde`: deserialize [`ShapeAttributes`] and the enums it holds.

#![no_std]

extern crate alloc;

mod attrs;
mod color;
mod drawable;
mod error;
mod paint;
mod paintable;
mod shadow;
mod state;

pub use attrs::{ShapeAttributes, corner_family_from_raw};
pub use color::{Argb, ColorStateEntry, ColorStateList, InteractionState};
pub use drawable::ShapeDrawable;
pub use error::NeumorphError;
pub use paint::{PaintStyle, modulate_alpha, modulate_color};
pub use paintable::{InvalidationHook, Paintable};
pub use shadow::{BasinShadow, FlatShadow, PressedShadow, ShadowVariant};
pub use state::{
    DEFAULT_SHADOW_COLOR_DARK, DEFAULT_SHADOW_COLOR_LIGHT, LightSource, RenderServices,
    ShapeDrawableState, ShapeType,
};

pub use neumorph_shape::{CornerFamily, HostOutline, Insets, ShapeAppearanceModel};
