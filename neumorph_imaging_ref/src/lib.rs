// Copyright 2025 the Neumorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Neumorph Imaging Reference Backend.
//!
//! This crate provides small, stateful implementations of the
//! `neumorph_imaging` canvas and service traits for **op recording and state
//! tracing**:
//!
//! - [`RefBackend`] implements [`ImagingBackend`] and logs every op together
//!   with the canvas state at the time it was applied.
//! - [`RefRasterizer`] implements [`Rasterizer`] by running the paint closure
//!   into a fresh [`RefBackend`] and keeping what it recorded.
//! - [`CountingBlur`] implements [`BlurProvider`] as an identity that counts
//!   how often it was asked to blur.
//!
//! None of these produce real pixels. They are intended for tests and
//! debugging that want to assert on emitted ops, paint order, and how often
//! expensive services were used.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use neumorph_imaging::{
    Bitmap, BlurProvider, Brush, DrawOp, FillRule, ImagingBackend, ImagingOp, LayerOp, Rasterizer,
    StateOp, StrokeStyle,
};

/// Snapshot of the current canvas state inside the backend.
#[derive(Clone, Debug)]
pub struct StateSnapshot {
    /// Number of active layers on the layer stack.
    pub layer_stack_depth: u32,
    /// The most recently pushed layer op, if any.
    pub layer_top: Option<LayerOp>,
    /// Current brush, if set.
    pub brush: Option<Brush>,
    /// Current stroke style, if set.
    pub stroke: Option<StrokeStyle>,
    /// Current fill rule used for filling paths.
    pub fill_rule: FillRule,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            layer_stack_depth: 0,
            layer_top: None,
            brush: None,
            stroke: None,
            fill_rule: FillRule::NonZero,
        }
    }
}

/// Event recorded by the reference backend.
#[derive(Clone, Debug)]
pub enum Event {
    /// State operation and the resulting state snapshot.
    State {
        /// State operation that was applied.
        op: StateOp,
        /// Snapshot after applying the state operation.
        state: StateSnapshot,
    },
    /// Draw operation and the state snapshot used for drawing.
    Draw {
        /// Draw operation that was applied.
        op: DrawOp,
        /// Snapshot at the time of drawing.
        state: StateSnapshot,
    },
}

/// Simple reference implementation of the canvas.
///
/// This backend:
/// - Tracks the current canvas state,
/// - Records high-level [`Event`]s as state and draw operations are applied,
/// - Keeps the raw [`ImagingOp`] stream for replay or comparison.
#[derive(Default, Debug)]
pub struct RefBackend {
    /// Log of events in the order they were applied.
    events: Vec<Event>,
    /// Underlying canvas ops.
    ops: Vec<ImagingOp>,
    /// Current canvas state.
    state: StateSnapshot,
    layer_stack: Vec<LayerOp>,
}

impl RefBackend {
    /// Returns a slice of recorded events.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns a slice of raw canvas operations.
    pub fn ops(&self) -> &[ImagingOp] {
        &self.ops
    }

    /// Iterate over draw events only, with the state they were drawn under.
    pub fn draws(&self) -> impl Iterator<Item = (&DrawOp, &StateSnapshot)> {
        self.events.iter().filter_map(|event| match event {
            Event::Draw { op, state } => Some((op, state)),
            Event::State { .. } => None,
        })
    }

    /// Current layer stack depth.
    pub fn layer_stack_depth(&self) -> u32 {
        self.state.layer_stack_depth
    }

    /// Clears all recorded events and ops.
    ///
    /// The current canvas state (layers, brush, stroke) is kept.
    pub fn clear_events(&mut self) {
        self.events.clear();
        self.ops.clear();
    }

    fn sync_layer_state(&mut self) {
        self.state.layer_stack_depth = u32::try_from(self.layer_stack.len())
            .expect("RefBackend: too many layer stack entries for u32");
        self.state.layer_top = self.layer_stack.last().cloned();
    }
}

impl ImagingBackend for RefBackend {
    fn state(&mut self, op: StateOp) {
        match &op {
            StateOp::PushLayer(layer) => {
                self.layer_stack.push(layer.clone());
                self.sync_layer_state();
            }
            StateOp::PopLayer => {
                self.layer_stack.pop();
                self.sync_layer_state();
            }
            StateOp::SetBrush(brush) => self.state.brush = Some(brush.clone()),
            StateOp::SetStroke(style) => self.state.stroke = Some(style.clone()),
            StateOp::SetFillRule(rule) => self.state.fill_rule = *rule,
        }

        self.ops.push(ImagingOp::State(op.clone()));
        self.events.push(Event::State {
            op,
            state: self.state.clone(),
        });
    }

    fn draw(&mut self, op: DrawOp) {
        self.ops.push(ImagingOp::Draw(op.clone()));
        self.events.push(Event::Draw {
            op,
            state: self.state.clone(),
        });
    }
}

/// One call to [`RefRasterizer::rasterize`].
#[derive(Clone, Debug)]
pub struct Capture {
    /// Requested width in pixels.
    pub width: u32,
    /// Requested height in pixels.
    pub height: u32,
    /// Events the paint closure produced.
    pub events: Vec<Event>,
}

/// Rasterizer that records instead of producing pixels.
///
/// Every call returns a transparent bitmap of the requested size and keeps a
/// [`Capture`] of what was drawn into it.
#[derive(Debug, Default)]
pub struct RefRasterizer {
    captures: RefCell<Vec<Capture>>,
}

impl RefRasterizer {
    /// Create an empty rasterizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bitmaps rasterized so far.
    pub fn calls(&self) -> usize {
        self.captures.borrow().len()
    }

    /// All captures so far, oldest first.
    pub fn captures(&self) -> Vec<Capture> {
        self.captures.borrow().clone()
    }

    /// Forget all captures.
    pub fn reset(&self) {
        self.captures.borrow_mut().clear();
    }
}

impl Rasterizer for RefRasterizer {
    fn rasterize(
        &self,
        width: u32,
        height: u32,
        paint: &mut dyn FnMut(&mut dyn ImagingBackend),
    ) -> Bitmap {
        if width == 0 || height == 0 {
            return Bitmap::empty();
        }
        let mut backend = RefBackend::default();
        paint(&mut backend);
        self.captures.borrow_mut().push(Capture {
            width,
            height,
            events: backend.events,
        });
        Bitmap::transparent(width, height)
    }
}

/// Identity blur that counts calls.
#[derive(Debug, Default)]
pub struct CountingBlur {
    calls: Cell<u32>,
    last_radius: Cell<Option<f32>>,
}

impl CountingBlur {
    /// Create a blur with a zeroed counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times [`BlurProvider::blur`] was called.
    pub fn calls(&self) -> u32 {
        self.calls.get()
    }

    /// Radius passed to the most recent call.
    pub fn last_radius(&self) -> Option<f32> {
        self.last_radius.get()
    }
}

impl BlurProvider for CountingBlur {
    fn blur(&self, bitmap: &Bitmap, radius: f32) -> Bitmap {
        self.calls.set(self.calls.get() + 1);
        self.last_radius.set(Some(radius));
        bitmap.clone()
    }
}
