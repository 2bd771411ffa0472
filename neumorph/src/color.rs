// Copyright 2025 the Neumorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! ARGB colors and interaction-state color lists.

use alloc::vec::Vec;

use peniko::Color;

bitflags::bitflags! {
    /// Interaction state of the widget hosting a drawable.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct InteractionState: u32 {
        /// The widget accepts input.
        const ENABLED   = 1 << 0;
        /// The widget is being pressed.
        const PRESSED   = 1 << 1;
        /// The widget has input focus.
        const FOCUSED   = 1 << 2;
        /// A pointer hovers the widget.
        const HOVERED   = 1 << 3;
        /// The widget is selected.
        const SELECTED  = 1 << 4;
        /// The widget is checked.
        const CHECKED   = 1 << 5;
        /// The widget is activated.
        const ACTIVATED = 1 << 6;
    }
}

/// A packed `0xAARRGGBB` color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Argb(pub u32);

#[expect(
    clippy::cast_possible_truncation,
    reason = "components are shifted out of a packed u32"
)]
impl Argb {
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0);

    /// Pack from components.
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Alpha component.
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red component.
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green component.
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue component.
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// The same color with a different alpha.
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self::from_argb(alpha, self.red(), self.green(), self.blue())
    }
}

impl From<u32> for Argb {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Argb> for Color {
    fn from(argb: Argb) -> Self {
        Self::from_rgba8(argb.red(), argb.green(), argb.blue(), argb.alpha())
    }
}

impl From<Color> for Argb {
    fn from(color: Color) -> Self {
        let c = color.to_rgba8();
        Self::from_argb(c.a, c.r, c.g, c.b)
    }
}

/// One rule of a [`ColorStateList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorStateEntry {
    /// Flags that must all be present.
    #[cfg_attr(feature = "serde", serde(default))]
    pub required: InteractionState,
    /// Flags that must all be absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub forbidden: InteractionState,
    /// Color used when the rule matches.
    pub color: Argb,
}

impl ColorStateEntry {
    /// Returns `true` if this rule applies to `state`.
    pub fn matches(&self, state: InteractionState) -> bool {
        state.contains(self.required) && !state.intersects(self.forbidden)
    }
}

/// Colors that depend on the interaction state.
///
/// Entries are tried in order; the first one that matches wins. When none
/// matches, the default color is used.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorStateList {
    #[cfg_attr(feature = "serde", serde(default))]
    entries: Vec<ColorStateEntry>,
    default: Argb,
}

impl ColorStateList {
    /// A list that always resolves to `color`.
    pub fn single(color: Argb) -> Self {
        Self {
            entries: Vec::new(),
            default: color,
        }
    }

    /// Add a rule: `color` when every flag in `required` is set and no flag in
    /// `forbidden` is.
    pub fn with_entry(
        mut self,
        required: InteractionState,
        forbidden: InteractionState,
        color: Argb,
    ) -> Self {
        self.entries.push(ColorStateEntry {
            required,
            forbidden,
            color,
        });
        self
    }

    /// The rules, in resolution order.
    pub fn entries(&self) -> &[ColorStateEntry] {
        &self.entries
    }

    /// Color used when no rule matches.
    pub fn default_color(&self) -> Argb {
        self.default
    }

    /// Returns `true` if the resolved color can depend on the state.
    pub fn is_stateful(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Resolve the color for `state`.
    pub fn color_for_state(&self, state: InteractionState) -> Argb {
        self.entries
            .iter()
            .find(|entry| entry.matches(state))
            .map_or(self.default, |entry| entry.color)
    }
}

impl From<Argb> for ColorStateList {
    fn from(color: Argb) -> Self {
        Self::single(color)
    }
}
