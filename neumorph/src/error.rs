// Copyright 2025 the Neumorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.

use thiserror::Error;

/// Errors raised when configuration is applied.
///
/// Degenerate geometry and missing optional resources are never errors; they
/// turn the affected feature off.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum NeumorphError {
    /// Unknown raw shape-type enumerant.
    #[error("invalid shape type: {0}")]
    InvalidShapeType(i32),

    /// Unknown raw corner-family enumerant.
    #[error("invalid corner family: {0}")]
    InvalidCornerFamily(i32),

    /// Unknown raw paint-style enumerant.
    #[error("invalid paint style: {0}")]
    InvalidPaintStyle(i32),

    /// Unknown raw light-source enumerant.
    #[error("invalid light source: {0}")]
    InvalidLightSource(i32),

    /// A length attribute that must be finite and non-negative was not.
    #[error("invalid {name}: {value}")]
    InvalidLength {
        /// Attribute name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
}
