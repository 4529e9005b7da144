//! Data structures and types for length conversion.
//!
//! This module defines the core types used throughout the conversion library,
//! including the error type, configuration options, and result structures
//! handed back to JavaScript callers as JSON.

use crate::units::DEFAULT_DPI;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while converting lengths.
///
/// Every conversion either fully succeeds or fails with one of these; an
/// invalid input never yields a fabricated number such as `0` or `NaN`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UnitError {
    /// A density was non-positive or non-finite, a length was negative or
    /// non-finite, or a rounded result does not fit the integral target type.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// A JSON payload passed in from the host could not be decoded.
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

/// Configuration options for customizing conversions.
///
/// All fields are optional. When not provided, sensible defaults are used.
/// This structure can be deserialized from JSON so that JavaScript callers can
/// pass the same option object they already hand to the deck generator.
///
/// # Examples
///
/// Using the default 96 DPI screen density:
/// ```json
/// {}
/// ```
///
/// Converting from a high-density display:
/// ```json
/// { "dpi": 192 }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ConvertOptions {
    /// Display density in dots per inch used for every pixel conversion.
    /// Defaults to 96 if not specified.
    #[serde(default)]
    pub dpi: Option<f64>,
}

impl ConvertOptions {
    /// Options with an explicit density.
    pub fn with_dpi(dpi: f64) -> Self {
        Self { dpi: Some(dpi) }
    }

    /// The effective density, falling back to [`DEFAULT_DPI`].
    pub fn dpi(&self) -> f64 {
        self.dpi.unwrap_or(DEFAULT_DPI)
    }
}

/// Every unit a single pixel length converts to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LengthReport {
    /// The input length in pixels.
    pub pixels: f64,
    /// Density the pixels were measured at.
    pub dpi: f64,
    /// Typographic points; may be fractional.
    pub points: f64,
    /// Twentieths of a point, rounded.
    pub twips: i64,
    /// EMU computed directly from pixels.
    pub emu: i64,
    /// EMU computed by way of the rounded twip value.
    pub emu_via_twips: i64,
    /// `emu - emu_via_twips`. Bounded by one twip (635 EMU).
    pub drift_emu: i64,
    /// Notes about rounding that a caller may want to surface.
    pub notes: Vec<String>,
}

/// The result of converting a list of pixel lengths.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// Density applied to the whole batch.
    pub dpi: f64,
    /// One report per input value, in input order.
    pub lengths: Vec<LengthReport>,
    /// Largest absolute drift seen in the batch.
    pub max_drift_emu: i64,
}

/// Position and size of a shape on a slide, in a caller-chosen unit.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// A shape frame as OOXML stores it: offset and extent in EMU.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmuFrame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}
