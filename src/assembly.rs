//! # Assembly Module
//!
//! This module provides the WASM-exported functions the JavaScript deck
//! generator calls. It is the bridge between JS values and the Rust
//! conversion logic.
//!
//! ## Overview
//!
//! Two kinds of exports:
//! - Scalar conversions (`pixelsToPoints`, `pixelsToTwips`, `twipsToEMU`,
//!   `pixelsToEMU`, ...) that return a number or throw an `Error`
//! - JSON entry points (`convertLengths`, `convertFrame`) that take JSON strings
//!   and return a JSON string holding either the result or an `error` field
//!
//! Integral results (twips, EMU) are returned as JS numbers. They never exceed
//! `MAX_INTEGRAL_LENGTH` (2^51), so they are always exact.

use crate::converters::{frame_inches_to_emu, frame_pixels_to_emu, measure_batch};
use crate::schema::{ConvertOptions, Frame, UnitError};
use crate::units::{self, DEFAULT_DPI, MAX_INTEGRAL_LENGTH};
use serde::Serialize;
use serde_json::json;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsError, JsValue};

/// Reports rejected host input on the JS console.
fn warn(#[cfg_attr(not(target_arch = "wasm32"), allow(unused_variables))] message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(message));
}

fn rejected(err: UnitError) -> JsError {
    warn(&err.to_string());
    JsError::from(err)
}

/// Converts pixels to points. `dpi` defaults to 96 when omitted.
///
/// # Example
///
/// ```javascript
/// const pt = pixelsToPoints(16);        // 12
/// const hi = pixelsToPoints(32, 192);   // 12
/// ```
#[wasm_bindgen(js_name = pixelsToPoints)]
pub fn pixels_to_points(px: f64, dpi: Option<f64>) -> Result<f64, JsError> {
    units::pixels_to_points(px, dpi.unwrap_or(DEFAULT_DPI)).map_err(rejected)
}

/// Converts pixels to twips (DXA), rounded.
#[wasm_bindgen(js_name = pixelsToTwips)]
pub fn pixels_to_twips(px: f64, dpi: Option<f64>) -> Result<f64, JsError> {
    units::pixels_to_twips(px, dpi.unwrap_or(DEFAULT_DPI))
        .map(|v| v as f64)
        .map_err(rejected)
}

#[wasm_bindgen(js_name = twipsToEMU)]
pub fn twips_to_emu(twips: f64) -> Result<f64, JsError> {
    units::twips_to_emu(twips).map(|v| v as f64).map_err(rejected)
}

/// Converts pixels to EMU, rounded once.
///
/// ```javascript
/// outline: { size: pixelsToEMU(10) } // 95250
/// ```
#[wasm_bindgen(js_name = pixelsToEMU)]
pub fn pixels_to_emu(px: f64, dpi: Option<f64>) -> Result<f64, JsError> {
    units::pixels_to_emu(px, dpi.unwrap_or(DEFAULT_DPI))
        .map(|v| v as f64)
        .map_err(rejected)
}

#[wasm_bindgen(js_name = emuToTwips)]
pub fn emu_to_twips(emu: f64) -> Result<f64, JsError> {
    let emu = integral_emu(emu).map_err(rejected)?;
    units::emu_to_twips(emu).map_err(rejected)
}

#[wasm_bindgen(js_name = emuToPoints)]
pub fn emu_to_points(emu: f64) -> Result<f64, JsError> {
    let emu = integral_emu(emu).map_err(rejected)?;
    units::emu_to_points(emu).map_err(rejected)
}

#[wasm_bindgen(js_name = pointsToEMU)]
pub fn points_to_emu(pt: f64) -> Result<f64, JsError> {
    units::points_to_emu(pt).map(|v| v as f64).map_err(rejected)
}

#[wasm_bindgen(js_name = inchesToEMU)]
pub fn inches_to_emu(inches: f64) -> Result<f64, JsError> {
    units::inches_to_emu(inches).map(|v| v as f64).map_err(rejected)
}

/// JS hands EMU over as a double; only whole values up to
/// [`MAX_INTEGRAL_LENGTH`] are EMU.
fn integral_emu(emu: f64) -> Result<i64, UnitError> {
    if !emu.is_finite() || emu.fract() != 0.0 || emu.abs() > MAX_INTEGRAL_LENGTH as f64 {
        return Err(UnitError::InvalidArgument(format!(
            "emu length must be a whole number, got {}",
            emu
        )));
    }
    Ok(emu as i64)
}

/// Converts a list of pixel lengths and reports every unit for each.
///
/// # Parameters
///
/// * `values_json` - A JSON array of pixel values, e.g. `"[10, 96, 0.5]"`.
///
/// * `options_json` - Optional JSON string matching `ConvertOptions`,
///                    e.g. `"{\"dpi\": 192}"`. If `None`, 96 DPI is used.
///                    Malformed JSON is reported as an error, not replaced
///                    by defaults.
///
/// # Returns
///
/// A `JsValue` holding a JSON string. On success it is a `BatchReport`:
/// `dpi`, `lengths` (one report per value) and `max_drift_emu`. On failure it
/// is an object with a single `error` field. If any value is invalid, no
/// lengths are returned.
///
/// # Example
///
/// ```javascript
/// const result = JSON.parse(convertLengths("[10, 96]", null));
/// if (result.error) {
///     console.error(result.error);
/// } else {
///     console.log(result.lengths[0].emu); // 95250
/// }
/// ```
#[wasm_bindgen(js_name = convertLengths)]
pub fn convert_lengths(values_json: &str, options_json: Option<String>) -> JsValue {
    JsValue::from_str(&convert_lengths_json(values_json, options_json.as_deref()))
}

/// Converts a shape frame `{x, y, w, h}` to `{x, y, cx, cy}` in EMU.
///
/// `unit` is `"px"` (the default, converted at the options' density) or
/// `"in"`. The return value follows the same JSON conventions as
/// `convertLengths`.
#[wasm_bindgen(js_name = convertFrame)]
pub fn convert_frame(
    frame_json: &str,
    unit: Option<String>,
    options_json: Option<String>,
) -> JsValue {
    JsValue::from_str(&convert_frame_json(
        frame_json,
        unit.as_deref(),
        options_json.as_deref(),
    ))
}

pub(crate) fn convert_lengths_json(values_json: &str, options_json: Option<&str>) -> String {
    let result = parse_options(options_json).and_then(|options| {
        let values: Vec<f64> = serde_json::from_str(values_json)
            .map_err(|e| UnitError::MalformedInput(format!("values: {}", e)))?;
        measure_batch(&values, &options)
    });
    respond(result)
}

pub(crate) fn convert_frame_json(
    frame_json: &str,
    unit: Option<&str>,
    options_json: Option<&str>,
) -> String {
    let result = parse_options(options_json).and_then(|options| {
        let frame: Frame = serde_json::from_str(frame_json)
            .map_err(|e| UnitError::MalformedInput(format!("frame: {}", e)))?;
        match unit.unwrap_or("px") {
            "px" => frame_pixels_to_emu(&frame, &options),
            "in" => frame_inches_to_emu(&frame),
            other => Err(UnitError::InvalidArgument(format!(
                "frame unit must be \"px\" or \"in\", got {:?}",
                other
            ))),
        }
    });
    respond(result)
}

fn parse_options(options_json: Option<&str>) -> Result<ConvertOptions, UnitError> {
    match options_json {
        Some(s) => serde_json::from_str(s)
            .map_err(|e| UnitError::MalformedInput(format!("options: {}", e))),
        None => Ok(ConvertOptions::default()),
    }
}

fn respond<T: Serialize>(result: Result<T, UnitError>) -> String {
    match result {
        Ok(value) => match serde_json::to_string(&value) {
            Ok(s) => s,
            Err(_) => json!({"error": "serialization failed"}).to_string(),
        },
        Err(err) => {
            warn(&err.to_string());
            json!({"error": err.to_string()}).to_string()
        }
    }
}
