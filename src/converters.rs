//! # Composite Conversions
//!
//! This module builds on the single-unit functions in [`crate::units`] to
//! answer the questions a deck generator actually asks:
//!
//! - **One length**: what is this pixel value in every target unit, and how much
//!   does the direct EMU value differ from the one reached through twips?
//! - **A batch**: the same for a list of values, failing as a whole if any
//!   value is invalid.
//! - **A shape frame**: position and size in pixels or inches, turned into the
//!   EMU offset/extent pair that DrawingML stores.
//!
//! All functions respect the density given in [`ConvertOptions`].

use crate::schema::{BatchReport, ConvertOptions, EmuFrame, Frame, LengthReport, UnitError};
use crate::units::{
    check_dpi, inches_to_emu, pixels_to_emu, pixels_to_points, pixels_to_twips, twips_to_emu,
};

/// Converts one pixel length into every supported unit.
///
/// # Arguments
///
/// * `px` - The length in pixels
/// * `options` - Conversion options; only `dpi` is read (default: 96)
///
/// # Returns
///
/// Returns `Ok(LengthReport)` containing:
/// - `points`: the unrounded point value
/// - `twips`: the rounded twip value
/// - `emu`: EMU computed directly from pixels
/// - `emu_via_twips`: EMU computed from the rounded twips
/// - `drift_emu`: the difference between the two EMU values
/// - `notes`: a note when the two EMU paths disagree
///
/// Returns `Err(UnitError::InvalidArgument)` if the length or density is invalid.
///
/// # Example
///
/// ```
/// use slide_units_wasm::converters::measure_pixels;
/// use slide_units_wasm::schema::ConvertOptions;
///
/// let report = measure_pixels(96.0, &ConvertOptions::default()).unwrap();
/// assert_eq!(report.twips, 1440);
/// assert_eq!(report.emu, 914_400);
/// ```
pub fn measure_pixels(px: f64, options: &ConvertOptions) -> Result<LengthReport, UnitError> {
    let dpi = check_dpi(options.dpi())?;

    let points = pixels_to_points(px, dpi)?;
    let twips = pixels_to_twips(px, dpi)?;
    let emu = pixels_to_emu(px, dpi)?;
    let emu_via_twips = twips_to_emu(twips as f64)?;
    let drift_emu = emu - emu_via_twips;

    let mut notes = Vec::new();
    if drift_emu != 0 {
        notes.push(format!(
            "twip rounding shifts EMU by {} ({} direct, {} via twips)",
            drift_emu, emu, emu_via_twips
        ));
    }

    Ok(LengthReport {
        pixels: px,
        dpi,
        points,
        twips,
        emu,
        emu_via_twips,
        drift_emu,
        notes,
    })
}

/// Converts a list of pixel lengths at one density.
///
/// The batch is all or nothing: the first invalid value fails the whole call
/// and its index is included in the error message.
pub fn measure_batch(values: &[f64], options: &ConvertOptions) -> Result<BatchReport, UnitError> {
    let dpi = check_dpi(options.dpi())?;

    let mut lengths = Vec::with_capacity(values.len());
    let mut max_drift_emu = 0i64;

    for (idx, &px) in values.iter().enumerate() {
        let report = measure_pixels(px, options).map_err(|e| match e {
            UnitError::InvalidArgument(msg) => {
                UnitError::InvalidArgument(format!("value #{}: {}", idx, msg))
            }
            other => other,
        })?;
        max_drift_emu = max_drift_emu.max(report.drift_emu.abs());
        lengths.push(report);
    }

    Ok(BatchReport {
        dpi,
        lengths,
        max_drift_emu,
    })
}

/// Converts a frame measured in pixels to an EMU frame.
pub fn frame_pixels_to_emu(
    frame: &Frame,
    options: &ConvertOptions,
) -> Result<EmuFrame, UnitError> {
    let dpi = check_dpi(options.dpi())?;
    Ok(EmuFrame {
        x: pixels_to_emu(frame.x, dpi)?,
        y: pixels_to_emu(frame.y, dpi)?,
        cx: pixels_to_emu(frame.w, dpi)?,
        cy: pixels_to_emu(frame.h, dpi)?,
    })
}

/// Converts a frame measured in inches to an EMU frame. Density does not apply.
pub fn frame_inches_to_emu(frame: &Frame) -> Result<EmuFrame, UnitError> {
    Ok(EmuFrame {
        x: inches_to_emu(frame.x)?,
        y: inches_to_emu(frame.y)?,
        cx: inches_to_emu(frame.w)?,
        cy: inches_to_emu(frame.h)?,
    })
}
