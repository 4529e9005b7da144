//! # Length Units
//!
//! Conversions between the measurement systems a slide deck mixes together:
//!
//! - **Pixels** come from the UI and depend on display density (DPI).
//! - **Points** (1/72 inch) size fonts, margins and paragraph spacing.
//! - **Twips** (1/20 point, also called DXA) are the integral unit of Word-style layout.
//! - **EMU** (1/914400 inch) are the integral unit of DrawingML geometry.
//!
//! Every conversion is a separate function because the rounding differs:
//! points stay fractional, twips and EMU are always rounded to an integer.
//! Rounding is half away from zero (`f64::round`); inputs are never negative,
//! so this is the same as the host's `Math.round`.

use crate::schema::UnitError;

/// Screen density assumed when a caller does not give one.
pub const DEFAULT_DPI: f64 = 96.0;

/// Typographic points in one inch.
pub const POINTS_PER_INCH: f64 = 72.0;
/// Twips (DXA) in one point.
pub const TWIPS_PER_POINT: i64 = 20;
/// Twips (DXA) in one inch.
pub const TWIPS_PER_INCH: i64 = 1_440;
/// English Metric Units in one inch.
pub const EMUS_PER_INCH: i64 = 914_400;
/// EMU in one twip. Exact, so twip values convert to EMU without loss.
pub const EMUS_PER_TWIP: i64 = 635;
/// EMU in one point.
pub const EMUS_PER_POINT: i64 = 12_700;

/// Largest integral length (twips or EMU) accepted or produced.
///
/// 2^51 keeps every value exact as an `f64`, and therefore as a JS number, and
/// keeps `twips_to_emu(emu_to_twips(e)) == e` exact. Above it the division by
/// 635 and the multiplication back can each lose an ulp.
pub const MAX_INTEGRAL_LENGTH: i64 = 1 << 51;

/// Validates a display density.
///
/// Returns the density unchanged when it is finite and strictly positive.
pub fn check_dpi(dpi: f64) -> Result<f64, UnitError> {
    if dpi.is_finite() && dpi > 0.0 {
        Ok(dpi)
    } else {
        Err(UnitError::InvalidArgument(format!(
            "dpi must be a positive finite number, got {}",
            dpi
        )))
    }
}

/// Validates a length measured in `unit`.
///
/// Lengths must be finite and not negative.
pub fn check_length(value: f64, unit: &str) -> Result<f64, UnitError> {
    if !value.is_finite() {
        return Err(UnitError::InvalidArgument(format!(
            "{} length must be finite, got {}",
            unit, value
        )));
    }
    if value < 0.0 {
        return Err(UnitError::InvalidArgument(format!(
            "{} length must not be negative, got {}",
            unit, value
        )));
    }
    Ok(value)
}

fn check_emu(emu: i64) -> Result<i64, UnitError> {
    if emu < 0 {
        return Err(UnitError::InvalidArgument(format!(
            "emu length must not be negative, got {}",
            emu
        )));
    }
    if emu > MAX_INTEGRAL_LENGTH {
        return Err(UnitError::InvalidArgument(format!(
            "emu length {} exceeds {}",
            emu, MAX_INTEGRAL_LENGTH
        )));
    }
    Ok(emu)
}

/// Rounds half away from zero and narrows to `i64`, rejecting anything past
/// [`MAX_INTEGRAL_LENGTH`] instead of saturating.
fn round_to_i64(value: f64) -> Result<i64, UnitError> {
    let rounded = value.round();
    if !rounded.is_finite() || rounded.abs() > MAX_INTEGRAL_LENGTH as f64 {
        return Err(UnitError::InvalidArgument(format!(
            "result {} is out of range for an integral length",
            value
        )));
    }
    Ok(rounded as i64)
}

/// Converts pixels to typographic points.
///
/// # Arguments
///
/// * `px` - Length in pixels, finite and not negative
/// * `dpi` - Display density the pixels were measured at (use [`DEFAULT_DPI`] for screens)
///
/// # Returns
///
/// `px * 72 / dpi`. The result is not rounded.
///
/// # Example
///
/// ```
/// use slide_units_wasm::units::pixels_to_points;
///
/// assert_eq!(pixels_to_points(96.0, 96.0).unwrap(), 72.0);
/// ```
pub fn pixels_to_points(px: f64, dpi: f64) -> Result<f64, UnitError> {
    let px = check_length(px, "pixel")?;
    let dpi = check_dpi(dpi)?;
    Ok(px * POINTS_PER_INCH / dpi)
}

/// Converts pixels to twips (twentieths of a point), rounded to the nearest integer.
///
/// # Example
///
/// ```
/// use slide_units_wasm::units::pixels_to_twips;
///
/// assert_eq!(pixels_to_twips(96.0, 96.0).unwrap(), 1440);
/// ```
pub fn pixels_to_twips(px: f64, dpi: f64) -> Result<i64, UnitError> {
    let px = check_length(px, "pixel")?;
    let dpi = check_dpi(dpi)?;
    round_to_i64(px * TWIPS_PER_INCH as f64 / dpi)
}

/// Converts twips to EMU. One twip is exactly 635 EMU; fractional twips are
/// accepted and the product is rounded.
pub fn twips_to_emu(twips: f64) -> Result<i64, UnitError> {
    let twips = check_length(twips, "twip")?;
    round_to_i64(twips * EMUS_PER_TWIP as f64)
}

/// Converts pixels straight to EMU, rounded to the nearest integer.
///
/// Rounding happens once, so the result can differ from
/// `twips_to_emu(pixels_to_twips(px, dpi))` by at most one twip (635 EMU).
///
/// # Example
///
/// ```
/// use slide_units_wasm::units::pixels_to_emu;
///
/// assert_eq!(pixels_to_emu(10.0, 96.0).unwrap(), 95_250);
/// ```
pub fn pixels_to_emu(px: f64, dpi: f64) -> Result<i64, UnitError> {
    let px = check_length(px, "pixel")?;
    let dpi = check_dpi(dpi)?;
    round_to_i64(px * EMUS_PER_INCH as f64 / dpi)
}

/// Converts EMU back to twips without rounding.
///
/// Feeding the result to [`twips_to_emu`] recovers `emu` exactly.
pub fn emu_to_twips(emu: i64) -> Result<f64, UnitError> {
    let emu = check_emu(emu)?;
    Ok(emu as f64 / EMUS_PER_TWIP as f64)
}

/// Converts points to EMU, e.g. for outline widths and text insets.
pub fn points_to_emu(pt: f64) -> Result<i64, UnitError> {
    let pt = check_length(pt, "point")?;
    round_to_i64(pt * EMUS_PER_POINT as f64)
}

/// Converts inches to EMU. Slide geometry is given in inches by the host.
pub fn inches_to_emu(inches: f64) -> Result<i64, UnitError> {
    let inches = check_length(inches, "inch")?;
    round_to_i64(inches * EMUS_PER_INCH as f64)
}

/// Converts EMU to points without rounding.
pub fn emu_to_points(emu: i64) -> Result<f64, UnitError> {
    let emu = check_emu(emu)?;
    Ok(emu as f64 / EMUS_PER_POINT as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_invalid<T: std::fmt::Debug>(result: Result<T, UnitError>) {
        match result {
            Err(UnitError::InvalidArgument(_)) => {}
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_known_values() {
        assert!((pixels_to_points(96.0, 96.0).unwrap() - 72.0).abs() < EPS);
        assert_eq!(pixels_to_twips(96.0, 96.0).unwrap(), 1440);
        assert_eq!(twips_to_emu(1440.0).unwrap(), 914_400);
        assert_eq!(pixels_to_emu(96.0, 96.0).unwrap(), 914_400);
        assert_eq!(pixels_to_emu(10.0, 96.0).unwrap(), 95_250);
        assert_invalid(pixels_to_twips(-5.0, 96.0));
    }

    #[test]
    fn test_constants_agree() {
        assert_eq!(TWIPS_PER_INCH, POINTS_PER_INCH as i64 * TWIPS_PER_POINT);
        assert_eq!(EMUS_PER_INCH, TWIPS_PER_INCH * EMUS_PER_TWIP);
        assert_eq!(EMUS_PER_POINT, TWIPS_PER_POINT * EMUS_PER_TWIP);
    }

    #[test]
    fn test_points_formula_over_sweep() {
        for dpi in [72.0, 96.0, 120.0, 144.0, 150.0, 192.0, 300.0, 0.5] {
            for step in 0..500 {
                let px = step as f64 * 0.37;
                let expected = px * 72.0 / dpi;
                let got = pixels_to_points(px, dpi).unwrap();
                assert!((got - expected).abs() < EPS, "px={} dpi={}", px, dpi);
            }
        }
    }

    #[test]
    fn test_points_stay_fractional() {
        let pt = pixels_to_points(1.0, 96.0).unwrap();
        assert!((pt - 0.75).abs() < EPS);
    }

    #[test]
    fn test_twips_round_half_away_from_zero() {
        // 1px at 96dpi = 15 twips exactly; 0.1px = 1.5 twips
        assert_eq!(pixels_to_twips(1.0, 96.0).unwrap(), 15);
        assert_eq!(pixels_to_twips(0.1, 96.0).unwrap(), 2);
        assert_eq!(pixels_to_twips(0.0, 96.0).unwrap(), 0);
        assert_eq!(twips_to_emu(0.5).unwrap(), 318);
    }

    #[test]
    fn test_composed_emu_within_one_twip() {
        for dpi in [72.0, 96.0, 110.0, 133.0, 144.0, 192.0, 300.0] {
            for step in 0..2000 {
                let px = step as f64 * 0.173;
                let twips = pixels_to_twips(px, dpi).unwrap();
                let composed = twips_to_emu(twips as f64).unwrap();
                let direct = pixels_to_emu(px, dpi).unwrap();
                assert!(
                    (composed - direct).abs() <= EMUS_PER_TWIP,
                    "px={} dpi={} composed={} direct={}",
                    px,
                    dpi,
                    composed,
                    direct
                );
            }
        }
    }

    #[test]
    fn test_emu_twip_emu_recovers_exactly() {
        for emu in [0, 1, 634, 635, 636, 12_700, 95_250, 914_400, 9_144_000, 123_456_789] {
            let twips = emu_to_twips(emu).unwrap();
            assert_eq!(twips_to_emu(twips).unwrap(), emu);
        }
        assert_eq!(emu_to_twips(914_400).unwrap(), 1440.0);
    }

    #[test]
    fn test_bad_dpi_rejected_everywhere() {
        for dpi in [0.0, -0.0, -96.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_invalid(pixels_to_points(10.0, dpi));
            assert_invalid(pixels_to_twips(10.0, dpi));
            assert_invalid(pixels_to_emu(10.0, dpi));
        }
    }

    #[test]
    fn test_bad_lengths_rejected() {
        for bad in [-1.0, -0.001, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_invalid(pixels_to_points(bad, 96.0));
            assert_invalid(pixels_to_twips(bad, 96.0));
            assert_invalid(pixels_to_emu(bad, 96.0));
            assert_invalid(twips_to_emu(bad));
            assert_invalid(points_to_emu(bad));
            assert_invalid(inches_to_emu(bad));
        }
        assert_invalid(emu_to_twips(-1));
        assert_invalid(emu_to_points(-635));
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert_invalid(pixels_to_emu(1e300, 96.0));
        assert_invalid(pixels_to_twips(f64::MAX, 1e-300));
        assert_invalid(twips_to_emu(1e17));
    }

    #[test]
    fn test_integral_bound() {
        let max = MAX_INTEGRAL_LENGTH;
        assert_eq!(twips_to_emu(emu_to_twips(max).unwrap()).unwrap(), max);
        assert_eq!(twips_to_emu(emu_to_twips(max - 1).unwrap()).unwrap(), max - 1);
        assert_invalid(emu_to_twips(max + 1));
        assert_invalid(emu_to_twips((1 << 53) + 1));
        assert_invalid(emu_to_points((1 << 53) + 1));
        // just past the bound, reached through pixels at 96dpi (1px = 9525 EMU)
        assert_invalid(pixels_to_emu((max + 100) as f64 / 9525.0, 96.0));
        assert!(pixels_to_emu((max - 100) as f64 / 9525.0, 96.0).is_ok());
        assert_invalid(twips_to_emu((1u64 << 53) as f64));
    }

    #[test]
    fn test_point_and_inch_conversions() {
        assert_eq!(points_to_emu(1.0).unwrap(), 12_700);
        assert_eq!(points_to_emu(7.2).unwrap(), 91_440);
        assert_eq!(inches_to_emu(1.0).unwrap(), 914_400);
        assert_eq!(inches_to_emu(0.92).unwrap(), 841_248);
        assert!((emu_to_points(12_700).unwrap() - 1.0).abs() < EPS);
    }
}
