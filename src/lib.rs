//! Length conversions for slide and document generation.
//!
//! Converts between pixels, points, twips (DXA) and EMU so that a JavaScript
//! presentation generator can hand UI measurements to OOXML. The pure Rust
//! API lives in [`units`] and [`converters`]; [`assembly`] exposes it to JS.

pub mod assembly;
pub mod converters;
pub mod schema;
pub mod units;

pub use converters::{frame_inches_to_emu, frame_pixels_to_emu, measure_batch, measure_pixels};
pub use schema::{BatchReport, ConvertOptions, EmuFrame, Frame, LengthReport, UnitError};
pub use units::{
    DEFAULT_DPI, MAX_INTEGRAL_LENGTH, emu_to_points, emu_to_twips, inches_to_emu, pixels_to_emu,
    pixels_to_points, pixels_to_twips, points_to_emu, twips_to_emu,
};
