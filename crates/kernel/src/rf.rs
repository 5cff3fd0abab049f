//! Conversions from RF design quantities to physical lengths (meters).
//!
//! Every function here is pure: the same inputs always produce bit-identical
//! outputs.

use std::f64::consts::PI;

use crate::error::{require_positive, Error, Result};

/// Speed of light in vacuum, m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

pub fn mhz_to_hz(frequency_mhz: f64) -> f64 {
    frequency_mhz * 1e6
}

/// Free-space wavelength for `frequency_hz`.
pub fn wavelength(frequency_hz: f64) -> Result<f64> {
    let frequency_hz = require_positive("frequency_hz", frequency_hz)?;
    Ok(SPEED_OF_LIGHT / frequency_hz)
}

/// Element-to-element spacing of a stacked array; also the dish diameter.
pub fn stack_distance(frequency_hz: f64, lambda_factor: f64) -> Result<f64> {
    let lambda_factor = require_positive("stack_lambda_factor", lambda_factor)?;
    Ok(lambda_factor * wavelength(frequency_hz)?)
}

pub fn focal_length(diameter: f64, f_to_d_ratio: f64) -> Result<f64> {
    let diameter = require_positive("diameter", diameter)?;
    let f_to_d_ratio = require_positive("f_to_d_ratio", f_to_d_ratio)?;
    Ok(f_to_d_ratio * diameter)
}

/// Target spacing of the reflector wire grid, as a fraction of a wavelength.
pub fn grid_spacing(frequency_hz: f64, wavelength_fraction: f64) -> Result<f64> {
    let wavelength_fraction = require_positive("grid_wavelength_fraction", wavelength_fraction)?;
    Ok(wavelength_fraction * wavelength(frequency_hz)?)
}

/// Helix diameter for a circumference of `circumference_factor` wavelengths.
pub fn helix_diameter(frequency_hz: f64, circumference_factor: f64) -> Result<f64> {
    let circumference_factor =
        require_positive("helix_circumference_factor", circumference_factor)?;
    Ok((wavelength(frequency_hz)? / PI) * circumference_factor)
}

/// Axial distance between consecutive helix turns for the given pitch angle.
pub fn helix_turn_spacing(frequency_hz: f64, pitch_angle_degrees: f64) -> Result<f64> {
    if !(pitch_angle_degrees > 0.0 && pitch_angle_degrees < 90.0) {
        return Err(Error::invalid(
            "pitch_angle_degrees",
            format!("must lie strictly between 0 and 90, got {pitch_angle_degrees}"),
        ));
    }
    Ok((wavelength(frequency_hz)? / PI) * pitch_angle_degrees.to_radians().tan())
}
