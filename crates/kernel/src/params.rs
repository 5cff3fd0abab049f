//! Design inputs: the RF parameter bundle, the transition interpolation law,
//! and the array layout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{require_at_least, require_positive, Error, Result};
use crate::geometry::point::Point3d;
use crate::geometry::vector::Vec3;
use crate::rf;

/// How the transition helix radius grows from its start to its end radius.
///
/// Configuration documents carry it as a label; serde goes through the same
/// [`FromStr`] parser as hosts do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Interpolation {
    /// Constant growth rate.
    Linear,
    /// Slow start, accelerating growth (quadratic).
    EaseIn,
    /// Fast start, decelerating growth (inverted quadratic).
    EaseOut,
}

impl Interpolation {
    pub const ALL: [Interpolation; 3] = [Self::Linear, Self::EaseIn, Self::EaseOut];

    /// Growth fraction in `[0, 1]` at curve parameter `t` in `[0, 1]`.
    pub fn fraction(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }

    /// Radius between `start` and `end` at curve parameter `t`.
    pub fn radius(self, start: f64, end: f64, t: f64) -> f64 {
        start + self.fraction(t) * (end - start)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "ease_in",
            Self::EaseOut => "ease_out",
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Interpolation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linear" => Ok(Self::Linear),
            "ease_in" | "ease-in" => Ok(Self::EaseIn),
            "ease_out" | "ease-out" => Ok(Self::EaseOut),
            other => Err(Error::invalid(
                "transition_interpolation",
                format!("unsupported interpolation `{other}`, expected linear, ease_in or ease_out"),
            )),
        }
    }
}

impl TryFrom<String> for Interpolation {
    type Error = Error;

    fn try_from(label: String) -> Result<Self> {
        label.parse()
    }
}

impl From<Interpolation> for String {
    fn from(interpolation: Interpolation) -> Self {
        interpolation.label().to_string()
    }
}

/// The immutable RF design a whole antenna array is derived from.
///
/// Construct it once, call [`DesignParameters::validate`] (or let
/// [`crate::DerivedGeometry::derive`] do it), and pass it by reference from
/// then on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignParameters {
    /// Operating frequency in Hz.
    pub frequency_hz: f64,
    /// Element spacing in wavelengths; also sets the dish diameter.
    pub stack_lambda_factor: f64,
    /// Focal length to diameter ratio of the reflector.
    pub f_to_d_ratio: f64,
    /// Reflector grid spacing as a fraction of a wavelength, in (0, 1).
    pub grid_wavelength_fraction: f64,
    /// Tessellation density multiplier for the reflector grid.
    pub grid_solidity: usize,
    /// Requested width of the reflector mesh wires (m).
    pub mesh_wire_width: f64,
    /// Helix circumference in wavelengths.
    pub helix_circumference_factor: f64,
    /// Helix pitch angle in degrees, strictly between 0 and 90.
    pub pitch_angle_degrees: f64,
    pub turn_count: usize,
    /// Helix wire diameter (m).
    pub wire_thickness: f64,
    pub vertices_per_turn: usize,
    pub transition_turn_count: usize,
    pub transition_interpolation: Interpolation,
}

impl Default for DesignParameters {
    fn default() -> Self {
        Self {
            frequency_hz: rf::mhz_to_hz(1300.0),
            stack_lambda_factor: 1.0,
            f_to_d_ratio: 0.25,
            grid_wavelength_fraction: 0.25,
            grid_solidity: 6,
            mesh_wire_width: 0.0015,
            helix_circumference_factor: 1.0,
            pitch_angle_degrees: 14.0,
            turn_count: 25,
            wire_thickness: 0.002588,
            vertices_per_turn: 150,
            transition_turn_count: 2,
            transition_interpolation: Interpolation::EaseOut,
        }
    }
}

impl DesignParameters {
    pub fn with_frequency_mhz(frequency_mhz: f64) -> Self {
        Self {
            frequency_hz: rf::mhz_to_hz(frequency_mhz),
            ..Self::default()
        }
    }

    pub fn frequency_mhz(&self) -> f64 {
        self.frequency_hz / 1e6
    }

    /// Check every field against its domain before the pipeline runs.
    pub fn validate(&self) -> Result<()> {
        require_positive("frequency_hz", self.frequency_hz)?;
        require_positive("stack_lambda_factor", self.stack_lambda_factor)?;
        require_positive("f_to_d_ratio", self.f_to_d_ratio)?;
        require_positive("grid_wavelength_fraction", self.grid_wavelength_fraction)?;
        if self.grid_wavelength_fraction >= 1.0 {
            return Err(Error::invalid(
                "grid_wavelength_fraction",
                format!("must be below 1, got {}", self.grid_wavelength_fraction),
            ));
        }
        require_at_least("grid_solidity", self.grid_solidity, 1)?;
        require_positive("mesh_wire_width", self.mesh_wire_width)?;
        require_positive("helix_circumference_factor", self.helix_circumference_factor)?;
        if !(self.pitch_angle_degrees > 0.0 && self.pitch_angle_degrees < 90.0) {
            return Err(Error::invalid(
                "pitch_angle_degrees",
                format!(
                    "must lie strictly between 0 and 90, got {}",
                    self.pitch_angle_degrees
                ),
            ));
        }
        require_at_least("turn_count", self.turn_count, 1)?;
        require_positive("wire_thickness", self.wire_thickness)?;
        require_at_least("vertices_per_turn", self.vertices_per_turn, 3)?;
        require_at_least("transition_turn_count", self.transition_turn_count, 1)?;
        Ok(())
    }
}

/// Shape and placement of the stacked array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayLayout {
    /// Element count along X.
    pub elements_x: usize,
    /// Element count along Y.
    pub elements_y: usize,
    /// Location of the array root.
    pub location: Point3d,
    /// XYZ Euler rotation of the array root, in degrees.
    pub rotation_degrees: Vec3,
}

impl Default for ArrayLayout {
    fn default() -> Self {
        Self {
            elements_x: 3,
            elements_y: 3,
            location: Point3d::ORIGIN,
            rotation_degrees: Vec3::ZERO,
        }
    }
}

impl ArrayLayout {
    pub fn grid(elements_x: usize, elements_y: usize) -> Self {
        Self {
            elements_x,
            elements_y,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_at_least("elements_x", self.elements_x, 1)?;
        require_at_least("elements_y", self.elements_y, 1)?;
        let finite = self.location.to_array().iter().all(|v| v.is_finite())
            && self.rotation_degrees.to_array().iter().all(|v| v.is_finite());
        if !finite {
            return Err(Error::invalid(
                "array_root",
                "location and rotation must be finite",
            ));
        }
        Ok(())
    }
}
