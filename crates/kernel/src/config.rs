//! Tunables that are not part of the RF design itself.

use serde::{Deserialize, Serialize};

/// Tolerance for geometric comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Points closer than this are considered coincident (meters).
    pub coincidence: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self { coincidence: 1e-9 }
    }
}

impl Tolerance {
    pub fn is_zero_length(&self, length: f64) -> bool {
        length.abs() < self.coincidence
    }
}

/// Upper bounds on synthesized vertex counts.
///
/// Grid solidity multiplies the angular segment count without limit, so a
/// careless design can ask for billions of vertices. Designs that exceed
/// these ceilings are rejected as degenerate instead of truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisLimits {
    /// Maximum vertex count of one reflector mesh.
    pub max_mesh_vertices: usize,
    /// Maximum vertex count of one helix curve.
    pub max_curve_vertices: usize,
}

impl Default for SynthesisLimits {
    fn default() -> Self {
        Self {
            max_mesh_vertices: 4_000_000,
            max_curve_vertices: 1_000_000,
        }
    }
}

impl SynthesisLimits {
    /// Only the ceiling that `u32` face and edge indices impose.
    pub fn unbounded() -> Self {
        Self {
            max_mesh_vertices: u32::MAX as usize,
            max_curve_vertices: u32::MAX as usize,
        }
    }
}
