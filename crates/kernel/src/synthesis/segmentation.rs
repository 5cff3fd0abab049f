use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::SynthesisLimits;
use crate::error::{require_at_least, require_positive, Error, Result};

/// Angular and radial tessellation counts for a reflector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPlan {
    /// Vertices per ring.
    pub segments: usize,
    /// Ring intervals between apex and rim; the mesh has `rings + 1` rings.
    pub rings: usize,
}

impl GridPlan {
    pub fn vertex_count(&self) -> usize {
        (self.rings + 1) * self.segments
    }

    pub fn face_count(&self) -> usize {
        self.rings * self.segments
    }

    /// Reject plans whose mesh would exceed the configured vertex ceiling.
    pub fn check_limits(&self, limits: &SynthesisLimits) -> Result<()> {
        let vertices = self
            .rings
            .checked_add(1)
            .and_then(|r| r.checked_mul(self.segments));
        match vertices {
            Some(v) if v <= limits.max_mesh_vertices => Ok(()),
            _ => Err(Error::degenerate(format!(
                "reflector grid of {} rings x {} segments exceeds the {} vertex limit",
                self.rings + 1,
                self.segments,
                limits.max_mesh_vertices
            ))),
        }
    }
}

/// Plan the reflector tessellation for a target physical grid spacing.
///
/// `rings = floor(diameter * solidity / spacing)`. The minimum segment count
/// is the rim circumference divided by the spacing; solidity multiplies it.
#[instrument]
pub fn segment_and_ring_counts(
    diameter: f64,
    grid_spacing: f64,
    solidity: usize,
) -> Result<GridPlan> {
    let diameter = require_positive("diameter", diameter)?;
    let grid_spacing = require_positive("grid_spacing", grid_spacing)?;
    let solidity = require_at_least("grid_solidity", solidity, 1)?;

    let rings = (diameter * solidity as f64 / grid_spacing).floor() as usize;
    if rings < 1 {
        return Err(Error::degenerate(format!(
            "grid spacing {grid_spacing} leaves no rings across diameter {diameter}"
        )));
    }

    let rim_circumference = 2.0 * PI * (diameter / 2.0);
    let min_segments = (rim_circumference / grid_spacing).floor() as usize;
    let segments = min_segments.saturating_mul(solidity).max(min_segments);
    if segments < 3 {
        return Err(Error::degenerate(format!(
            "grid spacing {grid_spacing} yields {segments} angular segments, need at least 3"
        )));
    }

    debug!(min_segments, segments, rings, "planned reflector grid");
    Ok(GridPlan { segments, rings })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_solidity() {
        // rim circumference = 2*pi, spacing 1 -> 6 segments; 2 / 1 -> 2 rings.
        let plan = segment_and_ring_counts(2.0, 1.0, 1).unwrap();
        assert_eq!(plan, GridPlan { segments: 6, rings: 2 });
        assert_eq!(plan.vertex_count(), 18);
        assert_eq!(plan.face_count(), 12);
    }

    #[test]
    fn test_solidity_scales_both_counts() {
        let plan = segment_and_ring_counts(2.0, 1.0, 4).unwrap();
        assert_eq!(plan, GridPlan { segments: 24, rings: 8 });
    }

    #[test]
    fn test_reference_design_counts() {
        let wavelength = 299_792_458.0 / 1.3e9;
        let plan = segment_and_ring_counts(wavelength, 0.25 * wavelength, 6).unwrap();
        // floor(4*pi) = 12 minimum segments at quarter-wave spacing.
        assert_eq!(plan.segments, 72);
        assert!(plan.rings == 23 || plan.rings == 24);
    }

    #[test]
    fn test_coarse_spacing_is_degenerate() {
        assert!(matches!(
            segment_and_ring_counts(1.0, 5.0, 1),
            Err(Error::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn test_limits_reject_oversized_plan() {
        let plan = GridPlan { segments: 1000, rings: 1000 };
        let limits = SynthesisLimits { max_mesh_vertices: 10_000, ..Default::default() };
        assert!(matches!(
            plan.check_limits(&limits),
            Err(Error::DegenerateGeometry { .. })
        ));
        assert!(plan.check_limits(&SynthesisLimits::unbounded()).is_ok());
        // Even without a configured ceiling, u32 indices bound the grid.
        let huge = GridPlan { segments: 70_000, rings: 70_000 };
        assert!(huge.check_limits(&SynthesisLimits::unbounded()).is_err());
    }
}
