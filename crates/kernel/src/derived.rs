//! Physical dimensions computed once from a design and shared by every
//! synthesis step.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::SynthesisLimits;
use crate::error::{Error, Result};
use crate::params::DesignParameters;
use crate::rf;
use crate::synthesis::segmentation::{segment_and_ring_counts, GridPlan};

/// Physical dimensions derived once from a [`DesignParameters`].
///
/// All lengths are meters. Deriving twice from equal parameters yields
/// bit-identical values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedGeometry {
    pub wavelength: f64,
    /// Element spacing; also the dish diameter.
    pub stack_distance: f64,
    pub focal_length: f64,
    pub grid_spacing: f64,
    pub grid: GridPlan,
    pub helix_diameter: f64,
    pub helix_turn_spacing: f64,
    /// Axial length of the expanding transition helix.
    pub transition_height: f64,
    /// Axial length of the main helix.
    pub main_helix_height: f64,
}

impl DerivedGeometry {
    /// Validate `params` and compute every derived dimension.
    #[instrument(skip_all, fields(frequency_mhz = params.frequency_mhz()))]
    pub fn derive(params: &DesignParameters, limits: &SynthesisLimits) -> Result<Self> {
        params.validate()?;
        let f = params.frequency_hz;

        let wavelength = rf::wavelength(f)?;
        let stack_distance = rf::stack_distance(f, params.stack_lambda_factor)?;
        let focal_length = rf::focal_length(stack_distance, params.f_to_d_ratio)?;
        let grid_spacing = rf::grid_spacing(f, params.grid_wavelength_fraction)?;
        let grid = segment_and_ring_counts(stack_distance, grid_spacing, params.grid_solidity)?;
        grid.check_limits(limits)?;
        let helix_diameter = rf::helix_diameter(f, params.helix_circumference_factor)?;
        let helix_turn_spacing = rf::helix_turn_spacing(f, params.pitch_angle_degrees)?;

        for (name, turns) in [
            ("transition helix", params.transition_turn_count),
            ("main helix", params.turn_count),
        ] {
            let vertices = turns
                .checked_mul(params.vertices_per_turn)
                .and_then(|n| n.checked_add(1));
            if !matches!(vertices, Some(v) if v <= limits.max_curve_vertices) {
                return Err(Error::degenerate(format!(
                    "{name} with {turns} turns x {} vertices per turn exceeds the {} vertex limit",
                    params.vertices_per_turn, limits.max_curve_vertices
                )));
            }
        }

        info!(wavelength, stack_distance, focal_length, grid_spacing, "derived reflector dimensions");
        info!(segments = grid.segments, rings = grid.rings, "derived reflector grid");
        info!(helix_diameter, helix_turn_spacing, "derived helix dimensions");

        Ok(Self {
            wavelength,
            stack_distance,
            focal_length,
            grid_spacing,
            grid,
            helix_diameter,
            helix_turn_spacing,
            transition_height: helix_turn_spacing * params.transition_turn_count as f64,
            main_helix_height: helix_turn_spacing * params.turn_count as f64,
        })
    }

    pub fn dish_diameter(&self) -> f64 {
        self.stack_distance
    }

    /// Dish apex to the top of the main helix.
    pub fn overall_height(&self) -> f64 {
        self.focal_length + self.transition_height + self.main_helix_height
    }
}
