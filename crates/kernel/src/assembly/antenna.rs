use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::Placement;
use crate::config::Tolerance;
use crate::derived::DerivedGeometry;
use crate::error::{require_positive, Error, Result};
use crate::geometry::point::Point3d;
use crate::geometry::transform::{BoundingBox, Transform};
use crate::geometry::vector::Vec3;
use crate::mesh::{Curve, Mesh};
use crate::params::DesignParameters;
use crate::synthesis::{build_main_helix, build_paraboloid, build_transition_helix, TransitionHelix};

/// One dish-helix antenna: a reflector with two helices rigidly attached.
///
/// The dish is the parent frame. Both helices are children offset along the
/// dish axis and carry no rotation of their own, so moving or rotating the
/// dish moves them identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedAntenna {
    /// Dish frame relative to the enclosing parent (the array root).
    pub placement: Placement,
    pub dish: Mesh,
    pub transition: Curve,
    /// Transition origin in the dish frame: the focal point.
    pub transition_offset: Vec3,
    pub main_helix: Curve,
    /// Main helix origin in the dish frame: the top of the transition.
    pub main_helix_offset: Vec3,
    pub focal_length: f64,
    pub transition_height: f64,
}

impl PlacedAntenna {
    pub fn dish_transform(&self) -> Transform {
        self.placement.to_transform()
    }

    /// Transition helix frame relative to the dish.
    pub fn transition_placement(&self) -> Placement {
        Placement::offset(self.transition_offset)
    }

    /// Main helix frame relative to the dish.
    pub fn main_helix_placement(&self) -> Placement {
        Placement::offset(self.main_helix_offset)
    }

    /// Radial and axial mismatch, in the dish frame, between the last
    /// transition vertex and the first main helix vertex.
    pub fn junction_gap(&self) -> Option<(f64, f64)> {
        let end = *self.transition.last()? + self.transition_offset;
        let start = *self.main_helix.first()? + self.main_helix_offset;
        Some((
            (end.radial_distance() - start.radial_distance()).abs(),
            (end.z - start.z).abs(),
        ))
    }

    /// Whether the transition ends where the main helix starts, in both
    /// radius and height.
    pub fn is_continuous(&self, tolerance: &Tolerance) -> bool {
        self.junction_gap().is_some_and(|(radial, axial)| {
            tolerance.is_zero_length(radial) && tolerance.is_zero_length(axial)
        })
    }

    /// Extent of all three parts in the dish frame.
    pub fn bounding_box(&self) -> BoundingBox {
        self.dish
            .bounding_box()
            .union(&self.transition.bounding_box().translated(self.transition_offset))
            .union(&self.main_helix.bounding_box().translated(self.main_helix_offset))
    }
}

/// Attach the helices to the dish.
///
/// The transition starts at `(0, 0, focal_length)` and the main helix at
/// `(0, 0, focal_length + transition.height)`, both in the dish frame.
/// `position` becomes the dish placement in its parent frame.
#[instrument(skip(dish, transition, main_helix), fields(position = ?position.to_array()))]
pub fn compose_antenna(
    position: Point3d,
    dish: Mesh,
    transition: TransitionHelix,
    main_helix: Curve,
    focal_length: f64,
) -> Result<PlacedAntenna> {
    let focal_length = require_positive("focal_length", focal_length)?;
    if !(transition.height.is_finite() && transition.height >= 0.0) {
        return Err(Error::invalid(
            "transition_height",
            format!("must be non-negative and finite, got {}", transition.height),
        ));
    }

    let transition_offset = Vec3::new(0.0, 0.0, focal_length);
    let main_helix_offset = Vec3::new(0.0, 0.0, focal_length + transition.height);
    debug!(
        transition_z = transition_offset.z,
        main_helix_z = main_helix_offset.z,
        "composed antenna"
    );

    Ok(PlacedAntenna {
        placement: Placement::at(position),
        dish,
        transition: transition.curve,
        transition_offset,
        main_helix,
        main_helix_offset,
        focal_length,
        transition_height: transition.height,
    })
}

/// Synthesizes complete antennas from one design.
///
/// Every antenna it builds has identical geometry; only the placement
/// differs.
#[derive(Debug, Clone)]
pub struct AntennaFactory<'a> {
    params: &'a DesignParameters,
    derived: &'a DerivedGeometry,
}

impl<'a> AntennaFactory<'a> {
    pub fn new(params: &'a DesignParameters, derived: &'a DerivedGeometry) -> Self {
        Self { params, derived }
    }

    /// Build the dish, both helices, and compose them at `position`.
    pub fn build(&self, position: Point3d) -> Result<PlacedAntenna> {
        let d = self.derived;
        let dish = build_paraboloid(d.dish_diameter(), d.focal_length, d.grid.rings, d.grid.segments)?;
        let transition = build_transition_helix(
            0.0,
            d.helix_diameter / 2.0,
            d.helix_turn_spacing,
            self.params.transition_turn_count,
            self.params.vertices_per_turn,
            self.params.transition_interpolation,
        )?;
        let main_helix = build_main_helix(
            d.helix_diameter,
            d.helix_turn_spacing,
            self.params.turn_count,
            self.params.vertices_per_turn,
        )?;
        let antenna = compose_antenna(position, dish, transition, main_helix, d.focal_length)?;
        if !antenna.is_continuous(&Tolerance::default()) {
            return Err(Error::degenerate(format!(
                "transition and main helix do not meet: gap {:?}",
                antenna.junction_gap()
            )));
        }
        Ok(antenna)
    }
}
