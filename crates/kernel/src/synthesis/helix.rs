use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{require_at_least, require_indexable, require_positive, Error, Result};
use crate::geometry::point::Point3d;
use crate::mesh::Curve;
use crate::params::Interpolation;

/// Sample a helix around +Z starting at the origin plane.
///
/// There are `angular_turns * vertices_per_turn + 1` samples, both endpoints
/// included. Sample `i` sits at curve parameter `t = i / (turns * vpt)`, angle
/// `t * 2pi * turns`, height `t * turn_spacing * turns`, and radius
/// `radius_fn(t)`.
pub fn helix_points<F>(
    radius_fn: F,
    turn_spacing: f64,
    angular_turns: usize,
    vertices_per_turn: usize,
) -> Result<Vec<Point3d>>
where
    F: Fn(f64) -> f64,
{
    let turn_spacing = require_positive("turn_spacing", turn_spacing)?;
    let angular_turns = require_at_least("angular_turns", angular_turns, 1)?;
    let vertices_per_turn = require_at_least("vertices_per_turn", vertices_per_turn, 3)?;

    let samples = require_indexable(
        "helix",
        angular_turns
            .checked_mul(vertices_per_turn)
            .and_then(|n| n.checked_add(1)),
    )?;
    let intervals = samples - 1;
    let total_height = turn_spacing * angular_turns as f64;
    let sweep = 2.0 * PI * angular_turns as f64;

    let points = (0..=intervals)
        .map(|i| {
            let t = i as f64 / intervals as f64;
            Point3d::from_cylindrical(radius_fn(t), t * sweep, t * total_height)
        })
        .collect();
    Ok(points)
}

/// The expanding helix that leads from the dish focus to the main helix,
/// together with the axial height it spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionHelix {
    pub curve: Curve,
    /// `turn_spacing * angular_turns`; the main helix starts this far above
    /// the transition's origin.
    pub height: f64,
}

/// Build the expanding transition helix.
///
/// Its radius grows from `start_radius` to `end_radius` following
/// `interpolation`; the last vertex lands exactly on `end_radius` at
/// `height`.
#[instrument]
pub fn build_transition_helix(
    start_radius: f64,
    end_radius: f64,
    turn_spacing: f64,
    angular_turns: usize,
    vertices_per_turn: usize,
    interpolation: Interpolation,
) -> Result<TransitionHelix> {
    if !(start_radius.is_finite() && start_radius >= 0.0) {
        return Err(Error::invalid(
            "start_radius",
            format!("must be non-negative and finite, got {start_radius}"),
        ));
    }
    let end_radius = require_positive("end_radius", end_radius)?;

    let points = helix_points(
        |t| interpolation.radius(start_radius, end_radius, t),
        turn_spacing,
        angular_turns,
        vertices_per_turn,
    )?;
    let curve = Curve::from_points(points)?;
    let height = turn_spacing * angular_turns as f64;

    debug!(
        vertices = curve.vertex_count(),
        height,
        %interpolation,
        "built transition helix"
    );
    Ok(TransitionHelix { curve, height })
}

/// Build the constant-radius main helix starting at the origin plane.
#[instrument]
pub fn build_main_helix(
    diameter: f64,
    turn_spacing: f64,
    turn_count: usize,
    vertices_per_turn: usize,
) -> Result<Curve> {
    let radius = require_positive("helix_diameter", diameter)? / 2.0;
    let points = helix_points(|_| radius, turn_spacing, turn_count, vertices_per_turn)?;
    let curve = Curve::from_points(points)?;
    debug!(vertices = curve.vertex_count(), "built main helix");
    Ok(curve)
}
