use std::f64::consts::PI;

use tracing::{debug, instrument};

use crate::error::{require_at_least, require_indexable, require_positive, Result};
use crate::geometry::point::Point3d;
use crate::mesh::Mesh;

/// Height of the paraboloid `z = r^2 / 4f` at radius `radius`.
pub fn paraboloid_height(radius: f64, focal_length: f64) -> f64 {
    radius * radius / (4.0 * focal_length)
}

/// Tessellate a paraboloid reflector into concentric rings of quads.
///
/// The apex sits at the origin and the dish opens towards +Z. Ring `r` of
/// `rings + 1` has radius `(r / rings) * diameter / 2` and `segments`
/// vertices; vertex `(r, s)` lives at index `r * segments + s`. Ring 0
/// collapses onto the apex, so the innermost quads are zero-area; they are
/// kept so that every ring pair has the same face layout.
#[instrument]
pub fn build_paraboloid(
    diameter: f64,
    focal_length: f64,
    rings: usize,
    segments: usize,
) -> Result<Mesh> {
    let diameter = require_positive("diameter", diameter)?;
    let focal_length = require_positive("focal_length", focal_length)?;
    let rings = require_at_least("rings", rings, 1)?;
    let segments = require_at_least("segments", segments, 3)?;

    let vertices = require_indexable(
        "reflector mesh",
        rings.checked_add(1).and_then(|r| r.checked_mul(segments)),
    )?;

    let rim_radius = diameter / 2.0;
    let mut mesh = Mesh::with_capacity(vertices, rings * segments);

    for r in 0..=rings {
        let radius = (r as f64 / rings as f64) * rim_radius;
        let z = paraboloid_height(radius, focal_length);
        for seg in 0..segments {
            let angle = 2.0 * PI * (seg as f64 / segments as f64);
            mesh.add_vertex(Point3d::from_cylindrical(radius, angle, z));
        }
    }

    let idx = |ring: usize, seg: usize| (ring * segments + seg % segments) as u32;
    for r in 0..rings {
        for seg in 0..segments {
            mesh.add_quad(
                idx(r, seg),
                idx(r, seg + 1),
                idx(r + 1, seg + 1),
                idx(r + 1, seg),
            );
        }
    }

    debug!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "tessellated paraboloid"
    );
    Ok(mesh)
}
