use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::antenna::PlacedAntenna;
use super::Placement;
use crate::error::{require_at_least, require_positive, Error, Result};
use crate::geometry::point::Point3d;
use crate::geometry::transform::Transform;
use crate::geometry::vector::Vec3;
use crate::params::ArrayLayout;

/// Shared transform applied once to the whole array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrayRoot {
    pub location: Point3d,
    /// XYZ Euler rotation in degrees, as the host entered it.
    pub rotation_degrees: Vec3,
}

impl ArrayRoot {
    pub fn rotation_radians(&self) -> Vec3 {
        self.rotation_degrees.to_radians()
    }

    pub fn placement(&self) -> Placement {
        Placement {
            translation: self.location.to_vec3(),
            rotation: self.rotation_radians(),
        }
    }

    pub fn to_transform(&self) -> Transform {
        self.placement().to_transform()
    }
}

/// One antenna in the grid with its cell index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayElement {
    /// `(i, j)` cell along X and Y.
    pub grid_index: (usize, usize),
    /// Centered position relative to the array root.
    pub position: Point3d,
    pub antenna: PlacedAntenna,
}

/// A rectangular grid of identical antennas under one root transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntennaArray {
    pub root: ArrayRoot,
    pub element_spacing: f64,
    /// Row-major: `i` outer, `j` inner.
    pub elements: Vec<ArrayElement>,
}

impl AntennaArray {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// World transform of element `index`'s dish frame.
    pub fn element_world_transform(&self, index: usize) -> Option<Transform> {
        let element = self.elements.get(index)?;
        Some(
            self.root
                .to_transform()
                .then(&element.antenna.placement.to_transform()),
        )
    }
}

/// Centered grid positions, row-major (`i` outer, `j` inner), with `z = 0`.
pub fn grid_offsets(
    elements_x: usize,
    elements_y: usize,
    spacing: f64,
) -> Result<Vec<((usize, usize), Point3d)>> {
    let nx = require_at_least("elements_x", elements_x, 1)?;
    let ny = require_at_least("elements_y", elements_y, 1)?;
    let spacing = require_positive("element_spacing", spacing)?;

    let start_x = -((nx - 1) as f64 * spacing) / 2.0;
    let start_y = -((ny - 1) as f64 * spacing) / 2.0;

    let mut offsets = Vec::with_capacity(nx * ny);
    for i in 0..nx {
        for j in 0..ny {
            let x = start_x + i as f64 * spacing;
            let y = start_y + j as f64 * spacing;
            offsets.push(((i, j), Point3d::new(x, y, 0.0)));
        }
    }
    Ok(offsets)
}

/// Lay out `factory`-built antennas on a centered grid under one root.
///
/// `factory` receives each cell's position relative to the root and must
/// return an antenna placed there without rotation of its own; the layout
/// rotation lives only on the root.
#[instrument(skip(factory), fields(nx = layout.elements_x, ny = layout.elements_y))]
pub fn build_array<F>(layout: &ArrayLayout, element_spacing: f64, mut factory: F) -> Result<AntennaArray>
where
    F: FnMut(Point3d) -> Result<PlacedAntenna>,
{
    layout.validate()?;
    let offsets = grid_offsets(layout.elements_x, layout.elements_y, element_spacing)?;

    let root = ArrayRoot {
        location: layout.location,
        rotation_degrees: layout.rotation_degrees,
    };
    info!(
        location = ?root.location.to_array(),
        rotation_degrees = ?root.rotation_degrees.to_array(),
        "placing array root"
    );

    let mut elements = Vec::with_capacity(offsets.len());
    for (grid_index, position) in offsets {
        let antenna = factory(position)?;
        if antenna.placement != Placement::at(position) {
            return Err(Error::invalid(
                "antenna_factory",
                format!(
                    "element {grid_index:?} placed at {:?}, expected an unrotated antenna at {:?}",
                    antenna.placement,
                    position.to_array()
                ),
            ));
        }
        info!(i = grid_index.0, j = grid_index.1, x = position.x, y = position.y, "placed array element");
        elements.push(ArrayElement {
            grid_index,
            position,
            antenna,
        });
    }

    Ok(AntennaArray {
        root,
        element_spacing,
        elements,
    })
}
