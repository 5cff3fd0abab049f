//! Composition of synthesized parts into antennas and antenna arrays.

pub mod antenna;
pub mod array;

pub use antenna::{compose_antenna, AntennaFactory, PlacedAntenna};
pub use array::{build_array, grid_offsets, AntennaArray, ArrayElement, ArrayRoot};

use serde::{Deserialize, Serialize};

use crate::geometry::point::Point3d;
use crate::geometry::transform::Transform;
use crate::geometry::vector::Vec3;

/// Translation plus XYZ Euler rotation (radians) relative to a parent frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub translation: Vec3,
    pub rotation: Vec3,
}

impl Placement {
    /// Pure translation to `position`.
    pub fn at(position: Point3d) -> Self {
        Self {
            translation: position.to_vec3(),
            rotation: Vec3::ZERO,
        }
    }

    pub fn offset(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Vec3::ZERO,
        }
    }

    /// Rotation first, then translation.
    pub fn to_transform(&self) -> Transform {
        Transform::from_translation_vec(self.translation)
            .then(&Transform::rotation_euler_xyz(self.rotation))
    }
}
