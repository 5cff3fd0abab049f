//! Abstract geometry handed to the host: quad meshes and open polylines.

use serde::{Deserialize, Serialize};

use crate::error::{require_indexable, Error, Result};
use crate::geometry::point::Point3d;
use crate::geometry::transform::BoundingBox;

/// A vertex list plus quad faces indexing into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Point3d>,
    pub faces: Vec<[u32; 4]>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn add_vertex(&mut self, p: Point3d) -> u32 {
        let idx = self.vertices.len() as u32;
        self.vertices.push(p);
        idx
    }

    pub fn add_quad(&mut self, i0: u32, i1: u32, i2: u32, i3: u32) {
        self.faces.push([i0, i1, i2, i3]);
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.vertices)
    }

    /// Every face index must address an existing vertex.
    pub fn validate(&self) -> Result<()> {
        let count = self.vertices.len();
        for (face_idx, face) in self.faces.iter().enumerate() {
            if let Some(&bad) = face.iter().find(|&&i| i as usize >= count) {
                return Err(Error::degenerate(format!(
                    "face {face_idx} references vertex {bad}, mesh has {count}"
                )));
            }
        }
        Ok(())
    }
}

/// An open polyline: vertex `i` connects to vertex `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub vertices: Vec<Point3d>,
    pub edges: Vec<[u32; 2]>,
}

impl Curve {
    /// Chain `points` into a polyline with sequential edges.
    pub fn from_points(points: Vec<Point3d>) -> Result<Self> {
        let count = require_indexable("curve", Some(points.len()))? as u32;
        let edges = (1..count).map(|i| [i - 1, i]).collect();
        Ok(Self {
            vertices: points,
            edges,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn first(&self) -> Option<&Point3d> {
        self.vertices.first()
    }

    pub fn last(&self) -> Option<&Point3d> {
        self.vertices.last()
    }

    /// Polyline arc length.
    pub fn length(&self) -> f64 {
        self.vertices
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .sum()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.vertices)
    }

    /// Check the open-chain invariant: `edges[i] == [i, i + 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.edges.len() + 1 != self.vertices.len() {
            return Err(Error::degenerate(format!(
                "curve has {} vertices but {} edges",
                self.vertices.len(),
                self.edges.len()
            )));
        }
        for (i, edge) in self.edges.iter().enumerate() {
            if *edge != [i as u32, i as u32 + 1] {
                return Err(Error::degenerate(format!(
                    "edge {i} is {edge:?}, expected [{i}, {}]",
                    i + 1
                )));
            }
        }
        Ok(())
    }
}
