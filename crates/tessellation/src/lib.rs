//! Turns abstract antenna geometry into triangle buffers for rendering.
//!
//! The kernel hands out quad meshes and bare polylines. A host without its
//! own surface modifiers can use this crate to triangulate the reflector and
//! sweep a round wire along each helix.

use moonbounce_kernel::assembly::AntennaArray;
use moonbounce_kernel::mesh::{Curve, Mesh};
use moonbounce_kernel::scene::SceneStyle;
use moonbounce_kernel::{Point3d, Transform, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

#[derive(Debug, thiserror::Error)]
pub enum TessellationError {
    #[error(transparent)]
    Kernel(#[from] moonbounce_kernel::Error),

    #[error("wire needs at least 3 cross-section segments, got {0}")]
    TooFewSegments(usize),

    #[error("wire radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("curve with {0} vertices cannot be swept")]
    DegenerateCurve(usize),

    #[error("buffer would hold {0} vertices, more than u32 indices can address")]
    IndexOverflow(usize),
}

pub type Result<T> = std::result::Result<T, TessellationError>;

/// A triangle mesh for rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Vertex positions [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Vertex normals [nx, ny, nz, ...]
    pub normals: Vec<f32>,
    /// Triangle indices [i0, i1, i2, ...]
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn add_vertex(&mut self, pos: Point3d, normal: Vec3) -> u32 {
        let idx = self.vertex_count() as u32;
        self.positions.push(pos.x as f32);
        self.positions.push(pos.y as f32);
        self.positions.push(pos.z as f32);
        self.normals.push(normal.x as f32);
        self.normals.push(normal.y as f32);
        self.normals.push(normal.z as f32);
        idx
    }

    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    pub fn position(&self, index: usize) -> Option<[f32; 3]> {
        let p = self.positions.get(3 * index..3 * index + 3)?;
        Some([p[0], p[1], p[2]])
    }

    pub fn normal(&self, index: usize) -> Option<[f32; 3]> {
        let n = self.normals.get(3 * index..3 * index + 3)?;
        Some([n[0], n[1], n[2]])
    }

    pub fn merge(&mut self, other: &TriangleMesh) -> Result<()> {
        let offset = self.vertex_count();
        ensure_addressable(offset + other.vertex_count())?;
        let offset = offset as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        for &idx in &other.indices {
            self.indices.push(idx + offset);
        }
        Ok(())
    }
}

fn ensure_addressable(vertices: usize) -> Result<()> {
    if vertices > u32::MAX as usize {
        return Err(TessellationError::IndexOverflow(vertices));
    }
    Ok(())
}

/// Triangulate a reflector quad mesh into world space.
///
/// Each quad `[a, b, c, d]` becomes `(a, c, b)` and `(a, d, c)`, wound so the
/// normals face the focus of a ring-major paraboloid. Zero-area triangles,
/// which the collapsed apex ring produces, are left out of the buffer.
/// Vertex normals are area-weighted averages of the surviving faces.
pub fn tessellate_dish(mesh: &Mesh, transform: &Transform) -> Result<TriangleMesh> {
    mesh.validate()?;
    ensure_addressable(mesh.vertex_count())?;

    let v = &mesh.vertices;
    let mut triangles = Vec::with_capacity(mesh.face_count() * 2);
    let mut accumulated = vec![Vec3::ZERO; v.len()];
    let mut skipped = 0usize;

    for &[a, b, c, d] in &mesh.faces {
        for tri in [[a, c, b], [a, d, c]] {
            let [i0, i1, i2] = tri.map(|i| i as usize);
            let area_normal = (v[i1] - v[i0]).cross(&(v[i2] - v[i0]));
            if area_normal.length() == 0.0 {
                skipped += 1;
                continue;
            }
            for i in [i0, i1, i2] {
                accumulated[i] = accumulated[i] + area_normal;
            }
            triangles.push(tri);
        }
    }

    let mut out = TriangleMesh::new();
    for (p, n) in v.iter().zip(&accumulated) {
        let normal = transform
            .transform_vector(&n.normalized().unwrap_or(Vec3::Z))
            .normalized()
            .unwrap_or(Vec3::Z);
        out.add_vertex(transform.transform_point(p), normal);
    }
    for [i0, i1, i2] in triangles {
        out.add_triangle(i0, i1, i2);
    }

    debug!(
        triangles = out.triangle_count(),
        skipped, "triangulated reflector"
    );
    Ok(out)
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    tangent: Vec3,
    normal: Vec3,
    binormal: Vec3,
}

/// Rotation-minimizing frames along `path` by double reflection.
///
/// Repeated points reuse the previous frame. Fails when every point of the
/// path coincides.
fn compute_frames(path: &[Point3d]) -> Result<Vec<Frame>> {
    let n = path.len();
    let direction = |i: usize| (path[i + 1] - path[i]).normalized();

    let t0 = (0..n - 1)
        .find_map(direction)
        .ok_or(TessellationError::DegenerateCurve(n))?;

    // Start from whichever axis is least aligned with the tangent.
    let seed = if t0.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    let n0 = (seed - t0 * seed.dot(&t0))
        .normalized()
        .ok_or(TessellationError::DegenerateCurve(n))?;

    let mut frames = Vec::with_capacity(n);
    frames.push(Frame {
        tangent: t0,
        normal: n0,
        binormal: t0.cross(&n0),
    });

    for i in 1..n {
        let prev = frames[i - 1];

        let incoming = direction(i - 1);
        let outgoing = if i < n - 1 { direction(i) } else { None };
        let ti = match (incoming, outgoing) {
            (Some(a), Some(b)) => (a + b).normalized().unwrap_or(a),
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => prev.tangent,
        };

        let v1 = path[i] - path[i - 1];
        let c1 = v1.dot(&v1);
        if c1 < 1e-30 {
            frames.push(Frame { tangent: ti, ..prev });
            continue;
        }

        let r_l = prev.normal - v1 * (2.0 * v1.dot(&prev.normal) / c1);
        let t_l = prev.tangent - v1 * (2.0 * v1.dot(&prev.tangent) / c1);

        let v2 = ti - t_l;
        let c2 = v2.dot(&v2);
        let ni = if c2 < 1e-30 {
            r_l
        } else {
            r_l - v2 * (2.0 * v2.dot(&r_l) / c2)
        };

        frames.push(Frame {
            tangent: ti,
            normal: ni,
            binormal: ti.cross(&ni),
        });
    }

    Ok(frames)
}

/// Sweep a round tube of `radius` along `curve`, in world space.
///
/// Every curve vertex gets a ring of `segments` vertices; the tube ends are
/// left open. Triangles are wound so their normals face outwards.
pub fn sweep_wire(
    curve: &Curve,
    radius: f64,
    segments: usize,
    transform: &Transform,
) -> Result<TriangleMesh> {
    if segments < 3 {
        return Err(TessellationError::TooFewSegments(segments));
    }
    if !(radius.is_finite() && radius > 0.0) {
        return Err(TessellationError::InvalidRadius(radius));
    }
    curve.validate()?;
    if curve.vertex_count() < 2 {
        return Err(TessellationError::DegenerateCurve(curve.vertex_count()));
    }
    let total = curve
        .vertex_count()
        .checked_mul(segments)
        .ok_or(TessellationError::IndexOverflow(usize::MAX))?;
    ensure_addressable(total)?;

    let path: Vec<Point3d> = curve
        .vertices
        .iter()
        .map(|p| transform.transform_point(p))
        .collect();
    let frames = compute_frames(&path)?;

    let mut out = TriangleMesh::new();
    for (center, frame) in path.iter().zip(&frames) {
        for k in 0..segments {
            let angle = std::f64::consts::TAU * k as f64 / segments as f64;
            let radial = frame.normal * angle.cos() + frame.binormal * angle.sin();
            out.add_vertex(*center + radial * radius, radial);
        }
    }

    let seg = segments as u32;
    for ring in 0..(path.len() as u32 - 1) {
        for k in 0..seg {
            let a = ring * seg + k;
            let b = ring * seg + (k + 1) % seg;
            let c = (ring + 1) * seg + (k + 1) % seg;
            let d = (ring + 1) * seg + k;
            out.add_triangle(a, b, c);
            out.add_triangle(a, c, d);
        }
    }

    debug!(
        rings = path.len(),
        segments,
        triangles = out.triangle_count(),
        "swept wire"
    );
    Ok(out)
}

/// Cross-section segment count for a wire style's bevel resolution.
pub fn cross_section_segments(bevel_resolution: usize) -> usize {
    bevel_resolution.max(3)
}

/// Triangulate every dish and sweep both helices of every element into one
/// world-space buffer.
#[instrument(skip_all, fields(elements = array.len()))]
pub fn tessellate_array(array: &AntennaArray, style: &SceneStyle) -> Result<TriangleMesh> {
    let segments = cross_section_segments(style.helix.bevel_resolution);
    let mut out = TriangleMesh::new();

    for index in 0..array.len() {
        let antenna = &array.elements[index].antenna;
        let Some(dish_world) = array.element_world_transform(index) else {
            continue;
        };
        let transition_world = dish_world.then(&antenna.transition_placement().to_transform());
        let main_world = dish_world.then(&antenna.main_helix_placement().to_transform());

        out.merge(&tessellate_dish(&antenna.dish, &dish_world)?)?;
        out.merge(&sweep_wire(
            &antenna.transition,
            style.helix.radius,
            segments,
            &transition_world,
        )?)?;
        out.merge(&sweep_wire(
            &antenna.main_helix,
            style.helix.radius,
            segments,
            &main_world,
        )?)?;
    }

    info!(
        vertices = out.vertex_count(),
        triangles = out.triangle_count(),
        "tessellated array"
    );
    Ok(out)
}
