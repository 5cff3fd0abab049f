//! The boundary with the host scene: a narrow sink the array is emitted into.
//!
//! Geometry synthesis never touches the host. Callers build an
//! [`AntennaArray`] and then hand it to [`emit_array`] with whatever
//! [`SceneSink`] the host provides.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::assembly::{AntennaArray, Placement};
use crate::error::{require_at_least, require_positive, Result};
use crate::geometry::vector::Vec3;
use crate::mesh::{Curve, Mesh};
use crate::params::DesignParameters;

pub const ARRAY_GROUP_NAME: &str = "AntennaArray";
pub const DISH_TAG: &str = "dish";
pub const TRANSITION_HELIX_TAG: &str = "transition-helix";
pub const MAIN_HELIX_TAG: &str = "main-helix";

/// Cross-section segments of a beveled helix wire.
pub const DEFAULT_BEVEL_RESOLUTION: usize = 4;

/// Presentation hints for the reflector mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceStyle {
    /// Width the host should thicken mesh edges to.
    pub wire_width: f64,
}

/// Presentation hints for a helix wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireStyle {
    /// Round wire radius (half the wire thickness).
    pub radius: f64,
    /// Segments around the wire cross-section.
    pub bevel_resolution: usize,
}

/// Styles for every part of an antenna.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneStyle {
    pub dish: SurfaceStyle,
    pub helix: WireStyle,
}

impl SceneStyle {
    pub fn from_params(params: &DesignParameters) -> Result<Self> {
        Ok(Self {
            dish: SurfaceStyle {
                wire_width: require_positive("mesh_wire_width", params.mesh_wire_width)?,
            },
            helix: WireStyle {
                radius: require_positive("wire_thickness", params.wire_thickness)? / 2.0,
                bevel_resolution: DEFAULT_BEVEL_RESOLUTION,
            },
        })
    }

    pub fn with_bevel_resolution(mut self, resolution: usize) -> Result<Self> {
        self.helix.bevel_resolution = require_at_least("bevel_resolution", resolution, 1)?;
        Ok(self)
    }
}

/// Host-side object creation.
///
/// Implementations turn abstract geometry into scene objects and parent
/// links. Placements are relative to `parent` (or to the world for `None`).
pub trait SceneSink {
    type Handle: Clone;

    /// An empty transform node. Rotation is in degrees.
    fn create_group(
        &mut self,
        name: &str,
        translation: Vec3,
        rotation_degrees: Vec3,
        parent: Option<&Self::Handle>,
    ) -> Result<Self::Handle>;

    fn create_mesh(
        &mut self,
        tag: &str,
        mesh: &Mesh,
        style: &SurfaceStyle,
        placement: &Placement,
        parent: Option<&Self::Handle>,
    ) -> Result<Self::Handle>;

    fn create_curve(
        &mut self,
        tag: &str,
        curve: &Curve,
        style: &WireStyle,
        placement: &Placement,
        parent: Option<&Self::Handle>,
    ) -> Result<Self::Handle>;
}

/// Handles produced while emitting one array element.
#[derive(Debug, Clone)]
pub struct EmittedElement<H> {
    pub grid_index: (usize, usize),
    pub dish: H,
    pub transition: H,
    pub main_helix: H,
}

/// Handles produced while emitting an array.
#[derive(Debug, Clone)]
pub struct EmittedArray<H> {
    pub root: H,
    pub elements: Vec<EmittedElement<H>>,
}

/// Emit `array` into `sink`: the root group, then for every element a dish
/// parented to the root and both helices parented to the dish.
#[instrument(skip_all, fields(elements = array.len()))]
pub fn emit_array<S: SceneSink>(
    array: &AntennaArray,
    style: &SceneStyle,
    sink: &mut S,
) -> Result<EmittedArray<S::Handle>> {
    let root = sink.create_group(
        ARRAY_GROUP_NAME,
        array.root.location.to_vec3(),
        array.root.rotation_degrees,
        None,
    )?;

    let mut elements = Vec::with_capacity(array.len());
    for element in &array.elements {
        let antenna = &element.antenna;
        let dish = sink.create_mesh(
            DISH_TAG,
            &antenna.dish,
            &style.dish,
            &antenna.placement,
            Some(&root),
        )?;
        let transition = sink.create_curve(
            TRANSITION_HELIX_TAG,
            &antenna.transition,
            &style.helix,
            &antenna.transition_placement(),
            Some(&dish),
        )?;
        let main_helix = sink.create_curve(
            MAIN_HELIX_TAG,
            &antenna.main_helix,
            &style.helix,
            &antenna.main_helix_placement(),
            Some(&dish),
        )?;
        debug!(grid_index = ?element.grid_index, "emitted array element");
        elements.push(EmittedElement {
            grid_index: element.grid_index,
            dish,
            transition,
            main_helix,
        });
    }

    Ok(EmittedArray { root, elements })
}

/// What a [`RecordingSink`] saw for one created object.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneRecord {
    Group {
        name: String,
        translation: Vec3,
        rotation_degrees: Vec3,
        parent: Option<usize>,
    },
    Mesh {
        tag: String,
        vertices: usize,
        faces: usize,
        style: SurfaceStyle,
        placement: Placement,
        parent: Option<usize>,
    },
    Curve {
        tag: String,
        vertices: usize,
        edges: usize,
        style: WireStyle,
        placement: Placement,
        parent: Option<usize>,
    },
}

impl SceneRecord {
    pub fn parent(&self) -> Option<usize> {
        match self {
            Self::Group { parent, .. } | Self::Mesh { parent, .. } | Self::Curve { parent, .. } => {
                *parent
            }
        }
    }
}

/// Deterministic in-memory sink; handles are indices into `records`.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub records: Vec<SceneRecord>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, record: SceneRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    /// Records whose parent is `handle`.
    pub fn children_of(&self, handle: usize) -> impl Iterator<Item = (usize, &SceneRecord)> {
        self.records
            .iter()
            .enumerate()
            .filter(move |(_, r)| r.parent() == Some(handle))
    }
}

impl SceneSink for RecordingSink {
    type Handle = usize;

    fn create_group(
        &mut self,
        name: &str,
        translation: Vec3,
        rotation_degrees: Vec3,
        parent: Option<&usize>,
    ) -> Result<usize> {
        Ok(self.push(SceneRecord::Group {
            name: name.to_string(),
            translation,
            rotation_degrees,
            parent: parent.copied(),
        }))
    }

    fn create_mesh(
        &mut self,
        tag: &str,
        mesh: &Mesh,
        style: &SurfaceStyle,
        placement: &Placement,
        parent: Option<&usize>,
    ) -> Result<usize> {
        Ok(self.push(SceneRecord::Mesh {
            tag: tag.to_string(),
            vertices: mesh.vertex_count(),
            faces: mesh.face_count(),
            style: *style,
            placement: *placement,
            parent: parent.copied(),
        }))
    }

    fn create_curve(
        &mut self,
        tag: &str,
        curve: &Curve,
        style: &WireStyle,
        placement: &Placement,
        parent: Option<&usize>,
    ) -> Result<usize> {
        Ok(self.push(SceneRecord::Curve {
            tag: tag.to_string(),
            vertices: curve.vertex_count(),
            edges: curve.edge_count(),
            style: *style,
            placement: *placement,
            parent: parent.copied(),
        }))
    }
}
