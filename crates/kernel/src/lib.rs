//! Geometry synthesis for dish-helix hybrid antenna arrays.
//!
//! The pipeline runs leaf-first: [`rf`] turns the RF design into lengths,
//! [`DerivedGeometry`] caches them, [`synthesis`] builds the paraboloid mesh
//! and helix curves, and [`assembly`] composes antennas and lays them out on
//! a grid. The host scene is reached only through [`scene::SceneSink`].

pub mod assembly;
pub mod config;
pub mod derived;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod params;
pub mod rf;
pub mod scene;
pub mod synthesis;

use tracing::{info, instrument};

pub use assembly::{
    build_array, compose_antenna, AntennaArray, AntennaFactory, ArrayElement, ArrayRoot,
    PlacedAntenna, Placement,
};
pub use config::{SynthesisLimits, Tolerance};
pub use derived::DerivedGeometry;
pub use error::{Error, Result};
pub use geometry::point::Point3d;
pub use geometry::transform::{BoundingBox, Transform};
pub use geometry::vector::Vec3;
pub use mesh::{Curve, Mesh};
pub use params::{ArrayLayout, DesignParameters, Interpolation};
pub use scene::{emit_array, RecordingSink, SceneSink, SceneStyle};

/// Run the whole pipeline: derive dimensions, then build every antenna of
/// `layout` spaced one stack distance apart.
#[instrument(skip_all)]
pub fn synthesize_array(
    params: &DesignParameters,
    layout: &ArrayLayout,
    limits: &SynthesisLimits,
) -> Result<(DerivedGeometry, AntennaArray)> {
    let derived = DerivedGeometry::derive(params, limits)?;
    let factory = AntennaFactory::new(params, &derived);
    let array = build_array(layout, derived.stack_distance, |position| {
        factory.build(position)
    })?;
    info!(elements = array.len(), "antenna array synthesized");
    Ok((derived, array))
}
