//! Discrete geometry synthesis: reflector tessellation planning, the
//! paraboloid mesh, and the two helix curves.

pub mod helix;
pub mod paraboloid;
pub mod segmentation;

pub use helix::{build_main_helix, build_transition_helix, helix_points, TransitionHelix};
pub use paraboloid::{build_paraboloid, paraboloid_height};
pub use segmentation::{segment_and_ring_counts, GridPlan};
