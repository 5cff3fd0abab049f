//! Property-based tests for antenna geometry invariants using the `proptest` crate.

use proptest::prelude::*;

use moonbounce_kernel::assembly::grid_offsets;
use moonbounce_kernel::synthesis::{
    build_main_helix, build_paraboloid, build_transition_helix, paraboloid_height,
    segment_and_ring_counts,
};
use moonbounce_kernel::{Interpolation, Point3d, Transform, Vec3};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_interpolation() -> impl Strategy<Value = Interpolation> {
    prop_oneof![
        Just(Interpolation::Linear),
        Just(Interpolation::EaseIn),
        Just(Interpolation::EaseOut),
    ]
}

/// Physical lengths in the range of VHF to microwave antennas (meters).
fn arb_length() -> impl Strategy<Value = f64> {
    0.005f64..2.0
}

fn arb_angle() -> impl Strategy<Value = f64> {
    -std::f64::consts::PI..std::f64::consts::PI
}

const TOL: f64 = 1e-9;

// ---------------------------------------------------------------------------
// 1. Paraboloid: every vertex satisfies z = r^2 / 4f and the rim hits D/2
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn paraboloid_vertices_on_surface(
        diameter in arb_length(),
        focal in arb_length(),
        rings in 1usize..12,
        segments in 3usize..24,
    ) {
        let mesh = build_paraboloid(diameter, focal, rings, segments).unwrap();
        prop_assert_eq!(mesh.vertex_count(), (rings + 1) * segments);
        prop_assert_eq!(mesh.face_count(), rings * segments);
        prop_assert!(mesh.validate().is_ok());

        for (idx, v) in mesh.vertices.iter().enumerate() {
            let r = idx / segments;
            let expected_radius = (r as f64 / rings as f64) * (diameter / 2.0);
            prop_assert!((v.radial_distance() - expected_radius).abs() < TOL);
            prop_assert_eq!(v.z, paraboloid_height(expected_radius, focal));
        }
        let rim = mesh.vertices[rings * segments];
        prop_assert!((rim.radial_distance() - diameter / 2.0).abs() < TOL);
    }
}

// ---------------------------------------------------------------------------
// 2. Helix continuity: transition end meets the main helix start
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn transition_meets_main_helix(
        diameter in arb_length(),
        spacing in 0.001f64..0.5,
        transition_turns in 1usize..5,
        turns in 1usize..5,
        vpt in 3usize..40,
        kind in arb_interpolation(),
    ) {
        let transition =
            build_transition_helix(0.0, diameter / 2.0, spacing, transition_turns, vpt, kind).unwrap();
        let main = build_main_helix(diameter, spacing, turns, vpt).unwrap();

        let end = transition.curve.last().unwrap();
        let start = main.first().unwrap();
        prop_assert!((end.radial_distance() - diameter / 2.0).abs() < TOL);
        prop_assert!((end.z - spacing * transition_turns as f64).abs() < TOL);
        prop_assert!((start.radial_distance() - diameter / 2.0).abs() < TOL);
        prop_assert_eq!(start.z, 0.0);

        prop_assert_eq!(transition.curve.edge_count() + 1, transition.curve.vertex_count());
        prop_assert!(transition.curve.validate().is_ok());
        prop_assert!(main.validate().is_ok());
    }
}

// ---------------------------------------------------------------------------
// 3. Interpolation laws agree at the ends and order at the midpoint
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn interpolation_boundaries_and_ordering(
        start in 0.0f64..1.0,
        growth in 0.001f64..1.0,
    ) {
        let end = start + growth;
        for kind in Interpolation::ALL {
            prop_assert_eq!(kind.radius(start, end, 0.0), start);
            prop_assert!((kind.radius(start, end, 1.0) - end).abs() < TOL);
        }
        let ease_in = Interpolation::EaseIn.radius(start, end, 0.5);
        let linear = Interpolation::Linear.radius(start, end, 0.5);
        let ease_out = Interpolation::EaseOut.radius(start, end, 0.5);
        prop_assert!(ease_in <= linear && linear <= ease_out);
    }
}

// ---------------------------------------------------------------------------
// 4. Grid offsets are symmetric about the array root
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn grid_offsets_symmetric(
        nx in 1usize..8,
        ny in 1usize..8,
        spacing in arb_length(),
    ) {
        let offsets = grid_offsets(nx, ny, spacing).unwrap();
        prop_assert_eq!(offsets.len(), nx * ny);

        let sum = offsets.iter().fold(Vec3::ZERO, |acc, (_, p)| acc + p.to_vec3());
        prop_assert!(sum.length() < 1e-9 * (nx * ny) as f64);

        // Cell (i, j) mirrors cell (nx-1-i, ny-1-j).
        for ((i, j), p) in &offsets {
            let mirror = offsets[(nx - 1 - i) * ny + (ny - 1 - j)].1;
            prop_assert!((p.x + mirror.x).abs() < TOL);
            prop_assert!((p.y + mirror.y).abs() < TOL);
        }
    }
}

// ---------------------------------------------------------------------------
// 5. Segmentation never drops below the spacing-driven minimum
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn segments_respect_minimum(
        diameter in 0.1f64..2.0,
        fraction in 0.01f64..0.5,
        solidity in 1usize..8,
    ) {
        let spacing = fraction * diameter;
        let plan = segment_and_ring_counts(diameter, spacing, solidity).unwrap();
        let min_segments = (std::f64::consts::PI * diameter / spacing).floor() as usize;
        prop_assert!(plan.segments >= min_segments);
        prop_assert_eq!(plan.segments, min_segments * solidity);
        prop_assert!(plan.rings >= 1);
    }
}

// ---------------------------------------------------------------------------
// 6. Rigid composition preserves distances between child points
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn euler_rotation_preserves_distance(
        rx in arb_angle(),
        ry in arb_angle(),
        rz in arb_angle(),
        height in arb_length(),
    ) {
        let t = Transform::translation(3.0, -1.0, 2.0)
            .then(&Transform::rotation_euler_xyz(Vec3::new(rx, ry, rz)));
        let apex = t.transform_point(&Point3d::ORIGIN);
        let focus = t.transform_point(&Point3d::new(0.0, 0.0, height));
        prop_assert!((apex.distance_to(&focus) - height).abs() < TOL);
    }
}
