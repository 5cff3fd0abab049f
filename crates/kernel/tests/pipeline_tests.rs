//! End-to-end tests: RF design in, emitted scene hierarchy out.

use moonbounce_kernel::scene::{
    SceneRecord, ARRAY_GROUP_NAME, DISH_TAG, MAIN_HELIX_TAG, TRANSITION_HELIX_TAG,
};
use moonbounce_kernel::{
    emit_array, synthesize_array, ArrayLayout, DerivedGeometry, DesignParameters, Error,
    Interpolation, Point3d, RecordingSink, SceneStyle, SynthesisLimits, Tolerance, Vec3,
};

/// Reference design with shorter helices to keep the tests fast.
fn light_params() -> DesignParameters {
    DesignParameters {
        turn_count: 4,
        vertices_per_turn: 24,
        ..DesignParameters::default()
    }
}

#[test]
fn reference_scenario_matches_hand_calculation() {
    let derived =
        DerivedGeometry::derive(&DesignParameters::with_frequency_mhz(1300.0), &SynthesisLimits::default())
            .unwrap();

    assert!((derived.wavelength - 0.23061).abs() < 1e-4);
    assert!((derived.stack_distance - 0.23061).abs() < 1e-4);
    assert!((derived.focal_length - 0.057653).abs() < 1e-4);
    assert!((derived.grid_spacing - 0.057653).abs() < 1e-4);
    assert!((derived.helix_diameter - 0.073405).abs() < 1e-4);
    assert!((derived.helix_turn_spacing - 0.0183).abs() < 1e-4);
}

#[test]
fn three_by_three_array_is_centered_and_continuous() {
    let params = light_params();
    let (derived, array) =
        synthesize_array(&params, &ArrayLayout::default(), &SynthesisLimits::default()).unwrap();

    assert_eq!(array.len(), 9);
    let d = derived.stack_distance;
    let expected = [-d, 0.0, d];
    for (k, element) in array.elements.iter().enumerate() {
        let (i, j) = (k / 3, k % 3);
        assert_eq!(element.grid_index, (i, j));
        assert!((element.position.x - expected[i]).abs() < 1e-15);
        assert!((element.position.y - expected[j]).abs() < 1e-15);
        assert_eq!(element.position.z, 0.0);

        let (radial, axial) = element.antenna.junction_gap().unwrap();
        assert!(radial < 1e-12 && axial < 1e-12);
        assert!(element.antenna.is_continuous(&Tolerance::default()));
    }
}

#[test]
fn every_element_has_identical_geometry() {
    let (_, array) =
        synthesize_array(&light_params(), &ArrayLayout::grid(2, 2), &SynthesisLimits::default())
            .unwrap();
    let first = &array.elements[0].antenna;
    for element in &array.elements[1..] {
        assert_eq!(element.antenna.dish, first.dish);
        assert_eq!(element.antenna.transition, first.transition);
        assert_eq!(element.antenna.main_helix, first.main_helix);
        assert_ne!(element.antenna.placement, first.placement);
    }
}

#[test]
fn pipeline_is_deterministic() {
    let params = light_params();
    let layout = ArrayLayout::grid(2, 1);
    let limits = SynthesisLimits::default();
    let (derived_a, array_a) = synthesize_array(&params, &layout, &limits).unwrap();
    let (derived_b, array_b) = synthesize_array(&params, &layout, &limits).unwrap();
    assert_eq!(derived_a, derived_b);
    assert_eq!(array_a, array_b);
}

#[test]
fn emitted_hierarchy_parents_helices_to_dish() {
    let params = light_params();
    let layout = ArrayLayout {
        elements_x: 1,
        elements_y: 2,
        location: Point3d::new(1.0, 2.0, 3.0),
        rotation_degrees: Vec3::new(0.0, 90.0, 90.0),
    };
    let (derived, array) = synthesize_array(&params, &layout, &SynthesisLimits::default()).unwrap();
    let style = SceneStyle::from_params(&params).unwrap();

    let mut sink = RecordingSink::new();
    let emitted = emit_array(&array, &style, &mut sink).unwrap();

    // One group plus three objects per element.
    assert_eq!(sink.records.len(), 1 + 3 * 2);
    match &sink.records[emitted.root] {
        SceneRecord::Group { name, translation, rotation_degrees, parent } => {
            assert_eq!(name, ARRAY_GROUP_NAME);
            assert_eq!(*translation, Vec3::new(1.0, 2.0, 3.0));
            assert_eq!(*rotation_degrees, Vec3::new(0.0, 90.0, 90.0));
            assert_eq!(*parent, None);
        }
        other => panic!("expected root group, got {other:?}"),
    }

    for element in &emitted.elements {
        match &sink.records[element.dish] {
            SceneRecord::Mesh { tag, vertices, style: s, placement, parent, .. } => {
                assert_eq!(tag, DISH_TAG);
                assert_eq!(*vertices, derived.grid.vertex_count());
                assert_eq!(s.wire_width, params.mesh_wire_width);
                assert_eq!(placement.rotation, Vec3::ZERO);
                assert_eq!(*parent, Some(emitted.root));
            }
            other => panic!("expected dish mesh, got {other:?}"),
        }

        let children: Vec<_> = sink.children_of(element.dish).collect();
        assert_eq!(children.len(), 2);
        for (handle, record) in children {
            let SceneRecord::Curve { tag, vertices, edges, style: s, placement, .. } = record else {
                panic!("expected curve child, got {record:?}");
            };
            assert_eq!(*edges + 1, *vertices);
            assert_eq!(s.radius, params.wire_thickness / 2.0);
            assert_eq!(s.bevel_resolution, 4);
            if handle == element.transition {
                assert_eq!(tag, TRANSITION_HELIX_TAG);
                assert_eq!(placement.translation, Vec3::new(0.0, 0.0, derived.focal_length));
            } else {
                assert_eq!(handle, element.main_helix);
                assert_eq!(tag, MAIN_HELIX_TAG);
                assert_eq!(
                    placement.translation.z,
                    derived.focal_length + derived.transition_height
                );
            }
        }
    }
}

#[test]
fn rejection_cases() {
    let limits = SynthesisLimits::default();
    for pitch in [0.0, 90.0] {
        let params = DesignParameters { pitch_angle_degrees: pitch, ..light_params() };
        assert!(matches!(
            synthesize_array(&params, &ArrayLayout::grid(1, 1), &limits),
            Err(Error::InvalidParameter { parameter: "pitch_angle_degrees", .. })
        ));
    }

    assert!(matches!(
        "cubic".parse::<Interpolation>(),
        Err(Error::InvalidParameter { .. })
    ));

    assert!(matches!(
        synthesize_array(&light_params(), &ArrayLayout::grid(0, 1), &limits),
        Err(Error::InvalidParameter { parameter: "elements_x", .. })
    ));
}

#[test]
fn partial_config_document_falls_back_to_defaults() {
    let params: DesignParameters = serde_json::from_str(
        r#"{ "frequency_hz": 2.4e9, "transition_interpolation": "ease_in", "turn_count": 10 }"#,
    )
    .unwrap();
    assert_eq!(params.frequency_mhz(), 2400.0);
    assert_eq!(params.transition_interpolation, Interpolation::EaseIn);
    assert_eq!(params.turn_count, 10);
    assert_eq!(params.pitch_angle_degrees, 14.0);
    params.validate().unwrap();

    let layout: ArrayLayout =
        serde_json::from_str(r#"{ "elements_x": 1, "elements_y": 2 }"#).unwrap();
    assert_eq!(layout.rotation_degrees, Vec3::ZERO);
}

#[test]
fn interpolation_labels_parse_the_same_from_config() {
    for (label, expected) in [
        ("linear", Interpolation::Linear),
        ("ease-in", Interpolation::EaseIn),
        ("ease_in", Interpolation::EaseIn),
        ("ease-out", Interpolation::EaseOut),
        ("ease_out", Interpolation::EaseOut),
    ] {
        let doc = format!(r#"{{ "transition_interpolation": "{label}" }}"#);
        let params: DesignParameters = serde_json::from_str(&doc).unwrap();
        assert_eq!(params.transition_interpolation, expected);
        assert_eq!(label.parse::<Interpolation>().unwrap(), expected);
    }

    let json = serde_json::to_string(&DesignParameters::default()).unwrap();
    assert!(json.contains(r#""transition_interpolation":"ease_out""#));
}

#[test]
fn unknown_interpolation_in_config_is_rejected() {
    let err = serde_json::from_str::<DesignParameters>(
        r#"{ "transition_interpolation": "cubic" }"#,
    )
    .unwrap_err();
    assert!(
        err.to_string()
            .contains("invalid parameter `transition_interpolation`"),
        "{err}"
    );
}
