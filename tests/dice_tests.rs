//! Tests for face resolution and roll configuration

use bevy::math::{EulerRot, Quat, Vec3};
use tumbledice::roller::resolver::{is_settled, resolve_face, FaceAssignment, RestThresholds};
use tumbledice::roller::types::AppSettings;

#[test]
fn test_identity_orientation_reads_two() {
    let assignment = FaceAssignment::standard();
    assert_eq!(resolve_face(Quat::IDENTITY, &assignment), 2);
}

#[test]
fn test_axis_aligned_orientations() {
    let assignment = FaceAssignment::standard();
    let cases = [
        (Quat::from_rotation_z(std::f32::consts::FRAC_PI_2), 1),
        (Quat::IDENTITY, 2),
        (Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2), 3),
        (Quat::from_rotation_x(std::f32::consts::FRAC_PI_2), 4),
        (Quat::from_rotation_x(std::f32::consts::PI), 5),
        (Quat::from_rotation_z(-std::f32::consts::FRAC_PI_2), 6),
    ];

    for (orientation, expected) in cases {
        assert_eq!(resolve_face(orientation, &assignment), expected);
    }
}

#[test]
fn test_flip_about_x_reads_bottom_label() {
    // Top face 2 flipped underneath leaves the old bottom (5) up.
    let assignment = FaceAssignment::standard();
    let flipped = Quat::from_rotation_x(std::f32::consts::PI);
    assert_eq!(resolve_face(flipped, &assignment), 5);
}

#[test]
fn test_opposite_faces_sum_to_seven() {
    let assignment = FaceAssignment::standard();
    for label in 1..=6 {
        assert_eq!(assignment.opposite(label), Some(7 - label));
    }
    assert_eq!(assignment.opposite(7), None);
}

#[test]
fn test_label_stable_near_face_up() {
    let assignment = FaceAssignment::standard();
    for (base, expected) in [
        (Quat::IDENTITY, 2),
        (Quat::from_rotation_x(std::f32::consts::PI), 5),
    ] {
        for wobble in [
            Quat::from_euler(EulerRot::XYZ, 0.1, 0.0, 0.0),
            Quat::from_euler(EulerRot::XYZ, 0.0, 0.2, -0.1),
            Quat::from_euler(EulerRot::XYZ, -0.08, 0.05, 0.09),
        ] {
            assert_eq!(resolve_face(base * wobble, &assignment), expected);
        }
    }
}

#[test]
fn test_resolver_has_no_hidden_state() {
    let assignment = FaceAssignment::standard();
    let q = Quat::from_euler(EulerRot::XYZ, 0.9, 1.7, 2.4);
    let first = resolve_face(q, &assignment);
    let second = resolve_face(q, &assignment);
    assert_eq!(first, second);
    assert!((1..=6).contains(&first));
}

#[test]
fn test_every_orientation_yields_valid_label() {
    let assignment = FaceAssignment::standard();
    for ix in 0..8 {
        for iy in 0..8 {
            for iz in 0..8 {
                let q = Quat::from_euler(
                    EulerRot::XYZ,
                    ix as f32 * 0.7853982,
                    iy as f32 * 0.7853982,
                    iz as f32 * 0.7853982,
                );
                let label = resolve_face(q, &assignment);
                assert!((1..=6).contains(&label), "bad label {} for {:?}", label, q);
            }
        }
    }
}

#[test]
fn test_is_settled_reference_cases() {
    let thresholds = RestThresholds {
        linear: 0.1,
        angular: 0.1,
    };

    assert!(is_settled(0.05, 0.05, &thresholds));
    assert!(!is_settled(0.2, 0.05, &thresholds));
    assert!(!is_settled(0.05, 0.2, &thresholds));
    assert!(is_settled(0.0, 0.0, &thresholds));
}

#[test]
fn test_is_settled_threshold_is_exclusive() {
    let thresholds = RestThresholds {
        linear: 0.1,
        angular: 0.1,
    };
    assert!(!is_settled(0.1, 0.05, &thresholds));
    assert!(!is_settled(0.05, 0.1, &thresholds));
}

#[test]
fn test_settings_feed_thresholds_into_tuning() {
    let settings = AppSettings {
        linear_threshold: 0.05,
        angular_threshold: 0.2,
        settle_hold_secs: 0.75,
        ..AppSettings::default()
    };

    let tuning = settings.to_tuning();
    assert_eq!(tuning.rest.linear, 0.05);
    assert_eq!(tuning.rest.angular, 0.2);
    assert_eq!(tuning.settle_hold_secs, 0.75);

    assert!(is_settled(0.04, 0.15, &tuning.rest));
    assert!(!is_settled(0.06, 0.15, &tuning.rest));
}

#[test]
fn test_face_normals_are_axis_aligned_and_unique() {
    let assignment = FaceAssignment::standard();
    let mut seen_labels = Vec::new();

    for (normal, label) in assignment.faces() {
        assert!((normal.length() - 1.0).abs() < 1e-6);
        let axis_aligned = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z]
            .iter()
            .any(|axis| (*normal - *axis).length() < 1e-6);
        assert!(axis_aligned, "normal {:?} not axis-aligned", normal);
        assert!(!seen_labels.contains(label));
        seen_labels.push(*label);
    }

    assert_eq!(seen_labels.len(), 6);
}
