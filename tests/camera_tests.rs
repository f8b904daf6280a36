//! Fly Camera Tests
//!
//! Tests for:
//! - Pitch clamping under arbitrary rotation sequences
//! - Zero-input translation
//! - Field-of-view clamping
//! - View/inverse-view matrix caching (dirty-flag correctness)
//! - Camera-space to world-space direction transform
//! - Axis movement

use glam::{Mat4, Vec3};
use glint::camera::{FlyCamera, MAX_FOV_DEG, MIN_FOV_DEG, PITCH_MARGIN};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn approx_vec3(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

fn test_camera() -> FlyCamera {
    FlyCamera::new(Vec3::new(0.0, 0.0, 3.0), 45f32.to_radians(), 4.0 / 3.0, 0.1, 100.0)
}

// ============================================================================
// Pitch Clamp Tests
// ============================================================================

#[test]
fn pitch_stays_clamped_under_large_positive_input() {
    let mut cam = test_camera();
    let limit = std::f32::consts::FRAC_PI_2 - PITCH_MARGIN;

    for _ in 0..100 {
        cam.rotate_tait_bryan(0.0, 0.5);
    }

    assert!(
        cam.pitch() <= limit + EPSILON,
        "Pitch {} exceeds the upper limit {limit}",
        cam.pitch()
    );
    assert!(cam.pitch() < std::f32::consts::FRAC_PI_2);
}

#[test]
fn pitch_stays_clamped_under_large_negative_input() {
    let mut cam = test_camera();
    let limit = std::f32::consts::FRAC_PI_2 - PITCH_MARGIN;

    for _ in 0..100 {
        cam.rotate_tait_bryan(0.0, -0.5);
    }

    assert!(
        cam.pitch() >= -limit - EPSILON,
        "Pitch {} exceeds the lower limit {}",
        cam.pitch(),
        -limit
    );
}

#[test]
fn pitch_clamp_is_idempotent_at_the_limit() {
    let mut cam = test_camera();
    let limit = std::f32::consts::FRAC_PI_2 - PITCH_MARGIN;

    cam.rotate_tait_bryan(0.0, 100.0);
    let pinned = cam.pitch();
    assert!(approx(pinned, limit), "Expected pitch pinned at {limit}, got {pinned}");

    // Further positive input must not move it.
    cam.rotate_tait_bryan(0.0, 1.0);
    assert!(approx(cam.pitch(), pinned));

    // Negative input moves it back down (monotonic within range).
    cam.rotate_tait_bryan(0.0, -0.2);
    assert!(cam.pitch() < pinned);
    assert!(approx(cam.pitch(), limit - 0.2));
}

#[test]
fn alternating_rotation_keeps_pitch_in_range() {
    let mut cam = test_camera();
    let limit = std::f32::consts::FRAC_PI_2 - PITCH_MARGIN;

    for i in 0..1000 {
        let delta = if i % 3 == 0 { 0.7 } else { -0.3 };
        cam.rotate_tait_bryan(0.1, delta);
        assert!(
            cam.pitch().abs() <= limit + EPSILON,
            "Pitch {} left the clamp range on iteration {i}",
            cam.pitch()
        );
    }
}

#[test]
fn forward_stays_normalized_after_rotation() {
    let mut cam = test_camera();
    cam.rotate_tait_bryan(1.3, -0.7);
    assert!(approx(cam.forward().length(), 1.0));
}

// ============================================================================
// Translation Tests
// ============================================================================

#[test]
fn zero_axes_leave_position_unchanged() {
    let mut cam = test_camera();
    let start = cam.position();

    for dt in [0.0, 0.016, 1.0, 1000.0] {
        cam.move_axes(0.0, 0.0, 3.0, dt);
        assert_eq!(
            cam.position(),
            start,
            "Position moved with zero input axes (dt = {dt})"
        );
    }
}

#[test]
fn forward_axis_moves_along_view_direction() {
    let mut cam = test_camera();
    let start = cam.position();

    // Camera-space forward is -Z; a fresh camera looks down world -Z.
    cam.move_axes(-1.0, 0.0, 2.0, 0.5);

    assert!(approx_vec3(cam.position(), start + Vec3::new(0.0, 0.0, -1.0)));
}

#[test]
fn combined_axes_are_normalized() {
    let mut cam = test_camera();
    let start = cam.position();

    cam.move_axes(-1.0, 1.0, 1.0, 1.0);

    // Diagonal input still travels one unit, not sqrt(2).
    let travelled = (cam.position() - start).length();
    assert!(
        approx(travelled, 1.0),
        "Diagonal movement travelled {travelled}, expected 1.0"
    );
}

// ============================================================================
// Field-of-View Clamp Tests
// ============================================================================

#[test]
fn fov_clamps_at_both_bounds() {
    let mut cam = test_camera();

    for _ in 0..200 {
        cam.zoom(1.0);
    }
    assert!(approx(cam.fov().to_degrees(), MIN_FOV_DEG));

    for _ in 0..200 {
        cam.zoom(-1.0);
    }
    assert!(approx(cam.fov().to_degrees(), MAX_FOV_DEG));
}

#[test]
fn fov_stays_in_range_under_mixed_scrolling() {
    let mut cam = test_camera();

    for i in 0..500 {
        let delta = if i % 2 == 0 { 3.7 } else { -2.9 };
        cam.zoom(delta);
        let deg = cam.fov().to_degrees();
        assert!(
            (MIN_FOV_DEG - EPSILON..=MAX_FOV_DEG + EPSILON).contains(&deg),
            "FOV {deg} left [{MIN_FOV_DEG}, {MAX_FOV_DEG}] on iteration {i}"
        );
    }
}

// ============================================================================
// Matrix Caching Tests
// ============================================================================

#[test]
fn cached_view_matrix_is_bit_identical() {
    let mut cam = test_camera();
    cam.rotate_tait_bryan(0.4, 0.2);

    let first = cam.view_matrix().to_cols_array();
    let second = cam.view_matrix().to_cols_array();
    let third = cam.view_matrix().to_cols_array();

    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[test]
fn view_matrix_changes_after_mutation() {
    let mut cam = test_camera();
    let before = cam.view_matrix();

    cam.translate(Vec3::new(1.0, 0.0, 0.0));
    let after = cam.view_matrix();

    assert_ne!(before.to_cols_array(), after.to_cols_array());
}

#[test]
fn projection_cache_invalidates_on_fov_change() {
    let mut cam = test_camera();
    let before = cam.projection_matrix();

    cam.zoom(10.0);
    let after = cam.projection_matrix();

    assert_ne!(before.to_cols_array(), after.to_cols_array());
}

#[test]
fn view_times_inverse_view_is_identity() {
    let mut cam = test_camera();
    cam.rotate_tait_bryan(0.9, -0.3);
    cam.translate(Vec3::new(2.0, -1.0, 5.0));

    let product = cam.view_matrix() * cam.inverse_view_matrix();
    let identity = Mat4::IDENTITY;

    for (a, b) in product
        .to_cols_array()
        .iter()
        .zip(identity.to_cols_array().iter())
    {
        assert!(approx(*a, *b), "view * inverse_view deviates from identity");
    }
}

// ============================================================================
// Direction Transform Tests
// ============================================================================

#[test]
fn transform_direction_maps_camera_forward_to_world_forward() {
    let mut cam = test_camera();

    // A fresh camera looks down world -Z, so camera-space -Z maps to -Z.
    let world = cam.transform_direction(Vec3::new(0.0, 0.0, -1.0));
    assert!(approx_vec3(world, Vec3::new(0.0, 0.0, -1.0)));

    // And the position must not leak into a direction transform.
    assert!(approx(world.length(), 1.0));
}

#[test]
fn transform_direction_follows_rotation() {
    let mut cam = test_camera();
    // Quarter turn to the left: camera forward becomes world -X.
    cam.rotate_tait_bryan(-std::f32::consts::FRAC_PI_2, 0.0);

    let world = cam.transform_direction(Vec3::new(0.0, 0.0, -1.0));
    assert!(approx_vec3(world, Vec3::new(-1.0, 0.0, 0.0)));
}

#[test]
fn look_at_synchronizes_yaw_and_pitch() {
    let mut cam = test_camera();
    cam.look_at(Vec3::new(5.0, 1.0, -2.0));
    let before = cam.forward();

    // A zero rotation recomputes forward from yaw/pitch; if look_at left
    // them stale the direction would jump.
    cam.rotate_tait_bryan(0.0, 0.0);
    assert!(approx_vec3(before, cam.forward()));
}
