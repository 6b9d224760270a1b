// Host-side tests for pointer picking against the orb.

use glam::Vec3;
use liquid_orb::constants::{CAMERA_Z, ORB_ACTIVE_SCALE, ORB_RADIUS};
use liquid_orb::picking::{hits_orb, ray_sphere, screen_to_world_ray};

#[test]
fn ray_sphere_intersection_basic() {
    // Ray from origin pointing in +Z direction
    let result = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0);
    let t = result.expect("ray should hit");
    assert!((t - 3.0).abs() < 1e-5);
}

#[test]
fn ray_sphere_intersection_miss() {
    // Ray goes in X, sphere is in Z
    let result = ray_sphere(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, 5.0), 2.0);
    assert!(result.is_none());
}

#[test]
fn ray_sphere_intersection_tangent() {
    let result = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(2.0, 0.0, 5.0), 2.0);
    assert_eq!(result, Some(5.0));
}

#[test]
fn ray_sphere_behind_or_inside_is_ignored() {
    // Sphere behind the origin
    assert!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), 1.0).is_none());
    // Origin at the centre: the near hit is behind the ray
    assert!(ray_sphere(Vec3::new(0.0, 0.0, 5.0), Vec3::X, Vec3::new(0.0, 0.0, 5.0), 3.0).is_none());
}

#[test]
fn centre_pixel_looks_straight_at_the_orb() {
    let (ro, rd) = screen_to_world_ray(800.0, 600.0, 400.0, 300.0, CAMERA_Z);
    assert_eq!(ro, Vec3::new(0.0, 0.0, CAMERA_Z));
    assert!((rd - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
    assert!((rd.length() - 1.0).abs() < 1e-5);
}

#[test]
fn hit_test_covers_orb_but_not_corners() {
    assert!(hits_orb(800.0, 600.0, 400.0, 300.0, CAMERA_Z, ORB_RADIUS));
    assert!(!hits_orb(800.0, 600.0, 0.0, 0.0, CAMERA_Z, ORB_RADIUS));
    assert!(!hits_orb(800.0, 600.0, 799.0, 599.0, CAMERA_Z, ORB_RADIUS));
}

#[test]
fn grown_orb_is_easier_to_hit() {
    // A pixel just outside the idle silhouette
    let (w, h) = (800.0, 600.0);
    let sx = (1..400)
        .map(|dx| 400.0 + dx as f32)
        .find(|&x| !hits_orb(w, h, x, 300.0, CAMERA_Z, ORB_RADIUS))
        .expect("edge of orb on screen");
    assert!(hits_orb(w, h, sx, 300.0, CAMERA_Z, ORB_RADIUS * ORB_ACTIVE_SCALE));
}

#[test]
fn degenerate_viewport_does_not_panic() {
    let (_, rd) = screen_to_world_ray(0.0, 0.0, 0.0, 0.0, CAMERA_Z);
    assert!(rd.is_finite());
}
