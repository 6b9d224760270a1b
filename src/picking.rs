use crate::constants::{CAMERA_FOVY, CAMERA_ZFAR, CAMERA_ZNEAR};
use glam::{Mat4, Vec3, Vec4};

/// Distance along a normalized ray to its first hit with a sphere.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

pub fn view_proj(width: f32, height: f32, camera_z: f32) -> Mat4 {
    let aspect = width / height.max(1.0);
    let proj = Mat4::perspective_rh(CAMERA_FOVY, aspect, CAMERA_ZNEAR, CAMERA_ZFAR);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, camera_z), Vec3::ZERO, Vec3::Y);
    proj * view
}

/// World-space ray through a pixel of a `width` x `height` backing store.
///
/// The camera sits at `(0, 0, camera_z)` looking at the origin. Returns
/// `(ray_origin, ray_direction)`.
pub fn screen_to_world_ray(
    width: f32,
    height: f32,
    sx: f32,
    sy: f32,
    camera_z: f32,
) -> (Vec3, Vec3) {
    let width = width.max(1.0);
    let height = height.max(1.0);
    let ndc_x = (2.0 * sx / width) - 1.0;
    let ndc_y = 1.0 - (2.0 * sy / height);
    let inv = view_proj(width, height, camera_z).inverse();
    let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let p1: Vec3 = p_far.truncate() / p_far.w;
    let ro = Vec3::new(0.0, 0.0, camera_z);
    let rd = (p1 - ro).normalize();
    (ro, rd)
}

/// Whether the pixel lands on the orb (centered at the origin).
pub fn hits_orb(width: f32, height: f32, sx: f32, sy: f32, camera_z: f32, radius: f32) -> bool {
    let (ro, rd) = screen_to_world_ray(width, height, sx, sy, camera_z);
    ray_sphere(ro, rd, Vec3::ZERO, radius).is_some()
}
