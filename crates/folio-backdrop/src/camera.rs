//! View-projection matrices for the 3D variants

use glam::{EulerRot, Mat4, Vec3};

use crate::frame::FrameState;

/// Vertical field of view in radians
pub const FOV_Y: f32 = std::f32::consts::FRAC_PI_3;
/// Camera distance from the origin at zoom 1
pub const CAMERA_DISTANCE: f32 = 60.0;
/// Cube edge length in scene units
pub const CUBE_SCALE: f32 = 18.0;

fn projection(frame: &FrameState) -> Mat4 {
    let aspect = frame.size.width.max(1) as f32 / frame.size.height.max(1) as f32;
    let eye = Vec3::new(0.0, 0.0, CAMERA_DISTANCE / frame.zoom.max(0.1));
    Mat4::perspective_rh(FOV_Y, aspect, 0.1, 500.0) * Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y)
}

fn scene_model(frame: &FrameState) -> Mat4 {
    let r = frame.motion.rotation;
    Mat4::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
}

/// Network nodes: scene rotation only
pub fn node_view_proj(frame: &FrameState) -> Mat4 {
    projection(frame) * scene_model(frame)
}

/// Network links: scene rotation plus the line group drift
pub fn line_view_proj(frame: &FrameState) -> Mat4 {
    let drift = frame.motion.drift;
    let offset = Mat4::from_translation(Vec3::new(drift.x, drift.y, 0.0));
    projection(frame) * scene_model(frame) * offset
}

/// Wireframe cube: tilt about x, then spin about y
pub fn cube_view_proj(frame: &FrameState) -> Mat4 {
    projection(frame)
        * Mat4::from_rotation_x(frame.motion.cube.x)
        * Mat4::from_rotation_y(frame.motion.cube.y)
        * Mat4::from_scale(Vec3::splat(CUBE_SCALE))
}
