use glam::{EulerRot, Mat4};

use crate::config::AnimationParams;

/// Longest frame step applied to the rotation, so a tab returning from the
/// background does not jump.
pub const MAX_FRAME_DT_SEC: f32 = 0.25;

/// Mesh orientation in radians, applied as Euler XYZ.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshRotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl MeshRotation {
    /// Step the rotation by `dt_sec`. Each axis has its own slowly drifting
    /// direction and speed driven by `elapsed_ms`.
    pub fn advance(&mut self, params: &AnimationParams, elapsed_ms: f64, dt_sec: f32) {
        if !params.auto_rotate || dt_sec <= 0.0 {
            return;
        }
        let t = elapsed_ms * params.direction_change_speed;
        let speed = params.rotation_speed;
        let variation = params.rotation_variation;

        let y_dir = (t * 0.7).sin() as f32;
        let y_speed = speed + (t * 1.3).sin() as f32 * variation;
        self.y += y_dir * y_speed * dt_sec;

        let x_dir = (t * 0.5).cos() as f32;
        let x_speed = speed * 0.3 + (t * 0.9).cos() as f32 * variation * 0.3;
        self.x += x_dir * x_speed * dt_sec;

        let z_dir = (t * 0.3).sin() as f32;
        self.z += z_dir * speed * 0.15 * dt_sec;
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.x, self.y, self.z)
    }
}

/// Seconds between two frame timestamps, clamped to `[0, MAX_FRAME_DT_SEC]`.
pub fn frame_delta_sec(last_ms: Option<f64>, now_ms: f64) -> f32 {
    match last_ms {
        Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT_SEC),
        None => 0.0,
    }
}
