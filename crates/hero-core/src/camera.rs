//! Camera placement for the hero scene.
//!
//! The camera never moves after construction; only its aspect ratio follows
//! the viewport on resize.

use glam::{Mat4, Vec3};

use crate::config::CameraParams;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Oblique camera looking at the origin: `angle_y` swings around the
    /// vertical axis and `angle_x` lifts the eye proportionally to distance.
    pub fn orbit(params: &CameraParams, aspect: f32) -> Self {
        let d = params.distance;
        Self {
            eye: Vec3::new(
                params.angle_y.sin() * d,
                params.angle_x * d,
                params.angle_y.cos() * d,
            ),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: params.fov_degrees.to_radians(),
            znear: params.near,
            zfar: params.far,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
