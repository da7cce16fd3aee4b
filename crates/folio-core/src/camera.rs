//! Camera-side state types shared with the web frontend.
//!
//! These types avoid platform-specific APIs. The timeline driver writes a
//! [`CameraState`] every frame and the renderer turns it into matrices via
//! [`Camera`].

use crate::constants::{
    CAMERA_FOV_DEG, CAMERA_ZFAR, CAMERA_ZNEAR, DEFAULT_CAMERA_LOOK_AT, DEFAULT_CAMERA_POSITION,
};
use glam::{Mat4, Vec3};

/// Live viewpoint: where the camera sits and the point it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraState {
    pub const fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: Vec3::from(DEFAULT_CAMERA_POSITION),
            look_at: Vec3::from(DEFAULT_CAMERA_LOOK_AT),
        }
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
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
    pub fn from_state(state: &CameraState, aspect: f32) -> Self {
        Self {
            eye: state.position,
            target: state.look_at,
            up: Vec3::Y,
            aspect: if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 },
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
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

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
