//! Orbit camera driven by pointer drag and wheel input

use super::math::{mat4_mul, mat4_transform_point, Vec3};
use super::transform::rotation_matrix;

/// Degrees of rotation per pixel of drag
pub const ROTATION_SPEED: f32 = 0.5;
/// Distance multiplier per wheel step
pub const ZOOM_SPEED: f32 = 1.1;
/// Zoom is rejected unless the new distance lies strictly inside this range
pub const MIN_DISTANCE: f32 = 20.0;
pub const MAX_DISTANCE: f32 = 2000.0;

/// Camera orbiting a look-at target
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
}

impl Camera {
    pub fn new(position: Vec3, look_at: Vec3, up: Vec3) -> Self {
        Self { position, look_at, up }
    }

    /// Distance from the camera to its target
    #[allow(dead_code)]
    pub fn distance(&self) -> f32 {
        self.position.distance(self.look_at)
    }

    /// Rotate the camera around its target.
    ///
    /// Horizontal drag yaws around world up; vertical drag pitches around
    /// the camera's right vector. Pitch is not clamped and can pass over
    /// the pole.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        let cam_vec = self.position - self.look_at;

        let yaw = rotation_matrix(Vec3::UP, -dx * ROTATION_SPEED);

        let right = self.up.cross(cam_vec).normalize();
        let pitch = rotation_matrix(right, -dy * ROTATION_SPEED);

        let new_cam_vec = mat4_transform_point(&mat4_mul(&pitch, &yaw), cam_vec);
        self.position = self.look_at + new_cam_vec;
    }

    /// Scale the camera distance by `ZOOM_SPEED^-step`. Steps that would
    /// leave the allowed distance range are ignored.
    pub fn zoom(&mut self, step: f32) {
        let zoom_factor = ZOOM_SPEED.powf(-step);
        let new_pos = self.look_at + (self.position - self.look_at) * zoom_factor;

        let dist = new_pos.distance(self.look_at);
        if dist > MIN_DISTANCE && dist < MAX_DISTANCE {
            self.position = new_pos;
        }
    }

    pub fn set_look_at(&mut self, look_at: Vec3) {
        self.look_at = look_at;
    }
}
