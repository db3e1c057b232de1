//! # 3D Camera
//!
//! The camera is not an ECS component. A single instance lives in the
//! [`FrameContext`](crate::context::FrameContext) and systems read or move it
//! from there.
//!
//! ## Coordinate System
//! Right-handed, Y-up. The camera looks down its local -Z axis, so with the
//! identity orientation `front()` is `(0, 0, -1)`.

use serde::{Deserialize, Serialize};

use crate::foundation::affine;
use crate::foundation::math::{constants, Mat4, Quaternion, Vec3, Vec4};

/// Perspective camera placed by a position and an orientation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Rotation from camera space to world space
    pub orientation: Quaternion,

    /// Vertical field of view in radians
    pub fov: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quaternion::IDENTITY,
            fov: 45.0 * constants::DEG_TO_RAD,
        }
    }
}

impl Camera {
    /// Camera at `position` with identity orientation and a field of view in degrees
    pub fn new(position: Vec3, fov_degrees: f32) -> Self {
        Self {
            position,
            orientation: Quaternion::IDENTITY,
            fov: fov_degrees * constants::DEG_TO_RAD,
        }
    }

    /// Builder-style orientation override
    #[must_use]
    pub fn with_orientation(mut self, orientation: Quaternion) -> Self {
        self.orientation = orientation;
        self
    }

    /// Viewing direction in world space
    pub fn front(&self) -> Vec3 {
        self.rotate_axis(Vec3::new(0.0, 0.0, -1.0))
    }

    /// Camera-right direction in world space
    pub fn right(&self) -> Vec3 {
        self.rotate_axis(Vec3::new(1.0, 0.0, 0.0))
    }

    /// Camera-up direction in world space
    pub fn up(&self) -> Vec3 {
        self.rotate_axis(Vec3::new(0.0, 1.0, 0.0))
    }

    /// World placement of the camera: translation × rotation
    pub fn transformation_matrix(&self) -> Mat4 {
        affine::translation_from(self.position) * self.orientation.to_matrix()
    }

    /// World space to camera space
    pub fn view_matrix(&self) -> Mat4 {
        self.transformation_matrix().inverse()
    }

    /// Symmetric perspective projection
    ///
    /// Maps camera space into clip space with depth in `[-1, 1]`. `aspect` is
    /// width over height; `near` and `far` are positive distances.
    pub fn perspective_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        let focal = 1.0 / (self.fov / 2.0).tan();
        let depth = far - near;

        Mat4::from_rows([
            [focal / aspect, 0.0, 0.0, 0.0],
            [0.0, focal, 0.0, 0.0],
            [0.0, 0.0, -(far + near) / depth, -(2.0 * far * near) / depth],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Projection × view, the one matrix a renderer needs per frame
    pub fn combined_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        self.perspective_matrix(aspect, near, far) * self.view_matrix()
    }

    fn rotate_axis(&self, axis: Vec3) -> Vec3 {
        let rotated: Vec4 = self.orientation.to_matrix() * axis.extend::<4, 1>([1.0]);
        rotated.truncate::<3>()
    }
}
