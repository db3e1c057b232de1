//! Transform component
//!
//! Pure data: position, orientation and scale of an entity in world space.
//! Systems mutate the fields directly and compose them into a matrix when
//! they need one.

use serde::{Deserialize, Serialize};

use crate::ecs::Component;
use crate::foundation::affine;
use crate::foundation::math::{Mat4, Quaternion, Vec3};

/// World-space placement of an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// World space position
    pub position: Vec3,

    /// World space rotation
    pub orientation: Quaternion,

    /// Per-axis scale factors
    pub scale: Vec3,
}

impl Component for Transform {}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quaternion::IDENTITY,
            scale: Vec3::splat(1.0),
        }
    }
}

impl Transform {
    /// Identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Identity transform moved to `position`
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Model matrix: translation × rotation × scale
    ///
    /// Applied to a point this scales first, then rotates, then translates.
    pub fn to_matrix(&self) -> Mat4 {
        affine::translation_from(self.position)
            * self.orientation.to_matrix()
            * affine::scale_from(self.scale)
    }

    /// Direction the local -Z axis points to in world space
    pub fn forward(&self) -> Vec3 {
        self.orientation.rotate(Vec3::new(0.0, 0.0, -1.0))
    }

    /// Builder pattern: set position
    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: set orientation
    #[must_use]
    pub fn with_orientation(mut self, orientation: Quaternion) -> Self {
        self.orientation = orientation;
        self
    }

    /// Builder pattern: set orientation from Euler angles in radians
    #[must_use]
    pub fn with_euler(mut self, x: f32, y: f32, z: f32) -> Self {
        self.orientation = Quaternion::from_euler(x, y, z);
        self
    }

    /// Builder pattern: set the same scale on every axis
    #[must_use]
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Builder pattern: set per-axis scale
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Move by `offset`
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Apply `rotation` on top of the current orientation
    pub fn rotate(&mut self, rotation: Quaternion) {
        self.orientation = (rotation * self.orientation).normalized();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{constants, Vec4};
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_identity() {
        assert_relative_eq!(Transform::default().to_matrix(), Mat4::identity());
    }

    #[test]
    fn test_matrix_scales_then_rotates_then_translates() {
        let transform = Transform::from_position(Vec3::new(10.0, 0.0, 0.0))
            .with_euler(0.0, 0.0, constants::HALF_PI)
            .with_uniform_scale(2.0);

        // (1,0,0) scaled to (2,0,0), rotated about +Z to (0,2,0), moved to (10,2,0)
        let point = transform.to_matrix() * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(point, Vec4::new(10.0, 2.0, 0.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_translate_and_rotate_accumulate() {
        let mut transform = Transform::identity();
        transform.translate(Vec3::new(1.0, 0.0, 0.0));
        transform.translate(Vec3::new(0.0, 2.0, 0.0));
        transform.rotate(Quaternion::from_euler(0.0, constants::HALF_PI, 0.0));

        assert_relative_eq!(transform.position, Vec3::new(1.0, 2.0, 0.0));
        assert_relative_eq!(transform.forward(), Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-6);
    }
}
