//! Builders for 4x4 homogeneous transform matrices
//!
//! Every builder comes in three forms: per-axis components, a uniform scalar
//! and a [`Vec3`].
//!
//! ```
//! use lumen_engine::foundation::affine;
//! use lumen_engine::foundation::math::Vec3;
//!
//! assert_eq!(affine::uniform_scale(2.0), affine::scale(2.0, 2.0, 2.0));
//!
//! let moved = affine::translation_from(Vec3::new(1.0, 0.0, 0.0));
//! assert_eq!(moved.at(0, 3), 1.0);
//! ```

use super::math::{Mat4, Vec3};

/// Identity matrix with `(x, y, z)` in the last column
pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
    let mut matrix = Mat4::identity();
    *matrix.at_mut(0, 3) = x;
    *matrix.at_mut(1, 3) = y;
    *matrix.at_mut(2, 3) = z;
    matrix
}

/// Translation by `offset` along every axis
pub fn uniform_translation(offset: f32) -> Mat4 {
    translation(offset, offset, offset)
}

/// Translation by a vector
pub fn translation_from(offset: Vec3) -> Mat4 {
    translation(offset.x(), offset.y(), offset.z())
}

/// Diagonal scale matrix
pub fn scale(x: f32, y: f32, z: f32) -> Mat4 {
    let mut matrix = Mat4::identity();
    *matrix.at_mut(0, 0) = x;
    *matrix.at_mut(1, 1) = y;
    *matrix.at_mut(2, 2) = z;
    matrix
}

/// Scale by `factor` along every axis
pub fn uniform_scale(factor: f32) -> Mat4 {
    scale(factor, factor, factor)
}

/// Scale by per-axis factors held in a vector
pub fn scale_from(factors: Vec3) -> Mat4 {
    scale(factors.x(), factors.y(), factors.z())
}

/// Rotation of `theta` radians about `axis` (Rodrigues' formula).
///
/// The axis is normalized first; a zero axis produces NaN elements.
pub fn rotation(theta: f32, axis: Vec3) -> Mat4 {
    let axis = axis.normalized();
    let (x, y, z) = (axis.x(), axis.y(), axis.z());
    let (sin, cos) = theta.sin_cos();
    let t = 1.0 - cos;

    Mat4::from_rows([
        [cos + x * x * t, x * y * t - z * sin, x * z * t + y * sin, 0.0],
        [y * x * t + z * sin, cos + y * y * t, y * z * t - x * sin, 0.0],
        [z * x * t - y * sin, z * y * t + x * sin, cos + z * z * t, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Rotation about the same scalar on every axis component, `rotation(theta, (a, a, a))`
pub fn uniform_axis_rotation(theta: f32, axis_component: f32) -> Mat4 {
    rotation(theta, Vec3::splat(axis_component))
}
