//! Rotation quaternions

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use super::matrix::Mat4;
use super::utils;
use super::vector::Vec3;

/// Quaternion `w + xi + yj + zk`.
///
/// Rotations are represented by unit quaternions. Nothing here renormalizes
/// implicitly: products of unit quaternions drift slowly, so long-lived
/// orientations should call [`Quaternion::normalize`] now and then.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    /// Real part
    pub w: f32,
    /// First imaginary component
    pub x: f32,
    /// Second imaginary component
    pub y: f32,
    /// Third imaginary component
    pub z: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// The identity rotation
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    /// Create a quaternion from its raw components
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Rotation from Euler angles in radians: roll about X, pitch about Y, yaw about Z
    pub fn from_euler(x: f32, y: f32, z: f32) -> Self {
        let (sx, cx) = (x * 0.5).sin_cos();
        let (sy, cy) = (y * 0.5).sin_cos();
        let (sz, cz) = (z * 0.5).sin_cos();

        Self {
            w: cx * cy * cz + sx * sy * sz,
            x: sx * cy * cz - cx * sy * sz,
            y: cx * sy * cz + sx * cy * sz,
            z: cx * cy * sz - sx * sy * cz,
        }
    }

    /// Rotation of `angle` radians about `axis`; the axis is normalized here
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalized();
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(c, axis[0] * s, axis[1] * s, axis[2] * s)
    }

    /// Euler angles `(roll, pitch, yaw)` in radians.
    ///
    /// The pitch term is clamped to `[-1, 1]` before `asin` so that rounding
    /// near the poles cannot produce NaN.
    pub fn to_euler(&self) -> Vec3 {
        let Self { w, x, y, z } = *self;

        let roll = (2.0 * (w * x + y * z)).atan2(1.0 - 2.0 * (x * x + y * y));
        let pitch = utils::clamp(2.0 * (w * y - z * x), -1.0, 1.0).asin();
        let yaw = (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z));

        Vec3::new(roll, pitch, yaw)
    }

    /// Homogeneous rotation matrix; only orthonormal for unit quaternions
    pub fn to_matrix(&self) -> Mat4 {
        let Self { w, x, y, z } = *self;
        let (x2, y2, z2) = (x * x, y * y, z * z);

        Mat4::from_rows([
            [1.0 - 2.0 * y2 - 2.0 * z2, 2.0 * x * y - 2.0 * w * z, 2.0 * x * z + 2.0 * w * y, 0.0],
            [2.0 * x * y + 2.0 * w * z, 1.0 - 2.0 * x2 - 2.0 * z2, 2.0 * y * z - 2.0 * w * x, 0.0],
            [2.0 * x * z - 2.0 * w * y, 2.0 * y * z + 2.0 * w * x, 1.0 - 2.0 * x2 - 2.0 * y2, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotate a vector by this quaternion
    pub fn rotate(&self, vector: Vec3) -> Vec3 {
        (self.to_matrix() * vector.extend::<4, 1>([1.0])).truncate::<3>()
    }

    /// Four-dimensional length
    pub fn magnitude(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Negate the imaginary part
    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Multiplicative inverse, `conjugate / |q|^2`
    #[must_use]
    pub fn inverse(&self) -> Self {
        self.conjugate() / self.dot(self)
    }

    /// Unit-length copy; a zero quaternion yields NaN components
    #[must_use]
    pub fn normalized(&self) -> Self {
        *self / self.magnitude()
    }

    /// Normalize in place
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// Four-dimensional dot product
    pub fn dot(&self, other: &Self) -> f32 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Hamilton product with the dot product added to the real part
    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        *self * *other + self.dot(other)
    }

    /// Blend linearly towards `other` and renormalize.
    ///
    /// This is not a constant-velocity slerp; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let t = utils::clamp(t, 0.0, 1.0);
        (*self * (1.0 - t) + *other * t).normalized()
    }
}

impl From<Vec3> for Quaternion {
    fn from(euler: Vec3) -> Self {
        Self::from_euler(euler.x(), euler.y(), euler.z())
    }
}

impl AddAssign for Quaternion {
    fn add_assign(&mut self, rhs: Self) {
        self.w += rhs.w;
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

// Adding or subtracting a scalar only touches the real part.
impl AddAssign<f32> for Quaternion {
    fn add_assign(&mut self, rhs: f32) {
        self.w += rhs;
    }
}

impl SubAssign for Quaternion {
    fn sub_assign(&mut self, rhs: Self) {
        self.w -= rhs.w;
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl SubAssign<f32> for Quaternion {
    fn sub_assign(&mut self, rhs: f32) {
        self.w -= rhs;
    }
}

impl MulAssign for Quaternion {
    fn mul_assign(&mut self, rhs: Self) {
        let Self { w, x, y, z } = *self;
        *self = Self {
            w: w * rhs.w - x * rhs.x - y * rhs.y - z * rhs.z,
            x: x * rhs.w + w * rhs.x + y * rhs.z - z * rhs.y,
            y: w * rhs.y - x * rhs.z + y * rhs.w + z * rhs.x,
            z: w * rhs.z + x * rhs.y - y * rhs.x + z * rhs.w,
        };
    }
}

impl MulAssign<f32> for Quaternion {
    fn mul_assign(&mut self, rhs: f32) {
        self.w *= rhs;
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl DivAssign for Quaternion {
    fn div_assign(&mut self, rhs: Self) {
        *self *= rhs.inverse();
    }
}

impl DivAssign<f32> for Quaternion {
    fn div_assign(&mut self, rhs: f32) {
        self.w /= rhs;
        self.x /= rhs;
        self.y /= rhs;
        self.z /= rhs;
    }
}

macro_rules! impl_quaternion_binary_op {
    ($op:ident, $method:ident, $rhs:ty, $token:tt) => {
        impl $op<$rhs> for Quaternion {
            type Output = Self;

            fn $method(mut self, rhs: $rhs) -> Self {
                self $token rhs;
                self
            }
        }
    };
}

impl_quaternion_binary_op!(Add, add, Quaternion, +=);
impl_quaternion_binary_op!(Add, add, f32, +=);
impl_quaternion_binary_op!(Sub, sub, Quaternion, -=);
impl_quaternion_binary_op!(Sub, sub, f32, -=);
impl_quaternion_binary_op!(Mul, mul, Quaternion, *=);
impl_quaternion_binary_op!(Mul, mul, f32, *=);
impl_quaternion_binary_op!(Div, div, Quaternion, /=);
impl_quaternion_binary_op!(Div, div, f32, /=);

impl AbsDiffEq for Quaternion {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.w.abs_diff_eq(&other.w, epsilon)
            && self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Quaternion {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.w.relative_eq(&other.w, epsilon, max_relative)
            && self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}
