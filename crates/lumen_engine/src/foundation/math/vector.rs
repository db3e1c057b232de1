//! Fixed-size `f32` vectors
//!
//! `Vector<N>` is a plain value type: it is `Copy`, compares structurally and
//! supports elementwise as well as scalar arithmetic. Component accessors
//! (`x()`, `y()`, ...) and the grow/shrink conversions check their bounds at
//! compile time.

use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use approx::{AbsDiffEq, RelativeEq};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::utils;

/// An `N`-component vector of `f32`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const N: usize> {
    values: [f32; N],
}

/// Two-component vector
pub type Vec2 = Vector<2>;
/// Three-component vector
pub type Vec3 = Vector<3>;
/// Four-component vector (homogeneous coordinates)
pub type Vec4 = Vector<4>;

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> Vector<N> {
    /// Vector with every component set to zero
    pub const ZERO: Self = Self { values: [0.0; N] };

    /// Create a vector from its components
    pub const fn from_array(values: [f32; N]) -> Self {
        Self { values }
    }

    /// Create a vector with every component set to `value`
    pub const fn splat(value: f32) -> Self {
        Self { values: [value; N] }
    }

    /// Number of components
    pub const fn len(&self) -> usize {
        N
    }

    /// True only for the zero-dimensional vector
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Borrow the components as an array
    pub const fn as_array(&self) -> &[f32; N] {
        &self.values
    }

    /// Iterate over the components
    pub fn iter(&self) -> std::slice::Iter<'_, f32> {
        self.values.iter()
    }

    /// First component
    pub fn x(&self) -> f32 {
        const { assert!(N >= 1, "x() needs at least one component") };
        self.values[0]
    }

    /// Second component
    pub fn y(&self) -> f32 {
        const { assert!(N >= 2, "y() needs at least two components") };
        self.values[1]
    }

    /// Third component
    pub fn z(&self) -> f32 {
        const { assert!(N >= 3, "z() needs at least three components") };
        self.values[2]
    }

    /// Fourth component
    pub fn w(&self) -> f32 {
        const { assert!(N >= 4, "w() needs at least four components") };
        self.values[3]
    }

    /// Overwrite the first component
    pub fn set_x(&mut self, value: f32) {
        const { assert!(N >= 1, "set_x() needs at least one component") };
        self.values[0] = value;
    }

    /// Overwrite the second component
    pub fn set_y(&mut self, value: f32) {
        const { assert!(N >= 2, "set_y() needs at least two components") };
        self.values[1] = value;
    }

    /// Overwrite the third component
    pub fn set_z(&mut self, value: f32) {
        const { assert!(N >= 3, "set_z() needs at least three components") };
        self.values[2] = value;
    }

    /// Overwrite the fourth component
    pub fn set_w(&mut self, value: f32) {
        const { assert!(N >= 4, "set_w() needs at least four components") };
        self.values[3] = value;
    }

    /// Apply `f` to every component
    #[must_use]
    pub fn map(self, f: impl FnMut(f32) -> f32) -> Self {
        Self {
            values: self.values.map(f),
        }
    }

    /// Componentwise absolute value
    #[must_use]
    pub fn abs(&self) -> Self {
        self.map(f32::abs)
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> f32 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Euclidean length
    pub fn magnitude(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit-length copy of this vector.
    ///
    /// A zero vector yields NaN components; callers that can produce one must
    /// check `magnitude()` first.
    #[must_use]
    pub fn normalized(&self) -> Self {
        *self / self.magnitude()
    }

    /// Normalize in place, see [`Vector::normalized`]
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// Linear interpolation towards `other`, with `t` clamped to `[0, 1]`
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let t = utils::clamp(t, 0.0, 1.0);
        *self + (*other - *self) * t
    }

    /// Keep the first `M` components.
    ///
    /// Shrinking into a larger vector is rejected when the call is compiled.
    pub fn truncate<const M: usize>(&self) -> Vector<M> {
        const { assert!(M <= N, "truncate() cannot produce a larger vector") };
        let mut values = [0.0; M];
        values.copy_from_slice(&self.values[..M]);
        Vector { values }
    }

    /// Append `tail` to this vector, producing an `M = N + K` vector
    pub fn extend<const M: usize, const K: usize>(&self, tail: [f32; K]) -> Vector<M> {
        const { assert!(N + K == M, "extend() must append exactly M - N components") };
        let mut values = [0.0; M];
        values[..N].copy_from_slice(&self.values);
        values[N..].copy_from_slice(&tail);
        Vector { values }
    }
}

impl Vector<2> {
    /// Create a 2D vector
    pub const fn new(x: f32, y: f32) -> Self {
        Self { values: [x, y] }
    }
}

impl Vector<3> {
    /// Create a 3D vector
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { values: [x, y, z] }
    }

    /// Right-handed cross product
    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.values;
        let [bx, by, bz] = other.values;
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }
}

impl Vector<4> {
    /// Create a 4D vector
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self {
            values: [x, y, z, w],
        }
    }
}

impl<const N: usize> From<[f32; N]> for Vector<N> {
    fn from(values: [f32; N]) -> Self {
        Self { values }
    }
}

impl<const N: usize> From<Vector<N>> for [f32; N] {
    fn from(vector: Vector<N>) -> Self {
        vector.values
    }
}

impl<const N: usize> From<f32> for Vector<N> {
    fn from(value: f32) -> Self {
        Self::splat(value)
    }
}

impl From<(f32, f32)> for Vector<2> {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl From<(f32, f32, f32)> for Vector<3> {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(f32, f32, f32, f32)> for Vector<4> {
    fn from((x, y, z, w): (f32, f32, f32, f32)) -> Self {
        Self::new(x, y, z, w)
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.values[index]
    }
}

impl<const N: usize> IndexMut<usize> for Vector<N> {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.values[index]
    }
}

// Elementwise and scalar forms of each arithmetic operator, built on the
// compound-assignment version.
macro_rules! impl_vector_op {
    ($op:ident, $method:ident, $op_assign:ident, $method_assign:ident, $token:tt) => {
        impl<const N: usize> $op_assign for Vector<N> {
            fn $method_assign(&mut self, rhs: Self) {
                for (lhs, rhs) in self.values.iter_mut().zip(rhs.values) {
                    *lhs $token rhs;
                }
            }
        }

        impl<const N: usize> $op_assign<f32> for Vector<N> {
            fn $method_assign(&mut self, rhs: f32) {
                for lhs in &mut self.values {
                    *lhs $token rhs;
                }
            }
        }

        impl<const N: usize> $op for Vector<N> {
            type Output = Self;

            fn $method(mut self, rhs: Self) -> Self {
                self $token rhs;
                self
            }
        }

        impl<const N: usize> $op<f32> for Vector<N> {
            type Output = Self;

            fn $method(mut self, rhs: f32) -> Self {
                self $token rhs;
                self
            }
        }
    };
}

impl_vector_op!(Add, add, AddAssign, add_assign, +=);
impl_vector_op!(Sub, sub, SubAssign, sub_assign, -=);
impl_vector_op!(Mul, mul, MulAssign, mul_assign, *=);
impl_vector_op!(Div, div, DivAssign, div_assign, /=);

impl<const N: usize> Mul<Vector<N>> for f32 {
    type Output = Vector<N>;

    fn mul(self, rhs: Vector<N>) -> Vector<N> {
        rhs * self
    }
}

impl<const N: usize> Neg for Vector<N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|value| -value)
    }
}

impl<const N: usize> fmt::Display for Vector<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, ")")
    }
}

impl<const N: usize> AbsDiffEq for Vector<N> {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.values
            .iter()
            .zip(other.values.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<const N: usize> RelativeEq for Vector<N> {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.values
            .iter()
            .zip(other.values.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

// Serialized as a plain sequence so config files can write `[0.0, 1.0, 5.0]`.
impl<const N: usize> Serialize for Vector<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.values.iter())
    }
}

impl<'de, const N: usize> Deserialize<'de> for Vector<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<f32>::deserialize(deserializer)?;
        let len = values.len();
        let values: [f32; N] = values
            .try_into()
            .map_err(|_| D::Error::invalid_length(len, &"as many values as vector components"))?;
        Ok(Self { values })
    }
}
