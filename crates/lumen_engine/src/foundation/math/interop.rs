//! Conversions to and from `nalgebra`'s statically sized types
//!
//! Useful when handing engine values to crates built on nalgebra, and as an
//! independent reference in tests.

use nalgebra::{SMatrix, SVector};

use super::{Matrix, Quaternion, Vector};

impl<const N: usize> From<Vector<N>> for SVector<f32, N> {
    fn from(vector: Vector<N>) -> Self {
        Self::from_fn(|row, _| vector[row])
    }
}

impl<const N: usize> From<SVector<f32, N>> for Vector<N> {
    fn from(vector: SVector<f32, N>) -> Self {
        Self::from_array(std::array::from_fn(|i| vector[i]))
    }
}

impl<const M: usize, const N: usize> From<Matrix<M, N>> for SMatrix<f32, M, N> {
    fn from(matrix: Matrix<M, N>) -> Self {
        Self::from_fn(|row, col| matrix.at(row, col))
    }
}

impl<const M: usize, const N: usize> From<SMatrix<f32, M, N>> for Matrix<M, N> {
    fn from(matrix: SMatrix<f32, M, N>) -> Self {
        Self::from_rows(std::array::from_fn(|row| {
            std::array::from_fn(|col| matrix[(row, col)])
        }))
    }
}

impl From<Quaternion> for nalgebra::Quaternion<f32> {
    fn from(q: Quaternion) -> Self {
        Self::new(q.w, q.x, q.y, q.z)
    }
}

impl From<nalgebra::Quaternion<f32>> for Quaternion {
    fn from(q: nalgebra::Quaternion<f32>) -> Self {
        Self::new(q.w, q.i, q.j, q.k)
    }
}

#[cfg(test)]
mod tests {
    use crate::foundation::math::{Mat3, Vec3};

    #[test]
    fn test_vector_conversion_preserves_components() {
        let v = Vec3::new(1.0, -2.0, 3.0);
        let converted: nalgebra::Vector3<f32> = v.into();

        assert_eq!(converted, nalgebra::Vector3::new(1.0, -2.0, 3.0));
        assert_eq!(Vec3::from(converted), v);
    }

    #[test]
    fn test_matrix_conversion_keeps_row_major_meaning() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let converted: nalgebra::Matrix3<f32> = m.into();

        assert_eq!(converted[(0, 2)], 3.0);
        assert_eq!(converted[(2, 0)], 7.0);
        assert_eq!(Mat3::from(converted), m);
    }
}
