//! Fixed-size row-major `f32` matrices
//!
//! `Matrix<M, N>` has `M` rows and `N` columns; `at(row, col)` addresses the
//! element in row `row`, column `col`. Square matrices additionally provide
//! `identity`, `determinant`, `adjoint` and `inverse`.
//!
//! `inverse()` does not check for singular input: a zero determinant yields
//! non-finite elements, so callers must test `determinant()` first when the
//! matrix may not be invertible.

use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use approx::{AbsDiffEq, RelativeEq};

use super::vector::Vector;

/// An `M` x `N` matrix of `f32`, stored row by row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<const M: usize, const N: usize> {
    rows: [[f32; N]; M],
}

/// 2x2 matrix
pub type Mat2 = Matrix<2, 2>;
/// 3x3 matrix
pub type Mat3 = Matrix<3, 3>;
/// 4x4 matrix, used for homogeneous transforms
pub type Mat4 = Matrix<4, 4>;

impl<const M: usize, const N: usize> Default for Matrix<M, N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const M: usize, const N: usize> Matrix<M, N> {
    /// Matrix with every element set to zero
    pub const ZERO: Self = Self { rows: [[0.0; N]; M] };

    /// Build a matrix from its rows
    pub const fn from_rows(rows: [[f32; N]; M]) -> Self {
        Self { rows }
    }

    /// Number of rows
    pub const fn row_count(&self) -> usize {
        M
    }

    /// Number of columns
    pub const fn column_count(&self) -> usize {
        N
    }

    /// Total number of elements
    pub const fn size(&self) -> usize {
        M * N
    }

    /// Borrow the rows
    pub const fn as_rows(&self) -> &[[f32; N]; M] {
        &self.rows
    }

    /// Element at `row`, `col`; panics when either index is out of range
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.rows[row][col]
    }

    /// Mutable element at `row`, `col`
    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut f32 {
        &mut self.rows[row][col]
    }

    /// Copy of row `row`
    pub fn row(&self, row: usize) -> Vector<N> {
        Vector::from_array(self.rows[row])
    }

    /// Copy of column `col`
    pub fn column(&self, col: usize) -> Vector<M> {
        Vector::from_array(std::array::from_fn(|row| self.rows[row][col]))
    }

    /// Swap rows and columns
    #[must_use]
    pub fn transpose(&self) -> Matrix<N, M> {
        Matrix {
            rows: std::array::from_fn(|row| std::array::from_fn(|col| self.rows[col][row])),
        }
    }

    /// The matrix left after deleting `row` and `col`.
    ///
    /// `R` and `C` must be `M - 1` and `N - 1`; other sizes fail to compile.
    pub fn minor<const R: usize, const C: usize>(&self, row: usize, col: usize) -> Matrix<R, C> {
        const { assert!(R + 1 == M && C + 1 == N, "a minor drops exactly one row and one column") };
        Matrix {
            rows: std::array::from_fn(|r| {
                let source_row = if r < row { r } else { r + 1 };
                std::array::from_fn(|c| {
                    let source_col = if c < col { c } else { c + 1 };
                    self.rows[source_row][source_col]
                })
            }),
        }
    }

    fn flattened(&self) -> Vec<f32> {
        self.rows.iter().flatten().copied().collect()
    }
}

impl<const N: usize> Matrix<N, N> {
    /// Identity matrix
    pub fn identity() -> Self {
        Self {
            rows: std::array::from_fn(|row| {
                std::array::from_fn(|col| if row == col { 1.0 } else { 0.0 })
            }),
        }
    }

    /// Determinant by cofactor expansion along the first row
    pub fn determinant(&self) -> f32 {
        laplace_determinant(&self.flattened(), N)
    }

    /// Transposed cofactor matrix
    #[must_use]
    pub fn adjoint(&self) -> Self {
        let values = self.flattened();
        let mut adjoint = Self::ZERO;
        for row in 0..N {
            for col in 0..N {
                let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
                let minor = minor_values(&values, N, row, col);
                adjoint.rows[col][row] = sign * laplace_determinant(&minor, N - 1);
            }
        }
        adjoint
    }

    /// `adjoint() / determinant()`, unguarded against singular matrices
    #[must_use]
    pub fn inverse(&self) -> Self {
        self.adjoint() / self.determinant()
    }
}

// The recursion works on flat row-major slices because each step shrinks the
// size by one, which the const-generic type cannot express on stable Rust.
fn laplace_determinant(values: &[f32], size: usize) -> f32 {
    match size {
        0 => 1.0,
        1 => values[0],
        2 => values[0] * values[3] - values[1] * values[2],
        _ => (0..size)
            .map(|col| {
                let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
                sign * values[col] * laplace_determinant(&minor_values(values, size, 0, col), size - 1)
            })
            .sum(),
    }
}

fn minor_values(values: &[f32], size: usize, skip_row: usize, skip_col: usize) -> Vec<f32> {
    values
        .chunks_exact(size)
        .enumerate()
        .filter(|(row, _)| *row != skip_row)
        .flat_map(|(_, row)| {
            row.iter()
                .enumerate()
                .filter(move |(col, _)| *col != skip_col)
                .map(|(_, value)| *value)
        })
        .collect()
}

impl<const M: usize, const N: usize> Index<(usize, usize)> for Matrix<M, N> {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.rows[row][col]
    }
}

impl<const M: usize, const N: usize> IndexMut<(usize, usize)> for Matrix<M, N> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.rows[row][col]
    }
}

macro_rules! impl_matrix_elementwise_op {
    ($op:ident, $method:ident, $op_assign:ident, $method_assign:ident, $token:tt) => {
        impl<const M: usize, const N: usize> $op_assign for Matrix<M, N> {
            fn $method_assign(&mut self, rhs: Self) {
                for (lhs, rhs) in self.rows.iter_mut().flatten().zip(rhs.rows.iter().flatten()) {
                    *lhs $token *rhs;
                }
            }
        }

        impl<const M: usize, const N: usize> $op for Matrix<M, N> {
            type Output = Self;

            fn $method(mut self, rhs: Self) -> Self {
                self $token rhs;
                self
            }
        }
    };
}

macro_rules! impl_matrix_scalar_op {
    ($op:ident, $method:ident, $op_assign:ident, $method_assign:ident, $token:tt) => {
        impl<const M: usize, const N: usize> $op_assign<f32> for Matrix<M, N> {
            fn $method_assign(&mut self, rhs: f32) {
                for lhs in self.rows.iter_mut().flatten() {
                    *lhs $token rhs;
                }
            }
        }

        impl<const M: usize, const N: usize> $op<f32> for Matrix<M, N> {
            type Output = Self;

            fn $method(mut self, rhs: f32) -> Self {
                self $token rhs;
                self
            }
        }
    };
}

impl_matrix_elementwise_op!(Add, add, AddAssign, add_assign, +=);
impl_matrix_elementwise_op!(Sub, sub, SubAssign, sub_assign, -=);
impl_matrix_scalar_op!(Add, add, AddAssign, add_assign, +=);
impl_matrix_scalar_op!(Sub, sub, SubAssign, sub_assign, -=);
impl_matrix_scalar_op!(Mul, mul, MulAssign, mul_assign, *=);
impl_matrix_scalar_op!(Div, div, DivAssign, div_assign, /=);

impl<const M: usize, const N: usize, const P: usize> Mul<Matrix<N, P>> for Matrix<M, N> {
    type Output = Matrix<M, P>;

    fn mul(self, rhs: Matrix<N, P>) -> Matrix<M, P> {
        Matrix {
            rows: std::array::from_fn(|row| {
                std::array::from_fn(|col| (0..N).map(|k| self.rows[row][k] * rhs.rows[k][col]).sum())
            }),
        }
    }
}

impl<const N: usize> MulAssign<Matrix<N, N>> for Matrix<N, N> {
    fn mul_assign(&mut self, rhs: Matrix<N, N>) {
        *self = *self * rhs;
    }
}

impl<const M: usize, const N: usize> Mul<Vector<N>> for Matrix<M, N> {
    type Output = Vector<M>;

    fn mul(self, rhs: Vector<N>) -> Vector<M> {
        Vector::from_array(std::array::from_fn(|row| self.row(row).dot(&rhs)))
    }
}

impl<const M: usize, const N: usize> Neg for Matrix<M, N> {
    type Output = Self;

    fn neg(self) -> Self {
        self * -1.0
    }
}

impl<const M: usize, const N: usize> AbsDiffEq for Matrix<M, N> {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.rows
            .iter()
            .flatten()
            .zip(other.rows.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<const M: usize, const N: usize> RelativeEq for Matrix<M, N> {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.rows
            .iter()
            .flatten()
            .zip(other.rows.iter().flatten())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Vec3, Vec4};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const EPSILON: f32 = 1e-4;

    fn sample_4x4() -> Mat4 {
        Mat4::from_rows([
            [4.0, 7.0, 2.0, 3.0],
            [0.0, 5.0, 1.0, -2.0],
            [3.0, 0.5, 6.0, 1.0],
            [1.0, 2.0, -1.0, 8.0],
        ])
    }

    #[test]
    fn test_identity_is_neutral() {
        let m = sample_4x4();

        assert_eq!(Mat4::identity() * m, m);
        assert_eq!(m * Mat4::identity(), m);
    }

    #[test]
    fn test_row_major_indexing() {
        let m = Matrix::<2, 3>::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);

        assert_eq!(m.at(0, 2), 3.0);
        assert_eq!(m[(1, 0)], 4.0);
        assert_eq!(m.row(1), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(m.column(1).as_array(), &[2.0, 5.0]);
        assert_eq!(m.transpose().at(2, 1), 6.0);
        assert_eq!(m.size(), 6);
    }

    #[test]
    fn test_rectangular_product() {
        let a = Matrix::<2, 3>::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let b = Matrix::<3, 2>::from_rows([[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]]);

        assert_eq!(a * b, Mat2::from_rows([[58.0, 64.0], [139.0, 154.0]]));
    }

    #[test]
    fn test_matrix_vector_product() {
        let m = Mat4::from_rows([
            [1.0, 0.0, 0.0, 2.0],
            [0.0, 1.0, 0.0, 3.0],
            [0.0, 0.0, 1.0, 4.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);

        assert_eq!(m * Vec4::new(1.0, 1.0, 1.0, 1.0), Vec4::new(3.0, 4.0, 5.0, 1.0));
    }

    #[test]
    fn test_minor_drops_row_and_column() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let minor: Mat2 = m.minor(1, 0);

        assert_eq!(minor, Mat2::from_rows([[2.0, 3.0], [8.0, 9.0]]));
    }

    #[test]
    fn test_determinant_base_and_recursive_cases() {
        assert_eq!(Matrix::<1, 1>::from_rows([[-3.0]]).determinant(), -3.0);
        assert_eq!(Mat2::from_rows([[1.0, 2.0], [3.0, 4.0]]).determinant(), -2.0);
        assert_relative_eq!(
            Mat3::from_rows([[2.0, 0.0, 1.0], [1.0, 3.0, 2.0], [1.0, 1.0, 2.0]]).determinant(),
            6.0,
            epsilon = EPSILON
        );
        assert_relative_eq!(
            Mat3::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]).determinant(),
            0.0,
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_determinant_matches_nalgebra() {
        let m = sample_4x4();
        let reference: nalgebra::Matrix4<f32> = m.into();

        assert_relative_eq!(m.determinant(), reference.determinant(), epsilon = 1e-2);
    }

    #[test]
    fn test_inverse_round_trip() {
        let m = sample_4x4();

        assert_abs_diff_eq!(m * m.inverse(), Mat4::identity(), epsilon = EPSILON);
        assert_abs_diff_eq!(m.inverse() * m, Mat4::identity(), epsilon = EPSILON);

        let m3 = Mat3::from_rows([[2.0, -1.0, 0.0], [-1.0, 2.0, -1.0], [0.0, -1.0, 2.0]]);
        assert_abs_diff_eq!(m3 * m3.inverse(), Mat3::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_inverse_matches_nalgebra() {
        let m = sample_4x4();
        let reference = nalgebra::Matrix4::<f32>::from(m)
            .try_inverse()
            .expect("sample matrix is invertible");

        assert_abs_diff_eq!(m.inverse(), Mat4::from(reference), epsilon = EPSILON);
    }

    #[test]
    fn test_singular_inverse_is_not_finite() {
        let singular = Mat2::from_rows([[1.0, 2.0], [2.0, 4.0]]);

        assert!(singular
            .inverse()
            .as_rows()
            .iter()
            .flatten()
            .any(|value| !value.is_finite()));
    }

    #[test]
    fn test_scalar_and_compound_ops() {
        let mut m = Mat2::identity();
        m += 1.0;
        m *= 2.0;
        assert_eq!(m, Mat2::from_rows([[4.0, 2.0], [2.0, 4.0]]));

        m -= Mat2::identity();
        assert_eq!(m, Mat2::from_rows([[3.0, 2.0], [2.0, 3.0]]));

        let mut product = m;
        product *= Mat2::identity() * 2.0;
        assert_eq!(product, m * 2.0);
        assert_eq!(-m + m, Mat2::ZERO);
    }
}
