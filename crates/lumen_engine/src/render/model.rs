//! CPU-side model geometry
//!
//! A [`Model`] is validated, interleaved vertex data ready to hand to a GPU
//! backend. Each vertex is packed as nine floats:
//!
//! | floats | attribute |
//! |--------|-----------|
//! | 0..3   | position  |
//! | 3..6   | normal    |
//! | 6..9   | color     |

use thiserror::Error;

use super::Color;
use crate::foundation::math::Vec3;

/// Floats per packed vertex
pub const FLOATS_PER_VERTEX: usize = 9;

/// Bytes per packed vertex
pub const VERTEX_STRIDE: usize = FLOATS_PER_VERTEX * std::mem::size_of::<f32>();

/// Vertices emitted by [`Model::cube`]
pub const CUBE_VERTEX_COUNT: usize = 36;

/// Rejected geometry input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// No vertices were supplied
    #[error("model has no vertices")]
    EmptyGeometry,

    /// Color indices do not line up with positions
    #[error("{vertices} vertices but {color_indices} color indices")]
    VertexCountMismatch {
        /// Number of positions
        vertices: usize,
        /// Number of color indices
        color_indices: usize,
    },

    /// Normals do not line up with positions
    #[error("{vertices} vertices but {normals} normals")]
    NormalCountMismatch {
        /// Number of positions
        vertices: usize,
        /// Number of normals
        normals: usize,
    },

    /// A color index points past the end of the palette
    #[error("color index {required} is outside a palette of {available} colors")]
    TooFewColors {
        /// Largest color index used
        required: usize,
        /// Palette size
        available: usize,
    },
}

/// Interleaved, validated vertex data
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    vertices: Vec<f32>,
}

impl Model {
    /// Pack geometry into a model.
    ///
    /// `positions`, `normals` and `color_indices` run in parallel, one entry
    /// per vertex; each color index selects an entry of `palette`.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] when the inputs are empty, their lengths
    /// disagree, or an index points past the end of the palette.
    pub fn new(
        positions: &[Vec3],
        normals: &[Vec3],
        color_indices: &[usize],
        palette: &[Color],
    ) -> Result<Self, ModelError> {
        if positions.is_empty() {
            return Err(ModelError::EmptyGeometry);
        }
        if normals.len() != positions.len() {
            return Err(ModelError::NormalCountMismatch {
                vertices: positions.len(),
                normals: normals.len(),
            });
        }
        if color_indices.len() != positions.len() {
            return Err(ModelError::VertexCountMismatch {
                vertices: positions.len(),
                color_indices: color_indices.len(),
            });
        }
        if let Some(&required) = color_indices.iter().max() {
            if required >= palette.len() {
                return Err(ModelError::TooFewColors {
                    required,
                    available: palette.len(),
                });
            }
        }

        let mut vertices = Vec::with_capacity(positions.len() * FLOATS_PER_VERTEX);
        for ((position, normal), &color) in positions.iter().zip(normals).zip(color_indices) {
            vertices.extend_from_slice(position.as_array());
            vertices.extend_from_slice(normal.as_array());
            vertices.extend_from_slice(&palette[color].to_array());
        }

        log::trace!("Packed model with {} vertices", positions.len());
        Ok(Self { vertices })
    }

    /// Cube spanning -1..1 on every axis, colored per vertex.
    ///
    /// Faces are emitted in the order -Z, +Z, -X, +X, -Y, +Y, six vertices
    /// each, as two counter-clockwise triangles seen from outside.
    /// `color_indices` holds one palette index per emitted vertex, so it must
    /// have [`CUBE_VERTEX_COUNT`] entries.
    ///
    /// # Errors
    ///
    /// [`ModelError::VertexCountMismatch`] for the wrong number of indices and
    /// [`ModelError::TooFewColors`] if an index is outside `palette`.
    pub fn cube(color_indices: &[usize], palette: &[Color]) -> Result<Self, ModelError> {
        let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
            ([0.0, 0.0, -1.0], [[-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0], [1.0, -1.0, -1.0]]),
            ([0.0, 0.0, 1.0], [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]]),
            ([-1.0, 0.0, 0.0], [[-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0]]),
            ([1.0, 0.0, 0.0], [[1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0]]),
            ([0.0, -1.0, 0.0], [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]]),
            ([0.0, 1.0, 0.0], [[-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0]]),
        ];

        let mut positions = Vec::with_capacity(CUBE_VERTEX_COUNT);
        let mut normals = Vec::with_capacity(CUBE_VERTEX_COUNT);
        for (normal, corners) in faces {
            for corner in [0, 1, 2, 0, 2, 3] {
                positions.push(Vec3::from(corners[corner]));
                normals.push(Vec3::from(normal));
            }
        }

        Self::new(&positions, &normals, color_indices, palette)
    }

    /// Per-vertex indices giving each cube face a single palette entry,
    /// in the face order of [`Model::cube`]
    pub fn cube_face_indices(face_colors: [usize; 6]) -> Vec<usize> {
        face_colors
            .into_iter()
            .flat_map(|color| [color; CUBE_VERTEX_COUNT / 6])
            .collect()
    }

    /// Cube in a single color
    pub fn solid_cube(color: Color) -> Self {
        match Self::cube(&[0; CUBE_VERTEX_COUNT], &[color]) {
            Ok(model) => model,
            Err(error) => unreachable!("single-color cube is always valid: {error}"),
        }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    /// Packed vertex floats
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Packed vertex data as raw bytes for buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Position of vertex `index`
    pub fn position(&self, index: usize) -> Vec3 {
        self.attribute(index, 0)
    }

    /// Normal of vertex `index`
    pub fn normal(&self, index: usize) -> Vec3 {
        self.attribute(index, 3)
    }

    /// Color of vertex `index`
    pub fn color(&self, index: usize) -> Color {
        Color::from(self.attribute(index, 6))
    }

    fn attribute(&self, index: usize, offset: usize) -> Vec3 {
        let start = index * FLOATS_PER_VERTEX + offset;
        Vec3::new(
            self.vertices[start],
            self.vertices[start + 1],
            self.vertices[start + 2],
        )
    }
}
