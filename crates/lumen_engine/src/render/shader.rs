//! Shader boundary
//!
//! The engine never talks to a graphics API directly. Everything it needs
//! from a GPU program is expressed by [`ShaderProgram`]: bind it, hand it
//! named parameters, and ask it to draw a [`Model`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Model;
use crate::foundation::math::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};

/// Shader loading and compilation failures
#[derive(Error, Debug)]
pub enum ShaderError {
    /// Source file could not be read
    #[error("failed to read shader source {}: {source}", .path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A stage failed to compile
    #[error("{stage} shader failed to compile: {log}")]
    Compile {
        /// Failing stage
        stage: ShaderStage,
        /// Compiler diagnostics
        log: String,
    },

    /// The stages failed to link into a program
    #[error("shader program failed to link: {log}")]
    Link {
        /// Linker diagnostics
        log: String,
    },
}

/// Programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Per-vertex stage
    Vertex,
    /// Per-fragment stage
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Fragment => write!(f, "fragment"),
        }
    }
}

/// A value that can be bound to a named shader parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// `int`
    Int(i32),
    /// `bool`
    Bool(bool),
    /// `float`
    Float(f32),
    /// `vec2`
    Vec2(Vec2),
    /// `vec3`
    Vec3(Vec3),
    /// `vec4`
    Vec4(Vec4),
    /// `mat2`
    Mat2(Mat2),
    /// `mat3`
    Mat3(Mat3),
    /// `mat4`
    Mat4(Mat4),
}

macro_rules! impl_uniform_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for UniformValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

impl_uniform_from!(
    i32 => Int,
    bool => Bool,
    f32 => Float,
    Vec2 => Vec2,
    Vec3 => Vec3,
    Vec4 => Vec4,
    Mat2 => Mat2,
    Mat3 => Mat3,
    Mat4 => Mat4,
);

impl From<usize> for UniformValue {
    /// Counts saturate at `i32::MAX`
    fn from(value: usize) -> Self {
        Self::Int(i32::try_from(value).unwrap_or(i32::MAX))
    }
}

/// Name of element `index` of a uniform array: `name[i].field`, or `name[i]`
/// when `field` is empty.
pub fn array_uniform_name(name: &str, field: &str, index: usize) -> String {
    if field.is_empty() {
        format!("{name}[{index}]")
    } else {
        format!("{name}[{index}].{field}")
    }
}

/// A compiled and linked GPU program
pub trait ShaderProgram: Send + Sync {
    /// Make this the active program for subsequent uniform and draw calls
    fn bind(&mut self);

    /// Set a named parameter
    fn set_uniform(&mut self, name: &str, value: UniformValue);

    /// Set one element of an array parameter, see [`array_uniform_name`]
    fn set_array_uniform(&mut self, name: &str, field: &str, index: usize, value: UniformValue) {
        self.set_uniform(&array_uniform_name(name, field, index), value);
    }

    /// Issue the draw call for `model`
    fn draw(&mut self, model: &Model);
}

/// Vertex and fragment source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    /// Vertex stage source
    pub vertex: String,
    /// Fragment stage source
    pub fragment: String,
}

impl ShaderSource {
    /// Wrap in-memory sources
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Read both stages from disk
    ///
    /// # Errors
    ///
    /// [`ShaderError::Io`] naming the file that could not be read.
    pub fn from_paths(
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        Ok(Self {
            vertex: read_source(vertex_path.as_ref())?,
            fragment: read_source(fragment_path.as_ref())?,
        })
    }

    /// Source text for `stage`
    pub fn stage(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    log::debug!("Loading shader source from {}", path.display());
    fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Graphics backend that turns sources into programs
pub trait ShaderCompiler {
    /// Compile and link both stages
    ///
    /// # Errors
    ///
    /// [`ShaderError::Compile`] or [`ShaderError::Link`] carrying the
    /// backend's diagnostic log.
    fn compile(&mut self, source: &ShaderSource) -> Result<Box<dyn ShaderProgram>, ShaderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_uniform_names() {
        assert_eq!(array_uniform_name("pointLights", "radius", 2), "pointLights[2].radius");
        assert_eq!(array_uniform_name("weights", "", 0), "weights[0]");
    }

    #[test]
    fn test_uniform_conversions() {
        assert_eq!(UniformValue::from(3_usize), UniformValue::Int(3));
        assert_eq!(UniformValue::from(true), UniformValue::Bool(true));
        assert_eq!(
            UniformValue::from(Vec3::new(1.0, 2.0, 3.0)),
            UniformValue::Vec3(Vec3::new(1.0, 2.0, 3.0))
        );
    }

    #[test]
    fn test_missing_source_file_reports_path() {
        let error = ShaderSource::from_paths("does/not/exist.vert", "does/not/exist.frag").unwrap_err();
        match error {
            ShaderError::Io { path, .. } => assert_eq!(path, PathBuf::from("does/not/exist.vert")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_sources_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let vertex = dir.path().join("basic.vert");
        let fragment = dir.path().join("basic.frag");
        fs::write(&vertex, "void main() {}").unwrap();
        fs::write(&fragment, "void main() { discard; }").unwrap();

        let source = ShaderSource::from_paths(&vertex, &fragment).unwrap();
        assert_eq!(source.stage(ShaderStage::Vertex), "void main() {}");
        assert_eq!(source.stage(ShaderStage::Fragment), "void main() { discard; }");
    }
}
