//! Rendering boundary
//!
//! The camera, colors and geometry are plain CPU-side data. GPU programs are
//! reached only through the [`ShaderProgram`] trait; [`RecordingShader`] is
//! the in-crate backend used headless and in tests.

pub mod camera;
pub mod color;
pub mod model;
pub mod recording;
pub mod shader;

pub use camera::Camera;
pub use color::Color;
pub use model::{Model, ModelError, CUBE_VERTEX_COUNT};
pub use recording::{RecordingCompiler, RecordingShader, ShaderCall, ShaderLog};
pub use shader::{
    array_uniform_name, ShaderCompiler, ShaderError, ShaderProgram, ShaderSource, ShaderStage,
    UniformValue,
};
