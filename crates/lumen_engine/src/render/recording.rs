//! In-memory shader backend
//!
//! [`RecordingShader`] implements [`ShaderProgram`] by writing every call to a
//! shared [`ShaderLog`]. It backs the headless demo and lets tests assert on
//! exactly what a render system sent to the GPU.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{Model, ShaderCompiler, ShaderError, ShaderProgram, ShaderSource, ShaderStage, UniformValue};

/// One recorded call
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderCall {
    /// `bind()`
    Bind,
    /// `set_uniform(name, value)`
    Uniform {
        /// Fully expanded parameter name
        name: String,
        /// Bound value
        value: UniformValue,
    },
    /// `draw(model)`
    Draw {
        /// Vertices in the drawn model
        vertex_count: usize,
    },
}

/// Shared, cloneable view of the calls recorded by one or more shaders
#[derive(Debug, Clone, Default)]
pub struct ShaderLog {
    calls: Arc<Mutex<Vec<ShaderCall>>>,
}

impl ShaderLog {
    /// Empty log
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ShaderCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, call: ShaderCall) {
        self.lock().push(call);
    }

    /// Copy of every call so far
    pub fn calls(&self) -> Vec<ShaderCall> {
        self.lock().clone()
    }

    /// Remove and return every call so far
    pub fn take(&self) -> Vec<ShaderCall> {
        std::mem::take(&mut *self.lock())
    }

    /// Names of the uniforms set so far, in order
    pub fn uniform_names(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                ShaderCall::Uniform { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Most recent value bound to `name`
    pub fn last_uniform(&self, name: &str) -> Option<UniformValue> {
        self.lock().iter().rev().find_map(|call| match call {
            ShaderCall::Uniform { name: recorded, value } if recorded == name => Some(*value),
            _ => None,
        })
    }

    /// Number of draw calls so far
    pub fn draw_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|call| matches!(call, ShaderCall::Draw { .. }))
            .count()
    }
}

/// Shader program that records instead of rendering
#[derive(Debug, Clone, Default)]
pub struct RecordingShader {
    log: ShaderLog,
}

impl RecordingShader {
    /// Shader writing to a fresh log
    pub fn new() -> Self {
        Self::default()
    }

    /// Shader writing to an existing log, so several shaders can share one
    pub fn with_log(log: ShaderLog) -> Self {
        Self { log }
    }

    /// Handle to this shader's log
    pub fn log(&self) -> ShaderLog {
        self.log.clone()
    }
}

impl ShaderProgram for RecordingShader {
    fn bind(&mut self) {
        self.log.push(ShaderCall::Bind);
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.log.push(ShaderCall::Uniform {
            name: name.to_owned(),
            value,
        });
    }

    fn draw(&mut self, model: &Model) {
        self.log.push(ShaderCall::Draw {
            vertex_count: model.vertex_count(),
        });
    }
}

/// Compiler producing [`RecordingShader`]s that all write to one log
///
/// Sources are only checked for being non-empty.
#[derive(Debug, Clone, Default)]
pub struct RecordingCompiler {
    log: ShaderLog,
}

impl RecordingCompiler {
    /// Compiler whose programs write to `log`
    pub fn new(log: ShaderLog) -> Self {
        Self { log }
    }
}

impl ShaderCompiler for RecordingCompiler {
    fn compile(&mut self, source: &ShaderSource) -> Result<Box<dyn ShaderProgram>, ShaderError> {
        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            if source.stage(stage).trim().is_empty() {
                return Err(ShaderError::Compile {
                    stage,
                    log: "empty source".to_owned(),
                });
            }
        }
        Ok(Box::new(RecordingShader::with_log(self.log.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Color;

    #[test]
    fn test_calls_are_recorded_in_order() {
        let mut shader = RecordingShader::new();
        let log = shader.log();

        shader.bind();
        shader.set_uniform("lightable", true.into());
        shader.set_array_uniform("pointLights", "radius", 1, 2.5_f32.into());
        shader.draw(&Model::solid_cube(Color::WHITE));

        assert_eq!(
            log.calls(),
            vec![
                ShaderCall::Bind,
                ShaderCall::Uniform {
                    name: "lightable".to_owned(),
                    value: UniformValue::Bool(true),
                },
                ShaderCall::Uniform {
                    name: "pointLights[1].radius".to_owned(),
                    value: UniformValue::Float(2.5),
                },
                ShaderCall::Draw { vertex_count: 36 },
            ]
        );
        assert_eq!(log.last_uniform("pointLights[1].radius"), Some(UniformValue::Float(2.5)));
    }

    #[test]
    fn test_take_clears_the_log() {
        let mut shader = RecordingShader::new();
        let log = shader.log();
        shader.bind();

        assert_eq!(log.take().len(), 1);
        assert!(log.calls().is_empty());
    }

    #[test]
    fn test_compiler_rejects_empty_stage() {
        let mut compiler = RecordingCompiler::default();
        let error = compiler.compile(&ShaderSource::new("void main() {}", "  ")).err();
        assert!(matches!(
            error,
            Some(ShaderError::Compile { stage: ShaderStage::Fragment, .. })
        ));
        assert!(compiler.compile(&ShaderSource::new("a", "b")).is_ok());
    }
}
