//! Renderable component
//!
//! Everything the render system needs to draw an entity: geometry, surface
//! material, and the shader program that receives the draw parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ecs::Component;
use crate::render::{Color, Model, ShaderProgram};

/// Phong surface parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Color reflected from ambient light
    pub ambient: Color,
    /// Color reflected from direct light
    pub diffuse: Color,
    /// Highlight color
    pub specular: Color,
    /// Specular exponent; higher is tighter
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Color::WHITE,
            diffuse: Color::WHITE,
            specular: Color::WHITE,
            shininess: 1.0,
        }
    }
}

impl Material {
    /// Ambient and diffuse set to `color`, white highlights
    pub fn from_color(color: Color) -> Self {
        Self {
            ambient: color,
            diffuse: color,
            ..Self::default()
        }
    }

    /// Builder pattern: set the specular exponent
    #[must_use]
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }
}

/// Drawable entity data
pub struct Renderable {
    /// Geometry to draw
    pub model: Model,
    /// Surface parameters, only sent when `lightable`
    pub material: Material,
    /// Program that receives uniforms and draws `model`
    pub shader: Box<dyn ShaderProgram>,
    /// Whether lights in the scene affect this entity
    pub lightable: bool,
}

impl Component for Renderable {}

impl Renderable {
    /// Lit renderable with the default material
    pub fn new(model: Model, shader: impl ShaderProgram + 'static) -> Self {
        Self::from_program(model, Box::new(shader))
    }

    /// Lit renderable drawn by an already boxed program, e.g. one returned
    /// by a [`ShaderCompiler`](crate::render::ShaderCompiler)
    pub fn from_program(model: Model, shader: Box<dyn ShaderProgram>) -> Self {
        Self {
            model,
            material: Material::default(),
            shader,
            lightable: true,
        }
    }

    /// Builder pattern: set the material
    #[must_use]
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Builder pattern: opt out of lighting
    #[must_use]
    pub fn unlit(mut self) -> Self {
        self.lightable = false;
        self
    }
}

impl fmt::Debug for Renderable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderable")
            .field("vertex_count", &self.model.vertex_count())
            .field("material", &self.material)
            .field("lightable", &self.lightable)
            .finish_non_exhaustive()
    }
}
