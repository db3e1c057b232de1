//! Light components
//!
//! Directional lights only carry a direction. Point and spot lights take
//! their position (and for spot lights their aim) from the entity's
//! [`Transform`], so they are only picked up by the render system on
//! entities that have one.

use serde::{Deserialize, Serialize};

use super::Transform;
use crate::ecs::Component;
use crate::foundation::math::{constants, Vec3, Vec4};
use crate::render::Color;

/// Ambient contribution every light type starts with
pub const DEFAULT_AMBIENT_STRENGTH: f32 = 0.1;

/// Parallel rays from infinitely far away
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    /// Direction the light travels in
    pub direction: Vec3,
    /// Light color
    pub color: Color,
    /// Fraction of `color` applied everywhere regardless of facing
    pub ambient_strength: f32,
}

impl Component for DirectionalLight {}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, -1.0, 0.0),
            color: Color::WHITE,
            ambient_strength: DEFAULT_AMBIENT_STRENGTH,
        }
    }
}

impl DirectionalLight {
    /// Light travelling along `direction`
    pub fn new(direction: Vec3, color: Color) -> Self {
        Self {
            direction,
            color,
            ..Self::default()
        }
    }

    /// Unit vector pointing from a surface back towards the light
    pub fn to_light(&self) -> Vec3 {
        (-self.direction).normalized()
    }
}

/// Omnidirectional light at its entity's position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    /// Light color
    pub color: Color,
    /// Distance the light reaches
    pub radius: f32,
    /// Fraction of `color` applied everywhere regardless of facing
    pub ambient_strength: f32,
}

impl Component for PointLight {}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            radius: 1.0,
            ambient_strength: DEFAULT_AMBIENT_STRENGTH,
        }
    }
}

impl PointLight {
    /// Point light with a color and reach
    pub fn new(color: Color, radius: f32) -> Self {
        Self {
            color,
            radius,
            ..Self::default()
        }
    }
}

/// Cone of light from its entity's position along the entity's -Z axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotLight {
    /// Light color
    pub color: Color,
    /// Distance the light reaches
    pub range: f32,
    /// Full cone angle in radians
    pub angle: f32,
    /// Width of the soft edge in radians
    pub blur_angle: f32,
    /// Fraction of `color` applied everywhere regardless of facing
    pub ambient_strength: f32,
}

impl Component for SpotLight {}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            range: 1.0,
            angle: constants::HALF_PI,
            blur_angle: 0.0,
            ambient_strength: DEFAULT_AMBIENT_STRENGTH,
        }
    }
}

impl SpotLight {
    /// Spot light with a color, reach and cone angle
    pub fn new(color: Color, range: f32, angle: f32) -> Self {
        Self {
            color,
            range,
            angle,
            ..Self::default()
        }
    }

    /// Builder pattern: set the soft edge width
    #[must_use]
    pub fn with_blur(mut self, blur_angle: f32) -> Self {
        self.blur_angle = blur_angle;
        self
    }

    /// World-space aim of a spot light placed by `transform`
    ///
    /// The orientation matrix is applied to the homogeneous point
    /// `(0, 0, -1, 1)` and the result truncated, matching what shaders expect.
    pub fn direction(transform: &Transform) -> Vec3 {
        (transform.orientation.to_matrix() * Vec4::new(0.0, 0.0, -1.0, 1.0)).truncate::<3>()
    }
}
