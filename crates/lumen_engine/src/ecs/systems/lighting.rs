//! Light gathering
//!
//! Collects every light in the scene into flat lists once per frame, so the
//! render system can replay them for each lit entity without touching the
//! world again.

use crate::ecs::components::{DirectionalLight, Material, PointLight, SpotLight, Transform};
use crate::ecs::World;
use crate::foundation::math::Vec3;
use crate::render::{ShaderProgram, UniformValue};

/// A point light resolved to a world position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedPointLight {
    /// World-space position of the owning entity
    pub position: Vec3,
    /// Light parameters
    pub light: PointLight,
}

/// A spot light resolved to a world position and aim
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedSpotLight {
    /// World-space position of the owning entity
    pub position: Vec3,
    /// World-space aim, see [`SpotLight::direction`]
    pub direction: Vec3,
    /// Light parameters
    pub light: SpotLight,
}

/// Every light in the scene at one point in time, in entity order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightEnvironment {
    /// Directional lights
    pub directional: Vec<DirectionalLight>,
    /// Point lights on entities with a transform
    pub point: Vec<PlacedPointLight>,
    /// Spot lights on entities with a transform
    pub spot: Vec<PlacedSpotLight>,
}

impl LightEnvironment {
    /// Empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached lights with the ones currently in `world`
    ///
    /// Only takes shared borrows, so it can run while a system holds
    /// exclusive borrows of unrelated components.
    pub fn gather(&mut self, world: &World) {
        self.directional.clear();
        self.point.clear();
        self.spot.clear();

        for light in &mut world.view::<&DirectionalLight>() {
            self.directional.push(*light);
        }
        for (transform, light) in &mut world.view::<(&Transform, &PointLight)>() {
            self.point.push(PlacedPointLight {
                position: transform.position,
                light: *light,
            });
        }
        for (transform, light) in &mut world.view::<(&Transform, &SpotLight)>() {
            self.spot.push(PlacedSpotLight {
                position: transform.position,
                direction: SpotLight::direction(transform),
                light: *light,
            });
        }

        log::trace!(
            "Gathered {} directional, {} point, {} spot lights",
            self.directional.len(),
            self.point.len(),
            self.spot.len()
        );
    }

    /// Total number of lights
    pub fn len(&self) -> usize {
        self.directional.len() + self.point.len() + self.spot.len()
    }

    /// Whether the scene has no lights
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Send the light counts and every light as indexed array elements
    pub fn upload(&self, shader: &mut dyn ShaderProgram) {
        shader.set_uniform("numberOfDirectionalLights", self.directional.len().into());
        for (index, light) in self.directional.iter().enumerate() {
            let name = "directionalLights";
            shader.set_array_uniform(name, "direction", index, light.to_light().into());
            shader.set_array_uniform(name, "color", index, light.color.to_vector().into());
            shader.set_array_uniform(name, "ambientStrength", index, light.ambient_strength.into());
        }

        shader.set_uniform("numberOfPointLights", self.point.len().into());
        for (index, placed) in self.point.iter().enumerate() {
            let name = "pointLights";
            shader.set_array_uniform(name, "position", index, placed.position.into());
            shader.set_array_uniform(name, "color", index, placed.light.color.to_vector().into());
            shader.set_array_uniform(name, "radius", index, placed.light.radius.into());
            shader.set_array_uniform(name, "ambientStrength", index, placed.light.ambient_strength.into());
        }

        shader.set_uniform("numberOfSpotLights", self.spot.len().into());
        for (index, placed) in self.spot.iter().enumerate() {
            let name = "spotLights";
            shader.set_array_uniform(name, "position", index, placed.position.into());
            shader.set_array_uniform(name, "direction", index, placed.direction.into());
            shader.set_array_uniform(name, "color", index, placed.light.color.to_vector().into());
            shader.set_array_uniform(name, "range", index, placed.light.range.into());
            shader.set_array_uniform(name, "angle", index, placed.light.angle.into());
            shader.set_array_uniform(name, "blurAngle", index, placed.light.blur_angle.into());
        }
    }
}

/// Bind a material's colors and exponent under the `material` struct uniform
pub(crate) fn upload_material(shader: &mut dyn ShaderProgram, material: &Material) {
    shader.set_uniform("material.ambient", UniformValue::from(material.ambient.to_vector()));
    shader.set_uniform("material.diffuse", UniformValue::from(material.diffuse.to_vector()));
    shader.set_uniform("material.specular", UniformValue::from(material.specular.to_vector()));
    shader.set_uniform("material.shininess", UniformValue::from(material.shininess));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Color, RecordingShader};

    #[test]
    fn test_gather_skips_positional_lights_without_transform() {
        let mut world = World::new();
        let sun = world.create_entity();
        world.add_component::<DirectionalLight>(sun).unwrap();

        let floating = world.create_entity();
        world.add_component::<PointLight>(floating).unwrap();

        let lamp = world.create_entity();
        world
            .insert_component(lamp, Transform::from_position(Vec3::new(0.0, 3.0, 0.0)))
            .unwrap();
        world.insert_component(lamp, PointLight::new(Color::RED, 5.0)).unwrap();

        let mut environment = LightEnvironment::new();
        environment.gather(&world);

        assert_eq!(environment.directional.len(), 1);
        assert_eq!(environment.point.len(), 1);
        assert_eq!(environment.point[0].position, Vec3::new(0.0, 3.0, 0.0));
        assert!(environment.spot.is_empty());
        assert_eq!(environment.len(), 2);
    }

    #[test]
    fn test_gather_replaces_previous_frame() {
        let mut world = World::new();
        let sun = world.create_entity();
        world.add_component::<DirectionalLight>(sun).unwrap();

        let mut environment = LightEnvironment::new();
        environment.gather(&world);
        environment.gather(&world);
        assert_eq!(environment.directional.len(), 1);
    }

    #[test]
    fn test_upload_with_no_lights_sends_zero_counts() {
        let mut shader = RecordingShader::new();
        let log = shader.log();
        LightEnvironment::new().upload(&mut shader);

        assert_eq!(
            log.uniform_names(),
            vec!["numberOfDirectionalLights", "numberOfPointLights", "numberOfSpotLights"]
        );
        assert_eq!(log.last_uniform("numberOfPointLights"), Some(UniformValue::Int(0)));
    }
}
