//! # Render System
//!
//! Draws every entity that has both a [`Transform`] and a [`Renderable`].
//! Lights are gathered once per frame in `update_all`; each entity then gets
//! its parameters bound and a draw issued, in this order:
//!
//! 1. `bind`
//! 2. `model`, `combined`, `viewPosition`, `lightable`
//! 3. when lightable: `material.*` followed by the directional, point and
//!    spot light arrays with their counts
//! 4. `draw`

use crate::context::FrameContext;
use crate::ecs::components::{Renderable, Transform};
use crate::ecs::query::{QueryItem, View};
use crate::ecs::{System, World};

use super::lighting::{upload_material, LightEnvironment};

/// Near clip distance used unless configured otherwise
pub const DEFAULT_NEAR: f32 = 0.1;

/// Far clip distance used unless configured otherwise
pub const DEFAULT_FAR: f32 = 100.0;

/// System that sends per-entity draw parameters to each renderable's shader
#[derive(Debug, Clone)]
pub struct RenderSystem {
    near: f32,
    far: f32,
    lights: LightEnvironment,
}

impl Default for RenderSystem {
    fn default() -> Self {
        Self::new(DEFAULT_NEAR, DEFAULT_FAR)
    }
}

impl RenderSystem {
    /// Render system projecting with the given clip distances
    pub fn new(near: f32, far: f32) -> Self {
        Self {
            near,
            far,
            lights: LightEnvironment::new(),
        }
    }

    /// Near clip distance
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far clip distance
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Lights gathered for the current frame
    pub fn lights(&self) -> &LightEnvironment {
        &self.lights
    }
}

impl System for RenderSystem {
    type Query = (&'static Transform, &'static mut Renderable);

    fn update_all(
        &mut self,
        _context: &mut FrameContext,
        _view: &mut View<'_, Self::Query>,
        world: &World,
    ) {
        self.lights.gather(world);
    }

    fn update(&mut self, context: &mut FrameContext, item: QueryItem<'_, Self::Query>) {
        let (transform, renderable) = item;
        let camera = &context.camera;
        let combined = camera.combined_matrix(context.aspect_ratio(), self.near, self.far);
        let shader = renderable.shader.as_mut();

        shader.bind();
        shader.set_uniform("model", transform.to_matrix().into());
        shader.set_uniform("combined", combined.into());
        shader.set_uniform("viewPosition", camera.position.into());
        shader.set_uniform("lightable", renderable.lightable.into());

        if renderable.lightable {
            upload_material(shader, &renderable.material);
            self.lights.upload(shader);
        }

        shader.draw(&renderable.model);
    }
}
