//! Scene: a world plus the systems that run over it

use std::any::type_name;

use super::query::{Query, View};
use super::system::{AnySystem, SystemEntry};
use super::{Component, ComponentSet, Entity, SceneError, System, World};
use crate::context::FrameContext;

/// Owner of entities, components and registered systems.
///
/// Systems run in the order they were registered, and each system visits
/// entities in creation order, so a frame always plays out the same way for
/// the same scene.
///
/// ```
/// use lumen_engine::context::FrameContext;
/// use lumen_engine::ecs::{Component, QueryItem, Scene, System};
/// use lumen_engine::ecs::components::Transform;
///
/// #[derive(Default)]
/// struct Drift;
/// impl Component for Drift {}
///
/// #[derive(Default)]
/// struct DriftSystem;
///
/// impl System for DriftSystem {
///     type Query = (&'static mut Transform, &'static Drift);
///
///     fn update(&mut self, context: &mut FrameContext, item: QueryItem<'_, Self::Query>) {
///         let (transform, _) = item;
///         transform.position[0] += context.delta_time();
///     }
/// }
///
/// let mut scene = Scene::new();
/// let entity = scene.new_entity();
/// scene.add_component::<Transform>(entity).unwrap();
/// scene.add_component::<Drift>(entity).unwrap();
/// scene.register_system::<DriftSystem>();
///
/// let mut context = FrameContext::default();
/// context.set_delta_time(0.25);
/// scene.update_systems(&mut context).unwrap();
/// assert_eq!(scene.get_component::<Transform>(entity).unwrap().position[0], 0.25);
/// ```
#[derive(Default)]
pub struct Scene {
    world: World,
    systems: Vec<Box<dyn AnySystem>>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new entity
    pub fn new_entity(&mut self) -> Entity {
        let entity = self.world.create_entity();
        log::debug!("Scene created {entity}");
        entity
    }

    /// Whether `entity` is alive
    pub fn exists(&self, entity: Entity) -> bool {
        self.world.exists(entity)
    }

    /// Attach a default-initialized `T` to `entity`
    ///
    /// # Errors
    ///
    /// See [`World::insert_component`].
    pub fn add_component<T: Component + Default>(
        &mut self,
        entity: Entity,
    ) -> Result<&mut T, SceneError> {
        self.world.add_component::<T>(entity)
    }

    /// Attach `value` to `entity`
    ///
    /// # Errors
    ///
    /// See [`World::insert_component`].
    pub fn insert_component<T: Component>(
        &mut self,
        entity: Entity,
        value: T,
    ) -> Result<&mut T, SceneError> {
        self.world.insert_component(entity, value)
    }

    /// Whether `entity` owns a `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.world.has_component::<T>(entity)
    }

    /// Whether `entity` owns every type in `S`
    pub fn has_components<S: ComponentSet>(&self, entity: Entity) -> bool {
        self.world.has_components::<S>(entity)
    }

    /// Exclusive access to the `T` owned by `entity`
    ///
    /// # Errors
    ///
    /// [`SceneError::ComponentNotFound`] when there is none.
    pub fn get_component<T: Component>(&mut self, entity: Entity) -> Result<&mut T, SceneError> {
        self.world.get_component::<T>(entity)
    }

    /// Snapshot view over the scene, see [`World::view`]
    pub fn view<Q: Query>(&self) -> View<'_, Q> {
        self.world.view::<Q>()
    }

    /// Fallible view, see [`World::try_view`]
    ///
    /// # Errors
    ///
    /// [`SceneError::BorrowConflict`] on incompatible outstanding borrows.
    pub fn try_view<Q: Query>(&self) -> Result<View<'_, Q>, SceneError> {
        self.world.try_view::<Q>()
    }

    /// The underlying world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Delete `entity`.
    ///
    /// Every registered system that matches the entity gets its `destroy`
    /// hook called first, in registration order; only then are the
    /// components removed.
    ///
    /// # Errors
    ///
    /// [`SceneError::EntityNotFound`] if the entity is not alive.
    pub fn delete_entity(&mut self, entity: Entity) -> Result<(), SceneError> {
        if !self.world.exists(entity) {
            return Err(SceneError::EntityNotFound(entity));
        }

        for system in &mut self.systems {
            if system.applies_to(&self.world, entity) {
                log::trace!("{} destroying {entity}", system.name());
                system.run_destroy(&self.world, entity)?;
            }
        }

        self.world.despawn(entity);
        log::debug!("Scene deleted {entity}");
        Ok(())
    }

    /// Register a default-constructed `S`
    pub fn register_system<S: System + Default>(&mut self) {
        self.add_system(S::default());
    }

    /// Register an already configured system
    pub fn add_system<S: System>(&mut self, system: S) {
        log::debug!("Registered system {}", type_name::<S>());
        self.systems.push(Box::new(SystemEntry::new(system)));
    }

    /// Number of registered systems
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Run every system's setup hooks
    ///
    /// # Errors
    ///
    /// Propagates borrow conflicts raised while building a system's view.
    pub fn setup_systems(&mut self, context: &mut FrameContext) -> Result<(), SceneError> {
        for system in &mut self.systems {
            log::trace!("Setting up {}", system.name());
            system.run_setup(context, &self.world)?;
        }
        Ok(())
    }

    /// Run every system's update hooks for one frame
    ///
    /// # Errors
    ///
    /// Propagates borrow conflicts raised while building a system's view.
    pub fn update_systems(&mut self, context: &mut FrameContext) -> Result<(), SceneError> {
        for system in &mut self.systems {
            system.run_update(context, &self.world)?;
        }
        Ok(())
    }
}
