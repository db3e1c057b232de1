//! System trait and type-erased dispatch
//!
//! A system declares the components it works on through its `Query` type.
//! The scene only ever sees systems through [`AnySystem`], which lets it keep
//! systems of different types in one registration-ordered list.

use std::any::type_name;
use std::collections::HashSet;

use super::query::{Query, QueryItem, View};
use super::{Entity, SceneError, World};
use crate::context::FrameContext;

/// Logic that runs over every entity matching `Self::Query`
///
/// All hooks have empty defaults; implement the ones you need.
///
/// - `setup_all` / `update_all` run once per dispatch with the whole view.
/// - `setup` runs once for each matching entity, `update` on every dispatch.
/// - `destroy` runs when a matching entity is deleted, before its
///   components are removed.
pub trait System: 'static {
    /// Components this system requires, e.g. `(&'static mut Transform, &'static Spinner)`
    type Query: Query;

    /// Once per matching entity, before its first `update`
    fn setup(&mut self, _context: &mut FrameContext, _item: QueryItem<'_, Self::Query>) {}

    /// Every frame, for every matching entity
    fn update(&mut self, _context: &mut FrameContext, _item: QueryItem<'_, Self::Query>) {}

    /// When a matching entity is deleted
    fn destroy(&mut self, _item: QueryItem<'_, Self::Query>) {}

    /// Once per `setup_systems`, before the per-entity `setup` calls
    fn setup_all(
        &mut self,
        _context: &mut FrameContext,
        _view: &mut View<'_, Self::Query>,
        _world: &World,
    ) {
    }

    /// Every frame, before the per-entity `update` calls
    fn update_all(
        &mut self,
        _context: &mut FrameContext,
        _view: &mut View<'_, Self::Query>,
        _world: &World,
    ) {
    }
}

/// Object-safe face of a registered system
pub(crate) trait AnySystem {
    fn name(&self) -> &'static str;
    fn applies_to(&self, world: &World, entity: Entity) -> bool;
    fn run_setup(&mut self, context: &mut FrameContext, world: &World) -> Result<(), SceneError>;
    fn run_update(&mut self, context: &mut FrameContext, world: &World) -> Result<(), SceneError>;
    /// Callers check `applies_to` first
    fn run_destroy(&mut self, world: &World, entity: Entity) -> Result<(), SceneError>;
}

/// A system plus the entities it has already set up
pub(crate) struct SystemEntry<S> {
    system: S,
    initialized: HashSet<Entity>,
}

impl<S: System> SystemEntry<S> {
    pub(crate) fn new(system: S) -> Self {
        Self {
            system,
            initialized: HashSet::new(),
        }
    }
}

impl<S: System> AnySystem for SystemEntry<S> {
    fn name(&self) -> &'static str {
        type_name::<S>()
    }

    fn applies_to(&self, world: &World, entity: Entity) -> bool {
        <S::Query as Query>::matches(world, entity)
    }

    fn run_setup(&mut self, context: &mut FrameContext, world: &World) -> Result<(), SceneError> {
        let mut view = world.try_view::<S::Query>()?;
        self.system.setup_all(context, &mut view, world);

        self.initialized.extend(view.entities().iter().copied());
        for item in &mut view {
            self.system.setup(context, item);
        }
        Ok(())
    }

    fn run_update(&mut self, context: &mut FrameContext, world: &World) -> Result<(), SceneError> {
        let mut view = world.try_view::<S::Query>()?;
        self.system.update_all(context, &mut view, world);

        for index in 0..view.len() {
            let entity = view.entities()[index];
            // Entities that started matching after setup_systems get their setup now.
            if self.initialized.insert(entity) {
                if let Some(item) = view.get_mut(index) {
                    self.system.setup(context, item);
                }
            }
            if let Some(item) = view.get_mut(index) {
                self.system.update(context, item);
            }
        }
        Ok(())
    }

    fn run_destroy(&mut self, world: &World, entity: Entity) -> Result<(), SceneError> {
        let mut guard = <S::Query as Query>::fetch(world, entity)?;
        self.system.destroy(<S::Query as Query>::item(&mut guard));
        self.initialized.remove(&entity);
        Ok(())
    }
}
