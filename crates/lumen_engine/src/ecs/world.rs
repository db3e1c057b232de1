//! ECS World: entity bookkeeping and component storage
//!
//! The world knows nothing about systems. [`Scene`](super::Scene) wraps it
//! and adds system registration and dispatch on top.

use std::any::{type_name, TypeId};
use std::cell::{Ref, RefMut};
use std::collections::HashMap;

use thiserror::Error;

use super::query::{Query, View};
use super::storage::{ComponentColumn, ErasedColumn};
use super::{Component, ComponentSet, Entity};

/// Errors raised by entity and component operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The entity was never created or has been deleted
    #[error("{0} does not exist")]
    EntityNotFound(Entity),

    /// The entity has no component of the requested type
    #[error("{entity} has no {component} component")]
    ComponentNotFound {
        /// Entity that was queried
        entity: Entity,
        /// Requested component type
        component: &'static str,
    },

    /// The entity already owns a component of this type
    #[error("{entity} already has a {component} component")]
    DuplicateComponent {
        /// Entity that was targeted
        entity: Entity,
        /// Component type being added
        component: &'static str,
    },

    /// A component is already borrowed in a way that conflicts with this access
    #[error("{component} of {entity} is already borrowed")]
    BorrowConflict {
        /// Owner of the contested component
        entity: Entity,
        /// Contested component type
        component: &'static str,
    },
}

/// ECS World containing all entities and components
pub struct World {
    next_entity_id: u64,
    entities: Vec<Entity>,
    columns: HashMap<TypeId, Box<dyn ErasedColumn>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            next_entity_id: 0,
            entities: Vec::new(),
            columns: HashMap::new(),
        }
    }

    /// Create a new entity with the next unused id
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity::new(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.push(entity);
        log::trace!("Created {entity}");
        entity
    }

    /// Whether `entity` is alive
    pub fn exists(&self, entity: Entity) -> bool {
        // Ids grow monotonically, so the live list stays sorted.
        self.entities.binary_search(&entity).is_ok()
    }

    /// Live entities in creation order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of stored components of type `T`
    pub fn component_count<T: Component>(&self) -> usize {
        self.columns
            .get(&TypeId::of::<T>())
            .map_or(0, |column| column.len())
    }

    /// Attach `value` to `entity` and return it for further setup
    ///
    /// # Errors
    ///
    /// [`SceneError::EntityNotFound`] for dead entities and
    /// [`SceneError::DuplicateComponent`] when a `T` is already attached.
    pub fn insert_component<T: Component>(
        &mut self,
        entity: Entity,
        value: T,
    ) -> Result<&mut T, SceneError> {
        if !self.exists(entity) {
            return Err(SceneError::EntityNotFound(entity));
        }
        if self.has_component::<T>(entity) {
            return Err(SceneError::DuplicateComponent {
                entity,
                component: type_name::<T>(),
            });
        }

        log::trace!("Adding {} to {entity}", type_name::<T>());
        Ok(self.column_or_insert::<T>().insert(entity, value))
    }

    /// Attach a default-initialized `T` to `entity`
    ///
    /// # Errors
    ///
    /// Same as [`World::insert_component`].
    pub fn add_component<T: Component + Default>(
        &mut self,
        entity: Entity,
    ) -> Result<&mut T, SceneError> {
        self.insert_component(entity, T::default())
    }

    /// Whether `entity` owns a `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.columns
            .get(&TypeId::of::<T>())
            .is_some_and(|column| column.contains(entity))
    }

    /// Whether `entity` owns every component type in `S`
    pub fn has_components<S: ComponentSet>(&self, entity: Entity) -> bool {
        S::contained_in(self, entity)
    }

    /// Exclusive access to the `T` owned by `entity`
    ///
    /// # Errors
    ///
    /// [`SceneError::ComponentNotFound`] when the entity has no `T`.
    pub fn get_component<T: Component>(&mut self, entity: Entity) -> Result<&mut T, SceneError> {
        self.column_mut::<T>()
            .and_then(|column| column.get_mut(entity))
            .ok_or(SceneError::ComponentNotFound {
                entity,
                component: type_name::<T>(),
            })
    }

    /// Shared borrow of the `T` owned by `entity`, usable while other views are alive
    ///
    /// # Errors
    ///
    /// [`SceneError::ComponentNotFound`] or, if the component is mutably
    /// borrowed elsewhere, [`SceneError::BorrowConflict`].
    pub fn borrow_component<T: Component>(&self, entity: Entity) -> Result<Ref<'_, T>, SceneError> {
        self.cell::<T>(entity)?
            .try_borrow()
            .map_err(|_| SceneError::BorrowConflict {
                entity,
                component: type_name::<T>(),
            })
    }

    /// Mutable borrow of the `T` owned by `entity` through a shared world
    ///
    /// # Errors
    ///
    /// [`SceneError::ComponentNotFound`] or, if the component is borrowed
    /// elsewhere, [`SceneError::BorrowConflict`].
    pub fn borrow_component_mut<T: Component>(
        &self,
        entity: Entity,
    ) -> Result<RefMut<'_, T>, SceneError> {
        self.cell::<T>(entity)?
            .try_borrow_mut()
            .map_err(|_| SceneError::BorrowConflict {
                entity,
                component: type_name::<T>(),
            })
    }

    /// Snapshot of every live entity matching `Q`, in creation order
    ///
    /// # Panics
    ///
    /// Panics if `Q` conflicts with a borrow that is still alive, e.g. asking
    /// for `&mut T` while another view reads `T`. Use [`World::try_view`] to
    /// get an error instead.
    pub fn view<Q: Query>(&self) -> View<'_, Q> {
        match self.try_view::<Q>() {
            Ok(view) => view,
            Err(error) => panic!("view failed: {error}"),
        }
    }

    /// Fallible form of [`World::view`]
    ///
    /// # Errors
    ///
    /// [`SceneError::BorrowConflict`] when a matching component is already
    /// borrowed incompatibly.
    pub fn try_view<Q: Query>(&self) -> Result<View<'_, Q>, SceneError> {
        let mut entities = Vec::new();
        let mut guards = Vec::new();
        for &entity in &self.entities {
            if Q::matches(self, entity) {
                guards.push(Q::fetch(self, entity)?);
                entities.push(entity);
            }
        }
        Ok(View::new(entities, guards))
    }

    /// Remove `entity` and everything it owns; returns false if it was not alive
    pub(crate) fn despawn(&mut self, entity: Entity) -> bool {
        let Ok(position) = self.entities.binary_search(&entity) else {
            return false;
        };

        for column in self.columns.values_mut() {
            if column.remove_owner(entity) {
                log::trace!("Removed {} from {entity}", column.component_name());
            }
        }
        self.entities.remove(position);
        true
    }

    fn cell<T: Component>(&self, entity: Entity) -> Result<&std::cell::RefCell<T>, SceneError> {
        self.columns
            .get(&TypeId::of::<T>())
            .and_then(|column| column.as_any().downcast_ref::<ComponentColumn<T>>())
            .and_then(|column| column.cell(entity))
            .ok_or(SceneError::ComponentNotFound {
                entity,
                component: type_name::<T>(),
            })
    }

    fn column_mut<T: Component>(&mut self) -> Option<&mut ComponentColumn<T>> {
        self.columns
            .get_mut(&TypeId::of::<T>())
            .and_then(|column| column.as_any_mut().downcast_mut::<ComponentColumn<T>>())
    }

    fn column_or_insert<T: Component>(&mut self) -> &mut ComponentColumn<T> {
        let column = self
            .columns
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(ComponentColumn::<T>::new()));

        match column.as_any_mut().downcast_mut::<ComponentColumn<T>>() {
            Some(column) => column,
            None => unreachable!("column registered under the TypeId of another component"),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Position(f32);
    impl Component for Position {}

    #[derive(Debug, Default, PartialEq)]
    struct Tag;
    impl Component for Tag {}

    #[test]
    fn test_created_entities_are_distinct_and_alive() {
        let mut world = World::new();
        let entities: Vec<_> = (0..5).map(|_| world.create_entity()).collect();

        for (i, a) in entities.iter().enumerate() {
            assert!(world.exists(*a));
            for b in &entities[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(world.entity_count(), 5);
    }

    #[test]
    fn test_ids_are_not_reused_after_despawn() {
        let mut world = World::new();
        let first = world.create_entity();
        assert!(world.despawn(first));

        let second = world.create_entity();
        assert!(second.id() > first.id());
        assert!(!world.exists(first));
    }

    #[test]
    fn test_add_component_to_dead_entity_is_rejected() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.despawn(entity);

        assert_eq!(
            world.add_component::<Position>(entity).unwrap_err(),
            SceneError::EntityNotFound(entity)
        );
        assert_eq!(world.component_count::<Position>(), 0);
    }

    #[test]
    fn test_duplicate_component_is_rejected() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.insert_component(entity, Position(1.0)).unwrap();

        assert!(matches!(
            world.add_component::<Position>(entity),
            Err(SceneError::DuplicateComponent { .. })
        ));
        assert_eq!(world.get_component::<Position>(entity).unwrap(), &Position(1.0));
    }

    #[test]
    fn test_get_missing_component_fails() {
        let mut world = World::new();
        let entity = world.create_entity();

        assert!(matches!(
            world.get_component::<Position>(entity),
            Err(SceneError::ComponentNotFound { .. })
        ));
    }

    #[test]
    fn test_has_components_is_logical_and() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component::<Position>(entity).unwrap();

        assert!(world.has_components::<(Position,)>(entity));
        assert!(!world.has_components::<(Position, Tag)>(entity));

        world.add_component::<Tag>(entity).unwrap();
        assert!(world.has_components::<(Position, Tag)>(entity));
    }

    #[test]
    fn test_conflicting_borrows_are_reported() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component::<Position>(entity).unwrap();

        let reading = world.borrow_component::<Position>(entity).unwrap();
        assert!(matches!(
            world.borrow_component_mut::<Position>(entity),
            Err(SceneError::BorrowConflict { .. })
        ));
        assert!(world.borrow_component::<Position>(entity).is_ok());
        drop(reading);

        assert!(world.borrow_component_mut::<Position>(entity).is_ok());
    }
}
