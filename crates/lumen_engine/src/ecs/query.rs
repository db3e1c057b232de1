//! Typed queries over the world
//!
//! A query names the component types it needs and how it accesses them:
//! `&T` for shared access, `&mut T` for exclusive access, and tuples of those
//! for several types at once.
//!
//! ```
//! use lumen_engine::ecs::{Component, World};
//!
//! #[derive(Default)]
//! struct Position(f32);
//! impl Component for Position {}
//!
//! #[derive(Default)]
//! struct Velocity(f32);
//! impl Component for Velocity {}
//!
//! let mut world = World::new();
//! let entity = world.create_entity();
//! world.add_component::<Position>(entity).unwrap();
//! world.insert_component(entity, Velocity(2.0)).unwrap();
//!
//! let mut moving = world.view::<(&mut Position, &Velocity)>();
//! for (position, velocity) in &mut moving {
//!     position.0 += velocity.0;
//! }
//! ```

use std::cell::{Ref, RefMut};

use super::{Component, Entity, SceneError, World};

/// Description of the components a view or system needs
pub trait Query {
    /// Borrow guards held for one matching entity while a view is alive
    type Guard<'w>;

    /// What iterating a view yields for one entity
    type Item<'g>;

    /// Whether `entity` owns every component this query touches
    fn matches(world: &World, entity: Entity) -> bool;

    /// Borrow the components of `entity`
    ///
    /// # Errors
    ///
    /// Fails when a component is missing or already borrowed incompatibly.
    fn fetch(world: &World, entity: Entity) -> Result<Self::Guard<'_>, SceneError>;

    /// Turn held guards into plain references
    fn item<'g>(guard: &'g mut Self::Guard<'_>) -> Self::Item<'g>;
}

/// Item type produced by query `Q`
pub type QueryItem<'g, Q> = <Q as Query>::Item<'g>;

impl<'q, T: Component> Query for &'q T {
    type Guard<'w> = Ref<'w, T>;
    type Item<'g> = &'g T;

    fn matches(world: &World, entity: Entity) -> bool {
        world.has_component::<T>(entity)
    }

    fn fetch(world: &World, entity: Entity) -> Result<Ref<'_, T>, SceneError> {
        world.borrow_component::<T>(entity)
    }

    fn item<'g>(guard: &'g mut Ref<'_, T>) -> &'g T {
        guard
    }
}

impl<'q, T: Component> Query for &'q mut T {
    type Guard<'w> = RefMut<'w, T>;
    type Item<'g> = &'g mut T;

    fn matches(world: &World, entity: Entity) -> bool {
        world.has_component::<T>(entity)
    }

    fn fetch(world: &World, entity: Entity) -> Result<RefMut<'_, T>, SceneError> {
        world.borrow_component_mut::<T>(entity)
    }

    fn item<'g>(guard: &'g mut RefMut<'_, T>) -> &'g mut T {
        guard
    }
}

macro_rules! impl_query_tuple {
    ($($name:ident),+) => {
        impl<$($name: Query),+> Query for ($($name,)+) {
            type Guard<'w> = ($($name::Guard<'w>,)+);
            type Item<'g> = ($($name::Item<'g>,)+);

            fn matches(world: &World, entity: Entity) -> bool {
                $($name::matches(world, entity))&&+
            }

            fn fetch(world: &World, entity: Entity) -> Result<Self::Guard<'_>, SceneError> {
                Ok(($($name::fetch(world, entity)?,)+))
            }

            #[allow(non_snake_case)]
            fn item<'g>(guard: &'g mut Self::Guard<'_>) -> Self::Item<'g> {
                let ($($name,)+) = guard;
                ($($name::item($name),)+)
            }
        }
    };
}

impl_query_tuple!(A);
impl_query_tuple!(A, B);
impl_query_tuple!(A, B, C);
impl_query_tuple!(A, B, C, D);
impl_query_tuple!(A, B, C, D, E);
impl_query_tuple!(A, B, C, D, E, F);

/// Result of a query: the matching entities and their borrowed components.
///
/// A view is a snapshot. Entities or components added after it was taken do
/// not show up in it; take a new view to see them. The borrows it holds are
/// released when the view is dropped.
pub struct View<'w, Q: Query> {
    entities: Vec<Entity>,
    guards: Vec<Q::Guard<'w>>,
}

impl<'w, Q: Query> View<'w, Q> {
    pub(super) fn new(entities: Vec<Entity>, guards: Vec<Q::Guard<'w>>) -> Self {
        Self { entities, guards }
    }

    /// Number of matching entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether nothing matched
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Matching entities in creation order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Components of the `index`-th matching entity
    pub fn get_mut(&mut self, index: usize) -> Option<Q::Item<'_>> {
        self.guards.get_mut(index).map(Q::item)
    }

    /// Iterate the matching components in creation order
    pub fn iter_mut(&mut self) -> ViewIterMut<'_, 'w, Q> {
        ViewIterMut {
            guards: self.guards.iter_mut(),
        }
    }
}

impl<'v, 'w, Q: Query> IntoIterator for &'v mut View<'w, Q> {
    type Item = Q::Item<'v>;
    type IntoIter = ViewIterMut<'v, 'w, Q>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Iterator over the items of a [`View`]
pub struct ViewIterMut<'v, 'w, Q: Query> {
    guards: std::slice::IterMut<'v, Q::Guard<'w>>,
}

impl<'v, 'w, Q: Query> Iterator for ViewIterMut<'v, 'w, Q> {
    type Item = Q::Item<'v>;

    fn next(&mut self) -> Option<Self::Item> {
        self.guards.next().map(Q::item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.guards.size_hint()
    }
}

impl<Q: Query> ExactSizeIterator for ViewIterMut<'_, '_, Q> {}
