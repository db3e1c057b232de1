//! Per-type component columns
//!
//! Each component type gets its own sparse set: a dense vector of
//! `(owner, value)` pairs plus an index from owner to slot. Every value sits
//! in its own `RefCell`, so a view can hand out mutable access to one type
//! while other views read different types (or other entities) at the same
//! time. The world keeps the columns type-erased behind [`ErasedColumn`].

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;

use super::{Component, Entity};

/// Storage for every instance of one component type
pub(crate) struct ComponentColumn<T> {
    index: HashMap<Entity, usize>,
    entries: Vec<(Entity, RefCell<T>)>,
}

impl<T: Component> ComponentColumn<T> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Store `value` for `owner`; the caller guarantees `owner` has none yet
    pub(crate) fn insert(&mut self, owner: Entity, value: T) -> &mut T {
        let slot = self.entries.len();
        self.index.insert(owner, slot);
        self.entries.push((owner, RefCell::new(value)));
        self.entries[slot].1.get_mut()
    }

    pub(crate) fn cell(&self, owner: Entity) -> Option<&RefCell<T>> {
        self.index.get(&owner).map(|&slot| &self.entries[slot].1)
    }

    pub(crate) fn get_mut(&mut self, owner: Entity) -> Option<&mut T> {
        let slot = *self.index.get(&owner)?;
        Some(self.entries[slot].1.get_mut())
    }

    pub(crate) fn remove(&mut self, owner: Entity) -> Option<T> {
        let slot = self.index.remove(&owner)?;
        let (_, cell) = self.entries.swap_remove(slot);
        if let Some((moved, _)) = self.entries.get(slot) {
            self.index.insert(*moved, slot);
        }
        Some(cell.into_inner())
    }
}

/// Type-erased access to a [`ComponentColumn`]
pub(crate) trait ErasedColumn {
    fn contains(&self, owner: Entity) -> bool;
    fn remove_owner(&mut self, owner: Entity) -> bool;
    fn component_name(&self) -> &'static str;
    fn len(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedColumn for ComponentColumn<T> {
    fn contains(&self, owner: Entity) -> bool {
        self.index.contains_key(&owner)
    }

    fn remove_owner(&mut self, owner: Entity) -> bool {
        self.remove(owner).is_some()
    }

    fn component_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Health(u32);
    impl Component for Health {}

    #[test]
    fn test_swap_remove_keeps_index_consistent() {
        let mut column = ComponentColumn::<Health>::new();
        let (a, b, c) = (Entity::new(0), Entity::new(1), Entity::new(2));
        column.insert(a, Health(10));
        column.insert(b, Health(20));
        column.insert(c, Health(30));

        assert_eq!(column.remove(a).map(|h| h.0), Some(10));
        assert!(!column.contains(a));
        assert_eq!(column.get_mut(c).map(|h| h.0), Some(30));
        assert_eq!(column.cell(b).map(|h| h.borrow().0), Some(20));
        assert_eq!(ErasedColumn::len(&column), 2);
    }

    #[test]
    fn test_remove_missing_owner_is_noop() {
        let mut column = ComponentColumn::<Health>::new();

        assert!(!column.remove_owner(Entity::new(7)));
    }
}
