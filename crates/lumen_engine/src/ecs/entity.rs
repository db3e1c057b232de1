//! Entity implementation

use std::fmt;

/// Entity identifier.
///
/// Ids come from a per-world counter that only grows, so an id is never
/// handed out twice and ordering by id is ordering by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity {
    id: u64,
}

impl Entity {
    /// Create a new entity with the given ID
    pub(super) fn new(id: u64) -> Self {
        Self { id }
    }

    /// Get the entity ID
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.id)
    }
}
