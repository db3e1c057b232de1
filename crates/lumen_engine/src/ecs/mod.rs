//! Entity-Component-System implementation
//!
//! Entities are plain ids, components are any `'static` data type implementing
//! [`Component`], and systems declare the components they need through a
//! [`Query`]. A [`Scene`] ties it together and dispatches systems each frame.

pub mod component;
pub mod components;
pub mod entity;
pub mod query;
pub mod scene;
pub(crate) mod storage;
pub mod system;
pub mod systems;
pub mod world;

#[cfg(test)]
mod tests;

pub use component::{Component, ComponentSet};
pub use entity::Entity;
pub use query::{Query, QueryItem, View, ViewIterMut};
pub use scene::Scene;
pub use system::System;
pub use world::{SceneError, World};
