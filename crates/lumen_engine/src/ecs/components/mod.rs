//! Built-in components

pub mod lighting;
pub mod renderable;
pub mod transform;

pub use lighting::{DirectionalLight, PointLight, SpotLight, DEFAULT_AMBIENT_STRENGTH};
pub use renderable::{Material, Renderable};
pub use transform::Transform;
