//! Built-in systems

pub mod lighting;
pub mod rendering_system;

pub use lighting::{LightEnvironment, PlacedPointLight, PlacedSpotLight};
pub use rendering_system::RenderSystem;
