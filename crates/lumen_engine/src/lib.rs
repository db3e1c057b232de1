//! # Lumen Engine
//!
//! A lightweight 3D engine: const-generic linear algebra, an
//! Entity-Component-System runtime, and a lighting render system that talks
//! to the GPU only through a small shader trait.
//!
//! ## Features
//!
//! - **Math**: `Vector<N>`, `Matrix<M, N>` and `Quaternion` value types plus
//!   affine transform builders
//! - **ECS Architecture**: typed views over sparse component storage, systems
//!   with setup/update/destroy hooks dispatched in registration order
//! - **Rendering**: camera projection, Phong materials, directional, point and
//!   spot lights bound as named shader parameters
//! - **Game loop**: frame clock, input snapshot and a platform trait for the
//!   window layer
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lumen_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let cube = engine.scene.new_entity();
//!         engine.scene.add_component::<Transform>(cube).map_err(EngineError::from)?;
//!         engine
//!             .scene
//!             .insert_component(cube, Renderable::new(Model::solid_cube(Color::RED), RecordingShader::new()))
//!             .map_err(EngineError::from)?;
//!         engine.scene.register_system::<RenderSystem>();
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn run(platform: &mut impl Platform) -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     lumen_engine::foundation::logging::init_with_level(&config.log_level);
//!     let mut engine = Engine::new(config);
//!     engine.run(&mut MyApp, platform)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod context;
pub mod ecs;
pub mod foundation;
pub mod input;
pub mod render;

mod application;
mod engine;

pub use application::{AppError, AppEvent, Application};
pub use config::{Config, ConfigError, EngineConfig};
pub use engine::{Engine, EngineError, Platform};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{CameraConfig, Config, EngineConfig, WindowConfig},
        context::FrameContext,
        ecs::{
            components::{DirectionalLight, Material, PointLight, Renderable, SpotLight, Transform},
            systems::RenderSystem,
            Component, Entity, Query, QueryItem, Scene, SceneError, System, View, World,
        },
        foundation::{
            affine,
            math::{Mat2, Mat3, Mat4, Matrix, Quaternion, Vec2, Vec3, Vec4, Vector},
            time::{Clock, FrameTimer, ManualClock, SystemClock},
        },
        input::{InputState, KeyCode, MouseButton, MouseButtons},
        render::{Camera, Color, Model, RecordingShader, ShaderProgram, UniformValue},
        AppError, AppEvent, Application, Engine, EngineError, Platform,
    };
}
