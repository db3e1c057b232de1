//! Application trait and lifecycle management

use crate::engine::{Engine, EngineError};
use crate::input::{KeyCode, MouseButton};
use crate::render::{ModelError, ShaderError};
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to create your game or application using the engine.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once before the first frame, before systems are set up. Create
    /// entities and register systems here.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame before the scene's systems run.
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Handle application events
    ///
    /// Called for every event the platform reports. The default forwards to
    /// the engine, which keeps the input state and viewport current.
    fn handle_event(&mut self, engine: &mut Engine, event: AppEvent) -> Result<(), AppError> {
        engine.handle_event(event);
        Ok(())
    }

    /// Cleanup the application
    ///
    /// Called once after the loop ends.
    fn cleanup(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Invalid model geometry
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Shader loading or compilation failed
    #[error("Shader error: {0}")]
    Shader(#[from] ShaderError),
}

/// Application events
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Window was resized
    WindowResized {
        /// New window width
        width: u32,
        /// New window height
        height: u32,
    },

    /// Window close requested
    WindowCloseRequested,

    /// Key input event
    KeyInput {
        /// The key that was pressed/released
        key: KeyCode,
        /// Whether the key was pressed (true) or released (false)
        pressed: bool,
    },

    /// Mouse button event
    MouseButton {
        /// The mouse button that was pressed/released
        button: MouseButton,
        /// Whether the button was pressed (true) or released (false)
        pressed: bool,
    },

    /// Mouse movement
    MouseMoved {
        /// New X coordinate
        x: f64,
        /// New Y coordinate
        y: f64,
    },

    /// Mouse wheel
    MouseWheel {
        /// Horizontal scroll delta
        delta_x: f32,
        /// Vertical scroll delta
        delta_y: f32,
    },
}
