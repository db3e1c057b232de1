//! Core engine implementation
//!
//! The [`Engine`] owns the [`Scene`] and the [`FrameContext`] handed to
//! systems. A [`Platform`] supplies time, events and presentation; the
//! engine itself never touches a window.

use crate::application::{AppEvent, Application};
use crate::config::{ConfigError, EngineConfig};
use crate::context::FrameContext;
use crate::ecs::{Scene, SceneError};
use crate::foundation::time::{Clock, FrameTimer};
use thiserror::Error;

/// Window and event source the engine loop runs against
///
/// The clock is sampled once per frame; events are drained once per frame
/// after presentation.
pub trait Platform: Clock {
    /// Events received since the previous call
    fn poll_events(&mut self) -> Vec<AppEvent>;

    /// Show the frame that was just drawn
    ///
    /// # Errors
    ///
    /// [`EngineError::Platform`] when presentation fails.
    fn present(&mut self) -> Result<(), EngineError>;
}

/// Main engine struct
///
/// The engine coordinates the scene, the frame clock and input, and runs the
/// main loop.
pub struct Engine {
    /// Entities, components and systems
    pub scene: Scene,

    /// Camera, input and timing shared with systems
    pub context: FrameContext,

    timer: FrameTimer,
    config: EngineConfig,
    systems_ready: bool,
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Self {
        log::info!("Initializing engine...");

        let viewport = (config.window.width, config.window.height);
        let context = FrameContext::new(config.camera.to_camera(), viewport);

        Self {
            scene: Scene::new(),
            context,
            timer: FrameTimer::new(),
            config,
            systems_ready: false,
            running: true,
        }
    }

    /// Run the main loop with `app` until the exit key is pressed, the window
    /// asks to close, or something calls [`Engine::quit`].
    ///
    /// Each frame: sample the clock, check the exit key, update the
    /// application, update the systems, present, then poll events into the
    /// input state. A frame that has started always completes.
    ///
    /// # Errors
    ///
    /// Stops at the first scene, platform or application error.
    pub fn run<A, P>(&mut self, app: &mut A, platform: &mut P) -> Result<(), EngineError>
    where
        A: Application,
        P: Platform,
    {
        app.initialize(self)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {e}")))?;
        self.setup_systems()?;
        self.timer.reset(platform.now());

        log::info!("Starting main loop...");

        while self.running && !self.context.exit_requested() {
            let delta_time = self.timer.tick(platform.now());
            self.context.set_delta_time(delta_time);

            // The frame that sees the exit key still runs to completion.
            if self.context.is_key_down(self.config.exit_key) {
                self.quit();
            }

            app.update(self, delta_time)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {e}")))?;
            self.scene.update_systems(&mut self.context)?;
            platform.present()?;

            self.context.input_mut().end_frame();
            for event in platform.poll_events() {
                app.handle_event(self, event)
                    .map_err(|e| EngineError::ApplicationError(format!("App event: {e}")))?;
            }
        }

        app.cleanup(self);

        log::info!(
            "Engine shutdown complete after {} frames ({:.1} fps)",
            self.timer.frame_count(),
            self.timer.current_fps()
        );
        Ok(())
    }

    /// Run one frame at time `now` without a platform or application
    ///
    /// Systems are set up on the first call. Returns the frame's delta time.
    ///
    /// # Errors
    ///
    /// Propagates scene errors raised by the systems.
    pub fn step(&mut self, now: f64) -> Result<f32, EngineError> {
        self.setup_systems()?;

        let delta_time = self.timer.tick(now);
        self.context.set_delta_time(delta_time);
        self.scene.update_systems(&mut self.context)?;
        self.context.input_mut().end_frame();
        Ok(delta_time)
    }

    /// Run every system's setup hooks, once
    fn setup_systems(&mut self) -> Result<(), EngineError> {
        if !self.systems_ready {
            log::debug!("Setting up {} systems", self.scene.system_count());
            self.scene.setup_systems(&mut self.context)?;
            self.systems_ready = true;
        }
        Ok(())
    }

    /// Handle an application event
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::WindowResized { width, height } => {
                log::debug!("Viewport resized to {width}x{height}");
                self.context.set_viewport(width, height);
            }
            AppEvent::WindowCloseRequested => {
                self.quit();
            }
            AppEvent::KeyInput { key, pressed } => {
                self.context.input_mut().handle_key_input(key, pressed);
            }
            AppEvent::MouseButton { button, pressed } => {
                self.context.input_mut().handle_mouse_button(button, pressed);
            }
            AppEvent::MouseMoved { x, y } => {
                self.context.input_mut().handle_mouse_move(x, y);
            }
            AppEvent::MouseWheel { delta_x, delta_y } => {
                self.context.input_mut().handle_mouse_wheel(delta_x, delta_y);
            }
        }
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the loop would keep going
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Engine configuration
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Frame timing
    pub const fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Get the current frame delta time
    pub const fn delta_time(&self) -> f32 {
        self.context.delta_time()
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Scene operation failed
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Window or presentation failure
    #[error("Platform error: {0}")]
    Platform(String),

    /// Application callback failed
    #[error("Application error: {0}")]
    ApplicationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AppError;
    use crate::ecs::components::Transform;
    use crate::ecs::{Component, QueryItem, System};
    use crate::foundation::math::Vec3;
    use crate::foundation::time::ManualClock;
    use crate::input::KeyCode;
    use approx::assert_relative_eq;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Velocity(Vec3);
    impl Component for Velocity {}

    #[derive(Default)]
    struct MovementSystem;

    impl System for MovementSystem {
        type Query = (&'static mut Transform, &'static Velocity);

        fn update(&mut self, context: &mut FrameContext, item: QueryItem<'_, Self::Query>) {
            let (transform, velocity) = item;
            transform.position += velocity.0 * context.delta_time();
        }
    }

    /// Platform replaying a fixed script: one event batch per frame, the
    /// clock advancing by a fixed step on every present.
    struct ScriptedPlatform {
        clock: ManualClock,
        step: f64,
        frames: VecDeque<Vec<AppEvent>>,
        presented: usize,
    }

    impl ScriptedPlatform {
        fn new(step: f64, frames: Vec<Vec<AppEvent>>) -> Self {
            Self {
                clock: ManualClock::new(0.0),
                step,
                frames: frames.into(),
                presented: 0,
            }
        }
    }

    impl Clock for ScriptedPlatform {
        fn now(&self) -> f64 {
            self.clock.now()
        }
    }

    impl Platform for ScriptedPlatform {
        fn poll_events(&mut self) -> Vec<AppEvent> {
            self.frames
                .pop_front()
                .unwrap_or_else(|| vec![AppEvent::WindowCloseRequested])
        }

        fn present(&mut self) -> Result<(), EngineError> {
            self.presented += 1;
            self.clock.advance(self.step);
            Ok(())
        }
    }

    #[derive(Default)]
    struct MovingApp {
        entity: Option<crate::ecs::Entity>,
        updates: usize,
        cleaned_up: bool,
    }

    impl Application for MovingApp {
        fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
            let entity = engine.scene.new_entity();
            engine.scene.add_component::<Transform>(entity).map_err(EngineError::from)?;
            engine
                .scene
                .insert_component(entity, Velocity(Vec3::new(1.0, 0.0, 0.0)))
                .map_err(EngineError::from)?;
            engine.scene.register_system::<MovementSystem>();
            self.entity = Some(entity);
            Ok(())
        }

        fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
            self.updates += 1;
            Ok(())
        }

        fn cleanup(&mut self, _engine: &mut Engine) {
            self.cleaned_up = true;
        }
    }

    #[test]
    fn test_velocity_scenario() {
        let mut engine = Engine::new(EngineConfig::default());
        let mut app = MovingApp::default();
        app.initialize(&mut engine).unwrap();
        let entity = app.entity.unwrap();

        engine.scene.setup_systems(&mut engine.context).unwrap();
        engine.context.set_delta_time(0.5);
        engine.scene.update_systems(&mut engine.context).unwrap();

        let transform = engine.scene.get_component::<Transform>(entity).unwrap();
        assert_relative_eq!(transform.position, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_step_differences_clock_samples() {
        let mut engine = Engine::new(EngineConfig::default());
        let mut app = MovingApp::default();
        app.initialize(&mut engine).unwrap();
        let entity = app.entity.unwrap();

        assert_relative_eq!(engine.step(10.0).unwrap(), 0.0);
        assert_relative_eq!(engine.step(10.25).unwrap(), 0.25);
        assert_relative_eq!(engine.step(10.5).unwrap(), 0.25);

        let transform = engine.scene.get_component::<Transform>(entity).unwrap();
        assert_relative_eq!(transform.position, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_run_stops_on_close_request() {
        let mut engine = Engine::new(EngineConfig::default());
        let mut app = MovingApp::default();
        let mut platform = ScriptedPlatform::new(0.5, vec![vec![], vec![]]);

        engine.run(&mut app, &mut platform).unwrap();

        // Two scripted frames, then the close request arrives after the third
        assert_eq!(app.updates, 3);
        assert_eq!(platform.presented, 3);
        assert!(app.cleaned_up);
        assert!(!engine.is_running());

        let entity = app.entity.unwrap();
        let transform = engine.scene.get_component::<Transform>(entity).unwrap();
        assert_relative_eq!(transform.position, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_exit_key_frame_runs_to_completion() {
        let mut engine = Engine::new(EngineConfig::default());
        let mut app = MovingApp::default();
        let press_escape = vec![AppEvent::KeyInput {
            key: KeyCode::Escape,
            pressed: true,
        }];
        // Escape arrives after frame 1 and holds the loop open with no close request
        let mut platform = ScriptedPlatform::new(0.5, vec![press_escape, vec![], vec![]]);

        engine.run(&mut app, &mut platform).unwrap();

        // Frame 2 sees the key, then still updates, moves and presents
        assert_eq!(app.updates, 2);
        assert_eq!(platform.presented, 2);
        assert!(!engine.is_running());
        assert!(app.cleaned_up);

        let entity = app.entity.unwrap();
        let transform = engine.scene.get_component::<Transform>(entity).unwrap();
        assert_relative_eq!(transform.position, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_events_update_context() {
        let mut engine = Engine::new(EngineConfig::default());
        engine.handle_event(AppEvent::WindowResized { width: 400, height: 200 });
        engine.handle_event(AppEvent::MouseMoved { x: 5.0, y: 5.0 });
        engine.handle_event(AppEvent::KeyInput { key: KeyCode::W, pressed: true });

        assert_eq!(engine.context.viewport(), (400, 200));
        assert_relative_eq!(engine.context.aspect_ratio(), 2.0);
        assert!(engine.context.is_key_down(KeyCode::W));
    }
}
