//! Per-frame state shared with systems
//!
//! The [`FrameContext`] is owned by the [`Engine`](crate::Engine) and handed
//! to every system hook. It carries the camera (the one piece of state
//! systems may move), the input snapshot and the frame's delta time.

use crate::foundation::math::Vec2;
use crate::input::{InputState, KeyCode, MouseButton};
use crate::render::Camera;

/// State systems can read (and for the camera, write) during a frame
#[derive(Debug, Clone)]
pub struct FrameContext {
    /// The scene camera
    pub camera: Camera,
    input: InputState,
    delta_time: f32,
    viewport: (u32, u32),
    exit_requested: bool,
}

impl Default for FrameContext {
    fn default() -> Self {
        Self::new(Camera::default(), (800, 600))
    }
}

impl FrameContext {
    /// Context for a viewport of `width × height` pixels
    pub fn new(camera: Camera, viewport: (u32, u32)) -> Self {
        Self {
            camera,
            input: InputState::new(),
            delta_time: 0.0,
            viewport,
            exit_requested: false,
        }
    }

    /// Seconds elapsed between the previous frame and this one
    pub const fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Set the frame's delta time; normally done by the engine loop
    pub fn set_delta_time(&mut self, delta_time: f32) {
        self.delta_time = delta_time;
    }

    /// Current input snapshot
    pub const fn input(&self) -> &InputState {
        &self.input
    }

    /// Mutable input snapshot, for the platform layer and tests
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Whether `key` is held
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.input.is_key_down(key)
    }

    /// Whether `key` is released
    pub fn is_key_up(&self, key: KeyCode) -> bool {
        self.input.is_key_up(key)
    }

    /// Whether `button` is held
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.input.is_button_down(button)
    }

    /// Whether `button` is released
    pub fn is_button_up(&self, button: MouseButton) -> bool {
        self.input.is_button_up(button)
    }

    /// Cursor position in window coordinates
    pub const fn mouse_position(&self) -> Vec2 {
        self.input.mouse_position()
    }

    /// Cursor motion during this frame
    pub fn mouse_delta(&self) -> Vec2 {
        self.input.mouse_delta()
    }

    /// Viewport size in pixels
    pub const fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Change the viewport size, e.g. after a window resize
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    /// Width over height; 1 for a degenerate viewport
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.viewport;
        if width == 0 || height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        }
    }

    /// Ask the engine loop to stop after the current frame
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Whether an exit has been requested
    pub const fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_aspect_ratio() {
        let mut context = FrameContext::default();
        assert_relative_eq!(context.aspect_ratio(), 800.0 / 600.0);

        context.set_viewport(1920, 0);
        assert_relative_eq!(context.aspect_ratio(), 1.0);
    }

    #[test]
    fn test_input_is_forwarded() {
        let mut context = FrameContext::default();
        context.input_mut().handle_key_input(KeyCode::Space, true);
        context.input_mut().handle_mouse_button(MouseButton::Left, true);

        assert!(context.is_key_down(KeyCode::Space));
        assert!(context.is_key_up(KeyCode::Escape));
        assert!(context.is_button_down(MouseButton::Left));
        assert!(context.is_button_up(MouseButton::Right));
    }

    #[test]
    fn test_exit_request_is_sticky() {
        let mut context = FrameContext::default();
        assert!(!context.exit_requested());
        context.request_exit();
        assert!(context.exit_requested());
    }
}
