//! Demo components and systems: spinning cubes and a fly camera

use lumen_engine::context::FrameContext;
use lumen_engine::ecs::components::Transform;
use lumen_engine::ecs::{Component, QueryItem, System};
use lumen_engine::foundation::math::{constants, utils, Quaternion, Vec3};
use lumen_engine::input::KeyCode;

/// Rotates its entity at a constant rate
#[derive(Debug, Clone, Copy)]
pub struct Spinner {
    pub axis: Vec3,
    /// Radians per second
    pub speed: f32,
}

impl Component for Spinner {}

impl Default for Spinner {
    fn default() -> Self {
        Self {
            axis: Vec3::new(0.0, 1.0, 0.0),
            speed: 1.0,
        }
    }
}

#[derive(Debug, Default)]
pub struct SpinSystem;

impl System for SpinSystem {
    type Query = (&'static mut Transform, &'static Spinner);

    fn update(&mut self, context: &mut FrameContext, item: QueryItem<'_, Self::Query>) {
        let (transform, spinner) = item;
        let step = spinner.speed * context.delta_time();
        transform.rotate(Quaternion::from_axis_angle(spinner.axis, step));
    }
}

/// Pitch stays this far away from straight up or down
const PITCH_LIMIT: f32 = constants::HALF_PI - 0.1;

/// First-person camera controller state
///
/// WASD moves in the view plane, Q/E move down/up along world Y, and the
/// mouse turns the view.
#[derive(Debug, Clone, Copy)]
pub struct FlyCamera {
    /// Units per second
    pub speed: f32,
    /// Radians per pixel of mouse motion
    pub sensitivity: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl Component for FlyCamera {}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            speed: 3.0,
            sensitivity: 0.002,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl FlyCamera {
    /// Yaw about world Y, then pitch about the camera's own X
    pub fn orientation(&self) -> Quaternion {
        Quaternion::from_euler(0.0, self.yaw, 0.0) * Quaternion::from_euler(self.pitch, 0.0, 0.0)
    }
}

#[derive(Debug, Default)]
pub struct FlyCameraSystem;

impl FlyCameraSystem {
    fn movement(context: &FrameContext) -> Vec3 {
        let camera = &context.camera;
        let bindings = [
            (KeyCode::W, camera.front()),
            (KeyCode::S, -camera.front()),
            (KeyCode::D, camera.right()),
            (KeyCode::A, -camera.right()),
            (KeyCode::E, Vec3::new(0.0, 1.0, 0.0)),
            (KeyCode::Q, Vec3::new(0.0, -1.0, 0.0)),
        ];

        bindings
            .into_iter()
            .filter(|(key, _)| context.is_key_down(*key))
            .fold(Vec3::ZERO, |sum, (_, direction)| sum + direction)
    }
}

impl System for FlyCameraSystem {
    type Query = &'static mut FlyCamera;

    fn setup(&mut self, context: &mut FrameContext, controller: QueryItem<'_, Self::Query>) {
        let euler = context.camera.orientation.to_euler();
        controller.pitch = utils::clamp(euler[0], -PITCH_LIMIT, PITCH_LIMIT);
        controller.yaw = euler[1];
    }

    fn update(&mut self, context: &mut FrameContext, controller: QueryItem<'_, Self::Query>) {
        let look = context.mouse_delta();
        controller.yaw -= look[0] * controller.sensitivity;
        controller.pitch = utils::clamp(
            controller.pitch - look[1] * controller.sensitivity,
            -PITCH_LIMIT,
            PITCH_LIMIT,
        );
        context.camera.orientation = controller.orientation();

        let direction = Self::movement(context);
        if direction.magnitude() > 0.0 {
            let step = direction.normalized() * controller.speed * context.delta_time();
            context.camera.position += step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lumen_engine::ecs::Scene;

    fn scene_with_controller() -> (Scene, FrameContext) {
        let mut scene = Scene::new();
        let player = scene.new_entity();
        scene.add_component::<FlyCamera>(player).unwrap();
        scene.register_system::<FlyCameraSystem>();

        let mut context = FrameContext::default();
        scene.setup_systems(&mut context).unwrap();
        (scene, context)
    }

    #[test]
    fn test_spinner_rotates_by_speed_times_delta() {
        let mut scene = Scene::new();
        let cube = scene.new_entity();
        scene.add_component::<Transform>(cube).unwrap();
        scene
            .insert_component(
                cube,
                Spinner {
                    axis: Vec3::new(0.0, 0.0, 1.0),
                    speed: constants::PI,
                },
            )
            .unwrap();
        scene.register_system::<SpinSystem>();

        let mut context = FrameContext::default();
        scene.setup_systems(&mut context).unwrap();
        context.set_delta_time(0.5);
        scene.update_systems(&mut context).unwrap();

        let transform = scene.get_component::<Transform>(cube).unwrap();
        assert_relative_eq!(
            transform.orientation.rotate(Vec3::new(1.0, 0.0, 0.0)),
            Vec3::new(0.0, 1.0, 0.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_w_moves_along_front() {
        let (mut scene, mut context) = scene_with_controller();
        context.input_mut().handle_key_input(KeyCode::W, true);
        context.set_delta_time(1.0);
        scene.update_systems(&mut context).unwrap();

        assert_relative_eq!(context.camera.position, Vec3::new(0.0, 0.0, -3.0), epsilon = 1e-6);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let (mut scene, mut context) = scene_with_controller();
        context.input_mut().handle_key_input(KeyCode::Q, true);
        context.input_mut().handle_key_input(KeyCode::E, true);
        context.set_delta_time(1.0);
        scene.update_systems(&mut context).unwrap();

        assert_eq!(context.camera.position, Vec3::ZERO);
    }

    #[test]
    fn test_mouse_look_turns_and_clamps_pitch() {
        let (mut scene, mut context) = scene_with_controller();
        context.input_mut().handle_mouse_move(0.0, 0.0);
        context.input_mut().end_frame();
        // Far enough right and down to overshoot the pitch limit
        context.input_mut().handle_mouse_move(100.0, 10_000.0);
        scene.update_systems(&mut context).unwrap();

        let controller = *scene.view::<&FlyCamera>().get_mut(0).unwrap();
        assert_relative_eq!(controller.yaw, -0.2, epsilon = 1e-6);
        assert_relative_eq!(controller.pitch, -PITCH_LIMIT);
        assert!(context.camera.front()[1] < 0.0);
        assert!(context.camera.front()[0] > 0.0);
    }
}
