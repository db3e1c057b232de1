//! Cube demo application
//!
//! Builds a grid of spinning cubes lit by a sun, a point light and a spot
//! light, then flies a camera through it. Runs headless against the
//! recording shader backend and reports what was drawn.
//!
//! Usage: `cube_demo [frames] [config.toml|config.ron]`

mod platform;
mod systems;

use std::env;

use lumen_engine::ecs::components::{DirectionalLight, Material, PointLight, Renderable, SpotLight, Transform};
use lumen_engine::ecs::systems::RenderSystem;
use lumen_engine::foundation::logging;
use lumen_engine::foundation::math::{constants, Vec3};
use lumen_engine::render::{Color, Model, RecordingCompiler, ShaderCompiler, ShaderLog, ShaderSource};
use lumen_engine::{AppError, Application, Config, ConfigError, Engine, EngineConfig, EngineError};
use thiserror::Error;

use crate::platform::HeadlessPlatform;
use crate::systems::{FlyCamera, FlyCameraSystem, SpinSystem, Spinner};

const DEFAULT_FRAMES: u32 = 300;
const FRAMES_PER_SECOND: f64 = 60.0;

const VERTEX_SHADER: &str = "#version 330 core
layout (location = 0) in vec3 position;
layout (location = 1) in vec3 normal;
layout (location = 2) in vec3 color;
uniform mat4 model;
uniform mat4 combined;
out vec3 fragmentColor;
void main() {
    fragmentColor = color;
    gl_Position = combined * model * vec4(position, 1.0);
}";

const FRAGMENT_SHADER: &str = "#version 330 core
in vec3 fragmentColor;
out vec4 outColor;
void main() {
    outColor = vec4(fragmentColor, 1.0);
}";

#[derive(Debug, Error)]
enum DemoError {
    #[error("invalid frame count {0:?}")]
    FrameCount(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

struct CubeApp {
    compiler: RecordingCompiler,
    log: ShaderLog,
    frames: u64,
}

impl CubeApp {
    fn new() -> Self {
        let log = ShaderLog::new();
        Self {
            compiler: RecordingCompiler::new(log.clone()),
            log,
            frames: 0,
        }
    }

    fn spawn_cube(&mut self, engine: &mut Engine, position: Vec3, spinner: Spinner) -> Result<(), AppError> {
        let palette = [
            Color::RED,
            Color::GREEN,
            Color::BLUE,
            Color::YELLOW,
            Color::CYAN,
            Color::MAGENTA,
        ];
        let model = Model::cube(&Model::cube_face_indices([0, 1, 2, 3, 4, 5]), &palette)?;
        let shader = self
            .compiler
            .compile(&ShaderSource::new(VERTEX_SHADER, FRAGMENT_SHADER))?;
        let renderable = Renderable::from_program(model, shader)
            .with_material(Material::default().with_shininess(32.0));

        let cube = engine.scene.new_entity();
        engine
            .scene
            .insert_component(cube, Transform::from_position(position).with_uniform_scale(0.4))
            .map_err(EngineError::from)?;
        engine.scene.insert_component(cube, renderable).map_err(EngineError::from)?;
        engine.scene.insert_component(cube, spinner).map_err(EngineError::from)?;
        Ok(())
    }

    fn spawn_lights(engine: &mut Engine) -> Result<(), EngineError> {
        let scene = &mut engine.scene;

        let sun = scene.new_entity();
        scene.insert_component(sun, DirectionalLight::new(Vec3::new(-0.3, -1.0, -0.5), Color::WHITE))?;

        let lamp = scene.new_entity();
        scene.insert_component(lamp, Transform::from_position(Vec3::new(0.0, 3.0, 2.0)))?;
        scene.insert_component(lamp, PointLight::new(Color::from_rgb8(255, 200, 150), 8.0))?;

        let torch = scene.new_entity();
        scene.insert_component(
            torch,
            Transform::from_position(Vec3::new(0.0, 6.0, 0.0)).with_euler(-constants::HALF_PI, 0.0, 0.0),
        )?;
        scene.insert_component(torch, SpotLight::new(Color::CYAN, 12.0, 0.6).with_blur(0.1))?;
        Ok(())
    }
}

impl Application for CubeApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Initializing cube demo...");

        for row in 0..3_u8 {
            for column in 0..3_u8 {
                let position = Vec3::new(
                    f32::from(column) * 2.0 - 2.0,
                    0.0,
                    -f32::from(row) * 2.0,
                );
                let spinner = Spinner {
                    axis: Vec3::new(f32::from(row), 1.0, f32::from(column)),
                    speed: 0.5 + 0.25 * f32::from(row * 3 + column),
                };
                self.spawn_cube(engine, position, spinner)?;
            }
        }
        Self::spawn_lights(engine)?;

        let player = engine.scene.new_entity();
        engine.scene.add_component::<FlyCamera>(player).map_err(EngineError::from)?;

        let camera = &engine.config().camera;
        let render_system = RenderSystem::new(camera.near, camera.far);
        engine.scene.register_system::<FlyCameraSystem>();
        engine.scene.register_system::<SpinSystem>();
        engine.scene.add_system(render_system);

        log::info!("Scene ready with {} systems", engine.scene.system_count());
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        self.frames += 1;
        if self.frames % 60 == 0 {
            log::info!(
                "Frame {}: camera at {}, {:.1} fps",
                self.frames,
                engine.context.camera.position,
                engine.timer().current_fps()
            );
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        log::info!(
            "Cube demo finished: {} frames, {} draw calls, camera at {}",
            self.frames,
            self.log.draw_count(),
            engine.context.camera.position
        );
    }
}

fn parse_frames(argument: Option<String>) -> Result<u32, DemoError> {
    match argument {
        None => Ok(DEFAULT_FRAMES),
        Some(text) => text.parse().map_err(|_| DemoError::FrameCount(text)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let frames = parse_frames(args.next())?;
    let config = match args.next() {
        Some(path) => EngineConfig::load_from_file(path).map_err(DemoError::from)?,
        None => EngineConfig::default(),
    };

    logging::init_with_level(&config.log_level);
    log::info!("Running {frames} frames headless");

    let mut engine = Engine::new(config);
    let mut app = CubeApp::new();
    let mut platform = HeadlessPlatform::new(frames, FRAMES_PER_SECOND);
    engine.run(&mut app, &mut platform).map_err(DemoError::from)?;

    log::info!("Presented {} frames", platform.frames_presented());
    Ok(())
}
