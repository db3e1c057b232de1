//! Render system driven end to end through a scene and a recording shader

use crate::context::FrameContext;
use crate::ecs::components::{DirectionalLight, Material, PointLight, Renderable, SpotLight, Transform};
use crate::ecs::systems::RenderSystem;
use crate::ecs::Scene;
use crate::foundation::math::{constants, Quaternion, Vec3};
use crate::render::{Camera, Color, Model, RecordingShader, ShaderCall, ShaderLog, UniformValue};
use approx::assert_relative_eq;

fn cube(shader: &RecordingShader) -> Renderable {
    Renderable::new(Model::solid_cube(Color::RED), shader.clone())
}

fn context() -> FrameContext {
    FrameContext::new(Camera::new(Vec3::new(0.0, 0.0, 5.0), 45.0), (800, 600))
}

fn render_once(scene: &mut Scene) -> FrameContext {
    let mut context = context();
    scene.setup_systems(&mut context).unwrap();
    scene.update_systems(&mut context).unwrap();
    context
}

fn vec3_uniform(log: &ShaderLog, name: &str) -> Vec3 {
    match log.last_uniform(name) {
        Some(UniformValue::Vec3(value)) => value,
        other => panic!("{name} is not a vec3: {other:?}"),
    }
}

#[test]
fn test_unlit_entity_gets_matrices_only() {
    let shader = RecordingShader::new();
    let log = shader.log();

    let mut scene = Scene::new();
    let entity = scene.new_entity();
    scene
        .insert_component(entity, Transform::from_position(Vec3::new(1.0, 2.0, 3.0)))
        .unwrap();
    scene.insert_component(entity, cube(&shader).unlit()).unwrap();
    scene.register_system::<RenderSystem>();

    let context = render_once(&mut scene);

    assert_eq!(log.calls().first(), Some(&ShaderCall::Bind));
    assert_eq!(log.uniform_names(), vec!["model", "combined", "viewPosition", "lightable"]);
    assert_eq!(log.calls().last(), Some(&ShaderCall::Draw { vertex_count: 36 }));

    let expected_model = Transform::from_position(Vec3::new(1.0, 2.0, 3.0)).to_matrix();
    assert_eq!(log.last_uniform("model"), Some(UniformValue::Mat4(expected_model)));

    let expected_combined = context.camera.combined_matrix(800.0 / 600.0, 0.1, 100.0);
    match log.last_uniform("combined") {
        Some(UniformValue::Mat4(combined)) => assert_relative_eq!(combined, expected_combined),
        other => panic!("combined is not a mat4: {other:?}"),
    }
    assert_eq!(log.last_uniform("viewPosition"), Some(UniformValue::Vec3(Vec3::new(0.0, 0.0, 5.0))));
    assert_eq!(log.last_uniform("lightable"), Some(UniformValue::Bool(false)));
}

#[test]
fn test_lit_entity_receives_material_and_every_light() {
    let shader = RecordingShader::new();
    let log = shader.log();

    let mut scene = Scene::new();

    let sun = scene.new_entity();
    scene
        .insert_component(sun, DirectionalLight::new(Vec3::new(0.0, -2.0, 0.0), Color::YELLOW))
        .unwrap();

    let lamp = scene.new_entity();
    scene
        .insert_component(lamp, Transform::from_position(Vec3::new(3.0, 1.0, 0.0)))
        .unwrap();
    scene.insert_component(lamp, PointLight::new(Color::BLUE, 4.0)).unwrap();

    let torch = scene.new_entity();
    scene
        .insert_component(
            torch,
            Transform::from_position(Vec3::new(0.0, 5.0, 0.0))
                .with_orientation(Quaternion::from_euler(-constants::HALF_PI, 0.0, 0.0)),
        )
        .unwrap();
    scene
        .insert_component(torch, SpotLight::new(Color::GREEN, 10.0, 0.5).with_blur(0.1))
        .unwrap();

    let entity = scene.new_entity();
    scene.add_component::<Transform>(entity).unwrap();
    scene
        .insert_component(
            entity,
            cube(&shader).with_material(Material::from_color(Color::RED).with_shininess(16.0)),
        )
        .unwrap();
    scene.register_system::<RenderSystem>();

    render_once(&mut scene);

    assert_eq!(
        log.uniform_names(),
        vec![
            "model",
            "combined",
            "viewPosition",
            "lightable",
            "material.ambient",
            "material.diffuse",
            "material.specular",
            "material.shininess",
            "numberOfDirectionalLights",
            "directionalLights[0].direction",
            "directionalLights[0].color",
            "directionalLights[0].ambientStrength",
            "numberOfPointLights",
            "pointLights[0].position",
            "pointLights[0].color",
            "pointLights[0].radius",
            "pointLights[0].ambientStrength",
            "numberOfSpotLights",
            "spotLights[0].position",
            "spotLights[0].direction",
            "spotLights[0].color",
            "spotLights[0].range",
            "spotLights[0].angle",
            "spotLights[0].blurAngle",
        ]
    );

    assert_eq!(log.last_uniform("material.diffuse"), Some(UniformValue::Vec3(Color::RED.to_vector())));
    assert_eq!(log.last_uniform("material.shininess"), Some(UniformValue::Float(16.0)));
    assert_eq!(log.last_uniform("numberOfDirectionalLights"), Some(UniformValue::Int(1)));
    assert_relative_eq!(vec3_uniform(&log, "directionalLights[0].direction"), Vec3::new(0.0, 1.0, 0.0));
    assert_relative_eq!(vec3_uniform(&log, "pointLights[0].position"), Vec3::new(3.0, 1.0, 0.0));
    assert_eq!(log.last_uniform("pointLights[0].radius"), Some(UniformValue::Float(4.0)));
    assert_relative_eq!(
        vec3_uniform(&log, "spotLights[0].direction"),
        Vec3::new(0.0, -1.0, 0.0),
        epsilon = 1e-6
    );
    assert_eq!(log.last_uniform("spotLights[0].blurAngle"), Some(UniformValue::Float(0.1)));
    assert_eq!(log.draw_count(), 1);
}

#[test]
fn test_each_renderable_is_drawn_every_frame() {
    let shared = ShaderLog::new();
    let mut scene = Scene::new();
    for x in [0.0, 2.0, 4.0] {
        let entity = scene.new_entity();
        scene.insert_component(entity, Transform::from_position(Vec3::new(x, 0.0, 0.0))).unwrap();
        scene
            .insert_component(entity, cube(&RecordingShader::with_log(shared.clone())).unlit())
            .unwrap();
    }
    // Has a renderable but no transform, so it is never drawn
    let orphan = scene.new_entity();
    scene
        .insert_component(orphan, cube(&RecordingShader::with_log(shared.clone())))
        .unwrap();
    scene.register_system::<RenderSystem>();

    let mut context = context();
    scene.setup_systems(&mut context).unwrap();
    scene.update_systems(&mut context).unwrap();
    scene.update_systems(&mut context).unwrap();

    assert_eq!(shared.draw_count(), 6);
}

#[test]
fn test_lights_added_between_frames_are_picked_up() {
    let shader = RecordingShader::new();
    let log = shader.log();

    let mut scene = Scene::new();
    let entity = scene.new_entity();
    scene.add_component::<Transform>(entity).unwrap();
    scene.insert_component(entity, cube(&shader)).unwrap();
    scene.register_system::<RenderSystem>();

    let mut context = context();
    scene.setup_systems(&mut context).unwrap();
    scene.update_systems(&mut context).unwrap();
    assert_eq!(log.last_uniform("numberOfPointLights"), Some(UniformValue::Int(0)));

    let lamp = scene.new_entity();
    scene.add_component::<Transform>(lamp).unwrap();
    scene.add_component::<PointLight>(lamp).unwrap();
    scene.update_systems(&mut context).unwrap();
    assert_eq!(log.last_uniform("numberOfPointLights"), Some(UniformValue::Int(1)));

    scene.delete_entity(lamp).unwrap();
    scene.update_systems(&mut context).unwrap();
    assert_eq!(log.last_uniform("numberOfPointLights"), Some(UniformValue::Int(0)));
}
