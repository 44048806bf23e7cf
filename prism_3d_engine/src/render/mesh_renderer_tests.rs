use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;
use super::*;
use crate::backend::mock_backend::MockBackend;
use crate::error::Error;
use crate::math::BoundingBox;
use crate::scene::{Geometry, Material};
use crate::test_support::{cube_at, front_camera, material_of, standard_programs};

// ============================================================================
// Helpers
// ============================================================================

fn items(scene: &Scene) -> Vec<RenderItem<'_>> {
    scene.renderables().map(|(key, r)| RenderItem::new(key, r)).collect()
}

fn submitted(scene: &Scene, use_blending: bool) -> MeshRenderer {
    let mut renderer = MeshRenderer::new();
    renderer.submit(&items(scene), &front_camera(), use_blending);
    renderer
}

fn translucent(kind: MaterialKind) -> Material {
    material_of(kind).with_alpha(0.5)
}

/// Vertex array ids in the order they were drawn
fn drawn_ids(backend: &MockBackend) -> Vec<u32> {
    backend
        .commands
        .iter()
        .filter_map(|c| c.strip_prefix("bind vertex_array#"))
        .map(|id| id.parse().unwrap())
        .collect()
}

fn names(scene: &Scene, keys: &[RenderableKey]) -> Vec<String> {
    keys.iter().map(|k| scene.renderable(*k).unwrap().name().to_string()).collect()
}

fn shadow_context() -> ShadowMapContext {
    ShadowMapContext {
        light_space_view: Mat4::look_at_rh(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, Vec3::Z),
        light_space_projection: Mat4::orthographic_rh_gl(-10.0, 10.0, -10.0, 10.0, 0.0, 20.0),
        depth_texture: ResourceHandle::texture(9),
        texture_unit: 1,
        pcf_count: 2,
    }
}

fn no_light() -> Lighting<'static> {
    Lighting { light: None, global_ambient: Vec3::splat(0.15) }
}

// ============================================================================
// Partitions
// ============================================================================

#[test]
fn test_partitions_are_complete_and_disjoint() {
    let mut scene = Scene::new("partitions");
    scene.add_renderable(cube_at(1, Vec3::ZERO, material_of(MaterialKind::Phong)));
    let mut no_caster = cube_at(2, Vec3::X, translucent(MaterialKind::Lambert));
    no_caster.set_cast_shadow(false);
    scene.add_renderable(no_caster);
    scene.add_renderable(cube_at(3, Vec3::Y, translucent(MaterialKind::Phong)));

    let renderer = submitted(&scene, true);

    assert_eq!(names(&scene, renderer.casts_shadow()), vec!["cube1", "cube3"]);
    assert_eq!(names(&scene, renderer.no_shadow()), vec!["cube2"]);
    assert_eq!(renderer.opaque().len() + renderer.transparent().len(), 3);
    assert_eq!(names(&scene, renderer.opaque()), vec!["cube1"]);
    for key in renderer.opaque() {
        assert!(!renderer.transparent().contains(key));
    }
}

#[test]
fn test_blending_off_makes_everything_opaque() {
    let mut scene = Scene::new("no-blend");
    scene.add_renderable(cube_at(1, Vec3::ZERO, translucent(MaterialKind::Phong)));
    scene.add_renderable(cube_at(2, Vec3::X, translucent(MaterialKind::Lambert)));

    let renderer = submitted(&scene, false);

    assert_eq!(renderer.opaque().len(), 2);
    assert!(renderer.transparent().is_empty());
}

#[test]
fn test_transparent_sorted_farthest_first_with_stable_ties() {
    // Camera at (0, 0, 10)
    let mut scene = Scene::new("sort");
    scene.add_renderable(cube_at(1, Vec3::new(0.0, 0.0, 5.0), translucent(MaterialKind::Phong)));   // 5
    scene.add_renderable(cube_at(2, Vec3::new(3.0, 0.0, 0.0), translucent(MaterialKind::Phong)));   // tie
    scene.add_renderable(cube_at(3, Vec3::new(0.0, 0.0, -10.0), translucent(MaterialKind::Phong))); // 20
    scene.add_renderable(cube_at(4, Vec3::new(-3.0, 0.0, 0.0), translucent(MaterialKind::Phong)));  // tie

    let renderer = submitted(&scene, true);

    assert_eq!(names(&scene, renderer.transparent()), vec!["cube3", "cube2", "cube4", "cube1"]);
}

#[test]
fn test_submit_replaces_previous_frame() {
    let mut scene = Scene::new("resubmit");
    scene.add_renderable(cube_at(1, Vec3::ZERO, material_of(MaterialKind::Phong)));
    let mut renderer = submitted(&scene, true);

    renderer.submit(&[], &front_camera(), true);

    assert!(renderer.opaque().is_empty());
    assert!(renderer.casts_shadow().is_empty());
    assert_eq!(renderer.camera_context().position, Vec3::new(0.0, 0.0, 10.0));
}

// ============================================================================
// Shading pass
// ============================================================================

#[test]
fn test_opaque_batches_follow_material_kind_order() {
    let mut scene = Scene::new("batches");
    scene.add_renderable(cube_at(1, Vec3::ZERO, material_of(MaterialKind::BlinnPhong)));
    scene.add_renderable(cube_at(2, Vec3::X, material_of(MaterialKind::Lambert)));
    scene.add_renderable(cube_at(3, Vec3::Y, material_of(MaterialKind::Phong)));
    scene.add_renderable(cube_at(4, -Vec3::X, material_of(MaterialKind::Lambert)));
    let renderer = submitted(&scene, true);
    let mut backend = MockBackend::new();

    let draws = renderer
        .render_without_shadow_map(&scene, &mut backend, &standard_programs(), no_light())
        .unwrap();

    assert_eq!(draws, 4);
    assert_eq!(drawn_ids(&backend), vec![2, 4, 3, 1]);
    // One bind per batch
    assert_eq!(backend.count("bind program#1"), 1);
    assert_eq!(backend.count("bind program#2"), 1);
    assert_eq!(backend.count("bind program#3"), 1);
    assert!(backend.position("bind program#1") < backend.position("bind program#2"));
    assert!(backend.position("bind program#2") < backend.position("bind program#3"));
    assert_eq!(backend.commands.last().unwrap(), "unbind program#3");
}

#[test]
fn test_transparent_drawn_after_opaque_back_to_front() {
    let mut scene = Scene::new("blend-order");
    scene.add_renderable(cube_at(1, Vec3::new(0.0, 0.0, 5.0), translucent(MaterialKind::Lambert)));
    scene.add_renderable(cube_at(2, Vec3::ZERO, material_of(MaterialKind::Phong)));
    scene.add_renderable(cube_at(3, Vec3::new(0.0, 0.0, -10.0), translucent(MaterialKind::Lambert)));
    let renderer = submitted(&scene, true);
    let mut backend = MockBackend::new();

    renderer
        .render_without_shadow_map(&scene, &mut backend, &standard_programs(), no_light())
        .unwrap();

    assert_eq!(drawn_ids(&backend), vec![2, 3, 1]);
    // Phong batch, then the Lambert program for both transparent cubes
    assert_eq!(backend.count("bind program#2"), 1);
    assert_eq!(backend.count("bind program#1"), 1);
}

#[test]
fn test_model_parts_batched_by_their_material() {
    let parts = vec![
        DrawPart::new(Geometry::indexed(ResourceHandle::vertex_array(11), 8, 12), material_of(MaterialKind::Phong)),
        DrawPart::new(Geometry::non_indexed(ResourceHandle::vertex_array(12), 3), material_of(MaterialKind::Lambert))
            .with_local_transform(Mat4::from_translation(Vec3::Y)),
    ];
    let mut scene = Scene::new("model");
    scene.add_renderable(Renderable::model("robot", 7, parts, BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0))));
    let renderer = submitted(&scene, true);
    let mut backend = MockBackend::new();

    renderer
        .render_without_shadow_map(&scene, &mut backend, &standard_programs(), no_light())
        .unwrap();

    assert_eq!(drawn_ids(&backend), vec![12, 11]);
    assert_eq!(backend.count("draw_arrays 3"), 1);
    assert_eq!(backend.count("draw_indexed 12"), 1);
    let models = backend.uniform_values("u_tModel");
    assert_eq!(models[0], UniformValue::Mat4(Mat4::from_translation(Vec3::Y)));
    assert_eq!(models[1], UniformValue::Mat4(Mat4::IDENTITY));
}

#[test]
fn test_frame_and_draw_uniforms() {
    let mut scene = Scene::new("uniforms");
    scene.add_renderable(cube_at(1, Vec3::new(1.0, 2.0, 3.0), material_of(MaterialKind::Phong)));
    let renderer = submitted(&scene, true);
    let mut backend = MockBackend::new();

    renderer
        .render_without_shadow_map(&scene, &mut backend, &standard_programs(), no_light())
        .unwrap();

    assert_eq!(backend.uniform_values("u_viewPos"), vec![UniformValue::Vec3(Vec3::new(0.0, 0.0, 10.0))]);
    assert_eq!(backend.uniform_values("u_globalAmbientLight"), vec![UniformValue::Vec3(Vec3::splat(0.15))]);
    assert_eq!(backend.uniform_values("u_directionalLight.isActive"), vec![UniformValue::Int(0)]);
    assert_eq!(
        backend.uniform_values("u_tModel"),
        vec![UniformValue::Mat4(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)))]
    );
    assert_eq!(backend.uniform_values("u_material.shininess"), vec![UniformValue::Float(32.0)]);
    assert!(backend.uniform_values("u_shadowMap").is_empty());
}

#[test]
fn test_light_uniforms_by_kind() {
    let mut scene = Scene::new("lights");
    scene.add_renderable(cube_at(1, Vec3::ZERO, material_of(MaterialKind::Phong)));
    let renderer = submitted(&scene, true);
    let programs = standard_programs();

    let sun = Light::directional("sun", Vec3::new(0.0, -2.0, 0.0), Vec3::ZERO, Vec3::ONE, Vec3::ONE);
    let mut backend = MockBackend::new();
    renderer
        .render_without_shadow_map(&scene, &mut backend, &programs, Lighting { light: Some(&sun), global_ambient: Vec3::ZERO })
        .unwrap();
    assert_eq!(backend.uniform_values("u_directionalLight.direction"), vec![UniformValue::Vec3(Vec3::NEG_Y)]);
    assert_eq!(backend.uniform_values("u_directionalLight.isActive"), vec![UniformValue::Int(1)]);

    let bulb = Light::point("bulb", Vec3::new(0.0, 3.0, 0.0), Vec3::ZERO, Vec3::ONE, Vec3::ONE, (1.0, 0.09, 0.032));
    let mut backend = MockBackend::new();
    renderer
        .render_without_shadow_map(&scene, &mut backend, &programs, Lighting { light: Some(&bulb), global_ambient: Vec3::ZERO })
        .unwrap();
    assert_eq!(backend.uniform_values("u_pointLight.position"), vec![UniformValue::Vec3(Vec3::new(0.0, 3.0, 0.0))]);
    assert_eq!(backend.uniform_values("u_pointLight.quadratic"), vec![UniformValue::Float(0.032)]);
    assert!(backend.uniform_values("u_directionalLight.isActive").is_empty());
}

#[test]
fn test_shadowed_pass_uploads_shadow_uniforms() {
    let mut scene = Scene::new("shadowed");
    scene.add_renderable(cube_at(1, Vec3::ZERO, material_of(MaterialKind::Lambert)));
    let renderer = submitted(&scene, true);
    let shadow = shadow_context();
    let mut backend = MockBackend::new();

    renderer
        .render_with_shadow_map(&scene, &mut backend, &standard_programs(), no_light(), &shadow)
        .unwrap();

    assert_eq!(backend.count("bind program#11"), 1);
    assert_eq!(backend.uniform_values("u_shadowMap"), vec![UniformValue::Int(1)]);
    assert_eq!(backend.uniform_values("u_pcfCount"), vec![UniformValue::Int(2)]);
    assert_eq!(
        backend.uniform_values("u_tLightSpaceViewMatrix"),
        vec![UniformValue::Mat4(shadow.light_space_view)]
    );
}

// ============================================================================
// Other passes
// ============================================================================

#[test]
fn test_shadow_pass_draws_casters_only() {
    let mut scene = Scene::new("casters");
    scene.add_renderable(cube_at(1, Vec3::ZERO, material_of(MaterialKind::Phong)));
    let mut ghost = cube_at(2, Vec3::X, material_of(MaterialKind::Lambert));
    ghost.set_cast_shadow(false);
    scene.add_renderable(ghost);
    scene.add_renderable(cube_at(3, Vec3::Y, translucent(MaterialKind::BlinnPhong)));
    let renderer = submitted(&scene, true);
    let mut backend = MockBackend::new();

    let draws = renderer
        .render_to_shadow_map(&scene, &mut backend, &standard_programs(), &shadow_context())
        .unwrap();

    assert_eq!(draws, 2);
    assert_eq!(drawn_ids(&backend), vec![1, 3]);
    assert_eq!(backend.count("bind program#20"), 1);
    assert_eq!(backend.uniform_values("u_modelMatrix").len(), 2);
    assert_eq!(backend.uniform_values("u_lightSpaceViewMatrix").len(), 1);
}

#[test]
fn test_depth_view_uniforms() {
    let mut scene = Scene::new("depth-view");
    scene.add_renderable(cube_at(1, Vec3::ZERO, material_of(MaterialKind::Phong)));
    let renderer = submitted(&scene, true);
    let mut backend = MockBackend::new();
    let config = DepthViewConfig { z_min: 1.0, z_max: 25.0, ..DepthViewConfig::default() };

    renderer.render_depth_view(&scene, &mut backend, &standard_programs(), &config).unwrap();

    assert_eq!(backend.count("bind program#21"), 1);
    assert_eq!(backend.uniform_values("u_depthViewZMin"), vec![UniformValue::Float(1.0)]);
    assert_eq!(backend.uniform_values("u_depthViewZMax"), vec![UniformValue::Float(25.0)]);
    assert_eq!(backend.uniform_values("u_depthViewZMinColor"), vec![UniformValue::Vec3(Vec3::ONE)]);
}

#[test]
fn test_semantic_colors_with_default() {
    let mut scene = Scene::new("semantic");
    scene.add_renderable(cube_at(1, Vec3::ZERO, material_of(MaterialKind::Phong)));
    scene.add_renderable(cube_at(2, Vec3::X, material_of(MaterialKind::Lambert)));
    let renderer = submitted(&scene, true);
    let mut backend = MockBackend::new();
    let mut id_map = FxHashMap::default();
    id_map.insert(1, Vec3::X);

    renderer
        .render_semantic_view(&scene, &mut backend, &standard_programs(), &id_map, Vec3::splat(0.5))
        .unwrap();

    assert_eq!(backend.count("bind program#22"), 1);
    assert_eq!(
        backend.uniform_values("u_semanticColor"),
        vec![UniformValue::Vec3(Vec3::X), UniformValue::Vec3(Vec3::splat(0.5))]
    );
}

// ============================================================================
// Failure and staleness
// ============================================================================

#[test]
fn test_removed_renderables_are_skipped() {
    let mut scene = Scene::new("removed");
    let first = scene.add_renderable(cube_at(1, Vec3::ZERO, material_of(MaterialKind::Phong)));
    scene.add_renderable(cube_at(2, Vec3::X, material_of(MaterialKind::Phong)));
    let renderer = submitted(&scene, true);

    scene.remove_renderable(first);
    let mut backend = MockBackend::new();
    let draws = renderer
        .render_without_shadow_map(&scene, &mut backend, &standard_programs(), no_light())
        .unwrap();

    assert_eq!(draws, 1);
    assert_eq!(drawn_ids(&backend), vec![2]);
}

#[test]
fn test_empty_partitions_issue_no_commands() {
    let scene = Scene::new("empty");
    let renderer = submitted(&scene, true);
    let mut backend = MockBackend::new();

    let draws = renderer
        .render_without_shadow_map(&scene, &mut backend, &standard_programs(), no_light())
        .unwrap();

    assert_eq!(draws, 0);
    assert!(backend.commands.is_empty());
}

#[test]
fn test_missing_program_fails() {
    let mut scene = Scene::new("missing-program");
    scene.add_renderable(cube_at(1, Vec3::ZERO, material_of(MaterialKind::Phong)));
    let renderer = submitted(&scene, true);
    let mut backend = MockBackend::new();

    let result = renderer.render_without_shadow_map(&scene, &mut backend, &ProgramLibrary::new(), no_light());

    assert!(matches!(result, Err(Error::InvalidResource(_))));
    assert!(backend.commands.is_empty());
}

#[test]
fn test_backend_error_propagates() {
    let mut scene = Scene::new("device-lost");
    scene.add_renderable(cube_at(1, Vec3::ZERO, material_of(MaterialKind::Phong)));
    let renderer = submitted(&scene, true);
    let mut backend = MockBackend::new();
    backend.fail_draws = true;

    let result = renderer.render_without_shadow_map(&scene, &mut backend, &standard_programs(), no_light());

    assert!(matches!(result, Err(Error::BackendError(_))));
}
