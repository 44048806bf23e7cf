use glam::Vec3;
use super::*;
use crate::scene::{MaterialKind, Scene};
use crate::test_support::{cube_at, front_camera, material_of};

// ============================================================================
// Helpers
// ============================================================================

/// Four cubes in view (ids 1-4), then one outside each frustum plane (ids 5-10)
fn culling_scene() -> Scene {
    let positions = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(2.0, 1.0, 0.0),
        Vec3::new(-2.0, -1.0, -5.0),
        Vec3::new(0.0, 0.0, -50.0),
        Vec3::new(-60.0, 0.0, 0.0),  // left
        Vec3::new(60.0, 0.0, 0.0),   // right
        Vec3::new(0.0, -60.0, 0.0),  // bottom
        Vec3::new(0.0, 60.0, 0.0),   // top
        Vec3::new(0.0, 0.0, 20.0),   // behind the near plane
        Vec3::new(0.0, 0.0, -200.0), // beyond the far plane
    ];
    let mut scene = Scene::new("culling");
    for (i, position) in positions.iter().enumerate() {
        scene.add_renderable(cube_at(i as u32 + 1, *position, material_of(MaterialKind::Phong)));
    }
    scene
}

fn items(scene: &Scene) -> Vec<RenderItem<'_>> {
    scene.renderables().map(|(key, r)| RenderItem::new(key, r)).collect()
}

fn ids(items: &[RenderItem<'_>]) -> Vec<u32> {
    items.iter().map(|item| item.renderable.object_id()).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_collect_in_view_boxes() {
    let scene = culling_scene();
    let culler = FrustumCuller::from_camera(&front_camera());

    let kept = culler.collect_in_view(&items(&scene), CullingGeometry::BoundingBox);

    assert_eq!(ids(&kept), vec![1, 2, 3, 4]);
}

#[test]
fn test_collect_in_view_spheres() {
    let scene = culling_scene();
    let culler = FrustumCuller::from_camera(&front_camera());

    let kept = culler.collect_in_view(&items(&scene), CullingGeometry::BoundingSphere);

    assert_eq!(ids(&kept), vec![1, 2, 3, 4]);
}

#[test]
fn test_straddling_object_is_kept() {
    // Half width of the view at the origin is ~5.52; this cube crosses the left plane
    let mut scene = Scene::new("straddle");
    scene.add_renderable(cube_at(1, Vec3::new(-5.6, 0.0, 0.0), material_of(MaterialKind::Lambert)));
    let culler = FrustumCuller::from_camera(&front_camera());

    for geometry in [CullingGeometry::BoundingBox, CullingGeometry::BoundingSphere] {
        assert_eq!(culler.collect_in_view(&items(&scene), geometry).len(), 1);
    }
}

#[test]
fn test_order_is_preserved() {
    let scene = culling_scene();
    let culler = FrustumCuller::from_camera(&front_camera());
    let mut all = items(&scene);
    all.reverse();

    let kept = culler.collect_in_view(&all, CullingGeometry::BoundingBox);

    assert_eq!(ids(&kept), vec![4, 3, 2, 1]);
}

#[test]
fn test_uses_world_transform() {
    let culler = FrustumCuller::from_camera(&front_camera());
    let inside = cube_at(1, Vec3::ZERO, material_of(MaterialKind::Phong));
    let moved = inside.clone().with_world_transform(glam::Mat4::from_translation(Vec3::new(0.0, 0.0, 50.0)));

    assert!(!culler.certainly_outside(&inside, CullingGeometry::BoundingBox));
    assert!(culler.certainly_outside(&moved, CullingGeometry::BoundingBox));
    assert!(culler.certainly_outside(&moved, CullingGeometry::BoundingSphere));
}

#[test]
fn test_empty_input() {
    let culler = FrustumCuller::from_camera(&front_camera());
    assert!(culler.collect_in_view(&[], CullingGeometry::BoundingBox).is_empty());
}
