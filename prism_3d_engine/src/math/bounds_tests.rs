use glam::{Mat4, Quat, Vec3};
use super::*;

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

// ============================================================================
// BoundingBox
// ============================================================================

#[test]
fn test_box_new_reorders_corners() {
    let bbox = BoundingBox::new(Vec3::new(1.0, -2.0, 3.0), Vec3::new(-1.0, 2.0, -3.0));
    assert_eq!(bbox.min, Vec3::new(-1.0, -2.0, -3.0));
    assert_eq!(bbox.max, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(bbox.center(), Vec3::ZERO);
    assert_eq!(bbox.half_extents(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_box_corners_cover_extremes() {
    let bbox = BoundingBox::new(Vec3::ZERO, Vec3::ONE);
    let corners = bbox.corners();
    assert_eq!(corners[0], Vec3::ZERO);
    assert_eq!(corners[7], Vec3::ONE);
    for c in corners {
        assert!(bbox.contains_point(c));
    }
}

#[test]
fn test_box_transformed_translation() {
    let bbox = BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let moved = bbox.transformed(&Mat4::from_translation(Vec3::new(10.0, 0.0, -5.0)));
    assert!(approx(moved.min, Vec3::new(9.0, -1.0, -6.0)));
    assert!(approx(moved.max, Vec3::new(11.0, 1.0, -4.0)));
}

#[test]
fn test_box_transformed_rotation_encloses_corners() {
    let bbox = BoundingBox::new(Vec3::new(-1.0, -2.0, -0.5), Vec3::new(1.0, 2.0, 0.5));
    let m = Mat4::from_rotation_translation(
        Quat::from_rotation_z(0.7) * Quat::from_rotation_x(0.3),
        Vec3::new(3.0, 1.0, 2.0),
    );
    let world = bbox.transformed(&m);

    for c in bbox.corners() {
        let p = m.transform_point3(c);
        assert!(p.cmpge(world.min - Vec3::splat(1e-4)).all());
        assert!(p.cmple(world.max + Vec3::splat(1e-4)).all());
    }
}

#[test]
fn test_box_union() {
    let a = BoundingBox::new(Vec3::ZERO, Vec3::ONE);
    let b = BoundingBox::new(Vec3::splat(-2.0), Vec3::splat(0.5));
    let u = a.union(&b);
    assert_eq!(u.min, Vec3::splat(-2.0));
    assert_eq!(u.max, Vec3::ONE);
}

// ============================================================================
// BoundingSphere
// ============================================================================

#[test]
fn test_sphere_from_box() {
    let sphere = BoundingSphere::from_box(&BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0)));
    assert_eq!(sphere.center, Vec3::ZERO);
    assert!((sphere.radius - 3.0_f32.sqrt()).abs() < 1e-5);
}

#[test]
fn test_sphere_negative_radius_is_made_positive() {
    assert_eq!(BoundingSphere::new(Vec3::ZERO, -2.0).radius, 2.0);
}

#[test]
fn test_sphere_transformed_uses_largest_scale() {
    let sphere = BoundingSphere::new(Vec3::new(1.0, 0.0, 0.0), 1.0);
    let m = Mat4::from_scale_rotation_translation(
        Vec3::new(1.0, 3.0, 2.0),
        Quat::IDENTITY,
        Vec3::new(0.0, 5.0, 0.0),
    );
    let world = sphere.transformed(&m);
    assert!(approx(world.center, Vec3::new(1.0, 5.0, 0.0)));
    assert!((world.radius - 3.0).abs() < 1e-5);
}
