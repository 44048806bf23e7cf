use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use glam::Vec3;
use super::*;
use crate::math::UpAxis;

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

// ============================================================================
// AXIS MAPPING
// ============================================================================

#[test]
fn test_zero_polar_points_along_up_axis() {
    let s = Spherical::new(2.0, 0.0, 1.3);
    assert!(approx(s.to_cartesian(UpAxis::X), Vec3::new(2.0, 0.0, 0.0)));
    assert!(approx(s.to_cartesian(UpAxis::Y), Vec3::new(0.0, 2.0, 0.0)));
    assert!(approx(s.to_cartesian(UpAxis::Z), Vec3::new(0.0, 0.0, 2.0)));
}

#[test]
fn test_z_up_equator() {
    let s = Spherical::new(1.0, FRAC_PI_2, 0.0);
    assert!(approx(s.to_cartesian(UpAxis::Z), Vec3::X));
    let s = Spherical::new(1.0, FRAC_PI_2, FRAC_PI_2);
    assert!(approx(s.to_cartesian(UpAxis::Z), Vec3::Y));
}

#[test]
fn test_y_up_equator() {
    let s = Spherical::new(1.0, FRAC_PI_2, 0.0);
    assert!(approx(s.to_cartesian(UpAxis::Y), Vec3::Z));
    let s = Spherical::new(1.0, FRAC_PI_2, FRAC_PI_2);
    assert!(approx(s.to_cartesian(UpAxis::Y), Vec3::X));
}

#[test]
fn test_from_cartesian_inverts_mapping_for_every_axis() {
    let offsets = [
        Vec3::new(2.0, 2.0, 2.0),
        Vec3::new(-1.0, 0.5, 3.0),
        Vec3::new(0.3, -4.0, -1.0),
    ];
    for axis in [UpAxis::X, UpAxis::Y, UpAxis::Z] {
        for offset in offsets {
            let s = Spherical::from_cartesian(offset, axis);
            assert!(approx(s.to_cartesian(axis), offset), "{:?} {:?}", axis, offset);
        }
    }
}

#[test]
fn test_from_cartesian_diagonal_z_up() {
    let s = Spherical::from_cartesian(Vec3::new(2.0, 2.0, 2.0), UpAxis::Z);
    assert!((s.radius - 12.0_f32.sqrt()).abs() < 1e-5);
    assert!((s.azimuth - FRAC_PI_4).abs() < 1e-5);
    assert!((s.polar - (1.0 / 3.0_f32.sqrt()).acos()).abs() < 1e-5);
}

#[test]
fn test_from_cartesian_zero_offset() {
    let s = Spherical::from_cartesian(Vec3::ZERO, UpAxis::Y);
    assert_eq!(s, Spherical::new(0.0, 0.0, 0.0));
}

// ============================================================================
// make_safe
// ============================================================================

#[test]
fn test_make_safe_moves_off_poles() {
    let mut s = Spherical::new(1.0, 0.0, 0.0);
    s.make_safe();
    assert!(s.polar > 0.0);

    let mut s = Spherical::new(1.0, PI, 0.0);
    s.make_safe();
    assert!(s.polar < PI);

    let mut s = Spherical::new(1.0, 1.0, 0.0);
    s.make_safe();
    assert_eq!(s.polar, 1.0);
}
