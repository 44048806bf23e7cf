/// Spherical coordinates relative to an up-axis.
///
/// `polar` (phi) is measured from the up-axis, `azimuth` (theta) around it.
/// The mapping to cartesian components depends on which world axis is up:
///
/// | up | x | y | z |
/// |----|---|---|---|
/// | X  | r·cosφ | r·sinφ·cosθ | r·sinφ·sinθ |
/// | Y  | r·sinφ·sinθ | r·cosφ | r·sinφ·cosθ |
/// | Z  | r·sinφ·cosθ | r·sinφ·sinθ | r·cosφ |

use glam::Vec3;
use super::UpAxis;

/// Minimum distance kept between the polar angle and the poles
pub const SPHERICAL_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub polar: f32,
    pub azimuth: f32,
}

impl Spherical {
    pub fn new(radius: f32, polar: f32, azimuth: f32) -> Self {
        Self { radius, polar, azimuth }
    }

    /// Spherical coordinates of `offset` (a vector from the orbit target)
    pub fn from_cartesian(offset: Vec3, up_axis: UpAxis) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self { radius: 0.0, polar: 0.0, azimuth: 0.0 };
        }

        // (along-up, first planar, second planar) components
        let (u, a, b) = match up_axis {
            UpAxis::X => (offset.x, offset.z, offset.y),
            UpAxis::Y => (offset.y, offset.x, offset.z),
            UpAxis::Z => (offset.z, offset.y, offset.x),
        };

        Self {
            radius,
            polar: (u / radius).clamp(-1.0, 1.0).acos(),
            azimuth: a.atan2(b),
        }
    }

    /// Cartesian offset for these coordinates
    pub fn to_cartesian(&self, up_axis: UpAxis) -> Vec3 {
        let (sp, cp) = self.polar.sin_cos();
        let (st, ct) = self.azimuth.sin_cos();
        let r = self.radius;

        match up_axis {
            UpAxis::X => Vec3::new(r * cp, r * sp * ct, r * sp * st),
            UpAxis::Y => Vec3::new(r * sp * st, r * cp, r * sp * ct),
            UpAxis::Z => Vec3::new(r * sp * ct, r * sp * st, r * cp),
        }
    }

    /// Keep the polar angle strictly away from the poles
    pub fn make_safe(&mut self) {
        self.polar = self.polar.clamp(SPHERICAL_EPSILON, std::f32::consts::PI - SPHERICAL_EPSILON);
    }
}

#[cfg(test)]
#[path = "spherical_tests.rs"]
mod tests;
