/// Surface materials.
///
/// The material kind selects the shading program; the remaining fields are
/// uploaded as `u_material.*` uniforms.

use std::fmt;
use glam::Vec3;

/// Shading model of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialKind {
    Lambert,
    Phong,
    BlinnPhong,
}

impl MaterialKind {
    /// All kinds, in batch submission order
    pub const ALL: [MaterialKind; 3] = [
        MaterialKind::Lambert,
        MaterialKind::Phong,
        MaterialKind::BlinnPhong,
    ];
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialKind::Lambert => write!(f, "lambert"),
            MaterialKind::Phong => write!(f, "phong"),
            MaterialKind::BlinnPhong => write!(f, "blinn_phong"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub kind: MaterialKind,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
    /// Opacity in [0, 1]
    pub alpha: f32,
}

impl Material {
    /// Diffuse-only material
    pub fn lambert(ambient: Vec3, diffuse: Vec3) -> Self {
        Self {
            kind: MaterialKind::Lambert,
            ambient,
            diffuse,
            specular: Vec3::ZERO,
            shininess: 0.0,
            alpha: 1.0,
        }
    }

    pub fn phong(ambient: Vec3, diffuse: Vec3, specular: Vec3, shininess: f32) -> Self {
        Self {
            kind: MaterialKind::Phong,
            ambient,
            diffuse,
            specular,
            shininess,
            alpha: 1.0,
        }
    }

    pub fn blinn_phong(ambient: Vec3, diffuse: Vec3, specular: Vec3, shininess: f32) -> Self {
        Self {
            kind: MaterialKind::BlinnPhong,
            ..Self::phong(ambient, diffuse, specular, shininess)
        }
    }

    /// Same material with a different opacity (clamped to [0, 1])
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Whether the material is drawn in the blended (back-to-front) phase
    pub fn is_transparent(&self, use_blending: bool) -> bool {
        use_blending && self.alpha < 1.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::phong(Vec3::splat(1.0), Vec3::splat(1.0), Vec3::splat(1.0), 32.0)
    }
}
