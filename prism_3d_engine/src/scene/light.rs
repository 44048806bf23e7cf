/// Light sources.
///
/// Only directional lights cast shadows; point and spot lights contribute
/// shading only.

use std::fmt;
use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Infinitely distant light shining along `direction`
    Directional { direction: Vec3 },
    /// Omnidirectional light with distance attenuation
    Point { position: Vec3, constant: f32, linear: f32, quadratic: f32 },
    /// Cone light; cutoffs are cosines of the cone half-angles
    Spot { position: Vec3, direction: Vec3, inner_cutoff: f32, outer_cutoff: f32 },
}

impl fmt::Display for LightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightKind::Directional { .. } => write!(f, "directional"),
            LightKind::Point { .. } => write!(f, "point"),
            LightKind::Spot { .. } => write!(f, "spot"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    name: String,
    kind: LightKind,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    active: bool,
}

/// Fallback when a zero direction is given
const DEFAULT_DIRECTION: Vec3 = Vec3::NEG_Y;

fn normalize_direction(direction: Vec3) -> Vec3 {
    direction.try_normalize().unwrap_or(DEFAULT_DIRECTION)
}

impl Light {
    pub fn directional(name: &str, direction: Vec3, ambient: Vec3, diffuse: Vec3, specular: Vec3) -> Self {
        Self {
            name: name.to_string(),
            kind: LightKind::Directional { direction: normalize_direction(direction) },
            ambient,
            diffuse,
            specular,
            active: true,
        }
    }

    /// Point light with attenuation 1 / (constant + linear*d + quadratic*d^2)
    pub fn point(
        name: &str,
        position: Vec3,
        ambient: Vec3,
        diffuse: Vec3,
        specular: Vec3,
        attenuation: (f32, f32, f32),
    ) -> Self {
        let (constant, linear, quadratic) = attenuation;
        Self {
            name: name.to_string(),
            kind: LightKind::Point { position, constant, linear, quadratic },
            ambient,
            diffuse,
            specular,
            active: true,
        }
    }

    /// Spot light; `cutoffs_deg` (inner, outer) are half-angles in degrees,
    /// stored as cosines
    pub fn spot(
        name: &str,
        position: Vec3,
        direction: Vec3,
        ambient: Vec3,
        diffuse: Vec3,
        specular: Vec3,
        cutoffs_deg: (f32, f32),
    ) -> Self {
        let (inner_cutoff_deg, outer_cutoff_deg) = cutoffs_deg;
        Self {
            name: name.to_string(),
            kind: LightKind::Spot {
                position,
                direction: normalize_direction(direction),
                inner_cutoff: inner_cutoff_deg.to_radians().cos(),
                outer_cutoff: outer_cutoff_deg.to_radians().cos(),
            },
            ambient,
            diffuse,
            specular,
            active: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &LightKind {
        &self.kind
    }

    pub fn is_directional(&self) -> bool {
        matches!(self.kind, LightKind::Directional { .. })
    }

    /// Light direction (directional and spot lights)
    pub fn direction(&self) -> Option<Vec3> {
        match self.kind {
            LightKind::Directional { direction } | LightKind::Spot { direction, .. } => Some(direction),
            LightKind::Point { .. } => None,
        }
    }

    /// Light position (point and spot lights)
    pub fn position(&self) -> Option<Vec3> {
        match self.kind {
            LightKind::Point { position, .. } | LightKind::Spot { position, .. } => Some(position),
            LightKind::Directional { .. } => None,
        }
    }

    /// Change the direction of a directional or spot light (ignored for point lights)
    pub fn set_direction(&mut self, new_direction: Vec3) {
        let new_direction = normalize_direction(new_direction);
        match &mut self.kind {
            LightKind::Directional { direction } | LightKind::Spot { direction, .. } => {
                *direction = new_direction;
            }
            LightKind::Point { .. } => {}
        }
    }

    /// Move a point or spot light (ignored for directional lights)
    pub fn set_position(&mut self, new_position: Vec3) {
        match &mut self.kind {
            LightKind::Point { position, .. } | LightKind::Spot { position, .. } => {
                *position = new_position;
            }
            LightKind::Directional { .. } => {}
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}
