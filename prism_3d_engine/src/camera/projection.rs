/// Projection parameters and projection-matrix construction.
///
/// Matrices use the OpenGL clip-space convention (depth in [-1, 1]),
/// right-handed, column-major.

use std::fmt;
use glam::Mat4;

/// Projection kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionKind {
    Perspective,
    Orthographic,
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionKind::Perspective => write!(f, "perspective"),
            ProjectionKind::Orthographic => write!(f, "orthographic"),
        }
    }
}

/// Projection parameters.
///
/// `fov` is the vertical field of view in degrees and only applies to
/// perspective projections; `width`/`height` are the view-volume extents
/// of orthographic projections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionData {
    pub kind: ProjectionKind,
    pub fov: f32,
    pub aspect: f32,
    pub width: f32,
    pub height: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl ProjectionData {
    /// Perspective projection (fov in degrees)
    pub fn perspective(fov: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            kind: ProjectionKind::Perspective,
            fov,
            aspect,
            width: 10.0 * aspect,
            height: 10.0,
            z_near,
            z_far,
        }
    }

    /// Orthographic projection covering `width` x `height` world units
    pub fn orthographic(width: f32, height: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            kind: ProjectionKind::Orthographic,
            fov: 45.0,
            aspect: if height > 0.0 { width / height } else { 1.0 },
            width,
            height,
            z_near,
            z_far,
        }
    }

    /// Build the projection matrix, scaled by `zoom` (1.0 = no zoom).
    pub fn matrix(&self, zoom: f32) -> Mat4 {
        match self.kind {
            ProjectionKind::Perspective => {
                let half_fov = (self.fov.to_radians() * 0.5).tan() / zoom;
                Mat4::perspective_rh_gl(2.0 * half_fov.atan(), self.aspect, self.z_near, self.z_far)
            }
            ProjectionKind::Orthographic => {
                let half_w = 0.5 * self.width / zoom;
                let half_h = 0.5 * self.height / zoom;
                Mat4::orthographic_rh_gl(-half_w, half_w, -half_h, half_h, self.z_near, self.z_far)
            }
        }
    }

    /// Rederive aspect (and the orthographic width) from a viewport size.
    pub fn fit_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
        self.width = self.height * self.aspect;
    }
}

impl Default for ProjectionData {
    fn default() -> Self {
        Self::perspective(45.0, 4.0 / 3.0, 0.1, 100.0)
    }
}

impl fmt::Display for ProjectionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ProjectionKind::Perspective => write!(
                f,
                "perspective (fov: {:.1}, aspect: {:.3}, near: {}, far: {})",
                self.fov, self.aspect, self.z_near, self.z_far
            ),
            ProjectionKind::Orthographic => write!(
                f,
                "orthographic (width: {:.2}, height: {:.2}, near: {}, far: {})",
                self.width, self.height, self.z_near, self.z_far
            ),
        }
    }
}
