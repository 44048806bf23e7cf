/// Frustum: six clipping planes for visibility culling.
///
/// Each plane is represented as a Vec4 (A, B, C, D) where:
/// - (A, B, C) is the inward-pointing unit normal
/// - D is the signed distance
/// - A point P is inside the frustum if dot(plane, P_homogeneous) >= 0 for all planes
///
/// Planes are extracted from an OpenGL-convention (depth in [-1, 1])
/// view-projection matrix. The frustum is derived data: rebuild it every
/// frame, never patch it.

use glam::{Mat4, Vec3, Vec4};
use crate::math::{BoundingBox, BoundingSphere};

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Frustum planes: left, right, bottom, top, near, far
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Gribb & Hartmann method; valid for perspective and orthographic
    /// projections.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let m = vp.to_cols_array_2d();

        // Row i of the matrix is (m[0][i], m[1][i], m[2][i], m[3][i])
        let row = |i: usize| Vec4::new(m[0][i], m[1][i], m[2][i], m[3][i]);
        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));

        let mut planes = [
            r3 + r0, // left
            r3 - r0, // right
            r3 + r1, // bottom
            r3 - r1, // top
            r3 + r2, // near
            r3 - r2, // far
        ];

        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Signed distance from a point to a plane (positive = inside)
    pub fn signed_distance(&self, plane: usize, point: Vec3) -> f32 {
        let p = self.planes[plane];
        p.truncate().dot(point) + p.w
    }

    /// True only if the box lies entirely outside at least one plane.
    ///
    /// "Positive vertex" test: for each plane, the box corner furthest along
    /// the plane normal is checked. Conservative: boxes near frustum corners
    /// may be kept even when invisible, but a visible box is never rejected.
    pub fn certainly_outside_box(&self, bbox: &BoundingBox) -> bool {
        self.planes.iter().any(|plane| {
            let normal = plane.truncate();
            let p_vertex = Vec3::new(
                if normal.x >= 0.0 { bbox.max.x } else { bbox.min.x },
                if normal.y >= 0.0 { bbox.max.y } else { bbox.min.y },
                if normal.z >= 0.0 { bbox.max.z } else { bbox.min.z },
            );
            normal.dot(p_vertex) + plane.w < 0.0
        })
    }

    /// True only if the sphere lies entirely outside at least one plane.
    pub fn certainly_outside_sphere(&self, sphere: &BoundingSphere) -> bool {
        self.planes
            .iter()
            .any(|plane| plane.truncate().dot(sphere.center) + plane.w < -sphere.radius)
    }

    /// World-space corners of the frustum described by `vp`.
    ///
    /// Ordered near (0-3) then far (4-7), each as
    /// (-x,-y), (+x,-y), (-x,+y), (+x,+y) in clip space.
    pub fn corners(vp: &Mat4) -> [Vec3; 8] {
        let inv = vp.inverse();
        let mut corners = [Vec3::ZERO; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            let ndc = Vec3::new(
                if i & 1 == 0 { -1.0 } else { 1.0 },
                if i & 2 == 0 { -1.0 } else { 1.0 },
                if i & 4 == 0 { -1.0 } else { 1.0 },
            );
            *corner = inv.project_point3(ndc);
        }
        corners
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
