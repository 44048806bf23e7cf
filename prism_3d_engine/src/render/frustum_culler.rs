/// Frustum culler. Tests renderable bounds against the camera frustum.
///
/// The test is conservative: a renderable is dropped only when its
/// world-space bounds lie entirely outside one of the six planes. Some
/// invisible objects near frustum corners survive, but a visible object is
/// never dropped.

use glam::Mat4;
use crate::camera::{Camera, Frustum};
use crate::math::{BoundingBox, BoundingSphere};
use crate::scene::Renderable;
use super::render_item::RenderItem;
use super::render_options::CullingGeometry;

pub struct FrustumCuller {
    frustum: Frustum,
}

impl FrustumCuller {
    /// Culler for the volume of a combined `proj * view` matrix
    pub fn new(view_projection: &Mat4) -> Self {
        Self { frustum: Frustum::from_view_projection(view_projection) }
    }

    pub fn from_camera(camera: &Camera) -> Self {
        Self::new(&camera.view_projection_matrix())
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn certainly_outside_box(&self, bbox: &BoundingBox) -> bool {
        self.frustum.certainly_outside_box(bbox)
    }

    pub fn certainly_outside_sphere(&self, sphere: &BoundingSphere) -> bool {
        self.frustum.certainly_outside_sphere(sphere)
    }

    /// Test a renderable's world-space bounds of the selected kind
    pub fn certainly_outside(&self, renderable: &Renderable, geometry: CullingGeometry) -> bool {
        match geometry {
            CullingGeometry::BoundingBox => self.certainly_outside_box(&renderable.world_box()),
            CullingGeometry::BoundingSphere => self.certainly_outside_sphere(&renderable.world_sphere()),
        }
    }

    /// Keep the items that may be in view, preserving their order
    pub fn collect_in_view<'a>(
        &self,
        items: &[RenderItem<'a>],
        geometry: CullingGeometry,
    ) -> Vec<RenderItem<'a>> {
        items
            .iter()
            .filter(|item| !self.certainly_outside(item.renderable, geometry))
            .copied()
            .collect()
    }
}

#[cfg(test)]
#[path = "frustum_culler_tests.rs"]
mod tests;
