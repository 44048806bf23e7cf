/// Camera pose, orientation basis and cached matrices.
///
/// `CameraState` is shared by every control scheme. Controllers mutate it
/// through the setters below, which keep the basis and the view matrix in
/// sync with position/target.

use glam::{Mat4, UVec2, Vec3, Vec4};
use crate::engine_debug;
use crate::engine_warn;
use crate::math::UpAxis;
use super::projection::ProjectionData;

/// Below this length a cross product is treated as degenerate
const BASIS_EPSILON: f32 = 1e-6;

/// Zoom values closer to zero than this are rejected
pub const MIN_ZOOM: f32 = 1e-3;

#[derive(Debug, Clone)]
pub struct CameraState {
    name: String,
    position: Vec3,
    target: Vec3,
    up_axis: UpAxis,
    world_up: Vec3,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    view_matrix: Mat4,
    proj_matrix: Mat4,
    projection: ProjectionData,
    zoom: f32,
    viewport: UVec2,
    active: bool,
}

impl CameraState {
    /// Create a camera looking from `position` toward `target`.
    ///
    /// If the view direction is parallel to the world up-axis, a basis
    /// built from the other two world axes is used instead.
    pub fn new(
        name: &str,
        position: Vec3,
        target: Vec3,
        up_axis: UpAxis,
        projection: ProjectionData,
    ) -> Self {
        let world_up = up_axis.world_up();
        let mut state = Self {
            name: name.to_string(),
            position,
            target,
            up_axis,
            world_up,
            front: Vec3::ZERO,
            right: Vec3::ZERO,
            up: Vec3::ZERO,
            view_matrix: Mat4::IDENTITY,
            proj_matrix: Mat4::IDENTITY,
            projection,
            zoom: 1.0,
            viewport: UVec2::new(1024, 768),
            active: true,
        };
        state.init_basis();
        state.build_view_matrix();
        state.build_proj_matrix();
        state
    }

    // ===== GETTERS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn up_axis(&self) -> UpAxis {
        self.up_axis
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    /// Unit view direction
    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    pub fn proj_matrix(&self) -> &Mat4 {
        &self.proj_matrix
    }

    /// Combined projection * view
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.proj_matrix * self.view_matrix
    }

    pub fn projection(&self) -> &ProjectionData {
        &self.projection
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Viewport size in pixels (updated on resize)
    pub fn viewport(&self) -> UVec2 {
        self.viewport
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    // ===== POSE =====

    /// Move the camera, keeping it aimed at the current target
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.recompute_basis();
        self.build_view_matrix();
    }

    /// Aim at a new target point
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.recompute_basis();
        self.build_view_matrix();
    }

    pub fn set_position_and_target(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.target = target;
        self.recompute_basis();
        self.build_view_matrix();
    }

    /// Orient the camera along `front` (free-look cameras).
    ///
    /// The target is moved to `position + front`. The caller guarantees that
    /// `front` is not parallel to the world up-axis.
    pub fn set_front(&mut self, front: Vec3) {
        self.front = front.normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
        self.target = self.position + self.front;
        self.build_view_matrix();
    }

    /// Translate position and target together (orientation unchanged)
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
        self.target += offset;
        self.build_view_matrix();
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Recompute `{front, right, up}` from position, target and world-up.
    ///
    /// A degenerate orientation (target on the camera, or front parallel
    /// to world-up) keeps the previous basis.
    pub fn recompute_basis(&mut self) {
        let direction = self.target - self.position;
        if direction.length_squared() < BASIS_EPSILON * BASIS_EPSILON {
            engine_debug!("prism3d::Camera", "Camera '{}': target on camera, basis kept", self.name);
            return;
        }

        let front = direction.normalize();
        let right = front.cross(self.world_up);
        if right.length() < BASIS_EPSILON {
            engine_debug!("prism3d::Camera", "Camera '{}': front parallel to world-up, basis kept", self.name);
            return;
        }

        self.front = front;
        self.right = right.normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    fn init_basis(&mut self) {
        // Fallback basis from the two non-up world axes
        let (front, right) = match self.up_axis {
            UpAxis::X => (Vec3::NEG_Z, Vec3::NEG_Y),
            UpAxis::Y => (Vec3::NEG_Z, Vec3::X),
            UpAxis::Z => (Vec3::Y, Vec3::X),
        };
        self.front = front;
        self.right = right;
        self.up = right.cross(front);
        self.recompute_basis();
    }

    // ===== MATRICES =====

    /// Rebuild the view matrix from the basis and position.
    ///
    /// Rows are (right, up, -front); translation is `-R^T * position`.
    pub fn build_view_matrix(&mut self) {
        let (r, u, f, p) = (self.right, self.up, self.front, self.position);
        self.view_matrix = Mat4::from_cols(
            Vec4::new(r.x, u.x, -f.x, 0.0),
            Vec4::new(r.y, u.y, -f.y, 0.0),
            Vec4::new(r.z, u.z, -f.z, 0.0),
            Vec4::new(-r.dot(p), -u.dot(p), f.dot(p), 1.0),
        );
    }

    /// Rebuild the projection matrix from the projection parameters and zoom
    pub fn build_proj_matrix(&mut self) {
        self.proj_matrix = self.projection.matrix(self.zoom);
    }

    // ===== PROJECTION =====

    pub fn set_projection(&mut self, projection: ProjectionData) {
        self.projection = projection;
        self.build_proj_matrix();
    }

    /// Set the zoom factor; values closer to zero than `MIN_ZOOM` are ignored.
    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom.abs() < MIN_ZOOM {
            engine_warn!(
                "prism3d::Camera",
                "Camera '{}': zoom {} below minimum {}, projection unchanged",
                self.name, zoom, MIN_ZOOM
            );
            return;
        }
        self.zoom = zoom;
        self.build_proj_matrix();
    }

    /// Window resize: rederive aspect/extents and rebuild the projection.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            engine_debug!(
                "prism3d::Camera",
                "Camera '{}': ignoring resize to {}x{}",
                self.name, width, height
            );
            return;
        }
        self.viewport = UVec2::new(width, height);
        self.projection.fit_viewport(width, height);
        self.build_proj_matrix();
    }
}

#[cfg(test)]
#[path = "camera_state_tests.rs"]
mod tests;
