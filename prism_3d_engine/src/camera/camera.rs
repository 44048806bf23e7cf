/// Camera: pose/projection state driven by a control scheme.
///
/// The state and the controller are separate so that each scheme keeps its
/// own mutable data (movement flags, drag state, spherical deltas) while
/// sharing one pose representation.

use std::fmt;
use glam::{Mat4, Vec3};
use crate::input::InputEvent;
use crate::math::UpAxis;
use super::camera_state::CameraState;
use super::controller::{CameraController, ControllerKind, FixedController};
use super::fps_controller::{FpsController, FpsSettings};
use super::orbit_controller::{OrbitController, OrbitSettings};
use super::projection::ProjectionData;

pub struct Camera {
    state: CameraState,
    controller: Box<dyn CameraController>,
}

impl Camera {
    /// Camera driven by an arbitrary controller
    pub fn new(state: CameraState, controller: Box<dyn CameraController>) -> Self {
        Self { state, controller }
    }

    /// Camera that only moves through explicit setters
    pub fn fixed(
        name: &str,
        position: Vec3,
        target: Vec3,
        up_axis: UpAxis,
        projection: ProjectionData,
    ) -> Self {
        let state = CameraState::new(name, position, target, up_axis, projection);
        Self::new(state, Box::new(FixedController::new()))
    }

    /// First-person free-look camera
    pub fn fps(
        name: &str,
        position: Vec3,
        target: Vec3,
        up_axis: UpAxis,
        projection: ProjectionData,
        settings: FpsSettings,
    ) -> Self {
        let state = CameraState::new(name, position, target, up_axis, projection);
        let controller = FpsController::new(&state, settings);
        Self::new(state, Box::new(controller))
    }

    /// Camera orbiting around `target`
    pub fn orbit(
        name: &str,
        position: Vec3,
        target: Vec3,
        up_axis: UpAxis,
        projection: ProjectionData,
        settings: OrbitSettings,
    ) -> Self {
        let state = CameraState::new(name, position, target, up_axis, projection);
        Self::new(state, Box::new(OrbitController::new(settings)))
    }

    // ===== ACCESSORS =====

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CameraState {
        &mut self.state
    }

    pub fn name(&self) -> &str {
        self.state.name()
    }

    pub fn kind(&self) -> ControllerKind {
        self.controller.kind()
    }

    pub fn position(&self) -> Vec3 {
        self.state.position()
    }

    pub fn view_matrix(&self) -> &Mat4 {
        self.state.view_matrix()
    }

    pub fn proj_matrix(&self) -> &Mat4 {
        self.state.proj_matrix()
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.state.view_projection_matrix()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn set_active(&mut self, active: bool) {
        self.state.set_active(active);
    }

    // ===== FRAME =====

    /// Advance the controller by `dt` seconds (no-op when inactive)
    pub fn update(&mut self, dt: f32) {
        if !self.state.is_active() {
            return;
        }
        self.controller.update(&mut self.state, dt);
    }

    /// Forward an input event to the controller (ignored when inactive).
    ///
    /// Resize events rederive the projection even on an inactive camera.
    pub fn handle_event(&mut self, event: &InputEvent) {
        if let InputEvent::Resize { width, height } = *event {
            self.state.resize(width, height);
        }
        if !self.state.is_active() {
            return;
        }
        self.controller.on_event(&mut self.state, event);
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.state;
        writeln!(f, "Camera '{}' ({})", s.name(), self.kind())?;
        writeln!(f, "  position : {:?}", s.position())?;
        writeln!(f, "  target   : {:?}", s.target())?;
        writeln!(f, "  front    : {:?}", s.front())?;
        writeln!(f, "  world-up : {}", s.up_axis())?;
        writeln!(f, "  zoom     : {}", s.zoom())?;
        writeln!(f, "  active   : {}", s.is_active())?;
        write!(f, "  proj     : {}", s.projection())
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
