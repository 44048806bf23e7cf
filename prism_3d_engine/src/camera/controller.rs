/// Camera control schemes.
///
/// A CameraController owns the scheme-specific state (movement flags,
/// spherical coordinates, drag state) and mutates a `CameraState` in
/// response to input events and frame ticks.

use std::fmt;
use crate::input::InputEvent;
use super::camera_state::CameraState;

/// Control scheme identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerKind {
    Fixed,
    Fps,
    Orbit,
}

impl fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerKind::Fixed => write!(f, "fixed"),
            ControllerKind::Fps => write!(f, "fps"),
            ControllerKind::Orbit => write!(f, "orbit"),
        }
    }
}

/// Strategy driving a camera.
///
/// `on_event` only records input; `update` applies it once per frame tick.
pub trait CameraController: Send + Sync {
    fn kind(&self) -> ControllerKind;

    /// Apply accumulated input to the camera. `dt` is in seconds.
    fn update(&mut self, state: &mut CameraState, dt: f32);

    /// Record an input event.
    fn on_event(&mut self, state: &mut CameraState, event: &InputEvent);
}

/// Fixed camera: no autonomous motion.
///
/// The pose only changes through explicit `CameraState::set_position` /
/// `set_target` calls.
#[derive(Debug, Default)]
pub struct FixedController;

impl FixedController {
    pub fn new() -> Self {
        Self
    }
}

impl CameraController for FixedController {
    fn kind(&self) -> ControllerKind {
        ControllerKind::Fixed
    }

    fn update(&mut self, _state: &mut CameraState, _dt: f32) {}

    fn on_event(&mut self, _state: &mut CameraState, _event: &InputEvent) {}
}
