/// Orbit controller: rotate around, pan and dolly toward a target point.
///
/// Pointer buttons drive a small state machine:
///
/// | button    | state  |
/// |-----------|--------|
/// | primary   | Rotate |
/// | secondary | Pan    |
/// | middle    | Dolly  |
///
/// Any release returns to `Idle`. Pointer motion and scroll only accumulate
/// deltas; `update` applies them to the spherical coordinates of the camera
/// around its target, clamps them, and rebuilds the pose.
///
/// The effective polar range never reaches the poles and the effective
/// minimum distance is never zero, so the camera front can neither vanish
/// nor become parallel to the world up-axis.

use std::f32::consts::{PI, TAU};
use glam::{Vec2, Vec3};
use winit::event::MouseButton;
use crate::input::InputEvent;
use crate::math::Spherical;
use super::camera_state::CameraState;
use super::controller::{CameraController, ControllerKind};
use super::projection::ProjectionKind;

/// Polar angles are kept at least this far (radians) from the poles
pub const POLAR_MARGIN: f32 = 1e-3;

/// Smallest orbit radius ever produced
pub const MIN_RADIUS: f32 = 1e-3;

/// Dolly-drag exponent per pixel of vertical pointer motion
const DOLLY_PIXEL_STEP: f32 = 0.1;

/// Orbit interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrbitState {
    #[default]
    Idle,
    Rotate,
    Pan,
    Dolly,
}

/// Orbit controller tuning (angles in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSettings {
    pub min_polar: f32,
    pub max_polar: f32,
    /// Azimuth bounds; infinite bounds disable the clamp
    pub min_azimuth: f32,
    pub max_azimuth: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub enable_rotate: bool,
    pub enable_pan: bool,
    pub enable_zoom: bool,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    /// Pan along the camera up vector (true) or the world up-axis (false)
    pub screen_space_panning: bool,
    pub enable_damping: bool,
    /// Fraction of the pending delta applied per tick when damping
    pub damping_factor: f32,
    pub enable_auto_rotate: bool,
    /// Radians per second while idle
    pub auto_rotate_speed: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            min_polar: 0.0,
            max_polar: PI,
            min_azimuth: f32::NEG_INFINITY,
            max_azimuth: f32::INFINITY,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            enable_rotate: true,
            enable_pan: true,
            enable_zoom: true,
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            screen_space_panning: true,
            enable_damping: false,
            damping_factor: 0.05,
            enable_auto_rotate: false,
            auto_rotate_speed: TAU / 30.0,
        }
    }
}

impl OrbitSettings {
    /// Polar range actually applied (pole margins included)
    pub fn effective_polar_range(&self) -> (f32, f32) {
        let min = self.min_polar.max(POLAR_MARGIN);
        let max = self.max_polar.min(PI - POLAR_MARGIN).max(min);
        (min, max)
    }

    /// Distance range actually applied
    pub fn effective_distance_range(&self) -> (f32, f32) {
        let min = self.min_distance.max(MIN_RADIUS);
        (min, self.max_distance.max(min))
    }
}

pub struct OrbitController {
    settings: OrbitSettings,
    state: OrbitState,
    drag_last: Vec2,
    /// Pending (polar, azimuth) change; radius unused
    spherical_delta: Spherical,
    pan_offset: Vec3,
    scale: f32,
}

impl OrbitController {
    pub fn new(settings: OrbitSettings) -> Self {
        Self {
            settings,
            state: OrbitState::Idle,
            drag_last: Vec2::ZERO,
            spherical_delta: Spherical::new(0.0, 0.0, 0.0),
            pan_offset: Vec3::ZERO,
            scale: 1.0,
        }
    }

    pub fn settings(&self) -> &OrbitSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut OrbitSettings {
        &mut self.settings
    }

    pub fn state(&self) -> OrbitState {
        self.state
    }

    /// Current spherical coordinates of the camera around its target
    pub fn spherical(&self, camera: &CameraState) -> Spherical {
        Spherical::from_cartesian(camera.position() - camera.target(), camera.up_axis())
    }

    fn on_button(&mut self, button: MouseButton, pressed: bool, position: Vec2) {
        if !pressed {
            self.state = OrbitState::Idle;
            return;
        }
        if self.state != OrbitState::Idle {
            return;
        }

        let next = match button {
            MouseButton::Left if self.settings.enable_rotate => OrbitState::Rotate,
            MouseButton::Right if self.settings.enable_pan => OrbitState::Pan,
            MouseButton::Middle if self.settings.enable_zoom => OrbitState::Dolly,
            _ => OrbitState::Idle,
        };
        self.state = next;
        self.drag_last = position;
    }

    fn on_move(&mut self, camera: &CameraState, position: Vec2) {
        let delta = position - self.drag_last;
        self.drag_last = position;

        let viewport = camera.viewport().as_vec2();
        match self.state {
            OrbitState::Rotate => {
                let speed = TAU * self.settings.rotate_speed;
                self.spherical_delta.azimuth += speed * delta.x / viewport.x;
                self.spherical_delta.polar -= speed * delta.y / viewport.y;
            }
            OrbitState::Pan => self.pan(camera, delta, viewport),
            OrbitState::Dolly => self.dolly(-delta.y * DOLLY_PIXEL_STEP),
            OrbitState::Idle => {}
        }
    }

    fn pan(&mut self, camera: &CameraState, delta: Vec2, viewport: Vec2) {
        let projection = camera.projection();

        // World units per pixel at the target distance
        let (per_px_x, per_px_y) = match projection.kind {
            ProjectionKind::Perspective => {
                let distance = (camera.position() - camera.target()).length()
                    * (projection.fov.to_radians() * 0.5).tan();
                (2.0 * distance / viewport.y, 2.0 * distance / viewport.y)
            }
            ProjectionKind::Orthographic => (
                projection.width / camera.zoom() / viewport.x,
                projection.height / camera.zoom() / viewport.y,
            ),
        };

        let up = if self.settings.screen_space_panning {
            camera.up()
        } else {
            camera.world_up()
        };

        let speed = self.settings.pan_speed;
        self.pan_offset -= camera.right() * (delta.x * per_px_x * speed);
        self.pan_offset += up * (delta.y * per_px_y * speed);
    }

    /// Positive `steps` move closer to the target
    fn dolly(&mut self, steps: f32) {
        if !self.settings.enable_zoom {
            return;
        }
        let zoom_scale = 0.95_f32.powf(self.settings.zoom_speed);
        self.scale *= zoom_scale.powf(steps);
    }

    fn clamp_azimuth(&self, azimuth: f32) -> f32 {
        let (min, max) = (self.settings.min_azimuth, self.settings.max_azimuth);
        if !min.is_finite() && !max.is_finite() {
            return azimuth;
        }

        let (min, max) = (wrap_bound(min), wrap_bound(max));

        if min <= max {
            azimuth.max(min).min(max)
        } else if azimuth > (min + max) / 2.0 {
            // Range wraps through PI
            azimuth.max(min)
        } else {
            azimuth.min(max)
        }
    }
}

/// Bring a finite azimuth bound into [-PI, PI]
fn wrap_bound(bound: f32) -> f32 {
    if bound < -PI {
        bound + TAU
    } else if bound > PI {
        bound - TAU
    } else {
        bound
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(OrbitSettings::default())
    }
}

impl CameraController for OrbitController {
    fn kind(&self) -> ControllerKind {
        ControllerKind::Orbit
    }

    fn update(&mut self, camera: &mut CameraState, dt: f32) {
        let up_axis = camera.up_axis();
        let mut spherical = self.spherical(camera);

        if self.settings.enable_auto_rotate && self.state == OrbitState::Idle {
            self.spherical_delta.azimuth += self.settings.auto_rotate_speed * dt.max(0.0);
        }

        let (step, pan) = if self.settings.enable_damping {
            let df = self.settings.damping_factor;
            (
                Spherical::new(0.0, self.spherical_delta.polar * df, self.spherical_delta.azimuth * df),
                self.pan_offset * df,
            )
        } else {
            (self.spherical_delta, self.pan_offset)
        };

        spherical.azimuth = self.clamp_azimuth(spherical.azimuth + step.azimuth);

        let (min_polar, max_polar) = self.settings.effective_polar_range();
        spherical.polar = (spherical.polar + step.polar).max(min_polar).min(max_polar);
        spherical.make_safe();

        let (min_distance, max_distance) = self.settings.effective_distance_range();
        spherical.radius = (spherical.radius * self.scale).max(min_distance).min(max_distance);

        let target = camera.target() + pan;
        camera.set_position_and_target(target + spherical.to_cartesian(up_axis), target);

        if self.settings.enable_damping {
            let keep = 1.0 - self.settings.damping_factor;
            self.spherical_delta.polar *= keep;
            self.spherical_delta.azimuth *= keep;
            self.pan_offset *= keep;
        } else {
            self.spherical_delta = Spherical::new(0.0, 0.0, 0.0);
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;
    }

    fn on_event(&mut self, camera: &mut CameraState, event: &InputEvent) {
        match *event {
            InputEvent::MouseButton { button, pressed, position } => {
                self.on_button(button, pressed, position)
            }
            InputEvent::MouseMove { position } => self.on_move(camera, position),
            InputEvent::Scroll { offset } => self.dolly(offset.y),
            InputEvent::Key { .. } | InputEvent::Resize { .. } => {}
        }
    }
}

#[cfg(test)]
#[path = "orbit_controller_tests.rs"]
mod tests;
