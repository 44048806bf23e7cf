/// First-person ("fps") free-look controller.
///
/// WASD / arrow keys set four independent movement flags; pointer motion
/// accumulates yaw/pitch deltas. Both are applied in `update`:
///
/// 1. clamp `dt` to `max_frame_delta`
/// 2. move along front/right (opposite flags cancel)
/// 3. apply the clamped pointer delta to yaw/pitch, pitch limited to ±89°
/// 4. rebuild the basis from (yaw, pitch) for the camera's up-axis
///
/// Angles are kept in degrees.

use bitflags::bitflags;
use glam::{Vec2, Vec3};
use winit::keyboard::KeyCode;
use crate::input::InputEvent;
use crate::math::UpAxis;
use super::camera_state::CameraState;
use super::controller::{CameraController, ControllerKind};

/// Pitch limit in degrees
pub const MAX_PITCH: f32 = 89.0;

bitflags! {
    /// Movement keys currently held
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MoveFlags: u8 {
        const FORWARD  = 1 << 0;
        const BACKWARD = 1 << 1;
        const LEFT     = 1 << 2;
        const RIGHT    = 1 << 3;
    }
}

/// FPS controller tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsSettings {
    /// Degrees per pixel of pointer motion
    pub sensitivity: f32,
    /// World units per second
    pub speed: f32,
    /// Max pointer delta (pixels, per axis) applied in one tick
    pub max_pointer_delta: f32,
    /// Max frame time (seconds) used for movement
    pub max_frame_delta: f32,
}

impl Default for FpsSettings {
    fn default() -> Self {
        Self {
            sensitivity: 0.25,
            speed: 250.0,
            max_pointer_delta: 10.0,
            max_frame_delta: 0.05,
        }
    }
}

pub struct FpsController {
    settings: FpsSettings,
    flags: MoveFlags,
    yaw: f32,
    pitch: f32,
    last_cursor: Option<Vec2>,
    pending_delta: Vec2,
}

impl FpsController {
    /// Controller whose initial angles match the camera's current front
    pub fn new(state: &CameraState, settings: FpsSettings) -> Self {
        let (yaw, pitch) = angles_from_front(state.front(), state.up_axis());
        Self {
            settings,
            flags: MoveFlags::empty(),
            yaw,
            pitch: pitch.clamp(-MAX_PITCH, MAX_PITCH),
            last_cursor: None,
            pending_delta: Vec2::ZERO,
        }
    }

    pub fn settings(&self) -> &FpsSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut FpsSettings {
        &mut self.settings
    }

    pub fn flags(&self) -> MoveFlags {
        self.flags
    }

    /// Yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees, always within [-89, 89]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    fn key_flag(code: KeyCode) -> Option<MoveFlags> {
        match code {
            KeyCode::KeyW | KeyCode::ArrowUp => Some(MoveFlags::FORWARD),
            KeyCode::KeyS | KeyCode::ArrowDown => Some(MoveFlags::BACKWARD),
            KeyCode::KeyA | KeyCode::ArrowLeft => Some(MoveFlags::LEFT),
            KeyCode::KeyD | KeyCode::ArrowRight => Some(MoveFlags::RIGHT),
            _ => None,
        }
    }

    /// Signed (forward, right) axis values from the held keys
    fn move_axes(&self) -> (f32, f32) {
        let axis = |pos: MoveFlags, neg: MoveFlags| -> f32 {
            match (self.flags.contains(pos), self.flags.contains(neg)) {
                (true, false) => 1.0,
                (false, true) => -1.0,
                _ => 0.0,
            }
        };
        (
            axis(MoveFlags::FORWARD, MoveFlags::BACKWARD),
            axis(MoveFlags::RIGHT, MoveFlags::LEFT),
        )
    }
}

impl CameraController for FpsController {
    fn kind(&self) -> ControllerKind {
        ControllerKind::Fps
    }

    fn update(&mut self, state: &mut CameraState, dt: f32) {
        let dt = dt.clamp(0.0, self.settings.max_frame_delta);

        let (forward, sideways) = self.move_axes();
        if forward != 0.0 || sideways != 0.0 {
            let step = self.settings.speed * dt;
            let offset = state.front() * (forward * step) + state.right() * (sideways * step);
            state.translate(offset);
        }

        let max = self.settings.max_pointer_delta;
        let delta = self.pending_delta.clamp(Vec2::splat(-max), Vec2::splat(max));
        self.pending_delta = Vec2::ZERO;

        // Screen y grows downward: moving the pointer up looks up
        self.yaw += self.settings.sensitivity * delta.x;
        self.pitch = (self.pitch - self.settings.sensitivity * delta.y).clamp(-MAX_PITCH, MAX_PITCH);

        state.set_front(front_from_angles(self.yaw, self.pitch, state.up_axis()));
    }

    fn on_event(&mut self, _state: &mut CameraState, event: &InputEvent) {
        match *event {
            InputEvent::Key { code, pressed } => {
                if let Some(flag) = Self::key_flag(code) {
                    self.flags.set(flag, pressed);
                }
            }
            InputEvent::MouseMove { position } => {
                if let Some(last) = self.last_cursor {
                    self.pending_delta += position - last;
                }
                self.last_cursor = Some(position);
            }
            _ => {}
        }
    }
}

/// Front vector for (yaw, pitch) in degrees, per up-axis
pub fn front_from_angles(yaw: f32, pitch: f32, up_axis: UpAxis) -> Vec3 {
    let (sy, cy) = yaw.to_radians().sin_cos();
    let (sp, cp) = pitch.to_radians().sin_cos();

    let front = match up_axis {
        UpAxis::X => Vec3::new(sp, cp * sy, cp * cy),
        UpAxis::Y => Vec3::new(cp * cy, sp, cp * sy),
        UpAxis::Z => Vec3::new(cp * sy, cp * cy, sp),
    };
    front.normalize()
}

/// Inverse of `front_from_angles`: (yaw, pitch) in degrees
pub fn angles_from_front(front: Vec3, up_axis: UpAxis) -> (f32, f32) {
    let f = front.normalize();
    let (along_up, yaw_sin, yaw_cos) = match up_axis {
        UpAxis::X => (f.x, f.y, f.z),
        UpAxis::Y => (f.y, f.z, f.x),
        UpAxis::Z => (f.z, f.x, f.y),
    };
    let pitch = along_up.clamp(-1.0, 1.0).asin().to_degrees();
    let yaw = yaw_sin.atan2(yaw_cos).to_degrees();
    (yaw, pitch)
}

#[cfg(test)]
#[path = "fps_controller_tests.rs"]
mod tests;
