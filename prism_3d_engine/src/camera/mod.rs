//! Camera module: pose, projection, control schemes and frustum.
//!
//! A `Camera` pairs a `CameraState` (pose, basis, matrices) with a boxed
//! `CameraController` (fixed, fps or orbit). Cameras are owned by the
//! scene and driven by the application: input events go through
//! `Camera::handle_event`, frame ticks through `Camera::update`.

mod camera;
mod camera_state;
mod controller;
mod fps_controller;
mod frustum;
mod orbit_controller;
mod projection;

pub use camera::Camera;
pub use camera_state::{CameraState, MIN_ZOOM};
pub use controller::{CameraController, ControllerKind, FixedController};
pub use fps_controller::{
    FpsController, FpsSettings, MoveFlags, MAX_PITCH,
    front_from_angles, angles_from_front,
};
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use orbit_controller::{OrbitController, OrbitSettings, OrbitState, POLAR_MARGIN, MIN_RADIUS};
pub use projection::{ProjectionData, ProjectionKind};
