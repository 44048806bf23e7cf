//! Scene management module
//!
//! Provides the scene arena (renderables, lights, cameras addressed by
//! stable keys) and the renderable, material and light types it owns.

mod light;
mod material;
mod renderable;
mod scene;

pub use light::{Light, LightKind};
pub use material::{Material, MaterialKind};
pub use renderable::{
    DrawPart, Geometry, Renderable, RenderableKind,
    FLAG_VISIBLE, FLAG_CAST_SHADOW,
};
pub use scene::{Scene, RenderableKey, LightKey, CameraKey};
