//! Graphics backend abstraction
//!
//! The renderer talks to the GPU exclusively through the `GraphicsBackend`
//! trait. Concrete backends (OpenGL, wgpu, ...) live outside this crate.

mod graphics_backend;

#[cfg(test)]
pub(crate) mod mock_backend;

pub use graphics_backend::{
    GraphicsBackend, ResourceHandle, ResourceKind, UniformValue, Viewport, ClearFlags,
};
