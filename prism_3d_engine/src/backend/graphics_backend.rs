/// Graphics backend trait and the value types it exchanges with the renderer.
///
/// The backend owns every GPU object; the renderer only refers to them
/// through `ResourceHandle`s and issues bind/draw/uniform calls in a strict
/// sequential order. Creation and destruction of handles happen elsewhere.

use std::fmt;
use bitflags::bitflags;
use glam::{Mat4, Vec2, Vec3, Vec4};
use crate::error::Result;

// ===== HANDLES =====

/// Kind of GPU object a handle refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Buffer,
    VertexArray,
    Texture,
    Program,
    Framebuffer,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Buffer => write!(f, "buffer"),
            ResourceKind::VertexArray => write!(f, "vertex_array"),
            ResourceKind::Texture => write!(f, "texture"),
            ResourceKind::Program => write!(f, "program"),
            ResourceKind::Framebuffer => write!(f, "framebuffer"),
        }
    }
}

/// Opaque reference to a backend-owned GPU object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceHandle {
    kind: ResourceKind,
    id: u32,
}

impl ResourceHandle {
    pub fn new(kind: ResourceKind, id: u32) -> Self {
        Self { kind, id }
    }

    pub fn buffer(id: u32) -> Self {
        Self::new(ResourceKind::Buffer, id)
    }

    pub fn vertex_array(id: u32) -> Self {
        Self::new(ResourceKind::VertexArray, id)
    }

    pub fn texture(id: u32) -> Self {
        Self::new(ResourceKind::Texture, id)
    }

    pub fn program(id: u32) -> Self {
        Self::new(ResourceKind::Program, id)
    }

    pub fn framebuffer(id: u32) -> Self {
        Self::new(ResourceKind::Framebuffer, id)
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn id(&self) -> u32 {
        self.id
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

// ===== UNIFORMS =====

/// Value uploaded to a named shader uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

impl UniformValue {
    /// Raw bytes as laid out for upload (column-major for matrices)
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            UniformValue::Int(v) => bytemuck::bytes_of(v),
            UniformValue::Float(v) => bytemuck::bytes_of(v),
            UniformValue::Vec2(v) => bytemuck::bytes_of(v),
            UniformValue::Vec3(v) => bytemuck::bytes_of(v),
            UniformValue::Vec4(v) => bytemuck::bytes_of(v),
            UniformValue::Mat4(v) => bytemuck::bytes_of(v),
        }
    }

    /// GLSL-style type name
    pub fn type_name(&self) -> &'static str {
        match self {
            UniformValue::Int(_) => "int",
            UniformValue::Float(_) => "float",
            UniformValue::Vec2(_) => "vec2",
            UniformValue::Vec3(_) => "vec3",
            UniformValue::Vec4(_) => "vec4",
            UniformValue::Mat4(_) => "mat4",
        }
    }
}

impl From<i32> for UniformValue {
    fn from(v: i32) -> Self {
        UniformValue::Int(v)
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        UniformValue::Float(v)
    }
}

impl From<Vec2> for UniformValue {
    fn from(v: Vec2) -> Self {
        UniformValue::Vec2(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        UniformValue::Vec3(v)
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        UniformValue::Vec4(v)
    }
}

impl From<Mat4> for UniformValue {
    fn from(v: Mat4) -> Self {
        UniformValue::Mat4(v)
    }
}

// ===== FRAME STATE =====

/// Viewport rectangle in pixels (origin bottom-left)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport at the origin covering `width` x `height`
    pub fn with_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

bitflags! {
    /// Buffers cleared at the start of a pass
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u8 {
        const COLOR   = 1 << 0;
        const DEPTH   = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

// ===== BACKEND TRAIT =====

/// Immediate-mode graphics backend.
///
/// Models a single piece of globally mutable GPU state (bound program,
/// bound vertex array, texture units). Calls must be issued sequentially
/// from one thread; the renderer never interleaves passes.
pub trait GraphicsBackend: Send + Sync {
    /// Bind a buffer, vertex array, texture (unit 0), program or framebuffer
    fn bind(&mut self, handle: ResourceHandle) -> Result<()>;

    /// Unbind the object previously bound with `bind`
    fn unbind(&mut self, handle: ResourceHandle) -> Result<()>;

    /// Bind a texture to a given texture unit
    fn bind_texture(&mut self, unit: u32, texture: ResourceHandle) -> Result<()>;

    /// Draw `count` indices from the bound vertex array
    fn draw_indexed(&mut self, count: u32) -> Result<()>;

    /// Draw `count` vertices from the bound vertex array
    fn draw_arrays(&mut self, count: u32) -> Result<()>;

    /// Upload a uniform to the bound program
    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<()>;

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Currently active viewport
    fn viewport(&self) -> Viewport;

    /// Clear buffers of the bound framebuffer
    fn clear(&mut self, flags: ClearFlags) -> Result<()>;
}

#[cfg(test)]
#[path = "graphics_backend_tests.rs"]
mod tests;
