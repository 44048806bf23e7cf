/// Renderable objects stored in a Scene.
///
/// A renderable is a list of draw parts (geometry + material + local
/// transform) sharing one world transform and one pair of local-space
/// bounding volumes. A `Mesh` has exactly one part; a `Model` has several.

use std::fmt;
use glam::{Mat4, Vec3};
use crate::backend::{GraphicsBackend, ResourceHandle};
use crate::error::Result;
use crate::math::{BoundingBox, BoundingSphere};
use super::material::Material;

/// Renderable is considered for drawing
pub const FLAG_VISIBLE: u64 = 1 << 0;
/// Renderable is drawn into the shadow map
pub const FLAG_CAST_SHADOW: u64 = 1 << 1;

// ===== GEOMETRY =====

/// GPU geometry referenced by handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Vertex array object holding vertex (and optional index) buffers
    pub vertex_array: ResourceHandle,
    /// Number of indices (0 = non-indexed)
    pub index_count: u32,
    pub vertex_count: u32,
}

impl Geometry {
    pub fn indexed(vertex_array: ResourceHandle, vertex_count: u32, index_count: u32) -> Self {
        Self { vertex_array, index_count, vertex_count }
    }

    pub fn non_indexed(vertex_array: ResourceHandle, vertex_count: u32) -> Self {
        Self { vertex_array, index_count: 0, vertex_count }
    }

    /// Bind the vertex array, issue one draw call, unbind.
    pub fn draw(&self, backend: &mut dyn GraphicsBackend) -> Result<()> {
        backend.bind(self.vertex_array)?;
        if self.index_count > 0 {
            backend.draw_indexed(self.index_count)?;
        } else {
            backend.draw_arrays(self.vertex_count)?;
        }
        backend.unbind(self.vertex_array)
    }
}

// ===== DRAW PART =====

#[derive(Debug, Clone, PartialEq)]
pub struct DrawPart {
    pub geometry: Geometry,
    pub material: Material,
    /// Transform relative to the owning renderable
    pub local_transform: Mat4,
}

impl DrawPart {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self { geometry, material, local_transform: Mat4::IDENTITY }
    }

    pub fn with_local_transform(mut self, local_transform: Mat4) -> Self {
        self.local_transform = local_transform;
        self
    }
}

// ===== RENDERABLE =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderableKind {
    Mesh,
    Model,
}

impl fmt::Display for RenderableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderableKind::Mesh => write!(f, "mesh"),
            RenderableKind::Model => write!(f, "model"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Renderable {
    name: String,
    /// Identifier used by the semantic view
    object_id: u32,
    kind: RenderableKind,
    parts: Vec<DrawPart>,
    /// Local-space bounds
    bounds_box: BoundingBox,
    bounds_sphere: BoundingSphere,
    flags: u64,
    world_transform: Mat4,
}

impl Renderable {
    /// Single-part renderable. The bounding sphere is derived from the box.
    pub fn mesh(
        name: &str,
        object_id: u32,
        geometry: Geometry,
        material: Material,
        bounds_box: BoundingBox,
    ) -> Self {
        Self {
            name: name.to_string(),
            object_id,
            kind: RenderableKind::Mesh,
            parts: vec![DrawPart::new(geometry, material)],
            bounds_box,
            bounds_sphere: BoundingSphere::from_box(&bounds_box),
            flags: FLAG_VISIBLE | FLAG_CAST_SHADOW,
            world_transform: Mat4::IDENTITY,
        }
    }

    /// Multi-part renderable. `bounds_box` must enclose every part.
    pub fn model(name: &str, object_id: u32, parts: Vec<DrawPart>, bounds_box: BoundingBox) -> Self {
        Self {
            name: name.to_string(),
            object_id,
            kind: RenderableKind::Model,
            parts,
            bounds_box,
            bounds_sphere: BoundingSphere::from_box(&bounds_box),
            flags: FLAG_VISIBLE | FLAG_CAST_SHADOW,
            world_transform: Mat4::IDENTITY,
        }
    }

    /// Replace the derived bounding sphere with a tighter one
    pub fn with_bounds_sphere(mut self, sphere: BoundingSphere) -> Self {
        self.bounds_sphere = sphere;
        self
    }

    pub fn with_world_transform(mut self, world_transform: Mat4) -> Self {
        self.world_transform = world_transform;
        self
    }

    // ===== ACCESSORS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn object_id(&self) -> u32 {
        self.object_id
    }

    pub fn kind(&self) -> RenderableKind {
        self.kind
    }

    pub fn parts(&self) -> &[DrawPart] {
        &self.parts
    }

    pub fn parts_mut(&mut self) -> &mut [DrawPart] {
        &mut self.parts
    }

    pub fn bounds_box(&self) -> &BoundingBox {
        &self.bounds_box
    }

    pub fn bounds_sphere(&self) -> &BoundingSphere {
        &self.bounds_sphere
    }

    pub fn world_transform(&self) -> &Mat4 {
        &self.world_transform
    }

    pub fn set_world_transform(&mut self, world_transform: Mat4) {
        self.world_transform = world_transform;
    }

    /// Bounding box moved to world space
    pub fn world_box(&self) -> BoundingBox {
        self.bounds_box.transformed(&self.world_transform)
    }

    /// Bounding sphere moved to world space
    pub fn world_sphere(&self) -> BoundingSphere {
        self.bounds_sphere.transformed(&self.world_transform)
    }

    /// Origin of the renderable in world space
    pub fn world_position(&self) -> Vec3 {
        self.world_transform.w_axis.truncate()
    }

    // ===== FLAGS =====

    pub fn flags(&self) -> u64 {
        self.flags
    }

    pub fn set_flags(&mut self, flags: u64) {
        self.flags = flags;
    }

    pub fn is_visible(&self) -> bool {
        self.flags & FLAG_VISIBLE != 0
    }

    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.flags |= FLAG_VISIBLE;
        } else {
            self.flags &= !FLAG_VISIBLE;
        }
    }

    pub fn casts_shadow(&self) -> bool {
        self.flags & FLAG_CAST_SHADOW != 0
    }

    pub fn set_cast_shadow(&mut self, cast: bool) {
        if cast {
            self.flags |= FLAG_CAST_SHADOW;
        } else {
            self.flags &= !FLAG_CAST_SHADOW;
        }
    }

    /// Drawn in the blended phase if any of its parts is transparent
    pub fn is_transparent(&self, use_blending: bool) -> bool {
        self.parts.iter().any(|part| part.material.is_transparent(use_blending))
    }
}

#[cfg(test)]
#[path = "renderable_tests.rs"]
mod tests;
