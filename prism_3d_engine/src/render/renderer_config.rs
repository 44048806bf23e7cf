/// Renderer-wide configuration, fixed at `MainRenderer` construction.

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererConfig {
    /// Resolution of the renderer's own shadow map
    pub shadow_map_width: u32,
    pub shadow_map_height: u32,
    /// Ambient term added to every lit surface
    pub global_ambient: Vec3,
    /// Texture unit the shadow depth texture is bound to
    pub shadow_texture_unit: u32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            shadow_map_width: 2048,
            shadow_map_height: 2048,
            global_ambient: Vec3::splat(0.15),
            shadow_texture_unit: 1,
        }
    }
}
