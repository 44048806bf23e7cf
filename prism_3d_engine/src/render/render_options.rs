/// Per-frame render options and renderer-wide configuration.
///
/// `RenderOptions` is a plain value handed to `MainRenderer::render` every
/// frame. Unset overrides (camera, light, shadow target, render target) fall
/// back to the scene's current camera, the scene's primary light, the
/// renderer's own shadow target and the default framebuffer.

use std::fmt;
use std::str::FromStr;
use glam::Vec3;
use rustc_hash::FxHashMap;
use crate::backend::{ResourceHandle, Viewport};
use crate::error::{Error, Result};
use crate::engine_warn;
use crate::scene::{CameraKey, LightKey};
use super::shadow_stage::{ShadowRangeConfig, ShadowTarget};

// ===== ENUMS =====

/// What the main pass writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderMode {
    /// Lit shading (optionally shadowed)
    #[default]
    Normal,
    /// View-space depth remapped to a color ramp
    DepthOnly,
    /// Flat color per object id
    SemanticOnly,
    /// Cull and batch only; no backend call is made
    NoSubmit,
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Normal => write!(f, "normal"),
            RenderMode::DepthOnly => write!(f, "depth_only"),
            RenderMode::SemanticOnly => write!(f, "semantic_only"),
            RenderMode::NoSubmit => write!(f, "no_submit"),
        }
    }
}

impl FromStr for RenderMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(RenderMode::Normal),
            "depth_only" => Ok(RenderMode::DepthOnly),
            "semantic_only" => Ok(RenderMode::SemanticOnly),
            "no_submit" => Ok(RenderMode::NoSubmit),
            other => Err(Error::InvalidConfiguration(format!("unknown render mode '{}'", other))),
        }
    }
}

impl RenderMode {
    /// Parse a mode name, falling back to `Normal` (with a warning) on
    /// unrecognized input
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|err: Error| {
            engine_warn!("prism3d::RenderOptions", "{}; using normal mode", err);
            RenderMode::Normal
        })
    }
}

/// Bounding volume used by frustum culling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullingGeometry {
    #[default]
    BoundingBox,
    BoundingSphere,
}

impl fmt::Display for CullingGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CullingGeometry::BoundingBox => write!(f, "bounding_box"),
            CullingGeometry::BoundingSphere => write!(f, "bounding_sphere"),
        }
    }
}

impl FromStr for CullingGeometry {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bounding_box" => Ok(CullingGeometry::BoundingBox),
            "bounding_sphere" => Ok(CullingGeometry::BoundingSphere),
            other => Err(Error::InvalidConfiguration(format!("unknown culling geometry '{}'", other))),
        }
    }
}

// ===== VISUALIZATION =====

/// Depth-view ramp: view-space depth `z_min` maps to `z_min_color`,
/// `z_max` to `z_max_color`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthViewConfig {
    pub z_min: f32,
    pub z_max: f32,
    pub z_min_color: Vec3,
    pub z_max_color: Vec3,
}

impl Default for DepthViewConfig {
    fn default() -> Self {
        Self {
            z_min: 0.0,
            z_max: 40.0,
            z_min_color: Vec3::ONE,
            z_max_color: Vec3::ZERO,
        }
    }
}

// ===== RENDER OPTIONS =====

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub mode: RenderMode,
    pub use_frustum_culling: bool,
    pub culling_geometry: CullingGeometry,
    pub use_shadow_mapping: bool,
    /// When false, the previous shadow map (and its matrices) is reused
    pub redraw_shadow_map: bool,
    /// Percentage-closer filtering kernel half size
    pub pcf_count: i32,
    /// Alpha < 1 materials are drawn blended, back to front
    pub use_blending: bool,
    /// Main-pass viewport (None = keep the backend's current viewport)
    pub viewport: Option<Viewport>,
    pub camera: Option<CameraKey>,
    pub light: Option<LightKey>,
    pub shadow_target: Option<ShadowTarget>,
    /// Framebuffer for the main pass (None = active framebuffer)
    pub render_target: Option<ResourceHandle>,
    pub shadow_range: ShadowRangeConfig,
    pub depth_view: DepthViewConfig,
    /// Object id -> color for the semantic view
    pub semantic_view_id_map: FxHashMap<u32, Vec3>,
    /// Color of objects missing from `semantic_view_id_map`
    pub semantic_default_color: Vec3,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::Normal,
            use_frustum_culling: true,
            culling_geometry: CullingGeometry::BoundingBox,
            use_shadow_mapping: false,
            redraw_shadow_map: true,
            pcf_count: 1,
            use_blending: true,
            viewport: None,
            camera: None,
            light: None,
            shadow_target: None,
            render_target: None,
            shadow_range: ShadowRangeConfig::default(),
            depth_view: DepthViewConfig::default(),
            semantic_view_id_map: FxHashMap::default(),
            semantic_default_color: Vec3::splat(0.5),
        }
    }
}

impl RenderOptions {
    /// Set the render mode from its name; unknown names select `Normal`.
    pub fn set_mode_by_name(&mut self, name: &str) {
        self.mode = RenderMode::parse_or_default(name);
    }

    /// Set the culling geometry from its name; unknown names disable culling.
    pub fn set_culling_geometry_by_name(&mut self, name: &str) {
        match name.parse::<CullingGeometry>() {
            Ok(geometry) => self.culling_geometry = geometry,
            Err(err) => {
                engine_warn!("prism3d::RenderOptions", "{}; frustum culling disabled", err);
                self.use_frustum_culling = false;
            }
        }
    }
}

impl fmt::Display for RenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "render-mode        : {}", self.mode)?;
        writeln!(f, "frustum-culling    : {}", self.use_frustum_culling)?;
        writeln!(f, "culling-geometry   : {}", self.culling_geometry)?;
        writeln!(f, "shadow-mapping     : {}", self.use_shadow_mapping)?;
        writeln!(f, "shadow-range       : {}", self.shadow_range.kind)?;
        writeln!(f, "pcf-count          : {}", self.pcf_count)?;
        writeln!(f, "blending           : {}", self.use_blending)?;
        match self.viewport {
            Some(vp) => write!(f, "viewport           : {}x{}", vp.width, vp.height),
            None => write!(f, "viewport           : current"),
        }
    }
}

#[cfg(test)]
#[path = "render_options_tests.rs"]
mod tests;
