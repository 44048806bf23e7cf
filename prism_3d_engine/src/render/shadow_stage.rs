/// Shadow stage: light-space matrices and the depth pre-pass.
///
/// `setup_from_light` computes one `ShadowMapContext` per shadowed frame.
/// The same context value is handed to the depth pass and then to the
/// shadow-sampling main pass, so both passes see bit-identical matrices.
///
/// Two ways of sizing the orthographic light volume:
///
/// - `FixedUser`: a box of `clip_space_width x height x depth` centered on
///   `focus_point`
/// - `AutofixCamera`: the camera frustum corners seen from the light, padded
///   by `extra_width/height/depth`

use std::fmt;
use std::str::FromStr;
use glam::{Mat4, Vec3};
use crate::backend::{ClearFlags, GraphicsBackend, ResourceHandle, Viewport};
use crate::camera::{Camera, Frustum};
use crate::error::{Error, Result};
use crate::scene::{Light, Scene};
use crate::engine_trace;
use super::mesh_renderer::MeshRenderer;
use super::program_library::ProgramLibrary;

// ===== RANGE CONFIG =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShadowRangeType {
    /// Light volume fitted to the current camera frustum
    AutofixCamera,
    /// Light volume given explicitly around a focus point
    #[default]
    FixedUser,
}

impl fmt::Display for ShadowRangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShadowRangeType::AutofixCamera => write!(f, "autofix_camera"),
            ShadowRangeType::FixedUser => write!(f, "fixed_user"),
        }
    }
}

impl FromStr for ShadowRangeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "autofix_camera" => Ok(ShadowRangeType::AutofixCamera),
            "fixed_user" => Ok(ShadowRangeType::FixedUser),
            other => Err(Error::InvalidConfiguration(format!("unknown shadow range type '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowRangeConfig {
    pub kind: ShadowRangeType,
    /// Up vector of the light view
    pub world_up: Vec3,
    pub focus_point: Vec3,
    pub clip_space_width: f32,
    pub clip_space_height: f32,
    pub clip_space_depth: f32,
    pub extra_width: f32,
    pub extra_height: f32,
    pub extra_depth: f32,
}

impl Default for ShadowRangeConfig {
    fn default() -> Self {
        Self {
            kind: ShadowRangeType::FixedUser,
            world_up: Vec3::Y,
            focus_point: Vec3::ZERO,
            clip_space_width: 20.0,
            clip_space_height: 20.0,
            clip_space_depth: 20.0,
            extra_width: 1.0,
            extra_height: 1.0,
            extra_depth: 1.0,
        }
    }
}

// ===== TARGET & CONTEXT =====

/// Off-screen depth target of the shadow pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowTarget {
    pub framebuffer: ResourceHandle,
    pub depth_texture: ResourceHandle,
    pub width: u32,
    pub height: u32,
}

impl ShadowTarget {
    pub fn new(framebuffer: ResourceHandle, depth_texture: ResourceHandle, width: u32, height: u32) -> Self {
        Self { framebuffer, depth_texture, width, height }
    }
}

/// Light-space matrices of one shadow map, shared by the depth pass and
/// the sampling pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowMapContext {
    pub light_space_view: Mat4,
    pub light_space_projection: Mat4,
    pub depth_texture: ResourceHandle,
    /// Texture unit the depth texture is sampled from
    pub texture_unit: u32,
    pub pcf_count: i32,
}

impl ShadowMapContext {
    /// Combined `projection * view`
    pub fn light_space_matrix(&self) -> Mat4 {
        self.light_space_projection * self.light_space_view
    }
}

// ===== SHADOW STAGE =====

pub struct ShadowStage {
    target: ShadowTarget,
    texture_unit: u32,
    /// Context that wrote the current contents of the last used target
    last_context: Option<ShadowMapContext>,
}

impl ShadowStage {
    pub fn new(target: ShadowTarget, texture_unit: u32) -> Self {
        Self { target, texture_unit, last_context: None }
    }

    /// The stage's own depth target
    pub fn target(&self) -> &ShadowTarget {
        &self.target
    }

    pub fn last_context(&self) -> Option<&ShadowMapContext> {
        self.last_context.as_ref()
    }

    /// Compute light-space matrices for a directional light.
    ///
    /// Fails with `InvalidConfiguration` for point and spot lights.
    pub fn setup_from_light(
        &self,
        light: &Light,
        camera: &Camera,
        range: &ShadowRangeConfig,
        target: &ShadowTarget,
        pcf_count: i32,
    ) -> Result<ShadowMapContext> {
        let direction = match light.direction() {
            Some(direction) if light.is_directional() => direction,
            _ => {
                return Err(Error::InvalidConfiguration(format!(
                    "light '{}' is a {} light; only directional lights cast shadows",
                    light.name(), light.kind()
                )));
            }
        };
        let up = light_up(direction, range.world_up);

        let (light_space_view, light_space_projection) = match range.kind {
            ShadowRangeType::FixedUser => fixed_user_matrices(direction, up, range),
            ShadowRangeType::AutofixCamera => {
                autofix_camera_matrices(direction, up, &camera.view_projection_matrix(), range)
            }
        };

        Ok(ShadowMapContext {
            light_space_view,
            light_space_projection,
            depth_texture: target.depth_texture,
            texture_unit: self.texture_unit,
            pcf_count,
        })
    }

    /// Draw the shadow casters' depth into `target`.
    ///
    /// Binds the target, switches to its resolution, clears depth, draws,
    /// then restores the default framebuffer and the previous viewport.
    pub fn render_depth_pass(
        &mut self,
        context: &ShadowMapContext,
        target: &ShadowTarget,
        mesh_renderer: &MeshRenderer,
        scene: &Scene,
        backend: &mut dyn GraphicsBackend,
        programs: &ProgramLibrary,
    ) -> Result<u32> {
        let previous_viewport = backend.viewport();

        backend.bind(target.framebuffer)?;
        backend.set_viewport(Viewport::with_size(target.width, target.height))?;
        backend.clear(ClearFlags::DEPTH)?;

        let draws = mesh_renderer.render_to_shadow_map(scene, backend, programs, context)?;

        backend.unbind(target.framebuffer)?;
        backend.set_viewport(previous_viewport)?;

        engine_trace!("prism3d::ShadowStage", "Shadow pass: {} draw call(s) into {}x{}",
            draws, target.width, target.height);

        self.last_context = Some(*context);
        Ok(draws)
    }

    /// Forget the previous shadow map (next shadowed frame redraws it)
    pub fn invalidate(&mut self) {
        self.last_context = None;
    }
}

// ===== LIGHT-SPACE MATRICES =====

/// Up vector for the light view, replaced when parallel to the direction
fn light_up(direction: Vec3, world_up: Vec3) -> Vec3 {
    let up = world_up.try_normalize().unwrap_or(Vec3::Y);
    if direction.cross(up).length_squared() > 1e-6 {
        up
    } else if direction.cross(Vec3::Z).length_squared() > 1e-6 {
        Vec3::Z
    } else {
        Vec3::X
    }
}

fn fixed_user_matrices(direction: Vec3, up: Vec3, range: &ShadowRangeConfig) -> (Mat4, Mat4) {
    let half_depth = 0.5 * range.clip_space_depth;
    let eye = range.focus_point - direction * half_depth;
    let view = Mat4::look_at_rh(eye, range.focus_point, up);

    let half_w = 0.5 * range.clip_space_width;
    let half_h = 0.5 * range.clip_space_height;
    let projection = Mat4::orthographic_rh_gl(-half_w, half_w, -half_h, half_h, 0.0, range.clip_space_depth);
    (view, projection)
}

fn autofix_camera_matrices(
    direction: Vec3,
    up: Vec3,
    camera_view_projection: &Mat4,
    range: &ShadowRangeConfig,
) -> (Mat4, Mat4) {
    let corners = Frustum::corners(camera_view_projection);
    let center = corners.iter().copied().sum::<Vec3>() / corners.len() as f32;
    let radius = corners
        .iter()
        .map(|corner| corner.distance(center))
        .fold(0.0f32, f32::max)
        .max(1e-3);

    let view = Mat4::look_at_rh(center - direction * radius, center, up);

    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for corner in &corners {
        let p = view.transform_point3(*corner);
        min = min.min(p);
        max = max.max(p);
    }

    // View space looks down -Z: near/far are negated z bounds
    let projection = Mat4::orthographic_rh_gl(
        min.x - range.extra_width,
        max.x + range.extra_width,
        min.y - range.extra_height,
        max.y + range.extra_height,
        -max.z - range.extra_depth,
        -min.z + range.extra_depth,
    );
    (view, projection)
}

#[cfg(test)]
#[path = "shadow_stage_tests.rs"]
mod tests;
