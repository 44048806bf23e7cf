/// Mesh renderer. Batches renderables and issues their draw calls.
///
/// `submit` partitions the frame's surviving renderables twice:
///
/// - shadow casters / non-casters (for the shadow pre-pass)
/// - opaque / transparent (transparent sorted farthest-from-camera first,
///   ties kept in input order)
///
/// Every pass draws the opaque partition first, one batch per material
/// kind in the order Lambert, Phong, Blinn-Phong (program bound once per
/// batch), then the transparent partition back to front, switching
/// programs only when the material kind changes.
///
/// Partitions store scene keys, not references; the scene is borrowed again
/// when drawing and renderables removed in between are skipped.

use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;
use crate::backend::{GraphicsBackend, ResourceHandle, UniformValue};
use crate::camera::Camera;
use crate::error::Result;
use crate::scene::{DrawPart, Light, LightKind, MaterialKind, Renderable, RenderableKey, Scene};
use super::program_library::{ProgramId, ProgramLibrary};
use super::render_item::RenderItem;
use super::render_options::DepthViewConfig;
use super::shadow_stage::ShadowMapContext;

// ===== CONTEXTS =====

/// Camera data captured at submit time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraContext {
    pub view: Mat4,
    pub proj: Mat4,
    pub position: Vec3,
}

impl CameraContext {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view: *camera.view_matrix(),
            proj: *camera.proj_matrix(),
            position: camera.position(),
        }
    }
}

impl Default for CameraContext {
    fn default() -> Self {
        Self { view: Mat4::IDENTITY, proj: Mat4::IDENTITY, position: Vec3::ZERO }
    }
}

/// Lighting inputs of the shading passes
#[derive(Debug, Clone, Copy)]
pub struct Lighting<'l> {
    /// Light used for shading (None = ambient only)
    pub light: Option<&'l Light>,
    pub global_ambient: Vec3,
}

/// Pass being drawn, with the data its uniforms come from
enum Pass<'p> {
    ShadowDepth { shadow: &'p ShadowMapContext },
    Shading { lighting: Lighting<'p>, shadow: Option<&'p ShadowMapContext> },
    DepthView { config: &'p DepthViewConfig },
    SemanticView { id_map: &'p FxHashMap<u32, Vec3>, default_color: Vec3 },
}

/// One draw: the program it needs and the part to draw
struct DrawCall<'s> {
    program: ProgramId,
    model: Mat4,
    part: &'s DrawPart,
    object_id: u32,
}

// ===== MESH RENDERER =====

#[derive(Default)]
pub struct MeshRenderer {
    casts_shadow: Vec<RenderableKey>,
    no_shadow: Vec<RenderableKey>,
    opaque: Vec<RenderableKey>,
    transparent: Vec<RenderableKey>,
    camera: CameraContext,
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Partition the frame's renderables.
    ///
    /// Replaces whatever was submitted before.
    pub fn submit(&mut self, items: &[RenderItem<'_>], camera: &Camera, use_blending: bool) {
        self.clear();
        self.camera = CameraContext::from_camera(camera);

        for item in items {
            if item.renderable.casts_shadow() {
                self.casts_shadow.push(item.key);
            } else {
                self.no_shadow.push(item.key);
            }
        }

        let eye = self.camera.position;
        let mut transparent: Vec<(f32, RenderableKey)> = Vec::new();
        for item in items {
            if item.renderable.is_transparent(use_blending) {
                transparent.push((item.renderable.world_position().distance(eye), item.key));
            } else {
                self.opaque.push(item.key);
            }
        }

        // Stable: equal distances keep submission order
        transparent.sort_by(|a, b| b.0.total_cmp(&a.0));
        self.transparent = transparent.into_iter().map(|(_, key)| key).collect();
    }

    pub fn clear(&mut self) {
        self.casts_shadow.clear();
        self.no_shadow.clear();
        self.opaque.clear();
        self.transparent.clear();
    }

    pub fn casts_shadow(&self) -> &[RenderableKey] {
        &self.casts_shadow
    }

    pub fn no_shadow(&self) -> &[RenderableKey] {
        &self.no_shadow
    }

    pub fn opaque(&self) -> &[RenderableKey] {
        &self.opaque
    }

    /// Transparent renderables, farthest first
    pub fn transparent(&self) -> &[RenderableKey] {
        &self.transparent
    }

    pub fn camera_context(&self) -> &CameraContext {
        &self.camera
    }

    // ===== PASSES =====

    /// Depth-only pass of shadow casters into the bound shadow target.
    ///
    /// Returns the number of draw calls.
    pub fn render_to_shadow_map(
        &self,
        scene: &Scene,
        backend: &mut dyn GraphicsBackend,
        programs: &ProgramLibrary,
        shadow: &ShadowMapContext,
    ) -> Result<u32> {
        let calls = self.single_program_calls(scene, ProgramId::ShadowDepth, true);
        self.execute(backend, programs, &calls, &Pass::ShadowDepth { shadow })
    }

    pub fn render_without_shadow_map(
        &self,
        scene: &Scene,
        backend: &mut dyn GraphicsBackend,
        programs: &ProgramLibrary,
        lighting: Lighting<'_>,
    ) -> Result<u32> {
        let calls = self.shading_calls(scene, false);
        self.execute(backend, programs, &calls, &Pass::Shading { lighting, shadow: None })
    }

    /// Lit pass sampling the shadow map written with the same `shadow` context.
    ///
    /// The depth texture must already be bound to `shadow.texture_unit`.
    pub fn render_with_shadow_map(
        &self,
        scene: &Scene,
        backend: &mut dyn GraphicsBackend,
        programs: &ProgramLibrary,
        lighting: Lighting<'_>,
        shadow: &ShadowMapContext,
    ) -> Result<u32> {
        let calls = self.shading_calls(scene, true);
        self.execute(backend, programs, &calls, &Pass::Shading { lighting, shadow: Some(shadow) })
    }

    pub fn render_depth_view(
        &self,
        scene: &Scene,
        backend: &mut dyn GraphicsBackend,
        programs: &ProgramLibrary,
        config: &DepthViewConfig,
    ) -> Result<u32> {
        let calls = self.single_program_calls(scene, ProgramId::DepthView, false);
        self.execute(backend, programs, &calls, &Pass::DepthView { config })
    }

    pub fn render_semantic_view(
        &self,
        scene: &Scene,
        backend: &mut dyn GraphicsBackend,
        programs: &ProgramLibrary,
        id_map: &FxHashMap<u32, Vec3>,
        default_color: Vec3,
    ) -> Result<u32> {
        let calls = self.single_program_calls(scene, ProgramId::SemanticView, false);
        self.execute(backend, programs, &calls, &Pass::SemanticView { id_map, default_color })
    }

    // ===== DRAW LISTS =====

    fn resolve<'s>(scene: &'s Scene, keys: &'s [RenderableKey]) -> impl Iterator<Item = &'s Renderable> + 's {
        // Removed between submit and draw: skipped
        keys.iter().filter_map(move |key| scene.renderable(*key))
    }

    fn push_part<'s>(calls: &mut Vec<DrawCall<'s>>, program: ProgramId, renderable: &Renderable, part: &'s DrawPart) {
        calls.push(DrawCall {
            program,
            model: *renderable.world_transform() * part.local_transform,
            part,
            object_id: renderable.object_id(),
        });
    }

    /// Opaque batches per material kind, then transparent back to front
    fn shading_calls<'s>(&'s self, scene: &'s Scene, shadowed: bool) -> Vec<DrawCall<'s>> {
        let mut calls = Vec::new();
        for kind in MaterialKind::ALL {
            let program = ProgramId::Shading { kind, shadowed };
            for renderable in Self::resolve(scene, &self.opaque) {
                for part in renderable.parts().iter().filter(|p| p.material.kind == kind) {
                    Self::push_part(&mut calls, program, renderable, part);
                }
            }
        }
        for renderable in Self::resolve(scene, &self.transparent) {
            for part in renderable.parts() {
                let program = ProgramId::Shading { kind: part.material.kind, shadowed };
                Self::push_part(&mut calls, program, renderable, part);
            }
        }
        calls
    }

    /// Every part with one program: opaque first, then transparent back to front
    fn single_program_calls<'s>(
        &'s self,
        scene: &'s Scene,
        program: ProgramId,
        casters_only: bool,
    ) -> Vec<DrawCall<'s>> {
        let mut calls = Vec::new();
        let ordered = Self::resolve(scene, &self.opaque).chain(Self::resolve(scene, &self.transparent));
        for renderable in ordered.filter(|r| !casters_only || r.casts_shadow()) {
            for part in renderable.parts() {
                Self::push_part(&mut calls, program, renderable, part);
            }
        }
        calls
    }

    // ===== SUBMISSION =====

    fn execute(
        &self,
        backend: &mut dyn GraphicsBackend,
        programs: &ProgramLibrary,
        calls: &[DrawCall<'_>],
        pass: &Pass<'_>,
    ) -> Result<u32> {
        let mut bound: Option<(ProgramId, ResourceHandle)> = None;
        let mut draws = 0;

        for call in calls {
            if bound.map(|(id, _)| id) != Some(call.program) {
                if let Some((_, handle)) = bound.take() {
                    backend.unbind(handle)?;
                }
                let handle = programs.get(call.program)?;
                backend.bind(handle)?;
                self.upload_frame_uniforms(backend, pass)?;
                bound = Some((call.program, handle));
            }
            Self::upload_draw_uniforms(backend, pass, call)?;
            call.part.geometry.draw(backend)?;
            draws += 1;
        }

        if let Some((_, handle)) = bound {
            backend.unbind(handle)?;
        }
        Ok(draws)
    }

    fn upload_frame_uniforms(&self, backend: &mut dyn GraphicsBackend, pass: &Pass<'_>) -> Result<()> {
        let camera = &self.camera;
        match pass {
            Pass::ShadowDepth { shadow } => {
                backend.set_uniform("u_lightSpaceViewMatrix", shadow.light_space_view.into())?;
                backend.set_uniform("u_lightSpaceProjMatrix", shadow.light_space_projection.into())?;
            }
            Pass::Shading { lighting, shadow } => {
                backend.set_uniform("u_tView", camera.view.into())?;
                backend.set_uniform("u_tProj", camera.proj.into())?;
                backend.set_uniform("u_viewPos", camera.position.into())?;
                backend.set_uniform("u_globalAmbientLight", lighting.global_ambient.into())?;
                upload_light(backend, lighting.light)?;
                if let Some(shadow) = shadow {
                    backend.set_uniform("u_tLightSpaceViewMatrix", shadow.light_space_view.into())?;
                    backend.set_uniform("u_tLightSpaceProjMatrix", shadow.light_space_projection.into())?;
                    backend.set_uniform("u_shadowMap", UniformValue::Int(shadow.texture_unit as i32))?;
                    backend.set_uniform("u_pcfCount", UniformValue::Int(shadow.pcf_count))?;
                }
            }
            Pass::DepthView { config } => {
                backend.set_uniform("u_tView", camera.view.into())?;
                backend.set_uniform("u_tProj", camera.proj.into())?;
                backend.set_uniform("u_depthViewZMin", config.z_min.into())?;
                backend.set_uniform("u_depthViewZMax", config.z_max.into())?;
                backend.set_uniform("u_depthViewZMinColor", config.z_min_color.into())?;
                backend.set_uniform("u_depthViewZMaxColor", config.z_max_color.into())?;
            }
            Pass::SemanticView { .. } => {
                backend.set_uniform("u_tView", camera.view.into())?;
                backend.set_uniform("u_tProj", camera.proj.into())?;
            }
        }
        Ok(())
    }

    fn upload_draw_uniforms(backend: &mut dyn GraphicsBackend, pass: &Pass<'_>, call: &DrawCall<'_>) -> Result<()> {
        match pass {
            Pass::ShadowDepth { .. } => {
                backend.set_uniform("u_modelMatrix", call.model.into())?;
            }
            Pass::Shading { .. } => {
                let material = &call.part.material;
                backend.set_uniform("u_tModel", call.model.into())?;
                backend.set_uniform("u_material.ambient", material.ambient.into())?;
                backend.set_uniform("u_material.diffuse", material.diffuse.into())?;
                backend.set_uniform("u_material.specular", material.specular.into())?;
                backend.set_uniform("u_material.shininess", material.shininess.into())?;
                backend.set_uniform("u_material.alpha", material.alpha.into())?;
            }
            Pass::DepthView { .. } => {
                backend.set_uniform("u_tModel", call.model.into())?;
            }
            Pass::SemanticView { id_map, default_color } => {
                let color = id_map.get(&call.object_id).copied().unwrap_or(*default_color);
                backend.set_uniform("u_tModel", call.model.into())?;
                backend.set_uniform("u_semanticColor", color.into())?;
            }
        }
        Ok(())
    }
}

/// Upload the `u_<kind>Light.*` uniforms of the shading light
fn upload_light(backend: &mut dyn GraphicsBackend, light: Option<&Light>) -> Result<()> {
    let light = match light {
        Some(light) => light,
        None => return backend.set_uniform("u_directionalLight.isActive", UniformValue::Int(0)),
    };

    let prefix = match light.kind() {
        LightKind::Directional { .. } => "u_directionalLight",
        LightKind::Point { .. } => "u_pointLight",
        LightKind::Spot { .. } => "u_spotLight",
    };
    backend.set_uniform(&format!("{}.ambient", prefix), light.ambient.into())?;
    backend.set_uniform(&format!("{}.diffuse", prefix), light.diffuse.into())?;
    backend.set_uniform(&format!("{}.specular", prefix), light.specular.into())?;
    backend.set_uniform(&format!("{}.isActive", prefix), UniformValue::Int(light.is_active() as i32))?;

    match *light.kind() {
        LightKind::Directional { direction } => {
            backend.set_uniform("u_directionalLight.direction", direction.into())?;
        }
        LightKind::Point { position, constant, linear, quadratic } => {
            backend.set_uniform("u_pointLight.position", position.into())?;
            backend.set_uniform("u_pointLight.constant", constant.into())?;
            backend.set_uniform("u_pointLight.linear", linear.into())?;
            backend.set_uniform("u_pointLight.quadratic", quadratic.into())?;
        }
        LightKind::Spot { position, direction, inner_cutoff, outer_cutoff } => {
            backend.set_uniform("u_spotLight.position", position.into())?;
            backend.set_uniform("u_spotLight.direction", direction.into())?;
            backend.set_uniform("u_spotLight.innerCutoff", inner_cutoff.into())?;
            backend.set_uniform("u_spotLight.outerCutoff", outer_cutoff.into())?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "mesh_renderer_tests.rs"]
mod tests;
