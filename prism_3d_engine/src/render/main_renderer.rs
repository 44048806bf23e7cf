/// Main renderer: per-frame orchestration.
///
/// One `render` call runs, strictly in this order:
///
/// 1. resolve camera / light / shadow target (options first, scene second)
/// 2. keep visible renderables
/// 3. frustum culling (optional)
/// 4. split into mesh and model batches
/// 5. stop here in `NoSubmit` mode (no backend call at all)
/// 6. hand the batches to the MeshRenderer (shadow / opacity partitions)
/// 7. shadow depth pass (optional, needs a directional light)
/// 8. main pass into the custom render target or the active framebuffer
///
/// Collaborators are injected: programs at construction, the scene and the
/// backend per call. The renderer never keeps references into the scene
/// across frames.

use crate::backend::{ClearFlags, GraphicsBackend, ResourceHandle};
use crate::camera::Camera;
use crate::error::{Error, Result};
use crate::scene::{Light, RenderableKind, Scene};
use crate::{engine_debug, engine_error, engine_trace, engine_warn};
use super::frame_stats::FrameStats;
use super::frustum_culler::FrustumCuller;
use super::mesh_renderer::{Lighting, MeshRenderer};
use super::program_library::ProgramLibrary;
use super::render_item::RenderItem;
use super::render_options::{RenderMode, RenderOptions};
use super::renderer_config::RendererConfig;
use super::shadow_stage::{ShadowMapContext, ShadowStage, ShadowTarget};

const SOURCE: &str = "prism3d::MainRenderer";

pub struct MainRenderer {
    config: RendererConfig,
    programs: ProgramLibrary,
    mesh_renderer: MeshRenderer,
    shadow_stage: ShadowStage,
    last_stats: FrameStats,
}

impl MainRenderer {
    /// Create a renderer.
    ///
    /// # Arguments
    ///
    /// * `config` - Renderer-wide settings (shadow map resolution, ambient)
    /// * `programs` - Shader programs, keyed by logical id
    /// * `shadow_framebuffer` - Framebuffer of the renderer's own shadow map
    /// * `shadow_depth_texture` - Depth attachment of `shadow_framebuffer`
    pub fn new(
        config: RendererConfig,
        programs: ProgramLibrary,
        shadow_framebuffer: ResourceHandle,
        shadow_depth_texture: ResourceHandle,
    ) -> Self {
        let target = ShadowTarget::new(
            shadow_framebuffer,
            shadow_depth_texture,
            config.shadow_map_width,
            config.shadow_map_height,
        );
        Self {
            config,
            programs,
            mesh_renderer: MeshRenderer::new(),
            shadow_stage: ShadowStage::new(target, config.shadow_texture_unit),
            last_stats: FrameStats::default(),
        }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn programs(&self) -> &ProgramLibrary {
        &self.programs
    }

    pub fn programs_mut(&mut self) -> &mut ProgramLibrary {
        &mut self.programs
    }

    pub fn mesh_renderer(&self) -> &MeshRenderer {
        &self.mesh_renderer
    }

    pub fn shadow_stage(&self) -> &ShadowStage {
        &self.shadow_stage
    }

    /// Statistics of the last completed frame
    pub fn last_stats(&self) -> &FrameStats {
        &self.last_stats
    }

    // ===== FRAME =====

    /// Render one frame of `scene`.
    ///
    /// Fails with `MissingCollaborator` (after logging) when no camera is
    /// available; the frame is skipped and the renderer stays usable.
    /// Backend errors are propagated as-is.
    pub fn render(
        &mut self,
        scene: &Scene,
        backend: &mut dyn GraphicsBackend,
        options: &RenderOptions,
    ) -> Result<FrameStats> {
        let mut stats = FrameStats {
            renderables: scene.renderable_count(),
            ..FrameStats::default()
        };

        // (1): collaborators
        let camera = resolve_camera(scene, options)?;
        let light = resolve_light(scene, options);

        // (2): visible renderables
        let visible: Vec<RenderItem<'_>> = scene
            .renderables()
            .filter(|(_, renderable)| renderable.is_visible())
            .map(|(key, renderable)| RenderItem::new(key, renderable))
            .collect();
        stats.visible = visible.len();

        // (3): frustum culling
        let in_view = if options.use_frustum_culling {
            FrustumCuller::from_camera(camera).collect_in_view(&visible, options.culling_geometry)
        } else {
            visible
        };
        stats.in_view = in_view.len();

        // (4): batches by renderable kind
        let (meshes, models): (Vec<RenderItem<'_>>, Vec<RenderItem<'_>>) = in_view
            .into_iter()
            .partition(|item| item.renderable.kind() == RenderableKind::Mesh);
        stats.meshes = meshes.len();
        stats.models = models.len();

        // (5): statistics only
        if options.mode == RenderMode::NoSubmit {
            engine_trace!(SOURCE, "No-submit frame: {} of {} renderable(s) in view",
                stats.in_view, stats.renderables);
            self.last_stats = stats;
            return Ok(stats);
        }

        // (6): shadow / opacity partitions
        let batched: Vec<RenderItem<'_>> = meshes.into_iter().chain(models).collect();
        self.mesh_renderer.submit(&batched, camera, options.use_blending);
        stats.opaque = self.mesh_renderer.opaque().len();
        stats.transparent = self.mesh_renderer.transparent().len();
        stats.shadow_casters = self.mesh_renderer.casts_shadow().len();

        // (7): shadow pre-pass
        let shadow = if options.use_shadow_mapping && options.mode == RenderMode::Normal {
            self.prepare_shadow_map(scene, backend, camera, options, &mut stats)?
        } else {
            None
        };
        stats.shadowed = shadow.is_some();

        // (8): main pass
        stats.draw_calls += self.main_pass(scene, backend, options, light, shadow.as_ref())?;

        engine_trace!(SOURCE, "Frame: {} in view, {} draw call(s), shadowed: {}",
            stats.in_view, stats.draw_calls, stats.shadowed);
        self.last_stats = stats;
        Ok(stats)
    }

    /// Run (or reuse) the shadow depth pass.
    ///
    /// Returns the context the main pass must sample with, or None when no
    /// directional light is available.
    fn prepare_shadow_map(
        &mut self,
        scene: &Scene,
        backend: &mut dyn GraphicsBackend,
        camera: &Camera,
        options: &RenderOptions,
        stats: &mut FrameStats,
    ) -> Result<Option<ShadowMapContext>> {
        let shadow_light = match resolve_shadow_light(scene, options) {
            Some(light) => light,
            None => {
                engine_warn!(SOURCE,
                    "Shadow mapping requested but the scene has no active directional light; rendering without shadows");
                return Ok(None);
            }
        };

        let target = options.shadow_target.unwrap_or(*self.shadow_stage.target());

        if !options.redraw_shadow_map {
            if let Some(previous) = self.shadow_stage.last_context() {
                // Matrices must match the depth target; filtering follows this frame
                if previous.depth_texture == target.depth_texture {
                    return Ok(Some(ShadowMapContext { pcf_count: options.pcf_count, ..*previous }));
                }
            }
        }

        let context = self.shadow_stage.setup_from_light(
            shadow_light,
            camera,
            &options.shadow_range,
            &target,
            options.pcf_count,
        )?;
        stats.draw_calls += self.shadow_stage.render_depth_pass(
            &context,
            &target,
            &self.mesh_renderer,
            scene,
            backend,
            &self.programs,
        )?;
        stats.shadow_pass = true;
        Ok(Some(context))
    }

    fn main_pass(
        &self,
        scene: &Scene,
        backend: &mut dyn GraphicsBackend,
        options: &RenderOptions,
        light: Option<&Light>,
        shadow: Option<&ShadowMapContext>,
    ) -> Result<u32> {
        if let Some(framebuffer) = options.render_target {
            backend.bind(framebuffer)?;
        }

        let mut previous_viewport = None;
        match options.viewport {
            Some(viewport) if viewport.is_empty() => {
                engine_warn!(SOURCE, "Ignoring empty viewport {}", viewport);
            }
            Some(viewport) => {
                previous_viewport = Some(backend.viewport());
                backend.set_viewport(viewport)?;
            }
            None => {}
        }

        backend.clear(ClearFlags::COLOR | ClearFlags::DEPTH)?;

        let renderer = &self.mesh_renderer;
        let lighting = Lighting { light, global_ambient: self.config.global_ambient };
        let draws = match options.mode {
            RenderMode::Normal => match shadow {
                Some(shadow) => {
                    backend.bind_texture(shadow.texture_unit, shadow.depth_texture)?;
                    renderer.render_with_shadow_map(scene, backend, &self.programs, lighting, shadow)?
                }
                None => renderer.render_without_shadow_map(scene, backend, &self.programs, lighting)?,
            },
            RenderMode::DepthOnly => {
                renderer.render_depth_view(scene, backend, &self.programs, &options.depth_view)?
            }
            RenderMode::SemanticOnly => renderer.render_semantic_view(
                scene,
                backend,
                &self.programs,
                &options.semantic_view_id_map,
                options.semantic_default_color,
            )?,
            RenderMode::NoSubmit => 0,
        };

        if let Some(viewport) = previous_viewport {
            backend.set_viewport(viewport)?;
        }
        if let Some(framebuffer) = options.render_target {
            backend.unbind(framebuffer)?;
        }
        Ok(draws)
    }
}

// ===== COLLABORATOR RESOLUTION =====

fn resolve_camera<'s>(scene: &'s Scene, options: &RenderOptions) -> Result<&'s Camera> {
    if let Some(key) = options.camera {
        match scene.camera(key) {
            Some(camera) => return Ok(camera),
            None => engine_warn!(SOURCE, "Camera {:?} not found in scene '{}'; using the current camera",
                key, scene.name()),
        }
    }
    match scene.current_camera() {
        Some(camera) => Ok(camera),
        None => {
            engine_error!(SOURCE, "There is no current camera in scene '{}'; frame skipped", scene.name());
            Err(Error::MissingCollaborator(format!("scene '{}' has no current camera", scene.name())))
        }
    }
}

/// Shading light: the options override if it is active, else the scene's
/// primary light
fn resolve_light<'s>(scene: &'s Scene, options: &RenderOptions) -> Option<&'s Light> {
    if let Some(key) = options.light {
        match scene.light(key) {
            Some(light) if light.is_active() => return Some(light),
            Some(light) => engine_debug!(SOURCE, "Light '{}' is inactive; using the primary light",
                light.name()),
            None => engine_warn!(SOURCE, "Light {:?} not found in scene '{}'; using the primary light",
                key, scene.name()),
        }
    }
    scene.primary_light().map(|(_, light)| light)
}

/// Shadow-casting light: the options override if it is an active
/// directional light, else the scene's directional light
fn resolve_shadow_light<'s>(scene: &'s Scene, options: &RenderOptions) -> Option<&'s Light> {
    options
        .light
        .and_then(|key| scene.light(key))
        .filter(|light| light.is_active() && light.is_directional())
        .or_else(|| scene.directional_light().map(|(_, light)| light))
}

#[cfg(test)]
#[path = "main_renderer_tests.rs"]
mod tests;
