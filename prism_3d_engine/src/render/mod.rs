//! Frame rendering module
//!
//! Culling, batching, shadow mapping and the per-frame orchestration that
//! ties them together on top of a `GraphicsBackend`.

mod frame_stats;
mod frustum_culler;
mod main_renderer;
mod mesh_renderer;
mod program_library;
mod render_item;
mod render_options;
mod renderer_config;
mod shadow_stage;

pub use frame_stats::FrameStats;
pub use frustum_culler::FrustumCuller;
pub use main_renderer::MainRenderer;
pub use mesh_renderer::{CameraContext, Lighting, MeshRenderer};
pub use program_library::{ProgramId, ProgramLibrary};
pub use render_item::RenderItem;
pub use render_options::{CullingGeometry, DepthViewConfig, RenderMode, RenderOptions};
pub use renderer_config::RendererConfig;
pub use shadow_stage::{
    ShadowMapContext, ShadowRangeConfig, ShadowRangeType, ShadowStage, ShadowTarget,
};
