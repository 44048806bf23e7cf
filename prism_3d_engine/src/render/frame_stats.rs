/// Per-frame counters reported by `MainRenderer::render`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// All renderables in the scene
    pub renderables: usize,
    /// Renderables with the visible flag
    pub visible: usize,
    /// Visible renderables surviving frustum culling
    pub in_view: usize,
    pub meshes: usize,
    pub models: usize,
    pub opaque: usize,
    pub transparent: usize,
    pub shadow_casters: usize,
    /// Draw calls of all passes
    pub draw_calls: u32,
    /// A shadow depth pass was executed this frame
    pub shadow_pass: bool,
    /// The main pass sampled a shadow map
    pub shadowed: bool,
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "renderables        : {}", self.renderables)?;
        writeln!(f, "renderables-visible: {}", self.visible)?;
        writeln!(f, "renderables-in-view: {}", self.in_view)?;
        writeln!(f, "meshes / models    : {} / {}", self.meshes, self.models)?;
        writeln!(f, "opaque / transp.   : {} / {}", self.opaque, self.transparent)?;
        writeln!(f, "shadow-casters     : {}", self.shadow_casters)?;
        writeln!(f, "draw-calls         : {}", self.draw_calls)?;
        write!(f, "shadow-pass        : {}", self.shadow_pass)
    }
}
