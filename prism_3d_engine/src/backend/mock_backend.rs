/// Recording backend for unit tests.
///
/// Every call is appended to `commands` as a short string
/// (`"bind program#1"`, `"draw_indexed 36"`, `"set_uniform u_tModel"`), and
/// uniform values are kept in `uniforms` in upload order.

use crate::error::Result;
use crate::engine_bail;
use super::graphics_backend::{
    ClearFlags, GraphicsBackend, ResourceHandle, UniformValue, Viewport,
};

pub struct MockBackend {
    pub commands: Vec<String>,
    pub uniforms: Vec<(String, UniformValue)>,
    viewport: Viewport,
    /// When set, draw calls fail with a backend error
    pub fail_draws: bool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            uniforms: Vec::new(),
            viewport: Viewport::with_size(800, 600),
            fail_draws: false,
        }
    }

    /// Number of recorded commands starting with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        self.commands.iter().filter(|c| c.starts_with(prefix)).count()
    }

    /// Index of the first command equal to `command`
    pub fn position(&self, command: &str) -> Option<usize> {
        self.commands.iter().position(|c| c == command)
    }

    /// All values uploaded under `name`, in order
    pub fn uniform_values(&self, name: &str) -> Vec<UniformValue> {
        self.uniforms
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| *v)
            .collect()
    }
}

impl GraphicsBackend for MockBackend {
    fn bind(&mut self, handle: ResourceHandle) -> Result<()> {
        self.commands.push(format!("bind {}", handle));
        Ok(())
    }

    fn unbind(&mut self, handle: ResourceHandle) -> Result<()> {
        self.commands.push(format!("unbind {}", handle));
        Ok(())
    }

    fn bind_texture(&mut self, unit: u32, texture: ResourceHandle) -> Result<()> {
        self.commands.push(format!("bind_texture {} {}", unit, texture));
        Ok(())
    }

    fn draw_indexed(&mut self, count: u32) -> Result<()> {
        if self.fail_draws {
            engine_bail!("prism3d::mock", "draw_indexed: device lost");
        }
        self.commands.push(format!("draw_indexed {}", count));
        Ok(())
    }

    fn draw_arrays(&mut self, count: u32) -> Result<()> {
        if self.fail_draws {
            engine_bail!("prism3d::mock", "draw_arrays: device lost");
        }
        self.commands.push(format!("draw_arrays {}", count));
        Ok(())
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<()> {
        self.commands.push(format!("set_uniform {}", name));
        self.uniforms.push((name.to_string(), value));
        Ok(())
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.commands.push(format!("set_viewport {}", viewport));
        self.viewport = viewport;
        Ok(())
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self, flags: ClearFlags) -> Result<()> {
        let names: Vec<String> = flags
            .iter_names()
            .map(|(name, _)| name.to_lowercase())
            .collect();
        self.commands.push(format!("clear {}", names.join("|")));
        Ok(())
    }
}
