/// Shader programs used by the renderer, registered by the application.
///
/// Programs are compiled outside this crate; the library only maps a
/// logical `ProgramId` to the backend handle.

use std::fmt;
use rustc_hash::FxHashMap;
use crate::backend::ResourceHandle;
use crate::error::{Error, Result};
use crate::engine_error;
use crate::scene::MaterialKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramId {
    /// Depth-only program of the shadow pre-pass
    ShadowDepth,
    /// Lit shading for one material kind, with or without shadow sampling
    Shading { kind: MaterialKind, shadowed: bool },
    DepthView,
    SemanticView,
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramId::ShadowDepth => write!(f, "shadow_depth"),
            ProgramId::Shading { kind, shadowed: true } => write!(f, "{}_shadows", kind),
            ProgramId::Shading { kind, shadowed: false } => write!(f, "{}_no_shadows", kind),
            ProgramId::DepthView => write!(f, "depth_view"),
            ProgramId::SemanticView => write!(f, "semantic_view"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProgramLibrary {
    programs: FxHashMap<ProgramId, ResourceHandle>,
}

impl ProgramLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a program, returning the handle it replaces
    pub fn insert(&mut self, id: ProgramId, program: ResourceHandle) -> Option<ResourceHandle> {
        self.programs.insert(id, program)
    }

    pub fn contains(&self, id: ProgramId) -> bool {
        self.programs.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Handle registered for `id`
    pub fn get(&self, id: ProgramId) -> Result<ResourceHandle> {
        match self.programs.get(&id) {
            Some(handle) => Ok(*handle),
            None => {
                engine_error!("prism3d::ProgramLibrary", "No program registered for '{}'", id);
                Err(Error::InvalidResource(format!("program '{}' is not registered", id)))
            }
        }
    }
}

#[cfg(test)]
#[path = "program_library_tests.rs"]
mod tests;
