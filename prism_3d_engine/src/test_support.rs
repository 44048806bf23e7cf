//! Shared helpers for unit tests (compiled only under `cfg(test)`)

use std::sync::{Arc, Mutex};
use crate::log::{LogEntry, LogSeverity, Logger};
use glam::{Mat4, Vec3};
use crate::backend::ResourceHandle;
use crate::camera::{Camera, ProjectionData};
use crate::math::{BoundingBox, UpAxis};
use crate::render::{ProgramId, ProgramLibrary};
use crate::scene::{Geometry, Material, MaterialKind, Renderable};

/// Logger that records `(severity, source, message)` for later assertions
#[derive(Clone, Default)]
pub struct CaptureLogger {
    entries: Arc<Mutex<Vec<(LogSeverity, String, String)>>>,
}

impl CaptureLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(LogSeverity, String, String)> {
        self.entries.lock().unwrap().clone()
    }

    /// Entries emitted by one source (other tests may log concurrently)
    pub fn from_source(&self, source: &str) -> Vec<(LogSeverity, String)> {
        self.entries()
            .into_iter()
            .filter(|(_, src, _)| src == source)
            .map(|(s, _, msg)| (s, msg))
            .collect()
    }

    pub fn count(&self, severity: LogSeverity) -> usize {
        self.entries().iter().filter(|(s, _, _)| *s == severity).count()
    }

    pub fn contains(&self, severity: LogSeverity, needle: &str) -> bool {
        self.entries()
            .iter()
            .any(|(s, _, msg)| *s == severity && msg.contains(needle))
    }
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push((
            entry.severity,
            entry.source.clone(),
            entry.message.clone(),
        ));
    }
}

// ============================================================================
// Rendering fixtures
// ============================================================================

/// Program handle ids registered by `standard_programs`
pub fn program_id_of(id: ProgramId) -> u32 {
    match id {
        ProgramId::Shading { kind, shadowed } => {
            let base = match kind {
                MaterialKind::Lambert => 1,
                MaterialKind::Phong => 2,
                MaterialKind::BlinnPhong => 3,
            };
            if shadowed { base + 10 } else { base }
        }
        ProgramId::ShadowDepth => 20,
        ProgramId::DepthView => 21,
        ProgramId::SemanticView => 22,
    }
}

/// Library with every program registered
pub fn standard_programs() -> ProgramLibrary {
    let mut programs = ProgramLibrary::new();
    let mut ids = vec![ProgramId::ShadowDepth, ProgramId::DepthView, ProgramId::SemanticView];
    for kind in MaterialKind::ALL {
        ids.push(ProgramId::Shading { kind, shadowed: false });
        ids.push(ProgramId::Shading { kind, shadowed: true });
    }
    for id in ids {
        programs.insert(id, ResourceHandle::program(program_id_of(id)));
    }
    programs
}

pub fn material_of(kind: MaterialKind) -> Material {
    match kind {
        MaterialKind::Lambert => Material::lambert(Vec3::splat(0.1), Vec3::ONE),
        MaterialKind::Phong => Material::phong(Vec3::splat(0.1), Vec3::ONE, Vec3::ONE, 32.0),
        MaterialKind::BlinnPhong => Material::blinn_phong(Vec3::splat(0.1), Vec3::ONE, Vec3::ONE, 32.0),
    }
}

/// Unit cube mesh at `position`; its vertex array id equals `id`
pub fn cube_at(id: u32, position: Vec3, material: Material) -> Renderable {
    Renderable::mesh(
        &format!("cube{}", id),
        id,
        Geometry::indexed(ResourceHandle::vertex_array(id), 24, 36),
        material,
        BoundingBox::new(Vec3::splat(-0.5), Vec3::splat(0.5)),
    )
    .with_world_transform(Mat4::from_translation(position))
}

/// Fixed camera at (0, 0, 10) looking at the origin, Y up, 45° fov, far 100
pub fn front_camera() -> Camera {
    Camera::fixed(
        "front",
        Vec3::new(0.0, 0.0, 10.0),
        Vec3::ZERO,
        UpAxis::Y,
        ProjectionData::perspective(45.0, 4.0 / 3.0, 0.1, 100.0),
    )
}
