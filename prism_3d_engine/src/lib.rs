/*!
# Prism 3D Engine

Frame orchestration core of a forward 3D renderer.

This crate decides, once per frame, which objects are visible, which passes
are needed and in what order draw calls are issued. GPU object lifetime,
asset loading, windowing and shader compilation live outside; the core only
talks to the GPU through the `GraphicsBackend` trait.

## Architecture

- **Camera**: pose + projection driven by a `CameraController` (fixed, fps, orbit)
- **FrustumCuller**: conservative "certainly outside" test on bounds
- **MeshRenderer**: shadow / opacity partitions and per-material batches
- **ShadowStage**: light-space matrices and the depth pre-pass
- **MainRenderer**: per-frame orchestration of all of the above
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod math;
pub mod input;
pub mod camera;
pub mod scene;
pub mod backend;
pub mod render;

#[cfg(test)]
mod test_support;

// Main prism3d namespace module
pub mod prism3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging facade
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Math sub-module
    pub mod math {
        pub use crate::math::*;
    }

    // Input sub-module
    pub mod input {
        pub use crate::input::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Backend sub-module
    pub mod backend {
        pub use crate::backend::*;
    }

    // Render sub-module
    pub mod render {
        pub use crate::render::*;
    }
}

// Re-export math library at crate root
pub use glam;
