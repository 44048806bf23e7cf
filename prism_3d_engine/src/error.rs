//! Error types for the Prism3D engine
//!
//! This module defines the error types used throughout the engine,
//! including backend submission, missing collaborators and configuration.

use std::fmt;

/// Result type for Prism3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Prism3D engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error (OpenGL, Vulkan, mock, etc.)
    BackendError(String),

    /// Invalid resource (program, texture, framebuffer handle, etc.)
    InvalidResource(String),

    /// A collaborator required to render a frame is absent (camera, light)
    MissingCollaborator(String),

    /// Configuration value that cannot be honored
    InvalidConfiguration(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::MissingCollaborator(msg) => write!(f, "Missing collaborator: {}", msg),
            Error::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an error message and build an `Error::BackendError` from it.
///
/// # Example
///
/// ```no_run
/// # use prism_3d_engine::engine_err;
/// let err = engine_err!("prism3d::backend", "Draw failed: {}", 42);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::prism3d::Engine::log_detailed(
            $crate::prism3d::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::prism3d::Error::BackendError(message)
    }};
}

/// Log an error message and return early with an `Error::BackendError`.
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
