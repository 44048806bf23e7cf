/// World up-axis selection.
///
/// Cameras and controllers are parameterized by which world axis points up.
/// The choice changes the world-up vector and the trigonometric mapping used
/// by the FPS and orbit controllers.

use std::fmt;
use std::str::FromStr;
use glam::Vec3;
use crate::error::Error;

/// Which world axis points "up"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UpAxis {
    X,
    #[default]
    Y,
    Z,
}

impl UpAxis {
    /// Unit world-up vector for this axis
    pub fn world_up(self) -> Vec3 {
        match self {
            UpAxis::X => Vec3::X,
            UpAxis::Y => Vec3::Y,
            UpAxis::Z => Vec3::Z,
        }
    }
}

impl fmt::Display for UpAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpAxis::X => write!(f, "x"),
            UpAxis::Y => write!(f, "y"),
            UpAxis::Z => write!(f, "z"),
        }
    }
}

impl FromStr for UpAxis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(UpAxis::X),
            "y" => Ok(UpAxis::Y),
            "z" => Ok(UpAxis::Z),
            other => Err(Error::InvalidConfiguration(format!("unknown up axis '{}'", other))),
        }
    }
}
