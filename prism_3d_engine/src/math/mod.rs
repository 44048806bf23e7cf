//! Math helpers shared by cameras, culling and shadow setup.
//!
//! Everything here builds on `glam` (column-major, right-handed).

mod up_axis;
mod bounds;
mod spherical;

pub use up_axis::UpAxis;
pub use bounds::{BoundingBox, BoundingSphere};
pub use spherical::{Spherical, SPHERICAL_EPSILON};
