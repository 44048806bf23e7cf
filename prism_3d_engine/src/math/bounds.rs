/// Bounding volumes used for culling.
///
/// Both volumes are stored in local space on a renderable and moved to world
/// space at culling time with the renderable's world transform.

use glam::{Mat4, Vec3};

// ===== BOUNDING BOX =====

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl BoundingBox {
    /// Box from two corners (components are reordered if needed)
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    /// Box centered on `center` with the given half extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self { min: center - half, max: center + half }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// The 8 corners, ordered by (x, y, z) bits of the index
    pub fn corners(&self) -> [Vec3; 8] {
        let mut corners = [Vec3::ZERO; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            *corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
        }
        corners
    }

    /// Transform this box by a matrix, returning the enclosing world box.
    ///
    /// Arvo's method: each matrix axis is projected onto the box extents,
    /// which gives the tight result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> BoundingBox {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        BoundingBox { min: new_min, max: new_max }
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Smallest box enclosing both boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox { min: self.min.min(other.min), max: self.max.max(other.max) }
    }
}

// ===== BOUNDING SPHERE =====

/// Bounding sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius: radius.abs() }
    }

    /// Sphere circumscribing a box
    pub fn from_box(bbox: &BoundingBox) -> Self {
        Self { center: bbox.center(), radius: bbox.half_extents().length() }
    }

    /// Transform the sphere by a matrix.
    ///
    /// The radius is scaled by the largest axis scale so that the result
    /// still encloses the transformed geometry under non-uniform scaling.
    pub fn transformed(&self, matrix: &Mat4) -> BoundingSphere {
        let scale = matrix.col(0).truncate().length()
            .max(matrix.col(1).truncate().length())
            .max(matrix.col(2).truncate().length());

        BoundingSphere {
            center: matrix.transform_point3(self.center),
            radius: self.radius * scale,
        }
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
