//! Basic types for stlmesh

use nalgebra::Vector3;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Triangle defined by three vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First vertex index
    pub v0: u32,
    /// Second vertex index
    pub v1: u32,
    /// Third vertex index
    pub v2: u32,
}

impl Triangle {
    /// Create a new triangle
    pub fn new(v0: u32, v1: u32, v2: u32) -> Self {
        Self { v0, v1, v2 }
    }

    /// Triangle `t` of a mesh whose triangles own three private vertices
    /// each, i.e. `(3t, 3t + 1, 3t + 2)`.
    pub fn unshared(t: u32) -> Self {
        let base = 3 * t;
        Self::new(base, base + 1, base + 2)
    }

    /// Get vertex indices as an array
    pub fn indices(&self) -> [u32; 3] {
        [self.v0, self.v1, self.v2]
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Triangle({}, {}, {})", self.v0, self.v1, self.v2)
    }
}

/// 3D Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BBox3 {
    min: Vector3<f64>,
    max: Vector3<f64>,
}

impl BBox3 {
    /// Create a new bounding box
    pub fn new(min: Vector3<f64>, max: Vector3<f64>) -> Self {
        debug_assert!(min.x <= max.x);
        debug_assert!(min.y <= max.y);
        debug_assert!(min.z <= max.z);
        Self { min, max }
    }

    /// Create an empty bounding box
    pub fn empty() -> Self {
        Self {
            min: Vector3::repeat(f64::MAX),
            max: Vector3::repeat(f64::MIN),
        }
    }

    /// Get minimum corner
    pub fn min(&self) -> Vector3<f64> {
        self.min
    }

    /// Get maximum corner
    pub fn max(&self) -> Vector3<f64> {
        self.max
    }

    /// Get the size of the bounding box
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Get the center of the bounding box
    pub fn center(&self) -> Vector3<f64> {
        (self.min + self.max) * 0.5
    }

    /// Check if the bounding box is empty
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Check if a point is inside the bounding box
    pub fn contains(&self, point: Vector3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Expand the bounding box to include a point
    pub fn include_point(&mut self, point: Vector3<f64>) {
        self.min = self.min.inf(&point);
        self.max = self.max.sup(&point);
    }
}

impl fmt::Display for BBox3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Min: <{:.2}, {:.2}, {:.2}> | Max: <{:.2}, {:.2}, {:.2}>>",
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_include() {
        let mut bbox = BBox3::empty();
        assert!(bbox.is_empty());
        bbox.include_point(Vector3::new(0.0, 0.0, 0.0));
        bbox.include_point(Vector3::new(10.0, -2.0, 4.0));
        assert!(!bbox.is_empty());
        assert_eq!(bbox.size(), Vector3::new(10.0, 2.0, 4.0));
        assert_eq!(bbox.center(), Vector3::new(5.0, -1.0, 2.0));
        assert!(bbox.contains(Vector3::new(5.0, -1.0, 2.0)));
        assert!(!bbox.contains(Vector3::new(15.0, 0.0, 0.0)));
    }

    #[test]
    fn test_triangle() {
        let tri = Triangle::new(0, 1, 2);
        assert_eq!(tri.indices(), [0, 1, 2]);
        assert_eq!(Triangle::unshared(2), Triangle::new(6, 7, 8));
        assert_eq!(tri.to_string(), "Triangle(0, 1, 2)");
    }
}
