//! Axis-aligned bounding boxes

use crate::foundation::math::Vec3;
use crate::physics::collision::Triangle;

/// Axis-Aligned Bounding Box for spatial queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every given point, `None` for an empty iterator
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |mut aabb, p| {
            aabb.min = aabb.min.inf(&p);
            aabb.max = aabb.max.sup(&p);
            aabb
        }))
    }

    /// Grow the box by `margin` on every side
    #[must_use]
    pub fn padded(&self, margin: f32) -> Self {
        let margin = Vec3::new(margin, margin, margin);
        Self::new(self.min - margin, self.max + margin)
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this AABB intersects another AABB
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// The eight octants of this box, indexed `(z << 2) | (y << 1) | x`
    ///
    /// Octant layout:
    /// 0: -X, -Y, -Z    4: -X, -Y, +Z
    /// 1: +X, -Y, -Z    5: +X, -Y, +Z
    /// 2: -X, +Y, -Z    6: -X, +Y, +Z
    /// 3: +X, +Y, -Z    7: +X, +Y, +Z
    pub fn octants(&self) -> [AABB; 8] {
        let half_size = self.extents();
        std::array::from_fn(|octant| {
            let offset = Vec3::new(
                if octant & 1 != 0 { half_size.x } else { 0.0 },
                if octant & 2 != 0 { half_size.y } else { 0.0 },
                if octant & 4 != 0 { half_size.z } else { 0.0 },
            );
            let min = self.min + offset;
            AABB::new(min, min + half_size)
        })
    }

    /// Box/triangle overlap using the separating axis theorem
    ///
    /// Tests 13 potential separating axes:
    /// - 9 cross products of the box axes with the triangle edges
    /// - 3 box face normals
    /// - 1 triangle face normal
    pub fn intersects_triangle(&self, triangle: &Triangle) -> bool {
        let center = self.center();
        let extents = self.extents();

        // Triangle relative to the box center
        let v0 = triangle.v0 - center;
        let v1 = triangle.v1 - center;
        let v2 = triangle.v2 - center;

        let edges = [v1 - v0, v2 - v1, v0 - v2];

        let overlaps_on = |axis: Vec3| -> bool {
            let r = extents.x * axis.x.abs() + extents.y * axis.y.abs() + extents.z * axis.z.abs();
            let p0 = v0.dot(&axis);
            let p1 = v1.dot(&axis);
            let p2 = v2.dot(&axis);
            let max_p = p0.max(p1).max(p2);
            let min_p = p0.min(p1).min(p2);
            (-max_p).max(min_p) <= r
        };

        for box_axis in [Vec3::x(), Vec3::y(), Vec3::z()] {
            for edge in &edges {
                if !overlaps_on(box_axis.cross(edge)) {
                    return false;
                }
            }
        }

        for box_axis in [Vec3::x(), Vec3::y(), Vec3::z()] {
            if !overlaps_on(box_axis) {
                return false;
            }
        }

        overlaps_on(edges[0].cross(&edges[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> AABB {
        AABB::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_from_points_and_padding() {
        let aabb = AABB::from_points([
            Vec3::new(1.0, 0.0, -2.0),
            Vec3::new(-1.0, 3.0, 0.0),
        ])
        .unwrap()
        .padded(0.5);

        assert_eq!(aabb.min, Vec3::new(-1.5, -0.5, -2.5));
        assert_eq!(aabb.max, Vec3::new(1.5, 3.5, 0.5));
        assert!(AABB::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_octants_tile_parent() {
        let octants = unit_box().octants();

        assert_eq!(octants[0].min, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(octants[0].max, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(octants[7].min, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(octants[7].max, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(octants[5].min, Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_triangle_crossing_box() {
        // Large triangle slicing through the middle of the box
        let triangle = Triangle::new(
            Vec3::new(-10.0, 0.0, -10.0),
            Vec3::new(-10.0, 0.0, 30.0),
            Vec3::new(30.0, 0.0, -10.0),
        );
        assert!(unit_box().intersects_triangle(&triangle));
    }

    #[test]
    fn test_triangle_outside_box() {
        let above = Triangle::new(
            Vec3::new(-10.0, 2.0, -10.0),
            Vec3::new(-10.0, 2.0, 30.0),
            Vec3::new(30.0, 2.0, -10.0),
        );
        assert!(!unit_box().intersects_triangle(&above));

        // Plane passes through the box region but the triangle itself does not
        let beside = Triangle::new(
            Vec3::new(3.0, 0.0, 3.0),
            Vec3::new(3.0, 0.0, 5.0),
            Vec3::new(5.0, 0.0, 3.0),
        );
        assert!(!unit_box().intersects_triangle(&beside));
    }
}
