//! World triangles

use crate::foundation::math::Vec3;

/// A triangle of the static world mesh, in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
}

/// Supporting plane of a triangle in Hessian normal form
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Unit normal (right-hand rule on the triangle winding)
    pub normal: Vec3,
    /// Signed offset such that `normal · p + constant == 0` on the plane
    pub constant: f32,
}

impl Plane {
    /// Signed distance from the plane, positive on the normal side
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(&point) + self.constant
    }
}

impl Triangle {
    /// Creates a new triangle
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Calculates the normal of the triangle (right-hand rule)
    ///
    /// Degenerate triangles yield the zero vector.
    pub fn normal(&self) -> Vec3 {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1.cross(&edge2).try_normalize(0.0).unwrap_or_else(Vec3::zeros)
    }

    /// Plane containing the triangle
    pub fn plane(&self) -> Plane {
        let normal = self.normal();
        Plane {
            normal,
            constant: -normal.dot(&self.v0),
        }
    }

    /// The three edges as (start, end) pairs, in winding order
    pub fn edges(&self) -> [(Vec3, Vec3); 3] {
        [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)]
    }

    /// Whether a point (assumed on or near the plane) projects inside the triangle
    ///
    /// Uses barycentric coordinates; points on an edge count as inside.
    pub fn contains_point(&self, point: Vec3) -> bool {
        let e0 = self.v2 - self.v0;
        let e1 = self.v1 - self.v0;
        let to_point = point - self.v0;

        let dot00 = e0.dot(&e0);
        let dot01 = e0.dot(&e1);
        let dot02 = e0.dot(&to_point);
        let dot11 = e1.dot(&e1);
        let dot12 = e1.dot(&to_point);

        let denom = dot00 * dot11 - dot01 * dot01;
        if denom == 0.0 {
            return false;
        }

        let inv_denom = 1.0 / denom;
        let u = (dot11 * dot02 - dot01 * dot12) * inv_denom;
        let v = (dot00 * dot12 - dot01 * dot02) * inv_denom;

        u >= 0.0 && v >= 0.0 && u + v <= 1.0
    }

    /// Vertices as an array, for bounds computation
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn floor() -> Triangle {
        Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
        )
    }

    #[test]
    fn test_counter_clockwise_from_above_faces_up() {
        assert_relative_eq!(floor().normal(), Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_plane_distance() {
        let plane = Triangle::new(
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 2.0, 1.0),
            Vec3::new(1.0, 2.0, 0.0),
        )
        .plane();

        assert_relative_eq!(plane.distance_to_point(Vec3::new(5.0, 3.5, -2.0)), 1.5, epsilon = 1e-6);
        assert_relative_eq!(plane.distance_to_point(Vec3::new(0.0, 0.0, 0.0)), -2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_contains_point() {
        let triangle = floor();
        assert!(triangle.contains_point(Vec3::new(0.25, 0.0, 0.25)));
        assert!(triangle.contains_point(Vec3::new(0.0, 0.0, 0.5)));
        assert!(!triangle.contains_point(Vec3::new(0.75, 0.0, 0.75)));
        assert!(!triangle.contains_point(Vec3::new(-0.1, 0.0, 0.5)));
    }

    #[test]
    fn test_degenerate_triangle() {
        let sliver = Triangle::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(sliver.normal(), Vec3::zeros());
        assert!(!sliver.contains_point(Vec3::new(0.5, 0.0, 0.0)));
    }
}
