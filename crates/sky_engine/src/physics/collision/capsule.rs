//! Capsule volume used as the player hitbox
//!
//! A capsule is a line segment swept by a sphere. All narrow-phase tests
//! against world triangles live here so the resolver and the octree can share
//! them without the capsule owning any world geometry.

use serde::{Deserialize, Serialize};

use super::{CollisionError, Contact, Triangle};
use crate::foundation::math::{utils, Vec3};
use crate::spatial::AABB;

/// Swept-sphere volume between `start` (feet) and `end` (head)
///
/// The radius is validated on construction and on every `set`, so a capsule
/// value always has a positive, finite radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CapsuleShape", into = "CapsuleShape")]
pub struct Capsule {
    start: Vec3,
    end: Vec3,
    radius: f32,
}

/// Unvalidated serialized form of a [`Capsule`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct CapsuleShape {
    start: Vec3,
    end: Vec3,
    radius: f32,
}

impl TryFrom<CapsuleShape> for Capsule {
    type Error = CollisionError;

    fn try_from(shape: CapsuleShape) -> Result<Self, Self::Error> {
        Self::new(shape.start, shape.end, shape.radius)
    }
}

impl From<Capsule> for CapsuleShape {
    fn from(capsule: Capsule) -> Self {
        Self {
            start: capsule.start,
            end: capsule.end,
            radius: capsule.radius,
        }
    }
}

impl Default for Capsule {
    /// Player-sized capsule at the default spawn point
    fn default() -> Self {
        Self {
            start: Vec3::new(0.0, 10.0, 0.0),
            end: Vec3::new(0.0, 11.0, 0.0),
            radius: 0.35,
        }
    }
}

impl Capsule {
    /// Create a capsule, rejecting non-positive or non-finite radii
    pub fn new(start: Vec3, end: Vec3, radius: f32) -> Result<Self, CollisionError> {
        Self::check_radius(radius)?;
        Ok(Self { start, end, radius })
    }

    /// Replace the whole pose (used for respawn)
    pub fn set(&mut self, start: Vec3, end: Vec3, radius: f32) -> Result<(), CollisionError> {
        *self = Self::new(start, end, radius)?;
        Ok(())
    }

    fn check_radius(radius: f32) -> Result<(), CollisionError> {
        if radius.is_finite() && radius > 0.0 {
            Ok(())
        } else {
            Err(CollisionError::InvalidRadius(radius))
        }
    }

    /// Lower segment endpoint
    pub fn start(&self) -> Vec3 {
        self.start
    }

    /// Upper segment endpoint, where the camera sits
    pub fn end(&self) -> Vec3 {
        self.end
    }

    /// Sphere radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Midpoint of the segment
    pub fn center(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }

    /// Height of the lowest segment endpoint
    pub fn lowest_y(&self) -> f32 {
        self.start.y.min(self.end.y)
    }

    /// Shift both endpoints
    pub fn translate(&mut self, offset: Vec3) {
        self.start += offset;
        self.end += offset;
    }

    /// Box enclosing the whole swept sphere
    pub fn bounding_box(&self) -> AABB {
        AABB::new(self.start.inf(&self.end), self.start.sup(&self.end)).padded(self.radius)
    }

    /// Closest points between the capsule segment and another segment
    ///
    /// Returns `(point on capsule segment, point on other segment)`.
    pub fn closest_points_to_segment(&self, seg_start: Vec3, seg_end: Vec3) -> (Vec3, Vec3) {
        const EPSILON: f32 = 1e-10;

        let r = self.end - self.start;
        let s = seg_end - seg_start;
        let w = seg_start - self.start;

        let a = r.dot(&s);
        let b = r.dot(&r);
        let c = s.dot(&s);
        let d = s.dot(&w);
        let e = r.dot(&w);

        let (t1, t2) = if c < EPSILON {
            // Other segment is a point
            (if b < EPSILON { 0.0 } else { e / b }, 0.0)
        } else {
            let divisor = b * c - a * a;
            if divisor.abs() < EPSILON {
                // Parallel (or the capsule is a sphere): pin whichever capsule
                // endpoint lands nearer the middle of the other segment
                let from_start = -d / c;
                let from_end = (a - d) / c;
                if (from_start - 0.5).abs() < (from_end - 0.5).abs() {
                    (0.0, from_start)
                } else {
                    (1.0, from_end)
                }
            } else {
                let t1 = (e * c - a * d) / divisor;
                (t1, (t1 * a - d) / c)
            }
        };

        let t1 = t1.clamp(0.0, 1.0);
        let t2 = t2.clamp(0.0, 1.0);

        (self.start + r * t1, seg_start + s * t2)
    }

    /// Narrow-phase capsule/triangle test
    ///
    /// First checks where the segment crosses the triangle plane; when that
    /// point lies inside the triangle the contact is a face contact along the
    /// triangle normal. Otherwise the nearest triangle edge decides.
    pub fn intersect_triangle(&self, triangle: &Triangle) -> Option<Contact> {
        let plane = triangle.plane();
        if plane.normal == Vec3::zeros() {
            return None;
        }

        let d1 = plane.distance_to_point(self.start) - self.radius;
        let d2 = plane.distance_to_point(self.end) - self.radius;

        if (d1 > 0.0 && d2 > 0.0) || (d1 < -self.radius && d2 < -self.radius) {
            return None;
        }

        let span = d1.abs() + d2.abs();
        let delta = if span > 0.0 { (d1 / span).abs() } else { 0.0 };
        let crossing = utils::lerp(self.start, self.end, delta);

        if triangle.contains_point(crossing) {
            return Some(Contact {
                normal: plane.normal,
                depth: d1.min(d2).abs(),
                point: crossing,
            });
        }

        let radius_sq = self.radius * self.radius;
        for (edge_start, edge_end) in triangle.edges() {
            let (on_capsule, on_edge) = self.closest_points_to_segment(edge_start, edge_end);
            let offset = on_capsule - on_edge;
            let distance_sq = offset.norm_squared();

            if distance_sq < radius_sq {
                let distance = distance_sq.sqrt();
                // Segment touching the edge exactly has no separating direction
                let normal = offset.try_normalize(0.0).unwrap_or(plane.normal);
                return Some(Contact {
                    normal,
                    depth: self.radius - distance,
                    point: on_edge,
                });
            }
        }

        None
    }
}
