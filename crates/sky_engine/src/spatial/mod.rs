//! Spatial partitioning data structures
//!
//! Provides the static octree the player capsule is resolved against.

mod aabb;
mod octree;

pub use aabb::AABB;
pub use octree::{Octree, OctreeConfig, OctreeNode};
