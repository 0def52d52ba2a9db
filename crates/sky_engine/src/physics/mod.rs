//! Physics module for collision detection and response
//!
//! Resolves the player capsule against the static world using the octree
//! from `spatial` as the broad phase.

pub mod collision;

pub use collision::{
    Capsule,
    CollisionError,
    CollisionResolver,
    Contact,
    ContactPolicy,
    GeometryError,
    Resolution,
    Triangle,
    WorldMesh,
};
