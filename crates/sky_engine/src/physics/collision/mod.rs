//! Collision detection for the player capsule against static world geometry
//!
//! Organized into:
//! - `triangle`: World triangles and their planes
//! - `capsule`: The player volume and capsule/triangle narrow phase
//! - `contact`: Contact results and the policy for combining them
//! - `resolver`: Floor classification, wall sliding, and respawn
//! - `mesh`: World mesh to triangle conversion

mod capsule;
mod contact;
mod mesh;
mod resolver;
mod triangle;

pub use capsule::Capsule;
pub use contact::{Contact, ContactPolicy};
pub use mesh::WorldMesh;
pub use resolver::{CollisionResolver, Resolution};
pub use triangle::{Plane, Triangle};

/// Collision shape errors
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// Capsule radius must be positive and finite
    #[error("capsule radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
}

/// Malformed world geometry
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Index buffer length is not a multiple of three
    #[error("mesh '{mesh}' has {count} indices, expected a multiple of 3")]
    IndexCount {
        /// Mesh name
        mesh: String,
        /// Number of indices
        count: usize,
    },

    /// Non-indexed vertex buffer length is not a multiple of three
    #[error("mesh '{mesh}' has {count} vertices, expected a multiple of 3")]
    VertexCount {
        /// Mesh name
        mesh: String,
        /// Number of vertices
        count: usize,
    },

    /// Index refers past the end of the vertex buffer
    #[error("mesh '{mesh}' references vertex {index} but has only {vertex_count}")]
    IndexOutOfRange {
        /// Mesh name
        mesh: String,
        /// Offending index
        index: u32,
        /// Number of vertices in the mesh
        vertex_count: usize,
    },
}
