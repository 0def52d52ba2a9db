//! Contact results produced by capsule queries

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;

/// A single penetration between the player capsule and world geometry
///
/// Produced fresh by every query and never retained between steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit direction that pushes the capsule out of the geometry
    pub normal: Vec3,
    /// Non-negative penetration distance along `normal`
    pub depth: f32,
    /// Contact point on the world geometry
    pub point: Vec3,
}

impl Contact {
    /// Displacement that resolves this penetration
    pub fn correction(&self) -> Vec3 {
        self.normal * self.depth
    }
}

/// How several simultaneous contacts collapse into the one result handed to the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContactPolicy {
    /// Report the deepest contact; ties go to the first one found in traversal order
    #[default]
    Deepest,
    /// Push a scratch capsule out of each contact in turn and report the
    /// total displacement as one normal and depth
    Accumulated,
}
