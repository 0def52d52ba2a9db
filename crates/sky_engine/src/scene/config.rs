//! Session configuration for the sky scene

use serde::{Deserialize, Serialize};

use super::SkyParameters;
use crate::config::{Config, ConfigError};
use crate::player::PlayerConfig;
use crate::spatial::OctreeConfig;

/// Everything needed to set up a sky scene session
///
/// Built once at startup (defaults or a file) and passed by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    /// Uniform scale applied to world meshes and the fall threshold
    pub world_scale: f32,

    /// Locomotion tuning
    pub player: PlayerConfig,

    /// Geometry index tuning
    pub octree: OctreeConfig,

    /// Sky and sun settings
    pub sky: SkyParameters,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            world_scale: 2.0,
            player: PlayerConfig::default(),
            octree: OctreeConfig::default(),
            sky: SkyParameters::default(),
        }
    }
}

impl Config for SkyConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.world_scale.is_finite() && self.world_scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "world_scale must be > 0, got {}",
                self.world_scale
            )));
        }

        if self.octree.triangles_per_leaf == 0 {
            return Err(ConfigError::Invalid("octree.triangles_per_leaf must be at least 1".into()));
        }
        if !(self.octree.bounds_padding >= 0.0 && self.octree.min_node_size >= 0.0) {
            return Err(ConfigError::Invalid(
                "octree.bounds_padding and octree.min_node_size must be >= 0".into(),
            ));
        }

        self.player.validate()?;
        self.sky.validate()
    }
}
