//! Scene lifecycle
//!
//! A [`SkyScene`] ties the world index, the player and the sky together for
//! the lifetime of one session.

mod config;
mod sky;
mod sky_scene;

pub use config::SkyConfig;
pub use sky::SkyParameters;
pub use sky_scene::{SkyScene, SunLight};

use crate::config::ConfigError;
use crate::physics::{CollisionError, GeometryError};

/// Errors raised while setting up a scene
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Configuration failed to load or validate
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A world mesh could not be converted to triangles
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Invalid player volume
    #[error("Collision error: {0}")]
    Collision(#[from] CollisionError),
}
