//! First-person player: locomotion, look control and tuning
//!
//! The [`PlayerController`] owns the capsule and its velocity. The
//! [`FirstPersonCamera`] is owned by the caller and only receives the
//! resolved eye position and pointer rotation.

mod camera;
mod config;
mod controller;

pub use camera::{CameraPose, FirstPersonCamera};
pub use config::{KeyBindings, PlayerConfig};
pub use controller::{KinematicState, PlayerController};
