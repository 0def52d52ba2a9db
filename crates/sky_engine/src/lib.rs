//! # Sky Engine
//!
//! First-person movement through a static triangulated world: a capsule
//! player volume resolved against an octree of world triangles, with
//! gravity, floor detection, wall sliding and pointer look.
//!
//! ## Features
//!
//! - **Octree Geometry Index**: capsule queries only test nearby triangles
//! - **Capsule Collision**: face and edge contacts with floor classification
//! - **Locomotion**: grounded drag, jumping, gravity and fall-out respawn
//! - **Input State**: thread-safe key map with per-step snapshots
//! - **Configuration**: TOML or RON files through serde
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sky_engine::prelude::*;
//!
//! fn main() -> Result<(), SceneError> {
//!     sky_engine::foundation::logging::init();
//!
//!     let floor = WorldMesh::new(
//!         "floor",
//!         vec![
//!             Vec3::new(-50.0, 0.0, -50.0),
//!             Vec3::new(-50.0, 0.0, 150.0),
//!             Vec3::new(150.0, 0.0, -50.0),
//!         ],
//!     );
//!     let mut scene = SkyScene::new(&SkyConfig::default(), &[floor])?;
//!
//!     // Forward host events through this handle
//!     let input = scene.input();
//!     input.handle_event(&InputEvent::key_down(KeyCode::W));
//!
//!     // Once per display frame
//!     if let Some(pose) = scene.frame() {
//!         println!("eye {:?} looking {:?}", pose.position, pose.direction);
//!     }
//!
//!     scene.dispose();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod spatial;
pub mod physics;
pub mod input;
pub mod player;
pub mod scene;

#[cfg(test)]
mod tests;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::{
            math::{Vec3, Mat4, Transform},
            time::FrameClock,
        },
        input::{InputEvent, InputSnapshot, InputState, KeyCode},
        physics::{Capsule, CollisionResolver, Contact, ContactPolicy, Triangle, WorldMesh},
        player::{CameraPose, FirstPersonCamera, PlayerConfig, PlayerController},
        scene::{SceneError, SkyConfig, SkyParameters, SkyScene},
        spatial::{Octree, OctreeConfig},
    };
}
