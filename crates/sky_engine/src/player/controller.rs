//! Player locomotion controller.
//!
//! Integrates gravity, ground drag and key input into the player's velocity,
//! moves the capsule, resolves it against the world and places the camera.
//!
//! # Example
//!
//! ```
//! use sky_engine::input::InputSnapshot;
//! use sky_engine::player::{FirstPersonCamera, PlayerConfig, PlayerController};
//! use sky_engine::spatial::Octree;
//!
//! let world = Octree::empty();
//! let mut controller = PlayerController::new(&PlayerConfig::default(), 2.0);
//! let mut camera = FirstPersonCamera::default();
//!
//! // Each frame:
//! controller.step(1.0 / 60.0, &InputSnapshot::empty(), &mut camera, &world);
//! assert!(controller.velocity().y < 0.0);
//! ```

use super::{FirstPersonCamera, PlayerConfig};
use crate::foundation::math::Vec3;
use crate::input::InputSnapshot;
use crate::physics::{Capsule, CollisionResolver, Resolution};
use crate::spatial::Octree;

/// Player velocity and support state, updated once per step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicState {
    /// World units per second
    pub velocity: Vec3,
    /// Supported by a floor contact after the last step
    pub on_floor: bool,
}

/// Drives the player capsule through the world
///
/// Grounded: velocity decays toward rest, movement keys push along the
/// camera's horizontal heading and the jump key launches upwards.
/// Airborne: gravity pulls the velocity down and movement keys only apply
/// through `air_control`.
#[derive(Debug, Clone)]
pub struct PlayerController {
    config: PlayerConfig,
    capsule: Capsule,
    state: KinematicState,
    resolver: CollisionResolver,
    last_resolution: Option<Resolution>,
}

impl PlayerController {
    /// Create a controller standing at the configured spawn pose
    ///
    /// `world_scale` multiplies the fall threshold.
    pub fn new(config: &PlayerConfig, world_scale: f32) -> Self {
        let resolver = CollisionResolver::new(
            config.spawn,
            config.fall_threshold * world_scale,
            config.floor_normal_threshold,
        );

        Self {
            config: config.clone(),
            capsule: config.spawn,
            state: KinematicState::default(),
            resolver,
            last_resolution: None,
        }
    }

    /// Player volume
    pub fn capsule(&self) -> &Capsule {
        &self.capsule
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec3 {
        self.state.velocity
    }

    /// Whether the last step ended on the floor
    pub fn on_floor(&self) -> bool {
        self.state.on_floor
    }

    /// Velocity and floor state
    pub fn state(&self) -> KinematicState {
        self.state
    }

    /// Collision outcome of the most recent step
    pub fn last_resolution(&self) -> Option<&Resolution> {
        self.last_resolution.as_ref()
    }

    /// Movement parameters
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Put the player back at the spawn pose, at rest
    pub fn respawn(&mut self) {
        self.capsule = *self.resolver.spawn();
        self.state = KinematicState::default();
        self.last_resolution = None;
    }

    /// Advance the player by one frame
    ///
    /// Steps of zero, negative or NaN length change nothing. Longer steps
    /// are clamped to `max_delta_time`. Returns the new camera position.
    pub fn step(
        &mut self,
        delta_time: f32,
        input: &InputSnapshot,
        camera: &mut FirstPersonCamera,
        world: &Octree,
    ) -> Vec3 {
        if delta_time.is_nan() || delta_time <= 0.0 {
            log::trace!("Skipping player step with delta time {delta_time}");
            return camera.position();
        }
        let delta_time = delta_time.min(self.config.max_delta_time);

        let (dx, dy) = input.look_delta();
        camera.rotate(dx, dy, self.config.look_sensitivity);

        self.accelerate(delta_time, input, camera);

        self.capsule.translate(self.state.velocity * delta_time);
        let resolution = self.resolver.resolve(&mut self.capsule, &mut self.state.velocity, world);
        self.state.on_floor = resolution.on_floor;
        self.last_resolution = Some(resolution);

        camera.set_position(self.capsule.end());
        log::trace!(
            "Player at {:?} velocity {:?} on_floor {}",
            self.capsule.end(),
            self.state.velocity,
            self.state.on_floor
        );
        camera.position()
    }

    fn accelerate(&mut self, delta_time: f32, input: &InputSnapshot, camera: &FirstPersonCamera) {
        let velocity = &mut self.state.velocity;

        // Drag only sees the velocity carried in from the last step, so this
        // step's impulses and a jump at exactly `jump_speed` are not damped.
        let move_scale = if self.state.on_floor {
            let damping = (-self.config.ground_damping * delta_time).exp() - 1.0;
            *velocity += *velocity * damping;
            self.config.move_speed * delta_time
        } else {
            velocity.y -= self.config.gravity * delta_time;
            self.config.move_speed * delta_time * self.config.air_control
        };

        if move_scale > 0.0 {
            let bindings = &self.config.bindings;
            let forward = camera.forward_vector();
            let side = camera.side_vector();

            if input.is_pressed(&bindings.forward) {
                *velocity += forward * move_scale;
            }
            if input.is_pressed(&bindings.backward) {
                *velocity -= forward * move_scale;
            }
            if input.is_pressed(&bindings.left) {
                *velocity -= side * move_scale;
            }
            if input.is_pressed(&bindings.right) {
                *velocity += side * move_scale;
            }
        }

        if self.state.on_floor && input.is_pressed(&self.config.bindings.jump) {
            velocity.y = self.config.jump_speed;
        }
    }
}
