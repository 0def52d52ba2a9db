//! The sky scene session
//!
//! Owns the world index, the player and its camera, the input handle and
//! the frame clock for as long as the scene is shown.

use super::{SceneError, SkyConfig, SkyParameters};
use crate::config::Config;
use crate::foundation::math::Vec3;
use crate::foundation::time::FrameClock;
use crate::input::InputState;
use crate::physics::WorldMesh;
use crate::player::{CameraPose, FirstPersonCamera, PlayerController};
use crate::spatial::Octree;

/// Directional light settings derived from the sky
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunLight {
    /// Unit vector toward the sun
    pub direction: Vec3,
    /// Tone mapping exposure
    pub exposure: f32,
}

/// A running first-person walk through a static world under an open sky
///
/// The host forwards input events through [`SkyScene::input`] and calls
/// [`SkyScene::frame`] once per display frame. After [`SkyScene::stop`] the
/// state stays available for inspection until the scene is dropped or
/// disposed.
pub struct SkyScene {
    config: SkyConfig,
    world: Octree,
    controller: PlayerController,
    camera: FirstPersonCamera,
    input: InputState,
    clock: FrameClock,
    running: bool,
}

impl SkyScene {
    /// Build the world index from `meshes` and place the player at spawn
    ///
    /// Meshes are scaled by the configured world scale before indexing.
    pub fn new(config: &SkyConfig, meshes: &[WorldMesh]) -> Result<Self, SceneError> {
        config.validate()?;

        let scaled: Vec<WorldMesh> = meshes
            .iter()
            .map(|mesh| WorldMesh {
                transform: mesh.transform.clone().scaled(config.world_scale),
                ..mesh.clone()
            })
            .collect();
        let world = Octree::from_meshes(&scaled, config.octree.clone())?;

        let controller = PlayerController::new(&config.player, config.world_scale);
        let camera = FirstPersonCamera::new(controller.capsule().end());

        log::info!(
            "Sky scene ready: {} meshes, {} triangles, spawn at {:?}",
            meshes.len(),
            world.triangle_count(),
            controller.capsule().end()
        );

        Ok(Self {
            config: config.clone(),
            world,
            controller,
            camera,
            input: InputState::new(),
            clock: FrameClock::new(),
            running: true,
        })
    }

    /// Handle for the host event system
    pub fn input(&self) -> InputState {
        self.input.clone()
    }

    /// Run one step timed by the wall clock
    ///
    /// Returns `None` once the scene has been stopped.
    pub fn frame(&mut self) -> Option<CameraPose> {
        if !self.running {
            return None;
        }
        let delta_time = self.clock.tick();
        self.advance(delta_time)
    }

    /// Run one step with an explicit delta time
    ///
    /// A zero, negative or NaN delta leaves the player and any pending look
    /// motion untouched.
    pub fn advance(&mut self, delta_time: f32) -> Option<CameraPose> {
        if !self.running {
            return None;
        }
        if delta_time.is_nan() || delta_time <= 0.0 {
            return Some(self.camera.pose());
        }

        let input = self.input.snapshot();
        self.controller.step(delta_time, &input, &mut self.camera, &self.world);
        Some(self.camera.pose())
    }

    /// Stop requesting frames; state stays as it is
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Sky scene stopped after {} frames", self.clock.frame_count());
        }
        self.running = false;
    }

    /// Whether frames are still being simulated
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Release the scene and everything it owns
    pub fn dispose(mut self) {
        self.stop();
    }

    /// Camera handed to the renderer
    pub fn camera(&self) -> &FirstPersonCamera {
        &self.camera
    }

    /// Mutable camera, for hosts that set the initial orientation
    pub fn camera_mut(&mut self) -> &mut FirstPersonCamera {
        &mut self.camera
    }

    /// Player locomotion state
    pub fn controller(&self) -> &PlayerController {
        &self.controller
    }

    /// Static world index
    pub fn world(&self) -> &Octree {
        &self.world
    }

    /// Sky settings
    pub fn sky(&self) -> &SkyParameters {
        &self.config.sky
    }

    /// Directional light matching the sun
    pub fn sun_light(&self) -> SunLight {
        SunLight {
            direction: self.config.sky.sun_direction(),
            exposure: self.config.sky.exposure,
        }
    }

    /// Configuration the scene was built with
    pub fn config(&self) -> &SkyConfig {
        &self.config
    }
}

impl Drop for SkyScene {
    fn drop(&mut self) {
        log::info!(
            "Releasing sky scene ({} octree nodes, {} triangles)",
            self.world.node_count(),
            self.world.triangle_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::input::{InputEvent, KeyCode};
    use crate::physics::GeometryError;
    use approx::assert_relative_eq;

    fn floor() -> WorldMesh {
        WorldMesh::new(
            "floor",
            vec![
                Vec3::new(-50.0, 0.0, -50.0),
                Vec3::new(-50.0, 0.0, 150.0),
                Vec3::new(150.0, 0.0, -50.0),
            ],
        )
    }

    #[test]
    fn test_meshes_are_world_scaled() {
        let scene = SkyScene::new(&SkyConfig::default(), &[floor()]).unwrap();
        let bounds = scene.world().bounds().unwrap();

        assert_relative_eq!(bounds.min.x, -100.01, epsilon = 1e-3);
        assert_relative_eq!(bounds.max.z, 300.01, epsilon = 1e-3);
        assert_eq!(scene.camera().position(), Vec3::new(0.0, 11.0, 0.0));
    }

    #[test]
    fn test_player_lands_through_scene() {
        let mut scene = SkyScene::new(&SkyConfig::default(), &[floor()]).unwrap();
        for _ in 0..240 {
            scene.advance(1.0 / 60.0);
        }

        assert!(scene.controller().on_floor());
        assert_relative_eq!(scene.controller().capsule().start().y, 0.35, epsilon = 1e-3);
    }

    #[test]
    fn test_input_handle_reaches_controller() {
        let mut scene = SkyScene::new(&SkyConfig::default(), &[floor()]).unwrap();
        let input = scene.input();
        input.handle_event(&InputEvent::MouseDown);
        input.handle_event(&InputEvent::PointerMove { dx: -100.0, dy: 0.0 });
        input.handle_event(&InputEvent::key_down(KeyCode::W));

        scene.advance(1.0 / 60.0);
        assert_relative_eq!(scene.camera().yaw(), 0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_advance_keeps_look_motion() {
        let mut scene = SkyScene::new(&SkyConfig::default(), &[floor()]).unwrap();
        let input = scene.input();
        input.handle_event(&InputEvent::MouseDown);
        input.handle_event(&InputEvent::PointerMove { dx: -100.0, dy: 0.0 });
        let capsule = *scene.controller().capsule();

        for delta_time in [0.0, -1.0, f32::NAN] {
            let pose = scene.advance(delta_time).unwrap();
            assert_eq!(pose.position, Vec3::new(0.0, 11.0, 0.0));
        }
        assert_eq!(scene.camera().yaw(), 0.0);
        assert_eq!(*scene.controller().capsule(), capsule);

        scene.advance(1.0 / 60.0);
        assert_relative_eq!(scene.camera().yaw(), 0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_stop_keeps_state() {
        let mut scene = SkyScene::new(&SkyConfig::default(), &[floor()]).unwrap();
        scene.advance(1.0 / 60.0);
        let capsule = *scene.controller().capsule();

        scene.stop();
        assert!(!scene.is_running());
        assert!(scene.advance(1.0 / 60.0).is_none());
        assert!(scene.frame().is_none());
        assert_eq!(*scene.controller().capsule(), capsule);

        scene.dispose();
    }

    #[test]
    fn test_construction_errors() {
        let bad_mesh = WorldMesh::new("broken", vec![Vec3::zeros(); 2]);
        let err = SkyScene::new(&SkyConfig::default(), &[bad_mesh]).err().unwrap();
        assert!(matches!(err, SceneError::Geometry(GeometryError::VertexCount { .. })));

        let config = SkyConfig { world_scale: -1.0, ..SkyConfig::default() };
        let err = SkyScene::new(&config, &[]).err().unwrap();
        assert!(matches!(err, SceneError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_sun_light_follows_sky() {
        let scene = SkyScene::new(&SkyConfig::default(), &[]).unwrap();
        let light = scene.sun_light();

        assert_relative_eq!(light.direction, scene.sky().sun_direction());
        assert_eq!(light.exposure, 0.5);
    }
}
