//! Sky walk demo application
//!
//! Runs a headless session of the sky scene: builds a small level, plays a
//! scripted input timeline at a fixed 60 Hz and logs where the camera goes.
//!
//! Usage: `sky_walk [config.toml|config.ron]`

mod level;
mod script;

use sky_engine::config::{Config, ConfigError};
use sky_engine::foundation::logging;
use sky_engine::input::{InputEvent, KeyCode};
use sky_engine::physics::Resolution;
use sky_engine::scene::{SceneError, SkyConfig, SkyScene};

const FRAME_TIME: f32 = 1.0 / 60.0;

/// Demo failures
#[derive(thiserror::Error, Debug)]
enum AppError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to set up the scene: {0}")]
    Scene(#[from] SceneError),
}

#[derive(Debug, Default)]
struct WalkStats {
    frames: u32,
    frames_on_floor: u32,
    respawns: u32,
    wall_contacts: u32,
}

/// A contact the resolver did not treat as floor
fn is_wall_contact(resolution: &Resolution) -> bool {
    resolution.contact.is_some() && !resolution.on_floor && !resolution.respawned
}

fn load_config() -> Result<SkyConfig, AppError> {
    match std::env::args().nth(1) {
        Some(path) => Ok(SkyConfig::load_from_file(path)?),
        None => {
            log::info!("No configuration file given, using defaults");
            Ok(SkyConfig::default())
        }
    }
}

fn run(config: &SkyConfig) -> Result<WalkStats, AppError> {
    let meshes = level::build();
    let mut scene = SkyScene::new(config, &meshes)?;
    let input = scene.input();
    let mut stats = WalkStats::default();

    let sun = scene.sun_light();
    log::info!("Sun direction {:?}, exposure {}", sun.direction, sun.exposure);

    input.handle_event(&InputEvent::MouseDown);

    let mut held: &[KeyCode] = &[];
    for phase in script::TIMELINE {
        log::info!("Phase '{}' ({:.1}s)", phase.name, phase.seconds);
        for event in script::transition(held, phase.keys) {
            input.handle_event(&event);
        }
        held = phase.keys;

        for frame in 0..phase.frames(FRAME_TIME) {
            if let Some(event) = phase.pointer_event() {
                input.handle_event(&event);
            }

            let Some(pose) = scene.advance(FRAME_TIME) else {
                break;
            };

            let controller = scene.controller();
            stats.frames += 1;
            if controller.on_floor() {
                stats.frames_on_floor += 1;
            }
            if let Some(resolution) = controller.last_resolution() {
                if resolution.respawned {
                    stats.respawns += 1;
                }
                if is_wall_contact(resolution) {
                    stats.wall_contacts += 1;
                }
            }

            if frame % 30 == 0 {
                log::info!(
                    "  eye ({:>7.2}, {:>7.2}, {:>7.2}) look ({:>5.2}, {:>5.2}, {:>5.2}) floor {}",
                    pose.position.x,
                    pose.position.y,
                    pose.position.z,
                    pose.direction.x,
                    pose.direction.y,
                    pose.direction.z,
                    controller.on_floor()
                );
            }
        }
    }

    input.handle_event(&InputEvent::PointerLockLost);
    scene.stop();
    scene.dispose();
    Ok(stats)
}

fn main() -> Result<(), AppError> {
    logging::init();

    println!("=== Sky Walk ===");
    println!("Scripted walk: fall, walk, strafe, jump, look around, walk off the edge");
    println!();

    let config = load_config()?;
    let stats = run(&config)?;

    println!();
    println!("Simulated {} frames ({:.1}s)", stats.frames, stats.frames as f32 * FRAME_TIME);
    println!("On the floor for {} frames", stats.frames_on_floor);
    println!("Wall contacts: {}", stats.wall_contacts);
    println!("Respawns: {}", stats.respawns);
    Ok(())
}
