//! Player movement tuning

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::physics::Capsule;

/// Key codes driving locomotion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Move along the look heading
    pub forward: String,
    /// Move against the look heading
    pub backward: String,
    /// Strafe left
    pub left: String,
    /// Strafe right
    pub right: String,
    /// Jump (grounded only)
    pub jump: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: "KeyW".into(),
            backward: "KeyS".into(),
            left: "KeyA".into(),
            right: "KeyD".into(),
            jump: "Space".into(),
        }
    }
}

/// Locomotion and collision-response parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Downward acceleration while airborne (units/s²)
    pub gravity: f32,

    /// Exponential ground drag rate `k` in `e^(-k·dt)`
    pub ground_damping: f32,

    /// Velocity gained per second of held movement key
    pub move_speed: f32,

    /// Vertical velocity set by a jump
    pub jump_speed: f32,

    /// Upper bound on the simulated step, limits tunneling on frame hitches
    pub max_delta_time: f32,

    /// Radians of look rotation per pixel of pointer motion
    pub look_sensitivity: f32,

    /// Contacts whose normal `y` exceeds this count as floor
    pub floor_normal_threshold: f32,

    /// Fraction of `move_speed` applied while airborne (0 disables air control)
    pub air_control: f32,

    /// Respawn height before world scaling
    pub fall_threshold: f32,

    /// Pose the player starts in and returns to after falling out of the world
    pub spawn: Capsule,

    /// Movement keys
    pub bindings: KeyBindings,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            gravity: 20.0,
            ground_damping: 3.0,
            move_speed: 25.0,
            jump_speed: 15.0,
            max_delta_time: 0.1,
            look_sensitivity: 1.0 / 500.0,
            floor_normal_threshold: 0.0,
            air_control: 0.0,
            fall_threshold: -50.0,
            spawn: Capsule::default(),
            bindings: KeyBindings::default(),
        }
    }
}

impl PlayerConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("gravity", self.gravity),
            ("ground_damping", self.ground_damping),
            ("move_speed", self.move_speed),
            ("jump_speed", self.jump_speed),
            ("air_control", self.air_control),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!("player.{name} must be >= 0, got {value}")));
            }
        }

        if !(self.max_delta_time.is_finite() && self.max_delta_time > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "player.max_delta_time must be > 0, got {}",
                self.max_delta_time
            )));
        }

        if !(-1.0..1.0).contains(&self.floor_normal_threshold) {
            return Err(ConfigError::Invalid(format!(
                "player.floor_normal_threshold must be in [-1, 1), got {}",
                self.floor_normal_threshold
            )));
        }

        if !self.fall_threshold.is_finite() || !self.look_sensitivity.is_finite() {
            return Err(ConfigError::Invalid("player thresholds must be finite".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PlayerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = PlayerConfig { max_delta_time: 0.0, ..PlayerConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = PlayerConfig { gravity: f32::NAN, ..PlayerConfig::default() };
        assert!(config.validate().is_err());

        let config = PlayerConfig { floor_normal_threshold: 1.0, ..PlayerConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: PlayerConfig = toml::from_str("gravity = 9.81\n[bindings]\njump = \"KeyJ\"\n").unwrap();

        assert_eq!(config.gravity, 9.81);
        assert_eq!(config.move_speed, 25.0);
        assert_eq!(config.bindings.jump, "KeyJ");
        assert_eq!(config.bindings.forward, "KeyW");
    }

    #[test]
    fn test_spawn_radius_validated_on_load() {
        let source = "[spawn]\nstart = [0.0, 1.0, 0.0]\nend = [0.0, 2.0, 0.0]\nradius = -1.0\n";
        assert!(toml::from_str::<PlayerConfig>(source).is_err());
    }
}
