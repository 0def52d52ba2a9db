//! Atmospheric sky parameters
//!
//! The renderer owns the actual sky shader; the scene only keeps the
//! parameters and derives the sun direction that also drives the
//! directional light.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::foundation::math::{constants::PI, Vec3};

/// Preetham-style sky model inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyParameters {
    /// Haze amount
    pub turbidity: f32,
    /// Rayleigh scattering coefficient
    pub rayleigh: f32,
    /// Mie scattering coefficient
    pub mie_coefficient: f32,
    /// Mie scattering directionality
    pub mie_directional_g: f32,
    /// Sun elevation in [0, 1]; 0.5 puts the sun on the horizon
    pub inclination: f32,
    /// Sun heading in [0, 1]
    pub azimuth: f32,
    /// Tone mapping exposure
    pub exposure: f32,
}

impl Default for SkyParameters {
    fn default() -> Self {
        Self {
            turbidity: 10.0,
            rayleigh: 3.0,
            mie_coefficient: 0.005,
            mie_directional_g: 0.7,
            inclination: 0.49,
            azimuth: 0.25,
            exposure: 0.5,
        }
    }
}

impl SkyParameters {
    /// Unit vector pointing from the scene toward the sun
    pub fn sun_direction(&self) -> Vec3 {
        let theta = PI * (self.inclination - 0.5);
        let phi = 2.0 * PI * (self.azimuth - 0.5);

        Vec3::new(phi.cos(), phi.sin() * theta.sin(), phi.sin() * theta.cos())
    }

    /// Check each parameter against its usable range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ranges = [
            ("turbidity", self.turbidity, 0.0, 20.0),
            ("rayleigh", self.rayleigh, 0.0, 4.0),
            ("mie_coefficient", self.mie_coefficient, 0.0, 0.1),
            ("mie_directional_g", self.mie_directional_g, 0.0, 1.0),
            ("inclination", self.inclination, 0.0, 1.0),
            ("azimuth", self.azimuth, 0.0, 1.0),
            ("exposure", self.exposure, 0.0, 1.0),
        ];

        for (name, value, min, max) in ranges {
            if !(min..=max).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "sky.{name} must be in [{min}, {max}], got {value}"
                )));
            }
        }
        Ok(())
    }
}
