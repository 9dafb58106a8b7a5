#![warn(missing_docs)]
//! Initial configuration of an [`OpticalSystem`](crate::optical_system::OpticalSystem).
//!
//! The defaults describe the classic archer fish setup: water with `n = 1.33`, two refraction points 300 px apart
//! and symmetric viewing angles of 30°. A configuration can also be read from a (partial) YAML document.
use serde::{Deserialize, Serialize};
use uom::si::f64::Angle;

use crate::{
    degree,
    error::{ArcherError, ArcherResult},
    refraction::N_AIR,
};

/// Upper limit of the refractive index of the denser medium.
pub const MAX_REFRACTIVE_INDEX: f64 = 2.0;

/// Initial values of a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// y coordinate of the interface
    pub water_level: f64,
    /// refractive index of the water
    pub refractive_index: f64,
    /// x coordinate of the left refraction point
    pub left_x: f64,
    /// x coordinate of the right refraction point
    pub right_x: f64,
    /// water-side angle at the left refraction point
    pub left_angle: Angle,
    /// water-side angle at the right refraction point
    pub right_angle: Angle,
    /// start with the real position locked
    pub lock_real_position: bool,
    /// length of the ray segments handed to the renderer
    pub ray_length: f64,
}
impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            water_level: 450.0,
            refractive_index: 1.33,
            left_x: 250.0,
            right_x: 550.0,
            left_angle: degree!(30.0),
            right_angle: degree!(30.0),
            lock_real_position: false,
            ray_length: 1000.0,
        }
    }
}
impl SimulationConfig {
    /// Read a [`SimulationConfig`] from a YAML string. Missing fields are taken from the defaults.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the string cannot be parsed.
    ///   - the resulting configuration is invalid (see [`SimulationConfig::validate`]).
    pub fn from_yaml(yaml: &str) -> ArcherResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| ArcherError::Other(format!("parsing of configuration failed: {e}")))?;
        config.validate()?;
        Ok(config)
    }
    /// Check this configuration.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the refractive index is not finite or outside `[1.0, 2.0]`.
    ///   - one of the angles is not finite.
    ///   - one of the coordinates or the ray length is not finite or the ray length is not positive.
    pub fn validate(&self) -> ArcherResult<()> {
        validate_refractive_index(self.refractive_index)?;
        if !self.left_angle.is_finite() || !self.right_angle.is_finite() {
            return Err(ArcherError::Angle("initial angles must be finite".into()));
        }
        if !self.water_level.is_finite() || !self.left_x.is_finite() || !self.right_x.is_finite() {
            return Err(ArcherError::Position(
                "water level and refraction points must be finite".into(),
            ));
        }
        if !self.ray_length.is_finite() || self.ray_length <= 0.0 {
            return Err(ArcherError::Other("ray length must be > 0 and finite".into()));
        }
        Ok(())
    }
}
/// Check that a refractive index lies within `[1.0, 2.0]`.
///
/// # Errors
///
/// This function will return an error if the index is not finite or out of range.
pub fn validate_refractive_index(n: f64) -> ArcherResult<()> {
    if !n.is_finite() || !(N_AIR..=MAX_REFRACTIVE_INDEX).contains(&n) {
        return Err(ArcherError::RefractiveIndex(format!(
            "refractive index must be within [{N_AIR}, {MAX_REFRACTIVE_INDEX}] and finite, got {n}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    use uom::si::angle::degree;
    #[test]
    fn default() {
        let config = SimulationConfig::default();
        assert_eq!(config.water_level, 450.0);
        assert_eq!(config.refractive_index, 1.33);
        assert_eq!(config.right_x - config.left_x, 300.0);
        assert_relative_eq!(config.left_angle.get::<degree>(), 30.0);
        assert_relative_eq!(config.right_angle.get::<degree>(), 30.0);
        assert!(!config.lock_real_position);
        assert!(config.validate().is_ok());
    }
    #[test]
    fn from_yaml_partial() {
        let config = SimulationConfig::from_yaml("refractive_index: 1.5\nlock_real_position: true\n").unwrap();
        assert_eq!(config.refractive_index, 1.5);
        assert!(config.lock_real_position);
        assert_eq!(config.left_x, 250.0);
        assert_eq!(config.water_level, 450.0);
    }
    #[test]
    fn from_yaml_invalid() {
        assert_matches!(
            SimulationConfig::from_yaml("refractive_index: 2.5"),
            Err(ArcherError::RefractiveIndex(_))
        );
        assert_matches!(
            SimulationConfig::from_yaml("ray_length: -1.0"),
            Err(ArcherError::Other(_))
        );
        assert_matches!(
            SimulationConfig::from_yaml("water_level: [1, 2]"),
            Err(ArcherError::Other(_))
        );
    }
    #[test]
    fn refractive_index_range() {
        assert!(validate_refractive_index(1.0).is_ok());
        assert!(validate_refractive_index(1.33).is_ok());
        assert!(validate_refractive_index(2.0).is_ok());
        assert!(validate_refractive_index(0.99).is_err());
        assert!(validate_refractive_index(2.01).is_err());
        assert!(validate_refractive_index(f64::NAN).is_err());
        assert!(validate_refractive_index(f64::INFINITY).is_err());
    }
}
