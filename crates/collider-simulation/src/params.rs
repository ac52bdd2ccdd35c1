//! Simulation parameters for runtime tuning

use std::path::Path;

use collider_physics::{
    ReactionRules, Species, Thermostat, BANISH_OFFSET, BOLTZMANN, CULL_FACTOR, DEFAULT_GRAVITY,
    RELAXATION_ALPHA, SEPARATION_SLACK,
};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::SimulationError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationParams {
    // Arena
    pub width: f32,
    pub height: f32,

    // Initial population
    pub particle_count: usize,
    /// Keep spawned centers this far from the walls
    pub spawn_margin: f32,
    /// Seed for reproducible placement; entropy when absent
    pub seed: Option<u64>,

    // Thermostat
    pub temperature: f32,
    pub boltzmann: f32,
    pub relaxation_alpha: f32,

    // Mechanics
    pub gravity: f32,
    pub separation_slack: f32,
    /// Particles beyond this multiple of the arena size are removed
    pub cull_factor: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            particle_count: 30,
            spawn_margin: 20.0,
            seed: None,
            temperature: 100.0,
            boltzmann: BOLTZMANN,
            relaxation_alpha: RELAXATION_ALPHA,
            gravity: DEFAULT_GRAVITY,
            separation_slack: SEPARATION_SLACK,
            cull_factor: CULL_FACTOR,
        }
    }
}

impl SimulationParams {
    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimulationError::InvalidDimension { name, value });
            }
        }
        if !(self.temperature.is_finite() && self.temperature > 0.0) {
            return Err(SimulationError::InvalidTemperature(self.temperature));
        }
        if !(self.boltzmann.is_finite() && self.boltzmann > 0.0) {
            return Err(SimulationError::parameter(
                "boltzmann",
                format!("must be positive, got {}", self.boltzmann),
            ));
        }
        if !(0.0..=1.0).contains(&self.relaxation_alpha) {
            return Err(SimulationError::parameter(
                "relaxation_alpha",
                format!("must lie in [0, 1], got {}", self.relaxation_alpha),
            ));
        }
        if !self.gravity.is_finite() {
            return Err(SimulationError::parameter("gravity", "must be finite"));
        }
        if !(self.separation_slack.is_finite() && self.separation_slack >= 0.0) {
            return Err(SimulationError::parameter(
                "separation_slack",
                format!("must be non-negative, got {}", self.separation_slack),
            ));
        }
        if !(self.cull_factor.is_finite() && self.cull_factor > 1.0) {
            return Err(SimulationError::parameter(
                "cull_factor",
                format!("must exceed 1, got {}", self.cull_factor),
            ));
        }
        if !(self.spawn_margin.is_finite() && self.spawn_margin >= 0.0) {
            return Err(SimulationError::parameter(
                "spawn_margin",
                format!("must be non-negative, got {}", self.spawn_margin),
            ));
        }
        Ok(())
    }

    pub fn thermostat(&self) -> Thermostat {
        Thermostat {
            temperature: self.temperature,
            boltzmann: self.boltzmann,
            alpha: self.relaxation_alpha,
        }
    }

    /// Half-extent of the region a particle must stay inside to survive a tick
    pub fn cull_limit(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * self.cull_factor
    }

    /// Parking spot for consumed reaction partners, past the cull limit on both axes
    pub fn banish_point(&self) -> Vec2 {
        Vec2::splat(-(self.cull_factor * self.width.max(self.height) + BANISH_OFFSET))
    }

    pub fn reaction_rules(&self, product: &'static Species) -> ReactionRules {
        ReactionRules {
            product,
            banish_point: self.banish_point(),
            separation_slack: self.separation_slack,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = SimulationParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.temperature, 100.0);
        assert_eq!(params.gravity, 0.001);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let params =
            SimulationParams::from_json_str(r#"{ "width": 800, "particle_count": 5, "seed": 7 }"#)
                .unwrap();
        assert_eq!(params.width, 800.0);
        assert_eq!(params.height, 400.0);
        assert_eq!(params.particle_count, 5);
        assert_eq!(params.seed, Some(7));
    }

    #[test]
    fn rejects_bad_dimensions_and_temperature() {
        let params = SimulationParams {
            width: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(SimulationError::InvalidDimension { name: "width", .. })
        ));

        let params = SimulationParams {
            temperature: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(SimulationError::InvalidTemperature(_))
        ));

        assert!(matches!(
            SimulationParams::from_json_str(r#"{ "height": -3 }"#),
            Err(SimulationError::InvalidDimension { name: "height", .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_tuning() {
        let params = SimulationParams {
            relaxation_alpha: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(SimulationError::InvalidParameter {
                name: "relaxation_alpha",
                ..
            })
        ));

        let params = SimulationParams {
            cull_factor: 1.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn misspelled_key_is_a_parse_error() {
        assert!(matches!(
            SimulationParams::from_json_str(r#"{ "temprature": 50 }"#),
            Err(SimulationError::Parse(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            SimulationParams::from_json_str("{ width: }"),
            Err(SimulationError::Parse(_))
        ));
    }

    #[test]
    fn banish_point_lies_beyond_cull_limit() {
        for (width, height) in [(600.0, 400.0), (100.0, 3000.0), (5000.0, 10.0)] {
            let params = SimulationParams {
                width,
                height,
                ..Default::default()
            };
            let limit = params.cull_limit();
            let point = params.banish_point();
            assert!(point.x.abs() > limit.x);
            assert!(point.y.abs() > limit.y);
        }
    }
}
