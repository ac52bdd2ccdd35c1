//! Simulation errors

use collider_physics::PhysicsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    /// Arena width or height is not a positive finite number
    #[error("arena {name} must be positive and finite, got {value}")]
    InvalidDimension { name: &'static str, value: f32 },

    #[error("temperature must be positive and finite, got {0}")]
    InvalidTemperature(f32),

    /// A tuning parameter is outside its valid range
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },

    #[error("physics error: {0}")]
    Physics(#[from] PhysicsError),

    /// The handle refers to a particle that has been removed
    #[error("stale particle handle {0}")]
    StaleHandle(crate::ParticleId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parameter file error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SimulationError {
    pub fn parameter(name: &'static str, message: impl Into<String>) -> Self {
        SimulationError::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}
