//! Construction errors for physical bodies

use thiserror::Error;

/// Invariant violations rejected when building particles and walls.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Wall endpoints share neither an x nor a y coordinate
    #[error("wall ({x1}, {y1}) -> ({x2}, {y2}) is not axis-aligned")]
    DiagonalWall { x1: f32, y1: f32, x2: f32, y2: f32 },

    /// Wall endpoints coincide
    #[error("wall at ({x}, {y}) has zero length")]
    DegenerateWall { x: f32, y: f32 },

    #[error("particle radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("particle mass must be positive and finite, got {0}")]
    InvalidMass(f32),

    /// Position, velocity or gravity contains NaN or infinity
    #[error("non-finite {field}: {value}")]
    NonFinite { field: &'static str, value: f32 },

    /// Activation energy is negative or not finite
    #[error("species {species} has invalid activation energy {value}")]
    InvalidActivationEnergy { species: &'static str, value: f32 },

    /// The terminal product must not carry an activation energy
    #[error("terminal species {species} must have zero activation energy, got {value}")]
    TerminalActivationEnergy { species: &'static str, value: f32 },

    /// A species table needs exactly one species without a reaction partner
    #[error("species table must contain exactly one terminal species, found {0}")]
    TerminalSpecies(usize),
}
