//! Render-facing particle snapshot
//!
//! Aligned for WGSL struct compatibility so a renderer can upload a slice of
//! instances directly.

use bytemuck::{Pod, Zeroable};
use serde::Serialize;

use crate::particle::Particle;

/// Outline and fill used for particles without a species
pub const MECHANICAL_FILL: [f32; 4] = [0.8, 0.8, 0.8, 1.0];
pub const MECHANICAL_OUTLINE: [f32; 4] = [0.3, 0.3, 0.3, 1.0];

/// GPU-compatible circle instance
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize)]
pub struct ParticleInstance {
    /// Center position
    pub position: [f32; 2],
    pub radius: f32,
    pub _padding: f32,
    /// Fill color (RGBA)
    pub fill: [f32; 4],
    /// Outline color (RGBA)
    pub outline: [f32; 4],
}

impl From<&Particle> for ParticleInstance {
    fn from(particle: &Particle) -> Self {
        let (fill, outline) = match particle.species {
            Some(species) => (species.palette.fill_rgba(), species.palette.outline_rgba()),
            None => (MECHANICAL_FILL, MECHANICAL_OUTLINE),
        };
        Self {
            position: particle.position.to_array(),
            radius: particle.radius,
            _padding: 0.0,
            fill,
            outline,
        }
    }
}
