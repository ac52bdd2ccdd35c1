//! Physical constants for the molecule gas
//!
//! Units are simulation units: positions in pixels, velocities in pixels per
//! tick, energies in mass * (pixels / tick)².

/// Default per-tick gravitational acceleration (added to `vy` each tick)
pub const DEFAULT_GRAVITY: f32 = 0.001;

/// Boltzmann constant used by the thermostat
pub const BOLTZMANN: f32 = 1.0;

/// Blend factor pulling a particle's speed toward the equilibrium speed
pub const RELAXATION_ALPHA: f32 = 0.01;

/// Extra distance added when pushing two overlapping particles apart
pub const SEPARATION_SLACK: f32 = 1.0;

/// Below this center distance two particles are treated as coincident
pub const COINCIDENT_EPSILON: f32 = 1.0e-6;

/// Particles beyond this multiple of the arena size are culled
pub const CULL_FACTOR: f32 = 2.0;

/// Distance past the cull threshold where reacted-away partners are parked
pub const BANISH_OFFSET: f32 = 1000.0;
