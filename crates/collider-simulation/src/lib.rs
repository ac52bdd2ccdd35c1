//! # Collider Simulation
//!
//! Owns the particle gas inside a walled arena and advances it one tick at a
//! time: motion, wall bounces, pairwise collisions and reactions, thermal
//! relaxation, then removal of particles that left the arena.

pub mod arena;
pub mod error;
pub mod params;
pub mod simulation;
pub mod stats;

pub use arena::*;
pub use error::*;
pub use params::*;
pub use simulation::*;
pub use stats::*;
