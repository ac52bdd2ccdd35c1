//! # Collider Physics
//!
//! Core physics for a 2D gas of reactive circles: motion under gravity,
//! wall and pairwise collisions, elastic response, thermal relaxation and
//! the collision-triggered reaction that merges a partner pair into one
//! product particle.

pub mod collision;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod instance;
pub mod particle;
pub mod species;
pub mod wall;

pub use collision::*;
pub use constants::*;
pub use error::*;
pub use instance::*;
pub use particle::*;
pub use species::*;
pub use wall::*;
