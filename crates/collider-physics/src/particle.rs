//! Particle state and per-particle integration

use glam::Vec2;

use crate::constants::{BOLTZMANN, DEFAULT_GRAVITY, RELAXATION_ALPHA};
use crate::error::PhysicsError;
use crate::species::Species;

/// A translating circle.
///
/// Particles without a species are purely mechanical and only ever bounce.
/// Particles with a species may react with a partner species on contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Center position
    pub position: Vec2,
    /// Displacement per tick
    pub velocity: Vec2,
    pub radius: f32,
    pub mass: f32,
    /// Downward acceleration added to `velocity.y` each tick
    pub gravity: f32,
    /// Chemical identity, reassigned when this particle becomes a product
    pub species: Option<&'static Species>,
}

impl Particle {
    /// Create a mechanical particle with mass `radius²`
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Result<Self, PhysicsError> {
        check_finite("position", position)?;
        check_finite("velocity", velocity)?;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(PhysicsError::InvalidRadius(radius));
        }
        Ok(Self {
            position,
            velocity,
            radius,
            mass: radius * radius,
            gravity: DEFAULT_GRAVITY,
            species: None,
        })
    }

    /// Create a reactive particle sized and weighted by its species
    pub fn from_species(
        position: Vec2,
        velocity: Vec2,
        species: &'static Species,
    ) -> Result<Self, PhysicsError> {
        let particle = Self::new(position, velocity, species.radius)?.with_mass(species.mass())?;
        Ok(Self {
            species: Some(species),
            ..particle
        })
    }

    pub fn with_mass(mut self, mass: f32) -> Result<Self, PhysicsError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(PhysicsError::InvalidMass(mass));
        }
        self.mass = mass;
        Ok(self)
    }

    pub fn with_gravity(mut self, gravity: f32) -> Result<Self, PhysicsError> {
        if !gravity.is_finite() {
            return Err(PhysicsError::NonFinite {
                field: "gravity",
                value: gravity,
            });
        }
        self.gravity = gravity;
        Ok(self)
    }

    /// Apply gravity, then translate by the velocity
    pub fn advance(&mut self) {
        self.velocity.y += self.gravity;
        self.position += self.velocity;
    }

    /// ½·m·v²
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    pub fn momentum(&self) -> Vec2 {
        self.mass * self.velocity
    }

    /// Nudge the speed toward the thermal equilibrium speed, keeping direction.
    ///
    /// A resting particle has polar angle 0 and is pushed along `+x`.
    pub fn equilibriate(&mut self, thermostat: &Thermostat) {
        let v_eq = thermostat.equilibrium_speed(self.mass);
        let direction = self.velocity.y.atan2(self.velocity.x);
        let (sin, cos) = direction.sin_cos();
        let alpha = thermostat.alpha;
        self.velocity = alpha * v_eq * Vec2::new(cos, sin) + (1.0 - alpha) * self.velocity;
    }

    /// Turn this particle into `species`, taking its radius and mass
    pub fn transmute(&mut self, species: &'static Species) {
        self.species = Some(species);
        self.radius = species.radius;
        self.mass = species.mass();
    }

    /// Park the particle at an off-arena point until the end-of-tick cull
    pub fn banish(&mut self, point: Vec2) {
        self.position = point;
    }

    /// Whether the center lies within `±limit` on both axes
    pub fn is_within(&self, limit: Vec2) -> bool {
        self.position.x.abs() <= limit.x && self.position.y.abs() <= limit.y
    }

    pub fn species_name(&self) -> Option<&'static str> {
        self.species.map(|s| s.name)
    }
}

/// Velocity relaxation toward a temperature-derived speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thermostat {
    pub temperature: f32,
    pub boltzmann: f32,
    /// Weight of the equilibrium velocity in the blend
    pub alpha: f32,
}

impl Thermostat {
    pub fn new(temperature: f32) -> Self {
        Self {
            temperature,
            boltzmann: BOLTZMANN,
            alpha: RELAXATION_ALPHA,
        }
    }

    /// √(2·k·T / m)
    pub fn equilibrium_speed(&self, mass: f32) -> f32 {
        (2.0 * self.boltzmann * self.temperature / mass).sqrt()
    }
}

fn check_finite(field: &'static str, v: Vec2) -> Result<(), PhysicsError> {
    for value in [v.x, v.y] {
        if !value.is_finite() {
            return Err(PhysicsError::NonFinite { field, value });
        }
    }
    Ok(())
}
