//! Per-tick counters and population census

use collider_physics::Particle;
use glam::Vec2;
use serde::Serialize;

/// What happened during one call to `step()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickStats {
    /// Index of the tick these counters describe (first tick is 1)
    pub tick: u64,
    pub wall_bounces: usize,
    pub elastic_collisions: usize,
    pub reactions: usize,
    /// Particles removed for leaving the arena
    pub culled: usize,
}

/// Snapshot of the live population.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Census {
    /// Live count per species name, in species table order
    pub species: Vec<(&'static str, usize)>,
    /// Particles without a species
    pub mechanical: usize,
    pub total_kinetic_energy: f32,
    pub total_momentum: [f32; 2],
}

impl Census {
    pub fn count(&self, name: &str) -> usize {
        self.species
            .iter()
            .find(|(species, _)| *species == name)
            .map_or(0, |&(_, count)| count)
    }

    pub fn total(&self) -> usize {
        self.mechanical + self.species.iter().map(|&(_, count)| count).sum::<usize>()
    }

    pub(crate) fn record(&mut self, particle: &Particle) {
        match particle.species {
            Some(species) => match self.species.iter_mut().find(|(name, _)| *name == species.name) {
                Some((_, count)) => *count += 1,
                None => self.species.push((species.name, 1)),
            },
            None => self.mechanical += 1,
        }
        self.total_kinetic_energy += particle.kinetic_energy();
        let momentum = Vec2::from_array(self.total_momentum) + particle.momentum();
        self.total_momentum = momentum.to_array();
    }
}
