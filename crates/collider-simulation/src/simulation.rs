//! CPU molecule gas simulation manager
//!
//! One tick visits particles in slot order. Each particle moves, bounces off
//! every wall, then resolves against every other live particle as the
//! initiator of the ordered pair, and finally relaxes toward the thermal
//! speed. Particles banished by a reaction keep their slot until the cull at
//! the end of the tick, so handles and iteration stay valid mid-tick.

use collider_physics::{
    resolve, Interaction, Particle, ParticleInstance, ReactionRules, SpeciesTable, Thermostat,
    Wall,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Census, ParticleId, ParticleSet, SimulationError, SimulationParams, TickStats};

/// Velocity scale of the initial population relative to `√T`
const SPAWN_SPEED_SCALE: f32 = 1.0 / 20.0;

/// Walled arena holding a reactive particle gas
pub struct Simulation {
    params: SimulationParams,
    species: SpeciesTable,
    particles: ParticleSet,
    walls: Vec<Wall>,
    thermostat: Thermostat,
    rules: ReactionRules,
    last_tick: TickStats,
    total_reactions: u64,
}

impl Simulation {
    /// Build an arena populated with randomly placed air molecules
    pub fn new(params: SimulationParams) -> Result<Self, SimulationError> {
        Self::with_species(params, SpeciesTable::air())
    }

    /// Build an arena populated with random reactive species from `species`
    pub fn with_species(
        params: SimulationParams,
        species: SpeciesTable,
    ) -> Result<Self, SimulationError> {
        let mut sim = Self::empty_with_species(params, species)?;
        sim.populate()?;
        log::info!(
            "Initialized {} particles in {}x{} arena at T={}",
            sim.particles.len(),
            sim.params.width,
            sim.params.height,
            sim.params.temperature
        );
        Ok(sim)
    }

    /// Build an arena with walls but no particles; `particle_count` is ignored
    pub fn empty(params: SimulationParams) -> Result<Self, SimulationError> {
        Self::empty_with_species(params, SpeciesTable::air())
    }

    fn empty_with_species(
        params: SimulationParams,
        species: SpeciesTable,
    ) -> Result<Self, SimulationError> {
        params.validate()?;
        let walls = Wall::side_walls(params.width, params.height)?.to_vec();
        Ok(Self {
            thermostat: params.thermostat(),
            rules: params.reaction_rules(species.terminal()),
            particles: ParticleSet::with_capacity(params.particle_count),
            walls,
            species,
            params,
            last_tick: TickStats::default(),
            total_reactions: 0,
        })
    }

    fn populate(&mut self) -> Result<(), SimulationError> {
        let count = self.params.particle_count;
        if count == 0 {
            return Ok(());
        }
        let reactive = self.species.reactive();
        if reactive.is_empty() {
            return Err(SimulationError::parameter(
                "species",
                "table has no reactive species to place",
            ));
        }

        let mut rng = match self.params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let (width, height) = (self.params.width, self.params.height);
        let margin_x = self.params.spawn_margin.min(width * 0.25);
        let margin_y = self.params.spawn_margin.min(height * 0.25);
        let speed = self.params.temperature.sqrt() * SPAWN_SPEED_SCALE;

        for _ in 0..count {
            let position = Vec2::new(
                rng.random_range(margin_x..width - margin_x),
                rng.random_range(margin_y..height - margin_y),
            );
            let velocity = Vec2::new(
                speed * rng.random_range(-0.5..0.5),
                speed * rng.random_range(-0.5..0.5),
            );
            let species = reactive[rng.random_range(0..reactive.len())];
            let particle =
                Particle::from_species(position, velocity, species)?.with_gravity(self.params.gravity)?;
            self.particles.insert(particle);
        }
        Ok(())
    }

    /// Add a particle; it joins the sweep from the next tick on
    pub fn spawn(&mut self, particle: Particle) -> ParticleId {
        self.particles.insert(particle)
    }

    /// Advance the simulation by one tick
    pub fn step(&mut self) {
        let mut stats = TickStats {
            tick: self.last_tick.tick + 1,
            ..Default::default()
        };

        let limit = self.params.cull_limit();
        let order = self.particles.ids();
        for &id in &order {
            let Some(particle) = self.particles.get_mut(id) else {
                continue;
            };
            particle.advance();
            for wall in &self.walls {
                if wall.check_collision(particle) {
                    stats.wall_bounces += 1;
                }
            }

            for &other in &order {
                let Some((initiator, target)) = self.particles.pair_mut(id, other) else {
                    continue;
                };
                // Particles past the cull limit are already gone from the chemistry
                if !initiator.is_within(limit) || !target.is_within(limit) {
                    continue;
                }
                match resolve(initiator, target, &self.rules) {
                    Interaction::Elastic => stats.elastic_collisions += 1,
                    Interaction::Reacted => stats.reactions += 1,
                    Interaction::NoContact => {}
                }
            }

            if let Some(particle) = self.particles.get_mut(id) {
                particle.equilibriate(&self.thermostat);
            }
        }

        stats.culled = self.cull();
        if stats.culled > 0 {
            log::debug!("tick {}: culled {} particles", stats.tick, stats.culled);
        }
        self.total_reactions += stats.reactions as u64;
        self.last_tick = stats;
    }

    /// Remove particles that drifted past the cull limit
    fn cull(&mut self) -> usize {
        let limit = self.params.cull_limit();
        self.particles.retain(|p| p.is_within(limit))
    }

    /// Change the thermostat target
    pub fn set_temperature(&mut self, temperature: f32) -> Result<(), SimulationError> {
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(SimulationError::InvalidTemperature(temperature));
        }
        self.params.temperature = temperature;
        self.thermostat.temperature = temperature;
        Ok(())
    }

    pub fn particle(&self, id: ParticleId) -> Result<&Particle, SimulationError> {
        self.particles.get(id).ok_or(SimulationError::StaleHandle(id))
    }

    /// Live particles in sweep order
    pub fn particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.particles.particles()
    }

    pub fn ids(&self) -> Vec<ParticleId> {
        self.particles.ids()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Render instances for every live particle
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.particles.particles().map(ParticleInstance::from).collect()
    }

    pub fn census(&self) -> Census {
        let mut census = Census {
            species: self.species.iter().map(|s| (s.name, 0)).collect(),
            ..Default::default()
        };
        for particle in self.particles.particles() {
            census.record(particle);
        }
        census
    }

    /// Counters from the most recent tick
    pub fn last_tick(&self) -> &TickStats {
        &self.last_tick
    }

    /// Number of completed ticks
    pub fn tick(&self) -> u64 {
        self.last_tick.tick
    }

    pub fn total_reactions(&self) -> u64 {
        self.total_reactions
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn species(&self) -> &SpeciesTable {
        &self.species
    }

    pub fn width(&self) -> f32 {
        self.params.width
    }

    pub fn height(&self) -> f32 {
        self.params.height
    }

    pub fn temperature(&self) -> f32 {
        self.params.temperature
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collider_physics::{Species, NITROGEN, OXYGEN};

    fn params() -> SimulationParams {
        SimulationParams {
            width: 600.0,
            height: 400.0,
            particle_count: 0,
            gravity: 0.0,
            seed: Some(42),
            ..Default::default()
        }
    }

    fn molecule(species: &'static Species, x: f32, y: f32, vx: f32, vy: f32) -> Particle {
        Particle::from_species(Vec2::new(x, y), Vec2::new(vx, vy), species)
            .unwrap()
            .with_gravity(0.0)
            .unwrap()
    }

    #[test]
    fn rejects_invalid_construction() {
        let bad = SimulationParams {
            height: f32::NAN,
            ..params()
        };
        assert!(matches!(
            Simulation::new(bad),
            Err(SimulationError::InvalidDimension { name: "height", .. })
        ));
        let bad = SimulationParams {
            temperature: 0.0,
            ..params()
        };
        assert!(Simulation::new(bad).is_err());
    }

    #[test]
    fn empty_simulation_steps_without_change() {
        let mut sim = Simulation::new(params()).unwrap();
        assert_eq!(sim.particle_count(), 0);
        sim.step();
        sim.step();
        assert_eq!(sim.particle_count(), 0);
        assert_eq!(sim.tick(), 2);
        assert_eq!(*sim.last_tick(), TickStats { tick: 2, ..Default::default() });
        assert_eq!(sim.walls().len(), 4);
    }

    #[test]
    fn random_population_stays_inside_margins() {
        let sim = Simulation::new(SimulationParams {
            particle_count: 50,
            ..params()
        })
        .unwrap();
        assert_eq!(sim.particle_count(), 50);
        let speed_bound = 0.5 * 100.0f32.sqrt() / 20.0;
        for p in sim.particles() {
            assert!((20.0..580.0).contains(&p.position.x));
            assert!((20.0..380.0).contains(&p.position.y));
            assert!(p.velocity.x.abs() <= speed_bound);
            assert!(p.velocity.y.abs() <= speed_bound);
            assert!(matches!(p.species_name(), Some("oxygen") | Some("nitrogen")));
        }
        let census = sim.census();
        assert_eq!(census.count("oxygen") + census.count("nitrogen"), 50);
        assert_eq!(census.count("NO"), 0);
    }

    #[test]
    fn seeded_population_is_reproducible() {
        let p = SimulationParams {
            particle_count: 10,
            ..params()
        };
        let a = Simulation::new(p.clone()).unwrap();
        let b = Simulation::new(p).unwrap();
        let xs = |s: &Simulation| s.particles().map(|p| p.position).collect::<Vec<_>>();
        assert_eq!(xs(&a), xs(&b));
    }

    #[test]
    fn tiny_arena_still_places_particles() {
        let sim = Simulation::new(SimulationParams {
            width: 10.0,
            height: 10.0,
            particle_count: 3,
            ..params()
        })
        .unwrap();
        for p in sim.particles() {
            assert!(p.position.x > 0.0 && p.position.x < 10.0);
        }
    }

    #[test]
    fn reaction_banishes_partner_and_cull_removes_it() {
        let mut sim = Simulation::empty(params()).unwrap();
        let o = sim.spawn(molecule(&OXYGEN, 300.0, 200.0, 1.0, 0.0));
        let n = sim.spawn(molecule(&NITROGEN, 320.0, 200.0, -1.0, 0.0));

        sim.step();

        assert_eq!(sim.last_tick().reactions, 1);
        assert_eq!(sim.last_tick().culled, 1);
        assert_eq!(sim.particle_count(), 1);
        assert_eq!(sim.particle(o).unwrap().species_name(), Some("NO"));
        assert!(matches!(sim.particle(n), Err(SimulationError::StaleHandle(_))));
        assert_eq!(sim.census().count("NO"), 1);
        assert_eq!(sim.total_reactions(), 1);
    }

    #[test]
    fn cold_partners_bounce_apart() {
        let mut sim = Simulation::empty(params()).unwrap();
        let o = sim.spawn(molecule(&OXYGEN, 300.0, 200.0, 0.5, 0.0));
        let n = sim.spawn(molecule(&NITROGEN, 320.0, 200.0, -0.5, 0.0));

        sim.step();

        assert_eq!(sim.last_tick().reactions, 0);
        assert!(sim.last_tick().elastic_collisions >= 1);
        assert_eq!(sim.particle_count(), 2);
        let (po, pn) = (sim.particle(o).unwrap(), sim.particle(n).unwrap());
        assert_eq!(po.species_name(), Some("oxygen"));
        assert_eq!(pn.species_name(), Some("nitrogen"));
        assert!(po.position.distance(pn.position) >= po.radius + pn.radius - 1e-3);
    }

    #[test]
    fn particle_flies_back_off_the_wall() {
        let mut sim = Simulation::empty(params()).unwrap();
        let id = sim.spawn(molecule(&OXYGEN, 590.0, 200.0, 2.0, 0.0));

        sim.step();

        assert_eq!(sim.last_tick().wall_bounces, 1);
        assert!(sim.particle(id).unwrap().velocity.x < 0.0);
    }

    #[test]
    fn escaped_particles_are_culled() {
        let mut sim = Simulation::empty(params()).unwrap();
        sim.spawn(molecule(&OXYGEN, 1500.0, 200.0, 0.0, 0.0));
        sim.spawn(molecule(&NITROGEN, 300.0, -900.0, 0.0, 0.0));
        let keep = sim.spawn(molecule(&NITROGEN, 300.0, 200.0, 0.0, 0.0));

        sim.step();

        assert_eq!(sim.last_tick().culled, 2);
        assert_eq!(sim.ids(), vec![keep]);
    }

    #[test]
    fn banished_particles_do_not_corrupt_later_pairs() {
        // Two reacting pairs end with both consumed partners parked on the
        // same banish point in the same tick
        let mut sim = Simulation::empty(params()).unwrap();
        sim.spawn(molecule(&OXYGEN, 100.0, 100.0, 1.0, 0.0));
        sim.spawn(molecule(&NITROGEN, 120.0, 100.0, -1.0, 0.0));
        sim.spawn(molecule(&OXYGEN, 400.0, 300.0, 1.0, 0.0));
        sim.spawn(molecule(&NITROGEN, 420.0, 300.0, -1.0, 0.0));

        sim.step();

        for p in sim.particles() {
            assert!(p.position.is_finite());
            assert!(p.velocity.is_finite());
            assert_eq!(p.species_name(), Some("NO"));
        }
        assert_eq!(sim.particle_count(), 2);
    }

    #[test]
    fn banished_partners_do_not_react_with_each_other() {
        // The second pair's initiator is nitrogen, so both consumed partners
        // (one nitrogen, one oxygen) end up parked on the same point
        let mut sim = Simulation::empty(params()).unwrap();
        sim.spawn(molecule(&OXYGEN, 100.0, 100.0, 1.0, 0.0));
        sim.spawn(molecule(&NITROGEN, 120.0, 100.0, -1.0, 0.0));
        sim.spawn(molecule(&NITROGEN, 400.0, 300.0, 1.0, 0.0));
        sim.spawn(molecule(&OXYGEN, 420.0, 300.0, -1.0, 0.0));

        sim.step();

        assert_eq!(sim.last_tick().reactions, 2);
        assert_eq!(sim.last_tick().culled, 2);
        assert_eq!(sim.particle_count(), 2);
        assert_eq!(sim.total_reactions(), 2);
        assert_eq!(sim.census().count("NO"), 2);
    }

    #[test]
    fn thermostat_follows_temperature_changes() {
        let mut sim = Simulation::empty(params()).unwrap();
        assert!(sim.set_temperature(-5.0).is_err());
        sim.set_temperature(400.0).unwrap();
        assert_eq!(sim.temperature(), 400.0);

        let id = sim.spawn(
            Particle::new(Vec2::new(300.0, 200.0), Vec2::new(0.1, 0.0), 10.0)
                .unwrap()
                .with_gravity(0.0)
                .unwrap(),
        );
        sim.step();
        let v_eq = (2.0f32 * 400.0 / 100.0).sqrt();
        let expected = 0.01 * v_eq + 0.99 * 0.1;
        assert!((sim.particle(id).unwrap().velocity.x - expected).abs() < 1e-5);
    }

    #[test]
    fn instances_mirror_live_particles() {
        let mut sim = Simulation::empty(params()).unwrap();
        sim.spawn(molecule(&OXYGEN, 100.0, 100.0, 0.0, 0.0));
        sim.spawn(molecule(&NITROGEN, 300.0, 100.0, 0.0, 0.0));
        let instances = sim.instances();
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].position, [100.0, 100.0]);
        assert_eq!(instances[1].radius, 14.0);
    }
}
