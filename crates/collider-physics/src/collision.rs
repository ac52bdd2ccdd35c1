//! Pairwise collision and reaction resolution

use glam::Vec2;

use crate::constants::SEPARATION_SLACK;
use crate::geometry::{midpoint, normal_component, Contact};
use crate::particle::Particle;
use crate::species::Species;

/// Outcome of resolving one ordered pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Circles do not touch, or a reactive pair missed each other
    NoContact,
    /// Momentum exchange and separation
    Elastic,
    /// The initiator became the product and the partner was banished
    Reacted,
}

/// What a successful reaction produces and where the consumed partner goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactionRules {
    /// Species the initiator turns into
    pub product: &'static Species,
    /// Off-arena parking spot for the consumed partner, beyond the cull limit
    pub banish_point: Vec2,
    pub separation_slack: f32,
}

impl ReactionRules {
    pub fn new(product: &'static Species, banish_point: Vec2) -> Self {
        Self {
            product,
            banish_point,
            separation_slack: SEPARATION_SLACK,
        }
    }
}

/// Elastic collision along the line of centers.
///
/// Exchanges the normal component of velocity for unequal masses, then pushes
/// both centers apart by half the overlap (plus slack) each. Returns `false`
/// without touching either particle when they do not overlap.
pub fn elastic_collision(a: &mut Particle, b: &mut Particle, separation_slack: f32) -> bool {
    let contact = Contact::between(a.position, b.position);
    if !contact.overlaps(a.radius, b.radius) {
        return false;
    }
    let n = contact.normal;

    let relative = normal_component(a.velocity - b.velocity, n);
    let p = 2.0 * relative / (a.mass + b.mass);
    a.velocity -= p * b.mass * n;
    b.velocity += p * a.mass * n;

    let overlap = 0.5 * (a.radius + b.radius - contact.distance + separation_slack);
    a.position += overlap * n;
    b.position -= overlap * n;
    true
}

/// Resolve the ordered pair `(initiator, other)`.
///
/// A reaction needs both particles to carry distinct species, the
/// initiator's partner to be `other`'s species, and the pair's kinetic
/// energy to reach the *initiator's* activation energy. Every other pair,
/// including an under-energized partner pair, collides elastically. An
/// energized partner pair that is not touching does nothing at all.
pub fn resolve(initiator: &mut Particle, other: &mut Particle, rules: &ReactionRules) -> Interaction {
    let (species, other_species) = match (initiator.species, other.species) {
        (Some(a), Some(b)) if a.reacts_with(b) => (a, b),
        _ => return bounce(initiator, other, rules),
    };

    let energy = initiator.kinetic_energy() + other.kinetic_energy();
    if energy < species.activation_energy {
        return bounce(initiator, other, rules);
    }

    let contact = Contact::between(initiator.position, other.position);
    if !contact.overlaps(initiator.radius, other.radius) {
        return Interaction::NoContact;
    }

    initiator.transmute(rules.product);
    initiator.position = midpoint(initiator.position, other.position);
    initiator.velocity *= 0.5;
    other.banish(rules.banish_point);

    log::debug!(
        "{} + {} -> {} at ({:.1}, {:.1}), energy {:.1}",
        species.name,
        other_species.name,
        rules.product.name,
        initiator.position.x,
        initiator.position.y,
        energy
    );
    Interaction::Reacted
}

fn bounce(a: &mut Particle, b: &mut Particle, rules: &ReactionRules) -> Interaction {
    if elastic_collision(a, b, rules.separation_slack) {
        Interaction::Elastic
    } else {
        Interaction::NoContact
    }
}
