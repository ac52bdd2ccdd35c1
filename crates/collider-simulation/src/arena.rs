//! Generational particle storage
//!
//! Slots are never shifted, so handles and slot indices stay stable for a
//! whole tick even while reacted-away partners wait for the cull. Freed slots
//! are reused with a bumped generation, which makes old handles go stale
//! instead of silently aliasing the new occupant.

use std::fmt;

use collider_physics::Particle;

/// Stable handle to a live particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleId {
    index: u32,
    generation: u32,
}

impl ParticleId {
    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    particle: Option<Particle>,
}

/// Particle storage with generation-tagged slots.
///
/// Iteration follows slot order, which is insertion order until a freed slot
/// is reused.
#[derive(Debug, Clone, Default)]
pub struct ParticleSet {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, particle: Particle) -> ParticleId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.particle = Some(particle);
            return ParticleId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            particle: Some(particle),
        });
        ParticleId {
            index,
            generation: 0,
        }
    }

    pub fn remove(&mut self, id: ParticleId) -> Option<Particle> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        let particle = slot.particle.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Some(particle)
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.particle.as_ref())
    }

    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.particle.as_mut())
    }

    /// Two distinct live particles, mutably
    pub fn pair_mut(&mut self, a: ParticleId, b: ParticleId) -> Option<(&mut Particle, &mut Particle)> {
        if a.index == b.index || self.get(a).is_none() || self.get(b).is_none() {
            return None;
        }
        let (first, second) = (a.index().min(b.index()), a.index().max(b.index()));
        let (head, tail) = self.slots.split_at_mut(second);
        let low = head[first].particle.as_mut()?;
        let high = tail[0].particle.as_mut()?;
        if a.index() < b.index() {
            Some((low, high))
        } else {
            Some((high, low))
        }
    }

    /// Handles of all live particles in slot order
    pub fn ids(&self) -> Vec<ParticleId> {
        self.iter().map(|(id, _)| id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticleId, &Particle)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.particle.as_ref().map(|particle| {
                (
                    ParticleId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    particle,
                )
            })
        })
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.slots.iter().filter_map(|slot| slot.particle.as_ref())
    }

    /// Remove every particle for which `keep` returns false; returns how many went
    pub fn retain(&mut self, mut keep: impl FnMut(&Particle) -> bool) -> usize {
        let doomed: Vec<ParticleId> = self
            .iter()
            .filter(|(_, particle)| !keep(*particle))
            .map(|(id, _)| id)
            .collect();
        for &id in &doomed {
            self.remove(id);
        }
        doomed.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        for id in self.ids() {
            self.remove(id);
        }
    }
}
