//! Molecule kinds and their reaction rules

use serde::Serialize;

/// Fill and outline colors as `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub fill: u32,
    pub outline: u32,
}

impl Palette {
    pub const fn new(fill: u32, outline: u32) -> Self {
        Self { fill, outline }
    }

    /// Fill color as normalized sRGB(A) floats for GPU upload
    pub fn fill_rgba(&self) -> [f32; 4] {
        hex_to_rgba(self.fill)
    }

    /// Outline color as normalized sRGB(A) floats for GPU upload
    pub fn outline_rgba(&self) -> [f32; 4] {
        hex_to_rgba(self.outline)
    }
}

fn hex_to_rgba(hex: u32) -> [f32; 4] {
    let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0), 1.0]
}

/// Immutable chemical identity of a particle.
///
/// Two species react when the initiating particle's `reaction_partner`
/// names the other particle's species. The relation is read from whichever
/// side starts the pairwise check, so an asymmetric table reacts in one
/// direction only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Species {
    pub name: &'static str,
    /// Species this one reacts with (`None` for the terminal product)
    pub reaction_partner: Option<&'static str>,
    /// Minimum combined kinetic energy of the pair for a reaction
    pub activation_energy: f32,
    pub radius: f32,
    /// Explicit mass; derived from the radius when absent
    pub mass: Option<f32>,
    pub palette: Palette,
}

impl Species {
    /// Mass of a particle of this species (`radius²` unless overridden)
    pub fn mass(&self) -> f32 {
        self.mass.unwrap_or(self.radius * self.radius)
    }

    /// Terminal species never react further
    pub fn is_terminal(&self) -> bool {
        self.reaction_partner.is_none()
    }

    /// Check that particles of this species satisfy the particle invariants
    pub fn validate(&self) -> Result<(), crate::PhysicsError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(crate::PhysicsError::InvalidRadius(self.radius));
        }
        let mass = self.mass();
        if !(mass.is_finite() && mass > 0.0) {
            return Err(crate::PhysicsError::InvalidMass(mass));
        }
        if !(self.activation_energy.is_finite() && self.activation_energy >= 0.0) {
            return Err(crate::PhysicsError::InvalidActivationEnergy {
                species: self.name,
                value: self.activation_energy,
            });
        }
        if self.is_terminal() && self.activation_energy != 0.0 {
            return Err(crate::PhysicsError::TerminalActivationEnergy {
                species: self.name,
                value: self.activation_energy,
            });
        }
        Ok(())
    }

    /// Whether this species, as initiator, reacts with `other`
    pub fn reacts_with(&self, other: &Species) -> bool {
        self != other && self.reaction_partner == Some(other.name)
    }
}

pub static OXYGEN: Species = Species {
    name: "oxygen",
    reaction_partner: Some("nitrogen"),
    activation_energy: 200.0,
    radius: 16.0,
    mass: None,
    palette: Palette::new(0xFDD835, 0xFF8F00),
};

pub static NITROGEN: Species = Species {
    name: "nitrogen",
    reaction_partner: Some("oxygen"),
    activation_energy: 200.0,
    radius: 14.0,
    mass: None,
    palette: Palette::new(0x1E88E5, 0x0D47A1),
};

/// Product of the oxygen + nitrogen reaction
pub static NITRIC_OXIDE: Species = Species {
    name: "NO",
    reaction_partner: None,
    activation_energy: 0.0,
    radius: 22.0,
    mass: None,
    palette: Palette::new(0x1ABC9C, 0x148F77),
};

/// Registry of the species present in a simulation.
#[derive(Debug, Clone)]
pub struct SpeciesTable {
    entries: Vec<&'static Species>,
    terminal: &'static Species,
}

impl SpeciesTable {
    /// Build a table; every entry must be valid and exactly one terminal.
    pub fn new(entries: Vec<&'static Species>) -> Result<Self, crate::PhysicsError> {
        for species in &entries {
            species.validate()?;
        }
        let terminals: Vec<&'static Species> = entries
            .iter()
            .copied()
            .filter(|s| s.is_terminal())
            .collect();
        match terminals.as_slice() {
            &[terminal] => Ok(Self { entries, terminal }),
            other => Err(crate::PhysicsError::TerminalSpecies(other.len())),
        }
    }

    /// Oxygen, nitrogen and their nitric oxide product
    pub fn air() -> Self {
        Self {
            entries: vec![&OXYGEN, &NITROGEN, &NITRIC_OXIDE],
            terminal: &NITRIC_OXIDE,
        }
    }

    pub fn get(&self, name: &str) -> Option<&'static Species> {
        self.entries.iter().copied().find(|s| s.name == name)
    }

    /// The product species of every reaction
    pub fn terminal(&self) -> &'static Species {
        self.terminal
    }

    /// Species that have a reaction partner; candidates for initial placement
    pub fn reactive(&self) -> Vec<&'static Species> {
        self.entries
            .iter()
            .copied()
            .filter(|s| !s.is_terminal())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Species> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SpeciesTable {
    fn default() -> Self {
        Self::air()
    }
}
