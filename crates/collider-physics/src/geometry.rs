//! Vector helpers shared by the wall and pairwise collision code

use glam::Vec2;

use crate::constants::COINCIDENT_EPSILON;

/// Geometric relation between two circle centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Center distance (0 for coincident centers)
    pub distance: f32,
    /// Unit vector pointing from the second center toward the first
    pub normal: Vec2,
}

impl Contact {
    /// Measure the contact from `b` toward `a`.
    ///
    /// Coincident centers have no direction, so they get the nominal normal
    /// `+x` and a distance of zero instead of a NaN normal.
    pub fn between(a: Vec2, b: Vec2) -> Self {
        let delta = a - b;
        let distance = delta.length();
        if distance < COINCIDENT_EPSILON {
            log::trace!("coincident centers at ({:.3}, {:.3})", a.x, a.y);
            return Self {
                distance: 0.0,
                normal: Vec2::X,
            };
        }
        Self {
            distance,
            normal: delta / distance,
        }
    }

    /// Whether two circles with these radii interpenetrate
    pub fn overlaps(&self, radius_a: f32, radius_b: f32) -> bool {
        self.distance < radius_a + radius_b
    }
}

/// Euclidean distance between two points
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Reflect `v` across the line whose unit normal is `normal`
pub fn reflect(v: Vec2, normal: Vec2) -> Vec2 {
    v - 2.0 * v.dot(normal) * normal
}

/// Component of `v` along the unit vector `normal`
pub fn normal_component(v: Vec2, normal: Vec2) -> f32 {
    v.dot(normal)
}

/// Midpoint of two points
pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) * 0.5
}
