//! Axis-aligned boundary segments

use glam::Vec2;
use serde::Serialize;

use crate::error::PhysicsError;
use crate::geometry::reflect;
use crate::particle::Particle;

/// Orientation of a wall segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    /// Constant x; reflects horizontal velocity
    Vertical,
    /// Constant y; reflects vertical velocity
    Horizontal,
}

/// A vertical or horizontal line segment that particles bounce off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    start: Vec2,
    end: Vec2,
    orientation: Orientation,
}

impl Wall {
    pub fn new(start: Vec2, end: Vec2) -> Result<Self, PhysicsError> {
        let orientation = match (start.x == end.x, start.y == end.y) {
            (true, true) => {
                return Err(PhysicsError::DegenerateWall {
                    x: start.x,
                    y: start.y,
                })
            }
            (true, false) => Orientation::Vertical,
            (false, true) => Orientation::Horizontal,
            (false, false) => {
                return Err(PhysicsError::DiagonalWall {
                    x1: start.x,
                    y1: start.y,
                    x2: end.x,
                    y2: end.y,
                })
            }
        };
        Ok(Self {
            start,
            end,
            orientation,
        })
    }

    /// Top, bottom, left and right boundaries of a `width × height` box
    pub fn side_walls(width: f32, height: f32) -> Result<[Wall; 4], PhysicsError> {
        Ok([
            Wall::new(Vec2::new(0.0, 0.0), Vec2::new(width, 0.0))?,
            Wall::new(Vec2::new(0.0, height), Vec2::new(width, height))?,
            Wall::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, height))?,
            Wall::new(Vec2::new(width, 0.0), Vec2::new(width, height))?,
        ])
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn end(&self) -> Vec2 {
        self.end
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Unit normal of the wall line
    pub fn normal(&self) -> Vec2 {
        match self.orientation {
            Orientation::Vertical => Vec2::X,
            Orientation::Horizontal => Vec2::Y,
        }
    }

    /// Reflect the particle's perpendicular velocity if it touches the wall
    /// while heading toward it. Returns whether a reflection happened.
    ///
    /// Only the velocity changes; a particle already past the line is left
    /// there and moves back on the following ticks. A particle heading away
    /// from the line is never reflected, so one that was pushed into the
    /// wall by a particle collision is not turned back into it.
    pub fn check_collision(&self, particle: &mut Particle) -> bool {
        let normal = self.normal();
        let tangent = normal.perp().abs();

        let line = self.start.dot(normal);
        let offset = particle.position.dot(normal) - line;
        if offset.abs() >= particle.radius {
            return false;
        }

        let along = particle.position.dot(tangent);
        let (a, b) = (self.start.dot(tangent), self.end.dot(tangent));
        if !(a.min(b) < along && along < a.max(b)) {
            return false;
        }

        let approach = particle.velocity.dot(normal);
        let heading_in = (offset < 0.0 && approach > 0.0) || (offset > 0.0 && approach < 0.0);
        if heading_in {
            particle.velocity = reflect(particle.velocity, normal);
        }
        heading_in
    }
}
