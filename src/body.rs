//! Bodies, their stable handles, mass-derived appearance, and bounded trails.

use std::collections::VecDeque;

use bevy::math::DVec2;
use serde::Deserialize;

use crate::constants::*;

/// Stable handle for a body. Never reused within one simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// 8-bit sRGB colour. Deserialises from a `[r, g, b]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Collision radius for a body of the given mass: `max(2, floor(sqrt(mass)))`.
pub fn radius_for_mass(mass: f64) -> f64 {
    mass.sqrt().floor().max(MIN_BODY_RADIUS)
}

/// Colour bucket for a body of the given mass.
///
/// Comparisons are strict `<`, so a mass exactly on a threshold falls into
/// the next bucket up.
pub fn color_for_mass(mass: f64) -> Rgb {
    if mass < COLOR_MASS_SMALL {
        COLOR_TURQUOISE
    } else if mass < COLOR_MASS_MEDIUM {
        COLOR_DARK_TEAL
    } else if mass < COLOR_MASS_LARGE {
        COLOR_RED_ORANGE
    } else {
        COLOR_DARK_RED
    }
}

/// Bounded FIFO history of positions, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<DVec2>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a position, evicting the oldest entry when over capacity.
    pub fn push(&mut self, point: DVec2) {
        self.points.push_back(point);
        if self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Append every point of `other` in order, keeping the newest `capacity`.
    pub fn extend_from(&mut self, other: &Trail) {
        for &p in &other.points {
            self.push(p);
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.points.iter().copied()
    }
}

/// A single body in the simulation: the sun or an orbiting particle.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub position: DVec2,
    pub velocity: DVec2,
    pub mass: f64,
    pub radius: f64,
    pub color: Rgb,
    pub is_anchor: bool,
    pub trail: Trail,
}

impl Body {
    /// A non-anchor particle with radius and colour derived from `mass`.
    pub fn particle(
        id: BodyId,
        position: DVec2,
        velocity: DVec2,
        mass: f64,
        trail_length: usize,
    ) -> Self {
        Self {
            id,
            position,
            velocity,
            mass,
            radius: radius_for_mass(mass),
            color: color_for_mass(mass),
            is_anchor: false,
            trail: Trail::new(trail_length),
        }
    }

    /// The anchor. Radius and colour are fixed by the caller, not derived.
    pub fn anchor(
        id: BodyId,
        position: DVec2,
        mass: f64,
        radius: f64,
        color: Rgb,
        trail_length: usize,
    ) -> Self {
        Self {
            id,
            position,
            velocity: DVec2::ZERO,
            mass,
            radius: radius.max(MIN_BODY_RADIUS),
            color,
            is_anchor: true,
            trail: Trail::new(trail_length),
        }
    }

    pub fn momentum(&self) -> DVec2 {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Centres closer than the sum of radii (strict).
    pub fn overlaps(&self, other: &Body) -> bool {
        self.position.distance(other.position) < self.radius + other.radius
    }

    /// Fold `other` into `self`: summed mass, centre-of-mass velocity,
    /// recomputed radius/colour, and trails concatenated self-then-other.
    pub(crate) fn absorb(&mut self, other: &Body) {
        let total_mass = self.mass + other.mass;
        self.velocity = (self.momentum() + other.momentum()) / total_mass;
        self.mass = total_mass;
        self.radius = radius_for_mass(total_mass);
        self.color = color_for_mass(total_mass);
        self.trail.extend_from(&other.trail);
    }
}
