//! The simulation driver: initial population and the per-tick pipeline.
//!
//! ## Tick phases
//!
//! | Phase     | Function                                  | Mutates              |
//! |-----------|-------------------------------------------|----------------------|
//! | Force     | [`crate::gravity::apply_gravity`]         | velocities           |
//! | Motion    | [`crate::motion::advance_all`]            | positions, trails    |
//! | Collision | [`crate::collision::resolve_collisions`]  | mass, membership     |
//!
//! Each phase completes for every body before the next begins.

use std::f64::consts::{FRAC_PI_2, TAU};

use bevy::log::{debug, info};
use bevy::math::DVec2;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::body::Body;
use crate::collision::{resolve_collisions, CollisionReport};
use crate::config::SimConfig;
use crate::error::SimResult;
use crate::gravity::apply_gravity;
use crate::motion::advance_all;
use crate::state::BodySet;

/// Outcome of a single [`SolarSystem::tick`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Tick number just completed (1-based).
    pub tick: u64,
    pub collisions: CollisionReport,
    pub live_bodies: usize,
}

/// Circular-orbit speed around a mass `central_mass` at `distance`.
pub fn circular_orbit_speed(gravity_const: f64, central_mass: f64, distance: f64) -> f64 {
    (gravity_const * central_mass / distance).sqrt()
}

/// A sun and its orbiting particles, advanced one tick at a time.
#[derive(Resource, Debug, Clone)]
pub struct SolarSystem {
    config: SimConfig,
    bodies: BodySet,
    tick: u64,
}

impl SolarSystem {
    /// Build the sun at the origin and a randomised ring of particles on
    /// circular orbits around it.
    ///
    /// # Examples
    ///
    /// ```
    /// use solar_accretion::config::SimConfig;
    /// use solar_accretion::solar_system::SolarSystem;
    ///
    /// let config = SimConfig { particle_count: 10, seed: Some(1), ..Default::default() };
    /// let mut system = SolarSystem::new(config).unwrap();
    /// assert_eq!(system.bodies().len(), 11);
    ///
    /// let report = system.tick();
    /// assert!(report.live_bodies <= 11);
    /// ```
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut bodies = BodySet::with_anchor(
            DVec2::ZERO,
            config.sun_mass,
            config.sun_radius,
            config.sun_color,
            config.trail_length,
        );
        let sun_position = bodies.anchor().position;
        let sun_mass = bodies.anchor().mass;

        for _ in 0..config.particle_count {
            let distance = rng.gen_range(config.distance_min..=config.distance_max);
            let angle = rng.gen_range(0.0..TAU);
            let position = sun_position + DVec2::from_angle(angle) * distance;

            let mass = rng.gen_range(config.particle_mass_min..=config.particle_mass_max);

            let speed = circular_orbit_speed(config.gravity_const, sun_mass, distance);
            let velocity = DVec2::from_angle(angle + FRAC_PI_2) * speed;

            bodies.spawn(position, velocity, mass);
        }

        info!(
            "solar system created: {} particles around a sun of mass {} (seed {:?})",
            config.particle_count, config.sun_mass, config.seed
        );

        Ok(Self {
            config,
            bodies,
            tick: 0,
        })
    }

    /// Wrap a hand-built arena, e.g. a test scenario.
    ///
    /// The arena's trail capacity replaces `config.trail_length`.
    pub fn from_bodies(mut config: SimConfig, bodies: BodySet) -> SimResult<Self> {
        config.trail_length = bodies.trail_length();
        config.validate()?;
        Ok(Self {
            config,
            bodies,
            tick: 0,
        })
    }

    /// Advance the simulation by one tick: force, then motion, then collisions.
    pub fn tick(&mut self) -> TickReport {
        let dt = self.config.time_step;

        apply_gravity(self.bodies.bodies_mut(), self.config.gravity_const, dt);
        advance_all(self.bodies.bodies_mut(), dt, self.config.damping_factor);
        let collisions = resolve_collisions(&mut self.bodies);

        self.tick += 1;
        if !collisions.is_empty() {
            debug!(
                "tick {}: {} merges, {} absorbed by sun, {} bodies left",
                self.tick,
                collisions.merges.len(),
                collisions.absorbed_by_anchor.len(),
                self.bodies.len()
            );
        }

        TickReport {
            tick: self.tick,
            collisions,
            live_bodies: self.bodies.len(),
        }
    }

    pub fn bodies(&self) -> &[Body] {
        self.bodies.bodies()
    }

    pub fn body_set(&self) -> &BodySet {
        &self.bodies
    }

    pub fn anchor(&self) -> &Body {
        self.bodies.anchor()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.total_mass()
    }

    pub fn total_momentum(&self) -> DVec2 {
        self.bodies.total_momentum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.kinetic_energy()
    }
}
