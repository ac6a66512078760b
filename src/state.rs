//! Body arena with stable handles, batch removal, and merge bookkeeping.

use std::collections::HashSet;

use bevy::log::warn;
use bevy::math::DVec2;

use crate::body::{Body, BodyId, Rgb};
use crate::error::{SimError, SimResult};

/// Arena of bodies in insertion order, addressed by stable [`BodyId`] handles.
///
/// Holds exactly one anchor for its whole lifetime. Bodies leave only through
/// [`BodySet::remove`]; the anchor is never removed.
#[derive(Debug, Clone)]
pub struct BodySet {
    bodies: Vec<Body>,
    anchor: BodyId,
    trail_length: usize,
    next_id: u32,
}

impl BodySet {
    /// Creates an arena holding only the anchor.
    ///
    /// # Examples
    ///
    /// ```
    /// use bevy::math::DVec2;
    /// use solar_accretion::constants::COLOR_SUN;
    /// use solar_accretion::state::BodySet;
    ///
    /// let mut set = BodySet::with_anchor(DVec2::ZERO, 20_000.0, 20.0, COLOR_SUN, 50);
    /// set.spawn(DVec2::new(300.0, 0.0), DVec2::new(0.0, 2.1), 3.0);
    ///
    /// assert_eq!(set.len(), 2);
    /// assert!(set.anchor().is_anchor);
    /// ```
    pub fn with_anchor(
        position: DVec2,
        mass: f64,
        radius: f64,
        color: Rgb,
        trail_length: usize,
    ) -> Self {
        let anchor = BodyId(0);
        Self {
            bodies: vec![Body::anchor(
                anchor,
                position,
                mass,
                radius,
                color,
                trail_length,
            )],
            anchor,
            trail_length,
            next_id: 1,
        }
    }

    /// Adds a particle and returns its handle.
    pub fn spawn(&mut self, position: DVec2, velocity: DVec2, mass: f64) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body::particle(
            id,
            position,
            velocity,
            mass,
            self.trail_length,
        ));
        id
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn anchor_id(&self) -> BodyId {
        self.anchor
    }

    pub fn anchor(&self) -> &Body {
        // The anchor is filtered out of every removal, so the lookup cannot miss.
        self.bodies
            .iter()
            .find(|b| b.id == self.anchor)
            .unwrap_or(&self.bodies[0])
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub(crate) fn trail_length(&self) -> usize {
        self.trail_length
    }

    fn index_of(&self, id: BodyId) -> SimResult<usize> {
        self.bodies
            .iter()
            .position(|b| b.id == id)
            .ok_or(SimError::BodyNotFound { id })
    }

    /// Removes every body whose handle is in `ids`, as one batch.
    ///
    /// A request to remove the anchor is ignored.
    pub fn remove(&mut self, ids: &HashSet<BodyId>) {
        if ids.is_empty() {
            return;
        }
        if ids.contains(&self.anchor) {
            warn!("ignoring request to remove anchor body {}", self.anchor.0);
        }
        let anchor = self.anchor;
        self.bodies.retain(|b| b.id == anchor || !ids.contains(&b.id));
    }

    /// Folds `absorbed` into `survivor`.
    ///
    /// The absorbed body stays in the arena; callers collect absorbed handles
    /// and pass them to [`BodySet::remove`] once their pass is complete.
    pub fn merge(&mut self, survivor: BodyId, absorbed: BodyId) -> SimResult<()> {
        for id in [survivor, absorbed] {
            if id == self.anchor {
                return Err(SimError::AnchorMerge { id });
            }
        }
        let i = self.index_of(survivor)?;
        let j = self.index_of(absorbed)?;
        self.merge_at(i, j);
        Ok(())
    }

    pub(crate) fn merge_at(&mut self, survivor: usize, absorbed: usize) {
        if survivor == absorbed {
            return;
        }
        let other = self.bodies[absorbed].clone();
        self.bodies[survivor].absorb(&other);
    }

    // ── Diagnostics ───────────────────────────────────────────────────────────

    /// Sum of all masses, anchor included.
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    pub fn total_momentum(&self) -> DVec2 {
        self.bodies
            .iter()
            .map(Body::momentum)
            .fold(DVec2::ZERO, |acc, p| acc + p)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }
}
