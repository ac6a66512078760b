//! Pan/zoom state and the narrow command surface the front end drives.
//!
//! The simulation core never reads this; it only maps simulation space to the
//! screen and records whether a stop was requested.

use bevy::math::{DVec2, Vec2};
use bevy::prelude::*;

use crate::constants::ZOOM_STEP;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Simulation-space point shown at the window centre.
    pub center: DVec2,
    /// Screen pixels per simulation unit.
    pub scale: f64,
    zoom_step: f64,
    running: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ZOOM_STEP)
    }
}

impl Viewport {
    pub fn new(zoom_step: f64) -> Self {
        Self {
            center: DVec2::ZERO,
            scale: 1.0,
            zoom_step,
            running: true,
        }
    }

    pub fn zoom_in(&mut self) {
        self.scale *= self.zoom_step;
    }

    pub fn zoom_out(&mut self) {
        self.scale /= self.zoom_step;
    }

    pub fn request_stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Map a simulation-space point to Bevy world coordinates.
    ///
    /// The window centre is the origin. Simulation y grows downward, Bevy y
    /// grows upward, so y is flipped.
    pub fn to_screen(&self, point: DVec2) -> Vec2 {
        let p = (point - self.center) * self.scale;
        Vec2::new(p.x as f32, -p.y as f32)
    }

    /// On-screen radius of a body: `max(1, floor(radius·scale))`.
    pub fn screen_radius(&self, radius: f64) -> f32 {
        (radius * self.scale).floor().max(1.0) as f32
    }
}
