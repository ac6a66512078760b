//! Solar accretion simulation library
//!
//! A 2D gravitational particle simulation: a sun, a ring of orbiting
//! particles, pairwise attraction, and inelastic merging on contact. The core
//! (`body` through `solar_system`) is plain data and arithmetic; `simulation`
//! and `rendering` wire it into Bevy.

pub mod body;
pub mod collision;
pub mod config;
pub mod constants;
pub mod error;
pub mod graphics;
pub mod gravity;
pub mod motion;
pub mod rendering;
pub mod simulation;
pub mod solar_system;
pub mod state;
pub mod viewport;
