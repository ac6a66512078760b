//! Centralised simulation and display constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place. [`crate::config`] mirrors every value as a runtime
//! field; these constants remain the authoritative defaults.
//!
//! ## Tuning guidance
//!
//! Each constant notes the observable consequence of changing it. After
//! editing, run `cargo test` to confirm the orbit and merge scenarios still hold.

use crate::body::Rgb;

// ── Population ────────────────────────────────────────────────────────────────

/// Number of particles spawned around the sun at startup.
pub const NUM_PARTICLES: usize = 200;

/// Largest particle count a config may ask for.
pub const MAX_PARTICLES: usize = 100_000;

/// Lower bound of the uniform particle mass distribution.
pub const PARTICLE_MASS_MIN: f64 = 1.0;

/// Upper bound of the uniform particle mass distribution.
///
/// Masses below 9 all render at the minimum radius of 2.
pub const PARTICLE_MASS_MAX: f64 = 10.0;

/// Minimum initial distance from the sun (simulation units).
pub const DISTANCE_MIN: f64 = 200.0;

/// Maximum initial distance from the sun (simulation units).
pub const DISTANCE_MAX: f64 = 600.0;

// ── Physics ───────────────────────────────────────────────────────────────────

/// Simulation time advanced per tick.
pub const TIME_STEP: f64 = 1.0;

/// Gravitational scaling constant.
///
/// Tuned for visual stability, not realism. With the default sun mass a
/// particle at distance 300 completes one orbit in roughly 900 ticks.
pub const GRAVITY_CONST: f64 = 6.67430e-2;

/// Per-tick velocity multiplier. 1.0 disables damping.
pub const DAMPING_FACTOR: f64 = 1.0;

/// Smallest radius any body may have.
pub const MIN_BODY_RADIUS: f64 = 2.0;

// ── Sun ───────────────────────────────────────────────────────────────────────

pub const SUN_MASS: f64 = 20_000.0;

/// Collision radius of the sun. Not derived from mass.
pub const SUN_RADIUS: f64 = 20.0;

// ── Trails ────────────────────────────────────────────────────────────────────

/// Number of past positions retained per body.
pub const TRAIL_LENGTH: usize = 50;

/// Largest trail capacity a config may ask for.
pub const MAX_TRAIL_LENGTH: usize = 10_000;

// ── Mass → colour thresholds ──────────────────────────────────────────────────

pub const COLOR_MASS_SMALL: f64 = 5.0;
pub const COLOR_MASS_MEDIUM: f64 = 10.0;
pub const COLOR_MASS_LARGE: f64 = 15.0;

pub const COLOR_TURQUOISE: Rgb = Rgb(50, 215, 200);
pub const COLOR_DARK_TEAL: Rgb = Rgb(30, 100, 100);
pub const COLOR_RED_ORANGE: Rgb = Rgb(240, 95, 95);
pub const COLOR_DARK_RED: Rgb = Rgb(125, 45, 45);

// ── Display ───────────────────────────────────────────────────────────────────

pub const WINDOW_WIDTH: u32 = 1200;
pub const WINDOW_HEIGHT: u32 = 800;

/// Simulation ticks per second (frame-rate ceiling).
pub const FRAME_RATE: f64 = 60.0;

/// Multiplicative zoom change per key press.
pub const ZOOM_STEP: f64 = 1.1;

/// Gap between the sun's disc and its outline ring (screen pixels).
pub const SUN_OUTLINE_OFFSET: f32 = 3.0;

/// Ticks between periodic stats log lines. 0 disables the log line.
pub const STATS_LOG_INTERVAL: u64 = 600;

pub const STATS_FONT_SIZE: f32 = 16.0;

pub const COLOR_BACKGROUND: Rgb = Rgb(45, 45, 45);
pub const COLOR_SUN: Rgb = Rgb(235, 195, 50);
pub const COLOR_SUN_OUTLINE: Rgb = Rgb(240, 195, 195);
pub const COLOR_HUD_TEXT: Rgb = Rgb(255, 255, 255);
