//! Runtime configuration loaded from `assets/solar_system.toml`.
//!
//! [`SimConfig`] (the simulation core) and [`DisplayConfig`] (window, camera,
//! colours) mirror the constants in [`crate::constants`]. At startup
//! [`load_or_default`] reads the TOML file and overwrites the defaults with any
//! values present. Missing keys fall back to the compile-time defaults, so a
//! minimal file can override just the values you care about:
//!
//! ```toml
//! [simulation]
//! particle_count = 400
//! seed = 7
//!
//! [display]
//! zoom_step = 1.25
//! ```
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by the `Default` impls.

use std::io;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use crate::body::Rgb;
use crate::constants::*;
use crate::error::{require_at_least, require_at_most, require_positive, SimError, SimResult};

/// Default config file location, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/solar_system.toml";

/// Simulation parameters passed to [`crate::solar_system::SolarSystem::new`].
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // ── Population ────────────────────────────────────────────────────────────
    pub particle_count: usize,
    pub particle_mass_min: f64,
    pub particle_mass_max: f64,
    pub distance_min: f64,
    pub distance_max: f64,

    // ── Physics ───────────────────────────────────────────────────────────────
    pub time_step: f64,
    pub gravity_const: f64,
    pub damping_factor: f64,

    // ── Sun ───────────────────────────────────────────────────────────────────
    pub sun_mass: f64,
    pub sun_radius: f64,
    pub sun_color: Rgb,

    // ── Trails ────────────────────────────────────────────────────────────────
    pub trail_length: usize,

    /// RNG seed for the initial population. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            particle_count: NUM_PARTICLES,
            particle_mass_min: PARTICLE_MASS_MIN,
            particle_mass_max: PARTICLE_MASS_MAX,
            distance_min: DISTANCE_MIN,
            distance_max: DISTANCE_MAX,
            time_step: TIME_STEP,
            gravity_const: GRAVITY_CONST,
            damping_factor: DAMPING_FACTOR,
            sun_mass: SUN_MASS,
            sun_radius: SUN_RADIUS,
            sun_color: COLOR_SUN,
            trail_length: TRAIL_LENGTH,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> SimResult<()> {
        require_positive("time_step", self.time_step)?;
        require_positive("gravity_const", self.gravity_const)?;
        require_positive("damping_factor", self.damping_factor)?;
        require_positive("particle_mass_min", self.particle_mass_min)?;
        require_at_least(
            "particle_mass_max",
            self.particle_mass_max,
            self.particle_mass_min,
            "[particle_mass_min, ∞)",
        )?;
        require_positive("distance_min", self.distance_min)?;
        require_at_least(
            "distance_max",
            self.distance_max,
            self.distance_min,
            "[distance_min, ∞)",
        )?;
        require_positive("sun_mass", self.sun_mass)?;
        require_at_least("sun_radius", self.sun_radius, MIN_BODY_RADIUS, "[2.0, ∞)")?;
        require_at_most(
            "particle_count",
            self.particle_count,
            MAX_PARTICLES,
            "[0, 100000]",
        )?;
        require_at_most(
            "trail_length",
            self.trail_length,
            MAX_TRAIL_LENGTH,
            "[0, 10000]",
        )?;
        Ok(())
    }
}

/// Window, camera, and colour settings for the Bevy front end.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub frame_rate: f64,
    pub zoom_step: f64,
    pub sun_outline_offset: f32,
    pub stats_font_size: f32,
    pub stats_log_interval: u64,
    pub background_color: Rgb,
    pub sun_outline_color: Rgb,
    pub hud_text_color: Rgb,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            frame_rate: FRAME_RATE,
            zoom_step: ZOOM_STEP,
            sun_outline_offset: SUN_OUTLINE_OFFSET,
            stats_font_size: STATS_FONT_SIZE,
            stats_log_interval: STATS_LOG_INTERVAL,
            background_color: COLOR_BACKGROUND,
            sun_outline_color: COLOR_SUN_OUTLINE,
            hud_text_color: COLOR_HUD_TEXT,
        }
    }
}

impl DisplayConfig {
    pub fn validate(&self) -> SimResult<()> {
        require_positive("window_width", self.window_width as f64)?;
        require_positive("window_height", self.window_height as f64)?;
        require_positive("frame_rate", self.frame_rate)?;
        if self.zoom_step <= 1.0 || self.zoom_step.is_nan() {
            return Err(SimError::InvalidConfig {
                name: "zoom_step",
                value: self.zoom_step,
                expected: "(1.0, ∞)",
            });
        }
        Ok(())
    }
}

/// Top-level layout of the config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimConfig,
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Parse and validate a config document.
    pub fn from_toml_str(path: &Path, contents: &str) -> SimResult<Self> {
        let config: AppConfig =
            toml::from_str(contents).map_err(|source| SimError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        self.simulation.validate()?;
        self.display.validate()
    }
}

/// Read, parse, and validate the config file at `path`.
pub fn load_config_file(path: impl AsRef<Path>) -> SimResult<AppConfig> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| SimError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    AppConfig::from_toml_str(path, &contents)
}

/// Load `path`, falling back to compiled defaults.
///
/// A missing file is not an error. Read, parse, and validation failures are
/// printed to stderr but do not abort the simulation. Runs before the Bevy
/// log plugin exists, so it prints directly.
pub fn load_or_default(path: impl AsRef<Path>) -> AppConfig {
    let path = path.as_ref();
    match load_config_file(path) {
        Ok(config) => {
            println!("✓ Loaded config from {}", path.display());
            config
        }
        Err(SimError::ConfigRead { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            println!("ℹ No {} found; using compiled defaults", path.display());
            AppConfig::default()
        }
        Err(e) => {
            eprintln!("⚠ {e}; using defaults");
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> SimResult<AppConfig> {
        AppConfig::from_toml_str(Path::new("test.toml"), contents)
    }

    #[test]
    fn defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(parse("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = parse(
            r#"
            [simulation]
            particle_count = 12
            seed = 99
            sun_color = [1, 2, 3]

            [display]
            zoom_step = 1.5
            "#,
        )
        .unwrap();
        assert_eq!(config.simulation.particle_count, 12);
        assert_eq!(config.simulation.seed, Some(99));
        assert_eq!(config.simulation.sun_color, Rgb(1, 2, 3));
        assert_eq!(config.simulation.sun_mass, SUN_MASS);
        assert_eq!(config.display.zoom_step, 1.5);
        assert_eq!(config.display.window_width, WINDOW_WIDTH);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            parse("[simulation\nparticle_count = 3"),
            Err(SimError::ConfigParse { .. })
        ));
    }

    #[test]
    fn inverted_mass_range_is_rejected() {
        let err = parse(
            r#"
            [simulation]
            particle_mass_min = 5.0
            particle_mass_max = 1.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidConfig {
                name: "particle_mass_max",
                ..
            }
        ));
    }

    #[test]
    fn infinite_distance_is_rejected() {
        let err = parse(
            r#"
            [simulation]
            distance_max = inf
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidConfig {
                name: "distance_max",
                ..
            }
        ));
    }

    #[test]
    fn infinite_mass_is_rejected() {
        let config = SimConfig {
            particle_mass_max: f64::INFINITY,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_trail_length_is_rejected() {
        let err = parse(
            r#"
            [simulation]
            trail_length = 9223372036854775807
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidConfig {
                name: "trail_length",
                ..
            }
        ));
    }

    #[test]
    fn oversized_particle_count_is_rejected() {
        let config = SimConfig {
            particle_count: MAX_PARTICLES + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn small_sun_radius_is_rejected() {
        let config = SimConfig {
            sun_radius: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zoom_step_must_exceed_one() {
        let display = DisplayConfig {
            zoom_step: 1.0,
            ..Default::default()
        };
        assert!(display.validate().is_err());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_config_file("definitely/not/here.toml").unwrap_err();
        match err {
            SimError::ConfigRead { source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::NotFound)
            }
            other => panic!("expected ConfigRead, got {other:?}"),
        }
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        assert_eq!(load_or_default("definitely/not/here.toml"), AppConfig::default());
    }
}
