//! Simulation-specific error types.
//!
//! The tick itself is closed-form arithmetic and cannot fail. Errors come from
//! configuration loading and from misuse of the body arena's merge API.
//!
//! ## Usage
//!
//! ```rust
//! use solar_accretion::config::SimConfig;
//! use solar_accretion::error::SimResult;
//!
//! fn checked() -> SimResult<SimConfig> {
//!     let config = SimConfig::default();
//!     config.validate()?;
//!     Ok(config)
//! }
//! assert!(checked().is_ok());
//! ```

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::body::BodyId;

/// Top-level error enum for the solar accretion simulation.
#[derive(Debug)]
pub enum SimError {
    /// The config file exists but could not be read.
    ConfigRead { path: PathBuf, source: io::Error },

    /// The config file is not valid TOML for [`crate::config::AppConfig`].
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A configuration value is outside the range the simulation accepts.
    InvalidConfig {
        /// Name of the field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },

    /// A merge referenced a handle that is not in the arena.
    BodyNotFound { id: BodyId },

    /// A merge named the anchor. The anchor only absorbs, it never merges.
    AnchorMerge { id: BodyId },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::ConfigRead { path, source } => {
                write!(f, "failed to read config {}: {}", path.display(), source)
            }
            SimError::ConfigParse { path, source } => {
                write!(f, "failed to parse config {}: {}", path.display(), source)
            }
            SimError::InvalidConfig {
                name,
                value,
                expected,
            } => write!(
                f,
                "config value '{}' = {} is outside accepted range {}",
                name, value, expected
            ),
            SimError::BodyNotFound { id } => write!(f, "body {} not found", id.0),
            SimError::AnchorMerge { id } => {
                write!(f, "body {} is the anchor and cannot take part in a merge", id.0)
            }
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::ConfigRead { source, .. } => Some(source),
            SimError::ConfigParse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value > 0` and finite.
pub fn require_positive(name: &'static str, value: f64) -> SimResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidConfig {
            name,
            value,
            expected: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value >= min` and finite.
pub fn require_at_least(
    name: &'static str,
    value: f64,
    min: f64,
    expected: &'static str,
) -> SimResult<()> {
    if value >= min && value.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidConfig {
            name,
            value,
            expected,
        })
    }
}

/// Returns an error if a count exceeds `max`.
pub fn require_at_most(
    name: &'static str,
    value: usize,
    max: usize,
    expected: &'static str,
) -> SimResult<()> {
    if value <= max {
        Ok(())
    } else {
        Err(SimError::InvalidConfig {
            name,
            value: value as f64,
            expected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_positive_rejects_zero_and_negative() {
        assert!(require_positive("g", 0.0).is_err());
        assert!(require_positive("g", -1.0).is_err());
        assert!(require_positive("g", 1e-9).is_ok());
    }

    #[test]
    fn require_positive_rejects_nan() {
        assert!(require_positive("g", f64::NAN).is_err());
    }

    #[test]
    fn infinity_is_never_in_range() {
        assert!(require_positive("distance_max", f64::INFINITY).is_err());
        assert!(require_at_least("distance_max", f64::INFINITY, 200.0, "[200.0, ∞)").is_err());
    }

    #[test]
    fn require_at_most_accepts_the_bound() {
        assert!(require_at_most("trail_length", 10, 10, "[0, 10]").is_ok());
        assert!(require_at_most("trail_length", 11, 10, "[0, 10]").is_err());
    }

    #[test]
    fn invalid_config_message_names_the_field() {
        let err = require_at_least("sun_radius", 1.0, 2.0, "[2.0, ∞)").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("sun_radius"), "unexpected message: {msg}");
        assert!(msg.contains("[2.0, ∞)"), "unexpected message: {msg}");
    }

    #[test]
    fn config_read_exposes_io_source() {
        use std::error::Error;
        let err = SimError::ConfigRead {
            path: PathBuf::from("missing.toml"),
            source: io::Error::new(io::ErrorKind::NotFound, "nope"),
        };
        assert!(err.source().is_some());
    }
}
