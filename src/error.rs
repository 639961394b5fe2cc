//! Simulation-specific error types.
//!
//! Systems should propagate errors through these types rather than panicking
//! where practical, enabling graceful degradation instead of hard crashes.
//! Placement failures in particular degrade to best-effort positions; the
//! variants here cover the cases where a value is outright unusable.

use std::fmt;

/// Top-level error enum for the spectra simulation.
#[derive(Debug)]
pub enum SimError {
    /// A configuration value is outside its safe operating range.
    /// Returned by the validation helpers run against loaded TOML.
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for SimError {}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error if `required_per_color` would make the spectrum
/// uncompletable (zero) or exceed any color's spawn count.
pub fn validate_required_per_color(value: u32) -> SimResult<()> {
    if value == 0 || value > 42 {
        Err(SimError::UnsafeConstant {
            name: "required_per_color",
            value: value as f64,
            safe_range: "[1, 42] (the smallest spawn count)",
        })
    } else {
        Ok(())
    }
}

/// Returns an error if `player_max_speed` is not strictly positive.
pub fn validate_max_speed(value: f32) -> SimResult<()> {
    if value <= 0.0 {
        Err(SimError::UnsafeConstant {
            name: "player_max_speed",
            value: value as f64,
            safe_range: "(0.0, ∞)",
        })
    } else {
        Ok(())
    }
}

/// Returns an error if the portal cooldown is negative; a zero cooldown is
/// legal (portals teleport freely) but a negative one never expires against
/// a monotonic clock comparison.
pub fn validate_portal_cooldown(value: f64) -> SimResult<()> {
    if value < 0.0 {
        Err(SimError::UnsafeConstant {
            name: "portal_cooldown_ms",
            value,
            safe_range: "[0.0, ∞)",
        })
    } else {
        Ok(())
    }
}

/// Run every validator against a loaded config. Used by
/// [`crate::config::load_sim_config`] before accepting TOML overrides.
pub fn validate_config(config: &crate::config::SimConfig) -> SimResult<()> {
    validate_required_per_color(config.required_per_color)?;
    validate_max_speed(config.player_max_speed)?;
    validate_portal_cooldown(config.portal_cooldown_ms)?;
    Ok(())
}
