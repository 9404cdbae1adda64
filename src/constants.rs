//! Application constants for sensor quality control
//!
//! This module contains the built-in check names, default parameter values
//! and the per-variable lookup tables used when a configuration does not
//! supply a threshold of its own.

// =============================================================================
// Check Names
// =============================================================================

/// Registry keys for the built-in checks
pub mod check_names {
    pub const RANGE: &str = "range_check";
    pub const SPIKE: &str = "spike_check";
    pub const STUCK_SENSOR: &str = "stuck_sensor";
    pub const GAP: &str = "gap_check";
    pub const RAMP_RATE: &str = "ramp_rate";
    pub const DIRECTION_WRAP: &str = "wind_direction_wrap";

    /// Built-in checks in registration (and therefore execution) order
    pub const BUILT_IN: &[&str] = &[RANGE, SPIKE, STUCK_SENSOR, GAP, RAMP_RATE, DIRECTION_WRAP];
}

// =============================================================================
// Physical Limits
// =============================================================================

/// Default inclusive (min, max) bounds keyed by lower-cased variable name
///
/// Units: wind speed m/s, direction degrees, temperature degC,
/// pressure hPa, humidity percent.
pub const DEFAULT_RANGES: &[(&str, f64, f64)] = &[
    ("wind_speed", 0.0, 75.0),
    ("wind_direction", 0.0, 360.0),
    ("temperature", -60.0, 60.0),
    ("pressure", 800.0, 1100.0),
    ("humidity", 0.0, 100.0),
];

/// Default maximum rate of change per second keyed by lower-cased variable name
pub const DEFAULT_RAMP_RATES: &[(&str, f64)] = &[
    ("wind_speed", 5.0 / 600.0),   // 5 m/s per 10 minutes
    ("temperature", 5.0 / 3600.0), // 5 degC per hour
    ("pressure", 10.0 / 3600.0),   // 10 hPa per hour
];

// =============================================================================
// Check Parameter Defaults
// =============================================================================

/// Number of preceding samples in the spike detection window
pub const DEFAULT_SPIKE_WINDOW_SIZE: usize = 5;

/// z-score above which a sample is reported as a spike
pub const DEFAULT_SPIKE_THRESHOLD_MULTIPLIER: f64 = 3.0;

/// Minimum run length for a frozen sensor
pub const DEFAULT_MIN_STUCK_COUNT: usize = 6;

/// Maximum deviation from the first value of a run that still counts as "stuck"
pub const DEFAULT_STUCK_TOLERANCE: f64 = 1e-6;

/// Time gap threshold as a multiple of the median sampling interval
pub const DEFAULT_GAP_MULTIPLIER: f64 = 2.0;

/// Largest accepted step between consecutive direction samples, in degrees
pub const DEFAULT_MAX_ANGULAR_CHANGE: f64 = 180.0;

// =============================================================================
// Scoring
// =============================================================================

/// Per-flag penalty weights used by quality scoring
pub mod severity_weights {
    pub const GOOD: f64 = 0.0;
    pub const SUSPECT: f64 = 0.1;
    pub const BAD: f64 = 0.5;
    pub const MISSING: f64 = 0.3;
}

/// Filepath recorded on a report when the dataset carries no source identifier
pub const UNKNOWN_SOURCE: &str = "unknown";

// =============================================================================
// Helper Functions
// =============================================================================

/// Look up the default range for a variable (case-insensitive)
pub fn default_range(variable: &str) -> Option<(f64, f64)> {
    let variable = variable.to_lowercase();
    DEFAULT_RANGES
        .iter()
        .find(|(name, _, _)| *name == variable)
        .map(|&(_, min, max)| (min, max))
}

/// Look up the default ramp rate for a variable (case-insensitive)
pub fn default_ramp_rate(variable: &str) -> Option<f64> {
    let variable = variable.to_lowercase();
    DEFAULT_RAMP_RATES
        .iter()
        .find(|(name, _)| *name == variable)
        .map(|&(_, rate)| rate)
}
