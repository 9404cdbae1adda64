//! Pluggable quality control checks.
//!
//! Every detector implements [`Check`]: a stable registry name, a
//! human-readable description, an applicability gate and a `run` method that
//! turns one variable's series into an ordered list of [`Flag`]s.
//!
//! - [`range`] - physical limits per variable
//! - [`spike`] - rolling-window z-score outliers
//! - [`stuck_sensor`] - runs of near-identical values
//! - [`gap`] - missing samples and sampling discontinuities
//! - [`ramp_rate`] - implausible rates of change
//! - [`direction_wrap`] - circular steps in direction variables

pub mod direction_wrap;
pub mod gap;
pub mod ramp_rate;
pub mod range;
pub mod spike;
pub mod stuck_sensor;

#[cfg(test)]
pub mod tests;

pub use direction_wrap::WindDirectionWrapCheck;
pub use gap::GapCheck;
pub use ramp_rate::RampRateCheck;
pub use range::RangeCheck;
pub use spike::SpikeCheck;
pub use stuck_sensor::StuckSensorCheck;

use crate::config::{QcConfig, require_count, require_finite};
use crate::dataset::TimeSeries;
use crate::error::Result;
use crate::models::Flag;
use chrono::{DateTime, Utc};

/// A self-contained detector applied to one variable's series
pub trait Check: Send + Sync {
    /// Unique identifier, used as registry key and as each flag's `check_name`
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Whether the check should run for this variable
    fn is_applicable(&self, _variable: &str, _series: &TimeSeries<'_>) -> bool {
        true
    }

    /// Inspect a series and report findings in sample order
    fn run(&self, variable: &str, series: &TimeSeries<'_>, config: &QcConfig)
    -> Result<Vec<Flag>>;

    /// Look up `config[self.name()][key]`, falling back to `default`
    fn get_config_value(&self, config: &QcConfig, key: &str, default: f64) -> f64 {
        config.param(self.name(), key).unwrap_or(default)
    }

    /// Configured value that must be finite
    fn finite_param(&self, config: &QcConfig, key: &str, default: f64) -> Result<f64> {
        require_finite(self.name(), key, self.get_config_value(config, key, default))
    }

    /// Configured value that must be a non-negative whole number
    fn count_param(&self, config: &QcConfig, key: &str, default: usize) -> Result<usize> {
        require_count(
            self.name(),
            key,
            self.get_config_value(config, key, default as f64),
        )
    }
}

/// The six built-in checks in registration order
pub fn built_in_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(RangeCheck),
        Box::new(SpikeCheck),
        Box::new(StuckSensorCheck),
        Box::new(GapCheck),
        Box::new(RampRateCheck),
        Box::new(WindDirectionWrapCheck),
    ]
}

/// Signed elapsed time in seconds, at nanosecond precision where it fits
pub(crate) fn seconds_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    let delta = later - earlier;
    match delta.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1e9,
        None => delta.num_milliseconds() as f64 / 1e3,
    }
}
