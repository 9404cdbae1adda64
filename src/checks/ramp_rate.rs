//! Ramp rate check: limits on the per-second rate of change.

use super::{Check, seconds_between};
use crate::config::{QcConfig, require_finite};
use crate::constants::{check_names, default_ramp_rate};
use crate::dataset::TimeSeries;
use crate::error::Result;
use crate::models::{Flag, Reason, Severity};
use tracing::debug;

/// Flags consecutive sample pairs changing faster than `{variable}_max_rate`
/// units per second
///
/// Falls back to [`crate::constants::DEFAULT_RAMP_RATES`]; variables with no
/// rate, series without a time coordinate and zero time steps are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct RampRateCheck;

impl RampRateCheck {
    /// Resolve the maximum rate for a variable
    pub fn max_rate(&self, variable: &str, config: &QcConfig) -> Result<Option<f64>> {
        let key = format!("{variable}_max_rate");
        config
            .param(self.name(), &key)
            .or_else(|| default_ramp_rate(variable))
            .map(|rate| require_finite(self.name(), &key, rate))
            .transpose()
    }
}

impl Check for RampRateCheck {
    fn name(&self) -> &str {
        check_names::RAMP_RATE
    }

    fn description(&self) -> &str {
        "Flags values with physically implausible rates of change"
    }

    fn run(&self, variable: &str, series: &TimeSeries<'_>, config: &QcConfig) -> Result<Vec<Flag>> {
        let mut flags = Vec::new();
        let Some(max_rate) = self.max_rate(variable, config)? else {
            debug!("No ramp rate defined for {}", variable);
            return Ok(flags);
        };

        let values = series.values;
        if values.len() < 2 {
            return Ok(flags);
        }
        let Some(times) = series.times else {
            return Ok(flags);
        };

        for index in 1..values.len().min(times.len()) {
            let (previous, current) = (values[index - 1], values[index]);
            if previous.is_nan() || current.is_nan() {
                continue;
            }

            let elapsed = seconds_between(times[index - 1], times[index]);
            if elapsed == 0.0 {
                continue;
            }

            let rate = (current - previous).abs() / elapsed;
            if rate > max_rate {
                flags.push(Flag::new(
                    Some(times[index]),
                    variable,
                    Severity::Suspect,
                    Reason::RAMP_RATE,
                    self.name(),
                    format!("Excessive ramp rate: {rate:.4}/s (max: {max_rate:.4}/s)"),
                ));
            }
        }

        Ok(flags)
    }
}
