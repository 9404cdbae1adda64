//! Range check: values must fall within physically plausible limits.

use super::Check;
use crate::config::{QcConfig, require_finite};
use crate::constants::{check_names, default_range};
use crate::dataset::TimeSeries;
use crate::error::Result;
use crate::models::{Flag, Reason, Severity};
use tracing::debug;

/// Flags samples outside inclusive `[min, max]` bounds
///
/// Bounds come from `"{variable}_min"` / `"{variable}_max"`, falling back to
/// [`crate::constants::DEFAULT_RANGES`]. Either bound may be absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeCheck;

impl RangeCheck {
    fn bound(
        &self,
        config: &QcConfig,
        key: String,
        default: Option<f64>,
    ) -> Result<Option<f64>> {
        config
            .param(self.name(), &key)
            .or(default)
            .map(|value| require_finite(self.name(), &key, value))
            .transpose()
    }

    /// Resolve (min, max) for a variable
    pub fn bounds(&self, variable: &str, config: &QcConfig) -> Result<(Option<f64>, Option<f64>)> {
        let defaults = default_range(variable);
        let min = self.bound(config, format!("{variable}_min"), defaults.map(|(min, _)| min))?;
        let max = self.bound(config, format!("{variable}_max"), defaults.map(|(_, max)| max))?;
        Ok((min, max))
    }
}

impl Check for RangeCheck {
    fn name(&self) -> &str {
        check_names::RANGE
    }

    fn description(&self) -> &str {
        "Validates that values are within physically plausible limits"
    }

    fn run(&self, variable: &str, series: &TimeSeries<'_>, config: &QcConfig) -> Result<Vec<Flag>> {
        let (min, max) = self.bounds(variable, config)?;
        if min.is_none() && max.is_none() {
            debug!("No range defined for {}", variable);
            return Ok(Vec::new());
        }

        let mut flags = Vec::new();
        for (index, &value) in series.values.iter().enumerate() {
            if value.is_nan() {
                continue;
            }

            let message = match (min, max) {
                (Some(min), _) if value < min => format!("Value {value} below minimum {min}"),
                (_, Some(max)) if value > max => format!("Value {value} above maximum {max}"),
                _ => continue,
            };

            flags.push(Flag::new(
                series.time_at(index),
                variable,
                Severity::Bad,
                Reason::RANGE_CHECK,
                self.name(),
                message,
            ));
        }

        Ok(flags)
    }
}
