//! Wind direction continuity across the 0/360 degree boundary.

use super::Check;
use crate::config::QcConfig;
use crate::constants::{DEFAULT_MAX_ANGULAR_CHANGE, check_names};
use crate::dataset::TimeSeries;
use crate::error::Result;
use crate::models::{Flag, Reason, Severity};

/// Flags consecutive direction samples whose shortest circular difference
/// exceeds `max_angular_change`
///
/// The difference lies in (-180, 180], so the default threshold of 180
/// degrees never fires; callers opt in by configuring a smaller value.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindDirectionWrapCheck;

impl WindDirectionWrapCheck {
    /// Signed shortest angular step from `from` to `to`, in (-180, 180]
    pub fn angular_difference(from: f64, to: f64) -> f64 {
        let diff = (to - from).rem_euclid(360.0);
        if diff > 180.0 { diff - 360.0 } else { diff }
    }
}

impl Check for WindDirectionWrapCheck {
    fn name(&self) -> &str {
        check_names::DIRECTION_WRAP
    }

    fn description(&self) -> &str {
        "Validates wind direction continuity using circular statistics"
    }

    fn is_applicable(&self, variable: &str, _series: &TimeSeries<'_>) -> bool {
        let variable = variable.to_lowercase();
        variable.contains("direction") || variable.contains("dir")
    }

    fn run(&self, variable: &str, series: &TimeSeries<'_>, config: &QcConfig) -> Result<Vec<Flag>> {
        let max_change =
            self.finite_param(config, "max_angular_change", DEFAULT_MAX_ANGULAR_CHANGE)?;

        let values = series.values;
        let mut flags = Vec::new();

        for index in 1..values.len() {
            let (previous, current) = (values[index - 1], values[index]);
            if previous.is_nan() || current.is_nan() {
                continue;
            }

            let diff = Self::angular_difference(previous, current);
            if diff.abs() > max_change {
                flags.push(Flag::new(
                    series.time_at(index),
                    variable,
                    Severity::Suspect,
                    Reason::DIRECTION_WRAP,
                    self.name(),
                    format!("Large direction change: {diff:.1}° (max: {max_change}°)"),
                ));
            }
        }

        Ok(flags)
    }
}
