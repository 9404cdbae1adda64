//! Stuck sensor detection.

use super::Check;
use crate::config::QcConfig;
use crate::constants::{DEFAULT_MIN_STUCK_COUNT, DEFAULT_STUCK_TOLERANCE, check_names};
use crate::dataset::TimeSeries;
use crate::error::Result;
use crate::models::{Flag, Reason, Severity};

/// Flags every sample of a run of near-identical values
///
/// A run starts at a non-NaN sample and extends while each following sample
/// is strictly within `tolerance` of the run's first value. A NaN ends a run
/// and is never the start of one.
#[derive(Debug, Clone, Copy, Default)]
pub struct StuckSensorCheck;

impl Check for StuckSensorCheck {
    fn name(&self) -> &str {
        check_names::STUCK_SENSOR
    }

    fn description(&self) -> &str {
        "Identifies sequences of identical values indicating sensor freeze"
    }

    fn run(&self, variable: &str, series: &TimeSeries<'_>, config: &QcConfig) -> Result<Vec<Flag>> {
        let min_stuck_count = self.count_param(config, "min_stuck_count", DEFAULT_MIN_STUCK_COUNT)?;
        let tolerance = self.finite_param(config, "tolerance", DEFAULT_STUCK_TOLERANCE)?;

        let values = series.values;
        let mut flags = Vec::new();
        if values.len() < min_stuck_count {
            return Ok(flags);
        }

        let mut start = 0;
        while start < values.len() {
            let first = values[start];
            if first.is_nan() {
                start += 1;
                continue;
            }

            // NaN comparisons are false, so a NaN terminates the run
            let mut end = start + 1;
            while end < values.len() && (values[end] - first).abs() < tolerance {
                end += 1;
            }

            let run_length = end - start;
            if run_length >= min_stuck_count {
                for index in start..end {
                    flags.push(Flag::new(
                        series.time_at(index),
                        variable,
                        Severity::Suspect,
                        Reason::STUCK_SENSOR,
                        self.name(),
                        format!("Stuck sensor: {run_length} identical values"),
                    ));
                }
            }

            start = end;
        }

        Ok(flags)
    }
}
