//! Spike detection using a trailing rolling window.

use super::Check;
use crate::config::QcConfig;
use crate::constants::{DEFAULT_SPIKE_THRESHOLD_MULTIPLIER, DEFAULT_SPIKE_WINDOW_SIZE, check_names};
use crate::dataset::TimeSeries;
use crate::error::Result;
use crate::models::{Flag, Reason, Severity};

/// Flags samples whose z-score against the preceding window is too large
///
/// For index `i` the window is the `window_size` samples `i - window_size
/// .. i`, NaNs dropped. Windows with fewer than two valid samples or zero
/// spread are skipped. Candidates run from `window_size` up to but
/// excluding the final sample, so the last sample is never flagged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpikeCheck;

/// Mean and population standard deviation
fn mean_std(window: &[f64]) -> (f64, f64) {
    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;
    let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

impl Check for SpikeCheck {
    fn name(&self) -> &str {
        check_names::SPIKE
    }

    fn description(&self) -> &str {
        "Identifies sudden unrealistic jumps in values"
    }

    fn run(&self, variable: &str, series: &TimeSeries<'_>, config: &QcConfig) -> Result<Vec<Flag>> {
        let window_size = self.count_param(config, "window_size", DEFAULT_SPIKE_WINDOW_SIZE)?;
        let threshold = self.finite_param(
            config,
            "threshold_multiplier",
            DEFAULT_SPIKE_THRESHOLD_MULTIPLIER,
        )?;

        let values = series.values;
        let mut flags = Vec::new();
        if values.len() < window_size {
            return Ok(flags);
        }

        let mut window = Vec::with_capacity(window_size);
        for index in window_size..values.len().saturating_sub(1) {
            window.clear();
            window.extend(
                values[index - window_size..index]
                    .iter()
                    .copied()
                    .filter(|v| !v.is_nan()),
            );
            if window.len() < 2 {
                continue;
            }

            let (mean, std) = mean_std(&window);
            if std == 0.0 {
                continue;
            }

            let value = values[index];
            if value.is_nan() {
                continue;
            }

            let z_score = (value - mean).abs() / std;
            if z_score > threshold {
                flags.push(Flag::new(
                    series.time_at(index),
                    variable,
                    Severity::Bad,
                    Reason::SPIKE,
                    self.name(),
                    format!("Spike detected: z-score={z_score:.2}"),
                ));
            }
        }

        Ok(flags)
    }
}
