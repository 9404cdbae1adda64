//! Gap detection: missing samples and irregular sampling.

use super::{Check, seconds_between};
use crate::config::QcConfig;
use crate::constants::{DEFAULT_GAP_MULTIPLIER, check_names};
use crate::dataset::TimeSeries;
use crate::error::Result;
use crate::models::{Flag, Reason, Severity};
use tracing::debug;

/// Flags NaN samples (MISSING) and time steps longer than
/// `gap_multiplier` times the median step (SUSPECT)
///
/// Both passes need a time coordinate; series without one yield no flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct GapCheck;

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Render a duration as `H:MM:SS[.ffffff]`, prefixed with whole days when present
///
/// Days are floored, so a negative duration reads `-1 day, 23:59:59`.
pub(crate) fn format_duration(seconds: f64) -> String {
    const MICROS_PER_SECOND: i64 = 1_000_000;
    const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SECOND;

    let total = (seconds * 1e6).round() as i64;
    let days = total.div_euclid(MICROS_PER_DAY);
    let remainder = total.rem_euclid(MICROS_PER_DAY);

    let micros = remainder % MICROS_PER_SECOND;
    let whole = remainder / MICROS_PER_SECOND;
    let (hours, minutes, secs) = (whole / 3_600, (whole % 3_600) / 60, whole % 60);

    let mut text = String::new();
    if days != 0 {
        let unit = if days.abs() == 1 { "day" } else { "days" };
        text.push_str(&format!("{days} {unit}, "));
    }
    text.push_str(&format!("{hours}:{minutes:02}:{secs:02}"));
    if micros != 0 {
        text.push_str(&format!(".{micros:06}"));
    }
    text
}

impl Check for GapCheck {
    fn name(&self) -> &str {
        check_names::GAP
    }

    fn description(&self) -> &str {
        "Identifies missing data and unexpected gaps"
    }

    fn run(&self, variable: &str, series: &TimeSeries<'_>, config: &QcConfig) -> Result<Vec<Flag>> {
        let gap_multiplier = self.finite_param(config, "gap_multiplier", DEFAULT_GAP_MULTIPLIER)?;

        let mut flags = Vec::new();
        let Some(times) = series.times else {
            debug!("No time coordinate for {}, skipping gap check", variable);
            return Ok(flags);
        };

        for (index, value) in series.values.iter().enumerate() {
            if value.is_nan() {
                flags.push(Flag::new(
                    times.get(index).copied(),
                    variable,
                    Severity::Missing,
                    Reason::GAP,
                    self.name(),
                    "Missing value (NaN)",
                ));
            }
        }

        if times.len() < 2 {
            return Ok(flags);
        }

        let deltas: Vec<f64> = times
            .windows(2)
            .map(|pair| seconds_between(pair[0], pair[1]))
            .collect();
        let threshold = median(&mut deltas.clone()) * gap_multiplier;

        for (offset, &delta) in deltas.iter().enumerate() {
            if delta > threshold {
                flags.push(Flag::new(
                    Some(times[offset + 1]),
                    variable,
                    Severity::Suspect,
                    Reason::GAP,
                    self.name(),
                    format!("Time gap detected: {}", format_duration(delta)),
                ));
            }
        }

        Ok(flags)
    }
}
