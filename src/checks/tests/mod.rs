//! Unit tests for the built-in checks
//!
//! Each detector gets its own file; shared fixtures live here.

pub mod ramp_rate_tests;
pub mod stuck_sensor_tests;

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Start of every test series
pub fn test_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// `n` timestamps spaced `step_minutes` apart
pub fn regular_times(n: usize, step_minutes: i64) -> Vec<DateTime<Utc>> {
    (0..n)
        .map(|i| test_epoch() + Duration::minutes(step_minutes * i as i64))
        .collect()
}

/// `n` hourly timestamps
pub fn hourly_times(n: usize) -> Vec<DateTime<Utc>> {
    regular_times(n, 60)
}
