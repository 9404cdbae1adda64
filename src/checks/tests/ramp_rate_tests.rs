//! Tests for the ramp rate check

use super::*;
use crate::checks::{Check, RampRateCheck};
use crate::config::QcConfig;
use crate::dataset::TimeSeries;
use crate::models::{Reason, Severity};

#[test]
fn test_flags_excessive_wind_speed_change() {
    // 10-minute sampling; default limit is 5 m/s per 10 minutes
    let times = regular_times(5, 10);
    let values = [5.0, 6.0, 15.0, 14.0, 14.5];
    let series = TimeSeries::new("wind_speed", Some(&times), &values);

    let flags = RampRateCheck
        .run("wind_speed", &series, &QcConfig::new())
        .unwrap();

    assert_eq!(flags.len(), 1);
    assert_eq!(flags[0].timestamp, Some(times[2]));
    assert_eq!(flags[0].severity, Severity::Suspect);
    assert_eq!(flags[0].reason, Reason::RAMP_RATE);
    assert_eq!(
        flags[0].message,
        "Excessive ramp rate: 0.0150/s (max: 0.0083/s)"
    );
}

#[test]
fn test_change_at_limit_is_accepted() {
    let times = regular_times(3, 10);
    let values = [0.0, 5.0, 10.0];
    let series = TimeSeries::new("wind_speed", Some(&times), &values);

    let flags = RampRateCheck
        .run("wind_speed", &series, &QcConfig::new())
        .unwrap();

    assert!(flags.is_empty());
}

#[test]
fn test_nan_pairs_are_skipped() {
    let times = regular_times(4, 10);
    let values = [0.0, f64::NAN, 40.0, 40.0];
    let series = TimeSeries::new("wind_speed", Some(&times), &values);

    let flags = RampRateCheck
        .run("wind_speed", &series, &QcConfig::new())
        .unwrap();

    assert!(flags.is_empty());
}

#[test]
fn test_zero_time_step_is_skipped() {
    let mut times = regular_times(3, 60);
    times[1] = times[0];
    let values = [10.0, 30.0, 30.0];
    let series = TimeSeries::new("temperature", Some(&times), &values);

    let flags = RampRateCheck
        .run("temperature", &series, &QcConfig::new())
        .unwrap();

    assert!(flags.is_empty());
}

#[test]
fn test_variable_without_rate_is_a_no_op() {
    let times = regular_times(3, 1);
    let values = [0.0, 359.0, 0.0];
    let series = TimeSeries::new("wind_direction", Some(&times), &values);

    let flags = RampRateCheck
        .run("wind_direction", &series, &QcConfig::new())
        .unwrap();

    assert!(flags.is_empty());
}

#[test]
fn test_configured_rate_for_custom_variable() {
    let times = regular_times(3, 60);
    let values = [50.0, 60.0, 95.0];
    let series = TimeSeries::new("humidity", Some(&times), &values);
    let config = QcConfig::new().with_param("ramp_rate", "humidity_max_rate", 20.0 / 3600.0);

    let flags = RampRateCheck.run("humidity", &series, &config).unwrap();

    assert_eq!(flags.len(), 1);
    assert_eq!(flags[0].timestamp, Some(times[2]));
}

#[test]
fn test_requires_time_coordinate() {
    let values = [0.0, 100.0];
    let series = TimeSeries::new("wind_speed", None, &values);

    let flags = RampRateCheck
        .run("wind_speed", &series, &QcConfig::new())
        .unwrap();

    assert!(flags.is_empty());
}

#[test]
fn test_max_rate_resolution() {
    let config = QcConfig::new().with_param("ramp_rate", "pressure_max_rate", 0.5);

    assert_eq!(RampRateCheck.max_rate("pressure", &config).unwrap(), Some(0.5));
    assert_eq!(
        RampRateCheck.max_rate("Temperature", &config).unwrap(),
        Some(5.0 / 3600.0)
    );
    assert_eq!(RampRateCheck.max_rate("visibility", &config).unwrap(), None);
}
