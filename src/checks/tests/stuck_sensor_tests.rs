//! Tests for the stuck sensor check

use super::*;
use crate::checks::{Check, StuckSensorCheck};
use crate::config::QcConfig;
use crate::dataset::TimeSeries;
use crate::models::{Reason, Severity};

fn stuck_config(min_stuck_count: f64) -> QcConfig {
    QcConfig::new().with_param("stuck_sensor", "min_stuck_count", min_stuck_count)
}

#[test]
fn test_constant_series_flags_every_sample() {
    let values = vec![5.0; 10];
    let times = hourly_times(values.len());
    let series = TimeSeries::new("wind_speed", Some(&times), &values);

    let flags = StuckSensorCheck
        .run("wind_speed", &series, &stuck_config(6.0))
        .unwrap();

    assert_eq!(flags.len(), 10);
    for (flag, time) in flags.iter().zip(&times) {
        assert_eq!(flag.timestamp, Some(*time));
        assert_eq!(flag.severity, Severity::Suspect);
        assert_eq!(flag.reason, Reason::STUCK_SENSOR);
        assert_eq!(flag.message, "Stuck sensor: 10 identical values");
    }
}

#[test]
fn test_short_run_is_not_flagged() {
    let values = [1.0, 2.0, 5.0, 5.0, 5.0, 5.0, 5.0, 3.0, 4.0];
    let series = TimeSeries::new("wind_speed", None, &values);

    let flags = StuckSensorCheck
        .run("wind_speed", &series, &QcConfig::new())
        .unwrap();

    assert!(flags.is_empty());
}

#[test]
fn test_flag_count_equals_run_length() {
    let mut values: Vec<f64> = (0..20).map(|i| i as f64).collect();
    for value in values.iter_mut().skip(4).take(7) {
        *value = 12.5;
    }
    let times = hourly_times(values.len());
    let series = TimeSeries::new("temperature", Some(&times), &values);

    let flags = StuckSensorCheck
        .run("temperature", &series, &QcConfig::new())
        .unwrap();

    assert_eq!(flags.len(), 7);
    assert_eq!(flags.first().unwrap().timestamp, Some(times[4]));
    assert_eq!(flags.last().unwrap().timestamp, Some(times[10]));
}

#[test]
fn test_nan_breaks_a_run() {
    let values = [
        5.0,
        5.0,
        5.0,
        f64::NAN,
        5.0,
        5.0,
        5.0,
        5.0,
    ];
    let series = TimeSeries::new("wind_speed", None, &values);

    let flags = StuckSensorCheck
        .run("wind_speed", &series, &stuck_config(4.0))
        .unwrap();

    // Only the four samples after the NaN form a long enough run
    assert_eq!(flags.len(), 4);
    assert!(flags.iter().all(|f| f.message.contains("4 identical")));
}

#[test]
fn test_tolerance_is_measured_from_run_start() {
    let values = [1.0, 1.05, 1.09, 1.12, 1.12, 1.15];
    let series = TimeSeries::new("pressure", None, &values);
    let config = stuck_config(3.0).with_param("stuck_sensor", "tolerance", 0.1);

    let flags = StuckSensorCheck.run("pressure", &series, &config).unwrap();

    // 1.0, 1.05, 1.09 are within 0.1 of 1.0; 1.12 starts a new run of length 3
    assert_eq!(flags.len(), 6);
    assert!(flags[..3].iter().all(|f| f.message.contains("3 identical")));
}

#[test]
fn test_multiple_runs() {
    let mut values = vec![2.0; 6];
    values.extend([3.0, 4.0]);
    values.extend(vec![7.0; 6]);
    let series = TimeSeries::new("humidity", None, &values);

    let flags = StuckSensorCheck
        .run("humidity", &series, &QcConfig::new())
        .unwrap();

    assert_eq!(flags.len(), 12);
}

#[test]
fn test_all_nan_series() {
    let values = vec![f64::NAN; 8];
    let series = TimeSeries::new("humidity", None, &values);

    let flags = StuckSensorCheck
        .run("humidity", &series, &QcConfig::new())
        .unwrap();

    assert!(flags.is_empty());
}
