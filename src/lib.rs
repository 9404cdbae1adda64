//! Sensor QC Library
//!
//! Automated quality control for time-stamped meteorological sensor series
//! (wind speed and direction, temperature, pressure, humidity).
//!
//! This library provides:
//! - A pluggable [`Check`] abstraction with an ordered [`CheckRegistry`]
//! - Six built-in detectors: range, spike, stuck sensor, gap, ramp rate and
//!   wind direction wrap
//! - A [`QcEngine`] that runs the variable x check cross product and merges
//!   the findings into one [`QcReport`]
//! - Report queries, reviewer operations and a plain-data (JSON) shape
//! - Quality scoring derived from a report
//!
//! Everything runs synchronously over a fully materialized, in-memory
//! [`Dataset`].
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use sensor_qc::{Dataset, QcEngine, compute_quality_score};
//!
//! # fn main() -> sensor_qc::Result<()> {
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let times = (0..10).map(|h| start + Duration::hours(h)).collect();
//! let dataset = Dataset::new()
//!     .with_source("mast_07.nc")
//!     .with_time(times)?
//!     .with_variable("wind_speed", vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 100.0, 0.0])?;
//!
//! let report = QcEngine::new().run(&dataset, None, Some(&["range_check"]))?;
//! assert_eq!(report.total_flags(), 1);
//! println!("score: {}", compute_quality_score(&report));
//! # Ok(())
//! # }
//! ```

pub mod checks;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;
pub mod registry;
pub mod report;
pub mod scoring;

// Re-export commonly used types
pub use checks::{
    Check, GapCheck, RampRateCheck, RangeCheck, SpikeCheck, StuckSensorCheck,
    WindDirectionWrapCheck,
};
pub use config::QcConfig;
pub use dataset::{Dataset, TimeSeries, Variable};
pub use engine::QcEngine;
pub use error::{QcError, Result};
pub use logging::init_logging;
pub use models::{Flag, Reason, Severity};
pub use registry::CheckRegistry;
pub use report::QcReport;
pub use scoring::{compute_quality_score, compute_variable_scores};
