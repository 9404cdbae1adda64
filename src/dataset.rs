//! In-memory dataset and time-series views.
//!
//! A [`Dataset`] maps variable names to 1-D sample arrays aligned on one
//! shared (optional) time coordinate. Checks receive a borrowed
//! [`TimeSeries`] view of a single variable, so they cannot mutate the data
//! they inspect. NaN marks a missing sample.
//!
//! Datasets can be assembled by hand or converted from an in-memory Polars
//! `DataFrame`; reading files from disk is left to the caller.

use crate::error::{QcError, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// Borrowed view of one variable and its time coordinate
#[derive(Debug, Clone, Copy)]
pub struct TimeSeries<'a> {
    pub name: &'a str,
    pub times: Option<&'a [DateTime<Utc>]>,
    pub values: &'a [f64],
    pub units: &'a str,
}

impl<'a> TimeSeries<'a> {
    pub fn new(name: &'a str, times: Option<&'a [DateTime<Utc>]>, values: &'a [f64]) -> Self {
        Self {
            name,
            times,
            values,
            units: "",
        }
    }

    pub fn with_units(mut self, units: &'a str) -> Self {
        self.units = units;
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn has_time(&self) -> bool {
        self.times.is_some()
    }

    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Timestamp of a sample, or `None` when there is no time coordinate
    pub fn time_at(&self, index: usize) -> Option<DateTime<Utc>> {
        self.times.and_then(|times| times.get(index).copied())
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.times.and_then(|times| times.first().copied())
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.times.and_then(|times| times.last().copied())
    }

    /// Sub-view over `start..end`, clamped to the bounds of both arrays
    pub fn slice(&self, start: usize, end: usize) -> TimeSeries<'a> {
        let clamp = |len: usize| {
            let end = end.min(len);
            start.min(end)..end
        };
        TimeSeries {
            name: self.name,
            times: self.times.map(|times| &times[clamp(times.len())]),
            values: &self.values[clamp(self.values.len())],
            units: self.units,
        }
    }
}

/// Sample array and descriptive attributes of one variable
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variable {
    pub values: Vec<f64>,
    pub units: String,
    pub attributes: BTreeMap<String, String>,
}

impl Variable {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            ..Default::default()
        }
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }
}

/// Named variables aligned on a shared time coordinate
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    source: Option<String>,
    times: Option<Vec<DateTime<Utc>>>,
    variables: IndexMap<String, Variable>,
    pub metadata: BTreeMap<String, String>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where the data came from (copied onto reports as `filepath`)
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach the shared time coordinate
    pub fn with_time(mut self, times: Vec<DateTime<Utc>>) -> Result<Self> {
        if let Some((name, variable)) = self
            .variables
            .iter()
            .find(|(_, variable)| variable.values.len() != times.len())
        {
            return Err(QcError::LengthMismatch {
                variable: name.clone(),
                values: variable.values.len(),
                times: times.len(),
            });
        }
        self.times = Some(times);
        Ok(self)
    }

    pub fn with_variable(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        self.add_variable(name, Variable::new(values))?;
        Ok(self)
    }

    /// Insert or replace a variable; its length must match the dataset
    pub fn add_variable(&mut self, name: impl Into<String>, variable: Variable) -> Result<()> {
        let name = name.into();
        if let Some(expected) = self.expected_len(&name) {
            if variable.values.len() != expected {
                return Err(QcError::LengthMismatch {
                    variable: name,
                    values: variable.values.len(),
                    times: expected,
                });
            }
        }
        self.variables.insert(name, variable);
        Ok(())
    }

    fn expected_len(&self, replacing: &str) -> Option<usize> {
        match &self.times {
            Some(times) => Some(times.len()),
            None => self
                .variables
                .iter()
                .find(|(name, _)| name.as_str() != replacing)
                .map(|(_, variable)| variable.values.len()),
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn times(&self) -> Option<&[DateTime<Utc>]> {
        self.times.as_deref()
    }

    /// Variable names in insertion order
    pub fn variable_names(&self) -> Vec<String> {
        self.variables.keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Borrowed view of one variable
    pub fn series(&self, name: &str) -> Option<TimeSeries<'_>> {
        self.variables
            .get_key_value(name)
            .map(|(name, variable)| TimeSeries {
                name: name.as_str(),
                times: self.times.as_deref(),
                values: &variable.values,
                units: &variable.units,
            })
    }

    /// Number of variables
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Build a dataset from a Polars frame
    ///
    /// `time_column` must have a datetime dtype and no nulls. Every other
    /// numeric column becomes a variable cast to `f64`, with nulls mapped to
    /// NaN; non-numeric columns are skipped.
    pub fn from_dataframe(df: &DataFrame, time_column: &str) -> Result<Self> {
        let times = datetime_values(df.column(time_column)?)?;
        let mut dataset = Dataset::new().with_time(times)?;

        for column in df.get_columns() {
            let name = column.name().as_str();
            if name == time_column {
                continue;
            }
            if !is_numeric(column.dtype()) {
                debug!(
                    "Skipping non-numeric column '{}' ({})",
                    name,
                    column.dtype()
                );
                continue;
            }
            dataset.add_variable(name, Variable::new(float_values(column)?))?;
        }

        debug!(
            "Built dataset with {} variables over {} timestamps",
            dataset.len(),
            df.height()
        );
        Ok(dataset)
    }
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float64
            | DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::UInt64
            | DataType::UInt32
    )
}

fn float_values(column: &Column) -> Result<Vec<f64>> {
    let cast = column.cast(&DataType::Float64)?;
    let values = cast
        .as_materialized_series()
        .f64()?
        .into_iter()
        .map(|value| value.unwrap_or(f64::NAN))
        .collect();
    Ok(values)
}

fn datetime_values(column: &Column) -> Result<Vec<DateTime<Utc>>> {
    let unit = match column.dtype() {
        DataType::Datetime(unit, _) => *unit,
        other => {
            return Err(QcError::invalid_dataset(format!(
                "time column '{}' must be a datetime, found {}",
                column.name(),
                other
            )));
        }
    };

    let ticks = column.cast(&DataType::Int64)?;
    ticks
        .as_materialized_series()
        .i64()?
        .into_iter()
        .enumerate()
        .map(|(row, tick)| {
            tick.and_then(|tick| from_ticks(tick, unit)).ok_or_else(|| {
                QcError::invalid_dataset(format!(
                    "time column '{}' has a null or out-of-range value at row {}",
                    column.name(),
                    row
                ))
            })
        })
        .collect()
}

fn from_ticks(tick: i64, unit: TimeUnit) -> Option<DateTime<Utc>> {
    match unit {
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(tick)),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(tick),
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(tick),
    }
}
