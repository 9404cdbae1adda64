//! Configuration management and validation.
//!
//! A [`QcConfig`] is a two-level mapping: check name, then parameter name,
//! then a scalar threshold. Absent entries fall back to each check's
//! built-in defaults (see [`crate::constants`]). Reading configuration
//! files is left to the caller; the type deserializes directly from a
//! document shaped like `{"spike_check": {"window_size": 7}}`.

use crate::error::{QcError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Parameters for a single check, keyed by parameter name
pub type CheckParams = BTreeMap<String, f64>;

/// Per-check threshold configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QcConfig {
    checks: BTreeMap<String, CheckParams>,
}

impl QcConfig {
    /// Create an empty configuration (every check uses its defaults)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter and return the configuration
    pub fn with_param(mut self, check: &str, key: &str, value: f64) -> Self {
        self.set_param(check, key, value);
        self
    }

    /// Set a parameter in place, overwriting any previous value
    pub fn set_param(&mut self, check: &str, key: &str, value: f64) {
        self.checks
            .entry(check.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    /// Look up `config[check][key]`
    pub fn param(&self, check: &str, key: &str) -> Option<f64> {
        self.checks.get(check)?.get(key).copied()
    }

    /// All parameters configured for one check
    pub fn check_params(&self, check: &str) -> Option<&CheckParams> {
        self.checks.get(check)
    }

    /// Names of checks that carry at least one parameter
    pub fn configured_checks(&self) -> impl Iterator<Item = &str> {
        self.checks.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.checks.values().all(|params| params.is_empty())
    }

    /// Merge `other` on top of this configuration; `other` wins per parameter
    pub fn merge(mut self, other: QcConfig) -> Self {
        for (check, params) in other.checks {
            let target = self.checks.entry(check).or_default();
            for (key, value) in params {
                debug!("Config override {}: {}", key, value);
                target.insert(key, value);
            }
        }
        self
    }
}

/// Validate that a threshold is a finite number
pub fn require_finite(check: &str, key: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(QcError::invalid_parameter(
            check,
            key,
            value,
            "must be a finite number",
        ))
    }
}

/// Validate that a parameter is a non-negative whole number and convert it
pub fn require_count(check: &str, key: &str, value: f64) -> Result<usize> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return Err(QcError::invalid_parameter(
            check,
            key,
            value,
            "must be a non-negative whole number",
        ));
    }
    Ok(value as usize)
}
