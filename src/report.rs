//! QC report: the flags and summary of one engine run.
//!
//! Flags are kept in execution order (variable, then check, then each
//! check's own order). Summary counts are derived on demand and never
//! stored. After a run the owner may review flags: accepting one clears its
//! `auto_generated` marker, rejecting one removes it for good.
//!
//! The plain-data shape produced by [`QcReport::to_dict`] is:
//!
//! ```text
//! { filepath, created_at, variables_checked, checks_run, total_flags,
//!   flags_by_severity, flags_by_check, flags: [...], metadata }
//! ```

use crate::error::{QcError, Result};
use crate::models::iso8601::{self, format_timestamp};
use crate::models::{Flag, Severity};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use tracing::debug;

/// Container for the results of one QC run
#[derive(Debug, Clone, PartialEq)]
pub struct QcReport {
    pub filepath: String,
    pub created_at: DateTime<Utc>,
    pub variables_checked: Vec<String>,
    pub checks_run: Vec<String>,
    flags: Vec<Flag>,
    pub metadata: Map<String, Value>,
}

/// Wire shape accepted by [`QcReport::from_dict`]; derived counts are ignored
#[derive(Deserialize)]
struct ReportDocument {
    filepath: String,
    #[serde(deserialize_with = "iso8601::deserialize")]
    created_at: DateTime<Utc>,
    #[serde(default)]
    variables_checked: Vec<String>,
    #[serde(default)]
    checks_run: Vec<String>,
    #[serde(default)]
    flags: Vec<Flag>,
    #[serde(default)]
    metadata: Map<String, Value>,
}

fn flag_to_dict(flag: &Flag) -> Value {
    json!({
        "timestamp": flag.timestamp.as_ref().map(format_timestamp),
        "variable": flag.variable,
        "severity": flag.severity.name(),
        "reason": flag.reason.name(),
        "check_name": flag.check_name,
        "message": flag.message,
        "auto_generated": flag.auto_generated,
    })
}

impl QcReport {
    pub fn new(filepath: impl Into<String>) -> Self {
        Self {
            filepath: filepath.into(),
            created_at: Utc::now(),
            variables_checked: Vec::new(),
            checks_run: Vec::new(),
            flags: Vec::new(),
            metadata: Map::new(),
        }
    }

    pub fn with_variables(mut self, variables: Vec<String>) -> Self {
        self.variables_checked = variables;
        self
    }

    pub fn with_checks(mut self, checks: Vec<String>) -> Self {
        self.checks_run = checks;
        self
    }

    pub fn add_flag(&mut self, flag: Flag) {
        self.flags.push(flag);
    }

    pub fn extend_flags(&mut self, flags: impl IntoIterator<Item = Flag>) {
        self.flags.extend(flags);
    }

    /// All flags in execution order
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    pub fn total_flags(&self) -> usize {
        self.flags.len()
    }

    /// Flag counts keyed by severity name; only severities present appear
    pub fn flags_by_severity(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for flag in &self.flags {
            *counts.entry(flag.severity.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Flag counts keyed by check name
    pub fn flags_by_check(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for flag in &self.flags {
            *counts.entry(flag.check_name.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn flags_for_variable(&self, variable: &str) -> Vec<&Flag> {
        self.flags.iter().filter(|f| f.variable == variable).collect()
    }

    pub fn flags_for_check(&self, check_name: &str) -> Vec<&Flag> {
        self.flags
            .iter()
            .filter(|f| f.check_name == check_name)
            .collect()
    }

    pub fn flags_with_severity(&self, severity: Severity) -> Vec<&Flag> {
        self.flags.iter().filter(|f| f.severity == severity).collect()
    }

    /// Highest severity present, if any flag exists
    pub fn worst_severity(&self) -> Option<Severity> {
        self.flags.iter().map(|f| f.severity).max()
    }

    /// Confirm a flag as reviewed; returns false for an out-of-range index
    pub fn accept_flag(&mut self, index: usize) -> bool {
        match self.flags.get_mut(index) {
            Some(flag) => {
                flag.confirm();
                true
            }
            None => false,
        }
    }

    /// Remove a flag permanently, returning it if the index was valid
    pub fn reject_flag(&mut self, index: usize) -> Option<Flag> {
        if index < self.flags.len() {
            let flag = self.flags.remove(index);
            debug!(
                "Rejected {} flag from {} on {}",
                flag.severity, flag.check_name, flag.variable
            );
            Some(flag)
        } else {
            None
        }
    }

    /// Convert to the plain-data wire shape
    pub fn to_dict(&self) -> Value {
        json!({
            "filepath": self.filepath,
            "created_at": format_timestamp(&self.created_at),
            "variables_checked": self.variables_checked,
            "checks_run": self.checks_run,
            "total_flags": self.total_flags(),
            "flags_by_severity": self.flags_by_severity(),
            "flags_by_check": self.flags_by_check(),
            "flags": self.flags.iter().map(flag_to_dict).collect::<Vec<_>>(),
            "metadata": self.metadata,
        })
    }

    /// Rebuild a report from the wire shape produced by [`Self::to_dict`]
    pub fn from_dict(value: &Value) -> Result<Self> {
        let document = ReportDocument::deserialize(value)
            .map_err(|e| QcError::invalid_report(e.to_string()))?;

        Ok(Self {
            filepath: document.filepath,
            created_at: document.created_at,
            variables_checked: document.variables_checked,
            checks_run: document.checks_run,
            flags: document.flags,
            metadata: document.metadata,
        })
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_dict())?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_dict(&value)
    }
}
