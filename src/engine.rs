//! QC engine: orchestrates checks over a dataset.
//!
//! For every requested variable, in order, the engine runs every selected
//! check, in order, whose applicability gate accepts the variable, and
//! appends the resulting flags to a single report.
//!
//! A requested variable missing from the dataset is skipped without error.
//! A check that fails aborts the whole run and its error is returned
//! unchanged; no partial report is produced.

use crate::checks::Check;
use crate::config::QcConfig;
use crate::constants::UNKNOWN_SOURCE;
use crate::dataset::Dataset;
use crate::error::{QcError, Result};
use crate::models::Flag;
use crate::registry::CheckRegistry;
use crate::report::QcReport;
use std::time::Instant;
use tracing::{debug, info};

/// Runs registered checks against datasets
///
/// Holds only the registry and a static configuration, so one engine can be
/// reused across any number of sequential runs.
#[derive(Debug)]
pub struct QcEngine {
    config: QcConfig,
    registry: CheckRegistry,
}

impl Default for QcEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl QcEngine {
    /// Engine with the built-in checks and default thresholds
    pub fn new() -> Self {
        Self::with_config(QcConfig::default())
    }

    /// Engine with the built-in checks and the given thresholds
    pub fn with_config(config: QcConfig) -> Self {
        Self {
            config,
            registry: CheckRegistry::with_built_ins(),
        }
    }

    pub fn config(&self) -> &QcConfig {
        &self.config
    }

    pub fn registry(&self) -> &CheckRegistry {
        &self.registry
    }

    /// Mutable access for registering custom checks
    pub fn registry_mut(&mut self) -> &mut CheckRegistry {
        &mut self.registry
    }

    /// Run checks over a dataset
    ///
    /// `variables`: `None` (or an empty list) checks every variable in the
    /// dataset. `checks`: `None` runs every registered check; a list runs
    /// only the known names in the order given.
    pub fn run(
        &self,
        dataset: &Dataset,
        variables: Option<&[&str]>,
        checks: Option<&[&str]>,
    ) -> Result<QcReport> {
        let start_time = Instant::now();

        let variables_to_check: Vec<String> = match variables {
            Some(names) if !names.is_empty() => names.iter().map(|n| n.to_string()).collect(),
            _ => dataset.variable_names(),
        };
        let checks_to_run = self.registry.get_checks(checks);

        info!(
            "Running {} checks on {} variables",
            checks_to_run.len(),
            variables_to_check.len()
        );

        let mut report = QcReport::new(dataset.source().unwrap_or(UNKNOWN_SOURCE))
            .with_variables(variables_to_check.clone())
            .with_checks(checks_to_run.iter().map(|c| c.name().to_string()).collect());

        for variable in &variables_to_check {
            let Some(series) = dataset.series(variable) else {
                debug!("Variable '{}' not in dataset, skipping", variable);
                continue;
            };

            for check in &checks_to_run {
                if !check.is_applicable(variable, &series) {
                    debug!("{} not applicable to {}", check.name(), variable);
                    continue;
                }

                let flags = check.run(variable, &series, &self.config)?;
                debug!(
                    "{} on {}: {} flags",
                    check.name(),
                    variable,
                    flags.len()
                );
                report.extend_flags(flags);
            }
        }

        info!(
            "QC complete: {} flags in {}ms",
            report.total_flags(),
            start_time.elapsed().as_millis()
        );
        Ok(report)
    }

    /// Run one named check directly on one variable
    pub fn run_single_check(
        &self,
        check_name: &str,
        dataset: &Dataset,
        variable: &str,
    ) -> Result<Vec<Flag>> {
        let check: &dyn Check = self.registry.get_check(check_name).ok_or_else(|| {
            QcError::UnknownCheck {
                name: check_name.to_string(),
            }
        })?;
        let series = dataset
            .series(variable)
            .ok_or_else(|| QcError::VariableNotFound {
                variable: variable.to_string(),
            })?;

        check.run(variable, &series, &self.config)
    }
}
