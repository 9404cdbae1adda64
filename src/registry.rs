//! Check registration and lookup.
//!
//! The registry is an insertion-ordered map from check name to
//! implementation. Iteration order is execution order, so report contents
//! depend on it: re-registering a name replaces the check in place and
//! unregistering keeps the remaining order intact.

use crate::checks::{Check, built_in_checks};
use indexmap::IndexMap;
use std::fmt;
use tracing::{debug, warn};

/// Ordered collection of named checks
#[derive(Default)]
pub struct CheckRegistry {
    checks: IndexMap<String, Box<dyn Check>>,
}

impl fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckRegistry")
            .field("checks", &self.list_checks())
            .finish()
    }
}

impl CheckRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the six built-in checks in their fixed order
    pub fn with_built_ins() -> Self {
        let mut registry = Self::new();
        for check in built_in_checks() {
            registry.register_boxed(check);
        }
        registry
    }

    /// Register a check, replacing any check with the same name
    pub fn register<C: Check + 'static>(&mut self, check: C) {
        self.register_boxed(Box::new(check));
    }

    pub fn register_boxed(&mut self, check: Box<dyn Check>) {
        let name = check.name().to_string();
        if self.checks.insert(name.clone(), check).is_some() {
            debug!("Replaced registered check '{}'", name);
        } else {
            debug!("Registered check '{}'", name);
        }
    }

    /// Remove a check, returning it if it was registered
    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn Check>> {
        self.checks.shift_remove(name)
    }

    pub fn get_check(&self, name: &str) -> Option<&dyn Check> {
        self.checks.get(name).map(|check| check.as_ref())
    }

    /// Resolve checks to run
    ///
    /// `None` returns every check in registration order. A list returns the
    /// matching checks in the order requested; unknown names are dropped.
    pub fn get_checks(&self, names: Option<&[&str]>) -> Vec<&dyn Check> {
        match names {
            None => self.checks.values().map(|check| check.as_ref()).collect(),
            Some(names) => names
                .iter()
                .filter_map(|name| {
                    let check = self.get_check(name);
                    if check.is_none() {
                        warn!("Ignoring unknown check '{}'", name);
                    }
                    check
                })
                .collect(),
        }
    }

    /// Registered names in registration order
    pub fn list_checks(&self) -> Vec<&str> {
        self.checks.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.checks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{GapCheck, RangeCheck, SpikeCheck};
    use crate::config::QcConfig;
    use crate::dataset::TimeSeries;
    use crate::error::Result;
    use crate::models::Flag;

    struct NamedCheck(&'static str, &'static str);

    impl Check for NamedCheck {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            self.1
        }

        fn run(&self, _: &str, _: &TimeSeries<'_>, _: &QcConfig) -> Result<Vec<Flag>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_built_in_registration_order() {
        let registry = CheckRegistry::with_built_ins();

        assert_eq!(registry.len(), 6);
        assert_eq!(
            registry.list_checks(),
            vec![
                "range_check",
                "spike_check",
                "stuck_sensor",
                "gap_check",
                "ramp_rate",
                "wind_direction_wrap"
            ]
        );
    }

    #[test]
    fn test_get_checks_preserves_requested_order_and_drops_unknown() {
        let registry = CheckRegistry::with_built_ins();

        let checks = registry.get_checks(Some(&["gap_check", "nonexistent", "range_check"]));
        let names: Vec<_> = checks.iter().map(|c| c.name()).collect();

        assert_eq!(names, vec!["gap_check", "range_check"]);
        assert!(registry.get_checks(Some(&[])).is_empty());
    }

    #[test]
    fn test_get_check_lookup() {
        let registry = CheckRegistry::with_built_ins();

        assert_eq!(
            registry.get_check("spike_check").map(|c| c.name()),
            Some("spike_check")
        );
        assert!(registry.get_check("nonexistent").is_none());
        assert!(registry.contains("ramp_rate"));
    }

    #[test]
    fn test_reregistering_keeps_position() {
        let mut registry = CheckRegistry::new();
        registry.register(RangeCheck);
        registry.register(SpikeCheck);
        registry.register(GapCheck);
        registry.register(NamedCheck("spike_check", "replacement"));

        assert_eq!(
            registry.list_checks(),
            vec!["range_check", "spike_check", "gap_check"]
        );
        assert_eq!(
            registry.get_check("spike_check").unwrap().description(),
            "replacement"
        );
    }

    #[test]
    fn test_unregister_keeps_remaining_order() {
        let mut registry = CheckRegistry::with_built_ins();

        let removed = registry.unregister("spike_check");
        assert_eq!(removed.map(|c| c.name().to_string()), Some("spike_check".into()));
        assert!(registry.unregister("spike_check").is_none());

        assert_eq!(
            registry.list_checks(),
            vec![
                "range_check",
                "stuck_sensor",
                "gap_check",
                "ramp_rate",
                "wind_direction_wrap"
            ]
        );
    }

    #[test]
    fn test_custom_check_appends() {
        let mut registry = CheckRegistry::with_built_ins();
        registry.register(NamedCheck("battery_voltage", "Logger supply check"));

        assert_eq!(registry.list_checks().last(), Some(&"battery_voltage"));
        assert!(!registry.is_empty());
    }
}
