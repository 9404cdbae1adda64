//! Quality scoring derived from a report.
//!
//! The score is one minus the mean per-flag severity penalty, clamped at
//! zero and rounded to three decimals. A report without flags scores 1.0.

use crate::constants::severity_weights;
use crate::models::{Flag, Severity};
use crate::report::QcReport;
use indexmap::IndexMap;

/// Penalty weight for one flag of the given severity
pub fn severity_weight(severity: Severity) -> f64 {
    match severity {
        Severity::Good => severity_weights::GOOD,
        Severity::Suspect => severity_weights::SUSPECT,
        Severity::Bad => severity_weights::BAD,
        Severity::Missing => severity_weights::MISSING,
    }
}

fn score_flags<'a>(flags: impl IntoIterator<Item = &'a Flag>) -> f64 {
    let (count, penalty) = flags
        .into_iter()
        .fold((0usize, 0.0), |(count, penalty), flag| {
            (count + 1, penalty + severity_weight(flag.severity))
        });

    if count == 0 {
        return 1.0;
    }

    let score = (1.0 - penalty / count as f64).max(0.0);
    (score * 1000.0).round() / 1000.0
}

/// Overall score between 0.0 (poor) and 1.0 (no findings)
pub fn compute_quality_score(report: &QcReport) -> f64 {
    score_flags(report.flags())
}

/// Score per checked variable, in `variables_checked` order
pub fn compute_variable_scores(report: &QcReport) -> IndexMap<String, f64> {
    report
        .variables_checked
        .iter()
        .map(|variable| {
            let score = score_flags(report.flags_for_variable(variable));
            (variable.clone(), score)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Reason;

    fn flag(variable: &str, severity: Severity) -> Flag {
        Flag::new(None, variable, severity, Reason::NONE, "test_check", "")
    }

    #[test]
    fn test_empty_report_scores_one() {
        assert_eq!(compute_quality_score(&QcReport::new("empty")), 1.0);
    }

    #[test]
    fn test_mean_penalty() {
        let mut report = QcReport::new("mixed");
        report.add_flag(flag("wind_speed", Severity::Suspect));
        report.add_flag(flag("wind_speed", Severity::Bad));
        report.add_flag(flag("temperature", Severity::Missing));

        // 1 - (0.1 + 0.5 + 0.3) / 3
        assert_eq!(compute_quality_score(&report), 0.7);
    }

    #[test]
    fn test_good_flags_do_not_penalize() {
        let mut report = QcReport::new("good");
        report.add_flag(flag("wind_speed", Severity::Good));

        assert_eq!(compute_quality_score(&report), 1.0);
    }

    #[test]
    fn test_rounding_to_three_decimals() {
        let mut report = QcReport::new("rounding");
        for _ in 0..2 {
            report.add_flag(flag("wind_speed", Severity::Suspect));
        }
        report.add_flag(flag("wind_speed", Severity::Good));

        // 1 - 0.2 / 3 = 0.93333...
        assert_eq!(compute_quality_score(&report), 0.933);
    }

    #[test]
    fn test_variable_scores() {
        let mut report = QcReport::new("vars").with_variables(vec![
            "wind_speed".into(),
            "humidity".into(),
            "temperature".into(),
        ]);
        report.add_flag(flag("wind_speed", Severity::Bad));
        report.add_flag(flag("temperature", Severity::Suspect));
        report.add_flag(flag("temperature", Severity::Missing));

        let scores = compute_variable_scores(&report);

        assert_eq!(
            scores.keys().collect::<Vec<_>>(),
            vec!["wind_speed", "humidity", "temperature"]
        );
        assert_eq!(scores["wind_speed"], 0.5);
        assert_eq!(scores["humidity"], 1.0);
        assert_eq!(scores["temperature"], 0.8);
    }
}
