//! SLO metadata recording rules.

use super::{rule_labels, sli_error_metric, slo_selector};
use slo_core::{PromDuration, Rule, Slo};

/// Value of the `sloth_mode` info label.
const GENERATOR_MODE: &str = "lib-gen";

pub(crate) fn metadata_recording_rules(
    slo: &Slo,
    shortest_window: PromDuration,
    spec_version: &str,
) -> Vec<Rule> {
    let labels = rule_labels(slo);
    let selector = slo_selector(slo);

    let burn_rate = |window: PromDuration| {
        format!(
            "{}{}\n/ on({}, {}, {}) group_left\nslo:error_budget:ratio{}\n",
            sli_error_metric(window),
            selector,
            super::SLO_ID_LABEL,
            super::SLO_NAME_LABEL,
            super::SLO_SERVICE_LABEL,
            selector
        )
    };

    let mut info_labels = labels.clone();
    info_labels.insert("sloth_version".to_string(), env!("CARGO_PKG_VERSION").to_string());
    info_labels.insert("sloth_mode".to_string(), GENERATOR_MODE.to_string());
    info_labels.insert("sloth_spec".to_string(), spec_version.to_string());
    info_labels.insert("sloth_objective".to_string(), slo.objective.to_string());

    vec![
        Rule::recording(
            "slo:objective:ratio",
            format!("vector({})", slo.objective_ratio()),
            labels.clone(),
        ),
        Rule::recording(
            "slo:error_budget:ratio",
            format!("vector(1-{})", slo.objective_ratio()),
            labels.clone(),
        ),
        Rule::recording(
            "slo:time_period:days",
            format!("vector({})", slo.time_window.as_days()),
            labels.clone(),
        ),
        Rule::recording(
            "slo:current_burn_rate:ratio",
            burn_rate(shortest_window),
            labels.clone(),
        ),
        Rule::recording(
            "slo:period_burn_rate:ratio",
            burn_rate(slo.time_window),
            labels.clone(),
        ),
        Rule::recording(
            "slo:period_error_budget_remaining:ratio",
            format!("1 - slo:period_burn_rate:ratio{}", selector),
            labels,
        ),
        Rule::recording("sloth_slo_info", "vector(1)", info_labels),
    ]
}
