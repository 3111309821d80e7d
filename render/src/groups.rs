//! Rule group assembly shared by both formats.

use crate::{RenderError, RenderResult};
use serde::Serialize;
use slo_core::{CompilationResult, Rule};

/// Header written on top of every rendered document.
pub(crate) fn header() -> String {
    format!(
        "---\n# Code generated by slo-render ({}).\n# DO NOT EDIT.\n\n",
        env!("CARGO_PKG_VERSION")
    )
}

/// A named Prometheus rule group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleGroup<'a> {
    pub name: String,
    pub rules: &'a [Rule],
}

/// Group the rules of every SLO, skipping empty groups.
///
/// Fails when no group has any rule.
pub fn rule_groups(result: &CompilationResult) -> RenderResult<Vec<RuleGroup<'_>>> {
    let mut groups = Vec::new();
    for slo_result in &result.slo_results {
        let id = &slo_result.slo.id;
        let rules = &slo_result.prometheus_rules;
        let candidates = [
            ("sloth-slo-sli-recordings", &rules.sli_error_rec_rules),
            ("sloth-slo-meta-recordings", &rules.metadata_rec_rules),
            ("sloth-slo-alerts", &rules.alert_rules),
        ];
        for (prefix, rules) in candidates {
            if rules.is_empty() {
                continue;
            }
            groups.push(RuleGroup {
                name: format!("{}-{}", prefix, id),
                rules,
            });
        }
    }

    if groups.is_empty() {
        return Err(RenderError::NoRules);
    }
    Ok(groups)
}
