//! Plain Prometheus rule file output.

use crate::groups::{header, rule_groups, RuleGroup};
use crate::RenderResult;
use serde::Serialize;
use slo_core::CompilationResult;

#[derive(Serialize)]
struct RuleFile<'a> {
    groups: Vec<RuleGroup<'a>>,
}

/// Render a result as a Prometheus rule file.
pub fn render_prometheus_std(result: &CompilationResult) -> RenderResult<String> {
    let file = RuleFile {
        groups: rule_groups(result)?,
    };
    let body = serde_yaml::to_string(&file)?;
    Ok(header() + &body)
}
