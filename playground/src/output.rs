//! Format selection for compiled results.

use crate::BridgeResult;
use slo_core::{CompilationResult, OriginalSource};
use slo_render::{render_prometheus_operator, render_prometheus_std, K8sMeta};

/// Rendered text, tagged with the format it was rendered in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedOutput {
    /// Plain Prometheus rule file.
    RuleFile(String),
    /// Prometheus Operator `PrometheusRule` resource.
    PrometheusRule(String),
}

impl RenderedOutput {
    pub fn text(&self) -> &str {
        match self {
            RenderedOutput::RuleFile(text) | RenderedOutput::PrometheusRule(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            RenderedOutput::RuleFile(text) | RenderedOutput::PrometheusRule(text) => text,
        }
    }
}

/// Render a result in the format matching where its specification came from.
pub fn render(result: &CompilationResult) -> BridgeResult<RenderedOutput> {
    match &result.slo_group.original_source {
        OriginalSource::Kubernetes(psl) => {
            let meta = K8sMeta::from(&psl.metadata);
            let text = render_prometheus_operator(&meta, result)?;
            Ok(RenderedOutput::PrometheusRule(text))
        }
        OriginalSource::Generic(_) => {
            let text = render_prometheus_std(result)?;
            Ok(RenderedOutput::RuleFile(text))
        }
    }
}
