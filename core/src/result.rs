//! Compilation results.

use crate::{SloGroup, Slo, SloRules};
use serde::{Deserialize, Serialize};

/// Everything produced by compiling one specification document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationResult {
    #[serde(rename = "SLOGroup")]
    pub slo_group: SloGroup,
    #[serde(rename = "SLOResults")]
    pub slo_results: Vec<SloResult>,
}

/// The rules generated for one SLO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SloResult {
    #[serde(rename = "SLO")]
    pub slo: Slo,
    #[serde(rename = "PrometheusRules")]
    pub prometheus_rules: SloRules,
}

impl CompilationResult {
    /// Total number of generated rules across all SLOs.
    pub fn rule_count(&self) -> usize {
        self.slo_results
            .iter()
            .map(|r| r.prometheus_rules.len())
            .sum()
    }
}
