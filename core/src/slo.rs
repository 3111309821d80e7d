//! The resolved SLO model the rule generator works on.

use crate::{OriginalSource, PromDuration};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A group of SLOs coming from a single specification document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SloGroup {
    #[serde(rename = "SLOs")]
    pub slos: Vec<Slo>,
    #[serde(rename = "OriginalSource")]
    pub original_source: OriginalSource,
}

/// A single, fully resolved SLO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Slo {
    /// `<service>-<name>`, unique inside a group.
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub service: String,
    #[serde(rename = "SLI")]
    pub sli: Sli,
    pub time_window: PromDuration,
    /// Objective as a percentage, `(0, 100]`.
    pub objective: f64,
    pub labels: BTreeMap<String, String>,
    pub page_alert_meta: AlertMeta,
    pub ticket_alert_meta: AlertMeta,
}

impl Slo {
    /// Objective as a ratio (`99.9` → `0.999`).
    pub fn objective_ratio(&self) -> f64 {
        self.objective / 100.0
    }

    /// Error budget as a ratio (`99.9` → `0.001`).
    pub fn error_budget_ratio(&self) -> f64 {
        (100.0 - self.objective) / 100.0
    }
}

/// Resolved SLI. Plugin SLIs are resolved into raw SLIs before this point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Sli {
    Events(SliEvents),
    Raw(SliRaw),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SliEvents {
    pub error_query: String,
    pub total_query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SliRaw {
    pub error_ratio_query: String,
}

/// Alert metadata for one severity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlertMeta {
    pub disable: bool,
    pub name: String,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
}
