//! `prometheus/v1` specification documents.
//!
//! This is the generic format: it carries no orchestrator metadata and is
//! rendered as a plain Prometheus rule file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value of the `version` field identifying this format.
pub const VERSION: &str = "prometheus/v1";

/// A service with its SLOs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spec {
    pub version: String,
    pub service: String,
    #[serde(
        default,
        deserialize_with = "super::scalar::string_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub slos: Vec<Slo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slo {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub objective: f64,
    #[serde(
        default,
        deserialize_with = "super::scalar::string_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub labels: BTreeMap<String, String>,
    pub sli: Sli,
    #[serde(default)]
    pub alerting: Alerting,
}

/// SLI definition. Exactly one of the three kinds must be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sli {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<SliEvents>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<SliRaw>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<SliPlugin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliEvents {
    pub error_query: String,
    pub total_query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliRaw {
    pub error_ratio_query: String,
}

/// Reference to an SLI plugin loaded from an extension module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliPlugin {
    pub id: String,
    #[serde(
        default,
        deserialize_with = "super::scalar::string_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub options: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alerting {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "super::scalar::string_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub labels: BTreeMap<String, String>,
    #[serde(
        default,
        deserialize_with = "super::scalar::string_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub annotations: BTreeMap<String, String>,
    #[serde(default)]
    pub page_alert: Alert,
    #[serde(default)]
    pub ticket_alert: Alert,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(default)]
    pub disable: bool,
    #[serde(
        default,
        deserialize_with = "super::scalar::string_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub labels: BTreeMap<String, String>,
    #[serde(
        default,
        deserialize_with = "super::scalar::string_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub annotations: BTreeMap<String, String>,
}
