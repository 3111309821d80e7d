//! `sloth.slok.dev/v1` `PrometheusServiceLevel` resources.
//!
//! Same content as the generic format, camelCased and wrapped in Kubernetes
//! object metadata. Results built from this format are rendered as
//! `PrometheusRule` resources carrying that metadata.

use super::prometheus_v1;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const API_VERSION: &str = "sloth.slok.dev/v1";
pub const KIND: &str = "PrometheusServiceLevel";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrometheusServiceLevel {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    pub spec: ServiceLevelSpec,
}

/// The subset of Kubernetes object metadata carried into rendered resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLevelSpec {
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
#[serde(rename_all = "camelCase")]
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

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sli {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<SliEvents>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<SliRaw>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<SliPlugin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliEvents {
    pub error_query: String,
    pub total_query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliRaw {
    pub error_ratio_query: String,
}

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
#[serde(rename_all = "camelCase")]
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

impl PrometheusServiceLevel {
    /// Map the resource onto the generic document the generator works with.
    pub fn to_prometheus_spec(&self) -> prometheus_v1::Spec {
        prometheus_v1::Spec {
            version: prometheus_v1::VERSION.to_string(),
            service: self.spec.service.clone(),
            labels: self.spec.labels.clone(),
            slos: self.spec.slos.iter().map(Slo::to_prometheus).collect(),
        }
    }
}

impl Slo {
    fn to_prometheus(&self) -> prometheus_v1::Slo {
        prometheus_v1::Slo {
            name: self.name.clone(),
            description: self.description.clone(),
            objective: self.objective,
            labels: self.labels.clone(),
            sli: prometheus_v1::Sli {
                events: self.sli.events.as_ref().map(|e| prometheus_v1::SliEvents {
                    error_query: e.error_query.clone(),
                    total_query: e.total_query.clone(),
                }),
                raw: self.sli.raw.as_ref().map(|r| prometheus_v1::SliRaw {
                    error_ratio_query: r.error_ratio_query.clone(),
                }),
                plugin: self.sli.plugin.as_ref().map(|p| prometheus_v1::SliPlugin {
                    id: p.id.clone(),
                    options: p.options.clone(),
                }),
            },
            alerting: prometheus_v1::Alerting {
                name: self.alerting.name.clone(),
                labels: self.alerting.labels.clone(),
                annotations: self.alerting.annotations.clone(),
                page_alert: self.alerting.page_alert.to_prometheus(),
                ticket_alert: self.alerting.ticket_alert.to_prometheus(),
            },
        }
    }
}

impl Alert {
    fn to_prometheus(&self) -> prometheus_v1::Alert {
        prometheus_v1::Alert {
            disable: self.disable,
            labels: self.labels.clone(),
            annotations: self.annotations.clone(),
        }
    }
}
