//! Prometheus Operator `PrometheusRule` output.

use crate::groups::{header, rule_groups, RuleGroup};
use crate::{RenderError, RenderResult};
use serde::Serialize;
use slo_core::{k8s_v1::ObjectMeta, CompilationResult};
use std::collections::BTreeMap;

const API_VERSION: &str = "monitoring.coreos.com/v1";
const KIND: &str = "PrometheusRule";

/// Metadata of the rendered resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct K8sMeta {
    pub name: String,
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
}

impl From<&ObjectMeta> for K8sMeta {
    fn from(meta: &ObjectMeta) -> Self {
        Self {
            name: meta.name.clone(),
            namespace: meta.namespace.clone(),
            labels: meta.labels.clone(),
            annotations: meta.annotations.clone(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PrometheusRule<'a> {
    api_version: &'static str,
    kind: &'static str,
    metadata: ResourceMeta<'a>,
    spec: PrometheusRuleSpec<'a>,
}

#[derive(Serialize)]
struct ResourceMeta<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    namespace: &'a str,
    labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    annotations: &'a BTreeMap<String, String>,
}

#[derive(Serialize)]
struct PrometheusRuleSpec<'a> {
    groups: Vec<RuleGroup<'a>>,
}

fn resource_labels(meta: &K8sMeta) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    labels.insert("app.kubernetes.io/component".to_string(), "SLO".to_string());
    labels.insert("app.kubernetes.io/managed-by".to_string(), "sloth".to_string());
    labels.extend(meta.labels.iter().map(|(k, v)| (k.clone(), v.clone())));
    labels
}

/// Render a result as a `PrometheusRule` resource with the given metadata.
pub fn render_prometheus_operator(meta: &K8sMeta, result: &CompilationResult) -> RenderResult<String> {
    if meta.name.is_empty() {
        return Err(RenderError::MissingName);
    }

    let resource = PrometheusRule {
        api_version: API_VERSION,
        kind: KIND,
        metadata: ResourceMeta {
            name: &meta.name,
            namespace: &meta.namespace,
            labels: resource_labels(meta),
            annotations: &meta.annotations,
        },
        spec: PrometheusRuleSpec {
            groups: rule_groups(result)?,
        },
    };
    let body = serde_yaml::to_string(&resource)?;
    Ok(header() + &body)
}
