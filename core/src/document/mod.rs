//! Specification documents and the origin tag attached to every result.

pub mod k8s_v1;
pub mod prometheus_v1;
mod scalar;

use serde::{Deserialize, Serialize};

/// The document a compilation result was built from.
///
/// The variant decides how the result is rendered: generic documents become
/// plain rule files, Kubernetes resources become `PrometheusRule` objects
/// carrying the resource's metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OriginalSource {
    #[serde(rename = "SlothV1")]
    Generic(prometheus_v1::Spec),
    #[serde(rename = "K8sSlothV1")]
    Kubernetes(k8s_v1::PrometheusServiceLevel),
}

impl OriginalSource {
    /// Format identifier of the source document.
    pub fn spec_version(&self) -> &'static str {
        match self {
            OriginalSource::Generic(_) => prometheus_v1::VERSION,
            OriginalSource::Kubernetes(_) => k8s_v1::API_VERSION,
        }
    }

    /// The source as a generic document, converting Kubernetes resources.
    pub fn to_prometheus_spec(&self) -> prometheus_v1::Spec {
        match self {
            OriginalSource::Generic(spec) => spec.clone(),
            OriginalSource::Kubernetes(psl) => psl.to_prometheus_spec(),
        }
    }

    /// Kubernetes metadata, present only for orchestrator resources.
    pub fn kubernetes_meta(&self) -> Option<&k8s_v1::ObjectMeta> {
        match self {
            OriginalSource::Generic(_) => None,
            OriginalSource::Kubernetes(psl) => Some(&psl.metadata),
        }
    }
}
