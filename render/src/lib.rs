//! SLO Result Renderers
//!
//! Two output formats for a [`slo_core::CompilationResult`]:
//! - A plain Prometheus rule file (`groups:`)
//! - A Prometheus Operator `PrometheusRule` resource carrying Kubernetes metadata

mod error;
mod groups;
mod kubernetes;
mod prometheus;

pub use error::{RenderError, RenderResult};
pub use groups::{rule_groups, RuleGroup};
pub use kubernetes::{render_prometheus_operator, K8sMeta};
pub use prometheus::render_prometheus_std;
