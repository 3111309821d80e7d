//! Prometheus rule computation.
//!
//! Every SLO yields three rule sets:
//! - SLI error ratio recordings, one per rate window plus the SLO period
//! - Metadata recordings (objective, error budget, burn rates, info)
//! - Multiwindow multi-burn-rate alerts

mod alerts;
mod metadata;
mod sli;

pub(crate) use alerts::alert_rules;
pub(crate) use metadata::metadata_recording_rules;
pub(crate) use sli::sli_recording_rules;

use slo_core::{PromDuration, Slo};
use std::collections::BTreeMap;

pub const SLO_ID_LABEL: &str = "sloth_id";
pub const SLO_SERVICE_LABEL: &str = "sloth_service";
pub const SLO_NAME_LABEL: &str = "sloth_slo";
pub const SLO_WINDOW_LABEL: &str = "sloth_window";
pub const SLO_SEVERITY_LABEL: &str = "sloth_severity";

/// Recording name of the SLI error ratio for a window.
pub fn sli_error_metric(window: PromDuration) -> String {
    format!("slo:sli_error:ratio_rate{}", window)
}

/// Identity labels every rule of an SLO carries.
pub(crate) fn identity_labels(slo: &Slo) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    labels.insert(SLO_ID_LABEL.to_string(), slo.id.clone());
    labels.insert(SLO_SERVICE_LABEL.to_string(), slo.service.clone());
    labels.insert(SLO_NAME_LABEL.to_string(), slo.name.clone());
    labels
}

/// SLO labels plus identity labels; identity labels cannot be overridden.
pub(crate) fn rule_labels(slo: &Slo) -> BTreeMap<String, String> {
    let mut labels = slo.labels.clone();
    labels.extend(identity_labels(slo));
    labels
}

/// PromQL selector matching the recordings of one SLO.
pub(crate) fn slo_selector(slo: &Slo) -> String {
    format!(
        "{{{}=\"{}\", {}=\"{}\", {}=\"{}\"}}",
        SLO_ID_LABEL, slo.id, SLO_SERVICE_LABEL, slo.service, SLO_NAME_LABEL, slo.name
    )
}
