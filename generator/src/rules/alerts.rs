//! Multiwindow multi-burn-rate alert rules.

use super::{identity_labels, sli_error_metric, slo_selector, SLO_SEVERITY_LABEL, SLO_WINDOW_LABEL};
use crate::{AlertWindows, Window};
use slo_core::{AlertMeta, Rule, Slo};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
enum Severity {
    Page,
    Ticket,
}

impl Severity {
    fn as_str(&self) -> &'static str {
        match self {
            Severity::Page => "page",
            Severity::Ticket => "ticket",
        }
    }
}

/// Page and ticket alerts for an SLO, skipping disabled ones.
///
/// `extra_labels` are the generator-wide labels; they override per-alert
/// labels the same way they override SLO labels.
pub(crate) fn alert_rules(
    slo: &Slo,
    windows: &AlertWindows,
    extra_labels: &BTreeMap<String, String>,
) -> Vec<Rule> {
    let mut rules = Vec::with_capacity(2);
    if !slo.page_alert_meta.disable {
        rules.push(alert_rule(
            slo,
            &slo.page_alert_meta,
            Severity::Page,
            (&windows.page_quick, &windows.page_slow),
            windows,
            extra_labels,
        ));
    }
    if !slo.ticket_alert_meta.disable {
        rules.push(alert_rule(
            slo,
            &slo.ticket_alert_meta,
            Severity::Ticket,
            (&windows.ticket_quick, &windows.ticket_slow),
            windows,
            extra_labels,
        ));
    }
    rules
}

fn alert_rule(
    slo: &Slo,
    meta: &AlertMeta,
    severity: Severity,
    (quick, slow): (&Window, &Window),
    windows: &AlertWindows,
    extra_labels: &BTreeMap<String, String>,
) -> Rule {
    // SLO labels < alert labels < extra labels < identity labels.
    let mut labels = slo.labels.clone();
    labels.extend(meta.labels.iter().map(|(k, v)| (k.clone(), v.clone())));
    labels.extend(extra_labels.iter().map(|(k, v)| (k.clone(), v.clone())));
    labels.extend(identity_labels(slo));
    labels.insert(SLO_SEVERITY_LABEL.to_string(), severity.as_str().to_string());

    let mut annotations = default_annotations(severity);
    annotations.extend(meta.annotations.iter().map(|(k, v)| (k.clone(), v.clone())));

    let expr = format!(
        "(\n{}\n)\nor\n(\n{}\n)\n",
        window_condition(slo, quick, windows),
        window_condition(slo, slow, windows)
    );

    Rule::alerting(meta.name.clone(), expr, labels, annotations)
}

/// Both windows of a pair must burn above the pair's factor.
fn window_condition(slo: &Slo, window: &Window, windows: &AlertWindows) -> String {
    let threshold = format!(
        "({} * {})",
        window.burn_rate_factor(windows.slo_period),
        slo.error_budget_ratio()
    );
    let selector = slo_selector(slo);
    let over = |w| {
        format!(
            "    max({}{} > {}) without ({})",
            sli_error_metric(w),
            selector,
            threshold,
            SLO_WINDOW_LABEL
        )
    };
    format!(
        "{}\n    and\n{}",
        over(window.short_window),
        over(window.long_window)
    )
}

fn default_annotations(severity: Severity) -> BTreeMap<String, String> {
    let mut annotations = BTreeMap::new();
    annotations.insert(
        "summary".to_string(),
        "{{$labels.sloth_service}} {{$labels.sloth_slo}} SLO error budget burn rate is over expected."
            .to_string(),
    );
    annotations.insert(
        "title".to_string(),
        format!(
            "({}) {{{{$labels.sloth_service}}}} {{{{$labels.sloth_slo}}}} SLO error budget burn rate is too fast.",
            severity.as_str()
        ),
    );
    annotations
}
