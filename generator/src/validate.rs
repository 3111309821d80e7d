//! Semantic validation of generic specification documents.

use crate::{GeneratorError, GeneratorResult, QueryTemplates};
use regex_lite::Regex;
use slo_core::prometheus_v1::{Sli, Slo, Spec};
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

/// Service and SLO names end up in label values and rule group names.
const NAME_PATTERN: &str = r"^[a-zA-Z0-9][a-zA-Z0-9_.\-]*$";
const LABEL_NAME_PATTERN: &str = r"^[a-zA-Z_][a-zA-Z0-9_]*$";

fn name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(NAME_PATTERN).expect("name pattern is a valid regex"))
}

fn label_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(LABEL_NAME_PATTERN).expect("label pattern is a valid regex"))
}

/// Validate a specification before any rule is generated.
pub fn validate_spec(spec: &Spec, templates: &QueryTemplates) -> GeneratorResult<()> {
    if spec.service.is_empty() {
        return Err(GeneratorError::validation("service is required"));
    }
    if !name_regex().is_match(&spec.service) {
        return Err(GeneratorError::validation(format!(
            "invalid service name '{}'",
            spec.service
        )));
    }
    validate_labels("service", &spec.labels)?;

    if spec.slos.is_empty() {
        return Err(GeneratorError::validation("at least one SLO is required"));
    }

    let mut seen = HashSet::new();
    for slo in &spec.slos {
        if !seen.insert(slo.name.as_str()) {
            return Err(GeneratorError::validation(format!(
                "duplicate SLO name '{}'",
                slo.name
            )));
        }
        validate_slo(slo, templates)?;
    }
    Ok(())
}

fn validate_slo(slo: &Slo, templates: &QueryTemplates) -> GeneratorResult<()> {
    if slo.name.is_empty() {
        return Err(GeneratorError::validation("SLO name is required"));
    }
    if !name_regex().is_match(&slo.name) {
        return Err(GeneratorError::validation(format!(
            "invalid SLO name '{}'",
            slo.name
        )));
    }

    let context = |message: String| GeneratorError::validation(format!("SLO '{}': {}", slo.name, message));

    if !(slo.objective > 0.0 && slo.objective <= 100.0) {
        return Err(context(format!(
            "objective must be in (0, 100], got {}",
            slo.objective
        )));
    }

    validate_sli(&slo.sli, templates).map_err(context)?;

    validate_labels(&slo.name, &slo.labels)?;
    validate_labels(&slo.name, &slo.alerting.labels)?;
    validate_labels(&slo.name, &slo.alerting.page_alert.labels)?;
    validate_labels(&slo.name, &slo.alerting.ticket_alert.labels)?;

    let alerts_enabled = !slo.alerting.page_alert.disable || !slo.alerting.ticket_alert.disable;
    if alerts_enabled && slo.alerting.name.is_empty() {
        return Err(context("alerting name is required when alerts are enabled".to_string()));
    }
    Ok(())
}

fn validate_sli(sli: &Sli, templates: &QueryTemplates) -> Result<(), String> {
    let kinds = [sli.events.is_some(), sli.raw.is_some(), sli.plugin.is_some()]
        .iter()
        .filter(|set| **set)
        .count();
    match kinds {
        0 => return Err("an SLI (events, raw or plugin) is required".to_string()),
        1 => {}
        _ => return Err("only one SLI type (events, raw or plugin) can be set".to_string()),
    }

    let check_query = |field: &str, query: &str| -> Result<(), String> {
        if query.trim().is_empty() {
            return Err(format!("{} is required", field));
        }
        templates
            .validate(query)
            .map_err(|e| format!("{}: {}", field, e))?;
        if !templates.references_window(query) {
            return Err(format!("{} must use the {{{{.window}}}} template variable", field));
        }
        Ok(())
    };

    if let Some(events) = &sli.events {
        check_query("error_query", &events.error_query)?;
        check_query("total_query", &events.total_query)?;
    }
    if let Some(raw) = &sli.raw {
        check_query("error_ratio_query", &raw.error_ratio_query)?;
    }
    if let Some(plugin) = &sli.plugin {
        if plugin.id.trim().is_empty() {
            return Err("plugin id is required".to_string());
        }
    }
    Ok(())
}

fn validate_labels(owner: &str, labels: &BTreeMap<String, String>) -> GeneratorResult<()> {
    match labels.keys().find(|k| !label_name_regex().is_match(k)) {
        Some(invalid) => Err(GeneratorError::validation(format!(
            "'{}': invalid label name '{}'",
            owner, invalid
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slo_core::prometheus_v1::{Alert, Alerting, SliEvents, SliPlugin, SliRaw, VERSION};

    fn events_slo(name: &str) -> Slo {
        Slo {
            name: name.to_string(),
            description: String::new(),
            objective: 99.9,
            labels: BTreeMap::new(),
            sli: Sli {
                events: Some(SliEvents {
                    error_query: "sum(rate(errors[{{.window}}]))".to_string(),
                    total_query: "sum(rate(total[{{.window}}]))".to_string(),
                }),
                ..Sli::default()
            },
            alerting: Alerting {
                name: "HighErrorRate".to_string(),
                ..Alerting::default()
            },
        }
    }

    fn spec(slos: Vec<Slo>) -> Spec {
        Spec {
            version: VERSION.to_string(),
            service: "myservice".to_string(),
            labels: BTreeMap::new(),
            slos,
        }
    }

    fn check(spec: &Spec) -> GeneratorResult<()> {
        validate_spec(spec, &QueryTemplates::new())
    }

    #[test]
    fn test_valid_spec() {
        assert!(check(&spec(vec![events_slo("availability")])).is_ok());
    }

    #[test]
    fn test_service_rules() {
        let mut s = spec(vec![events_slo("a")]);
        s.service = String::new();
        assert!(check(&s).is_err());
        s.service = "my service".to_string();
        assert!(check(&s).unwrap_err().to_string().contains("invalid service name"));
    }

    #[test]
    fn test_requires_slos() {
        let err = check(&spec(vec![])).unwrap_err();
        assert!(err.to_string().contains("at least one SLO"));
    }

    #[test]
    fn test_duplicate_slo_names() {
        let err = check(&spec(vec![events_slo("a"), events_slo("a")])).unwrap_err();
        assert!(err.to_string().contains("duplicate SLO name 'a'"));
    }

    #[test]
    fn test_objective_range() {
        for objective in [0.0, -1.0, 100.1] {
            let mut slo = events_slo("a");
            slo.objective = objective;
            assert!(check(&spec(vec![slo])).is_err(), "objective {}", objective);
        }
        let mut slo = events_slo("a");
        slo.objective = 100.0;
        assert!(check(&spec(vec![slo])).is_ok());
    }

    #[test]
    fn test_sli_kind_count() {
        let mut slo = events_slo("a");
        slo.sli.raw = Some(SliRaw {
            error_ratio_query: "x[{{.window}}]".to_string(),
        });
        assert!(check(&spec(vec![slo])).unwrap_err().to_string().contains("only one SLI"));

        let mut slo = events_slo("a");
        slo.sli = Sli::default();
        assert!(check(&spec(vec![slo])).unwrap_err().to_string().contains("is required"));
    }

    #[test]
    fn test_queries_must_use_window() {
        let mut slo = events_slo("a");
        slo.sli.events = Some(SliEvents {
            error_query: "sum(rate(errors[5m]))".to_string(),
            total_query: "sum(rate(total[{{.window}}]))".to_string(),
        });
        let err = check(&spec(vec![slo])).unwrap_err();
        assert!(err.to_string().contains("error_query must use the {{.window}}"));
    }

    #[test]
    fn test_plugin_sli_is_not_window_checked() {
        let mut slo = events_slo("a");
        slo.sli = Sli {
            plugin: Some(SliPlugin {
                id: "test/plugin".to_string(),
                options: BTreeMap::new(),
            }),
            ..Sli::default()
        };
        assert!(check(&spec(vec![slo])).is_ok());
    }

    #[test]
    fn test_invalid_label_name() {
        let mut slo = events_slo("a");
        slo.labels.insert("bad-label".to_string(), "x".to_string());
        assert!(check(&spec(vec![slo])).unwrap_err().to_string().contains("bad-label"));
    }

    #[test]
    fn test_alert_name_required_only_when_alerting() {
        let mut slo = events_slo("a");
        slo.alerting.name = String::new();
        assert!(check(&spec(vec![slo.clone()])).is_err());

        slo.alerting.page_alert = Alert {
            disable: true,
            ..Alert::default()
        };
        slo.alerting.ticket_alert = Alert {
            disable: true,
            ..Alert::default()
        };
        assert!(check(&spec(vec![slo])).is_ok());
    }
}
