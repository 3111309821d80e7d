//! SLI error ratio recording rules.

use super::{rule_labels, sli_error_metric, slo_selector, SLO_WINDOW_LABEL};
use crate::resolve::PluginBinding;
use crate::{GeneratorError, GeneratorResult, QueryTemplates};
use slo_core::{PromDuration, Rule, Sli, Slo};

/// Build the SLI recordings for every rate window and the SLO period.
///
/// With `optimized` the period recording averages the shortest window
/// recording instead of evaluating the SLI over the whole period. Plugin
/// SLIs are rendered by their plugin for each window.
pub(crate) fn sli_recording_rules(
    slo: &Slo,
    plugin: Option<&PluginBinding<'_>>,
    windows: &[PromDuration],
    templates: &QueryTemplates,
    optimized: bool,
) -> GeneratorResult<Vec<Rule>> {
    let mut rules = Vec::with_capacity(windows.len() + 1);
    for window in windows {
        rules.push(window_rule(slo, *window, sli_expr(slo, plugin, *window, templates)?));
    }

    let period = slo.time_window;
    if !windows.contains(&period) {
        let expr = match (optimized, windows.first()) {
            (true, Some(shortest)) => optimized_period_expr(slo, *shortest, period),
            _ => sli_expr(slo, plugin, period, templates)?,
        };
        rules.push(window_rule(slo, period, expr));
    }
    Ok(rules)
}

fn window_rule(slo: &Slo, window: PromDuration, expr: String) -> Rule {
    let mut labels = rule_labels(slo);
    labels.insert(SLO_WINDOW_LABEL.to_string(), window.to_string());
    Rule::recording(sli_error_metric(window), expr, labels)
}

fn sli_expr(
    slo: &Slo,
    plugin: Option<&PluginBinding<'_>>,
    window: PromDuration,
    templates: &QueryTemplates,
) -> GeneratorResult<String> {
    let window = window.to_string();
    if let Some(binding) = plugin {
        let query = binding.render(templates, slo, &window)?;
        return Ok(format!("({})\n", query.trim()));
    }

    let render = |query: &str| {
        templates
            .render_window(query, &window)
            .map(|q| q.trim().to_string())
            .map_err(|e| GeneratorError::template(&slo.name, e))
    };

    let expr = match &slo.sli {
        Sli::Events(events) => format!(
            "({})\n/\n({})\n",
            render(&events.error_query)?,
            render(&events.total_query)?
        ),
        Sli::Raw(raw) => format!("({})\n", render(&raw.error_ratio_query)?),
    };
    Ok(expr)
}

fn optimized_period_expr(slo: &Slo, shortest: PromDuration, period: PromDuration) -> String {
    let metric = format!("{}{}", sli_error_metric(shortest), slo_selector(slo));
    format!(
        "sum_over_time({metric}[{period}])\n/ ignoring ({window_label})\ncount_over_time({metric}[{period}])\n",
        metric = metric,
        period = period,
        window_label = SLO_WINDOW_LABEL,
    )
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;
    use crate::SliPlugin;
    use slo_core::SliRaw;
    use std::collections::BTreeMap;

    fn windows() -> Vec<PromDuration> {
        vec![PromDuration::from_minutes(5), PromDuration::from_hours(1)]
    }

    #[test]
    fn test_events_recordings() {
        let rules =
            sli_recording_rules(&fixtures::slo(), None, &windows(), &QueryTemplates::new(), true).unwrap();
        let names: Vec<&str> = rules.iter().map(Rule::name).collect();
        assert_eq!(
            names,
            vec![
                "slo:sli_error:ratio_rate5m",
                "slo:sli_error:ratio_rate1h",
                "slo:sli_error:ratio_rate30d"
            ]
        );
        assert_eq!(
            rules[0].expr,
            "(sum(rate(errors[5m])))\n/\n(sum(rate(total[5m])))\n"
        );
        assert_eq!(rules[0].labels["sloth_window"], "5m");
        assert_eq!(rules[0].labels["owner"], "team-a");
        assert_eq!(rules[2].labels["sloth_window"], "30d");
    }

    #[test]
    fn test_optimized_period_recording() {
        let rules =
            sli_recording_rules(&fixtures::slo(), None, &windows(), &QueryTemplates::new(), true).unwrap();
        let period = &rules[2].expr;
        assert!(period.starts_with("sum_over_time(slo:sli_error:ratio_rate5m{sloth_id=\"svc-availability\""));
        assert!(period.contains("[30d])\n/ ignoring (sloth_window)\ncount_over_time("));
    }

    #[test]
    fn test_unoptimized_period_recording() {
        let rules =
            sli_recording_rules(&fixtures::slo(), None, &windows(), &QueryTemplates::new(), false).unwrap();
        assert_eq!(
            rules[2].expr,
            "(sum(rate(errors[30d])))\n/\n(sum(rate(total[30d])))\n"
        );
    }

    #[test]
    fn test_raw_recordings() {
        let mut slo = fixtures::slo();
        slo.sli = Sli::Raw(SliRaw {
            error_ratio_query: "  rate(bad[{{.window}}]) / rate(all[{{.window}}])\n".to_string(),
        });
        let rules = sli_recording_rules(&slo, None, &windows(), &QueryTemplates::new(), true).unwrap();
        assert_eq!(rules[1].expr, "(rate(bad[1h]) / rate(all[1h]))\n");
    }

    #[test]
    fn test_template_failure_names_slo() {
        let mut slo = fixtures::slo();
        slo.sli = Sli::Raw(SliRaw {
            error_ratio_query: "rate(bad[{{.unknown}}])".to_string(),
        });
        let err = sli_recording_rules(&slo, None, &windows(), &QueryTemplates::new(), true).unwrap_err();
        assert!(matches!(err, GeneratorError::Template { .. }));
        assert!(err.to_string().contains("availability"));
    }

    #[test]
    fn test_plugin_recordings_render_per_window() {
        let templates = QueryTemplates::new();
        let plugin = SliPlugin::parse(
            "plugin.yaml",
            "id: x\nerrorRatioQuery: rate(x{job=~\"{{ .options.re }}\"}[{{ .window }}])\n",
            &templates,
        )
        .unwrap();
        let mut options = BTreeMap::new();
        options.insert("re".to_string(), "api-{#}".to_string());
        let binding = PluginBinding {
            plugin: &plugin,
            options: &options,
        };

        let rules =
            sli_recording_rules(&fixtures::slo(), Some(&binding), &windows(), &templates, false)
                .unwrap();
        assert_eq!(rules[0].expr, "(rate(x{job=~\"api-{#}\"}[5m]))\n");
        assert_eq!(rules[1].expr, "(rate(x{job=~\"api-{#}\"}[1h]))\n");
        assert_eq!(rules[2].expr, "(rate(x{job=~\"api-{#}\"}[30d]))\n");
    }
}
