//! Turn a validated document into resolved SLO models.

use crate::{GeneratorError, GeneratorResult, PluginRegistry, QueryTemplates, SliPlugin};
use slo_core::prometheus_v1::{self, Alert, Alerting};
use slo_core::{AlertMeta, PromDuration, Sli, SliEvents, SliRaw, Slo};
use std::collections::BTreeMap;

/// Inputs shared by every SLO of a document.
pub(crate) struct ResolveContext<'a> {
    pub plugins: &'a PluginRegistry,
    pub templates: &'a QueryTemplates,
    pub extra_labels: &'a BTreeMap<String, String>,
    pub time_window: PromDuration,
}

/// A plugin SLI bound to its plugin and options.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PluginBinding<'a> {
    pub plugin: &'a SliPlugin,
    pub options: &'a BTreeMap<String, String>,
}

impl PluginBinding<'_> {
    /// Error ratio query of `slo` for one window.
    pub fn render(
        &self,
        templates: &QueryTemplates,
        slo: &Slo,
        window: &str,
    ) -> GeneratorResult<String> {
        self.plugin
            .render(templates, &slo.service, &slo.name, self.options, window)
    }
}

/// A resolved SLO and, for plugin SLIs, the plugin its rules come from.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedSlo<'a> {
    pub slo: Slo,
    pub plugin: Option<PluginBinding<'a>>,
}

pub(crate) fn resolve_slos<'a>(
    spec: &'a prometheus_v1::Spec,
    ctx: &ResolveContext<'a>,
) -> GeneratorResult<Vec<ResolvedSlo<'a>>> {
    spec.slos
        .iter()
        .map(|slo| resolve_slo(spec, slo, ctx))
        .collect()
}

fn resolve_slo<'a>(
    spec: &prometheus_v1::Spec,
    slo: &'a prometheus_v1::Slo,
    ctx: &ResolveContext<'a>,
) -> GeneratorResult<ResolvedSlo<'a>> {
    // Later maps win: service labels < SLO labels < extra labels.
    let labels = merge_labels([&spec.labels, &slo.labels, ctx.extra_labels]);
    let (sli, plugin) = resolve_sli(&spec.service, slo, ctx)?;

    Ok(ResolvedSlo {
        slo: Slo {
            id: format!("{}-{}", spec.service, slo.name),
            name: slo.name.clone(),
            description: slo.description.clone(),
            service: spec.service.clone(),
            sli,
            time_window: ctx.time_window,
            objective: slo.objective,
            labels,
            page_alert_meta: alert_meta(&slo.alerting, &slo.alerting.page_alert),
            ticket_alert_meta: alert_meta(&slo.alerting, &slo.alerting.ticket_alert),
        },
        plugin,
    })
}

fn resolve_sli<'a>(
    service: &str,
    slo: &'a prometheus_v1::Slo,
    ctx: &ResolveContext<'a>,
) -> GeneratorResult<(Sli, Option<PluginBinding<'a>>)> {
    let sli = &slo.sli;
    if let Some(events) = &sli.events {
        let events = SliEvents {
            error_query: events.error_query.clone(),
            total_query: events.total_query.clone(),
        };
        return Ok((Sli::Events(events), None));
    }
    if let Some(raw) = &sli.raw {
        let raw = SliRaw {
            error_ratio_query: raw.error_ratio_query.clone(),
        };
        return Ok((Sli::Raw(raw), None));
    }
    if let Some(reference) = &sli.plugin {
        let plugin = ctx
            .plugins
            .get(&reference.id)
            .ok_or_else(|| GeneratorError::unknown_plugin(&slo.name, &reference.id))?;
        // Resolving once up front reports missing options before any rule is built.
        let query = plugin.resolve(ctx.templates, service, &slo.name, &reference.options)?;
        let binding = PluginBinding {
            plugin,
            options: &reference.options,
        };
        return Ok((Sli::Raw(SliRaw { error_ratio_query: query }), Some(binding)));
    }
    Err(GeneratorError::validation(format!(
        "SLO '{}': an SLI is required",
        slo.name
    )))
}

fn alert_meta(alerting: &Alerting, alert: &Alert) -> AlertMeta {
    AlertMeta {
        disable: alert.disable,
        name: alerting.name.clone(),
        labels: merge_labels([&alerting.labels, &alert.labels]),
        annotations: merge_labels([&alerting.annotations, &alert.annotations]),
    }
}

/// Merge label maps; later maps override earlier ones.
pub(crate) fn merge_labels<'a>(
    maps: impl IntoIterator<Item = &'a BTreeMap<String, String>>,
) -> BTreeMap<String, String> {
    let mut merged = BTreeMap::new();
    for map in maps {
        merged.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    merged
}
