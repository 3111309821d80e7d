//! The rule generator.

use crate::resolve::{resolve_slos, ResolveContext, ResolvedSlo};
use crate::rules::{alert_rules, metadata_recording_rules, sli_recording_rules};
use crate::{
    validate_spec, AlertWindows, GeneratorConfig, GeneratorResult, PluginRegistry, QueryTemplates,
};
use slo_core::{CompilationResult, OriginalSource, SloGroup, SloResult, SloRules};
use std::collections::BTreeMap;
use tracing::debug;

/// Compiles specifications into Prometheus rules.
///
/// A generator is immutable once built and can be shared freely.
#[derive(Debug)]
pub struct Generator {
    extra_labels: BTreeMap<String, String>,
    plugins: PluginRegistry,
    templates: QueryTemplates,
    windows: AlertWindows,
    disable_optimizations: bool,
}

impl Generator {
    /// Build a generator, loading every configured plugin module.
    pub fn new(config: GeneratorConfig) -> GeneratorResult<Self> {
        let templates = QueryTemplates::new();
        let windows = match &config.alert_windows {
            Some(document) => AlertWindows::from_yaml(document)?,
            None => AlertWindows::builtin(config.default_slo_period)?,
        };
        let plugins =
            PluginRegistry::load(&config.module_sources, &templates, config.strict_plugins)?;

        debug!(
            plugins = plugins.len(),
            strict = config.strict_plugins,
            slo_period = %windows.slo_period,
            "Built SLO generator"
        );

        Ok(Self {
            extra_labels: config.extra_labels,
            plugins,
            templates,
            windows,
            disable_optimizations: config.disable_optimizations,
        })
    }

    /// Load, validate and compile a raw specification.
    pub fn generate_from_raw(&self, raw: &[u8]) -> GeneratorResult<CompilationResult> {
        let source = slo_spec::load(raw)?;
        self.generate(source)
    }

    /// Compile an already loaded specification.
    pub fn generate(&self, source: OriginalSource) -> GeneratorResult<CompilationResult> {
        let spec = source.to_prometheus_spec();
        validate_spec(&spec, &self.templates)?;

        let ctx = ResolveContext {
            plugins: &self.plugins,
            templates: &self.templates,
            extra_labels: &self.extra_labels,
            time_window: self.windows.slo_period,
        };
        let resolved = resolve_slos(&spec, &ctx)?;

        let rate_windows = self.windows.rate_windows();
        let shortest = self.windows.shortest_window();
        let spec_version = source.spec_version();

        let mut slo_results = Vec::with_capacity(resolved.len());
        for ResolvedSlo { slo, plugin } in &resolved {
            let prometheus_rules = SloRules {
                sli_error_rec_rules: sli_recording_rules(
                    slo,
                    plugin.as_ref(),
                    &rate_windows,
                    &self.templates,
                    !self.disable_optimizations,
                )?,
                metadata_rec_rules: metadata_recording_rules(slo, shortest, spec_version),
                alert_rules: alert_rules(slo, &self.windows, &self.extra_labels),
            };
            debug!(slo = %slo.id, rules = prometheus_rules.len(), "Generated SLO rules");
            slo_results.push(SloResult {
                slo: slo.clone(),
                prometheus_rules,
            });
        }
        let slos = resolved.into_iter().map(|r| r.slo).collect();

        Ok(CompilationResult {
            slo_group: SloGroup {
                slos,
                original_source: source,
            },
            slo_results,
        })
    }

    pub fn extra_labels(&self) -> &BTreeMap<String, String> {
        &self.extra_labels
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    pub fn windows(&self) -> &AlertWindows {
        &self.windows
    }
}
