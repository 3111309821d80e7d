//! SLI plugins loaded from extension modules.
//!
//! A plugin module is a YAML document declaring an id, the options it
//! requires and an error ratio query template:
//!
//! ```yaml
//! version: "prometheus/sli-plugin/v1"
//! id: "myorg/availability"
//! options: ["job"]
//! errorRatioQuery: |
//!   sum(rate(http_errors{job="{{ .options.job }}"}[{{ .window }}]))
//!   / sum(rate(http_total{job="{{ .options.job }}"}[{{ .window }}]))
//! ```

use crate::{GeneratorError, GeneratorResult, ModuleSource, QueryTemplates};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Accepted value of the optional `version` field.
pub const PLUGIN_VERSION: &str = "prometheus/sli-plugin/v1";

/// Window placeholder shown in the resolved query of a plugin SLI.
const WINDOW_PASSTHROUGH: &str = "{{.window}}";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct PluginDocument {
    #[serde(default)]
    version: Option<String>,
    id: String,
    #[serde(default)]
    options: Vec<String>,
    error_ratio_query: String,
}

/// A loaded SLI plugin.
#[derive(Debug, Clone, PartialEq)]
pub struct SliPlugin {
    pub id: String,
    /// Module the plugin was loaded from.
    pub module: String,
    pub required_options: Vec<String>,
    pub error_ratio_query: String,
}

impl SliPlugin {
    /// Parse and check a plugin module.
    pub fn parse(module: &str, source: &str, templates: &QueryTemplates) -> GeneratorResult<Self> {
        let doc: PluginDocument =
            serde_yaml::from_str(source).map_err(|e| GeneratorError::plugin_load(module, e))?;

        if let Some(version) = &doc.version {
            if version != PLUGIN_VERSION {
                return Err(GeneratorError::plugin_load(
                    module,
                    format!("unsupported plugin version '{}'", version),
                ));
            }
        }
        if doc.id.trim().is_empty() {
            return Err(GeneratorError::plugin_load(module, "plugin id is required"));
        }
        if doc.error_ratio_query.trim().is_empty() {
            return Err(GeneratorError::plugin_load(
                module,
                "errorRatioQuery is required",
            ));
        }
        templates
            .validate(&doc.error_ratio_query)
            .map_err(|e| GeneratorError::plugin_load(module, e))?;

        Ok(Self {
            id: doc.id,
            module: module.to_string(),
            required_options: doc.options,
            error_ratio_query: doc.error_ratio_query,
        })
    }

    /// Resolve the plugin for one SLO, leaving the window as a placeholder.
    ///
    /// The output is for display only; rules are built with [`Self::render`]
    /// so option values are never parsed as template syntax.
    pub fn resolve(
        &self,
        templates: &QueryTemplates,
        service: &str,
        slo: &str,
        options: &BTreeMap<String, String>,
    ) -> GeneratorResult<String> {
        self.render(templates, service, slo, options, WINDOW_PASSTHROUGH)
    }

    /// Render the error ratio query for one SLO and one rate window.
    pub fn render(
        &self,
        templates: &QueryTemplates,
        service: &str,
        slo: &str,
        options: &BTreeMap<String, String>,
        window: &str,
    ) -> GeneratorResult<String> {
        if let Some(missing) = self
            .required_options
            .iter()
            .find(|opt| !options.contains_key(*opt))
        {
            return Err(GeneratorError::plugin_execution(
                slo,
                &self.id,
                format!("missing required option '{}'", missing),
            ));
        }

        templates
            .render(
                &self.error_ratio_query,
                minijinja::context! {
                    window => window,
                    options => options,
                    service => service,
                    slo => slo,
                },
            )
            .map_err(|e| GeneratorError::plugin_execution(slo, &self.id, e))
    }
}

/// SLI plugins indexed by id.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    plugins: BTreeMap<String, SliPlugin>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every YAML module of the given sources.
    ///
    /// In strict mode the first bad module aborts loading. Otherwise bad
    /// modules are skipped with a warning.
    pub fn load(
        sources: &[Box<dyn ModuleSource>],
        templates: &QueryTemplates,
        strict: bool,
    ) -> GeneratorResult<Self> {
        let mut registry = Self::new();

        for source in sources {
            for name in source.module_names() {
                if !is_plugin_module(&name) {
                    debug!(module = %name, "Ignoring non-plugin module");
                    continue;
                }
                let Some(text) = source.read(&name) else {
                    continue;
                };

                let loaded = SliPlugin::parse(&name, text, templates)
                    .and_then(|plugin| registry.register(plugin));
                match loaded {
                    Ok(()) => {}
                    Err(e) if strict => return Err(e),
                    Err(e) => warn!(module = %name, error = %e, "Skipping SLI plugin module"),
                }
            }
        }

        debug!(count = registry.len(), "Loaded SLI plugins");
        Ok(registry)
    }

    /// Add a plugin, rejecting duplicate ids.
    pub fn register(&mut self, plugin: SliPlugin) -> GeneratorResult<()> {
        if self.plugins.contains_key(&plugin.id) {
            return Err(GeneratorError::duplicate_plugin(plugin.id, plugin.module));
        }
        self.plugins.insert(plugin.id.clone(), plugin);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&SliPlugin> {
        self.plugins.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

fn is_plugin_module(name: &str) -> bool {
    name.ends_with(".yaml") || name.ends_with(".yml")
}
