//! Generator configuration.

use crate::ModuleSource;
use slo_core::PromDuration;
use std::collections::BTreeMap;

/// Configuration for building a [`crate::Generator`].
#[derive(Debug)]
pub struct GeneratorConfig {
    /// Labels added to every SLO; they override SLO-defined labels.
    pub extra_labels: BTreeMap<String, String>,
    /// Sources of SLI plugin modules.
    pub module_sources: Vec<Box<dyn ModuleSource>>,
    /// Fail construction on any plugin module that does not load.
    pub strict_plugins: bool,
    /// SLO period used with the built-in alert windows.
    pub default_slo_period: PromDuration,
    /// `AlertWindows` document replacing the built-in windows.
    pub alert_windows: Option<String>,
    /// Evaluate the period SLI directly instead of averaging the shortest
    /// window recording.
    pub disable_optimizations: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            extra_labels: BTreeMap::new(),
            module_sources: Vec::new(),
            strict_plugins: false,
            default_slo_period: PromDuration::from_days(30),
            alert_windows: None,
            disable_optimizations: false,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extra_label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_labels.insert(name.into(), value.into());
        self
    }

    pub fn with_extra_labels(mut self, labels: BTreeMap<String, String>) -> Self {
        self.extra_labels.extend(labels);
        self
    }

    pub fn with_module_source(mut self, source: impl ModuleSource + 'static) -> Self {
        self.module_sources.push(Box::new(source));
        self
    }

    pub fn with_strict_plugins(mut self, strict: bool) -> Self {
        self.strict_plugins = strict;
        self
    }

    pub fn with_default_slo_period(mut self, period: PromDuration) -> Self {
        self.default_slo_period = period;
        self
    }

    pub fn with_alert_windows(mut self, document: impl Into<String>) -> Self {
        self.alert_windows = Some(document.into());
        self
    }

    pub fn with_disable_optimizations(mut self, disable: bool) -> Self {
        self.disable_optimizations = disable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryModuleSource;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert!(config.extra_labels.is_empty());
        assert!(config.module_sources.is_empty());
        assert!(!config.strict_plugins);
        assert_eq!(config.default_slo_period, PromDuration::from_days(30));
        assert!(config.alert_windows.is_none());
    }

    #[test]
    fn test_builder() {
        let config = GeneratorConfig::new()
            .with_extra_label("source", "wasm-sloth")
            .with_module_source(MemoryModuleSource::new().with_module("plugin.yaml", "id: x"))
            .with_strict_plugins(true)
            .with_default_slo_period(PromDuration::from_days(28))
            .with_disable_optimizations(true);

        assert_eq!(config.extra_labels["source"], "wasm-sloth");
        assert_eq!(config.module_sources.len(), 1);
        assert!(config.strict_plugins);
        assert!(config.disable_optimizations);
        assert_eq!(config.default_slo_period, PromDuration::from_days(28));
    }
}
