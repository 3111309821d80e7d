//! Module sources for extension code.
//!
//! Extension modules are looked up by name through [`ModuleSource`], so the
//! generator never needs a filesystem.

use std::collections::BTreeMap;
use std::fmt;

/// A lookup from module name to module source text.
pub trait ModuleSource: fmt::Debug + Send + Sync {
    /// Names of all modules, in a stable order.
    fn module_names(&self) -> Vec<String>;

    /// Source text of a module.
    fn read(&self, name: &str) -> Option<&str>;
}

/// In-memory module source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryModuleSource {
    modules: BTreeMap<String, String>,
}

impl MemoryModuleSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_module(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(name, source);
        self
    }

    /// Insert or replace a module.
    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.modules.insert(name.into(), source.into());
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleSource for MemoryModuleSource {
    fn module_names(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }

    fn read(&self, name: &str) -> Option<&str> {
        self.modules.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_module_source() {
        let source = MemoryModuleSource::new()
            .with_module("b.yaml", "id: b")
            .with_module("a.yaml", "id: a");

        assert_eq!(source.len(), 2);
        assert_eq!(source.module_names(), vec!["a.yaml", "b.yaml"]);
        assert_eq!(source.read("a.yaml"), Some("id: a"));
        assert_eq!(source.read("missing.yaml"), None);
    }

    #[test]
    fn test_insert_replaces() {
        let mut source = MemoryModuleSource::new();
        assert!(source.is_empty());
        source.insert("plugin.yaml", "one");
        source.insert("plugin.yaml", "two");
        assert_eq!(source.len(), 1);
        assert_eq!(source.read("plugin.yaml"), Some("two"));
    }
}
