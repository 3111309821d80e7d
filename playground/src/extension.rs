//! Extension loading.

use slo_generator::MemoryModuleSource;

/// Module name the extension text is registered under.
pub const EXTENSION_MODULE_NAME: &str = "plugin.yaml";

/// Wrap extension text in a module source.
///
/// Empty text yields `None` and the caller uses the shared generator. The
/// text is stored verbatim; problems surface when the generator loads it.
pub fn load_extension(source: &str) -> Option<MemoryModuleSource> {
    if source.is_empty() {
        return None;
    }
    Some(MemoryModuleSource::new().with_module(EXTENSION_MODULE_NAME, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use slo_generator::ModuleSource;

    #[test]
    fn test_empty_extension() {
        assert!(load_extension("").is_none());
    }

    #[test]
    fn test_extension_is_stored_verbatim() {
        let text = "  not even yaml: [\n";
        let modules = load_extension(text).unwrap();
        assert_eq!(modules.module_names(), vec![EXTENSION_MODULE_NAME]);
        assert_eq!(modules.read(EXTENSION_MODULE_NAME), Some(text));
    }
}
