//! Generator construction.
//!
//! Calls without extension text share one generator built on first use and
//! never mutated afterwards. Calls with extension text get a dedicated
//! generator with strict plugin loading, dropped when the call ends.

use crate::{BridgeError, BridgeResult};
use slo_generator::{Generator, GeneratorConfig, MemoryModuleSource};
use std::ops::Deref;
use std::sync::OnceLock;
use tracing::debug;

/// Label attached to every generated rule, naming this runtime as the source.
pub const SOURCE_LABEL_NAME: &str = "source";
pub const SOURCE_LABEL_VALUE: &str = "wasm-sloth";

static SHARED_GENERATOR: OnceLock<Result<Generator, BridgeError>> = OnceLock::new();

fn base_config() -> GeneratorConfig {
    GeneratorConfig::new().with_extra_label(SOURCE_LABEL_NAME, SOURCE_LABEL_VALUE)
}

/// The process-wide generator used when no extension is supplied.
pub fn shared_generator() -> BridgeResult<&'static Generator> {
    let result = SHARED_GENERATOR.get_or_init(|| {
        debug!("Building shared SLO generator");
        Generator::new(base_config()).map_err(BridgeError::from)
    });
    result.as_ref().map_err(Clone::clone)
}

/// Build a generator with the given extension modules, strictly.
pub fn build_generator(modules: MemoryModuleSource) -> BridgeResult<Generator> {
    debug!(modules = modules.len(), "Building dedicated SLO generator");
    let config = base_config()
        .with_module_source(modules)
        .with_strict_plugins(true);
    Ok(Generator::new(config)?)
}

/// A generator for one call: the shared one or a dedicated one.
#[derive(Debug)]
pub enum GeneratorHandle {
    Shared(&'static Generator),
    Dedicated(Generator),
}

impl GeneratorHandle {
    pub fn is_shared(&self) -> bool {
        matches!(self, GeneratorHandle::Shared(_))
    }
}

impl Deref for GeneratorHandle {
    type Target = Generator;

    fn deref(&self) -> &Generator {
        match self {
            GeneratorHandle::Shared(generator) => generator,
            GeneratorHandle::Dedicated(generator) => generator,
        }
    }
}

/// Pick the generator for a call.
pub fn generator_for(extension: Option<MemoryModuleSource>) -> BridgeResult<GeneratorHandle> {
    match extension {
        None => shared_generator().map(GeneratorHandle::Shared),
        Some(modules) => build_generator(modules).map(GeneratorHandle::Dedicated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{load_extension, ErrorKind};

    const PLUGIN: &str = "id: test/plugin\nerrorRatioQuery: rate(x[{{ .window }}])\n";

    #[test]
    fn test_shared_generator_is_reused() {
        let first = generator_for(None).unwrap();
        let second = generator_for(None).unwrap();
        assert!(first.is_shared());
        assert!(std::ptr::eq(&*first, &*second));
    }

    #[test]
    fn test_shared_generator_has_source_label() {
        let generator = shared_generator().unwrap();
        assert_eq!(generator.extra_labels()[SOURCE_LABEL_NAME], SOURCE_LABEL_VALUE);
        assert!(generator.plugins().is_empty());
    }

    #[test]
    fn test_extension_gets_dedicated_generator() {
        let handle = generator_for(load_extension(PLUGIN)).unwrap();
        assert!(!handle.is_shared());
        assert!(!std::ptr::eq(&*handle, shared_generator().unwrap()));
        assert!(handle.plugins().get("test/plugin").is_some());
        assert_eq!(handle.extra_labels()[SOURCE_LABEL_NAME], SOURCE_LABEL_VALUE);

        // The shared generator never sees extension plugins.
        assert!(shared_generator().unwrap().plugins().is_empty());
    }

    #[test]
    fn test_malformed_extension_is_configuration_error() {
        let err = generator_for(load_extension("id: [broken")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
