//! SLO Rule Generator
//!
//! Compiles SLO specifications into Prometheus rules.
//!
//! Responsibilities:
//! - Load SLI plugins from injected module sources (strict or lenient)
//! - Load and validate specifications
//! - Resolve SLIs (events, raw, plugin) with query templating
//! - Compute SLI recordings, metadata recordings and burn-rate alerts

mod config;
mod error;
mod generator;
mod module;
mod plugin;
mod resolve;
mod rules;
mod template;
mod validate;
mod windows;

pub use config::GeneratorConfig;
pub use error::{GeneratorError, GeneratorResult};
pub use generator::Generator;
pub use module::{MemoryModuleSource, ModuleSource};
pub use plugin::{PluginRegistry, SliPlugin, PLUGIN_VERSION};
pub use rules::sli_error_metric;
pub use template::{QueryTemplates, TemplateError};
pub use validate::validate_spec;
pub use windows::{AlertWindows, Window};
