//! SLO Playground Bridge
//!
//! Exposes SLO rule generation to a host with no exception channel. One
//! call takes specification text and optional plugin text and always
//! returns a string:
//! - `"missing SLO YAML input"` when the specification is absent
//! - `"Error: <message>"` when any stage fails
//! - a JSON payload with `resultRendered` and `result` on success
//!
//! Internally every stage returns a categorized [`BridgeError`]; only
//! [`generate`] flattens it to text.

mod bindings;
mod error;
mod extension;
mod factory;
mod logging;
mod output;
mod pipeline;
mod response;

pub use bindings::generate_slo_from_raw;
pub use error::{BridgeError, BridgeResult, ErrorKind, MISSING_INPUT};
pub use extension::{load_extension, EXTENSION_MODULE_NAME};
pub use factory::{
    build_generator, generator_for, shared_generator, GeneratorHandle, SOURCE_LABEL_NAME,
    SOURCE_LABEL_VALUE,
};
pub use logging::init as init_logging;
pub use output::{render, RenderedOutput};
pub use pipeline::compile;
pub use response::{package, ResponseEnvelope};

use tracing::error;

/// Run the whole pipeline and return the payload or a categorized error.
pub fn try_generate(spec: Option<&str>, plugin: Option<&str>) -> BridgeResult<String> {
    let spec = spec.ok_or_else(BridgeError::missing_input)?;
    let generator = generator_for(plugin.and_then(load_extension))?;
    let result = compile(&generator, spec.as_bytes())?;
    let rendered = render(&result)?;
    package(rendered, result)
}

/// The boundary function. Never fails; errors come back as text.
pub fn generate(spec: Option<&str>, plugin: Option<&str>) -> String {
    match try_generate(spec, plugin) {
        Ok(payload) => payload,
        Err(e) => {
            error!(kind = %e.kind(), error = %e, "SLO generation failed");
            e.to_boundary_string()
        }
    }
}
