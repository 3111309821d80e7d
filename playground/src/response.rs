//! Response payload packaging.

use crate::{BridgeResult, RenderedOutput};
use serde::{Deserialize, Serialize};
use slo_core::CompilationResult;

/// The successful boundary payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub result_rendered: String,
    pub result: CompilationResult,
}

/// Encode the rendered text and the full result as one JSON payload.
pub fn package(rendered: RenderedOutput, result: CompilationResult) -> BridgeResult<String> {
    let envelope = ResponseEnvelope {
        result_rendered: rendered.into_text(),
        result,
    };
    Ok(serde_json::to_string(&envelope)?)
}
