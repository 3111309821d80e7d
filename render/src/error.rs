//! Render error types.

use thiserror::Error;

/// Errors that can occur while rendering a result.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The result holds no rules at all.
    #[error("no SLO rules to render")]
    NoRules,

    /// A Kubernetes resource needs a name.
    #[error("Kubernetes resource name is required")]
    MissingName,

    /// YAML encoding failed.
    #[error("could not encode rules as YAML: {0}")]
    Encode(#[from] serde_yaml::Error),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
