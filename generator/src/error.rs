//! Generator error types.

use crate::TemplateError;
use thiserror::Error;

/// Errors that can occur while building a generator or generating rules.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// An extension module could not be loaded as an SLI plugin.
    #[error("could not load plugin module '{module}': {message}")]
    PluginLoad { module: String, message: String },

    /// Two modules declare the same plugin id.
    #[error("duplicate SLI plugin '{id}' declared in module '{module}'")]
    DuplicatePlugin { id: String, module: String },

    /// Alert window configuration is invalid.
    #[error("invalid alert windows: {message}")]
    AlertWindows { message: String },

    /// Specification loading failed.
    #[error(transparent)]
    Spec(#[from] slo_spec::SpecError),

    /// Specification is well formed but semantically invalid.
    #[error("invalid SLO specification: {message}")]
    Validation { message: String },

    /// A plugin SLI references a plugin that is not loaded.
    #[error("SLO '{slo}' references unknown SLI plugin '{id}'")]
    UnknownPlugin { slo: String, id: String },

    /// A plugin SLI could not be resolved.
    #[error("SLO '{slo}' SLI plugin '{id}' failed: {message}")]
    PluginExecution {
        slo: String,
        id: String,
        message: String,
    },

    /// Query template evaluation failed.
    #[error("SLO '{slo}' query template failed: {source}")]
    Template {
        slo: String,
        #[source]
        source: TemplateError,
    },
}

impl GeneratorError {
    pub fn plugin_load(module: impl Into<String>, message: impl ToString) -> Self {
        Self::PluginLoad {
            module: module.into(),
            message: message.to_string(),
        }
    }

    pub fn duplicate_plugin(id: impl Into<String>, module: impl Into<String>) -> Self {
        Self::DuplicatePlugin {
            id: id.into(),
            module: module.into(),
        }
    }

    pub fn alert_windows(message: impl Into<String>) -> Self {
        Self::AlertWindows {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unknown_plugin(slo: impl Into<String>, id: impl Into<String>) -> Self {
        Self::UnknownPlugin {
            slo: slo.into(),
            id: id.into(),
        }
    }

    pub fn plugin_execution(
        slo: impl Into<String>,
        id: impl Into<String>,
        message: impl ToString,
    ) -> Self {
        Self::PluginExecution {
            slo: slo.into(),
            id: id.into(),
            message: message.to_string(),
        }
    }

    pub fn template(slo: impl Into<String>, source: TemplateError) -> Self {
        Self::Template {
            slo: slo.into(),
            source,
        }
    }

    /// Whether the error comes from building the generator rather than from
    /// compiling a specification.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::PluginLoad { .. } | Self::DuplicatePlugin { .. } | Self::AlertWindows { .. }
        )
    }
}

/// Result type for generator operations.
pub type GeneratorResult<T> = Result<T, GeneratorError>;
