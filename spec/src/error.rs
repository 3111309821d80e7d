//! Specification loading error types.

use thiserror::Error;

/// Errors that can occur while loading a specification.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The input was empty or whitespace only.
    #[error("empty SLO specification")]
    Empty,

    /// The input is not valid YAML.
    #[error("could not parse SLO specification: {0}")]
    Parse(#[source] serde_yaml::Error),

    /// The top level of the document is not a mapping.
    #[error("SLO specification must be a mapping at the top level")]
    NotAMapping,

    /// No known format matches the document header.
    #[error("unsupported SLO specification format: {found}")]
    UnsupportedFormat { found: String },

    /// The header matched a format but the body does not decode into it.
    #[error("invalid {format} specification: {source}")]
    Decode {
        format: &'static str,
        #[source]
        source: serde_yaml::Error,
    },
}

impl SpecError {
    pub fn unsupported_format(found: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            found: found.into(),
        }
    }

    pub fn decode(format: &'static str, source: serde_yaml::Error) -> Self {
        Self::Decode { format, source }
    }
}

/// Result type for specification loading.
pub type SpecResult<T> = Result<T, SpecError>;
