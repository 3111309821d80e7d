//! Common error types for the SLO model.

use thiserror::Error;

/// Errors produced while parsing a Prometheus duration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,

    #[error("invalid duration '{input}'")]
    Invalid { input: String },

    #[error("unknown unit '{unit}' in duration '{input}'")]
    UnknownUnit { input: String, unit: char },
}

impl DurationError {
    pub fn invalid(input: impl Into<String>) -> Self {
        Self::Invalid {
            input: input.into(),
        }
    }

    pub fn unknown_unit(input: impl Into<String>, unit: char) -> Self {
        Self::UnknownUnit {
            input: input.into(),
            unit,
        }
    }
}
