//! Bridge error types.
//!
//! Every stage reports a [`BridgeError`]; the string boundary flattens it.

use slo_generator::GeneratorError;
use slo_render::RenderError;
use std::fmt;
use thiserror::Error;

/// Boundary return value when the specification argument is absent.
pub const MISSING_INPUT: &str = "missing SLO YAML input";

/// The stage an error comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Required argument missing.
    Input,
    /// Extension registration failed.
    Configuration,
    /// Parse, validation or extension hook failure.
    Compilation,
    /// Document rendering failed.
    Render,
    /// Response payload encoding failed.
    Package,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Input => "input",
            ErrorKind::Configuration => "configuration",
            ErrorKind::Compilation => "compilation",
            ErrorKind::Render => "render",
            ErrorKind::Package => "package",
        };
        f.write_str(name)
    }
}

/// A categorized bridge failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BridgeError {
    kind: ErrorKind,
    message: String,
}

impl BridgeError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn missing_input() -> Self {
        Self::new(ErrorKind::Input, MISSING_INPUT)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn compilation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Compilation, message)
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Render, message)
    }

    pub fn package(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Package, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The string handed back across the host boundary.
    pub fn to_boundary_string(&self) -> String {
        match self.kind {
            ErrorKind::Input => MISSING_INPUT.to_string(),
            _ => format!("Error: {}", self.message),
        }
    }
}

impl From<GeneratorError> for BridgeError {
    fn from(err: GeneratorError) -> Self {
        if err.is_configuration() {
            Self::configuration(err.to_string())
        } else {
            Self::compilation(err.to_string())
        }
    }
}

impl From<RenderError> for BridgeError {
    fn from(err: RenderError) -> Self {
        Self::render(err.to_string())
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::package(err.to_string())
    }
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
