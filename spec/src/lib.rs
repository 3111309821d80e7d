//! SLO Specification Loader
//!
//! Turns raw specification bytes into an [`OriginalSource`]:
//! - Parse YAML (JSON is accepted as a YAML subset)
//! - Detect the document format from `version` / `apiVersion` + `kind`
//! - Decode into the format's document type
//!
//! Semantic validation is left to the generator.

mod error;
mod loader;

pub use error::{SpecError, SpecResult};
pub use loader::{load, SpecFormat};

pub use slo_core::OriginalSource;
