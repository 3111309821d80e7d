//! SLO Core Types
//!
//! This crate provides the types shared by every stage of SLO rule generation:
//! - Prometheus durations
//! - Specification documents (`prometheus/v1`, `sloth.slok.dev/v1`) and the
//!   `OriginalSource` tag recording which one a result came from
//! - The resolved SLO model
//! - Generated rules and compilation results

mod document;
mod duration;
mod error;
mod result;
mod rules;
mod slo;

pub use document::{k8s_v1, prometheus_v1, OriginalSource};
pub use duration::*;
pub use error::*;
pub use result::*;
pub use rules::*;
pub use slo::*;
