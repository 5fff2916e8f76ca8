//! viscolab - Falling-sphere viscometry analysis
//!
//! Derives dynamic and kinematic viscosity, with worst-case error ranges,
//! from timed descents of globules through a fluid column: Stokes' law,
//! plus the Ladenburg correction for the wall effect of a finite cylinder.

pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;

pub use analysis::{analyze, Analysis};
pub use config::{Apparatus, RunConfig};
pub use error::{AnalysisError, Result};
pub use model::{MeasurementTable, Quantity};
pub use parser::Dataset;

/// Crate version, reported by the CLI header and the JSON report.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
