//! Hydrological model variants and their registry.
//!
//! Every variant follows the same contract: `init` yields a default
//! parameter vector plus per-parameter bounds, `simulate` maps a parameter
//! vector and forcing to a discharge series of the same length,
//! deterministically and without side effects. Model selection is a closed
//! enum with an exhaustive match, so adding a variant is a compile-time
//! checked change.

pub mod cemaneige;
pub mod day_median;
mod error;
pub mod gr4j;
mod registry;

pub use error::ModelError;
pub use registry::{ModelSpec, RunoffModel, SnowModel};

/// Inclusive `(min, max)` bound for one parameter.
pub type Bound = (f64, f64);
