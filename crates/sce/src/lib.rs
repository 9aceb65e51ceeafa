//! Shuffled complex evolution global optimizer.
//!
//! Minimizes a scalar cost over a box-bounded search space, one shuffle at
//! a time, so callers stay in control between generations (progress
//! reporting, cancellation). The random stream is seeded, so a run is fully
//! reproducible.
//!
//! # Example
//!
//! ```
//! use naiad_sce::{Sce, SceConfig};
//!
//! let config = SceConfig::new().with_n_complexes(3).with_seed(7);
//! let mut sce = Sce::new(config, &[(-5.0, 5.0), (-5.0, 5.0)]).unwrap();
//!
//! let cost = |params: &[f64]| {
//!     Ok::<f64, std::convert::Infallible>(params.iter().map(|p| p * p).sum())
//! };
//!
//! sce.init(cost).unwrap();
//! let generation = sce.step(cost).unwrap();
//! assert!(generation.best_cost.is_finite());
//! ```

mod config;
mod error;
mod optimizer;
mod schema;

pub use config::SceConfig;
pub use error::{SceError, StepError};
pub use optimizer::{Bound, Generation, Sce};
pub use schema::{tuning_params, TuningParam};
