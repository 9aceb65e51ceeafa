//! Calibration orchestrator.
//!
//! Glues a model variant, an objective and a transformation to the
//! optimizer, drives it one generation at a time, and reports progress
//! through a caller-supplied sink. Cancellation is cooperative: a shared
//! [`CancelToken`] is polled between generations and an interrupted run
//! returns its best point so far with `done = false` rather than an error.

mod cancel;
mod error;
mod run;

pub use cancel::CancelToken;
pub use error::CalibrateError;
pub use run::{calibrate, CalibrationOutcome, Progress, MAX_GENERATIONS};
