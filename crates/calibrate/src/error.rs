//! Error types for the naiad-calibrate crate.

use naiad_models::ModelError;
use naiad_objective::ObjectiveError;
use naiad_sce::{SceError, StepError};

/// Error type for a calibration run.
///
/// Input and lookup problems surface before any optimizer work; a model or
/// scoring failure mid-run aborts the whole run.
#[derive(Debug, thiserror::Error)]
pub enum CalibrateError {
    /// Model lookup, composition or simulation failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Scoring or transformation failed.
    #[error(transparent)]
    Objective(#[from] ObjectiveError),

    /// The optimizer rejected its configuration or search space.
    #[error(transparent)]
    Optimizer(#[from] SceError),
}

impl From<StepError<CalibrateError>> for CalibrateError {
    fn from(err: StepError<CalibrateError>) -> Self {
        match err {
            StepError::Sce(e) => Self::Optimizer(e),
            StepError::Evaluate(e) => e,
        }
    }
}
