//! Error types for the naiad-models crate.

use naiad_data::DataError;

/// Error type for all fallible operations in the naiad-models crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ModelError {
    /// Returned when a model name is not recognised.
    #[error("unknown model '{name}', valid options: {valid}")]
    UnknownModel {
        /// The unrecognised name.
        name: String,
        /// Comma-separated list of valid names.
        valid: &'static str,
    },

    /// Returned when a declared model variant has no implementation.
    #[error("model '{model}' is not implemented")]
    NotImplemented {
        /// Name of the unimplemented variant.
        model: &'static str,
    },

    /// Returned when the parameter vector length does not match the model's
    /// schema.
    #[error("expected {expected} params, got {got}")]
    ParamsMismatch {
        /// Number of parameters the model expects.
        expected: usize,
        /// Number of parameters received.
        got: usize,
    },

    /// Propagated when rebuilding forcing for a chained model fails.
    #[error(transparent)]
    Data(#[from] DataError),
}
