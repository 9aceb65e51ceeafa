//! Error types for the naiad-sce crate.

/// Error type for configuration and state problems in the optimizer itself.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SceError {
    /// Returned when `n_complexes` is zero.
    #[error("n_complexes must be at least 1, got {n_complexes}")]
    InvalidComplexes {
        /// The rejected value.
        n_complexes: usize,
    },

    /// Returned when `k_stop` is zero.
    #[error("k_stop must be at least 1, got {k_stop}")]
    InvalidKStop {
        /// The rejected value.
        k_stop: usize,
    },

    /// Returned when a convergence threshold is negative or non-finite.
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidThreshold {
        /// Which threshold was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Returned when `max_evaluations` is zero.
    #[error("max_evaluations must be at least 1, got {max_evaluations}")]
    InvalidMaxEvaluations {
        /// The rejected value.
        max_evaluations: usize,
    },

    /// Returned when the search space has no dimensions.
    #[error("parameter bounds must not be empty")]
    NoBounds,

    /// Returned when a bound pair is non-finite or inverted.
    #[error("bound {index} is invalid: expected finite low < high, got ({low}, {high})")]
    InvalidBound {
        /// Zero-based parameter index.
        index: usize,
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },

    /// Returned when `step` is called before `init`.
    #[error("optimizer has not been initialized")]
    NotInitialized,
}

/// Error type for a single optimizer step, wrapping evaluator failures.
#[derive(Debug, thiserror::Error)]
pub enum StepError<E> {
    /// A state or configuration problem in the optimizer.
    #[error(transparent)]
    Sce(#[from] SceError),

    /// The cost evaluator failed for a candidate point.
    #[error("cost evaluation failed: {0}")]
    Evaluate(E),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_strings() {
        let e = SceError::InvalidComplexes { n_complexes: 0 };
        assert_eq!(e.to_string(), "n_complexes must be at least 1, got 0");

        let e = SceError::InvalidBound {
            index: 2,
            low: 5.0,
            high: 1.0,
        };
        assert_eq!(
            e.to_string(),
            "bound 2 is invalid: expected finite low < high, got (5, 1)"
        );
    }

    #[test]
    fn step_error_wraps_sce_error() {
        let e: StepError<std::convert::Infallible> = SceError::NotInitialized.into();
        assert_eq!(e.to_string(), "optimizer has not been initialized");
    }
}
