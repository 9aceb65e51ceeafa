//! Error types for the naiad-objective crate.

/// Error type for all fallible operations in the naiad-objective crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ObjectiveError {
    /// Returned when observed and simulated series differ in length.
    #[error("observed length {observed} does not match simulated length {simulated}")]
    LengthMismatch {
        /// Length of the observed series.
        observed: usize,
        /// Length of the simulated series.
        simulated: usize,
    },

    /// Returned when the series are empty.
    #[error("cannot score empty series")]
    Empty,

    /// Returned when the observed series has zero variance, which leaves
    /// NSE and KGE undefined.
    #[error("observed series is constant, {metric} is undefined")]
    ConstantObservations {
        /// Name of the metric that cannot be computed.
        metric: &'static str,
    },

    /// Returned when the observed mean is zero, which leaves the KGE bias
    /// ratio undefined.
    #[error("observed series has zero mean, kge bias ratio is undefined")]
    ZeroMeanObservations,

    /// Returned when a log transform meets a non-positive value.
    #[error("log transform requires positive values, got {value} at index {index}")]
    NonPositiveLog {
        /// Index of the offending value.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Returned when a sqrt transform meets a negative value.
    #[error("sqrt transform requires non-negative values, got {value} at index {index}")]
    NegativeSqrt {
        /// Index of the offending value.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Returned when an objective name is not recognised.
    #[error("unknown objective '{name}', valid options: rmse, nse, kge")]
    UnknownObjective {
        /// The unrecognised name.
        name: String,
    },

    /// Returned when a transformation name is not recognised.
    #[error("unknown transformation '{name}', valid options: none, log, sqrt")]
    UnknownTransform {
        /// The unrecognised name.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_strings() {
        let e = ObjectiveError::LengthMismatch {
            observed: 100,
            simulated: 99,
        };
        assert_eq!(
            e.to_string(),
            "observed length 100 does not match simulated length 99"
        );

        let e = ObjectiveError::NonPositiveLog {
            index: 3,
            value: -0.5,
        };
        assert_eq!(
            e.to_string(),
            "log transform requires positive values, got -0.5 at index 3"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<ObjectiveError>();
    }
}
