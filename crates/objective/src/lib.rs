//! Goodness-of-fit scoring for hydrological calibration.
//!
//! Metrics compare an observed and a simulated discharge series of equal
//! length and return a scalar score. Shape mismatches and degenerate
//! observations are surfaced as errors, never as silent NaN.

mod error;
mod metrics;
mod transform;

pub use error::ObjectiveError;
pub use metrics::{kge, nse, rmse, Scores};
pub use transform::Transform;

use std::str::FromStr;

/// Which metric the optimizer drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Root-mean-square error, minimized.
    Rmse,
    /// Nash-Sutcliffe efficiency, maximized.
    Nse,
    /// Kling-Gupta efficiency, maximized.
    Kge,
}

impl Objective {
    /// All objective names, in display order.
    pub const NAMES: &'static [&'static str] = &["rmse", "nse", "kge"];

    /// Returns the lowercase name of this objective.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rmse => "rmse",
            Self::Nse => "nse",
            Self::Kge => "kge",
        }
    }

    /// Converts this objective's metric into a cost where lower is better.
    ///
    /// RMSE passes through; the efficiency metrics are negated so a single
    /// minimizing optimizer serves all three.
    ///
    /// # Errors
    ///
    /// Propagates the underlying metric's error.
    pub fn cost(self, observed: &[f64], simulated: &[f64]) -> Result<f64, ObjectiveError> {
        match self {
            Self::Rmse => rmse(observed, simulated),
            Self::Nse => Ok(-nse(observed, simulated)?),
            Self::Kge => Ok(-kge(observed, simulated)?),
        }
    }
}

impl FromStr for Objective {
    type Err = ObjectiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rmse" => Ok(Self::Rmse),
            "nse" => Ok(Self::Nse),
            "kge" => Ok(Self::Kge),
            _ => Err(ObjectiveError::UnknownObjective {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn objective_from_str() {
        assert_eq!("kge".parse::<Objective>().unwrap(), Objective::Kge);
        assert_eq!("NSE".parse::<Objective>().unwrap(), Objective::Nse);
        assert!(matches!(
            "mse".parse::<Objective>(),
            Err(ObjectiveError::UnknownObjective { name }) if name == "mse"
        ));
    }

    #[test]
    fn cost_orientation() {
        let obs = [1.0, 2.0, 3.0, 4.0];
        let sim = [1.1, 2.1, 2.9, 4.0];
        // Perfect fit must always cost less than an imperfect one.
        for objective in [Objective::Rmse, Objective::Nse, Objective::Kge] {
            let perfect = objective.cost(&obs, &obs).unwrap();
            let imperfect = objective.cost(&obs, &sim).unwrap();
            assert!(
                perfect < imperfect,
                "{}: perfect {perfect} not below imperfect {imperfect}",
                objective.name()
            );
        }
    }

    #[test]
    fn cost_of_perfect_fit() {
        let obs = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(Objective::Rmse.cost(&obs, &obs).unwrap(), 0.0);
        assert_relative_eq!(Objective::Nse.cost(&obs, &obs).unwrap(), -1.0);
        assert_relative_eq!(
            Objective::Kge.cost(&obs, &obs).unwrap(),
            -1.0,
            epsilon = 1e-12
        );
    }
}
