//! Configuration for the shuffled complex evolution optimizer.

use serde::{Deserialize, Serialize};

use crate::error::SceError;

/// Tuning parameters for a shuffled complex evolution run.
///
/// The complex geometry (points per complex, simplex size, evolution steps
/// per shuffle) is derived from the number of search dimensions; only the
/// number of complexes, the stopping rules, and the seed are configurable.
///
/// # Example
///
/// ```
/// use naiad_sce::SceConfig;
///
/// let config = SceConfig::new()
///     .with_n_complexes(5)
///     .with_max_evaluations(2000)
///     .with_seed(42);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceConfig {
    /// Number of complexes the population is shuffled into.
    n_complexes: usize,
    /// Window length for the relative-improvement stopping rule.
    k_stop: usize,
    /// Stop when the best cost changed less than this percentage over the
    /// last `k_stop` shuffles.
    p_convergence_threshold: f64,
    /// Stop when the normalized geometric range of the population drops
    /// below this value.
    geometric_range_threshold: f64,
    /// Stop once this many cost evaluations have been spent.
    max_evaluations: usize,
    /// Seed for the deterministic random stream.
    seed: u64,
}

impl SceConfig {
    /// Creates a configuration with the standard defaults.
    ///
    /// Defaults: `n_complexes = 25`, `k_stop = 10`,
    /// `p_convergence_threshold = 0.001`, `geometric_range_threshold = 0.1`,
    /// `max_evaluations = 5000`, `seed = 42`.
    pub fn new() -> Self {
        Self {
            n_complexes: 25,
            k_stop: 10,
            p_convergence_threshold: 0.001,
            geometric_range_threshold: 0.1,
            max_evaluations: 5000,
            seed: 42,
        }
    }

    /// Sets the number of complexes.
    pub fn with_n_complexes(mut self, n_complexes: usize) -> Self {
        self.n_complexes = n_complexes;
        self
    }

    /// Sets the window length for the relative-improvement stopping rule.
    pub fn with_k_stop(mut self, k_stop: usize) -> Self {
        self.k_stop = k_stop;
        self
    }

    /// Sets the relative-improvement threshold, in percent.
    pub fn with_p_convergence_threshold(mut self, threshold: f64) -> Self {
        self.p_convergence_threshold = threshold;
        self
    }

    /// Sets the normalized geometric range threshold.
    pub fn with_geometric_range_threshold(mut self, threshold: f64) -> Self {
        self.geometric_range_threshold = threshold;
        self
    }

    /// Sets the evaluation budget.
    pub fn with_max_evaluations(mut self, max_evaluations: usize) -> Self {
        self.max_evaluations = max_evaluations;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the number of complexes.
    pub fn n_complexes(&self) -> usize {
        self.n_complexes
    }

    /// Returns the improvement-window length.
    pub fn k_stop(&self) -> usize {
        self.k_stop
    }

    /// Returns the relative-improvement threshold, in percent.
    pub fn p_convergence_threshold(&self) -> f64 {
        self.p_convergence_threshold
    }

    /// Returns the normalized geometric range threshold.
    pub fn geometric_range_threshold(&self) -> f64 {
        self.geometric_range_threshold
    }

    /// Returns the evaluation budget.
    pub fn max_evaluations(&self) -> usize {
        self.max_evaluations
    }

    /// Returns the random seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), SceError> {
        if self.n_complexes < 1 {
            return Err(SceError::InvalidComplexes {
                n_complexes: self.n_complexes,
            });
        }
        if self.k_stop < 1 {
            return Err(SceError::InvalidKStop { k_stop: self.k_stop });
        }
        if !self.p_convergence_threshold.is_finite() || self.p_convergence_threshold < 0.0 {
            return Err(SceError::InvalidThreshold {
                name: "p_convergence_threshold",
                value: self.p_convergence_threshold,
            });
        }
        if !self.geometric_range_threshold.is_finite() || self.geometric_range_threshold < 0.0 {
            return Err(SceError::InvalidThreshold {
                name: "geometric_range_threshold",
                value: self.geometric_range_threshold,
            });
        }
        if self.max_evaluations < 1 {
            return Err(SceError::InvalidMaxEvaluations {
                max_evaluations: self.max_evaluations,
            });
        }
        Ok(())
    }
}

impl Default for SceConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = SceConfig::default();
        assert_eq!(cfg.n_complexes(), 25);
        assert_eq!(cfg.k_stop(), 10);
        assert!((cfg.p_convergence_threshold() - 0.001).abs() < f64::EPSILON);
        assert!((cfg.geometric_range_threshold() - 0.1).abs() < f64::EPSILON);
        assert_eq!(cfg.max_evaluations(), 5000);
        assert_eq!(cfg.seed(), 42);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_chaining() {
        let cfg = SceConfig::new()
            .with_n_complexes(4)
            .with_k_stop(5)
            .with_p_convergence_threshold(0.01)
            .with_geometric_range_threshold(0.001)
            .with_max_evaluations(200)
            .with_seed(7);
        assert_eq!(cfg.n_complexes(), 4);
        assert_eq!(cfg.k_stop(), 5);
        assert!((cfg.p_convergence_threshold() - 0.01).abs() < f64::EPSILON);
        assert!((cfg.geometric_range_threshold() - 0.001).abs() < f64::EPSILON);
        assert_eq!(cfg.max_evaluations(), 200);
        assert_eq!(cfg.seed(), 7);
    }

    #[test]
    fn validate_rejects_zero_complexes() {
        let result = SceConfig::new().with_n_complexes(0).validate();
        assert!(matches!(
            result,
            Err(SceError::InvalidComplexes { n_complexes: 0 })
        ));
    }

    #[test]
    fn validate_rejects_zero_k_stop() {
        let result = SceConfig::new().with_k_stop(0).validate();
        assert!(matches!(result, Err(SceError::InvalidKStop { k_stop: 0 })));
    }

    #[test]
    fn validate_rejects_bad_thresholds() {
        for bad in [-0.1, f64::NAN, f64::INFINITY] {
            let result = SceConfig::new().with_p_convergence_threshold(bad).validate();
            assert!(matches!(
                result,
                Err(SceError::InvalidThreshold {
                    name: "p_convergence_threshold",
                    ..
                })
            ));
            let result = SceConfig::new()
                .with_geometric_range_threshold(bad)
                .validate();
            assert!(matches!(
                result,
                Err(SceError::InvalidThreshold {
                    name: "geometric_range_threshold",
                    ..
                })
            ));
        }
    }

    #[test]
    fn validate_rejects_zero_budget() {
        let result = SceConfig::new().with_max_evaluations(0).validate();
        assert!(matches!(
            result,
            Err(SceError::InvalidMaxEvaluations { max_evaluations: 0 })
        ));
    }

    #[test]
    fn serde_round_trip() {
        let cfg = SceConfig::new().with_n_complexes(3).with_seed(99);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
