//! Declarative description of the optimizer's tuning parameters.
//!
//! Lets frontends render a settings form without hardcoding the algorithm.

use serde::Serialize;

/// One tunable parameter of the optimizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TuningParam {
    /// Field name as accepted by [`crate::SceConfig`].
    pub name: &'static str,
    /// Smallest accepted value.
    pub min: f64,
    /// Largest accepted value, unbounded when `None`.
    pub max: Option<f64>,
    /// Default value.
    pub default: f64,
    /// Suggested input increment.
    pub step: f64,
}

/// Returns the tuning parameters of the optimizer, in display order.
///
/// Defaults here match [`crate::SceConfig::new`].
pub fn tuning_params() -> Vec<TuningParam> {
    vec![
        TuningParam {
            name: "n_complexes",
            min: 1.0,
            max: None,
            default: 25.0,
            step: 1.0,
        },
        TuningParam {
            name: "k_stop",
            min: 1.0,
            max: None,
            default: 10.0,
            step: 1.0,
        },
        TuningParam {
            name: "p_convergence_threshold",
            min: 0.0,
            max: Some(1.0),
            default: 0.001,
            step: 0.001,
        },
        TuningParam {
            name: "geometric_range_threshold",
            min: 0.0,
            max: None,
            default: 0.1,
            step: 0.1,
        },
        TuningParam {
            name: "max_evaluations",
            min: 1.0,
            max: None,
            default: 5000.0,
            step: 1.0,
        },
    ]
}
