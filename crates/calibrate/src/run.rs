//! The calibration loop: optimizer driving, progress emission, cancellation.

use naiad_data::{Catchment, Forcing};
use naiad_models::{day_median, ModelSpec, RunoffModel};
use naiad_objective::{Objective, Scores, Transform};
use naiad_sce::{Sce, SceConfig};
use tracing::{debug, info};

use crate::cancel::CancelToken;
use crate::error::CalibrateError;

/// Hard cap on generations, independent of the optimizer's own stopping
/// rules. A run that hits it is returned as not-done.
pub const MAX_GENERATIONS: usize = 100_000;

/// Per-generation update handed to the progress sink.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Whether the optimizer considers the run converged.
    pub done: bool,
    /// Zero-based generation index.
    pub generation: usize,
    /// Cost evaluations spent so far.
    pub n_evaluations: usize,
    /// Best parameter vector so far.
    pub best_params: Vec<f64>,
    /// Discharge simulated with the best parameters.
    pub simulated: Vec<f64>,
    /// All three metrics for the best parameters, on untransformed series.
    pub scores: Scores,
}

/// Final state of a calibration run.
///
/// `done = false` means the run was cancelled or hit the generation cap;
/// the best point found so far is still returned.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationOutcome {
    /// Whether the optimizer converged.
    pub done: bool,
    /// Best parameter vector found.
    pub best_params: Vec<f64>,
    /// Discharge simulated with the best parameters.
    pub simulated: Vec<f64>,
    /// Metrics for the best parameters.
    pub scores: Scores,
    /// Generations run.
    pub generations: usize,
    /// Cost evaluations spent.
    pub n_evaluations: usize,
}

/// Calibrates a model against the observed discharge in `forcing`.
///
/// Binds the model, objective and transformation into a cost evaluator,
/// runs the optimizer one generation at a time, and after every generation
/// emits a [`Progress`] update and polls `cancel`. Cancellation and the
/// generation cap return the best point so far with `done = false` through
/// the normal return path.
///
/// The day-median baseline has a closed-form fit and never goes through the
/// optimizer; it completes in a single progress update.
///
/// # Errors
///
/// Invalid input (degenerate observations, transform domain violations on
/// the observed series) and unimplemented models are rejected before any
/// optimizer work. A model or scoring failure during stepping aborts the
/// run; updates already emitted stay historical.
#[allow(clippy::too_many_arguments)]
pub fn calibrate(
    model: ModelSpec,
    objective: Objective,
    transform: Transform,
    forcing: &Forcing,
    catchment: &Catchment,
    config: SceConfig,
    cancel: &CancelToken,
    mut progress: impl FnMut(&Progress),
) -> Result<CalibrationOutcome, CalibrateError> {
    let (defaults, bounds) = model.init()?;

    let observed = forcing.discharge();
    let observed_transformed = transform.apply(observed)?;
    // Degenerate observations fail here, before any optimizer work.
    objective.cost(&observed_transformed, &observed_transformed)?;
    Scores::compute(observed, observed)?;

    info!(
        model = %model.runoff(),
        snow = model.snow().map(|s| s.name()).unwrap_or("none"),
        objective = objective.name(),
        transform = transform.name(),
        n_params = bounds.len(),
        n_days = observed.len(),
        "starting calibration"
    );

    if model.runoff() == RunoffModel::DayMedian {
        let mut best_params = defaults[..model.n_snow_params()].to_vec();
        best_params.extend(day_median::fit(forcing));
        let simulated = model.simulate(&best_params, forcing, catchment)?;
        let scores = Scores::compute(observed, &simulated)?;

        let update = Progress {
            done: true,
            generation: 0,
            n_evaluations: 1,
            best_params: best_params.clone(),
            simulated: simulated.clone(),
            scores,
        };
        progress(&update);

        info!(rmse = scores.rmse, nse = scores.nse, "closed-form fit complete");
        return Ok(CalibrationOutcome {
            done: true,
            best_params,
            simulated,
            scores,
            generations: 0,
            n_evaluations: 1,
        });
    }

    let mut evaluate = |params: &[f64]| -> Result<f64, CalibrateError> {
        let simulated = model.simulate(params, forcing, catchment)?;
        let simulated_transformed = transform.apply(&simulated)?;
        Ok(objective.cost(&observed_transformed, &simulated_transformed)?)
    };

    let mut sce = Sce::new(config, &bounds)?;
    sce.init(&mut evaluate)?;

    for generation in 0..MAX_GENERATIONS {
        if cancel.is_cancelled() {
            info!(generation, "calibration cancelled");
            return unconverged(&model, forcing, catchment, &sce, generation);
        }

        let step = sce.step(&mut evaluate)?;
        let simulated = model.simulate(&step.best_params, forcing, catchment)?;
        let scores = Scores::compute(observed, &simulated)?;

        debug!(
            generation,
            best_cost = step.best_cost,
            n_evaluations = step.n_evaluations,
            rmse = scores.rmse,
            nse = scores.nse,
            kge = scores.kge,
            "generation complete"
        );

        let update = Progress {
            done: step.done,
            generation,
            n_evaluations: step.n_evaluations,
            best_params: step.best_params.clone(),
            simulated: simulated.clone(),
            scores,
        };
        progress(&update);

        if step.done {
            info!(
                generation,
                n_evaluations = step.n_evaluations,
                rmse = scores.rmse,
                nse = scores.nse,
                kge = scores.kge,
                "calibration converged"
            );
            return Ok(CalibrationOutcome {
                done: true,
                best_params: step.best_params,
                simulated,
                scores,
                generations: generation + 1,
                n_evaluations: step.n_evaluations,
            });
        }
    }

    info!("generation cap reached before convergence");
    unconverged(&model, forcing, catchment, &sce, MAX_GENERATIONS)
}

/// Builds the not-done outcome from the optimizer's best point so far.
fn unconverged(
    model: &ModelSpec,
    forcing: &Forcing,
    catchment: &Catchment,
    sce: &Sce,
    generations: usize,
) -> Result<CalibrationOutcome, CalibrateError> {
    let best_params = sce
        .best_params()
        .ok_or(naiad_sce::SceError::NotInitialized)?
        .to_vec();
    let simulated = model.simulate(&best_params, forcing, catchment)?;
    let scores = Scores::compute(forcing.discharge(), &simulated)?;
    Ok(CalibrationOutcome {
        done: false,
        best_params,
        simulated,
        scores,
        generations,
        n_evaluations: sce.n_evaluations(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use naiad_models::{ModelError, SnowModel};

    fn forcing(n: usize) -> Forcing {
        let precipitation = (0..n)
            .map(|i| if i % 5 == 0 { 9.0 } else { 0.5 })
            .collect();
        let temperature = (0..n).map(|i| 4.0 + 6.0 * ((i % 50) as f64 / 50.0)).collect();
        let pet = vec![2.0; n];
        let day_of_year = (0..n).map(|i| (i % 365) as u16 + 1).collect();
        let discharge = (0..n)
            .map(|i| 1.0 + ((i % 365) as f64 / 60.0).sin().abs())
            .collect();
        Forcing::new(precipitation, temperature, pet, day_of_year, discharge).unwrap()
    }

    fn catchment() -> Catchment {
        Catchment::new("c1", "Test", "Test basin", 46.5, 7.5, 120.0, vec![1200.0], 1200.0)
            .unwrap()
    }

    fn quick_config() -> SceConfig {
        SceConfig::new()
            .with_n_complexes(2)
            .with_max_evaluations(300)
            .with_seed(1)
    }

    #[test]
    fn bucket_is_rejected_before_any_progress() {
        let mut updates = 0;
        let result = calibrate(
            ModelSpec::new(RunoffModel::Bucket, None),
            Objective::Nse,
            Transform::None,
            &forcing(30),
            &catchment(),
            quick_config(),
            &CancelToken::new(),
            |_| updates += 1,
        );
        assert!(matches!(
            result,
            Err(CalibrateError::Model(ModelError::NotImplemented { model: "bucket" }))
        ));
        assert_eq!(updates, 0);
    }

    #[test]
    fn constant_observations_are_rejected_upfront() {
        let n = 30;
        let f = Forcing::new(
            vec![2.0; n],
            vec![5.0; n],
            vec![1.5; n],
            (0..n).map(|i| i as u16 + 1).collect(),
            vec![3.3; n],
        )
        .unwrap();

        let mut updates = 0;
        let result = calibrate(
            ModelSpec::new(RunoffModel::Gr4j, None),
            Objective::Nse,
            Transform::None,
            &f,
            &catchment(),
            quick_config(),
            &CancelToken::new(),
            |_| updates += 1,
        );
        assert!(matches!(result, Err(CalibrateError::Objective(_))));
        assert_eq!(updates, 0);
    }

    #[test]
    fn log_transform_rejects_zero_discharge_upfront() {
        let n = 30;
        let mut discharge = vec![1.0; n];
        discharge[7] = 0.0;
        let f = Forcing::new(
            vec![2.0; n],
            vec![5.0; n],
            vec![1.5; n],
            (0..n).map(|i| i as u16 + 1).collect(),
            discharge,
        )
        .unwrap();

        let result = calibrate(
            ModelSpec::new(RunoffModel::Gr4j, None),
            Objective::Rmse,
            Transform::Log,
            &f,
            &catchment(),
            quick_config(),
            &CancelToken::new(),
            |_| {},
        );
        assert!(matches!(result, Err(CalibrateError::Objective(_))));
    }

    #[test]
    fn day_median_fits_in_closed_form() {
        let f = forcing(730);
        let outcome = calibrate(
            ModelSpec::new(RunoffModel::DayMedian, None),
            Objective::Nse,
            Transform::None,
            &f,
            &catchment(),
            quick_config(),
            &CancelToken::new(),
            |_| {},
        )
        .unwrap();

        assert!(outcome.done);
        assert_eq!(outcome.generations, 0);
        assert_eq!(outcome.best_params.len(), 365);
        // Discharge is an exact function of day-of-year, so the per-day
        // median reproduces it.
        assert_relative_eq!(outcome.scores.rmse, 0.0, epsilon = 1e-12);
        assert_relative_eq!(outcome.scores.nse, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn day_median_with_snow_prefixes_snow_defaults() {
        let outcome = calibrate(
            ModelSpec::new(RunoffModel::DayMedian, Some(SnowModel::CemaNeige)),
            Objective::Rmse,
            Transform::None,
            &forcing(365),
            &catchment(),
            quick_config(),
            &CancelToken::new(),
            |_| {},
        )
        .unwrap();
        assert!(outcome.done);
        assert_eq!(outcome.best_params.len(), 3 + 365);
    }

    #[test]
    fn preset_cancellation_returns_not_done() {
        let cancel = CancelToken::new();
        cancel.cancel();

        let mut updates = 0;
        let outcome = calibrate(
            ModelSpec::new(RunoffModel::Gr4j, None),
            Objective::Kge,
            Transform::None,
            &forcing(120),
            &catchment(),
            quick_config(),
            &cancel,
            |_| updates += 1,
        )
        .unwrap();

        assert!(!outcome.done);
        assert_eq!(outcome.generations, 0);
        assert_eq!(updates, 0, "no generation ran, so no progress");
        assert_eq!(outcome.best_params.len(), 4);
        assert!(outcome.scores.rmse.is_finite());
    }
}
