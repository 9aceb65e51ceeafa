//! Calibrate command: full calibration run with a JSON report.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use naiad_calibrate::{calibrate, CalibrationOutcome, CancelToken};
use naiad_models::{ModelSpec, RunoffModel, SnowModel};
use naiad_objective::{Objective, Transform};
use naiad_sce::SceConfig;

use crate::cli::CalibrateArgs;
use crate::input;

/// Final calibration report written as JSON.
#[derive(Serialize)]
struct CalibrationReport {
    model: &'static str,
    snow: Option<&'static str>,
    objective: &'static str,
    transform: &'static str,
    done: bool,
    generations: usize,
    n_evaluations: usize,
    params: Vec<f64>,
    /// Present only when every parameter has a schema name.
    named_params: Option<BTreeMap<&'static str, f64>>,
    scores: ScoresReport,
    simulated: Vec<f64>,
}

#[derive(Serialize)]
struct ScoresReport {
    rmse: f64,
    nse: f64,
    kge: f64,
}

/// Run the full calibration pipeline.
pub fn run(args: CalibrateArgs) -> Result<()> {
    let _cmd = info_span!("calibrate").entered();

    let runoff: RunoffModel = args.model.parse()?;
    let snow = args
        .snow
        .as_deref()
        .map(str::parse::<SnowModel>)
        .transpose()?;
    let model = ModelSpec::new(runoff, snow);
    let objective: Objective = args.objective.parse()?;
    let transform: Transform = args.transform.parse()?;

    let catchment = input::read_catchment(&args.catchment)?;
    let forcing = input::read_forcing(&args.forcing, &catchment)?;

    let mut config = SceConfig::new();
    if let Some(v) = args.n_complexes {
        config = config.with_n_complexes(v);
    }
    if let Some(v) = args.k_stop {
        config = config.with_k_stop(v);
    }
    if let Some(v) = args.p_convergence_threshold {
        config = config.with_p_convergence_threshold(v);
    }
    if let Some(v) = args.geometric_range_threshold {
        config = config.with_geometric_range_threshold(v);
    }
    if let Some(v) = args.max_evaluations {
        config = config.with_max_evaluations(v);
    }
    if let Some(v) = args.seed {
        config = config.with_seed(v);
    }

    let outcome = calibrate(
        model,
        objective,
        transform,
        &forcing,
        &catchment,
        config,
        &CancelToken::new(),
        |update| {
            info!(
                generation = update.generation,
                n_evaluations = update.n_evaluations,
                rmse = update.scores.rmse,
                nse = update.scores.nse,
                kge = update.scores.kge,
                "progress"
            );
        },
    )
    .context("calibration failed")?;

    let report = build_report(&model, objective, transform, outcome);
    let json =
        serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn build_report(
    model: &ModelSpec,
    objective: Objective,
    transform: Transform,
    outcome: CalibrationOutcome,
) -> CalibrationReport {
    let named_params = model.runoff().param_names().map(|runoff_names| {
        let snow_names = model
            .snow()
            .map(SnowModel::param_names)
            .unwrap_or_default();
        snow_names
            .iter()
            .chain(runoff_names)
            .copied()
            .zip(outcome.best_params.iter().copied())
            .collect()
    });

    CalibrationReport {
        model: model.runoff().name(),
        snow: model.snow().map(SnowModel::name),
        objective: objective.name(),
        transform: transform.name(),
        done: outcome.done,
        generations: outcome.generations,
        n_evaluations: outcome.n_evaluations,
        named_params,
        scores: ScoresReport {
            rmse: outcome.scores.rmse,
            nse: outcome.scores.nse,
            kge: outcome.scores.kge,
        },
        params: outcome.best_params,
        simulated: outcome.simulated,
    }
}
