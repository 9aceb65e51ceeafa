//! Models command: JSON listing of the calibration surface.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;

use naiad_models::{RunoffModel, SnowModel};
use naiad_objective::{Objective, Transform};
use naiad_sce::{tuning_params, TuningParam};

use crate::cli::ModelsArgs;

/// Everything a frontend needs to render a calibration form.
#[derive(Serialize)]
struct ModelsReport {
    runoff: &'static [&'static str],
    /// Snow model names plus `null` for "no snow model".
    snow: Vec<Option<&'static str>>,
    objectives: &'static [&'static str],
    transformations: &'static [&'static str],
    algorithms: BTreeMap<&'static str, Vec<TuningParam>>,
}

/// Print or write the model listing.
pub fn run(args: ModelsArgs) -> Result<()> {
    let mut algorithms = BTreeMap::new();
    algorithms.insert("sce", tuning_params());

    let report = ModelsReport {
        runoff: RunoffModel::NAMES,
        snow: SnowModel::NAMES
            .iter()
            .copied()
            .map(Some)
            .chain([None])
            .collect(),
        objectives: Objective::NAMES,
        transformations: Transform::NAMES,
        algorithms,
    };

    let json =
        serde_json::to_string_pretty(&report).context("failed to serialize model listing")?;
    match args.output {
        Some(path) => std::fs::write(&path, json)
            .with_context(|| format!("failed to write listing: {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
