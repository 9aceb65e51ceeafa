//! Simulate command: run a model once and write the discharge series.

use std::io::Write;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use naiad_models::{ModelSpec, RunoffModel, SnowModel};

use crate::cli::SimulateArgs;
use crate::input;

/// One row of the simulated discharge CSV.
#[derive(Serialize)]
struct SimulatedRow {
    day: usize,
    day_of_year: u16,
    discharge: f64,
}

/// Run the standalone simulation pipeline.
pub fn run(args: SimulateArgs) -> Result<()> {
    let _cmd = info_span!("simulate").entered();

    let runoff: RunoffModel = args.model.parse()?;
    let snow = args
        .snow
        .as_deref()
        .map(str::parse::<SnowModel>)
        .transpose()?;
    let model = ModelSpec::new(runoff, snow);

    let catchment = input::read_catchment(&args.catchment)?;
    let forcing = input::read_forcing(&args.forcing, &catchment)?;

    let (defaults, _) = model.init()?;
    let params = match args.params {
        Some(params) => {
            if params.len() != defaults.len() {
                bail!(
                    "expected {} params for this model, got {}",
                    defaults.len(),
                    params.len()
                );
            }
            params
        }
        None => defaults,
    };

    info!(model = %runoff, n_days = forcing.len(), "simulating");
    let simulated = model.simulate(&params, &forcing, &catchment)?;

    match args.output {
        Some(path) => {
            let writer = csv::Writer::from_path(&path)
                .with_context(|| format!("failed to open output: {}", path.display()))?;
            write_rows(writer, forcing.day_of_year(), &simulated)?;
            info!(path = %path.display(), "simulation written");
        }
        None => write_rows(
            csv::Writer::from_writer(std::io::stdout()),
            forcing.day_of_year(),
            &simulated,
        )?,
    }
    Ok(())
}

fn write_rows<W: Write>(
    mut writer: csv::Writer<W>,
    day_of_year: &[u16],
    simulated: &[f64],
) -> Result<()> {
    for (day, (&doy, &discharge)) in day_of_year.iter().zip(simulated).enumerate() {
        writer
            .serialize(SimulatedRow {
                day,
                day_of_year: doy,
                discharge,
            })
            .context("failed to write simulated row")?;
    }
    writer.flush().context("failed to flush output")?;
    Ok(())
}
