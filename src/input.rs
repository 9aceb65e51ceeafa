//! Forcing CSV and catchment JSON input.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use naiad_data::{Catchment, Forcing};

/// One row of the daily forcing CSV.
#[derive(Debug, Deserialize)]
struct ForcingRecord {
    precipitation: f64,
    temperature: f64,
    #[serde(default)]
    pet: Option<f64>,
    day_of_year: u16,
    discharge: f64,
}

/// Catchment metadata file layout.
#[derive(Debug, Deserialize)]
struct CatchmentFile {
    id: String,
    name: String,
    label: String,
    latitude: f64,
    longitude: f64,
    area: f64,
    elevation_bands: Vec<f64>,
    median_elevation: f64,
}

/// Reads and validates catchment metadata from JSON.
pub fn read_catchment(path: &Path) -> Result<Catchment> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catchment file: {}", path.display()))?;
    let file: CatchmentFile =
        serde_json::from_str(&json).context("failed to parse catchment JSON")?;
    let catchment = Catchment::new(
        file.id,
        file.name,
        file.label,
        file.latitude,
        file.longitude,
        file.area,
        file.elevation_bands,
        file.median_elevation,
    )
    .context("invalid catchment metadata")?;
    Ok(catchment)
}

/// Reads the daily forcing CSV and builds the validated dataset.
///
/// The `pet` column is optional; when any value is missing the whole series
/// is computed with the Oudin formula from temperature, day-of-year and the
/// catchment latitude.
pub fn read_forcing(path: &Path, catchment: &Catchment) -> Result<Forcing> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open forcing file: {}", path.display()))?;

    let mut precipitation = Vec::new();
    let mut temperature = Vec::new();
    let mut pet = Vec::new();
    let mut day_of_year = Vec::new();
    let mut discharge = Vec::new();

    for (row, record) in reader.deserialize().enumerate() {
        let record: ForcingRecord =
            record.with_context(|| format!("invalid forcing record at row {}", row + 2))?;
        precipitation.push(record.precipitation);
        temperature.push(record.temperature);
        pet.push(record.pet);
        day_of_year.push(record.day_of_year);
        discharge.push(record.discharge);
    }

    let pet = if pet.iter().all(Option::is_some) {
        pet.into_iter().flatten().collect()
    } else {
        info!(
            latitude = catchment.latitude(),
            "pet column incomplete, computing Oudin PET"
        );
        naiad_pet::oudin(&temperature, &day_of_year, catchment.latitude())
            .context("PET computation failed")?
    };

    let forcing = Forcing::new(precipitation, temperature, pet, day_of_year, discharge)
        .context("invalid forcing data")?;
    info!(n_days = forcing.len(), path = %path.display(), "forcing loaded");
    Ok(forcing)
}
