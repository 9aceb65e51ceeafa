//! Daily forcing dataset.

use crate::error::DataError;

/// Aligned daily series driving a model run.
///
/// Position `i` across all series refers to the same calendar day. The series
/// are contiguous and gap-free; gap filling is the data-acquisition layer's
/// job, not this crate's.
#[derive(Debug, Clone)]
pub struct Forcing {
    precipitation: Vec<f64>,
    temperature: Vec<f64>,
    pet: Vec<f64>,
    day_of_year: Vec<u16>,
    discharge: Vec<f64>,
}

impl Forcing {
    /// Creates a validated forcing dataset.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::LengthMismatch`] if the series differ in length,
    /// [`DataError::Empty`] if they contain no days,
    /// [`DataError::DayOfYearOutOfRange`] if a day-of-year value falls
    /// outside [1, 366], and [`DataError::NonFinite`] if any series contains
    /// NaN or infinity.
    pub fn new(
        precipitation: Vec<f64>,
        temperature: Vec<f64>,
        pet: Vec<f64>,
        day_of_year: Vec<u16>,
        discharge: Vec<f64>,
    ) -> Result<Self, DataError> {
        let n = precipitation.len();
        if temperature.len() != n
            || pet.len() != n
            || day_of_year.len() != n
            || discharge.len() != n
        {
            return Err(DataError::LengthMismatch {
                precipitation: n,
                temperature: temperature.len(),
                pet: pet.len(),
                day_of_year: day_of_year.len(),
                discharge: discharge.len(),
            });
        }
        if n == 0 {
            return Err(DataError::Empty);
        }
        for (index, &value) in day_of_year.iter().enumerate() {
            if !(1..=366).contains(&value) {
                return Err(DataError::DayOfYearOutOfRange { index, value });
            }
        }
        for (series, values) in [
            ("precipitation", &precipitation),
            ("temperature", &temperature),
            ("pet", &pet),
            ("discharge", &discharge),
        ] {
            if let Some(index) = values.iter().position(|v| !v.is_finite()) {
                return Err(DataError::NonFinite { series, index });
            }
        }

        Ok(Self {
            precipitation,
            temperature,
            pet,
            day_of_year,
            discharge,
        })
    }

    /// Returns the number of days.
    pub fn len(&self) -> usize {
        self.precipitation.len()
    }

    /// Returns true if the dataset is empty (never the case post-validation).
    pub fn is_empty(&self) -> bool {
        self.precipitation.is_empty()
    }

    /// Returns the daily precipitation in mm/day.
    pub fn precipitation(&self) -> &[f64] {
        &self.precipitation
    }

    /// Returns the daily mean temperature in degC.
    pub fn temperature(&self) -> &[f64] {
        &self.temperature
    }

    /// Returns the daily potential evapotranspiration in mm/day.
    pub fn pet(&self) -> &[f64] {
        &self.pet
    }

    /// Returns the day-of-year index, 1-366.
    pub fn day_of_year(&self) -> &[u16] {
        &self.day_of_year
    }

    /// Returns the observed discharge in mm/day.
    pub fn discharge(&self) -> &[f64] {
        &self.discharge
    }

    /// Returns a copy of this forcing with the precipitation series replaced.
    ///
    /// Used to chain a snow pre-model: its effective liquid output stands in
    /// for raw precipitation when driving the downstream runoff model.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::LengthMismatch`] if `precipitation` has a
    /// different length than the existing series.
    pub fn with_precipitation(&self, precipitation: Vec<f64>) -> Result<Self, DataError> {
        Self::new(
            precipitation,
            self.temperature.clone(),
            self.pet.clone(),
            self.day_of_year.clone(),
            self.discharge.clone(),
        )
    }
}
