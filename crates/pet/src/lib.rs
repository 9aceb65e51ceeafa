//! Daily potential evapotranspiration after Oudin et al. (2005).
//!
//! The Oudin formula needs only daily mean temperature, the day of year and
//! the station latitude, which makes it the default PET source when the
//! forcing input carries no PET column.

use std::f64::consts::PI;

/// Solar constant in MJ m^-2 min^-1.
const GSC: f64 = 0.082;
/// Water density in kg/m^3.
const RHO: f64 = 1000.0;

/// Error type for all fallible operations in the naiad-pet crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PetError {
    /// Returned when temperature and day-of-year series differ in length.
    #[error("temperature length {temperature} does not match day_of_year length {day_of_year}")]
    LengthMismatch {
        /// Length of the temperature series.
        temperature: usize,
        /// Length of the day-of-year series.
        day_of_year: usize,
    },

    /// Returned when the latitude falls outside [-90, 90].
    #[error("latitude {latitude} out of range [-90, 90]")]
    LatitudeOutOfRange {
        /// The offending latitude in degrees.
        latitude: f64,
    },
}

/// Computes daily PET in mm/day from temperature, day of year and latitude.
///
/// # Errors
///
/// Returns [`PetError::LengthMismatch`] if the series differ in length and
/// [`PetError::LatitudeOutOfRange`] for latitudes outside [-90, 90].
pub fn oudin(
    temperature: &[f64],
    day_of_year: &[u16],
    latitude: f64,
) -> Result<Vec<f64>, PetError> {
    if temperature.len() != day_of_year.len() {
        return Err(PetError::LengthMismatch {
            temperature: temperature.len(),
            day_of_year: day_of_year.len(),
        });
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(PetError::LatitudeOutOfRange { latitude });
    }

    let lat_rad = latitude.to_radians();
    let mut pet = Vec::with_capacity(temperature.len());

    for (&temp, &doy) in temperature.iter().zip(day_of_year) {
        let doy = f64::from(doy);
        // Latent heat of vaporization (MJ/kg).
        let lambda = 2.501 - 0.002361 * temp;
        // Solar declination (rad).
        let declination = 0.409 * (2.0 * PI / 365.0 * doy - 1.39).sin();
        // Inverse relative Earth-Sun distance.
        let dr = 1.0 + 0.033 * (doy * 2.0 * PI / 365.0).cos();
        // Sunset hour angle (rad); clamp keeps polar day/night in domain.
        let omega = (-lat_rad.tan() * declination.tan()).clamp(-1.0, 1.0).acos();
        // Extraterrestrial radiation (MJ m^-2 day^-1).
        let re = 24.0 * 60.0 / PI
            * GSC
            * dr
            * (omega * lat_rad.sin() * declination.sin()
                + lat_rad.cos() * declination.cos() * omega.sin());

        pet.push((re / (lambda * RHO) * (temp + 5.0) / 100.0 * 1000.0).max(0.0));
    }

    Ok(pet)
}
