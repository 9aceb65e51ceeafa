//! Error types for the naiad-data crate.

/// Error type for all fallible operations in the naiad-data crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DataError {
    /// Returned when the forcing series have different lengths.
    #[error(
        "forcing series must have the same length \
         (precipitation {precipitation}, temperature {temperature}, \
         pet {pet}, day_of_year {day_of_year}, discharge {discharge})"
    )]
    LengthMismatch {
        /// Length of the precipitation series.
        precipitation: usize,
        /// Length of the temperature series.
        temperature: usize,
        /// Length of the PET series.
        pet: usize,
        /// Length of the day-of-year series.
        day_of_year: usize,
        /// Length of the discharge series.
        discharge: usize,
    },

    /// Returned when the forcing series are empty.
    #[error("forcing must contain at least one day")]
    Empty,

    /// Returned when a day-of-year value falls outside [1, 366].
    #[error("day_of_year[{index}] is {value}, must be in [1, 366]")]
    DayOfYearOutOfRange {
        /// Index of the offending value.
        index: usize,
        /// The offending value.
        value: u16,
    },

    /// Returned when a forcing series contains NaN or infinity.
    #[error("non-finite value in {series} at index {index}")]
    NonFinite {
        /// Name of the offending series.
        series: &'static str,
        /// Index of the offending value.
        index: usize,
    },

    /// Returned when the catchment has no elevation bands.
    #[error("catchment must declare at least one elevation band")]
    NoElevationBands,

    /// Returned when the latitude falls outside [-90, 90].
    #[error("latitude {latitude} out of range [-90, 90]")]
    LatitudeOutOfRange {
        /// The offending latitude in degrees.
        latitude: f64,
    },

    /// Returned when the drainage area is non-positive or non-finite.
    #[error("drainage area must be positive, got {area}")]
    InvalidArea {
        /// The offending area in km^2.
        area: f64,
    },
}
