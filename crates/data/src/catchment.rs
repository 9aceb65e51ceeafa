//! Static catchment metadata.

use crate::error::DataError;

/// Station and basin attributes for one gauged catchment.
///
/// Elevation-sensitive models read the band medians; PET computation reads
/// the latitude. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Catchment {
    id: String,
    name: String,
    label: String,
    latitude: f64,
    longitude: f64,
    area: f64,
    elevation_bands: Vec<f64>,
    median_elevation: f64,
}

impl Catchment {
    /// Creates validated catchment metadata.
    ///
    /// `elevation_bands` holds the median elevation of each altitude band,
    /// ordered from lowest to highest.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::NoElevationBands`] if `elevation_bands` is empty,
    /// [`DataError::LatitudeOutOfRange`] for latitudes outside [-90, 90], and
    /// [`DataError::InvalidArea`] for a non-positive or non-finite area.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        label: impl Into<String>,
        latitude: f64,
        longitude: f64,
        area: f64,
        elevation_bands: Vec<f64>,
        median_elevation: f64,
    ) -> Result<Self, DataError> {
        if elevation_bands.is_empty() {
            return Err(DataError::NoElevationBands);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(DataError::LatitudeOutOfRange { latitude });
        }
        if !area.is_finite() || area <= 0.0 {
            return Err(DataError::InvalidArea { area });
        }

        Ok(Self {
            id: id.into(),
            name: name.into(),
            label: label.into(),
            latitude,
            longitude,
            area,
            elevation_bands,
            median_elevation,
        })
    }

    /// Returns the station identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the station name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns the drainage area in km^2.
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Returns the elevation-band medians in metres, lowest first.
    pub fn elevation_bands(&self) -> &[f64] {
        &self.elevation_bands
    }

    /// Returns the catchment median elevation in metres.
    pub fn median_elevation(&self) -> f64 {
        self.median_elevation
    }
}
