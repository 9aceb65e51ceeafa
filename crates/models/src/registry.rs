//! Closed model registry and snow/runoff composition.

use std::fmt;
use std::str::FromStr;

use naiad_data::{Catchment, Forcing};

use crate::error::ModelError;
use crate::{cemaneige, day_median, gr4j, Bound};

/// Rainfall-runoff model variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunoffModel {
    /// Day-of-year median climatology.
    DayMedian,
    /// GR4J four-parameter reservoir model.
    Gr4j,
    /// Declared but unimplemented placeholder.
    Bucket,
}

/// Snow accumulation/melt pre-model variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnowModel {
    /// CemaNeige elevation-band snow model.
    CemaNeige,
}

impl RunoffModel {
    /// All runoff model names, in display order.
    pub const NAMES: &'static [&'static str] = &["day_median", "gr4j", "bucket"];

    /// Returns the lowercase name of this variant.
    pub fn name(self) -> &'static str {
        match self {
            Self::DayMedian => "day_median",
            Self::Gr4j => "gr4j",
            Self::Bucket => "bucket",
        }
    }

    /// Returns default parameters and bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotImplemented`] for [`RunoffModel::Bucket`].
    pub fn init(self) -> Result<(Vec<f64>, Vec<Bound>), ModelError> {
        match self {
            Self::DayMedian => Ok(day_median::init()),
            Self::Gr4j => Ok(gr4j::init()),
            Self::Bucket => Err(ModelError::NotImplemented { model: "bucket" }),
        }
    }

    /// Named parameters, `None` for variants with positional schemas.
    pub fn param_names(self) -> Option<&'static [&'static str]> {
        match self {
            Self::DayMedian => None,
            Self::Gr4j => Some(&gr4j::PARAM_NAMES),
            Self::Bucket => None,
        }
    }

    /// Simulates daily discharge for the forcing period.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotImplemented`] for [`RunoffModel::Bucket`]
    /// and [`ModelError::ParamsMismatch`] for a wrong parameter count.
    pub fn simulate(self, params: &[f64], forcing: &Forcing) -> Result<Vec<f64>, ModelError> {
        match self {
            Self::DayMedian => day_median::simulate(params, forcing),
            Self::Gr4j => gr4j::simulate(params, forcing.precipitation(), forcing.pet()),
            Self::Bucket => Err(ModelError::NotImplemented { model: "bucket" }),
        }
    }
}

impl SnowModel {
    /// All snow model names, in display order.
    pub const NAMES: &'static [&'static str] = &["cemaneige"];

    /// Returns the lowercase name of this variant.
    pub fn name(self) -> &'static str {
        match self {
            Self::CemaNeige => "cemaneige",
        }
    }

    /// Returns default parameters and bounds.
    pub fn init(self) -> (Vec<f64>, Vec<Bound>) {
        match self {
            Self::CemaNeige => cemaneige::init(),
        }
    }

    /// Named parameters, in schema order.
    pub fn param_names(self) -> &'static [&'static str] {
        match self {
            Self::CemaNeige => &cemaneige::PARAM_NAMES,
        }
    }

    /// Simulates effective liquid water for the forcing period.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ParamsMismatch`] for a wrong parameter count.
    pub fn simulate(
        self,
        params: &[f64],
        forcing: &Forcing,
        catchment: &Catchment,
    ) -> Result<Vec<f64>, ModelError> {
        match self {
            Self::CemaNeige => cemaneige::simulate(params, forcing, catchment),
        }
    }
}

impl FromStr for RunoffModel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day_median" => Ok(Self::DayMedian),
            "gr4j" => Ok(Self::Gr4j),
            "bucket" => Ok(Self::Bucket),
            _ => Err(ModelError::UnknownModel {
                name: s.to_string(),
                valid: "day_median, gr4j, bucket",
            }),
        }
    }
}

impl FromStr for SnowModel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cemaneige" => Ok(Self::CemaNeige),
            _ => Err(ModelError::UnknownModel {
                name: s.to_string(),
                valid: "cemaneige",
            }),
        }
    }
}

impl fmt::Display for RunoffModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for SnowModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A runoff model optionally chained behind a snow pre-model.
///
/// With a snow model present, the combined parameter vector holds the snow
/// parameters first; the snow model's effective liquid output replaces raw
/// precipitation before the runoff model runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSpec {
    runoff: RunoffModel,
    snow: Option<SnowModel>,
}

impl ModelSpec {
    /// Creates a model specification.
    pub fn new(runoff: RunoffModel, snow: Option<SnowModel>) -> Self {
        Self { runoff, snow }
    }

    /// Returns the runoff model variant.
    pub fn runoff(&self) -> RunoffModel {
        self.runoff
    }

    /// Returns the snow model variant, if chained.
    pub fn snow(&self) -> Option<SnowModel> {
        self.snow
    }

    /// Number of leading parameters consumed by the snow model.
    pub fn n_snow_params(&self) -> usize {
        match self.snow {
            Some(snow) => snow.init().0.len(),
            None => 0,
        }
    }

    /// Returns concatenated defaults and bounds, snow parameters first.
    ///
    /// # Errors
    ///
    /// Propagates [`ModelError::NotImplemented`] from the runoff model.
    pub fn init(&self) -> Result<(Vec<f64>, Vec<Bound>), ModelError> {
        let (mut defaults, mut bounds) = match self.snow {
            Some(snow) => snow.init(),
            None => (Vec::new(), Vec::new()),
        };
        let (runoff_defaults, runoff_bounds) = self.runoff.init()?;
        defaults.extend(runoff_defaults);
        bounds.extend(runoff_bounds);
        Ok((defaults, bounds))
    }

    /// Simulates discharge for the combined parameter vector.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ParamsMismatch`] if the vector is shorter than
    /// the snow schema, and propagates any model error.
    pub fn simulate(
        &self,
        params: &[f64],
        forcing: &Forcing,
        catchment: &Catchment,
    ) -> Result<Vec<f64>, ModelError> {
        match self.snow {
            Some(snow) => {
                let n_snow = self.n_snow_params();
                if params.len() < n_snow {
                    return Err(ModelError::ParamsMismatch {
                        expected: n_snow,
                        got: params.len(),
                    });
                }
                let (snow_params, runoff_params) = params.split_at(n_snow);
                let effective = snow.simulate(snow_params, forcing, catchment)?;
                let chained = forcing.with_precipitation(effective)?;
                self.runoff.simulate(runoff_params, &chained)
            }
            None => self.runoff.simulate(params, forcing),
        }
    }
}
