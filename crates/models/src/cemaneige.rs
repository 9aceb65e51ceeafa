//! CemaNeige snow accumulation and melt pre-model (Valery et al., 2014).
//!
//! Three parameters:
//! - `ctg` thermal-state inertia of the pack, dimensionless
//! - `kf` degree-day melt factor (mm/degC/day)
//! - `qnbv` melt-threshold pack depth (mm)
//!
//! The catchment is split into elevation bands; precipitation phase, pack
//! thermal state and melt are tracked per band using an altitudinal
//! temperature gradient, then aggregated into an effective liquid-water
//! series that feeds a downstream rainfall-runoff model.
//!
//! Mass is conserved: summed band precipitation equals liquid output plus
//! the change in pack storage over any simulated period.

use naiad_data::{Catchment, Forcing};

use crate::error::ModelError;
use crate::Bound;

/// Ordered parameter names.
pub const PARAM_NAMES: [&str; 3] = ["ctg", "kf", "qnbv"];

const BOUNDS: [Bound; 3] = [(0.0, 1.0), (0.0, 20.0), (50.0, 800.0)];
const DEFAULTS: [f64; 3] = [0.25, 3.74, 350.0];

/// Altitudinal precipitation correction exponent; zero keeps band
/// precipitation uniform.
const BETA: f64 = 0.0;
/// Minimum melt-rate fraction for a shallow pack.
const VMIN: f64 = 0.1;
/// Thermal-state threshold above which melt can occur (degC).
const TF: f64 = 0.0;

/// Daily altitudinal temperature gradient (degC per 100 m), one entry per
/// calendar day of a 365-day year.
#[allow(clippy::approx_constant)]
const TEMPERATURE_GRADIENT: [f64; 365] = [
    -0.376, -0.374, -0.371, -0.368, -0.366, -0.363, -0.361, -0.358, -0.355,
    -0.353, -0.350, -0.348, -0.345, -0.343, -0.340, -0.337, -0.335, -0.332,
    -0.329, -0.327, -0.324, -0.321, -0.319, -0.316, -0.313, -0.311, -0.308,
    -0.305, -0.303, -0.300, -0.297, -0.295, -0.292, -0.289, -0.287, -0.284,
    -0.281, -0.279, -0.276, -0.273, -0.271, -0.268, -0.265, -0.263, -0.260,
    -0.262, -0.264, -0.266, -0.268, -0.270, -0.272, -0.274, -0.277, -0.279,
    -0.281, -0.283, -0.285, -0.287, -0.289, -0.291, -0.293, -0.295, -0.297,
    -0.299, -0.301, -0.303, -0.306, -0.308, -0.310, -0.312, -0.314, -0.316,
    -0.318, -0.320, -0.323, -0.326, -0.330, -0.333, -0.336, -0.339, -0.343,
    -0.346, -0.349, -0.352, -0.355, -0.359, -0.362, -0.365, -0.368, -0.372,
    -0.375, -0.378, -0.381, -0.385, -0.388, -0.391, -0.394, -0.397, -0.401,
    -0.404, -0.407, -0.410, -0.414, -0.417, -0.420, -0.420, -0.421, -0.421,
    -0.421, -0.422, -0.422, -0.422, -0.423, -0.423, -0.423, -0.424, -0.424,
    -0.424, -0.425, -0.425, -0.425, -0.426, -0.426, -0.426, -0.427, -0.427,
    -0.427, -0.428, -0.428, -0.428, -0.429, -0.429, -0.429, -0.430, -0.430,
    -0.428, -0.425, -0.423, -0.421, -0.419, -0.416, -0.414, -0.412, -0.410,
    -0.407, -0.405, -0.403, -0.401, -0.398, -0.396, -0.394, -0.392, -0.389,
    -0.387, -0.385, -0.383, -0.380, -0.378, -0.376, -0.374, -0.371, -0.369,
    -0.367, -0.365, -0.362, -0.360, -0.362, -0.365, -0.367, -0.369, -0.372,
    -0.374, -0.376, -0.379, -0.381, -0.383, -0.386, -0.388, -0.390, -0.393,
    -0.395, -0.397, -0.400, -0.402, -0.404, -0.407, -0.409, -0.411, -0.414,
    -0.416, -0.418, -0.421, -0.423, -0.425, -0.428, -0.430, -0.431, -0.431,
    -0.432, -0.433, -0.433, -0.434, -0.435, -0.435, -0.436, -0.436, -0.437,
    -0.438, -0.438, -0.439, -0.440, -0.440, -0.441, -0.442, -0.442, -0.443,
    -0.444, -0.444, -0.445, -0.445, -0.446, -0.447, -0.447, -0.448, -0.449,
    -0.449, -0.450, -0.448, -0.447, -0.445, -0.444, -0.442, -0.440, -0.439,
    -0.437, -0.435, -0.434, -0.432, -0.431, -0.429, -0.427, -0.426, -0.424,
    -0.423, -0.421, -0.419, -0.418, -0.416, -0.415, -0.413, -0.411, -0.410,
    -0.408, -0.406, -0.405, -0.403, -0.402, -0.400, -0.403, -0.405, -0.408,
    -0.411, -0.413, -0.416, -0.419, -0.421, -0.424, -0.427, -0.429, -0.432,
    -0.435, -0.437, -0.440, -0.443, -0.445, -0.448, -0.451, -0.453, -0.456,
    -0.459, -0.461, -0.464, -0.467, -0.469, -0.472, -0.475, -0.477, -0.480,
    -0.482, -0.483, -0.485, -0.486, -0.488, -0.490, -0.491, -0.493, -0.495,
    -0.496, -0.498, -0.499, -0.501, -0.503, -0.504, -0.506, -0.507, -0.509,
    -0.511, -0.512, -0.514, -0.515, -0.517, -0.519, -0.520, -0.522, -0.524,
    -0.525, -0.527, -0.528, -0.530, -0.526, -0.523, -0.519, -0.515, -0.512,
    -0.508, -0.504, -0.501, -0.497, -0.493, -0.490, -0.486, -0.482, -0.479,
    -0.475, -0.471, -0.468, -0.464, -0.460, -0.457, -0.453, -0.449, -0.446,
    -0.442, -0.438, -0.435, -0.431, -0.427, -0.424, -0.420, -0.417, -0.415,
    -0.412, -0.410, -0.407, -0.405, -0.402, -0.399, -0.397, -0.394, -0.392,
    -0.389, -0.386, -0.384, -0.381, -0.379,
];

/// Returns default parameters and per-parameter bounds.
pub fn init() -> (Vec<f64>, Vec<Bound>) {
    (DEFAULTS.to_vec(), BOUNDS.to_vec())
}

/// Simulates effective liquid water (rain + melt) in mm/day.
///
/// # Errors
///
/// Returns [`ModelError::ParamsMismatch`] unless exactly 3 parameters are
/// given.
pub fn simulate(
    params: &[f64],
    forcing: &Forcing,
    catchment: &Catchment,
) -> Result<Vec<f64>, ModelError> {
    let [ctg, kf, qnbv]: [f64; 3] =
        params
            .try_into()
            .map_err(|_| ModelError::ParamsMismatch {
                expected: 3,
                got: params.len(),
            })?;

    let bands = catchment.elevation_bands();
    let median_elevation = catchment.median_elevation();
    let n_bands = bands.len();
    let melt_threshold = qnbv * 0.9;

    // Per-band temperature offset in gradient units (per 100 m).
    let elevation_offsets: Vec<f64> = bands
        .iter()
        .map(|&z| (z - median_elevation) / 100.0)
        .collect();

    let precip_weights: Vec<f64> = bands
        .iter()
        .map(|&z| (BETA * (z - median_elevation)).exp())
        .collect();
    let normalization: f64 = precip_weights.iter().sum();

    let mut snowpack = vec![0.0; n_bands];
    let mut thermal_state = vec![0.0; n_bands];
    let mut band_temperature = vec![0.0; n_bands];

    let mut effective = Vec::with_capacity(forcing.len());

    for ((&temperature, &precipitation), &doy) in forcing
        .temperature()
        .iter()
        .zip(forcing.precipitation())
        .zip(forcing.day_of_year())
    {
        let gradient = TEMPERATURE_GRADIENT[(doy as usize - 1) % 365];

        let mut liquid = 0.0;
        let mut melt = 0.0;

        // Accumulation pass: phase split and thermal-state update per band.
        for i in 0..n_bands {
            let t_band = elevation_offsets[i] * gradient + temperature;
            band_temperature[i] = t_band;

            let p_band = precipitation * precip_weights[i] / normalization;

            let solid_fraction = if t_band > 3.0 {
                0.0
            } else if t_band < -1.0 {
                1.0
            } else {
                1.0 - (t_band + 1.0) / 4.0
            };

            let p_solid = solid_fraction * p_band;
            liquid += p_band - p_solid;
            snowpack[i] += p_solid;

            thermal_state[i] =
                (thermal_state[i] * ctg + t_band * (1.0 - ctg)).min(0.0);
        }

        // Melt pass: degree-day melt limited by the pack, damped for
        // shallow packs.
        for i in 0..n_bands {
            let t_band = band_temperature[i];

            let potential = if thermal_state[i] >= TF && t_band > 0.0 {
                snowpack[i].min((t_band - TF) * kf)
            } else {
                0.0
            };

            let coverage = (snowpack[i] / melt_threshold).min(1.0);
            let band_melt = potential * (coverage * (1.0 - VMIN) + VMIN);

            snowpack[i] -= band_melt;
            melt += band_melt;
        }

        // Band weights are normalized, so the band sums are already
        // catchment-average depths.
        effective.push(liquid + melt);
    }

    Ok(effective)
}
