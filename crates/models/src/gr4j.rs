//! GR4J daily rainfall-runoff model (Perrin et al., 2003).
//!
//! Four parameters:
//! - `x1` production-store capacity (mm)
//! - `x2` groundwater exchange coefficient (mm/day)
//! - `x3` routing-store capacity (mm)
//! - `x4` unit-hydrograph time constant (days)
//!
//! Production and routing stores are updated day by day; routed water splits
//! 90/10 between two unit hydrographs. Stores are kept non-negative so the
//! model stays finite for any in-bounds parameter vector.

use crate::error::ModelError;
use crate::Bound;

/// Ordered parameter names.
pub const PARAM_NAMES: [&str; 4] = ["x1", "x2", "x3", "x4"];

const BOUNDS: [Bound; 4] = [(10.0, 1500.0), (-5.0, 3.0), (10.0, 400.0), (0.8, 10.0)];

/// Returns default parameters (bounds midpoints) and per-parameter bounds.
pub fn init() -> (Vec<f64>, Vec<Bound>) {
    let defaults = BOUNDS.iter().map(|(lo, hi)| (lo + hi) / 2.0).collect();
    (defaults, BOUNDS.to_vec())
}

/// Simulates daily discharge in mm/day.
///
/// `precipitation` and `pet` must have equal length; the output has the same
/// length.
///
/// # Errors
///
/// Returns [`ModelError::ParamsMismatch`] unless exactly 4 parameters are
/// given.
pub fn simulate(
    params: &[f64],
    precipitation: &[f64],
    pet: &[f64],
) -> Result<Vec<f64>, ModelError> {
    let [x1, x2, x3, x4]: [f64; 4] =
        params
            .try_into()
            .map_err(|_| ModelError::ParamsMismatch {
                expected: 4,
                got: params.len(),
            })?;

    let (uh1_ordinates, uh2_ordinates) = unit_hydrograph_ordinates(x4);
    let mut uh1 = vec![0.0; uh1_ordinates.len()];
    let mut uh2 = vec![0.0; uh2_ordinates.len()];

    let mut production_store = x1 / 2.0;
    let mut routing_store = x3 / 2.0;

    let mut discharge = Vec::with_capacity(precipitation.len());

    for (&precip, &pet) in precipitation.iter().zip(pet) {
        let (store, routed_input) = update_production(production_store, precip, pet, x1);
        production_store = store;

        shift_and_load(&mut uh1, &uh1_ordinates, 0.9 * routed_input);
        shift_and_load(&mut uh2, &uh2_ordinates, 0.1 * routed_input);
        let q9 = uh1[0];
        let q1 = uh2[0];

        let exchange = x2 * (routing_store / x3).powf(3.5);

        // Routing store never drains fully; the floor keeps the outflow
        // power law finite.
        routing_store = (routing_store + q9 + exchange).max(1e-3 * x3);
        let routed_flow =
            routing_store * (1.0 - (1.0 + (routing_store / x3).powi(4)).powf(-0.25));
        routing_store -= routed_flow;

        let direct_flow = (q1 + exchange).max(0.0);

        discharge.push(routed_flow + direct_flow);
    }

    Ok(discharge)
}

/// One day of production-store accounting. Returns the updated store and the
/// water handed to routing.
fn update_production(store: f64, precipitation: f64, pet: f64, x1: f64) -> (f64, f64) {
    let (mut store, store_precipitation, net_precipitation) = if precipitation > pet {
        let net_precipitation = precipitation - pet;
        let fill = store / x1;
        let input = (net_precipitation / x1).tanh();
        let store_precipitation = x1 * (1.0 - fill * fill) * input / (1.0 + fill * input);
        (
            store + store_precipitation,
            store_precipitation,
            net_precipitation,
        )
    } else if precipitation < pet {
        let net_pet = pet - precipitation;
        let fill = store / x1;
        let demand = (net_pet / x1).tanh();
        let evaporation =
            store * (2.0 - fill) * demand / (1.0 + (1.0 - fill) * demand);
        ((store - evaporation).max(0.0), 0.0, 0.0)
    } else {
        (store, 0.0, 0.0)
    };

    let percolation = if x1 / store > 1e-3 {
        let percolation =
            store * (1.0 - (1.0 + (4.0 / 21.0 * store / x1).powi(4)).powf(-0.25));
        store -= percolation;
        percolation
    } else {
        0.0
    };

    (
        store,
        net_precipitation - store_precipitation + percolation,
    )
}

/// Shifts a hydrograph one day forward and spreads `volume` over it.
fn shift_and_load(hydrograph: &mut [f64], ordinates: &[f64], volume: f64) {
    let n = hydrograph.len();
    for i in 0..n - 1 {
        hydrograph[i] = hydrograph[i + 1] + volume * ordinates[i];
    }
    hydrograph[n - 1] = volume * ordinates[n - 1];
}

/// Builds the discrete UH1/UH2 ordinates from the S-curves of GR4J.
fn unit_hydrograph_ordinates(x4: f64) -> (Vec<f64>, Vec<f64>) {
    let s1 = |i: f64| -> f64 {
        if i <= 0.0 {
            0.0
        } else if i >= x4 {
            1.0
        } else {
            (i / x4).powf(1.25)
        }
    };
    let s2 = |i: f64| -> f64 {
        if i <= 0.0 {
            0.0
        } else if i >= 2.0 * x4 {
            1.0
        } else if i < x4 {
            0.5 * (i / x4).powf(1.25)
        } else {
            1.0 - 0.5 * (2.0 - i / x4).powf(1.25)
        }
    };

    let uh1 = (1..=x4.ceil() as usize)
        .map(|i| s1(i as f64) - s1(i as f64 - 1.0))
        .collect();
    let uh2 = (1..=(2.0 * x4).ceil() as usize)
        .map(|i| s2(i as f64) - s2(i as f64 - 1.0))
        .collect();

    (uh1, uh2)
}
