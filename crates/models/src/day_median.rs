//! Climatological day-of-year median baseline.
//!
//! One parameter slot per calendar day of a 365-day cycle; Feb 29 folds onto
//! the previous slot via `(doy - 1) % 365`. This is the only variant with a
//! closed-form fit, so it never goes through the optimizer.

use naiad_data::Forcing;

use crate::error::ModelError;
use crate::Bound;

/// Number of parameter slots, one per calendar day excluding Feb 29.
pub const N_SLOTS: usize = 365;

/// Returns default parameters (all zero) and per-slot bounds.
pub fn init() -> (Vec<f64>, Vec<Bound>) {
    (vec![0.0; N_SLOTS], vec![(0.0, 100_000.0); N_SLOTS])
}

/// Closed-form calibration: per-slot median of the observed discharge.
///
/// Slots with no observations keep a zero median.
pub fn fit(forcing: &Forcing) -> Vec<f64> {
    let mut groups: Vec<Vec<f64>> = vec![Vec::new(); N_SLOTS];
    for (&discharge, &doy) in forcing.discharge().iter().zip(forcing.day_of_year()) {
        groups[(doy as usize - 1) % N_SLOTS].push(discharge);
    }

    groups
        .into_iter()
        .map(|mut group| {
            if group.is_empty() {
                return 0.0;
            }
            group.sort_by(|a, b| a.total_cmp(b));
            let n = group.len();
            if n % 2 == 1 {
                group[n / 2]
            } else {
                (group[n / 2 - 1] + group[n / 2]) / 2.0
            }
        })
        .collect()
}

/// Looks up the per-day median for every day of the forcing period.
///
/// # Errors
///
/// Returns [`ModelError::ParamsMismatch`] unless exactly [`N_SLOTS`]
/// parameters are given.
pub fn simulate(params: &[f64], forcing: &Forcing) -> Result<Vec<f64>, ModelError> {
    if params.len() != N_SLOTS {
        return Err(ModelError::ParamsMismatch {
            expected: N_SLOTS,
            got: params.len(),
        });
    }

    Ok(forcing
        .day_of_year()
        .iter()
        .map(|&doy| params[(doy as usize - 1) % N_SLOTS])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use naiad_data::Forcing;

    fn forcing_with(discharge: Vec<f64>, doy: Vec<u16>) -> Forcing {
        let n = discharge.len();
        Forcing::new(vec![1.0; n], vec![5.0; n], vec![2.0; n], doy, discharge).unwrap()
    }

    #[test]
    fn fit_takes_per_day_median() {
        // Three years of day 1 and day 2.
        let forcing = forcing_with(
            vec![1.0, 10.0, 3.0, 20.0, 2.0, 30.0],
            vec![1, 2, 1, 2, 1, 2],
        );
        let medians = fit(&forcing);
        assert_relative_eq!(medians[0], 2.0);
        assert_relative_eq!(medians[1], 20.0);
        assert_relative_eq!(medians[10], 0.0);
    }

    #[test]
    fn fit_even_group_averages_middle_pair() {
        let forcing = forcing_with(vec![1.0, 3.0], vec![5, 5]);
        let medians = fit(&forcing);
        assert_relative_eq!(medians[4], 2.0);
    }

    #[test]
    fn leap_day_folds_onto_slot_364_wrap() {
        // Day 366 maps to slot (366 - 1) % 365 = 0, same as day 1.
        let forcing = forcing_with(vec![7.0, 9.0], vec![366, 1]);
        let medians = fit(&forcing);
        assert_relative_eq!(medians[0], 8.0);
    }

    #[test]
    fn simulate_looks_up_fitted_medians() {
        let forcing = forcing_with(vec![4.0, 6.0, 4.0, 6.0], vec![100, 200, 100, 200]);
        let medians = fit(&forcing);
        let sim = simulate(&medians, &forcing).unwrap();
        assert_eq!(sim, vec![4.0, 6.0, 4.0, 6.0]);
    }

    #[test]
    fn simulate_rejects_wrong_length() {
        let forcing = forcing_with(vec![1.0], vec![1]);
        assert!(matches!(
            simulate(&[0.0; 12], &forcing),
            Err(ModelError::ParamsMismatch {
                expected: 365,
                got: 12
            })
        ));
    }

    #[test]
    fn init_shape() {
        let (defaults, bounds) = init();
        assert_eq!(defaults.len(), N_SLOTS);
        assert_eq!(bounds.len(), N_SLOTS);
        assert!(bounds.iter().all(|(lo, hi)| lo < hi));
    }
}
