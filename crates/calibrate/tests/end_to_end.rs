//! Synthetic-truth recovery and determinism of full calibration runs.

use naiad_calibrate::{calibrate, CancelToken};
use naiad_data::{Catchment, Forcing};
use naiad_models::{gr4j, ModelSpec, RunoffModel};
use naiad_objective::{Objective, Transform};
use naiad_sce::SceConfig;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Ten years of daily forcing with intermittent rain and seasonal PET.
fn synthetic_forcing(n_days: usize, seed: u64) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<u16>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut precipitation = Vec::with_capacity(n_days);
    let mut temperature = Vec::with_capacity(n_days);
    let mut pet = Vec::with_capacity(n_days);
    let mut day_of_year = Vec::with_capacity(n_days);

    for i in 0..n_days {
        let doy = (i % 365) as u16 + 1;
        let season = (2.0 * std::f64::consts::PI * (doy as f64 - 200.0) / 365.0).cos();

        let wet = rng.random::<f64>() < 0.4;
        precipitation.push(if wet { 15.0 * rng.random::<f64>() } else { 0.0 });
        temperature.push(10.0 + 8.0 * season);
        pet.push((2.5 + 2.0 * season).max(0.1));
        day_of_year.push(doy);
    }

    (precipitation, temperature, pet, day_of_year)
}

fn catchment() -> Catchment {
    Catchment::new("c1", "Test", "Test basin", 46.5, 7.5, 120.0, vec![1200.0], 1200.0).unwrap()
}

#[test]
fn recovers_synthetic_gr4j_parameters() {
    let truth = [320.0, 1.2, 80.0, 2.5];
    let (precipitation, temperature, pet, day_of_year) = synthetic_forcing(3650, 7);
    let observed = gr4j::simulate(&truth, &precipitation, &pet).unwrap();
    let forcing =
        Forcing::new(precipitation, temperature, pet, day_of_year, observed).unwrap();

    let config = SceConfig::new()
        .with_n_complexes(6)
        .with_geometric_range_threshold(1e-5)
        .with_p_convergence_threshold(1e-7)
        .with_max_evaluations(50_000)
        .with_seed(42);

    let mut best_nse_history = Vec::new();
    let outcome = calibrate(
        ModelSpec::new(RunoffModel::Gr4j, None),
        Objective::Nse,
        Transform::None,
        &forcing,
        &catchment(),
        config,
        &CancelToken::new(),
        |update| best_nse_history.push(update.scores.nse),
    )
    .unwrap();

    assert!(outcome.done, "run did not converge");
    assert!(
        outcome.scores.nse >= 0.99,
        "NSE {} below 0.99",
        outcome.scores.nse
    );
    for (found, expected) in outcome.best_params.iter().zip(&truth) {
        assert!(
            (found - expected).abs() <= 0.05 * expected.abs(),
            "recovered {:?}, truth {:?}",
            outcome.best_params,
            truth
        );
    }

    // The driven objective never regresses from one generation to the next.
    for pair in best_nse_history.windows(2) {
        assert!(pair[1] >= pair[0] - 1e-12, "NSE regressed: {pair:?}");
    }
}

#[test]
fn identical_runs_are_bit_identical() {
    let truth = [150.0, -0.5, 60.0, 1.8];
    let (precipitation, temperature, pet, day_of_year) = synthetic_forcing(365, 3);
    let observed = gr4j::simulate(&truth, &precipitation, &pet).unwrap();
    let forcing =
        Forcing::new(precipitation, temperature, pet, day_of_year, observed).unwrap();

    let config = SceConfig::new()
        .with_n_complexes(3)
        .with_max_evaluations(2000)
        .with_seed(99);

    let mut runs = Vec::new();
    for _ in 0..2 {
        let mut updates = Vec::new();
        let outcome = calibrate(
            ModelSpec::new(RunoffModel::Gr4j, None),
            Objective::Kge,
            Transform::None,
            &forcing,
            &catchment(),
            config.clone(),
            &CancelToken::new(),
            |update| updates.push(update.clone()),
        )
        .unwrap();
        runs.push((outcome, updates));
    }

    assert_eq!(runs[0], runs[1]);
}

#[test]
fn emits_full_length_simulation_every_generation() {
    let truth = [400.0, 0.0, 100.0, 3.0];
    let (precipitation, temperature, pet, day_of_year) = synthetic_forcing(200, 5);
    let observed = gr4j::simulate(&truth, &precipitation, &pet).unwrap();
    let n_days = observed.len();
    let forcing =
        Forcing::new(precipitation, temperature, pet, day_of_year, observed).unwrap();

    let config = SceConfig::new()
        .with_n_complexes(2)
        .with_max_evaluations(500)
        .with_seed(11);

    calibrate(
        ModelSpec::new(RunoffModel::Gr4j, None),
        Objective::Rmse,
        Transform::Sqrt,
        &forcing,
        &catchment(),
        config,
        &CancelToken::new(),
        |update| {
            assert_eq!(update.simulated.len(), n_days);
            assert!(update.simulated.iter().all(|v| v.is_finite()));
        },
    )
    .unwrap();
}
