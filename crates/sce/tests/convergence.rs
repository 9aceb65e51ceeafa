//! End-to-end optimizer runs on analytic cost surfaces.

use std::convert::Infallible;

use naiad_sce::{Sce, SceConfig};

fn sphere(target: &[f64]) -> impl FnMut(&[f64]) -> Result<f64, Infallible> + '_ {
    move |params: &[f64]| {
        Ok(params
            .iter()
            .zip(target)
            .map(|(p, t)| (p - t) * (p - t))
            .sum())
    }
}

fn run_to_done(
    sce: &mut Sce,
    mut cost: impl FnMut(&[f64]) -> Result<f64, Infallible>,
) -> naiad_sce::Generation {
    let mut generation = sce.step(&mut cost).unwrap();
    for _ in 0..500 {
        if generation.done {
            return generation;
        }
        generation = sce.step(&mut cost).unwrap();
    }
    panic!("optimizer did not stop within 500 shuffles");
}

#[test]
fn recovers_four_dimensional_target() {
    let target = [700.0, -1.2, 150.0, 4.0];
    let bounds = [(10.0, 1500.0), (-5.0, 3.0), (10.0, 400.0), (0.8, 10.0)];
    let config = SceConfig::new()
        .with_n_complexes(5)
        .with_geometric_range_threshold(1e-4)
        .with_p_convergence_threshold(1e-6)
        .with_max_evaluations(20_000)
        .with_seed(42);

    let mut sce = Sce::new(config, &bounds).unwrap();
    sce.init(sphere(&target)).unwrap();
    let generation = run_to_done(&mut sce, sphere(&target));

    assert!(generation.done);
    for ((found, expected), (low, high)) in
        generation.best_params.iter().zip(&target).zip(&bounds)
    {
        let tolerance = 0.05 * (high - low);
        assert!(
            (found - expected).abs() < tolerance,
            "found {:?}, expected {:?}",
            generation.best_params,
            target
        );
    }
}

#[test]
fn full_run_is_deterministic() {
    let target = [0.7, -0.3, 0.1];
    let bounds = [(-1.0, 1.0); 3];
    let config = SceConfig::new()
        .with_n_complexes(4)
        .with_max_evaluations(3000)
        .with_seed(123);

    let mut finals = Vec::new();
    for _ in 0..2 {
        let mut sce = Sce::new(config.clone(), &bounds).unwrap();
        sce.init(sphere(&target)).unwrap();
        finals.push(run_to_done(&mut sce, sphere(&target)));
    }

    assert_eq!(finals[0], finals[1]);
}

#[test]
fn reported_evaluations_match_actual_calls() {
    let bounds = [(-2.0, 2.0), (-2.0, 2.0)];
    let config = SceConfig::new()
        .with_n_complexes(3)
        .with_max_evaluations(500)
        .with_seed(5);

    let mut calls = 0usize;
    let mut counting = |params: &[f64]| {
        calls += 1;
        Ok::<f64, Infallible>(params.iter().map(|p| p * p).sum())
    };

    let mut sce = Sce::new(config, &bounds).unwrap();
    sce.init(&mut counting).unwrap();
    let mut generation = sce.step(&mut counting).unwrap();
    for _ in 0..200 {
        if generation.done {
            break;
        }
        generation = sce.step(&mut counting).unwrap();
    }

    assert_eq!(calls, generation.n_evaluations);
    assert_eq!(calls, sce.n_evaluations());
}
