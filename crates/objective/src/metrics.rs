//! RMSE, NSE and KGE metric implementations.

use crate::error::ObjectiveError;

/// The three metrics computed for every candidate, regardless of which one
/// drives the optimizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    /// Root-mean-square error, mm/day.
    pub rmse: f64,
    /// Nash-Sutcliffe efficiency, (-inf, 1].
    pub nse: f64,
    /// Kling-Gupta efficiency, (-inf, 1].
    pub kge: f64,
}

impl Scores {
    /// Computes all three metrics for one observed/simulated pair.
    ///
    /// # Errors
    ///
    /// Propagates the first metric error encountered.
    pub fn compute(observed: &[f64], simulated: &[f64]) -> Result<Self, ObjectiveError> {
        Ok(Self {
            rmse: rmse(observed, simulated)?,
            nse: nse(observed, simulated)?,
            kge: kge(observed, simulated)?,
        })
    }
}

/// Root-mean-square error. Range [0, inf), 0 = perfect.
///
/// # Errors
///
/// Returns [`ObjectiveError::LengthMismatch`] for unequal lengths and
/// [`ObjectiveError::Empty`] for empty input.
pub fn rmse(observed: &[f64], simulated: &[f64]) -> Result<f64, ObjectiveError> {
    check_shapes(observed, simulated)?;
    let n = observed.len() as f64;
    let sum: f64 = observed
        .iter()
        .zip(simulated)
        .map(|(o, s)| (o - s).powi(2))
        .sum();
    Ok((sum / n).sqrt())
}

/// Nash-Sutcliffe efficiency. Range (-inf, 1], 1 = perfect.
///
/// # Errors
///
/// In addition to the shape errors, returns
/// [`ObjectiveError::ConstantObservations`] when the observed variance is
/// zero and the metric is undefined.
pub fn nse(observed: &[f64], simulated: &[f64]) -> Result<f64, ObjectiveError> {
    check_shapes(observed, simulated)?;
    let mean_obs = mean(observed);
    let (numerator, denominator) = observed.iter().zip(simulated).fold(
        (0.0, 0.0),
        |(num, den), (&o, &s)| (num + (o - s).powi(2), den + (o - mean_obs).powi(2)),
    );
    if denominator == 0.0 {
        return Err(ObjectiveError::ConstantObservations { metric: "nse" });
    }
    Ok(1.0 - numerator / denominator)
}

/// Kling-Gupta efficiency. Range (-inf, 1], 1 = perfect.
///
/// `KGE = 1 - sqrt((r-1)^2 + (alpha-1)^2 + (beta-1)^2)` with r the Pearson
/// correlation, alpha the ratio of standard deviations and beta the ratio of
/// means. A constant simulation gets `r = 0` rather than an undefined
/// correlation, so degenerate candidates score poorly instead of aborting a
/// calibration.
///
/// # Errors
///
/// In addition to the shape errors, returns
/// [`ObjectiveError::ConstantObservations`] for zero observed variance and
/// [`ObjectiveError::ZeroMeanObservations`] for a zero observed mean.
pub fn kge(observed: &[f64], simulated: &[f64]) -> Result<f64, ObjectiveError> {
    check_shapes(observed, simulated)?;
    let n = observed.len() as f64;

    let mean_obs = mean(observed);
    let mean_sim = mean(simulated);
    let std_obs = (observed
        .iter()
        .map(|o| (o - mean_obs).powi(2))
        .sum::<f64>()
        / n)
        .sqrt();
    let std_sim = (simulated
        .iter()
        .map(|s| (s - mean_sim).powi(2))
        .sum::<f64>()
        / n)
        .sqrt();

    if std_obs == 0.0 {
        return Err(ObjectiveError::ConstantObservations { metric: "kge" });
    }
    if mean_obs == 0.0 {
        return Err(ObjectiveError::ZeroMeanObservations);
    }

    let r = if std_sim == 0.0 {
        0.0
    } else {
        let covariance = observed
            .iter()
            .zip(simulated)
            .map(|(o, s)| (o - mean_obs) * (s - mean_sim))
            .sum::<f64>()
            / n;
        covariance / (std_obs * std_sim)
    };
    let alpha = std_sim / std_obs;
    let beta = mean_sim / mean_obs;

    Ok(1.0 - ((r - 1.0).powi(2) + (alpha - 1.0).powi(2) + (beta - 1.0).powi(2)).sqrt())
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn check_shapes(observed: &[f64], simulated: &[f64]) -> Result<(), ObjectiveError> {
    if observed.len() != simulated.len() {
        return Err(ObjectiveError::LengthMismatch {
            observed: observed.len(),
            simulated: simulated.len(),
        });
    }
    if observed.is_empty() {
        return Err(ObjectiveError::Empty);
    }
    Ok(())
}
