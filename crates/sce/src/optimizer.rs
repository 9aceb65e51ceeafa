//! Shuffled complex evolution (Duan et al., 1992) as a stepwise state machine.
//!
//! The optimizer minimizes a scalar cost over a box-bounded search space.
//! `init` draws and evaluates the starting population; each `step` runs one
//! full shuffle (every complex evolved through its competitive simplex
//! steps) and reports the population best, so callers can interleave
//! progress reporting or cancellation between shuffles.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::SceConfig;
use crate::error::{SceError, StepError};

/// Inclusive lower/upper bound pair for one search dimension.
pub type Bound = (f64, f64);

/// Reflection coefficient of the simplex step.
const ALPHA: f64 = 1.0;
/// Contraction coefficient of the simplex step.
const BETA: f64 = 0.5;
/// Floor applied to normalized per-dimension ranges before taking logs.
const RANGE_FLOOR: f64 = 1e-10;

/// Snapshot of the optimizer state after one shuffle.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    /// Whether a stopping rule has fired.
    pub done: bool,
    /// Best point found so far.
    pub best_params: Vec<f64>,
    /// Cost of the best point.
    pub best_cost: f64,
    /// Total cost evaluations spent so far.
    pub n_evaluations: usize,
    /// Normalized geometric range of the population.
    pub geometric_range: f64,
    /// Relative change of the best cost over the last `k_stop` shuffles,
    /// in percent. Infinite until `k_stop` shuffles have run.
    pub criteria_change: f64,
}

/// Shuffled complex evolution optimizer.
pub struct Sce {
    config: SceConfig,
    lower: Vec<f64>,
    upper: Vec<f64>,
    n_per_complex: usize,
    n_simplex: usize,
    n_evolution_steps: usize,
    rng: ChaCha8Rng,
    /// Cost-sorted population, best first. Empty until `init`.
    population: Vec<Vec<f64>>,
    costs: Vec<f64>,
    /// Best cost after each shuffle, for the relative-improvement rule.
    criteria: Vec<f64>,
    n_calls: usize,
    last_geometric_range: f64,
    last_criteria_change: f64,
    initialized: bool,
    done: bool,
}

impl Sce {
    /// Creates an optimizer for the given search space.
    ///
    /// The complex geometry follows the standard recommendation for `n`
    /// dimensions: `2n + 1` points per complex, simplexes of `n + 1`
    /// points, and `2n + 1` evolution steps per complex per shuffle.
    ///
    /// # Errors
    ///
    /// Returns [`SceError`] when the configuration is invalid, `bounds` is
    /// empty, or any bound pair is non-finite or inverted.
    pub fn new(config: SceConfig, bounds: &[Bound]) -> Result<Self, SceError> {
        config.validate()?;
        if bounds.is_empty() {
            return Err(SceError::NoBounds);
        }
        for (index, &(low, high)) in bounds.iter().enumerate() {
            if !low.is_finite() || !high.is_finite() || low >= high {
                return Err(SceError::InvalidBound { index, low, high });
            }
        }

        let n_params = bounds.len();
        let rng = ChaCha8Rng::seed_from_u64(config.seed());
        Ok(Self {
            config,
            lower: bounds.iter().map(|&(low, _)| low).collect(),
            upper: bounds.iter().map(|&(_, high)| high).collect(),
            n_per_complex: 2 * n_params + 1,
            n_simplex: n_params + 1,
            n_evolution_steps: 2 * n_params + 1,
            rng,
            population: Vec::new(),
            costs: Vec::new(),
            criteria: Vec::new(),
            n_calls: 0,
            last_geometric_range: f64::INFINITY,
            last_criteria_change: f64::INFINITY,
            initialized: false,
            done: false,
        })
    }

    /// Draws and evaluates the initial population.
    ///
    /// The first member is the bounds midpoint, the rest are drawn
    /// uniformly. Calling `init` again restarts the run while continuing
    /// the same random stream.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Evaluate`] when the evaluator fails.
    pub fn init<E>(
        &mut self,
        mut evaluate: impl FnMut(&[f64]) -> Result<f64, E>,
    ) -> Result<(), StepError<E>> {
        let size = self.config.n_complexes() * self.n_per_complex;

        let mut population = Vec::with_capacity(size);
        population.push(
            self.lower
                .iter()
                .zip(&self.upper)
                .map(|(low, high)| (low + high) / 2.0)
                .collect(),
        );
        for _ in 1..size {
            population.push(random_point(&self.lower, &self.upper, &mut self.rng));
        }

        let mut costs = Vec::with_capacity(size);
        for point in &population {
            costs.push(evaluate(point).map_err(StepError::Evaluate)?);
        }
        sort_by_cost(&mut population, &mut costs);

        self.n_calls = size;
        self.criteria = vec![costs[0]];
        self.population = population;
        self.costs = costs;
        self.last_geometric_range = f64::INFINITY;
        self.last_criteria_change = f64::INFINITY;
        self.initialized = true;
        self.done = false;
        Ok(())
    }

    /// Runs one shuffle: partitions the population into complexes, evolves
    /// each, merges and re-sorts.
    ///
    /// Once a stopping rule has fired, further calls are cheap and return
    /// the final snapshot unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SceError::NotInitialized`] before `init`, and
    /// [`StepError::Evaluate`] when the evaluator fails.
    pub fn step<E>(
        &mut self,
        mut evaluate: impl FnMut(&[f64]) -> Result<f64, E>,
    ) -> Result<Generation, StepError<E>> {
        if !self.initialized {
            return Err(SceError::NotInitialized.into());
        }
        if self.done {
            return Ok(self.snapshot());
        }

        let n_params = self.lower.len();
        let n_complexes = self.config.n_complexes();

        // Interleaved partition: global rank r lands in complex r mod
        // n_complexes, so every complex gets a spread of good and bad
        // points.
        for igs in 0..n_complexes {
            let members: Vec<usize> = (0..self.n_per_complex)
                .map(|k| k * n_complexes + igs)
                .collect();
            let mut cx: Vec<Vec<f64>> =
                members.iter().map(|&i| self.population[i].clone()).collect();
            let mut cf: Vec<f64> = members.iter().map(|&i| self.costs[i]).collect();

            for _ in 0..self.n_evolution_steps {
                let simplex =
                    select_simplex_indices(self.n_per_complex, self.n_simplex, &mut self.rng);
                let worst = simplex[simplex.len() - 1];
                let worst_cost = cf[worst];

                let mut centroid = vec![0.0; n_params];
                for &i in &simplex[..simplex.len() - 1] {
                    for (c, v) in centroid.iter_mut().zip(&cx[i]) {
                        *c += v;
                    }
                }
                let n_kept = (simplex.len() - 1) as f64;
                for c in centroid.iter_mut() {
                    *c /= n_kept;
                }

                // Reflection away from the worst point, falling back to a
                // random draw when it leaves the box.
                let mut candidate: Vec<f64> = centroid
                    .iter()
                    .zip(&cx[worst])
                    .map(|(c, w)| c + ALPHA * (c - w))
                    .collect();
                let out_of_bounds = candidate
                    .iter()
                    .zip(self.lower.iter().zip(&self.upper))
                    .any(|(v, (low, high))| v < low || v > high);
                if out_of_bounds {
                    candidate = random_point(&self.lower, &self.upper, &mut self.rng);
                }
                let mut cost = evaluate(&candidate).map_err(StepError::Evaluate)?;
                self.n_calls += 1;

                if cost > worst_cost {
                    // Contraction toward the centroid.
                    candidate = cx[worst]
                        .iter()
                        .zip(&centroid)
                        .map(|(w, c)| w + BETA * (c - w))
                        .collect();
                    cost = evaluate(&candidate).map_err(StepError::Evaluate)?;
                    self.n_calls += 1;

                    if cost > worst_cost {
                        // Both moves failed, replace with a random point.
                        candidate = random_point(&self.lower, &self.upper, &mut self.rng);
                        cost = evaluate(&candidate).map_err(StepError::Evaluate)?;
                        self.n_calls += 1;
                    }
                }

                cx[worst] = candidate;
                cf[worst] = cost;
                sort_by_cost(&mut cx, &mut cf);
            }

            for (&i, (point, cost)) in members.iter().zip(cx.into_iter().zip(cf)) {
                self.population[i] = point;
                self.costs[i] = cost;
            }
        }

        sort_by_cost(&mut self.population, &mut self.costs);

        let best_cost = self.costs[0];
        self.criteria.push(best_cost);

        let geometric_range =
            normalized_geometric_range(&self.population, &self.lower, &self.upper);

        let k_stop = self.config.k_stop();
        let criteria_change = if self.criteria.len() >= k_stop {
            let recent = &self.criteria[self.criteria.len() - k_stop..];
            let mean_recent = recent.iter().map(|x| x.abs()).sum::<f64>() / k_stop as f64;
            if mean_recent > 0.0 {
                (self.criteria[self.criteria.len() - 1]
                    - self.criteria[self.criteria.len() - k_stop])
                    .abs()
                    * 100.0
                    / mean_recent
            } else {
                f64::INFINITY
            }
        } else {
            f64::INFINITY
        };

        self.done = self.n_calls > self.config.max_evaluations()
            || geometric_range < self.config.geometric_range_threshold()
            || criteria_change < self.config.p_convergence_threshold();
        self.last_geometric_range = geometric_range;
        self.last_criteria_change = criteria_change;

        debug!(
            best_cost,
            geometric_range,
            criteria_change,
            n_evaluations = self.n_calls,
            done = self.done,
            "completed shuffle"
        );

        Ok(self.snapshot())
    }

    /// Whether a stopping rule has fired.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Whether `init` has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Total cost evaluations spent so far.
    pub fn n_evaluations(&self) -> usize {
        self.n_calls
    }

    /// Best point found so far, `None` before `init`.
    pub fn best_params(&self) -> Option<&[f64]> {
        self.population.first().map(Vec::as_slice)
    }

    /// Cost of the best point, `None` before `init`.
    pub fn best_cost(&self) -> Option<f64> {
        self.costs.first().copied()
    }

    fn snapshot(&self) -> Generation {
        Generation {
            done: self.done,
            best_params: self.population[0].clone(),
            best_cost: self.costs[0],
            n_evaluations: self.n_calls,
            geometric_range: self.last_geometric_range,
            criteria_change: self.last_criteria_change,
        }
    }
}

fn random_point(lower: &[f64], upper: &[f64], rng: &mut ChaCha8Rng) -> Vec<f64> {
    lower
        .iter()
        .zip(upper)
        .map(|(&low, &high)| low + rng.random::<f64>() * (high - low))
        .collect()
}

/// Sorts the population ascending by cost, keeping rows and costs paired.
fn sort_by_cost(population: &mut Vec<Vec<f64>>, costs: &mut Vec<f64>) {
    let mut paired: Vec<(f64, Vec<f64>)> = costs.drain(..).zip(population.drain(..)).collect();
    paired.sort_by(|a, b| a.0.total_cmp(&b.0));
    for (cost, point) in paired {
        costs.push(cost);
        population.push(point);
    }
}

/// Geometric mean of the per-dimension population ranges, normalized by the
/// bound widths. Approaches zero as the population collapses.
fn normalized_geometric_range(population: &[Vec<f64>], lower: &[f64], upper: &[f64]) -> f64 {
    let n_params = lower.len();
    let mut sum_ln = 0.0;
    for j in 0..n_params {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for point in population {
            min = min.min(point[j]);
            max = max.max(point[j]);
        }
        let normalized = (max - min) / (upper[j] - lower[j]);
        sum_ln += normalized.max(RANGE_FLOOR).ln();
    }
    (sum_ln / n_params as f64).exp()
}

/// Draws simplex member indices from a cost-sorted complex using a
/// triangular distribution biased toward better points. The complex best
/// (index 0) is always included.
fn select_simplex_indices(
    n_per_complex: usize,
    n_simplex: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<usize> {
    let mut indices = vec![0];

    for _ in 1..n_simplex {
        let mut pos = 0;
        for _ in 0..1000 {
            let npg = n_per_complex as f64;
            pos = (npg + 0.5
                - ((npg + 0.5).powi(2)
                    - (n_per_complex * (n_per_complex + 1)) as f64 * rng.random::<f64>())
                .sqrt())
            .floor() as usize;
            if !indices.contains(&pos) {
                break;
            }
        }
        indices.push(pos);
    }

    indices.sort_unstable();
    indices
}
