//! Colony iteration loop.
//!
//! [`AcoEngine`] drives the search state machine: each iteration constructs
//! one tour per ant against a frozen pheromone snapshot, applies the
//! evaporate-then-deposit update, and tracks the best tour seen so far.
//! The iteration budget is fixed; there is no convergence detection.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::ant::{Ant, Tour};
use super::config::{AcoConfig, Elitism, StartPolicy};
use super::pheromone::PheromoneModel;
use crate::error::{Error, Result};
use crate::matrix::{alloc_square, DistanceMatrix};
use crate::random::create_rng;

/// Heuristic value for coincident cities (zero distance, distinct index):
/// a large finite preference instead of a division by zero.
const COINCIDENT_PREFERENCE: f64 = 1e6;

/// Final best tour and run statistics.
///
/// Ownership transfers to the caller; release is scoped drop.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TourResult {
    /// Visiting order of the best tour found (a permutation of `0..n`).
    pub tour: Vec<usize>,

    /// Total closed length of the best tour.
    pub length: f64,

    /// Number of iterations executed.
    pub iterations: usize,

    /// Whether the run was cancelled before exhausting its budget.
    pub cancelled: bool,

    /// Best length after each iteration. Monotonically non-increasing.
    pub length_history: Vec<f64>,
}

/// The ant colony search engine.
///
/// Borrows its distance matrix for the duration of the run and owns its
/// pheromone state exclusively; independent engines may run concurrently.
///
/// # Examples
///
/// ```
/// use u_antcolony::aco::{AcoConfig, AcoEngine};
/// use u_antcolony::matrix::DistanceMatrix;
///
/// let points = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0]];
/// let matrix = DistanceMatrix::from_points(&points).unwrap();
/// let config = AcoConfig::default().with_iterations(10).with_seed(42);
///
/// let mut engine = AcoEngine::new(&matrix, &config).unwrap();
/// engine.run();
/// let result = engine.result().unwrap();
/// assert_eq!(result.iterations, 10);
/// ```
#[derive(Debug)]
pub struct AcoEngine<'a> {
    matrix: &'a DistanceMatrix,
    heuristic: Vec<f64>,
    pheromone: PheromoneModel,
    config: AcoConfig,
    rng: ChaCha8Rng,
    best: Option<Tour>,
    iterations_run: usize,
    length_history: Vec<f64>,
}

impl<'a> AcoEngine<'a> {
    /// Builds an engine over the given matrix and configuration.
    ///
    /// Validates the configuration (including the fixed start city against
    /// the city count) and precomputes the inverse-distance heuristic.
    /// All validation errors surface here; nothing fails mid-iteration.
    pub fn new(matrix: &'a DistanceMatrix, config: &AcoConfig) -> Result<Self> {
        config.validate()?;
        let n = matrix.size();
        if let StartPolicy::Fixed(city) = config.start_policy {
            if city >= n {
                return Err(Error::InvalidParameters(format!(
                    "fixed start city {city} is out of range for {n} cities"
                )));
            }
        }

        let mut heuristic = alloc_square(n)?;
        heuristic.resize(n * n, 0.0);
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let d = matrix.distance(i, j);
                    heuristic[i * n + j] = if d > 0.0 { 1.0 / d } else { COINCIDENT_PREFERENCE };
                }
            }
        }

        let pheromone = PheromoneModel::new(n, config.initial_pheromone)?;
        let seed = config.seed.unwrap_or_else(rand::random);

        Ok(Self {
            matrix,
            heuristic,
            pheromone,
            config: config.clone(),
            rng: create_rng(seed),
            best: None,
            iterations_run: 0,
            length_history: Vec::new(),
        })
    }

    /// Executes one Construct → Update → Evaluate iteration.
    pub fn run_iteration(&mut self) {
        let n = self.matrix.size();
        let count = self.config.ants_per_iteration;

        let starts: Vec<usize> = (0..count)
            .map(|ant| match self.config.start_policy {
                StartPolicy::RoundRobin => ant % n,
                StartPolicy::Fixed(city) => city,
            })
            .collect();
        // Child seeds are drawn from the master stream before the fan-out,
        // so parallel construction reproduces the sequential results.
        let seeds: Vec<u64> = (0..count).map(|_| self.rng.random()).collect();

        let tours = self.construct_all(&starts, &seeds);

        // Update: one evaporation sweep, then cumulative deposits from
        // every tour of this iteration.
        self.pheromone.evaporate(self.config.rho);
        for tour in &tours {
            if tour.length > 0.0 {
                self.pheromone
                    .deposit_tour(&tour.cities, self.config.q / tour.length);
            }
        }
        self.apply_elite_deposit(&tours);

        // Evaluate: strict-improvement update of the best-so-far tracker.
        for tour in tours {
            if self.best.as_ref().is_none_or(|b| tour.length < b.length) {
                self.best = Some(tour);
            }
        }

        self.iterations_run += 1;
        if let Some(best) = &self.best {
            self.length_history.push(best.length);
        }
    }

    /// Runs the remaining iteration budget to completion.
    pub fn run(&mut self) {
        while self.iterations_run < self.config.iterations {
            self.run_iteration();
        }
    }

    /// Builds the result record from the best tour found.
    ///
    /// Fails with [`Error::EngineNotRun`] before the first completed
    /// iteration.
    pub fn result(&self) -> Result<TourResult> {
        if self.iterations_run == 0 {
            return Err(Error::EngineNotRun);
        }
        let best = self.best.as_ref().ok_or(Error::EngineNotRun)?;
        Ok(TourResult {
            tour: best.cities.clone(),
            length: best.length,
            iterations: self.iterations_run,
            cancelled: false,
            length_history: self.length_history.clone(),
        })
    }

    /// Number of iterations executed so far.
    pub fn iterations_run(&self) -> usize {
        self.iterations_run
    }

    /// Length of the best tour found so far, if any iteration completed.
    pub fn best_length(&self) -> Option<f64> {
        self.best.as_ref().map(|tour| tour.length)
    }

    /// Best length after each completed iteration.
    pub fn length_history(&self) -> &[f64] {
        &self.length_history
    }

    /// Read access to the current trail state.
    pub fn pheromone(&self) -> &PheromoneModel {
        &self.pheromone
    }

    fn construct_all(&self, starts: &[usize], seeds: &[u64]) -> Vec<Tour> {
        let build = |start: usize, seed: u64| {
            let mut rng = create_rng(seed);
            Ant::new(self.matrix.size(), start).construct(
                self.matrix,
                &self.pheromone,
                &self.heuristic,
                self.config.alpha,
                self.config.beta,
                &mut rng,
            )
        };

        #[cfg(feature = "parallel")]
        if self.config.parallel {
            return starts
                .par_iter()
                .zip(seeds.par_iter())
                .map(|(&start, &seed)| build(start, seed))
                .collect();
        }

        starts
            .iter()
            .zip(seeds.iter())
            .map(|(&start, &seed)| build(start, seed))
            .collect()
    }

    fn apply_elite_deposit(&mut self, tours: &[Tour]) {
        if self.config.gamma <= 0.0 {
            return;
        }
        let elite = match self.config.elitism {
            Elitism::Disabled => None,
            Elitism::IterationBest => tours
                .iter()
                .min_by(|a, b| {
                    a.length
                        .partial_cmp(&b.length)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|tour| (tour.cities.clone(), tour.length)),
            // The tracker state from before this iteration's Evaluate.
            Elitism::GlobalBest => self
                .best
                .as_ref()
                .map(|tour| (tour.cities.clone(), tour.length)),
        };

        if let Some((cities, length)) = elite {
            if length > 0.0 {
                self.pheromone
                    .deposit_tour(&cities, self.config.gamma * self.config.q / length);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_matrix() -> DistanceMatrix {
        let points = vec![
            vec![0.0, 0.0],
            vec![2.0, 0.0],
            vec![2.0, 2.0],
            vec![0.0, 2.0],
            vec![1.0, 3.0],
        ];
        DistanceMatrix::from_points(&points).unwrap()
    }

    #[test]
    fn test_result_before_run_fails() {
        let matrix = small_matrix();
        let config = AcoConfig::default().with_seed(42);
        let engine = AcoEngine::new(&matrix, &config).unwrap();

        let err = engine.result().unwrap_err();
        assert!(matches!(err, Error::EngineNotRun));
    }

    #[test]
    fn test_run_executes_exact_budget() {
        let matrix = small_matrix();
        let config = AcoConfig::default()
            .with_iterations(17)
            .with_ants_per_iteration(4)
            .with_seed(42);
        let mut engine = AcoEngine::new(&matrix, &config).unwrap();
        engine.run();

        assert_eq!(engine.iterations_run(), 17);
        assert_eq!(engine.length_history().len(), 17);

        // Running again is a no-op: the budget is already spent.
        engine.run();
        assert_eq!(engine.iterations_run(), 17);
    }

    #[test]
    fn test_single_iteration_yields_result() {
        let matrix = small_matrix();
        let config = AcoConfig::default().with_seed(42);
        let mut engine = AcoEngine::new(&matrix, &config).unwrap();
        engine.run_iteration();

        let result = engine.result().unwrap();
        assert_eq!(result.iterations, 1);
        assert_eq!(result.tour.len(), 5);
        assert!(result.length > 0.0);
    }

    #[test]
    fn test_best_length_is_monotone() {
        let matrix = small_matrix();
        let config = AcoConfig::default()
            .with_iterations(30)
            .with_ants_per_iteration(5)
            .with_seed(7);
        let mut engine = AcoEngine::new(&matrix, &config).unwrap();
        engine.run();

        for window in engine.length_history().windows(2) {
            assert!(
                window[1] <= window[0] + 1e-12,
                "best length must never regress: {} -> {}",
                window[0],
                window[1]
            );
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let matrix = small_matrix();
        let config = AcoConfig::default().with_rho(1.5);
        let err = AcoEngine::new(&matrix, &config).unwrap_err();
        assert!(matches!(err, Error::InvalidParameters(_)));
    }

    #[test]
    fn test_fixed_start_out_of_range() {
        let matrix = small_matrix();
        let config = AcoConfig::default().with_start_policy(StartPolicy::Fixed(5));
        let err = AcoEngine::new(&matrix, &config).unwrap_err();
        assert!(matches!(err, Error::InvalidParameters(_)));
    }

    #[test]
    fn test_fixed_start_tours_begin_at_city() {
        let matrix = small_matrix();
        let config = AcoConfig::default()
            .with_iterations(3)
            .with_ants_per_iteration(4)
            .with_start_policy(StartPolicy::Fixed(2))
            .with_seed(42);
        let mut engine = AcoEngine::new(&matrix, &config).unwrap();
        engine.run();

        let result = engine.result().unwrap();
        assert_eq!(result.tour[0], 2);
    }

    #[test]
    fn test_elitism_policies_produce_valid_tours() {
        let matrix = small_matrix();
        for elitism in [Elitism::Disabled, Elitism::IterationBest, Elitism::GlobalBest] {
            let config = AcoConfig::default()
                .with_iterations(10)
                .with_ants_per_iteration(5)
                .with_elitism(elitism)
                .with_gamma(2.0)
                .with_seed(42);
            let mut engine = AcoEngine::new(&matrix, &config).unwrap();
            engine.run();

            let result = engine.result().unwrap();
            let mut sorted = result.tour.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..5).collect::<Vec<_>>(), "elitism {elitism:?}");
        }
    }

    #[test]
    fn test_trail_reflects_deposits() {
        let matrix = small_matrix();
        let config = AcoConfig::default()
            .with_iterations(5)
            .with_ants_per_iteration(5)
            .with_rho(0.5)
            .with_seed(42);
        let mut engine = AcoEngine::new(&matrix, &config).unwrap();
        engine.run();

        // Some trail must remain after deposits, and the diagonal stays
        // untouched.
        let pheromone = engine.pheromone();
        let mut any_positive = false;
        for i in 0..5 {
            assert_eq!(pheromone.intensity(i, i), 0.0);
            for j in 0..5 {
                if i != j && pheromone.intensity(i, j) > 0.0 {
                    any_positive = true;
                }
            }
        }
        assert!(any_positive);
    }
}
