//! ACO configuration.
//!
//! [`AcoConfig`] holds all parameters that control the colony search.
//! Construction is infallible; [`AcoConfig::validate`] checks the bundle and
//! fails fast on any out-of-range value. Nothing is clamped silently.

use crate::error::{Error, Result};

/// Which tour receives the extra elitist pheromone deposit.
///
/// The elite deposit adds `gamma * q / length` to every edge of the chosen
/// tour, after the ordinary per-ant deposits of the iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Elitism {
    /// No elitist reinforcement.
    #[default]
    Disabled,

    /// Reinforce the best tour of the current iteration.
    IterationBest,

    /// Reinforce the best tour found so far across all iterations.
    ///
    /// The reference is the tracker state from before the current
    /// iteration's evaluation, so the first iteration deposits nothing.
    GlobalBest,
}

/// Start-city assignment for the ants of an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StartPolicy {
    /// Ant `k` starts at city `k mod n`, spreading construction across the
    /// whole city set. Deterministic under a fixed seed.
    #[default]
    RoundRobin,

    /// Every ant starts at the given city. The index must refer to an
    /// existing city; the engine rejects it otherwise.
    Fixed(usize),
}

/// Configuration for the ant colony search.
///
/// # Examples
///
/// ```
/// use u_antcolony::aco::{AcoConfig, Elitism};
///
/// let config = AcoConfig::default()
///     .with_iterations(50)
///     .with_ants_per_iteration(10)
///     .with_beta(2.0)
///     .with_elitism(Elitism::GlobalBest)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Pheromone deposit scale: each tour deposits `q / length` on its
    /// edges. Must be positive.
    pub q: f64,

    /// Evaporation rate in `[0, 1]`. Every trail cell is scaled by
    /// `1 - rho` once per iteration; `1.0` leaves no residual trail.
    pub rho: f64,

    /// Pheromone-influence exponent. Must be non-negative.
    pub alpha: f64,

    /// Heuristic (inverse-distance) influence exponent. Must be
    /// non-negative.
    pub beta: f64,

    /// Weight of the elitist deposit. Must be non-negative; `0.0` disables
    /// the elite deposit even when an [`Elitism`] target is selected.
    pub gamma: f64,

    /// Starting intensity of every off-diagonal trail cell. Must be
    /// positive.
    pub initial_pheromone: f64,

    /// Number of iterations to execute. The budget is fixed: no early
    /// stopping or convergence detection. Must be at least 1.
    pub iterations: usize,

    /// Number of ants constructing tours in each iteration. Must be at
    /// least 1.
    pub ants_per_iteration: usize,

    /// Elitist reinforcement policy.
    pub elitism: Elitism,

    /// Start-city assignment policy.
    pub start_policy: StartPolicy,

    /// Whether to construct tours in parallel using rayon.
    ///
    /// Only effective with the `parallel` cargo feature; without it the
    /// construction phase is always sequential. Results are identical
    /// either way.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            q: 1.0,
            rho: 0.1,
            alpha: 1.0,
            beta: 2.0,
            gamma: 1.0,
            initial_pheromone: 1.0,
            iterations: 100,
            ants_per_iteration: 20,
            elitism: Elitism::default(),
            start_policy: StartPolicy::default(),
            parallel: false,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Sets the pheromone deposit scale.
    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    /// Sets the evaporation rate.
    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }

    /// Sets the pheromone-influence exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the heuristic-influence exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the elitist deposit weight.
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Sets the initial trail intensity.
    pub fn with_initial_pheromone(mut self, initial: f64) -> Self {
        self.initial_pheromone = initial;
        self
    }

    /// Sets the iteration budget.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the population size per iteration.
    pub fn with_ants_per_iteration(mut self, n: usize) -> Self {
        self.ants_per_iteration = n;
        self
    }

    /// Sets the elitist reinforcement policy.
    pub fn with_elitism(mut self, elitism: Elitism) -> Self {
        self.elitism = elitism;
        self
    }

    /// Sets the start-city assignment policy.
    pub fn with_start_policy(mut self, policy: StartPolicy) -> Self {
        self.start_policy = policy;
        self
    }

    /// Enables or disables parallel tour construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns [`Error::InvalidParameters`] with a description of the first
    /// offending field.
    pub fn validate(&self) -> Result<()> {
        if !self.q.is_finite() || self.q <= 0.0 {
            return Err(Error::InvalidParameters(format!(
                "q must be positive, got {}",
                self.q
            )));
        }
        if !self.rho.is_finite() || !(0.0..=1.0).contains(&self.rho) {
            return Err(Error::InvalidParameters(format!(
                "rho must be in [0, 1], got {}",
                self.rho
            )));
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(Error::InvalidParameters(format!(
                "alpha must be non-negative, got {}",
                self.alpha
            )));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(Error::InvalidParameters(format!(
                "beta must be non-negative, got {}",
                self.beta
            )));
        }
        if !self.gamma.is_finite() || self.gamma < 0.0 {
            return Err(Error::InvalidParameters(format!(
                "gamma must be non-negative, got {}",
                self.gamma
            )));
        }
        if !self.initial_pheromone.is_finite() || self.initial_pheromone <= 0.0 {
            return Err(Error::InvalidParameters(format!(
                "initial_pheromone must be positive, got {}",
                self.initial_pheromone
            )));
        }
        if self.iterations == 0 {
            return Err(Error::InvalidParameters(
                "iterations must be at least 1".into(),
            ));
        }
        if self.ants_per_iteration == 0 {
            return Err(Error::InvalidParameters(
                "ants_per_iteration must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
