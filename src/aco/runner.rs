//! Blocking run facade.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::config::AcoConfig;
use super::engine::{AcoEngine, TourResult};
use crate::error::Result;
use crate::matrix::DistanceMatrix;

/// Executes the full iteration budget in one blocking call.
///
/// # Usage
///
/// ```
/// use u_antcolony::aco::{AcoConfig, AcoRunner};
/// use u_antcolony::matrix::DistanceMatrix;
///
/// let points = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]];
/// let matrix = DistanceMatrix::from_points(&points).unwrap();
/// let config = AcoConfig::default().with_iterations(20).with_seed(42);
///
/// let result = AcoRunner::run(&matrix, &config).unwrap();
/// assert_eq!(result.tour.len(), 3);
/// ```
pub struct AcoRunner;

impl AcoRunner {
    /// Runs the colony search and returns the best tour found.
    ///
    /// Validation errors surface before any iteration executes; the caller
    /// owns the returned [`TourResult`].
    pub fn run(matrix: &DistanceMatrix, config: &AcoConfig) -> Result<TourResult> {
        Self::run_with_cancel(matrix, config, None)
    }

    /// Runs the colony search with an optional cancellation token.
    ///
    /// The flag is checked once per iteration boundary. At least one
    /// iteration always completes, so a cancelled run still carries a valid
    /// tour and sets [`TourResult::cancelled`].
    pub fn run_with_cancel(
        matrix: &DistanceMatrix,
        config: &AcoConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TourResult> {
        let mut engine = AcoEngine::new(matrix, config)?;
        let mut cancelled = false;

        for _ in 0..config.iterations {
            engine.run_iteration();

            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
        }

        let mut result = engine.result()?;
        result.cancelled = cancelled;
        Ok(result)
    }
}
