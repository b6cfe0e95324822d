//! Crate-wide error taxonomy.
//!
//! Every validation failure is detected at construction time of the
//! offending object (distance matrix, configuration bundle, engine),
//! never mid-iteration. The stochastic fallback during tour construction
//! is not an error and does not appear here.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the ACO engine and its boundary constructors.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or undersized geometric input (points or matrix).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An out-of-range tuning value in the configuration bundle.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A result was requested before any iteration completed.
    #[error("engine has not run: no iteration has completed")]
    EngineNotRun,

    /// An allocation could not be satisfied for the requested problem size.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),
}
