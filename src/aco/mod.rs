//! Ant Colony Optimization for the metric TSP.
//!
//! Implements the Ant System family: a population of stochastic ants builds
//! closed tours guided by a shared pheromone trail, the trail evaporates and
//! is reinforced by good tours, and the best tour found over a fixed
//! iteration budget is returned.
//!
//! # Key Types
//!
//! - [`AcoConfig`]: algorithm parameters (deposit scale, evaporation rate,
//!   influence exponents, budget, policies)
//! - [`PheromoneModel`]: the shared trail matrix with its
//!   evaporate/deposit rules
//! - [`AcoEngine`]: per-iteration state machine for callers that want to
//!   step the search themselves
//! - [`AcoRunner`]: executes the full budget in one blocking call
//! - [`TourResult`]: final best tour, its length, and run statistics
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod ant;
mod config;
mod engine;
mod pheromone;
mod runner;

pub use ant::Tour;
pub use config::{AcoConfig, Elitism, StartPolicy};
pub use engine::{AcoEngine, TourResult};
pub use pheromone::PheromoneModel;
pub use runner::AcoRunner;
