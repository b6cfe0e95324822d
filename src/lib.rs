//! Ant Colony Optimization for the metric Traveling Salesman Problem.
//!
//! Given a set of points (raw d-dimensional coordinates or a precomputed
//! pairwise-distance matrix), the engine searches for a low-cost closed
//! tour visiting every point exactly once, using a population of stochastic
//! ants guided by an adaptively updated pheromone trail.
//!
//! # Components
//!
//! - [`matrix::DistanceMatrix`]: immutable pairwise distances, built from
//!   coordinates or supplied verbatim.
//! - [`aco::AcoConfig`]: validated, immutable tuning bundle (pheromone
//!   deposit scale, evaporation rate, influence exponents, budget).
//! - [`aco::PheromoneModel`]: the shared trail matrix and its
//!   evaporate/deposit rules.
//! - [`aco::AcoEngine`]: the per-iteration state machine (construct,
//!   update, evaluate) over a fixed iteration budget.
//! - [`aco::AcoRunner`]: the blocking run facade returning an
//!   [`aco::TourResult`].
//! - [`boundary`]: the opaque create/process/destroy lifecycle seam for the
//!   external clustering collaborators.
//!
//! # Determinism
//!
//! All randomness flows through [`random::create_rng`]; a fixed seed in the
//! configuration reproduces a run exactly, with or without the `parallel`
//! feature.
//!
//! # Architecture
//!
//! This crate is a pure algorithms layer: it performs no I/O and carries no
//! host-language marshalling. Binding layers that move arrays across a
//! foreign boundary sit above it and consume the owned [`aco::TourResult`].

pub mod aco;
pub mod boundary;
pub mod error;
pub mod matrix;
pub mod random;

pub use error::{Error, Result};
