//! Stochastic tour construction.
//!
//! An [`Ant`] is transient per-construction state: a visited set, the
//! partial tour, the current city, and the accumulated length. It is
//! consumed into a [`Tour`] once every city has been visited and the tour
//! has been closed back to its start.

use rand::Rng;

use super::pheromone::PheromoneModel;
use crate::matrix::DistanceMatrix;

/// A closed tour: a permutation of `0..n` and its total length, including
/// the edge from the last city back to the first.
#[derive(Debug, Clone)]
pub struct Tour {
    /// Visiting order of the cities.
    pub cities: Vec<usize>,
    /// Total closed-tour length.
    pub length: f64,
}

/// Per-construction agent state.
pub(crate) struct Ant {
    visited: Vec<bool>,
    tour: Vec<usize>,
    current: usize,
    length: f64,
}

impl Ant {
    /// Places a new ant at its start city.
    pub(crate) fn new(size: usize, start: usize) -> Self {
        let mut visited = vec![false; size];
        visited[start] = true;
        let mut tour = Vec::with_capacity(size);
        tour.push(start);
        Self {
            visited,
            tour,
            current: start,
            length: 0.0,
        }
    }

    /// Builds a complete closed tour, consuming the ant.
    ///
    /// At each step the next city is drawn by roulette-wheel sampling over
    /// the unvisited candidates, proportional to
    /// `intensity^alpha * heuristic^beta`. A degenerate landscape (zero or
    /// non-finite total desirability) falls back to a uniform choice among
    /// the unvisited candidates, so construction never stalls.
    pub(crate) fn construct<R: Rng>(
        mut self,
        matrix: &DistanceMatrix,
        pheromone: &PheromoneModel,
        heuristic: &[f64],
        alpha: f64,
        beta: f64,
        rng: &mut R,
    ) -> Tour {
        let n = matrix.size();
        while self.tour.len() < n {
            let next = self.select_next(pheromone, heuristic, alpha, beta, rng);
            self.length += matrix.distance(self.current, next);
            self.visited[next] = true;
            self.tour.push(next);
            self.current = next;
        }

        // Close the tour back to the start city.
        self.length += matrix.distance(self.current, self.tour[0]);

        Tour {
            cities: self.tour,
            length: self.length,
        }
    }

    fn select_next<R: Rng>(
        &self,
        pheromone: &PheromoneModel,
        heuristic: &[f64],
        alpha: f64,
        beta: f64,
        rng: &mut R,
    ) -> usize {
        let n = self.visited.len();
        let mut candidates = Vec::with_capacity(n - self.tour.len());
        let mut total = 0.0;

        for j in 0..n {
            if self.visited[j] {
                continue;
            }
            let tau = pheromone.intensity(self.current, j).powf(alpha);
            let eta = heuristic[self.current * n + j].powf(beta);
            let weight = tau * eta;
            candidates.push((j, weight));
            total += weight;
        }

        debug_assert!(!candidates.is_empty(), "ant has no unvisited city left");

        if total <= 0.0 || !total.is_finite() {
            // Degenerate desirability landscape: uniform random choice.
            return candidates[rng.random_range(0..candidates.len())].0;
        }

        let threshold = rng.random_range(0.0..total);
        let mut cumulative = 0.0;
        for &(j, weight) in &candidates {
            cumulative += weight;
            if cumulative > threshold {
                return j;
            }
        }

        candidates[candidates.len() - 1].0 // floating-point fallback
    }
}
