//! State that outlives a single generation.

use super::feedback::ExplorerParams;
use super::pheromone::PheromoneMatrix;

/// Long-lived routing state owned by the caller.
///
/// Holds the pheromone trails and the explorer rate across requests.
/// Every [`ColonyRunner::run`](super::ColonyRunner::run) borrows it
/// mutably for exactly one generation, so trails laid by one request bias
/// the refinement of the next.
#[derive(Debug, Clone, Default)]
pub struct RoutingSession {
    pub(crate) pheromones: PheromoneMatrix,
    pub(crate) params: ExplorerParams,
    pub(crate) generations: usize,
}

impl RoutingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing explorer rate.
    pub fn with_params(mut self, params: ExplorerParams) -> Self {
        self.params = params;
        self
    }

    pub fn pheromones(&self) -> &PheromoneMatrix {
        &self.pheromones
    }

    pub fn params(&self) -> &ExplorerParams {
        &self.params
    }

    /// Number of generations run in this session.
    pub fn generations(&self) -> usize {
        self.generations
    }

    /// Forgets every trail and restores the default rate.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
