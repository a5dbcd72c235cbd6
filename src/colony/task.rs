//! Fan-out of one request to the explorer pool.

use super::create_rng;
use super::explorer::Explorer;
use crate::graph::{NodeId, Path, RoadGraph};
use rand::Rng;

/// Hands the same start/destination pair to every explorer.
///
/// Each explorer walks with its own RNG, seeded from the caller's RNG in
/// pool order before any walk starts. Sequential and parallel runs
/// therefore produce the same candidates for the same seed.
#[derive(Debug)]
pub struct TaskManager<'g, G: RoadGraph + ?Sized> {
    explorers: Vec<Explorer<'g, G>>,
    parallel: bool,
}

impl<'g, G: RoadGraph + ?Sized> TaskManager<'g, G> {
    pub fn new(explorers: Vec<Explorer<'g, G>>) -> Self {
        Self {
            explorers,
            parallel: false,
        }
    }

    /// Walks on the rayon pool. Ignored without the `parallel` feature.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn len(&self) -> usize {
        self.explorers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.explorers.is_empty()
    }

    /// One result per explorer, in pool order. `None` marks a walk that
    /// did not reach the destination. Failed walks are not retried.
    pub fn assign_tasks<R: Rng>(
        &self,
        start: NodeId,
        destination: NodeId,
        rng: &mut R,
    ) -> Vec<Option<Path>> {
        let seeds: Vec<u64> = self.explorers.iter().map(|_| rng.random()).collect();

        #[cfg(feature = "parallel")]
        if self.parallel {
            use rayon::prelude::*;
            return self
                .explorers
                .par_iter()
                .zip(seeds.par_iter())
                .map(|(explorer, &seed)| explorer.explore(start, destination, &mut create_rng(seed)))
                .collect();
        }

        self.explorers
            .iter()
            .zip(&seeds)
            .map(|(explorer, &seed)| explorer.explore(start, destination, &mut create_rng(seed)))
            .collect()
    }
}
