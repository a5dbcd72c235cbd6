//! Distance-biased random walks.

use crate::graph::{NodeId, Path, RoadGraph};
use rand::Rng;
use tracing::debug;

/// Outcome of a single walk, successful or not.
#[derive(Debug, Clone, PartialEq)]
pub struct Walk {
    /// Every node visited, starting with the start node.
    pub path: Path,
    /// Number of moves made.
    pub steps: usize,
    /// Whether the walk ended on the destination.
    pub reached: bool,
}

/// Produces one candidate path per call by walking toward the destination.
///
/// At every step each neighbor `n` is weighted by `1 / (d(n, dest) + epsilon)`
/// where `d` is the Euclidean distance between coordinates. Neighbors with
/// unknown coordinates get weight zero. The next node is drawn from the
/// normalized weights, so the walk may revisit nodes.
///
/// The walk gives up on a dead end or after `node_count * step_factor`
/// moves, which bounds it on any finite graph.
#[derive(Debug)]
pub struct Explorer<'g, G: RoadGraph + ?Sized> {
    graph: &'g G,
    epsilon: f64,
    step_factor: usize,
}

impl<G: RoadGraph + ?Sized> Clone for Explorer<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: RoadGraph + ?Sized> Copy for Explorer<'_, G> {}

impl<'g, G: RoadGraph + ?Sized> Explorer<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            epsilon: 1e-6,
            step_factor: 100,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_step_factor(mut self, factor: usize) -> Self {
        self.step_factor = factor;
        self
    }

    /// Maximum number of moves of a walk on this graph.
    pub fn step_limit(&self) -> usize {
        self.graph.node_count().saturating_mul(self.step_factor)
    }

    /// Walks from `start` to `destination`.
    ///
    /// Returns the visited path if the destination was reached, `None` on a
    /// dead end or when the step budget runs out.
    pub fn explore<R: Rng>(&self, start: NodeId, destination: NodeId, rng: &mut R) -> Option<Path> {
        let walk = self.walk(start, destination, rng);
        walk.reached.then_some(walk.path)
    }

    /// Like [`explore`](Self::explore), but keeps failed walks.
    pub fn walk<R: Rng>(&self, start: NodeId, destination: NodeId, rng: &mut R) -> Walk {
        let limit = self.step_limit();
        let mut current = start;
        let mut path = vec![start];
        let mut steps = 0usize;

        while current != destination && steps < limit {
            let neighbors = self.graph.neighbors(current);
            if neighbors.is_empty() {
                break;
            }

            let probabilities = self.transition_probabilities(&neighbors, destination);
            let next = neighbors[sample_index(&probabilities, rng)];
            path.push(next);
            current = next;
            steps += 1;
        }

        let reached = current == destination;
        debug!(start, destination, end = current, steps, reached, "explorer walk finished");
        Walk {
            path,
            steps,
            reached,
        }
    }

    /// Sampling distribution over `neighbors` for a walk heading to
    /// `destination`.
    ///
    /// Sums to one. When no neighbor has a usable distance (all weights are
    /// zero) the distribution is uniform.
    pub fn transition_probabilities(&self, neighbors: &[NodeId], destination: NodeId) -> Vec<f64> {
        let weights: Vec<f64> = neighbors
            .iter()
            .map(|&n| 1.0 / (self.graph.distance_between(n, destination) + self.epsilon))
            .collect();
        let total: f64 = weights.iter().sum();

        if total > 0.0 && total.is_finite() {
            weights.iter().map(|w| w / total).collect()
        } else {
            let uniform = 1.0 / neighbors.len() as f64;
            vec![uniform; neighbors.len()]
        }
    }
}

/// Roulette-wheel draw over a normalized distribution.
fn sample_index<R: Rng>(probabilities: &[f64], rng: &mut R) -> usize {
    let mut roll = rng.random_range(0.0..1.0);
    for (i, &p) in probabilities.iter().enumerate() {
        roll -= p;
        if roll < 0.0 {
            return i;
        }
    }
    // Rounding left a sliver past the last bucket.
    probabilities
        .iter()
        .rposition(|&p| p > 0.0)
        .unwrap_or(probabilities.len().saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::create_rng;
    use crate::graph::{Coordinate, Edge, RoadNetwork};
    use proptest::prelude::*;

    /// A -> B -> C, one way, 10 m per edge.
    fn chain() -> RoadNetwork {
        let mut network = RoadNetwork::new();
        network.add_node(1, Some(Coordinate::new(0.0, 0.0)));
        network.add_node(2, Some(Coordinate::new(0.0, 1.0)));
        network.add_node(3, Some(Coordinate::new(0.0, 2.0)));
        network.add_edge(1, 2, Edge::new(10.0)).unwrap();
        network.add_edge(2, 3, Edge::new(10.0)).unwrap();
        network
    }

    /// Hub 0 with spokes at increasing distance from the destination 9.
    fn star() -> RoadNetwork {
        let mut network = RoadNetwork::new();
        network.add_node(0, Some(Coordinate::new(0.0, 0.0)));
        network.add_node(9, Some(Coordinate::new(10.0, 0.0)));
        for (id, lat) in [(1, 9.0), (2, 5.0), (3, 1.0)] {
            network.add_node(id, Some(Coordinate::new(lat, 0.0)));
            network.add_edge(0, id, Edge::new(1.0)).unwrap();
        }
        network.add_node(4, None);
        network.add_edge(0, 4, Edge::new(1.0)).unwrap();
        network
    }

    #[test]
    fn test_chain_reaches_destination() {
        let network = chain();
        let explorer = Explorer::new(&network);
        let mut rng = create_rng(42);

        let walk = explorer.walk(1, 3, &mut rng);
        assert!(walk.reached);
        assert_eq!(walk.steps, 2);
        assert_eq!(walk.path, vec![1, 2, 3]);
    }

    #[test]
    fn test_start_is_destination() {
        let network = chain();
        let mut rng = create_rng(1);
        assert_eq!(Explorer::new(&network).explore(2, 2, &mut rng), Some(vec![2]));
    }

    #[test]
    fn test_dead_end_fails_immediately() {
        let network = chain();
        let mut rng = create_rng(1);
        let walk = Explorer::new(&network).walk(3, 1, &mut rng);
        assert!(!walk.reached);
        assert_eq!(walk.steps, 0);
        assert_eq!(walk.path, vec![3]);
        assert_eq!(Explorer::new(&network).explore(3, 1, &mut rng), None);
    }

    #[test]
    fn test_unknown_start_fails() {
        let network = chain();
        let mut rng = create_rng(1);
        assert_eq!(Explorer::new(&network).explore(77, 3, &mut rng), None);
    }

    #[test]
    fn test_step_budget_bounds_cycles() {
        // 1 <-> 2 loop, destination 3 is isolated.
        let mut network = RoadNetwork::new();
        for id in 1..=3 {
            network.add_node(id, Some(Coordinate::new(0.0, id as f64)));
        }
        network.add_two_way(1, 2, Edge::new(1.0)).unwrap();

        let explorer = Explorer::new(&network).with_step_factor(7);
        let mut rng = create_rng(3);
        let walk = explorer.walk(1, 3, &mut rng);

        assert!(!walk.reached);
        assert_eq!(explorer.step_limit(), 21);
        assert_eq!(walk.steps, 21);
        assert_eq!(walk.path.len(), 22);
    }

    #[test]
    fn test_probabilities_prefer_closer_neighbors() {
        let network = star();
        let explorer = Explorer::new(&network);
        let probs = explorer.transition_probabilities(&[1, 2, 3, 4], 9);

        assert!(probs[0] > probs[1]);
        assert!(probs[1] > probs[2]);
        assert!(probs[3] < 1e-12, "missing coordinates should be negligible");
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_probabilities_uniform_without_coordinates() {
        let network = star();
        let explorer = Explorer::new(&network);
        // Node 4 has no coordinates, so every neighbor is infinitely far.
        let probs = explorer.transition_probabilities(&[1, 2, 3], 4);
        for p in &probs {
            assert!((p - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sampling_is_biased() {
        let network = star();
        let explorer = Explorer::new(&network);
        let probs = explorer.transition_probabilities(&[1, 2, 3, 4], 9);
        let mut rng = create_rng(42);

        let mut counts = [0usize; 4];
        for _ in 0..5000 {
            counts[sample_index(&probs, &mut rng)] += 1;
        }
        assert!(counts[0] > counts[2], "closest spoke should win most draws: {counts:?}");
        assert_eq!(counts[3], 0);
    }

    #[test]
    fn test_seeded_walks_repeat() {
        let mut network = RoadNetwork::new();
        for id in 0..16u64 {
            network.add_node(id, Some(Coordinate::new((id / 4) as f64, (id % 4) as f64)));
        }
        for id in 0..16u64 {
            if id % 4 < 3 {
                network.add_two_way(id, id + 1, Edge::new(1.0)).unwrap();
            }
            if id < 12 {
                network.add_two_way(id, id + 4, Edge::new(1.0)).unwrap();
            }
        }
        let explorer = Explorer::new(&network);
        let a = explorer.walk(0, 15, &mut create_rng(11));
        let b = explorer.walk(0, 15, &mut create_rng(11));
        assert_eq!(a, b);
        assert!(a.reached);
    }

    proptest! {
        #[test]
        fn prop_probabilities_sum_to_one(
            coords in prop::collection::vec((-90.0f64..90.0, -180.0f64..180.0), 1..12),
            dest in (-90.0f64..90.0, -180.0f64..180.0),
        ) {
            let mut network = RoadNetwork::new();
            network.add_node(1000, Some(Coordinate::new(dest.0, dest.1)));
            let mut neighbors = Vec::new();
            for (i, (lat, lon)) in coords.iter().enumerate() {
                network.add_node(i as NodeId, Some(Coordinate::new(*lat, *lon)));
                neighbors.push(i as NodeId);
            }
            let probs = Explorer::new(&network).transition_probabilities(&neighbors, 1000);
            prop_assert_eq!(probs.len(), neighbors.len());
            prop_assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
            prop_assert!(probs.iter().all(|p| *p >= 0.0));
        }
    }
}
