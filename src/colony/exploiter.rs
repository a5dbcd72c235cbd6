//! Local refinement of explorer candidates.
//!
//! Refinement runs in two passes:
//!
//! 1. **Cycle elimination**: whenever the walk returns to a node it already
//!    visited, the loop in between is cut out. Every remaining step was a
//!    step of the original walk, so the result stays connected.
//! 2. **Shortcut substitution**: from each node, every direct edge to a
//!    later path node that is strictly shorter than the segment it skips is
//!    a candidate. The one saving the most length replaces its segment.
//!    Equal savings go to the edge carrying more pheromone, then to the
//!    nearer target.
//!
//! Both passes only ever remove length, so a refined path never costs more
//! than its input and keeps both endpoints.

use super::pheromone::PheromoneMatrix;
use crate::graph::{path_cost, NodeId, Path, RoadGraph};
use std::collections::HashMap;
use tracing::trace;

const SAVINGS_TOLERANCE: f64 = 1e-9;

/// Improves candidate paths using the network and the current trails.
#[derive(Debug)]
pub struct Exploiter<'a, G: RoadGraph + ?Sized> {
    graph: &'a G,
    pheromones: &'a PheromoneMatrix,
}

impl<'a, G: RoadGraph + ?Sized> Exploiter<'a, G> {
    pub fn new(graph: &'a G, pheromones: &'a PheromoneMatrix) -> Self {
        Self { graph, pheromones }
    }

    /// Returns a loop-free path with the same endpoints and no higher cost.
    ///
    /// `None` if `path` is empty or the loop-free path is not connected in
    /// the network.
    pub fn refine_solution(&self, path: &[NodeId]) -> Option<Path> {
        let mut route = remove_cycles(path);
        if route.is_empty() {
            return None;
        }
        path_cost(self.graph, &route)?;

        let before = route.len();
        self.substitute_shortcuts(&mut route);
        trace!(
            walked = path.len(),
            loop_free = before,
            refined = route.len(),
            "exploiter refined candidate"
        );
        Some(route)
    }

    /// Total length of `path`, `f64::INFINITY` when a step has no edge.
    ///
    /// Agrees with [`Trailblazer::evaluate_solution`](super::Trailblazer::evaluate_solution).
    pub fn route_cost(&self, path: &[NodeId]) -> f64 {
        path_cost(self.graph, path).unwrap_or(f64::INFINITY)
    }

    fn step_length(&self, from: NodeId, to: NodeId) -> f64 {
        self.graph
            .edge(from, to)
            .map_or(f64::INFINITY, |edge| edge.length)
    }

    fn substitute_shortcuts(&self, route: &mut Path) {
        let mut i = 0;
        while i + 2 < route.len() {
            let from = route[i];
            // (target index, savings, pheromone on the shortcut)
            let mut best: Option<(usize, f64, f64)> = None;
            let mut segment = self.step_length(from, route[i + 1]);

            for j in i + 2..route.len() {
                segment += self.step_length(route[j - 1], route[j]);
                let Some(shortcut) = self.graph.edge(from, route[j]) else {
                    continue;
                };
                let savings = segment - shortcut.length;
                if savings <= SAVINGS_TOLERANCE {
                    continue;
                }
                let trail = self.pheromones.level(from, route[j]);
                let better = match best {
                    None => true,
                    Some((_, best_savings, best_trail)) => {
                        savings > best_savings + SAVINGS_TOLERANCE
                            || ((savings - best_savings).abs() <= SAVINGS_TOLERANCE
                                && trail > best_trail)
                    }
                };
                if better {
                    best = Some((j, savings, trail));
                }
            }

            if let Some((j, _, _)) = best {
                route.drain(i + 1..j);
            }
            i += 1;
        }
    }
}

/// Cuts every loop out of a walk, keeping the first visit of each node.
fn remove_cycles(path: &[NodeId]) -> Path {
    let mut route: Path = Vec::with_capacity(path.len());
    let mut position: HashMap<NodeId, usize> = HashMap::new();

    for &node in path {
        match position.get(&node) {
            Some(&at) => {
                for dropped in route.drain(at + 1..) {
                    position.remove(&dropped);
                }
            }
            None => {
                position.insert(node, route.len());
                route.push(node);
            }
        }
    }
    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::PheromoneDelta;
    use crate::graph::{Coordinate, Edge, RoadNetwork};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn network(edges: &[(NodeId, NodeId, f64)]) -> RoadNetwork {
        let mut network = RoadNetwork::new();
        for &(a, b, _) in edges {
            network.add_node(a, Some(Coordinate::new(0.0, a as f64)));
            network.add_node(b, Some(Coordinate::new(0.0, b as f64)));
        }
        for &(a, b, length) in edges {
            network.add_edge(a, b, Edge::new(length)).unwrap();
        }
        network
    }

    #[test]
    fn test_remove_cycles() {
        assert_eq!(remove_cycles(&[1, 2, 3, 2, 4]), vec![1, 2, 4]);
        assert_eq!(remove_cycles(&[1, 2, 1, 2, 3]), vec![1, 2, 3]);
        assert_eq!(remove_cycles(&[1, 2, 3, 4, 2, 5, 3, 6]), vec![1, 2, 5, 3, 6]);
        assert_eq!(remove_cycles(&[7]), vec![7]);
        assert!(remove_cycles(&[]).is_empty());
    }

    #[test]
    fn test_refine_removes_loop() {
        let graph = network(&[(1, 2, 5.0), (2, 3, 5.0), (3, 2, 5.0), (3, 4, 5.0), (2, 4, 20.0)]);
        let trails = PheromoneMatrix::new();
        let exploiter = Exploiter::new(&graph, &trails);

        let walk = [1, 2, 3, 2, 3, 4];
        let refined = exploiter.refine_solution(&walk).unwrap();

        assert_eq!(refined, vec![1, 2, 3, 4]);
        assert!((exploiter.route_cost(&refined) - 15.0).abs() < 1e-10);
        assert!(exploiter.route_cost(&refined) <= exploiter.route_cost(&walk));
    }

    #[test]
    fn test_refine_takes_shortcut() {
        let graph = network(&[(1, 2, 10.0), (2, 3, 10.0), (3, 4, 10.0), (1, 3, 12.0)]);
        let trails = PheromoneMatrix::new();
        let refined = Exploiter::new(&graph, &trails)
            .refine_solution(&[1, 2, 3, 4])
            .unwrap();
        assert_eq!(refined, vec![1, 3, 4]);
    }

    #[test]
    fn test_refine_prefers_largest_savings() {
        let graph = network(&[
            (1, 2, 10.0),
            (2, 3, 10.0),
            (3, 4, 10.0),
            (1, 3, 15.0),
            (1, 4, 16.0),
        ]);
        let trails = PheromoneMatrix::new();
        let refined = Exploiter::new(&graph, &trails)
            .refine_solution(&[1, 2, 3, 4])
            .unwrap();
        assert_eq!(refined, vec![1, 4]);
    }

    #[test]
    fn test_refine_breaks_ties_by_pheromone() {
        // Both shortcuts save 5 m.
        let graph = network(&[
            (1, 2, 10.0),
            (2, 3, 10.0),
            (3, 4, 10.0),
            (1, 3, 15.0),
            (1, 4, 25.0),
        ]);
        let mut delta = PheromoneDelta::new();
        delta.deposit(1, 3, 0.5);
        let mut trails = PheromoneMatrix::new();
        trails.apply(delta);

        let refined = Exploiter::new(&graph, &trails)
            .refine_solution(&[1, 2, 3, 4])
            .unwrap();
        assert_eq!(refined, vec![1, 3, 4]);

        let untouched = PheromoneMatrix::new();
        let refined = Exploiter::new(&graph, &untouched)
            .refine_solution(&[1, 2, 3, 4])
            .unwrap();
        // Without trails the first (nearest) qualifying shortcut stands.
        assert_eq!(refined, vec![1, 3, 4]);
    }

    #[test]
    fn test_refine_ignores_longer_edges() {
        let graph = network(&[(1, 2, 10.0), (2, 3, 10.0), (1, 3, 25.0)]);
        let trails = PheromoneMatrix::new();
        let refined = Exploiter::new(&graph, &trails)
            .refine_solution(&[1, 2, 3])
            .unwrap();
        assert_eq!(refined, vec![1, 2, 3]);
    }

    #[test]
    fn test_refine_disconnected_is_none() {
        let graph = network(&[(1, 2, 10.0), (3, 4, 10.0)]);
        let trails = PheromoneMatrix::new();
        let exploiter = Exploiter::new(&graph, &trails);
        assert_eq!(exploiter.refine_solution(&[1, 2, 3, 4]), None);
        assert_eq!(exploiter.refine_solution(&[]), None);
        assert!(exploiter.route_cost(&[1, 2, 3, 4]).is_infinite());
    }

    #[test]
    fn test_refine_single_node() {
        let graph = network(&[(1, 2, 10.0)]);
        let trails = PheromoneMatrix::new();
        let exploiter = Exploiter::new(&graph, &trails);
        assert_eq!(exploiter.refine_solution(&[1]), Some(vec![1]));
        assert_eq!(exploiter.route_cost(&[1]), 0.0);
    }

    #[test]
    fn test_route_cost_matches_trailblazer() {
        let graph = network(&[(1, 2, 3.5), (2, 3, 4.25)]);
        let trails = PheromoneMatrix::new();
        let path = [1, 2, 3];
        let cost = Exploiter::new(&graph, &trails).route_cost(&path);
        let eval = crate::colony::Trailblazer::new(&graph).evaluate_solution(Some(&path[..]));
        assert_eq!(cost, eval.cost);
    }

    /// Complete digraph on `n` nodes with arbitrary lengths.
    fn complete(n: u64, lengths: &[f64]) -> RoadNetwork {
        let mut graph = RoadNetwork::new();
        for id in 0..n {
            graph.add_node(id, None);
        }
        let mut k = 0;
        for a in 0..n {
            for b in 0..n {
                if a != b {
                    graph.add_edge(a, b, Edge::new(lengths[k % lengths.len()])).unwrap();
                    k += 1;
                }
            }
        }
        graph
    }

    proptest! {
        #[test]
        fn prop_refine_never_worse(
            lengths in prop::collection::vec(0.0f64..100.0, 1..30),
            walk in prop::collection::vec(0u64..6, 2..40),
        ) {
            let graph = complete(6, &lengths);
            // Consecutive duplicates are not edges; collapse them.
            let mut walk = walk;
            walk.dedup();
            prop_assume!(walk.len() >= 2);

            let trails = PheromoneMatrix::new();
            let exploiter = Exploiter::new(&graph, &trails);
            let refined = exploiter.refine_solution(&walk).unwrap();

            prop_assert_eq!(refined.first(), walk.first());
            prop_assert_eq!(refined.last(), walk.last());
            prop_assert!(exploiter.route_cost(&refined) <= exploiter.route_cost(&walk) + 1e-9);
            let distinct: HashSet<_> = refined.iter().collect();
            prop_assert_eq!(distinct.len(), refined.len());
        }
    }
}
