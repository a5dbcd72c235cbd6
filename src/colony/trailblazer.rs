//! Candidate scoring and pheromone deposit.

use super::pheromone::PheromoneDelta;
use crate::graph::{path_cost, NodeId, RoadGraph};

/// Quality and cost of a candidate path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// `1 / cost`, or `0.0` for zero-length and unusable paths.
    pub quality: f64,
    /// Total length, `f64::INFINITY` for unusable paths.
    pub cost: f64,
}

impl Evaluation {
    /// Score of a missing or broken path.
    pub const WORTHLESS: Evaluation = Evaluation {
        quality: 0.0,
        cost: f64::INFINITY,
    };

    pub fn from_cost(cost: f64) -> Self {
        Self {
            quality: quality_from_cost(cost),
            cost,
        }
    }

    /// Whether the path had edge data for every step.
    pub fn is_valid(&self) -> bool {
        self.cost.is_finite()
    }
}

/// Inverse cost. Strictly decreasing over positive costs, zero otherwise.
pub fn quality_from_cost(cost: f64) -> f64 {
    if cost > 0.0 && cost.is_finite() {
        1.0 / cost
    } else {
        0.0
    }
}

/// Scores candidates and lays pheromone along them.
#[derive(Debug)]
pub struct Trailblazer<'g, G: RoadGraph + ?Sized> {
    graph: &'g G,
}

impl<'g, G: RoadGraph + ?Sized> Trailblazer<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self { graph }
    }

    /// Sums edge lengths along `path`.
    ///
    /// `None` or a path with a missing edge scores [`Evaluation::WORTHLESS`].
    pub fn evaluate_solution(&self, path: Option<&[NodeId]>) -> Evaluation {
        path.and_then(|p| path_cost(self.graph, p))
            .map(Evaluation::from_cost)
            .unwrap_or(Evaluation::WORTHLESS)
    }

    /// Adds `quality` to every directed edge of `path` in `delta`.
    ///
    /// Deposits compound: traversing an edge twice deposits twice.
    pub fn deposit_pheromones(&self, path: &[NodeId], quality: f64, delta: &mut PheromoneDelta) {
        if quality <= 0.0 {
            return;
        }
        for pair in path.windows(2) {
            delta.deposit(pair[0], pair[1], quality);
        }
    }
}
