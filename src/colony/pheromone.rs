//! Pheromone bookkeeping.
//!
//! The matrix is the only long-lived mutable state of a routing session.
//! It is never written through shared handles: trailblazers accumulate
//! into private [`PheromoneDelta`]s, the runner merges them once all
//! deposits of a generation are done, and the [`PheromoneRegulator`]
//! rescales the whole matrix afterwards.

use crate::graph::NodeId;
use std::collections::HashMap;

/// Directed edge key `(from, to)`.
pub type EdgeKey = (NodeId, NodeId);

/// Pending deposits, accumulated per edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PheromoneDelta {
    deposits: HashMap<EdgeKey, f64>,
}

impl PheromoneDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to the pending deposit on `from -> to`.
    pub fn deposit(&mut self, from: NodeId, to: NodeId, amount: f64) {
        *self.deposits.entry((from, to)).or_insert(0.0) += amount;
    }

    /// Folds another delta into this one.
    pub fn merge(&mut self, other: PheromoneDelta) {
        for ((from, to), amount) in other.deposits {
            self.deposit(from, to, amount);
        }
    }

    /// Pending amount on `from -> to`.
    pub fn amount(&self, from: NodeId, to: NodeId) -> f64 {
        self.deposits.get(&(from, to)).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.deposits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deposits.is_empty()
    }
}

/// Reinforcement level per directed edge.
///
/// Between generations every stored level is at least the regulator's
/// floor. Absent edges read as `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PheromoneMatrix {
    levels: HashMap<EdgeKey, f64>,
}

impl PheromoneMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level on `from -> to`, `0.0` when absent.
    pub fn level(&self, from: NodeId, to: NodeId) -> f64 {
        self.get(from, to).unwrap_or(0.0)
    }

    /// Level on `from -> to`, `None` when absent.
    pub fn get(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.levels.get(&(from, to)).copied()
    }

    /// Adds every pending deposit of `delta` to the stored levels.
    pub fn apply(&mut self, delta: PheromoneDelta) {
        for (edge, amount) in delta.deposits {
            *self.levels.entry(edge).or_insert(0.0) += amount;
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Iterates over `(edge, level)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (EdgeKey, f64)> + '_ {
        self.levels.iter().map(|(&edge, &level)| (edge, level))
    }

    /// Multiplies every level by `keep` and drops those under `floor`.
    /// Returns the number of dropped entries.
    fn decay(&mut self, keep: f64, floor: f64) -> usize {
        let before = self.levels.len();
        self.levels.retain(|_, level| {
            *level *= keep;
            *level >= floor
        });
        before - self.levels.len()
    }
}

/// Decays and prunes a [`PheromoneMatrix`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PheromoneRegulator {
    evaporation_rate: f64,
    floor: f64,
}

impl Default for PheromoneRegulator {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl PheromoneRegulator {
    /// Default pruning floor.
    pub const DEFAULT_FLOOR: f64 = 0.01;

    /// Creates a regulator. `evaporation_rate` is clamped to [0, 1].
    pub fn new(evaporation_rate: f64) -> Self {
        Self {
            evaporation_rate: evaporation_rate.clamp(0.0, 1.0),
            floor: Self::DEFAULT_FLOOR,
        }
    }

    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = floor.max(0.0);
        self
    }

    pub fn evaporation_rate(&self) -> f64 {
        self.evaporation_rate
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Multiplies every level by `1 - evaporation_rate` and removes levels
    /// that fall below the floor. Returns how many edges were pruned.
    pub fn evaporate(&self, matrix: &mut PheromoneMatrix) -> usize {
        matrix.decay(1.0 - self.evaporation_rate, self.floor)
    }
}
