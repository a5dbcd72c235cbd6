//! Ant Colony Optimization (ACO) over road networks.
//!
//! One routing request runs one generation of a small multi-agent colony.
//! Explorers walk stochastically toward the destination, trailblazers score
//! the shortest walks and lay pheromone on their edges, and an exploiter
//! tightens each candidate into a loop-free route. Helper agents aggregate
//! the generation, adapt a rate knob and evaporate trails that persist in
//! the caller's [`RoutingSession`].
//!
//! Exploration uses a distance-only heuristic: pheromone influences
//! refinement and is carried across requests, but explorer transition
//! probabilities depend solely on straight-line distance to the goal.
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a Colony of Cooperating Agents"
//! - Dorigo & Gambardella (1997), "Ant Colony System: A Cooperative Learning Approach to the TSP"
//! - Di Caro & Dorigo (1998), "AntNet: Distributed Stigmergetic Control for Communications Networks"

mod config;
mod exploiter;
mod explorer;
mod feedback;
mod pheromone;
mod runner;
mod session;
mod task;
mod trailblazer;

pub use config::{ColonyConfig, FeedbackConfig, Selection};
pub use exploiter::Exploiter;
pub use explorer::{Explorer, Walk};
pub use feedback::{ExplorerParams, FeedbackLoop, MetricRecord, PerformanceMonitor};
pub use pheromone::{EdgeKey, PheromoneDelta, PheromoneMatrix, PheromoneRegulator};
pub use runner::{ColonyRunner, GenerationResult, NoRouteReason};
pub use session::RoutingSession;
pub use task::TaskManager;
pub use trailblazer::{quality_from_cost, Evaluation, Trailblazer};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic RNG for a given seed.
pub(crate) fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
