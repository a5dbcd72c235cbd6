//! Single-generation ant-colony route discovery over weighted road networks.
//!
//! A routing request runs exactly one *generation* of agents:
//!
//! - **Explorers** perform distance-biased random walks toward the destination.
//! - **Trailblazers** score the shortest candidates and deposit pheromone
//!   proportional to their quality.
//! - An **Exploiter** removes loops and substitutes cheaper shortcut edges.
//! - Helper agents aggregate the generation's cost, adapt a shared rate
//!   knob, and evaporate the long-lived pheromone matrix.
//!
//! # Architecture
//!
//! The road network itself is an external collaborator consumed through the
//! [`graph::RoadGraph`] trait. [`graph::RoadNetwork`] is an in-memory
//! implementation backed by `petgraph`. Geocoding, network retrieval and
//! natural-language handling are black boxes wired together by
//! [`planner::RoutePlanner`].
//!
//! ```
//! use u_antroute::colony::{ColonyConfig, ColonyRunner, RoutingSession};
//! use u_antroute::graph::{Coordinate, Edge, RoadNetwork};
//!
//! let mut network = RoadNetwork::new();
//! network.add_node(1, Some(Coordinate::new(0.0, 0.0)));
//! network.add_node(2, Some(Coordinate::new(0.0, 0.001)));
//! network.add_edge(1, 2, Edge::named(90.0, "Main Street")).unwrap();
//!
//! let mut session = RoutingSession::new();
//! let config = ColonyConfig::default().with_seed(7);
//! let result = ColonyRunner::run(&network, 1, 2, &mut session, &config).unwrap();
//! assert_eq!(result.best, Some(vec![1, 2]));
//! ```

pub mod colony;
pub mod directions;
pub mod error;
pub mod graph;
pub mod planner;

pub use error::{AntRouteError, Result};
