//! Road network contract.
//!
//! The colony never owns or mutates the network. It reads it through
//! [`RoadGraph`]: neighbor enumeration, first-edge lookup between two nodes,
//! and optional node coordinates. Any provider that can answer those three
//! questions (an OpenStreetMap extract, a synthetic grid, a test fixture)
//! can be searched.

mod network;
mod types;

pub use network::RoadNetwork;
#[cfg(feature = "serde")]
pub use network::{EdgeRecord, NetworkFile, NodeRecord};
pub use types::{path_cost, Coordinate, Edge, NodeId, Path, RoadGraph};
