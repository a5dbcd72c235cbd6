//! In-memory road network backed by petgraph.

use super::types::{Coordinate, Edge, NodeId, RoadGraph};
use crate::error::{AntRouteError, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
struct NodeData {
    id: NodeId,
    coordinate: Option<Coordinate>,
}

/// Directed multigraph of road segments.
///
/// Parallel edges are kept in insertion order: [`RoadGraph::edge`] returns
/// the earliest inserted one and [`RoadGraph::neighbors`] lists successors
/// by first insertion.
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    graph: DiGraph<NodeData, Edge>,
    index: HashMap<NodeId, NodeIndex>,
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node, or updates the coordinate of an existing one.
    pub fn add_node(&mut self, id: NodeId, coordinate: Option<Coordinate>) {
        match self.index.get(&id) {
            Some(&idx) => self.graph[idx].coordinate = coordinate,
            None => {
                let idx = self.graph.add_node(NodeData { id, coordinate });
                self.index.insert(id, idx);
            }
        }
    }

    /// Adds a one-way edge `from -> to`.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, edge: Edge) -> Result<()> {
        if !edge.length.is_finite() || edge.length < 0.0 {
            return Err(AntRouteError::InvalidLength {
                from,
                to,
                length: edge.length,
            });
        }
        let a = self.node_index(from)?;
        let b = self.node_index(to)?;
        self.graph.add_edge(a, b, edge);
        Ok(())
    }

    /// Adds the edge in both directions.
    pub fn add_two_way(&mut self, a: NodeId, b: NodeId, edge: Edge) -> Result<()> {
        self.add_edge(a, b, edge.clone())?;
        self.add_edge(b, a, edge)
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn node_index(&self, id: NodeId) -> Result<NodeIndex> {
        self.index
            .get(&id)
            .copied()
            .ok_or(AntRouteError::UnknownNode(id))
    }
}

impl RoadGraph for RoadNetwork {
    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn contains(&self, node: NodeId) -> bool {
        self.index.contains_key(&node)
    }

    fn node_ids(&self) -> Vec<NodeId> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].id)
            .collect()
    }

    fn coordinate(&self, node: NodeId) -> Option<Coordinate> {
        self.index
            .get(&node)
            .and_then(|&idx| self.graph[idx].coordinate)
    }

    fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        let Some(&idx) = self.index.get(&node) else {
            return Vec::new();
        };
        // petgraph walks outgoing edges newest first.
        let mut outgoing: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.id(), e.target()))
            .collect();
        outgoing.sort_by_key(|&(edge, _)| edge);

        let mut seen = HashSet::new();
        outgoing
            .into_iter()
            .map(|(_, target)| self.graph[target].id)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    fn edge(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        let a = *self.index.get(&from)?;
        let b = *self.index.get(&to)?;
        self.graph
            .edges_connecting(a, b)
            .min_by_key(|e| e.id())
            .map(|e| e.weight())
    }
}

// ============================================================================
// JSON network files
// ============================================================================

/// Node entry of a [`NetworkFile`].
#[cfg(feature = "serde")]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

/// Edge entry of a [`NetworkFile`]. Two-way unless `oneway` is set.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EdgeRecord {
    pub from: NodeId,
    pub to: NodeId,
    pub length: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub oneway: bool,
}

/// Serialized road network.
///
/// ```json
/// {
///   "nodes": [{ "id": 1, "lat": 42.36, "lon": -71.06 }, { "id": 2 }],
///   "edges": [{ "from": 1, "to": 2, "length": 120.5, "name": "Main Street" }]
/// }
/// ```
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct NetworkFile {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

#[cfg(feature = "serde")]
impl NetworkFile {
    /// Builds a [`RoadNetwork`] from the records.
    pub fn into_network(self) -> Result<RoadNetwork> {
        let mut network = RoadNetwork::new();
        for node in self.nodes {
            let coordinate = match (node.lat, node.lon) {
                (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
                _ => None,
            };
            network.add_node(node.id, coordinate);
        }
        for record in self.edges {
            let edge = Edge {
                length: record.length,
                name: record.name,
            };
            if record.oneway {
                network.add_edge(record.from, record.to, edge)?;
            } else {
                network.add_two_way(record.from, record.to, edge)?;
            }
        }
        Ok(network)
    }
}

#[cfg(feature = "serde")]
impl RoadNetwork {
    /// Parses a JSON [`NetworkFile`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: NetworkFile = serde_json::from_str(json)?;
        file.into_network()
    }

    /// Reads a JSON [`NetworkFile`] from disk.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_unknown_node() {
        let mut network = RoadNetwork::new();
        network.add_node(1, None);
        let err = network.add_edge(1, 9, Edge::new(1.0)).unwrap_err();
        assert!(matches!(err, AntRouteError::UnknownNode(9)));
    }

    #[test]
    fn test_add_edge_rejects_bad_length() {
        let mut network = RoadNetwork::new();
        network.add_node(1, None);
        network.add_node(2, None);
        assert!(network.add_edge(1, 2, Edge::new(-1.0)).is_err());
        assert!(network.add_edge(1, 2, Edge::new(f64::NAN)).is_err());
        assert_eq!(network.edge_count(), 0);
    }

    #[test]
    fn test_parallel_edges_first_wins() {
        let mut network = RoadNetwork::new();
        network.add_node(1, None);
        network.add_node(2, None);
        network.add_edge(1, 2, Edge::named(30.0, "First")).unwrap();
        network.add_edge(1, 2, Edge::named(10.0, "Second")).unwrap();

        let edge = network.edge(1, 2).unwrap();
        assert_eq!(edge.name.as_deref(), Some("First"));
        assert!((edge.length - 30.0).abs() < 1e-10);
        assert_eq!(network.neighbors(1), vec![2]);
        assert_eq!(network.edge_count(), 2);
    }

    #[test]
    fn test_neighbors_insertion_order() {
        let mut network = RoadNetwork::new();
        for id in 1..=4 {
            network.add_node(id, None);
        }
        network.add_edge(1, 3, Edge::new(1.0)).unwrap();
        network.add_edge(1, 2, Edge::new(1.0)).unwrap();
        network.add_edge(1, 4, Edge::new(1.0)).unwrap();
        assert_eq!(network.neighbors(1), vec![3, 2, 4]);
        assert!(network.neighbors(4).is_empty());
        assert!(network.neighbors(99).is_empty());
    }

    #[test]
    fn test_two_way_edge() {
        let mut network = RoadNetwork::new();
        network.add_node(1, None);
        network.add_node(2, None);
        network.add_two_way(1, 2, Edge::new(4.0)).unwrap();
        assert!(network.edge(1, 2).is_some());
        assert!(network.edge(2, 1).is_some());
    }

    #[test]
    fn test_add_node_updates_coordinate() {
        let mut network = RoadNetwork::new();
        network.add_node(1, None);
        network.add_node(1, Some(Coordinate::new(1.0, 2.0)));
        assert_eq!(network.node_count(), 1);
        assert_eq!(network.coordinate(1), Some(Coordinate::new(1.0, 2.0)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json() {
        let json = r#"{
            "nodes": [
                { "id": 1, "lat": 0.0, "lon": 0.0 },
                { "id": 2, "lat": 0.0, "lon": 0.001 },
                { "id": 3 }
            ],
            "edges": [
                { "from": 1, "to": 2, "length": 100.0, "name": "Main Street" },
                { "from": 2, "to": 3, "length": 50.0, "oneway": true }
            ]
        }"#;
        let network = RoadNetwork::from_json_str(json).unwrap();
        assert_eq!(network.node_count(), 3);
        assert_eq!(network.edge_count(), 3);
        assert!(network.edge(2, 1).is_some());
        assert!(network.edge(3, 2).is_none());
        assert_eq!(network.coordinate(3), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_unknown_node() {
        let json = r#"{ "nodes": [{ "id": 1 }], "edges": [{ "from": 1, "to": 2, "length": 1.0 }] }"#;
        assert!(matches!(
            RoadNetwork::from_json_str(json),
            Err(AntRouteError::UnknownNode(2))
        ));
    }
}
