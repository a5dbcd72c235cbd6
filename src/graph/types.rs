//! Core graph types and the [`RoadGraph`] trait.

/// Identifier of a network node (e.g. an OpenStreetMap node id).
pub type NodeId = u64;

/// Ordered node sequence. Explorer walks may revisit nodes.
pub type Path = Vec<NodeId>;

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Latitude (y).
    pub lat: f64,
    /// Longitude (x).
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Planar Euclidean distance in degree space.
    ///
    /// Not a geodesic distance. It is only used to rank neighbors by
    /// closeness to a target, where the approximation is adequate at city
    /// scale.
    pub fn euclidean(&self, other: &Coordinate) -> f64 {
        ((self.lat - other.lat).powi(2) + (self.lon - other.lon).powi(2)).sqrt()
    }
}

/// Data carried by a directed edge.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// Non-negative length in meters.
    pub length: f64,
    /// Road name, if the source network has one.
    pub name: Option<String>,
}

impl Edge {
    pub fn new(length: f64) -> Self {
        Self { length, name: None }
    }

    pub fn named(length: f64, name: impl Into<String>) -> Self {
        Self {
            length,
            name: Some(name.into()),
        }
    }
}

/// Read-only view of a weighted, coordinate-annotated multigraph.
///
/// Parallel edges between the same ordered pair are allowed. Implementations
/// must resolve them deterministically in [`edge`](RoadGraph::edge) and
/// return neighbors in a stable order, otherwise seeded runs stop being
/// reproducible.
///
/// `Send + Sync` because explorers may walk the same graph from several
/// rayon workers.
pub trait RoadGraph: Send + Sync {
    /// Number of nodes, used to size the explorer step budget.
    fn node_count(&self) -> usize;

    /// Whether the node exists.
    fn contains(&self, node: NodeId) -> bool;

    /// All node ids in a stable order.
    fn node_ids(&self) -> Vec<NodeId>;

    /// Coordinates of `node`, if known.
    fn coordinate(&self, node: NodeId) -> Option<Coordinate>;

    /// Distinct successors of `node`. Empty for unknown nodes.
    fn neighbors(&self, node: NodeId) -> Vec<NodeId>;

    /// The first available edge `from -> to`, if any.
    fn edge(&self, from: NodeId, to: NodeId) -> Option<&Edge>;

    /// Euclidean distance between two nodes.
    ///
    /// Returns `f64::INFINITY` when either coordinate is missing.
    fn distance_between(&self, a: NodeId, b: NodeId) -> f64 {
        match (self.coordinate(a), self.coordinate(b)) {
            (Some(ca), Some(cb)) => ca.euclidean(&cb),
            _ => f64::INFINITY,
        }
    }

    /// Node closest to `target` among nodes with coordinates.
    ///
    /// Ties keep the node that comes first in [`node_ids`](RoadGraph::node_ids).
    fn nearest_node(&self, target: Coordinate) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for node in self.node_ids() {
            let Some(coordinate) = self.coordinate(node) else {
                continue;
            };
            let distance = coordinate.euclidean(&target);
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((node, distance));
            }
        }
        best.map(|(node, _)| node)
    }
}

/// Total length of `path`, summing the first edge of every consecutive pair.
///
/// Returns `None` for an empty path or when any consecutive pair has no
/// edge. A single-node path costs `0.0`.
pub fn path_cost<G: RoadGraph + ?Sized>(graph: &G, path: &[NodeId]) -> Option<f64> {
    if path.is_empty() {
        return None;
    }
    path.windows(2)
        .map(|pair| graph.edge(pair[0], pair[1]).map(|edge| edge.length))
        .sum()
}
