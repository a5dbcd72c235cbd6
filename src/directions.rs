//! Turn-by-turn directions for a route.
//!
//! Consecutive edges on the same road collapse into one step:
//!
//! ```text
//! Take Main Street for 350 meters.
//! Then take Elm Avenue for 120 meters to reach your destination.
//! ```

use crate::graph::{NodeId, RoadGraph};

/// Returned when there is nothing to describe.
pub const NO_ROUTE: &str = "No valid route found.";

/// Name used for edges without one.
pub const UNNAMED_ROAD: &str = "Unnamed Road";

/// Renders `path` as newline-separated steps.
///
/// Each consecutive pair uses the first available edge. Pairs without an
/// edge are skipped. A missing path, a path shorter than two nodes, or a
/// path with no edge at all yields [`NO_ROUTE`].
pub fn generate_directions<G: RoadGraph + ?Sized>(graph: &G, path: Option<&[NodeId]>) -> String {
    let Some(path) = path.filter(|p| p.len() >= 2) else {
        return NO_ROUTE.to_string();
    };

    let mut segments: Vec<(&str, f64)> = Vec::new();
    for pair in path.windows(2) {
        let Some(edge) = graph.edge(pair[0], pair[1]) else {
            continue;
        };
        let road = edge.name.as_deref().unwrap_or(UNNAMED_ROAD);
        match segments.last_mut() {
            Some((current, meters)) if *current == road => *meters += edge.length,
            _ => segments.push((road, edge.length)),
        }
    }

    let Some(((last_road, last_meters), completed)) = segments.split_last() else {
        return NO_ROUTE.to_string();
    };

    let mut lines: Vec<String> = completed
        .iter()
        .map(|(road, meters)| format!("Take {road} for {meters:.0} meters."))
        .collect();
    lines.push(format!(
        "Then take {last_road} for {last_meters:.0} meters to reach your destination."
    ));
    lines.join("\n")
}
