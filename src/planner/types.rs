//! Collaborator contracts for [`RoutePlanner`](super::RoutePlanner).

use super::bounds::BoundingBox;
use crate::graph::{Coordinate, NodeId, RoadGraph};

/// Pulls `(start, destination)` place names out of a free-text query.
///
/// Implemented for closures, so a fixed extractor is a one-liner in tests.
pub trait LocationExtractor {
    fn extract_locations(&self, query: &str) -> Option<(String, String)>;
}

impl<F> LocationExtractor for F
where
    F: Fn(&str) -> Option<(String, String)>,
{
    fn extract_locations(&self, query: &str) -> Option<(String, String)> {
        self(query)
    }
}

/// Resolves a place name to a position.
pub trait Geocoder {
    fn geocode(&self, place: &str) -> Option<Coordinate>;
}

impl<F> Geocoder for F
where
    F: Fn(&str) -> Option<Coordinate>,
{
    fn geocode(&self, place: &str) -> Option<Coordinate> {
        self(place)
    }
}

/// Supplies a drivable road network covering an area.
pub trait NetworkProvider {
    type Graph: RoadGraph;

    /// `None` when no network is available for `bounds`.
    fn network_for(&self, bounds: &BoundingBox) -> Option<Self::Graph>;
}

/// Everything known about a found route.
#[derive(Debug, Clone, Copy)]
pub struct RouteSummary<'a> {
    pub start: &'a str,
    pub destination: &'a str,
    pub path: &'a [NodeId],
    /// Total length in meters.
    pub cost: f64,
    pub directions: &'a str,
}

/// Turns a route into the final answer text.
pub trait ResponseFormatter {
    fn format_route(&self, route: &RouteSummary<'_>) -> String;
}

/// Plain-text answer without further polishing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl ResponseFormatter for PlainFormatter {
    fn format_route(&self, route: &RouteSummary<'_>) -> String {
        format!(
            "Start Location: {}\nDestination: {}\nRoute Directions:\n{}\n\nTotal Distance: {:.2} meters",
            route.start, route.destination, route.directions, route.cost
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_formatter() {
        let summary = RouteSummary {
            start: "Harbor",
            destination: "Library",
            path: &[1, 2],
            cost: 1234.567,
            directions: "Then take Dock Road for 1235 meters to reach your destination.",
        };
        let text = PlainFormatter.format_route(&summary);
        assert!(text.starts_with("Start Location: Harbor\nDestination: Library\n"));
        assert!(text.contains("Dock Road"));
        assert!(text.ends_with("Total Distance: 1234.57 meters"));
    }

    #[test]
    fn test_closure_collaborators() {
        let extractor = |query: &str| query.split_once(" to ").map(|(a, b)| (a.to_string(), b.to_string()));
        assert_eq!(
            extractor.extract_locations("Harbor to Library"),
            Some(("Harbor".to_string(), "Library".to_string()))
        );

        let geocoder = |place: &str| (place == "Harbor").then(|| Coordinate::new(1.0, 2.0));
        assert_eq!(geocoder.geocode("Harbor"), Some(Coordinate::new(1.0, 2.0)));
        assert_eq!(geocoder.geocode("Nowhere"), None);
    }
}
