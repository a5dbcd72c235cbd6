//! End-to-end request handling.

use super::bounds::{BoundingBox, DEFAULT_MARGIN};
use super::types::{Geocoder, LocationExtractor, NetworkProvider, ResponseFormatter, RouteSummary};
use crate::colony::{ColonyConfig, ColonyRunner, RoutingSession};
use crate::directions::generate_directions;
use crate::graph::RoadGraph;
use tracing::{info, warn};

pub const MSG_NO_EXTRACTION: &str = "Could not extract start and destination from the query.";
pub const MSG_NO_GEOCODE: &str = "Could not geocode one or both locations.";
pub const MSG_NO_NETWORK: &str = "Could not retrieve a road network for the requested area.";
pub const MSG_NO_ROUTE: &str = "Could not determine a route.";

/// Answers routing queries with one colony generation each.
///
/// The planner owns a [`RoutingSession`], so pheromone laid while answering
/// one query is still there for the next.
pub struct RoutePlanner<E, C, N, F> {
    extractor: E,
    geocoder: C,
    provider: N,
    formatter: F,
    config: ColonyConfig,
    session: RoutingSession,
    margin: f64,
}

impl<E, C, N, F> RoutePlanner<E, C, N, F>
where
    E: LocationExtractor,
    C: Geocoder,
    N: NetworkProvider,
    F: ResponseFormatter,
{
    pub fn new(extractor: E, geocoder: C, provider: N, formatter: F) -> Self {
        Self {
            extractor,
            geocoder,
            provider,
            formatter,
            config: ColonyConfig::default(),
            session: RoutingSession::new(),
            margin: DEFAULT_MARGIN,
        }
    }

    pub fn with_config(mut self, config: ColonyConfig) -> Self {
        self.config = config;
        self
    }

    /// Margin in degrees around the two endpoints.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_session(mut self, session: RoutingSession) -> Self {
        self.session = session;
        self
    }

    pub fn session(&self) -> &RoutingSession {
        &self.session
    }

    pub fn config(&self) -> &ColonyConfig {
        &self.config
    }

    /// Runs the full pipeline for `query` and returns the answer text.
    pub fn answer(&mut self, query: &str) -> String {
        let Some((start, destination)) = self
            .extractor
            .extract_locations(query)
            .filter(|(s, d)| !s.trim().is_empty() && !d.trim().is_empty())
        else {
            warn!("no start/destination in query");
            return MSG_NO_EXTRACTION.to_string();
        };

        let (Some(from), Some(to)) = (
            self.geocoder.geocode(&start),
            self.geocoder.geocode(&destination),
        ) else {
            warn!(%start, %destination, "geocoding failed");
            return MSG_NO_GEOCODE.to_string();
        };

        let bounds = BoundingBox::around(from, to, self.margin);
        let Some(network) = self.provider.network_for(&bounds) else {
            warn!(?bounds, "no road network for area");
            return MSG_NO_NETWORK.to_string();
        };
        let (Some(start_node), Some(destination_node)) =
            (network.nearest_node(from), network.nearest_node(to))
        else {
            warn!(?bounds, "road network has no positioned nodes");
            return MSG_NO_NETWORK.to_string();
        };

        let result = match ColonyRunner::run(
            &network,
            start_node,
            destination_node,
            &mut self.session,
            &self.config,
        ) {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "generation rejected");
                return MSG_NO_ROUTE.to_string();
            }
        };
        let Some(path) = result.best else {
            return MSG_NO_ROUTE.to_string();
        };

        let directions = generate_directions(&network, Some(path.as_slice()));
        info!(%start, %destination, cost = result.best_cost, nodes = path.len(), "route found");
        self.formatter.format_route(&RouteSummary {
            start: &start,
            destination: &destination,
            path: &path,
            cost: result.best_cost,
            directions: &directions,
        })
    }
}
