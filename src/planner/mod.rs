//! Query-to-answer pipeline around one colony generation.
//!
//! A free-text request like *"shortest way from the airport to the
//! university"* passes through a chain of collaborators the engine treats
//! as black boxes:
//!
//! 1. [`LocationExtractor`] pulls a start and destination name out of the query.
//! 2. [`Geocoder`] turns each name into a [`Coordinate`](crate::graph::Coordinate).
//! 3. [`NetworkProvider`] supplies a road network covering a [`BoundingBox`]
//!    around both points.
//! 4. Both points snap to their nearest network node and one generation runs
//!    on the planner's [`RoutingSession`](crate::colony::RoutingSession).
//! 5. The best route is rendered as directions and handed to a
//!    [`ResponseFormatter`].
//!
//! Collaborator failures become user-facing messages, never errors.

mod bounds;
#[cfg(feature = "serde")]
mod reply;
mod runner;
mod types;

pub use bounds::{BoundingBox, DEFAULT_MARGIN};
#[cfg(feature = "serde")]
pub use reply::parse_location_reply;
pub use runner::{
    RoutePlanner, MSG_NO_EXTRACTION, MSG_NO_GEOCODE, MSG_NO_NETWORK, MSG_NO_ROUTE,
};
pub use types::{
    Geocoder, LocationExtractor, NetworkProvider, PlainFormatter, ResponseFormatter, RouteSummary,
};
