//! Error type for configuration and network construction.
//!
//! Search failures are not errors: a walk that never reaches the destination
//! is `None`, an unusable path costs `f64::INFINITY`. This type only covers
//! invalid input handed to the crate.

use crate::graph::NodeId;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, AntRouteError>;

/// Errors raised for invalid configuration or malformed networks.
#[derive(Debug, thiserror::Error)]
pub enum AntRouteError {
    /// [`ColonyConfig::validate`](crate::colony::ColonyConfig::validate) rejected the configuration.
    #[error("invalid colony configuration: {0}")]
    InvalidConfig(String),

    /// An edge referenced a node that was never added.
    #[error("node {0} is not part of the network")]
    UnknownNode(NodeId),

    /// Edge lengths must be finite and non-negative.
    #[error("edge {from} -> {to} has invalid length {length}")]
    InvalidLength {
        from: NodeId,
        to: NodeId,
        length: f64,
    },

    #[cfg(feature = "serde")]
    #[error("failed to read network file: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("malformed network file: {0}")]
    Json(#[from] serde_json::Error),
}
