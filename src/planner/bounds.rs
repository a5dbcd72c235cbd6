//! Area around a start/destination pair.

use crate::graph::Coordinate;

/// Margin in degrees added on every side, roughly 1 km at mid-latitudes.
pub const DEFAULT_MARGIN: f64 = 0.01;

/// Axis-aligned box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Smallest box containing `a` and `b`, grown by `margin` on each side.
    pub fn around(a: Coordinate, b: Coordinate, margin: f64) -> Self {
        Self {
            north: a.lat.max(b.lat) + margin,
            south: a.lat.min(b.lat) - margin,
            east: a.lon.max(b.lon) + margin,
            west: a.lon.min(b.lon) - margin,
        }
    }

    /// Whether `point` lies inside the box, edges included.
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.south..=self.north).contains(&point.lat) && (self.west..=self.east).contains(&point.lon)
    }
}
