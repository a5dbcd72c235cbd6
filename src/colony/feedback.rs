//! Generation metrics and the rate controller.

use super::config::FeedbackConfig;
use crate::graph::Path;

/// Shared exploration knob adjusted by [`FeedbackLoop`].
///
/// No agent reads `rate` yet: explorers sample purely by distance. The
/// value is tracked so a session's controller history is observable and
/// so a rate-aware explorer can be added without changing the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplorerParams {
    pub rate: f64,
}

impl Default for ExplorerParams {
    fn default() -> Self {
        Self { rate: 1.0 }
    }
}

impl ExplorerParams {
    /// Multiplies the rate by `factor`.
    pub fn scale(&mut self, factor: f64) {
        self.rate *= factor;
    }
}

/// A refined path and its cost.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub path: Path,
    pub cost: f64,
}

/// Collects the refined candidates of one generation.
#[derive(Debug, Clone, Default)]
pub struct PerformanceMonitor {
    records: Vec<MetricRecord>,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, path: Path, cost: f64) {
        self.records.push(MetricRecord { path, cost });
    }

    /// Mean recorded cost, `None` when nothing was recorded.
    pub fn evaluate(&self) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        let total: f64 = self.records.iter().map(|r| r.cost).sum();
        Some(total / self.records.len() as f64)
    }

    /// Record with the lowest cost. Earlier records win ties.
    pub fn best(&self) -> Option<&MetricRecord> {
        self.records.iter().reduce(|best, r| if r.cost < best.cost { r } else { best })
    }

    pub fn records(&self) -> &[MetricRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Scales [`ExplorerParams::rate`] from a generation's mean cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackLoop {
    config: FeedbackConfig,
}

impl FeedbackLoop {
    pub fn new(config: FeedbackConfig) -> Self {
        Self { config }
    }

    /// Multiplies the rate by `increase` when `metric > threshold`, by
    /// `decrease` otherwise. Does nothing without a metric.
    ///
    /// The rate is not clamped and drifts freely over a long session.
    pub fn adjust_parameters(&self, metric: Option<f64>, params: &mut ExplorerParams) {
        let Some(metric) = metric else {
            return;
        };
        if metric > self.config.threshold {
            params.scale(self.config.increase);
        } else {
            params.scale(self.config.decrease);
        }
    }
}
