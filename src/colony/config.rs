//! Colony configuration.
//!
//! [`ColonyConfig`] holds every parameter of a single generation: pool
//! sizes, the candidate selection policy, walk sampling constants,
//! evaporation, and the feedback controller.

/// Which explorer candidates are scored and refined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Keep the `k` candidates with the fewest steps.
    ///
    /// Ties keep agent creation order, so seeded runs are reproducible.
    Shortest(usize),

    /// Keep every candidate that reached the destination.
    All,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Shortest(2)
    }
}

/// Multiplicative controller for the shared explorer rate.
///
/// When the generation's mean cost exceeds `threshold` the rate is
/// multiplied by `increase`, otherwise by `decrease`. No bounds are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeedbackConfig {
    pub threshold: f64,
    pub increase: f64,
    pub decrease: f64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            threshold: 100.0,
            increase: 1.1,
            decrease: 0.9,
        }
    }
}

/// Configuration for one colony generation.
///
/// # Defaults
///
/// ```
/// use u_antroute::colony::{ColonyConfig, Selection};
///
/// let config = ColonyConfig::default();
/// assert_eq!(config.explorers, 5);
/// assert_eq!(config.trailblazers, 5);
/// assert_eq!(config.exploiters, 3);
/// assert_eq!(config.selection, Selection::Shortest(2));
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_antroute::colony::{ColonyConfig, Selection};
///
/// let config = ColonyConfig::default()
///     .with_explorers(8)
///     .with_selection(Selection::All)
///     .with_evaporation_rate(0.2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColonyConfig {
    /// Number of explorers, one candidate walk each.
    pub explorers: usize,

    /// Number of trailblazers. The k-th retained candidate is scored by
    /// trailblazer `k % trailblazers`.
    pub trailblazers: usize,

    /// Number of exploiters. The first one refines every candidate.
    pub exploiters: usize,

    /// Candidate selection policy applied before scoring.
    pub selection: Selection,

    /// Explorer step budget per node: a walk stops after
    /// `node_count * step_factor` steps.
    pub step_factor: usize,

    /// Smoothing constant in the sampling weight `1 / (d + epsilon)`.
    pub epsilon: f64,

    /// Fraction of every pheromone level removed per generation, in [0, 1].
    pub evaporation_rate: f64,

    /// Levels below this value are pruned after evaporation.
    pub pheromone_floor: f64,

    /// Rate controller parameters.
    pub feedback: FeedbackConfig,

    /// Whether explorers walk in parallel using rayon.
    ///
    /// Only honored with the `parallel` feature. Results are identical
    /// either way for a fixed seed.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            explorers: 5,
            trailblazers: 5,
            exploiters: 3,
            selection: Selection::default(),
            step_factor: 100,
            epsilon: 1e-6,
            evaporation_rate: 0.1,
            pheromone_floor: 0.01,
            feedback: FeedbackConfig::default(),
            parallel: false,
            seed: None,
        }
    }
}

impl ColonyConfig {
    /// Sets the explorer pool size.
    pub fn with_explorers(mut self, n: usize) -> Self {
        self.explorers = n;
        self
    }

    /// Sets the trailblazer pool size.
    pub fn with_trailblazers(mut self, n: usize) -> Self {
        self.trailblazers = n;
        self
    }

    /// Sets the exploiter pool size.
    pub fn with_exploiters(mut self, n: usize) -> Self {
        self.exploiters = n;
        self
    }

    /// Sets the candidate selection policy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_step_factor(mut self, factor: usize) -> Self {
        self.step_factor = factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the evaporation rate.
    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    pub fn with_pheromone_floor(mut self, floor: f64) -> Self {
        self.pheromone_floor = floor;
        self
    }

    pub fn with_feedback(mut self, feedback: FeedbackConfig) -> Self {
        self.feedback = feedback;
        self
    }

    /// Enables or disables parallel exploration.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.explorers == 0 {
            return Err("explorers must be at least 1".into());
        }
        if self.trailblazers == 0 {
            return Err("trailblazers must be at least 1".into());
        }
        if self.exploiters == 0 {
            return Err("exploiters must be at least 1".into());
        }
        if self.selection == Selection::Shortest(0) {
            return Err("selection must keep at least one candidate".into());
        }
        if self.step_factor == 0 {
            return Err("step_factor must be positive".into());
        }
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(format!("epsilon must be positive, got {}", self.epsilon));
        }
        if !(0.0..=1.0).contains(&self.evaporation_rate) {
            return Err(format!(
                "evaporation_rate must be in [0, 1], got {}",
                self.evaporation_rate
            ));
        }
        if !(self.pheromone_floor >= 0.0 && self.pheromone_floor.is_finite()) {
            return Err(format!(
                "pheromone_floor must be non-negative, got {}",
                self.pheromone_floor
            ));
        }
        let FeedbackConfig {
            threshold,
            increase,
            decrease,
        } = self.feedback;
        if threshold.is_nan() {
            return Err("feedback threshold must be a number".into());
        }
        if !(increase > 0.0 && decrease > 0.0) {
            return Err(format!(
                "feedback factors must be positive, got increase={increase}, decrease={decrease}"
            ));
        }
        Ok(())
    }
}
