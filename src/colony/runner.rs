//! Generation pipeline.
//!
//! [`ColonyRunner`] drives one generation end to end:
//! spawn → explore → select → evaluate + deposit → refine → record →
//! aggregate + adapt → select best.

use super::config::{ColonyConfig, Selection};
use super::create_rng;
use super::explorer::Explorer;
use super::exploiter::Exploiter;
use super::feedback::{FeedbackLoop, PerformanceMonitor};
use super::pheromone::{PheromoneDelta, PheromoneRegulator};
use super::session::RoutingSession;
use super::task::TaskManager;
use super::trailblazer::Trailblazer;
use crate::error::{AntRouteError, Result};
use crate::graph::{NodeId, Path, RoadGraph};
use tracing::{debug, info, warn};

/// Why a generation produced no route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoRouteReason {
    /// No explorer reached the destination.
    NoCandidate,
    /// Every selected candidate failed refinement.
    NoRefinement,
}

/// Result of one generation.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Best refined path, `None` when no route was found.
    pub best: Option<Path>,

    /// Cost of `best`, `f64::INFINITY` when no route was found.
    pub best_cost: f64,

    /// Explorers that reached the destination.
    pub candidates: usize,

    /// Candidates kept by the selection policy.
    pub selected: usize,

    /// Candidates that survived refinement.
    pub refined: usize,

    /// Mean refined cost fed to the feedback loop.
    pub mean_cost: Option<f64>,

    /// Trails pruned by evaporation at the end of the generation.
    pub pruned_trails: usize,

    /// Explorer rate after feedback.
    pub explorer_rate: f64,

    /// Set when the generation ended without a route.
    pub no_route: Option<NoRouteReason>,
}

impl GenerationResult {
    /// Whether this is the `(None, +inf)` sentinel.
    pub fn is_no_route(&self) -> bool {
        self.best.is_none()
    }

    fn no_route(
        reason: NoRouteReason,
        candidates: usize,
        selected: usize,
        explorer_rate: f64,
    ) -> Self {
        Self {
            best: None,
            best_cost: f64::INFINITY,
            candidates,
            selected,
            refined: 0,
            mean_cost: None,
            pruned_trails: 0,
            explorer_rate,
            no_route: Some(reason),
        }
    }
}

/// Executes one colony generation.
///
/// # Usage
///
/// ```ignore
/// let mut session = RoutingSession::new();
/// let config = ColonyConfig::default().with_seed(42);
/// let result = ColonyRunner::run(&network, start, destination, &mut session, &config)?;
/// if let Some(path) = result.best {
///     println!("{} m via {:?}", result.best_cost, path);
/// }
/// ```
pub struct ColonyRunner;

impl ColonyRunner {
    /// Runs a single generation from `start` to `destination`.
    ///
    /// Agent failures never surface as errors. A generation without any
    /// candidate or without any refined path returns the no-route
    /// sentinel. The only error is an invalid configuration.
    pub fn run<G: RoadGraph + ?Sized>(
        graph: &G,
        start: NodeId,
        destination: NodeId,
        session: &mut RoutingSession,
        config: &ColonyConfig,
    ) -> Result<GenerationResult> {
        config.validate().map_err(AntRouteError::InvalidConfig)?;

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        session.generations += 1;
        let generation = session.generations;

        // 1. Spawn
        let explorer = Explorer::new(graph)
            .with_epsilon(config.epsilon)
            .with_step_factor(config.step_factor);
        let task_manager =
            TaskManager::new(vec![explorer; config.explorers]).with_parallel(config.parallel);
        let trailblazers: Vec<Trailblazer<'_, G>> =
            (0..config.trailblazers).map(|_| Trailblazer::new(graph)).collect();
        let regulator = PheromoneRegulator::new(config.evaporation_rate)
            .with_floor(config.pheromone_floor);

        // 2. Explore
        let candidates = task_manager.assign_tasks(start, destination, &mut rng);
        let found = candidates.iter().filter(|c| c.is_some()).count();
        debug!(
            generation,
            found,
            explorers = task_manager.len(),
            parallel = task_manager.is_parallel(),
            "exploration finished"
        );

        // 3. Select
        let selected = select_candidates(candidates, config.selection);
        if selected.is_empty() {
            warn!(generation, start, destination, "no explorer reached the destination");
            return Ok(GenerationResult::no_route(
                NoRouteReason::NoCandidate,
                found,
                0,
                session.params.rate,
            ));
        }

        // 4. Evaluate + deposit, one delta per candidate, merged after all deposits
        let mut generation_delta = PheromoneDelta::new();
        for (rank, (agent, path)) in selected.iter().enumerate() {
            let trailblazer = &trailblazers[rank % trailblazers.len()];
            let evaluation = trailblazer.evaluate_solution(Some(path.as_slice()));
            debug!(
                generation,
                agent,
                steps = path.len().saturating_sub(1),
                quality = evaluation.quality,
                cost = evaluation.cost,
                "candidate evaluated"
            );
            let mut delta = PheromoneDelta::new();
            trailblazer.deposit_pheromones(path, evaluation.quality, &mut delta);
            generation_delta.merge(delta);
        }
        session.pheromones.apply(generation_delta);

        // 5. Refine + 6. record
        let exploiters: Vec<Exploiter<'_, G>> = (0..config.exploiters)
            .map(|_| Exploiter::new(graph, &session.pheromones))
            .collect();
        let refiner = &exploiters[0];
        let mut monitor = PerformanceMonitor::new();
        for (agent, path) in &selected {
            match refiner.refine_solution(path) {
                Some(refined) => {
                    let cost = refiner.route_cost(&refined);
                    debug!(generation, agent, cost, nodes = refined.len(), "candidate refined");
                    monitor.record(refined, cost);
                }
                None => debug!(generation, agent, "candidate could not be refined"),
            }
        }

        // 7. Aggregate + adapt
        let mean_cost = monitor.evaluate();
        if mean_cost.is_none() {
            // Deposits already landed; keep the floor invariant.
            let pruned = regulator.evaporate(&mut session.pheromones);
            warn!(generation, pruned, "no candidate survived refinement");
            let mut result = GenerationResult::no_route(
                NoRouteReason::NoRefinement,
                found,
                selected.len(),
                session.params.rate,
            );
            result.pruned_trails = pruned;
            return Ok(result);
        }
        FeedbackLoop::new(config.feedback).adjust_parameters(mean_cost, &mut session.params);
        let pruned_trails = regulator.evaporate(&mut session.pheromones);
        debug!(
            generation,
            ?mean_cost,
            rate = session.params.rate,
            pruned_trails,
            trails = session.pheromones.len(),
            "generation aggregated"
        );

        // 8. Select best
        let (best, best_cost) = match monitor.best() {
            Some(record) => (Some(record.path.clone()), record.cost),
            None => (None, f64::INFINITY),
        };
        info!(
            generation,
            best_cost,
            candidates = found,
            refined = monitor.len(),
            "generation finished"
        );

        Ok(GenerationResult {
            best,
            best_cost,
            candidates: found,
            selected: selected.len(),
            refined: monitor.len(),
            mean_cost,
            pruned_trails,
            explorer_rate: session.params.rate,
            no_route: None,
        })
    }
}

/// Drops failed walks and applies the selection policy.
///
/// Survivors keep their agent index. Sorting is stable, so equal-length
/// paths stay in agent order.
fn select_candidates(candidates: Vec<Option<Path>>, selection: Selection) -> Vec<(usize, Path)> {
    let mut survivors: Vec<(usize, Path)> = candidates
        .into_iter()
        .enumerate()
        .filter_map(|(agent, candidate)| candidate.map(|path| (agent, path)))
        .collect();

    if let Selection::Shortest(k) = selection {
        survivors.sort_by_key(|(_, path)| path.len());
        survivors.truncate(k);
    }
    survivors
}
