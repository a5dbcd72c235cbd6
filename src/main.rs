//! u-antroute - answer one routing request over a JSON road network.

use anyhow::{bail, Context, Result};
use clap::Parser;
use u_antroute::colony::{ColonyConfig, ColonyRunner, RoutingSession, Selection};
use u_antroute::directions::generate_directions;
use u_antroute::graph::{Coordinate, NodeId, RoadGraph, RoadNetwork};

#[derive(Parser, Debug)]
#[command(name = "u-antroute")]
#[command(about = "Single-generation ant-colony route discovery")]
struct Cli {
    /// Road network file (JSON with `nodes` and `edges`)
    #[arg(short, long)]
    network: std::path::PathBuf,

    /// Start node id
    #[arg(long, conflicts_with = "from", requires = "to_node")]
    from_node: Option<NodeId>,

    /// Destination node id
    #[arg(long, conflicts_with = "to", requires = "from_node")]
    to_node: Option<NodeId>,

    /// Start position as `lat,lon`, snapped to the nearest node
    #[arg(long, value_parser = parse_coordinate, requires = "to")]
    from: Option<Coordinate>,

    /// Destination position as `lat,lon`, snapped to the nearest node
    #[arg(long, value_parser = parse_coordinate, requires = "from")]
    to: Option<Coordinate>,

    /// Seed for a reproducible generation
    #[arg(long)]
    seed: Option<u64>,

    /// Pheromone evaporation rate in [0, 1]
    #[arg(long, default_value_t = 0.1)]
    evaporation_rate: f64,

    /// Number of explorers
    #[arg(long, default_value_t = 5)]
    explorers: usize,

    /// Evaluate every candidate instead of the two shortest
    #[arg(long)]
    all_candidates: bool,

    /// Explore on the rayon pool (needs the `parallel` feature)
    #[arg(long)]
    parallel: bool,
}

fn parse_coordinate(text: &str) -> std::result::Result<Coordinate, String> {
    let (lat, lon) = text
        .split_once(',')
        .ok_or_else(|| format!("expected `lat,lon`, got `{text}`"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("bad latitude: {e}"))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("bad longitude: {e}"))?;
    Ok(Coordinate::new(lat, lon))
}

fn resolve(network: &RoadNetwork, id: Option<NodeId>, position: Option<Coordinate>) -> Result<NodeId> {
    match (id, position) {
        (Some(id), _) => {
            if !network.contains(id) {
                bail!("node {id} is not in the network");
            }
            Ok(id)
        }
        (None, Some(position)) => network
            .nearest_node(position)
            .context("network has no nodes with coordinates"),
        (None, None) => bail!("give either --from-node/--to-node or --from/--to"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let network = RoadNetwork::from_json_file(&cli.network)
        .with_context(|| format!("loading {}", cli.network.display()))?;
    tracing::info!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        "network loaded"
    );

    let start = resolve(&network, cli.from_node, cli.from)?;
    let destination = resolve(&network, cli.to_node, cli.to)?;

    let mut config = ColonyConfig::default()
        .with_explorers(cli.explorers)
        .with_evaporation_rate(cli.evaporation_rate)
        .with_parallel(cli.parallel);
    if cli.all_candidates {
        config = config.with_selection(Selection::All);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let mut session = RoutingSession::new();
    let result = ColonyRunner::run(&network, start, destination, &mut session, &config)?;

    match result.best.as_deref() {
        Some(path) => {
            println!("{}", generate_directions(&network, Some(path)));
            println!();
            println!("Total Distance: {:.2} meters", result.best_cost);
        }
        None => println!("No route found."),
    }
    Ok(())
}
