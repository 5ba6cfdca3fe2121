//! Headless waypoint pathfinding demo.
//!
//! Scans a small terrain map into a waypoint graph and lets a handful of
//! agents request paths across it, one scheduler tick at a time.

mod sim;
mod world;

use clap::Parser;
use waygraph_paths::{HeuristicMode, SearchConfig};

use sim::Sim;

#[derive(Parser, Debug)]
#[command(name = "waygraph-demo", about = "Agents pathfinding across a waypoint graph")]
struct Args {
    /// Heuristic mode (geometric, manhattan, cost-of-movement, ...).
    #[arg(long, default_value_t = HeuristicMode::Geometric)]
    mode: HeuristicMode,
    /// Treat every waypoint's bias as zero.
    #[arg(long)]
    ignore_bias: bool,
    /// Number of agents.
    #[arg(long, default_value_t = 2)]
    agents: usize,
    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 200)]
    ticks: usize,
    /// Search steps per tick.
    #[arg(long, default_value_t = 1)]
    steps_per_tick: usize,
    /// Give up on a search after this many expansions.
    #[arg(long)]
    max_steps: Option<usize>,
    /// Seed for agent placement and the drunk heuristic.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = SearchConfig {
        steps_per_tick: args.steps_per_tick,
        max_steps: args.max_steps,
        seed: args.seed,
    };
    let graph = world::build();
    log::info!(
        "{} waypoints, {} agents, mode {}{}",
        graph.len(),
        args.agents,
        args.mode,
        if args.ignore_bias { " (ignoring bias)" } else { "" }
    );

    let mut sim = Sim::new(graph, args.agents, config, args.mode, args.ignore_bias);
    for _ in 0..args.ticks {
        sim.tick()?;
    }
    sim.stop();

    for agent in &sim.agents {
        log::info!(
            "{}: {} arrivals, {} misses, resting at {}",
            agent.name,
            agent.arrivals,
            agent.misses,
            sim.graph.label(agent.at)
        );
    }
    log::info!("done after {} ticks", sim.ticks());
    Ok(())
}
