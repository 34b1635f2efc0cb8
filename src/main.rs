use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

use corridor_sim::{
    config::SimulationConfig,
    simulation::{PerformanceTracker, SimulationClock, TickOutcome},
};

#[derive(Parser)]
#[command(name = "corridor-sim")]
#[command(about = "Vehicles arriving onto a single polyline route at a target daily volume")]
struct Args {
    /// Route configuration file
    #[arg(short, long, default_value = "route.toml")]
    route: String,

    /// Traffic configuration file
    #[arg(short, long, default_value = "traffic.toml")]
    traffic: String,

    /// Random seed for reproducible simulations
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many ticks (runs until interrupted otherwise)
    #[arg(short = 'n', long)]
    ticks: Option<u64>,

    /// Nominal wall-clock interval between ticks, in milliseconds
    #[arg(short, long, default_value_t = 1)]
    interval_ms: u64,

    /// Print every vehicle's coordinate after each tick
    #[arg(short, long)]
    positions: bool,

    /// Enable verbose logging, including the per-tick diagnostics line
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose { log::LevelFilter::Trace } else { log::LevelFilter::Info })
        .init();
    info!("Starting corridor simulator");

    // Load configuration
    let config = SimulationConfig::load_from_files(&args.route, &args.traffic)?;
    let params = &config.traffic.simulation;
    info!("Loaded route '{}' with {} vertices, {} vehicles/day at {} per hour",
          config.route.route.name,
          config.route.route.vertices.len(),
          params.vehicles_per_day,
          params.speed_limit);

    if args.verbose {
        let (route_toml, traffic_toml) = config.to_toml_strings()?;
        log::debug!("Effective route config:\n{}", route_toml);
        log::debug!("Effective traffic config:\n{}", traffic_toml);
    }

    // Use seed from args or config
    let seed = args.seed.or(config.traffic.random.seed);
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut clock = SimulationClock::from_config(&config, rng)
        .context("invalid simulation configuration")?;
    info!("Path length {:.2}, {:.5} arrivals/tick, {:.3} distance/tick, {} vehicle slots",
          clock.path().total_length(),
          clock.settings().arrival_rate_per_tick,
          clock.settings().distance_per_tick,
          clock.pool().capacity());

    let mut performance_tracker = PerformanceTracker::new(120);
    let interval = Duration::from_millis(args.interval_ms);
    let mut last_report = Instant::now();

    while args.ticks.map_or(true, |limit| clock.tick_count() < limit) {
        let tick_start = Instant::now();
        performance_tracker.start_tick();

        if let TickOutcome::Saturated = clock.tick() {
            log::debug!("Arrival at tick {} dropped, all {} slots in use",
                        clock.tick_count(), clock.pool().capacity());
        }

        performance_tracker.end_tick();

        if args.positions {
            let frame = clock.frame();
            for (index, point) in frame.active_positions().iter().enumerate() {
                println!("{}\t{}\t{:.4}\t{:.4}", frame.tick, index, point.x, point.y);
            }
        }

        if last_report.elapsed() >= Duration::from_secs(1) {
            info!("Tick {}: {} vehicles active, {:.0}s simulated, {:.0} ticks/s",
                  clock.tick_count(),
                  clock.pool().active_count(),
                  clock.elapsed_seconds(),
                  performance_tracker.ticks_per_second());
            last_report = Instant::now();
        }

        // Sleep to keep the nominal tick interval
        let elapsed = tick_start.elapsed();
        if elapsed < interval {
            std::thread::sleep(interval - elapsed);
        }
    }

    info!("Simulation completed!");
    info!("Total ticks: {}", clock.tick_count());
    info!("Simulated time: {:.0}s", clock.elapsed_seconds());
    info!("Vehicles spawned: {} of {}", clock.pool().active_count(), clock.pool().capacity());

    Ok(())
}
