//! Survivor CLI - headless simulation of the decision core.
//!
//! - `survivor run` - drive one agent through a generated arena
//! - `survivor config` - print the default decision config

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use survivor_agent::{DecisionConfig, DecisionCore};
use survivor_core::TickContext;

mod sim;

use sim::{ArenaSpec, SimWorld, Summary, TraceRecord};

#[derive(Parser)]
#[command(name = "survivor")]
#[command(about = "Headless survivor agent simulation", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the agent in a generated arena
    Run {
        /// Number of ticks to simulate
        #[arg(long, default_value_t = 1000)]
        ticks: u64,

        /// Seed for arena generation and the agent's randomness
        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Seconds per tick
        #[arg(long, default_value_t = 0.1)]
        dt: f32,

        /// Decision config (YAML); defaults when absent
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print one JSON record per tick instead of the summary
        #[arg(long)]
        json: bool,
    },

    /// Print the default decision config as YAML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbosity flag.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            ticks,
            seed,
            dt,
            config,
            json,
        } => run(ticks, seed, dt, config, json),
        Commands::Config => {
            print!("{}", DecisionConfig::default().to_yaml()?);
            Ok(())
        }
    }
}

fn run(ticks: u64, seed: u64, dt: f32, config: Option<PathBuf>, json: bool) -> Result<()> {
    let config = match &config {
        Some(path) => DecisionConfig::load_or_default(path)?,
        None => DecisionConfig::default(),
    };
    let cell_size = config.waypoint_cell_size;

    let mut world = SimWorld::generate(&ArenaSpec::default(), seed);
    let mut core = DecisionCore::new(&world, config).context("Failed to build decision core")?;
    tracing::info!(seed, ticks, waypoint_cell = cell_size, "Starting simulation");

    let mut summary = Summary::default();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let mut ctx = TickContext::new(0, dt, seed);
    for _ in 0..ticks {
        let decision = core.tick(&ctx, &mut world);
        world.step(&ctx, &decision.command);
        summary.record(&decision);

        if json {
            let record = TraceRecord::new(ctx.tick, &decision, &world);
            serde_json::to_writer(&mut out, &record)?;
            writeln!(out)?;
        }
        if world.agent_is_dead() {
            tracing::info!(tick = ctx.tick, "Agent died");
            break;
        }
        ctx = ctx.next();
    }

    summary.finish(&world);
    if !json {
        summary.print(&mut out)?;
    }
    Ok(())
}
