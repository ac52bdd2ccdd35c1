//! Reactive Molecule Gas
//!
//! Headless runner: oxygen and nitrogen bounce around a walled box and turn
//! into nitric oxide when they collide hard enough.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use collider_simulation::{Census, Simulation, SimulationParams};

/// Reactive molecule gas simulation
#[derive(Parser, Debug)]
#[command(name = "collider")]
#[command(about = "Simulate a reacting 2D molecule gas", long_about = None)]
struct Cli {
    /// JSON parameter file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Arena width
    #[arg(long)]
    width: Option<f32>,

    /// Arena height
    #[arg(long)]
    height: Option<f32>,

    /// Initial number of molecules
    #[arg(long)]
    count: Option<usize>,

    /// Thermostat temperature
    #[arg(long)]
    temperature: Option<f32>,

    /// Seed for reproducible placement
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 1000)]
    ticks: u64,

    /// Pause between ticks in milliseconds
    #[arg(long, default_value_t = 2)]
    frame_delay_ms: u64,

    /// Log a census every N ticks (0 disables)
    #[arg(long, default_value_t = 100)]
    report_every: u64,

    /// Write the final render instances as JSON
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

impl Cli {
    fn params(&self) -> Result<SimulationParams> {
        let mut params = match &self.config {
            Some(path) => SimulationParams::from_json_file(path)
                .with_context(|| format!("failed to load parameters from {}", path.display()))?,
            None => SimulationParams::default(),
        };
        if let Some(width) = self.width {
            params.width = width;
        }
        if let Some(height) = self.height {
            params.height = height;
        }
        if let Some(count) = self.count {
            params.particle_count = count;
        }
        if let Some(temperature) = self.temperature {
            params.temperature = temperature;
        }
        if self.seed.is_some() {
            params.seed = self.seed;
        }
        params.validate().context("invalid simulation parameters")?;
        Ok(params)
    }
}

fn log_census(tick: u64, census: &Census) {
    let populations: Vec<String> = census
        .species
        .iter()
        .map(|(name, count)| format!("{name}={count}"))
        .collect();
    log::info!(
        "tick {:>6}: {} | KE={:.1} | p=({:.1}, {:.1})",
        tick,
        populations.join(" "),
        census.total_kinetic_energy,
        census.total_momentum[0],
        census.total_momentum[1]
    );
}

fn main() -> Result<()> {
    // Initialize logger (RUST_LOG=debug for reaction events)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let params = cli.params()?;
    let mut sim = Simulation::new(params).context("failed to build simulation")?;

    log::info!("Running {} ticks...", cli.ticks);
    log_census(0, &sim.census());

    let frame_delay = Duration::from_millis(cli.frame_delay_ms);
    let started = Instant::now();
    for _ in 0..cli.ticks {
        sim.step();
        if cli.report_every > 0 && sim.tick() % cli.report_every == 0 {
            log_census(sim.tick(), &sim.census());
        }
        if !frame_delay.is_zero() {
            std::thread::sleep(frame_delay);
        }
    }

    let elapsed = started.elapsed();
    log::info!(
        "✓ {} ticks in {:.2?}, {} reactions, {} particles left",
        sim.tick(),
        elapsed,
        sim.total_reactions(),
        sim.particle_count()
    );

    if let Some(path) = &cli.snapshot {
        let json = serde_json::to_string_pretty(&sim.instances())
            .context("failed to serialize snapshot")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
        log::info!("Snapshot written to {}", path.display());
    }

    Ok(())
}
