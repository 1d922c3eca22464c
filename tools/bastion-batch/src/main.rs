//! bastion-batch: run seeded missions headlessly and print one JSON summary
//! per mission to stdout.
//!
//! Usage:
//!   bastion-batch --missions 100 --seed 1
//!   bastion-batch --config mission.json --no-beam --horizon-days 7
//!   RUST_LOG=debug bastion-batch --missions 1

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{error, info};

use bastion_core::config::MissionConfig;
use bastion_core::constants::SECS_PER_DAY;
use bastion_core::state::MissionSummary;
use bastion_sim::{MissionEngine, MissionObserver};

#[derive(Debug, Parser)]
#[command(name = "bastion-batch", about = "Batch runner for the BASTION engagement simulation")]
struct Args {
    /// Mission config (JSON). Unset fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of missions to run.
    #[arg(long, default_value_t = 1)]
    missions: u32,

    /// Seed of the first mission; mission `i` uses `seed + i`.
    #[arg(long)]
    seed: Option<u64>,

    /// Mission horizon in days.
    #[arg(long)]
    horizon_days: Option<f64>,

    /// Tick length in seconds.
    #[arg(long)]
    dt: Option<f64>,

    /// Disable the beam.
    #[arg(long)]
    no_beam: bool,

    /// Disable the dome.
    #[arg(long)]
    no_dome: bool,
}

/// Writes each finished mission as a JSON line.
struct JsonLines<W: Write> {
    out: W,
    failed: Option<io::Error>,
}

impl<W: Write> MissionObserver for JsonLines<W> {
    fn on_mission_end(&mut self, summary: &MissionSummary) {
        if self.failed.is_some() {
            return;
        }
        let line = match serde_json::to_string(summary) {
            Ok(line) => line,
            Err(e) => {
                self.failed = Some(e.into());
                return;
            }
        };
        if let Err(e) = writeln!(self.out, "{line}") {
            self.failed = Some(e);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(args)?;
    let base_seed = config.seed;

    let stdout = io::stdout();
    let mut sink = JsonLines {
        out: stdout.lock(),
        failed: None,
    };

    let mut kills = 0u64;
    let mut hits = 0u64;
    for i in 0..args.missions {
        let mission = MissionConfig {
            seed: base_seed.wrapping_add(i as u64),
            ..config.clone()
        };
        let summary = MissionEngine::new(mission)?.run(&mut sink)?;
        if let Some(e) = sink.failed.take() {
            return Err(e.into());
        }
        kills += summary.kills() as u64;
        hits += summary.threats_impacted as u64;
    }

    info!(
        "{} missions: {kills} kills, {hits} ship hits",
        args.missions
    );
    Ok(())
}

fn load_config(args: &Args) -> Result<MissionConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            MissionConfig::from_json(&json)?
        }
        None => MissionConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(days) = args.horizon_days {
        config.horizon_secs = days * SECS_PER_DAY;
    }
    if let Some(dt) = args.dt {
        config.dt_secs = dt;
    }
    if args.no_beam {
        config.beam.enabled = false;
    }
    if args.no_dome {
        config.dome.enabled = false;
    }
    config.validate()?;
    Ok(config)
}
