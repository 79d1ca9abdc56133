//! Game balance simulator CLI.
//!
//! Run Monte Carlo simulations to analyze game balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                        # 100 runs, 60 minutes each
//!   cargo run --bin simulate -- --runs 20 --minutes 180
//!   cargo run --bin simulate -- --seed 42 --json    # Reproducible JSON report

use clap::Parser;
use idle_arpg::simulator::{run_simulation, SimConfig};
use idle_arpg::EngineConfig;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

/// Idle ARPG balance simulator
#[derive(Parser)]
#[command(name = "simulate")]
#[command(about = "Simulate many idle playthroughs and report balance numbers", long_about = None)]
#[command(version)]
struct Cli {
    /// Number of runs
    #[arg(short = 'n', long, default_value_t = 100)]
    runs: u32,

    /// RNG seed; run i uses seed + i
    #[arg(short, long)]
    seed: Option<u64>,

    /// Simulated minutes per run
    #[arg(short, long, default_value_t = 60)]
    minutes: u64,

    /// Basic attacks only, no skill casts or skill upgrades
    #[arg(long)]
    no_skills: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Engine config JSON; missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print one line per run
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let engine = match &cli.config {
        Some(path) => match EngineConfig::from_json_file(path) {
            Ok(engine) => engine,
            Err(e) => {
                error!("could not read config {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => EngineConfig::default(),
    };

    let config = SimConfig {
        num_runs: cli.runs,
        seed: cli.seed,
        minutes: cli.minutes,
        use_skills: !cli.no_skills,
        verbosity: if cli.verbose && !cli.json { 2 } else { 1 },
        engine,
    };
    info!(
        "simulating {} runs of {} minutes (seed {:?})",
        config.num_runs, config.minutes, config.seed
    );

    if !cli.json {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              IDLE ARPG BALANCE SIMULATOR                      ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", config.num_runs);
        println!("  Minutes:        {}", config.minutes);
        println!("  Skills:         {}", config.use_skills);
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    let report = run_simulation(&config);

    if cli.json {
        match report.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("could not serialize report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", report.to_text());
    }

    ExitCode::SUCCESS
}
