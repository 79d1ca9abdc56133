//! Headless idle host.
//!
//! Drives the engine from the wall clock, prints the battle log as it
//! happens and keeps the save file current.
//!
//! Usage:
//!   cargo run -- [--tick-ms 100] [--save FILE] [--config FILE]
//!                [--autosave-secs 30] [--duration-secs N]

use chrono::{Local, Utc};
use clap::Parser;
use idle_arpg::save::SaveManager;
use idle_arpg::{Engine, EngineConfig, GameEvent, GameRng};
use log::{error, info};
use rand::SeedableRng;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

/// Idle ARPG: the character fights on its own
#[derive(Parser)]
#[command(name = "idle-arpg")]
#[command(about = "Run the idle combat engine in real time", long_about = None)]
#[command(version)]
struct Cli {
    /// Milliseconds between engine ticks
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Save file (defaults to the platform config directory)
    #[arg(long)]
    save: Option<PathBuf>,

    /// Engine config JSON; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum seconds between two autosaves
    #[arg(long, default_value_t = 30)]
    autosave_secs: u64,

    /// Stop after this many seconds (runs until killed otherwise)
    #[arg(long)]
    duration_secs: Option<u64>,
}

fn now_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

fn load_engine(manager: &SaveManager, config: EngineConfig) -> Engine {
    let rng = GameRng::from_entropy();
    match manager.load_json() {
        Ok(json) => Engine::from_save_json(&json, config, rng),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("no save at {}, starting a new game", manager.path().display());
            Engine::new(config, rng)
        }
        Err(e) => Engine::after_failed_load(
            format!("could not load {}: {e}", manager.path().display()),
            config,
            rng,
        ),
    }
}

fn save(manager: &SaveManager, engine: &Engine, now: u64) {
    match manager.save(&engine.save_state(now)) {
        Ok(()) => info!("saved to {}", manager.path().display()),
        Err(e) => error!("save failed: {e}"),
    }
}

fn print_event(event: &GameEvent) {
    if event.is_loggable() {
        println!("[{}] {event}", Local::now().format("%H:%M:%S"));
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match EngineConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!("could not read config {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => EngineConfig::default(),
    };

    let manager = match &cli.save {
        Some(path) => SaveManager::with_path(path.clone()),
        None => match SaveManager::new() {
            Ok(manager) => manager,
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        },
    };

    let mut engine = load_engine(&manager, config);
    let character = &engine.state().character;
    println!(
        "Level {} | {}/{} HP | {} gold | {} upgrade points",
        character.level, character.hp, character.max_hp, character.gold, character.upgrade_points
    );

    let started = now_ms();
    let deadline = cli.duration_secs.map(|secs| started + secs * 1000);
    let autosave_ms = cli.autosave_secs * 1000;
    let mut last_save = started;
    let tick = Duration::from_millis(cli.tick_ms.max(1));

    loop {
        let now = now_ms();
        let result = engine.tick(now);
        for event in &result.events {
            print_event(event);
        }

        let checkpoint = result.has(|e| *e == GameEvent::SaveCheckpoint);
        if checkpoint && now.saturating_sub(last_save) >= autosave_ms {
            save(&manager, &engine, now);
            last_save = now;
        }

        if deadline.is_some_and(|d| now >= d) {
            break;
        }
        thread::sleep(tick);
    }

    save(&manager, &engine, now_ms());
    ExitCode::SUCCESS
}
