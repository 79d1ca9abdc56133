//! Balance simulator for Monte Carlo analysis.
//!
//! Runs many seeded playthroughs on a simulated clock to analyze:
//! - Level pacing (minutes to reach each level)
//! - Kill, boss kill and death rates
//! - How often each achievement unlocks
//!
//! The simulator drives the same [`Engine`](crate::core::Engine) as the idle
//! host, so its numbers match real gameplay.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
