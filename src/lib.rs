//! Idle ARPG - combat and progression engine.
//!
//! A character fights an endless line of level-scaled enemies and periodic
//! bosses, casts cooldown-gated skills, levels up and unlocks achievements.
//! The engine is driven by a host clock through [`Engine::tick`]; see
//! `src/main.rs` for the real-time host and `src/bin/simulate.rs` for the
//! balance simulator.

pub mod achievements;
pub mod character;
pub mod combat;
pub mod core;
pub mod effects;
pub mod enemies;
pub mod save;
pub mod simulator;
pub mod skills;

pub use crate::core::config::EngineConfig;
pub use crate::core::engine::{CastOutcome, Engine, GameRng};
pub use crate::core::error::GameError;
pub use crate::core::events::{DamageKind, GameEvent, Target};
pub use crate::core::game_loop::{GameLoop, TickResult};
pub use crate::core::game_state::GameState;
