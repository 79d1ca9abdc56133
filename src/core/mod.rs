//! Engine core: state, configuration, events, scheduling and the tick loop.

pub mod balance;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod game_loop;
pub mod game_state;
pub mod scheduler;

pub use engine::{CastOutcome, Engine, GameRng};
pub use game_state::GameState;
