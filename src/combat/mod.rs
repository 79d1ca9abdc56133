//! Combat system types and logic.

pub mod logic;
pub mod math;
pub mod types;

pub use logic::{resolve_turn, CombatEvent, EnemyDefeat};
pub use types::*;
