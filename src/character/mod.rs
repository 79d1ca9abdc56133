//! The player character: stats, level progression and attribute upgrades.

pub mod progression;
pub mod types;

pub use progression::{gain_experience, upgrade_attribute};
pub use types::*;
