//! Achievement system.
//!
//! Achievements are evaluated after every combat turn and after skill
//! upgrades. Unlock flags are stored in the save record.

pub mod data;
pub mod logic;
pub mod types;

pub use data::{get_achievement_def, ALL_ACHIEVEMENTS};
pub use types::{AchievementDef, AchievementId, AchievementSnapshot, Achievements};
