//! Cooldown-gated skills paid for with gold and upgraded with points.

pub mod data;
pub mod logic;
pub mod types;

pub use data::{skill_def, skill_power, SkillDef, ALL_SKILLS};
pub use types::*;
