//! Enemy templates and the enemy/boss generator.

pub mod data;
pub mod generation;

pub use data::{AbilityKind, BossAbility};
pub use generation::{generate_next, on_boss_defeated, BossState};
