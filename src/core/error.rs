//! Recoverable engine errors.

use crate::skills::SkillId;
use thiserror::Error;

/// Every failure the engine reports. None of them stop the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// The skill was used too recently.
    #[error("{skill} is on cooldown for another {remaining_ms}ms")]
    SkillOnCooldown { skill: SkillId, remaining_ms: u64 },

    /// The character cannot pay the skill's gold cost.
    #[error("{skill} costs {cost} gold but only {available} is available")]
    InsufficientResource {
        skill: SkillId,
        cost: u64,
        available: u64,
    },

    /// The character is defeated and waiting to revive.
    #[error("character is incapacitated")]
    CharacterIncapacitated,

    /// The skill cannot be upgraded any further.
    #[error("{skill} is already at max level {max_level}")]
    MaxLevelReached { skill: SkillId, max_level: u32 },

    /// Not enough upgrade points for the requested upgrade.
    #[error("upgrade needs {required} points but only {available} are available")]
    InsufficientUpgradePoints { required: u32, available: u32 },

    /// The skill needs a living enemy to target.
    #[error("no active enemy")]
    NoActiveEnemy,

    /// A save payload could not be parsed.
    #[error("corrupt save state: {0}")]
    CorruptSaveState(String),
}
