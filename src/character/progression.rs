//! Experience, level-ups and attribute upgrades.

use super::types::{Attribute, Character};
use crate::core::balance::LEVEL_UP_UPGRADE_POINTS;
use crate::core::config::EngineConfig;
use crate::core::error::GameError;

/// Adds experience and resolves every level-up it pays for.
///
/// Returns the new levels reached, in order. A single large grant can
/// produce several level-ups.
pub fn gain_experience(character: &mut Character, amount: u64, config: &EngineConfig) -> Vec<u32> {
    character.experience += amount;

    let mut levels = Vec::new();
    while character.experience >= character.experience_to_next {
        character.experience -= character.experience_to_next;
        level_up(character, config);
        levels.push(character.level);
    }
    levels
}

fn level_up(character: &mut Character, config: &EngineConfig) {
    character.level += 1;
    character.upgrade_points += LEVEL_UP_UPGRADE_POINTS;
    character.max_hp += config.level_up_max_hp;
    character.attack += config.level_up_attack;
    character.defense += config.level_up_defense;
    character.hp = character.max_hp;
    character.experience_to_next = next_experience_requirement(character.experience_to_next, config);
}

/// Experience needed for the level after one that needed `current`.
pub fn next_experience_requirement(current: u64, config: &EngineConfig) -> u64 {
    ((current as f64 * config.experience_growth).floor() as u64).max(current + 1)
}

/// Spends one upgrade point on a base attribute.
pub fn upgrade_attribute(character: &mut Character, attribute: Attribute) -> Result<u32, GameError> {
    if character.upgrade_points == 0 {
        return Err(GameError::InsufficientUpgradePoints {
            required: 1,
            available: 0,
        });
    }
    character.upgrade_points -= 1;

    let gain = attribute.gain();
    match attribute {
        Attribute::MaxHp => {
            character.max_hp += gain;
            character.hp += gain;
            Ok(character.max_hp)
        }
        Attribute::Attack => {
            character.attack += gain;
            Ok(character.attack)
        }
        Attribute::Defense => {
            character.defense += gain;
            Ok(character.defense)
        }
    }
}
