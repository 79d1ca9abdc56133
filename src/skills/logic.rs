//! Skill validation, payment, rolling and upgrades.
//!
//! Casting is split in two: [`check_cast`] validates without touching any
//! state, [`begin_cast`] pays and stamps the cooldown. The engine applies the
//! rolled [`SkillCast`] to combat since only it owns the enemy and the effects.

use rand::Rng;

use super::data::{skill_def, skill_power};
use super::types::{SkillBook, SkillCast, SkillId, SkillPower};
use crate::character::Character;
use crate::core::error::GameError;

/// Milliseconds until the skill is ready again. Zero when ready.
pub fn cooldown_remaining(book: &SkillBook, id: SkillId, now: u64) -> u64 {
    let cooldown = skill_def(id).cooldown_ms;
    match book.get(id).last_used {
        Some(used) => {
            let elapsed = now.saturating_sub(used);
            cooldown.saturating_sub(elapsed)
        }
        None => 0,
    }
}

/// Checks, in order: cooldown, gold, incapacitation, target.
pub fn check_cast(
    book: &SkillBook,
    character: &Character,
    id: SkillId,
    now: u64,
    has_target: bool,
) -> Result<(), GameError> {
    let remaining_ms = cooldown_remaining(book, id, now);
    if remaining_ms > 0 {
        return Err(GameError::SkillOnCooldown {
            skill: id,
            remaining_ms,
        });
    }

    let cost = skill_def(id).cost;
    if character.gold < cost {
        return Err(GameError::InsufficientResource {
            skill: id,
            cost,
            available: character.gold,
        });
    }

    if !character.is_alive() {
        return Err(GameError::CharacterIncapacitated);
    }

    if id.targets_enemy() && !has_target {
        return Err(GameError::NoActiveEnemy);
    }

    Ok(())
}

/// Pays the gold cost and starts the cooldown. Call only after [`check_cast`].
pub fn begin_cast(book: &mut SkillBook, character: &mut Character, id: SkillId, now: u64) {
    character.gold = character.gold.saturating_sub(skill_def(id).cost);
    book.get_mut(id).last_used = Some(now);
}

/// Rolls the random part of a cast at the skill's current level.
pub fn roll_cast<R: Rng>(book: &SkillBook, id: SkillId, rng: &mut R) -> SkillCast {
    let power = skill_power(id, book.level(id));
    let amount = match power {
        SkillPower::Damage { base, bonus_max }
        | SkillPower::Heal { base, bonus_max }
        | SkillPower::Chain {
            base, bonus_max, ..
        } => (base + rng.gen_range(0..=bonus_max)).max(1),
        SkillPower::Shield { points, .. } => points,
        SkillPower::CritMultiplier(_) | SkillPower::Buff { .. } => 0,
    };
    SkillCast {
        skill: id,
        power,
        amount,
    }
}

/// Raises a skill by one level, spending upgrade points.
///
/// Returns the new level.
pub fn upgrade(book: &mut SkillBook, character: &mut Character, id: SkillId) -> Result<u32, GameError> {
    let def = skill_def(id);
    let level = book.level(id);
    if level >= def.max_level {
        return Err(GameError::MaxLevelReached {
            skill: id,
            max_level: def.max_level,
        });
    }
    if character.upgrade_points < def.upgrade_cost {
        return Err(GameError::InsufficientUpgradePoints {
            required: def.upgrade_cost,
            available: character.upgrade_points,
        });
    }

    character.upgrade_points -= def.upgrade_cost;
    let state = book.get_mut(id);
    state.level += 1;
    Ok(state.level)
}

/// Damage of each lightning chain hop after the first. Every hop is the
/// first hit scaled by `decay`.
pub fn chain_followups(first: u32, hits: u32, decay: f64) -> Vec<u32> {
    let hop = ((first as f64 * decay).floor() as u32).max(1);
    (1..hits).map(|_| hop).collect()
}
