//! Static skill definitions and their level scaling.

use super::types::{SkillId, SkillPower};
use crate::effects::EffectKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillDef {
    pub id: SkillId,
    pub description: &'static str,
    /// Gold spent per cast.
    pub cost: u64,
    pub cooldown_ms: u64,
    /// Upgrade points spent per level.
    pub upgrade_cost: u32,
    pub max_level: u32,
}

pub const ALL_SKILLS: &[SkillDef] = &[
    SkillDef {
        id: SkillId::Fireball,
        description: "Hurl a fireball that ignores armor",
        cost: 10,
        cooldown_ms: 4000,
        upgrade_cost: 2,
        max_level: 5,
    },
    SkillDef {
        id: SkillId::Heal,
        description: "Restore health",
        cost: 15,
        cooldown_ms: 6000,
        upgrade_cost: 2,
        max_level: 5,
    },
    SkillDef {
        id: SkillId::CriticalStrike,
        description: "Your next attack is a guaranteed critical hit",
        cost: 12,
        cooldown_ms: 5000,
        upgrade_cost: 2,
        max_level: 5,
    },
    SkillDef {
        id: SkillId::LightningChain,
        description: "Lightning strikes once, then twice more at reduced force",
        cost: 20,
        cooldown_ms: 8000,
        upgrade_cost: 3,
        max_level: 5,
    },
    SkillDef {
        id: SkillId::Shield,
        description: "Raise a barrier that absorbs damage",
        cost: 12,
        cooldown_ms: 12000,
        upgrade_cost: 3,
        max_level: 5,
    },
    SkillDef {
        id: SkillId::Berserk,
        description: "Deal more damage and crit more often for a while",
        cost: 25,
        cooldown_ms: 20000,
        upgrade_cost: 4,
        max_level: 5,
    },
    SkillDef {
        id: SkillId::LifeDrain,
        description: "Heal for a share of the damage you deal",
        cost: 18,
        cooldown_ms: 15000,
        upgrade_cost: 4,
        max_level: 5,
    },
];

pub fn skill_def(id: SkillId) -> &'static SkillDef {
    // ALL_SKILLS is ordered like SkillId::ALL
    &ALL_SKILLS[id as usize]
}

// Level scaling
const FIREBALL_BASE: u32 = 35;
const FIREBALL_PER_LEVEL: u32 = 15;
const FIREBALL_BONUS_MAX: u32 = 9;
const HEAL_BASE: u32 = 45;
const HEAL_PER_LEVEL: u32 = 20;
const HEAL_BONUS_MAX: u32 = 9;
const CRIT_MULTIPLIER_BASE: f64 = 3.0;
const CRIT_MULTIPLIER_PER_LEVEL: f64 = 0.5;
const CHAIN_BASE: u32 = 40;
const CHAIN_PER_LEVEL: u32 = 18;
const CHAIN_BONUS_MAX: u32 = 14;
const CHAIN_HITS: u32 = 3;
const CHAIN_DECAY: f64 = 0.6;
const CHAIN_INTERVAL_MS: u64 = 300;
const SHIELD_BASE: u32 = 50;
const SHIELD_PER_LEVEL: u32 = 30;
const SHIELD_DURATION_MS: u64 = 15000;
const BERSERK_DURATION_BASE_MS: u64 = 10000;
const BERSERK_DURATION_PER_LEVEL_MS: u64 = 2000;
const LIFE_DRAIN_BASE: f64 = 0.30;
const LIFE_DRAIN_PER_LEVEL: f64 = 0.15;
const LIFE_DRAIN_DURATION_BASE_MS: u64 = 8000;
const LIFE_DRAIN_DURATION_PER_LEVEL_MS: u64 = 3000;

/// Power of a skill at `level`. Non-decreasing in level.
pub fn skill_power(id: SkillId, level: u32) -> SkillPower {
    let steps = level.max(1) - 1;
    match id {
        SkillId::Fireball => SkillPower::Damage {
            base: FIREBALL_BASE + FIREBALL_PER_LEVEL * steps,
            bonus_max: FIREBALL_BONUS_MAX,
        },
        SkillId::Heal => SkillPower::Heal {
            base: HEAL_BASE + HEAL_PER_LEVEL * steps,
            bonus_max: HEAL_BONUS_MAX,
        },
        SkillId::CriticalStrike => {
            SkillPower::CritMultiplier(CRIT_MULTIPLIER_BASE + CRIT_MULTIPLIER_PER_LEVEL * steps as f64)
        }
        SkillId::LightningChain => SkillPower::Chain {
            base: CHAIN_BASE + CHAIN_PER_LEVEL * steps,
            bonus_max: CHAIN_BONUS_MAX,
            hits: CHAIN_HITS,
            decay: CHAIN_DECAY,
            interval_ms: CHAIN_INTERVAL_MS,
        },
        SkillId::Shield => SkillPower::Shield {
            points: SHIELD_BASE + SHIELD_PER_LEVEL * steps,
            duration_ms: SHIELD_DURATION_MS,
        },
        SkillId::Berserk => SkillPower::Buff {
            effect: EffectKind::Berserk,
            magnitude: crate::core::balance::BERSERK_DAMAGE_MULTIPLIER,
            duration_ms: BERSERK_DURATION_BASE_MS + BERSERK_DURATION_PER_LEVEL_MS * steps as u64,
        },
        SkillId::LifeDrain => SkillPower::Buff {
            effect: EffectKind::LifeDrain,
            magnitude: LIFE_DRAIN_BASE + LIFE_DRAIN_PER_LEVEL * steps as f64,
            duration_ms: LIFE_DRAIN_DURATION_BASE_MS + LIFE_DRAIN_DURATION_PER_LEVEL_MS * steps as u64,
        },
    }
}

/// Critical hit multiplier granted by the Critical Strike level.
pub fn crit_multiplier(level: u32) -> f64 {
    match skill_power(SkillId::CriticalStrike, level) {
        SkillPower::CritMultiplier(m) => m,
        _ => CRIT_MULTIPLIER_BASE,
    }
}
