//! Skill identifiers and mutable per-skill state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::effects::EffectKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillId {
    Fireball,
    Heal,
    CriticalStrike,
    LightningChain,
    Shield,
    Berserk,
    LifeDrain,
}

impl SkillId {
    pub const ALL: [SkillId; 7] = [
        SkillId::Fireball,
        SkillId::Heal,
        SkillId::CriticalStrike,
        SkillId::LightningChain,
        SkillId::Shield,
        SkillId::Berserk,
        SkillId::LifeDrain,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SkillId::Fireball => "Fireball",
            SkillId::Heal => "Heal",
            SkillId::CriticalStrike => "Critical Strike",
            SkillId::LightningChain => "Lightning Chain",
            SkillId::Shield => "Shield",
            SkillId::Berserk => "Berserk",
            SkillId::LifeDrain => "Life Drain",
        }
    }

    /// Whether the skill needs a living enemy to be cast.
    pub fn targets_enemy(&self) -> bool {
        matches!(self, SkillId::Fireball | SkillId::LightningChain)
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The mutable part of a skill. Everything else lives in the static table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillState {
    pub level: u32,
    /// Timestamp (ms) of the last successful cast.
    pub last_used: Option<u64>,
}

impl Default for SkillState {
    fn default() -> Self {
        Self {
            level: 1,
            last_used: None,
        }
    }
}

/// Magnitude of a skill at a given level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillPower {
    /// Flat damage before the random bonus.
    Damage { base: u32, bonus_max: u32 },
    /// Flat healing before the random bonus.
    Heal { base: u32, bonus_max: u32 },
    /// Multiplier applied to the next critical hit.
    CritMultiplier(f64),
    /// First hit of a chain; later hops deal `decay` times the first hit.
    Chain {
        base: u32,
        bonus_max: u32,
        hits: u32,
        decay: f64,
        interval_ms: u64,
    },
    /// Absorption pool and its lifetime.
    Shield { points: u32, duration_ms: u64 },
    /// A timed buff with a magnitude (multiplier or fraction).
    Buff {
        effect: EffectKind,
        magnitude: f64,
        duration_ms: u64,
    },
}

/// A successful cast, returned to the caller of `use_skill`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillCast {
    pub skill: SkillId,
    pub power: SkillPower,
    /// Rolled damage, healing or shield points. Zero for pure buffs.
    pub amount: u32,
}

/// Every skill's state, keyed by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillBook {
    skills: BTreeMap<SkillId, SkillState>,
}

impl Default for SkillBook {
    fn default() -> Self {
        Self {
            skills: SkillId::ALL
                .iter()
                .map(|id| (*id, SkillState::default()))
                .collect(),
        }
    }
}

impl SkillBook {
    pub fn get(&self, id: SkillId) -> SkillState {
        self.skills.get(&id).copied().unwrap_or_default()
    }

    pub fn get_mut(&mut self, id: SkillId) -> &mut SkillState {
        self.skills.entry(id).or_default()
    }

    pub fn level(&self, id: SkillId) -> u32 {
        self.get(id).level
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillId, SkillState)> + '_ {
        self.skills.iter().map(|(id, state)| (*id, *state))
    }

    /// Number of skills at their maximum level.
    pub fn count_at_max(&self) -> usize {
        self.iter()
            .filter(|(id, state)| state.level >= super::data::skill_def(*id).max_level)
            .count()
    }

    /// Clamps loaded levels into `1..=max_level` and fills in missing skills.
    pub fn normalize(&mut self) {
        for id in SkillId::ALL {
            let max_level = super::data::skill_def(id).max_level;
            let state = self.get_mut(id);
            state.level = state.level.clamp(1, max_level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_id_display_uses_name() {
        assert_eq!(SkillId::Fireball.to_string(), "Fireball");
        assert_eq!(SkillId::LifeDrain.to_string(), "Life Drain");
    }

    #[test]
    fn test_skill_id_serializes_snake_case() {
        let json = serde_json::to_string(&SkillId::CriticalStrike).unwrap();
        assert_eq!(json, "\"critical_strike\"");
    }

    #[test]
    fn test_default_book_has_every_skill_at_level_one() {
        let book = SkillBook::default();
        for id in SkillId::ALL {
            assert_eq!(book.level(id), 1);
            assert_eq!(book.get(id).last_used, None);
        }
        assert_eq!(book.count_at_max(), 0);
    }

    #[test]
    fn test_book_serializes_as_map() {
        let book = SkillBook::default();
        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["fireball"]["level"], 1);
        assert!(value["heal"]["last_used"].is_null());
    }

    #[test]
    fn test_normalize_clamps_levels() {
        let mut book = SkillBook::default();
        book.get_mut(SkillId::Heal).level = 0;
        book.get_mut(SkillId::Shield).level = 99;
        book.normalize();
        assert_eq!(book.level(SkillId::Heal), 1);
        assert_eq!(book.level(SkillId::Shield), 5);
    }
}
