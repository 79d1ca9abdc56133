//! Achievement identifiers, definitions and unlock state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unique identifier for each achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstBlood,
    Seasoned,
    Veteran,
    GoldCollector,
    ComboMaster,
    BossSlayer,
    SkillSpecialist,
    SkillMaster,
    Survivor,
    Legendary,
}

/// Everything the unlock predicates look at, captured after a turn.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AchievementSnapshot {
    pub level: u32,
    pub gold: u64,
    pub enemies_defeated: u64,
    pub bosses_defeated: u32,
    pub max_combo: u32,
    pub skills_at_max: usize,
    /// The character ended the turn alive below the survivor threshold.
    pub close_call: bool,
}

/// Static definition of an achievement.
#[derive(Clone, Copy)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub reward_gold: u64,
    pub reward_upgrade_points: u32,
    pub condition: fn(&AchievementSnapshot) -> bool,
}

/// Unlock flags for every achievement. Serialized as `{ id: unlocked }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Achievements {
    unlocked: BTreeMap<AchievementId, bool>,
}

impl Default for Achievements {
    fn default() -> Self {
        Self {
            unlocked: super::data::ALL_ACHIEVEMENTS
                .iter()
                .map(|def| (def.id, false))
                .collect(),
        }
    }
}

impl Achievements {
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.get(&id).copied().unwrap_or(false)
    }

    /// Unlock an achievement. Returns true if newly unlocked.
    pub fn unlock(&mut self, id: AchievementId) -> bool {
        if self.is_unlocked(id) {
            return false;
        }
        self.unlocked.insert(id, true);
        true
    }

    pub fn total_count(&self) -> usize {
        super::data::ALL_ACHIEVEMENTS.len()
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.values().filter(|u| **u).count()
    }
}
