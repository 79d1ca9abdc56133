use serde::{Deserialize, Serialize};

use crate::effects::StatusEffects;
use crate::enemies::data::BossAbility;

/// The enemy currently being fought. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub name: String,
    pub sprite: &'static str,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    /// Attack at spawn time, used to cap enrage.
    pub base_attack: u32,
    pub defense: u32,
    pub experience_reward: u64,
    pub gold_reward: u64,
    pub is_boss: bool,
    pub abilities: &'static [BossAbility],
    pub required_level: Option<u32>,
    /// Serial of this spawn. Deferred hits aimed at an older encounter are dropped.
    pub encounter: u64,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Returns hp actually removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Returns hp actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_hp - self.hp);
        self.hp += restored;
        restored
    }
}

/// Turn bookkeeping plus the character's status effects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatState {
    pub turn: u64,
    pub last_turn_at: Option<u64>,
    pub last_attack_at: Option<u64>,
    pub enemies_defeated: u64,
    pub deaths: u64,
    /// Enemies spawned so far; the next spawn's encounter id.
    pub encounters_spawned: u64,
    pub effects: StatusEffects,
}

impl CombatState {
    /// Whether a turn is due at `now`.
    pub fn turn_ready(&self, now: u64, interval_ms: u64) -> bool {
        match self.last_turn_at {
            Some(last) => now.saturating_sub(last) >= interval_ms,
            None => true,
        }
    }
}
