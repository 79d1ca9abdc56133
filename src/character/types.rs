//! The player character's stat block.

use crate::core::balance::*;
use serde::{Deserialize, Serialize};

/// Base attributes an upgrade point can be spent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    MaxHp,
    Attack,
    Defense,
}

impl Attribute {
    pub const ALL: [Attribute; 3] = [Attribute::MaxHp, Attribute::Attack, Attribute::Defense];

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::MaxHp => "Max HP",
            Attribute::Attack => "Attack",
            Attribute::Defense => "Defense",
        }
    }

    /// Stat gained per upgrade point.
    pub fn gain(&self) -> u32 {
        match self {
            Attribute::MaxHp => ATTRIBUTE_MAX_HP_GAIN,
            Attribute::Attack => ATTRIBUTE_ATTACK_GAIN,
            Attribute::Defense => ATTRIBUTE_DEFENSE_GAIN,
        }
    }
}

/// The character record.
///
/// IMPORTANT: new fields must keep `#[serde(default)]` semantics (the struct
/// level attribute covers this) so older saves still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub experience: u64,
    pub experience_to_next: u64,
    pub gold: u64,
    pub combo_count: u32,
    pub max_combo_seen: u32,
    pub shield_points: u32,
    pub critical_rate: f64,
    pub upgrade_points: u32,
    /// Set when hp hits zero, cleared by the revive task.
    pub defeated: bool,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            level: 1,
            hp: BASE_MAX_HP,
            max_hp: BASE_MAX_HP,
            attack: BASE_ATTACK,
            defense: BASE_DEFENSE,
            experience: 0,
            experience_to_next: BASE_EXPERIENCE_TO_NEXT,
            gold: 0,
            combo_count: 0,
            max_combo_seen: 0,
            shield_points: 0,
            critical_rate: BASE_CRITICAL_RATE,
            upgrade_points: 0,
            defeated: false,
        }
    }
}

impl Character {
    pub fn is_alive(&self) -> bool {
        self.hp > 0 && !self.defeated
    }

    /// Heals up to max hp. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_hp.saturating_sub(self.hp));
        self.hp += restored;
        restored
    }

    /// Applies damage to hp, clamping at zero. Returns hp lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Increments the combo counter, tracking the best streak.
    pub fn extend_combo(&mut self) {
        self.combo_count += 1;
        self.max_combo_seen = self.max_combo_seen.max(self.combo_count);
    }

    pub fn reset_combo(&mut self, to: u32) {
        self.combo_count = to;
        self.max_combo_seen = self.max_combo_seen.max(self.combo_count);
    }

    /// Restores the stat invariants after loading an arbitrary record.
    pub fn normalize(&mut self) {
        self.level = self.level.max(1);
        self.max_hp = self.max_hp.max(1);
        self.hp = self.hp.min(self.max_hp);
        self.experience_to_next = self.experience_to_next.max(1);
        self.critical_rate = self.critical_rate.clamp(0.0, 1.0);
        self.max_combo_seen = self.max_combo_seen.max(self.combo_count);
    }
}
