//! The save-state record and its forgiving loader.
//!
//! Loading merges whatever JSON is on disk over a default record, so saves
//! written by older versions (missing fields) or edited by hand (extra
//! fields, nulls) still load. Only input that is not JSON, is not an object,
//! or has wrongly typed values is rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::VecDeque;

use crate::achievements::Achievements;
use crate::character::Character;
use crate::combat::CombatState;
use crate::core::balance::{COMBAT_LOG_CAPACITY, SAVE_VERSION};
use crate::core::config::EngineConfig;
use crate::core::error::GameError;
use crate::core::game_state::GameState;
use crate::enemies::BossState;
use crate::skills::SkillBook;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveState {
    pub version: u32,
    /// Host timestamp (ms) at capture.
    pub saved_at: u64,
    pub character: Character,
    pub skills: SkillBook,
    pub achievements: Achievements,
    pub combat_state: CombatState,
    pub boss_state: BossState,
    /// Battle log, newest first.
    pub combat_log: Vec<String>,
}

impl Default for SaveState {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            saved_at: 0,
            character: Character::default(),
            skills: SkillBook::default(),
            achievements: Achievements::default(),
            combat_state: CombatState::default(),
            boss_state: BossState::default(),
            combat_log: Vec::new(),
        }
    }
}

impl SaveState {
    /// Snapshots the persistent part of a game state.
    pub fn capture(state: &GameState, saved_at: u64) -> Self {
        Self {
            version: SAVE_VERSION,
            saved_at,
            character: state.character.clone(),
            skills: state.skills.clone(),
            achievements: state.achievements.clone(),
            combat_state: state.combat_state.clone(),
            boss_state: state.boss_state.clone(),
            combat_log: state.combat_log.iter().cloned().collect(),
        }
    }

    /// Rebuilds a game state from the record.
    ///
    /// A character saved while defeated comes back revived, and a boss fight
    /// in progress is reopened so the boss spawns again.
    pub fn into_game_state(self) -> GameState {
        let mut character = self.character;
        character.normalize();
        if character.defeated || character.hp == 0 {
            character.defeated = false;
            character.hp = character.max_hp;
        }

        let mut skills = self.skills;
        skills.normalize();

        let mut boss_state = self.boss_state;
        boss_state.is_boss_fight = false;

        let mut combat_log: VecDeque<String> = self.combat_log.into_iter().collect();
        combat_log.truncate(COMBAT_LOG_CAPACITY);

        GameState {
            character,
            skills,
            achievements: self.achievements,
            combat_state: self.combat_state,
            boss_state,
            current_enemy: None,
            combat_log,
        }
    }

    /// A fresh record whose boss threshold follows `config`.
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            boss_state: BossState::with_config(config),
            ..Default::default()
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a record, merging it over the defaults field by field.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let loaded: Value =
            serde_json::from_str(json).map_err(|e| GameError::CorruptSaveState(e.to_string()))?;
        if !loaded.is_object() {
            return Err(GameError::CorruptSaveState(
                "save record is not a JSON object".to_string(),
            ));
        }

        let mut merged = serde_json::to_value(SaveState::default())
            .map_err(|e| GameError::CorruptSaveState(e.to_string()))?;
        merge_json(&mut merged, &loaded);

        serde_json::from_value(merged).map_err(|e| GameError::CorruptSaveState(e.to_string()))
    }
}

/// Overlays `overlay` onto `base`.
///
/// Only keys already in `base` are taken; nested objects merge recursively;
/// a null never replaces a non-null value. Everything else is replaced
/// wholesale (arrays included).
pub fn merge_json(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                if let Some(base_value) = base_map.get_mut(key) {
                    merge_json(base_value, overlay_value);
                }
            }
        }
        (base, Value::Null) if !base.is_null() => {}
        (base, overlay) => *base = overlay.clone(),
    }
}
