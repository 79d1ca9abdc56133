//! Engine configuration.
//!
//! Every field defaults to the matching constant in [`balance`](super::balance).
//! Hosts may load a partial JSON file over the defaults; missing fields keep
//! their default value.

use super::balance::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Tunables consulted by the combat resolver, generator and progression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub turn_interval_ms: u64,
    pub enemy_respawn_delay_ms: u64,
    pub revive_delay_ms: u64,
    pub combo_window_ms: u64,

    pub experience_growth: f64,
    pub level_up_max_hp: u32,
    pub level_up_attack: u32,
    pub level_up_defense: u32,

    pub player_damage_bonus_min: u32,
    pub player_damage_bonus_max: u32,
    pub combo_step: f64,
    pub combo_cap: f64,
    pub combo_streak_threshold: u32,
    pub combo_streak_multiplier: f64,
    pub berserk_damage_multiplier: f64,
    pub berserk_crit_bonus: f64,

    pub enemy_damage_bonus_max: u32,
    pub enemy_level_scaling: f64,
    pub enemy_stat_variation: f64,
    pub first_boss_level: u32,
    pub boss_level_step: u32,
    pub boss_ability_chance: f64,

    pub survivor_hp_fraction: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            turn_interval_ms: TURN_INTERVAL_MS,
            enemy_respawn_delay_ms: ENEMY_RESPAWN_DELAY_MS,
            revive_delay_ms: REVIVE_DELAY_MS,
            combo_window_ms: COMBO_WINDOW_MS,
            experience_growth: EXPERIENCE_GROWTH,
            level_up_max_hp: LEVEL_UP_MAX_HP,
            level_up_attack: LEVEL_UP_ATTACK,
            level_up_defense: LEVEL_UP_DEFENSE,
            player_damage_bonus_min: PLAYER_DAMAGE_BONUS_MIN,
            player_damage_bonus_max: PLAYER_DAMAGE_BONUS_MAX,
            combo_step: COMBO_STEP,
            combo_cap: COMBO_CAP,
            combo_streak_threshold: COMBO_STREAK_THRESHOLD,
            combo_streak_multiplier: COMBO_STREAK_MULTIPLIER,
            berserk_damage_multiplier: BERSERK_DAMAGE_MULTIPLIER,
            berserk_crit_bonus: BERSERK_CRIT_BONUS,
            enemy_damage_bonus_max: ENEMY_DAMAGE_BONUS_MAX,
            enemy_level_scaling: ENEMY_LEVEL_SCALING,
            enemy_stat_variation: ENEMY_STAT_VARIATION,
            first_boss_level: FIRST_BOSS_LEVEL,
            boss_level_step: BOSS_LEVEL_STEP,
            boss_ability_chance: BOSS_ABILITY_CHANCE,
            survivor_hp_fraction: SURVIVOR_HP_FRACTION,
        }
    }
}

impl EngineConfig {
    /// Reads a JSON config file. Fields absent from the file keep their defaults.
    pub fn from_json_file(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Config for tests that need attacks with no random bonus.
    pub fn flat_damage() -> Self {
        Self {
            player_damage_bonus_min: 0,
            player_damage_bonus_max: 0,
            enemy_damage_bonus_max: 0,
            enemy_stat_variation: 0.0,
            ..Default::default()
        }
    }
}
