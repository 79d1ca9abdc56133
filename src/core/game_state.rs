use crate::achievements::{AchievementSnapshot, Achievements};
use crate::character::Character;
use crate::combat::types::{CombatState, Enemy};
use crate::core::balance::COMBAT_LOG_CAPACITY;
use crate::core::config::EngineConfig;
use crate::enemies::BossState;
use crate::skills::SkillBook;
use std::collections::VecDeque;

/// Everything the engine owns. The single source of truth for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub character: Character,
    pub skills: SkillBook,
    pub achievements: Achievements,
    pub combat_state: CombatState,
    pub boss_state: BossState,
    /// The enemy being fought. Transient, not saved.
    pub current_enemy: Option<Enemy>,
    /// Most recent battle log lines, newest first.
    pub combat_log: VecDeque<String>,
}

impl GameState {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            character: Character::default(),
            skills: SkillBook::default(),
            achievements: Achievements::default(),
            combat_state: CombatState::default(),
            boss_state: BossState::with_config(config),
            current_enemy: None,
            combat_log: VecDeque::with_capacity(COMBAT_LOG_CAPACITY),
        }
    }

    /// Record a battle log line, dropping the oldest past capacity.
    pub fn add_log_line(&mut self, line: String) {
        if self.combat_log.len() >= COMBAT_LOG_CAPACITY {
            self.combat_log.pop_back();
        }
        self.combat_log.push_front(line);
    }

    pub fn living_enemy(&self) -> Option<&Enemy> {
        self.current_enemy.as_ref().filter(|e| e.is_alive())
    }

    pub fn has_living_enemy(&self) -> bool {
        self.living_enemy().is_some()
    }

    /// Alive, but below the survivor threshold.
    pub fn is_close_call(&self, config: &EngineConfig) -> bool {
        let c = &self.character;
        let threshold = c.max_hp as f64 * config.survivor_hp_fraction;
        c.hp > 0 && (c.hp as f64) < threshold
    }

    pub fn achievement_snapshot(&self, close_call: bool) -> AchievementSnapshot {
        AchievementSnapshot {
            level: self.character.level,
            gold: self.character.gold,
            enemies_defeated: self.combat_state.enemies_defeated,
            bosses_defeated: self.boss_state.bosses_defeated,
            max_combo: self.character.max_combo_seen,
            skills_at_max: self.skills.count_at_max(),
            close_call,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_bounded_newest_first() {
        let mut state = GameState::default();
        for i in 0..15 {
            state.add_log_line(format!("line {i}"));
        }
        assert_eq!(state.combat_log.len(), COMBAT_LOG_CAPACITY);
        assert_eq!(state.combat_log.front().map(String::as_str), Some("line 14"));
        assert_eq!(state.combat_log.back().map(String::as_str), Some("line 5"));
    }

    #[test]
    fn test_close_call_threshold() {
        let config = EngineConfig::default();
        let mut state = GameState::default();
        state.character.hp = 14;
        assert!(state.is_close_call(&config));
        state.character.hp = 15;
        assert!(!state.is_close_call(&config));
        state.character.hp = 0;
        assert!(!state.is_close_call(&config));
    }

    #[test]
    fn test_new_state_has_no_enemy() {
        let state = GameState::default();
        assert!(!state.has_living_enemy());
        assert_eq!(state.boss_state.next_boss_level, 5);
    }
}
