//! Achievement evaluation.

use super::data::ALL_ACHIEVEMENTS;
use super::types::{AchievementDef, AchievementSnapshot, Achievements};
use crate::character::Character;

impl Achievements {
    /// Unlocks every achievement whose condition now holds and pays its reward.
    ///
    /// Already unlocked achievements are skipped, so calling this every tick
    /// never pays a reward twice. Returns the newly unlocked definitions.
    pub fn evaluate(
        &mut self,
        snapshot: &AchievementSnapshot,
        character: &mut Character,
    ) -> Vec<&'static AchievementDef> {
        let mut newly_unlocked = Vec::new();
        for def in ALL_ACHIEVEMENTS {
            if self.is_unlocked(def.id) || !(def.condition)(snapshot) {
                continue;
            }
            if self.unlock(def.id) {
                character.gold += def.reward_gold;
                character.upgrade_points += def.reward_upgrade_points;
                newly_unlocked.push(def);
            }
        }
        newly_unlocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::AchievementId;

    #[test]
    fn test_first_kill_unlocks_first_blood() {
        let mut achievements = Achievements::default();
        let mut character = Character::default();
        let snapshot = AchievementSnapshot {
            level: 1,
            enemies_defeated: 1,
            ..Default::default()
        };
        let unlocked = achievements.evaluate(&snapshot, &mut character);
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].id, AchievementId::FirstBlood);
        assert_eq!(character.gold, 10);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let mut achievements = Achievements::default();
        let mut character = Character::default();
        let snapshot = AchievementSnapshot {
            level: 10,
            bosses_defeated: 1,
            enemies_defeated: 30,
            ..Default::default()
        };
        let first = achievements.evaluate(&snapshot, &mut character);
        assert_eq!(first.len(), 4);
        let gold = character.gold;
        let points = character.upgrade_points;

        assert!(achievements.evaluate(&snapshot, &mut character).is_empty());
        assert_eq!(character.gold, gold);
        assert_eq!(character.upgrade_points, points);
        // Boss Slayer 2 + Seasoned 1 + Veteran 1
        assert_eq!(points, 4);
    }

    #[test]
    fn test_gold_reward_can_chain_into_gold_collector_next_pass() {
        let mut achievements = Achievements::default();
        let mut character = Character {
            gold: 995,
            ..Default::default()
        };
        let snapshot = AchievementSnapshot {
            enemies_defeated: 1,
            gold: character.gold,
            ..Default::default()
        };
        achievements.evaluate(&snapshot, &mut character);
        assert!(!achievements.is_unlocked(AchievementId::GoldCollector));

        let snapshot = AchievementSnapshot {
            gold: character.gold,
            ..snapshot
        };
        let unlocked = achievements.evaluate(&snapshot, &mut character);
        assert_eq!(unlocked[0].id, AchievementId::GoldCollector);
    }

    #[test]
    fn test_close_call_unlocks_survivor() {
        let mut achievements = Achievements::default();
        let mut character = Character::default();
        let snapshot = AchievementSnapshot {
            close_call: true,
            ..Default::default()
        };
        achievements.evaluate(&snapshot, &mut character);
        assert!(achievements.is_unlocked(AchievementId::Survivor));
        assert_eq!(character.gold, 30);
    }
}
