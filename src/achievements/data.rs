//! Static achievement definitions.

use super::types::{AchievementDef, AchievementId, AchievementSnapshot};

/// All achievement definitions in display order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    // ═══════════════════════════════════════════════════════════════
    // COMBAT
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::FirstBlood,
        name: "First Blood",
        description: "Defeat your first enemy",
        reward_gold: 10,
        reward_upgrade_points: 0,
        condition: |s: &AchievementSnapshot| s.enemies_defeated >= 1,
    },
    AchievementDef {
        id: AchievementId::ComboMaster,
        name: "Combo Master",
        description: "Reach a 10x combo",
        reward_gold: 25,
        reward_upgrade_points: 0,
        condition: |s: &AchievementSnapshot| s.max_combo >= 10,
    },
    AchievementDef {
        id: AchievementId::BossSlayer,
        name: "Boss Slayer",
        description: "Defeat your first boss",
        reward_gold: 50,
        reward_upgrade_points: 2,
        condition: |s: &AchievementSnapshot| s.bosses_defeated >= 1,
    },
    AchievementDef {
        id: AchievementId::Survivor,
        name: "Survivor",
        description: "Survive a turn with less than 10% health",
        reward_gold: 30,
        reward_upgrade_points: 0,
        condition: |s: &AchievementSnapshot| s.close_call,
    },
    // ═══════════════════════════════════════════════════════════════
    // LEVEL
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::Seasoned,
        name: "Seasoned",
        description: "Reach level 5",
        reward_gold: 50,
        reward_upgrade_points: 1,
        condition: |s: &AchievementSnapshot| s.level >= 5,
    },
    AchievementDef {
        id: AchievementId::Veteran,
        name: "Veteran",
        description: "Reach level 10",
        reward_gold: 75,
        reward_upgrade_points: 1,
        condition: |s: &AchievementSnapshot| s.level >= 10,
    },
    AchievementDef {
        id: AchievementId::Legendary,
        name: "Legendary",
        description: "Reach level 20 and defeat 3 bosses",
        reward_gold: 500,
        reward_upgrade_points: 3,
        condition: |s: &AchievementSnapshot| s.level >= 20 && s.bosses_defeated >= 3,
    },
    // ═══════════════════════════════════════════════════════════════
    // PROGRESSION
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::GoldCollector,
        name: "Gold Collector",
        description: "Hold 1,000 gold",
        reward_gold: 200,
        reward_upgrade_points: 0,
        condition: |s: &AchievementSnapshot| s.gold >= 1000,
    },
    AchievementDef {
        id: AchievementId::SkillSpecialist,
        name: "Skill Specialist",
        description: "Raise a skill to its maximum level",
        reward_gold: 50,
        reward_upgrade_points: 1,
        condition: |s: &AchievementSnapshot| s.skills_at_max >= 1,
    },
    AchievementDef {
        id: AchievementId::SkillMaster,
        name: "Skill Master",
        description: "Raise three skills to their maximum level",
        reward_gold: 100,
        reward_upgrade_points: 2,
        condition: |s: &AchievementSnapshot| s.skills_at_max >= 3,
    },
];

pub fn get_achievement_def(id: AchievementId) -> Option<&'static AchievementDef> {
    ALL_ACHIEVEMENTS.iter().find(|def| def.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = ALL_ACHIEVEMENTS.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), ALL_ACHIEVEMENTS.len());
    }

    #[test]
    fn test_lookup() {
        let def = get_achievement_def(AchievementId::Legendary).unwrap();
        assert_eq!(def.reward_gold, 500);
        assert_eq!(def.reward_upgrade_points, 3);
    }

    #[test]
    fn test_legendary_needs_both_conditions() {
        let def = get_achievement_def(AchievementId::Legendary).unwrap();
        let level_only = AchievementSnapshot {
            level: 25,
            bosses_defeated: 2,
            ..Default::default()
        };
        assert!(!(def.condition)(&level_only));
        let both = AchievementSnapshot {
            level: 20,
            bosses_defeated: 3,
            ..Default::default()
        };
        assert!((def.condition)(&both));
    }
}
