//! Events produced by the engine.
//!
//! Hosts map these to log lines, sounds or animations. The engine never
//! waits for anyone to consume them. `Display` renders the battle log line.

use std::fmt;

use crate::achievements::AchievementId;
use crate::character::Attribute;
use crate::effects::EffectKind;
use crate::skills::SkillId;

/// Who took the damage or healing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Enemy,
    Character,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageKind {
    Normal,
    Critical,
    Skill,
    Heal,
    ShieldAbsorb,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    // ── Combat ──────────────────────────────────────────────────
    DamageDealt {
        target: Target,
        amount: u32,
        kind: DamageKind,
    },
    EnemySpawned {
        name: String,
        hp: u32,
        is_boss: bool,
    },
    EnemyDefeated {
        name: String,
        experience: u64,
        gold: u64,
        is_boss: bool,
    },
    BossAbilityUsed {
        boss: String,
        ability: &'static str,
        amount: u32,
    },
    ComboExtended {
        combo: u32,
    },
    CharacterDefeated {
        by: String,
    },
    CharacterRevived,

    // ── Progression ─────────────────────────────────────────────
    LeveledUp {
        level: u32,
    },
    SkillCast {
        skill: SkillId,
        amount: u32,
    },
    SkillUpgraded {
        skill: SkillId,
        level: u32,
    },
    AttributeUpgraded {
        attribute: Attribute,
        value: u32,
    },
    AchievementUnlocked {
        id: AchievementId,
        name: &'static str,
        gold: u64,
        upgrade_points: u32,
    },

    // ── Effects ─────────────────────────────────────────────────
    EffectStarted {
        kind: EffectKind,
        expires_at: Option<u64>,
    },
    EffectEnded {
        kind: EffectKind,
    },

    // ── Housekeeping ────────────────────────────────────────────
    /// State changed since the last checkpoint; hosts may persist now.
    SaveCheckpoint,
    GameReset,
    Diagnostic {
        message: String,
    },
}

impl GameEvent {
    /// Whether the event belongs in the battle log.
    pub fn is_loggable(&self) -> bool {
        !matches!(self, GameEvent::SaveCheckpoint)
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::DamageDealt {
                target,
                amount,
                kind,
            } => match (target, kind) {
                (_, DamageKind::Heal) => write!(f, "You heal for {amount} HP"),
                (_, DamageKind::ShieldAbsorb) => write!(f, "Shield absorbs {amount} damage"),
                (Target::Enemy, DamageKind::Critical) => write!(f, "Critical hit! You deal {amount} damage"),
                (Target::Enemy, DamageKind::Skill) => write!(f, "Your spell deals {amount} damage"),
                (Target::Enemy, DamageKind::Normal) => write!(f, "You deal {amount} damage"),
                (Target::Character, _) => write!(f, "You take {amount} damage"),
            },
            GameEvent::EnemySpawned { name, hp, is_boss } => {
                if *is_boss {
                    write!(f, "BOSS FIGHT! {name} appears ({hp} HP)")
                } else {
                    write!(f, "A {name} appears ({hp} HP)")
                }
            }
            GameEvent::EnemyDefeated {
                name,
                experience,
                gold,
                is_boss,
            } => {
                let prefix = if *is_boss { "Boss defeated! " } else { "" };
                write!(f, "{prefix}{name} defeated! +{experience} XP, +{gold} gold")
            }
            GameEvent::BossAbilityUsed {
                boss,
                ability,
                amount,
            } => write!(f, "{boss} uses {ability} ({amount})"),
            GameEvent::ComboExtended { combo } => write!(f, "{combo}x combo!"),
            GameEvent::CharacterDefeated { by } => write!(f, "You were defeated by {by}"),
            GameEvent::CharacterRevived => write!(f, "You have been revived"),
            GameEvent::LeveledUp { level } => write!(f, "Level up! You are now level {level}"),
            GameEvent::SkillCast { skill, amount } => {
                if *amount > 0 {
                    write!(f, "You cast {skill} ({amount})")
                } else {
                    write!(f, "You cast {skill}")
                }
            }
            GameEvent::SkillUpgraded { skill, level } => {
                write!(f, "{skill} upgraded to level {level}")
            }
            GameEvent::AttributeUpgraded { attribute, value } => {
                write!(f, "{} increased to {value}", attribute.name())
            }
            GameEvent::AchievementUnlocked {
                name,
                gold,
                upgrade_points,
                ..
            } => {
                write!(f, "Achievement unlocked: {name} (+{gold} gold")?;
                if *upgrade_points > 0 {
                    write!(f, ", +{upgrade_points} upgrade points")?;
                }
                write!(f, ")")
            }
            GameEvent::EffectStarted { kind, .. } => write!(f, "{kind} activated"),
            GameEvent::EffectEnded { kind } => write!(f, "{kind} wore off"),
            GameEvent::SaveCheckpoint => write!(f, "Checkpoint"),
            GameEvent::GameReset => write!(f, "Game reset"),
            GameEvent::Diagnostic { message } => write!(f, "[diagnostic] {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_lines() {
        let normal = GameEvent::DamageDealt {
            target: Target::Enemy,
            amount: 17,
            kind: DamageKind::Normal,
        };
        assert_eq!(normal.to_string(), "You deal 17 damage");

        let taken = GameEvent::DamageDealt {
            target: Target::Character,
            amount: 4,
            kind: DamageKind::Normal,
        };
        assert_eq!(taken.to_string(), "You take 4 damage");
    }

    #[test]
    fn test_achievement_line_mentions_points_only_when_granted() {
        let with_points = GameEvent::AchievementUnlocked {
            id: AchievementId::BossSlayer,
            name: "Boss Slayer",
            gold: 50,
            upgrade_points: 2,
        };
        assert_eq!(
            with_points.to_string(),
            "Achievement unlocked: Boss Slayer (+50 gold, +2 upgrade points)"
        );

        let gold_only = GameEvent::AchievementUnlocked {
            id: AchievementId::FirstBlood,
            name: "First Blood",
            gold: 10,
            upgrade_points: 0,
        };
        assert_eq!(gold_only.to_string(), "Achievement unlocked: First Blood (+10 gold)");
    }

    #[test]
    fn test_checkpoint_not_logged() {
        assert!(!GameEvent::SaveCheckpoint.is_loggable());
        assert!(GameEvent::CharacterRevived.is_loggable());
    }
}
