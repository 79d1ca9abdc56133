//! Enemy and boss generation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::data::{BossTemplate, EnemyTemplate, BOSS_TEMPLATES, ENEMY_TEMPLATES};
use crate::combat::Enemy;
use crate::core::balance::LEVELS_PER_TEMPLATE;
use crate::core::config::EngineConfig;

/// Boss gating, persisted with the save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossState {
    pub is_boss_fight: bool,
    pub bosses_defeated: u32,
    pub next_boss_level: u32,
}

impl Default for BossState {
    fn default() -> Self {
        Self {
            is_boss_fight: false,
            bosses_defeated: 0,
            next_boss_level: crate::core::balance::FIRST_BOSS_LEVEL,
        }
    }
}

impl BossState {
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            next_boss_level: config.first_boss_level,
            ..Default::default()
        }
    }
}

/// Produces the next enemy for a character of `level`.
///
/// Returns the boss for the current tier once the character reaches
/// `next_boss_level` and no boss fight is already running; otherwise a
/// level-scaled regular enemy with a little random variation.
pub fn generate_next<R: Rng>(
    level: u32,
    boss_state: &mut BossState,
    encounter: u64,
    rng: &mut R,
    config: &EngineConfig,
) -> Enemy {
    if level >= boss_state.next_boss_level && !boss_state.is_boss_fight {
        let index = (boss_state.bosses_defeated as usize).min(BOSS_TEMPLATES.len() - 1);
        boss_state.is_boss_fight = true;
        return spawn_boss(&BOSS_TEMPLATES[index], encounter);
    }

    let index = ((level.saturating_sub(1) / LEVELS_PER_TEMPLATE) as usize).min(ENEMY_TEMPLATES.len() - 1);
    spawn_regular(&ENEMY_TEMPLATES[index], level, encounter, rng, config)
}

fn spawn_boss(template: &BossTemplate, encounter: u64) -> Enemy {
    let stats = &template.stats;
    Enemy {
        name: stats.name.to_string(),
        sprite: stats.sprite,
        hp: stats.hp,
        max_hp: stats.hp,
        attack: stats.attack,
        base_attack: stats.attack,
        defense: stats.defense,
        experience_reward: stats.experience,
        gold_reward: stats.gold,
        is_boss: true,
        abilities: template.abilities,
        required_level: Some(template.required_level),
        encounter,
    }
}

fn spawn_regular<R: Rng>(
    template: &EnemyTemplate,
    level: u32,
    encounter: u64,
    rng: &mut R,
    config: &EngineConfig,
) -> Enemy {
    let multiplier = level_multiplier(level, config);
    let scale = |value: u64| (value as f64 * multiplier).floor() as u64;

    let hp = scale(template.hp as u64);
    let attack = scale(template.attack as u64);
    let hp = vary(hp, rng.gen::<f64>(), config).max(1) as u32;
    let attack = vary(attack, rng.gen::<f64>(), config).max(1) as u32;

    Enemy {
        name: template.name.to_string(),
        sprite: template.sprite,
        hp,
        max_hp: hp,
        attack,
        base_attack: attack,
        defense: scale(template.defense as u64) as u32,
        experience_reward: scale(template.experience),
        gold_reward: scale(template.gold),
        is_boss: false,
        abilities: &[],
        required_level: None,
        encounter,
    }
}

/// Stat multiplier for regular enemies at `level`.
pub fn level_multiplier(level: u32, config: &EngineConfig) -> f64 {
    1.0 + level.saturating_sub(1) as f64 * config.enemy_level_scaling
}

/// Applies `floor(value * variation * (u - 0.5))` to `value`, `u` in [0, 1).
fn vary(value: u64, u: f64, config: &EngineConfig) -> u64 {
    let delta = (value as f64 * config.enemy_stat_variation * (u - 0.5)).floor() as i64;
    (value as i64 + delta).max(0) as u64
}

/// Closes the boss fight and raises the next boss threshold.
pub fn on_boss_defeated(boss_state: &mut BossState, config: &EngineConfig) {
    boss_state.is_boss_fight = false;
    boss_state.bosses_defeated += 1;
    boss_state.next_boss_level += config.boss_level_step;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_level_one_spawns_slime_without_variation() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut bosses = BossState::default();
        let enemy = generate_next(1, &mut bosses, 0, &mut rng, &EngineConfig::flat_damage());
        assert_eq!(enemy.name, "Slime");
        assert_eq!(enemy.hp, 50);
        assert_eq!(enemy.attack, 8);
        assert_eq!(enemy.defense, 0);
        assert_eq!(enemy.experience_reward, 20);
        assert!(!enemy.is_boss);
    }

    #[test]
    fn test_variation_stays_within_ten_percent() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let config = EngineConfig::default();
        for _ in 0..200 {
            let mut bosses = BossState::default();
            let enemy = generate_next(1, &mut bosses, 0, &mut rng, &config);
            assert!((45..=55).contains(&enemy.hp), "hp {}", enemy.hp);
            assert!(enemy.max_hp == enemy.hp);
        }
    }

    #[test]
    fn test_templates_advance_with_level() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let config = EngineConfig::flat_damage();
        let mut bosses = BossState {
            next_boss_level: u32::MAX,
            ..Default::default()
        };
        let names: Vec<String> = [1, 2, 3, 5, 7, 9, 30]
            .iter()
            .map(|level| generate_next(*level, &mut bosses, 0, &mut rng, &config).name)
            .collect();
        assert_eq!(
            names,
            vec!["Slime", "Slime", "Goblin", "Skeleton Warrior", "Orc", "Troll", "Troll"]
        );
    }

    #[test]
    fn test_level_scaling_applies_to_rewards() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut bosses = BossState {
            next_boss_level: u32::MAX,
            ..Default::default()
        };
        // level 3 -> Goblin at x1.2
        let enemy = generate_next(3, &mut bosses, 0, &mut rng, &EngineConfig::flat_damage());
        assert_eq!(enemy.hp, 96);
        assert_eq!(enemy.attack, 14);
        assert_eq!(enemy.defense, 2);
        assert_eq!(enemy.experience_reward, 42);
        assert_eq!(enemy.gold_reward, 14);
    }

    #[test]
    fn test_boss_threshold_spawns_indexed_boss() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let config = EngineConfig::default();
        let mut bosses = BossState::default();

        let boss = generate_next(5, &mut bosses, 7, &mut rng, &config);
        assert!(boss.is_boss);
        assert_eq!(boss.name, "Slime King");
        assert_eq!(boss.encounter, 7);
        assert!(bosses.is_boss_fight);

        // No second boss while one is active.
        let next = generate_next(5, &mut bosses, 8, &mut rng, &config);
        assert!(!next.is_boss);

        on_boss_defeated(&mut bosses, &config);
        assert_eq!(bosses.next_boss_level, 10);
        assert_eq!(bosses.bosses_defeated, 1);
        let boss = generate_next(10, &mut bosses, 9, &mut rng, &config);
        assert_eq!(boss.name, "Goblin Chieftain");
    }

    #[test]
    fn test_boss_index_clamps_to_last_template() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut bosses = BossState {
            bosses_defeated: 12,
            next_boss_level: 65,
            is_boss_fight: false,
        };
        let boss = generate_next(70, &mut bosses, 0, &mut rng, &EngineConfig::default());
        assert_eq!(boss.name, "Ancient Troll");
    }

    #[test]
    fn test_generation_is_reproducible() {
        let config = EngineConfig::default();
        let roll = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut bosses = BossState::default();
            (1..5)
                .map(|level| generate_next(level, &mut bosses, 0, &mut rng, &config))
                .collect::<Vec<_>>()
        };
        assert_eq!(roll(42), roll(42));
    }
}
