//! Simulation runner.
//!
//! Each run owns an [`Engine`] with its own seeded RNG and advances it on a
//! simulated clock. An auto-player spends upgrade points and casts skills
//! between ticks the way an attentive player would. Statistics are gathered
//! from the returned events only.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::character::Attribute;
use crate::core::engine::{Engine, GameRng};
use crate::core::events::GameEvent;
use crate::skills::{skill_def, SkillId};
use rand::SeedableRng;

/// Simulated time between two engine ticks.
const TICK_STEP_MS: u64 = 250;

/// Skills the auto-player levels first.
const UPGRADE_PRIORITY: [SkillId; 7] = [
    SkillId::Fireball,
    SkillId::Heal,
    SkillId::Shield,
    SkillId::LightningChain,
    SkillId::CriticalStrike,
    SkillId::Berserk,
    SkillId::LifeDrain,
];

/// Heal below this share of max hp.
const HEAL_THRESHOLD: f64 = 0.4;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let rng = match config.seed {
            Some(seed) => GameRng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => GameRng::from_entropy(),
        };

        let run = simulate_single_run(config, rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Level {}, Kills {}, Boss Kills {}, Deaths {}, Casts {}",
                run_idx + 1,
                config.num_runs,
                run.final_level,
                run.kills,
                run.boss_kills,
                run.deaths,
                run.casts
            );
        }
        all_runs.push(run);
    }

    SimReport::from_runs(all_runs, config)
}

/// Plays one run to the configured duration.
pub fn simulate_single_run(config: &SimConfig, rng: GameRng) -> RunStats {
    let mut engine = Engine::new(config.engine.clone(), rng);
    let mut stats = RunStats::default();
    let end = config.duration_ms();

    let mut now = 0;
    while now <= end {
        let result = engine.tick(now);
        stats.record(&result.events, now);

        auto_upgrade(&mut engine, config.use_skills, &mut stats, now);
        if config.use_skills {
            auto_cast(&mut engine, now, &mut stats);
        }

        now += TICK_STEP_MS;
    }

    let character = &engine.state().character;
    stats.final_level = character.level;
    stats.final_gold = character.gold;
    stats.max_combo = character.max_combo_seen;
    stats.simulated_ms = end;
    stats
}

/// Spends upgrade points: skills first, attributes once no skill is left to
/// level (or skills are disabled).
fn auto_upgrade(engine: &mut Engine, use_skills: bool, stats: &mut RunStats, now: u64) {
    loop {
        let state = engine.state();
        let points = state.character.upgrade_points;
        let level = state.character.level;
        if points == 0 {
            return;
        }

        if use_skills {
            let upgradable: Vec<SkillId> = UPGRADE_PRIORITY
                .iter()
                .copied()
                .filter(|id| state.skills.level(*id) < skill_def(*id).max_level)
                .collect();
            if let Some(id) = upgradable
                .iter()
                .copied()
                .find(|id| skill_def(*id).upgrade_cost <= points)
            {
                if let Ok(events) = engine.upgrade_skill(id) {
                    stats.record(&events, now);
                    continue;
                }
                return;
            }
            if !upgradable.is_empty() {
                // saving up for the next skill level
                return;
            }
        }

        let attribute = Attribute::ALL[level as usize % Attribute::ALL.len()];
        match engine.upgrade_attribute(attribute) {
            Ok(events) => stats.record(&events, now),
            Err(_) => return,
        }
    }
}

/// Casts whatever is useful right now. Failed casts change nothing and are
/// simply skipped.
fn auto_cast(engine: &mut Engine, now: u64, stats: &mut RunStats) {
    let state = engine.state();
    let character = &state.character;
    if !character.is_alive() {
        return;
    }

    let mut wanted = Vec::new();
    if (character.hp as f64) < character.max_hp as f64 * HEAL_THRESHOLD {
        wanted.push(SkillId::Heal);
    }
    if let Some(enemy) = state.living_enemy() {
        if enemy.is_boss {
            wanted.push(SkillId::Shield);
            wanted.push(SkillId::Berserk);
        }
        if character.hp < character.max_hp {
            wanted.push(SkillId::LifeDrain);
        }
        wanted.push(SkillId::CriticalStrike);
        wanted.push(SkillId::LightningChain);
        wanted.push(SkillId::Fireball);
    }

    for id in wanted {
        if let Ok(outcome) = engine.use_skill(id, now) {
            stats.casts += 1;
            stats.record(&outcome.events, now);
        }
    }
}

impl RunStats {
    /// Accumulates counters from a batch of engine events.
    fn record(&mut self, events: &[GameEvent], now: u64) {
        for event in events {
            match event {
                GameEvent::EnemyDefeated { gold, is_boss, .. } => {
                    self.kills += 1;
                    self.gold_earned += gold;
                    if *is_boss {
                        self.boss_kills += 1;
                    }
                }
                GameEvent::CharacterDefeated { .. } => self.deaths += 1,
                GameEvent::LeveledUp { level } => {
                    self.level_reached_at_ms.entry(*level).or_insert(now);
                }
                GameEvent::AchievementUnlocked { id, gold, .. } => {
                    self.gold_earned += gold;
                    self.achievements.push(*id);
                }
                GameEvent::SkillUpgraded { .. } => self.skill_upgrades += 1,
                _ => {}
            }
        }
    }
}
