//! The engine: owns the game state and drives it from a host clock.
//!
//! Each [`Engine::tick`] runs, in order: due deferred tasks, effect expiry,
//! enemy spawning, one combat turn when the interval has elapsed, then the
//! post-turn hooks (survivor check, achievements, save checkpoint).
//! Skills and upgrades are commands applied between ticks.

use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::character::{self, Attribute};
use crate::combat::logic::{on_enemy_defeated, resolve_turn, strike_enemy, CombatEvent, EnemyDefeat};
use crate::core::config::EngineConfig;
use crate::core::error::GameError;
use crate::core::events::{DamageKind, GameEvent, Target};
use crate::core::game_loop::{GameLoop, TickResult};
use crate::core::game_state::GameState;
use crate::core::scheduler::{DeferredTask, TaskId, TaskQueue};
use crate::effects::EffectKind;
use crate::enemies::generate_next;
use crate::save::SaveState;
use crate::skills::logic::{begin_cast, chain_followups, check_cast, roll_cast, upgrade};
use crate::skills::{SkillCast, SkillId, SkillPower};

/// Default engine RNG. Seedable, so runs are reproducible.
pub type GameRng = ChaCha8Rng;

/// A successful skill cast and the events it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CastOutcome {
    pub cast: SkillCast,
    pub events: Vec<GameEvent>,
}

pub struct Engine<R: Rng = GameRng> {
    state: GameState,
    config: EngineConfig,
    rng: R,
    tasks: TaskQueue,
    /// Chain hops still queued for the current encounter.
    chain_hops: Vec<TaskId>,
    /// Events raised outside a tick (load diagnostics), returned by the next tick.
    pending_events: Vec<GameEvent>,
    last_tick: Option<u64>,
    /// State changed since the last checkpoint.
    dirty: bool,
}

impl Engine<GameRng> {
    /// Engine with default config and a seeded RNG.
    pub fn seeded(seed: u64) -> Self {
        Self::new(EngineConfig::default(), GameRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    pub fn new(config: EngineConfig, rng: R) -> Self {
        let state = GameState::new(&config);
        Self {
            state,
            config,
            rng,
            tasks: TaskQueue::new(),
            chain_hops: Vec::new(),
            pending_events: Vec::new(),
            last_tick: None,
            dirty: false,
        }
    }

    /// Restores an engine from a save record. The enemy and any pending
    /// tasks are not part of the record; a new enemy spawns on the first tick.
    pub fn from_save(record: SaveState, config: EngineConfig, rng: R) -> Self {
        let mut engine = Self::new(config, rng);
        engine.state = record.into_game_state();
        info!(
            "loaded save: level {}, {} gold, {} bosses defeated",
            engine.state.character.level,
            engine.state.character.gold,
            engine.state.boss_state.bosses_defeated
        );
        engine
    }

    /// Restores from JSON, falling back to a fresh game when the record is
    /// corrupt. The fallback is reported as a `Diagnostic` event on the next tick.
    pub fn from_save_json(json: &str, config: EngineConfig, rng: R) -> Self {
        match SaveState::from_json(json) {
            Ok(record) => Self::from_save(record, config, rng),
            Err(err) => Self::after_failed_load(err.to_string(), config, rng),
        }
    }

    /// Fresh game for a host whose save could not be read. `reason` is
    /// reported as a `Diagnostic` event on the first tick.
    pub fn after_failed_load(reason: impl Into<String>, config: EngineConfig, rng: R) -> Self {
        let reason = reason.into();
        warn!("{reason}; starting a new game");
        let mut engine = Self::new(config, rng);
        engine.pending_events.push(GameEvent::Diagnostic {
            message: format!("{reason}; started a new game"),
        });
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Snapshot for persistence.
    pub fn save_state(&self, now: u64) -> SaveState {
        SaveState::capture(&self.state, now)
    }

    /// Number of deferred tasks waiting to fire.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_revive_pending(&self) -> bool {
        self.tasks.has_pending(|t| *t == DeferredTask::Revive)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    // ── Tick ────────────────────────────────────────────────────

    /// Advances the engine to `now` (ms). A `now` earlier than the previous
    /// tick is ignored with a warning.
    pub fn tick(&mut self, now: u64) -> TickResult {
        self.run_tick(now)
    }

    fn run_tick(&mut self, now: u64) -> TickResult {
        let mut events = std::mem::take(&mut self.pending_events);

        if let Some(last) = self.last_tick {
            if now < last {
                warn!("ignoring out-of-order tick at {now}ms (last tick at {last}ms)");
                return TickResult {
                    events,
                    turn_resolved: false,
                };
            }
        }
        self.last_tick = Some(now);

        while let Some((fire_at, task)) = self.tasks.pop_due(now) {
            debug!("firing {task:?} scheduled for {fire_at}ms");
            self.run_task(task, now, &mut events);
        }

        let ended = self
            .state
            .combat_state
            .effects
            .expire(now, &mut self.state.character);
        events.extend(ended.into_iter().map(|kind| GameEvent::EffectEnded { kind }));

        let spawn_pending = self.tasks.has_pending(|t| *t == DeferredTask::SpawnEnemy);
        if self.state.current_enemy.is_none() && !spawn_pending {
            self.spawn_enemy(&mut events);
        }

        let mut turn_resolved = false;
        if self
            .state
            .combat_state
            .turn_ready(now, self.config.turn_interval_ms)
        {
            let outcome = resolve_turn(&mut self.state, now, &mut self.rng, &self.config);
            self.apply_combat_events(outcome, now, &mut events);
            turn_resolved = true;

            let close_call = self.state.is_close_call(&self.config);
            self.evaluate_achievements(close_call, &mut events);
        }

        self.finish(&events);
        if self.dirty {
            events.push(GameEvent::SaveCheckpoint);
            self.dirty = false;
        }

        TickResult {
            events,
            turn_resolved,
        }
    }

    fn run_task(&mut self, task: DeferredTask, now: u64, events: &mut Vec<GameEvent>) {
        match task {
            DeferredTask::SpawnEnemy => {
                if self.state.current_enemy.is_none() {
                    self.spawn_enemy(events);
                }
            }
            DeferredTask::Revive => {
                let character = &mut self.state.character;
                if character.defeated || character.hp == 0 {
                    character.hp = character.max_hp;
                    character.defeated = false;
                    info!("character revived at {} hp", character.hp);
                    events.push(GameEvent::CharacterRevived);
                }
            }
            DeferredTask::ChainHit {
                encounter,
                damage,
                hop,
            } => {
                let same_target = self
                    .state
                    .living_enemy()
                    .is_some_and(|e| e.encounter == encounter);
                if !same_target {
                    debug!("chain hop {hop} fizzled, encounter {encounter} is over");
                    return;
                }
                if let Some(dealt) = strike_enemy(&mut self.state, damage) {
                    events.push(GameEvent::DamageDealt {
                        target: Target::Enemy,
                        amount: dealt,
                        kind: DamageKind::Skill,
                    });
                }
                if let Some(defeat) = on_enemy_defeated(&mut self.state, &self.config) {
                    self.handle_enemy_defeat(defeat, now, events);
                }
            }
        }
    }

    fn spawn_enemy(&mut self, events: &mut Vec<GameEvent>) {
        let encounter = self.state.combat_state.encounters_spawned;
        self.state.combat_state.encounters_spawned += 1;
        let enemy = generate_next(
            self.state.character.level,
            &mut self.state.boss_state,
            encounter,
            &mut self.rng,
            &self.config,
        );
        if enemy.is_boss {
            info!("boss {} appears (level {})", enemy.name, self.state.character.level);
        } else {
            info!("{} appears with {} hp", enemy.name, enemy.hp);
        }
        events.push(GameEvent::EnemySpawned {
            name: enemy.name.clone(),
            hp: enemy.hp,
            is_boss: enemy.is_boss,
        });
        self.state.current_enemy = Some(enemy);
    }

    fn apply_combat_events(&mut self, outcome: Vec<CombatEvent>, now: u64, events: &mut Vec<GameEvent>) {
        for event in outcome {
            match event {
                CombatEvent::PlayerAttack { damage, was_crit } => events.push(GameEvent::DamageDealt {
                    target: Target::Enemy,
                    amount: damage,
                    kind: if was_crit {
                        DamageKind::Critical
                    } else {
                        DamageKind::Normal
                    },
                }),
                CombatEvent::ComboExtended { combo } => events.push(GameEvent::ComboExtended { combo }),
                CombatEvent::LifeDrained { healed } => events.push(GameEvent::DamageDealt {
                    target: Target::Character,
                    amount: healed,
                    kind: DamageKind::Heal,
                }),
                CombatEvent::EnemyDied(defeat) => self.handle_enemy_defeat(defeat, now, events),
                CombatEvent::EnemyAttack { damage } => events.push(GameEvent::DamageDealt {
                    target: Target::Character,
                    amount: damage,
                    kind: DamageKind::Normal,
                }),
                CombatEvent::BossAbility { ability, amount } => {
                    let boss = self
                        .state
                        .current_enemy
                        .as_ref()
                        .map(|e| e.name.clone())
                        .unwrap_or_default();
                    events.push(GameEvent::BossAbilityUsed {
                        boss,
                        ability,
                        amount,
                    });
                }
                CombatEvent::ShieldAbsorbed { amount } => events.push(GameEvent::DamageDealt {
                    target: Target::Character,
                    amount,
                    kind: DamageKind::ShieldAbsorb,
                }),
                CombatEvent::ShieldBroken => events.push(GameEvent::EffectEnded {
                    kind: EffectKind::Shield,
                }),
                CombatEvent::PlayerDied { by } => {
                    if !self.is_revive_pending() {
                        self.tasks
                            .schedule(now + self.config.revive_delay_ms, DeferredTask::Revive);
                    }
                    events.push(GameEvent::CharacterDefeated { by });
                }
            }
        }
    }

    fn handle_enemy_defeat(&mut self, defeat: EnemyDefeat, now: u64, events: &mut Vec<GameEvent>) {
        info!(
            "{} defeated: +{} xp, +{} gold",
            defeat.name, defeat.experience, defeat.gold
        );
        events.push(GameEvent::EnemyDefeated {
            name: defeat.name,
            experience: defeat.experience,
            gold: defeat.gold,
            is_boss: defeat.is_boss,
        });
        let tasks = &mut self.tasks;
        let cancelled = self.chain_hops.drain(..).filter(|id| tasks.cancel(*id)).count();
        if cancelled > 0 {
            debug!("cancelled {cancelled} chain hops, target is gone");
        }
        for level in defeat.levels {
            info!("reached level {level}");
            events.push(GameEvent::LeveledUp { level });
        }
        self.tasks.schedule(
            now + self.config.enemy_respawn_delay_ms,
            DeferredTask::SpawnEnemy,
        );
    }

    fn evaluate_achievements(&mut self, close_call: bool, events: &mut Vec<GameEvent>) {
        let snapshot = self.state.achievement_snapshot(close_call);
        let unlocked = self
            .state
            .achievements
            .evaluate(&snapshot, &mut self.state.character);
        for def in unlocked {
            info!("achievement unlocked: {}", def.name);
            events.push(GameEvent::AchievementUnlocked {
                id: def.id,
                name: def.name,
                gold: def.reward_gold,
                upgrade_points: def.reward_upgrade_points,
            });
        }
    }

    /// Marks the state dirty and records loggable events in the battle log.
    fn finish(&mut self, events: &[GameEvent]) {
        for event in events.iter() {
            if event.is_loggable() {
                self.dirty = true;
                self.state.add_log_line(event.to_string());
            }
        }
    }

    // ── Commands ────────────────────────────────────────────────

    /// Casts a skill at `now`.
    ///
    /// Fails without changing anything when the skill is cooling down, the
    /// character cannot pay, is defeated, or the skill needs a target and
    /// there is none.
    pub fn use_skill(&mut self, id: SkillId, now: u64) -> Result<CastOutcome, GameError> {
        check_cast(
            &self.state.skills,
            &self.state.character,
            id,
            now,
            self.state.has_living_enemy(),
        )?;
        begin_cast(&mut self.state.skills, &mut self.state.character, id, now);
        let cast = roll_cast(&self.state.skills, id, &mut self.rng);
        debug!("cast {id} ({:?}), rolled {}", cast.power, cast.amount);

        let mut events = vec![GameEvent::SkillCast {
            skill: id,
            amount: cast.amount,
        }];
        match cast.power {
            SkillPower::Damage { .. } => {
                self.skill_strike(cast.amount, now, &mut events);
            }
            SkillPower::Heal { .. } => {
                let healed = self.state.character.heal(cast.amount);
                events.push(GameEvent::DamageDealt {
                    target: Target::Character,
                    amount: healed,
                    kind: DamageKind::Heal,
                });
            }
            SkillPower::CritMultiplier(multiplier) => {
                self.start_effect(EffectKind::GuaranteedCritical, multiplier, None, &mut events);
            }
            SkillPower::Chain {
                hits,
                decay,
                interval_ms,
                ..
            } => {
                let encounter = self.state.living_enemy().map(|e| e.encounter);
                let tasks = &self.tasks;
                self.chain_hops.retain(|id| tasks.is_scheduled(*id));
                for (i, damage) in chain_followups(cast.amount, hits, decay).into_iter().enumerate() {
                    let hop = i as u32 + 1;
                    if let Some(encounter) = encounter {
                        let id = self.tasks.schedule(
                            now + interval_ms * hop as u64,
                            DeferredTask::ChainHit {
                                encounter,
                                damage,
                                hop,
                            },
                        );
                        self.chain_hops.push(id);
                    }
                }
                self.skill_strike(cast.amount, now, &mut events);
            }
            SkillPower::Shield {
                points,
                duration_ms,
            } => {
                self.state.character.shield_points = points;
                self.start_effect(
                    EffectKind::Shield,
                    points as f64,
                    Some(now + duration_ms),
                    &mut events,
                );
            }
            SkillPower::Buff {
                effect,
                magnitude,
                duration_ms,
            } => {
                self.start_effect(effect, magnitude, Some(now + duration_ms), &mut events);
            }
        }

        self.finish(&events);
        Ok(CastOutcome { cast, events })
    }

    fn skill_strike(&mut self, amount: u32, now: u64, events: &mut Vec<GameEvent>) {
        if let Some(dealt) = strike_enemy(&mut self.state, amount) {
            events.push(GameEvent::DamageDealt {
                target: Target::Enemy,
                amount: dealt,
                kind: DamageKind::Skill,
            });
        }
        if let Some(defeat) = on_enemy_defeated(&mut self.state, &self.config) {
            self.handle_enemy_defeat(defeat, now, events);
        }
    }

    fn start_effect(
        &mut self,
        kind: EffectKind,
        magnitude: f64,
        expires_at: Option<u64>,
        events: &mut Vec<GameEvent>,
    ) {
        self.state
            .combat_state
            .effects
            .apply(kind, magnitude, expires_at);
        events.push(GameEvent::EffectStarted { kind, expires_at });
    }

    /// Spends upgrade points on a skill level.
    pub fn upgrade_skill(&mut self, id: SkillId) -> Result<Vec<GameEvent>, GameError> {
        let level = upgrade(&mut self.state.skills, &mut self.state.character, id)?;
        info!("{id} upgraded to level {level}");
        let mut events = vec![GameEvent::SkillUpgraded { skill: id, level }];
        self.evaluate_achievements(false, &mut events);
        self.finish(&events);
        Ok(events)
    }

    /// Spends one upgrade point on a base attribute.
    pub fn upgrade_attribute(&mut self, attribute: Attribute) -> Result<Vec<GameEvent>, GameError> {
        let value = character::upgrade_attribute(&mut self.state.character, attribute)?;
        let events = vec![GameEvent::AttributeUpgraded { attribute, value }];
        self.finish(&events);
        Ok(events)
    }

    /// Cancels every pending task and starts over from a fresh state.
    pub fn reset_game(&mut self) -> Vec<GameEvent> {
        self.tasks.cancel_all();
        self.chain_hops.clear();
        self.pending_events.clear();
        self.state = GameState::new(&self.config);
        info!("game reset");
        let events = vec![GameEvent::GameReset];
        self.finish(&events);
        events
    }
}

impl<R: Rng> GameLoop for Engine<R> {
    fn tick(&mut self, now: u64) -> TickResult {
        self.run_tick(now)
    }

    fn reset(&mut self) -> Vec<GameEvent> {
        self.reset_game()
    }

    fn state(&self) -> &GameState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
