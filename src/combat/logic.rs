//! Turn resolution: the player's attack, enemy death, and the counter-attack.
//!
//! These functions mutate [`GameState`] and report what happened as
//! [`CombatEvent`]s. Scheduling follow-ups (respawn, revive) is left to the
//! engine, which owns the task queue.

use rand::Rng;

use super::math::{
    absorb_with_shield, apply_multiplier, combo_multiplier, enemy_hit, life_drain_heal, mitigate,
    roll_crit,
};
use crate::character::gain_experience;
use crate::core::balance::{BOSS_ENRAGE_CAP, BOSS_ENRAGE_MULTIPLIER};
use crate::core::config::EngineConfig;
use crate::core::game_state::GameState;
use crate::effects::EffectKind;
use crate::enemies::{on_boss_defeated, AbilityKind};
use crate::skills::data::crit_multiplier;
use crate::skills::SkillId;

/// Rewards of a kill, after they have been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyDefeat {
    pub name: String,
    pub experience: u64,
    pub gold: u64,
    pub is_boss: bool,
    /// Levels reached from the experience, in order.
    pub levels: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    PlayerAttack {
        damage: u32,
        was_crit: bool,
    },
    ComboExtended {
        combo: u32,
    },
    LifeDrained {
        healed: u32,
    },
    EnemyDied(EnemyDefeat),
    EnemyAttack {
        damage: u32,
    },
    BossAbility {
        ability: &'static str,
        amount: u32,
    },
    ShieldAbsorbed {
        amount: u32,
    },
    ShieldBroken,
    PlayerDied {
        by: String,
    },
}

/// Resolves one combat turn at `now`.
///
/// Stamps the turn even when nothing can happen (defeated character or no
/// living enemy), so turns stay on the interval grid.
pub fn resolve_turn<R: Rng>(
    state: &mut GameState,
    now: u64,
    rng: &mut R,
    config: &EngineConfig,
) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    state.combat_state.turn += 1;
    state.combat_state.last_turn_at = Some(now);

    if !state.character.is_alive() || !state.has_living_enemy() {
        return events;
    }

    player_attack(state, now, rng, config, &mut events);

    if let Some(defeat) = on_enemy_defeated(state, config) {
        // A dead enemy does not strike back.
        events.push(CombatEvent::EnemyDied(defeat));
        return events;
    }

    enemy_attack(state, rng, config, &mut events);
    events
}

fn player_attack<R: Rng>(
    state: &mut GameState,
    now: u64,
    rng: &mut R,
    config: &EngineConfig,
    events: &mut Vec<CombatEvent>,
) {
    let crit_level = state.skills.level(SkillId::CriticalStrike);
    let character = &mut state.character;
    let combat = &mut state.combat_state;
    let Some(enemy) = state.current_enemy.as_mut() else {
        return;
    };

    let bonus = roll_range(rng, config.player_damage_bonus_min, config.player_damage_bonus_max);
    let mut damage = character.attack.saturating_add(bonus);
    damage = apply_multiplier(damage, combo_multiplier(character.combo_count, config));

    let berserk = combat.effects.is_active(EffectKind::Berserk, now);
    if berserk {
        damage = apply_multiplier(damage, config.berserk_damage_multiplier);
    }

    let guaranteed = combat.effects.consume(EffectKind::GuaranteedCritical).is_some();
    let crit_chance = character.critical_rate + if berserk { config.berserk_crit_bonus } else { 0.0 };
    let was_crit = guaranteed || roll_crit(crit_chance, rng);
    if was_crit {
        damage = apply_multiplier(damage, crit_multiplier(crit_level));
    }

    let in_window = combat
        .last_attack_at
        .is_some_and(|last| now.saturating_sub(last) < config.combo_window_ms);
    if in_window {
        character.extend_combo();
        events.push(CombatEvent::ComboExtended {
            combo: character.combo_count,
        });
        if character.combo_count >= config.combo_streak_threshold {
            damage = apply_multiplier(damage, config.combo_streak_multiplier);
        }
    } else {
        character.reset_combo(1);
    }
    combat.last_attack_at = Some(now);

    let final_damage = mitigate(damage, enemy.defense);
    enemy.take_damage(final_damage);
    events.push(CombatEvent::PlayerAttack {
        damage: final_damage,
        was_crit,
    });
    log::debug!(
        "turn {}: hit {} for {} (crit: {}), {} hp left",
        combat.turn,
        enemy.name,
        final_damage,
        was_crit,
        enemy.hp
    );

    if let Some(fraction) = combat.effects.magnitude(EffectKind::LifeDrain, now) {
        let healed = life_drain_heal(final_damage, fraction, character.hp, character.max_hp);
        if healed > 0 {
            character.heal(healed);
            events.push(CombatEvent::LifeDrained { healed });
        }
    }
}

/// Deals direct skill damage to the living enemy. Ignores defense, never below 1.
///
/// Returns the damage dealt, or None without a living enemy.
pub fn strike_enemy(state: &mut GameState, amount: u32) -> Option<u32> {
    let enemy = state.current_enemy.as_mut().filter(|e| e.is_alive())?;
    let damage = amount.max(1);
    enemy.take_damage(damage);
    Some(damage)
}

/// Pays out and removes the current enemy if it is dead.
///
/// Grants experience (resolving level-ups) and gold, counts the kill,
/// advances the boss state for bosses and resets the combo.
pub fn on_enemy_defeated(state: &mut GameState, config: &EngineConfig) -> Option<EnemyDefeat> {
    if !state.current_enemy.as_ref().is_some_and(|e| !e.is_alive()) {
        return None;
    }
    let enemy = state.current_enemy.take()?;

    let levels = gain_experience(&mut state.character, enemy.experience_reward, config);
    state.character.gold += enemy.gold_reward;
    state.character.reset_combo(0);
    state.combat_state.enemies_defeated += 1;
    if enemy.is_boss {
        on_boss_defeated(&mut state.boss_state, config);
        log::info!(
            "boss {} defeated, next boss at level {}",
            enemy.name,
            state.boss_state.next_boss_level
        );
    }

    Some(EnemyDefeat {
        name: enemy.name,
        experience: enemy.experience_reward,
        gold: enemy.gold_reward,
        is_boss: enemy.is_boss,
        levels,
    })
}

fn enemy_attack<R: Rng>(
    state: &mut GameState,
    rng: &mut R,
    config: &EngineConfig,
    events: &mut Vec<CombatEvent>,
) {
    let Some(enemy) = state.current_enemy.as_mut() else {
        return;
    };

    let ability = if enemy.is_boss
        && !enemy.abilities.is_empty()
        && rng.gen_bool(config.boss_ability_chance.clamp(0.0, 1.0))
    {
        Some(enemy.abilities[rng.gen_range(0..enemy.abilities.len())])
    } else {
        None
    };

    let incoming = match ability {
        Some(ability) => match ability.kind {
            AbilityKind::Strike { base, spread } => {
                let amount = base + rng.gen_range(0..=spread);
                events.push(CombatEvent::BossAbility {
                    ability: ability.name,
                    amount,
                });
                amount
            }
            AbilityKind::Mend { base, spread } => {
                let healed = enemy.heal(base + rng.gen_range(0..=spread));
                events.push(CombatEvent::BossAbility {
                    ability: ability.name,
                    amount: healed,
                });
                return;
            }
            AbilityKind::Enrage => {
                let cap = apply_multiplier(enemy.base_attack, BOSS_ENRAGE_CAP);
                let raised = apply_multiplier(enemy.attack, BOSS_ENRAGE_MULTIPLIER).min(cap);
                enemy.attack = enemy.attack.max(raised);
                events.push(CombatEvent::BossAbility {
                    ability: ability.name,
                    amount: enemy.attack,
                });
                return;
            }
        },
        None => {
            let bonus = roll_range(rng, 0, config.enemy_damage_bonus_max);
            enemy_hit(enemy.attack, bonus, state.character.defense)
        }
    };

    let by = enemy.name.clone();
    take_hit(state, incoming, by, events);
}

/// Routes an incoming hit through the shield and into hp, handling defeat.
fn take_hit(state: &mut GameState, incoming: u32, by: String, events: &mut Vec<CombatEvent>) {
    let character = &mut state.character;
    let effects = &mut state.combat_state.effects;

    let had_shield = character.shield_points > 0;
    let split = absorb_with_shield(incoming, &mut character.shield_points);
    if split.absorbed > 0 {
        events.push(CombatEvent::ShieldAbsorbed {
            amount: split.absorbed,
        });
    }
    if had_shield && character.shield_points == 0 {
        effects.consume(EffectKind::Shield);
        events.push(CombatEvent::ShieldBroken);
    }

    if split.residual > 0 {
        let lost = character.take_damage(split.residual);
        events.push(CombatEvent::EnemyAttack { damage: lost });
    }

    if character.hp == 0 && !character.defeated {
        character.defeated = true;
        character.reset_combo(0);
        effects.consume(EffectKind::GuaranteedCritical);
        state.combat_state.deaths += 1;
        log::info!("character defeated by {by}");
        events.push(CombatEvent::PlayerDied { by });
    }
}

fn roll_range<R: Rng>(rng: &mut R, min: u32, max: u32) -> u32 {
    if min >= max {
        min
    } else {
        rng.gen_range(min..=max)
    }
}
