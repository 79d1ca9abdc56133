//! Integration test: turn resolution through the engine
//!
//! Drives `Engine::tick` on a simulated clock with the random damage bonus
//! and critical hits switched off, so every number below is exact.

use idle_arpg::combat::math::{absorb_with_shield, life_drain_heal};
use idle_arpg::core::balance::REVIVE_DELAY_MS;
use idle_arpg::enemies::{generate_next, BossState};
use idle_arpg::skills::SkillId;
use idle_arpg::{DamageKind, Engine, EngineConfig, GameError, GameEvent, GameRng, Target};
use rand::SeedableRng;

fn flat_engine(seed: u64) -> Engine {
    let mut engine = Engine::new(EngineConfig::flat_damage(), GameRng::seed_from_u64(seed));
    engine.state_mut().character.critical_rate = 0.0;
    engine
}

fn enemy_hits(events: &[GameEvent]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::DamageDealt {
                target: Target::Enemy,
                amount,
                ..
            } => Some(*amount),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Basic fight
// =============================================================================

#[test]
fn test_level_one_kills_slime_and_next_enemy_spawns() {
    let mut engine = flat_engine(1);

    let first = engine.tick(0);
    assert_eq!(
        first.events[0],
        GameEvent::EnemySpawned {
            name: "Slime".to_string(),
            hp: 50,
            is_boss: false,
        }
    );

    let mut hits = enemy_hits(&first.events);
    let mut defeated = None;
    for now in [1000, 2000, 3000, 4000, 5000] {
        let result = engine.tick(now);
        hits.extend(enemy_hits(&result.events));
        defeated = result.events.into_iter().find(|e| matches!(e, GameEvent::EnemyDefeated { .. }));
        if defeated.is_some() {
            break;
        }
    }

    assert_eq!(hits, vec![15, 17, 22]);
    assert_eq!(
        defeated,
        Some(GameEvent::EnemyDefeated {
            name: "Slime".to_string(),
            experience: 20,
            gold: 8,
            is_boss: false,
        })
    );

    let state = engine.state();
    assert_eq!(state.character.experience, 20);
    assert_eq!(state.combat_state.enemies_defeated, 1);
    assert_eq!(state.character.combo_count, 0);
    // two slime hits of max(1, 8 - 5)
    assert_eq!(state.character.hp, 144);
    assert!(state.current_enemy.is_none());

    // Respawn waits for its delay.
    let early = engine.tick(2500);
    assert!(!early.has(|e| matches!(e, GameEvent::EnemySpawned { .. })));
    let respawn = engine.tick(3000);
    assert!(respawn.has(|e| matches!(e, GameEvent::EnemySpawned { .. })));
    assert!(engine.state().current_enemy.is_some());
}

#[test]
fn test_damage_is_at_least_one_against_heavy_armor() {
    let mut engine = flat_engine(2);
    engine.tick(0);
    {
        let enemy = engine.state_mut().current_enemy.as_mut().unwrap();
        enemy.defense = 10_000;
        enemy.hp = 10_000;
        enemy.max_hp = 10_000;
    }
    let result = engine.tick(1000);
    assert_eq!(enemy_hits(&result.events), vec![1]);
}

#[test]
fn test_enemy_hit_is_at_least_one() {
    let mut engine = flat_engine(3);
    engine.state_mut().character.defense = 500;
    engine.tick(0);
    assert_eq!(engine.state().character.hp, 149);
}

// =============================================================================
// Defeat and revive
// =============================================================================

#[test]
fn test_defeat_waits_for_revive() {
    let mut engine = flat_engine(4);
    engine.state_mut().character.hp = 1;
    engine.state_mut().character.gold = 100;

    let result = engine.tick(0);
    assert!(result.has(|e| matches!(e, GameEvent::CharacterDefeated { .. })));
    assert_eq!(engine.state().character.hp, 0);
    assert!(engine.state().character.defeated);
    assert!(engine.is_revive_pending());
    assert_eq!(engine.state().combat_state.deaths, 1);

    assert_eq!(
        engine.use_skill(SkillId::Heal, 500).unwrap_err(),
        GameError::CharacterIncapacitated
    );

    for now in (1000..REVIVE_DELAY_MS).step_by(500) {
        let result = engine.tick(now);
        assert!(enemy_hits(&result.events).is_empty(), "attacked at {now}ms while defeated");
        assert_eq!(engine.state().character.hp, 0);
    }

    let revived = engine.tick(REVIVE_DELAY_MS);
    let revive_at = revived
        .events
        .iter()
        .position(|e| *e == GameEvent::CharacterRevived)
        .expect("revive fired");
    let attack_at = revived
        .events
        .iter()
        .position(|e| matches!(e, GameEvent::DamageDealt { target: Target::Enemy, .. }))
        .expect("attack after revive");
    assert!(revive_at < attack_at);
    assert!(!engine.state().character.defeated);
    assert!(!engine.is_revive_pending());
}

#[test]
fn test_revive_restores_full_hp() {
    let mut engine = flat_engine(5);
    engine.state_mut().character.hp = 1;
    engine.tick(0);
    engine.tick(REVIVE_DELAY_MS - 1);
    assert_eq!(engine.state().character.hp, 0);

    // Hold the next turn back so nothing hits after the revive.
    engine.state_mut().combat_state.last_turn_at = Some(REVIVE_DELAY_MS);
    let result = engine.tick(REVIVE_DELAY_MS);
    assert!(result.has(|e| *e == GameEvent::CharacterRevived));
    let character = &engine.state().character;
    assert_eq!(character.hp, character.max_hp);
}

// =============================================================================
// Bosses
// =============================================================================

#[test]
fn test_boss_spawns_at_threshold() {
    let mut engine = flat_engine(6);
    engine.state_mut().character.level = 5;

    let result = engine.tick(0);
    assert_eq!(
        result.events[0],
        GameEvent::EnemySpawned {
            name: "Slime King".to_string(),
            hp: 300,
            is_boss: true,
        }
    );
    assert!(engine.state().boss_state.is_boss_fight);
}

#[test]
fn test_boss_tier_follows_bosses_defeated() {
    let config = EngineConfig::default();
    let mut rng = GameRng::seed_from_u64(7);
    let mut boss_state = BossState {
        is_boss_fight: false,
        bosses_defeated: 2,
        next_boss_level: 15,
    };

    let boss = generate_next(15, &mut boss_state, 0, &mut rng, &config);
    assert!(boss.is_boss);
    assert_eq!(boss.name, "Skeleton Lord");
    assert_eq!(boss.required_level, Some(15));

    // Only one boss per fight.
    let next = generate_next(15, &mut boss_state, 1, &mut rng, &config);
    assert!(!next.is_boss);
}

#[test]
fn test_boss_kill_advances_threshold() {
    let mut engine = flat_engine(8);
    engine.state_mut().character.level = 5;
    engine.tick(0);
    engine.state_mut().current_enemy.as_mut().unwrap().hp = 1;

    let result = engine.tick(1000);
    assert!(result.has(|e| matches!(e, GameEvent::EnemyDefeated { is_boss: true, .. })));
    assert!(result.has(|e| matches!(e, GameEvent::AchievementUnlocked { name: "Boss Slayer", .. })));

    let boss_state = &engine.state().boss_state;
    assert!(!boss_state.is_boss_fight);
    assert_eq!(boss_state.bosses_defeated, 1);
    assert_eq!(boss_state.next_boss_level, 10);
}

// =============================================================================
// Effects in combat
// =============================================================================

#[test]
fn test_life_drain_share() {
    assert_eq!(life_drain_heal(40, 0.3, 100, 150), 12);
    assert_eq!(life_drain_heal(40, 0.3, 145, 150), 5);
    assert_eq!(life_drain_heal(40, 0.3, 150, 150), 0);
}

#[test]
fn test_life_drain_heals_during_turn() {
    let mut engine = flat_engine(9);
    {
        let character = &mut engine.state_mut().character;
        character.gold = 18;
        character.attack = 40;
        character.hp = 100;
    }
    engine.use_skill(SkillId::LifeDrain, 0).unwrap();

    let result = engine.tick(0);
    assert!(result.has(|e| *e
        == GameEvent::DamageDealt {
            target: Target::Character,
            amount: 12,
            kind: DamageKind::Heal,
        }));
    // +12 drained, -3 from the slime
    assert_eq!(engine.state().character.hp, 109);
}

#[test]
fn test_shield_absorbs_before_hp() {
    let mut engine = flat_engine(10);
    engine.state_mut().character.gold = 12;
    engine.use_skill(SkillId::Shield, 0).unwrap();
    assert_eq!(engine.state().character.shield_points, 50);

    let result = engine.tick(0);
    assert!(result.has(|e| *e
        == GameEvent::DamageDealt {
            target: Target::Character,
            amount: 3,
            kind: DamageKind::ShieldAbsorb,
        }));
    assert_eq!(engine.state().character.shield_points, 47);
    assert_eq!(engine.state().character.hp, 150);
}

#[test]
fn test_shield_split_adds_up() {
    for (incoming, pool) in [(0, 0), (5, 10), (10, 10), (25, 10), (7, 0)] {
        let mut shield = pool;
        let split = absorb_with_shield(incoming, &mut shield);
        assert_eq!(split.absorbed + split.residual, incoming);
        assert_eq!(shield, pool - split.absorbed);
    }
}

#[test]
fn test_out_of_order_tick_does_nothing() {
    let mut engine = flat_engine(11);
    engine.tick(3000);
    let before = engine.state().clone();
    let result = engine.tick(2000);
    assert!(result.events.is_empty());
    assert_eq!(engine.state(), &before);
}
