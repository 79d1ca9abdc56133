//! Pure combat math shared by the turn resolver, skills and the simulator.
//!
//! Every multiply floors. Percentage effects apply to the already floored
//! prior value.

use rand::Rng;

use crate::core::config::EngineConfig;

/// Damage multiplier granted by the current combo.
pub fn combo_multiplier(combo: u32, config: &EngineConfig) -> f64 {
    1.0 + (combo as f64 * config.combo_step).min(config.combo_cap)
}

/// `floor(value * multiplier)`, saturating at `u32::MAX`.
pub fn apply_multiplier(value: u32, multiplier: f64) -> u32 {
    let scaled = (value as f64 * multiplier).floor();
    if scaled >= u32::MAX as f64 {
        u32::MAX
    } else {
        scaled.max(0.0) as u32
    }
}

/// Damage after defense. Never below 1.
pub fn mitigate(raw: u32, defense: u32) -> u32 {
    raw.saturating_sub(defense).max(1)
}

/// How an incoming hit was split between the shield pool and hp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShieldAbsorb {
    pub absorbed: u32,
    pub residual: u32,
}

/// Drains the shield pool first and returns what is left for hp.
///
/// `absorbed + residual` always equals `incoming`.
pub fn absorb_with_shield(incoming: u32, shield_points: &mut u32) -> ShieldAbsorb {
    let absorbed = incoming.min(*shield_points);
    *shield_points -= absorbed;
    ShieldAbsorb {
        absorbed,
        residual: incoming - absorbed,
    }
}

/// Healing from life drain for a hit of `damage`, capped by missing hp.
pub fn life_drain_heal(damage: u32, fraction: f64, hp: u32, max_hp: u32) -> u32 {
    apply_multiplier(damage, fraction).min(max_hp.saturating_sub(hp))
}

/// Rolls a critical hit. `chance` is a probability in [0, 1].
pub fn roll_crit(chance: f64, rng: &mut impl Rng) -> bool {
    rng.gen::<f64>() < chance
}

/// A plain enemy hit: `max(1, attack + bonus - defense)`.
pub fn enemy_hit(attack: u32, bonus: u32, defense: u32) -> u32 {
    mitigate(attack.saturating_add(bonus), defense)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_combo_multiplier_caps() {
        let config = EngineConfig::default();
        assert_eq!(combo_multiplier(0, &config), 1.0);
        assert!((combo_multiplier(2, &config) - 1.3).abs() < 1e-9);
        assert_eq!(combo_multiplier(50, &config), 3.0);
    }

    #[test]
    fn test_apply_multiplier_floors() {
        assert_eq!(apply_multiplier(17, 1.8), 30);
        assert_eq!(apply_multiplier(10, 1.15), 11);
        assert_eq!(apply_multiplier(u32::MAX, 2.0), u32::MAX);
    }

    #[test]
    fn test_mitigate_never_below_one() {
        assert_eq!(mitigate(20, 5), 15);
        assert_eq!(mitigate(3, 50), 1);
        assert_eq!(mitigate(0, 0), 1);
    }

    #[test]
    fn test_shield_absorbs_before_hp() {
        let mut shield = 30;
        assert_eq!(
            absorb_with_shield(12, &mut shield),
            ShieldAbsorb {
                absorbed: 12,
                residual: 0
            }
        );
        assert_eq!(shield, 18);
        assert_eq!(
            absorb_with_shield(25, &mut shield),
            ShieldAbsorb {
                absorbed: 18,
                residual: 7
            }
        );
        assert_eq!(shield, 0);
    }

    #[test]
    fn test_shield_split_always_sums_to_incoming() {
        for pool in [0, 1, 10, 99] {
            for incoming in [0, 1, 10, 200] {
                let mut shield = pool;
                let split = absorb_with_shield(incoming, &mut shield);
                assert_eq!(split.absorbed + split.residual, incoming);
                assert_eq!(shield, pool - split.absorbed);
            }
        }
    }

    #[test]
    fn test_life_drain_heal_capped_by_missing_hp() {
        assert_eq!(life_drain_heal(40, 0.3, 100, 150), 12);
        assert_eq!(life_drain_heal(40, 0.3, 145, 150), 5);
        assert_eq!(life_drain_heal(40, 0.3, 150, 150), 0);
    }

    #[test]
    fn test_roll_crit_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            assert!(!roll_crit(0.0, &mut rng));
            assert!(roll_crit(1.0, &mut rng));
        }
    }

    #[test]
    fn test_enemy_hit() {
        assert_eq!(enemy_hit(8, 4, 5), 7);
        assert_eq!(enemy_hit(2, 0, 40), 1);
    }
}
