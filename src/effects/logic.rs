//! Applying, querying and expiring status effects.
//!
//! Effects are pull-based: nothing fires when an effect runs out. The engine
//! calls [`StatusEffects::expire`] at the start of every tick and reports the
//! kinds that ended.

use super::types::{ActiveEffect, EffectKind, StatusEffects};
use crate::character::Character;

impl StatusEffects {
    /// Starts or refreshes an effect. An existing effect of the same kind is
    /// replaced, never stacked.
    pub fn apply(&mut self, kind: EffectKind, magnitude: f64, expires_at: Option<u64>) {
        *self.slot_mut(kind) = Some(ActiveEffect {
            expires_at,
            magnitude,
        });
    }

    pub fn is_active(&self, kind: EffectKind, now: u64) -> bool {
        self.slot(kind).is_some_and(|e| !e.is_expired(now))
    }

    /// Magnitude of an active effect.
    pub fn magnitude(&self, kind: EffectKind, now: u64) -> Option<f64> {
        self.slot(kind)
            .filter(|e| !e.is_expired(now))
            .map(|e| e.magnitude)
    }

    /// Removes an effect and returns it, e.g. a guaranteed critical used up
    /// by an attack.
    pub fn consume(&mut self, kind: EffectKind) -> Option<ActiveEffect> {
        self.slot_mut(kind).take()
    }

    /// Removes every effect whose expiry has passed.
    ///
    /// A shield that runs out also drops whatever was left of its pool.
    pub fn expire(&mut self, now: u64, character: &mut Character) -> Vec<EffectKind> {
        let mut ended = Vec::new();
        for kind in EffectKind::ALL {
            let slot = self.slot_mut(kind);
            if slot.is_some_and(|e| e.is_expired(now)) {
                *slot = None;
                if kind == EffectKind::Shield {
                    character.shield_points = 0;
                }
                ended.push(kind);
            }
        }
        ended
    }

    pub fn active_kinds(&self, now: u64) -> Vec<EffectKind> {
        EffectKind::ALL
            .into_iter()
            .filter(|kind| self.is_active(*kind, now))
            .collect()
    }

    pub fn clear(&mut self) {
        *self = StatusEffects::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_and_query() {
        let mut effects = StatusEffects::default();
        effects.apply(EffectKind::Berserk, 1.8, Some(10_000));
        assert!(effects.is_active(EffectKind::Berserk, 9_999));
        assert!(!effects.is_active(EffectKind::Berserk, 10_000));
        assert_eq!(effects.magnitude(EffectKind::Berserk, 5_000), Some(1.8));
        assert!(!effects.is_active(EffectKind::Shield, 0));
    }

    #[test]
    fn test_reapply_refreshes_instead_of_stacking() {
        let mut effects = StatusEffects::default();
        effects.apply(EffectKind::LifeDrain, 0.3, Some(8_000));
        effects.apply(EffectKind::LifeDrain, 0.45, Some(20_000));
        assert_eq!(effects.magnitude(EffectKind::LifeDrain, 10_000), Some(0.45));
    }

    #[test]
    fn test_expire_reports_and_clears_shield_pool() {
        let mut effects = StatusEffects::default();
        let mut character = Character::default();
        character.shield_points = 40;
        effects.apply(EffectKind::Shield, 50.0, Some(15_000));
        effects.apply(EffectKind::Berserk, 1.8, Some(30_000));

        assert!(effects.expire(14_999, &mut character).is_empty());
        assert_eq!(effects.expire(15_000, &mut character), vec![EffectKind::Shield]);
        assert_eq!(character.shield_points, 0);
        assert!(effects.is_active(EffectKind::Berserk, 15_000));
    }

    #[test]
    fn test_guaranteed_critical_never_expires() {
        let mut effects = StatusEffects::default();
        let mut character = Character::default();
        effects.apply(EffectKind::GuaranteedCritical, 3.0, None);
        assert!(effects.expire(u64::MAX, &mut character).is_empty());
        assert!(effects.consume(EffectKind::GuaranteedCritical).is_some());
        assert!(!effects.is_active(EffectKind::GuaranteedCritical, 0));
    }

    #[test]
    fn test_effects_overlap() {
        let mut effects = StatusEffects::default();
        effects.apply(EffectKind::Berserk, 1.8, Some(100));
        effects.apply(EffectKind::LifeDrain, 0.3, Some(100));
        effects.apply(EffectKind::GuaranteedCritical, 3.0, None);
        assert_eq!(effects.active_kinds(50).len(), 3);
    }
}
