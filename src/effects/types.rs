//! Timed status effects on the character.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Berserk,
    Shield,
    LifeDrain,
    GuaranteedCritical,
}

impl EffectKind {
    pub const ALL: [EffectKind; 4] = [
        EffectKind::Berserk,
        EffectKind::Shield,
        EffectKind::LifeDrain,
        EffectKind::GuaranteedCritical,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::Berserk => "Berserk",
            EffectKind::Shield => "Shield",
            EffectKind::LifeDrain => "Life Drain",
            EffectKind::GuaranteedCritical => "Critical Strike",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    /// None means the effect lasts until consumed.
    pub expires_at: Option<u64>,
    /// Multiplier, fraction or pool size depending on the kind.
    pub magnitude: f64,
}

impl ActiveEffect {
    pub fn is_expired(&self, now: u64) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// One slot per effect kind. Re-applying a kind overwrites its slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusEffects {
    pub berserk: Option<ActiveEffect>,
    pub shield: Option<ActiveEffect>,
    pub life_drain: Option<ActiveEffect>,
    pub guaranteed_critical: Option<ActiveEffect>,
}

impl StatusEffects {
    pub(crate) fn slot(&self, kind: EffectKind) -> &Option<ActiveEffect> {
        match kind {
            EffectKind::Berserk => &self.berserk,
            EffectKind::Shield => &self.shield,
            EffectKind::LifeDrain => &self.life_drain,
            EffectKind::GuaranteedCritical => &self.guaranteed_critical,
        }
    }

    pub(crate) fn slot_mut(&mut self, kind: EffectKind) -> &mut Option<ActiveEffect> {
        match kind {
            EffectKind::Berserk => &mut self.berserk,
            EffectKind::Shield => &mut self.shield,
            EffectKind::LifeDrain => &mut self.life_drain,
            EffectKind::GuaranteedCritical => &mut self.guaranteed_critical,
        }
    }
}
