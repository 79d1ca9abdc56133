//! Balance constants shared by the engine, the idle host and the simulator.
//!
//! All tunable numbers live here. [`EngineConfig`](super::config::EngineConfig)
//! copies them as its defaults so a host can override any of them at load time.

// =============================================================================
// TIMING (milliseconds)
// =============================================================================

/// Minimum time between two resolved combat turns.
pub const TURN_INTERVAL_MS: u64 = 1000;

/// Delay before a replacement enemy appears after a kill.
pub const ENEMY_RESPAWN_DELAY_MS: u64 = 1000;

/// Delay before a defeated character is revived.
pub const REVIVE_DELAY_MS: u64 = 5000;

/// Attacks closer together than this extend the combo.
pub const COMBO_WINDOW_MS: u64 = 2000;

// =============================================================================
// CHARACTER
// =============================================================================

pub const BASE_MAX_HP: u32 = 150;
pub const BASE_ATTACK: u32 = 15;
pub const BASE_DEFENSE: u32 = 5;
pub const BASE_CRITICAL_RATE: f64 = 0.15;
pub const BASE_EXPERIENCE_TO_NEXT: u64 = 100;

/// experience_to_next is multiplied by this on every level-up.
pub const EXPERIENCE_GROWTH: f64 = 1.2;

pub const LEVEL_UP_MAX_HP: u32 = 20;
pub const LEVEL_UP_ATTACK: u32 = 3;
pub const LEVEL_UP_DEFENSE: u32 = 2;
pub const LEVEL_UP_UPGRADE_POINTS: u32 = 1;

/// Gains from spending one upgrade point on an attribute.
pub const ATTRIBUTE_MAX_HP_GAIN: u32 = 20;
pub const ATTRIBUTE_ATTACK_GAIN: u32 = 5;
pub const ATTRIBUTE_DEFENSE_GAIN: u32 = 2;

// =============================================================================
// PLAYER ATTACK
// =============================================================================

/// Inclusive bounds of the random bonus added to a basic attack.
pub const PLAYER_DAMAGE_BONUS_MIN: u32 = 2;
pub const PLAYER_DAMAGE_BONUS_MAX: u32 = 9;

/// Damage bonus per combo step, and its cap.
pub const COMBO_STEP: f64 = 0.15;
pub const COMBO_CAP: f64 = 2.0;

/// From this combo count on, hits get an extra multiplier.
pub const COMBO_STREAK_THRESHOLD: u32 = 3;
pub const COMBO_STREAK_MULTIPLIER: f64 = 1.2;

pub const BERSERK_DAMAGE_MULTIPLIER: f64 = 1.8;
pub const BERSERK_CRIT_BONUS: f64 = 0.2;

// =============================================================================
// ENEMIES
// =============================================================================

/// Inclusive upper bound of the random bonus added to an enemy hit.
pub const ENEMY_DAMAGE_BONUS_MAX: u32 = 4;

/// Per-level growth of regular enemy stats: 1 + (level - 1) * k.
pub const ENEMY_LEVEL_SCALING: f64 = 0.1;

/// Total spread of the hp/attack variation (0.2 = ±10%).
pub const ENEMY_STAT_VARIATION: f64 = 0.2;

/// Character levels per regular template step.
pub const LEVELS_PER_TEMPLATE: u32 = 2;

pub const FIRST_BOSS_LEVEL: u32 = 5;
pub const BOSS_LEVEL_STEP: u32 = 5;

/// Chance that a boss uses one of its abilities instead of a plain hit.
pub const BOSS_ABILITY_CHANCE: f64 = 0.3;

/// Attack multiplier of a boss enrage ability.
pub const BOSS_ENRAGE_MULTIPLIER: f64 = 1.5;

/// Enrage never pushes a boss above this multiple of its base attack.
pub const BOSS_ENRAGE_CAP: f64 = 2.0;

// =============================================================================
// ACHIEVEMENTS
// =============================================================================

/// hp below this fraction of max (and above zero) after a turn counts as a close call.
pub const SURVIVOR_HP_FRACTION: f64 = 0.1;

// =============================================================================
// PRESENTATION
// =============================================================================

pub const COMBAT_LOG_CAPACITY: usize = 10;

/// Bumped whenever the save record layout changes.
pub const SAVE_VERSION: u32 = 1;
