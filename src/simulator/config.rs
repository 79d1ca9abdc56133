//! Simulation configuration.

use crate::core::config::EngineConfig;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random). Run `i` uses `seed + i`.
    pub seed: Option<u64>,

    /// Simulated play time per run, in minutes
    pub minutes: u64,

    /// Whether the auto-player casts and upgrades skills
    pub use_skills: bool,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,

    /// Balance values handed to every engine
    pub engine: EngineConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            minutes: 60,
            use_skills: true,
            verbosity: 1,
            engine: EngineConfig::default(),
        }
    }
}

impl SimConfig {
    /// Short seeded config for tests and smoke runs.
    pub fn quick(num_runs: u32, minutes: u64) -> Self {
        Self {
            num_runs,
            seed: Some(42),
            minutes,
            verbosity: 0,
            ..Default::default()
        }
    }

    /// Basic attacks only, for measuring the baseline curve.
    pub fn attacks_only(num_runs: u32, minutes: u64) -> Self {
        Self {
            use_skills: false,
            ..Self::quick(num_runs, minutes)
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.minutes.saturating_mul(60_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.num_runs, 100);
        assert!(config.seed.is_none());
        assert!(config.use_skills);
        assert_eq!(config.duration_ms(), 3_600_000);
    }

    #[test]
    fn test_presets() {
        let quick = SimConfig::quick(3, 5);
        assert_eq!(quick.seed, Some(42));
        assert_eq!(quick.verbosity, 0);
        assert!(quick.use_skills);

        let baseline = SimConfig::attacks_only(3, 5);
        assert!(!baseline.use_skills);
        assert_eq!(baseline.minutes, 5);
    }
}
