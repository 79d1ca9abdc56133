//! Simulation report generation.

use super::config::SimConfig;
use crate::achievements::{AchievementId, ALL_ACHIEVEMENTS};
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of a single simulated run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub final_level: u32,
    pub final_gold: u64,
    pub kills: u64,
    pub boss_kills: u64,
    pub deaths: u64,
    pub casts: u64,
    pub skill_upgrades: u64,
    /// Gold from kills and achievement rewards, before any spending.
    pub gold_earned: u64,
    pub max_combo: u32,
    /// Simulated time at which each level was first reached.
    pub level_reached_at_ms: BTreeMap<u32, u64>,
    /// Achievements in unlock order.
    pub achievements: Vec<AchievementId>,
    pub simulated_ms: u64,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub generated_at: String,
    pub num_runs: u32,
    pub minutes: u64,
    pub use_skills: bool,

    pub avg_final_level: f64,
    pub min_final_level: u32,
    pub max_final_level: u32,
    pub avg_kills: f64,
    pub avg_boss_kills: f64,
    pub avg_deaths: f64,
    pub avg_casts: f64,
    pub avg_gold_earned: f64,
    pub avg_max_combo: f64,

    /// Average minutes to reach each level, over the runs that reached it.
    pub avg_minutes_to_level: BTreeMap<u32, f64>,
    /// Share of runs that reached each level.
    pub level_reach_rate: BTreeMap<u32, f64>,
    pub level_distribution: BTreeMap<u32, u32>,
    /// Share of runs that unlocked each achievement.
    pub achievement_rates: BTreeMap<AchievementId, f64>,

    pub runs: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, config: &SimConfig) -> Self {
        let num_runs = runs.len() as u32;
        let n = num_runs.max(1) as f64;

        let avg_final_level = mean(&runs, |r| r.final_level as f64);
        let avg_kills = mean(&runs, |r| r.kills as f64);
        let avg_boss_kills = mean(&runs, |r| r.boss_kills as f64);
        let avg_deaths = mean(&runs, |r| r.deaths as f64);
        let avg_casts = mean(&runs, |r| r.casts as f64);
        let avg_gold_earned = mean(&runs, |r| r.gold_earned as f64);
        let avg_max_combo = mean(&runs, |r| r.max_combo as f64);

        let min_final_level = runs.iter().map(|r| r.final_level).min().unwrap_or(0);
        let max_final_level = runs.iter().map(|r| r.final_level).max().unwrap_or(0);

        let mut level_distribution = BTreeMap::new();
        for run in &runs {
            *level_distribution.entry(run.final_level).or_insert(0) += 1;
        }

        // Level pacing
        let mut level_times: BTreeMap<u32, Vec<u64>> = BTreeMap::new();
        for run in &runs {
            for (level, at) in &run.level_reached_at_ms {
                level_times.entry(*level).or_default().push(*at);
            }
        }
        let avg_minutes_to_level = level_times
            .iter()
            .map(|(level, times)| {
                let mean_ms = times.iter().sum::<u64>() as f64 / times.len() as f64;
                (*level, mean_ms / 60_000.0)
            })
            .collect();
        let level_reach_rate = level_times
            .iter()
            .map(|(level, times)| (*level, times.len() as f64 / n))
            .collect();

        let achievement_rates = ALL_ACHIEVEMENTS
            .iter()
            .map(|def| {
                let unlocked = runs.iter().filter(|r| r.achievements.contains(&def.id)).count();
                (def.id, unlocked as f64 / n)
            })
            .collect();

        Self {
            generated_at: Utc::now().to_rfc3339(),
            num_runs,
            minutes: config.minutes,
            use_skills: config.use_skills,
            avg_final_level,
            min_final_level,
            max_final_level,
            avg_kills,
            avg_boss_kills,
            avg_deaths,
            avg_casts,
            avg_gold_earned,
            avg_max_combo,
            avg_minutes_to_level,
            level_reach_rate,
            level_distribution,
            achievement_rates,
            runs,
        }
    }

    /// Human-readable summary.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {}, {} simulated minutes each, skills {}\n\n",
            self.num_runs,
            self.minutes,
            if self.use_skills { "on" } else { "off" }
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Final Level:     {:.1} (min {}, max {})\n",
            self.avg_final_level, self.min_final_level, self.max_final_level
        ));
        report.push_str(&format!("  Avg Kills:           {:.0}\n", self.avg_kills));
        report.push_str(&format!("  Avg Boss Kills:      {:.1}\n", self.avg_boss_kills));
        report.push_str(&format!("  Avg Deaths:          {:.1}\n", self.avg_deaths));
        report.push_str(&format!("  Avg Skill Casts:     {:.0}\n", self.avg_casts));
        report.push_str(&format!("  Avg Gold Earned:     {:.0}\n", self.avg_gold_earned));
        report.push_str(&format!("  Avg Best Combo:      {:.1}\n\n", self.avg_max_combo));

        report.push_str("── LEVEL PACING ─────────────────────────────────────────────────\n");
        report.push_str("  Level   Reached   Avg Minutes\n");
        report.push_str("  ─────   ───────   ───────────\n");
        for (level, minutes) in &self.avg_minutes_to_level {
            let rate = self.level_reach_rate.get(level).copied().unwrap_or(0.0);
            report.push_str(&format!(
                "  {:5}   {:>6.1}%   {:>11.1}\n",
                level,
                rate * 100.0,
                minutes
            ));
        }
        report.push('\n');

        report.push_str("── ACHIEVEMENTS ─────────────────────────────────────────────────\n");
        for def in ALL_ACHIEVEMENTS {
            let rate = self.achievement_rates.get(&def.id).copied().unwrap_or(0.0);
            let bar: String = "█".repeat((rate * 20.0) as usize);
            report.push_str(&format!("  {:<18} {:>5.1}% {}\n", def.name, rate * 100.0, bar));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let deaths_per_kill = if self.avg_kills > 0.0 {
            self.avg_deaths / self.avg_kills
        } else {
            0.0
        };
        let death_rating = if deaths_per_kill < 0.01 {
            "TOO EASY - The character rarely dies"
        } else if deaths_per_kill < 0.1 {
            "GOOD - Challenging but fair"
        } else if deaths_per_kill < 0.3 {
            "HARD - Frequent deaths"
        } else {
            "TOO HARD - Excessive deaths"
        };
        report.push_str(&format!("  Deaths per Kill: {:.3}\n", deaths_per_kill));
        report.push_str(&format!("  Death Rating:    {}\n", death_rating));
        if self.avg_boss_kills < 1.0 && self.max_final_level >= 5 {
            report.push_str("  ⚠️  Bosses rarely go down - boss stats too high?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// JSON report for further analysis.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn mean(runs: &[RunStats], f: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(f).sum::<f64>() / runs.len() as f64
}
