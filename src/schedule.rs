use std::time::Duration;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::session::Phase;

/// One row of the time-budget table: at or above `percent_floor` percent of
/// the initial clock remaining, think for `movetime_ms` give or take
/// `variance_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdEntry {
    pub percent_floor: u32,
    pub movetime_ms: u64,
    pub variance_ms: u64,
}

/// Threshold rows evaluated from the highest floor down; the first row whose
/// floor is at or below the remaining percentage wins. Input order does not
/// matter, floors must be unique.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeThresholdTable {
    entries: Vec<ThresholdEntry>,
}

impl TimeThresholdTable {
    pub fn new(entries: Vec<ThresholdEntry>) -> Self {
        Self { entries }
    }

    /// Highest floor at or below `percent_remaining` wins; entries may arrive
    /// in any order straight from a config file edit.
    pub fn lookup(&self, percent_remaining: u32) -> Option<ThresholdEntry> {
        self.entries
            .iter()
            .filter(|e| e.percent_floor <= percent_remaining)
            .max_by_key(|e| e.percent_floor)
            .copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub default_movetime_ms: u64,
    pub minimum_movetime_ms: u64,
    /// Fixed think time while gaslighting; the percentage table only applies
    /// at full strength.
    pub gaslight_movetime_ms: u64,
    pub gaslight_variance_ms: u64,
    /// Below this remaining clock, SmackMode drops to `critical_movetime_ms`.
    pub critical_time_ms: u64,
    pub critical_movetime_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            default_movetime_ms: 1_000,
            minimum_movetime_ms: 100,
            gaslight_movetime_ms: 1_500,
            gaslight_variance_ms: 400,
            critical_time_ms: 15_000,
            critical_movetime_ms: 150,
        }
    }
}

/// Converts remaining clock time into a per-move think budget with bounded
/// jitter and emergency overrides.
#[derive(Debug)]
pub struct TimeScheduler {
    rng: SmallRng,
}

impl Default for TimeScheduler {
    fn default() -> Self {
        Self { rng: SmallRng::from_entropy() }
    }
}

impl TimeScheduler {
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed) }
    }

    /// Compute the movetime for the next decision.
    ///
    /// Missing or malformed clock data falls back to the configured default;
    /// the result is always at least `minimum_movetime_ms`.
    pub fn compute_movetime(
        &mut self,
        remaining: Option<Duration>,
        initial_budget: Option<Duration>,
        phase: Phase,
        table: &TimeThresholdTable,
        cfg: &SchedulerConfig,
    ) -> Duration {
        let ms = match phase {
            Phase::SmackMode => self.smack_movetime_ms(remaining, initial_budget, table, cfg),
            // Scripted moves skip the engine entirely, so any query landing
            // here is paced like a gaslight move.
            Phase::ScriptedOpening | Phase::Gaslighting => {
                self.jitter_ms(cfg.gaslight_movetime_ms, cfg.gaslight_variance_ms)
            }
        };
        Duration::from_millis(ms.max(cfg.minimum_movetime_ms))
    }

    fn smack_movetime_ms(
        &mut self,
        remaining: Option<Duration>,
        initial_budget: Option<Duration>,
        table: &TimeThresholdTable,
        cfg: &SchedulerConfig,
    ) -> u64 {
        let Some(remaining) = remaining else {
            return cfg.default_movetime_ms;
        };
        if remaining.as_millis() < cfg.critical_time_ms as u128 {
            debug!("critical time: {}ms left", remaining.as_millis());
            return cfg.critical_movetime_ms;
        }
        let Some(initial) = initial_budget.filter(|d| !d.is_zero()) else {
            return cfg.default_movetime_ms;
        };
        let percent = (remaining.as_millis() * 100 / initial.as_millis()).min(100) as u32;
        match table.lookup(percent) {
            Some(entry) => self.jitter_ms(entry.movetime_ms, entry.variance_ms),
            None => cfg.default_movetime_ms,
        }
    }

    /// Symmetric bounded jitter, saturating at zero.
    fn jitter_ms(&mut self, base_ms: u64, variance_ms: u64) -> u64 {
        if variance_ms == 0 {
            return base_ms;
        }
        let v = variance_ms as i64;
        let offset = self.rng.gen_range(-v..=v);
        (base_ms as i64 + offset).max(0) as u64
    }
}
