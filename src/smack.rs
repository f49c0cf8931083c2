use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

/// Thresholds deciding when to stop sandbagging and play for real. All of
/// these are configuration; scores are on the normalized scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SmackConfig {
    /// Past this many moves the game has gone on long enough.
    pub max_moves: u32,
    /// Below this remaining clock the bot cannot afford to clown around.
    pub min_time_ms: u64,
    /// Above this score the position is too favorable to keep sandbagging.
    pub max_score_ceiling: i64,
    /// Score-based escalation needs at least this many moves played first.
    pub min_moves: u32,
    /// At or below this score the position is bad enough to fight back.
    pub min_score: i64,
}

impl Default for SmackConfig {
    fn default() -> Self {
        Self {
            max_moves: 60,
            min_time_ms: 30_000,
            max_score_ceiling: 600,
            min_moves: 10,
            min_score: -350,
        }
    }
}

/// Watches session state and decides when to escalate from gaslighting to
/// full strength. Sticky: once it says escalate, it keeps saying escalate
/// until a new game builds a fresh controller.
#[derive(Debug, Default)]
pub struct SmackModeController {
    escalated: bool,
}

impl SmackModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn escalated(&self) -> bool {
        self.escalated
    }

    /// Evaluate escalation after a gaslight move was scored.
    ///
    /// `last_gaslight_score` is the normalized score of the move just chosen;
    /// `remaining` is the bot's clock, `None` when the event carried no
    /// usable clock data (unknown time never triggers the clock rule).
    pub fn evaluate(
        &mut self,
        move_counter: u32,
        remaining: Option<Duration>,
        last_gaslight_score: i64,
        cfg: &SmackConfig,
    ) -> bool {
        if self.escalated {
            return true;
        }
        let clock_low =
            remaining.map_or(false, |r| r.as_millis() < cfg.min_time_ms as u128);
        let escalate = move_counter > cfg.max_moves
            || clock_low
            || last_gaslight_score > cfg.max_score_ceiling
            || (move_counter >= cfg.min_moves && last_gaslight_score <= cfg.min_score);
        if escalate {
            info!(
                "smack trigger: moves={} clock_low={} score={}",
                move_counter, clock_low, last_gaslight_score
            );
            self.escalated = true;
        }
        escalate
    }
}
