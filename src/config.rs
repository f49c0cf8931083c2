use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::BotError;
use crate::schedule::{SchedulerConfig, ThresholdEntry, TimeThresholdTable};
use crate::select::ScoreBandConfig;
use crate::smack::SmackConfig;

/// Flat, file-backed bot configuration. The driver re-reads the file before
/// every decision, so edits take effect without a restart; unknown or missing
/// fields fall back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Engine binary, looked up on PATH if not absolute.
    pub engine_path: String,
    pub scripted_opening_enabled: bool,
    pub gaslighting_enabled: bool,
    /// Name of a built-in opening script (see `openings::builtin_scripts`).
    pub opening_script: String,
    /// Played when the bot opens the game and neither script nor engine
    /// produced a move.
    pub fallback_opening_move: String,

    /// MultiPV width for gaslight queries.
    pub line_count: u32,
    pub max_score_loss: i64,
    pub score_floor: i64,
    pub mate_boost: i64,

    pub default_movetime_ms: u64,
    pub minimum_movetime_ms: u64,
    pub gaslight_movetime_ms: u64,
    pub gaslight_variance_ms: u64,
    pub critical_time_ms: u64,
    pub critical_movetime_ms: u64,
    pub time_table: Vec<ThresholdEntry>,

    pub smack_max_moves: u32,
    pub smack_min_time_ms: u64,
    pub smack_max_score_ceiling: i64,
    pub smack_min_moves: u32,
    pub smack_min_score: i64,
}

impl Default for BotConfig {
    fn default() -> Self {
        let sched = SchedulerConfig::default();
        let band = ScoreBandConfig::default();
        let smack = SmackConfig::default();
        Self {
            engine_path: "stockfish".to_string(),
            scripted_opening_enabled: true,
            gaslighting_enabled: true,
            opening_script: "Bongcloud Attack".to_string(),
            fallback_opening_move: "e2e4".to_string(),
            line_count: 9,
            max_score_loss: band.max_score_loss,
            score_floor: band.score_floor,
            mate_boost: band.mate_boost,
            default_movetime_ms: sched.default_movetime_ms,
            minimum_movetime_ms: sched.minimum_movetime_ms,
            gaslight_movetime_ms: sched.gaslight_movetime_ms,
            gaslight_variance_ms: sched.gaslight_variance_ms,
            critical_time_ms: sched.critical_time_ms,
            critical_movetime_ms: sched.critical_movetime_ms,
            time_table: vec![
                ThresholdEntry { percent_floor: 61, movetime_ms: 1_500, variance_ms: 400 },
                ThresholdEntry { percent_floor: 50, movetime_ms: 3_500, variance_ms: 700 },
                ThresholdEntry { percent_floor: 40, movetime_ms: 4_500, variance_ms: 900 },
                ThresholdEntry { percent_floor: 30, movetime_ms: 2_500, variance_ms: 600 },
                ThresholdEntry { percent_floor: 5, movetime_ms: 300, variance_ms: 100 },
            ],
            smack_max_moves: smack.max_moves,
            smack_min_time_ms: smack.min_time_ms,
            smack_max_score_ceiling: smack.max_score_ceiling,
            smack_min_moves: smack.min_moves,
            smack_min_score: smack.min_score,
        }
    }
}

impl BotConfig {
    pub fn load(path: &Path) -> Result<Self, BotError> {
        let text = fs::read_to_string(path)
            .map_err(|e| BotError::Config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&text)
            .map_err(|e| BotError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load, falling back to defaults when the file is missing or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("using default config ({})", e);
                Self::default()
            }
        }
    }

    pub fn band(&self) -> ScoreBandConfig {
        ScoreBandConfig {
            max_score_loss: self.max_score_loss,
            score_floor: self.score_floor,
            mate_boost: self.mate_boost,
        }
    }

    pub fn scheduler(&self) -> SchedulerConfig {
        SchedulerConfig {
            default_movetime_ms: self.default_movetime_ms,
            minimum_movetime_ms: self.minimum_movetime_ms,
            gaslight_movetime_ms: self.gaslight_movetime_ms,
            gaslight_variance_ms: self.gaslight_variance_ms,
            critical_time_ms: self.critical_time_ms,
            critical_movetime_ms: self.critical_movetime_ms,
        }
    }

    pub fn smack(&self) -> SmackConfig {
        SmackConfig {
            max_moves: self.smack_max_moves,
            min_time_ms: self.smack_min_time_ms,
            max_score_ceiling: self.smack_max_score_ceiling,
            min_moves: self.smack_min_moves,
            min_score: self.smack_min_score,
        }
    }

    pub fn time_table(&self) -> TimeThresholdTable {
        TimeThresholdTable::new(self.time_table.clone())
    }
}
