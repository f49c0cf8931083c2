use std::time::Duration;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::engine::{AnalysisLine, EngineClient};
use crate::errors::BotError;
use crate::score::{normalize, Score, ScoreKey};

/// Tolerance window for deliberately suboptimal play. A gaslight pick must
/// score strictly above `max(best − max_score_loss, score_floor)`.
/// `mate_boost` must exceed the largest plausible centipawn magnitude.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreBandConfig {
    pub max_score_loss: i64,
    pub score_floor: i64,
    pub mate_boost: i64,
}

impl Default for ScoreBandConfig {
    fn default() -> Self {
        Self { max_score_loss: 200, score_floor: -700, mate_boost: 10_000_000 }
    }
}

/// A chosen move with the engine's original evaluation. The normalized score
/// is a ranking device only and never leaves the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: String,
    pub score: Score,
}

/// Picks the engine's best move, or a banded suboptimal one, from ranked
/// candidate lines. Owns the engine binding; `&mut self` keeps queries
/// strictly serialized.
pub struct MoveSelector<E> {
    engine: E,
}

impl<E: EngineClient> MoveSelector<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Full-strength pick: single line, returned unmodified.
    pub fn select_best(&mut self, fen: &str, movetime: Duration) -> Result<ScoredMove, BotError> {
        let lines = self.engine.query(fen, movetime, 1)?;
        let line = lines.into_iter().next().ok_or(BotError::NoCandidateMoves)?;
        Ok(ScoredMove { mv: line.mv, score: line.score })
    }

    /// Banded suboptimal pick: the worst candidate still strictly inside the
    /// score band, falling back to the best candidate when nothing qualifies.
    pub fn select_gaslight(
        &mut self,
        fen: &str,
        movetime: Duration,
        line_count: u32,
        band: &ScoreBandConfig,
    ) -> Result<ScoredMove, BotError> {
        let lines = self.engine.query(fen, movetime, line_count)?;
        // Shallower lines are noise from interrupted iterations; only the
        // deepest iteration actually reached is comparable.
        let target_depth = lines.iter().map(|l| l.depth).max().ok_or(BotError::NoCandidateMoves)?;
        let survivors: Vec<_> = lines.iter().filter(|l| l.depth == target_depth).collect();
        if survivors.is_empty() {
            return Err(BotError::NoCandidateMoves);
        }

        // Engine lines arrive best-first; rank_from_worst keeps equal scores
        // distinct in the ordering without disturbing unequal ones.
        let count = survivors.len();
        let mut ranked: Vec<(ScoreKey, &AnalysisLine)> = survivors
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let key = ScoreKey {
                    normalized: normalize(line.score, band.mate_boost),
                    rank_from_worst: (count - 1 - i) as u32,
                };
                (key, *line)
            })
            .collect();
        ranked.sort_by_key(|(key, _)| *key);

        let best = ranked.last().map(|(key, _)| key.normalized).unwrap_or_default();
        let min_acceptable = (best - band.max_score_loss).max(band.score_floor);
        for (key, line) in &ranked {
            trace!("candidate {} depth {} normalized {}", line.mv, line.depth, key.normalized);
        }

        // Worst-first scan; the band is open below, closed above.
        let chosen = ranked
            .iter()
            .find(|(key, _)| key.normalized > min_acceptable)
            .or_else(|| ranked.last());
        let (key, line) = chosen.ok_or(BotError::NoCandidateMoves)?;
        debug!(
            "gaslight pick {} (normalized {}, best {}, min acceptable {})",
            line.mv, key.normalized, best, min_acceptable
        );
        Ok(ScoredMove { mv: line.mv.clone(), score: line.score })
    }
}
