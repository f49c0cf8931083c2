pub mod fake;
pub mod uci;

use std::time::Duration;

use crate::errors::BotError;
use crate::score::Score;

/// One ranked line from an analysis query. Lines arrive best-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisLine {
    /// Principal move in coordinate notation, e.g. "e2e4".
    pub mv: String,
    /// Depth the engine actually reached for this line.
    pub depth: u32,
    pub score: Score,
}

/// Narrow contract to the external analysis engine.
///
/// Queries against one binding are strictly serialized: the engine is
/// stateful per position sequence, so the `&mut self` receiver plus a single
/// owner is the whole locking discipline. A query blocks until the engine
/// reports completion or the movetime (plus a grace period) elapses.
pub trait EngineClient {
    /// Analyze `fen` for `movetime`, asking for `line_count` ranked lines.
    fn query(
        &mut self,
        fen: &str,
        movetime: Duration,
        line_count: u32,
    ) -> Result<Vec<AnalysisLine>, BotError>;

    /// Tell the engine a new logical game starts, resetting its search history.
    fn new_game(&mut self) -> Result<(), BotError>;
}
