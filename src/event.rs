use serde::{Deserialize, Serialize};

use crate::score::Score;

/// One normalized notification from the move-event source: current position,
/// the concrete move that produced it (absent for bare refreshes), and clock
/// state. There is deliberately no sequence-number field: the upstream
/// version counter is corrupted by unrelated traffic and must not exist here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveEvent {
    /// FEN-like position after the move, side to move included.
    pub fen: String,
    /// Move that was just made, coordinate form; `None` for refreshes.
    #[serde(rename = "move", default)]
    pub mv: Option<String>,
    #[serde(default)]
    pub white_remaining_ms: Option<u64>,
    #[serde(default)]
    pub black_remaining_ms: Option<u64>,
    /// Color-detection signal; only the first one per game sticks.
    #[serde(default)]
    pub bot_is_white: Option<bool>,
    /// Marks the start of a fresh game (win, loss, abort, or restart).
    #[serde(default)]
    pub new_game: bool,
}

/// The decision handed to the move sink, original score units preserved for
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChosenMove {
    #[serde(rename = "move")]
    pub mv: String,
    #[serde(flatten)]
    pub score: Score,
}
