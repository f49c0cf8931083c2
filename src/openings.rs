//! Scripted opening lines in UCI coordinate notation, indexed by half-move.
//! Entry `i` is the move to try when the game's move counter is `i` and it is
//! the bot's turn; the opponent rarely cooperates for long, and a missing or
//! illegal entry ends the scripted phase.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningScript {
    pub name: String,
    pub moves: Vec<String>,
}

impl OpeningScript {
    pub fn new(name: &str, moves: &[&str]) -> Self {
        Self { name: name.to_string(), moves: moves.iter().map(|m| m.to_string()).collect() }
    }

    /// Scripted move for this half-move counter, if the script reaches it.
    pub fn move_at(&self, move_counter: u32) -> Option<&str> {
        self.moves.get(move_counter as usize).map(String::as_str)
    }
}

/// Built-in scripts. The bongcloud lines are the point of the feature; the
/// rest are ordinary openings for less conspicuous sessions.
pub fn builtin_scripts() -> Vec<OpeningScript> {
    vec![
        OpeningScript::new(
            "Bongcloud Attack",
            &["e2e4", "e7e5", "e1e2", "d7d5", "e2e3", "b8c6", "e3f3", "g8f6"],
        ),
        OpeningScript::new(
            "Bongcloud, Black",
            &["e2e4", "e7e5", "g1f3", "e8e7", "f1c4", "e7e6", "b1c3", "e6f6"],
        ),
        OpeningScript::new(
            "Italian Game",
            &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5", "e1g1", "g8f6"],
        ),
        OpeningScript::new(
            "Queen's Gambit",
            &["d2d4", "d7d5", "c2c4", "e7e6", "b1c3", "g8f6", "c1g5", "f8e7"],
        ),
        OpeningScript::new(
            "London System",
            &["d2d4", "d7d5", "g1f3", "g8f6", "c1f4", "c7c5", "e2e3", "b8c6"],
        ),
    ]
}

/// Look a script up by name, case-insensitive.
pub fn script_by_name(name: &str) -> Option<OpeningScript> {
    builtin_scripts().into_iter().find(|s| s.name.eq_ignore_ascii_case(name))
}
