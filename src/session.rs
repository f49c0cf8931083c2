use std::time::Duration;

use log::{debug, info, warn};

/// Behavioral phase of one game. Strictly monotonic: a phase is never
/// revisited within a game, and disabled phases are skipped at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ScriptedOpening,
    Gaslighting,
    SmackMode,
}

/// Per-game counters and phase. Turn-to-move derives from the locally owned
/// move counter only; externally supplied sequence numbers are corrupted by
/// unrelated traffic (time-extension requests and the like) and must never
/// feed turn detection.
#[derive(Debug)]
pub struct GameSession {
    move_counter: u32,
    bot_is_white: Option<bool>,
    phase: Phase,
    initial_clock_budget: Option<Duration>,
    first_move_sent: bool,
    gaslighting_enabled: bool,
}

impl GameSession {
    /// Fresh session for a new game. No state survives across games; the
    /// owning loop constructs one of these per game.
    pub fn new(scripted_opening_enabled: bool, gaslighting_enabled: bool) -> Self {
        let phase = if scripted_opening_enabled {
            Phase::ScriptedOpening
        } else if gaslighting_enabled {
            Phase::Gaslighting
        } else {
            Phase::SmackMode
        };
        Self {
            move_counter: 0,
            bot_is_white: None,
            phase,
            initial_clock_budget: None,
            first_move_sent: false,
            gaslighting_enabled,
        }
    }

    pub fn move_counter(&self) -> u32 {
        self.move_counter
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Count one move actually made on the board. Only called for events
    /// carrying a concrete move, never for bare state refreshes.
    pub fn record_move(&mut self) {
        self.move_counter += 1;
        debug!("move counter {} ({} to move)", self.move_counter, if self.is_white_to_move() { "white" } else { "black" });
    }

    /// Even count means White is to move.
    pub fn is_white_to_move(&self) -> bool {
        self.move_counter % 2 == 0
    }

    pub fn is_bots_turn(&self) -> bool {
        self.bot_is_white.map_or(false, |white| white == self.is_white_to_move())
    }

    pub fn bot_is_white(&self) -> Option<bool> {
        self.bot_is_white
    }

    /// Set once from the external color-detection signal; later signals for
    /// the same game are ignored.
    pub fn set_bot_color(&mut self, white: bool) {
        match self.bot_is_white {
            None => {
                info!("playing {}", if white { "white" } else { "black" });
                self.bot_is_white = Some(white);
            }
            Some(current) if current != white => {
                warn!("ignoring color change mid-game (still {})", if current { "white" } else { "black" });
            }
            Some(_) => {}
        }
    }

    /// Capture the denominator for percentage-based time decisions from the
    /// first clock reading seen; set-once, never overwritten.
    pub fn note_initial_budget(&mut self, budget: Duration) {
        if self.initial_clock_budget.is_none() && !budget.is_zero() {
            debug!("initial clock budget {}ms", budget.as_millis());
            self.initial_clock_budget = Some(budget);
        }
    }

    pub fn initial_clock_budget(&self) -> Option<Duration> {
        self.initial_clock_budget
    }

    pub fn first_move_sent(&self) -> bool {
        self.first_move_sent
    }

    pub fn mark_first_move_sent(&mut self) {
        self.first_move_sent = true;
    }

    /// Leave the scripted opening: the script ran out or the scripted move
    /// was illegal in the actual position. Not an error, just the normal
    /// phase exit.
    pub fn end_scripted_opening(&mut self) {
        if self.phase == Phase::ScriptedOpening {
            self.phase = if self.gaslighting_enabled { Phase::Gaslighting } else { Phase::SmackMode };
            info!("scripted opening over, now {:?}", self.phase);
        }
    }

    /// Irreversible escalation to full strength for the rest of the game.
    pub fn escalate(&mut self) {
        if self.phase != Phase::SmackMode {
            info!("escalating to smack mode at move {}", self.move_counter);
            self.phase = Phase::SmackMode;
        }
    }
}
