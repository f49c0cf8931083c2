use cozy_chess::{Board as CozyBoard, Color};

use crate::errors::BotError;

/// Thin wrapper over cozy-chess used as the legality validator for scripted
/// moves and for sanity checks on incoming positions. Full rules knowledge
/// stays in the board crate; the core never inspects squares itself.
#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default() }
    }

    pub fn from_fen(fen: &str) -> Result<Self, BotError> {
        CozyBoard::from_fen(fen, false)
            .map(|b| Self { board: b })
            .map_err(|e| BotError::InvalidPosition(format!("{:?}", e)))
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Is `mv_uci` (origin+destination coordinates, e.g. "e2e4") legal here?
    pub fn is_legal_uci(&self, mv_uci: &str) -> bool {
        let mut found = false;
        self.board.generate_moves(|moves| {
            for m in moves {
                if format!("{}", m) == mv_uci {
                    found = true;
                    break;
                }
            }
            found
        });
        found
    }

    pub fn make_move_uci(&mut self, mv_uci: &str) -> Result<(), BotError> {
        let mut found = None;
        self.board.generate_moves(|moves| {
            for m in moves {
                if format!("{}", m) == mv_uci {
                    found = Some(m);
                    break;
                }
            }
            found.is_some()
        });
        match found {
            Some(m) => {
                self.board.play(m);
                Ok(())
            }
            None => Err(BotError::InvalidPosition(format!("illegal move: {}", mv_uci))),
        }
    }
}
