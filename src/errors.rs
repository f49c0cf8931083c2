use thiserror::Error;

/// Errors surfaced by the decision core. All of these are locally
/// recoverable: a failed decision means no move is dispatched for that
/// turn, never a crash.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("engine unavailable: {0}")]
    EngineUnavailable(String),
    #[error("no candidate moves at target depth")]
    NoCandidateMoves,
    #[error("invalid position: {0}")]
    InvalidPosition(String),
    #[error("config error: {0}")]
    Config(String),
}
