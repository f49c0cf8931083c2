use std::collections::VecDeque;
use std::time::Duration;

use crate::engine::{AnalysisLine, EngineClient};
use crate::errors::BotError;

/// Scripted engine: answers queries from canned candidate lists instead of a
/// live process. Used by tests and benches to drive the selector and the full
/// decision pipeline deterministically.
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    responses: VecDeque<Vec<AnalysisLine>>,
    repeating: Option<Vec<AnalysisLine>>,
    fail_next: bool,
    pub queries: Vec<(String, Duration, u32)>,
    pub new_games: u32,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one response; responses are consumed in order.
    pub fn push_response(&mut self, lines: Vec<AnalysisLine>) {
        self.responses.push_back(lines);
    }

    /// Answer every query with the same lines.
    pub fn repeating(lines: Vec<AnalysisLine>) -> Self {
        Self { repeating: Some(lines), ..Self::default() }
    }

    /// Make the next query fail with `EngineUnavailable`.
    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }
}

impl EngineClient for ScriptedEngine {
    fn query(
        &mut self,
        fen: &str,
        movetime: Duration,
        line_count: u32,
    ) -> Result<Vec<AnalysisLine>, BotError> {
        self.queries.push((fen.to_string(), movetime, line_count));
        if self.fail_next {
            self.fail_next = false;
            return Err(BotError::EngineUnavailable("scripted failure".to_string()));
        }
        if let Some(lines) = &self.repeating {
            return Ok(lines.clone());
        }
        self.responses
            .pop_front()
            .ok_or_else(|| BotError::EngineUnavailable("no scripted response left".to_string()))
    }

    fn new_game(&mut self) -> Result<(), BotError> {
        self.new_games += 1;
        Ok(())
    }
}
