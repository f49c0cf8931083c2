use std::path::PathBuf;
use std::time::Duration;

use log::{debug, info, trace, warn};

use crate::board::Position;
use crate::config::BotConfig;
use crate::engine::EngineClient;
use crate::event::{ChosenMove, MoveEvent};
use crate::openings::{script_by_name, OpeningScript};
use crate::schedule::TimeScheduler;
use crate::score::{normalize, Score};
use crate::select::MoveSelector;
use crate::session::{GameSession, Phase};
use crate::smack::SmackModeController;

/// Owns one game's worth of decision state and the engine binding, and runs
/// the whole per-event flow: session update, scripted-opening attempt, time
/// budget, move selection, smack escalation. One bot, one game, one in-flight
/// engine query; every event is fully processed before the next one.
pub struct Bot<E: EngineClient> {
    selector: MoveSelector<E>,
    scheduler: TimeScheduler,
    session: GameSession,
    smack: SmackModeController,
    config: BotConfig,
    config_path: Option<PathBuf>,
}

impl<E: EngineClient> Bot<E> {
    pub fn new(engine: E, config: BotConfig) -> Self {
        let session =
            GameSession::new(config.scripted_opening_enabled, config.gaslighting_enabled);
        Self {
            selector: MoveSelector::new(engine),
            scheduler: TimeScheduler::default(),
            session,
            smack: SmackModeController::new(),
            config,
            config_path: None,
        }
    }

    /// Re-read the config file before every decision so external edits take
    /// effect without a restart.
    pub fn with_config_path(engine: E, path: PathBuf) -> Self {
        let config = BotConfig::load_or_default(&path);
        let mut bot = Self::new(engine, config);
        bot.config_path = Some(path);
        bot
    }

    /// Deterministic movetime jitter, for tests.
    pub fn seed_scheduler(&mut self, seed: u64) {
        self.scheduler = TimeScheduler::with_seed(seed);
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn engine_mut(&mut self) -> &mut E {
        self.selector.engine_mut()
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Process one move-event. Returns the move to dispatch, or `None` when
    /// it is not the bot's turn or this decision failed; failures are logged
    /// and recovered on the next event, never propagated as a crash.
    pub fn on_move_event(&mut self, event: &MoveEvent) -> Option<ChosenMove> {
        if let Some(path) = self.config_path.clone() {
            self.config = BotConfig::load_or_default(&path);
        }
        if event.new_game {
            self.reset();
        }
        if let Some(white) = event.bot_is_white {
            self.session.set_bot_color(white);
        }
        // Only a concrete move advances the counter; refreshes and whatever
        // sequence numbering the upstream used never touch turn parity.
        if event.mv.is_some() {
            self.session.record_move();
        }
        let remaining = self.bot_remaining(event);
        if let Some(r) = remaining {
            self.session.note_initial_budget(r);
        }

        if !self.session.is_bots_turn() {
            trace!("not our turn (move {})", self.session.move_counter());
            return None;
        }
        let position = match Position::from_fen(&event.fen) {
            Ok(p) => p,
            Err(e) => {
                warn!("skipping event: {}", e);
                return None;
            }
        };

        if self.session.phase() == Phase::ScriptedOpening {
            if let Some(chosen) = self.try_scripted_move(&position) {
                return Some(chosen);
            }
            // Script exhausted or move illegal here; fall through to the
            // engine in whatever phase the session moved to.
        }

        let movetime = self.scheduler.compute_movetime(
            remaining,
            self.session.initial_clock_budget(),
            self.session.phase(),
            &self.config.time_table(),
            &self.config.scheduler(),
        );
        debug!("movetime {}ms in {:?}", movetime.as_millis(), self.session.phase());

        let band = self.config.band();
        let decision = match self.session.phase() {
            Phase::SmackMode => self.selector.select_best(&event.fen, movetime),
            Phase::ScriptedOpening | Phase::Gaslighting => self.selector.select_gaslight(
                &event.fen,
                movetime,
                self.config.line_count,
                &band,
            ),
        };

        match decision {
            Ok(scored) => {
                if self.session.phase() == Phase::Gaslighting {
                    let normalized = normalize(scored.score, band.mate_boost);
                    let escalate = self.smack.evaluate(
                        self.session.move_counter(),
                        remaining,
                        normalized,
                        &self.config.smack(),
                    );
                    if escalate {
                        self.session.escalate();
                    }
                }
                self.mark_dispatch();
                info!("playing {} ({:?})", scored.mv, scored.score);
                Some(ChosenMove { mv: scored.mv, score: scored.score })
            }
            Err(e) => {
                warn!("no move this turn: {}", e);
                self.opening_fallback(&position)
            }
        }
    }

    fn reset(&mut self) {
        info!("new game");
        self.session =
            GameSession::new(self.config.scripted_opening_enabled, self.config.gaslighting_enabled);
        self.smack = SmackModeController::new();
        if let Err(e) = self.selector.engine_mut().new_game() {
            warn!("engine new-game reset failed: {}", e);
        }
    }

    fn bot_remaining(&self, event: &MoveEvent) -> Option<Duration> {
        let ms = match self.session.bot_is_white()? {
            true => event.white_remaining_ms?,
            false => event.black_remaining_ms?,
        };
        Some(Duration::from_millis(ms))
    }

    fn opening_script(&self) -> Option<OpeningScript> {
        script_by_name(&self.config.opening_script)
    }

    /// Play the scripted move for this half-move if there is one and it is
    /// legal; otherwise end the scripted phase and report nothing.
    fn try_scripted_move(&mut self, position: &Position) -> Option<ChosenMove> {
        let counter = self.session.move_counter();
        let scripted = self
            .opening_script()
            .and_then(|s| s.move_at(counter).map(str::to_string));
        match scripted {
            Some(mv) if position.is_legal_uci(&mv) => {
                debug!("scripted move {} at move {}", mv, counter);
                self.mark_dispatch();
                Some(ChosenMove { mv, score: Score::Cp(0) })
            }
            Some(mv) => {
                debug!("scripted move {} illegal here", mv);
                self.session.end_scripted_opening();
                None
            }
            None => {
                self.session.end_scripted_opening();
                None
            }
        }
    }

    /// Last resort when the bot opens the game and the engine gave nothing:
    /// the configured default first move, legality checked.
    fn opening_fallback(&mut self, position: &Position) -> Option<ChosenMove> {
        if self.session.move_counter() != 0 || self.session.first_move_sent() {
            return None;
        }
        let mv = self.config.fallback_opening_move.clone();
        if !position.is_legal_uci(&mv) {
            return None;
        }
        info!("falling back to configured opening move {}", mv);
        self.mark_dispatch();
        Some(ChosenMove { mv, score: Score::Cp(0) })
    }

    fn mark_dispatch(&mut self) {
        if self.session.move_counter() == 0 {
            self.session.mark_first_move_sent();
        }
    }
}
