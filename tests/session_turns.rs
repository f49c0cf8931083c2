use sandbot::bot::Bot;
use sandbot::config::BotConfig;
use sandbot::engine::fake::ScriptedEngine;
use sandbot::engine::AnalysisLine;
use sandbot::event::MoveEvent;
use sandbot::score::Score;

const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";

fn event(fen: &str, mv: Option<&str>, bot_is_white: Option<bool>) -> MoveEvent {
    MoveEvent {
        fen: fen.to_string(),
        mv: mv.map(str::to_string),
        white_remaining_ms: None,
        black_remaining_ms: None,
        bot_is_white,
        new_game: false,
    }
}

fn bot() -> Bot<ScriptedEngine> {
    let lines =
        vec![AnalysisLine { mv: "g1f3".to_string(), depth: 12, score: Score::Cp(30) }];
    let mut cfg = BotConfig::default();
    cfg.scripted_opening_enabled = false;
    Bot::new(ScriptedEngine::repeating(lines), cfg)
}

#[test]
fn turn_comes_from_the_move_counter_alone() {
    let mut bot = bot();
    // Counter 0: white to move, bot is white.
    assert!(bot.on_move_event(&event(STARTPOS, None, Some(true))).is_some());
    assert_eq!(bot.session().move_counter(), 0);

    // Bare refreshes, replayed as often as the upstream likes, do not touch
    // parity: still the bot's turn.
    for _ in 0..3 {
        assert!(bot.on_move_event(&event(STARTPOS, None, None)).is_some());
    }
    assert_eq!(bot.session().move_counter(), 0);
    assert!(bot.session().is_white_to_move());

    // A concrete move flips the turn.
    assert!(bot.on_move_event(&event(AFTER_E4, Some("e2e4"), None)).is_none());
    assert_eq!(bot.session().move_counter(), 1);
    assert!(!bot.session().is_white_to_move());
}

#[test]
fn no_color_signal_means_no_moves() {
    let mut bot = bot();
    assert!(bot.on_move_event(&event(STARTPOS, None, None)).is_none());
}

#[test]
fn color_signal_is_sticky_for_the_game() {
    let mut bot = bot();
    assert!(bot.on_move_event(&event(STARTPOS, None, Some(false))).is_none(), "bot is black");
    // A later contradictory signal is ignored; still black, still not our turn.
    assert!(bot.on_move_event(&event(STARTPOS, None, Some(true))).is_none());
    assert_eq!(bot.session().bot_is_white(), Some(false));
    // After white's move it is black's turn.
    assert!(bot.on_move_event(&event(AFTER_E4, Some("e2e4"), None)).is_some());
}

#[test]
fn initial_budget_is_captured_once_from_the_bots_clock() {
    let mut bot = bot();
    let mut ev = event(STARTPOS, None, Some(true));
    ev.white_remaining_ms = Some(180_000);
    ev.black_remaining_ms = Some(60_000);
    bot.on_move_event(&ev);
    assert_eq!(
        bot.session().initial_clock_budget(),
        Some(std::time::Duration::from_millis(180_000))
    );

    // Later, lower readings never overwrite the denominator.
    let mut ev = event(STARTPOS, None, None);
    ev.white_remaining_ms = Some(90_000);
    bot.on_move_event(&ev);
    assert_eq!(
        bot.session().initial_clock_budget(),
        Some(std::time::Duration::from_millis(180_000))
    );
}
