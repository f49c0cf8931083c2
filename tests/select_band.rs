use std::time::Duration;

use sandbot::engine::fake::ScriptedEngine;
use sandbot::engine::AnalysisLine;
use sandbot::errors::BotError;
use sandbot::score::{normalize, Score};
use sandbot::select::{MoveSelector, ScoreBandConfig};

fn cp(mv: &str, depth: u32, score: i64) -> AnalysisLine {
    AnalysisLine { mv: mv.to_string(), depth, score: Score::Cp(score) }
}

fn band() -> ScoreBandConfig {
    ScoreBandConfig { max_score_loss: 200, score_floor: -700, mate_boost: 10_000_000 }
}

fn movetime() -> Duration {
    Duration::from_millis(100)
}

#[test]
fn picks_worst_candidate_inside_band() {
    // best 300, loss 200, floor -700 => min acceptable 100; worst above it is 150.
    let lines = vec![cp("a1a2", 12, 300), cp("b1b2", 12, 150), cp("c1c2", 12, 50), cp("d1d2", 12, -50)];
    let mut sel = MoveSelector::new(ScriptedEngine::repeating(lines));
    let chosen = sel.select_gaslight("fen", movetime(), 4, &band()).unwrap();
    assert_eq!(chosen.mv, "b1b2");
    assert_eq!(chosen.score, Score::Cp(150));
}

#[test]
fn floor_clamps_the_band() {
    // best -600 => best - loss = -800, clamped to floor -700; only -650 is above it.
    let lines = vec![cp("a1a2", 10, -600), cp("b1b2", 10, -650), cp("c1c2", 10, -720)];
    let mut sel = MoveSelector::new(ScriptedEngine::repeating(lines));
    let chosen = sel.select_gaslight("fen", movetime(), 3, &band()).unwrap();
    assert_eq!(chosen.mv, "b1b2");
}

#[test]
fn falls_back_to_best_when_nothing_clears_the_band() {
    // Everything at or below the floor: strictly-above test fails for all,
    // including the best candidate itself.
    let lines = vec![cp("a1a2", 10, -800), cp("b1b2", 10, -900)];
    let mut sel = MoveSelector::new(ScriptedEngine::repeating(lines));
    let chosen = sel.select_gaslight("fen", movetime(), 2, &band()).unwrap();
    assert_eq!(chosen.mv, "a1a2", "fallback must be the best-scoring candidate");
}

#[test]
fn shallow_lines_are_discarded_as_noise() {
    // The depth-10 line scores far better but comes from an older iteration.
    let lines = vec![cp("a1a2", 12, 100), cp("b1b2", 12, 80), cp("z1z2", 10, 900)];
    let mut sel = MoveSelector::new(ScriptedEngine::repeating(lines));
    let chosen = sel.select_gaslight("fen", movetime(), 3, &band()).unwrap();
    assert_eq!(chosen.mv, "b1b2");
}

#[test]
fn mate_for_us_dominates_any_centipawn_line() {
    let lines = vec![
        AnalysisLine { mv: "h5f7".to_string(), depth: 18, score: Score::MateIn(3) },
        cp("a1a2", 18, 500),
        AnalysisLine { mv: "d1d2".to_string(), depth: 18, score: Score::MateIn(-1) },
    ];
    let mut sel = MoveSelector::new(ScriptedEngine::repeating(lines));
    // Band of 200 around mate-in-3 excludes every centipawn line.
    let chosen = sel.select_gaslight("fen", movetime(), 3, &band()).unwrap();
    assert_eq!(chosen.mv, "h5f7");
    assert_eq!(chosen.score, Score::MateIn(3), "original unit is preserved");
}

#[test]
fn selection_satisfies_the_band_property() {
    let scores = [420, 390, 250, 240, 130, -20, -710];
    let lines: Vec<AnalysisLine> =
        scores.iter().enumerate().map(|(i, &s)| cp(&format!("m{}", i), 14, s)).collect();
    let band = band();
    let mut sel = MoveSelector::new(ScriptedEngine::repeating(lines));
    let chosen = sel.select_gaslight("fen", movetime(), scores.len() as u32, &band).unwrap();

    let s = normalize(chosen.score, band.mate_boost);
    let best = scores.iter().copied().max().unwrap();
    let min_acceptable = (best - band.max_score_loss).max(band.score_floor);
    assert!(s > min_acceptable && s <= best, "score {} outside ({}, {}]", s, min_acceptable, best);
    assert_eq!(s, 240, "worst candidate strictly above 220");
}

#[test]
fn equal_scores_stay_selectable() {
    let lines = vec![cp("a1a2", 12, 300), cp("b1b2", 12, 150), cp("c1c2", 12, 150)];
    let mut sel = MoveSelector::new(ScriptedEngine::repeating(lines));
    let chosen = sel.select_gaslight("fen", movetime(), 3, &band()).unwrap();
    assert_eq!(chosen.score, Score::Cp(150));
}

#[test]
fn select_best_returns_the_single_line_unmodified() {
    let lines = vec![AnalysisLine { mv: "h5f7".to_string(), depth: 20, score: Score::MateIn(3) }];
    let mut sel = MoveSelector::new(ScriptedEngine::repeating(lines));
    let chosen = sel.select_best("fen", movetime()).unwrap();
    assert_eq!(chosen.mv, "h5f7");
    assert_eq!(chosen.score, Score::MateIn(3));
}

#[test]
fn best_query_asks_for_one_line_gaslight_for_many() {
    let mut sel = MoveSelector::new(ScriptedEngine::repeating(vec![cp("a1a2", 8, 10)]));
    sel.select_best("fen", movetime()).unwrap();
    sel.select_gaslight("fen", movetime(), 9, &band()).unwrap();
    let engine = sel.engine_mut();
    assert_eq!(engine.queries[0].2, 1);
    assert_eq!(engine.queries[1].2, 9);
}

#[test]
fn empty_candidate_list_is_an_error() {
    let mut sel = MoveSelector::new(ScriptedEngine::repeating(vec![]));
    match sel.select_gaslight("fen", movetime(), 5, &band()) {
        Err(BotError::NoCandidateMoves) => {}
        other => panic!("expected NoCandidateMoves, got {:?}", other.map(|c| c.mv)),
    }
    match sel.select_best("fen", movetime()) {
        Err(BotError::NoCandidateMoves) => {}
        other => panic!("expected NoCandidateMoves, got {:?}", other.map(|c| c.mv)),
    }
}
