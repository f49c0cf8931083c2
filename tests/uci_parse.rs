use sandbot::engine::uci::parse_info_line;
use sandbot::score::Score;

#[test]
fn parses_a_full_multipv_record() {
    let line = "info depth 12 seldepth 19 multipv 2 score cp -35 nodes 123456 nps 987654 hashfull 13 time 128 pv e7e5 g1f3 b8c6";
    let (slot, parsed) = parse_info_line(line).expect("parseable info line");
    assert_eq!(slot, 2);
    assert_eq!(parsed.mv, "e7e5");
    assert_eq!(parsed.depth, 12);
    assert_eq!(parsed.score, Score::Cp(-35));
}

#[test]
fn multipv_defaults_to_the_first_slot() {
    let (slot, parsed) =
        parse_info_line("info depth 8 score cp 51 pv d2d4").expect("single-pv line");
    assert_eq!(slot, 1);
    assert_eq!(parsed.mv, "d2d4");
}

#[test]
fn parses_mate_scores_both_ways() {
    let (_, parsed) =
        parse_info_line("info depth 20 multipv 1 score mate 3 pv h5f7").unwrap();
    assert_eq!(parsed.score, Score::MateIn(3));
    let (_, parsed) =
        parse_info_line("info depth 20 multipv 1 score mate -2 pv a7a8").unwrap();
    assert_eq!(parsed.score, Score::MateIn(-2));
}

#[test]
fn chatter_lines_are_ignored() {
    assert!(parse_info_line("info depth 12 currmove e2e4 currmovenumber 1").is_none());
    assert!(parse_info_line("info string NNUE evaluation using nn-abc.nnue").is_none());
    assert!(parse_info_line("info nodes 4242 nps 100000").is_none());
    assert!(parse_info_line("bestmove e2e4 ponder e7e5").is_none());
    assert!(parse_info_line("readyok").is_none());
}

#[test]
fn score_without_pv_is_not_a_candidate() {
    // Upper/lower-bound updates sometimes arrive without a pv.
    assert!(parse_info_line("info depth 10 score cp 12 lowerbound nodes 99").is_none());
}
