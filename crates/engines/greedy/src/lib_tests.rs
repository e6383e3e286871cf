use super::*;
use chess_core::{FixedClock, Game};

fn best(fen: &str) -> String {
    let mut game = Game::from_fen(fen).unwrap();
    let before = game.fen();
    let mv = GreedyEngine::with_seed(0)
        .choose_move(&mut game, &FixedClock::UNLIMITED)
        .unwrap();
    assert_eq!(game.fen(), before);
    mv.to_string()
}

#[test]
fn test_startpos_material() {
    let game = Game::startpos();
    let expected = 8 * 100 + 2 * 300 + 2 * 300 + 2 * 500 + 900 + 10_000;
    assert_eq!(material(&game, Color::White), expected);
    assert_eq!(material(&game, Color::Black), expected);
}

#[test]
fn test_prefers_mate_over_queen() {
    // Qe8 mates; Rxa6 would win the queen
    assert_eq!(best("6k1/5ppp/q7/8/8/8/5PPP/R3Q1K1 w - - 0 1"), "e1e8");
}

#[test]
fn test_takes_most_valuable_piece() {
    // Knight on c3 can take the rook on b5 or the queen on d5
    assert_eq!(best("4k3/8/8/1r1q4/8/2N5/8/4K3 w - - 0 1"), "c3d5");
}

#[test]
fn test_en_passant_counts_as_capture() {
    assert_eq!(best("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1"), "e5d6");
}

#[test]
fn test_quiet_position_plays_legal_random_move() {
    let mut game = Game::startpos();
    let legal = game.legal_moves();
    let mut engine = GreedyEngine::with_seed(11);
    for _ in 0..10 {
        let mv = engine.choose_move(&mut game, &FixedClock::UNLIMITED).unwrap();
        assert!(legal.contains(&mv));
    }
}

#[test]
fn test_no_moves_is_an_error() {
    let mut game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    let err = GreedyEngine::new()
        .choose_move(&mut game, &FixedClock::UNLIMITED)
        .unwrap_err();
    assert_eq!(err, EngineError::NoLegalMoves);
}
