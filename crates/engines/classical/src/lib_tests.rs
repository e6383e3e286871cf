use super::*;
use std::cell::Cell;

use chess_core::{Color, FixedClock, Game, PieceKind};

// =============================================================================
// One-ply fan of scripted children
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
struct Child {
    white_pawns: u32,
    black_pawns: u32,
    check: bool,
    mate: bool,
}

/// Root position with white to move and one move per child. Children have no
/// moves of their own and are not terminal unless scripted as mate.
#[derive(Debug, Clone)]
struct FanGame {
    children: Vec<Child>,
    at: Option<usize>,
}

impl FanGame {
    fn new(children: Vec<Child>) -> Self {
        Self { children, at: None }
    }

    fn pawns(diff: i32) -> Child {
        if diff >= 0 {
            Child {
                white_pawns: diff as u32,
                ..Default::default()
            }
        } else {
            Child {
                black_pawns: (-diff) as u32,
                ..Default::default()
            }
        }
    }

    fn root_move(i: usize) -> Move {
        Move::new(i as u8, i as u8, PieceKind::King)
    }
}

impl GameState for FanGame {
    fn legal_moves_into(&self, moves: &mut Vec<Move>) {
        moves.clear();
        if self.at.is_none() {
            moves.extend((0..self.children.len()).map(FanGame::root_move));
        }
    }

    fn make_move(&mut self, mv: Move) {
        assert!(self.at.is_none(), "fan game is one ply deep");
        self.at = Some(mv.from as usize);
    }

    fn undo_move(&mut self, mv: Move) {
        assert_eq!(self.at, Some(mv.from as usize), "undo out of order");
        self.at = None;
    }

    fn side_to_move(&self) -> Color {
        if self.at.is_some() {
            Color::Black
        } else {
            Color::White
        }
    }

    fn is_checkmate(&self) -> bool {
        self.at.is_some_and(|i| self.children[i].mate)
    }

    fn is_draw(&self) -> bool {
        false
    }

    fn is_in_check(&self) -> bool {
        self.at.is_some_and(|i| self.children[i].check || self.children[i].mate)
    }

    fn piece_count(&self, color: Color, kind: PieceKind) -> u32 {
        let Some(i) = self.at else { return 0 };
        match (kind, color) {
            (PieceKind::Pawn, Color::White) => self.children[i].white_pawns,
            (PieceKind::Pawn, Color::Black) => self.children[i].black_pawns,
            _ => 0,
        }
    }
}

/// Plenty of time for the first `budget` queries, then none at all.
struct CountdownClock {
    calls: Cell<u32>,
    budget: u32,
}

impl CountdownClock {
    fn new(budget: u32) -> Self {
        Self {
            calls: Cell::new(0),
            budget,
        }
    }
}

impl Clock for CountdownClock {
    fn remaining_ms(&self) -> u64 {
        let n = self.calls.get() + 1;
        self.calls.set(n);
        if n <= self.budget { 60_000 } else { 0 }
    }
}

fn engine_at_depth(depth: u8) -> ClassicalEngine {
    ClassicalEngine::with_config(EngineConfig {
        depth,
        seed: Some(7),
        ..Default::default()
    })
    .unwrap()
}

// =============================================================================
// Decision rules
// =============================================================================

#[test]
fn test_picks_highest_raw_score() {
    let mut game = FanGame::new(vec![
        FanGame::pawns(0),
        FanGame::pawns(2),
        FanGame::pawns(-1),
    ]);
    let mut engine = engine_at_depth(1);
    let mv = engine.choose_move(&mut game, &FixedClock::UNLIMITED).unwrap();
    assert_eq!(mv, FanGame::root_move(1));
    assert!(game.at.is_none(), "state handed back unchanged");

    let report = engine.last_report().unwrap();
    assert_eq!(report.raw_score, 200);
    assert_eq!(report.score, 200);
    assert_eq!(report.searched, 3);
    assert!(!report.stopped);
    assert!(!report.fallback);
}

#[test]
fn test_ties_go_to_the_earliest_move() {
    let mut game = FanGame::new(vec![FanGame::pawns(1); 4]);
    let mut engine = engine_at_depth(1);
    let mv = engine.choose_move(&mut game, &FixedClock::UNLIMITED).unwrap();
    assert_eq!(mv, FanGame::root_move(0));
}

#[test]
fn test_recent_move_is_penalised() {
    let mut game = FanGame::new(vec![FanGame::pawns(1), FanGame::pawns(1)]);

    let mut memory = RepetitionMemory::new(8);
    memory.push(FanGame::root_move(0));
    let mut engine = ClassicalEngine::with_state(
        EngineConfig {
            depth: 1,
            ..Default::default()
        },
        memory,
        StdRng::seed_from_u64(1),
    )
    .unwrap();

    let mv = engine.choose_move(&mut game, &FixedClock::UNLIMITED).unwrap();
    assert_eq!(mv, FanGame::root_move(1));
    assert_eq!(engine.last_report().unwrap().score, 100);
}

#[test]
fn test_penalty_does_not_outweigh_a_pawn() {
    let mut game = FanGame::new(vec![FanGame::pawns(2), FanGame::pawns(1)]);

    let mut memory = RepetitionMemory::new(8);
    memory.push(FanGame::root_move(0));
    let mut engine = ClassicalEngine::with_state(
        EngineConfig {
            depth: 1,
            ..Default::default()
        },
        memory,
        StdRng::seed_from_u64(1),
    )
    .unwrap();

    let mv = engine.choose_move(&mut game, &FixedClock::UNLIMITED).unwrap();
    assert_eq!(mv, FanGame::root_move(0));
    assert_eq!(engine.last_report().unwrap().score, 150);
}

#[test]
fn test_check_bonus_breaks_equal_material() {
    let mut game = FanGame::new(vec![
        FanGame::pawns(0),
        Child {
            check: true,
            ..Default::default()
        },
    ]);
    let mut engine = engine_at_depth(1);
    let mv = engine.choose_move(&mut game, &FixedClock::UNLIMITED).unwrap();
    assert_eq!(mv, FanGame::root_move(1));
    assert_eq!(engine.last_report().unwrap().score, 50);
}

#[test]
fn test_mate_beats_any_material() {
    let mut game = FanGame::new(vec![
        FanGame::pawns(8),
        Child {
            mate: true,
            ..Default::default()
        },
    ]);
    let mut engine = engine_at_depth(1);
    let mv = engine.choose_move(&mut game, &FixedClock::UNLIMITED).unwrap();
    assert_eq!(mv, FanGame::root_move(1));
    assert_eq!(engine.last_report().unwrap().raw_score, MATE_VALUE);
}

#[test]
fn test_chosen_move_is_remembered() {
    let mut game = FanGame::new(vec![FanGame::pawns(0), FanGame::pawns(1)]);
    let mut engine = engine_at_depth(1);
    assert!(engine.memory().is_empty());

    let mv = engine.choose_move(&mut game, &FixedClock::UNLIMITED).unwrap();
    assert_eq!(engine.memory().len(), 1);
    assert!(engine.memory().contains(&mv));

    // Same position again: the remembered move now carries the penalty
    let second = engine.choose_move(&mut game, &FixedClock::UNLIMITED).unwrap();
    assert_eq!(second, FanGame::root_move(1));
    assert_eq!(engine.last_report().unwrap().score, 50);
}

#[test]
fn test_empty_move_list_propagates_with_state_restored() {
    // Depth 2 asks the children for moves they do not have
    let mut game = FanGame::new(vec![FanGame::pawns(0), FanGame::pawns(1)]);
    let mut engine = engine_at_depth(2);
    let err = engine.choose_move(&mut game, &FixedClock::UNLIMITED).unwrap_err();
    assert_eq!(err, EngineError::EmptyMoveList { depth_remaining: 1 });
    assert!(game.at.is_none());
    assert!(engine.memory().is_empty());
}

// =============================================================================
// Time handling
// =============================================================================

#[test]
fn test_low_time_plays_random_legal_move() {
    let mut game = Game::startpos();
    let fen = game.fen();
    let legal = game.legal_moves();
    let mut engine = engine_at_depth(3);

    let mv = engine.choose_move(&mut game, &FixedClock(10)).unwrap();
    assert!(legal.contains(&mv));
    assert_eq!(game.fen(), fen);

    let report = engine.last_report().unwrap();
    assert!(report.fallback);
    assert_eq!(report.nodes, 0);
    assert_eq!(report.searched, 0);
    assert!(engine.memory().contains(&mv));
}

#[test]
fn test_threshold_itself_still_searches() {
    let mut game = FanGame::new(vec![FanGame::pawns(0), FanGame::pawns(1)]);
    let mut engine = engine_at_depth(1);
    engine.choose_move(&mut game, &FixedClock(50)).unwrap();
    assert!(!engine.last_report().unwrap().fallback);

    engine.choose_move(&mut game, &FixedClock(49)).unwrap();
    assert!(engine.last_report().unwrap().fallback);
}

#[test]
fn test_fallback_is_reproducible_with_a_seed() {
    let picks = |seed| {
        let mut engine = ClassicalEngine::with_config(EngineConfig {
            seed: Some(seed),
            ..Default::default()
        })
        .unwrap();
        let mut game = Game::startpos();
        (0..5)
            .map(|_| engine.choose_move(&mut game, &FixedClock(0)).unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(picks(42), picks(42));
}

#[test]
fn test_time_running_out_mid_search_stops_early() {
    // Initial check plus the checks before the 2nd and 3rd root moves
    let clock = CountdownClock::new(3);
    let mut game = FanGame::new(vec![
        FanGame::pawns(0),
        FanGame::pawns(1),
        FanGame::pawns(2),
        FanGame::pawns(5),
    ]);
    let mut engine = engine_at_depth(1);
    let mv = engine.choose_move(&mut game, &clock).unwrap();

    // The best move was never looked at
    assert_eq!(mv, FanGame::root_move(2));
    let report = engine.last_report().unwrap();
    assert!(report.stopped);
    assert!(!report.fallback);
    assert_eq!(report.searched, 3);
    assert!(game.at.is_none());
}

#[test]
fn test_first_root_move_is_always_searched() {
    // Time runs out right after the fallback check
    let clock = CountdownClock::new(1);
    let mut game = FanGame::new(vec![FanGame::pawns(0), FanGame::pawns(3)]);
    let mut engine = engine_at_depth(1);
    let mv = engine.choose_move(&mut game, &clock).unwrap();
    assert_eq!(mv, FanGame::root_move(0));
    assert_eq!(engine.last_report().unwrap().searched, 1);
}

// =============================================================================
// Real positions
// =============================================================================

#[test]
fn test_startpos_returns_legal_move_and_restores_board() {
    let mut game = Game::startpos();
    let fen = game.fen();
    let legal = game.legal_moves();

    let mut engine = engine_at_depth(3);
    let mv = engine.choose_move(&mut game, &FixedClock::UNLIMITED).unwrap();
    assert!(legal.contains(&mv));
    assert_eq!(game.fen(), fen);
    assert_eq!(game.ply(), 0);
    assert!(engine.last_report().unwrap().nodes > 20);
}

#[test]
fn test_finds_back_rank_mate() {
    let mut game = Game::from_fen("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1").unwrap();
    let mut engine = engine_at_depth(3);
    let mv = engine.choose_move(&mut game, &FixedClock::UNLIMITED).unwrap();
    assert_eq!(mv.to_string(), "e1e8");
    assert_eq!(engine.last_report().unwrap().raw_score, MATE_VALUE);
}

#[test]
fn test_takes_hanging_queen() {
    let mut game = Game::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();
    let mut engine = engine_at_depth(2);
    let mv = engine.choose_move(&mut game, &FixedClock::UNLIMITED).unwrap();
    assert_eq!(mv.to_string(), "d1d5");
}

#[test]
fn test_checkmated_side_has_no_move() {
    let mut game =
        Game::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
    let mut engine = ClassicalEngine::new();
    let err = engine.choose_move(&mut game, &FixedClock::UNLIMITED).unwrap_err();
    assert_eq!(err, EngineError::NoLegalMoves);
    assert!(engine.last_report().is_none());
}

#[test]
fn test_stalemated_side_has_no_move() {
    let mut game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    let mut engine = ClassicalEngine::new();
    let err = engine.choose_move(&mut game, &FixedClock(5)).unwrap_err();
    assert_eq!(err, EngineError::NoLegalMoves);
}

#[test]
fn test_pruning_does_not_change_the_choice() {
    let fens = [
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ];
    for fen in fens {
        let choose = |pruning| {
            let mut engine = ClassicalEngine::with_config(EngineConfig {
                depth: 2,
                pruning,
                ..Default::default()
            })
            .unwrap();
            let mut game = Game::from_fen(fen).unwrap();
            let mv = engine.choose_move(&mut game, &FixedClock::UNLIMITED).unwrap();
            let report = engine.last_report().unwrap().clone();
            (mv, report.score, report.nodes)
        };
        let (pruned_mv, pruned_score, pruned_nodes) = choose(true);
        let (plain_mv, plain_score, plain_nodes) = choose(false);
        assert_eq!(pruned_mv, plain_mv, "{fen}");
        assert_eq!(pruned_score, plain_score, "{fen}");
        assert!(pruned_nodes <= plain_nodes, "{fen}");
    }
}

#[test]
fn test_engine_trait_object() {
    let mut engine = ClassicalEngine::with_config(EngineConfig {
        depth: 2,
        ..Default::default()
    })
    .unwrap();
    let mut game = Game::startpos();
    let legal = game.legal_moves();

    let dyn_engine: &mut dyn Engine = &mut engine;
    assert!(!dyn_engine.name().is_empty());
    let mv = dyn_engine.choose_move(&mut game, &FixedClock::UNLIMITED).unwrap();
    assert!(legal.contains(&mv));
}

#[test]
fn test_invalid_config_rejected() {
    let err = ClassicalEngine::with_config(EngineConfig {
        depth: 0,
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_heavy_weights_cannot_outrank_mate() {
    // Rxa6 wins the queen, Qe8 mates
    let fen = "6k1/5ppp/q7/8/8/8/5PPP/R3Q1K1 w - - 0 1";
    let heavy = |queen| EngineConfig {
        depth: 1,
        weights: PieceWeights {
            queen,
            ..Default::default()
        },
        ..Default::default()
    };

    let err = ClassicalEngine::with_config(heavy(60_000)).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let mut engine = ClassicalEngine::with_config(heavy(2_400)).unwrap();
    let mut game = Game::from_fen(fen).unwrap();
    let mv = engine.choose_move(&mut game, &FixedClock::UNLIMITED).unwrap();
    assert_eq!(mv.to_string(), "e1e8");
}

#[test]
fn test_millis_saturates() {
    assert_eq!(millis(Duration::from_millis(1234)), 1234);
    assert_eq!(millis(Duration::MAX), u64::MAX);
}
