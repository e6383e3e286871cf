//! Match runner for playing games between engines

use chess_core::{Clock, Color, Engine, Game, GameClock, GameError, GameState, STARTPOS_FEN};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::results::{GameRecord, GameResult, MatchResult, Termination};

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("bad start position: {0}")]
    StartPosition(#[from] GameError),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to (de)serialize results: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for a match
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Starting time on each side's clock
    pub initial_time: Duration,
    /// Added to a clock after every move made on time
    pub increment: Duration,
    /// Maximum plies per game before declaring draw
    pub max_plies: u32,
    /// Whether to alternate colors each game
    pub alternate_colors: bool,
    /// Position every game starts from
    pub start_fen: String,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            initial_time: Duration::from_secs(60),
            increment: Duration::ZERO,
            max_plies: 400,
            alternate_colors: true,
            start_fen: STARTPOS_FEN.to_string(),
        }
    }
}

/// Runs matches between two engines
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Run a match between two engines
    ///
    /// Returns the result from engine1's perspective
    pub fn run_match(
        &self,
        engine1: &mut dyn Engine,
        engine2: &mut dyn Engine,
    ) -> Result<MatchResult, MatchError> {
        let mut result = MatchResult::new(engine1.name(), engine2.name());

        for game_num in 0..self.config.num_games {
            // Alternate colors if configured
            let engine1_white = !self.config.alternate_colors || game_num % 2 == 0;

            let (record, outcome) = if engine1_white {
                let record = self.play_game(engine1, engine2)?;
                let outcome = record.result;
                (record, outcome)
            } else {
                // Flip result since engine1 is black
                let record = self.play_game(engine2, engine1)?;
                let outcome = record.result.flip();
                (record, outcome)
            };

            info!(
                game = game_num + 1,
                of = self.config.num_games,
                result = record.result.as_pgn(),
                termination = ?record.termination,
                plies = record.moves.len(),
                "game finished"
            );
            result.record(outcome, record);
        }

        Ok(result)
    }

    /// Play a single game; the record's result is from white's perspective
    pub fn play_game(
        &self,
        white: &mut dyn Engine,
        black: &mut dyn Engine,
    ) -> Result<GameRecord, MatchError> {
        let mut game = Game::from_fen(&self.config.start_fen)?;
        white.new_game();
        black.new_game();

        let mut clocks = [
            GameClock::with_increment(self.config.initial_time, self.config.increment),
            GameClock::with_increment(self.config.initial_time, self.config.increment),
        ];
        let mut moves = Vec::new();

        let (result, termination) = loop {
            if let Some(ended) = Self::adjudicate(&game) {
                break ended;
            }
            if moves.len() as u32 >= self.config.max_plies {
                break (GameResult::Draw, Termination::MoveCap);
            }

            let side = game.side_to_move();
            // The mover losing, as seen from white
            let mover_loses = if side == Color::White {
                GameResult::Loss
            } else {
                GameResult::Win
            };
            let legal = game.legal_moves();

            let mover: &mut dyn Engine = if side == Color::White { &mut *white } else { &mut *black };
            let clock = &mut clocks[side.idx()];
            clock.start_turn();
            let choice = mover.choose_move(&mut game, &*clock);
            clock.end_turn();

            if clock.is_flagged() {
                break (mover_loses, Termination::FlagFall);
            }
            let mv = match choice {
                Ok(mv) => mv,
                Err(e) => {
                    warn!(engine = mover.name(), error = %e, "engine failed to move");
                    break (mover_loses, Termination::EngineFailure);
                }
            };
            if !legal.contains(&mv) {
                warn!(engine = mover.name(), %mv, fen = %game.fen(), "illegal move");
                break (mover_loses, Termination::IllegalMove);
            }

            game.make_move(mv);
            moves.push(mv.to_string());
        };

        Ok(GameRecord {
            white: white.name().to_string(),
            black: black.name().to_string(),
            result,
            termination,
            start_fen: self.config.start_fen.clone(),
            moves,
            white_time_left_ms: clocks[Color::White.idx()].remaining_ms(),
            black_time_left_ms: clocks[Color::Black.idx()].remaining_ms(),
        })
    }

    /// Decide a game that is over on the board
    fn adjudicate(game: &Game) -> Option<(GameResult, Termination)> {
        if game.is_checkmate() {
            let result = if game.side_to_move() == Color::White {
                GameResult::Loss // White is mated, white loses
            } else {
                GameResult::Win // Black is mated, white wins
            };
            return Some((result, Termination::Checkmate));
        }
        if !game.is_draw() {
            return None;
        }
        let termination = if game.is_threefold_repetition() {
            Termination::Repetition
        } else if game.is_fifty_move_draw() {
            Termination::FiftyMoves
        } else if game.is_insufficient_material() {
            Termination::InsufficientMaterial
        } else {
            Termination::Stalemate
        };
        Some((GameResult::Draw, termination))
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
