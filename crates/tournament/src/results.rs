//! Game and match results, serialisable to JSON

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::match_runner::MatchError;

/// Result of a single game
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    pub fn flip(self) -> Self {
        match self {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
            GameResult::Draw => GameResult::Draw,
        }
    }

    /// PGN-style result string, from white's side
    pub fn as_pgn(self) -> &'static str {
        match self {
            GameResult::Win => "1-0",
            GameResult::Loss => "0-1",
            GameResult::Draw => "1/2-1/2",
        }
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Termination {
    Checkmate,
    Stalemate,
    Repetition,
    FiftyMoves,
    InsufficientMaterial,
    /// The mover's clock reached zero
    FlagFall,
    /// The mover returned a move that is not legal here
    IllegalMove,
    /// The mover returned an error instead of a move
    EngineFailure,
    /// Ply limit reached; scored as a draw
    MoveCap,
}

/// One finished game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    pub white: String,
    pub black: String,
    /// From white's perspective
    pub result: GameResult,
    pub termination: Termination,
    pub start_fen: String,
    /// Moves in UCI notation
    pub moves: Vec<String>,
    pub white_time_left_ms: u64,
    pub black_time_left_ms: u64,
}

/// Result of a match (multiple games), from engine1's perspective
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub engine1: String,
    pub engine2: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub games: Vec<GameRecord>,
}

impl MatchResult {
    pub fn new(engine1: &str, engine2: &str) -> Self {
        Self {
            engine1: engine1.to_string(),
            engine2: engine2.to_string(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, result: GameResult, game: GameRecord) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
        self.games.push(game);
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score from engine1's perspective (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }

    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> Result<(), MatchError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| MatchError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> Result<Self, MatchError> {
        let contents = std::fs::read_to_string(path).map_err(|source| MatchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Match: {} vs {} ===\n\n", self.engine1, self.engine2));
        report.push_str(&format!(
            "{:<4} {:<20} {:<20} {:<8} {:<22} {:>6}\n",
            "#", "White", "Black", "Result", "Termination", "Plies"
        ));
        report.push_str(&"-".repeat(84));
        report.push('\n');

        for (i, game) in self.games.iter().enumerate() {
            report.push_str(&format!(
                "{:<4} {:<20} {:<20} {:<8} {:<22} {:>6}\n",
                i + 1,
                game.white,
                game.black,
                game.result.as_pgn(),
                format!("{:?}", game.termination),
                game.moves.len()
            ));
        }

        report.push_str(&format!(
            "\n{}: {} wins, {} losses, {} draws ({:.1}%)\n",
            self.engine1,
            self.wins,
            self.losses,
            self.draws,
            self.score() * 100.0
        ));
        report
    }
}
