//! [`GameState`] implementation backed by `cozy_chess`.
//!
//! `cozy_chess::Board` is a copy-make board, so undo is a stack of the
//! boards seen before each move. The stack doubles as the game history used
//! for repetition detection.

use std::fmt;
use std::str::FromStr;

use cozy_chess::{Board, GameStatus, Piece, Square};
use tracing::error;

use crate::error::GameError;
use crate::game::GameState;
use crate::types::{file_of, Color, Move, PieceKind};

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    /// Board before each played move, paired with that move.
    undo_stack: Vec<(Board, Move)>,
    /// Position hashes from the initial position up to the current one.
    history: Vec<u64>,
}

impl Game {
    pub fn startpos() -> Self {
        Self::from_board(Board::default())
    }

    /// Parses a FEN string. The halfmove and fullmove fields are optional.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let fields = fen.split_whitespace().count();
        let padded = match fields {
            4 => format!("{} 0 1", fen.trim()),
            5 => format!("{} 1", fen.trim()),
            _ => fen.trim().to_string(),
        };
        let board = Board::from_fen(&padded, false).map_err(|e| GameError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{e:?}"),
        })?;
        Ok(Self::from_board(board))
    }

    pub fn from_board(board: Board) -> Self {
        let history = vec![board.hash()];
        Self {
            board,
            undo_stack: Vec::new(),
            history,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fen(&self) -> String {
        self.board.to_string()
    }

    /// Number of moves played since the game was set up.
    pub fn ply(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn piece_at(&self, sq: u8) -> Option<(Color, PieceKind)> {
        let square = Square::try_index(sq as usize)?;
        let kind = self.board.piece_on(square)?;
        let color = self.board.color_on(square)?;
        Some((color.into(), kind.into()))
    }

    /// Current position has occurred at least three times.
    pub fn is_threefold_repetition(&self) -> bool {
        let Some(&current) = self.history.last() else {
            return false;
        };
        self.history.iter().filter(|&&h| h == current).count() >= 3
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.board.halfmove_clock() >= 100
    }

    /// Neither side can possibly deliver mate: bare kings, a single minor
    /// piece, or only bishops all standing on one square colour.
    pub fn is_insufficient_material(&self) -> bool {
        let b = &self.board;
        let heavy = b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        if !heavy.is_empty() {
            return false;
        }
        let knights = b.pieces(Piece::Knight);
        let bishops = b.pieces(Piece::Bishop);
        if knights.len() + bishops.len() <= 1 {
            return true;
        }
        if !knights.is_empty() {
            return false;
        }
        let mut shades = bishops
            .into_iter()
            .map(|s| (s.file() as u8 + s.rank() as u8) % 2);
        match shades.next() {
            Some(first) => shades.all(|s| s == first),
            None => true,
        }
    }

    fn to_core_move(&self, piece: Piece, mv: cozy_chess::Move) -> Move {
        let from = mv.from as u8;
        let mut to = mv.to as u8;
        // cozy_chess encodes castling as the king capturing its own rook.
        if piece == Piece::King && self.board.color_on(mv.to) == Some(self.board.side_to_move()) {
            let king_file = if file_of(to) > file_of(from) { 6 } else { 2 };
            to = (from & !7) | king_file;
        }
        Move {
            from,
            to,
            piece: piece.into(),
            promo: mv.promotion.map(PieceKind::from),
        }
    }

    fn to_cozy_move(&self, mv: Move) -> cozy_chess::Move {
        let mut to = mv.to;
        if mv.is_castle() {
            let rook_file = if file_of(mv.to) > file_of(mv.from) { 7 } else { 0 };
            to = (mv.from & !7) | rook_file;
        }
        cozy_chess::Move {
            from: Square::index(mv.from as usize),
            to: Square::index(to as usize),
            promotion: mv.promo.map(Piece::from),
        }
    }
}

impl GameState for Game {
    fn legal_moves_into(&self, moves: &mut Vec<Move>) {
        moves.clear();
        self.board.generate_moves(|piece_moves| {
            let piece = piece_moves.piece;
            for mv in piece_moves {
                moves.push(self.to_core_move(piece, mv));
            }
            false
        });
    }

    fn make_move(&mut self, mv: Move) {
        let cozy_mv = self.to_cozy_move(mv);
        debug_assert!(self.board.is_legal(cozy_mv), "illegal move {mv} in {}", self.board);
        let before = self.board.clone();
        self.board.play_unchecked(cozy_mv);
        self.undo_stack.push((before, mv));
        self.history.push(self.board.hash());
    }

    fn undo_move(&mut self, mv: Move) {
        match self.undo_stack.pop() {
            Some((before, played)) => {
                debug_assert_eq!(played, mv, "undo_move out of order");
                self.board = before;
                self.history.pop();
            }
            None => error!(%mv, "undo_move called with no move to take back"),
        }
    }

    fn side_to_move(&self) -> Color {
        self.board.side_to_move().into()
    }

    fn is_checkmate(&self) -> bool {
        self.board.status() == GameStatus::Won
    }

    fn is_draw(&self) -> bool {
        self.board.status() == GameStatus::Drawn
            || self.is_threefold_repetition()
            || self.is_insufficient_material()
    }

    fn is_in_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    fn piece_count(&self, color: Color, kind: PieceKind) -> u32 {
        self.board.colored_pieces(color.into(), kind.into()).len()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::startpos()
    }
}

impl FromStr for Game {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
