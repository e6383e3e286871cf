use tracing::debug;

use crate::{
    board::Game,
    error::GameError,
    game::GameState,
    types::*,
};

pub fn move_to_uci(mv: Move) -> String {
    mv.to_string()
}

/// Resolves long algebraic notation against the legal moves of `state`, so
/// the piece kind and castling encoding always come from the board.
pub fn parse_uci_move<G: GameState + ?Sized>(state: &G, txt: &str) -> Option<Move> {
    if txt.len() < 4 || !txt.is_ascii() {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt[4..].chars().next() {
        Some(c) => Some(PieceKind::from_promo_char(c)?),
        None => None,
    };

    state
        .legal_moves()
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promo == promo)
}

/// Builds a game from the arguments of a UCI `position` command:
/// `startpos [moves ...]` or `fen <fields> [moves ...]`.
pub fn set_position_from_uci(args: &[&str]) -> Result<Game, GameError> {
    let moves_at = args.iter().position(|&a| a == "moves");
    let (setup, moves) = match moves_at {
        Some(i) => (&args[..i], &args[i + 1..]),
        None => (args, &[][..]),
    };

    let mut game = match setup.split_first() {
        None | Some((&"startpos", _)) => Game::startpos(),
        Some((&"fen", fields)) => Game::from_fen(&fields.join(" "))?,
        Some((other, _)) => {
            return Err(GameError::InvalidFen {
                fen: (*other).to_string(),
                reason: "expected `startpos` or `fen`".to_string(),
            });
        }
    };

    for txt in moves {
        let mv = parse_uci_move(&game, txt).ok_or_else(|| GameError::IllegalMove(txt.to_string()))?;
        game.make_move(mv);
    }
    debug!(fen = %game.fen(), plies = moves.len(), "position set");
    Ok(game)
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
