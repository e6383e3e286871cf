use crate::game::{GameState, ScopedMove};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft<G: GameState + ?Sized>(state: &mut G, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = state.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves {
        let mut child = ScopedMove::new(&mut *state, mv);
        nodes += perft(&mut *child, depth - 1);
    }
    nodes
}
