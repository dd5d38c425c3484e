use crate::board::Board;
use crate::types::{Move, Player};

/// The eight L-shaped jumps a placed player may make, in generation order.
pub const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Generates all legal moves for `player`.
///
/// A player who has not been placed yet may move to any blank cell.
/// Afterwards only knight jumps onto blank, in-bounds cells are legal.
/// The order is deterministic: blank cells column by column, or jumps in
/// [`KNIGHT_OFFSETS`] order.
pub fn generate_legal_moves(board: &Board, player: Player) -> Vec<Move> {
    match board.player_location(player) {
        None => board.blank_spaces(),
        Some(from) => KNIGHT_OFFSETS
            .iter()
            .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
            .filter(|&to| board.move_is_legal(to))
            .collect(),
    }
}

/// Returns true if `player` has at least one legal move.
pub fn has_legal_move(board: &Board, player: Player) -> bool {
    match board.player_location(player) {
        None => board.blank_count() > 0,
        Some(from) => KNIGHT_OFFSETS
            .iter()
            .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
            .any(|to| board.move_is_legal(to)),
    }
}
