use crate::board::Board;
use crate::types::Move;

/// Perft (performance test) results for one search.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PerftResults {
    /// Leaf positions at the requested depth, plus early game ends
    pub nodes: u64,
    /// Positions where the player to move was isolated before the depth ran out
    pub isolations: u64,
}

impl PerftResults {
    /// Combines results from child nodes.
    pub fn add(&mut self, other: &Self) {
        self.nodes += other.nodes;
        self.isolations += other.isolations;
    }
}

/// Counts the leaves of the legal-move tree to the given depth.
/// A position where the player to move is stuck counts as one leaf.
pub fn perft(board: &Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.active_moves();
    if moves.is_empty() {
        return 1;
    }

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|&mv| perft(&board.forecast_move(mv), depth - 1))
        .sum()
}

/// Performs perft with the count broken down per root move.
pub fn perft_divide(board: &Board, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    board
        .active_moves()
        .into_iter()
        .map(|mv| (mv, perft(&board.forecast_move(mv), depth - 1)))
        .collect()
}

/// Performs perft while also counting early isolations.
pub fn perft_detailed(board: &Board, depth: u8) -> PerftResults {
    let mut results = PerftResults::default();

    if depth == 0 {
        results.nodes = 1;
        return results;
    }

    let moves = board.active_moves();
    if moves.is_empty() {
        results.nodes = 1;
        results.isolations = 1;
        return results;
    }

    for mv in moves {
        let child = perft_detailed(&board.forecast_move(mv), depth - 1);
        results.add(&child);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perft_empty_board() {
        let board = Board::default();
        assert_eq!(perft(&board, 0), 1);
        assert_eq!(perft(&board, 1), 49);
        // Player Two may take any of the 48 remaining cells
        assert_eq!(perft(&board, 2), 49 * 48);
    }

    #[test]
    fn test_perft_divide_matches_total() {
        let board = Board::with_moves(5, 5, &[Move::new(2, 2), Move::new(0, 0)]).unwrap();

        let divided = perft_divide(&board, 3);
        let total: u64 = divided.iter().map(|(_, count)| count).sum();

        assert_eq!(divided.len(), 8);
        assert_eq!(total, perft(&board, 3));
    }

    #[test]
    fn test_perft_detailed_counts_isolation() {
        // 1x2 board: after both placements Player One has nowhere to go
        let board = Board::new(2, 1).unwrap();
        let results = perft_detailed(&board, 4);

        assert_eq!(results.nodes, 2);
        assert_eq!(results.isolations, 2);
        assert_eq!(results.nodes, perft(&board, 4));
    }
}
