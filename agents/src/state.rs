use isolation_core::{Board, Move, Player};

/// The view of a game position the search needs.
///
/// Searches only ever forecast new states; nothing here mutates the
/// receiver, so recursion needs no undo step.
pub trait GameState: Sized {
    /// The player to move.
    fn active_player(&self) -> Player;

    /// Legal moves for `player`, in a deterministic order.
    fn legal_moves(&self, player: Player) -> Vec<Move>;

    /// Legal moves for the player to move.
    fn active_moves(&self) -> Vec<Move> {
        self.legal_moves(self.active_player())
    }

    /// The state after the active player makes `mv`.
    fn forecast_move(&self, mv: Move) -> Self;

    fn is_winner(&self, player: Player) -> bool;

    fn is_loser(&self, player: Player) -> bool;

    /// The player's cell, or `None` before they have moved.
    fn player_location(&self, player: Player) -> Option<Move>;

    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Number of unoccupied cells.
    fn blank_count(&self) -> usize;
}

impl GameState for Board {
    fn active_player(&self) -> Player {
        Board::active_player(self)
    }

    fn legal_moves(&self, player: Player) -> Vec<Move> {
        Board::legal_moves(self, player)
    }

    fn forecast_move(&self, mv: Move) -> Self {
        Board::forecast_move(self, mv)
    }

    fn is_winner(&self, player: Player) -> bool {
        Board::is_winner(self, player)
    }

    fn is_loser(&self, player: Player) -> bool {
        Board::is_loser(self, player)
    }

    fn player_location(&self, player: Player) -> Option<Move> {
        Board::player_location(self, player)
    }

    fn width(&self) -> usize {
        Board::width(self)
    }

    fn height(&self) -> usize {
        Board::height(self)
    }

    fn blank_count(&self) -> usize {
        Board::blank_count(self)
    }
}
