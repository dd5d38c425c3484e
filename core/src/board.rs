//! Isolation board state: a grid of blank or blocked cells plus the two
//! players' positions. Boards are plain values; forecasting a move returns
//! a new board and leaves the original untouched.

use std::fmt;

use thiserror::Error;

use crate::move_gen::{generate_legal_moves, has_legal_move};
use crate::types::{Move, Player};

/// Standard 7x7 board.
pub const DEFAULT_WIDTH: usize = 7;
pub const DEFAULT_HEIGHT: usize = 7;

/// Errors produced when building a board.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("a {width}x{height} board has no room for both players")]
    TooSmall { width: usize, height: usize },
    #[error("illegal move {mv} for {player} at move {move_number}")]
    IllegalMove {
        mv: Move,
        player: Player,
        move_number: usize,
    },
}

/// Complete state of an Isolation game.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    /// Column-major cells: `row + col * height`. True once visited.
    blocked: Vec<bool>,
    /// Current location of each player, indexed by `Player::index`
    locations: [Option<Move>; 2],
    active: Player,
    move_count: usize,
}

impl Board {
    /// Creates an empty board. Player One moves first.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            blocked: vec![false; width * height],
            locations: [None, None],
            active: Player::One,
            move_count: 0,
        })
    }

    /// Creates a board by replaying `moves` from an empty grid, checking
    /// each one against the active player's legal moves.
    pub fn with_moves(width: usize, height: usize, moves: &[Move]) -> Result<Self, BoardError> {
        let mut board = Self::new(width, height)?;
        for &mv in moves {
            board.try_apply_move(mv)?;
        }
        Ok(board)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The player whose turn it is.
    pub fn active_player(&self) -> Player {
        self.active
    }

    /// The player who moved last.
    pub fn inactive_player(&self) -> Player {
        self.active.opponent()
    }

    /// Number of moves applied so far.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Returns the player's cell, or `None` before their first move.
    pub fn player_location(&self, player: Player) -> Option<Move> {
        self.locations[player.index()]
    }

    fn index(&self, mv: Move) -> usize {
        mv.row + mv.col * self.height
    }

    /// Returns true if the cell is on the board and has not been visited.
    pub fn move_is_legal(&self, mv: Move) -> bool {
        mv.row < self.height && mv.col < self.width && !self.blocked[self.index(mv)]
    }

    /// Returns all blank cells, column by column.
    pub fn blank_spaces(&self) -> Vec<Move> {
        (0..self.width)
            .flat_map(|col| (0..self.height).map(move |row| Move::new(row, col)))
            .filter(|&mv| !self.blocked[self.index(mv)])
            .collect()
    }

    /// Number of blank cells left.
    pub fn blank_count(&self) -> usize {
        self.blocked.iter().filter(|&&cell| !cell).count()
    }

    /// Returns the legal moves for the given player.
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        generate_legal_moves(self, player)
    }

    /// Returns the legal moves for the player to move.
    pub fn active_moves(&self) -> Vec<Move> {
        self.legal_moves(self.active)
    }

    /// Applies a move for the active player and passes the turn.
    /// This does NOT check if the move is legal.
    pub fn apply_move(&mut self, mv: Move) {
        let idx = self.index(mv);
        self.blocked[idx] = true;
        self.locations[self.active.index()] = Some(mv);
        self.active = self.active.opponent();
        self.move_count += 1;
    }

    /// Applies a move after checking it against the active player's legal moves.
    pub fn try_apply_move(&mut self, mv: Move) -> Result<(), BoardError> {
        if !self.active_moves().contains(&mv) {
            return Err(BoardError::IllegalMove {
                mv,
                player: self.active,
                move_number: self.move_count + 1,
            });
        }
        self.apply_move(mv);
        Ok(())
    }

    /// Returns the board after the active player makes `mv`.
    pub fn forecast_move(&self, mv: Move) -> Self {
        let mut next = self.clone();
        next.apply_move(mv);
        next
    }

    /// The active player has no legal moves.
    fn active_is_isolated(&self) -> bool {
        !has_legal_move(self, self.active)
    }

    /// True if `player` moved last and the opponent is now stuck.
    pub fn is_winner(&self, player: Player) -> bool {
        player == self.inactive_player() && self.active_is_isolated()
    }

    /// True if `player` is to move and has nowhere to go.
    pub fn is_loser(&self, player: Player) -> bool {
        player == self.active && self.active_is_isolated()
    }

    /// Returns the game value for `player`: +inf for a win, -inf for a loss,
    /// 0 while the game is still going.
    pub fn utility(&self, player: Player) -> f64 {
        if self.is_winner(player) {
            f64::INFINITY
        } else if self.is_loser(player) {
            f64::NEG_INFINITY
        } else {
            0.0
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            blocked: vec![false; DEFAULT_WIDTH * DEFAULT_HEIGHT],
            locations: [None, None],
            active: Player::One,
            move_count: 0,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.height {
            write!(f, " | ")?;
            for col in 0..self.width {
                let cell = Move::new(row, col);
                let symbol = if !self.blocked[self.index(cell)] {
                    ' '
                } else if self.player_location(Player::One) == Some(cell) {
                    Player::One.symbol()
                } else if self.player_location(Player::Two) == Some(cell) {
                    Player::Two.symbol()
                } else {
                    '-'
                };
                write!(f, "{} | ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board() {
        let board = Board::default();
        assert_eq!(board.blank_spaces().len(), 49);
        assert_eq!(board.blank_count(), 49);
        assert_eq!(board.active_player(), Player::One);
        assert_eq!(board.legal_moves(Player::One).len(), 49);
        assert_eq!(board.player_location(Player::One), None);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            Board::new(0, 5),
            Err(BoardError::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
    }

    #[test]
    fn test_error_messages() {
        let too_small = BoardError::TooSmall {
            width: 1,
            height: 1,
        };
        assert_eq!(too_small.to_string(), "a 1x1 board has no room for both players");
        let invalid = BoardError::InvalidDimensions {
            width: 0,
            height: 5,
        };
        assert_eq!(invalid.to_string(), "board dimensions must be positive, got 0x5");
    }

    #[test]
    fn test_apply_move() {
        let mut board = Board::default();
        board.apply_move(Move::new(2, 3));

        assert_eq!(board.active_player(), Player::Two);
        assert_eq!(board.inactive_player(), Player::One);
        assert_eq!(board.player_location(Player::One), Some(Move::new(2, 3)));
        assert!(!board.move_is_legal(Move::new(2, 3)));
        assert_eq!(board.blank_count(), 48);
        assert_eq!(board.move_count(), 1);
        // Player Two has not moved yet and can go anywhere still blank
        assert_eq!(board.active_moves().len(), 48);
    }

    #[test]
    fn test_forecast_does_not_mutate() {
        let board = Board::default();
        let next = board.forecast_move(Move::new(0, 0));

        assert_eq!(board, Board::default());
        assert_ne!(next, board);
        assert_eq!(next.player_location(Player::One), Some(Move::new(0, 0)));
    }

    #[test]
    fn test_move_is_legal_bounds() {
        let board = Board::new(5, 3).unwrap();
        assert!(board.move_is_legal(Move::new(2, 4)));
        assert!(!board.move_is_legal(Move::new(3, 0)));
        assert!(!board.move_is_legal(Move::new(0, 5)));
    }

    #[test]
    fn test_with_moves_rejects_illegal() {
        let result = Board::with_moves(7, 7, &[Move::new(3, 3), Move::new(0, 0), Move::new(3, 4)]);
        assert_eq!(
            result,
            Err(BoardError::IllegalMove {
                mv: Move::new(3, 4),
                player: Player::One,
                move_number: 3,
            })
        );
    }

    #[test]
    fn test_winner_and_loser() {
        // On a 1x2 board, each player gets one cell and Player One is stuck
        let board = Board::with_moves(2, 1, &[Move::new(0, 0), Move::new(0, 1)]).unwrap();

        assert!(board.is_loser(Player::One));
        assert!(board.is_winner(Player::Two));
        assert!(!board.is_winner(Player::One));
        assert!(!board.is_loser(Player::Two));
        assert_eq!(board.utility(Player::One), f64::NEG_INFINITY);
        assert_eq!(board.utility(Player::Two), f64::INFINITY);
    }

    #[test]
    fn test_utility_while_playing() {
        let board = Board::with_moves(7, 7, &[Move::new(3, 3)]).unwrap();
        assert_eq!(board.utility(Player::One), 0.0);
        assert_eq!(board.utility(Player::Two), 0.0);
        assert!(!board.is_winner(Player::One) && !board.is_loser(Player::One));
    }

    #[test]
    fn test_display() {
        let board = Board::with_moves(3, 2, &[Move::new(0, 0), Move::new(1, 2)]).unwrap();
        let mut with_block = board.clone();
        with_block.apply_move(Move::new(1, 1));

        assert_eq!(board.to_string(), " | 1 |   |   | \n |   |   | 2 | \n");
        assert_eq!(with_block.to_string(), " | - |   |   | \n |   | 1 | 2 | \n");
    }
}
