use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Represents one of the two players in Isolation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Returns the other player.
    pub const fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Returns the player's slot (0 or 1) for indexed storage.
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Returns the digit used to draw this player on the board.
    pub const fn symbol(self) -> char {
        match self {
            Player::One => '1',
            Player::Two => '2',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

/// A move is the cell the active player jumps to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    /// Creates a move to the given cell.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the cell reached by applying a signed offset, if it is not
    /// off the top or left edge. Bounds on the other edges are the board's
    /// concern.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Some(Move { row, col })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Errors produced when parsing a move from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("expected `row,col`, got '{0}'")]
    InvalidFormat(String),
    #[error("invalid coordinate '{0}'")]
    InvalidCoordinate(String),
}

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Accepts `row,col` as well as the displayed `(row, col)` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed);

        let mut parts = inner.split(',');
        let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ParseMoveError::InvalidFormat(s.to_string()));
        };

        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| ParseMoveError::InvalidCoordinate(part.trim().to_string()))
        };

        Ok(Move::new(parse(row)?, parse(col)?))
    }
}

/// Parses a whitespace-separated move history such as `"3,3 2,5"`.
pub fn parse_moves(s: &str) -> Result<Vec<Move>, ParseMoveError> {
    s.split_whitespace().map(str::parse).collect()
}
