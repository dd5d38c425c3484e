//! Static evaluation of Isolation positions.
//!
//! Every heuristic scores a position from one player's point of view and
//! returns exactly `f64::NEG_INFINITY` when that player has lost and
//! `f64::INFINITY` when they have won. Finite scores only guide the search
//! when it cannot see the end of the game.

use std::fmt;
use std::str::FromStr;

use isolation_core::Player;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::GameState;

/// Weight of the center-distance penalty in [`center_mobility`].
pub const CENTER_WEIGHT: f64 = 0.5;

/// Weight of the center-distance penalty in [`strict_center_mobility`].
pub const STRICT_CENTER_WEIGHT: f64 = 1.0;

/// Returns the game-over value for `player`, if the game is over.
fn terminal_score<S: GameState>(state: &S, player: Player) -> Option<f64> {
    if state.is_loser(player) {
        Some(f64::NEG_INFINITY)
    } else if state.is_winner(player) {
        Some(f64::INFINITY)
    } else {
        None
    }
}

/// Squared distance between the player's cell and the board center.
/// Zero while the player has not been placed.
fn center_distance_squared<S: GameState>(state: &S, player: Player) -> f64 {
    let Some(location) = state.player_location(player) else {
        return 0.0;
    };
    let center_row = state.height() as f64 / 2.0;
    let center_col = state.width() as f64 / 2.0;

    (center_row - location.row as f64).powi(2) + (center_col - location.col as f64).powi(2)
}

/// Own legal moves minus the opponent's.
fn mobility<S: GameState>(state: &S, player: Player) -> f64 {
    let own_moves = state.legal_moves(player).len() as f64;
    let opp_moves = state.legal_moves(player.opponent()).len() as f64;
    own_moves - opp_moves
}

/// Mobility difference with a penalty for straying from the center.
pub fn center_mobility<S: GameState>(state: &S, player: Player) -> f64 {
    if let Some(score) = terminal_score(state, player) {
        return score;
    }
    mobility(state, player) - CENTER_WEIGHT * center_distance_squared(state, player).sqrt()
}

/// Mobility difference plus the number of open cells, so that among equal
/// mobility the search prefers lines that keep the board open.
pub fn open_mobility<S: GameState>(state: &S, player: Player) -> f64 {
    if let Some(score) = terminal_score(state, player) {
        return score;
    }
    mobility(state, player) + state.blank_count() as f64
}

/// Like [`center_mobility`] with the full center-distance penalty.
pub fn strict_center_mobility<S: GameState>(state: &S, player: Player) -> f64 {
    if let Some(score) = terminal_score(state, player) {
        return score;
    }
    mobility(state, player) - STRICT_CENTER_WEIGHT * center_distance_squared(state, player).sqrt()
}

/// Mobility difference only.
pub fn improved_score<S: GameState>(state: &S, player: Player) -> f64 {
    terminal_score(state, player).unwrap_or_else(|| mobility(state, player))
}

/// Number of moves the player has.
pub fn open_move_score<S: GameState>(state: &S, player: Player) -> f64 {
    terminal_score(state, player).unwrap_or_else(|| state.legal_moves(player).len() as f64)
}

/// Squared distance from the center: higher is further out.
pub fn center_score<S: GameState>(state: &S, player: Player) -> f64 {
    terminal_score(state, player).unwrap_or_else(|| center_distance_squared(state, player))
}

/// Knows only wins and losses.
pub fn null_score<S: GameState>(state: &S, player: Player) -> f64 {
    terminal_score(state, player).unwrap_or(0.0)
}

/// Names an evaluation function so it can be chosen from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Heuristic {
    #[default]
    CenterMobility,
    OpenMobility,
    StrictCenterMobility,
    Improved,
    OpenMove,
    Center,
    Null,
}

impl Heuristic {
    pub const ALL: [Heuristic; 7] = [
        Heuristic::CenterMobility,
        Heuristic::OpenMobility,
        Heuristic::StrictCenterMobility,
        Heuristic::Improved,
        Heuristic::OpenMove,
        Heuristic::Center,
        Heuristic::Null,
    ];

    /// Scores `state` from `player`'s point of view.
    pub fn score<S: GameState>(self, state: &S, player: Player) -> f64 {
        match self {
            Heuristic::CenterMobility => center_mobility(state, player),
            Heuristic::OpenMobility => open_mobility(state, player),
            Heuristic::StrictCenterMobility => strict_center_mobility(state, player),
            Heuristic::Improved => improved_score(state, player),
            Heuristic::OpenMove => open_move_score(state, player),
            Heuristic::Center => center_score(state, player),
            Heuristic::Null => null_score(state, player),
        }
    }

    /// The kebab-case name used in configuration files and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Heuristic::CenterMobility => "center-mobility",
            Heuristic::OpenMobility => "open-mobility",
            Heuristic::StrictCenterMobility => "strict-center-mobility",
            Heuristic::Improved => "improved",
            Heuristic::OpenMove => "open-move",
            Heuristic::Center => "center",
            Heuristic::Null => "null",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown heuristic '{0}'")]
pub struct ParseHeuristicError(String);

impl FromStr for Heuristic {
    type Err = ParseHeuristicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heuristic::ALL
            .into_iter()
            .find(|heuristic| heuristic.name() == s)
            .ok_or_else(|| ParseHeuristicError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isolation_core::{Board, Move};

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    /// Player One on (2, 3) with 8 moves, Player Two on (4, 1) with 6.
    fn midgame() -> Board {
        Board::with_moves(7, 7, &[Move::new(2, 3), Move::new(4, 1)]).unwrap()
    }

    /// 1x2 board where Player One is stuck after both placements.
    fn finished() -> Board {
        Board::with_moves(2, 1, &[Move::new(0, 0), Move::new(0, 1)]).unwrap()
    }

    #[test]
    fn test_center_mobility() {
        let board = midgame();
        assert_close(center_mobility(&board, Player::One), 2.0 - 0.5 * 2.5_f64.sqrt());
        assert_close(center_mobility(&board, Player::Two), -2.0 - 0.5 * 6.5_f64.sqrt());
    }

    #[test]
    fn test_open_mobility() {
        let board = midgame();
        assert_close(open_mobility(&board, Player::One), 2.0 + 47.0);
        assert_close(open_mobility(&board, Player::Two), -2.0 + 47.0);
    }

    #[test]
    fn test_strict_center_mobility() {
        let board = midgame();
        assert_close(strict_center_mobility(&board, Player::One), 2.0 - 2.5_f64.sqrt());
        assert_close(strict_center_mobility(&board, Player::Two), -2.0 - 6.5_f64.sqrt());
    }

    #[test]
    fn test_baseline_scores() {
        let board = midgame();
        assert_close(improved_score(&board, Player::One), 2.0);
        assert_close(open_move_score(&board, Player::Two), 6.0);
        assert_close(center_score(&board, Player::One), 2.5);
        assert_close(null_score(&board, Player::One), 0.0);
    }

    #[test]
    fn test_unplaced_player_has_no_center_penalty() {
        let board = Board::with_moves(7, 7, &[Move::new(3, 3)]).unwrap();
        // Player One has 8 jumps, Player Two may still go to any of 48 cells
        assert_close(
            center_mobility(&board, Player::One),
            8.0 - 48.0 - 0.5 * 0.5_f64.sqrt(),
        );
        assert_close(center_mobility(&board, Player::Two), 40.0);
    }

    #[test]
    fn test_win_loss_are_infinite() {
        let board = finished();
        for heuristic in Heuristic::ALL {
            assert_eq!(
                heuristic.score(&board, Player::One),
                f64::NEG_INFINITY,
                "{} must score a loss as -inf",
                heuristic
            );
            assert_eq!(
                heuristic.score(&board, Player::Two),
                f64::INFINITY,
                "{} must score a win as +inf",
                heuristic
            );
        }
    }

    #[test]
    fn test_scores_are_finite_while_playing() {
        let board = midgame();
        for heuristic in Heuristic::ALL {
            assert!(heuristic.score(&board, Player::One).is_finite());
            assert!(heuristic.score(&board, Player::Two).is_finite());
        }
    }

    #[test]
    fn test_heuristic_names_round_trip() {
        for heuristic in Heuristic::ALL {
            assert_eq!(heuristic.name().parse::<Heuristic>(), Ok(heuristic));
        }
        assert!("custom".parse::<Heuristic>().is_err());
    }

    #[test]
    fn test_heuristic_serde_names() {
        let json = serde_json::to_string(&Heuristic::StrictCenterMobility).unwrap();
        assert_eq!(json, "\"strict-center-mobility\"");
        let parsed: Heuristic = serde_json::from_str("\"open-move\"").unwrap();
        assert_eq!(parsed, Heuristic::OpenMove);
    }
}
