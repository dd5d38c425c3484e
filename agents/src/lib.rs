pub mod alphabeta;
pub mod arena;
pub mod error;
pub mod evaluation;
pub mod minimax;
pub mod random;
pub mod search;
pub mod state;

use isolation_core::{Board, Move};

/// Core trait for Isolation players
pub trait Agent {
    /// Choose a move for the active player, or `None` if there is none.
    ///
    /// `time_left` returns the milliseconds remaining in this turn;
    /// returning after it drops below zero loses the game.
    fn get_move(&mut self, board: &Board, time_left: &dyn Fn() -> f64) -> Option<Move>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

pub use alphabeta::{alphabeta, alphabeta_window, iterative_deepening, AlphaBetaAgent, Deepening};
pub use arena::{play_game, play_match, GameRecord, MatchRecord, Outcome};
pub use error::{ConfigError, SearchTimeout};
pub use evaluation::*;
pub use minimax::{minimax, MinimaxAgent};
pub use random::RandomAgent;
pub use search::*;
pub use state::GameState;
