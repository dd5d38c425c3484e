use isolation_core::{Board, Move};
use tracing::debug;

use crate::{
    error::SearchTimeout,
    search::{depth_exceeded, Deadline, SearchConfig, SearchInfo, SearchResult},
    state::GameState,
    Agent,
};

/// Fixed-depth minimax.
///
/// Explores `target_depth` plies below `state` and returns the root move
/// with the highest minimax value. Ties keep the earliest move in
/// generation order, and the first legal move stands in when every line
/// scores `-inf`. Depths 0 and 1 both look one ply ahead.
pub fn minimax<S: GameState>(
    state: &S,
    target_depth: u32,
    info: &mut SearchInfo,
) -> Result<SearchResult, SearchTimeout> {
    let moves = state.active_moves();
    let mut best_move = moves.first().copied();
    let mut best_score = f64::NEG_INFINITY;

    for &mv in &moves {
        // The root is level 1, so its children start at level 2
        let score = min_value(&state.forecast_move(mv), 2, target_depth, info)?;

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
    }

    Ok(SearchResult {
        best_move,
        score: best_score,
        depth: target_depth,
        nodes: info.nodes(),
    })
}

/// Value of a node where the maximizing player is to move.
fn max_value<S: GameState>(
    state: &S,
    depth: u32,
    target_depth: u32,
    info: &mut SearchInfo,
) -> Result<f64, SearchTimeout> {
    info.enter()?;

    let player = state.active_player();
    let moves = state.legal_moves(player);
    if depth_exceeded(depth, target_depth, &moves) {
        return Ok(info.evaluate(state, player));
    }

    let mut utility = f64::NEG_INFINITY;
    for mv in moves {
        let score = min_value(&state.forecast_move(mv), depth + 1, target_depth, info)?;
        if score > utility {
            utility = score;
        }
    }
    Ok(utility)
}

/// Value of a node where the minimizing player is to move, still scored
/// from the maximizer's point of view.
fn min_value<S: GameState>(
    state: &S,
    depth: u32,
    target_depth: u32,
    info: &mut SearchInfo,
) -> Result<f64, SearchTimeout> {
    info.enter()?;

    let player = state.active_player();
    let moves = state.legal_moves(player);
    if depth_exceeded(depth, target_depth, &moves) {
        return Ok(info.evaluate(state, player.opponent()));
    }

    let mut utility = f64::INFINITY;
    for mv in moves {
        let score = max_value(&state.forecast_move(mv), depth + 1, target_depth, info)?;
        if score < utility {
            utility = score;
        }
    }
    Ok(utility)
}

/// Plays the fixed-depth minimax move.
pub struct MinimaxAgent {
    name: String,
    config: SearchConfig,
}

impl MinimaxAgent {
    pub fn new(config: SearchConfig) -> Self {
        MinimaxAgent {
            name: format!("MM_{}", config.heuristic),
            config,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl Agent for MinimaxAgent {
    fn get_move(&mut self, board: &Board, time_left: &dyn Fn() -> f64) -> Option<Move> {
        let deadline = Deadline::new(time_left, self.config.timer_threshold_ms);
        let mut info = SearchInfo::new(deadline, self.config.heuristic);

        match minimax(board, self.config.search_depth, &mut info) {
            Ok(result) => {
                debug!(
                    agent = %self.name,
                    depth = result.depth,
                    score = result.score,
                    nodes = result.nodes,
                    best_move = ?result.best_move,
                    "minimax finished"
                );
                result.best_move
            }
            Err(SearchTimeout) => {
                // Any legal move beats forfeiting the game
                let fallback = board.active_moves().first().copied();
                debug!(
                    agent = %self.name,
                    nodes = info.nodes(),
                    fallback = ?fallback,
                    "minimax timed out"
                );
                fallback
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
