use isolation_core::{Board, Move};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::{
    error::SearchTimeout,
    search::{depth_exhausted, Deadline, SearchConfig, SearchInfo, SearchResult},
    state::GameState,
    Agent,
};

/// Depth-limited alpha-beta search with a full window.
pub fn alphabeta<S: GameState, R: Rng + ?Sized>(
    state: &S,
    depth: u32,
    info: &mut SearchInfo,
    rng: &mut R,
) -> Result<SearchResult, SearchTimeout> {
    alphabeta_window(state, depth, f64::NEG_INFINITY, f64::INFINITY, info, rng)
}

/// Depth-limited alpha-beta search within `(alpha, beta)`.
///
/// Returns the root move with the highest value. The provisional best move
/// is drawn uniformly from the legal moves, so a move is returned even when
/// every line loses; otherwise the first move reaching the best value wins.
pub fn alphabeta_window<S: GameState, R: Rng + ?Sized>(
    state: &S,
    depth: u32,
    mut alpha: f64,
    beta: f64,
    info: &mut SearchInfo,
    rng: &mut R,
) -> Result<SearchResult, SearchTimeout> {
    info.deadline().check()?;

    let moves = state.active_moves();
    let mut best_move = moves.choose(rng).copied();
    let mut best_score = f64::NEG_INFINITY;

    for &mv in &moves {
        let score = min_value(
            &state.forecast_move(mv),
            depth.saturating_sub(1),
            alpha,
            beta,
            info,
        )?;

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }

        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }

    Ok(SearchResult {
        best_move,
        score: best_score,
        depth,
        nodes: info.nodes(),
    })
}

fn max_value<S: GameState>(
    state: &S,
    depth: u32,
    mut alpha: f64,
    beta: f64,
    info: &mut SearchInfo,
) -> Result<f64, SearchTimeout> {
    info.enter()?;

    let player = state.active_player();
    let moves = state.legal_moves(player);
    if depth_exhausted(depth, &moves) {
        return Ok(info.evaluate(state, player));
    }

    let mut utility = f64::NEG_INFINITY;
    for mv in moves {
        let score = min_value(&state.forecast_move(mv), depth - 1, alpha, beta, info)?;
        if score > utility {
            utility = score;
        }

        // The minimizing parent already has something no worse than beta
        if utility >= beta {
            return Ok(utility);
        }
        alpha = alpha.max(utility);
    }
    Ok(utility)
}

fn min_value<S: GameState>(
    state: &S,
    depth: u32,
    alpha: f64,
    mut beta: f64,
    info: &mut SearchInfo,
) -> Result<f64, SearchTimeout> {
    info.enter()?;

    let player = state.active_player();
    let moves = state.legal_moves(player);
    if depth_exhausted(depth, &moves) {
        return Ok(info.evaluate(state, player.opponent()));
    }

    let mut utility = f64::INFINITY;
    for mv in moves {
        let score = max_value(&state.forecast_move(mv), depth - 1, alpha, beta, info)?;
        if score < utility {
            utility = score;
        }

        if utility <= alpha {
            return Ok(utility);
        }
        beta = beta.min(utility);
    }
    Ok(utility)
}

/// Result of an iterative-deepening run.
#[derive(Debug, Clone, PartialEq)]
pub struct Deepening {
    /// The deepest search that ran to completion
    pub completed: Option<SearchResult>,
    /// True if the deadline stopped the run
    pub timed_out: bool,
}

/// Runs alpha-beta at depth 1, 2, 3, ... until the deadline passes.
///
/// Only fully searched depths are reported. The run also ends once a depth
/// proves a win or loss, or reaches the number of blank cells, since
/// deeper searches would return the same move.
pub fn iterative_deepening<S: GameState, R: Rng + ?Sized>(
    state: &S,
    info: &mut SearchInfo,
    rng: &mut R,
) -> Deepening {
    let max_depth = u32::try_from(state.blank_count()).unwrap_or(u32::MAX);
    let mut completed = None;
    let mut depth = 0;

    loop {
        depth += 1;

        match alphabeta(state, depth, info, rng) {
            Ok(result) => {
                debug!(
                    depth,
                    score = result.score,
                    total_nodes = result.nodes,
                    best_move = ?result.best_move,
                    "completed depth"
                );
                let resolved = result.score.is_infinite() || depth >= max_depth;
                completed = Some(result);

                if resolved {
                    return Deepening {
                        completed,
                        timed_out: false,
                    };
                }
            }
            Err(SearchTimeout) => {
                trace!(depth, nodes = info.nodes(), "deadline reached");
                return Deepening {
                    completed,
                    timed_out: true,
                };
            }
        }
    }
}

/// Plays the iterative-deepening alpha-beta move.
///
/// The random source is a type parameter so tests can seed it.
pub struct AlphaBetaAgent<R = StdRng> {
    name: String,
    config: SearchConfig,
    rng: R,
}

impl AlphaBetaAgent<StdRng> {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> AlphaBetaAgent<R> {
    pub fn with_rng(config: SearchConfig, rng: R) -> Self {
        AlphaBetaAgent {
            name: format!("AB_{}", config.heuristic),
            config,
            rng,
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

impl<R: Rng> Agent for AlphaBetaAgent<R> {
    fn get_move(&mut self, board: &Board, time_left: &dyn Fn() -> f64) -> Option<Move> {
        let moves = board.active_moves();
        if moves.is_empty() {
            return None;
        }

        let deadline = Deadline::new(time_left, self.config.timer_threshold_ms);
        let mut info = SearchInfo::new(deadline, self.config.heuristic);
        let deepening = iterative_deepening(board, &mut info, &mut self.rng);

        match deepening.completed {
            Some(result) => {
                debug!(
                    agent = %self.name,
                    depth = result.depth,
                    score = result.score,
                    timed_out = deepening.timed_out,
                    "alpha-beta finished"
                );
                result.best_move
            }
            None => {
                let fallback = moves.choose(&mut self.rng).copied();
                debug!(agent = %self.name, fallback = ?fallback, "no depth completed");
                fallback
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
