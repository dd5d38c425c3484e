use isolation_core::{Move, Player};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SearchTimeout};
use crate::evaluation::Heuristic;
use crate::state::GameState;

pub const DEFAULT_SEARCH_DEPTH: u32 = 3;
/// Milliseconds left on the clock at which a search gives up.
pub const DEFAULT_TIMER_THRESHOLD_MS: f64 = 10.0;

/// Settings shared by the search agents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched by fixed-depth minimax
    pub search_depth: u32,
    /// Abort the search once fewer milliseconds than this remain
    pub timer_threshold_ms: f64,
    /// Evaluation used at the search horizon
    pub heuristic: Heuristic,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_depth: DEFAULT_SEARCH_DEPTH,
            timer_threshold_ms: DEFAULT_TIMER_THRESHOLD_MS,
            heuristic: Heuristic::default(),
        }
    }
}

impl SearchConfig {
    pub fn new(search_depth: u32, heuristic: Heuristic) -> Self {
        Self {
            search_depth,
            heuristic,
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.timer_threshold_ms.is_finite() || self.timer_threshold_ms < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                value: self.timer_threshold_ms,
            });
        }
        Ok(())
    }
}

static NO_LIMIT: fn() -> f64 = || f64::INFINITY;

/// The caller's clock plus the point at which the search must stop.
#[derive(Clone, Copy)]
pub struct Deadline<'a> {
    time_left: &'a dyn Fn() -> f64,
    threshold_ms: f64,
}

impl<'a> Deadline<'a> {
    /// `time_left` returns the milliseconds remaining in the current turn.
    pub fn new(time_left: &'a dyn Fn() -> f64, threshold_ms: f64) -> Self {
        Self {
            time_left,
            threshold_ms,
        }
    }

    /// Milliseconds remaining in the current turn.
    pub fn remaining(&self) -> f64 {
        (self.time_left)()
    }

    /// Fails once the remaining time is below the threshold.
    pub fn check(&self) -> Result<(), SearchTimeout> {
        if self.remaining() < self.threshold_ms {
            return Err(SearchTimeout);
        }
        Ok(())
    }
}

impl Deadline<'static> {
    /// A deadline that never expires.
    pub fn unlimited() -> Self {
        Self {
            time_left: &NO_LIMIT,
            threshold_ms: 0.0,
        }
    }
}

/// Terminal test for searches whose depth counts up from the root.
pub fn depth_exceeded(current_depth: u32, target_depth: u32, moves: &[Move]) -> bool {
    current_depth > target_depth || moves.is_empty()
}

/// Terminal test for searches whose depth counts down to zero.
pub fn depth_exhausted(remaining_depth: u32, moves: &[Move]) -> bool {
    remaining_depth == 0 || moves.is_empty()
}

/// State carried through one search invocation.
pub struct SearchInfo<'a> {
    deadline: Deadline<'a>,
    heuristic: Heuristic,
    nodes: u64,
}

impl<'a> SearchInfo<'a> {
    pub fn new(deadline: Deadline<'a>, heuristic: Heuristic) -> Self {
        Self {
            deadline,
            heuristic,
            nodes: 0,
        }
    }

    /// Polls the deadline on entry to a node, before looking at the board.
    pub fn enter(&mut self) -> Result<(), SearchTimeout> {
        self.deadline.check()?;
        self.nodes += 1;
        Ok(())
    }

    pub fn evaluate<S: GameState>(&self, state: &S, player: Player) -> f64 {
        self.heuristic.score(state, player)
    }

    /// Nodes entered so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn deadline(&self) -> &Deadline<'a> {
        &self.deadline
    }
}

/// The outcome of one depth-limited search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// `None` only when the root has no legal moves
    pub best_move: Option<Move>,
    pub score: f64,
    pub depth: u32,
    /// Nodes entered so far by the `SearchInfo` this search ran with. Under
    /// iterative deepening this is the running total across depths.
    pub nodes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.search_depth, 3);
        assert_eq!(config.timer_threshold_ms, 10.0);
        assert_eq!(config.heuristic, Heuristic::CenterMobility);
    }

    #[test]
    fn test_config_from_json() {
        let config =
            SearchConfig::from_json(r#"{"search_depth": 5, "heuristic": "open-mobility"}"#)
                .unwrap();
        assert_eq!(config.search_depth, 5);
        assert_eq!(config.heuristic, Heuristic::OpenMobility);
        assert_eq!(config.timer_threshold_ms, DEFAULT_TIMER_THRESHOLD_MS);
    }

    #[test]
    fn test_config_rejects_bad_threshold() {
        let result = SearchConfig::from_json(r#"{"timer_threshold_ms": -1.0}"#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidThreshold { value }) if value == -1.0
        ));
        assert!(matches!(
            SearchConfig::from_json("{"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_deadline_check() {
        let remaining = Cell::new(100.0);
        let time_left = || remaining.get();
        let deadline = Deadline::new(&time_left, 10.0);

        assert_eq!(deadline.check(), Ok(()));
        remaining.set(10.0);
        assert_eq!(deadline.check(), Ok(()));
        remaining.set(9.5);
        assert_eq!(deadline.check(), Err(SearchTimeout));
    }

    #[test]
    fn test_unlimited_deadline() {
        let deadline = Deadline::unlimited();
        assert_eq!(deadline.remaining(), f64::INFINITY);
        assert_eq!(deadline.check(), Ok(()));
    }

    #[test]
    fn test_depth_exceeded() {
        let moves = [Move::new(0, 0)];
        assert!(!depth_exceeded(2, 2, &moves));
        assert!(depth_exceeded(3, 2, &moves));
        assert!(depth_exceeded(0, 2, &[]));
    }

    #[test]
    fn test_depth_exhausted() {
        let moves = [Move::new(0, 0)];
        assert!(!depth_exhausted(1, &moves));
        assert!(depth_exhausted(0, &moves));
        assert!(depth_exhausted(4, &[]));
    }

    #[test]
    fn test_enter_counts_nodes_until_timeout() {
        let remaining = Cell::new(50.0);
        let time_left = || remaining.get();
        let mut info = SearchInfo::new(Deadline::new(&time_left, 10.0), Heuristic::Null);

        assert!(info.enter().is_ok());
        assert!(info.enter().is_ok());
        remaining.set(5.0);
        assert_eq!(info.enter(), Err(SearchTimeout));
        assert_eq!(info.nodes(), 2);
    }
}
