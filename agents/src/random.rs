use crate::Agent;
use isolation_core::{Board, Move};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Plays a uniformly random legal move.
pub struct RandomAgent<R = StdRng> {
    name: String,
    rng: R,
}

impl RandomAgent<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for RandomAgent<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomAgent<R> {
    pub fn with_rng(rng: R) -> Self {
        RandomAgent {
            name: "Random".to_string(),
            rng,
        }
    }
}

impl<R: Rng> Agent for RandomAgent<R> {
    fn get_move(&mut self, board: &Board, _time_left: &dyn Fn() -> f64) -> Option<Move> {
        board.active_moves().choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_move_is_legal() {
        let board = Board::with_moves(7, 7, &[Move::new(3, 3), Move::new(0, 0)]).unwrap();
        let legal = board.active_moves();
        let mut agent = RandomAgent::with_rng(StdRng::seed_from_u64(3));

        for _ in 0..20 {
            let mv = agent.get_move(&board, &|| 100.0).unwrap();
            assert!(legal.contains(&mv));
        }
    }

    #[test]
    fn test_random_without_moves() {
        let board = Board::with_moves(2, 1, &[Move::new(0, 0), Move::new(0, 1)]).unwrap();
        let mut agent = RandomAgent::new();
        assert_eq!(agent.get_move(&board, &|| 100.0), None);
    }
}
