//! Fixed positions with known search results on the standard 7x7 board.
//!
//! Move generation order is deterministic, so each search must reproduce
//! the exact move, score and (for alpha-beta) node count below.

use isolation_agents::{alphabeta, minimax, Deadline, Heuristic, SearchInfo, SearchResult};
use isolation_core::{Board, Move};
use rand::rngs::StdRng;
use rand::SeedableRng;

const EPSILON: f64 = 1e-9;

/// Player One on (2, 3), Player Two on (4, 1), Player One to move.
fn midgame() -> Board {
    Board::with_moves(7, 7, &[Move::new(2, 3), Move::new(4, 1)]).unwrap()
}

fn run_minimax(board: &Board, depth: u32, heuristic: Heuristic) -> SearchResult {
    let mut info = SearchInfo::new(Deadline::unlimited(), heuristic);
    minimax(board, depth, &mut info).unwrap()
}

fn run_alphabeta(board: &Board, depth: u32, heuristic: Heuristic) -> SearchResult {
    let mut info = SearchInfo::new(Deadline::unlimited(), heuristic);
    let mut rng = StdRng::seed_from_u64(0);
    alphabeta(board, depth, &mut info, &mut rng).unwrap()
}

fn assert_result(result: &SearchResult, mv: (usize, usize), score: f64, label: &str) {
    assert_eq!(
        result.best_move,
        Some(Move::new(mv.0, mv.1)),
        "{}: wrong move",
        label
    );
    assert!(
        (result.score - score).abs() < EPSILON,
        "{}: expected score {}, got {}",
        label,
        score,
        result.score
    );
}

#[test]
fn test_empty_board_openings() {
    let half_diagonal = 0.5_f64.sqrt();
    // (heuristic, depth, move, score)
    let cases = [
        (Heuristic::CenterMobility, 1, (3, 3), -40.0 - 0.5 * half_diagonal),
        (Heuristic::CenterMobility, 2, (3, 3), -0.5 * half_diagonal),
        (Heuristic::OpenMobility, 1, (2, 2), 8.0),
        (Heuristic::OpenMobility, 2, (2, 2), 47.0),
        (Heuristic::StrictCenterMobility, 1, (3, 3), -40.0 - half_diagonal),
        (Heuristic::StrictCenterMobility, 2, (3, 3), -half_diagonal),
    ];

    let board = Board::default();
    for (heuristic, depth, mv, score) in cases {
        let label = format!("{} depth {}", heuristic, depth);
        assert_result(&run_minimax(&board, depth, heuristic), mv, score, &label);
        assert_result(&run_alphabeta(&board, depth, heuristic), mv, score, &label);
    }
}

#[test]
fn test_midgame_alphabeta() {
    let half_diagonal = 0.5_f64.sqrt();
    // (heuristic, depth, move, score, nodes)
    let cases = [
        (Heuristic::CenterMobility, 1, (4, 4), 1.0 - 0.5 * half_diagonal, 8),
        (Heuristic::CenterMobility, 2, (4, 4), -0.5 * half_diagonal, 52),
        (Heuristic::CenterMobility, 3, (1, 5), -0.5 * half_diagonal, 141),
        (Heuristic::CenterMobility, 4, (1, 5), -1.0 - 0.5 * half_diagonal, 485),
        (Heuristic::OpenMobility, 1, (4, 2), 47.0, 8),
        (Heuristic::OpenMobility, 2, (4, 2), 45.0, 36),
        (Heuristic::OpenMobility, 3, (1, 1), 44.0, 118),
        (Heuristic::OpenMobility, 4, (1, 1), 42.0, 415),
        (Heuristic::StrictCenterMobility, 1, (4, 4), 1.0 - half_diagonal, 8),
        (Heuristic::StrictCenterMobility, 2, (4, 4), -half_diagonal, 52),
        (Heuristic::StrictCenterMobility, 3, (1, 5), -half_diagonal, 143),
        (Heuristic::StrictCenterMobility, 4, (1, 5), -1.0 - half_diagonal, 471),
    ];

    let board = midgame();
    for (heuristic, depth, mv, score, nodes) in cases {
        let label = format!("{} depth {}", heuristic, depth);
        let result = run_alphabeta(&board, depth, heuristic);
        assert_result(&result, mv, score, &label);
        assert_eq!(result.nodes, nodes, "{}: node count", label);
    }
}

#[test]
fn test_midgame_minimax_matches_alphabeta() {
    let board = midgame();
    for heuristic in [
        Heuristic::CenterMobility,
        Heuristic::OpenMobility,
        Heuristic::StrictCenterMobility,
    ] {
        for depth in 1..=4 {
            let full = run_minimax(&board, depth, heuristic);
            let pruned = run_alphabeta(&board, depth, heuristic);

            assert_eq!(full.best_move, pruned.best_move);
            assert_eq!(full.score, pruned.score);
            assert!(pruned.nodes <= full.nodes);
        }
    }
}
