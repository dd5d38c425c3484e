//! Plays complete games between agents under a per-move time limit.

use std::fmt;
use std::time::Instant;

use isolation_core::{Board, BoardError, Move, Player};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::Agent;

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The loser had no legal moves on their turn
    Isolated,
    /// The loser returned after their clock ran out
    Timeout,
    /// The loser returned no move or an illegal one
    Forfeit,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Outcome::Isolated => "isolated",
            Outcome::Timeout => "timeout",
            Outcome::Forfeit => "forfeit",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub winner: Player,
    /// Moves played during the game, not including the starting position
    pub history: Vec<Move>,
    pub outcome: Outcome,
    /// Position when the game ended
    pub board: Board,
}

impl GameRecord {
    pub fn loser(&self) -> Player {
        self.winner.opponent()
    }
}

/// Plays `board` to the end. `player_one` moves for Player One and
/// `player_two` for Player Two, whichever of them is active first.
///
/// Each turn gets `time_limit_ms` of wall-clock time, reported to the agent
/// through its `time_left` callback.
pub fn play_game(
    mut board: Board,
    player_one: &mut dyn Agent,
    player_two: &mut dyn Agent,
    time_limit_ms: f64,
) -> GameRecord {
    let mut history = Vec::new();

    let (loser, outcome) = loop {
        let active = board.active_player();
        let legal = board.active_moves();
        if legal.is_empty() {
            break (active, Outcome::Isolated);
        }

        let agent: &mut dyn Agent = match active {
            Player::One => &mut *player_one,
            Player::Two => &mut *player_two,
        };

        let start = Instant::now();
        let time_left = || time_limit_ms - start.elapsed().as_secs_f64() * 1000.0;
        // Agents get a copy so they cannot disturb the game record
        let choice = agent.get_move(&board.clone(), &time_left);

        if time_left() < 0.0 {
            debug!(agent = agent.name(), %active, "out of time");
            break (active, Outcome::Timeout);
        }
        match choice {
            Some(mv) if legal.contains(&mv) => {
                board.apply_move(mv);
                history.push(mv);
            }
            _ => {
                debug!(agent = agent.name(), %active, choice = ?choice, "forfeit");
                break (active, Outcome::Forfeit);
            }
        }
    };

    let winner = loser.opponent();
    let winner_name = match winner {
        Player::One => player_one.name(),
        Player::Two => player_two.name(),
    };
    info!(
        winner = winner_name,
        %outcome,
        moves = history.len(),
        "game over"
    );

    GameRecord {
        winner,
        history,
        outcome,
        board,
    }
}

/// Two games between the same agents from the same opening.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    /// The two random placements both games start from
    pub opening: [Move; 2],
    /// Games won by the first agent
    pub wins: usize,
    /// Games won by the second agent
    pub losses: usize,
    /// `games[0]` has the first agent as Player One, `games[1]` swaps seats
    pub games: [GameRecord; 2],
}

impl MatchRecord {
    pub fn timeouts(&self) -> usize {
        self.count(Outcome::Timeout)
    }

    pub fn forfeits(&self) -> usize {
        self.count(Outcome::Forfeit)
    }

    fn count(&self, outcome: Outcome) -> usize {
        self.games.iter().filter(|game| game.outcome == outcome).count()
    }
}

/// Places each player on a random cell, then plays the position twice with
/// the agents swapping seats. The board needs at least two cells.
pub fn play_match<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    first: &mut dyn Agent,
    second: &mut dyn Agent,
    time_limit_ms: f64,
    rng: &mut R,
) -> Result<MatchRecord, BoardError> {
    let mut board = Board::new(width, height)?;
    let cells: Vec<Move> = board.blank_spaces().choose_multiple(rng, 2).copied().collect();
    let [player_one_cell, player_two_cell] = cells[..] else {
        return Err(BoardError::TooSmall { width, height });
    };
    board.apply_move(player_one_cell);
    board.apply_move(player_two_cell);

    let forward = play_game(board.clone(), first, second, time_limit_ms);
    let reverse = play_game(board, second, first, time_limit_ms);

    let wins =
        usize::from(forward.winner == Player::One) + usize::from(reverse.winner == Player::Two);

    Ok(MatchRecord {
        opening: [player_one_cell, player_two_cell],
        wins,
        losses: 2 - wins,
        games: [forward, reverse],
    })
}
