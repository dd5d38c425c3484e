use std::io::{self, Write};
use std::time::Instant;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    style::{Color as TermColor, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
    ExecutableCommand,
};
use isolation_agents::{Agent, AlphaBetaAgent, SearchConfig};
use isolation_core::{Board, Move, Player};

use crate::format_move;

/// You play Player One, the alpha-beta agent plays Player Two.
pub struct InteractiveGame {
    start: Board,
    board: Board,
    engine: AlphaBetaAgent,
    time_limit_ms: f64,
    cursor: (usize, usize), // (row, col)
    message: String,
    move_history: Vec<Move>,
    /// Set when the engine forfeits; isolation is read off the board
    forfeit_winner: Option<Player>,
}

impl InteractiveGame {
    pub fn new(board: Board, config: SearchConfig, time_limit_ms: f64) -> Self {
        let cursor = (board.height() / 2, board.width() / 2);
        Self {
            start: board.clone(),
            board,
            engine: AlphaBetaAgent::new(config),
            time_limit_ms,
            cursor,
            message: String::from("Use hjkl to move, Enter to place, q to quit"),
            move_history: Vec::new(),
            forfeit_winner: None,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(Hide)?;
        stdout.execute(Clear(ClearType::All))?;

        let result = self.game_loop();

        stdout.execute(Show)?;
        terminal::disable_raw_mode()?;
        stdout.execute(Clear(ClearType::All))?;
        stdout.execute(MoveTo(0, 0))?;

        result
    }

    fn game_loop(&mut self) -> io::Result<()> {
        loop {
            if self.forfeit_winner.is_none() && self.board.active_moves().is_empty() {
                let loser = self.board.active_player();
                self.message = match loser {
                    Player::One => String::from("You are isolated. The engine wins! (n = new)"),
                    Player::Two => String::from("The engine is isolated. You win! (n = new)"),
                };
            }
            self.draw_board()?;

            let Event::Key(KeyEvent { code, kind, .. }) = event::read()? else {
                continue;
            };
            if kind != KeyEventKind::Press {
                continue;
            }

            match code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('h') | KeyCode::Left => self.move_cursor(0, -1),
                KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1, 0),
                KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1, 0),
                KeyCode::Char('l') | KeyCode::Right => self.move_cursor(0, 1),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if self.handle_selection() {
                        self.engine_move()?;
                    }
                }
                KeyCode::Char('u') => self.undo_move(),
                KeyCode::Char('n') => self.new_game(),
                _ => {}
            }
        }

        Ok(())
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let target = Move::new(self.cursor.0, self.cursor.1).offset(d_row, d_col);
        let on_board = |mv: &Move| mv.row < self.board.height() && mv.col < self.board.width();
        if let Some(mv) = target.filter(on_board) {
            self.cursor = (mv.row, mv.col);
        }
    }

    /// Plays the cell under the cursor. Returns true if a move was made.
    fn handle_selection(&mut self) -> bool {
        if self.forfeit_winner.is_some() {
            self.message = String::from("Game over (n = new)");
            return false;
        }
        if self.board.active_player() != Player::One {
            return false;
        }

        let mv = Move::new(self.cursor.0, self.cursor.1);
        if !self.board.active_moves().contains(&mv) {
            self.message = format!("{} is not a legal move", mv);
            return false;
        }

        self.board.apply_move(mv);
        self.move_history.push(mv);
        self.message = format!("Moved: {}", mv);
        true
    }

    fn engine_move(&mut self) -> io::Result<()> {
        if self.board.active_moves().is_empty() {
            return Ok(());
        }
        self.message = String::from("Engine thinking...");
        self.draw_board()?;

        let start = Instant::now();
        let time_limit_ms = self.time_limit_ms;
        let time_left = || time_limit_ms - start.elapsed().as_secs_f64() * 1000.0;
        let choice = self.engine.get_move(&self.board, &time_left);
        self.apply_engine_choice(choice);

        Ok(())
    }

    /// Plays the engine's move, or ends the game if it is missing or illegal.
    fn apply_engine_choice(&mut self, choice: Option<Move>) {
        match choice {
            Some(mv) if self.board.active_moves().contains(&mv) => {
                self.board.apply_move(mv);
                self.move_history.push(mv);
                self.message = format!("Engine played: {}", mv);
            }
            _ => {
                self.forfeit_winner = Some(Player::One);
                self.message = format!(
                    "Engine forfeits with {}. You win! (n = new)",
                    format_move(choice)
                );
            }
        }
    }

    fn undo_move(&mut self) {
        // After a forfeit only your last move is left to take back
        let count = if self.forfeit_winner.take().is_some() { 1 } else { 2 };
        if self.move_history.len() >= count {
            self.move_history.truncate(self.move_history.len() - count);

            let mut board = self.start.clone();
            for &mv in &self.move_history {
                board.apply_move(mv);
            }
            self.board = board;
            self.message = String::from("Undid last move");
        } else {
            self.message = String::from("Nothing to undo");
        }
    }

    fn new_game(&mut self) {
        self.board = self.start.clone();
        self.move_history.clear();
        self.forfeit_winner = None;
        self.cursor = (self.board.height() / 2, self.board.width() / 2);
        self.message = String::from("New game started!");
    }

    fn draw_board(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.execute(MoveTo(0, 0))?;
        stdout.execute(Clear(ClearType::All))?;

        println!("Isolation - Interactive Mode (vim keys: hjkl)\r");
        println!("Commands: Enter=move, u=undo, n=new, q=quit\r");
        println!("\r");

        let legal = if self.board.active_player() == Player::One {
            self.board.active_moves()
        } else {
            Vec::new()
        };

        print!("   ");
        for col in 0..self.board.width() {
            print!("{:>2}", col);
        }
        println!("\r");

        for row in 0..self.board.height() {
            print!("{:>2} ", row);
            for col in 0..self.board.width() {
                let cell = Move::new(row, col);

                if self.cursor == (row, col) {
                    stdout.execute(SetBackgroundColor(TermColor::Yellow))?;
                } else if legal.contains(&cell) {
                    stdout.execute(SetBackgroundColor(TermColor::Blue))?;
                } else if (row + col) % 2 == 0 {
                    stdout.execute(SetBackgroundColor(TermColor::DarkGrey))?;
                } else {
                    stdout.execute(SetBackgroundColor(TermColor::Black))?;
                }

                if self.board.player_location(Player::One) == Some(cell) {
                    stdout.execute(SetForegroundColor(TermColor::White))?;
                    print!("{} ", Player::One.symbol());
                } else if self.board.player_location(Player::Two) == Some(cell) {
                    stdout.execute(SetForegroundColor(TermColor::Magenta))?;
                    print!("{} ", Player::Two.symbol());
                } else if self.board.move_is_legal(cell) {
                    print!("  ");
                } else {
                    print!("##");
                }

                stdout.execute(ResetColor)?;
            }
            println!("\r");
        }

        println!("\r");
        println!(
            "{} to move | Move {}\r",
            self.board.active_player(),
            self.board.move_count() + 1
        );
        println!("\r");
        println!("{}\r", self.message);

        stdout.flush()?;
        Ok(())
    }
}
