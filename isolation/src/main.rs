mod interactive;
mod tournament;

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use isolation_agents::{
    iterative_deepening, minimax, play_game, Agent, AlphaBetaAgent, Deadline, Heuristic,
    MinimaxAgent, RandomAgent, SearchConfig, SearchInfo, SearchResult, SearchTimeout,
};
use isolation_core::{
    parse_moves, perft_detailed, perft_divide, Board, Move, Player, DEFAULT_HEIGHT, DEFAULT_WIDTH,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "isolation")]
#[command(version, about = "Adversarial search agents for the game of Isolation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a position for the best move
    Search(SearchArgs),

    /// Count move-tree leaves to validate move generation
    Perft(PerftArgs),

    /// Play one game between two agents
    Match(MatchArgs),

    /// Score the alpha-beta agents against a roster of opponents
    Tournament(tournament::TournamentArgs),

    /// Play against the alpha-beta agent in the terminal
    Play(PlayArgs),
}

/// The position to start from.
#[derive(Args, Debug)]
pub struct BoardArgs {
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Moves played so far, whitespace separated (e.g. "2,3 4,1")
    #[arg(long, default_value = "")]
    pub moves: String,
}

impl BoardArgs {
    pub fn board(&self) -> Result<Board> {
        let moves = parse_moves(&self.moves).context("invalid --moves")?;
        Board::with_moves(self.width, self.height, &moves).context("invalid starting position")
    }
}

/// Search settings. Flags override values read from `--config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// JSON file with search settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Minimax search depth
    #[arg(long)]
    pub depth: Option<u32>,

    /// Evaluation function (e.g. center-mobility, open-mobility)
    #[arg(long)]
    pub heuristic: Option<Heuristic>,

    /// Milliseconds left on the clock at which a search gives up
    #[arg(long)]
    pub threshold: Option<f64>,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                SearchConfig::from_json(&json)
                    .with_context(|| format!("invalid configuration in {}", path.display()))?
            }
            None => SearchConfig::default(),
        };

        if let Some(depth) = self.depth {
            config.search_depth = depth;
        }
        if let Some(heuristic) = self.heuristic {
            config.heuristic = heuristic;
        }
        if let Some(threshold) = self.threshold {
            config.timer_threshold_ms = threshold;
        }
        config.validate().context("invalid search settings")?;
        Ok(config)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    Minimax,
    Alphabeta,
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[command(flatten)]
    board: BoardArgs,

    #[command(flatten)]
    config: ConfigArgs,

    #[arg(long, value_enum, default_value_t = Algorithm::Alphabeta)]
    algorithm: Algorithm,

    /// Milliseconds available to the search; minimax falls back to the
    /// first legal move if it cannot finish its depth in time
    #[arg(long, default_value_t = 1000.0)]
    time_limit: f64,

    /// Seed for the alpha-beta tie-breaking move
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct PerftArgs {
    depth: u8,

    #[command(flatten)]
    board: BoardArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum AgentKind {
    Random,
    Minimax,
    Alphabeta,
}

#[derive(Args, Debug)]
struct MatchArgs {
    /// Agent playing Player One
    #[arg(value_enum)]
    first: AgentKind,

    /// Agent playing Player Two
    #[arg(value_enum)]
    second: AgentKind,

    #[command(flatten)]
    board: BoardArgs,

    #[command(flatten)]
    config: ConfigArgs,

    /// Evaluation function for the second agent, if different
    #[arg(long)]
    second_heuristic: Option<Heuristic>,

    /// Milliseconds per move
    #[arg(long, default_value_t = 150.0)]
    time_limit: f64,

    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,

    #[command(flatten)]
    config: ConfigArgs,

    /// Milliseconds the engine may think per move
    #[arg(long, default_value_t = 1000.0)]
    time_limit: f64,
}

/// Renders a move, printing a missing one as `(-1, -1)`.
pub fn format_move(mv: Option<Move>) -> String {
    match mv {
        Some(mv) => mv.to_string(),
        None => "(-1, -1)".to_string(),
    }
}

pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn build_agent(kind: AgentKind, config: SearchConfig, seed: Option<u64>) -> Box<dyn Agent> {
    match kind {
        AgentKind::Random => Box::new(RandomAgent::with_rng(seeded_rng(seed))),
        AgentKind::Minimax => Box::new(MinimaxAgent::new(config)),
        AgentKind::Alphabeta => Box::new(AlphaBetaAgent::with_rng(config, seeded_rng(seed))),
    }
}

/// What `search` found within its time limit.
#[derive(Debug, Clone, PartialEq)]
struct SearchReport {
    /// The deepest search that ran to completion
    completed: Option<SearchResult>,
    /// Move the agent would play when nothing completed
    fallback: Option<Move>,
    timed_out: bool,
}

impl SearchReport {
    fn best_move(&self) -> Option<Move> {
        match &self.completed {
            Some(result) => result.best_move,
            None => self.fallback,
        }
    }
}

/// Runs one search against the caller's clock.
fn search_position(
    board: &Board,
    config: SearchConfig,
    algorithm: Algorithm,
    time_left: &dyn Fn() -> f64,
    seed: Option<u64>,
) -> SearchReport {
    let deadline = Deadline::new(time_left, config.timer_threshold_ms);
    let mut info = SearchInfo::new(deadline, config.heuristic);

    match algorithm {
        Algorithm::Minimax => match minimax(board, config.search_depth, &mut info) {
            Ok(result) => SearchReport {
                completed: Some(result),
                fallback: None,
                timed_out: false,
            },
            Err(SearchTimeout) => SearchReport {
                completed: None,
                fallback: board.active_moves().first().copied(),
                timed_out: true,
            },
        },
        Algorithm::Alphabeta => {
            let mut rng = seeded_rng(seed);
            let deepening = iterative_deepening(board, &mut info, &mut rng);
            let fallback = match deepening.completed {
                Some(_) => None,
                None => board.active_moves().choose(&mut rng).copied(),
            };
            SearchReport {
                completed: deepening.completed,
                fallback,
                timed_out: deepening.timed_out,
            }
        }
    }
}

fn run_search(args: SearchArgs) -> Result<()> {
    let board = args.board.board()?;
    let config = args.config.load()?;

    println!("{}", board);
    match args.algorithm {
        Algorithm::Minimax => println!(
            "Minimax to depth {} with {} within {} ms",
            config.search_depth, config.heuristic, args.time_limit
        ),
        Algorithm::Alphabeta => println!(
            "Alpha-beta for {} ms with {}",
            args.time_limit, config.heuristic
        ),
    }

    let start = Instant::now();
    let time_left = || args.time_limit - start.elapsed().as_secs_f64() * 1000.0;
    let report = search_position(&board, config, args.algorithm, &time_left, args.seed);
    let elapsed = start.elapsed();

    if report.timed_out {
        println!("(search stopped by time limit)");
    }
    println!("\nBest move: {}", format_move(report.best_move()));
    match &report.completed {
        Some(result) => {
            println!("Score: {}", result.score);
            println!("Depth: {}", result.depth);
            println!("Nodes: {}", result.nodes);
            println!("Time: {:.3}s", elapsed.as_secs_f64());
            println!("NPS: {:.0}", result.nodes as f64 / elapsed.as_secs_f64());
        }
        None => println!("No search completed before the time limit; fallback move shown"),
    }
    Ok(())
}

fn run_perft(args: PerftArgs) -> Result<()> {
    let board = args.board.board()?;
    println!("Running perft({})...", args.depth);
    println!("{}", board);

    if args.depth <= 2 {
        // Show move breakdown for shallow depths
        let results = perft_divide(&board, args.depth);
        let mut total = 0;

        for (mv, count) in &results {
            println!("{}: {}", mv, count);
            total += count;
        }

        println!("\nTotal: {}", total);
    } else {
        let start = Instant::now();
        let results = perft_detailed(&board, args.depth);
        let elapsed = start.elapsed();

        println!("Nodes: {}", results.nodes);
        println!("Isolations: {}", results.isolations);
        println!("Time: {:.2}s", elapsed.as_secs_f64());
        println!("NPS: {:.0}", results.nodes as f64 / elapsed.as_secs_f64());
    }
    Ok(())
}

fn run_match(args: MatchArgs) -> Result<()> {
    let board = args.board.board()?;
    let config = args.config.load()?;
    let second_config = SearchConfig {
        heuristic: args.second_heuristic.unwrap_or(config.heuristic),
        ..config
    };

    let mut first = build_agent(args.first, config, args.seed);
    let mut second = build_agent(args.second, second_config, args.seed.map(|s| s ^ 1));
    println!("{} vs {}", first.name(), second.name());

    let record = play_game(board, first.as_mut(), second.as_mut(), args.time_limit);

    println!("\n{}", record.board);
    let history: Vec<String> = record.history.iter().map(Move::to_string).collect();
    println!("Moves: {}", history.join(" "));
    let winner = match record.winner {
        Player::One => first.name(),
        Player::Two => second.name(),
    };
    println!("Winner: {} ({}), {}", winner, record.winner, record.outcome);
    Ok(())
}

fn run_play(args: PlayArgs) -> Result<()> {
    let config = args.config.load()?;
    let board = Board::new(args.width, args.height).context("invalid board size")?;

    let mut game = interactive::InteractiveGame::new(board, config, args.time_limit);
    game.run().context("terminal error")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search(args) => run_search(args),
        Commands::Perft(args) => run_perft(args),
        Commands::Match(args) => run_match(args),
        Commands::Tournament(args) => tournament::execute(args),
        Commands::Play(args) => run_play(args),
    }
}
