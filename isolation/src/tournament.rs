//! Round-robin evaluation of the alpha-beta agents.
//!
//! Every test agent plays `matches` matches against each opponent on the
//! roster. A match is two games from the same random opening with seats
//! swapped, so a test agent plays `2 * matches` games per opponent.

use anyhow::Result;
use clap::Args;
use isolation_agents::{
    play_match, Agent, AlphaBetaAgent, Heuristic, MinimaxAgent, RandomAgent, SearchConfig,
};
use isolation_core::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::{seeded_rng, ConfigArgs};

#[derive(Args, Debug)]
pub struct TournamentArgs {
    /// Matches per pairing; each match is two games
    #[arg(long, default_value_t = 5)]
    pub matches: usize,

    /// Milliseconds per move
    #[arg(long, default_value_t = 150.0)]
    pub time_limit: f64,

    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[arg(long)]
    pub seed: Option<u64>,
}

/// Results of one test agent against one opponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub opponent: String,
    pub wins: usize,
    pub losses: usize,
    pub timeouts: usize,
    pub forfeits: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub agent: String,
    pub pairings: Vec<Pairing>,
}

impl Standing {
    pub fn wins(&self) -> usize {
        self.pairings.iter().map(|p| p.wins).sum()
    }

    pub fn games(&self) -> usize {
        self.pairings.iter().map(|p| p.wins + p.losses).sum()
    }

    pub fn win_rate(&self) -> f64 {
        match self.games() {
            0 => 0.0,
            games => 100.0 * self.wins() as f64 / games as f64,
        }
    }
}

/// Alpha-beta with each custom heuristic, plus the improved baseline.
fn test_agents(config: SearchConfig, rng: &mut StdRng) -> Vec<Box<dyn Agent>> {
    [
        Heuristic::CenterMobility,
        Heuristic::OpenMobility,
        Heuristic::StrictCenterMobility,
        Heuristic::Improved,
    ]
    .into_iter()
    .map(|heuristic| {
        let agent = AlphaBetaAgent::with_rng(
            SearchConfig { heuristic, ..config },
            StdRng::seed_from_u64(rng.gen()),
        );
        Box::new(agent) as Box<dyn Agent>
    })
    .collect()
}

fn opponents(config: SearchConfig, rng: &mut StdRng) -> Vec<Box<dyn Agent>> {
    let baselines = [
        (Heuristic::OpenMove, "Open"),
        (Heuristic::Center, "Center"),
        (Heuristic::Improved, "Improved"),
    ];

    let mut roster: Vec<Box<dyn Agent>> =
        vec![Box::new(RandomAgent::with_rng(StdRng::seed_from_u64(rng.gen())))];
    for (heuristic, label) in baselines {
        let agent = MinimaxAgent::new(SearchConfig { heuristic, ..config })
            .with_name(format!("MM_{}", label));
        roster.push(Box::new(agent));
    }
    for (heuristic, label) in baselines {
        let agent = AlphaBetaAgent::with_rng(
            SearchConfig { heuristic, ..config },
            StdRng::seed_from_u64(rng.gen()),
        )
        .with_name(format!("AB_{}", label));
        roster.push(Box::new(agent));
    }
    roster
}

pub fn run_tournament(args: &TournamentArgs, config: SearchConfig) -> Result<Vec<Standing>> {
    let mut rng = seeded_rng(args.seed);
    let mut agents = test_agents(config, &mut rng);
    let mut roster = opponents(config, &mut rng);
    let mut standings = Vec::with_capacity(agents.len());

    for agent in agents.iter_mut() {
        let mut pairings = Vec::with_capacity(roster.len());

        for opponent in roster.iter_mut() {
            let mut pairing = Pairing {
                opponent: opponent.name().to_string(),
                wins: 0,
                losses: 0,
                timeouts: 0,
                forfeits: 0,
            };

            for _ in 0..args.matches {
                let record = play_match(
                    args.width,
                    args.height,
                    agent.as_mut(),
                    opponent.as_mut(),
                    args.time_limit,
                    &mut rng,
                )?;
                pairing.wins += record.wins;
                pairing.losses += record.losses;
                pairing.timeouts += record.timeouts();
                pairing.forfeits += record.forfeits();
            }

            info!(
                agent = agent.name(),
                opponent = %pairing.opponent,
                wins = pairing.wins,
                losses = pairing.losses,
                "pairing finished"
            );
            pairings.push(pairing);
        }

        standings.push(Standing {
            agent: agent.name().to_string(),
            pairings,
        });
    }

    Ok(standings)
}

fn print_standings(standings: &[Standing]) {
    for standing in standings {
        println!("\n{}", standing.agent);
        for pairing in &standing.pairings {
            println!(
                "  vs {:<12} {:>3} - {:<3} (timeouts {}, forfeits {})",
                pairing.opponent, pairing.wins, pairing.losses, pairing.timeouts, pairing.forfeits
            );
        }
        println!("  Win rate: {:.1}%", standing.win_rate());
    }
}

pub fn execute(args: TournamentArgs) -> Result<()> {
    let config = args.config.load()?;

    println!(
        "Playing {} matches per pairing on a {}x{} board, {} ms per move",
        args.matches, args.width, args.height, args.time_limit
    );
    let standings = run_tournament(&args, config)?;
    print_standings(&standings);
    Ok(())
}
