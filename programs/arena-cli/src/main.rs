//! Strategy Arena CLI
//!
//! Commands:
//! - tournament: Run the round-robin and print the report
//! - play: Play an interactive session against one strategy
//! - replay: Print a single match round by round
//! - strategies: List the strategy catalog

mod report;
mod session;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use arena_core::{
    replay_match, run_tournament, Pairing, Roster, SeededRng, Strategy, StrategyKind,
    TournamentConfig,
};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arena")]
#[command(about = "Iterated Prisoner's Dilemma round-robin with Monte Carlo statistics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the round-robin tournament
    Tournament {
        #[command(flatten)]
        settings: Settings,
        /// Comma-separated strategy names (default: the full catalog)
        #[arg(long, value_delimiter = ',')]
        roster: Vec<String>,
        /// Print the result as JSON instead of tables
        #[arg(long)]
        json: bool,
        /// Afterwards, play an interactive session against this roster strategy
        #[arg(long)]
        play: Option<String>,
    },
    /// Play an interactive session against one strategy
    Play {
        strategy: String,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print one match round by round
    Replay {
        a: String,
        b: String,
        #[command(flatten)]
        settings: Settings,
        #[arg(long)]
        json: bool,
    },
    /// List the strategy catalog
    Strategies,
}

#[derive(Args)]
struct Settings {
    /// JSON configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    rounds: Option<u32>,
    #[arg(long)]
    trials: Option<u32>,
}

impl Settings {
    fn resolve(&self) -> Result<TournamentConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                TournamentConfig::from_json(&json)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => TournamentConfig::default(),
        };

        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(rounds) = self.rounds {
            config = config.with_rounds(rounds);
        }
        if let Some(trials) = self.trials {
            config = config.with_trials(trials);
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tournament { settings, roster, json, play } => {
            tournament_cmd(&settings, &roster, json, play.as_deref())
        }
        Commands::Play { strategy, seed } => play_cmd(&strategy, seed),
        Commands::Replay { a, b, settings, json } => replay_cmd(&a, &b, &settings, json),
        Commands::Strategies => {
            report::render_catalog(&mut io::stdout().lock())?;
            Ok(())
        }
    }
}

fn tournament_cmd(
    settings: &Settings,
    names: &[String],
    json: bool,
    play: Option<&str>,
) -> Result<()> {
    let config = settings.resolve()?;
    let mut roster = if names.is_empty() {
        Roster::standard(config.seed)
    } else {
        Roster::from_names(names, config.seed)?
    };

    // Resolve the session opponent before the long run
    let opponent = play
        .map(|name| -> Result<usize> {
            let kind: StrategyKind = name.parse()?;
            roster
                .position(kind)
                .with_context(|| format!("{} is not in the roster", kind))
        })
        .transpose()?;

    let result = run_tournament(&mut roster, &config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &result)?;
        writeln!(out)?;
    } else {
        report::render_tournament(&result, &mut out)?;
    }
    drop(out);

    if let Some(index) = opponent {
        let strategy = roster
            .get_mut(index)
            .context("roster slot disappeared")?;
        info!(opponent = strategy.name(), "starting interactive session");
        run_session(strategy, &config)?;
    }
    Ok(())
}

fn play_cmd(name: &str, seed: Option<u64>) -> Result<()> {
    let kind: StrategyKind = name.parse()?;
    let mut strategy = Strategy::new(kind, SeededRng::for_slot(seed, 0));
    run_session(&mut strategy, &TournamentConfig::default())
}

fn run_session(strategy: &mut Strategy, config: &TournamentConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out)?;
    session::play_session(
        strategy,
        session::SESSION_ROUNDS,
        &config.match_config.payoff,
        &mut input,
        &mut out,
    )?;
    Ok(())
}

fn replay_cmd(a: &str, b: &str, settings: &Settings, json: bool) -> Result<()> {
    let config = settings.resolve()?;
    let kind_a: StrategyKind = a.parse()?;
    let kind_b: StrategyKind = b.parse()?;

    let mut sa = Strategy::new(kind_a, SeededRng::for_slot(config.seed, 0));
    let mut sb = Strategy::new(kind_b, SeededRng::for_slot(config.seed, 1));
    let transcript = replay_match(&mut Pairing::between(&mut sa, &mut sb), &config.match_config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &transcript)?;
        writeln!(out)?;
    } else {
        report::render_transcript(kind_a.name(), kind_b.name(), &transcript, &mut out)?;
    }
    Ok(())
}
