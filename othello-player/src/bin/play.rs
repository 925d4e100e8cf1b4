//! Play Othello in the terminal, against a person or a random mover.
//!
//! Logs go to stderr and are controlled by `RUST_LOG` (default `warn`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_std::task;
use clap::Parser;
use othello_player::config::{ConnectorKind, PlayConfig};
use othello_player::connectors::{Connector, RandomConnector, TextConnector};
use othello_player::{Referee, Tally};
use othello_rules::{GameHistory, Player};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Play Othello on an N x N board.
#[derive(Parser)]
#[command(name = "play", about = "Play Othello in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "othello.toml")]
    config: PathBuf,

    /// Override the board size (even, at least 2)
    #[arg(long)]
    size: Option<usize>,

    /// Override who plays Black
    #[arg(long, value_enum)]
    black: Option<ConnectorKind>,

    /// Override who plays White
    #[arg(long, value_enum)]
    white: Option<ConnectorKind>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of games
    #[arg(long)]
    games: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = PlayConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    if let Some(size) = cli.size {
        config.size = size;
    }
    if let Some(black) = cli.black {
        config.black = black;
    }
    if let Some(white) = cli.white {
        config.white = white;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(games) = cli.games {
        config.games = games;
    }
    config.validate().context("invalid settings")?;

    task::block_on(run(&config))
}

fn connector(config: &PlayConfig, game: usize, player: Player) -> Box<dyn Connector> {
    let kind = match player {
        Player::Black => config.black,
        Player::White => config.white,
    };

    match kind {
        ConnectorKind::Human => Box::new(TextConnector::stdio(player)),
        ConnectorKind::Random => match config.seed_for(game, player) {
            Some(seed) => Box::new(RandomConnector::seeded(player, seed)),
            None => Box::new(RandomConnector::new(player)),
        },
    }
}

async fn run(config: &PlayConfig) -> Result<()> {
    let mut tally = Tally::default();

    for game in 0..config.games {
        let history = GameHistory::new(config.size)?;
        let mut referee = Referee::new(
            history,
            connector(config, game, Player::Black),
            connector(config, game, Player::White),
        )?;

        let outcome = referee
            .play()
            .await
            .with_context(|| format!("playing game {}", game + 1))?;
        info!(game = game + 1, %outcome, "recorded result");
        tally.record(outcome);

        if config.games == 1 {
            println!("\n{}", referee.history());
            if !referee.history().is_game_over() {
                println!("Resigned: {}", outcome);
            }
        }
    }

    if config.games > 1 {
        println!("{}", tally);
    }
    Ok(())
}
