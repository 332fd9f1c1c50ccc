//! Isolation GUI and headless self-play driver

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use isolation::config::{DEFAULT_CACHE_PATH, DEFAULT_SEED};
use isolation::ui::IsolationApp;
use isolation::{EngineConfig, GameSession, Player, SessionConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Queen-move Isolation on a 6x6 board", long_about = None)]
struct Cli {
    /// Transposition cache file, loaded at startup and written at exit
    #[arg(long, default_value = DEFAULT_CACHE_PATH)]
    cache: PathBuf,

    /// Zobrist key seed; a cache written under another seed is discarded
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Side played by the engine
    #[arg(long, value_enum, default_value_t = AiSide::Two)]
    ai: AiSide,

    /// Include the side to move in position hashes
    #[arg(long)]
    hash_side_to_move: bool,

    /// Disable alpha-beta cutoffs (plain minimax)
    #[arg(long)]
    no_pruning: bool,

    /// Per-move search deadline in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Play engine against engine in the terminal instead of opening a window
    #[arg(long)]
    self_play: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum AiSide {
    One,
    Two,
}

impl From<AiSide> for Player {
    fn from(side: AiSide) -> Self {
        match side {
            AiSide::One => Player::One,
            AiSide::Two => Player::Two,
        }
    }
}

impl Cli {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            engine: EngineConfig {
                seed: self.seed,
                hash_side_to_move: self.hash_side_to_move,
                pruning: !self.no_pruning,
                time_limit: self.time_limit_ms.map(Duration::from_millis),
            },
            cache_path: self.cache.clone(),
            ai_player: self.ai.into(),
        }
    }
}

fn run_self_play(mut session: GameSession) -> Result<()> {
    println!("{}", session.board());
    let outcome = session.self_play(|board, result| {
        let mover = board.turn().opponent();
        if let Some(pos) = result.best_move {
            println!(
                "Player {} -> {pos} ({:?}, {}ms, {} nodes)",
                mover.number(),
                result.source,
                result.time_ms,
                result.nodes
            );
        }
        println!("{board}");
    });
    // The cache is saved whether or not the game finished
    session.shutdown();

    let winner = outcome.context("self-play aborted")?;
    println!("Player {} wins", winner.number());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    info!("starting with {cli:?}");
    let session = GameSession::new(cli.session_config());

    if cli.self_play {
        return run_self_play(session);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 520.0])
            .with_min_inner_size([600.0, 420.0])
            .with_title("Isolation"),
        ..Default::default()
    };

    eframe::run_native(
        "Isolation",
        options,
        Box::new(|cc| Ok(Box::new(IsolationApp::new(cc, session)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
