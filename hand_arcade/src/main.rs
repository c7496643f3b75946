//! hand_arcade — desktop entry point.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use hand_arcade::{run, AppConfig, GameKind};

#[derive(Parser)]
#[command(name = "hand_arcade", about = "Gesture-controlled arcade games")]
struct Cli {
    /// Game to start with
    #[arg(long, value_enum)]
    game: Option<GameKind>,

    /// JSON config file; missing means defaults
    #[arg(long, default_value = "hand_arcade.json")]
    config: PathBuf,

    /// Fixed random seed
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "hand_arcade=debug,gesture_core=debug,arcade_games=debug"
    } else {
        "hand_arcade=info,gesture_core=info,arcade_games=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Hand Arcade — Gesture-Controlled Mini Games         ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let mut cfg = AppConfig::load(&cli.config)?;
    if let Some(game) = cli.game { cfg.game = game; }
    if cli.seed.is_some() { cfg.seed = cli.seed; }
    if let Some(w) = cli.width { cfg.width = w; }
    if let Some(h) = cli.height { cfg.height = h; }
    cfg.validate()?;

    println!("  Starting {} at {}x{}", cfg.game.name(), cfg.width, cfg.height);
    println!("  Mouse is the fingertip; hold A/S/D/F/G/X for poses, Space to pinch.");
    println!();

    run(cfg)
}
