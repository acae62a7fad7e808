use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use arcade_snake::game::{Difficulty, GameConfig};
use arcade_snake::modes::ArcadeMode;
use arcade_snake::persistence::HighScoreStore;

#[derive(Parser)]
#[command(name = "arcade_snake")]
#[command(version, about = "Grid snake with smooth animated movement")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value = "40")]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value = "27")]
    height: usize,

    /// Difficulty preselected in the menu
    #[arg(long, value_enum, default_value = "medium")]
    difficulty: Difficulty,

    /// Where high scores are stored
    #[arg(long, default_value = "high_score.json")]
    scores: PathBuf,

    /// Disable sound cues
    #[arg(long)]
    no_sound: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = GameConfig::new(cli.width, cli.height);
    let store = HighScoreStore::new(cli.scores);

    let mut mode = ArcadeMode::new(config, cli.difficulty, store, !cli.no_sound);
    mode.run().await
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stdout)
        .try_init();
}
