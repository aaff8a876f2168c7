use std::path::PathBuf;

use clap::Parser;

/// Terminal snake with a timed fruit pool.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Config {
    /// File holding the best score
    #[arg(long, value_name = "PATH", default_value = "score.txt")]
    pub score_file: PathBuf,

    /// Directory containing splash.txt and game_over.txt
    #[arg(long = "assets", value_name = "DIR", default_value = "assets")]
    pub assets_dir: PathBuf,

    /// Target frame rate
    #[arg(
        long,
        value_name = "N",
        default_value_t = 30,
        value_parser = clap::value_parser!(u32).range(1..=240)
    )]
    pub fps: u32,

    /// Seed for fruit placement, for reproducible matches
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Write logs here (filtered by RUST_LOG); nothing is logged otherwise
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
