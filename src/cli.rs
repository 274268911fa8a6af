use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Win rates per opening over a chess.com player's recent games.
#[derive(Parser, Debug)]
#[command(name = "repertoire", version)]
pub struct AnalyzeArgs {
    /// chess.com username to analyze
    pub handle: String,

    /// TOML config (default: $REPERTOIRE_CONFIG, then ./config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the lookups written by generate-data
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Number of most recent monthly archives to fetch
    #[arg(long)]
    pub months: Option<NonZeroUsize>,

    /// Detailed timings/logs
    #[arg(short, long)]
    pub verbose: bool,
}

/// Build the opening lookup tables from the lichess chess-openings dataset.
#[derive(Parser, Debug)]
#[command(name = "generate-data", version)]
pub struct GenerateArgs {
    /// TOML config (default: $REPERTOIRE_CONFIG, then ./config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output directory (overrides data_dir from the config)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Detailed timings/logs
    #[arg(short, long)]
    pub verbose: bool,
}

impl AnalyzeArgs {
    /// CLI values override the config file.
    pub fn apply(&self, cfg: &mut Config) {
        if let Some(dir) = &self.data_dir {
            cfg.data_dir = dir.clone();
        }
        if let Some(n) = self.months {
            cfg.months = n.get();
        }
    }
}

impl GenerateArgs {
    pub fn apply(&self, cfg: &mut Config) {
        if let Some(dir) = &self.out {
            cfg.data_dir = dir.clone();
        }
    }
}
