use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

pub const CONFIG_ENV: &str = "REPERTOIRE_CONFIG";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub openings_url: String,        // "{category}" is replaced by a..e
    pub archives_url: String,        // "{handle}" is replaced by the player
    pub user_agent: String,
    pub data_dir: PathBuf,           // where generate-data writes the lookups
    pub months: usize,               // most recent archives to analyze
    pub min_games: u64,              // an opening needs more games than this
    pub top: usize,                  // openings listed per color
    pub rayon_threads: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openings_url: "https://raw.githubusercontent.com/lichess-org/chess-openings/master/{category}.tsv"
                .to_string(),
            archives_url: "https://api.chess.com/pub/player/{handle}/games/archives".to_string(),
            user_agent: concat!("repertoire/", env!("CARGO_PKG_VERSION")).to_string(),
            data_dir: PathBuf::from("data"),
            months: 6,
            min_games: 15,
            top: 10,
            rayon_threads: None,
        }
    }
}

impl Config {
    /// Explicit path, else `$REPERTOIRE_CONFIG`, else `./config.toml`.
    /// A missing file means defaults; a file that doesn't parse is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => std::env::var_os(CONFIG_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("config.toml")),
        };
        match std::fs::read_to_string(&path) {
            Ok(s) => Self::from_toml(&s).map_err(|reason| Error::Config {
                path: path.display().to_string(),
                reason,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && explicit.is_none() => {
                Ok(Self::default())
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    fn from_toml(s: &str) -> std::result::Result<Self, String> {
        let cfg: Self = toml::from_str(s).map_err(|e| e.to_string())?;
        if cfg.months == 0 {
            return Err("months must be at least 1".to_string());
        }
        Ok(cfg)
    }

    pub fn openings_url_for(&self, category: char) -> String {
        self.openings_url.replace("{category}", &category.to_string())
    }

    pub fn archives_url_for(&self, handle: &str) -> String {
        self.archives_url.replace("{handle}", &handle.to_lowercase())
    }
}
