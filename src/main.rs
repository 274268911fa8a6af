use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::{debug, info, warn};

use repertoire::aggregator::OpeningStats;
use repertoire::cli::AnalyzeArgs;
use repertoire::config::Config;
use repertoire::{remote, store, verbose};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = AnalyzeArgs::parse();
    verbose::init(args.verbose);

    let mut cfg = Config::load(args.config.as_deref()).context("loading config")?;
    args.apply(&mut cfg);

    if let Some(n) = cfg.rayon_threads {
        let _ = rayon::ThreadPoolBuilder::new().num_threads(n).build_global();
    }

    let index = store::load_position_index(&cfg.data_dir).with_context(|| {
        format!(
            "loading position lookup from {} (run generate-data first)",
            cfg.data_dir.display()
        )
    })?;

    let client = remote::client(&cfg)?;
    let games = remote::fetch_recent_games(&client, &cfg, &args.handle, Arc::new(index))
        .await
        .context("fetching games")?;
    info!("player: {} | total games: {}", args.handle, games.len());

    let matched = games.iter().filter(|g| g.opening.is_some()).count();
    debug!("openings matched: {} | unmatched: {}", matched, games.len() - matched);
    let strangers = games.iter().filter(|g| !g.game.involves(&args.handle)).count();
    if strangers > 0 {
        warn!("{} games don't list {} on either side; counted as black", strangers, args.handle);
    }

    let report = OpeningStats::from_games(&games, &args.handle).report(cfg.min_games, cfg.top);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
