use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::{error, info};

use repertoire::book::{process_rows, Lookups};
use repertoire::cli::GenerateArgs;
use repertoire::config::Config;
use repertoire::{remote, store, verbose};

async fn run(cfg: &Config) -> anyhow::Result<()> {
    let t0 = Instant::now();
    let client = remote::client(cfg)?;
    let rows = remote::fetch_opening_rows(&client, cfg)
        .await
        .context("fetching opening rows")?;
    info!("openings: {} rows fetched in {:.3}s", rows.len(), t0.elapsed().as_secs_f64());

    let t1 = Instant::now();
    let records = tokio::task::spawn_blocking(move || process_rows(&rows))
        .await?
        .context("processing opening rows")?;
    let lookups = Lookups::build(records);
    info!(
        "openings: {} records, {} positions, {} eco codes, categories {:?} ({:.3}s)",
        lookups.openings.len(),
        lookups.positions.len(),
        lookups.by_eco.len(),
        lookups.categories,
        t1.elapsed().as_secs_f64()
    );

    let written = store::write_lookups(&cfg.data_dir, &lookups)
        .await
        .context("writing lookups")?;
    for path in written {
        info!("wrote {}", path.display());
    }
    Ok(())
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    let args = GenerateArgs::parse();
    verbose::init(args.verbose);

    let result = match Config::load(args.config.as_deref()) {
        Ok(mut cfg) => {
            args.apply(&mut cfg);
            if let Some(n) = cfg.rayon_threads {
                let _ = rayon::ThreadPoolBuilder::new().num_threads(n).build_global();
            }
            run(&cfg).await
        }
        Err(e) => Err(anyhow::Error::new(e).context("loading config")),
    };

    if let Err(e) = result {
        error!("generate-data failed: {:#}", e);
        std::process::exit(1);
    }
}
