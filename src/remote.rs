use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use futures_util::future::join_all;
use log::{debug, info};
use rayon::prelude::*;
use reqwest::Client;
use tokio::task;

use crate::archive::{archive_month, parse_body, ArchiveList, ArchivePage, GameRecord, GameWithOpening};
use crate::config::Config;
use crate::eco::CATEGORIES;
use crate::error::{Error, Result};
use crate::matcher::{identify, PositionIndex};

pub fn client(cfg: &Config) -> Result<Client> {
    Client::builder()
        .user_agent(cfg.user_agent.as_str())
        .build()
        .map_err(Error::HttpClient)
}

/// Run a batch side by side and keep results in dispatch order.
/// Every member runs to completion; the first error in that order is returned.
pub async fn gather<T, F>(batch: impl IntoIterator<Item = F>) -> Result<Vec<T>>
where
    F: Future<Output = Result<T>>,
{
    join_all(batch).await.into_iter().collect()
}

/// GET a URL as text. Any non-2xx status is an error.
pub async fn get_text(client: &Client, url: &str) -> Result<String> {
    debug!("remote: GET {}", url);
    let t0 = Instant::now();
    let http = |source| Error::Http { url: url.to_string(), source };

    let resp = client.get(url).send().await.map_err(http)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Network { url: url.to_string(), status: status.as_u16() });
    }
    let text = resp.text().await.map_err(http)?;
    debug!("remote: {} fetched in {:.3}s ({} bytes)", url, t0.elapsed().as_secs_f64(), text.len());
    Ok(text)
}

/// Data rows of a TSV body: header dropped, blank lines skipped.
fn tsv_rows(body: &str) -> impl Iterator<Item = String> + '_ {
    body.lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
}

/// Raw opening rows of all five categories, category order then row order.
pub async fn fetch_opening_rows(client: &Client, cfg: &Config) -> Result<Vec<String>> {
    let pages = gather(CATEGORIES.iter().map(|&c| {
        let url = cfg.openings_url_for(c);
        async move {
            let body = get_text(client, &url).await?;
            let rows: Vec<String> = tsv_rows(&body).collect();
            debug!("remote: category {} -> {} rows", c, rows.len());
            Ok::<_, Error>(rows)
        }
    }))
    .await?;

    Ok(pages.into_iter().flatten().collect())
}

/// Most recent `months` archive URLs of a player, oldest first.
pub async fn fetch_archive_urls(client: &Client, cfg: &Config, handle: &str) -> Result<Vec<String>> {
    let url = cfg.archives_url_for(handle);
    let list: ArchiveList = parse_body(&url, &get_text(client, &url).await?)?;
    let skip = list.archives.len().saturating_sub(cfg.months);
    Ok(list.archives.into_iter().skip(skip).collect())
}

/// Standard games of the recent archives, each with its opening attached.
/// One failed or malformed archive fails the whole call.
pub async fn fetch_recent_games(
    client: &Client,
    cfg: &Config,
    handle: &str,
    index: Arc<PositionIndex>,
) -> Result<Vec<GameWithOpening>> {
    let urls = fetch_archive_urls(client, cfg, handle).await?;
    let months: Vec<String> = urls
        .iter()
        .map(|u| archive_month(u).unwrap_or_else(|| u.clone()))
        .collect();
    info!("player: {} | archives: {}", handle, months.join(", "));

    let pages = gather(urls.iter().map(|url| async move {
        let page: ArchivePage = parse_body(url, &get_text(client, url).await?)?;
        Ok::<_, Error>(page.games)
    }))
    .await?;

    let games: Vec<GameRecord> = pages
        .into_iter()
        .flatten()
        .filter(GameRecord::is_standard)
        .collect();
    info!("player: {} | standard games: {}", handle, games.len());

    let t0 = Instant::now();
    let out = task::spawn_blocking(move || attach_openings(games, &index)).await??;
    debug!("remote: openings identified in {:.3}s", t0.elapsed().as_secs_f64());
    Ok(out)
}

/// Identify every game's opening in parallel, keeping game order.
pub fn attach_openings(games: Vec<GameRecord>, index: &PositionIndex) -> Result<Vec<GameWithOpening>> {
    games
        .into_par_iter()
        .map(|game| {
            let opening = identify(&game.pgn, index)?;
            Ok::<_, Error>(GameWithOpening { game, opening })
        })
        .collect()
}
