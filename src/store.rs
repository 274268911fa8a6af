use std::path::{Path, PathBuf};
use std::time::Instant;

use log::debug;
use serde::Serialize;

use crate::archive::parse_body;
use crate::book::Lookups;
use crate::error::{Error, Result};
use crate::matcher::PositionIndex;
use crate::remote::gather;

pub const OPENINGS_FILE: &str = "openings.json";
pub const ECO_FILE: &str = "eco-lookup.json";
pub const CATEGORY_FILE: &str = "category-lookup.json";
pub const POSITION_FILE: &str = "position-lookup.json";
pub const CATEGORIES_FILE: &str = "categories.json";

fn pretty<T: Serialize>(name: &'static str, value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|source| Error::Serialize { name, source })
}

/// Write every lookup as pretty JSON under `dir`, creating it first.
/// Files are written side by side; a failure doesn't undo the others.
pub async fn write_lookups(dir: &Path, lookups: &Lookups) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| Error::io(dir, e))?;

    let files = [
        (OPENINGS_FILE, pretty(OPENINGS_FILE, &lookups.openings)?),
        (ECO_FILE, pretty(ECO_FILE, &lookups.by_eco)?),
        (CATEGORY_FILE, pretty(CATEGORY_FILE, &lookups.by_category)?),
        (POSITION_FILE, pretty(POSITION_FILE, &lookups.positions)?),
        (CATEGORIES_FILE, pretty(CATEGORIES_FILE, &lookups.categories)?),
    ];

    let t0 = Instant::now();
    let written = gather(files.into_iter().map(|(name, body)| {
        let path = dir.join(name);
        async move {
            tokio::fs::write(&path, body)
                .await
                .map_err(|e| Error::io(&path, e))?;
            Ok::<_, Error>(path)
        }
    }))
    .await?;
    debug!("store: {} files written in {:.3}s", written.len(), t0.elapsed().as_secs_f64());
    Ok(written)
}

/// Load the position lookup produced by `write_lookups`.
pub fn load_position_index(dir: &Path) -> Result<PositionIndex> {
    let path = dir.join(POSITION_FILE);
    let body = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
    let index: PositionIndex = parse_body(&path.display().to_string(), &body)?;
    debug!("store: {} positions loaded from {}", index.len(), path.display());
    Ok(index)
}
