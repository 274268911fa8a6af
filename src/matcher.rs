use std::collections::HashMap;

use serde::Deserialize;
use shakmaty::Chess;

use crate::error::Result;
use crate::model::OpeningRecord;
use crate::pgn::{position_code, replay};

/// Position code -> opening, as written by `generate-data`. Read-only once loaded.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct PositionIndex(HashMap<String, OpeningRecord>);

impl PositionIndex {
    pub fn get(&self, code: &str) -> Option<&OpeningRecord> {
        self.0.get(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<OpeningRecord> for PositionIndex {
    fn from_iter<I: IntoIterator<Item = OpeningRecord>>(iter: I) -> Self {
        Self(iter.into_iter().map(|r| (r.position_code.clone(), r)).collect())
    }
}

/// Deepest known position of the line: scan from the last ply back to the first.
pub fn first_match<'a>(positions: &[Chess], index: &'a PositionIndex) -> Option<&'a OpeningRecord> {
    positions
        .iter()
        .rev()
        .find_map(|pos| index.get(&position_code(pos)))
}

/// Opening of a game's move text. Empty text never reaches the replayer.
pub fn identify(pgn: &str, index: &PositionIndex) -> Result<Option<OpeningRecord>> {
    if pgn.trim().is_empty() {
        return Ok(None);
    }
    let line = replay(pgn)?;
    Ok(first_match(&line.positions, index).cloned())
}
