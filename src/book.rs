//! Turning raw dataset rows into opening records and the lookup tables built from them.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::eco::category_of;
use crate::error::{Error, Result};
use crate::model::OpeningRecord;
use crate::pgn::{move_code, position_code, replay};

/// Parse one `eco \t name \t pgn` row and replay it. Extra columns are ignored.
pub fn process_row(row: &str) -> Result<OpeningRecord> {
    let mut cols = row.split('\t');
    let (Some(eco), Some(name), Some(move_text)) = (cols.next(), cols.next(), cols.next()) else {
        return Err(Error::MalformedRow { row: row.to_string() });
    };

    let line = replay(move_text)?;
    Ok(OpeningRecord {
        eco: eco.to_string(),
        name: name.to_string(),
        move_text: move_text.to_string(),
        position_code: position_code(line.final_position()),
        move_code: move_code(&line.moves),
    })
}

/// Process rows in parallel; output keeps input order. The first bad row fails the batch.
pub fn process_rows(rows: &[String]) -> Result<Vec<OpeningRecord>> {
    rows.par_iter().map(|r| process_row(r)).collect()
}

/// Every index derived from the opening list. Rebuilt wholesale on each run.
#[derive(Debug, Default)]
pub struct Lookups {
    pub openings: Vec<OpeningRecord>,
    pub by_eco: BTreeMap<String, Vec<OpeningRecord>>,
    pub by_category: BTreeMap<String, Vec<OpeningRecord>>,
    pub positions: BTreeMap<String, OpeningRecord>,
    pub categories: Vec<String>,
}

impl Lookups {
    pub fn build(records: impl IntoIterator<Item = OpeningRecord>) -> Self {
        let mut out = Self::default();
        for record in records {
            out.insert(record);
        }
        out
    }

    fn insert(&mut self, record: OpeningRecord) {
        let category = category_of(&record.eco);
        if !self.by_category.contains_key(&category) {
            self.categories.push(category.clone());
        }
        self.by_category.entry(category).or_default().push(record.clone());
        self.by_eco.entry(record.eco.clone()).or_default().push(record.clone());
        // later rows reaching the same position replace earlier ones
        self.positions.insert(record.position_code.clone(), record.clone());
        self.openings.push(record);
    }
}
