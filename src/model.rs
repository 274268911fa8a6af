use std::fmt;

use serde::{Deserialize, Serialize};

/// One catalogued opening line, keyed by the position its moves reach.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningRecord {
    pub eco: String,           // e.g. "C50"
    pub name: String,
    pub move_text: String,     // raw notation, "1. e4 e5 2. Nf3"
    pub position_code: String, // placement, side, castling, en passant
    pub move_code: String,     // "e2e4e7e5g1f3"
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// Collapse the source's granular result strings into three buckets.
    /// Identical strings on both sides ("agreed", "repetition", ...) are a draw.
    pub fn from_results(own: &str, opponent: &str) -> Self {
        if own == opponent {
            Outcome::Draw
        } else if own == "win" {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: u64,
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
}

impl Stats {
    pub fn add_outcome(&mut self, outcome: Outcome) {
        self.total += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.wins as f64 / self.total as f64 * 100.0
    }
}
