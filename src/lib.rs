//! Opening win rates for a chess.com player.
//!
//! `generate-data` turns the lichess opening catalogue into lookup tables once;
//! `repertoire` replays a player's recent games against the position lookup and
//! ranks openings by win rate for each color.

pub mod aggregator;
pub mod archive;
pub mod book;
pub mod cli;
pub mod config;
pub mod eco;
pub mod error;
pub mod matcher;
pub mod model;
pub mod pgn;
pub mod remote;
pub mod store;
pub mod verbose;

pub use error::{Error, Result};
