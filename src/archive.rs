//! Shapes returned by the chess.com public API.
//!
//! Deserialization is the validation step: a missing or mistyped field fails the
//! whole response. Unknown fields are ignored.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{Color, OpeningRecord};

static ARCHIVE_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(\d{4})/(\d{2})/?$").expect("static regex"));

#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveList {
    pub archives: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArchivePage {
    pub games: Vec<GameRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameRecord {
    pub url: String,
    pub pgn: String,
    pub time_control: String,
    pub end_time: i64,
    pub rated: bool,
    pub uuid: String,
    pub initial_setup: String,
    pub fen: String,
    pub time_class: String,
    pub rules: String,
    pub white: PlayerSide,
    pub black: PlayerSide,
    pub accuracies: Option<Accuracies>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerSide {
    pub rating: u32,
    pub result: String,
    #[serde(rename = "@id")]
    pub id: String,
    pub username: String,
    pub uuid: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Accuracies {
    pub white: f64,
    pub black: f64,
}

impl GameRecord {
    /// Standard chess, as opposed to chess960, bughouse and the other variants.
    pub fn is_standard(&self) -> bool {
        self.rules == "chess"
    }

    /// Side played by `handle`. Anyone who isn't white is taken to be black.
    pub fn color_of(&self, handle: &str) -> Color {
        if self.white.username.eq_ignore_ascii_case(handle) {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn involves(&self, handle: &str) -> bool {
        self.white.username.eq_ignore_ascii_case(handle) || self.black.username.eq_ignore_ascii_case(handle)
    }

    pub fn side(&self, color: Color) -> &PlayerSide {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameWithOpening {
    pub game: GameRecord,
    pub opening: Option<OpeningRecord>,
}

/// Deserialize a response body, naming the URL on failure.
pub fn parse_body<T: DeserializeOwned>(url: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| Error::Schema { origin: url.to_string(), source })
}

/// "https://.../games/2024/05" -> "2024-05". None for anything else.
pub fn archive_month(url: &str) -> Option<String> {
    let caps = ARCHIVE_MONTH.captures(url)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(date.format("%Y-%m").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAME: &str = r#"{
        "url": "https://www.chess.com/game/live/1",
        "pgn": "1. e4 e5",
        "time_control": "180",
        "end_time": 1714600000,
        "rated": true,
        "tcn": "mC0K",
        "uuid": "u-1",
        "initial_setup": "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "fen": "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
        "time_class": "blitz",
        "rules": "chess",
        "white": {"rating": 1500, "result": "win", "@id": "https://api.chess.com/pub/player/alice", "username": "Alice", "uuid": "w"},
        "black": {"rating": 1490, "result": "resigned", "@id": "https://api.chess.com/pub/player/bob", "username": "bob", "uuid": "b"}
    }"#;

    #[test]
    fn parses_game_without_accuracies() {
        let g: GameRecord = parse_body("t", GAME).unwrap();
        assert!(g.is_standard());
        assert!(g.accuracies.is_none());
        assert_eq!(g.white.id, "https://api.chess.com/pub/player/alice");
        assert_eq!(g.color_of("ALICE"), Color::White);
        assert_eq!(g.color_of("bob"), Color::Black);
        assert_eq!(g.color_of("carol"), Color::Black);
        assert!(g.involves("BOB"));
        assert!(!g.involves("carol"));
        assert_eq!(g.side(Color::Black).result, "resigned");
    }

    #[test]
    fn missing_field_is_a_schema_error() {
        let broken = GAME.replace(r#""rules": "chess","#, "");
        let err = parse_body::<GameRecord>("https://x/games/2024/05", &broken).unwrap_err();
        match err {
            Error::Schema { origin, .. } => assert_eq!(origin, "https://x/games/2024/05"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn mistyped_rating_is_a_schema_error() {
        let broken = GAME.replace(r#""rating": 1500"#, r#""rating": "1500""#);
        assert!(parse_body::<GameRecord>("t", &broken).is_err());
    }

    #[test]
    fn archive_list_must_be_strings() {
        assert!(parse_body::<ArchiveList>("t", r#"{"archives": ["a", "b"]}"#).is_ok());
        assert!(parse_body::<ArchiveList>("t", r#"{"archives": [1]}"#).is_err());
        assert!(parse_body::<ArchiveList>("t", r#"{"months": []}"#).is_err());
    }

    #[test]
    fn month_from_archive_url() {
        assert_eq!(
            archive_month("https://api.chess.com/pub/player/alice/games/2024/05").as_deref(),
            Some("2024-05")
        );
        assert_eq!(archive_month("https://api.chess.com/pub/player/alice/games/2024/13"), None);
        assert_eq!(archive_month("https://example.com/"), None);
    }
}
