use std::collections::HashMap;

use serde::Serialize;

use crate::archive::GameWithOpening;
use crate::model::{Color, Outcome, Stats};

/// Per-color counters keyed by opening name, remembering first-seen order.
#[derive(Debug, Default)]
pub struct ColorStats {
    order: Vec<(String, Stats)>,
    slots: HashMap<String, usize>,
}

impl ColorStats {
    fn entry(&mut self, name: &str) -> &mut Stats {
        let idx = match self.slots.get(name) {
            Some(&i) => i,
            None => {
                self.order.push((name.to_string(), Stats::default()));
                self.slots.insert(name.to_string(), self.order.len() - 1);
                self.order.len() - 1
            }
        };
        &mut self.order[idx].1
    }

    pub fn get(&self, name: &str) -> Option<&Stats> {
        self.slots.get(name).map(|&i| &self.order[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Stats)> {
        self.order.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Openings with more than `min_games` games, best win rate first, at most `top`.
    /// Equal rates keep first-seen order.
    pub fn ranked(&self, min_games: u64, top: usize) -> Vec<(&str, Stats)> {
        let mut rows: Vec<(&str, Stats)> = self
            .iter()
            .filter(|(_, s)| s.total > min_games)
            .map(|(n, s)| (n, *s))
            .collect();
        rows.sort_by(|a, b| b.1.win_rate().total_cmp(&a.1.win_rate()));
        rows.truncate(top);
        rows
    }
}

#[derive(Debug, Default)]
pub struct OpeningStats {
    pub white: ColorStats,
    pub black: ColorStats,
}

/// Printed summary: one formatted line per ranked opening.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct Report {
    pub white: Vec<String>,
    pub black: Vec<String>,
}

impl OpeningStats {
    /// Count every game with a known opening from `handle`'s point of view.
    pub fn from_games(games: &[GameWithOpening], handle: &str) -> Self {
        let mut stats = Self::default();
        for g in games {
            let Some(opening) = g.opening.as_ref() else {
                continue;
            };
            let color = g.game.color_of(handle);
            let opponent = match color {
                Color::White => Color::Black,
                Color::Black => Color::White,
            };
            let outcome = Outcome::from_results(
                &g.game.side(color).result,
                &g.game.side(opponent).result,
            );
            stats.color_mut(color).entry(&opening.name).add_outcome(outcome);
        }
        stats
    }

    pub fn color(&self, color: Color) -> &ColorStats {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn color_mut(&mut self, color: Color) -> &mut ColorStats {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    pub fn report(&self, min_games: u64, top: usize) -> Report {
        let lines = |c: &ColorStats| -> Vec<String> {
            c.ranked(min_games, top)
                .into_iter()
                .map(|(name, s)| format_line(name, &s))
                .collect()
        };
        Report { white: lines(&self.white), black: lines(&self.black) }
    }
}

pub fn format_line(name: &str, s: &Stats) -> String {
    format!(
        "{:.2}% win rate with {} ({}W/{}L/{}D in {} games)",
        s.win_rate(),
        name,
        s.wins,
        s.losses,
        s.draws,
        s.total
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{GameRecord, PlayerSide};
    use crate::model::OpeningRecord;

    fn side(name: &str, result: &str) -> PlayerSide {
        PlayerSide {
            rating: 1500,
            result: result.to_string(),
            id: format!("https://api.chess.com/pub/player/{name}"),
            username: name.to_string(),
            uuid: name.to_string(),
        }
    }

    fn game(white: (&str, &str), black: (&str, &str), opening: Option<&str>) -> GameWithOpening {
        GameWithOpening {
            game: GameRecord {
                url: String::new(),
                pgn: String::new(),
                time_control: "180".into(),
                end_time: 0,
                rated: true,
                uuid: String::new(),
                initial_setup: String::new(),
                fen: String::new(),
                time_class: "blitz".into(),
                rules: "chess".into(),
                white: side(white.0, white.1),
                black: side(black.0, black.1),
                accuracies: None,
            },
            opening: opening.map(|name| OpeningRecord {
                eco: "C50".into(),
                name: name.into(),
                move_text: String::new(),
                position_code: String::new(),
                move_code: String::new(),
            }),
        }
    }

    #[test]
    fn counts_win_loss_draw_as_white() {
        let games = vec![
            game(("alice", "win"), ("bob", "resigned"), Some("Italian Game")),
            game(("Alice", "checkmated"), ("carol", "win"), Some("Italian Game")),
            game(("ALICE", "agreed"), ("dave", "agreed"), Some("Italian Game")),
        ];
        let stats = OpeningStats::from_games(&games, "alice");
        assert_eq!(
            stats.white.get("Italian Game"),
            Some(&Stats { total: 3, wins: 1, losses: 1, draws: 1 })
        );
        assert!(stats.black.is_empty());
    }

    #[test]
    fn games_without_opening_are_ignored() {
        let games = vec![
            game(("alice", "win"), ("bob", "resigned"), None),
            game(("bob", "win"), ("alice", "resigned"), Some("Sicilian Defense")),
        ];
        let stats = OpeningStats::from_games(&games, "alice");
        assert!(stats.white.is_empty());
        assert_eq!(
            stats.black.get("Sicilian Defense"),
            Some(&Stats { total: 1, wins: 0, losses: 1, draws: 0 })
        );
    }

    #[test]
    fn identical_results_are_draws() {
        let games = vec![
            game(("alice", "repetition"), ("bob", "repetition"), Some("French Defense")),
            game(("bob", "stalemate"), ("alice", "stalemate"), Some("French Defense")),
        ];
        let stats = OpeningStats::from_games(&games, "alice");
        for color in [Color::White, Color::Black] {
            let s = stats.color(color).get("French Defense").unwrap();
            assert_eq!((s.draws, s.wins, s.losses), (1, 0, 0));
        }
    }

    #[test]
    fn unknown_handle_counts_as_black() {
        let games = vec![game(("bob", "win"), ("carol", "resigned"), Some("Italian Game"))];
        let stats = OpeningStats::from_games(&games, "alice");
        assert_eq!(stats.black.get("Italian Game").unwrap().losses, 1);
    }

    fn bulk(stats: &mut ColorStats, name: &str, wins: u64, losses: u64) {
        for _ in 0..wins {
            stats.entry(name).add_outcome(Outcome::Win);
        }
        for _ in 0..losses {
            stats.entry(name).add_outcome(Outcome::Loss);
        }
    }

    #[test]
    fn ranking_filters_sorts_and_truncates() {
        let mut c = ColorStats::default();
        bulk(&mut c, "Rare", 15, 0); // exactly 15 is not enough
        for i in 0..12u64 {
            bulk(&mut c, &format!("Opening {i}"), i + 4, 12);
        }
        let ranked = c.ranked(15, 10);
        assert_eq!(ranked.len(), 10);
        assert!(ranked.iter().all(|(_, s)| s.total > 15));
        assert!(ranked.windows(2).all(|w| w[0].1.win_rate() >= w[1].1.win_rate()));
        assert_eq!(ranked[0].0, "Opening 11");
        for (_, s) in &ranked {
            assert_eq!(s.total, s.wins + s.losses + s.draws);
        }
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let mut c = ColorStats::default();
        bulk(&mut c, "Second", 8, 8);
        bulk(&mut c, "First", 8, 8);
        bulk(&mut c, "Best", 16, 0);
        let names: Vec<_> = c.ranked(15, 10).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Best", "Second", "First"]);
    }

    #[test]
    fn report_formats_lines() {
        let mut stats = OpeningStats::default();
        bulk(&mut stats.white, "Italian Game", 12, 4);
        let report = stats.report(15, 10);
        assert_eq!(
            report.white,
            vec!["75.00% win rate with Italian Game (12W/4L/0D in 16 games)".to_string()]
        );
        assert!(report.black.is_empty());
    }
}
