use std::fmt::Write;
use std::ops::ControlFlow;

use pgn_reader::{RawTag, Reader, SanPlus, Skip, Visitor};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Move, Position};

use crate::error::{Error, Result};

/// The mainline of one game: every move played and the position after each ply.
#[derive(Debug, Default)]
pub struct Replay {
    pub moves: Vec<Move>,
    pub positions: Vec<Chess>,
    current: Chess,
}

impl Replay {
    fn starting_at(position: Chess) -> Self {
        Self { moves: Vec::new(), positions: Vec::new(), current: position }
    }

    /// Position after the last ply (the starting position if nothing was played).
    pub fn final_position(&self) -> &Chess {
        &self.current
    }
}

struct Replayer;

impl Visitor for Replayer {
    type Tags = Option<Chess>;
    type Movetext = Replay;
    type Output = std::result::Result<Replay, String>;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        ControlFlow::Continue(None)
    }

    fn tag(
        &mut self,
        start: &mut Self::Tags,
        name: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        if name != b"FEN" {
            return ControlFlow::Continue(());
        }
        let parsed = value
            .decode_utf8_lossy()
            .parse::<Fen>()
            .map_err(|e| format!("bad FEN tag: {e}"))
            .and_then(|fen| {
                fen.into_position::<Chess>(CastlingMode::Standard)
                    .map_err(|e| format!("illegal FEN tag: {e}"))
            });
        match parsed {
            Ok(pos) => {
                *start = Some(pos);
                ControlFlow::Continue(())
            }
            Err(reason) => ControlFlow::Break(Err(reason)),
        }
    }

    fn begin_movetext(&mut self, start: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        ControlFlow::Continue(Replay::starting_at(start.unwrap_or_default()))
    }

    fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn san(&mut self, replay: &mut Self::Movetext, san_plus: SanPlus) -> ControlFlow<Self::Output> {
        match san_plus.san.to_move(&replay.current) {
            Ok(m) => {
                replay.moves.push(m.clone());
                replay.current.play_unchecked(m);
                replay.positions.push(replay.current.clone());
                ControlFlow::Continue(())
            }
            Err(e) => ControlFlow::Break(Err(format!(
                "{} after {} plies: {}",
                san_plus,
                replay.moves.len(),
                e
            ))),
        }
    }

    fn end_game(&mut self, replay: Self::Movetext) -> Self::Output {
        Ok(replay)
    }
}

/// Replay game notation (tags optional) from the standard start, or from its FEN tag.
pub fn replay(pgn: &str) -> Result<Replay> {
    let mut reader = Reader::new(pgn.as_bytes());
    let malformed = |reason: String| Error::MalformedMoveText { pgn: pgn.to_string(), reason };

    match reader.read_game(&mut Replayer) {
        Ok(Some(Ok(replay))) => Ok(replay),
        Ok(Some(Err(reason))) => Err(malformed(reason)),
        Ok(None) => Ok(Replay::default()),
        Err(e) => Err(malformed(e.to_string())),
    }
}

/// First four FEN fields: placement, side to move, castling, en passant.
/// En passant is only set when a capture is actually legal.
pub fn position_code(pos: &Chess) -> String {
    let fen = Fen::from_position(pos, EnPassantMode::Legal).to_string();
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}

/// From-square, to-square and promotion letter of every move, concatenated.
pub fn move_code(moves: &[Move]) -> String {
    let mut out = String::with_capacity(moves.len() * 4);
    for m in moves {
        let _ = write!(out, "{}", m.to_uci(CastlingMode::Standard));
    }
    out
}
