use crate::chess::{Faction, PieceId, Square};
use std::fmt;

/// A move that was played.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Move {
    /// The piece that moved.
    pub piece: PieceId,
    /// The [`Square`] the piece left.
    pub whence: Square,
    /// The [`Square`] the piece landed on.
    pub whither: Square,
    /// The piece that was captured on the destination, if any.
    pub capture: Option<PieceId>,
    /// The side to play after this move.
    pub next_turn: Faction,
}

impl Move {
    /// Whether this move captured a piece.
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.piece, self.whence, self.whither)?;

        if let Some(captured) = self.capture {
            write!(f, " x{captured}")?;
        }

        Ok(())
    }
}
