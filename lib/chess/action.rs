use crate::chess::{Bitboard, Faction, Move, OffBoard, PieceId, Square, UnimplementedRule};
use derive_more::{Display, Error, From};

/// The reason why a piece may not act now.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum TurnViolation {
    #[display(fmt = "piece `{}` may not act during the {} turn", piece, turn)]
    OutOfTurn { piece: PieceId, turn: Faction },

    #[display(fmt = "piece `{}` is already selected", pending)]
    SelectionPending { pending: PieceId },
}

/// The reason why a move was rejected.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error, From)]
#[error(ignore)]
pub enum IllegalMove {
    #[display(fmt = "{}", _0)]
    OffBoard(OffBoard),

    #[display(fmt = "piece `{}` cannot reach square `{}`", piece, whither)]
    #[from(ignore)]
    Unreachable { piece: PieceId, whither: Square },

    #[display(fmt = "piece `{}` must be selected before it moves", piece)]
    #[from(ignore)]
    NotSelected { piece: PieceId },

    #[display(fmt = "no piece is selected")]
    #[from(ignore)]
    NoSelection,
}

/// The reason why an action on a [`Game`][`crate::chess::Game`] was rejected.
///
/// A rejected action leaves the game untouched.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error, From)]
#[error(ignore)]
pub enum InvalidAction {
    #[display(fmt = "there is no piece `{}`", _0)]
    #[from(ignore)]
    UnknownPiece(PieceId),

    #[display(fmt = "piece `{}` has been captured", _0)]
    #[from(ignore)]
    PieceCaptured(PieceId),

    #[display(fmt = "{}", _0)]
    TurnViolation(TurnViolation),

    #[display(fmt = "{}", _0)]
    IllegalMove(IllegalMove),

    #[display(fmt = "{}", _0)]
    UnimplementedRule(UnimplementedRule),
}

/// What activating a piece did.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Activation {
    /// The piece was selected and may move to any of these squares.
    #[display(fmt = "selected")]
    Selected(Bitboard),

    /// A friend of the selected piece was selected in its place.
    #[display(fmt = "reselected")]
    Reselected(Bitboard),

    /// The piece was already selected and is now released.
    #[display(fmt = "deselected")]
    Deselected,

    /// The selected piece captured the activated piece.
    #[display(fmt = "{}", _0)]
    Moved(Move),
}
