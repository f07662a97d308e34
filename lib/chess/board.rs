use crate::chess::{Bitboard, Faction, Label, Piece, PieceId, Role, Setup, Square, Status};
use derive_more::{Display, Error};
use std::fmt::{self, Write};

/// The reason why a [`Setup`] could not be placed on the [`Board`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Error)]
pub enum InvalidSetup {
    #[display(fmt = "more than one piece is labeled `{}`", _0)]
    DuplicateLabel(#[error(not(source))] Label),
    #[display(fmt = "more than one piece is placed on square `{}`", _0)]
    Occupied(#[error(not(source))] Square),
}

/// The pieces in play and the squares they occupy.
///
/// Pieces are never removed from the board, captured pieces are kept with
/// [`Status::Captured`] and no square, so their [`PieceId`]s stay valid.
///
/// The default board holds the standard opening.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    pieces: Vec<Piece>,
    occupancy: [Option<PieceId>; 64],
}

impl Default for Board {
    fn default() -> Self {
        let mut board = Board::empty();
        for e in &Setup::default() {
            board.insert(e.label, e.role, e.square);
        }

        board
    }
}

impl Board {
    /// A board with no pieces.
    pub fn empty() -> Self {
        Board {
            pieces: Vec::new(),
            occupancy: [None; 64],
        }
    }

    /// Places every piece of a [`Setup`], in order, on an empty board.
    ///
    /// Either every piece is placed or none is.
    pub fn new(setup: &Setup) -> Result<Self, InvalidSetup> {
        let mut board = Board::empty();
        for e in setup {
            board.spawn(e.label, e.role, e.square)?;
        }

        Ok(board)
    }

    /// Puts a new piece on the board for the first time.
    pub fn spawn(&mut self, label: Label, role: Role, sq: Square) -> Result<PieceId, InvalidSetup> {
        if self.find(&label).is_some() {
            return Err(InvalidSetup::DuplicateLabel(label));
        } else if self.occupancy[sq.index()].is_some() {
            return Err(InvalidSetup::Occupied(sq));
        }

        Ok(self.insert(label, role, sq))
    }

    fn insert(&mut self, label: Label, role: Role, sq: Square) -> PieceId {
        debug_assert!(self.is_vacant(sq));
        let id = PieceId::new(self.pieces.len());

        self.pieces.push(Piece {
            id,
            label,
            role,
            square: Some(sq),
            moved: false,
            status: Status::Normal,
        });

        self.occupancy[sq.index()] = Some(id);

        id
    }

    /// The piece with the given id, whether in play or captured.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    /// The piece with the given label, whether in play or captured.
    pub fn find(&self, label: &str) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.label.as_str() == label)
    }

    /// The piece on the given [`Square`], if any.
    #[inline(always)]
    pub fn piece_on(&self, sq: Square) -> Option<&Piece> {
        self.occupancy[sq.index()].and_then(|id| self.piece(id))
    }

    /// The piece at the given coordinates, if any.
    ///
    /// Coordinates off the board, including the sentinel, never hold a piece.
    pub fn piece_at(&self, x: i8, y: i8) -> Option<&Piece> {
        self.piece_on(Square::new(x, y)?)
    }

    /// Whether no piece stands at the given coordinates.
    pub fn is_empty(&self, x: i8, y: i8) -> bool {
        self.piece_at(x, y).is_none()
    }

    /// Whether no piece stands on the given [`Square`].
    #[inline(always)]
    pub fn is_vacant(&self, sq: Square) -> bool {
        self.occupancy[sq.index()].is_none()
    }

    /// An iterator over every piece ever placed, captured ones included.
    pub fn roster(&self) -> impl DoubleEndedIterator<Item = &Piece> + ExactSizeIterator {
        self.pieces.iter()
    }

    /// An iterator over the pieces in play.
    pub fn pieces(&self) -> impl DoubleEndedIterator<Item = &Piece> {
        self.pieces.iter().filter(|p| !p.is_captured())
    }

    /// [`Square`]s occupied.
    pub fn occupied(&self) -> Bitboard {
        self.pieces().filter_map(Piece::square).collect()
    }

    /// [`Square`]s occupied by pieces of a [`Faction`].
    pub fn by_faction(&self, f: Faction) -> Bitboard {
        self.pieces()
            .filter(|p| p.faction() == f)
            .filter_map(Piece::square)
            .collect()
    }

    /// Moves a piece in play to the given [`Square`] and flags it as moved.
    ///
    /// The destination must be vacant, or the piece's own square.
    pub fn place(&mut self, id: PieceId, sq: Square) {
        let Some(piece) = self.pieces.get_mut(id.index()) else {
            return;
        };

        let Some(whence) = piece.square else {
            return;
        };

        debug_assert!(self.occupancy[sq.index()].map_or(true, |i| i == id));

        piece.square = Some(sq);
        piece.moved = true;
        self.occupancy[whence.index()] = None;
        self.occupancy[sq.index()] = Some(id);
    }

    /// Removes a piece from play.
    pub fn capture(&mut self, id: PieceId) {
        let Some(piece) = self.pieces.get_mut(id.index()) else {
            return;
        };

        if let Some(sq) = piece.square.take() {
            self.occupancy[sq.index()] = None;
        }

        piece.status = Status::Captured;
    }

    /// Updates the [`Status`] of a piece in play.
    ///
    /// Captured pieces stay captured, use [`Board::capture`] to remove a piece from play.
    pub fn mark(&mut self, id: PieceId, status: Status) {
        if let Some(piece) = self.pieces.get_mut(id.index()) {
            if !piece.is_captured() && status != Status::Captured {
                piece.status = status;
            }
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for x in Square::MIN..=Square::MAX {
            write!(f, "  {} ", x)?;
        }

        writeln!(f)?;
        writeln!(f, "   +---+---+---+---+---+---+---+---+")?;

        for sq in Square::iter() {
            if sq.x() == Square::MIN {
                write!(f, " {} |", sq.y())?;
            }

            match self.piece_on(sq) {
                Some(p) => write!(f, " {:#} |", p.role())?,
                None if sq.is_portal() => write!(f, " * |")?,
                None => write!(f, "   |")?,
            }

            if sq.x() == Square::MAX {
                writeln!(f, " {}", sq.y())?;
                writeln!(f, "   +---+---+---+---+---+---+---+---+")?;
            }
        }

        write!(f, "   ")?;
        for x in Square::MIN..=Square::MAX {
            write!(f, "  {} ", x)?;
        }

        f.write_char('\n')
    }
}

// A custom implementation of Arbitrary, since boards must be built through spawn to keep
// the occupancy index consistent.
#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Board {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Board>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::prelude::*;

        proptest::collection::vec(proptest::option::weighted(0.4, any::<(Role, bool)>()), 64)
            .prop_map(|v| {
                let mut board = Board::empty();

                for (sq, slot) in Square::iter().zip(v) {
                    if let Some((role, moved)) = slot {
                        let label = format!("{}{}", role, sq.index()).parse().unwrap();
                        let id = board.spawn(label, role, sq).unwrap();
                        if moved {
                            board.place(id, sq);
                        }
                    }
                }

                board
            })
            .boxed()
    }
}
