use crate::chess::Bitboard;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::{num::ParseIntError, str::FromStr};

/// A square on the board.
///
/// Coordinates are 1-based: `x` counts columns from the left and `y` counts rows from the
/// north edge, so the north pieces start on the low rows and the south pieces on the high ones.
#[derive(
    Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "({}, {})", x, y)]
#[serde(try_from = "(i8, i8)", into = "(i8, i8)")]
pub struct Square {
    #[cfg_attr(test, strategy(Square::MIN..=Square::MAX))]
    y: i8,
    #[cfg_attr(test, strategy(Square::MIN..=Square::MAX))]
    x: i8,
}

/// The coordinates reported for a piece that is no longer on the board.
pub const SENTINEL: (i8, i8) = (-1, -1);

impl Square {
    /// The lowest valid coordinate.
    pub const MIN: i8 = 1;

    /// The highest valid coordinate.
    pub const MAX: i8 = 8;

    /// The two squares that stop straight line sliders.
    pub const PORTALS: [Square; 2] = [Square { x: 1, y: 6 }, Square { x: 8, y: 6 }];

    /// Constructs [`Square`] from a pair of coordinates, if both lie on the board.
    #[inline(always)]
    pub const fn new(x: i8, y: i8) -> Option<Self> {
        if Self::MIN <= x && x <= Self::MAX && Self::MIN <= y && y <= Self::MAX {
            Some(Square { x, y })
        } else {
            None
        }
    }

    /// This square's column.
    #[inline(always)]
    pub const fn x(&self) -> i8 {
        self.x
    }

    /// This square's row.
    #[inline(always)]
    pub const fn y(&self) -> i8 {
        self.y
    }

    /// A dense index in the range `0..64`, ordered by row then column.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        ((self.y - 1) * 8 + (self.x - 1)) as usize
    }

    /// The inverse of [`Square::index`].
    #[inline(always)]
    pub const fn from_index(i: usize) -> Option<Self> {
        if i < 64 {
            Some(Square {
                x: (i % 8) as i8 + 1,
                y: (i / 8) as i8 + 1,
            })
        } else {
            None
        }
    }

    /// The square displaced by `(dx, dy)`, if it's still on the board.
    #[inline(always)]
    pub fn offset(&self, dx: i8, dy: i8) -> Option<Self> {
        Square::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?)
    }

    /// Whether this is one of the [portal squares][`Square::PORTALS`].
    #[inline(always)]
    pub fn is_portal(&self) -> bool {
        Self::PORTALS.contains(self)
    }

    /// Returns a [`Bitboard`] that only contains this square.
    #[inline(always)]
    pub fn bitboard(self) -> Bitboard {
        Bitboard::new(1 << self.index())
    }

    /// An iterator over all squares, ordered by row then column.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..64usize).map(|i| Square {
            x: (i % 8) as i8 + 1,
            y: (i / 8) as i8 + 1,
        })
    }
}

/// The reason why a pair of coordinates is not a [`Square`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "coordinates ({}, {}) lie outside of the board", x, y)]
pub struct OffBoard {
    pub x: i8,
    pub y: i8,
}

impl TryFrom<(i8, i8)> for Square {
    type Error = OffBoard;

    fn try_from((x, y): (i8, i8)) -> Result<Self, Self::Error> {
        Square::new(x, y).ok_or(OffBoard { x, y })
    }
}

impl From<Square> for (i8, i8) {
    fn from(sq: Square) -> Self {
        (sq.x, sq.y)
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseSquareError {
    #[display(fmt = "failed to parse square, expected `x,y`")]
    #[from(ignore)]
    InvalidSyntax,
    #[display(fmt = "failed to parse square coordinate")]
    InvalidCoordinate(ParseIntError),
    #[display(fmt = "failed to parse square")]
    OffBoard(OffBoard),
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .unwrap_or(s);

        let (x, y) = s.split_once(',').ok_or(ParseSquareError::InvalidSyntax)?;
        let (x, y) = (x.trim().parse()?, y.trim().parse()?);
        Ok(Square::try_from((x, y))?)
    }
}
