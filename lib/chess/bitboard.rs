use crate::chess::Square;
use derive_more::{BitAnd, BitOr, BitXor, Constructor, Deref, Not};
use std::fmt::{self, Write};

/// A set of squares on the board.
#[derive(
    Default, Copy, Clone, Eq, PartialEq, Hash, Constructor, Deref, BitAnd, BitOr, BitXor, Not,
)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(transparent)]
pub struct Bitboard(u64);

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('\n')?;
        for sq in Square::iter() {
            f.write_char(if self.contains(sq) { '■' } else { '◻' })?;
            f.write_char(if sq.x() < Square::MAX { ' ' } else { '\n' })?;
        }

        Ok(())
    }
}

impl fmt::Display for Bitboard {
    /// Writes the squares in the set separated by spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, sq) in self.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }

            write!(f, "{sq}")?;
        }

        Ok(())
    }
}

impl Bitboard {
    /// An empty set.
    #[inline(always)]
    pub const fn empty() -> Self {
        Bitboard(0)
    }

    /// The set of all squares.
    #[inline(always)]
    pub const fn full() -> Self {
        Bitboard(0xFFFFFFFFFFFFFFFF)
    }

    /// The number of [`Square`]s in the set.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as _
    }

    /// Whether the set is empty.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this [`Square`] is in the set.
    #[inline(always)]
    pub fn contains(&self, sq: Square) -> bool {
        !sq.bitboard().intersection(*self).is_empty()
    }

    /// Adds a [`Square`] to this set.
    #[inline(always)]
    pub fn with(&self, sq: Square) -> Self {
        sq.bitboard().union(*self)
    }

    /// Removes a [`Square`] from this set.
    #[inline(always)]
    pub fn without(&self, sq: Square) -> Self {
        sq.bitboard().inverse().intersection(*self)
    }

    /// The set of [`Square`]s not in this set.
    #[inline(always)]
    pub const fn inverse(&self) -> Self {
        Bitboard(!self.0)
    }

    /// The set of [`Square`]s in both sets.
    #[inline(always)]
    pub const fn intersection(&self, bb: Bitboard) -> Self {
        Bitboard(self.0 & bb.0)
    }

    /// The set of [`Square`]s in either set.
    #[inline(always)]
    pub const fn union(&self, bb: Bitboard) -> Self {
        Bitboard(self.0 | bb.0)
    }

    /// An iterator over the [`Square`]s in this set.
    #[inline(always)]
    pub fn iter(&self) -> Squares {
        Squares::new(*self)
    }
}

impl From<Square> for Bitboard {
    #[inline(always)]
    fn from(sq: Square) -> Self {
        sq.bitboard()
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        iter.into_iter().fold(Bitboard::empty(), |bb, sq| bb.with(sq))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = Squares;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        Squares::new(self)
    }
}

/// An iterator over the [`Square`]s in a [`Bitboard`].
#[derive(Debug, Constructor)]
pub struct Squares(Bitboard);

impl Iterator for Squares {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let sq = Square::from_index(self.0.trailing_zeros() as usize)?;
        self.0 = self.0.without(sq);
        Some(sq)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl ExactSizeIterator for Squares {
    #[inline(always)]
    fn len(&self) -> usize {
        self.0.len()
    }
}
