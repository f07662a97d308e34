use crate::chess::{Faction, Role, Square, SENTINEL};
use arrayvec::ArrayString;
use derive_more::{Constructor, Deref, Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifies a piece on a [`Board`][`crate::chess::Board`].
///
/// Ids are handed out by the board in placement order and never reused.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Constructor)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "#{}", _0)]
pub struct PieceId(usize);

impl PieceId {
    /// This id as an index into the board's roster.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// A short human readable name of a piece, such as `CC-M1`.
#[derive(
    Debug, Display, Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deref, Serialize,
    Deserialize,
)]
#[display(fmt = "{}", _0)]
#[serde(try_from = "String", into = "String")]
pub struct Label(ArrayString<8>);

impl Label {
    /// The tag of a [`Role`] followed by an optional ordinal digit.
    pub(crate) fn numbered(role: Role, ordinal: Option<char>) -> Self {
        let mut s = ArrayString::new();
        s.push_str(role.faction().prefix());
        s.push('-');
        s.push(role.code());
        if let Some(c) = ordinal {
            s.push(c);
        }

        Label(s)
    }
}

/// The reason why parsing [`Label`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse label, expected between 1 and 8 bytes")]
pub struct ParseLabelError;

impl FromStr for Label {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match ArrayString::from(s) {
            Ok(a) if !a.is_empty() => Ok(Label(a)),
            _ => Err(ParseLabelError),
        }
    }
}

impl TryFrom<String> for Label {
    type Error = ParseLabelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Label> for String {
    fn from(l: Label) -> Self {
        l.0.to_string()
    }
}

/// Where a piece stands in the selection lifecycle.
#[derive(Debug, Display, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Status {
    #[default]
    #[display(fmt = "normal")]
    Normal,
    #[display(fmt = "selected")]
    Selected,
    #[display(fmt = "captured")]
    Captured,
}

/// A piece and its state.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[display(fmt = "{}", label)]
pub struct Piece {
    pub(crate) id: PieceId,
    pub(crate) label: Label,
    pub(crate) role: Role,
    pub(crate) square: Option<Square>,
    pub(crate) moved: bool,
    pub(crate) status: Status,
}

impl Piece {
    /// This piece's identity.
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// This piece's name.
    pub fn label(&self) -> Label {
        self.label
    }

    /// This piece's [`Role`].
    pub fn role(&self) -> Role {
        self.role
    }

    /// This piece's [`Faction`].
    pub fn faction(&self) -> Faction {
        self.role.faction()
    }

    /// The [`Square`] this piece stands on, unless it has been captured.
    pub fn square(&self) -> Option<Square> {
        self.square
    }

    /// The coordinates of this piece, or the [sentinel][`SENTINEL`] if it has been captured.
    pub fn coordinates(&self) -> (i8, i8) {
        self.square.map_or(SENTINEL, Into::into)
    }

    /// Whether this piece has completed at least one move.
    pub fn moved(&self) -> bool {
        self.moved
    }

    /// This piece's [`Status`].
    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether this piece has been removed from play.
    pub fn is_captured(&self) -> bool {
        self.status == Status::Captured
    }
}
