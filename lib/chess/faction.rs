use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::ops::Not;

/// One of the two sides of the game.
#[derive(
    Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Faction {
    /// The xiangqi army, moves first.
    #[display(fmt = "south")]
    South,
    /// The chess army.
    #[display(fmt = "north")]
    North,
}

impl Faction {
    /// The prefix of this faction's piece tags.
    pub const fn prefix(&self) -> &'static str {
        match self {
            Faction::South => "CC",
            Faction::North => "IC",
        }
    }

    /// The colour this faction plays with.
    pub const fn colour(&self) -> &'static str {
        match self {
            Faction::South => "red",
            Faction::North => "black",
        }
    }

    /// The row increment of a step towards the opponent's home.
    pub const fn forward(&self) -> i8 {
        match self {
            Faction::South => -1,
            Faction::North => 1,
        }
    }
}

impl Not for Faction {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Faction::South => Faction::North,
            Faction::North => Faction::South,
        }
    }
}
