use crate::chess::Faction;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Formatter, Write};
use std::str::FromStr;

/// The type of a piece.
///
/// Each faction fields its own roster, so a role also determines the piece's [`Faction`].
/// Roles are identified by a faction prefix and a single letter code, e.g. `CC-M` or `IC-S`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Role {
    /// `CC-B`, steps forward and, past the midline, sideways.
    Soldier,
    /// `CC-C`, orthogonal slider.
    Chariot,
    /// `CC-M`, leaper whose jump can be blocked at the leg.
    Horse,
    /// `CC-P`, slider that captures by jumping over exactly one screen.
    Cannon,
    /// `CC-S`, single diagonal step.
    Advisor,
    /// `CC-W`, single step in any direction.
    General,
    /// `CC-X`, diagonal leaper of up to three squares.
    Elephant,
    /// `IC-B`, diagonal slider.
    Bishop,
    /// `IC-K`, single step in any direction.
    King,
    /// `IC-N`, unblockable leaper.
    Knight,
    /// `IC-Q`, has no movement rule.
    Queen,
    /// `IC-R`, has no movement rule.
    Rook,
    /// `IC-S`, the chess soldier.
    Pawn,
}

impl Role {
    /// All roles of both factions.
    pub const ALL: [Role; 13] = [
        Role::Soldier,
        Role::Chariot,
        Role::Horse,
        Role::Cannon,
        Role::Advisor,
        Role::General,
        Role::Elephant,
        Role::Bishop,
        Role::King,
        Role::Knight,
        Role::Queen,
        Role::Rook,
        Role::Pawn,
    ];

    /// The [`Faction`] that fields this role.
    pub const fn faction(&self) -> Faction {
        use Role::*;
        match self {
            Soldier | Chariot | Horse | Cannon | Advisor | General | Elephant => Faction::South,
            Bishop | King | Knight | Queen | Rook | Pawn => Faction::North,
        }
    }

    /// The letter that identifies this role within its faction.
    pub const fn code(&self) -> char {
        use Role::*;
        match self {
            Soldier => 'B',
            Chariot => 'C',
            Horse => 'M',
            Cannon => 'P',
            Advisor => 'S',
            General => 'W',
            Elephant => 'X',
            Bishop => 'B',
            King => 'K',
            Knight => 'N',
            Queen => 'Q',
            Rook => 'R',
            Pawn => 'S',
        }
    }

    /// Looks up the role of a faction by its letter code.
    pub fn from_code(faction: Faction, code: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.faction() == faction && r.code() == code)
    }
}

impl fmt::Display for Role {
    /// Writes the role's tag, or with `{:#}` only its letter code,
    /// in upper case for [`Faction::South`] and lower case for [`Faction::North`].
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            match self.faction() {
                Faction::South => f.write_char(self.code()),
                Faction::North => f.write_char(self.code().to_ascii_lowercase()),
            }
        } else {
            write!(f, "{}-{}", self.faction().prefix(), self.code())
        }
    }
}

/// The reason why parsing the role failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse role, expected a tag such as `CC-M` or `IC-K`")]
pub struct ParseRoleError;

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, code) = s.split_once('-').ok_or(ParseRoleError)?;

        let faction = [Faction::South, Faction::North]
            .into_iter()
            .find(|f| f.prefix() == prefix)
            .ok_or(ParseRoleError)?;

        let mut chars = code.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Role::from_code(faction, c).ok_or(ParseRoleError),
            _ => Err(ParseRoleError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use test_strategy::proptest;

    #[test]
    fn south_fields_seven_roles_and_north_six() {
        let south = Role::ALL.iter().filter(|r| r.faction() == Faction::South);
        let north = Role::ALL.iter().filter(|r| r.faction() == Faction::North);
        assert_eq!(south.count(), 7);
        assert_eq!(north.count(), 6);
    }

    #[test]
    fn codes_are_unique_within_a_faction() {
        let tags: HashSet<_> = Role::ALL.iter().map(|r| (r.faction(), r.code())).collect();
        assert_eq!(tags.len(), Role::ALL.len());
    }

    #[proptest]
    fn role_can_be_found_by_faction_and_code(r: Role) {
        assert_eq!(Role::from_code(r.faction(), r.code()), Some(r));
    }

    #[proptest]
    fn parsing_printed_role_is_an_identity(r: Role) {
        assert_eq!(r.to_string().parse(), Ok(r));
    }

    #[proptest]
    fn alternate_representation_is_the_cased_code(r: Role) {
        let c = format!("{r:#}");
        assert_eq!(c.to_ascii_uppercase(), r.code().to_string());
        assert_eq!(c == c.to_ascii_uppercase(), r.faction() == Faction::South);
    }

    #[test]
    fn shared_letters_resolve_by_prefix() {
        assert_eq!("CC-B".parse(), Ok(Role::Soldier));
        assert_eq!("IC-B".parse(), Ok(Role::Bishop));
        assert_eq!("CC-S".parse(), Ok(Role::Advisor));
        assert_eq!("IC-S".parse(), Ok(Role::Pawn));
    }

    #[proptest]
    fn parsing_role_fails_if_prefix_unknown(
        #[filter(!["CC", "IC"].contains(&#p.as_str()))] p: String,
        r: Role,
    ) {
        assert_eq!(format!("{p}-{}", r.code()).parse::<Role>(), Err(ParseRoleError));
    }

    #[proptest]
    fn parsing_role_fails_if_code_unknown(
        #[filter(!['B', 'C', 'M', 'P', 'S', 'W', 'X'].contains(&#c))] c: char,
    ) {
        assert_eq!(format!("CC-{c}").parse::<Role>(), Err(ParseRoleError));
    }
}
