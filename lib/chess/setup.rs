use crate::chess::{Label, Role, Square};
use derive_more::{Deref, Display, Error, From, IntoIterator};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A piece in a [`Setup`].
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entry {
    pub label: Label,
    pub role: Role,
    pub square: Square,
}

/// The catalog of pieces a [`Board`][`crate::chess::Board`] is seeded from.
///
/// The default setup is the standard opening, with the south army on rows 7 and 8
/// and the north army on rows 1 and 2.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Deref, IntoIterator, Serialize, Deserialize)]
#[display(fmt = "{}", "ron::ser::to_string(self).unwrap_or_default()")]
#[serde(transparent)]
pub struct Setup(#[into_iterator(ref)] Vec<Entry>);

const fn at(x: i8, y: i8) -> Square {
    match Square::new(x, y) {
        Some(sq) => sq,
        None => panic!("opening square lies outside of the board"),
    }
}

#[rustfmt::skip]
const OPENING: [(Role, Option<char>, Square); 32] = [
    (Role::Soldier, Some('1'), at(2, 7)),
    (Role::Soldier, Some('2'), at(3, 7)),
    (Role::Soldier, Some('3'), at(4, 7)),
    (Role::Soldier, Some('4'), at(6, 7)),
    (Role::Soldier, Some('5'), at(7, 7)),
    (Role::Chariot, Some('1'), at(1, 7)),
    (Role::Chariot, Some('2'), at(8, 7)),
    (Role::Horse, Some('1'), at(2, 8)),
    (Role::Horse, Some('2'), at(7, 8)),
    (Role::Cannon, Some('1'), at(1, 8)),
    (Role::Cannon, Some('2'), at(8, 8)),
    (Role::Advisor, Some('1'), at(5, 7)),
    (Role::Advisor, Some('2'), at(5, 8)),
    (Role::General, None, at(4, 8)),
    (Role::Elephant, Some('1'), at(3, 8)),
    (Role::Elephant, Some('2'), at(6, 8)),
    (Role::Bishop, Some('1'), at(3, 1)),
    (Role::Bishop, Some('2'), at(6, 1)),
    (Role::King, None, at(4, 1)),
    (Role::Knight, Some('1'), at(2, 1)),
    (Role::Knight, Some('2'), at(7, 1)),
    (Role::Queen, None, at(5, 1)),
    (Role::Rook, Some('1'), at(1, 1)),
    (Role::Rook, Some('2'), at(8, 1)),
    (Role::Pawn, Some('1'), at(1, 2)),
    (Role::Pawn, Some('2'), at(2, 2)),
    (Role::Pawn, Some('3'), at(3, 2)),
    (Role::Pawn, Some('4'), at(4, 2)),
    (Role::Pawn, Some('5'), at(5, 2)),
    (Role::Pawn, Some('6'), at(6, 2)),
    (Role::Pawn, Some('7'), at(7, 2)),
    (Role::Pawn, Some('8'), at(8, 2)),
];

impl Default for Setup {
    fn default() -> Self {
        OPENING
            .into_iter()
            .map(|(role, ordinal, square)| Entry {
                label: Label::numbered(role, ordinal),
                role,
                square,
            })
            .collect()
    }
}

impl Setup {
    /// Constructs a [`Setup`] from its entries.
    pub fn new(entries: Vec<Entry>) -> Self {
        Setup(entries)
    }
}

impl FromIterator<Entry> for Setup {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Setup(iter.into_iter().collect())
    }
}

/// The reason why parsing [`Setup`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse setup")]
pub struct ParseSetupError(ron::de::SpannedError);

impl FromStr for Setup {
    type Err = ParseSetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::Faction;
    use std::collections::HashSet;

    #[test]
    fn opening_fields_sixteen_pieces_per_faction() {
        let setup = Setup::default();
        assert_eq!(setup.len(), 32);

        for f in [Faction::South, Faction::North] {
            assert_eq!(setup.iter().filter(|e| e.role.faction() == f).count(), 16);
        }
    }

    #[test]
    fn opening_labels_and_squares_are_unique() {
        let setup = Setup::default();
        let labels: HashSet<_> = setup.iter().map(|e| e.label).collect();
        let squares: HashSet<_> = setup.iter().map(|e| e.square).collect();
        assert_eq!(labels.len(), setup.len());
        assert_eq!(squares.len(), setup.len());
    }

    #[test]
    fn opening_labels_carry_the_role_tag() {
        for e in &Setup::default() {
            assert!(e.label.starts_with(&e.role.to_string()));
        }
    }

    #[test]
    fn opening_labels_number_pieces_sharing_a_role() {
        let labels: Vec<_> = Setup::default().iter().map(|e| e.label.to_string()).collect();
        for l in ["CC-B5", "CC-M1", "CC-W", "IC-K", "IC-Q", "IC-S8"] {
            assert!(labels.contains(&l.to_string()), "{l}");
        }
    }

    #[test]
    fn armies_start_on_their_home_rows() {
        for e in &Setup::default() {
            match e.role.faction() {
                Faction::South => assert!(e.square.y() >= 7),
                Faction::North => assert!(e.square.y() <= 2),
            }
        }
    }

    #[test]
    fn parsing_printed_setup_is_an_identity() {
        let setup = Setup::default();
        assert_eq!(setup.to_string().parse(), Ok(setup));
    }

    #[test]
    fn setup_can_be_parsed_from_ron() {
        let setup: Setup = r#"[(label: "CC-M1", role: Horse, square: (2, 8))]"#.parse().unwrap();
        assert_eq!(
            setup,
            Setup::new(vec![Entry {
                label: "CC-M1".parse().unwrap(),
                role: Role::Horse,
                square: Square::new(2, 8).unwrap(),
            }])
        );
    }

    #[test]
    fn parsing_setup_fails_on_unknown_fields() {
        let s = r#"[(label: "CC-M1", role: Horse, square: (2, 8), moved: true)]"#;
        assert!(s.parse::<Setup>().is_err());
    }

    #[test]
    fn parsing_setup_fails_on_empty_labels() {
        let s = r#"[(label: "", role: Horse, square: (2, 8))]"#;
        assert!(s.parse::<Setup>().is_err());
    }

    #[test]
    fn parsing_setup_fails_on_labels_longer_than_eight_bytes() {
        let s = r#"[(label: "CC-M123456", role: Horse, square: (2, 8))]"#;
        assert!(s.parse::<Setup>().is_err());
    }

    #[test]
    fn parsing_setup_fails_on_squares_off_the_board() {
        let s = r#"[(label: "CC-M1", role: Horse, square: (0, 8))]"#;
        assert!(s.parse::<Setup>().is_err());
    }
}
