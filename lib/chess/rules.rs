use crate::chess::{Bitboard, Board, Faction, Piece, Role, Square};
use derive_more::{Display, Error};

/// Represents a [`Role`] that has no movement rule.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "no movement rule is defined for `{}`", _0)]
pub struct UnimplementedRule(#[error(not(source))] pub Role);

/// Trait for types that know where pieces may move.
#[cfg_attr(test, mockall::automock)]
pub trait Rules {
    /// The [`Square`]s the piece may move to on this [`Board`].
    fn destinations(&self, board: &Board, piece: &Piece) -> Result<Bitboard, UnimplementedRule>;
}

/// The movement rules of both armies.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Standard;

impl Rules for Standard {
    fn destinations(&self, board: &Board, piece: &Piece) -> Result<Bitboard, UnimplementedRule> {
        destinations(board, piece)
    }
}

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ADJACENT: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const KNIGHT: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

// Each jump paired with the leg that must be vacant.
const HORSE: [((i8, i8), (i8, i8)); 8] = [
    ((1, 2), (0, 1)),
    ((-1, 2), (0, 1)),
    ((1, -2), (0, -1)),
    ((-1, -2), (0, -1)),
    ((2, 1), (1, 0)),
    ((2, -1), (1, 0)),
    ((-2, 1), (-1, 0)),
    ((-2, -1), (-1, 0)),
];

/// The row of the board a north pawn starts on.
const PAWN_RANK: i8 = 2;

/// The last row before a south soldier has crossed the midline.
const SOLDIER_MIDLINE: i8 = 4;

/// The [`Square`]s a piece may move to.
///
/// Captured pieces have no destinations, neither do south pieces standing on a portal.
/// Destinations never hold a piece of the same faction.
pub fn destinations(board: &Board, piece: &Piece) -> Result<Bitboard, UnimplementedRule> {
    let Some(whence) = piece.square().filter(|_| !piece.is_captured()) else {
        return Ok(Bitboard::empty());
    };

    let side = piece.faction();
    if side == Faction::South && whence.is_portal() {
        return Ok(Bitboard::empty());
    }

    let bb = match piece.role() {
        Role::Soldier => soldier(board, whence, side),
        Role::Chariot => slide(board, whence, side, &ORTHOGONAL),
        Role::Horse => horse(board, whence, side),
        Role::Cannon => cannon(board, piece, whence, side),
        Role::Advisor => steps(board, whence, side, &DIAGONAL),
        Role::General => steps(board, whence, side, &ADJACENT),
        Role::Elephant => elephant(board, whence, side),
        Role::Bishop => slide(board, whence, side, &DIAGONAL),
        Role::King => steps(board, whence, side, &ADJACENT),
        Role::Knight => steps(board, whence, side, &KNIGHT),
        Role::Pawn => pawn(board, whence, side),
        r @ (Role::Queen | Role::Rook) => return Err(UnimplementedRule(r)),
    };

    Ok(bb)
}

/// Whether a piece of this [`Faction`] may land on this [`Square`].
#[inline(always)]
fn can_enter_or_capture(board: &Board, sq: Square, side: Faction) -> bool {
    board.piece_on(sq).map_or(true, |p| p.faction() != side)
}

/// Whether a piece of the opponent of this [`Faction`] stands on this [`Square`].
#[inline(always)]
fn is_enemy(board: &Board, sq: Square, side: Faction) -> bool {
    board.piece_on(sq).is_some_and(|p| p.faction() != side)
}

fn steps(board: &Board, whence: Square, side: Faction, offsets: &[(i8, i8)]) -> Bitboard {
    offsets
        .iter()
        .filter_map(|&(dx, dy)| whence.offset(dx, dy))
        .filter(|&sq| can_enter_or_capture(board, sq, side))
        .collect()
}

// Slides stop on the first piece, capturing it if it's an enemy, and on portals even if vacant.
fn slide(board: &Board, whence: Square, side: Faction, directions: &[(i8, i8)]) -> Bitboard {
    let mut bb = Bitboard::empty();

    for &(dx, dy) in directions {
        let mut sq = whence;
        while let Some(next) = sq.offset(dx, dy) {
            sq = next;

            if can_enter_or_capture(board, sq, side) {
                bb = bb.with(sq);
            }

            if sq.is_portal() || !board.is_vacant(sq) {
                break;
            }
        }
    }

    bb
}

fn soldier(board: &Board, whence: Square, side: Faction) -> Bitboard {
    let forward = side.forward();
    let mut bb = steps(board, whence, side, &[(0, forward)]);

    if whence.y() <= SOLDIER_MIDLINE {
        bb = bb | steps(board, whence, side, &[(1, 0), (-1, 0)]);
    }

    bb
}

fn horse(board: &Board, whence: Square, side: Faction) -> Bitboard {
    HORSE
        .iter()
        .filter_map(|&((dx, dy), (lx, ly))| {
            let leg = whence.offset(lx, ly)?;
            let sq = whence.offset(dx, dy)?;
            Some(sq).filter(|&sq| board.is_vacant(leg) && can_enter_or_capture(board, sq, side))
        })
        .collect()
}

fn elephant(board: &Board, whence: Square, side: Faction) -> Bitboard {
    let mut bb = Bitboard::empty();

    for &(dx, dy) in &DIAGONAL {
        for n in 1..=3 {
            let Some(sq) = whence.offset(n * dx, n * dy) else {
                break;
            };

            let clear = match whence.offset((n - 1) * dx, (n - 1) * dy) {
                Some(short) if n > 1 => board.is_vacant(short),
                _ => true,
            };

            if clear && can_enter_or_capture(board, sq, side) {
                bb = bb.with(sq);
            }
        }
    }

    bb
}

fn pawn(board: &Board, whence: Square, side: Faction) -> Bitboard {
    let forward = side.forward();
    let mut bb = Bitboard::empty();

    if let Some(sq) = whence.offset(0, forward).filter(|&sq| board.is_vacant(sq)) {
        bb = bb.with(sq);

        if whence.y() == PAWN_RANK {
            if let Some(sq) = whence.offset(0, 2 * forward).filter(|&sq| board.is_vacant(sq)) {
                bb = bb.with(sq);
            }
        }
    }

    for dx in [1, -1] {
        if let Some(sq) = whence.offset(dx, forward).filter(|&sq| is_enemy(board, sq, side)) {
            bb = bb.with(sq);
        }
    }

    bb
}

fn cannon(board: &Board, piece: &Piece, whence: Square, side: Faction) -> Bitboard {
    let mut bb = Bitboard::empty();

    for &(dx, dy) in &ORTHOGONAL {
        let mut sq = whence;
        while let Some(next) = sq.offset(dx, dy).filter(|&sq| board.is_vacant(sq)) {
            sq = next;
            bb = bb.with(sq);
            if sq.is_portal() {
                break;
            }
        }
    }

    for target in board.pieces().filter(|p| p.faction() != side && p.id() != piece.id()) {
        let Some(whither) = target.square() else {
            continue;
        };

        if screens(board, whence, whither, target.moved()) == Some(1) {
            bb = bb.with(whither);
        }
    }

    bb
}

/// Counts the pieces standing between a cannon and its target.
///
/// Orthogonal lines count every square in between and are blocked for good by a portal.
/// Other lines must have an integer slope, only lattice points of the line are considered,
/// and the target must have moved. `None` stands for a line that can't be jumped.
fn screens(board: &Board, whence: Square, whither: Square, moved: bool) -> Option<usize> {
    let dx = whither.x() - whence.x();
    let dy = whither.y() - whence.y();

    let (n, sx, sy) = if dx == 0 || dy == 0 {
        (dx.abs().max(dy.abs()), dx.signum(), dy.signum())
    } else if dy % dx == 0 && moved {
        (dx.abs(), dx.signum(), dy / dx.abs())
    } else {
        return None;
    };

    let mut count = 0;
    for i in 1..n {
        let sq = whence.offset(i * sx, i * sy)?;
        if (sx == 0 || sy == 0) && sq.is_portal() {
            return None;
        }

        if !board.is_vacant(sq) {
            count += 1;
        }
    }

    Some(count)
}
