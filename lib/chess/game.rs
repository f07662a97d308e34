use crate::chess::{
    Activation, Bitboard, Board, Faction, IllegalMove, InvalidAction, Move, Piece, PieceId, Rules,
    Square, Standard, Status, TurnViolation,
};
use derive_more::Display;
use std::mem;
use tracing::{debug, info};

/// Whether a piece is waiting to move.
#[derive(Debug, Display, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Selection {
    #[default]
    #[display(fmt = "idle")]
    Idle,
    #[display(fmt = "piece `{}` is selected", _0)]
    Selected(PieceId),
}

/// Keeps the turn and the selection of a game played on a [`Board`].
///
/// The south faction plays first. A turn consists of selecting a piece and then moving it,
/// after which the other faction is on turn.
#[derive(Debug, Clone)]
pub struct Game<R = Standard> {
    board: Board,
    turn: Faction,
    selection: Selection,
    rules: R,
}

impl Default for Game {
    fn default() -> Self {
        Game::new(Board::default())
    }
}

impl Game {
    /// Starts a game on this [`Board`] with the [`Standard`] rules.
    pub fn new(board: Board) -> Self {
        Game::with_rules(board, Standard)
    }
}

impl<R: Rules> Game<R> {
    /// Starts a game on this [`Board`] with custom [`Rules`].
    pub fn with_rules(board: Board, rules: R) -> Self {
        Game {
            board,
            turn: Faction::South,
            selection: Selection::Idle,
            rules,
        }
    }

    /// The current state of the [`Board`].
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The [`Faction`] on turn.
    pub fn turn(&self) -> Faction {
        self.turn
    }

    /// The current [`Selection`].
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The selected piece, if any.
    pub fn selected(&self) -> Option<&Piece> {
        match self.selection {
            Selection::Idle => None,
            Selection::Selected(id) => self.board.piece(id),
        }
    }

    fn active(&self, id: PieceId) -> Result<&Piece, InvalidAction> {
        match self.board.piece(id) {
            None => Err(InvalidAction::UnknownPiece(id)),
            Some(p) if p.is_captured() => Err(InvalidAction::PieceCaptured(id)),
            Some(p) => Ok(p),
        }
    }

    /// The [`Square`]s a piece in play may move to, regardless of whose turn it is.
    pub fn destinations(&self, id: PieceId) -> Result<Bitboard, InvalidAction> {
        let piece = self.active(id)?;
        Ok(self.rules.destinations(&self.board, piece)?)
    }

    /// Selects a piece of the faction on turn and returns its destinations.
    ///
    /// Nothing changes if the selection is rejected.
    pub fn select(&mut self, id: PieceId) -> Result<Bitboard, InvalidAction> {
        let piece = self.active(id)?;

        if let Selection::Selected(pending) = self.selection {
            return Err(TurnViolation::SelectionPending { pending }.into());
        } else if piece.faction() != self.turn {
            let turn = self.turn;
            return Err(TurnViolation::OutOfTurn { piece: id, turn }.into());
        }

        let destinations = self.rules.destinations(&self.board, piece)?;
        let label = piece.label();

        self.board.mark(id, Status::Selected);
        self.selection = Selection::Selected(id);
        debug!(%label, %id, destinations = destinations.len(), "selected");

        Ok(destinations)
    }

    /// Releases the selected piece, if any.
    pub fn deselect(&mut self) -> Option<PieceId> {
        let Selection::Selected(id) = mem::take(&mut self.selection) else {
            return None;
        };

        self.board.mark(id, Status::Normal);
        debug!(%id, "deselected");

        Some(id)
    }

    /// Moves the selected piece to `(x, y)`, capturing the enemy standing there if any.
    ///
    /// On success the turn passes to the opponent and the selection is cleared,
    /// otherwise the piece stays selected.
    pub fn attempt_move(&mut self, id: PieceId, x: i8, y: i8) -> Result<Move, InvalidAction> {
        let piece = self.active(id)?;

        if self.selection != Selection::Selected(id) {
            return Err(IllegalMove::NotSelected { piece: id }.into());
        }

        let whither = Square::try_from((x, y)).map_err(IllegalMove::from)?;
        let whence = piece.square().ok_or(InvalidAction::PieceCaptured(id))?;
        let unreachable = IllegalMove::Unreachable { piece: id, whither };

        if !self.rules.destinations(&self.board, piece)?.contains(whither) {
            return Err(unreachable.into());
        }

        let capture = match self.board.piece_on(whither) {
            Some(p) if p.faction() == piece.faction() => return Err(unreachable.into()),
            Some(p) => Some(p.id()),
            None => None,
        };

        if let Some(captured) = capture {
            self.board.capture(captured);
            info!(%captured, square = %whither, "captured");
        }

        self.board.place(id, whither);
        self.board.mark(id, Status::Normal);
        self.selection = Selection::Idle;
        self.turn = !self.turn;

        let m = Move {
            piece: id,
            whence,
            whither,
            capture,
            next_turn: self.turn,
        };

        info!(%m, "moved");

        Ok(m)
    }

    /// Reacts to a piece being picked.
    ///
    /// With no selection the piece is selected, picking the selected piece again releases it,
    /// picking a friend of the selected piece selects the friend instead,
    /// and picking an enemy of the selected piece attempts to capture it.
    pub fn activate_piece(&mut self, id: PieceId) -> Result<Activation, InvalidAction> {
        let piece = self.active(id)?;
        let (faction, (x, y)) = (piece.faction(), piece.coordinates());

        match self.selection {
            Selection::Idle => Ok(Activation::Selected(self.select(id)?)),

            Selection::Selected(pending) if pending == id => {
                self.deselect();
                Ok(Activation::Deselected)
            }

            Selection::Selected(pending) => {
                if self.active(pending)?.faction() == faction {
                    self.destinations(id)?;
                    self.deselect();
                    Ok(Activation::Reselected(self.select(id)?))
                } else {
                    Ok(Activation::Moved(self.attempt_move(pending, x, y)?))
                }
            }
        }
    }

    /// Reacts to a square being picked by moving the selected piece there.
    pub fn activate_square(&mut self, x: i8, y: i8) -> Result<Move, InvalidAction> {
        match self.selection {
            Selection::Idle => Err(IllegalMove::NoSelection.into()),
            Selection::Selected(id) => self.attempt_move(id, x, y),
        }
    }
}
