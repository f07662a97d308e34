use anyhow::{Context, Error as Anyhow};
use clap::Subcommand;
use derive_more::From;
use lib::chess::{Game, PieceId, Setup};

mod moves;
mod play;

#[derive(From, Subcommand)]
pub enum Applet {
    Play(play::Play),
    Moves(moves::Moves),
}

impl Default for Applet {
    fn default() -> Self {
        play::Play::default().into()
    }
}

impl Applet {
    pub fn execute(self, setup: Setup) -> Result<(), Anyhow> {
        match self {
            Applet::Play(a) => a.execute(setup),
            Applet::Moves(a) => a.execute(setup),
        }
    }
}

/// Looks up a piece by its label.
fn lookup(game: &Game, label: &str) -> Result<PieceId, Anyhow> {
    let piece = game.board().find(label);
    Ok(piece.with_context(|| format!("there is no piece labeled `{label}`"))?.id())
}
