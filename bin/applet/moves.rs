use super::lookup;
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{Board, Game, Setup};
use tracing::{info, instrument};

/// Prints the squares a piece may move to.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Moves {
    /// The label of the piece, e.g. `CC-M1`.
    label: String,
}

impl Moves {
    #[instrument(level = "trace", skip(self, setup), err)]
    pub fn execute(self, setup: Setup) -> Result<(), Anyhow> {
        let game = Game::new(Board::new(&setup)?);
        let id = lookup(&game, &self.label)?;
        let destinations = game.destinations(id)?;

        info!(label = %self.label, count = destinations.len());
        println!("{destinations}");

        Ok(())
    }
}
