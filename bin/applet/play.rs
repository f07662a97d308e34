use super::lookup;
use crate::io::Io;
use anyhow::Error as Anyhow;
use clap::Parser;
use derive_more::{Display, Error, From};
use lib::chess::{Activation, Board, Game, Move, Piece, PieceId, Setup};
use std::io::{self, stdin, stdout, Read, Write};
use std::{num::ParseIntError, str::FromStr};
use tracing::{instrument, warn};

/// Plays a game by reading commands from the standard input.
///
/// Commands are `select <label>`, `deselect`, `move <x> <y>`, `click <label>`,
/// `click <x> <y>`, `moves <label>`, `board` and `quit`.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {}

impl Play {
    #[instrument(level = "trace", skip(self, setup), err)]
    pub fn execute(self, setup: Setup) -> Result<(), Anyhow> {
        let game = Game::new(Board::new(&setup)?);
        Session::new(game, Io::new(stdout(), stdin())).run()
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Command {
    Select(String),
    Deselect,
    Move(i8, i8),
    ClickPiece(String),
    ClickSquare(i8, i8),
    Moves(String),
    Board,
    Quit,
}

/// The reason why parsing [`Command`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
enum ParseCommandError {
    #[display(fmt = "unknown command `{}`", _0)]
    #[from(ignore)]
    Unknown(#[error(not(source))] String),

    #[display(fmt = "usage: {}", _0)]
    #[from(ignore)]
    Usage(#[error(not(source))] &'static str),

    #[display(fmt = "failed to parse coordinate")]
    InvalidCoordinate(ParseIntError),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use ParseCommandError::*;

        let mut tokens = s.split_whitespace();
        let name = tokens.next().unwrap_or_default();
        let args: Vec<_> = tokens.collect();

        match (name, args.as_slice()) {
            ("select", [label]) => Ok(Command::Select(label.to_string())),
            ("select", _) => Err(Usage("select <label>")),
            ("deselect", []) => Ok(Command::Deselect),
            ("deselect", _) => Err(Usage("deselect")),
            ("move", [x, y]) => Ok(Command::Move(x.parse()?, y.parse()?)),
            ("move", _) => Err(Usage("move <x> <y>")),
            ("click", [label]) => Ok(Command::ClickPiece(label.to_string())),
            ("click", [x, y]) => Ok(Command::ClickSquare(x.parse()?, y.parse()?)),
            ("click", _) => Err(Usage("click <label> | click <x> <y>")),
            ("moves", [label]) => Ok(Command::Moves(label.to_string())),
            ("moves", _) => Err(Usage("moves <label>")),
            ("board", []) => Ok(Command::Board),
            ("board", _) => Err(Usage("board")),
            ("quit", []) => Ok(Command::Quit),
            ("quit", _) => Err(Usage("quit")),
            (name, _) => Err(Unknown(name.into())),
        }
    }
}

struct Session<W: Write, R: Read> {
    game: Game,
    io: Io<W, R>,
}

impl<W: Write, R: Read> Session<W, R> {
    fn new(game: Game, io: Io<W, R>) -> Self {
        Session { game, io }
    }

    fn run(&mut self) -> Result<(), Anyhow> {
        self.io.send(self.game.board())?;

        while let Some(line) = self.io.recv()? {
            if line.trim().is_empty() {
                continue;
            }

            match line.parse() {
                Ok(Command::Quit) => break,
                Ok(cmd) => {
                    if let Err(e) = self.execute(cmd) {
                        warn!("rejected `{}`: {}", line.trim(), e);
                        self.io.send(format_args!("error: {e}"))?;
                    }
                }

                Err(e) => {
                    warn!("ignored `{}`: {}", line.trim(), e);
                    self.io.send(format_args!("error: {e}"))?;
                }
            }
        }

        Ok(())
    }

    fn execute(&mut self, cmd: Command) -> Result<(), Anyhow> {
        match cmd {
            Command::Select(label) => {
                let destinations = self.game.select(lookup(&self.game, &label)?)?;
                self.io.send(format_args!("destinations: {destinations}"))?;
            }

            Command::Deselect => match self.game.deselect().map(|id| self.name(id)) {
                Some(name) => self.io.send(format_args!("released {name}"))?,
                None => self.io.send("nothing is selected")?,
            },

            Command::Move(x, y) | Command::ClickSquare(x, y) => {
                let m = self.game.activate_square(x, y)?;
                self.report(m)?;
            }

            Command::ClickPiece(label) => {
                let id = lookup(&self.game, &label)?;
                match self.game.activate_piece(id)? {
                    Activation::Selected(bb) | Activation::Reselected(bb) => {
                        self.io.send(format_args!("destinations: {bb}"))?
                    }
                    Activation::Deselected => self.io.send(format_args!("released {label}"))?,
                    Activation::Moved(m) => self.report(m)?,
                }
            }

            Command::Moves(label) => {
                let destinations = self.game.destinations(lookup(&self.game, &label)?)?;
                self.io.send(format_args!("destinations: {destinations}"))?;
            }

            Command::Board => self.io.send(self.game.board())?,
            Command::Quit => {}
        }

        Ok(())
    }

    fn name(&self, id: PieceId) -> String {
        let piece = self.game.board().piece(id);
        piece.map_or_else(|| id.to_string(), Piece::to_string)
    }

    fn report(&mut self, m: Move) -> io::Result<()> {
        let mut line = format!("{} {} -> {}", self.name(m.piece), m.whence, m.whither);
        if let Some(captured) = m.capture {
            line += &format!(", captures {}", self.name(captured));
        }

        self.io.send(line)?;
        self.io.send(self.game.board())?;
        let turn = m.next_turn;
        self.io.send(format_args!("{} ({}) to play", turn, turn.colour()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    const COMMANDS: [&str; 7] = ["select", "deselect", "move", "click", "moves", "board", "quit"];

    fn session(input: &str) -> String {
        let mut output = Vec::new();
        let io = Io::new(&mut output, input.as_bytes());
        Session::new(Game::default(), io).run().unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn commands_can_be_parsed() {
        assert_eq!("select CC-M1".parse(), Ok(Command::Select("CC-M1".into())));
        assert_eq!(" deselect ".parse(), Ok(Command::Deselect));
        assert_eq!("move 2 6".parse(), Ok(Command::Move(2, 6)));
        assert_eq!("click IC-S1".parse(), Ok(Command::ClickPiece("IC-S1".into())));
        assert_eq!("click 4 5".parse(), Ok(Command::ClickSquare(4, 5)));
        assert_eq!("moves CC-P1".parse(), Ok(Command::Moves("CC-P1".into())));
        assert_eq!("board".parse(), Ok(Command::Board));
        assert_eq!("quit".parse(), Ok(Command::Quit));
    }

    #[test]
    fn parsing_command_fails_on_wrong_arity() {
        assert_eq!(
            "select".parse::<Command>(),
            Err(ParseCommandError::Usage("select <label>"))
        );

        assert_eq!(
            "move 1".parse::<Command>(),
            Err(ParseCommandError::Usage("move <x> <y>"))
        );
    }

    #[test]
    fn parsing_command_fails_on_invalid_coordinates() {
        assert!(matches!(
            "move a 1".parse::<Command>(),
            Err(ParseCommandError::InvalidCoordinate(_))
        ));
    }

    #[proptest]
    fn parsing_command_fails_if_unknown(
        #[strategy("[a-z]+")]
        #[filter(!COMMANDS.contains(&#s.as_str()))]
        s: String,
    ) {
        assert_eq!(s.parse::<Command>(), Err(ParseCommandError::Unknown(s.clone())));
    }

    #[test]
    fn session_starts_by_printing_the_board() {
        assert_eq!(session(""), format!("{}\n", Game::default().board()));
    }

    #[test]
    fn session_plays_moves() {
        let out = session("select CC-B1\nmove 2 6\nquit\nboard\n");
        assert!(out.contains("destinations: (2, 6)\n"));
        assert!(out.contains("CC-B1 (2, 7) -> (2, 6)\n"));
        assert!(out.contains("north (black) to play\n"));
        assert_eq!(out.matches(" 8 |").count(), 2);
    }

    #[test]
    fn session_reports_rejected_commands_and_carries_on() {
        let out = session("select IC-S1\nselect IC-X9\nfly\nclick CC-B1\nclick CC-B1\n");
        assert!(out.contains("error: piece `#24` may not act during the south turn\n"));
        assert!(out.contains("error: there is no piece labeled `IC-X9`\n"));
        assert!(out.contains("error: unknown command `fly`\n"));
        assert!(out.contains("destinations: (2, 6)\n"));
        assert!(out.contains("released CC-B1\n"));
    }

    #[test]
    fn session_switches_the_selection_between_friends() {
        let out = session("click CC-B1\nclick CC-B2\nmove 3 6\n");
        assert!(out.contains("destinations: (2, 6)\n"));
        assert!(out.contains("destinations: (3, 6)\n"));
        assert!(out.contains("CC-B2 (3, 7) -> (3, 6)\n"), "{out}");
        assert!(!out.contains("error"));
    }

    #[test]
    fn session_reports_captures() {
        let input = "click CC-B1\nclick 2 6\nclick IC-S1\nmove 1 4\n\
                     click CC-B1\nmove 2 5\nclick IC-S1\nclick CC-B1\n";

        let out = session(input);
        assert!(out.contains("IC-S1 (1, 4) -> (2, 5), captures CC-B1\n"), "{out}");
        assert!(out.contains("south (red) to play\n"));
    }
}
