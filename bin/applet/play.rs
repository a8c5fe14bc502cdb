use crate::setup::Setup;
use anyhow::Error as Anyhow;
use clap::Parser;
use derive_more::{Display, Error, From};
use lib::chess::{Game, Move, ParseMoveError, ParseRoleError, ParseSquareError};
use lib::chess::{Rank, Role, Square};
use std::io::{stdin, stdout, BufRead, Write};
use std::str::FromStr;
use tracing::{instrument, warn};

/// Plays a game of chess in the terminal.
///
/// Moves are read as pairs of squares, such as `e2e4` or `e2 e4`. Besides moves,
/// `moves <square>`, `promote <square> <piece>`, `board`, `export` and `quit`
/// are understood.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {}

/// A line of input.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Command {
    Play(Move),
    Moves(Square),
    Promote(Square, Role),
    Board,
    Export,
    Quit,
}

/// The reason why parsing [`Command`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
enum ParseCommandError {
    #[display("expected a move, `moves`, `promote`, `board`, `export` or `quit`")]
    #[from(skip)]
    Unknown,
    #[display("failed to parse command")]
    Move(ParseMoveError),
    #[display("failed to parse command")]
    Square(ParseSquareError),
    #[display("failed to parse command")]
    Role(ParseRoleError),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<_> = s.split_whitespace().collect();

        match tokens.as_slice() {
            ["quit"] => Ok(Command::Quit),
            ["board"] => Ok(Command::Board),
            ["export"] => Ok(Command::Export),
            ["moves", sq] => Ok(Command::Moves(sq.parse()?)),
            ["promote", sq, r] => Ok(Command::Promote(sq.parse()?, r.to_lowercase().parse()?)),
            [_] | [_, _] if s.contains(|c: char| c.is_ascii_digit()) => Ok(Command::Play(s.parse()?)),
            _ => Err(ParseCommandError::Unknown),
        }
    }
}

impl Play {
    #[instrument(level = "trace", skip(self, game), err)]
    pub fn execute(self, mut game: Game) -> Result<(), Anyhow> {
        let mut out = stdout().lock();

        writeln!(out, "{}", game.position().board())?;

        for line in stdin().lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match line.parse() {
                Err(e) => warn!("{:#}", Anyhow::from(e)),
                Ok(Command::Quit) => break,
                Ok(cmd) => {
                    if let Err(e) = Self::interpret(&mut game, cmd, &mut out) {
                        warn!("{:#}", e);
                    }
                }
            }

            if game.status().is_terminal() {
                writeln!(out, "game over by {}", game.status())?;
                break;
            }
        }

        Ok(())
    }

    fn interpret(game: &mut Game, cmd: Command, out: &mut impl Write) -> Result<(), Anyhow> {
        match cmd {
            Command::Quit => {}
            Command::Board => writeln!(out, "{}", game.position().board())?,
            Command::Export => writeln!(out, "{}", Setup::from(&*game))?,
            Command::Moves(sq) => {
                let squares: Vec<_> = game.legal_moves(sq).iter().map(|s| s.to_string()).collect();
                writeln!(out, "{}", squares.join(" "))?;
            }

            Command::Promote(sq, role) => {
                let status = game.promote(sq, role)?;
                writeln!(out, "{}", game.position().board())?;
                writeln!(out, "{status}")?;

                if status.is_check() {
                    writeln!(out, "{} king is in check", game.turn())?;
                }
            }

            Command::Play(m) => {
                let result = game.play(m)?;
                writeln!(out, "{}", game.position().board())?;
                writeln!(out, "{result}")?;

                if result.status.is_check() {
                    writeln!(out, "{} king is in check", result.turn)?;
                }

                let last = Rank::promotion(result.piece.color());
                if result.piece.role() == Role::Pawn && m.whither().rank() == last {
                    writeln!(out, "promote {} to q, r, b or n", m.whither())?;
                }
            }
        }

        Ok(())
    }
}
