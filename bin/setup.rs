use anyhow::{Context, Error as Anyhow};
use derive_more::{Display, Error, From};
use lib::chess::{Color, Game, Role, SetupError, Square};
use ron::ser::{to_string_pretty, PrettyConfig};
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path, str::FromStr};
use tracing::{info, instrument};

/// The reason why parsing [`Setup`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display("failed to parse setup")]
pub struct ParseSetupError(ron::de::SpannedError);

/// A piece standing on a square.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Placement {
    pub square: Square,
    pub role: Role,
    pub color: Color,
}

/// A starting position, written in [RON].
///
/// ```text
/// (turn: White, pieces: [(square: E1, role: King, color: White), ...])
/// ```
///
/// [RON]: https://github.com/ron-rs/ron
#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Setup {
    pub turn: Color,
    pub pieces: Vec<Placement>,
}

impl Setup {
    /// Reads a [`Setup`] from a file.
    #[instrument(level = "debug", err)]
    pub fn load(path: &Path) -> Result<Self, Anyhow> {
        let ron = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;

        Ok(ron.parse()?)
    }

    /// Places every piece on an empty board.
    ///
    /// Fails unless play may proceed from the resulting position.
    pub fn game(&self) -> Result<Game, SetupError> {
        let mut game = Game::new();

        for p in &self.pieces {
            game.setup_piece(p.square, p.role, p.color)?;
        }

        game.set_turn(self.turn)?;
        game.validate()?;
        Ok(game)
    }
}

/// Captures the current piece placement and side to move.
impl From<&Game> for Setup {
    fn from(game: &Game) -> Self {
        Setup {
            turn: game.turn(),
            pieces: game
                .export()
                .into_iter()
                .map(|(square, p)| Placement {
                    square,
                    role: p.role(),
                    color: p.color(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = PrettyConfig::new().depth_limit(2);
        f.write_str(&to_string_pretty(self, config).map_err(|_| fmt::Error)?)
    }
}

impl FromStr for Setup {
    type Err = ParseSetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}

/// The game described by a setup file, or the standard starting position.
pub fn load(path: Option<&Path>) -> Result<Game, Anyhow> {
    match path {
        None => Ok(Game::default()),
        Some(path) => {
            let game = Setup::load(path)?.game()?;
            info!(path = %path.display(), pieces = game.export().len(), turn = %game.turn());
            Ok(game)
        }
    }
}
