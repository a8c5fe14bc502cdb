use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{Game, Square};
use tracing::{info, instrument};

/// Lists the squares a piece may legally move to.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Moves {
    /// The square of the piece to move.
    square: Square,
}

impl Moves {
    #[instrument(level = "trace", skip(self, game), err)]
    pub fn execute(self, game: &Game) -> Result<(), Anyhow> {
        let squares: Vec<_> = game
            .legal_moves(self.square)
            .iter()
            .map(|sq| sq.to_string())
            .collect();

        if squares.is_empty() {
            info!(square = %self.square, status = %game.status(), "no legal moves");
        }

        println!("{}", squares.join(" "));
        Ok(())
    }
}
