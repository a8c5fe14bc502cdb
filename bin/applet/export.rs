use crate::setup::Setup;
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::Game;
use tracing::instrument;

/// Prints the starting position as a setup file.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Export {}

impl Export {
    #[instrument(level = "trace", skip(self, game), err)]
    pub fn execute(self, game: &Game) -> Result<(), Anyhow> {
        println!("{}", Setup::from(game));
        Ok(())
    }
}
