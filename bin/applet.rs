use anyhow::Error as Anyhow;
use clap::Subcommand;
use derive_more::From;
use lib::chess::Game;

mod export;
mod moves;
mod perft;
mod play;

#[derive(From, Subcommand)]
pub enum Applet {
    Play(play::Play),
    Moves(moves::Moves),
    Perft(perft::Perft),
    Export(export::Export),
}

impl Default for Applet {
    fn default() -> Self {
        play::Play::default().into()
    }
}

impl Applet {
    /// Runs the applet on the game loaded from the setup file.
    pub fn execute(self, game: Game) -> Result<(), Anyhow> {
        match self {
            Applet::Play(a) => a.execute(game),
            Applet::Moves(a) => a.execute(&game),
            Applet::Perft(a) => a.execute(&game),
            Applet::Export(a) => a.execute(&game),
        }
    }
}
