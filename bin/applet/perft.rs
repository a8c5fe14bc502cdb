use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{Game, Position};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Counts the leaf nodes of the tree of legal moves.
///
/// Pawns that reach the last rank are counted once, regardless of promotion.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Perft {
    /// How many plies deep to count.
    depth: u8,
}

fn perft(pos: &Position, depth: u8) -> usize {
    match depth {
        0 => 1,
        1 => pos.moves().count(),
        _ => pos
            .moves()
            .map(|m| {
                let mut next = pos.clone();
                next.play_unchecked(m);
                perft(&next, depth - 1)
            })
            .sum(),
    }
}

impl Perft {
    #[instrument(level = "trace", skip(self, game), err)]
    pub fn execute(self, game: &Game) -> Result<(), Anyhow> {
        let pos = game.position();
        let timer = Instant::now();

        let nodes: usize = match self.depth {
            0 => 1,
            d => pos
                .moves()
                .collect::<Vec<_>>()
                .into_par_iter()
                .map(|m| {
                    let mut next = pos.clone();
                    next.play_unchecked(m);
                    let nodes = perft(&next, d - 1);
                    debug!(%m, nodes);
                    nodes
                })
                .sum(),
        };

        info!(depth = self.depth, nodes, elapsed = ?timer.elapsed());
        println!("{nodes}");
        Ok(())
    }
}
