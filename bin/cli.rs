use crate::{applet::Applet, setup};
use anyhow::Error as Anyhow;
use clap::Parser;
use std::{cmp::min, io::stderr, path::PathBuf};
use tracing::{instrument, Level};
use tracing_subscriber::fmt::{format::FmtSpan, layer};
use tracing_subscriber::{filter::Targets, prelude::*, registry, util::SubscriberInitExt};

/// Command line interface.
#[derive(Parser)]
#[clap(author, version, about)]
pub struct Cli {
    /// Verbosity level.
    #[clap(short, long, global = true)]
    #[cfg_attr(not(debug_assertions), clap(default_value_t = Level::INFO))]
    #[cfg_attr(debug_assertions, clap(default_value_t = Level::DEBUG))]
    verbosity: Level,

    /// A RON file describing the starting position, such as
    /// `(turn: White, pieces: [(square: E1, role: King, color: White), ...])`.
    ///
    /// The standard starting position is used if omitted.
    #[clap(short, long, global = true)]
    setup: Option<PathBuf>,

    #[clap(subcommand)]
    applet: Option<Applet>,
}

impl Cli {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let filter = Targets::new()
            .with_target("cli", self.verbosity)
            .with_target("lib", self.verbosity)
            .with_default(min(Level::WARN, self.verbosity));

        let writer = layer()
            .pretty()
            .with_target(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(stderr);

        registry().with(filter).with(writer).init();

        let game = setup::load(self.setup.as_deref())?;
        self.applet.unwrap_or_default().execute(game)
    }
}
