use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::Rng as _;
use stackfall_engine::{FigureSeed, GameConfig, Progression};

use crate::util;

use self::{play::PlayArg, simulate::SimulateArg};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Run a seeded game with a random player and print the final state as JSON
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}

/// Options shared by every mode that starts a session.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SessionConfigArg {
    /// Figure sequence seed as 32 hex digits (random if omitted)
    #[clap(long)]
    seed: Option<FigureSeed>,
    /// JSON file with `level_thresholds` and `gravity_intervals_ms` tables
    #[clap(long)]
    progression: Option<PathBuf>,
}

impl SessionConfigArg {
    /// Builds the session configuration, drawing a seed if none was given.
    pub(crate) fn load(&self) -> anyhow::Result<GameConfig> {
        let progression = match &self.progression {
            Some(path) => util::read_json_file("progression", path)?,
            None => Progression::default(),
        };
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        log::info!("figure seed {seed}");
        Ok(GameConfig {
            progression,
            seed: Some(seed),
        })
    }
}
