use std::path::PathBuf;

use stackfall_engine::GameSession;

use crate::{command::SessionConfigArg, tui::Runtime, util};

use self::app::PlayApp;

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    config: SessionConfigArg,
    /// Write log records to this file (the terminal is taken by the game)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { config, log_file } = arg;

    if let Some(path) = log_file {
        util::init_file_logger(path)?;
    }
    let session = GameSession::new(config.load()?);

    let mut app = PlayApp::new(session);
    Runtime::new().run(&mut app)?;

    let stats = app.session().stats();
    log::info!(
        "final score {}, level {}, {} lines",
        stats.score(),
        stats.level(),
        stats.cleared_lines()
    );
    Ok(())
}
